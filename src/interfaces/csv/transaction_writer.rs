use crate::domain::transaction::PaymentTransaction;
use crate::error::Result;
use std::io::Write;

/// Writes payment transaction records as CSV, one row per record.
pub struct TransactionWriter<W: Write> {
    writer: csv::Writer<W>,
}

impl<W: Write> TransactionWriter<W> {
    pub fn new(sink: W) -> Self {
        Self {
            writer: csv::Writer::from_writer(sink),
        }
    }

    pub fn write_transactions<I>(&mut self, transactions: I) -> Result<()>
    where
        I: IntoIterator<Item = PaymentTransaction>,
    {
        for tx in transactions {
            self.writer.serialize(tx)?;
        }
        self.writer.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::transaction::{Currency, PaymentTransaction, TransactionState};
    use rust_decimal_macros::dec;

    #[test]
    fn test_writer_output() {
        let mut tx = PaymentTransaction::new(1, "SO001", dec!(10.5), Currency::new("TND"));
        tx.state = TransactionState::Pending;
        tx.acquirer_reference = Some("PM-1".into());

        let mut buf = Vec::new();
        TransactionWriter::new(&mut buf)
            .write_transactions(vec![tx])
            .unwrap();

        let output = String::from_utf8(buf).unwrap();
        let mut lines = output.lines();
        assert_eq!(
            lines.next(),
            Some("id,reference,acquirer_reference,state,amount,currency,date")
        );
        assert_eq!(lines.next(), Some("1,SO001,PM-1,pending,10.5,TND,"));
    }
}
