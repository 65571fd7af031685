use crate::domain::transaction::PaymentTransaction;
use crate::error::{PaymeeError, Result};
use std::io::Read;

/// Loads host transaction records from CSV, one record per row.
///
/// Cells are trimmed; an empty `acquirer_reference` or `date` cell reads as unset.
pub struct TransactionReader<R: Read> {
    reader: csv::Reader<R>,
}

impl<R: Read> TransactionReader<R> {
    pub fn new(source: R) -> Self {
        let reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .flexible(true)
            .from_reader(source);
        Self { reader }
    }

    /// Rows that fail to parse are yielded as errors; later rows are still read.
    pub fn transactions(self) -> impl Iterator<Item = Result<PaymentTransaction>> {
        self.reader
            .into_deserialize()
            .map(|result| result.map_err(PaymeeError::from))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::transaction::TransactionState;
    use crate::interfaces::csv::transaction_writer::TransactionWriter;
    use rust_decimal_macros::dec;

    #[test]
    fn test_reader_valid_stream() {
        let data = "id, reference, acquirer_reference, state, amount, currency, date\n\
                    1, SO001, , draft, 10.5, TND, \n\
                    2, SO002, PM-2, done, 3.0, TND, 2026-01-02T10:00:00Z";
        let reader = TransactionReader::new(data.as_bytes());
        let results: Vec<Result<PaymentTransaction>> = reader.transactions().collect();

        assert_eq!(results.len(), 2);
        let tx1 = results[0].as_ref().unwrap();
        assert_eq!(tx1.reference, "SO001");
        assert_eq!(tx1.acquirer_reference, None);
        assert_eq!(tx1.amount, dec!(10.5));
        assert_eq!(tx1.currency.name, "TND");
        assert_eq!(tx1.date, None);

        let tx2 = results[1].as_ref().unwrap();
        assert_eq!(tx2.state, TransactionState::Done);
        assert_eq!(tx2.acquirer_reference.as_deref(), Some("PM-2"));
        assert!(tx2.date.is_some());
    }

    #[test]
    fn test_reader_keeps_amount_precision() {
        let data = "id, reference, acquirer_reference, state, amount, currency, date\n\
                    1, SO001, , draft, 12345678901234567.89, TND, \n\
                    2, SO002, , draft, 10.50, TND, ";
        let reader = TransactionReader::new(data.as_bytes());
        let records: Vec<PaymentTransaction> = reader.transactions().map(|r| r.unwrap()).collect();

        assert_eq!(records[0].amount, dec!(12345678901234567.89));
        assert_eq!(records[1].amount.to_string(), "10.50");

        let mut buf = Vec::new();
        TransactionWriter::new(&mut buf)
            .write_transactions(records)
            .unwrap();
        let output = String::from_utf8(buf).unwrap();
        assert!(output.contains("1,SO001,,draft,12345678901234567.89,TND,"));
        assert!(output.contains("2,SO002,,draft,10.50,TND,"));
    }

    #[test]
    fn test_reader_malformed_line() {
        let data = "id, reference, acquirer_reference, state, amount, currency, date\n\
                    1, SO001, , paid, 10.5, TND, ";
        let reader = TransactionReader::new(data.as_bytes());
        let results: Vec<Result<PaymentTransaction>> = reader.transactions().collect();

        assert!(results[0].is_err());
    }
}
