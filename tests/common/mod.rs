#![allow(dead_code)]

use paymee::domain::notification::NotificationPayload;
use paymee::domain::transaction::{Currency, PaymentTransaction};
use paymee::infrastructure::in_memory::InMemoryTransactionRepository;
use rust_decimal_macros::dec;
use std::io::{Error, Write};
use tempfile::NamedTempFile;

pub fn payload(reference: &str, tx_id: &str, status: &str) -> NotificationPayload {
    NotificationPayload {
        reference: Some(reference.to_string()),
        paymee_tx_id: Some(tx_id.to_string()),
        status: Some(status.to_string()),
    }
}

pub async fn seeded_repository(references: &[&str]) -> InMemoryTransactionRepository {
    let repo = InMemoryTransactionRepository::new();
    for (i, reference) in references.iter().enumerate() {
        let id = i as u64 + 1;
        repo.insert(PaymentTransaction::new(
            id,
            *reference,
            dec!(10.5),
            Currency::new("TND"),
        ))
        .await;
    }
    repo
}

pub fn payload_file(json: &str) -> Result<NamedTempFile, Error> {
    let mut file = NamedTempFile::new()?;
    write!(file, "{json}")?;
    Ok(file)
}
