use miette::Diagnostic;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, PaymeeError>;

#[derive(Error, Debug, Diagnostic)]
pub enum PaymeeError {
    #[diagnostic(code(paymee::missing_reference))]
    #[error(
        "Paymee: received data with missing reference or transaction id (reference: {reference:?}, transaction id: {tx_id:?})"
    )]
    MissingReference {
        reference: Option<String>,
        tx_id: Option<String>,
    },
    #[diagnostic(code(paymee::no_transaction))]
    #[error("Paymee: received data for reference {0}; no transaction found")]
    NoTransactionFound(String),
    #[diagnostic(code(paymee::multiple_transactions))]
    #[error("Paymee: received data for reference {reference}; multiple transactions found ({count})")]
    MultipleTransactionsFound { reference: String, count: usize },
    #[diagnostic(code(paymee::invalid_amount))]
    #[error("Invalid amount: {0}")]
    InvalidAmount(String),
    #[error("CSV error: {0}")]
    CsvError(#[from] csv::Error),
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),
    #[error("Storage error: {0}")]
    StorageError(Box<dyn std::error::Error + Send + Sync>),
}

impl PaymeeError {
    /// Whether the error means the notification cannot be matched to exactly one record.
    pub fn is_data_integrity(&self) -> bool {
        matches!(
            self,
            Self::MissingReference { .. }
                | Self::NoTransactionFound(_)
                | Self::MultipleTransactionsFound { .. }
        )
    }
}

#[cfg(feature = "storage-rocksdb")]
impl From<rocksdb::Error> for PaymeeError {
    fn from(e: rocksdb::Error) -> Self {
        Self::StorageError(Box::new(e))
    }
}
