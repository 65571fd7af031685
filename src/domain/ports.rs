use super::transaction::{PaymentTransaction, TransactionUpdate};
use crate::error::{PaymeeError, Result};
use async_trait::async_trait;

/// Access to the host's payment transaction records.
#[async_trait]
pub trait TransactionRepository: Send + Sync {
    /// All records carrying the given reference.
    async fn search_by_reference(&self, reference: &str) -> Result<Vec<PaymentTransaction>>;

    /// Writes the update onto record `id`, returning whether a record was written.
    async fn write(&self, id: u64, update: TransactionUpdate) -> Result<bool>;

    /// The single record carrying `reference`.
    ///
    /// Zero or several matches are data-integrity errors.
    async fn find_unique_by_reference(&self, reference: &str) -> Result<PaymentTransaction> {
        let mut matches = self.search_by_reference(reference).await?;
        match matches.len() {
            0 => Err(PaymeeError::NoTransactionFound(reference.to_string())),
            1 => Ok(matches.remove(0)),
            count => Err(PaymeeError::MultipleTransactionsFound {
                reference: reference.to_string(),
                count,
            }),
        }
    }
}

pub type TransactionRepositoryBox = Box<dyn TransactionRepository>;
pub type TransactionRepositoryFactory = Box<dyn Fn() -> TransactionRepositoryBox + Send + Sync>;
