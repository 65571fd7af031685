use crate::domain::ports::TransactionRepository;
use crate::domain::transaction::{PaymentTransaction, TransactionUpdate};
use crate::error::Result;
use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::RwLock;

/// A thread-safe in-memory transaction repository.
///
/// Records are kept in insertion order. Nothing prevents two records from sharing
/// a reference, which is exactly the situation the lookup has to reject.
#[derive(Default, Clone)]
pub struct InMemoryTransactionRepository {
    transactions: Arc<RwLock<Vec<PaymentTransaction>>>,
}

impl InMemoryTransactionRepository {
    /// Creates a new, empty in-memory repository.
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts or replaces a record by id.
    pub async fn insert(&self, tx: PaymentTransaction) {
        let mut transactions = self.transactions.write().await;
        match transactions.iter_mut().find(|t| t.id == tx.id) {
            Some(existing) => *existing = tx,
            None => transactions.push(tx),
        }
    }

    pub async fn get(&self, id: u64) -> Option<PaymentTransaction> {
        let transactions = self.transactions.read().await;
        transactions.iter().find(|t| t.id == id).cloned()
    }

    pub async fn all(&self) -> Vec<PaymentTransaction> {
        self.transactions.read().await.clone()
    }
}

#[async_trait]
impl TransactionRepository for InMemoryTransactionRepository {
    async fn search_by_reference(&self, reference: &str) -> Result<Vec<PaymentTransaction>> {
        let transactions = self.transactions.read().await;
        Ok(transactions
            .iter()
            .filter(|t| t.reference == reference)
            .cloned()
            .collect())
    }

    async fn write(&self, id: u64, update: TransactionUpdate) -> Result<bool> {
        let mut transactions = self.transactions.write().await;
        match transactions.iter_mut().find(|t| t.id == id) {
            Some(tx) => {
                tx.apply(&update);
                Ok(true)
            }
            None => Ok(false),
        }
    }
}
