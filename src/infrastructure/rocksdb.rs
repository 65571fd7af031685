use crate::domain::ports::TransactionRepository;
use crate::domain::transaction::{PaymentTransaction, TransactionUpdate};
use crate::error::{PaymeeError, Result};
use async_trait::async_trait;
use rocksdb::{ColumnFamilyDescriptor, DB, IteratorMode, Options};
use std::path::Path;
use std::sync::Arc;

/// Column Family for storing payment transaction records.
pub const CF_TRANSACTIONS: &str = "transactions";

/// A persistent transaction repository backed by RocksDB.
///
/// Records are keyed by their big-endian id and stored as JSON. Reference lookups
/// scan the column family, which is fine for the record counts a single acquirer
/// sees in the demo host.
///
/// This struct is thread-safe (`Clone` shares the underlying `Arc<DB>`).
#[derive(Clone)]
pub struct RocksDbTransactionRepository {
    db: Arc<DB>,
}

fn internal(message: impl Into<String>) -> PaymeeError {
    PaymeeError::StorageError(Box::new(std::io::Error::other(message.into())))
}

impl RocksDbTransactionRepository {
    /// Opens or creates a RocksDB instance at the specified path.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let mut opts = Options::default();
        opts.create_if_missing(true);
        opts.create_missing_column_families(true);

        let cf_transactions = ColumnFamilyDescriptor::new(CF_TRANSACTIONS, Options::default());
        let db = DB::open_cf_descriptors(&opts, path, vec![cf_transactions])?;

        Ok(Self { db: Arc::new(db) })
    }

    /// Inserts or replaces a record by id.
    pub fn insert(&self, tx: &PaymentTransaction) -> Result<()> {
        let cf = self
            .db
            .cf_handle(CF_TRANSACTIONS)
            .ok_or_else(|| internal("Transactions column family not found"))?;

        let value = serde_json::to_vec(tx)?;
        self.db.put_cf(&cf, tx.id.to_be_bytes(), value)?;
        Ok(())
    }

    pub fn get(&self, id: u64) -> Result<Option<PaymentTransaction>> {
        let cf = self
            .db
            .cf_handle(CF_TRANSACTIONS)
            .ok_or_else(|| internal("Transactions column family not found"))?;

        match self.db.get_cf(&cf, id.to_be_bytes())? {
            Some(bytes) => Ok(Some(serde_json::from_slice(&bytes)?)),
            None => Ok(None),
        }
    }

    /// All records, ordered by id.
    pub fn all(&self) -> Result<Vec<PaymentTransaction>> {
        let cf = self
            .db
            .cf_handle(CF_TRANSACTIONS)
            .ok_or_else(|| internal("Transactions column family not found"))?;

        let mut transactions = Vec::new();
        for item in self.db.iterator_cf(&cf, IteratorMode::Start) {
            let (_key, value) = item?;
            transactions.push(serde_json::from_slice(&value)?);
        }
        Ok(transactions)
    }
}

#[async_trait]
impl TransactionRepository for RocksDbTransactionRepository {
    async fn search_by_reference(&self, reference: &str) -> Result<Vec<PaymentTransaction>> {
        Ok(self
            .all()?
            .into_iter()
            .filter(|tx| tx.reference == reference)
            .collect())
    }

    async fn write(&self, id: u64, update: TransactionUpdate) -> Result<bool> {
        let Some(mut tx) = self.get(id)? else {
            return Ok(false);
        };
        tx.apply(&update);
        self.insert(&tx)?;
        Ok(true)
    }
}
