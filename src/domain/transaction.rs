use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A currency as known to the host, identified by its ISO name (e.g. `TND`).
#[derive(Debug, Serialize, Deserialize, PartialEq, Eq, Clone)]
#[serde(transparent)]
pub struct Currency {
    pub name: String,
}

impl Currency {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

/// Lifecycle states of a host payment transaction.
///
/// The lifecycle itself belongs to the host; the adapter only ever moves a record
/// to `Pending`, `Done` or `Cancel`.
#[derive(Debug, Serialize, Deserialize, PartialEq, Eq, Clone, Copy, Default)]
#[serde(rename_all = "lowercase")]
pub enum TransactionState {
    #[default]
    Draft,
    Pending,
    Authorized,
    Done,
    Cancel,
    Error,
}

/// A host-owned payment transaction record.
#[derive(Debug, Serialize, Deserialize, PartialEq, Clone)]
pub struct PaymentTransaction {
    pub id: u64,
    pub reference: String,
    pub acquirer_reference: Option<String>,
    #[serde(default)]
    pub state: TransactionState,
    /// Kept as text on the wire so the stored scale and precision survive a round trip.
    #[serde(with = "rust_decimal::serde::str")]
    pub amount: Decimal,
    pub currency: Currency,
    pub date: Option<DateTime<Utc>>,
}

impl PaymentTransaction {
    pub fn new(id: u64, reference: impl Into<String>, amount: Decimal, currency: Currency) -> Self {
        Self {
            id,
            reference: reference.into(),
            acquirer_reference: None,
            state: TransactionState::Draft,
            amount,
            currency,
            date: None,
        }
    }

    /// Applies a partial update the way the host's write mechanism would.
    ///
    /// A `None` state leaves the current state untouched.
    pub fn apply(&mut self, update: &TransactionUpdate) {
        self.acquirer_reference = update.acquirer_reference.clone();
        self.date = Some(update.date);
        if let Some(state) = update.state {
            self.state = state;
        }
    }
}

/// The fields a notification is allowed to write onto a record.
#[derive(Debug, PartialEq, Clone)]
pub struct TransactionUpdate {
    pub acquirer_reference: Option<String>,
    pub date: DateTime<Utc>,
    pub state: Option<TransactionState>,
}
