use super::transaction::TransactionState;
use serde::{Deserialize, Serialize};

/// Payment status codes reported by Paymee notifications.
#[derive(Debug, PartialEq, Eq, Clone)]
pub enum PaymeeStatus {
    Paid,
    Pending,
    Reversed,
    Refunded,
    Cancelled,
    Error,
    Unknown(String),
}

impl From<&str> for PaymeeStatus {
    fn from(code: &str) -> Self {
        match code {
            "PAID" => Self::Paid,
            "PENDING" => Self::Pending,
            "REVERSED" => Self::Reversed,
            "REFUNDED" => Self::Refunded,
            "CANCELLED" => Self::Cancelled,
            "ERROR" => Self::Error,
            other => Self::Unknown(other.to_string()),
        }
    }
}

impl PaymeeStatus {
    /// The host state this status moves a transaction to, if any.
    pub fn target_state(&self) -> Option<TransactionState> {
        match self {
            Self::Paid => Some(TransactionState::Done),
            Self::Pending | Self::Reversed | Self::Refunded => Some(TransactionState::Pending),
            Self::Cancelled | Self::Error => Some(TransactionState::Cancel),
            Self::Unknown(_) => None,
        }
    }
}

/// An asynchronous notification delivered by the gateway.
///
/// Every field is optional on the wire; presence is checked when the
/// notification is matched to a transaction.
#[derive(Debug, Serialize, Deserialize, PartialEq, Clone, Default)]
pub struct NotificationPayload {
    #[serde(default)]
    pub reference: Option<String>,
    #[serde(default)]
    pub paymee_tx_id: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
}

impl NotificationPayload {
    pub fn status(&self) -> Option<PaymeeStatus> {
        self.status.as_deref().map(PaymeeStatus::from)
    }
}

/// A field whose received value disagrees with what the record already holds.
#[derive(Debug, PartialEq, Eq, Clone)]
pub struct InvalidParameter {
    pub field: &'static str,
    pub received: Option<String>,
    pub expected: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        let cases = [
            ("PAID", Some(TransactionState::Done)),
            ("PENDING", Some(TransactionState::Pending)),
            ("REVERSED", Some(TransactionState::Pending)),
            ("REFUNDED", Some(TransactionState::Pending)),
            ("CANCELLED", Some(TransactionState::Cancel)),
            ("ERROR", Some(TransactionState::Cancel)),
            ("WAT", None),
            ("paid", None),
        ];

        for (code, expected) in cases {
            assert_eq!(PaymeeStatus::from(code).target_state(), expected, "{code}");
        }
    }

    #[test]
    fn test_payload_deserialization_with_missing_fields() {
        let payload: NotificationPayload =
            serde_json::from_str(r#"{"reference": "SO001", "status": "PAID"}"#).unwrap();

        assert_eq!(payload.reference.as_deref(), Some("SO001"));
        assert_eq!(payload.paymee_tx_id, None);
        assert_eq!(payload.status(), Some(PaymeeStatus::Paid));
    }
}
