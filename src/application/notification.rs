use crate::domain::notification::{InvalidParameter, NotificationPayload};
use crate::domain::ports::TransactionRepositoryBox;
use crate::domain::transaction::{PaymentTransaction, TransactionUpdate};
use crate::error::{PaymeeError, Result};
use chrono::Utc;
use tracing::{debug, warn};

/// What happened to a notification run through [`NotificationHandler::process_notification`].
#[derive(Debug, PartialEq)]
pub struct NotificationOutcome {
    pub transaction: PaymentTransaction,
    pub invalid_parameters: Vec<InvalidParameter>,
    pub written: bool,
}

/// Matches Paymee notifications to host transactions and applies their status.
///
/// The three steps are exposed separately so the host can run its own checks in
/// between them.
pub struct NotificationHandler {
    repository: TransactionRepositoryBox,
}

impl NotificationHandler {
    pub fn new(repository: TransactionRepositoryBox) -> Self {
        Self { repository }
    }

    /// Locates the one transaction the notification refers to.
    pub async fn find_transaction(&self, payload: &NotificationPayload) -> Result<PaymentTransaction> {
        let reference = non_empty(&payload.reference);
        let tx_id = non_empty(&payload.paymee_tx_id);

        let Some(reference) = reference.filter(|_| tx_id.is_some()) else {
            return Err(PaymeeError::MissingReference {
                reference: payload.reference.clone(),
                tx_id: payload.paymee_tx_id.clone(),
            });
        };

        let tx = self.repository.find_unique_by_reference(reference).await?;
        debug!(reference, id = tx.id, "matched paymee notification");
        Ok(tx)
    }

    /// Compares the notification with what the record already holds.
    ///
    /// Returns at most one entry and never rejects anything itself.
    pub fn find_invalid_parameters(
        &self,
        tx: &PaymentTransaction,
        payload: &NotificationPayload,
    ) -> Vec<InvalidParameter> {
        let mut invalid_parameters = Vec::new();
        if let Some(stored) = non_empty(&tx.acquirer_reference)
            && payload.paymee_tx_id.as_deref() != Some(stored)
        {
            invalid_parameters.push(InvalidParameter {
                field: "Transaction Id",
                received: payload.paymee_tx_id.clone(),
                expected: stored.to_string(),
            });
        }
        invalid_parameters
    }

    /// Writes the notified status onto the record.
    ///
    /// The acquirer reference and date are always written; the state only when
    /// the status is one Paymee documents.
    pub async fn apply_status(
        &self,
        tx: &PaymentTransaction,
        payload: &NotificationPayload,
    ) -> Result<bool> {
        let state = payload.status().and_then(|status| status.target_state());
        let update = TransactionUpdate {
            acquirer_reference: payload.paymee_tx_id.clone(),
            date: Utc::now(),
            state,
        };

        debug!(
            reference = %tx.reference,
            status = ?payload.status,
            new_state = ?state,
            "applying paymee status"
        );
        self.repository.write(tx.id, update).await
    }

    /// Runs locate, validate and apply in order.
    ///
    /// Invalid parameters are reported but do not prevent the status from being applied.
    pub async fn process_notification(
        &self,
        payload: &NotificationPayload,
    ) -> Result<NotificationOutcome> {
        let tx = self.find_transaction(payload).await?;

        let invalid_parameters = self.find_invalid_parameters(&tx, payload);
        for param in &invalid_parameters {
            warn!(
                reference = %tx.reference,
                field = param.field,
                received = ?param.received,
                expected = %param.expected,
                "paymee notification disagrees with stored transaction"
            );
        }

        let written = self.apply_status(&tx, payload).await?;
        Ok(NotificationOutcome {
            transaction: tx,
            invalid_parameters,
            written,
        })
    }
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.is_empty())
}
