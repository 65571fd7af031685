use super::transaction::Currency;
use crate::error::{PaymeeError, Result};
use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use secrecy::{ExposeSecret, Secret, SecretString};
use serde::{Deserialize, Serialize, Serializer};
use serde_json::{Map, Value};
use std::io::Read;

/// Provider code used in callback routes.
pub const PROVIDER_CODE: &str = "paymee";

/// Payload keys computed by the adapter; host-supplied extras never override them.
const RESERVED_KEYS: [&str; 10] = [
    "paymee_api_key",
    "base_url",
    "reference",
    "amount",
    "customer_email",
    "currency",
    "partner_email",
    "return_url",
    "cancel_url",
    "error_url",
];

/// Gateway callbacks, each served by the host under `/payment/paymee/<kind>`.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum CallbackKind {
    Return,
    Cancel,
    Error,
}

impl CallbackKind {
    pub fn path(&self) -> String {
        let kind = match self {
            Self::Return => "return",
            Self::Cancel => "cancel",
            Self::Error => "error",
        };
        format!("/payment/{PROVIDER_CODE}/{kind}")
    }

    pub fn url(&self, base_url: &str) -> String {
        format!("{base_url}{}", self.path())
    }
}

/// Paymee credentials stored on the acquirer.
#[derive(Debug, Clone, Deserialize)]
pub struct AcquirerConfig {
    pub api_key: SecretString,
    #[serde(default)]
    pub base_url: Option<String>,
}

/// Values the host hands over when a payment is started.
#[derive(Debug, Deserialize, Serialize, PartialEq, Clone)]
pub struct TransactionValues {
    pub reference: String,
    pub amount: Decimal,
    pub currency: Currency,
    #[serde(default)]
    pub partner_email: Option<String>,
    /// Any further host fields, forwarded unchanged.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// The form values posted to the Paymee gateway.
#[derive(Debug, Serialize, Clone)]
pub struct GatewayRequestPayload {
    #[serde(flatten)]
    pub extra: Map<String, Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub partner_email: Option<String>,
    /// Only revealed when the payload is serialized for the gateway.
    #[serde(serialize_with = "serialize_exposed")]
    pub paymee_api_key: SecretString,
    pub base_url: String,
    pub reference: String,
    /// Amount in minor units.
    pub amount: i64,
    pub customer_email: String,
    pub currency: String,
    pub return_url: String,
    pub cancel_url: String,
    pub error_url: String,
}

impl AcquirerConfig {
    pub fn new(api_key: impl Into<String>, base_url: Option<String>) -> Self {
        Self {
            api_key: Secret::new(api_key.into()),
            base_url,
        }
    }

    /// Loads the acquirer settings from a JSON document.
    pub fn from_reader<R: Read>(reader: R) -> Result<Self> {
        Ok(serde_json::from_reader(reader)?)
    }

    /// The configured base URL, falling back to the host's own URL.
    pub fn resolve_base_url<'a>(&'a self, host_base_url: &'a str) -> &'a str {
        match self.base_url.as_deref() {
            Some(url) if !url.is_empty() => url,
            _ => host_base_url,
        }
    }

    /// Builds the outbound request payload for a new payment.
    ///
    /// The amount is converted to minor units and truncated toward zero.
    pub fn build_request_payload(
        &self,
        values: &TransactionValues,
        host_base_url: &str,
    ) -> Result<GatewayRequestPayload> {
        let base_url = self.resolve_base_url(host_base_url).to_string();
        let amount = to_minor_units(values.amount)?;

        let mut extra = values.extra.clone();
        extra.retain(|key, _| !RESERVED_KEYS.contains(&key.as_str()));

        Ok(GatewayRequestPayload {
            extra,
            partner_email: values.partner_email.clone(),
            paymee_api_key: self.api_key.clone(),
            reference: values.reference.clone(),
            amount,
            customer_email: values.partner_email.clone().unwrap_or_default(),
            currency: values.currency.name.clone(),
            return_url: CallbackKind::Return.url(&base_url),
            cancel_url: CallbackKind::Cancel.url(&base_url),
            error_url: CallbackKind::Error.url(&base_url),
            base_url,
        })
    }
}

fn serialize_exposed<S>(secret: &SecretString, serializer: S) -> std::result::Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.serialize_str(secret.expose_secret())
}

fn to_minor_units(amount: Decimal) -> Result<i64> {
    amount
        .checked_mul(Decimal::ONE_HUNDRED)
        .and_then(|minor| minor.trunc().to_i64())
        .ok_or_else(|| PaymeeError::InvalidAmount(format!("{amount} does not fit in minor units")))
}
