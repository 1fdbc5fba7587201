use super::amount::Amount;
use chrono::{DateTime, Utc};
use serde::Serialize;

/// Purpose applied when the form omits the field, and when reading legacy
/// records stored before the purpose column existed.
pub const DEFAULT_PURPOSE: &str = "Возврат неиспользованного аванса";

/// A persisted payment record.
///
/// `payload` is stored alongside the fields it was derived from; re-encoding
/// the same requisites, purpose, payer name and kopecks reproduces it byte
/// for byte.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Payment {
    pub id: String,
    pub payer_name: String,
    pub amount: Amount,
    pub purpose: String,
    pub created_at: DateTime<Utc>,
    pub payload: String,
}

/// Raw form input for creating a payment, prior to validation.
///
/// `purpose` is `None` when the form omitted the field entirely, which is
/// distinct from submitting an empty value.
#[derive(Debug, Clone, Default)]
pub struct NewPayment {
    pub payer_name: String,
    pub amount: String,
    pub purpose: Option<String>,
}
