use crate::domain::amount::Amount;
use crate::domain::id;
use crate::domain::payload::Requisites;
use crate::domain::payment::{NewPayment, Payment};
use crate::domain::ports::PaymentStoreArc;
use crate::error::{PaymentError, Result};
use chrono::{Timelike, Utc};
use tracing::{debug, info};

pub use crate::domain::payment::DEFAULT_PURPOSE;

/// Maximum payer name length, in characters.
pub const MAX_PAYER_NAME_CHARS: usize = 150;
/// Maximum purpose length, in characters.
pub const MAX_PURPOSE_CHARS: usize = 255;

pub const MSG_PAYER_NAME_REQUIRED: &str = "ФИО плательщика обязательно";
pub const MSG_PAYER_NAME_TOO_LONG: &str = "ФИО слишком длинное (до 150 символов)";
pub const MSG_PURPOSE_REQUIRED: &str = "Укажите назначение платежа";
pub const MSG_PURPOSE_TOO_LONG: &str = "Назначение платежа должно быть до 255 символов";

/// Identifier draws before giving up. With a 62^6 space this is only ever
/// reached when the store is pathologically full.
const MAX_ID_ATTEMPTS: u32 = 256;

/// The main entry point for creating and reading payment records.
///
/// `PaymentService` validates submissions, allocates collision-free
/// identifiers, encodes the QR payload and persists records through the
/// storage port. It owns the fixed payee requisites and a shared store
/// handle, and is cheap to clone.
#[derive(Clone)]
pub struct PaymentService {
    store: PaymentStoreArc,
    requisites: Requisites,
}

impl PaymentService {
    /// Creates a new `PaymentService` instance.
    ///
    /// # Arguments
    ///
    /// * `store` - The store for payment records.
    /// * `requisites` - The fixed payee banking requisites.
    pub fn new(store: PaymentStoreArc, requisites: Requisites) -> Self {
        Self { store, requisites }
    }

    /// Validates a submission and persists it as a new payment record.
    ///
    /// All field violations are collected before anything else happens; a
    /// failed submission never allocates an identifier and never touches the
    /// store. The error list preserves form order: payer name, purpose,
    /// amount.
    pub async fn create(&self, input: NewPayment) -> Result<Payment> {
        let mut errors = Vec::new();

        // Presence is checked on the trimmed name, length on the raw one.
        if input.payer_name.trim().is_empty() {
            errors.push(MSG_PAYER_NAME_REQUIRED.to_string());
        } else if input.payer_name.chars().count() > MAX_PAYER_NAME_CHARS {
            errors.push(MSG_PAYER_NAME_TOO_LONG.to_string());
        }

        let purpose = match &input.purpose {
            None => DEFAULT_PURPOSE.to_string(),
            Some(raw) => {
                let trimmed = raw.trim();
                if trimmed.is_empty() {
                    errors.push(MSG_PURPOSE_REQUIRED.to_string());
                } else if trimmed.chars().count() > MAX_PURPOSE_CHARS {
                    errors.push(MSG_PURPOSE_TOO_LONG.to_string());
                }
                trimmed.to_string()
            }
        };

        let amount = match Amount::parse(&input.amount) {
            Ok(amount) => Some(amount),
            Err(e) => {
                errors.push(e.to_string());
                None
            }
        };

        let (Some(amount), true) = (amount, errors.is_empty()) else {
            return Err(PaymentError::Validation(errors));
        };

        let payer_name = input.payer_name.trim().to_string();
        let payload = self
            .requisites
            .encode_payload(&purpose, &payer_name, amount.kopecks());
        let now = Utc::now();
        let created_at = now.with_nanosecond(0).unwrap_or(now);

        for _ in 0..MAX_ID_ATTEMPTS {
            let id = id::random_id();
            if self.store.exists(&id).await? {
                debug!("identifier {} already taken, drawing again", id);
                continue;
            }
            let payment = Payment {
                id,
                payer_name: payer_name.clone(),
                amount,
                purpose: purpose.clone(),
                created_at,
                payload: payload.clone(),
            };
            match self.store.insert(payment.clone()).await {
                Ok(()) => {
                    info!(
                        "created payment {} ({} kopecks)",
                        payment.id,
                        payment.amount.kopecks()
                    );
                    return Ok(payment);
                }
                // Lost the reservation race; the store constraint is
                // authoritative, so draw a fresh identifier.
                Err(PaymentError::DuplicateId(_)) => continue,
                Err(e) => return Err(e),
            }
        }
        Err(PaymentError::IdSpaceExhausted(MAX_ID_ATTEMPTS))
    }

    /// Looks up a payment by identifier.
    ///
    /// Legacy records stored before the purpose column existed come back
    /// with an empty purpose from the adapters; the canonical default is
    /// substituted here so callers never see the gap.
    pub async fn get(&self, id: &str) -> Result<Payment> {
        let mut payment = self
            .store
            .get(id)
            .await?
            .ok_or_else(|| PaymentError::NotFound(id.to_string()))?;
        if payment.purpose.is_empty() {
            payment.purpose = DEFAULT_PURPOSE.to_string();
        }
        Ok(payment)
    }
}
