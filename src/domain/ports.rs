use super::payment::Payment;
use crate::error::Result;
use async_trait::async_trait;
use std::sync::Arc;

/// Shared handle to a `PaymentStore` implementation.
pub type PaymentStoreArc = Arc<dyn PaymentStore>;

#[async_trait]
pub trait PaymentStore: Send + Sync {
    /// Persists a new payment. Fails with `DuplicateId` when the identifier
    /// is already taken; this constraint is what makes identifier
    /// reservation atomic under concurrent inserts.
    async fn insert(&self, payment: Payment) -> Result<()>;
    async fn get(&self, id: &str) -> Result<Option<Payment>>;
    async fn exists(&self, id: &str) -> Result<bool>;
}
