//! Storage adapters implementing the `PaymentStore` port.

pub mod in_memory;
pub mod sqlite;
