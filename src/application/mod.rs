//! Application layer containing the core business logic orchestration.
//!
//! This module defines the `PaymentService`, the primary entry point for
//! creating and reading payment records. It validates submissions, allocates
//! identifiers and persists records through the storage port.

pub mod service;
