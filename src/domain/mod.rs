//! Domain layer: the pure building blocks of payment QR generation.
//!
//! Amount normalization, payload encoding and identifier generation are
//! side-effect free. The only seam to the outside world is the
//! `PaymentStore` port.

pub mod amount;
pub mod id;
pub mod payload;
pub mod payment;
pub mod ports;
