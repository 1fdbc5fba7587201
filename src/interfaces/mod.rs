//! Interfaces to the outside world: the HTTP form flow and the QR
//! rasterizer.

pub mod http;
pub mod qr;
