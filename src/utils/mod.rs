//! Utils Module - Helper Functions & Shared Utilities
//!
//! Konstanta dan telemetry yang digunakan di seluruh aplikasi.

pub mod constants;
pub mod telemetry;

pub use constants::*;
pub use telemetry::*;
