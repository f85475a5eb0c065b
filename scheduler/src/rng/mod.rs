//! Deterministic random number generation
//!
//! Uses the xorshift64* algorithm for fast, deterministic random number
//! generation. CRITICAL: All randomness in workload generation MUST go
//! through this module.

mod xorshift;

pub use xorshift::RngManager;
