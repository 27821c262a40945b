//! Skillgate
//!
//! Rule-based skill activation for assistant prompt hooks. This crate
//! re-exports the engine from `skillgate-core`; the `skillgate` binary lives
//! in `skillgate-cli`.

pub use skillgate_core::*;
