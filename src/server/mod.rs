//! Server runtime
//!
//! Accept loop and per-connection task spawning.

pub mod listener;
