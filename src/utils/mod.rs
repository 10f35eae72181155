//! Utility functions and helpers for the gateway.
//!
//! # Submodules
//!
//! - `logging`: Tracing and logging initialization.

pub mod logging;
