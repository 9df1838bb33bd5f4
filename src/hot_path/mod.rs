//! Hot path operations - per-update, allocation-light
//!
//! This module contains the code run for every price update:
//! - Readiness check and portfolio valuation
//! - Upward propagation through the hierarchy

pub mod propagation;
pub mod valuation;

pub use propagation::{Propagation, PropagationEngine, Valuation};
pub use valuation::{is_ready, portfolio_value};
