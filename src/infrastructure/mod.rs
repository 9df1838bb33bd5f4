//! Infrastructure - cold path only
//!
//! This module contains code that runs once per process or once per run:
//! - Configuration management
//! - Logging
//! - Run metrics

pub mod config;
pub mod logging;
pub mod metrics;

pub use metrics::{MetricsCollector, MetricsSnapshot};
