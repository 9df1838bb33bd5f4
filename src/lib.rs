//! Portfolio hierarchy roll-up valuation
//!
//! Leaf assets carry share counts and market prices. A portfolio is worth the
//! sum of price × shares over its direct children, and that value becomes the
//! portfolio's own price inside its parent. Price updates are streamed in one
//! at a time and every ancestor that becomes fully priced is re-emitted.

pub mod core;
pub mod engine;
pub mod hot_path;
pub mod infrastructure;
pub mod io;

#[cfg(test)]
pub mod test_utils;

// Re-export commonly used types
pub use crate::core::{DefinitionRecord, Hierarchy, Node, NodeId, NodeKind};
pub use engine::{RunSummary, Simulator};
pub use hot_path::{Propagation, PropagationEngine, Valuation};
pub use infrastructure::config::{Config, LoggingConfig, SimulationConfig};

use thiserror::Error;

/// Main error type for the simulator
#[derive(Error, Debug)]
pub enum SimError {
    /// Malformed hierarchy definition or invalid settings
    #[error("Configuration error: {0}")]
    Config(String),

    /// Non-numeric price or share count
    #[error("Parse error at line {line}: invalid {field} {value:?}")]
    Parse {
        line: u64,
        field: &'static str,
        value: String,
    },

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias
pub type Result<T> = std::result::Result<T, SimError>;
