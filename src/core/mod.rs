//! Core types for the portfolio hierarchy
//!
//! - Node / NodeId: arena-addressed assets and portfolios
//! - DefinitionRecord: one row of a hierarchy definition
//! - Hierarchy: parent/children relations built once, prices mutable

pub mod hierarchy;
pub mod node;

pub use hierarchy::{Children, Hierarchy, HierarchyBuilder};
pub use node::{DefinitionRecord, Node, NodeId, NodeKind};
