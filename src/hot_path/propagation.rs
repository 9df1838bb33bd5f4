//! Incremental price propagation
//!
//! A price update lands on one node and walks upward: each parent that has
//! become fully priced is valued, emitted, and its value carried on as the
//! parent's own price. The walk stops at the first under-priced ancestor or
//! at a root.
//!
//! The walk is a loop rather than recursion so hierarchy depth never grows
//! the stack.

use super::valuation::{is_ready, portfolio_value};
use crate::core::{Hierarchy, NodeId};

/// A portfolio value produced by propagation
#[derive(Debug, Clone, PartialEq)]
pub struct Valuation {
    pub name: String,
    pub value: f64,
}

impl Valuation {
    pub fn new(name: impl Into<String>, value: f64) -> Self {
        Self {
            name: name.into(),
            value,
        }
    }
}

/// Where a walk stopped
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Propagation {
    /// Name is not held by any portfolio; nothing emitted
    Unlisted,
    /// Every ancestor was valued up to and including this root
    ReachedRoot { root: NodeId },
    /// This portfolio still has unpriced holdings
    Pending { portfolio: NodeId },
}

/// Applies price updates to a hierarchy it owns
#[derive(Debug, Clone)]
pub struct PropagationEngine {
    hierarchy: Hierarchy,
}

impl PropagationEngine {
    pub fn new(hierarchy: Hierarchy) -> Self {
        Self { hierarchy }
    }

    #[inline]
    pub fn hierarchy(&self) -> &Hierarchy {
        &self.hierarchy
    }

    /// Apply one update and collect emitted valuations
    pub fn apply(&mut self, name: &str, price: f64) -> Vec<Valuation> {
        let mut out = Vec::new();
        self.apply_into(name, price, &mut out);
        out
    }

    /// Apply one update, appending valuations to `out` in walk order
    ///
    /// Unknown names and names without a parent are not errors: they yield
    /// `Propagation::Unlisted` and no output.
    pub fn apply_into(
        &mut self,
        name: &str,
        price: f64,
        out: &mut Vec<Valuation>,
    ) -> Propagation {
        let Some(mut current) = self.hierarchy.id_of(name) else {
            tracing::trace!(target: "propagation", name, "Update for unknown name");
            return Propagation::Unlisted;
        };
        let mut current_price = price;
        let mut emitted = false;

        loop {
            self.hierarchy.set_price(current, current_price);

            let Some(parent) = self.hierarchy.parent(current) else {
                return if emitted {
                    Propagation::ReachedRoot { root: current }
                } else {
                    Propagation::Unlisted
                };
            };

            let Some(children) = self.hierarchy.children_by_id(parent) else {
                return Propagation::Pending { portfolio: parent };
            };
            if !is_ready(children.iter()) {
                tracing::trace!(
                    target: "propagation",
                    portfolio = children.parent().name(),
                    "Holdings still unpriced"
                );
                return Propagation::Pending { portfolio: parent };
            }

            let value = portfolio_value(children.iter());
            out.push(Valuation::new(children.parent().name(), value));
            emitted = true;

            current = parent;
            current_price = value;
        }
    }
}
