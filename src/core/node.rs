//! Node types for the portfolio hierarchy
//!
//! Nodes live in an arena owned by `Hierarchy` and are addressed by `NodeId`.
//! The name is the only identity; price is the only field that changes once
//! the hierarchy has been loaded.

/// Dense index of a node inside its hierarchy's arena
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(transparent)]
pub struct NodeId(u32);

impl NodeId {
    #[inline(always)]
    pub const fn from_raw(id: u32) -> Self {
        Self(id)
    }

    #[inline(always)]
    pub const fn as_raw(&self) -> u32 {
        self.0
    }

    #[inline(always)]
    pub(crate) const fn index(&self) -> usize {
        self.0 as usize
    }
}

/// Whether a node was declared as a portfolio header
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeKind {
    Leaf,
    Portfolio,
}

/// One leaf asset or portfolio
#[derive(Debug, Clone, PartialEq)]
pub struct Node {
    name: String,
    /// Count held by the parent portfolio (1 for a portfolio never listed as a child)
    shares: i64,
    /// Last known unit value, `0.0` while unknown
    price: f64,
    kind: NodeKind,
}

impl Node {
    /// Price sentinel for "not yet known"
    pub const UNPRICED: f64 = 0.0;

    pub fn new(name: impl Into<String>, shares: i64) -> Self {
        Self {
            name: name.into(),
            shares,
            price: Self::UNPRICED,
            kind: NodeKind::Leaf,
        }
    }

    pub fn portfolio(name: impl Into<String>) -> Self {
        Self {
            kind: NodeKind::Portfolio,
            ..Self::new(name, 1)
        }
    }

    /// Builder-style price setter, mostly for fixtures
    pub fn with_price(mut self, price: f64) -> Self {
        self.price = price;
        self
    }

    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[inline(always)]
    pub fn shares(&self) -> i64 {
        self.shares
    }

    #[inline(always)]
    pub fn price(&self) -> f64 {
        self.price
    }

    #[inline(always)]
    pub fn kind(&self) -> NodeKind {
        self.kind
    }

    #[inline(always)]
    pub fn is_portfolio(&self) -> bool {
        self.kind == NodeKind::Portfolio
    }

    /// A price of exactly zero is indistinguishable from "unknown", so a
    /// genuinely worthless asset keeps its parent from ever being valued.
    #[inline(always)]
    pub fn is_priced(&self) -> bool {
        self.price != Self::UNPRICED
    }

    /// Contribution to the parent's value
    #[inline(always)]
    pub fn holding_value(&self) -> f64 {
        self.price * self.shares as f64
    }

    #[inline(always)]
    pub(crate) fn set_price(&mut self, price: f64) {
        self.price = price;
    }

    pub(crate) fn set_shares(&mut self, shares: i64) {
        self.shares = shares;
    }

    pub(crate) fn mark_portfolio(&mut self) {
        self.kind = NodeKind::Portfolio;
    }
}

/// One row of a hierarchy definition
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DefinitionRecord {
    /// Starts (or re-opens) the portfolio that following children belong to
    Header(String),
    /// Adds a holding to the most recently started portfolio
    Child { name: String, shares: i64 },
}

impl DefinitionRecord {
    pub fn header(name: impl Into<String>) -> Self {
        Self::Header(name.into())
    }

    pub fn child(name: impl Into<String>, shares: i64) -> Self {
        Self::Child {
            name: name.into(),
            shares,
        }
    }
}
