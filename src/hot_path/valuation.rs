//! Readiness and value of a single portfolio
//!
//! Both work over a portfolio's direct holdings only.

use crate::core::Node;

/// A portfolio can be valued once it has holdings and every one is priced
#[inline]
pub fn is_ready<'a, I>(children: I) -> bool
where
    I: IntoIterator<Item = &'a Node>,
{
    let mut children = children.into_iter().peekable();
    children.peek().is_some() && children.all(Node::is_priced)
}

/// Σ price × shares over the holdings, in declaration order
#[inline]
pub fn portfolio_value<'a, I>(children: I) -> f64
where
    I: IntoIterator<Item = &'a Node>,
{
    children.into_iter().map(Node::holding_value).sum()
}
