//! Hierarchy store
//!
//! Arena of nodes with child→parent and parent→children relations, built once
//! from an ordered definition. Relations are keyed by `NodeId`, which is
//! assigned from the node's name and never changes while prices move.

use super::node::{DefinitionRecord, Node, NodeId};
use crate::{Result, SimError};
use std::collections::HashMap;

/// Portfolio tree(s) with mutable prices
#[derive(Debug, Clone, Default)]
pub struct Hierarchy {
    nodes: Vec<Node>,
    index: HashMap<String, NodeId>,
    parents: Vec<Option<NodeId>>,
    /// Child lists in declaration order
    children: Vec<Vec<NodeId>>,
}

impl Hierarchy {
    /// Build from an ordered sequence of definition records
    ///
    /// # Errors
    /// `SimError::Config` when a child precedes every header, a holding is
    /// claimed by two portfolios, or parent links form a cycle.
    pub fn build<I>(records: I) -> Result<Self>
    where
        I: IntoIterator<Item = DefinitionRecord>,
    {
        let mut builder = HierarchyBuilder::new();
        for record in records {
            builder.push(record)?;
        }
        builder.finish()
    }

    /// Number of nodes (portfolios and leaves)
    #[inline]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    #[inline]
    pub fn id_of(&self, name: &str) -> Option<NodeId> {
        self.index.get(name).copied()
    }

    #[inline]
    pub fn node(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.index())
    }

    pub fn get(&self, name: &str) -> Option<&Node> {
        self.id_of(name).map(|id| &self.nodes[id.index()])
    }

    #[inline]
    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.parents.get(id.index()).copied().flatten()
    }

    #[inline]
    pub fn child_ids(&self, id: NodeId) -> &[NodeId] {
        self.children
            .get(id.index())
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Portfolio that holds `name`, if any
    pub fn parent_of(&self, name: &str) -> Option<&Node> {
        let id = self.id_of(name)?;
        self.parent(id).map(|p| &self.nodes[p.index()])
    }

    /// Direct holdings of portfolio `name`
    ///
    /// `None` when the name is unknown or it has no declared children.
    pub fn children_of(&self, name: &str) -> Option<Children<'_>> {
        let parent = self.id_of(name)?;
        self.children_by_id(parent)
    }

    pub fn children_by_id(&self, parent: NodeId) -> Option<Children<'_>> {
        let ids = self.child_ids(parent);
        if ids.is_empty() {
            return None;
        }
        Some(Children {
            hierarchy: self,
            parent,
            ids,
        })
    }

    /// Iterate all nodes in declaration order
    pub fn nodes(&self) -> impl Iterator<Item = (NodeId, &Node)> + '_ {
        self.nodes
            .iter()
            .enumerate()
            .map(|(i, node)| (NodeId::from_raw(i as u32), node))
    }

    /// Nodes with no parent
    pub fn roots(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.parents
            .iter()
            .enumerate()
            .filter(|(_, parent)| parent.is_none())
            .map(|(i, _)| NodeId::from_raw(i as u32))
    }

    pub fn portfolios(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.nodes()
            .filter(|(_, node)| node.is_portfolio())
            .map(|(id, _)| id)
    }

    #[inline(always)]
    pub(crate) fn set_price(&mut self, id: NodeId, price: f64) {
        self.nodes[id.index()].set_price(price);
    }

    /// Dump every portfolio with its holdings
    ///
    /// Portfolio lines go out at INFO, holdings at DEBUG.
    pub fn log_structure(&self, stage: &str) {
        crate::log_hierarchy!(
            tracing::Level::INFO,
            stage,
            nodes = self.len(),
            "Hierarchy snapshot"
        );
        for id in self.portfolios() {
            let portfolio = &self.nodes[id.index()];
            let parent = self
                .parent(id)
                .map(|p| self.nodes[p.index()].name())
                .unwrap_or("-");
            tracing::info!(
                target: "hierarchy",
                portfolio = portfolio.name(),
                parent,
                price = portfolio.price(),
                holdings = self.child_ids(id).len(),
                "Portfolio"
            );
            for &child in self.child_ids(id) {
                let child = &self.nodes[child.index()];
                tracing::debug!(
                    target: "hierarchy",
                    portfolio = portfolio.name(),
                    holding = child.name(),
                    shares = child.shares(),
                    price = child.price(),
                    "Holding"
                );
            }
        }
    }
}

/// Name-addressable view of one portfolio's direct holdings
#[derive(Debug, Clone, Copy)]
pub struct Children<'a> {
    hierarchy: &'a Hierarchy,
    parent: NodeId,
    ids: &'a [NodeId],
}

impl<'a> Children<'a> {
    #[inline]
    pub fn len(&self) -> usize {
        self.ids.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    pub fn parent(&self) -> &'a Node {
        &self.hierarchy.nodes[self.parent.index()]
    }

    /// Holding called `name`, if it belongs to this portfolio
    pub fn get(&self, name: &str) -> Option<&'a Node> {
        let id = self.hierarchy.id_of(name)?;
        if self.hierarchy.parent(id) != Some(self.parent) {
            return None;
        }
        self.hierarchy.node(id)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    pub fn iter(&self) -> impl Iterator<Item = &'a Node> + 'a {
        let hierarchy: &'a Hierarchy = self.hierarchy;
        let ids: &'a [NodeId] = self.ids;
        ids.iter().map(move |id| &hierarchy.nodes[id.index()])
    }

    pub fn names(&self) -> impl Iterator<Item = &'a str> + 'a {
        self.iter().map(Node::name)
    }
}

/// Incremental hierarchy construction with a "current portfolio" cursor
#[derive(Debug, Default)]
pub struct HierarchyBuilder {
    hierarchy: Hierarchy,
    cursor: Option<NodeId>,
}

impl HierarchyBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Apply one definition record
    pub fn push(&mut self, record: DefinitionRecord) -> Result<()> {
        match record {
            DefinitionRecord::Header(name) => {
                let id = self.intern(name);
                self.hierarchy.nodes[id.index()].mark_portfolio();
                self.cursor = Some(id);
            }
            DefinitionRecord::Child { name, shares } => {
                let parent = self.cursor.ok_or_else(|| {
                    SimError::Config(format!(
                        "holding {name:?} appears before any portfolio header"
                    ))
                })?;
                let id = self.intern(name);
                let h = &mut self.hierarchy;

                if id == parent {
                    return Err(SimError::Config(format!(
                        "portfolio {:?} lists itself as a holding",
                        h.nodes[id.index()].name()
                    )));
                }
                if let Some(owner) = h.parents[id.index()] {
                    return Err(SimError::Config(format!(
                        "holding {:?} already belongs to portfolio {:?}, cannot add it to {:?}",
                        h.nodes[id.index()].name(),
                        h.nodes[owner.index()].name(),
                        h.nodes[parent.index()].name()
                    )));
                }

                h.nodes[id.index()].set_shares(shares);
                h.parents[id.index()] = Some(parent);
                h.children[parent.index()].push(id);
            }
        }
        Ok(())
    }

    /// Validate and return the hierarchy
    pub fn finish(self) -> Result<Hierarchy> {
        let hierarchy = self.hierarchy;
        validate_acyclic(&hierarchy)?;
        tracing::debug!(
            target: "hierarchy",
            nodes = hierarchy.len(),
            roots = hierarchy.roots().count(),
            "Hierarchy built"
        );
        Ok(hierarchy)
    }

    fn intern(&mut self, name: String) -> NodeId {
        let h = &mut self.hierarchy;
        if let Some(&id) = h.index.get(&name) {
            return id;
        }
        let id = NodeId::from_raw(h.nodes.len() as u32);
        h.nodes.push(Node::new(name.clone(), 1));
        h.parents.push(None);
        h.children.push(Vec::new());
        h.index.insert(name, id);
        id
    }
}

/// Reject any node that can reach itself through parent links
///
/// Each node has at most one parent, so a walk that meets a node already on
/// the current path has found a cycle. Finished nodes are never walked again.
fn validate_acyclic(hierarchy: &Hierarchy) -> Result<()> {
    #[derive(Clone, Copy, PartialEq)]
    enum Mark {
        Unvisited,
        OnPath,
        Done,
    }

    let mut marks = vec![Mark::Unvisited; hierarchy.len()];
    let mut path = Vec::new();

    for (start, _) in hierarchy.nodes() {
        let mut current = Some(start);
        while let Some(id) = current {
            match marks[id.index()] {
                Mark::Done => break,
                Mark::OnPath => {
                    let name = hierarchy.nodes[id.index()].name();
                    return Err(SimError::Config(format!(
                        "portfolio {name:?} is (indirectly) a holding of itself"
                    )));
                }
                Mark::Unvisited => {
                    marks[id.index()] = Mark::OnPath;
                    path.push(id);
                    current = hierarchy.parent(id);
                }
            }
        }
        for id in path.drain(..) {
            marks[id.index()] = Mark::Done;
        }
    }
    Ok(())
}
