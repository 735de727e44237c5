use ahash::AHashMap;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use std::fmt;
use thiserror::Error;

/// Node type in the store/category graph.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeKind {
    Store,
    Category,
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NodeKind::Store => write!(f, "store"),
            NodeKind::Category => write!(f, "category"),
        }
    }
}

/// Errors raised while building a relationship store.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GraphError {
    #[error("node '{id}' already exists as {existing}, cannot re-add as {requested}")]
    Conflict {
        id: String,
        existing: NodeKind,
        requested: NodeKind,
    },

    #[error("node '{0}' not found")]
    NotFound(String),

    #[error("self-loop on node '{0}'")]
    SelfLoop(String),
}

#[derive(Debug, Clone)]
struct Node {
    kind: NodeKind,
    /// Adjacent node ids in insertion order
    neighbors: SmallVec<[String; 4]>,
}

/// Undirected store↔category adjacency.
///
/// Built once and read-only afterwards; shared across threads behind an
/// `Arc` without locking.
#[derive(Debug, Clone, Default)]
pub struct RelationshipStore {
    nodes: AHashMap<String, Node>,
    edge_count: usize,
}

impl RelationshipStore {
    pub fn new() -> Self {
        RelationshipStore::default()
    }

    /// Add a node. Re-adding with the same kind is a no-op.
    pub fn add_node(&mut self, id: impl Into<String>, kind: NodeKind) -> Result<(), GraphError> {
        let id = id.into();

        if let Some(existing) = self.nodes.get(&id) {
            if existing.kind != kind {
                return Err(GraphError::Conflict {
                    id,
                    existing: existing.kind,
                    requested: kind,
                });
            }
            return Ok(());
        }

        self.nodes.insert(
            id,
            Node {
                kind,
                neighbors: SmallVec::new(),
            },
        );
        Ok(())
    }

    /// Connect two existing nodes. Idempotent and order-insensitive.
    pub fn add_edge(&mut self, a: &str, b: &str) -> Result<(), GraphError> {
        for id in [a, b] {
            if !self.nodes.contains_key(id) {
                return Err(GraphError::NotFound(id.to_string()));
            }
        }

        if a == b {
            return Err(GraphError::SelfLoop(a.to_string()));
        }

        if self.neighbors(a).iter().any(|n| n == b) {
            return Ok(());
        }

        if let Some(node) = self.nodes.get_mut(a) {
            node.neighbors.push(b.to_string());
        }
        if let Some(node) = self.nodes.get_mut(b) {
            node.neighbors.push(a.to_string());
        }
        self.edge_count += 1;

        Ok(())
    }

    /// Adjacent node ids in insertion order; empty for unknown or isolated nodes.
    pub fn neighbors(&self, id: &str) -> &[String] {
        self.nodes
            .get(id)
            .map(|node| node.neighbors.as_slice())
            .unwrap_or(&[])
    }

    pub fn kind(&self, id: &str) -> Option<NodeKind> {
        self.nodes.get(id).map(|node| node.kind)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.nodes.contains_key(id)
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edge_count
    }
}
