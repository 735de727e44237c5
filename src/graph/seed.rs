use serde::{Deserialize, Serialize};

use super::store::{GraphError, NodeKind, RelationshipStore};

/// Declarative description of a relationship store.
///
/// Edges are `[a, b]` pairs; a category–category edge models
/// "subcategory of".
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GraphSeed {
    #[serde(default)]
    pub stores: Vec<String>,

    #[serde(default)]
    pub categories: Vec<String>,

    #[serde(default)]
    pub edges: Vec<(String, String)>,
}

const DEFAULT_STORES: &[&str] = &[
    "Uber",
    "Yandex Taxi",
    "Starbucks",
    "Magnum",
    "McDonald's",
    "KFC",
    "Netflix",
];

const DEFAULT_CATEGORIES: &[&str] = &["Transport", "Food", "Shopping", "Entertainment", "Coffee"];

const DEFAULT_EDGES: &[(&str, &str)] = &[
    ("Uber", "Transport"),
    ("Yandex Taxi", "Transport"),
    ("Starbucks", "Coffee"),
    ("Magnum", "Shopping"),
    ("McDonald's", "Food"),
    ("KFC", "Food"),
    ("Netflix", "Entertainment"),
    ("Coffee", "Food"),
];

impl GraphSeed {
    /// The built-in store/category list.
    pub fn default_seed() -> Self {
        GraphSeed {
            stores: DEFAULT_STORES.iter().map(|s| s.to_string()).collect(),
            categories: DEFAULT_CATEGORIES.iter().map(|c| c.to_string()).collect(),
            edges: DEFAULT_EDGES
                .iter()
                .map(|(a, b)| (a.to_string(), b.to_string()))
                .collect(),
        }
    }
}

impl RelationshipStore {
    /// Build a store from a seed: stores, then categories, then edges.
    pub fn from_seed(seed: &GraphSeed) -> Result<Self, GraphError> {
        let mut graph = RelationshipStore::new();

        for store in &seed.stores {
            graph.add_node(store.as_str(), NodeKind::Store)?;
        }
        for category in &seed.categories {
            graph.add_node(category.as_str(), NodeKind::Category)?;
        }
        for (a, b) in &seed.edges {
            graph.add_edge(a, b)?;
        }

        Ok(graph)
    }
}

/// Relationship store seeded with the built-in stores and categories.
pub fn build_default_graph() -> RelationshipStore {
    RelationshipStore::from_seed(&GraphSeed::default_seed())
        .expect("built-in graph seed is consistent")
}
