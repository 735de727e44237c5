pub mod classify;
pub mod seed;
pub mod store;

pub use classify::OTHER_CATEGORY;
pub use seed::{build_default_graph, GraphSeed};
pub use store::{GraphError, NodeKind, RelationshipStore};
