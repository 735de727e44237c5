use super::store::{NodeKind, RelationshipStore};

/// Category reported for stores the graph cannot classify.
pub const OTHER_CATEGORY: &str = "Other";

impl RelationshipStore {
    /// Category of a store, or `"Other"`.
    ///
    /// Only store nodes are classified. A category passed in is not a store
    /// and gets `"Other"`, even when it hangs off a parent category.
    pub fn category_for_store<'a>(&'a self, store_name: &str) -> &'a str {
        if self.kind(store_name) != Some(NodeKind::Store) {
            return OTHER_CATEGORY;
        }

        self.neighbors(store_name)
            .iter()
            .find(|id| self.kind(id) == Some(NodeKind::Category))
            .map(String::as_str)
            .unwrap_or(OTHER_CATEGORY)
    }

    /// Stores directly attached to a category. Subcategories are not listed.
    pub fn stores_in_category(&self, category_name: &str) -> Vec<&str> {
        if self.kind(category_name) != Some(NodeKind::Category) {
            return Vec::new();
        }

        self.neighbors(category_name)
            .iter()
            .filter(|id| self.kind(id) == Some(NodeKind::Store))
            .map(String::as_str)
            .collect()
    }
}
