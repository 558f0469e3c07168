use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A user-defined movie category
/// Categories are purely organizational; deleting one never touches movies
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Category {
    /// Internal immutable identifier
    pub id: Uuid,

    /// Display name, unique case-insensitively within the collection
    pub name: String,
}

impl Category {
    /// Create a new Category
    pub fn new(name: String) -> Self {
        Self {
            id: Uuid::new_v4(),
            name,
        }
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name)
    }
}
