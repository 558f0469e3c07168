use serde::{Deserialize, Serialize};

/// Dashboard aggregates derived from the two collections
/// Statistics are NEVER a source of truth and can be recalculated
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogStatistics {
    pub total_movies: u32,
    pub total_categories: u32,

    /// Mean rating across the catalog, 0.0 when empty
    pub average_rating: f64,

    /// One bucket per category (zero included), plus an "Unknown" bucket
    /// when orphaned references exist
    pub movies_by_category: Vec<CategoryCount>,

    /// Histogram of release years, ascending
    pub movies_by_year: Vec<YearCount>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryCount {
    pub name: String,
    pub count: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct YearCount {
    pub year: i32,
    pub count: u32,
}
