use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::category::Category;

/// Display name resolved for a movie whose category no longer exists.
pub const UNKNOWN_CATEGORY: &str = "Unknown";

/// A movie in the user's catalog
/// This is the root entity of the library
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Movie {
    /// Internal immutable identifier
    pub id: Uuid,

    /// Display title
    pub title: String,

    /// Reference into the category collection; not validated against
    /// existence at write time, orphans resolve to "Unknown"
    pub category_id: Option<Uuid>,

    /// Release year
    pub year: i32,

    /// Runtime in minutes
    pub duration: u32,

    /// User or imported rating
    pub rating: f64,

    /// Poster image: data URI or external URL
    pub poster: Option<String>,

    /// Creation timestamp, set once, never mutated
    pub added_at: DateTime<Utc>,
}

/// The writable fields of a movie, as submitted by a form or produced by the
/// import mapping. `poster: None` means "no poster supplied", so updates keep
/// the existing image.
#[derive(Debug, Clone)]
pub struct MovieDraft {
    pub title: String,
    pub category_id: Option<Uuid>,
    pub year: i32,
    pub duration: u32,
    pub rating: f64,
    pub poster: Option<String>,
}

impl Movie {
    /// Create a new Movie from a draft, generating its identity
    pub fn new(draft: MovieDraft) -> Self {
        Self {
            id: Uuid::new_v4(),
            title: draft.title.trim().to_string(),
            category_id: draft.category_id,
            year: draft.year,
            duration: draft.duration,
            rating: draft.rating,
            poster: draft.poster,
            added_at: Utc::now(),
        }
    }

    /// Overwrite the mutable fields from a draft
    /// Keeps `id` and `added_at`; the poster is replaced only when supplied
    pub fn apply_update(&mut self, draft: MovieDraft) {
        self.title = draft.title.trim().to_string();
        self.category_id = draft.category_id;
        self.year = draft.year;
        self.duration = draft.duration;
        self.rating = draft.rating;
        if let Some(poster) = draft.poster {
            self.poster = Some(poster);
        }
    }

    /// Resolve the category display name, tolerating orphaned references
    pub fn category_name<'a>(&self, categories: &'a [Category]) -> &'a str {
        self.category_id
            .and_then(|id| categories.iter().find(|c| c.id == id))
            .map(|c| c.name.as_str())
            .unwrap_or(UNKNOWN_CATEGORY)
    }
}

impl std::fmt::Display for Movie {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({})", self.title, self.year)
    }
}
