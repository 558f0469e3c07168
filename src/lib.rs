// src/lib.rs
// CineTech - Local-first movie catalog manager
//
// Architecture:
// - Store-centric: the key-value store is the single source of truth
// - Explicit: repositories re-read on every call, no hidden caches
// - Local-first: user controls all data
// - Application Layer: UI boundary; the view itself lives elsewhere

// ============================================================================
// FOUNDATION
// ============================================================================

pub mod domain;
pub mod error;
pub mod repositories;
pub mod store;

// ============================================================================
// APPLICATION LAYER
// ============================================================================

pub mod application;
pub mod integrations;
pub mod services;

// ============================================================================
// PUBLIC API - Domain Entities
// ============================================================================

pub use domain::{
    validate_movie_draft,
    // Statistics
    CatalogStatistics,
    // Category
    Category,
    CategoryCount,
    // Movie
    Movie,
    MovieDraft,
    YearCount,
    UNKNOWN_CATEGORY,
};

// ============================================================================
// PUBLIC API - Error Types
// ============================================================================

pub use error::{AppError, AppResult};

// ============================================================================
// PUBLIC API - Store
// ============================================================================

pub use store::{
    default_store_path, InMemoryStore, SqliteStore, StoreAdapter, CATEGORIES_KEY, MOVIES_KEY,
};

// ============================================================================
// PUBLIC API - Repositories
// ============================================================================

pub use repositories::{
    CategoryRepository,
    ImportOutcome,
    KvCategoryRepository,
    KvMovieRepository,
    MovieRepository,
    SortMode,
};

// ============================================================================
// PUBLIC API - Services
// ============================================================================

pub use services::{
    map_show_to_draft,
    resolve_category,
    ImportDefaults,
    // Import Reconciler
    ImportService,
    // Statistics Service
    StatisticsService,
};

// ============================================================================
// PUBLIC API - Application Layer
// ============================================================================

pub use application::AppState;

// ============================================================================
// PUBLIC API - Integrations
// ============================================================================

pub use integrations::{SearchResult, Show, ShowSearchClient, TvMazeClient};
