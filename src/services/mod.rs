// src/services/mod.rs
//
// Services Module - Orchestration Layer

pub mod import_service;
pub mod statistics_service;


// Re-export all services and their types
pub use import_service::{
    map_show_to_draft,
    resolve_category,
    ImportDefaults,
    ImportService,
    AUTO_POPULATE_LIMIT,
    AUTO_POPULATE_QUERY,
    INTERACTIVE_RESULT_LIMIT,
};

pub use statistics_service::StatisticsService;
