// src/services/import_service.rs
//
// External import reconciliation: maps TVMaze records into movie drafts and
// feeds them through the movie repository's dedup contract.

use rand::Rng;
use std::sync::Arc;
use uuid::Uuid;

use crate::domain::category::Category;
use crate::domain::movie::MovieDraft;
use crate::error::AppResult;
use crate::integrations::tvmaze::{SearchResult, Show, ShowSearchClient};
use crate::repositories::{CategoryRepository, ImportOutcome, MovieRepository};

/// Fixed query used to fill an empty library on first launch.
pub const AUTO_POPULATE_QUERY: &str = "cinema";

/// At most this many records are mapped during auto-population.
pub const AUTO_POPULATE_LIMIT: usize = 20;

/// At most this many results are handed to the interactive picker.
pub const INTERACTIVE_RESULT_LIMIT: usize = 10;

/// Year recorded when a show carries no usable premiere date.
const FALLBACK_YEAR: i32 = 2020;

/// Defaults applied to fields the external record does not carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImportDefaults {
    /// Bulk population: a plausible runtime and a random rating in [5,10)
    AutoPopulate,
    /// Interactive accept: zeros, the user can edit the entry afterwards
    Manual,
}

/// Category assignment policy for imported records.
///
/// Case-insensitive exact match of the record's primary genre against an
/// existing category name, else the first existing category, else none.
pub fn resolve_category(genres: &[String], categories: &[Category]) -> Option<Uuid> {
    if let Some(primary) = genres.first() {
        let lowered = primary.to_lowercase();
        if let Some(matched) = categories.iter().find(|c| c.name.to_lowercase() == lowered) {
            return Some(matched.id);
        }
    }

    categories.first().map(|c| c.id)
}

/// Derive a movie draft from an external show record.
pub fn map_show_to_draft(
    show: &Show,
    categories: &[Category],
    defaults: ImportDefaults,
) -> MovieDraft {
    let year = show
        .premiered
        .as_deref()
        .and_then(|premiered| premiered.split('-').next())
        .and_then(|segment| segment.parse().ok())
        .unwrap_or(FALLBACK_YEAR);

    let duration = show.runtime.unwrap_or(match defaults {
        ImportDefaults::AutoPopulate => 60,
        ImportDefaults::Manual => 0,
    });

    let rating = show.rating.average.unwrap_or_else(|| match defaults {
        ImportDefaults::AutoPopulate => f64::from(rand::rng().random_range(5..10)),
        ImportDefaults::Manual => 0.0,
    });

    let poster = show.image.as_ref().and_then(|image| image.medium.clone());

    MovieDraft {
        title: show.name.clone(),
        category_id: resolve_category(&show.genres, categories),
        year,
        duration,
        rating,
        poster,
    }
}

pub struct ImportService {
    movie_repo: Arc<dyn MovieRepository>,
    category_repo: Arc<dyn CategoryRepository>,
    search_client: Arc<dyn ShowSearchClient>,
}

impl ImportService {
    pub fn new(
        movie_repo: Arc<dyn MovieRepository>,
        category_repo: Arc<dyn CategoryRepository>,
        search_client: Arc<dyn ShowSearchClient>,
    ) -> Self {
        Self {
            movie_repo,
            category_repo,
            search_client,
        }
    }

    /// Fill an empty library with one fixed search.
    ///
    /// Does nothing when movies already exist. A failed fetch is logged and
    /// swallowed: the library simply stays empty and the operation is never
    /// retried. Returns the number of accepted movies.
    pub async fn auto_populate(&self) -> usize {
        if !self.movie_repo.get_all().is_empty() {
            return 0;
        }

        let results = match self.search_client.search_shows(AUTO_POPULATE_QUERY).await {
            Ok(results) => results,
            Err(e) => {
                log::warn!("Auto-populate fetch failed: {}", e);
                return 0;
            }
        };

        let categories = self.category_repo.get_all();
        let drafts: Vec<MovieDraft> = results
            .iter()
            .take(AUTO_POPULATE_LIMIT)
            .map(|result| map_show_to_draft(&result.show, &categories, ImportDefaults::AutoPopulate))
            .collect();

        let accepted = self.movie_repo.add_bulk(drafts);
        if accepted > 0 {
            log::info!("Auto-populated the library with {} movies", accepted);
        }
        accepted
    }

    /// Interactive fetch: one search, truncated for display.
    ///
    /// Network and parse failures propagate so the view can render its error
    /// banner; nothing is written to the store.
    pub async fn search_shows(&self, query: &str) -> AppResult<Vec<SearchResult>> {
        let mut results = self.search_client.search_shows(query).await?;
        results.truncate(INTERACTIVE_RESULT_LIMIT);
        Ok(results)
    }

    /// Accept one interactive result into the catalog.
    ///
    /// The caller surfaces the resulting success or duplicate notice.
    pub fn accept(&self, show: &Show) -> ImportOutcome {
        let categories = self.category_repo.get_all();
        let draft = map_show_to_draft(show, &categories, ImportDefaults::Manual);
        self.movie_repo.add_from_import(draft)
    }
}
