// src/application/state.rs

use std::sync::Arc;

use crate::integrations::tvmaze::ShowSearchClient;
use crate::repositories::{
    CategoryRepository, KvCategoryRepository, KvMovieRepository, MovieRepository,
};
use crate::services::{ImportService, StatisticsService};
use crate::store::StoreAdapter;

/// Application state handed to the UI shell.
/// All fields are Arc-wrapped for thread-safe sharing across view handlers.
pub struct AppState {
    pub store: Arc<dyn StoreAdapter>,
    pub category_repo: Arc<dyn CategoryRepository>,
    pub movie_repo: Arc<dyn MovieRepository>,
    pub import_service: Arc<ImportService>,
    pub statistics_service: Arc<StatisticsService>,
}

impl AppState {
    /// Wire the object graph from an explicitly constructed store and search
    /// client. Both seams accept test doubles.
    pub fn new(store: Arc<dyn StoreAdapter>, search_client: Arc<dyn ShowSearchClient>) -> Self {
        let category_repo: Arc<dyn CategoryRepository> =
            Arc::new(KvCategoryRepository::new(store.clone()));
        let movie_repo: Arc<dyn MovieRepository> = Arc::new(KvMovieRepository::new(store.clone()));

        let import_service = Arc::new(ImportService::new(
            movie_repo.clone(),
            category_repo.clone(),
            search_client,
        ));
        let statistics_service = Arc::new(StatisticsService::new(
            movie_repo.clone(),
            category_repo.clone(),
        ));

        Self {
            store,
            category_repo,
            movie_repo,
            import_service,
            statistics_service,
        }
    }

    /// Startup sequence: seed categories, then fill an empty library from the
    /// external API. Returns the number of auto-imported movies.
    pub async fn initialize(&self) -> usize {
        self.category_repo.ensure_seeded();
        self.import_service.auto_populate().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AppError;
    use crate::integrations::tvmaze::client::MockShowSearchClient;
    use crate::integrations::tvmaze::{SearchResult, Show, ShowRating};
    use crate::store::InMemoryStore;

    fn search_result(name: &str) -> SearchResult {
        SearchResult {
            show: Show {
                name: name.to_string(),
                genres: vec!["Action".to_string()],
                premiered: Some("2012-04-05".to_string()),
                runtime: Some(44),
                rating: ShowRating { average: Some(8.0) },
                image: None,
            },
        }
    }

    #[tokio::test]
    async fn test_initialize_seeds_and_populates_once() {
        let mut client = MockShowSearchClient::new();
        client
            .expect_search_shows()
            .times(1)
            .returning(|_| Ok(vec![search_result("Strike Back")]));

        let state = AppState::new(Arc::new(InMemoryStore::new()), Arc::new(client));

        let imported = state.initialize().await;
        assert_eq!(imported, 1);
        assert_eq!(state.category_repo.get_all().len(), 5);

        // The library is no longer empty, so a second startup never fetches
        assert_eq!(state.initialize().await, 0);
        assert_eq!(state.movie_repo.get_all().len(), 1);

        // Wiping the namespace empties both collections
        state.store.clear_all();
        assert!(state.movie_repo.get_all().is_empty());
        assert!(state.category_repo.get_all().is_empty());
    }

    #[tokio::test]
    async fn test_initialize_survives_fetch_failure() {
        let mut client = MockShowSearchClient::new();
        client
            .expect_search_shows()
            .returning(|_| Err(AppError::Network("offline".to_string())));

        let state = AppState::new(Arc::new(InMemoryStore::new()), Arc::new(client));

        assert_eq!(state.initialize().await, 0);
        assert!(state.movie_repo.get_all().is_empty());
        assert_eq!(state.category_repo.get_all().len(), 5);
    }
}
