// src/repositories/movie_repository.rs
//
// Movie persistence over the key-value store
//
// Every read materializes a fresh collection from the store and every write
// fully replaces it, so the store is the single source of truth.

use std::cmp::Ordering;
use std::sync::Arc;
use uuid::Uuid;

use crate::domain::category::Category;
use crate::domain::movie::{validate_movie_draft, Movie, MovieDraft};
use crate::error::{AppError, AppResult};
use crate::store::{StoreAdapter, MOVIES_KEY};

/// How a movie listing is ordered. Unrecognized modes map to `None`, which
/// leaves the collection in store order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortMode {
    /// Title ascending, lexicographic on the lowercased title
    Title,
    /// Rating descending
    Rating,
    /// Year descending
    Year,
}

impl SortMode {
    pub fn parse(mode: &str) -> Option<Self> {
        match mode {
            "title" => Some(SortMode::Title),
            "rating" => Some(SortMode::Rating),
            "year" => Some(SortMode::Year),
            _ => None,
        }
    }
}

/// Result of a dedup-aware insert. A duplicate is an expected outcome, not an
/// error: bulk imports keep going and the interactive flow shows a notice.
#[derive(Debug, Clone)]
pub enum ImportOutcome {
    Added(Movie),
    Duplicate,
}

impl ImportOutcome {
    pub fn is_added(&self) -> bool {
        matches!(self, ImportOutcome::Added(_))
    }
}

pub trait MovieRepository: Send + Sync {
    fn get_all(&self) -> Vec<Movie>;
    fn get_by_id(&self, id: Uuid) -> Option<Movie>;

    /// Filter by case-insensitive substring against title or resolved category
    /// name, then order per `sort`. Never mutates the stored collection.
    fn query(&self, search: &str, sort: Option<SortMode>, categories: &[Category]) -> Vec<Movie>;

    fn create(&self, draft: MovieDraft) -> AppResult<Movie>;
    fn update(&self, id: Uuid, draft: MovieDraft) -> AppResult<Movie>;
    fn delete(&self, id: Uuid);

    /// Insert unless an existing movie carries the same title
    /// (case-insensitively). Checked against the live collection, so repeated
    /// calls within a batch see earlier acceptances.
    fn add_from_import(&self, draft: MovieDraft) -> ImportOutcome;

    /// Sequential `add_from_import` over the list; returns the accepted count.
    fn add_bulk(&self, drafts: Vec<MovieDraft>) -> usize;
}

pub struct KvMovieRepository {
    store: Arc<dyn StoreAdapter>,
}

impl KvMovieRepository {
    pub fn new(store: Arc<dyn StoreAdapter>) -> Self {
        Self { store }
    }

    fn load(&self) -> Vec<Movie> {
        match self.store.get(MOVIES_KEY) {
            Some(value) => match serde_json::from_value(value) {
                Ok(movies) => movies,
                Err(e) => {
                    log::error!("Unreadable movie collection: {}", e);
                    Vec::new()
                }
            },
            None => Vec::new(),
        }
    }

    fn persist(&self, movies: &[Movie]) {
        match serde_json::to_value(movies) {
            Ok(value) => self.store.set(MOVIES_KEY, &value),
            Err(e) => log::error!("Failed to serialize movie collection: {}", e),
        }
    }
}

impl MovieRepository for KvMovieRepository {
    fn get_all(&self) -> Vec<Movie> {
        self.load()
    }

    fn get_by_id(&self, id: Uuid) -> Option<Movie> {
        self.load().into_iter().find(|m| m.id == id)
    }

    fn query(&self, search: &str, sort: Option<SortMode>, categories: &[Category]) -> Vec<Movie> {
        let mut movies = self.load();

        let term = search.trim().to_lowercase();
        if !term.is_empty() {
            movies.retain(|movie| {
                movie.title.to_lowercase().contains(&term)
                    || movie
                        .category_name(categories)
                        .to_lowercase()
                        .contains(&term)
            });
        }

        // Vec::sort_by is stable: ties keep their relative store order
        match sort {
            Some(SortMode::Title) => {
                movies.sort_by(|a, b| a.title.to_lowercase().cmp(&b.title.to_lowercase()));
            }
            Some(SortMode::Rating) => {
                movies.sort_by(|a, b| {
                    b.rating.partial_cmp(&a.rating).unwrap_or(Ordering::Equal)
                });
            }
            Some(SortMode::Year) => movies.sort_by(|a, b| b.year.cmp(&a.year)),
            None => {}
        }

        movies
    }

    fn create(&self, draft: MovieDraft) -> AppResult<Movie> {
        validate_movie_draft(&draft)?;

        let movie = Movie::new(draft);
        let mut movies = self.load();
        movies.push(movie.clone());
        self.persist(&movies);

        Ok(movie)
    }

    fn update(&self, id: Uuid, draft: MovieDraft) -> AppResult<Movie> {
        validate_movie_draft(&draft)?;

        let mut movies = self.load();
        let index = movies
            .iter()
            .position(|m| m.id == id)
            .ok_or(AppError::NotFound)?;

        movies[index].apply_update(draft);
        let updated = movies[index].clone();
        self.persist(&movies);

        Ok(updated)
    }

    fn delete(&self, id: Uuid) {
        let mut movies = self.load();
        let before = movies.len();
        movies.retain(|m| m.id != id);

        if movies.len() != before {
            self.persist(&movies);
        }
    }

    fn add_from_import(&self, draft: MovieDraft) -> ImportOutcome {
        let mut movies = self.load();

        let lowered = draft.title.trim().to_lowercase();
        if movies.iter().any(|m| m.title.to_lowercase() == lowered) {
            log::debug!("Skipping already present title '{}'", draft.title.trim());
            return ImportOutcome::Duplicate;
        }

        let movie = Movie::new(draft);
        movies.push(movie.clone());
        self.persist(&movies);

        ImportOutcome::Added(movie)
    }

    fn add_bulk(&self, drafts: Vec<MovieDraft>) -> usize {
        let mut accepted = 0;
        for draft in drafts {
            if self.add_from_import(draft).is_added() {
                accepted += 1;
            }
        }

        if accepted > 0 {
            log::info!("{} movies added in bulk", accepted);
        }
        accepted
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::InMemoryStore;

    fn repo() -> KvMovieRepository {
        KvMovieRepository::new(Arc::new(InMemoryStore::new()))
    }

    fn draft(title: &str) -> MovieDraft {
        MovieDraft {
            title: title.to_string(),
            category_id: Some(Uuid::new_v4()),
            year: 2000,
            duration: 90,
            rating: 7.0,
            poster: None,
        }
    }

    #[test]
    fn test_crud_sequence_reflects_net_effect() {
        let repo = repo();

        let alien = repo.create(draft("Alien")).unwrap();
        let heat = repo.create(draft("Heat")).unwrap();
        repo.create(draft("Se7en")).unwrap();

        let mut renamed = draft("Heat 2");
        renamed.year = 1995;
        repo.update(heat.id, renamed).unwrap();
        repo.delete(alien.id);

        let titles: Vec<String> = repo.get_all().into_iter().map(|m| m.title).collect();
        assert_eq!(titles, vec!["Heat 2", "Se7en"]);
    }

    #[test]
    fn test_create_rejects_invalid_draft_without_writing() {
        let repo = repo();

        assert!(matches!(
            repo.create(draft("   ")),
            Err(AppError::Validation(_))
        ));

        let mut uncategorized = draft("Alien");
        uncategorized.category_id = None;
        assert!(matches!(
            repo.create(uncategorized),
            Err(AppError::Validation(_))
        ));

        assert!(repo.get_all().is_empty());
    }

    #[test]
    fn test_update_keeps_identity_and_timestamp() {
        let repo = repo();
        let movie = repo.create(draft("Alien")).unwrap();

        let updated = repo.update(movie.id, draft("Aliens")).unwrap();

        assert_eq!(updated.id, movie.id);
        assert_eq!(updated.added_at, movie.added_at);
        assert_eq!(updated.title, "Aliens");
        assert_eq!(repo.get_by_id(movie.id).unwrap().title, "Aliens");
    }

    #[test]
    fn test_update_replaces_poster_only_when_supplied() {
        let repo = repo();
        let mut with_poster = draft("Alien");
        with_poster.poster = Some("https://example.com/alien.jpg".to_string());
        let movie = repo.create(with_poster).unwrap();

        let kept = repo.update(movie.id, draft("Alien")).unwrap();
        assert_eq!(kept.poster.as_deref(), Some("https://example.com/alien.jpg"));

        let mut replacement = draft("Alien");
        replacement.poster = Some("data:image/png;base64,AAAA".to_string());
        let replaced = repo.update(movie.id, replacement).unwrap();
        assert_eq!(replaced.poster.as_deref(), Some("data:image/png;base64,AAAA"));
    }

    #[test]
    fn test_update_unknown_id_is_not_found() {
        let repo = repo();
        assert!(matches!(
            repo.update(Uuid::new_v4(), draft("Ghost")),
            Err(AppError::NotFound)
        ));
    }

    #[test]
    fn test_import_rejects_existing_title_case_insensitively() {
        let repo = repo();
        repo.create(draft("Inception")).unwrap();

        let outcome = repo.add_from_import(draft("INCEPTION"));

        assert!(matches!(outcome, ImportOutcome::Duplicate));
        assert_eq!(repo.get_all().len(), 1);
    }

    #[test]
    fn test_bulk_import_dedups_within_the_batch() {
        let repo = repo();

        let accepted = repo.add_bulk(vec![draft("A"), draft("A")]);

        assert_eq!(accepted, 1);
        assert_eq!(repo.get_all().len(), 1);
    }

    #[test]
    fn test_bulk_import_counts_only_acceptances() {
        let repo = repo();
        repo.create(draft("Alien")).unwrap();

        let accepted = repo.add_bulk(vec![draft("alien"), draft("Heat"), draft("Se7en")]);

        assert_eq!(accepted, 2);
        assert_eq!(repo.get_all().len(), 3);
    }

    #[test]
    fn test_query_matches_title_or_category_name() {
        let repo = repo();
        let scifi = Category::new("Science-Fiction".to_string());
        let drama = Category::new("Drame".to_string());
        let categories = vec![scifi.clone(), drama.clone()];

        let mut alien = draft("Alien");
        alien.category_id = Some(scifi.id);
        repo.create(alien).unwrap();

        let mut heat = draft("Heat");
        heat.category_id = Some(drama.id);
        repo.create(heat).unwrap();

        let mut scired = draft("Sci-Fi Documentary");
        scired.category_id = Some(drama.id);
        repo.create(scired).unwrap();

        let titles: Vec<String> = repo
            .query("sci", None, &categories)
            .into_iter()
            .map(|m| m.title)
            .collect();

        // "Alien" matches via its category name, the documentary via its title
        assert_eq!(titles, vec!["Alien", "Sci-Fi Documentary"]);
    }

    #[test]
    fn test_query_sorts_by_year_descending_with_stable_ties() {
        let repo = repo();

        for (title, year) in [("A", 1999), ("B", 2005), ("C", 1999), ("D", 2010)] {
            let mut d = draft(title);
            d.year = year;
            repo.create(d).unwrap();
        }

        let titles: Vec<String> = repo
            .query("", Some(SortMode::Year), &[])
            .into_iter()
            .map(|m| m.title)
            .collect();

        assert_eq!(titles, vec!["D", "B", "A", "C"]);
    }

    #[test]
    fn test_query_sorts_by_rating_descending() {
        let repo = repo();

        for (title, rating) in [("A", 6.5), ("B", 9.1), ("C", 7.8)] {
            let mut d = draft(title);
            d.rating = rating;
            repo.create(d).unwrap();
        }

        let titles: Vec<String> = repo
            .query("", Some(SortMode::Rating), &[])
            .into_iter()
            .map(|m| m.title)
            .collect();

        assert_eq!(titles, vec!["B", "C", "A"]);
    }

    #[test]
    fn test_query_sorts_by_title_ignoring_case() {
        let repo = repo();
        for title in ["banshee", "Alien", "Casino"] {
            repo.create(draft(title)).unwrap();
        }

        let titles: Vec<String> = repo
            .query("", Some(SortMode::Title), &[])
            .into_iter()
            .map(|m| m.title)
            .collect();

        assert_eq!(titles, vec!["Alien", "banshee", "Casino"]);
    }

    #[test]
    fn test_unrecognized_sort_mode_keeps_store_order() {
        let repo = repo();
        for title in ["C", "A", "B"] {
            repo.create(draft(title)).unwrap();
        }

        assert_eq!(SortMode::parse("added"), None);

        let titles: Vec<String> = repo
            .query("", SortMode::parse("added"), &[])
            .into_iter()
            .map(|m| m.title)
            .collect();

        assert_eq!(titles, vec!["C", "A", "B"]);
    }

    #[test]
    fn test_deleted_category_resolves_as_unknown() {
        let repo = repo();
        let horror = Category::new("Horror".to_string());

        let mut movie = draft("The Thing");
        movie.category_id = Some(horror.id);
        repo.create(movie).unwrap();

        // The category is gone, the movie survives and resolves to "Unknown"
        let survivors = repo.query("unknown", None, &[]);
        assert_eq!(survivors.len(), 1);
        assert_eq!(survivors[0].title, "The Thing");
        assert_eq!(survivors[0].category_name(&[]), "Unknown");
    }

    #[test]
    fn test_query_does_not_mutate_stored_order() {
        let repo = repo();
        for title in ["C", "A", "B"] {
            repo.create(draft(title)).unwrap();
        }

        repo.query("", Some(SortMode::Title), &[]);

        let titles: Vec<String> = repo.get_all().into_iter().map(|m| m.title).collect();
        assert_eq!(titles, vec!["C", "A", "B"]);
    }
}
