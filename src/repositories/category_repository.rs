// src/repositories/category_repository.rs
//
// Category persistence over the key-value store

use std::sync::Arc;
use uuid::Uuid;

use crate::domain::category::Category;
use crate::domain::DomainError;
use crate::error::{AppError, AppResult};
use crate::store::{StoreAdapter, CATEGORIES_KEY};

/// Categories written on first-ever use, in this order.
const DEFAULT_CATEGORIES: [&str; 5] = [
    "Action",
    "Drame",
    "Science-Fiction",
    "Comédie",
    "Romance",
];

/// The seed list predates the localization cleanup; both labels mean the same
/// genre and are collapsed to the canonical one on every initialization.
const LOCALIZED_COMEDY: &str = "comédie";
const CANONICAL_COMEDY: &str = "Comedy";

pub trait CategoryRepository: Send + Sync {
    fn get_all(&self) -> Vec<Category>;
    fn get_by_id(&self, id: Uuid) -> Option<Category>;
    fn add(&self, name: &str) -> AppResult<Category>;
    fn delete(&self, id: Uuid);
    fn ensure_seeded(&self);
}

pub struct KvCategoryRepository {
    store: Arc<dyn StoreAdapter>,
}

impl KvCategoryRepository {
    pub fn new(store: Arc<dyn StoreAdapter>) -> Self {
        Self { store }
    }

    /// Materialize the stored collection. Absence and unreadable data both
    /// degrade to an empty collection.
    fn load(&self) -> Vec<Category> {
        match self.store.get(CATEGORIES_KEY) {
            Some(value) => match serde_json::from_value(value) {
                Ok(categories) => categories,
                Err(e) => {
                    log::error!("Unreadable category collection: {}", e);
                    Vec::new()
                }
            },
            None => Vec::new(),
        }
    }

    /// Serialize and fully replace the stored collection.
    fn persist(&self, categories: &[Category]) {
        match serde_json::to_value(categories) {
            Ok(value) => self.store.set(CATEGORIES_KEY, &value),
            Err(e) => log::error!("Failed to serialize category collection: {}", e),
        }
    }

    /// Collapse the localized comedy duplicates into one canonical entry.
    ///
    /// Idempotent: once the canonical entry is the only comedy present, later
    /// runs change nothing.
    fn reconcile_comedy(&self) {
        let mut categories = self.load();

        let localized = categories
            .iter()
            .position(|c| c.name.to_lowercase() == LOCALIZED_COMEDY);
        let canonical = categories
            .iter()
            .position(|c| c.name.eq_ignore_ascii_case(CANONICAL_COMEDY));

        match (localized, canonical) {
            // Both exist: drop the localized one
            (Some(index), Some(_)) => {
                categories.remove(index);
                self.persist(&categories);
            }
            // Only the localized one: rename it in place
            (Some(index), None) => {
                categories[index].name = CANONICAL_COMEDY.to_string();
                self.persist(&categories);
            }
            // Neither: append the canonical entry
            (None, None) => {
                categories.push(Category::new(CANONICAL_COMEDY.to_string()));
                self.persist(&categories);
            }
            (None, Some(_)) => {}
        }
    }
}

impl CategoryRepository for KvCategoryRepository {
    fn get_all(&self) -> Vec<Category> {
        self.load()
    }

    fn get_by_id(&self, id: Uuid) -> Option<Category> {
        self.load().into_iter().find(|c| c.id == id)
    }

    fn add(&self, name: &str) -> AppResult<Category> {
        let name = name.trim();
        if name.is_empty() {
            return Err(AppError::Validation(DomainError::InvariantViolation(
                "category name must not be empty".to_string(),
            )));
        }

        let mut categories = self.load();
        let lowered = name.to_lowercase();
        if categories.iter().any(|c| c.name.to_lowercase() == lowered) {
            return Err(AppError::Duplicate(name.to_string()));
        }

        let category = Category::new(name.to_string());
        categories.push(category.clone());
        self.persist(&categories);
        Ok(category)
    }

    fn delete(&self, id: Uuid) {
        let mut categories = self.load();
        let before = categories.len();
        categories.retain(|c| c.id != id);

        // No-op when the id is unknown; deletion never cascades to movies
        if categories.len() != before {
            self.persist(&categories);
        }
    }

    fn ensure_seeded(&self) {
        // Only an ABSENT collection is seeded; an explicitly emptied one stays
        // empty apart from the canonical comedy entry below
        if self.store.get(CATEGORIES_KEY).is_none() {
            let defaults: Vec<Category> = DEFAULT_CATEGORIES
                .iter()
                .map(|name| Category::new((*name).to_string()))
                .collect();
            self.persist(&defaults);
            log::info!("Seeded {} default categories", defaults.len());
        }

        self.reconcile_comedy();
    }
}
