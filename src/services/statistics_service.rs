// src/services/statistics_service.rs
use std::collections::BTreeMap;
use std::sync::Arc;

use crate::domain::statistics::{CatalogStatistics, CategoryCount, YearCount};
use crate::domain::UNKNOWN_CATEGORY;
use crate::repositories::{CategoryRepository, MovieRepository};

/// Read-only dashboard aggregates over both collections.
pub struct StatisticsService {
    movie_repo: Arc<dyn MovieRepository>,
    category_repo: Arc<dyn CategoryRepository>,
}

impl StatisticsService {
    pub fn new(
        movie_repo: Arc<dyn MovieRepository>,
        category_repo: Arc<dyn CategoryRepository>,
    ) -> Self {
        Self {
            movie_repo,
            category_repo,
        }
    }

    pub fn calculate(&self) -> CatalogStatistics {
        let movies = self.movie_repo.get_all();
        let categories = self.category_repo.get_all();

        let average_rating = if movies.is_empty() {
            0.0
        } else {
            movies.iter().map(|m| m.rating).sum::<f64>() / movies.len() as f64
        };

        // One bucket per category, zero included; orphaned references are
        // bucketed under "Unknown"
        let mut movies_by_category: Vec<CategoryCount> = categories
            .iter()
            .map(|c| CategoryCount {
                name: c.name.clone(),
                count: 0,
            })
            .collect();
        let mut unknown = 0u32;

        for movie in &movies {
            let position = movie
                .category_id
                .and_then(|id| categories.iter().position(|c| c.id == id));
            match position {
                Some(index) => movies_by_category[index].count += 1,
                None => unknown += 1,
            }
        }

        if unknown > 0 {
            movies_by_category.push(CategoryCount {
                name: UNKNOWN_CATEGORY.to_string(),
                count: unknown,
            });
        }

        let mut year_counts: BTreeMap<i32, u32> = BTreeMap::new();
        for movie in &movies {
            *year_counts.entry(movie.year).or_insert(0) += 1;
        }
        let movies_by_year = year_counts
            .into_iter()
            .map(|(year, count)| YearCount { year, count })
            .collect();

        CatalogStatistics {
            total_movies: movies.len() as u32,
            total_categories: categories.len() as u32,
            average_rating,
            movies_by_category,
            movies_by_year,
        }
    }
}
