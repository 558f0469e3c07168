// src/repositories/mod.rs
//
// Repository layer
//
// CRITICAL RULES:
// - Repositories own one collection each, backed by the store adapter
// - Every read deserializes a fresh collection; every write replaces it whole
// - NO cross-repository calls: query projections take the data they need
// - NO DOM/view references, NO network

pub mod category_repository;
pub mod movie_repository;

pub use category_repository::{CategoryRepository, KvCategoryRepository};
pub use movie_repository::{ImportOutcome, KvMovieRepository, MovieRepository, SortMode};
