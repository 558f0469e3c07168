pub mod client;

pub use client::{SearchResult, Show, ShowImage, ShowRating, ShowSearchClient, TvMazeClient};
