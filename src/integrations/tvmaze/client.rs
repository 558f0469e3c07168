// src/integrations/tvmaze/client.rs
//
// TVMaze API Integration
//
// ARCHITECTURE:
// - REST client for the public TVMaze show-search endpoint
// - Maps external JSON → typed DTOs (NO domain mutation)
// - Used by ImportService
//
// CRITICAL RULES:
// - This is INFRASTRUCTURE, not DOMAIN
// - Never creates or modifies domain entities directly
// - One request per call; no retry, no request-generation guard

use crate::error::{AppError, AppResult};
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// One entry of a TVMaze search response. The schema is fixed and
/// unversioned; fields this application does not consume are ignored.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchResult {
    pub show: Show,
}

/// TVMaze show metadata
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Show {
    pub name: String,
    #[serde(default)]
    pub genres: Vec<String>,
    /// Premiere date as "YYYY-MM-DD"
    pub premiered: Option<String>,
    /// Runtime in minutes
    pub runtime: Option<u32>,
    #[serde(default)]
    pub rating: ShowRating,
    pub image: Option<ShowImage>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ShowRating {
    pub average: Option<f64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShowImage {
    pub medium: Option<String>,
}

/// Search seam between the import reconciler and the network.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ShowSearchClient: Send + Sync {
    async fn search_shows(&self, query: &str) -> AppResult<Vec<SearchResult>>;
}

/// TVMaze API client
pub struct TvMazeClient {
    base_url: String,
    http_client: Client,
}

impl TvMazeClient {
    /// Create a new TVMaze client
    pub fn new() -> Self {
        let http_client = Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .expect("Failed to create HTTP client");

        Self {
            base_url: "https://api.tvmaze.com".to_string(),
            http_client,
        }
    }

    /// Create a client against a different endpoint (tests, proxies)
    pub fn with_base_url(base_url: String) -> Self {
        let mut client = Self::new();
        client.base_url = base_url;
        client
    }
}

#[async_trait]
impl ShowSearchClient for TvMazeClient {
    async fn search_shows(&self, query: &str) -> AppResult<Vec<SearchResult>> {
        let url = format!("{}/search/shows", self.base_url);

        let response = self
            .http_client
            .get(&url)
            .query(&[("q", query)])
            .send()
            .await
            .map_err(|e| AppError::Network(format!("Show search request failed: {}", e)))?;

        if !response.status().is_success() {
            return Err(AppError::Network(format!(
                "Show search returned status: {}",
                response.status()
            )));
        }

        let body = response
            .text()
            .await
            .map_err(|e| AppError::Network(format!("Failed to read show search response: {}", e)))?;

        serde_json::from_str(&body)
            .map_err(|e| AppError::Parse(format!("Invalid show search response: {}", e)))
    }
}

impl Default for TvMazeClient {
    fn default() -> Self {
        Self::new()
    }
}
