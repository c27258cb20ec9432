//! HTTP client for the external plant catalog (Perenual-compatible API).
//!
//! Configuration is via environment variables:
//! - `PLANTHUB_API_URL` - Base URL (default: `https://perenual.com/api`)
//! - `PLANTHUB_API_KEY` - Catalog API key (optional)
//!
//! Successful responses are memoized in-process, keyed by request path and
//! query. The client reports typed errors; consumers that promise "empty
//! result, never a failure" degrade at their own call sites.

mod types;
pub use types::*;

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use reqwest::Client;
use serde::de::DeserializeOwned;
use thiserror::Error;

/// Default catalog endpoint.
const DEFAULT_URL: &str = "https://perenual.com/api";

/// Catalog client errors.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Malformed catalog response: {0}")]
    Malformed(#[from] serde_json::Error),
}

/// HTTP client for the plant catalog.
#[derive(Debug, Clone)]
pub struct CatalogClient {
    base_url: String,
    api_key: Option<String>,
    client: Client,
    cache: Arc<Mutex<HashMap<String, serde_json::Value>>>,
}

impl CatalogClient {
    /// Create client from environment variables.
    pub fn from_env() -> Self {
        let base_url =
            std::env::var("PLANTHUB_API_URL").unwrap_or_else(|_| DEFAULT_URL.to_string());
        let api_key = std::env::var("PLANTHUB_API_KEY").ok();
        Self::new(base_url, api_key)
    }

    /// Create with explicit configuration.
    pub fn new(base_url: impl Into<String>, api_key: Option<String>) -> Self {
        Self {
            base_url: base_url.into(),
            api_key,
            client: Client::new(),
            cache: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    /// Fetch a JSON document, consulting the memo cache first. The cache key
    /// excludes the API key.
    async fn get_json(
        &self,
        path: &str,
        params: &[(&str, String)],
    ) -> Result<serde_json::Value, CatalogError> {
        let cache_key = format!(
            "{}?{}",
            path,
            params
                .iter()
                .map(|(k, v)| format!("{}={}", k, v))
                .collect::<Vec<_>>()
                .join("&")
        );
        if let Some(hit) = self.cache.lock().expect("cache lock poisoned").get(&cache_key) {
            return Ok(hit.clone());
        }

        let mut req = self
            .client
            .get(format!("{}{}", self.base_url, path))
            .query(params);
        if let Some(ref key) = self.api_key {
            req = req.query(&[("key", key.as_str())]);
        }

        let value: serde_json::Value = req.send().await?.error_for_status()?.json().await?;

        self.cache
            .lock()
            .expect("cache lock poisoned")
            .insert(cache_key, value.clone());
        Ok(value)
    }

    async fn get_typed<T: DeserializeOwned>(
        &self,
        path: &str,
        params: &[(&str, String)],
    ) -> Result<T, CatalogError> {
        let value = self.get_json(path, params).await?;
        Ok(serde_json::from_value(value)?)
    }

    /// Paginated free-text species search with optional filters.
    pub async fn search_species(&self, query: &SpeciesQuery) -> Result<SpeciesPage, CatalogError> {
        let mut params: Vec<(&str, String)> = vec![
            ("q", query.q.clone()),
            ("page", query.page.unwrap_or(1).to_string()),
        ];
        if let Some(indoor) = query.indoor {
            params.push(("indoor", if indoor { "1" } else { "0" }.to_string()));
        }
        if let Some(edible) = query.edible {
            params.push(("edible", if edible { "1" } else { "0" }.to_string()));
        }
        if let Some(poisonous) = query.poisonous {
            params.push(("poisonous", if poisonous { "1" } else { "0" }.to_string()));
        }
        if let Some(ref cycle) = query.cycle {
            params.push(("cycle", cycle.clone()));
        }
        if let Some(ref watering) = query.watering {
            params.push(("watering", watering.clone()));
        }
        if let Some(ref sunlight) = query.sunlight {
            params.push(("sunlight", sunlight.clone()));
        }

        let page: RawPage<RawSpecies> = self.get_typed("/species-list", &params).await?;
        Ok(SpeciesPage {
            species: page
                .data
                .into_iter()
                .map(SpeciesSummary::from_raw)
                .collect(),
            page: page.current_page.unwrap_or(1),
            last_page: page.last_page.unwrap_or(1),
            total: page.total.unwrap_or(0),
        })
    }

    /// Full species record by catalog id.
    pub async fn species_detail(&self, id: i64) -> Result<SpeciesSummary, CatalogError> {
        let raw: RawSpecies = self
            .get_typed(&format!("/species/details/{}", id), &[])
            .await?;
        Ok(SpeciesSummary::from_raw(raw))
    }

    /// Two-step care-guide fetch: list guide summaries for the species, then
    /// fetch the full detail of the first one. `None` when the catalog has no
    /// guide for this species.
    pub async fn care_guide(&self, species_id: i64) -> Result<Option<CareGuide>, CatalogError> {
        let list: RawPage<RawCareGuide> = self
            .get_typed(
                "/species-care-guide-list",
                &[("species_id", species_id.to_string())],
            )
            .await?;

        let Some(first) = list.data.first() else {
            return Ok(None);
        };

        let guide: RawCareGuide = self
            .get_typed(&format!("/species-care-guide-details/{}", first.id), &[])
            .await?;

        Ok(Some(CareGuide {
            species_id,
            sections: guide.section,
        }))
    }

    /// Pests and diseases affecting a species.
    pub async fn pest_diseases(&self, species_id: i64) -> Result<Vec<PestDisease>, CatalogError> {
        let page: RawPage<PestDisease> = self
            .get_typed(
                "/pest-disease-list",
                &[("species_id", species_id.to_string())],
            )
            .await?;
        Ok(page.data)
    }
}
