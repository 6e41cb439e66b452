//! Hosted-database REST listing store.
//!
//! Talks to a PostgREST-compatible endpoint (the REST surface of hosted
//! Postgres services) with the project's anon API key. One insert is one
//! `POST {base}/rest/v1/listings` carrying a single-element JSON array.
//!
//! Feature-gated behind `rest-backend`.

use reqwest::header::{HeaderMap, HeaderValue};

use crate::{LISTINGS_TABLE, ListingRecord, ListingStore, StoreError};

/// A listing store backed by a hosted REST endpoint.
#[derive(Clone)]
pub struct RestStore {
    client: reqwest::Client,
    endpoint: String,
}

impl std::fmt::Debug for RestStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RestStore")
            .field("endpoint", &self.endpoint)
            .finish_non_exhaustive()
    }
}

impl RestStore {
    /// Build a store for the project at `base_url` authenticated with `api_key`.
    ///
    /// No request is made here; a bad URL or key surfaces on the first insert.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Connect`] if the key is not a valid header value
    /// or the HTTP client cannot be built.
    pub fn new(base_url: &str, api_key: &str) -> Result<Self, StoreError> {
        let connect_err = |reason: String| StoreError::Connect {
            target: base_url.to_owned(),
            reason,
        };

        let mut headers = HeaderMap::new();
        let key = HeaderValue::from_str(api_key)
            .map_err(|_| connect_err("API key is not a valid header value".to_owned()))?;
        let bearer = HeaderValue::from_str(&format!("Bearer {api_key}"))
            .map_err(|_| connect_err("API key is not a valid header value".to_owned()))?;
        headers.insert("apikey", key);
        headers.insert(reqwest::header::AUTHORIZATION, bearer);
        headers.insert("Prefer", HeaderValue::from_static("return=minimal"));

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .build()
            .map_err(|e| connect_err(e.to_string()))?;

        Ok(Self {
            client,
            endpoint: endpoint_for(base_url),
        })
    }

    /// The full insert URL this store posts to.
    #[must_use]
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

fn endpoint_for(base_url: &str) -> String {
    format!("{}/rest/v1/{LISTINGS_TABLE}", base_url.trim_end_matches('/'))
}

#[async_trait::async_trait]
impl ListingStore for RestStore {
    #[allow(clippy::unnecessary_literal_bound)]
    fn name(&self) -> &str {
        "rest"
    }

    async fn insert(&self, record: &ListingRecord) -> Result<(), StoreError> {
        let resp = self
            .client
            .post(&self.endpoint)
            .json(&[record])
            .send()
            .await
            .map_err(|e| StoreError::Insert {
                table: LISTINGS_TABLE.to_owned(),
                reason: e.to_string(),
            })?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(StoreError::Rejected {
                table: LISTINGS_TABLE.to_owned(),
                status: status.as_u16(),
                body,
            });
        }

        Ok(())
    }
}
