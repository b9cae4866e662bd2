use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;
use tracing::{debug, warn};
use url::Url;

use crate::catalog::{Catalog, Company, FsCatalog, Timeframe};
use crate::config::ClientConfig;
use crate::error::{Error, Result};

/// Where the browser gets its data from. Failures never surface to the
/// pages: they are logged and become empty results.
#[async_trait]
pub trait SheetSource: Send + Sync {
    async fn companies(&self) -> Vec<Company>;

    async fn questions(&self, company: &str, timeframe: Timeframe) -> Vec<Value>;
}

/// HTTP client for a running catalog server.
#[derive(Debug, Clone)]
pub struct CatalogClient {
    client: Client,
    base_url: Url,
    user_agent: String,
}

impl CatalogClient {
    pub fn new(config: &ClientConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .gzip(true)
            .build()
            .map_err(|e| Error::HttpError(format!("Failed to create HTTP client: {}", e)))?;

        let mut base_url = Url::parse(&config.base_url)
            .map_err(|e| Error::InvalidUrl(format!("{}: {}", config.base_url, e)))?;
        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }

        Ok(Self {
            client,
            base_url,
            user_agent: config.user_agent.clone(),
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    pub async fn fetch_companies(&self) -> Result<Vec<Company>> {
        let body = self.get_json("api/companies", &[]).await?;
        Ok(extract_companies(body))
    }

    pub async fn fetch_questions(&self, company: &str, timeframe: Timeframe) -> Result<Vec<Value>> {
        let body = self
            .get_json(
                "api/questions",
                &[("company", company), ("timeframe", timeframe.as_str())],
            )
            .await?;
        Ok(extract_questions(body))
    }

    async fn get_json(&self, endpoint: &str, query: &[(&str, &str)]) -> Result<Value> {
        let url = self
            .base_url
            .join(endpoint)
            .map_err(|e| Error::InvalidUrl(e.to_string()))?;
        debug!("GET {}", url);

        let response = self
            .client
            .get(url.clone())
            .header("User-Agent", &self.user_agent)
            .header("Accept", "application/json")
            .query(query)
            .send()
            .await
            .map_err(|e| Error::HttpError(format!("Request failed: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            // error bodies are still JSON, the extractors turn them into empty results
            warn!("HTTP {} for {}", status.as_u16(), url);
        }

        response
            .json::<Value>()
            .await
            .map_err(|e| Error::HttpError(format!("Failed to decode response: {}", e)))
    }
}

#[async_trait]
impl SheetSource for CatalogClient {
    async fn companies(&self) -> Vec<Company> {
        self.fetch_companies().await.unwrap_or_else(|e| {
            warn!("Error fetching companies: {}", e);
            Vec::new()
        })
    }

    async fn questions(&self, company: &str, timeframe: Timeframe) -> Vec<Value> {
        self.fetch_questions(company, timeframe)
            .await
            .unwrap_or_else(|e| {
                warn!("Error fetching questions: {}", e);
                Vec::new()
            })
    }
}

#[async_trait]
impl SheetSource for FsCatalog {
    async fn companies(&self) -> Vec<Company> {
        self.list_companies().await.unwrap_or_else(|e| {
            warn!("Error reading companies: {}", e);
            Vec::new()
        })
    }

    async fn questions(&self, company: &str, timeframe: Timeframe) -> Vec<Value> {
        self.question_values(company, timeframe)
            .await
            .unwrap_or_else(|e| {
                warn!("Error reading questions: {}", e);
                Vec::new()
            })
    }
}

impl FsCatalog {
    /// Rows of a sheet in the same JSON shape the server sends.
    pub async fn question_values(&self, company: &str, timeframe: Timeframe) -> Result<Vec<Value>> {
        let rows = self.load_questions(company, timeframe.as_str()).await?;
        rows.into_iter()
            .map(|row| serde_json::to_value(row).map_err(Error::from))
            .collect()
    }
}

/// `{"companies": [...]}` to company names. Non-string entries are skipped.
pub fn extract_companies(body: Value) -> Vec<Company> {
    match body {
        Value::Object(mut fields) => match fields.remove("companies") {
            Some(Value::Array(items)) => items
                .into_iter()
                .filter_map(|item| match item {
                    Value::String(name) => Some(Company::new(name)),
                    _ => None,
                })
                .collect(),
            _ => Vec::new(),
        },
        _ => Vec::new(),
    }
}

/// A bare array of rows, or an object wrapping them under `questions`.
pub fn extract_questions(body: Value) -> Vec<Value> {
    match body {
        Value::Array(rows) => rows,
        Value::Object(mut fields) => match fields.remove("questions") {
            Some(Value::Array(rows)) => rows,
            _ => Vec::new(),
        },
        _ => Vec::new(),
    }
}
