//! HTTP client for the fitness backend API
//!
//! This module provides the [`FitnessApi`] seam used by the form, program
//! and dashboard components, and [`FitnessApiClient`], its `reqwest`
//! implementation. Every operation makes exactly one attempt; failures are
//! classified into transport, server and invalid-response errors.

use std::time::Instant;

use async_trait::async_trait;
use reqwest::{Client, Response};
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::{debug, error, info, instrument, warn};

use crate::config::ApiConfig;
use crate::models::{ContactMessage, ContactReceipt, NutritionResult, Program, WeatherReport};
use crate::{FitDashError, Result};

/// Operations the backend exposes to the site
#[async_trait]
pub trait FitnessApi: Send + Sync {
    /// POST `/contactos/`
    async fn submit_contact(&self, message: &ContactMessage) -> Result<ContactReceipt>;

    /// GET `/programas/`
    async fn list_programs(&self) -> Result<Vec<Program>>;

    /// GET `/weather/?ciudad=`
    async fn weather(&self, city: &str) -> Result<WeatherReport>;

    /// GET `/nutrition/?categoria=`
    async fn nutrition(&self, category: &str) -> Result<NutritionResult>;
}

/// `reqwest`-backed client bound to one base URL
#[derive(Debug, Clone)]
pub struct FitnessApiClient {
    client: Client,
    base_url: String,
}

impl FitnessApiClient {
    /// Create a new client from the API configuration
    pub fn new(config: &ApiConfig) -> Result<Self> {
        let mut builder = Client::builder().user_agent(config.user_agent.clone());
        if let Some(timeout) = config.timeout() {
            builder = builder.timeout(timeout);
        }

        let client = builder
            .build()
            .map_err(|e| FitDashError::config(format!("Failed to create HTTP client: {e}")))?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Send a GET and decode a 2xx JSON body
    async fn get_json<T: DeserializeOwned>(&self, url: &str) -> Result<T> {
        let response = self.send(self.client.get(url)).await?;
        decode_json(response).await
    }

    /// Send a request once and turn non-2xx statuses into [`FitDashError::Server`]
    async fn send(&self, request: reqwest::RequestBuilder) -> Result<Response> {
        let start = Instant::now();

        let response = request.send().await.map_err(|e| {
            warn!("Network error after {:.3}s: {}", start.elapsed().as_secs_f64(), e);
            FitDashError::transport(e.to_string())
        })?;

        let status = response.status();
        let elapsed = start.elapsed();
        debug!("HTTP response received: {} in {:.3}s", status, elapsed.as_secs_f64());

        if elapsed.as_secs() > 5 {
            warn!("Slow API response detected: {:.3}s", elapsed.as_secs_f64());
        }

        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_else(|e| {
            debug!("Error body could not be read ({}), using generic message", e);
            String::new()
        });
        let detail = error_detail(&body);
        warn!(
            "API request failed with status {}{}",
            status,
            detail.as_deref().map(|d| format!(": {d}")).unwrap_or_default()
        );
        Err(FitDashError::server(status.as_u16(), detail))
    }
}

#[async_trait]
impl FitnessApi for FitnessApiClient {
    #[instrument(skip(self, message))]
    async fn submit_contact(&self, message: &ContactMessage) -> Result<ContactReceipt> {
        info!("Submitting contact message");

        let request = self
            .client
            .post(self.url("/contactos/"))
            .header(reqwest::header::ACCEPT, "application/json")
            .json(message);
        let response = self.send(request).await?;
        let status = response.status();

        // Any 2xx is an acknowledgement; the body is informational only
        let bytes = response.bytes().await.unwrap_or_default();
        let receipt = serde_json::from_slice::<ContactReceipt>(&bytes).unwrap_or_else(|e| {
            debug!("Contact receipt body not understood ({}), continuing", e);
            ContactReceipt::default()
        });

        info!("Contact message accepted with status {}", status);
        Ok(receipt)
    }

    #[instrument(skip(self))]
    async fn list_programs(&self) -> Result<Vec<Program>> {
        let programs: Vec<Program> = self.get_json(&self.url("/programas/")).await?;
        info!("Loaded {} programs", programs.len());
        Ok(programs)
    }

    #[instrument(skip(self))]
    async fn weather(&self, city: &str) -> Result<WeatherReport> {
        let url = format!("{}?ciudad={}", self.url("/weather/"), urlencoding::encode(city));
        debug!("Weather request URL: {}", url);

        let report: WeatherReport = self.get_json(&url).await?;
        if let WeatherReport::Unavailable { error } = &report {
            warn!("Weather service reported an error for '{}': {}", city, error);
        }
        Ok(report)
    }

    #[instrument(skip(self))]
    async fn nutrition(&self, category: &str) -> Result<NutritionResult> {
        let url = format!(
            "{}?categoria={}",
            self.url("/nutrition/"),
            urlencoding::encode(category)
        );
        debug!("Nutrition request URL: {}", url);

        let result: NutritionResult = self.get_json(&url).await?;
        match &result {
            NutritionResult::Summary(summary) => {
                info!("Found {} recipes for '{}'", summary.total_recipes, category)
            }
            NutritionResult::Unavailable { error } => {
                warn!("Nutrition service reported an error for '{}': {}", category, error)
            }
        }
        Ok(result)
    }
}

async fn decode_json<T: DeserializeOwned>(response: Response) -> Result<T> {
    let status = response.status();
    let bytes = response.bytes().await.map_err(|e| {
        error!("Failed to read response body: {}", e);
        FitDashError::transport(e.to_string())
    })?;

    serde_json::from_slice(&bytes).map_err(|e| {
        error!("Failed to parse {} response: {}", status, e);
        FitDashError::invalid_response(e.to_string())
    })
}

/// Extract a user-facing message from an error body.
///
/// `detail` may be a plain string or a list of `{"msg": ..}` validation
/// entries; anything else yields `None`.
#[must_use]
pub fn error_detail(body: &str) -> Option<String> {
    let value: Value = serde_json::from_str(body).ok()?;
    match value.get("detail")? {
        Value::String(detail) if !detail.trim().is_empty() => Some(detail.clone()),
        Value::Array(entries) => {
            let messages: Vec<&str> = entries
                .iter()
                .filter_map(|entry| entry.get("msg").and_then(Value::as_str))
                .collect();
            (!messages.is_empty()).then(|| messages.join("; "))
        }
        _ => None,
    }
}
