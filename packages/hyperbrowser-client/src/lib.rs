//! Pure Hyperbrowser REST API client.
//!
//! A minimal client for the Hyperbrowser extract API. Supports starting
//! extract jobs, polling for completion, and fetching the structured
//! result. Session concerns (stealth, proxies, captcha solving) are
//! request options handled entirely by the remote service.
//!
//! # Example
//!
//! ```rust,ignore
//! use hyperbrowser_client::{HyperbrowserClient, SessionOptions, StartExtractJobParams};
//!
//! let client = HyperbrowserClient::from_env()?;
//!
//! let params = StartExtractJobParams::new("https://store.example.com/p/123")
//!     .with_prompt("Extract the product on this page")
//!     .with_schema(schema)
//!     .with_session_options(SessionOptions::default().with_stealth().with_proxy());
//!
//! let data = client.extract(&params).await?;
//! ```

pub mod error;
pub mod types;

pub use error::{HyperbrowserError, Result};
pub use types::{
    ExtractJobResponse, ExtractJobStatus, SessionOptions, StartExtractJobParams,
    StartExtractJobResponse,
};

use std::time::Duration;

const BASE_URL: &str = "https://api.hyperbrowser.ai/api";

/// Pure Hyperbrowser API client.
#[derive(Clone)]
pub struct HyperbrowserClient {
    http_client: reqwest::Client,
    api_key: String,
    base_url: String,
    /// Timeout for polling extract job status (seconds)
    poll_timeout_secs: u64,
    /// Interval between poll attempts (seconds)
    poll_interval_secs: u64,
}

impl HyperbrowserClient {
    /// Create a new client with the given API key.
    pub fn new(api_key: impl Into<String>) -> Result<Self> {
        let http_client = reqwest::Client::builder()
            .timeout(Duration::from_secs(120))
            .build()?;

        Ok(Self {
            http_client,
            api_key: api_key.into(),
            base_url: BASE_URL.to_string(),
            poll_timeout_secs: 300,
            poll_interval_secs: 5,
        })
    }

    /// Create from environment variable `HYPERBROWSER_API_KEY`.
    pub fn from_env() -> Result<Self> {
        let api_key = std::env::var("HYPERBROWSER_API_KEY")
            .map_err(|_| HyperbrowserError::Config("HYPERBROWSER_API_KEY not set".into()))?;
        Self::new(api_key)
    }

    /// Set a custom base URL (for testing against a stub server).
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Set the poll timeout (seconds).
    pub fn with_poll_timeout(mut self, secs: u64) -> Self {
        self.poll_timeout_secs = secs;
        self
    }

    /// Set the poll interval (seconds, clamped to at least 1).
    pub fn with_poll_interval(mut self, secs: u64) -> Self {
        self.poll_interval_secs = secs.max(1);
        self
    }

    /// Start an extract job. Returns immediately with the job id.
    pub async fn start_extract_job(&self, params: &StartExtractJobParams) -> Result<String> {
        let url = format!("{}/extract", self.base_url);
        let response = self
            .http_client
            .post(&url)
            .header("x-api-key", &self.api_key)
            .json(params)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(HyperbrowserError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let started: StartExtractJobResponse = response.json().await?;
        Ok(started.job_id)
    }

    /// Fetch the current status/result of an extract job.
    pub async fn get_extract_job(&self, job_id: &str) -> Result<ExtractJobResponse> {
        let url = format!("{}/extract/{}", self.base_url, job_id);
        let response = self
            .http_client
            .get(&url)
            .header("x-api-key", &self.api_key)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(HyperbrowserError::Api {
                status: status.as_u16(),
                message,
            });
        }

        Ok(response.json().await?)
    }

    /// Run an extract job end-to-end: start, poll until terminal, return data.
    pub async fn extract(&self, params: &StartExtractJobParams) -> Result<serde_json::Value> {
        tracing::info!(
            url = %params.urls.first().map(String::as_str).unwrap_or(""),
            "Starting extract job"
        );

        let job_id = self.start_extract_job(params).await?;
        tracing::debug!(job_id = %job_id, "Extract job started, polling");

        let max_attempts = self.poll_timeout_secs / self.poll_interval_secs;
        let mut attempts = 0;

        loop {
            attempts += 1;
            if attempts > max_attempts {
                return Err(HyperbrowserError::Timeout { job_id });
            }

            tokio::time::sleep(Duration::from_secs(self.poll_interval_secs)).await;

            let job = self.get_extract_job(&job_id).await?;
            match job.status {
                ExtractJobStatus::Completed => {
                    tracing::info!(job_id = %job_id, "Extract job completed");
                    return job.data.ok_or_else(|| HyperbrowserError::JobFailed {
                        job_id,
                        message: "job completed without data".into(),
                    });
                }
                ExtractJobStatus::Failed => {
                    return Err(HyperbrowserError::JobFailed {
                        job_id,
                        message: job.error.unwrap_or_else(|| "unknown error".into()),
                    });
                }
                ExtractJobStatus::Pending | ExtractJobStatus::Running => {
                    tracing::debug!(job_id = %job_id, status = ?job.status, "Job in progress");
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_builder() {
        let client = HyperbrowserClient::new("hb-test")
            .unwrap()
            .with_base_url("http://localhost:9999/api")
            .with_poll_timeout(10)
            .with_poll_interval(1);

        assert_eq!(client.base_url, "http://localhost:9999/api");
        assert_eq!(client.poll_timeout_secs, 10);
        assert_eq!(client.poll_interval_secs, 1);
    }

    #[test]
    fn test_zero_poll_interval_clamped() {
        let client = HyperbrowserClient::new("hb-test")
            .unwrap()
            .with_poll_interval(0);

        assert_eq!(client.poll_interval_secs, 1);
    }
}
