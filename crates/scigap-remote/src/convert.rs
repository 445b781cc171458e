//! Remote PDF-to-text conversion client
//!
//! Drives the conversion service through its four-step job workflow:
//! create job, upload the document, process, fetch the output. Any
//! non-success status at any step fails the whole request immediately;
//! there is no retry or backoff at this layer.
//!
//! The service reports per-page column regions, which are assembled
//! into document text with the two-column line-count heuristic.

use std::time::Duration;

use reqwest::Client;
use serde::{Deserialize, Serialize};

use scigap_core::{ConversionConfig, Result, ScigapError};
use scigap_text::{assemble_document, PageRegions};

/// Conversion job handle returned by the service
#[derive(Debug, Deserialize)]
struct CreateJobResponse {
    id: String,
}

#[derive(Debug, Serialize)]
struct CreateJobRequest<'a> {
    filename: &'a str,
}

/// Per-page output of a finished conversion job
#[derive(Debug, Deserialize)]
struct JobOutput {
    pages: Vec<PageRegions>,
}

/// Client for the remote conversion service
pub struct ConversionClient {
    client: Client,
    base_url: String,
    api_key: Option<String>,
    /// Line-count tolerance for the two-column page heuristic
    column_tolerance: usize,
}

impl ConversionClient {
    pub fn new(config: &ConversionConfig, column_tolerance: usize) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| ScigapError::Config(format!("conversion client: {e}")))?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            api_key: config.api_key.clone(),
            column_tolerance,
        })
    }

    fn authorize(&self, request: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match &self.api_key {
            Some(key) => request.header("Authorization", format!("Bearer {key}")),
            None => request,
        }
    }

    /// Convert a PDF into raw document text.
    pub async fn convert(&self, filename: &str, bytes: &[u8]) -> Result<String> {
        let job_id = self.create_job(filename).await?;
        tracing::debug!(job_id = %job_id, "conversion job created");

        self.upload(&job_id, bytes).await?;
        self.process(&job_id).await?;
        let output = self.fetch_output(&job_id).await?;

        tracing::info!(job_id = %job_id, pages = output.pages.len(), "conversion finished");
        Ok(assemble_document(&output.pages, self.column_tolerance))
    }

    async fn create_job(&self, filename: &str) -> Result<String> {
        let response = self
            .authorize(self.client.post(format!("{}/jobs", self.base_url)))
            .json(&CreateJobRequest { filename })
            .send()
            .await
            .map_err(|e| ScigapError::Extraction(format!("job creation failed: {e}")))?;

        if !response.status().is_success() {
            return Err(ScigapError::Extraction(format!(
                "job creation failed: {}",
                response.status()
            )));
        }

        let created: CreateJobResponse = response
            .json()
            .await
            .map_err(|e| ScigapError::Extraction(format!("job creation failed: {e}")))?;

        Ok(created.id)
    }

    async fn upload(&self, job_id: &str, bytes: &[u8]) -> Result<()> {
        let response = self
            .authorize(
                self.client
                    .put(format!("{}/jobs/{}/input", self.base_url, job_id)),
            )
            .header("Content-Type", "application/pdf")
            .body(bytes.to_vec())
            .send()
            .await
            .map_err(|e| ScigapError::Extraction(format!("upload failed: {e}")))?;

        if !response.status().is_success() {
            return Err(ScigapError::Extraction(format!(
                "upload failed: {}",
                response.status()
            )));
        }

        Ok(())
    }

    async fn process(&self, job_id: &str) -> Result<()> {
        let response = self
            .authorize(
                self.client
                    .post(format!("{}/jobs/{}/process", self.base_url, job_id)),
            )
            .send()
            .await
            .map_err(|e| ScigapError::Extraction(format!("processing failed: {e}")))?;

        if !response.status().is_success() {
            return Err(ScigapError::Extraction(format!(
                "processing failed: {}",
                response.status()
            )));
        }

        Ok(())
    }

    async fn fetch_output(&self, job_id: &str) -> Result<JobOutput> {
        let response = self
            .authorize(
                self.client
                    .get(format!("{}/jobs/{}/output", self.base_url, job_id)),
            )
            .send()
            .await
            .map_err(|e| ScigapError::Extraction(format!("output retrieval failed: {e}")))?;

        if !response.status().is_success() {
            return Err(ScigapError::Extraction(format!(
                "output retrieval failed: {}",
                response.status()
            )));
        }

        response
            .json()
            .await
            .map_err(|e| ScigapError::Extraction(format!("output retrieval failed: {e}")))
    }
}
