use crate::config::ServiceConfig;
use crate::error::{ConfigError, SubmissionError};
use crate::models::analysis_types::AnalysisResult;
use crate::models::asset_types::ImageAsset;
use log::debug;
use reqwest::multipart::{Form, Part};
use reqwest::Url;
use std::future::Future;

/// Multipart field carrying the image bytes.
pub const FILE_FIELD: &str = "file";

/// Remote analysis of one image. Implementations resolve once per asset and
/// are never called concurrently by the orchestrator.
pub trait AnalysisService: Send + Sync {
    fn analyze(
        &self,
        asset: &ImageAsset,
    ) -> impl Future<Output = Result<AnalysisResult, SubmissionError>> + Send;
}

/// `POST <endpoint>/cull` with a single-file multipart body.
#[derive(Clone)]
pub struct HttpAnalysisClient {
    http: reqwest::Client,
    cull_url: Url,
}

impl HttpAnalysisClient {
    pub fn new(config: &ServiceConfig) -> Result<Self, ConfigError> {
        let mut builder = reqwest::Client::builder().connect_timeout(config.connect_timeout());
        if let Some(timeout) = config.request_timeout() {
            builder = builder.timeout(timeout);
        }

        Ok(Self {
            http: builder.build()?,
            cull_url: config.cull_url()?,
        })
    }

    pub fn cull_url(&self) -> &Url {
        &self.cull_url
    }
}

impl AnalysisService for HttpAnalysisClient {
    async fn analyze(&self, asset: &ImageAsset) -> Result<AnalysisResult, SubmissionError> {
        let url = self.cull_url.as_str();
        let bytes = asset.read_bytes().await.map_err(|source| SubmissionError::Asset {
            name: asset.name().to_string(),
            source,
        })?;
        let mime = asset.mime_type(&bytes);
        let size = bytes.len();

        let part = Part::bytes(bytes)
            .file_name(asset.name().to_string())
            .mime_str(mime)
            .map_err(|e| SubmissionError::Transport(format!("invalid content type {}: {}", mime, e)))?;
        let form = Form::new().part(FILE_FIELD, part);

        debug!("Submitting {} ({} bytes, {}) to {}", asset.name(), size, mime, url);

        let response = self
            .http
            .post(self.cull_url.clone())
            .multipart(form)
            .send()
            .await
            .map_err(|e| SubmissionError::from_transport(url, e))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(SubmissionError::status(status.as_u16(), &body));
        }

        let body = response
            .bytes()
            .await
            .map_err(|e| SubmissionError::from_transport(url, e))?;

        serde_json::from_slice::<AnalysisResult>(&body)
            .map_err(|e| SubmissionError::Malformed(e.to_string()))
    }
}
