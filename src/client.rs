use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use base64::Engine;
use chrono::Utc;
use rand::Rng;
use reqwest::Client;
use serde_json::{json, Value};
use thiserror::Error;

use crate::apis::models_api::schemas::{
    GeneratedImage, GenerationParameters, ImageGenerationResponse, QualityMetrics,
};
use crate::cores::synthesis::fabricate_metrics;
use crate::utils::{compose_data_uri, mime_from_extension};

// ---------------------------------------------- Uploaded images ----------------------------------------------
// One user-selected source file. Exists only for the duration of a submission.
#[derive(Debug)]
pub struct UploadedImage {
    pub bytes: Vec<u8>,       // Raw file contents
    pub mime_type: String,    // Derived from the file extension
}

impl UploadedImage {
    pub fn new(bytes: Vec<u8>, mime_type: impl Into<String>) -> Self {
        UploadedImage {
            bytes,
            mime_type: mime_type.into(),
        }
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ClientError> {
        let path = path.as_ref();
        let bytes = fs::read(path).map_err(|source| ClientError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(UploadedImage {
            bytes,
            mime_type: mime_from_extension(path).to_string(),
        })
    }

    // Encode as the data URI form the generation endpoint accepts.
    pub fn to_data_uri(&self) -> String {
        let encoded = base64::engine::general_purpose::STANDARD.encode(&self.bytes);
        compose_data_uri(&self.mime_type, &encoded)
    }
}

// ---------------------------------------------- Client errors ----------------------------------------------
#[derive(Debug, Error)]
pub enum ClientError {
    #[error("No images uploaded. Please upload at least one image to generate synthetic samples.")]
    NoImages,
    #[error("Failed to read {}: {}", .path.display(), .source)]
    Read { path: PathBuf, source: io::Error },
    #[error("Request failed: {0}")]
    Request(#[from] reqwest::Error),
    #[error("{0}")]
    Endpoint(String),
}

// ---------------------------------------------- Submission client ----------------------------------------------
// Submits one batch of uploads to a generation endpoint. Without an endpoint
// the batch is resolved locally with fabricated results.
pub struct SubmissionClient {
    client: Client,
    endpoint: Option<String>,
    bearer_token: Option<String>,
}

impl SubmissionClient {
    pub fn new(endpoint: impl Into<String>) -> Self {
        SubmissionClient {
            client: Client::new(),
            endpoint: Some(endpoint.into()),
            bearer_token: None,
        }
    }

    pub fn offline() -> Self {
        SubmissionClient {
            client: Client::new(),
            endpoint: None,
            bearer_token: None,
        }
    }

    pub fn with_bearer_token(mut self, token: impl Into<String>) -> Self {
        self.bearer_token = Some(token.into());
        self
    }

    pub async fn submit(
        &self,
        images: &[UploadedImage],
        description: Option<&str>,
        parameters: Option<&GenerationParameters>,
    ) -> Result<ImageGenerationResponse, ClientError> {
        // 1. Refuse an empty batch before any network traffic
        if images.is_empty() {
            return Err(ClientError::NoImages);
        }

        let payloads: Vec<String> = images.iter().map(UploadedImage::to_data_uri).collect();

        // 2. Without a remote endpoint, fabricate the batch locally
        let endpoint = match &self.endpoint {
            Some(endpoint) => endpoint,
            None => return Ok(local_fallback(&payloads)),
        };

        // 3. Use reqwest to initiate a POST request
        let request_body = json!({
            "images": payloads,
            "description": description,
            "parameters": parameters,
        });

        let mut request = self.client.post(endpoint)
            .header("Content-Type", "application/json")
            .json(&request_body);
        if let Some(token) = &self.bearer_token {
            request = request.header("Authorization", format!("Bearer {}", token));
        }
        let response = request.send().await?;

        // 4. Relay the endpoint's error field on a non-success status
        if !response.status().is_success() {
            let detail = response.text().await.unwrap_or_default();
            let message = serde_json::from_str::<Value>(&detail)
                .ok()
                .and_then(|value| value["error"].as_str().map(String::from))
                .unwrap_or_else(|| "Failed to generate images".to_string());
            return Err(ClientError::Endpoint(message));
        }

        Ok(response.json::<ImageGenerationResponse>().await?)
    }
}

// Local stand-in for the generation endpoint: echoes each upload back as its
// own synthetic sample. Quality scores use the fallback range [0.75, 0.95].
fn local_fallback(payloads: &[String]) -> ImageGenerationResponse {
    let mut rng = rand::thread_rng();
    let images = payloads
        .iter()
        .enumerate()
        .map(|(index, payload)| GeneratedImage {
            id: format!("gen-{}-{}-{}", index, Utc::now().timestamp_millis(), index),
            url: payload.clone(),
            class_label: format!("Synthetic {}", index),
            quality_score: 0.75 + rng.gen::<f64>() * 0.2,
        })
        .collect();

    ImageGenerationResponse {
        images,
        metrics: fabricate_metrics(),
    }
}

// ---------------------------------------------- Generation session ----------------------------------------------
// Holds the batch currently on display. A submission replaces the whole
// batch on success and leaves it untouched on failure.
#[derive(Default)]
pub struct GenerationSession {
    images: Vec<GeneratedImage>,
    metrics: Option<QualityMetrics>,
}

impl GenerationSession {
    pub fn new() -> Self {
        GenerationSession::default()
    }

    pub fn images(&self) -> &[GeneratedImage] {
        &self.images
    }

    pub fn metrics(&self) -> Option<&QualityMetrics> {
        self.metrics.as_ref()
    }

    // Returns the number of images generated by the accepted submission.
    pub async fn submit(
        &mut self,
        client: &SubmissionClient,
        images: &[UploadedImage],
        description: Option<&str>,
        parameters: Option<&GenerationParameters>,
    ) -> Result<usize, ClientError> {
        let response = client.submit(images, description, parameters).await?;
        let count = response.images.len();
        self.images = response.images;
        self.metrics = Some(response.metrics);
        Ok(count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn upload(bytes: &[u8], mime_type: &str) -> UploadedImage {
        UploadedImage::new(bytes.to_vec(), mime_type)
    }

    #[test]
    fn data_uri_round_trips_the_mime_type() {
        let image = upload(b"AAA", "image/png");
        assert_eq!(image.to_data_uri(), "data:image/png;base64,QUFB");
    }

    #[test]
    fn from_path_detects_the_extension() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("sample.png");
        let mut file = fs::File::create(&path).unwrap();
        file.write_all(b"not really a png").unwrap();

        let image = UploadedImage::from_path(&path).unwrap();
        assert_eq!(image.mime_type, "image/png");
        assert_eq!(image.bytes, b"not really a png");
    }

    #[test]
    fn from_path_reports_the_missing_file() {
        let err = UploadedImage::from_path("/no/such/file.png").unwrap_err();
        assert!(matches!(err, ClientError::Read { .. }));
        assert!(err.to_string().contains("/no/such/file.png"));
    }

    #[actix_rt::test]
    async fn empty_batch_is_rejected_before_any_request() {
        // The endpoint is unroutable; reaching it would fail the test with a
        // Request error instead of NoImages.
        let client = SubmissionClient::new("http://127.0.0.1:1/v1/images/generations");
        let err = client.submit(&[], None, None).await.unwrap_err();
        assert!(matches!(err, ClientError::NoImages));
    }

    #[actix_rt::test]
    async fn rejected_submission_leaves_the_session_untouched() {
        let client = SubmissionClient::offline();
        let mut session = GenerationSession::new();

        let uploads = vec![upload(b"AAA", "image/png")];
        session.submit(&client, &uploads, None, None).await.unwrap();
        let shown: Vec<String> = session.images().iter().map(|image| image.id.clone()).collect();

        let err = session.submit(&client, &[], None, None).await.unwrap_err();
        assert!(matches!(err, ClientError::NoImages));
        let still_shown: Vec<String> = session.images().iter().map(|image| image.id.clone()).collect();
        assert_eq!(shown, still_shown);
        assert!(session.metrics().is_some());
    }

    #[actix_rt::test]
    async fn failed_remote_submission_leaves_the_session_untouched() {
        let offline = SubmissionClient::offline();
        let mut session = GenerationSession::new();

        let uploads = vec![upload(b"AAA", "image/png")];
        session.submit(&offline, &uploads, None, None).await.unwrap();
        let shown: Vec<String> = session.images().iter().map(|image| image.id.clone()).collect();
        let fid_before = session.metrics().unwrap().fid_score;

        // Unroutable endpoint: the submission dies in transit.
        let remote = SubmissionClient::new("http://127.0.0.1:1/v1/images/generations")
            .with_bearer_token("demo-key");
        let err = session.submit(&remote, &uploads, None, None).await.unwrap_err();
        assert!(matches!(err, ClientError::Request(_)));

        let still_shown: Vec<String> = session.images().iter().map(|image| image.id.clone()).collect();
        assert_eq!(shown, still_shown);
        assert_eq!(session.metrics().unwrap().fid_score, fid_before);
    }

    #[actix_rt::test]
    async fn offline_submission_fabricates_the_batch() {
        let client = SubmissionClient::offline();
        let uploads = vec![upload(b"AAA", "image/png"), upload(b"BBB", "image/jpeg")];

        let response = client.submit(&uploads, Some("cell scans"), None).await.unwrap();
        assert_eq!(response.images.len(), 2);
        for (index, image) in response.images.iter().enumerate() {
            assert!(image.id.starts_with(&format!("gen-{}-", index)));
            assert_eq!(image.url, uploads[index].to_data_uri());
            assert!(image.quality_score >= 0.75 && image.quality_score < 0.95);
        }
        assert!(response.metrics.fid_score >= 15.0);
    }

    #[actix_rt::test]
    async fn session_replaces_its_batch_on_success() {
        let client = SubmissionClient::offline();
        let mut session = GenerationSession::new();

        let first = vec![upload(b"AAA", "image/png")];
        let count = session.submit(&client, &first, None, None).await.unwrap();
        assert_eq!(count, 1);

        let second = vec![upload(b"BBB", "image/png"), upload(b"CCC", "image/png")];
        let count = session.submit(&client, &second, None, None).await.unwrap();
        assert_eq!(count, 2);
        assert_eq!(session.images().len(), 2);
    }
}
