use async_trait::async_trait;
use thiserror::Error;

use crate::utils::split_data_uri;

// A source image recovered from one element of the request's `images` array.
#[derive(Debug, Clone, PartialEq)]
pub struct SourceImage {
    pub mime_type: String, // MIME type from the data URI, `image/jpeg` for bare base64.
    pub data: String,      // Raw base64 payload without the data-URI prefix.
}

impl SourceImage {
    pub fn from_payload(payload: &str) -> Self {
        let (mime_type, data) = split_data_uri(payload);
        SourceImage { mime_type, data }
    }
}

// One image returned by a provider for a single source image.
#[derive(Debug, Clone)]
pub struct SynthesizedImage {
    pub mime_type: String,
    pub data: String, // Base64 payload as returned by the provider.
}

// Errors raised by a provider for one outbound call. Only the fatal variants
// abort the batch; everything else is logged and the loop moves on.
#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("{0} is not configured")]
    MissingCredential(&'static str),
    #[error("rate limit exceeded (HTTP 429), please retry later: {0}")]
    RateLimited(String),
    #[error("usage quota exhausted (HTTP 402), please add credits: {0}")]
    QuotaExceeded(String),
    #[error("Request failed: {0}")]
    Request(#[from] reqwest::Error),
    #[error("API returned non-success status {status}: {detail}")]
    Upstream { status: u16, detail: String },
    #[error("Failed to parse response: {0}")]
    Parse(String),
}

impl ProviderError {
    // Rate-limit and quota signals must stop the whole batch immediately, as
    // must a missing credential; per-image transport or payload trouble is
    // recoverable.
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            ProviderError::MissingCredential(_)
                | ProviderError::RateLimited(_)
                | ProviderError::QuotaExceeded(_)
        )
    }
}

#[async_trait]
pub trait SynthesisProvider: Send + Sync {
    fn name(&self) -> &'static str;

    // Issue one multimodal generation call: text instructions plus one image
    // in, zero or more synthesized variations out.
    async fn synthesize(
        &self,
        prompt: &str,
        image: &SourceImage,
    ) -> Result<Vec<SynthesizedImage>, ProviderError>;
}
