use std::env;

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use serde_json::json;

use crate::cores::image_models::image_controller::{
    ProviderError, SourceImage, SynthesisProvider, SynthesizedImage,
};

// Environment variable holding the bearer credential for the Generative
// Language API. Read per invocation, never cached.
pub const GEMINI_API_KEY: &str = "GEMINI_API_KEY";

pub struct Gemini {
    client: Client,
    api_base: String,
    model_name: String,
}

impl Gemini {
    pub fn new(api_base: impl Into<String>, model_name: impl Into<String>) -> Self {
        Gemini {
            client: Client::new(),
            api_base: api_base.into(),
            model_name: model_name.into(),
        }
    }
}

#[async_trait]
impl SynthesisProvider for Gemini {
    fn name(&self) -> &'static str {
        "gemini"
    }

    async fn synthesize(
        &self,
        prompt: &str,
        image: &SourceImage,
    ) -> Result<Vec<SynthesizedImage>, ProviderError> {
        // 1. Read the credential; a missing key is reported to the caller,
        //    not treated as a startup failure.
        let api_key = env::var(GEMINI_API_KEY)
            .map_err(|_| ProviderError::MissingCredential(GEMINI_API_KEY))?;

        // 2. Construct the request body for the generateContent API: one text
        //    part with the instructions, one inline image part.
        let request_body = json!({
            "contents": [
                {
                    "parts": [
                        { "text": prompt },
                        {
                            "inlineData": {
                                "mimeType": image.mime_type,
                                "data": image.data,
                            }
                        }
                    ]
                }
            ],
            "generationConfig": {
                "responseModalities": ["IMAGE", "TEXT"],
            }
        });

        // 3. Send the POST request
        let url = format!(
            "{}/models/{}:generateContent",
            self.api_base, self.model_name
        );
        let response = self
            .client
            .post(&url)
            .header("Content-Type", "application/json")
            .header("x-goog-api-key", &api_key)
            .json(&request_body)
            .send()
            .await?;

        // 4. Split fatal upstream signals from recoverable ones before parsing.
        let status = response.status();
        if status == StatusCode::TOO_MANY_REQUESTS {
            return Err(ProviderError::RateLimited(error_detail(response).await));
        }
        if status == StatusCode::PAYMENT_REQUIRED {
            return Err(ProviderError::QuotaExceeded(error_detail(response).await));
        }
        if !status.is_success() {
            return Err(ProviderError::Upstream {
                status: status.as_u16(),
                detail: error_detail(response).await,
            });
        }

        // 5. Parse the response content and collect every inline image part.
        let body: GenerateContentResponse = response
            .json()
            .await
            .map_err(|err| ProviderError::Parse(err.to_string()))?;
        Ok(body.into_images())
    }
}

// Read whatever the provider put in a non-success body; used only for the
// error string relayed to the caller.
async fn error_detail(response: reqwest::Response) -> String {
    response.text().await.unwrap_or_default()
}

// The subset of the generateContent response this service consumes. Unknown
// fields (safety ratings, usage metadata, ...) are ignored.
#[derive(Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<CandidatePart>,
}

#[derive(Deserialize)]
struct CandidatePart {
    #[serde(rename = "inlineData", alias = "inline_data")]
    inline_data: Option<InlineData>,
}

#[derive(Deserialize)]
struct InlineData {
    #[serde(rename = "mimeType", alias = "mime_type")]
    mime_type: String,
    data: String,
}

impl GenerateContentResponse {
    // Text parts are dropped; only inline image payloads count as output.
    fn into_images(self) -> Vec<SynthesizedImage> {
        self.candidates
            .into_iter()
            .filter_map(|candidate| candidate.content)
            .flat_map(|content| content.parts)
            .filter_map(|part| part.inline_data)
            .map(|inline| SynthesizedImage {
                mime_type: inline.mime_type,
                data: inline.data,
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn response_parsing_collects_inline_images() {
        let raw = serde_json::json!({
            "candidates": [
                {
                    "content": {
                        "parts": [
                            { "text": "a caption" },
                            { "inlineData": { "mimeType": "image/png", "data": "QUJD" } },
                            { "inlineData": { "mimeType": "image/jpeg", "data": "REVG" } }
                        ]
                    }
                }
            ]
        });
        let parsed: GenerateContentResponse = serde_json::from_value(raw).unwrap();
        let images = parsed.into_images();
        assert_eq!(images.len(), 2);
        assert_eq!(images[0].mime_type, "image/png");
        assert_eq!(images[0].data, "QUJD");
        assert_eq!(images[1].mime_type, "image/jpeg");
    }

    #[test]
    fn response_parsing_tolerates_text_only_candidates() {
        let raw = serde_json::json!({
            "candidates": [
                { "content": { "parts": [ { "text": "cannot generate" } ] } },
                { "content": null }
            ]
        });
        let parsed: GenerateContentResponse = serde_json::from_value(raw).unwrap();
        assert!(parsed.into_images().is_empty());
    }

    #[test]
    fn response_parsing_tolerates_missing_candidates() {
        let parsed: GenerateContentResponse =
            serde_json::from_value(serde_json::json!({})).unwrap();
        assert!(parsed.into_images().is_empty());
    }

    #[test]
    fn response_parsing_accepts_snake_case_fields() {
        let raw = serde_json::json!({
            "candidates": [
                {
                    "content": {
                        "parts": [
                            { "inline_data": { "mime_type": "image/webp", "data": "R0hJ" } }
                        ]
                    }
                }
            ]
        });
        let parsed: GenerateContentResponse = serde_json::from_value(raw).unwrap();
        let images = parsed.into_images();
        assert_eq!(images.len(), 1);
        assert_eq!(images[0].mime_type, "image/webp");
    }
}
