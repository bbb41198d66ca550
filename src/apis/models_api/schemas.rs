use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

// Define the request struct, corresponding to the request parameters of the /v1/images/generations interface.
#[derive(Deserialize, Serialize, ToSchema)]
pub struct ImageGenerationRequest {
    pub images: Vec<String>,                      // (Required) Source images as data URIs or bare base64 strings, non-empty.
    pub description: Option<String>,              // Optional, free-text class description woven into the synthesis prompt.
    pub parameters: Option<GenerationParameters>, // Optional, oversampling parameter record, passed through unvalidated.
}

// Oversampling parameters selected in the UI. None of them are enforced by
// the service; only `decoder_type` influences the synthesized prompt.
#[derive(Deserialize, Serialize, Clone, Default, ToSchema)]
#[serde(default)]
pub struct GenerationParameters {
    pub k_neighbors: Option<u32>,          // Optional, neighbor count used by the latent-space sampler branding.
    pub sampling_strategy: Option<String>, // Optional, sampling-strategy tag ("minority", "all", ...).
    pub clustering_enabled: Option<bool>,  // Optional, semantic clustering toggle.
    pub outlier_detection: Option<bool>,   // Optional, outlier filtering toggle.
    pub decoder_type: Option<String>,      // Optional, decoder tag; "diffusion" and "gan" add prompt hints.
}

// Define the response struct, corresponding to the response data format of the /v1/images/generations interface.
#[derive(Serialize, Deserialize, Debug, ToSchema)]
pub struct ImageGenerationResponse {
    pub images: Vec<GeneratedImage>, // One entry per synthesized variation, at least one on success.
    pub metrics: QualityMetrics,     // Fabricated once per successful response.
}

// A single synthesized variation relayed back to the caller.
#[derive(Serialize, Deserialize, Clone, Debug, ToSchema)]
pub struct GeneratedImage {
    pub id: String,            // Caller-generated `gen-<index>-<millis>-<count>`; not globally unique.
    pub url: String,           // Data URI (or remote URL) carrying the image.
    pub class_label: String,   // Arbitrary label, `Synthetic <index>` for the source it varies.
    pub quality_score: f64,    // Placeholder score in [0.7, 0.95]; unrelated to actual fidelity.
}

// Batch-level quality numbers. These are placeholders drawn from fixed
// ranges, not computed from the generated pixels.
#[derive(Serialize, Deserialize, Clone, Debug, ToSchema)]
pub struct QualityMetrics {
    pub fid_score: f64, // [15, 35)
    pub lpips: f64,     // [0.05, 0.20)
    pub ssim: f64,      // [0.8, 0.95)
    pub diversity: f64, // [0.75, 0.95)
}
