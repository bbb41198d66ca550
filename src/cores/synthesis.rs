use chrono::Utc;
use log::warn;
use rand::Rng;
use thiserror::Error;

use crate::apis::models_api::schemas::{
    GeneratedImage, GenerationParameters, ImageGenerationRequest, ImageGenerationResponse,
    QualityMetrics,
};
use crate::cores::image_models::image_controller::{
    ProviderError, SourceImage, SynthesisProvider,
};
use crate::utils::compose_data_uri;

// Batch outcome: either an aggregate response with at least one image, or a
// fatal error whose Display text is relayed verbatim in the `error` field.
#[derive(Debug, Error)]
pub enum SynthesisError {
    #[error("{0}")]
    Provider(#[from] ProviderError),
    #[error("No images were generated. The API may not support image generation with your current key.")]
    Empty,
}

// Run the whole batch against one provider: one sequential outbound call per
// source image, best-effort except for the fatal provider signals.
pub async fn run_batch(
    provider: &dyn SynthesisProvider,
    req_body: &ImageGenerationRequest,
) -> Result<ImageGenerationResponse, SynthesisError> {
    let parameters = req_body.parameters.clone().unwrap_or_default();
    let prompt = build_prompt(req_body.description.as_deref(), &parameters);

    let mut generated: Vec<GeneratedImage> = Vec::new();
    for (index, payload) in req_body.images.iter().enumerate() {
        let source = SourceImage::from_payload(payload);
        let variations = match provider.synthesize(&prompt, &source).await {
            Ok(variations) => variations,
            Err(err) if err.is_fatal() => return Err(err.into()),
            Err(err) => {
                // Best effort: one bad image must not sink the batch.
                warn!(
                    "{} synthesis failed for image {}: {}",
                    provider.name(),
                    index,
                    err
                );
                continue;
            }
        };

        for variation in variations {
            generated.push(GeneratedImage {
                id: format!(
                    "gen-{}-{}-{}",
                    index,
                    Utc::now().timestamp_millis(),
                    generated.len()
                ),
                url: compose_data_uri(&variation.mime_type, &variation.data),
                class_label: format!("Synthetic {}", index),
                quality_score: 0.7 + rand::thread_rng().gen::<f64>() * 0.25,
            });
        }
    }

    if generated.is_empty() {
        return Err(SynthesisError::Empty);
    }

    Ok(ImageGenerationResponse {
        images: generated,
        metrics: fabricate_metrics(),
    })
}

// Synthesize the instruction string sent with every image of the batch. The
// description clause appears only for a non-empty description; the decoder
// hints only for the "diffusion" / "gan" tags.
pub fn build_prompt(description: Option<&str>, parameters: &GenerationParameters) -> String {
    let description_clause = match description.filter(|text| !text.is_empty()) {
        Some(text) => format!(" which shows: {}", text),
        None => String::new(),
    };

    let mut prompt = format!(
        "You are a synthetic image generator for data augmentation.\n\
         Given this input image{}, generate a realistic synthetic variation of it.\n\
         The variation should:\n\
         - Maintain the same class/category as the original\n\
         - Have subtle but meaningful differences (lighting, angle, texture variations)\n\
         - Look like a real sample, not an obvious copy\n\
         - Preserve key features that define the class\n",
        description_clause
    );

    match parameters.decoder_type.as_deref() {
        Some("diffusion") => prompt.push_str("- Apply diffusion-style noise patterns\n"),
        Some("gan") => prompt.push_str("- Apply GAN-style generation artifacts\n"),
        _ => {}
    }

    prompt.push_str("Generate one synthetic image variation.");
    prompt
}

// Fabricate the batch-level quality numbers. The ranges are fixed and the
// values bear no relation to the generated pixels; they exist so the results
// gallery has something to display.
pub fn fabricate_metrics() -> QualityMetrics {
    let mut rng = rand::thread_rng();
    QualityMetrics {
        fid_score: 15.0 + rng.gen::<f64>() * 20.0,
        lpips: 0.05 + rng.gen::<f64>() * 0.15,
        ssim: 0.8 + rng.gen::<f64>() * 0.15,
        diversity: 0.75 + rng.gen::<f64>() * 0.2,
    }
}
