use async_trait::async_trait;

use crate::cores::image_models::image_controller::{
    ProviderError, SourceImage, SynthesisProvider, SynthesizedImage,
};

// Offline provider for keyless demo deployments and tests: echoes the source
// image back as its single "synthetic variation". Selected with
// `provider: mock` in the configuration.
pub struct MockSynthesis;

#[async_trait]
impl SynthesisProvider for MockSynthesis {
    fn name(&self) -> &'static str {
        "mock"
    }

    async fn synthesize(
        &self,
        _prompt: &str,
        image: &SourceImage,
    ) -> Result<Vec<SynthesizedImage>, ProviderError> {
        Ok(vec![SynthesizedImage {
            mime_type: image.mime_type.clone(),
            data: image.data.clone(),
        }])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[actix_rt::test]
    async fn mock_echoes_the_source_image() {
        let source = SourceImage::from_payload("data:image/png;base64,aGVsbG8=");
        let images = MockSynthesis.synthesize("any prompt", &source).await.unwrap();
        assert_eq!(images.len(), 1);
        assert_eq!(images[0].mime_type, "image/png");
        assert_eq!(images[0].data, "aGVsbG8=");
    }
}
