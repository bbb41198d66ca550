pub mod gemini;
pub mod image_controller;
pub mod mock;

use std::sync::Arc;

use crate::configs::settings::Config;
use crate::cores::image_models::gemini::Gemini;
use crate::cores::image_models::image_controller::SynthesisProvider;
use crate::cores::image_models::mock::MockSynthesis;

// Build the provider selected in the configuration. An unknown provider
// name is a configuration error and fails at startup.
pub fn build_provider(config: &Config) -> Arc<dyn SynthesisProvider> {
    match config.provider.as_str() {
        "gemini" => Arc::new(Gemini::new(
            &config.gemini.api_base,
            &config.gemini.model_name,
        )),
        "mock" => Arc::new(MockSynthesis),
        other => panic!("Unsupported {} provider!", other),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn provider_names_resolve_to_their_backends() {
        let mut config = Config::default();
        config.provider = "mock".to_string();
        assert_eq!(build_provider(&config).name(), "mock");

        config.provider = "gemini".to_string();
        assert_eq!(build_provider(&config).name(), "gemini");
    }

    #[test]
    #[should_panic(expected = "Unsupported")]
    fn unknown_provider_names_fail_at_startup() {
        let mut config = Config::default();
        config.provider = "dall-e".to_string();
        build_provider(&config);
    }
}
