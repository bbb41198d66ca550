use utoipa::OpenApi;

use crate::apis::models_api;
use crate::apis::models_api::schemas::{ImageGenerationRequest,GenerationParameters,ImageGenerationResponse,GeneratedImage,QualityMetrics};
use crate::apis::schemas::ErrorResponse;


#[derive(OpenApi)]
#[openapi(
    paths(
        models_api::image::health,
        models_api::image::v1_images_generations,
    ),
    components(
        schemas(ImageGenerationRequest,GenerationParameters,ImageGenerationResponse,GeneratedImage,QualityMetrics,ErrorResponse)
    )
)]

pub struct ApiDoc;
