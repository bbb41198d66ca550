use actix_web::{get, post, web, Error, HttpResponse, Responder};

use crate::apis::models_api::schemas::ImageGenerationRequest;
use crate::apis::schemas::{AppState, ErrorResponse};
use crate::cores::synthesis::run_batch;

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(health)
       .service(v1_images_generations);
}

#[utoipa::path(
    get,
    path = "/health",
    responses(
        (status = 200, description = "Service is up"),
    )
)]
#[get("/health")]
pub async fn health() -> impl Responder {
    "OK"
}

#[utoipa::path(
    post,
    path = "/v1/images/generations",
    request_body = ImageGenerationRequest,
    responses(
        (status = 200, body = ImageGenerationResponse),
        (status = 400, body = ErrorResponse),
        (status = 500, body = ErrorResponse),
    )
)]

// Handle the POST request for /v1/images/generations.
#[post("/v1/images/generations")]
pub async fn v1_images_generations(req_body: web::Json<ImageGenerationRequest>, data: web::Data<AppState>) -> Result<impl Responder, Error> {
    // 1. Validate that required fields exist in the request data
    if req_body.images.is_empty() {
        let error_response = ErrorResponse {
            error: "Invalid request: images cannot be empty.".into(),
        };
        return Ok(HttpResponse::BadRequest().json(error_response));
    }

    // 2. Send each source image to the configured synthesis provider
    let response = run_batch(data.provider.as_ref(), &req_body).await;

    // 3. Return a unified data format
    match response {
        Ok(resp) => Ok(HttpResponse::Ok().json(resp)),
        Err(err) => {
            let error_response = ErrorResponse {
                error: format!("Failed to generate synthetic images: {}", err),
            };
            Ok(HttpResponse::InternalServerError().json(error_response))
        }
    }
}
