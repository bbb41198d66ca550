use std::sync::Arc;

use serde::Serialize;
use utoipa::ToSchema;

use crate::cores::image_models::image_controller::SynthesisProvider;

// ------------------------------------------ General Error API ------------------------------------------
// Every failure leaving this service is a plain string in the `error` field;
// no structured codes or retry-after hints cross the boundary.
#[derive(Serialize, Debug, ToSchema)]
pub struct ErrorResponse {
    pub error: String,
}

// ------------------------------------------ Shared App State ------------------------------------------
// One provider instance is built at startup from the configuration and shared
// immutably across workers; invocations hold no other state.
#[derive(Clone)]
pub struct AppState {
    pub provider: Arc<dyn SynthesisProvider>,
}
