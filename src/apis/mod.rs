pub mod api_doc;
pub mod models_api;
pub mod schemas;
