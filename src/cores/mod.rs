pub mod image_models;
pub mod synthesis;
