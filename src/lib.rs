pub mod apis;
pub mod client;
pub mod configs;
pub mod cores;
pub mod utils;


pub use client::{GenerationSession, SubmissionClient, UploadedImage};
pub use configs::settings::GLOBAL_CONFIG;
