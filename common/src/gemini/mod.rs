mod client;
mod error;
mod types;

pub use client::{sanitize_answer, GeminiClient};
pub use error::GeminiError;
pub use types::{Candidate, Content, GenerateRequest, GenerateResponse, Part};
