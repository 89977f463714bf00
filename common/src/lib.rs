pub mod gemini;
pub mod market;

pub use gemini::{GeminiClient, GeminiError};
pub use market::{format_inr, sort_records, PriceRecord};
