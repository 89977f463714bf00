#[derive(Debug, thiserror::Error)]
pub enum GeminiError {
    #[error("Rate limit exceeded")]
    RateLimit,

    #[error("API error: {0}")]
    ApiError(String),

    #[error("Model returned an empty response")]
    EmptyResponse,

    #[error(transparent)]
    ReqwestError(#[from] reqwest::Error),
}
