use anyhow::Result;
use reqwest::Client;

use super::error::GeminiError;
use super::types::{Content, GenerateRequest, GenerateResponse, Part};

const GEMINI_API_URL: &str = "https://generativelanguage.googleapis.com/v1beta/models";
const GEMINI_MODEL: &str = "gemini-2.5-flash";

pub struct GeminiClient {
    client: Client,
    api_key: String,
}

impl GeminiClient {
    pub fn new(api_key: &str) -> Self {
        Self {
            client: Client::new(),
            api_key: api_key.to_string(),
        }
    }

    /// Sends one user query under the given system instruction and returns
    /// the model text with any code-fence wrapping already stripped. The
    /// intent router downstream expects either bare JSON or plain prose.
    pub async fn generate(&self, system_prompt: &str, query: &str) -> Result<String> {
        let request = GenerateRequest {
            system_instruction: Some(Content {
                parts: vec![Part {
                    text: system_prompt.to_string(),
                }],
                role: None,
            }),
            contents: vec![Content {
                parts: vec![Part {
                    text: query.to_string(),
                }],
                role: Some("user".to_string()),
            }],
        };

        let url = format!(
            "{}/{}:generateContent?key={}",
            GEMINI_API_URL, GEMINI_MODEL, self.api_key
        );

        let response = self.client.post(&url).json(&request).send().await?;

        match response.status() {
            reqwest::StatusCode::OK => {
                let body: GenerateResponse = response.json().await?;
                let text = body
                    .candidates
                    .into_iter()
                    .find_map(|candidate| candidate.content)
                    .map(|content| {
                        content
                            .parts
                            .into_iter()
                            .map(|part| part.text)
                            .collect::<Vec<_>>()
                            .join("")
                    })
                    .unwrap_or_default();

                if text.trim().is_empty() {
                    return Err(GeminiError::EmptyResponse.into());
                }

                Ok(sanitize_answer(&text))
            }
            reqwest::StatusCode::TOO_MANY_REQUESTS => Err(GeminiError::RateLimit.into()),
            _ => {
                let error_text = response.text().await?;
                Err(GeminiError::ApiError(error_text).into())
            }
        }
    }
}

/// The model is told not to wrap JSON intents in Markdown fences, but it
/// sometimes does anyway. Strip "```json" / "```" wrappers and surrounding
/// whitespace so the router only ever sees clean JSON or plain text.
pub fn sanitize_answer(raw: &str) -> String {
    let mut text = raw.trim();

    if let Some(rest) = text.strip_prefix("```json") {
        text = rest;
    }
    if let Some(rest) = text.strip_prefix("```") {
        text = rest;
    }
    if let Some(rest) = text.strip_suffix("```") {
        text = rest;
    }

    text.trim().to_string()
}
