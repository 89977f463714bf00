use common::market::PriceRecord;
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use serde_json::Value;

const DEFAULT_BASE_URL: &str = "http://localhost:8000";

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// Message extracted from an error body; the backend already words
    /// these for display, so pages show them as-is.
    #[error("{0}")]
    Upstream(String),

    #[error(transparent)]
    Transport(#[from] reqwest::Error),
}

/// Client-side mirror of the backend weather payload.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct WeatherReport {
    pub name: String,
    pub current: CurrentReport,
    #[serde(default)]
    pub daily: Vec<DailyReport>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct CurrentReport {
    pub dt: i64,
    pub temp: f64,
    pub feels_like: f64,
    pub humidity: i64,
    pub wind_speed: f64,
    #[serde(default)]
    pub wind_gust: Option<f64>,
    #[serde(default)]
    pub weather: Vec<ConditionReport>,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Default)]
pub struct ConditionReport {
    #[serde(default)]
    pub main: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub icon: String,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct DailyReport {
    pub dt: i64,
    pub temp: DailyTemp,
    #[serde(default)]
    pub weather: ConditionReport,
    #[serde(default)]
    pub summary: String,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct DailyTemp {
    pub min: f64,
    pub max: f64,
}

#[derive(Debug, Deserialize)]
struct AnswerResponse {
    answer: String,
}

/// Typed client for the backend proxy. No timeouts and no retries here:
/// all retry logic lives behind the backend's price gateway.
pub struct ApiClient {
    client: Client,
    base_url: String,
}

impl ApiClient {
    pub fn new(base_url: &str) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn from_env() -> Self {
        let base_url = std::env::var("KISAAN_API_BASE_URL")
            .unwrap_or_else(|_| DEFAULT_BASE_URL.to_string());
        Self::new(&base_url)
    }

    pub async fn fetch_crop_prices(
        &self,
        crop: &str,
        location: Option<&str>,
    ) -> Result<Vec<PriceRecord>, ApiError> {
        let mut params = vec![("crop", crop)];
        if let Some(district) = location {
            params.push(("location", district));
        }
        self.get_json("/api/crops/prices", &params).await
    }

    pub async fn fetch_weather(&self, city: &str) -> Result<WeatherReport, ApiError> {
        self.get_json("/api/weather", &[("city", city)]).await
    }

    pub async fn ask_assistant(&self, query: &str) -> Result<String, ApiError> {
        let response = self
            .client
            .post(format!("{}/api/gemini", self.base_url))
            .json(&serde_json::json!({ "query": query }))
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(error_from_response(response).await);
        }

        let body: AnswerResponse = response.json().await?;
        Ok(body.answer)
    }

    async fn get_json<T: serde::de::DeserializeOwned>(
        &self,
        path: &str,
        params: &[(&str, &str)],
    ) -> Result<T, ApiError> {
        let response = self
            .client
            .get(format!("{}{}", self.base_url, path))
            .query(params)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(error_from_response(response).await);
        }

        Ok(response.json().await?)
    }
}

async fn error_from_response(response: reqwest::Response) -> ApiError {
    let status = response.status();
    let body = response.text().await.unwrap_or_default();
    ApiError::Upstream(error_message(status, &body))
}

/// The backend words its error bodies for end users ("City not found: ...",
/// "Government server is busy. ..."), under either a "message" or an
/// "error" key. Fall back to the bare status when the body is not JSON.
fn error_message(status: StatusCode, body: &str) -> String {
    serde_json::from_str::<Value>(body)
        .ok()
        .and_then(|value| {
            value
                .get("message")
                .or_else(|| value.get("error"))
                .and_then(Value::as_str)
                .map(str::to_string)
        })
        .unwrap_or_else(|| format!("API request failed with status {}", status))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_message_prefers_backend_wording() {
        let msg = error_message(
            StatusCode::NOT_FOUND,
            r#"{"message":"City not found: Atlantis"}"#,
        );
        assert_eq!(msg, "City not found: Atlantis");

        let busy = error_message(
            StatusCode::INTERNAL_SERVER_ERROR,
            r#"{"error":"Government server is busy. Please try again."}"#,
        );
        assert_eq!(busy, "Government server is busy. Please try again.");
    }

    #[test]
    fn error_message_falls_back_to_status() {
        let msg = error_message(StatusCode::BAD_GATEWAY, "<html>oops</html>");
        assert_eq!(msg, "API request failed with status 502 Bad Gateway");
    }
}
