use serde::{Deserialize, Serialize};

/// Failure modes of the crop price gateway. Only the fixed `Busy` wording
/// ever reaches a client; upstream error details stay in the server log.
#[derive(Debug, thiserror::Error)]
pub enum UpstreamError {
    #[error("Government server is busy. Please try again.")]
    Busy,
}

#[derive(Debug, thiserror::Error)]
pub enum WeatherError {
    #[error("City not found: {0}")]
    CityNotFound(String),

    #[error("{0}")]
    Upstream(String),

    #[error(transparent)]
    Transport(#[from] reqwest::Error),
}

/// The combined weather payload: geocoded city name, current conditions and
/// per-day summaries folded out of the 5-day/3-hour forecast.
#[derive(Debug, Clone, Serialize)]
pub struct WeatherBundle {
    pub name: String,
    pub current: CurrentConditions,
    pub daily: Vec<DailyForecast>,
}

#[derive(Debug, Clone, Serialize)]
pub struct CurrentConditions {
    pub dt: i64,
    pub temp: f64,
    pub feels_like: f64,
    pub humidity: i64,
    pub wind_speed: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub wind_gust: Option<f64>,
    pub weather: Vec<WeatherCondition>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct WeatherCondition {
    #[serde(default)]
    pub id: i64,
    #[serde(default)]
    pub main: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub icon: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct DailyForecast {
    pub dt: i64,
    pub temp: TempRange,
    pub weather: WeatherCondition,
    pub summary: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct TempRange {
    pub min: f64,
    pub max: f64,
}
