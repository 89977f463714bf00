use anyhow::Result;
use common::gemini::GeminiClient;

use crate::api::{AgmarknetClient, OpenWeatherClient};
use crate::config::Config;

/// Shared handle set for the route handlers. Each upstream client is
/// present only when its API key was configured; routes answer the fixed
/// configuration-error message for the ones that are not.
pub struct AppState {
    pub prices: Option<AgmarknetClient>,
    pub weather: Option<OpenWeatherClient>,
    pub assistant: Option<GeminiClient>,
}

impl AppState {
    pub fn from_config(config: &Config) -> Result<Self> {
        let prices = match &config.gov_api_key {
            Some(key) => Some(AgmarknetClient::new(key)?),
            None => None,
        };
        let weather = config
            .openweather_api_key
            .as_deref()
            .map(OpenWeatherClient::new);
        let assistant = config.gemini_api_key.as_deref().map(GeminiClient::new);

        Ok(Self {
            prices,
            weather,
            assistant,
        })
    }
}
