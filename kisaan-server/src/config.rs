use std::env;

const DEFAULT_PORT: u16 = 8000;

/// Process configuration, read once at startup. Missing upstream keys are
/// not fatal here: the affected endpoint answers with a fixed 500 message
/// instead, so a partially configured server still serves what it can.
#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub gov_api_key: Option<String>,
    pub gemini_api_key: Option<String>,
    pub openweather_api_key: Option<String>,
}

impl Config {
    pub fn from_env() -> Self {
        let port = env::var("PORT")
            .ok()
            .and_then(|raw| raw.parse().ok())
            .unwrap_or(DEFAULT_PORT);

        let gov_api_key = read_key("GOV_API_KEY");
        let gemini_api_key = read_key("GEMINI_API_KEY");
        let openweather_api_key = read_key("OPENWEATHER_API_KEY");

        Self {
            port,
            gov_api_key,
            gemini_api_key,
            openweather_api_key,
        }
    }
}

fn read_key(name: &str) -> Option<String> {
    let value = env::var(name).ok().filter(|key| !key.trim().is_empty());
    if value.is_none() {
        println!("⚠️ {} is missing; the dependent endpoint will answer 500", name);
    }
    value
}
