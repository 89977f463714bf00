use crate::models::{
    CurrentConditions, DailyForecast, TempRange, WeatherBundle, WeatherCondition, WeatherError,
};
use chrono::DateTime;
use reqwest::Client;
use serde::Deserialize;

const GEO_API_URL: &str = "http://api.openweathermap.org/geo/1.0/direct";
const CURRENT_WEATHER_URL: &str = "https://api.openweathermap.org/data/2.5/weather";
const FORECAST_URL: &str = "https://api.openweathermap.org/data/2.5/forecast";

#[derive(Debug, Deserialize)]
struct GeoEntry {
    lat: f64,
    lon: f64,
    name: String,
}

#[derive(Debug, Deserialize)]
struct MainReadings {
    #[serde(default)]
    temp: f64,
    #[serde(default)]
    feels_like: f64,
    #[serde(default)]
    humidity: i64,
    #[serde(default)]
    temp_min: f64,
    #[serde(default)]
    temp_max: f64,
}

#[derive(Debug, Deserialize, Default)]
struct WindReadings {
    #[serde(default)]
    speed: f64,
    gust: Option<f64>,
}

#[derive(Debug, Deserialize)]
struct CurrentResponse {
    dt: i64,
    main: MainReadings,
    #[serde(default)]
    wind: WindReadings,
    #[serde(default)]
    weather: Vec<WeatherCondition>,
}

#[derive(Debug, Deserialize)]
struct ForecastResponse {
    #[serde(default)]
    list: Vec<ForecastEntry>,
}

#[derive(Debug, Deserialize)]
struct ForecastEntry {
    dt: i64,
    main: MainReadings,
    #[serde(default)]
    weather: Vec<WeatherCondition>,
}

pub struct OpenWeatherClient {
    client: Client,
    api_key: String,
}

impl OpenWeatherClient {
    pub fn new(api_key: &str) -> Self {
        Self {
            client: Client::new(),
            api_key: api_key.to_string(),
        }
    }

    /// Geocodes the city, then fetches current conditions and the 5-day
    /// forecast concurrently. Both legs must succeed; there is no partial
    /// weather result.
    pub async fn fetch_weather(&self, city: &str) -> Result<WeatherBundle, WeatherError> {
        let geo: Vec<GeoEntry> = self
            .client
            .get(GEO_API_URL)
            .query(&[("q", city), ("limit", "1"), ("appid", &self.api_key)])
            .send()
            .await?
            .error_for_status()
            .map_err(|e| WeatherError::Upstream(format!("Geocoding API failed: {}", e)))?
            .json()
            .await?;

        let place = match geo.into_iter().next() {
            Some(place) => place,
            None => return Err(WeatherError::CityNotFound(city.to_string())),
        };

        let lat = place.lat.to_string();
        let lon = place.lon.to_string();

        let (current, forecast) = tokio::join!(
            self.fetch_current(&lat, &lon),
            self.fetch_forecast(&lat, &lon),
        );
        let current = current?;
        let forecast = forecast?;

        Ok(WeatherBundle {
            name: place.name,
            current: CurrentConditions {
                dt: current.dt,
                temp: current.main.temp,
                feels_like: current.main.feels_like,
                humidity: current.main.humidity,
                wind_speed: current.wind.speed,
                wind_gust: current.wind.gust,
                weather: current.weather,
            },
            daily: fold_daily(&forecast.list),
        })
    }

    async fn fetch_current(&self, lat: &str, lon: &str) -> Result<CurrentResponse, WeatherError> {
        let response = self
            .client
            .get(CURRENT_WEATHER_URL)
            .query(&[
                ("lat", lat),
                ("lon", lon),
                ("units", "metric"),
                ("appid", &self.api_key),
            ])
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(WeatherError::Upstream(format!(
                "Current Weather API failed: {}",
                response.status()
            )));
        }

        Ok(response.json().await?)
    }

    async fn fetch_forecast(&self, lat: &str, lon: &str) -> Result<ForecastResponse, WeatherError> {
        let response = self
            .client
            .get(FORECAST_URL)
            .query(&[
                ("lat", lat),
                ("lon", lon),
                ("units", "metric"),
                ("appid", &self.api_key),
            ])
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(WeatherError::Upstream(format!(
                "Forecast API failed: {}",
                response.status()
            )));
        }

        Ok(response.json().await?)
    }
}

/// Collapses the 3-hourly forecast list into one summary per calendar day.
/// The first entry of a day fixes dt, weather and the summary sentence;
/// later entries only widen the min/max range. Day order follows the
/// chronological forecast list.
fn fold_daily(list: &[ForecastEntry]) -> Vec<DailyForecast> {
    let mut days: Vec<(String, DailyForecast)> = Vec::new();

    for item in list {
        let date = match DateTime::from_timestamp(item.dt, 0) {
            Some(ts) => ts.format("%Y-%m-%d").to_string(),
            None => continue,
        };

        match days.iter_mut().find(|(day, _)| *day == date) {
            Some((_, existing)) => {
                existing.temp.min = existing.temp.min.min(item.main.temp_min);
                existing.temp.max = existing.temp.max.max(item.main.temp_max);
            }
            None => {
                let condition = item.weather.first().cloned().unwrap_or_default();
                let summary = format!(
                    "Forecast: {} with temps around {:.0}°C.",
                    condition.main, item.main.temp
                );
                days.push((
                    date,
                    DailyForecast {
                        dt: item.dt,
                        temp: TempRange {
                            min: item.main.temp_min,
                            max: item.main.temp_max,
                        },
                        weather: condition,
                        summary,
                    },
                ));
            }
        }
    }

    days.into_iter().map(|(_, day)| day).collect()
}
