use chrono::DateTime;

use super::{PageState, RequestSeq, RequestToken};
use crate::api_service::{ApiClient, WeatherReport};
use crate::intent::WeatherDuration;

/// Quick-pick shortcuts shown while the page is empty (major agriculture
/// hubs).
pub const POPULAR_CITIES: [&str; 6] =
    ["Mumbai", "Pune", "Nashik", "Nagpur", "Akola", "Amravati"];

pub struct WeatherPage {
    pub query: String,
    pub display_mode: WeatherDuration,
    pub state: PageState<WeatherReport>,
    seq: RequestSeq,
    redirect: Option<(String, WeatherDuration)>,
}

impl Default for WeatherPage {
    fn default() -> Self {
        Self::new()
    }
}

impl WeatherPage {
    pub fn new() -> Self {
        Self {
            query: String::new(),
            display_mode: WeatherDuration::Default,
            state: PageState::Idle,
            seq: RequestSeq::default(),
            redirect: None,
        }
    }

    /// Stores navigation parameters carried by an intent redirect.
    pub fn set_redirect(&mut self, city: String, duration: WeatherDuration) {
        self.redirect = Some((city, duration));
    }

    /// Hands out the carried redirect exactly once; the second call gets
    /// None, which is what makes a redirect-triggered query run once.
    pub fn take_redirect(&mut self) -> Option<(String, WeatherDuration)> {
        self.redirect.take()
    }

    /// Starts a query: bumps the request sequence and moves to Loading.
    /// Returns None (with an inline error) for an empty city.
    pub fn begin_query(&mut self, city: &str) -> Option<RequestToken> {
        if city.trim().is_empty() {
            self.state = PageState::Error("Please enter a city name.".to_string());
            return None;
        }
        self.query = city.trim().to_string();
        self.state = PageState::Loading;
        Some(self.seq.begin())
    }

    /// Applies a finished request, unless a newer one was issued meanwhile.
    pub fn resolve(&mut self, token: RequestToken, outcome: Result<WeatherReport, String>) {
        if !self.seq.is_current(token) {
            return;
        }
        self.state = match outcome {
            Ok(report) => PageState::Success(report),
            Err(message) => PageState::Error(message),
        };
    }

    /// Manual submission path: typed queries and quick picks reset the
    /// display mode to the full layout.
    pub async fn submit(&mut self, api: &ApiClient, city: &str) {
        self.display_mode = WeatherDuration::Default;
        self.fetch(api, city).await;
    }

    /// Consumes a pending redirect, honouring its display mode. No-op when
    /// nothing was carried here.
    pub async fn open_redirected(&mut self, api: &ApiClient) {
        if let Some((city, duration)) = self.take_redirect() {
            self.display_mode = duration;
            self.fetch(api, &city).await;
        }
    }

    async fn fetch(&mut self, api: &ApiClient, city: &str) {
        let Some(token) = self.begin_query(city) else {
            return;
        };
        let city = self.query.clone();
        let outcome = api.fetch_weather(&city).await.map_err(|e| e.to_string());
        self.resolve(token, outcome);
    }

    pub fn render(&self) -> String {
        match &self.state {
            PageState::Idle => {
                let mut out = String::from("Popular locations: ");
                out.push_str(&POPULAR_CITIES.join(", "));
                out
            }
            PageState::Loading => "Fetching forecast...".to_string(),
            PageState::Error(message) => format!("⚠️ {}", message),
            PageState::Success(report) => self.render_report(report),
        }
    }

    fn render_report(&self, report: &WeatherReport) -> String {
        let mut out = String::new();

        let show_today = matches!(
            self.display_mode,
            WeatherDuration::Default | WeatherDuration::Today
        );
        let show_forecast = matches!(
            self.display_mode,
            WeatherDuration::Default | WeatherDuration::FiveDay
        );

        if show_today {
            out.push_str(&format!(
                "📍 {} ({})\n",
                report.name,
                format_day(report.current.dt)
            ));
            if let Some(today) = report.daily.first() {
                out.push_str(&format!(
                    "{}\n  High: {:.0}°  Low: {:.0}°\n",
                    today.summary, today.temp.max, today.temp.min
                ));
            }
            out.push_str(&format!(
                "🌡️ Now: {:.0}° (feels like {:.0}°)\n",
                report.current.temp, report.current.feels_like
            ));
            out.push_str(&format!(
                "💨 Wind: {:.1} km/h   💧 Humidity: {}%\n",
                mps_to_kmh(report.current.wind_speed),
                report.current.humidity
            ));
        }

        if show_forecast {
            out.push_str("\n5-day forecast:\n");
            for day in report.daily.iter().take(5) {
                out.push_str(&format!(
                    "  {}  {:<10} {:.0}° / {:.0}°\n",
                    format_day(day.dt),
                    day.weather.main,
                    day.temp.max,
                    day.temp.min
                ));
            }
        }

        out
    }
}

fn mps_to_kmh(mps: f64) -> f64 {
    mps * 3.6
}

fn format_day(timestamp: i64) -> String {
    DateTime::from_timestamp(timestamp, 0)
        .map(|ts| ts.format("%a, %d %b").to_string())
        .unwrap_or_else(|| "--".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api_service::{CurrentReport, DailyTemp};

    fn report(city: &str) -> WeatherReport {
        WeatherReport {
            name: city.to_string(),
            current: CurrentReport {
                dt: 1769508000,
                temp: 28.0,
                feels_like: 30.0,
                humidity: 55,
                wind_speed: 3.2,
                wind_gust: None,
                weather: vec![],
            },
            daily: vec![crate::api_service::DailyReport {
                dt: 1769508000,
                temp: DailyTemp {
                    min: 18.0,
                    max: 29.0,
                },
                weather: Default::default(),
                summary: "Forecast: Clear with temps around 28°C.".to_string(),
            }],
        }
    }

    #[test]
    fn query_moves_idle_to_loading_then_success() {
        let mut page = WeatherPage::new();
        assert_eq!(page.state, PageState::Idle);

        let token = page.begin_query("Pune").unwrap();
        assert!(page.state.is_loading());

        page.resolve(token, Ok(report("Pune")));
        assert!(matches!(page.state, PageState::Success(_)));
    }

    #[test]
    fn error_state_can_start_a_new_query() {
        let mut page = WeatherPage::new();
        let token = page.begin_query("Atlantis").unwrap();
        page.resolve(token, Err("City not found: Atlantis".to_string()));
        assert!(matches!(page.state, PageState::Error(_)));

        page.begin_query("Pune").unwrap();
        assert!(page.state.is_loading());
    }

    #[test]
    fn empty_city_is_an_inline_error_without_a_request() {
        let mut page = WeatherPage::new();
        assert!(page.begin_query("   ").is_none());
        assert_eq!(
            page.state,
            PageState::Error("Please enter a city name.".to_string())
        );
    }

    #[test]
    fn superseded_response_is_discarded() {
        let mut page = WeatherPage::new();
        let stale = page.begin_query("Pune").unwrap();
        let fresh = page.begin_query("Nashik").unwrap();

        // the older request finishes late and must not land
        page.resolve(stale, Ok(report("Pune")));
        assert!(page.state.is_loading());

        page.resolve(fresh, Ok(report("Nashik")));
        match &page.state {
            PageState::Success(data) => assert_eq!(data.name, "Nashik"),
            other => panic!("expected success, got {:?}", other),
        }
    }

    #[test]
    fn redirect_is_consumed_exactly_once() {
        let mut page = WeatherPage::new();
        page.set_redirect("Delhi".to_string(), WeatherDuration::FiveDay);

        assert_eq!(
            page.take_redirect(),
            Some(("Delhi".to_string(), WeatherDuration::FiveDay))
        );
        assert_eq!(page.take_redirect(), None);
    }
}
