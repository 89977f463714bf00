use common::market::{day_label, format_inr, PriceRecord};

use super::{PageState, RequestSeq, RequestToken};
use crate::api_service::ApiClient;
use crate::prices::{daily_canonical, normalize, PriceReport};

/// Quick-pick shortcuts for crops commonly traded in the covered mandis.
pub const POPULAR_CROPS: [&str; 6] = ["Wheat", "Onion", "Tomato", "Potato", "Soyabean", "Cotton"];

/// Display-ready price view. The report drives the trend math; the display
/// strings are built from the raw record values so a missing price shows
/// as "N/A" instead of a fake ₹0.
#[derive(Debug, Clone, PartialEq)]
pub struct PriceView {
    pub report: PriceReport,
    pub today_display: String,
    pub range_display: String,
    pub timeline: Vec<TimelineEntry>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TimelineEntry {
    pub label: String,
    pub price: String,
}

pub struct CropPricesPage {
    pub query: String,
    pub state: PageState<PriceView>,
    seq: RequestSeq,
    redirect: Option<(String, Option<String>)>,
}

impl Default for CropPricesPage {
    fn default() -> Self {
        Self::new()
    }
}

impl CropPricesPage {
    pub fn new() -> Self {
        Self {
            query: String::new(),
            state: PageState::Idle,
            seq: RequestSeq::default(),
            redirect: None,
        }
    }

    pub fn set_redirect(&mut self, crop: String, location: Option<String>) {
        self.redirect = Some((crop, location));
    }

    pub fn take_redirect(&mut self) -> Option<(String, Option<String>)> {
        self.redirect.take()
    }

    pub fn begin_query(&mut self, crop: &str) -> Option<RequestToken> {
        if crop.trim().is_empty() {
            self.state = PageState::Error("Please enter a crop name.".to_string());
            return None;
        }
        self.query = crop.trim().to_string();
        self.state = PageState::Loading;
        Some(self.seq.begin())
    }

    pub fn resolve(&mut self, token: RequestToken, outcome: Result<Vec<PriceRecord>, String>) {
        if !self.seq.is_current(token) {
            return;
        }
        self.state = match outcome {
            Ok(records) => match build_view(&records) {
                Some(view) => PageState::Success(view),
                None => PageState::Error(format!(
                    "No recent price records found for \"{}\". Try another crop or district.",
                    self.query
                )),
            },
            Err(message) => PageState::Error(message),
        };
    }

    pub async fn submit(&mut self, api: &ApiClient, crop: &str) {
        self.fetch(api, crop, None).await;
    }

    pub async fn open_redirected(&mut self, api: &ApiClient) {
        if let Some((crop, location)) = self.take_redirect() {
            self.fetch(api, &crop, location.as_deref()).await;
        }
    }

    async fn fetch(&mut self, api: &ApiClient, crop: &str, location: Option<&str>) {
        let Some(token) = self.begin_query(crop) else {
            return;
        };
        let crop = self.query.clone();
        let outcome = api
            .fetch_crop_prices(&crop, location)
            .await
            .map_err(|e| e.to_string());
        self.resolve(token, outcome);
    }

    pub fn render(&self) -> String {
        match &self.state {
            PageState::Idle => {
                let mut out = String::from("Popular crops: ");
                out.push_str(&POPULAR_CROPS.join(", "));
                out
            }
            PageState::Loading => "Fetching prices...".to_string(),
            PageState::Error(message) => format!("⚠️ {}", message),
            PageState::Success(view) => render_view(view),
        }
    }
}

fn build_view(records: &[PriceRecord]) -> Option<PriceView> {
    let report = normalize(records).ok()?;
    let canonical = daily_canonical(records);
    let latest = canonical.first()?;

    let timeline = canonical
        .iter()
        .map(|record| TimelineEntry {
            label: day_label(&record.arrival_date),
            price: format_inr(record.modal_value()),
        })
        .collect();

    Some(PriceView {
        today_display: format_inr(latest.modal_value()),
        range_display: format!(
            "{} to {}",
            format_inr(latest.min_value()),
            format_inr(latest.max_value())
        ),
        report,
        timeline,
    })
}

fn render_view(view: &PriceView) -> String {
    let report = &view.report;
    let mut out = String::new();

    out.push_str(&format!(
        "🏪 {} ({})  {}\n",
        report.market, report.district, report.date
    ));
    out.push_str(&format!("💰 Latest modal price: {}\n", view.today_display));

    if report.has_history {
        let trend = if report.difference > 0.0 {
            "▲"
        } else if report.difference < 0.0 {
            "▼"
        } else {
            "•"
        };
        out.push_str(&format!(
            "{} {} vs previous session ({})\n",
            trend,
            format_inr(Some(report.difference.abs())),
            format_inr(report.yesterday)
        ));
    } else {
        out.push_str("No earlier session to compare against.\n");
    }

    out.push_str(&format!(
        "📊 Period average: {}   Range: {}\n",
        format_inr(Some(report.average)),
        view.range_display
    ));

    out.push_str("\nRecent sessions:\n");
    for entry in &view.timeline {
        out.push_str(&format!("  {}  {}\n", entry.label, entry.price));
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(date: &str, modal: &str) -> PriceRecord {
        PriceRecord {
            commodity: "Wheat".to_string(),
            district: "Pune".to_string(),
            market: "Pune Mandi".to_string(),
            arrival_date: date.to_string(),
            min_price: "1800".to_string(),
            max_price: "2400".to_string(),
            modal_price: modal.to_string(),
        }
    }

    #[test]
    fn successful_fetch_builds_a_price_view() {
        let mut page = CropPricesPage::new();
        let token = page.begin_query("Wheat").unwrap();
        assert!(page.state.is_loading());

        let records = vec![
            record("27/01/2026", "2200"),
            record("27/01/2026", "2000"),
            record("26/01/2026", "1900"),
        ];
        page.resolve(token, Ok(records));

        match &page.state {
            PageState::Success(view) => {
                assert_eq!(view.report.today, 2200.0);
                assert_eq!(view.today_display, "₹2,200");
                assert_eq!(view.timeline.len(), 2);
            }
            other => panic!("expected success, got {:?}", other),
        }
    }

    #[test]
    fn empty_result_is_a_guidance_message_not_a_crash() {
        let mut page = CropPricesPage::new();
        let token = page.begin_query("Saffron").unwrap();
        page.resolve(token, Ok(vec![]));

        match &page.state {
            PageState::Error(message) => {
                assert!(message.contains("No recent price records"));
                assert!(message.contains("Saffron"));
            }
            other => panic!("expected error, got {:?}", other),
        }
    }

    #[test]
    fn invalid_modal_price_renders_na_in_the_view() {
        let mut page = CropPricesPage::new();
        let token = page.begin_query("Wheat").unwrap();
        page.resolve(
            token,
            Ok(vec![record("27/01/2026", "NR"), record("26/01/2026", "1900")]),
        );

        match &page.state {
            PageState::Success(view) => {
                // arithmetic coerced to zero, display shows N/A
                assert_eq!(view.report.today, 0.0);
                assert_eq!(view.today_display, "N/A");
            }
            other => panic!("expected success, got {:?}", other),
        }
    }

    #[test]
    fn superseded_response_is_discarded() {
        let mut page = CropPricesPage::new();
        let stale = page.begin_query("Wheat").unwrap();
        let fresh = page.begin_query("Onion").unwrap();

        page.resolve(stale, Ok(vec![record("27/01/2026", "2200")]));
        assert!(page.state.is_loading());

        page.resolve(fresh, Ok(vec![record("27/01/2026", "1400")]));
        match &page.state {
            PageState::Success(view) => assert_eq!(view.report.today, 1400.0),
            other => panic!("expected success, got {:?}", other),
        }
    }

    #[test]
    fn redirect_is_consumed_exactly_once() {
        let mut page = CropPricesPage::new();
        page.set_redirect("Wheat".to_string(), Some("Pune".to_string()));

        assert_eq!(
            page.take_redirect(),
            Some(("Wheat".to_string(), Some("Pune".to_string())))
        );
        assert_eq!(page.take_redirect(), None);
    }

    #[test]
    fn backend_error_message_is_displayed_verbatim() {
        let mut page = CropPricesPage::new();
        let token = page.begin_query("Wheat").unwrap();
        page.resolve(
            token,
            Err("Government server is busy. Please try again.".to_string()),
        );
        assert_eq!(
            page.state,
            PageState::Error("Government server is busy. Please try again.".to_string())
        );
    }
}
