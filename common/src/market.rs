use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// One raw mandi price row as delivered by the data.gov.in resource.
///
/// The upstream serializes every field as a string, including the prices,
/// and `arrival_date` arrives as DD/MM/YYYY which does not sort lexically.
/// Numeric access goes through the `*_value()` accessors so that a missing
/// or garbled price can be told apart from an actual zero.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PriceRecord {
    #[serde(default)]
    pub commodity: String,
    #[serde(default)]
    pub district: String,
    #[serde(default)]
    pub market: String,
    #[serde(default)]
    pub arrival_date: String,
    #[serde(default)]
    pub min_price: String,
    #[serde(default)]
    pub max_price: String,
    #[serde(default)]
    pub modal_price: String,
}

impl PriceRecord {
    pub fn modal_value(&self) -> Option<f64> {
        parse_price(&self.modal_price)
    }

    pub fn min_value(&self) -> Option<f64> {
        parse_price(&self.min_price)
    }

    pub fn max_value(&self) -> Option<f64> {
        parse_price(&self.max_price)
    }

    pub fn parsed_date(&self) -> Option<NaiveDate> {
        parse_arrival_date(&self.arrival_date)
    }
}

fn parse_price(raw: &str) -> Option<f64> {
    raw.trim().parse::<f64>().ok().filter(|v| v.is_finite())
}

/// DD/MM/YYYY, the only format the government dataset uses.
pub fn parse_arrival_date(raw: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(raw.trim(), "%d/%m/%Y").ok()
}

/// Sorts newest date first; ties on the same day break by highest modal
/// price. Everything downstream (the per-day canonical pick in particular)
/// relies on this ordering, so it is applied after every fetch regardless
/// of what order the upstream returned.
pub fn sort_records(records: &mut [PriceRecord]) {
    records.sort_by(|a, b| {
        // unparseable dates sink to the end
        let date_a = a.parsed_date().unwrap_or(NaiveDate::MIN);
        let date_b = b.parsed_date().unwrap_or(NaiveDate::MIN);
        match date_b.cmp(&date_a) {
            Ordering::Equal => {
                let modal_a = a.modal_value().unwrap_or(0.0);
                let modal_b = b.modal_value().unwrap_or(0.0);
                modal_b.partial_cmp(&modal_a).unwrap_or(Ordering::Equal)
            }
            other => other,
        }
    });
}

/// Weekday label for a DD/MM/YYYY arrival date, e.g. "Tue, 27 Jan".
/// Malformed dates fall back to a placeholder instead of failing the page.
pub fn day_label(raw: &str) -> String {
    match parse_arrival_date(raw) {
        Some(date) => date.format("%a, %d %b").to_string(),
        None => "--".to_string(),
    }
}

/// Rupee display with Indian digit grouping (last three digits, then pairs).
/// A missing or invalid price renders as "N/A", never as a fake zero.
pub fn format_inr(value: Option<f64>) -> String {
    let value = match value {
        Some(v) if v.is_finite() => v,
        _ => return "N/A".to_string(),
    };

    let rupees = value.abs().round() as i64;
    let digits = rupees.to_string();

    let grouped = if digits.len() > 3 {
        let (head, tail) = digits.split_at(digits.len() - 3);
        let mut parts: Vec<&str> = Vec::new();
        let mut rest = head;
        while rest.len() > 2 {
            let (front, pair) = rest.split_at(rest.len() - 2);
            parts.push(pair);
            rest = front;
        }
        parts.push(rest);
        parts.reverse();
        format!("{},{}", parts.join(","), tail)
    } else {
        digits
    };

    if value < 0.0 {
        format!("-₹{}", grouped)
    } else {
        format!("₹{}", grouped)
    }
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
    fn sorts_newest_date_first_then_highest_modal() {
        let mut records = vec![
            record("27/01/2026", "2000"),
            record("26/01/2026", "1900"),
            record("27/01/2026", "2200"),
        ];
        sort_records(&mut records);

        let modals: Vec<&str> = records.iter().map(|r| r.modal_price.as_str()).collect();
        assert_eq!(modals, vec!["2200", "2000", "1900"]);
        assert_eq!(records[0].arrival_date, "27/01/2026");
        assert_eq!(records[2].arrival_date, "26/01/2026");
    }

    #[test]
    fn sorted_output_is_monotonic() {
        let mut records = vec![
            record("01/02/2026", "1500"),
            record("31/01/2026", "1700"),
            record("01/02/2026", "1650"),
            record("29/01/2026", "2100"),
        ];
        sort_records(&mut records);

        for pair in records.windows(2) {
            let date_a = pair[0].parsed_date().unwrap();
            let date_b = pair[1].parsed_date().unwrap();
            assert!(date_a >= date_b);
            if date_a == date_b {
                assert!(pair[0].modal_value().unwrap() >= pair[1].modal_value().unwrap());
            }
        }
    }

    #[test]
    fn unparseable_dates_sort_last() {
        let mut records = vec![
            record("not-a-date", "9999"),
            record("26/01/2026", "1900"),
        ];
        sort_records(&mut records);
        assert_eq!(records[0].arrival_date, "26/01/2026");
        assert_eq!(records[1].arrival_date, "not-a-date");
    }

    #[test]
    fn arrival_date_components_are_reversed() {
        let date = parse_arrival_date("27/01/2026").unwrap();
        assert_eq!(date.to_string(), "2026-01-27");
        assert!(parse_arrival_date("2026-01-27").is_none());
        assert!(parse_arrival_date("").is_none());
    }

    #[test]
    fn day_label_fails_soft() {
        assert_eq!(day_label("27/01/2026"), "Tue, 27 Jan");
        assert_eq!(day_label("garbage"), "--");
    }

    #[test]
    fn non_numeric_price_is_absent_not_zero() {
        let broken = record("27/01/2026", "NR");
        assert_eq!(broken.modal_value(), None);
        assert_eq!(format_inr(broken.modal_value()), "N/A");
        // an actual zero still renders as a price
        assert_eq!(format_inr(Some(0.0)), "₹0");
    }

    #[test]
    fn inr_formatting_uses_indian_grouping() {
        assert_eq!(format_inr(Some(2200.0)), "₹2,200");
        assert_eq!(format_inr(Some(123456.0)), "₹1,23,456");
        assert_eq!(format_inr(Some(12345678.0)), "₹1,23,45,678");
        assert_eq!(format_inr(Some(999.0)), "₹999");
        assert_eq!(format_inr(None), "N/A");
    }
}
