use common::market::PriceRecord;
use serde::Serialize;
use std::collections::HashSet;

#[derive(Debug, thiserror::Error, PartialEq)]
pub enum NormalizeError {
    #[error("no price records found")]
    Empty,
}

/// Latest-vs-previous-session view of a crop's mandi prices, derived from
/// one sorted upstream result set.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PriceReport {
    pub today: f64,
    pub yesterday: Option<f64>,
    pub difference: f64,
    pub average: f64,
    pub market: String,
    pub district: String,
    pub date: String,
    pub min: f64,
    pub max: f64,
    pub has_history: bool,
}

/// Picks one representative record per distinct arrival date: the first one
/// encountered while scanning. The input must already carry the gateway's
/// ordering (newest date first, highest modal price first within a date),
/// which makes the pick the day's highest-priced row. Descending date order
/// is preserved.
pub fn daily_canonical(records: &[PriceRecord]) -> Vec<&PriceRecord> {
    let mut seen = HashSet::new();
    let mut canonical = Vec::new();

    for record in records {
        if seen.insert(record.arrival_date.as_str()) {
            canonical.push(record);
        }
    }

    canonical
}

/// Builds the price report from a sorted record list.
///
/// The average runs over every distinct day present in the result set,
/// however many the upstream row limit happened to return; it is not a
/// fixed-window average. Missing or invalid prices count as zero here;
/// the display layer is responsible for showing them as "N/A".
pub fn normalize(records: &[PriceRecord]) -> Result<PriceReport, NormalizeError> {
    let canonical = daily_canonical(records);

    let latest = match canonical.first() {
        Some(latest) => *latest,
        None => return Err(NormalizeError::Empty),
    };

    let has_history = canonical.len() >= 2;
    let prev = canonical.get(1).copied().unwrap_or(latest);

    let today = latest.modal_value().unwrap_or(0.0);
    let yesterday = if has_history {
        Some(prev.modal_value().unwrap_or(0.0))
    } else {
        None
    };
    let difference = today - yesterday.unwrap_or(today);

    let average = canonical
        .iter()
        .map(|record| record.modal_value().unwrap_or(0.0))
        .sum::<f64>()
        / canonical.len() as f64;

    Ok(PriceReport {
        today,
        yesterday,
        difference,
        average,
        market: latest.market.clone(),
        district: latest.district.clone(),
        date: latest.arrival_date.clone(),
        min: latest.min_value().unwrap_or(0.0),
        max: latest.max_value().unwrap_or(0.0),
        has_history,
    })
}
