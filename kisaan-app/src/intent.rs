use serde_json::Value;

/// Requested forecast window for a weather query. Anything the model emits
/// outside the known values renders the default layout, so the page never
/// has to interpret a stray string.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WeatherDuration {
    Today,
    FiveDay,
    Default,
}

impl WeatherDuration {
    fn parse(raw: Option<&str>) -> Self {
        match raw {
            Some("today") => Self::Today,
            Some("5-day") => Self::FiveDay,
            _ => Self::Default,
        }
    }
}

/// Classified form of one assistant response. Built once per query,
/// consumed immediately by the dispatcher, never persisted.
#[derive(Debug, Clone, PartialEq)]
pub enum Intent {
    Weather {
        city: String,
        duration: WeatherDuration,
    },
    CropPrices {
        crop: String,
        location: Option<String>,
    },
    GovSchemes {
        search_term: String,
    },
    GeneralInfo {
        answer: String,
    },
    /// Anything that did not parse as a recognized intent. Rendered as-is
    /// on the current page.
    FreeText(String),
}

/// Navigation target carried from the home page to a sub-view.
#[derive(Debug, Clone, PartialEq)]
pub enum Route {
    Weather {
        city: String,
        duration: WeatherDuration,
    },
    CropPrices {
        crop: String,
        location: Option<String>,
    },
    GovSchemes {
        search_term: String,
    },
}

impl Intent {
    /// Each tool/navigational intent maps to exactly one target. Answers
    /// (GeneralInfo and FreeText) render in place and do not navigate.
    pub fn route(&self) -> Option<Route> {
        match self {
            Intent::Weather { city, duration } => Some(Route::Weather {
                city: city.clone(),
                duration: *duration,
            }),
            Intent::CropPrices { crop, location } => Some(Route::CropPrices {
                crop: crop.clone(),
                location: location.clone(),
            }),
            Intent::GovSchemes { search_term } => Some(Route::GovSchemes {
                search_term: search_term.clone(),
            }),
            Intent::GeneralInfo { .. } | Intent::FreeText(_) => None,
        }
    }
}

/// Turns one sanitized assistant response into an Intent.
///
/// The text is expected to be either a bare JSON intent object or plain
/// prose; code-fence stripping already happened on the gateway side. A
/// parse failure, an unknown intent value, or a recognized intent missing
/// its required fields all fall back to FreeText so nothing the model said
/// is silently dropped.
pub fn classify(raw: &str) -> Intent {
    let parsed: Value = match serde_json::from_str(raw.trim()) {
        Ok(value) => value,
        Err(_) => return Intent::FreeText(raw.to_string()),
    };

    match parsed.get("intent").and_then(Value::as_str) {
        Some("WEATHER") => {
            let city = match string_field(&parsed, "city") {
                Some(city) => city,
                None => return unrecognized(&parsed),
            };
            let duration =
                WeatherDuration::parse(parsed.get("duration").and_then(Value::as_str));
            Intent::Weather { city, duration }
        }
        Some("CROP_PRICES") => {
            let crop = match string_field(&parsed, "crop") {
                Some(crop) => crop,
                None => return unrecognized(&parsed),
            };
            // "null" is a documented sentinel for "no location filter"
            let location = string_field(&parsed, "location").filter(|l| l != "null");
            Intent::CropPrices { crop, location }
        }
        Some("GOV_SCHEMES") => Intent::GovSchemes {
            search_term: string_field(&parsed, "search_term").unwrap_or_default(),
        },
        Some("GENERAL_INFO") => match string_field(&parsed, "answer") {
            Some(answer) => Intent::GeneralInfo { answer },
            None => unrecognized(&parsed),
        },
        _ => unrecognized(&parsed),
    }
}

fn string_field(parsed: &Value, field: &str) -> Option<String> {
    parsed
        .get(field)
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

fn unrecognized(parsed: &Value) -> Intent {
    Intent::FreeText(parsed.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn weather_without_duration_defaults() {
        let intent = classify(r#"{"intent":"WEATHER","city":"Pune"}"#);
        assert_eq!(
            intent,
            Intent::Weather {
                city: "Pune".to_string(),
                duration: WeatherDuration::Default,
            }
        );
    }

    #[test]
    fn weather_duration_values_map_to_variants() {
        let today = classify(r#"{"intent":"WEATHER","city":"Noida","duration":"today"}"#);
        assert!(matches!(
            today,
            Intent::Weather { duration: WeatherDuration::Today, .. }
        ));

        let five_day = classify(r#"{"intent":"WEATHER","city":"Delhi","duration":"5-day"}"#);
        assert!(matches!(
            five_day,
            Intent::Weather { duration: WeatherDuration::FiveDay, .. }
        ));

        // out-of-vocabulary duration renders the default layout
        let odd = classify(r#"{"intent":"WEATHER","city":"Delhi","duration":"fortnight"}"#);
        assert!(matches!(
            odd,
            Intent::Weather { duration: WeatherDuration::Default, .. }
        ));
    }

    #[test]
    fn plain_text_is_free_text_with_no_route() {
        let intent = classify("not json at all");
        assert_eq!(intent, Intent::FreeText("not json at all".to_string()));
        assert_eq!(intent.route(), None);
    }

    #[test]
    fn unknown_intent_value_falls_back_to_free_text_of_the_object() {
        let intent = classify(r#"{"intent":"SELL_TRACTOR","model":"X"}"#);
        match intent {
            Intent::FreeText(text) => {
                assert!(text.contains("SELL_TRACTOR"));
                assert!(text.contains("model"));
            }
            other => panic!("expected FreeText, got {:?}", other),
        }
    }

    #[test]
    fn weather_missing_city_is_not_constructed() {
        let intent = classify(r#"{"intent":"WEATHER","duration":"today"}"#);
        assert!(matches!(intent, Intent::FreeText(_)));
    }

    #[test]
    fn null_location_sentinel_becomes_absent_filter() {
        let intent = classify(r#"{"intent":"CROP_PRICES","crop":"Wheat","location":"null"}"#);
        assert_eq!(
            intent,
            Intent::CropPrices {
                crop: "Wheat".to_string(),
                location: None,
            }
        );

        let with_district =
            classify(r#"{"intent":"CROP_PRICES","crop":"Onion","location":"Nashik"}"#);
        assert_eq!(
            with_district,
            Intent::CropPrices {
                crop: "Onion".to_string(),
                location: Some("Nashik".to_string()),
            }
        );
    }

    #[test]
    fn gov_schemes_search_term_is_optional() {
        let intent = classify(r#"{"intent":"GOV_SCHEMES"}"#);
        assert_eq!(
            intent,
            Intent::GovSchemes {
                search_term: String::new(),
            }
        );
    }

    #[test]
    fn answers_do_not_navigate() {
        let info = classify(r#"{"intent":"GENERAL_INFO","answer":"Sow wheat in November."}"#);
        assert_eq!(info.route(), None);

        let tool = classify(r#"{"intent":"CROP_PRICES","crop":"Wheat"}"#);
        assert!(tool.route().is_some());
    }
}
