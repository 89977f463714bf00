mod crop_prices;
mod gov_schemes;
mod home;
mod weather;

pub use crop_prices::{CropPricesPage, PriceView, TimelineEntry, POPULAR_CROPS};
pub use gov_schemes::GovSchemesPage;
pub use home::HomePage;
pub use weather::{WeatherPage, POPULAR_CITIES};

/// Lifecycle of one page's view model. A new query moves Success or Error
/// straight back to Loading; Idle is also where a page lands after a
/// consumed redirect, so a refresh cannot re-submit.
#[derive(Debug, Clone, PartialEq)]
pub enum PageState<T> {
    Idle,
    Loading,
    Success(T),
    Error(String),
}

impl<T> PageState<T> {
    pub fn is_loading(&self) -> bool {
        matches!(self, PageState::Loading)
    }
}

/// Monotonic sequence guarding a page against superseded in-flight
/// requests: a response only lands if its token still matches the latest
/// issued one, so a slow old request can never overwrite newer state.
#[derive(Debug, Default)]
pub struct RequestSeq {
    latest: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RequestToken(u64);

impl RequestSeq {
    pub fn begin(&mut self) -> RequestToken {
        self.latest += 1;
        RequestToken(self.latest)
    }

    pub fn is_current(&self, token: RequestToken) -> bool {
        token.0 == self.latest
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_the_latest_token_is_current() {
        let mut seq = RequestSeq::default();
        let first = seq.begin();
        let second = seq.begin();

        assert!(!seq.is_current(first));
        assert!(seq.is_current(second));
    }
}
