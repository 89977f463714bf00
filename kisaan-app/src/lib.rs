pub mod api_service;
pub mod intent;
pub mod pages;
pub mod prices;
pub mod voice;

// Re-export main components
pub use api_service::{ApiClient, ApiError};
pub use intent::{classify, Intent, Route, WeatherDuration};
pub use pages::{CropPricesPage, GovSchemesPage, HomePage, PageState, WeatherPage};
pub use prices::{daily_canonical, normalize, NormalizeError, PriceReport};
