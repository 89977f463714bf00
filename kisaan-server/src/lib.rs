pub mod api;
pub mod config;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod system;

// Re-export main components
pub use api::agmarknet::AgmarknetClient;
pub use api::openweather::OpenWeatherClient;
pub use config::Config;
pub use system::AppState;
