pub mod agmarknet;
pub mod openweather;

pub use agmarknet::AgmarknetClient;
pub use openweather::OpenWeatherClient;
