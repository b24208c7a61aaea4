//! Simulated weather forecasts for Tenerife.
//!
//! [`WeatherService`] generates realistic forecasts from seasonal
//! temperature bands and a weighted condition distribution; [`WeatherTool`]
//! binds it into the assistant's tool registry as `get_weather`. Every
//! forecast carries `simulated: true` to distinguish it from a future
//! real-data backend.

pub mod service;
pub mod tool;

pub use service::{Forecast, WeatherService};
pub use tool::WeatherTool;
