//! Forecast generation.
//!
//! Validation and business-rule failures (bad date format, out-of-window
//! dates) are returned as error payloads, never raised: the orchestrator
//! feeds them back to the model so the user gets a natural-language
//! explanation.

use chrono::{Datelike, NaiveDate, Utc};
use rand::distributions::{Distribution, WeightedIndex};
use rand::Rng;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{info, warn};

use tenerife_core::{error_payload, AssistantError};

/// Sky conditions with their sampling weights, typical for Tenerife.
const CONDITIONS: [(&str, u32); 5] = [
    ("Sunny", 40),
    ("Partly cloudy", 30),
    ("Cloudy", 15),
    ("Light rain", 10),
    ("Windy", 5),
];

/// Forecasts are limited to this many days ahead.
const MAX_DAYS_AHEAD: i64 = 7;

/// A generated weather forecast.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Forecast {
    pub date: String,
    pub location: String,
    pub temperature_high: i32,
    pub temperature_low: i32,
    pub condition: String,
    /// Relative humidity, percent.
    pub humidity: i32,
    /// Wind speed, km/h.
    pub wind_speed: i32,
    pub recommendation: String,
    /// Always `true` for this backend.
    pub simulated: bool,
}

/// Generates weather forecasts.
///
/// Only the simulated backend exists; requesting real data requires an API
/// key and is rejected at construction until a real integration lands.
pub struct WeatherService {
    simulated: bool,
}

impl WeatherService {
    /// Create a service backed by the simulator.
    pub fn simulated() -> Self {
        info!(simulated = true, "weather service initialized");
        Self { simulated: true }
    }

    /// Create a service, choosing the backend.
    ///
    /// # Errors
    ///
    /// Returns a configuration error when `simulated` is `false` and no API
    /// key is supplied.
    pub fn new(simulated: bool, api_key: Option<String>) -> tenerife_core::Result<Self> {
        if !simulated && api_key.is_none() {
            return Err(AssistantError::Config(
                "API key required for real weather service".to_string(),
            ));
        }
        info!(simulated, "weather service initialized");
        Ok(Self { simulated })
    }

    /// Get the forecast for `date` (format `YYYY-MM-DD`) at `location`.
    ///
    /// Returns either a serialized [`Forecast`] or an error payload.
    pub fn get_weather(&self, date: &str, location: &str) -> Value {
        self.get_weather_at(date, location, Utc::now().date_naive())
    }

    /// Like [`get_weather`](Self::get_weather), but with the forecast window
    /// evaluated against an explicit `today`.
    pub fn get_weather_at(&self, date: &str, location: &str, today: NaiveDate) -> Value {
        info!(date, location, simulated = self.simulated, "weather request");

        let Ok(requested) = NaiveDate::parse_from_str(date, "%Y-%m-%d") else {
            warn!(date, "invalid forecast date format");
            return error_payload("Invalid date format. Use YYYY-MM-DD.");
        };

        let days_ahead = (requested - today).num_days();
        if days_ahead > MAX_DAYS_AHEAD {
            warn!(date, days_ahead, "forecast date too far in the future");
            return error_payload(format!(
                "I can only provide forecasts up to {MAX_DAYS_AHEAD} days in the future."
            ));
        }
        if days_ahead < -1 {
            warn!(date, days_ahead, "forecast date in the past");
            return error_payload("I cannot provide weather for past dates.");
        }

        if !self.simulated {
            // Real API backend is a future extension.
            return error_payload("Real weather data is not available yet.");
        }

        let forecast = simulate(requested, date, location);
        info!(
            condition = %forecast.condition,
            temperature_high = forecast.temperature_high,
            "weather response"
        );
        serde_json::to_value(&forecast)
            .unwrap_or_else(|e| error_payload(format!("failed to serialize forecast: {e}")))
    }
}

/// Seasonal temperature bands, inclusive: `(high, low)` ranges per month
/// group. Tenerife is mild year-round.
fn seasonal_bands(month: u32) -> ((i32, i32), (i32, i32)) {
    match month {
        12 | 1 | 2 => ((18, 22), (14, 17)), // winter
        3..=5 => ((20, 24), (15, 18)),      // spring
        6..=8 => ((25, 30), (19, 23)),      // summer
        _ => ((22, 26), (17, 20)),          // fall
    }
}

/// One fixed recommendation per condition.
fn recommendation_for(condition: &str) -> &'static str {
    match condition {
        "Sunny" => "Perfect for the beach. Don't forget sunscreen and water.",
        "Partly cloudy" => "A good day for sightseeing. Bring sunglasses just in case.",
        "Cloudy" => "Ideal for visiting museums or the historic quarter of La Laguna.",
        "Light rain" => "Take an umbrella. A good day for shopping centres or restaurants.",
        _ => "Be careful near cliff areas. Avoid water activities.",
    }
}

fn simulate(requested: NaiveDate, date: &str, location: &str) -> Forecast {
    let mut rng = rand::thread_rng();

    let ((high_min, high_max), (low_min, low_max)) = seasonal_bands(requested.month());
    let temperature_high = rng.gen_range(high_min..=high_max);
    let temperature_low = rng.gen_range(low_min..=low_max);

    let weights = WeightedIndex::new(CONDITIONS.iter().map(|(_, w)| *w))
        .expect("condition weights are non-zero");
    let condition = CONDITIONS[weights.sample(&mut rng)].0;

    Forecast {
        date: date.to_string(),
        location: location.to_string(),
        temperature_high,
        temperature_low,
        condition: condition.to_string(),
        humidity: rng.gen_range(50..=75),
        wind_speed: rng.gen_range(5..=25),
        recommendation: recommendation_for(condition).to_string(),
        simulated: true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fixed_today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 6, 10).unwrap()
    }

    fn forecast(payload: &Value) -> Forecast {
        serde_json::from_value(payload.clone()).expect("payload should be a forecast")
    }

    fn is_error(payload: &Value) -> bool {
        tenerife_core::is_error_payload(payload)
    }

    #[test]
    fn malformed_date_yields_error_payload() {
        let service = WeatherService::simulated();
        for bad in ["15-06-2025", "2025/06/15", "tomorrow", "", "2025-13-40"] {
            let payload = service.get_weather_at(bad, "Tenerife", fixed_today());
            assert!(is_error(&payload), "{bad:?} should be rejected");
            assert!(payload["message"].as_str().unwrap().contains("YYYY-MM-DD"));
        }
    }

    #[test]
    fn window_edges_follow_the_seven_day_policy() {
        let service = WeatherService::simulated();
        let today = fixed_today();

        // D+8 and later: too far ahead.
        let payload = service.get_weather_at("2025-06-18", "Tenerife", today);
        assert!(is_error(&payload));
        assert!(payload["message"].as_str().unwrap().contains("7 days"));

        // D-2 and earlier: in the past.
        let payload = service.get_weather_at("2025-06-08", "Tenerife", today);
        assert!(is_error(&payload));
        assert!(payload["message"].as_str().unwrap().contains("past"));

        // D-1 through D+7: forecasts.
        for ok in ["2025-06-09", "2025-06-10", "2025-06-17"] {
            let payload = service.get_weather_at(ok, "Tenerife", today);
            assert!(!is_error(&payload), "{ok} should yield a forecast");
            assert!(forecast(&payload).simulated);
        }
    }

    #[test]
    fn december_dates_use_the_winter_band() {
        let service = WeatherService::simulated();
        let today = NaiveDate::from_ymd_opt(2025, 12, 1).unwrap();
        for _ in 0..50 {
            let payload = service.get_weather_at("2025-12-03", "Tenerife", today);
            let forecast = forecast(&payload);
            assert!((18..=22).contains(&forecast.temperature_high), "{forecast:?}");
            assert!((14..=17).contains(&forecast.temperature_low), "{forecast:?}");
        }
    }

    #[test]
    fn july_dates_use_the_summer_band() {
        let service = WeatherService::simulated();
        let today = NaiveDate::from_ymd_opt(2025, 7, 1).unwrap();
        for _ in 0..50 {
            let payload = service.get_weather_at("2025-07-04", "Tenerife", today);
            let forecast = forecast(&payload);
            assert!((25..=30).contains(&forecast.temperature_high), "{forecast:?}");
            assert!((19..=23).contains(&forecast.temperature_low), "{forecast:?}");
        }
    }

    #[test]
    fn conditions_come_from_the_fixed_set_with_matching_recommendation() {
        let service = WeatherService::simulated();
        let today = fixed_today();
        for _ in 0..100 {
            let payload = service.get_weather_at("2025-06-12", "Tenerife", today);
            let forecast = forecast(&payload);
            assert!(CONDITIONS.iter().any(|(c, _)| *c == forecast.condition));
            assert_eq!(forecast.recommendation, recommendation_for(&forecast.condition));
            assert!((50..=75).contains(&forecast.humidity));
            assert!((5..=25).contains(&forecast.wind_speed));
        }
    }

    #[test]
    fn real_backend_requires_an_api_key() {
        assert!(WeatherService::new(false, None).is_err());
        assert!(WeatherService::new(false, Some("key".into())).is_ok());
        assert!(WeatherService::new(true, None).is_ok());
    }

    #[test]
    fn real_backend_reports_unavailable() {
        let service = WeatherService::new(false, Some("key".into())).unwrap();
        let payload = service.get_weather_at("2025-06-12", "Tenerife", fixed_today());
        assert!(is_error(&payload));
    }
}
