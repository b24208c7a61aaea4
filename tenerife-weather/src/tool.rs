//! The `get_weather` tool binding.

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::{json, Value};

use tenerife_core::{error_payload, Tool};

use crate::service::WeatherService;

const DEFAULT_LOCATION: &str = "Tenerife";

/// Exposes a [`WeatherService`] to the model as the `get_weather` tool.
pub struct WeatherTool {
    service: Arc<WeatherService>,
}

impl WeatherTool {
    pub fn new(service: Arc<WeatherService>) -> Self {
        Self { service }
    }
}

#[async_trait]
impl Tool for WeatherTool {
    fn name(&self) -> &str {
        "get_weather"
    }

    fn description(&self) -> &str {
        "Get the weather forecast for a specific date in Tenerife. Use when the user asks \
         about the weather, temperature, or meteorological conditions."
    }

    fn parameters_schema(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "date": {
                    "type": "string",
                    "description": "Forecast date in YYYY-MM-DD format"
                },
                "location": {
                    "type": "string",
                    "description": "Location within Tenerife (optional, default: Tenerife)"
                }
            },
            "required": ["date"]
        })
    }

    async fn invoke(&self, args: Value) -> Value {
        let Some(date) = args.get("date").and_then(Value::as_str) else {
            return error_payload("Missing required 'date' parameter.");
        };
        let location = args.get("location").and_then(Value::as_str).unwrap_or(DEFAULT_LOCATION);

        self.service.get_weather(date, location)
    }
}
