// crates/shared/src/toolbelts/weather.rs

use std::future::Future;
use std::time::Duration;

use serde_json::Value;
use thiserror::Error;
use tokio::runtime::{Builder, Handle, RuntimeFlavor};
use tracing::{debug, warn};

use crate::register_toolbelt;

pub const OPEN_METEO_URL: &str = "https://api.open-meteo.com/v1/forecast";

const BANGKOK_LATITUDE: f64 = 13.7563;
const BANGKOK_LONGITUDE: f64 = 100.5018;
const CURRENT_FIELDS: &str = "temperature_2m,relative_humidity_2m,weather_code,wind_speed_10m";
const TIMEZONE: &str = "Asia/Bangkok";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

pub struct Weather {
    client: reqwest::Client,
    endpoint: String,
}

impl Default for Weather {
    fn default() -> Self {
        Self::new(OPEN_METEO_URL)
    }
}

register_toolbelt! {
    Weather {
        tools: {
            "get_bangkok_weather" => get_bangkok_weather {
                doc: "Get the current weather conditions in Bangkok, Thailand. \
                      Input: ignored, an empty string is fine. \
                      Returns: temperature, humidity, wind speed and conditions.",
            }
        }
    }
}

#[derive(Debug, Error)]
enum WeatherError {
    #[error("Error fetching weather data: Unable to connect to weather service. {0}")]
    Fetch(#[from] reqwest::Error),
    #[error("Error processing weather data: {0}")]
    Decode(#[from] serde_json::Error),
    #[error("Error processing weather data: {0}")]
    Runtime(String),
}

impl Weather {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            endpoint: endpoint.into(),
        }
    }

    fn get_bangkok_weather(&self, _input: &Value) -> String {
        self.current_report()
    }

    /// Blocking lookup, for use from synchronous tool handlers.
    pub fn current_report(&self) -> String {
        let result = match Handle::try_current() {
            Ok(handle) => block_in_runtime(&handle, self.fetch_current(&self.client)),
            // Pooled connections belong to the runtime that opened them, so
            // a throwaway runtime gets a throwaway client.
            Err(_) => block_on_fresh_runtime(self.fetch_current(&reqwest::Client::new())),
        }
        .and_then(|fetched| fetched);
        match result {
            Ok(current) => format_report(&current),
            Err(err) => {
                warn!(error = %err, "Weather lookup failed");
                err.to_string()
            }
        }
    }

    async fn fetch_current(&self, client: &reqwest::Client) -> Result<Value, WeatherError> {
        debug!(endpoint = %self.endpoint, "Fetching Bangkok weather");

        let body = client
            .get(&self.endpoint)
            .query(&[
                ("latitude", BANGKOK_LATITUDE.to_string()),
                ("longitude", BANGKOK_LONGITUDE.to_string()),
                ("current", CURRENT_FIELDS.to_string()),
                ("timezone", TIMEZONE.to_string()),
            ])
            .timeout(REQUEST_TIMEOUT)
            .send()
            .await?
            .error_for_status()?
            .text()
            .await?;

        let data: Value = serde_json::from_str(&body)?;
        Ok(data.get("current").cloned().unwrap_or(Value::Null))
    }
}

/// Drives `future` from synchronous code running inside `handle`'s runtime.
///
/// Only a multi-threaded runtime can hand its worker over with
/// `block_in_place`.
fn block_in_runtime<F: Future>(handle: &Handle, future: F) -> Result<F::Output, WeatherError> {
    if handle.runtime_flavor() != RuntimeFlavor::MultiThread {
        return Err(WeatherError::Runtime(
            "weather lookups need a multi-threaded runtime".to_string(),
        ));
    }
    Ok(tokio::task::block_in_place(|| handle.block_on(future)))
}

fn block_on_fresh_runtime<F: Future>(future: F) -> Result<F::Output, WeatherError> {
    let runtime = Builder::new_current_thread()
        .enable_all()
        .build()
        .map_err(|err| WeatherError::Runtime(err.to_string()))?;
    Ok(runtime.block_on(future))
}

pub fn describe_weather_code(code: i64) -> &'static str {
    match code {
        0 => "Clear sky",
        1 => "Mainly clear",
        2 => "Partly cloudy",
        3 => "Overcast",
        45 => "Fog",
        48 => "Rime fog",
        51 => "Light drizzle",
        53 => "Moderate drizzle",
        55 => "Dense drizzle",
        61 => "Slight rain",
        63 => "Moderate rain",
        65 => "Heavy rain",
        80 => "Slight rain showers",
        81 => "Moderate rain showers",
        82 => "Violent rain showers",
        95 => "Thunderstorm",
        96 => "Thunderstorm with hail",
        99 => "Thunderstorm with heavy hail",
        _ => "Unknown conditions",
    }
}

/// Renders Open-Meteo's `current` block.
pub fn format_report(current: &Value) -> String {
    let reading = |key: &str| match current.get(key) {
        Some(Value::Null) | None => "N/A".to_string(),
        Some(Value::String(text)) => text.clone(),
        Some(other) => other.to_string(),
    };
    let conditions = match current.get("weather_code") {
        None => describe_weather_code(0),
        Some(code) => code
            .as_i64()
            .or_else(|| code.as_f64().map(|code| code as i64))
            .map_or("Unknown conditions", describe_weather_code),
    };

    format!(
        "Current weather in Bangkok, Thailand:\n\
         Temperature: {}°C\n\
         Humidity: {}%\n\
         Wind Speed: {} km/h\n\
         Conditions: {}",
        reading("temperature_2m"),
        reading("relative_humidity_2m"),
        reading("wind_speed_10m"),
        conditions,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[test]
    fn formats_a_full_reading() {
        let current = json!({
            "temperature_2m": 31.4,
            "relative_humidity_2m": 74,
            "weather_code": 2,
            "wind_speed_10m": 9.8
        });
        assert_eq!(
            format_report(&current),
            "Current weather in Bangkok, Thailand:\n\
             Temperature: 31.4°C\n\
             Humidity: 74%\n\
             Wind Speed: 9.8 km/h\n\
             Conditions: Partly cloudy"
        );
    }

    #[test]
    fn missing_readings_render_as_not_available() {
        let report = format_report(&json!({}));
        assert!(report.contains("Temperature: N/A°C"));
        assert!(report.contains("Humidity: N/A%"));
        assert!(report.contains("Conditions: Clear sky"));
    }

    #[test]
    fn unknown_codes_are_reported_as_such() {
        assert_eq!(describe_weather_code(7), "Unknown conditions");
        let report = format_report(&json!({ "weather_code": "stormy" }));
        assert!(report.ends_with("Conditions: Unknown conditions"));
    }

    #[test]
    fn null_code_is_unknown_rather_than_clear() {
        let report = format_report(&json!({ "weather_code": null }));
        assert!(report.ends_with("Conditions: Unknown conditions"));
    }

    #[test]
    fn lookups_outside_a_runtime_survive_repeated_calls() {
        let runtime = tokio::runtime::Runtime::new().unwrap();
        let server = runtime.block_on(async {
            let server = MockServer::start().await;
            Mock::given(method("GET"))
                .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                    "current": { "temperature_2m": 30.5, "weather_code": 0 }
                })))
                .expect(2)
                .mount(&server)
                .await;
            server
        });

        let weather = Weather::new(server.uri());
        for _ in 0..2 {
            let report = weather.current_report();
            assert!(report.contains("Temperature: 30.5°C"), "{report}");
        }

        runtime.block_on(server.verify());
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn fetches_current_conditions() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/v1/forecast"))
            .and(query_param("timezone", "Asia/Bangkok"))
            .and(query_param("current", CURRENT_FIELDS))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "current": {
                    "temperature_2m": 29.0,
                    "relative_humidity_2m": 80,
                    "weather_code": 95,
                    "wind_speed_10m": 12.5
                }
            })))
            .mount(&server)
            .await;

        let weather = Weather::new(format!("{}/v1/forecast", server.uri()));
        let report = weather.current_report();

        assert!(report.contains("Temperature: 29.0°C"));
        assert!(report.ends_with("Conditions: Thunderstorm"));
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn server_errors_are_fetch_errors() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(503))
            .mount(&server)
            .await;

        let report = Weather::new(server.uri()).current_report();
        assert!(report.starts_with(
            "Error fetching weather data: Unable to connect to weather service."
        ));
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn garbled_bodies_are_processing_errors() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>"))
            .mount(&server)
            .await;

        let report = Weather::new(server.uri()).current_report();
        assert!(report.starts_with("Error processing weather data:"));
    }

    #[tokio::test(flavor = "current_thread")]
    async fn current_thread_runtime_is_refused() {
        let report = Weather::new("http://127.0.0.1:9").current_report();
        assert_eq!(
            report,
            "Error processing weather data: weather lookups need a multi-threaded runtime"
        );
    }
}
