//! Weather data model and display methods

use serde::{Deserialize, Serialize};

/// Response of the weather endpoint
///
/// A body carrying `error` is always `Unavailable`, even if the server
/// also sent some of the snapshot fields.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum WeatherReport {
    Unavailable { error: String },
    Snapshot(WeatherSnapshot),
}

/// Current weather for a city with a training suggestion
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherSnapshot {
    #[serde(rename = "ciudad")]
    pub city: String,
    /// Temperature in Celsius
    #[serde(rename = "temperatura")]
    pub temperature_c: f64,
    /// Apparent temperature in Celsius
    #[serde(rename = "sensacion_termica", default, skip_serializing_if = "Option::is_none")]
    pub feels_like_c: Option<f64>,
    /// Relative humidity in percent
    #[serde(rename = "humedad")]
    pub humidity_percent: f64,
    /// Wind speed in m/s
    #[serde(rename = "viento")]
    pub wind_speed: f64,
    #[serde(rename = "descripcion")]
    pub description: String,
    #[serde(rename = "recomendacion_ejercicio", default)]
    pub exercise_recommendation: String,
}

/// Coarse temperature classification used to color the reading
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TemperatureBand {
    Hot,
    Warm,
    Cool,
}

impl WeatherSnapshot {
    #[must_use]
    pub fn temperature_band(&self) -> TemperatureBand {
        if self.temperature_c > 25.0 {
            TemperatureBand::Hot
        } else if self.temperature_c > 15.0 {
            TemperatureBand::Warm
        } else {
            TemperatureBand::Cool
        }
    }

    /// Format temperature with unit
    #[must_use]
    pub fn format_temperature(&self) -> String {
        format!("{}°C", self.temperature_c)
    }

    #[must_use]
    pub fn format_humidity(&self) -> String {
        format!("{}%", self.humidity_percent)
    }

    /// Format wind speed with unit
    #[must_use]
    pub fn format_wind(&self) -> String {
        format!("{} m/s", self.wind_speed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn snapshot(temperature_c: f64) -> WeatherSnapshot {
        WeatherSnapshot {
            city: "San Jose".into(),
            temperature_c,
            feels_like_c: None,
            humidity_percent: 80.0,
            wind_speed: 3.5,
            description: "light rain".into(),
            exercise_recommendation: "Train indoors".into(),
        }
    }

    #[test]
    fn test_temperature_bands() {
        assert_eq!(snapshot(30.0).temperature_band(), TemperatureBand::Hot);
        assert_eq!(snapshot(25.0).temperature_band(), TemperatureBand::Warm);
        assert_eq!(snapshot(15.5).temperature_band(), TemperatureBand::Warm);
        assert_eq!(snapshot(15.0).temperature_band(), TemperatureBand::Cool);
        assert_eq!(snapshot(-3.0).temperature_band(), TemperatureBand::Cool);
    }

    #[test]
    fn test_formatting_keeps_server_values() {
        let weather = snapshot(22.4);
        assert_eq!(weather.format_temperature(), "22.4°C");
        assert_eq!(weather.format_humidity(), "80%");
        assert_eq!(weather.format_wind(), "3.5 m/s");
    }

    #[test]
    fn test_parse_snapshot() {
        let body = r#"{
            "ciudad": "San Jose",
            "temperatura": 24.1,
            "sensacion_termica": 25.0,
            "humedad": 78,
            "viento": 2.06,
            "descripcion": "nubes dispersas",
            "recomendacion_ejercicio": "Ideal for running outdoors"
        }"#;
        let report: WeatherReport = serde_json::from_str(body).unwrap();
        let WeatherReport::Snapshot(weather) = report else {
            panic!("expected snapshot, got {report:?}");
        };
        assert_eq!(weather.city, "San Jose");
        assert_eq!(weather.humidity_percent, 78.0);
        assert_eq!(weather.feels_like_c, Some(25.0));
        assert_eq!(weather.exercise_recommendation, "Ideal for running outdoors");
    }

    #[test]
    fn test_error_body_wins_over_partial_fields() {
        let body = r#"{"error": "city not found", "ciudad": "Atlantis"}"#;
        let report: WeatherReport = serde_json::from_str(body).unwrap();
        assert_eq!(
            report,
            WeatherReport::Unavailable {
                error: "city not found".into()
            }
        );
    }

    #[test]
    fn test_incomplete_snapshot_is_rejected() {
        let body = r#"{"ciudad": "San Jose"}"#;
        assert!(serde_json::from_str::<WeatherReport>(body).is_err());
    }
}
