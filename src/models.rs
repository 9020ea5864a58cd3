//! Data models for the WAQI feed and the prediction backend.
//!
//! WAQI contract: `{status, data: {aqi, iaqi: {<code>: {v}}}}`, where `data`
//! is a plain message string whenever `status` is not `"ok"`.
//! Backend contract: `/predict` and `/traffic-data` return flat JSON objects
//! that may carry an `error` string instead of data.

use std::collections::{BTreeMap, HashMap};

use serde::{Deserialize, Serialize};

use crate::errors::AqiError;
use crate::traffic::TrafficTiming;

/// Cities the prediction backend ships with presets for.
pub const PRESET_CITIES: [&str; 5] = ["Delhi", "Mumbai", "Kolkata", "Bangalore", "Chennai"];

/// Individual pollutant tracked by the dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum Pollutant {
    Co,
    No,
    No2,
    O3,
    So2,
    Pm25,
    Pm10,
    Nh3,
}

impl Pollutant {
    /// Display order used by both panels.
    pub const ALL: [Self; 8] = [
        Self::Co,
        Self::No,
        Self::No2,
        Self::O3,
        Self::So2,
        Self::Pm25,
        Self::Pm10,
        Self::Nh3,
    ];

    /// Pollutants the prediction backend reports (no NO).
    pub const PREDICTED: [Self; 7] = [
        Self::Pm10,
        Self::Pm25,
        Self::No2,
        Self::O3,
        Self::So2,
        Self::Co,
        Self::Nh3,
    ];

    /// Display code, also the key used by the prediction backend.
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Self::Co => "CO",
            Self::No => "NO",
            Self::No2 => "NO2",
            Self::O3 => "O3",
            Self::So2 => "SO2",
            Self::Pm25 => "PM2.5",
            Self::Pm10 => "PM10",
            Self::Nh3 => "NH3",
        }
    }

    /// Key under `iaqi` in WAQI responses.
    #[must_use]
    pub const fn iaqi_key(self) -> &'static str {
        match self {
            Self::Co => "co",
            Self::No => "no",
            Self::No2 => "no2",
            Self::O3 => "o3",
            Self::So2 => "so2",
            Self::Pm25 => "pm25",
            Self::Pm10 => "pm10",
            Self::Nh3 => "nh3",
        }
    }
}

/// Top-level WAQI `/feed/{city}/` response.
#[derive(Debug, Clone, Deserialize)]
pub struct FeedResponse {
    /// `"ok"` on success, anything else on failure
    pub status: String,

    /// Station data, or an error message when `status` is not ok
    #[serde(default)]
    pub data: serde_json::Value,
}

#[derive(Debug, Clone, Deserialize)]
struct FeedData {
    aqi: serde_json::Value,
    #[serde(default)]
    iaqi: HashMap<String, IaqiValue>,
    city: Option<FeedCity>,
}

#[derive(Debug, Clone, Deserialize)]
struct FeedCity {
    name: Option<String>,
    #[serde(default)]
    geo: Vec<f64>,
}

#[derive(Debug, Clone, Deserialize)]
struct IaqiValue {
    v: Option<f64>,
}

impl FeedResponse {
    /// Convert into a reading, surfacing application-level failures.
    pub fn into_reading(self) -> Result<AirQualityReading, AqiError> {
        if self.status != "ok" {
            let detail = self.data.as_str().unwrap_or("unknown error");
            return Err(AqiError::Upstream(format!(
                "City not found or API limit exceeded ({detail})."
            )));
        }

        let data: FeedData = serde_json::from_value(self.data)?;

        // Stations without a current reading report "-" instead of a number
        let aqi = data
            .aqi
            .as_f64()
            .filter(|v| v.is_finite() && *v >= 0.0)
            .ok_or_else(|| {
                AqiError::InvalidResponse(format!("station has no usable AQI: {}", data.aqi))
            })?;

        let pollutants = Pollutant::ALL
            .iter()
            .map(|p| (*p, data.iaqi.get(p.iaqi_key()).and_then(|x| x.v)))
            .collect();

        // Feed values are whole numbers; rounding only guards float noise
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        let aqi = aqi.round() as u32;

        let (station, location) = match data.city {
            Some(city) => {
                let location = match city.geo.as_slice() {
                    [lat, lon] => Some((*lat, *lon)),
                    _ => None,
                };
                (city.name, location)
            }
            None => (None, None),
        };

        Ok(AirQualityReading {
            aqi,
            pollutants,
            station,
            location,
        })
    }
}

/// AQI plus pollutant sub-indices for one city.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AirQualityReading {
    pub aqi: u32,
    pub pollutants: BTreeMap<Pollutant, Option<f64>>,
    /// Station name as reported by WAQI
    pub station: Option<String>,
    /// Station coordinates (lat, lon)
    pub location: Option<(f64, f64)>,
}

impl AirQualityReading {
    #[must_use]
    pub fn pollutant(&self, pollutant: Pollutant) -> Option<f64> {
        self.pollutants.get(&pollutant).copied().flatten()
    }
}

/// Response of `POST /predict`.
///
/// Every data field is optional so a partial payload still renders with
/// placeholders.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Prediction {
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,

    #[serde(rename = "AQI")]
    pub aqi: Option<f64>,

    #[serde(rename = "AQI_category")]
    pub aqi_category: Option<String>,

    pub weather: Option<Weather>,

    #[serde(rename = "PM10")]
    pub pm10: Option<f64>,
    #[serde(rename = "PM2.5")]
    pub pm25: Option<f64>,
    #[serde(rename = "NO2")]
    pub no2: Option<f64>,
    #[serde(rename = "O3")]
    pub o3: Option<f64>,
    #[serde(rename = "SO2")]
    pub so2: Option<f64>,
    #[serde(rename = "CO")]
    pub co: Option<f64>,
    #[serde(rename = "NH3")]
    pub nh3: Option<f64>,

    /// Set by the backend instead of data on failure
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl Prediction {
    /// Turn an `error` payload into an error.
    pub fn into_result(self) -> Result<Self, AqiError> {
        match self.error {
            Some(message) => Err(AqiError::Upstream(message)),
            None => Ok(self),
        }
    }

    #[must_use]
    pub fn pollutant(&self, pollutant: Pollutant) -> Option<f64> {
        match pollutant {
            Pollutant::Pm10 => self.pm10,
            Pollutant::Pm25 => self.pm25,
            Pollutant::No2 => self.no2,
            Pollutant::O3 => self.o3,
            Pollutant::So2 => self.so2,
            Pollutant::Co => self.co,
            Pollutant::Nh3 => self.nh3,
            Pollutant::No => None,
        }
    }

    /// Coordinates, when both are present.
    #[must_use]
    pub fn location(&self) -> Option<(f64, f64)> {
        self.latitude.zip(self.longitude)
    }
}

/// Current weather attached to a prediction.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Weather {
    pub temp: Option<f64>,
    pub description: Option<String>,
    pub humidity: Option<f64>,
    pub wind_speed: Option<f64>,
    pub uvi: Option<f64>,
}

/// Body of `POST /traffic-data`.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct TrafficRequest {
    pub latitude: f64,
    pub longitude: f64,
    pub aqi: f64,
}

/// Response of `POST /traffic-data`.
#[derive(Debug, Clone, Deserialize)]
pub struct TrafficResponse {
    pub timings: Option<TrafficTiming>,
    #[serde(default)]
    pub traffic_data: TrafficData,
    pub recommendation: Option<String>,
    pub error: Option<String>,
}

impl TrafficResponse {
    /// Validate into a usable traffic report.
    pub fn into_report(self) -> Result<TrafficReport, AqiError> {
        if let Some(message) = self.error {
            return Err(AqiError::Upstream(message));
        }
        let timings = self
            .timings
            .ok_or_else(|| AqiError::InvalidResponse("traffic response has no timings".into()))?;
        timings.validate()?;

        Ok(TrafficReport {
            timings,
            traffic_data: self.traffic_data,
            recommendation: self.recommendation,
        })
    }
}

/// Congestion figures reported alongside the timings.
///
/// The backend does not pin the types, so values are kept as raw JSON.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct TrafficData {
    #[serde(default)]
    pub density: serde_json::Value,
    #[serde(default)]
    pub speed: serde_json::Value,
    #[serde(default)]
    pub queue: serde_json::Value,
}

/// Validated traffic data.
#[derive(Debug, Clone, Serialize)]
pub struct TrafficReport {
    pub timings: TrafficTiming,
    pub traffic_data: TrafficData,
    pub recommendation: Option<String>,
}

/// Render a loosely typed JSON scalar for display.
#[must_use]
pub fn display_value(value: &serde_json::Value) -> Option<String> {
    match value {
        serde_json::Value::Null => None,
        serde_json::Value::String(s) => Some(s.clone()),
        other => Some(other.to_string()),
    }
}
