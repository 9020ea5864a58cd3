//! View model: fixed display slots, the AQI meter, the traffic light and the map.
//!
//! Renderers only ever write into slots. A slot that was never written is
//! left alone by every output surface, which is how partially populated
//! payloads avoid clobbering what is already on screen.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::classify::{AqiCategory, classify, meter_position};
use crate::models::{AirQualityReading, Pollutant, Prediction, TrafficReport, display_value};
use crate::traffic::{Phase, PhaseState};

/// Placeholder for absent WAQI sub-indices.
pub const READING_PLACEHOLDER: &str = "--";

/// Placeholder for absent prediction, weather and traffic fields.
pub const PREDICTION_PLACEHOLDER: &str = "N/A";

/// Initial map centre (India) and zoom.
pub const DEFAULT_CENTER: (f64, f64) = (20.5937, 78.9629);
pub const DEFAULT_ZOOM: u8 = 5;

/// Zoom used when focusing a single city.
pub const CITY_ZOOM: u8 = 10;

/// A fixed display location.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Slot {
    AqiValue,
    QualityStatus,
    Station,
    Pollutant(Pollutant),
    PredictedAqi,
    PredictedCategory,
    PredictedPollutant(Pollutant),
    WeatherTemp,
    WeatherDescription,
    WeatherHumidity,
    WeatherWind,
    WeatherUvi,
    TrafficRed,
    TrafficYellow,
    TrafficGreen,
    TrafficDensity,
    TrafficSpeed,
    TrafficQueue,
    Recommendation,
}

impl Slot {
    /// Element id of the slot on the dashboard.
    #[must_use]
    pub fn id(self) -> String {
        match self {
            Self::AqiValue => "aqiValue".into(),
            Self::QualityStatus => "qualityStatus".into(),
            Self::Station => "station".into(),
            Self::Pollutant(p) => p.iaqi_key().into(),
            Self::PredictedAqi => "predAqi".into(),
            Self::PredictedCategory => "predCategory".into(),
            Self::PredictedPollutant(p) => format!("pred-{}", p.iaqi_key()),
            Self::WeatherTemp => "weatherTemp".into(),
            Self::WeatherDescription => "weatherDesc".into(),
            Self::WeatherHumidity => "weatherHumidity".into(),
            Self::WeatherWind => "weatherWind".into(),
            Self::WeatherUvi => "weatherUvi".into(),
            Self::TrafficRed => "redTime".into(),
            Self::TrafficYellow => "yellowTime".into(),
            Self::TrafficGreen => "greenTime".into(),
            Self::TrafficDensity => "trafficDensity".into(),
            Self::TrafficSpeed => "trafficSpeed".into(),
            Self::TrafficQueue => "trafficQueue".into(),
            Self::Recommendation => "recommendation".into(),
        }
    }

    /// Label shown next to the value.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::AqiValue | Self::PredictedAqi => "AQI",
            Self::QualityStatus | Self::PredictedCategory => "Air Quality",
            Self::Station => "Station",
            Self::Pollutant(p) | Self::PredictedPollutant(p) => p.code(),
            Self::WeatherTemp => "Temperature",
            Self::WeatherDescription => "Conditions",
            Self::WeatherHumidity => "Humidity",
            Self::WeatherWind => "Wind",
            Self::WeatherUvi => "UV Index",
            Self::TrafficRed => "Red",
            Self::TrafficYellow => "Yellow",
            Self::TrafficGreen => "Green",
            Self::TrafficDensity => "Density",
            Self::TrafficSpeed => "Speed",
            Self::TrafficQueue => "Queue",
            Self::Recommendation => "Recommendation",
        }
    }
}

/// AQI meter: one active segment plus a pointer offset.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct MeterState {
    pub aqi: f64,
    pub active: AqiCategory,
    pub pointer: f64,
    pub width: f64,
}

impl MeterState {
    #[must_use]
    pub fn new(aqi: f64, width: f64) -> Self {
        Self {
            aqi,
            active: classify(aqi),
            pointer: meter_position(aqi, width),
            width,
        }
    }

    /// Whether `category`'s segment carries the active class.
    #[must_use]
    pub fn is_active(&self, category: AqiCategory) -> bool {
        self.active == category
    }
}

/// Map centre and marker.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct MapView {
    pub center: (f64, f64),
    pub zoom: u8,
    pub marker: Option<(f64, f64)>,
}

impl Default for MapView {
    fn default() -> Self {
        Self {
            center: DEFAULT_CENTER,
            zoom: DEFAULT_ZOOM,
            marker: None,
        }
    }
}

impl MapView {
    pub fn set_center(&mut self, lat: f64, lon: f64, zoom: u8) {
        self.center = (lat, lon);
        self.zoom = zoom;
    }

    /// Move the single marker, creating it on first use.
    pub fn set_marker(&mut self, lat: f64, lon: f64) {
        self.marker = Some((lat, lon));
    }
}

/// Everything currently on screen.
#[derive(Debug, Clone, Default)]
pub struct ViewState {
    slots: BTreeMap<Slot, String>,
    meter: Option<MeterState>,
    phase: Option<PhaseState>,
}

impl ViewState {
    #[must_use]
    pub fn get(&self, slot: Slot) -> Option<&str> {
        self.slots.get(&slot).map(String::as_str)
    }

    /// Populated slots in display order.
    pub fn slots(&self) -> impl Iterator<Item = (Slot, &str)> {
        self.slots.iter().map(|(k, v)| (*k, v.as_str()))
    }

    #[must_use]
    pub fn meter(&self) -> Option<&MeterState> {
        self.meter.as_ref()
    }

    #[must_use]
    pub fn phase(&self) -> Option<&PhaseState> {
        self.phase.as_ref()
    }

    /// Whether `phase`'s lamp carries the active class.
    #[must_use]
    pub fn is_phase_active(&self, phase: Phase) -> bool {
        self.phase.is_some_and(|p| p.phase == phase)
    }

    fn write(&mut self, slot: Slot, value: impl Into<String>) {
        self.slots.insert(slot, value.into());
    }

    /// Render a WAQI reading into the lookup panel and the meter.
    pub fn render_reading(&mut self, reading: &AirQualityReading, meter_width: f64) {
        let aqi = f64::from(reading.aqi);
        self.write(Slot::AqiValue, reading.aqi.to_string());
        self.write(Slot::QualityStatus, classify(aqi).label());
        if let Some(station) = &reading.station {
            self.write(Slot::Station, station.clone());
        }

        for pollutant in Pollutant::ALL {
            let text = reading
                .pollutant(pollutant)
                .map_or_else(|| READING_PLACEHOLDER.to_string(), |v| v.to_string());
            self.write(Slot::Pollutant(pollutant), text);
        }

        self.meter = Some(MeterState::new(aqi, meter_width));
    }

    /// Render a prediction. Weather slots are left alone when the payload
    /// carries no weather block.
    pub fn render_prediction(&mut self, prediction: &Prediction, meter_width: f64) {
        self.write(
            Slot::PredictedAqi,
            prediction
                .aqi
                .map_or_else(|| PREDICTION_PLACEHOLDER.to_string(), |v| format!("{v:.0}")),
        );

        let category = prediction
            .aqi_category
            .clone()
            .or_else(|| prediction.aqi.map(|v| classify(v).label().to_string()))
            .unwrap_or_else(|| PREDICTION_PLACEHOLDER.to_string());
        self.write(Slot::PredictedCategory, category);

        for pollutant in Pollutant::PREDICTED {
            self.write(
                Slot::PredictedPollutant(pollutant),
                one_decimal(prediction.pollutant(pollutant)),
            );
        }

        if let Some(weather) = &prediction.weather {
            self.write(
                Slot::WeatherTemp,
                weather
                    .temp
                    .map_or_else(|| PREDICTION_PLACEHOLDER.to_string(), |t| format!("{t:.1}°C")),
            );
            self.write(
                Slot::WeatherDescription,
                weather
                    .description
                    .clone()
                    .unwrap_or_else(|| PREDICTION_PLACEHOLDER.to_string()),
            );
            self.write(
                Slot::WeatherHumidity,
                weather
                    .humidity
                    .map_or_else(|| PREDICTION_PLACEHOLDER.to_string(), |h| format!("{h}%")),
            );
            self.write(
                Slot::WeatherWind,
                weather
                    .wind_speed
                    .map_or_else(|| PREDICTION_PLACEHOLDER.to_string(), |w| format!("{w:.1} m/s")),
            );
            self.write(Slot::WeatherUvi, one_decimal(weather.uvi));
        }

        if let Some(aqi) = prediction.aqi {
            self.meter = Some(MeterState::new(aqi, meter_width));
        }
    }

    /// Render traffic timings and mark the phase active at `now_ms`.
    pub fn render_traffic(&mut self, report: &TrafficReport, now_ms: u64) {
        let timings = report.timings;
        self.write(Slot::TrafficRed, format!("{}s", timings.red));
        self.write(Slot::TrafficYellow, format!("{}s", timings.yellow));
        self.write(Slot::TrafficGreen, format!("{}s", timings.green));

        let data = &report.traffic_data;
        for (slot, value) in [
            (Slot::TrafficDensity, &data.density),
            (Slot::TrafficSpeed, &data.speed),
            (Slot::TrafficQueue, &data.queue),
        ] {
            self.write(
                slot,
                display_value(value).unwrap_or_else(|| PREDICTION_PLACEHOLDER.to_string()),
            );
        }
        self.write(
            Slot::Recommendation,
            report
                .recommendation
                .clone()
                .unwrap_or_else(|| PREDICTION_PLACEHOLDER.to_string()),
        );

        self.phase = Some(timings.phase_at(now_ms));
    }
}

fn one_decimal(value: Option<f64>) -> String {
    value.map_or_else(|| PREDICTION_PLACEHOLDER.to_string(), |v| format!("{v:.1}"))
}
