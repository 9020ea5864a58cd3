//! Terminal output for the view.
//!
//! Supports human-readable (with colors) and JSON formats. Only populated
//! slots are printed.

use std::collections::BTreeMap;
use std::io::{self, Write};

use serde::Serialize;

use crate::classify::AqiCategory;
use crate::theme::Theme;
use crate::traffic::{Phase, PhaseState};
use crate::view::{MapView, MeterState, Slot, ViewState};

// ANSI color codes
const RESET: &str = "\x1b[0m";
const BOLD: &str = "\x1b[1m";
const DIM: &str = "\x1b[2m";

const GREEN: &str = "\x1b[92m";
const YELLOW: &str = "\x1b[93m";
const ORANGE: &str = "\x1b[38;5;208m";
const RED: &str = "\x1b[91m";
const PURPLE: &str = "\x1b[95m";
const MAROON: &str = "\x1b[38;5;88m";

// Traffic lamp backgrounds
const LAMP_RED: &str = "\x1b[41;97m";
const LAMP_YELLOW: &str = "\x1b[43;30m";
const LAMP_GREEN: &str = "\x1b[42;30m";

/// Output format selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Format {
    /// Human-readable terminal output (default)
    #[default]
    Human,
    /// Pretty-printed JSON object
    Json,
}

impl std::str::FromStr for Format {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "human" => Ok(Self::Human),
            "json" => Ok(Self::Json),
            _ => Err(format!("unknown format: {s} (expected: human, json)")),
        }
    }
}

fn category_color(category: AqiCategory) -> &'static str {
    match category {
        AqiCategory::Good => GREEN,
        AqiCategory::Moderate => YELLOW,
        AqiCategory::UnhealthyForSensitiveGroups => ORANGE,
        AqiCategory::Unhealthy => RED,
        AqiCategory::VeryUnhealthy => PURPLE,
        AqiCategory::Hazardous => MAROON,
    }
}

/// Serializable snapshot of everything on screen.
#[derive(Debug, Serialize)]
pub struct ViewSnapshot<'a> {
    pub fields: BTreeMap<String, &'a str>,
    pub meter: Option<MeterSnapshot>,
    pub traffic_phase: Option<&'a PhaseState>,
    pub map: &'a MapView,
}

#[derive(Debug, Serialize)]
pub struct MeterSnapshot {
    pub aqi: f64,
    pub category: &'static str,
    pub segment: &'static str,
    pub pointer: f64,
    pub width: f64,
}

impl From<&MeterState> for MeterSnapshot {
    fn from(m: &MeterState) -> Self {
        Self {
            aqi: m.aqi,
            category: m.active.label(),
            segment: m.active.meter_class(),
            pointer: m.pointer,
            width: m.width,
        }
    }
}

impl<'a> ViewSnapshot<'a> {
    #[must_use]
    pub fn new(view: &'a ViewState, map: &'a MapView) -> Self {
        Self {
            fields: view.slots().map(|(slot, text)| (slot.id(), text)).collect(),
            meter: view.meter().map(MeterSnapshot::from),
            traffic_phase: view.phase(),
            map,
        }
    }
}

/// Draw the meter as a bar of `meter.width` cells with a pointer.
fn meter_bar(meter: &MeterState) -> String {
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let cells = meter.width.round().max(1.0) as usize;
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let pointer = (meter.pointer.round() as usize).min(cells - 1);

    let mut bar = String::new();
    for cell in 0..cells {
        // Which category this cell of the 0..300 scale falls into
        #[allow(clippy::cast_precision_loss)]
        let aqi_at = (cell as f64 + 0.5) / cells as f64 * crate::classify::METER_MAX_AQI;
        let color = category_color(AqiCategory::from_aqi(aqi_at));
        let glyph = if cell == pointer { "▼" } else { "━" };
        bar.push_str(color);
        bar.push_str(glyph);
    }
    bar.push_str(RESET);
    bar
}

fn write_slot<W: Write>(writer: &mut W, view: &ViewState, slot: Slot) -> io::Result<()> {
    if let Some(text) = view.get(slot) {
        writeln!(writer, "  {DIM}{:<15}{RESET} {text}", slot.label())?;
    }
    Ok(())
}

fn write_lamps<W: Write>(writer: &mut W, phase: &PhaseState) -> io::Result<()> {
    let lamps: Vec<String> = Phase::ALL
        .iter()
        .map(|p| {
            let name = p.as_str().to_uppercase();
            if *p == phase.phase {
                let color = match p {
                    Phase::Red => LAMP_RED,
                    Phase::Yellow => LAMP_YELLOW,
                    Phase::Green => LAMP_GREEN,
                };
                format!("{color} ● {name} {RESET}")
            } else {
                format!("{DIM} ○ {name} {RESET}")
            }
        })
        .collect();
    writeln!(
        writer,
        "  {} {DIM}({}s left){RESET}",
        lamps.join(" "),
        phase.remaining_ms.div_ceil(1000)
    )
}

/// Write the view in human-readable format.
///
/// # Errors
///
/// Returns an error if writing fails.
pub fn write_human<W: Write>(writer: &mut W, view: &ViewState, map: &MapView) -> io::Result<()> {
    if let Some(aqi) = view.get(Slot::AqiValue) {
        let category = view.meter().map_or(AqiCategory::Good, |m| m.active);
        let color = category_color(category);
        writeln!(
            writer,
            "{BOLD}🌫  AQI {color}{aqi}{RESET} {BOLD}{color}{}{RESET} {}",
            category.label(),
            category.emoji()
        )?;
        write_slot(writer, view, Slot::Station)?;

        let pollutants: Vec<String> = view
            .slots()
            .filter_map(|(slot, text)| match slot {
                Slot::Pollutant(p) => Some(format!("{}: {text}", p.code())),
                _ => None,
            })
            .collect();
        let separator = format!(" {DIM}│{RESET} ");
        writeln!(writer, "  {}", pollutants.join(separator.as_str()))?;
    }

    if let Some(aqi) = view.get(Slot::PredictedAqi) {
        let category = view.get(Slot::PredictedCategory).unwrap_or("N/A");
        writeln!(writer, "{BOLD}🔮 Predicted AQI {aqi}{RESET} {DIM}│{RESET} {category}")?;
        for (slot, text) in view.slots() {
            if let Slot::PredictedPollutant(p) = slot {
                writeln!(writer, "  {DIM}{:<15}{RESET} {text}", p.code())?;
            }
        }
    }

    if view.get(Slot::WeatherTemp).is_some() {
        writeln!(writer, "{BOLD}🌤  Weather{RESET}")?;
        for slot in [
            Slot::WeatherTemp,
            Slot::WeatherDescription,
            Slot::WeatherHumidity,
            Slot::WeatherWind,
            Slot::WeatherUvi,
        ] {
            write_slot(writer, view, slot)?;
        }
    }

    if let Some(meter) = view.meter() {
        writeln!(writer, "  {}", meter_bar(meter))?;
    }

    if let Some(phase) = view.phase() {
        writeln!(writer, "{BOLD}🚦 Traffic{RESET}")?;
        write_lamps(writer, phase)?;
        for slot in [
            Slot::TrafficRed,
            Slot::TrafficYellow,
            Slot::TrafficGreen,
            Slot::TrafficDensity,
            Slot::TrafficSpeed,
            Slot::TrafficQueue,
            Slot::Recommendation,
        ] {
            write_slot(writer, view, slot)?;
        }
    }

    if let Some((lat, lon)) = map.marker {
        writeln!(writer, "  {DIM}⊕ {lat:.4}°, {lon:.4}°{RESET}")?;
    }
    Ok(())
}

/// Write the view as a JSON object.
///
/// # Errors
///
/// Returns an error if serialization or writing fails.
pub fn write_json<W: Write>(writer: &mut W, view: &ViewState, map: &MapView) -> io::Result<()> {
    let snapshot = ViewSnapshot::new(view, map);
    let json = serde_json::to_string_pretty(&snapshot)
        .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
    writeln!(writer, "{json}")
}

/// Write the view in the specified format.
///
/// # Errors
///
/// Returns an error if writing fails.
pub fn write_view<W: Write>(
    writer: &mut W,
    view: &ViewState,
    map: &MapView,
    format: Format,
) -> io::Result<()> {
    match format {
        Format::Human => write_human(writer, view, map),
        Format::Json => write_json(writer, view, map),
    }
}

/// Write alerts that did not abort the action.
///
/// # Errors
///
/// Returns an error if writing fails.
pub fn write_alerts<W: Write>(writer: &mut W, alerts: &[String]) -> io::Result<()> {
    for alert in alerts {
        writeln!(writer, "{YELLOW}⚠️  {alert}{RESET}")?;
    }
    Ok(())
}

/// Write the current theme.
///
/// # Errors
///
/// Returns an error if writing fails.
pub fn write_theme<W: Write>(writer: &mut W, theme: Theme, format: Format) -> io::Result<()> {
    match format {
        Format::Human => {
            let icon = match theme {
                Theme::Dark => "🌙",
                Theme::Light => "☀️",
            };
            writeln!(writer, "{icon} {}", theme.as_str())
        }
        Format::Json => writeln!(writer, "{{\"theme\":\"{}\"}}", theme.as_str()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{AirQualityReading, Pollutant};

    fn rendered(aqi: u32) -> ViewState {
        let mut view = ViewState::default();
        view.render_reading(
            &AirQualityReading {
                aqi,
                pollutants: Pollutant::ALL.iter().map(|p| (*p, None)).collect(),
                station: Some("Test Station".into()),
                location: None,
            },
            30.0,
        );
        view
    }

    #[test]
    fn test_format_parse() {
        assert_eq!("human".parse::<Format>().unwrap(), Format::Human);
        assert_eq!("JSON".parse::<Format>().unwrap(), Format::Json);
        assert!("ndjson".parse::<Format>().is_err());
    }

    #[test]
    fn test_human_output() {
        let view = rendered(275);
        let mut out = Vec::new();
        write_human(&mut out, &view, &MapView::default()).unwrap();
        let text = String::from_utf8(out).unwrap();

        assert!(text.contains("275"));
        assert!(text.contains("Very Unhealthy"));
        assert!(text.contains("Test Station"));
        assert!(text.contains("PM2.5: --"));
        assert_eq!(text.matches('▼').count(), 1);
    }

    #[test]
    fn test_json_output() {
        let view = rendered(42);
        let mut out = Vec::new();
        write_json(&mut out, &view, &MapView::default()).unwrap();
        let value: serde_json::Value = serde_json::from_slice(&out).unwrap();

        assert_eq!(value["fields"]["aqiValue"], "42");
        assert_eq!(value["fields"]["pm25"], "--");
        assert_eq!(value["meter"]["segment"], "good");
        assert!(value["traffic_phase"].is_null());
        assert!(value["fields"].get("weatherTemp").is_none());
    }

    #[test]
    fn test_meter_bar_clamps_pointer() {
        let meter = MeterState::new(900.0, 30.0);
        let bar = meter_bar(&meter);
        assert_eq!(bar.matches('▼').count(), 1);
        assert!(bar.ends_with(&format!("▼{RESET}")));
    }

    #[test]
    fn test_theme_json() {
        let mut out = Vec::new();
        write_theme(&mut out, Theme::Dark, Format::Json).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "{\"theme\":\"dark\"}\n");
    }
}
