//! AQI severity classification.
//!
//! Breakpoints are inclusive upper bounds at 50/100/150/200/300 with an
//! unbounded top bucket. The AQI meter on the dashboard assumes the same
//! breakpoints, so they must not drift.

use serde::Serialize;

/// Upper bound of the meter scale. Readings above it pin the pointer at the end.
pub const METER_MAX_AQI: f64 = 300.0;

/// One of six ordered severity categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum AqiCategory {
    Good,
    Moderate,
    UnhealthyForSensitiveGroups,
    Unhealthy,
    VeryUnhealthy,
    Hazardous,
}

impl AqiCategory {
    /// All categories, least to most severe.
    pub const ALL: [Self; 6] = [
        Self::Good,
        Self::Moderate,
        Self::UnhealthyForSensitiveGroups,
        Self::Unhealthy,
        Self::VeryUnhealthy,
        Self::Hazardous,
    ];

    /// Classify an AQI value.
    ///
    /// Any real number is accepted. Negative values are `Good`; NaN falls
    /// through every threshold and lands on `Hazardous`.
    #[must_use]
    pub fn from_aqi(aqi: f64) -> Self {
        if aqi <= 50.0 {
            Self::Good
        } else if aqi <= 100.0 {
            Self::Moderate
        } else if aqi <= 150.0 {
            Self::UnhealthyForSensitiveGroups
        } else if aqi <= 200.0 {
            Self::Unhealthy
        } else if aqi <= 300.0 {
            Self::VeryUnhealthy
        } else {
            Self::Hazardous
        }
    }

    /// Human-readable label.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Good => "Good",
            Self::Moderate => "Moderate",
            Self::UnhealthyForSensitiveGroups => "Unhealthy for Sensitive Groups",
            Self::Unhealthy => "Unhealthy",
            Self::VeryUnhealthy => "Very Unhealthy",
            Self::Hazardous => "Hazardous",
        }
    }

    /// CSS class of the matching AQI meter segment.
    #[must_use]
    pub const fn meter_class(self) -> &'static str {
        match self {
            Self::Good => "good",
            Self::Moderate => "moderate",
            Self::UnhealthyForSensitiveGroups => "sensitive",
            Self::Unhealthy => "unhealthy",
            Self::VeryUnhealthy => "severe",
            Self::Hazardous => "hazardous",
        }
    }

    #[must_use]
    pub const fn emoji(self) -> &'static str {
        match self {
            Self::Good => "✅",
            Self::Moderate => "🟡",
            Self::UnhealthyForSensitiveGroups => "🟠",
            Self::Unhealthy => "🔴",
            Self::VeryUnhealthy => "🟣",
            Self::Hazardous => "☠️",
        }
    }

    /// Marker / badge colour used by the web UI.
    #[must_use]
    pub const fn color(self) -> &'static str {
        match self {
            Self::Good => "#10b981",
            Self::Moderate => "#eab308",
            Self::UnhealthyForSensitiveGroups => "#f97316",
            Self::Unhealthy => "#ef4444",
            Self::VeryUnhealthy => "#a855f7",
            Self::Hazardous => "#7f1d1d",
        }
    }
}

impl std::fmt::Display for AqiCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Classify an AQI value into its severity category.
#[must_use]
pub fn classify(aqi: f64) -> AqiCategory {
    AqiCategory::from_aqi(aqi)
}

/// Pointer offset on a meter of `width` units: `min(aqi / 300 * width, width)`.
///
/// Negative readings pin the pointer at the start of the meter.
#[must_use]
pub fn meter_position(aqi: f64, width: f64) -> f64 {
    (aqi / METER_MAX_AQI * width).clamp(0.0, width)
}
