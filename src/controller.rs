//! View controller: wires a user action to one query and one render.
//!
//! The controller owns the map and the view state and gets its query client
//! and notifier at construction. A failed action sends exactly one
//! notification and leaves the view as it was.

use std::cell::RefCell;

use tracing::{debug, info};

use crate::client::QueryClient;
use crate::errors::AqiError;
use crate::models::TrafficRequest;
use crate::view::{CITY_ZOOM, MapView, ViewState};

/// User-visible alert sink.
pub trait Notifier {
    fn alert(&self, message: &str);
}

impl<N: Notifier + ?Sized> Notifier for &N {
    fn alert(&self, message: &str) {
        (**self).alert(message);
    }
}

/// Notifier that keeps alerts for the caller to display.
#[derive(Debug, Default)]
pub struct AlertLog {
    alerts: RefCell<Vec<String>>,
}

impl AlertLog {
    #[must_use]
    pub fn take(&self) -> Vec<String> {
        self.alerts.take()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.alerts.borrow().is_empty()
    }
}

impl Notifier for AlertLog {
    fn alert(&self, message: &str) {
        self.alerts.borrow_mut().push(message.to_string());
    }
}

/// Trim a city name, rejecting blanks.
pub fn validate_city(input: &str) -> Result<&str, AqiError> {
    let city = input.trim();
    if city.is_empty() {
        return Err(AqiError::EmptyCity);
    }
    Ok(city)
}

pub struct ViewController<C, N> {
    client: C,
    notifier: N,
    map: MapView,
    view: ViewState,
    meter_width: f64,
}

impl<C: QueryClient, N: Notifier> ViewController<C, N> {
    #[must_use]
    pub fn new(client: C, notifier: N, meter_width: f64) -> Self {
        Self {
            client,
            notifier,
            map: MapView::default(),
            view: ViewState::default(),
            meter_width,
        }
    }

    #[must_use]
    pub fn state(&self) -> &ViewState {
        &self.view
    }

    #[must_use]
    pub fn map(&self) -> &MapView {
        &self.map
    }

    pub fn set_center(&mut self, lat: f64, lon: f64, zoom: u8) {
        self.map.set_center(lat, lon, zoom);
    }

    pub fn set_marker(&mut self, lat: f64, lon: f64) {
        self.map.set_marker(lat, lon);
    }

    /// Report a failure once and hand it back.
    fn fail(&self, err: AqiError) -> AqiError {
        debug!("{err}");
        self.notifier.alert(&err.to_string());
        err
    }

    fn focus(&mut self, (lat, lon): (f64, f64)) {
        self.set_center(lat, lon, CITY_ZOOM);
        self.set_marker(lat, lon);
    }

    /// Look up the current AQI for `input` and render it.
    pub fn lookup(&mut self, input: &str) -> Result<(), AqiError> {
        let city = validate_city(input).map_err(|e| self.fail(e))?;
        let reading = self.client.fetch_city(city).map_err(|e| self.fail(e))?;

        info!(city, aqi = reading.aqi, "air quality lookup");
        self.view.render_reading(&reading, self.meter_width);
        if let Some(location) = reading.location {
            self.focus(location);
        }
        Ok(())
    }

    /// Request a prediction for `input`, then traffic timings for its location.
    ///
    /// A traffic failure is reported but keeps the rendered prediction.
    pub fn predict(&mut self, input: &str, now_ms: u64) -> Result<(), AqiError> {
        let city = validate_city(input).map_err(|e| self.fail(e))?;
        let prediction = self.client.predict(city).map_err(|e| self.fail(e))?;

        info!(city, aqi = ?prediction.aqi, "prediction received");
        self.view.render_prediction(&prediction, self.meter_width);

        let Some((latitude, longitude)) = prediction.location() else {
            return Ok(());
        };
        self.focus((latitude, longitude));

        let Some(aqi) = prediction.aqi else {
            return Ok(());
        };
        let request = TrafficRequest {
            latitude,
            longitude,
            aqi,
        };
        match self.client.traffic(&request) {
            Ok(report) => self.view.render_traffic(&report, now_ms),
            Err(e) => {
                self.fail(e);
            }
        }
        Ok(())
    }
}
