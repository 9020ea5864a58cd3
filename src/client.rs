//! Remote query client for the WAQI feed and the prediction backend.
//!
//! Provides blocking HTTP access, one request per user action.
//! Uses reqwest with rustls for TLS. Nothing is retried.

use std::time::Duration;

use reqwest::{StatusCode, Url};
use reqwest::blocking::{Client, Response};
use tracing::{debug, instrument};

use crate::errors::AqiError;
use crate::models::{
    AirQualityReading, FeedResponse, Prediction, TrafficReport, TrafficRequest, TrafficResponse,
};

/// Default request timeout in seconds.
const REQUEST_TIMEOUT_SECS: u64 = 10;

/// User agent string for API requests.
const USER_AGENT: &str = concat!("aqiwatch/", env!("CARGO_PKG_VERSION"));

/// WAQI base URL.
pub const WAQI_BASE_URL: &str = "https://api.waqi.info";

/// WAQI's public demo token, enough for a handful of lookups.
pub const WAQI_DEMO_TOKEN: &str = "demo";

/// Where the prediction backend listens by default.
pub const BACKEND_BASE_URL: &str = "http://127.0.0.1:5000";

/// The three calls the view controller can make.
pub trait QueryClient {
    /// Look up the current AQI for a city.
    fn fetch_city(&self, city: &str) -> Result<AirQualityReading, AqiError>;

    /// Ask the backend for a prediction.
    fn predict(&self, city: &str) -> Result<Prediction, AqiError>;

    /// Ask the backend for traffic timings at a location.
    fn traffic(&self, request: &TrafficRequest) -> Result<TrafficReport, AqiError>;
}

/// Endpoint configuration.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub waqi_url: String,
    pub token: String,
    pub backend_url: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            waqi_url: WAQI_BASE_URL.to_string(),
            token: WAQI_DEMO_TOKEN.to_string(),
            backend_url: BACKEND_BASE_URL.to_string(),
        }
    }
}

/// HTTP client for WAQI and the prediction backend.
pub struct AqiClient {
    client: Client,
    config: ClientConfig,
}

impl AqiClient {
    /// Create a new client.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be initialized.
    pub fn new(config: ClientConfig) -> Result<Self, AqiError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .user_agent(USER_AGENT)
            .build()?;

        Ok(Self { client, config })
    }

    /// `{waqi}/feed/{city}/?token={token}` with the city percent-encoded.
    fn feed_url(&self, city: &str) -> Result<Url, AqiError> {
        let mut url = Url::parse(&self.config.waqi_url)
            .map_err(|e| AqiError::Url(format!("{}: {e}", self.config.waqi_url)))?;
        url.path_segments_mut()
            .map_err(|()| AqiError::Url(format!("{} cannot be a base", self.config.waqi_url)))?
            .pop_if_empty()
            .extend(["feed", city, ""]);
        url.query_pairs_mut().append_pair("token", &self.config.token);
        Ok(url)
    }

    fn backend_url(&self, path: &str) -> Result<Url, AqiError> {
        let base = Url::parse(&self.config.backend_url)
            .map_err(|e| AqiError::Url(format!("{}: {e}", self.config.backend_url)))?;
        base.join(path)
            .map_err(|e| AqiError::Url(format!("{path}: {e}")))
    }
}

/// Reject non-success statuses before parsing.
fn check_status(service: &'static str, status: StatusCode, body: &str) -> Result<(), AqiError> {
    if status.is_success() {
        return Ok(());
    }
    Err(AqiError::Api {
        service,
        status: status.as_u16(),
        message: body.to_string(),
    })
}

/// Read status and body in one go.
fn read_response(response: Response) -> Result<(StatusCode, String), AqiError> {
    let status = response.status();
    Ok((status, response.text()?))
}

/// Interpret a `/predict` reply.
///
/// The backend reports unknown cities as a JSON error body, sometimes with a
/// 4xx status; its message wins over the bare status.
fn prediction_from(status: StatusCode, body: &str) -> Result<Prediction, AqiError> {
    let parsed = serde_json::from_str::<Prediction>(body);
    if !status.is_success() && !matches!(&parsed, Ok(p) if p.error.is_some()) {
        return Err(AqiError::Api {
            service: "prediction backend",
            status: status.as_u16(),
            message: body.to_string(),
        });
    }
    parsed?.into_result()
}

impl QueryClient for AqiClient {
    #[instrument(skip(self))]
    fn fetch_city(&self, city: &str) -> Result<AirQualityReading, AqiError> {
        let url = self.feed_url(city)?;
        debug!("fetching feed from {}/feed/{}/", self.config.waqi_url, city);

        let (status, body) = read_response(self.client.get(url).send()?)?;
        check_status("WAQI", status, &body)?;
        let feed: FeedResponse = serde_json::from_str(&body)?;
        let reading = feed.into_reading()?;

        debug!(aqi = reading.aqi, "fetched reading");
        Ok(reading)
    }

    #[instrument(skip(self))]
    fn predict(&self, city: &str) -> Result<Prediction, AqiError> {
        let url = self.backend_url("/predict")?;
        debug!("posting prediction request to {}", url);

        let (status, body) = read_response(self.client.post(url).form(&[("city", city)]).send()?)?;
        prediction_from(status, &body)
    }

    #[instrument(skip(self))]
    fn traffic(&self, request: &TrafficRequest) -> Result<TrafficReport, AqiError> {
        let url = self.backend_url("/traffic-data")?;
        debug!("posting traffic request to {}", url);

        let (status, body) = read_response(self.client.post(url).json(request).send()?)?;
        check_status("traffic backend", status, &body)?;
        let traffic: TrafficResponse = serde_json::from_str(&body)?;
        traffic.into_report()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client(waqi_url: &str, backend_url: &str) -> AqiClient {
        AqiClient::new(ClientConfig {
            waqi_url: waqi_url.to_string(),
            token: "secret".to_string(),
            backend_url: backend_url.to_string(),
        })
        .expect("failed to build client")
    }

    #[test]
    fn test_feed_url_encodes_city() {
        let c = client("https://api.waqi.info", BACKEND_BASE_URL);
        let url = c.feed_url("New Delhi").unwrap();
        assert_eq!(
            url.as_str(),
            "https://api.waqi.info/feed/New%20Delhi/?token=secret"
        );
    }

    #[test]
    fn test_feed_url_with_trailing_slash_base() {
        let c = client("https://api.waqi.info/", BACKEND_BASE_URL);
        let url = c.feed_url("Delhi").unwrap();
        assert_eq!(url.as_str(), "https://api.waqi.info/feed/Delhi/?token=secret");
    }

    #[test]
    fn test_backend_urls() {
        let c = client(WAQI_BASE_URL, "http://localhost:5000");
        assert_eq!(
            c.backend_url("/predict").unwrap().as_str(),
            "http://localhost:5000/predict"
        );
        assert_eq!(
            c.backend_url("/traffic-data").unwrap().as_str(),
            "http://localhost:5000/traffic-data"
        );
    }

    #[test]
    fn test_invalid_base_url() {
        let c = client("not a url", BACKEND_BASE_URL);
        assert!(matches!(c.feed_url("Delhi"), Err(AqiError::Url(_))));
    }

    #[test]
    fn test_check_status() {
        assert!(check_status("WAQI", StatusCode::OK, "{}").is_ok());

        let err = check_status("WAQI", StatusCode::SERVICE_UNAVAILABLE, "down").unwrap_err();
        match err {
            AqiError::Api {
                service,
                status,
                message,
            } => {
                assert_eq!(service, "WAQI");
                assert_eq!(status, 503);
                assert_eq!(message, "down");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_prediction_error_body_with_4xx() {
        let err = prediction_from(StatusCode::NOT_FOUND, r#"{"error": "City not found"}"#)
            .unwrap_err();
        assert!(matches!(&err, AqiError::Upstream(m) if m == "City not found"));
        assert_eq!(err.to_string(), "City not found");
    }

    #[test]
    fn test_prediction_plain_4xx() {
        let err = prediction_from(StatusCode::BAD_REQUEST, "<html>Bad Request</html>").unwrap_err();
        assert!(matches!(
            err,
            AqiError::Api {
                status: 400,
                ..
            }
        ));
    }

    #[test]
    fn test_prediction_error_body_with_2xx() {
        let err = prediction_from(StatusCode::OK, r#"{"error": "Model unavailable"}"#).unwrap_err();
        assert!(matches!(err, AqiError::Upstream(m) if m == "Model unavailable"));
    }

    #[test]
    fn test_prediction_success() {
        let prediction = prediction_from(StatusCode::OK, r#"{"AQI": 88.0, "PM2.5": 31.5}"#).unwrap();
        assert_eq!(prediction.aqi, Some(88.0));
    }

    #[test]
    fn test_prediction_garbage_2xx() {
        let err = prediction_from(StatusCode::OK, "not json").unwrap_err();
        assert!(matches!(err, AqiError::Parse(_)));
    }
}
