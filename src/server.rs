//! Web server for the aqiwatch dashboard.
//!
//! Provides a city air-quality dashboard using:
//! - Axum for HTTP server
//! - HTMX out-of-band swaps so each response only touches the slots it rendered
//! - Leaflet for the map, driven by `HX-Trigger` events
//! - Material Design 3 inspired styling with a light/dark theme

use axum::{
    Form, Router,
    extract::State,
    http::{HeaderMap, HeaderValue},
    response::{Html, IntoResponse, Response},
    routing::{get, post},
};
use serde::Deserialize;
use serde_json::json;

use crate::classify::AqiCategory;
use crate::client::{AqiClient, ClientConfig};
use crate::controller::{AlertLog, ViewController};
use crate::models::PRESET_CITIES;
use crate::traffic::Phase;
use crate::view::{DEFAULT_CENTER, DEFAULT_ZOOM, MapView, ViewState};

/// The dashboard meter is laid out in percent.
const METER_WIDTH_PERCENT: f64 = 100.0;

const HX_TRIGGER: &str = "hx-trigger";
const HX_RESWAP: &str = "hx-reswap";

/// Server configuration.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub port: u16,
    pub host: String,
    pub client: ClientConfig,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: 8080,
            host: "127.0.0.1".to_string(),
            client: ClientConfig::default(),
        }
    }
}

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    config: ServerConfig,
}

/// Create the Axum router with all routes.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(index_handler))
        .route("/lookup", post(lookup_handler))
        .route("/predict", post(predict_handler))
        .route("/health", get(health_handler))
        .with_state(state)
}

/// Start the web server.
pub async fn run_server(config: ServerConfig) -> anyhow::Result<()> {
    let state = AppState {
        config: config.clone(),
    };

    let app = create_router(state);

    let addr = format!("{}:{}", config.host, config.port);
    tracing::info!("🌫 aqiwatch UI starting at http://{}", addr);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

// ============================================================================
// Actions
// ============================================================================

#[derive(Debug, Clone, Copy)]
enum Action {
    Lookup,
    Predict,
}

#[derive(Debug, Deserialize)]
struct CityForm {
    #[serde(default)]
    city: String,
}

/// What one action left on screen.
#[derive(Debug)]
struct Rendered {
    view: ViewState,
    map: MapView,
    alerts: Vec<String>,
    failed: bool,
}

impl Rendered {
    fn failure(message: String) -> Self {
        Self {
            view: ViewState::default(),
            map: MapView::default(),
            alerts: vec![message],
            failed: true,
        }
    }
}

fn now_ms() -> u64 {
    u64::try_from(chrono::Utc::now().timestamp_millis()).unwrap_or(0)
}

/// Run one action against a fresh controller. Blocking.
fn run_action(config: ClientConfig, action: Action, city: &str) -> Rendered {
    let client = match AqiClient::new(config) {
        Ok(c) => c,
        Err(e) => {
            tracing::error!("Failed to create client: {}", e);
            return Rendered::failure(e.to_string());
        }
    };

    let alerts = AlertLog::default();
    let mut controller = ViewController::new(client, &alerts, METER_WIDTH_PERCENT);
    let outcome = match action {
        Action::Lookup => controller.lookup(city),
        Action::Predict => controller.predict(city, now_ms()),
    };

    Rendered {
        view: controller.state().clone(),
        map: *controller.map(),
        alerts: alerts.take(),
        failed: outcome.is_err(),
    }
}

async fn dispatch(state: AppState, action: Action, city: String) -> Response {
    let config = state.config.client.clone();
    let rendered = tokio::task::spawn_blocking(move || run_action(config, action, &city))
        .await
        .unwrap_or_else(|e| {
            tracing::error!("Action task failed: {}", e);
            Rendered::failure("Internal error, please try again.".to_string())
        });

    fragment_response(&rendered)
}

// ============================================================================
// Fragments
// ============================================================================

/// Escape text for HTML content and attribute values.
fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// Serialize to JSON using only ASCII so it fits in a header value.
fn ascii_json(value: &serde_json::Value) -> String {
    let mut out = String::new();
    for c in value.to_string().chars() {
        if c.is_ascii() {
            out.push(c);
        } else {
            let mut buf = [0u16; 2];
            for unit in c.encode_utf16(&mut buf) {
                out.push_str(&format!("\\u{unit:04x}"));
            }
        }
    }
    out
}

/// Out-of-band swaps for every populated slot, meter segment and lamp.
fn render_fragment(view: &ViewState) -> String {
    let mut parts = Vec::new();

    for (slot, text) in view.slots() {
        parts.push(format!(
            r#"<span id="{}" hx-swap-oob="innerHTML">{}</span>"#,
            slot.id(),
            escape_html(text)
        ));
    }

    if let Some(meter) = view.meter() {
        for category in AqiCategory::ALL {
            let active = if meter.is_active(category) { " active" } else { "" };
            parts.push(format!(
                r#"<div id="meter-{class}" class="meter-segment {class}{active}" hx-swap-oob="true"></div>"#,
                class = category.meter_class(),
            ));
        }
        parts.push(format!(
            r#"<div id="meter-pointer" class="meter-pointer" style="left: {:.1}%; border-top-color: {}" hx-swap-oob="true"></div>"#,
            meter.pointer,
            meter.active.color()
        ));
    }

    if view.phase().is_some() {
        for phase in Phase::ALL {
            let active = if view.is_phase_active(phase) { " active" } else { "" };
            parts.push(format!(
                r#"<div id="light-{name}" class="light {name}{active}" hx-swap-oob="true"></div>"#,
                name = phase.as_str(),
            ));
        }
    }

    parts.join("\n")
}

/// Client-side events for the page: alerts and map moves.
fn render_triggers(rendered: &Rendered) -> Option<String> {
    let mut triggers = serde_json::Map::new();

    if !rendered.alerts.is_empty() {
        triggers.insert(
            "aqiAlert".into(),
            json!({ "message": rendered.alerts.join("\n") }),
        );
    }

    if !rendered.failed {
        if let Some((lat, lon)) = rendered.map.marker {
            let color = rendered
                .view
                .meter()
                .map_or("#6b7280", |m| m.active.color());
            triggers.insert(
                "aqiMap".into(),
                json!({
                    "lat": lat,
                    "lon": lon,
                    "zoom": rendered.map.zoom,
                    "color": color,
                }),
            );
        }
    }

    if triggers.is_empty() {
        None
    } else {
        Some(ascii_json(&serde_json::Value::Object(triggers)))
    }
}

fn fragment_response(rendered: &Rendered) -> Response {
    let mut headers = HeaderMap::new();

    if let Some(trigger) = render_triggers(rendered) {
        match HeaderValue::from_str(&trigger) {
            Ok(value) => {
                headers.insert(HX_TRIGGER, value);
            }
            Err(e) => tracing::warn!("dropping HX-Trigger header: {}", e),
        }
    }

    // Failed actions leave the page exactly as it was
    if rendered.failed {
        headers.insert(HX_RESWAP, HeaderValue::from_static("none"));
        return (headers, Html(String::new())).into_response();
    }

    (headers, Html(render_fragment(&rendered.view))).into_response()
}

fn index_html() -> String {
    let options: String = PRESET_CITIES
        .iter()
        .map(|c| format!(r#"<option value="{c}"></option>"#))
        .collect();

    INDEX_HTML
        .replace("{{city_options}}", &options)
        .replace("{{center_lat}}", &DEFAULT_CENTER.0.to_string())
        .replace("{{center_lon}}", &DEFAULT_CENTER.1.to_string())
        .replace("{{zoom}}", &DEFAULT_ZOOM.to_string())
        .replace("{{version}}", env!("CARGO_PKG_VERSION"))
}

// ============================================================================
// Route Handlers
// ============================================================================

/// Main page handler - serves the HTML UI.
async fn index_handler() -> Html<String> {
    Html(index_html())
}

/// Current AQI lookup via WAQI.
async fn lookup_handler(State(state): State<AppState>, Form(form): Form<CityForm>) -> Response {
    tracing::debug!(city = %form.city, "lookup requested via UI");
    dispatch(state, Action::Lookup, form.city).await
}

/// Prediction plus traffic via the backend.
async fn predict_handler(State(state): State<AppState>, Form(form): Form<CityForm>) -> Response {
    tracing::debug!(city = %form.city, "prediction requested via UI");
    dispatch(state, Action::Predict, form.city).await
}

/// Health check endpoint.
async fn health_handler() -> &'static str {
    "OK"
}

// ============================================================================
// HTML Template (embedded for single-binary deployment)
// ============================================================================

const INDEX_HTML: &str = r##"<!DOCTYPE html>
<html lang="en" data-theme="light">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>aqiwatch — City Air Quality</title>

    <!-- Modern Font -->
    <link rel="preconnect" href="https://fonts.googleapis.com">
    <link rel="preconnect" href="https://fonts.gstatic.com" crossorigin>
    <link href="https://fonts.googleapis.com/css2?family=Inter:wght@400;500;600;700&display=swap" rel="stylesheet">

    <!-- HTMX -->
    <script src="https://unpkg.com/htmx.org@1.9.10"></script>

    <!-- Leaflet -->
    <link rel="stylesheet" href="https://unpkg.com/leaflet@1.9.4/dist/leaflet.css" />
    <script src="https://unpkg.com/leaflet@1.9.4/dist/leaflet.js"></script>

    <style>
        :root {
            --font: 'Inter', -apple-system, BlinkMacSystemFont, sans-serif;

            /* Light Theme */
            --bg-primary: #ffffff;
            --bg-secondary: #f8fafc;
            --bg-tertiary: #f1f5f9;
            --text-primary: #0f172a;
            --text-secondary: #475569;
            --text-tertiary: #94a3b8;
            --border: #e2e8f0;
            --accent: #6366f1;
            --radius-sm: 6px;
            --radius-md: 10px;
            --radius-lg: 14px;
        }

        [data-theme="dark"] {
            --bg-primary: #0b0d12;
            --bg-secondary: #12151c;
            --bg-tertiary: #1a1e27;
            --text-primary: #f1f5f9;
            --text-secondary: #cbd5e1;
            --text-tertiary: #64748b;
            --border: #262b36;
            --accent: #818cf8;
        }

        * { box-sizing: border-box; margin: 0; padding: 0; }

        body {
            font-family: var(--font);
            background: var(--bg-secondary);
            color: var(--text-primary);
            transition: background 0.2s, color 0.2s;
        }

        /* ===== HEADER ===== */
        .header {
            background: var(--bg-primary);
            border-bottom: 1px solid var(--border);
        }

        .header-inner {
            max-width: 1200px;
            margin: 0 auto;
            padding: 1rem 1.5rem;
            display: flex;
            align-items: center;
            justify-content: space-between;
        }

        .logo { font-weight: 700; font-size: 1.125rem; color: var(--text-primary); text-decoration: none; }

        .theme-toggle {
            width: 36px;
            height: 36px;
            border-radius: var(--radius-sm);
            border: 1px solid var(--border);
            background: var(--bg-tertiary);
            cursor: pointer;
            font-size: 1rem;
        }

        .theme-toggle:hover { border-color: var(--accent); }

        /* ===== LAYOUT ===== */
        .main {
            max-width: 1200px;
            margin: 0 auto;
            padding: 1.5rem;
            display: grid;
            grid-template-columns: 1.2fr 1fr;
            gap: 1.25rem;
        }

        .card {
            background: var(--bg-primary);
            border: 1px solid var(--border);
            border-radius: var(--radius-lg);
            padding: 1.25rem;
        }

        .card h2 {
            font-size: 0.875rem;
            font-weight: 600;
            text-transform: uppercase;
            letter-spacing: 0.05em;
            color: var(--text-tertiary);
            margin-bottom: 0.75rem;
        }

        #map { height: 420px; border-radius: var(--radius-md); }

        /* ===== FORMS ===== */
        .city-form { display: flex; gap: 0.5rem; margin-bottom: 1rem; }

        .city-form input {
            flex: 1;
            padding: 0.5rem 0.75rem;
            border-radius: var(--radius-sm);
            border: 1px solid var(--border);
            background: var(--bg-secondary);
            color: var(--text-primary);
            font: inherit;
        }

        .btn {
            padding: 0.5rem 1rem;
            border-radius: var(--radius-sm);
            border: none;
            background: var(--accent);
            color: white;
            font-weight: 600;
            cursor: pointer;
        }

        /* ===== VALUES ===== */
        .aqi-headline { font-size: 2rem; font-weight: 700; }
        .aqi-status { color: var(--text-secondary); margin-bottom: 0.75rem; }

        .pill-grid {
            display: grid;
            grid-template-columns: repeat(4, 1fr);
            gap: 0.5rem;
        }

        .pill {
            padding: 0.375rem 0.5rem;
            border-radius: var(--radius-sm);
            background: var(--bg-tertiary);
            border: 1px solid var(--border);
            font-size: 0.8125rem;
        }

        .pill .code { color: var(--text-tertiary); margin-right: 0.25rem; }

        /* ===== AQI METER ===== */
        .meter { position: relative; display: flex; height: 12px; margin: 1.25rem 0 0.5rem; }
        .meter-segment { flex: 1; opacity: 0.35; transition: opacity 0.2s; }
        .meter-segment.active { opacity: 1; outline: 2px solid var(--text-primary); }
        .meter-segment.good { background: #10b981; border-radius: 6px 0 0 6px; }
        .meter-segment.moderate { background: #eab308; }
        .meter-segment.sensitive { background: #f97316; }
        .meter-segment.unhealthy { background: #ef4444; }
        .meter-segment.severe { background: #a855f7; }
        .meter-segment.hazardous { background: #7f1d1d; border-radius: 0 6px 6px 0; }

        .meter-pointer {
            position: absolute;
            top: -10px;
            width: 0;
            height: 0;
            margin-left: -6px;
            border-left: 6px solid transparent;
            border-right: 6px solid transparent;
            border-top: 8px solid var(--text-primary);
            transition: left 0.3s;
        }

        /* ===== TRAFFIC LIGHT ===== */
        .traffic { display: flex; gap: 1.25rem; align-items: center; }

        .traffic-light {
            display: flex;
            flex-direction: column;
            gap: 0.375rem;
            padding: 0.5rem;
            background: #111827;
            border-radius: var(--radius-md);
        }

        .light { width: 28px; height: 28px; border-radius: 50%; opacity: 0.2; }
        .light.red { background: #ef4444; }
        .light.yellow { background: #eab308; }
        .light.green { background: #10b981; }
        .light.active { opacity: 1; box-shadow: 0 0 12px currentColor; }

        .kv { font-size: 0.875rem; color: var(--text-secondary); line-height: 1.7; }
        .kv b { color: var(--text-primary); font-weight: 500; }

        /* ===== FOOTER ===== */
        .footer {
            border-top: 1px solid var(--border);
            padding: 1.5rem;
            text-align: center;
            font-size: 0.8125rem;
            color: var(--text-tertiary);
        }

        .footer a { color: var(--text-secondary); text-decoration: none; }
        .footer a:hover { color: var(--accent); }

        /* ===== RESPONSIVE ===== */
        @media (max-width: 900px) {
            .main { grid-template-columns: 1fr; }
            .pill-grid { grid-template-columns: repeat(2, 1fr); }
        }
    </style>
</head>
<body>
    <header class="header">
        <div class="header-inner">
            <a href="/" class="logo">🌫 aqiwatch</a>
            <button class="theme-toggle" onclick="toggleTheme()" title="Toggle theme">☀️</button>
        </div>
    </header>

    <main class="main">
        <section class="card">
            <h2>Map</h2>
            <div id="map"></div>
        </section>

        <section class="card">
            <h2>Current Air Quality</h2>
            <form class="city-form" hx-post="/lookup" hx-swap="none">
                <input id="cityInput" name="city" list="cities" placeholder="Enter city name" autocomplete="off">
                <button id="fetchDataBtn" class="btn" type="submit">Get AQI</button>
            </form>

            <div class="aqi-headline">AQI: <span id="aqiValue">--</span></div>
            <div class="aqi-status">Air Quality: <span id="qualityStatus">--</span> · <span id="station"></span></div>

            <div class="pill-grid">
                <div class="pill"><span class="code">CO</span><span id="co">--</span></div>
                <div class="pill"><span class="code">NO</span><span id="no">--</span></div>
                <div class="pill"><span class="code">NO2</span><span id="no2">--</span></div>
                <div class="pill"><span class="code">O3</span><span id="o3">--</span></div>
                <div class="pill"><span class="code">SO2</span><span id="so2">--</span></div>
                <div class="pill"><span class="code">PM2.5</span><span id="pm25">--</span></div>
                <div class="pill"><span class="code">PM10</span><span id="pm10">--</span></div>
                <div class="pill"><span class="code">NH3</span><span id="nh3">--</span></div>
            </div>

            <div class="meter">
                <div id="meter-good" class="meter-segment good"></div>
                <div id="meter-moderate" class="meter-segment moderate"></div>
                <div id="meter-sensitive" class="meter-segment sensitive"></div>
                <div id="meter-unhealthy" class="meter-segment unhealthy"></div>
                <div id="meter-severe" class="meter-segment severe"></div>
                <div id="meter-hazardous" class="meter-segment hazardous"></div>
                <div id="meter-pointer" class="meter-pointer" style="left: 0%"></div>
            </div>
        </section>

        <section class="card">
            <h2>Prediction</h2>
            <form class="city-form" hx-post="/predict" hx-swap="none">
                <input name="city" list="cities" placeholder="Enter city name" autocomplete="off">
                <button class="btn" type="submit">Predict</button>
            </form>

            <div class="aqi-headline">AQI: <span id="predAqi">--</span></div>
            <div class="aqi-status">Category: <span id="predCategory">--</span></div>

            <div class="pill-grid">
                <div class="pill"><span class="code">PM10</span><span id="pred-pm10">--</span></div>
                <div class="pill"><span class="code">PM2.5</span><span id="pred-pm25">--</span></div>
                <div class="pill"><span class="code">NO2</span><span id="pred-no2">--</span></div>
                <div class="pill"><span class="code">O3</span><span id="pred-o3">--</span></div>
                <div class="pill"><span class="code">SO2</span><span id="pred-so2">--</span></div>
                <div class="pill"><span class="code">CO</span><span id="pred-co">--</span></div>
                <div class="pill"><span class="code">NH3</span><span id="pred-nh3">--</span></div>
            </div>
        </section>

        <section class="card">
            <h2>Weather &amp; Traffic</h2>
            <div class="kv">
                <div>Temperature: <b id="weatherTemp">--</b></div>
                <div>Conditions: <b id="weatherDesc">--</b></div>
                <div>Humidity: <b id="weatherHumidity">--</b></div>
                <div>Wind: <b id="weatherWind">--</b></div>
                <div>UV Index: <b id="weatherUvi">--</b></div>
            </div>
            <br>
            <div class="traffic">
                <div class="traffic-light">
                    <div id="light-red" class="light red"></div>
                    <div id="light-yellow" class="light yellow"></div>
                    <div id="light-green" class="light green"></div>
                </div>
                <div class="kv">
                    <div>Red: <b id="redTime">--</b> · Yellow: <b id="yellowTime">--</b> · Green: <b id="greenTime">--</b></div>
                    <div>Density: <b id="trafficDensity">--</b></div>
                    <div>Speed: <b id="trafficSpeed">--</b></div>
                    <div>Queue: <b id="trafficQueue">--</b></div>
                    <div>Recommendation: <b id="recommendation">--</b></div>
                </div>
            </div>
        </section>
    </main>

    <datalist id="cities">{{city_options}}</datalist>

    <footer class="footer">
        <p>Data from <a href="https://waqi.info/" target="_blank">World Air Quality Index Project</a> · aqiwatch v{{version}}</p>
    </footer>

    <script>
        function toggleTheme() {
            const html = document.documentElement;
            const current = html.getAttribute('data-theme');
            const next = current === 'dark' ? 'light' : 'dark';
            html.setAttribute('data-theme', next);
            document.querySelector('.theme-toggle').textContent = next === 'dark' ? '🌙' : '☀️';
            localStorage.setItem('theme', next);
        }

        // Load saved theme
        const savedTheme = localStorage.getItem('theme') || 'light';
        document.documentElement.setAttribute('data-theme', savedTheme);
        document.querySelector('.theme-toggle').textContent = savedTheme === 'dark' ? '🌙' : '☀️';

        const map = L.map('map').setView([{{center_lat}}, {{center_lon}}], {{zoom}});
        L.tileLayer('https://{s}.tile.openstreetmap.org/{z}/{x}/{y}.png', {
            attribution: '&copy; OpenStreetMap contributors'
        }).addTo(map);
        let marker = null;

        document.body.addEventListener('aqiMap', function(e) {
            const d = e.detail;
            map.setView([d.lat, d.lon], d.zoom);
            if (!marker) {
                marker = L.circleMarker([d.lat, d.lon], {
                    radius: 9,
                    color: 'rgba(255,255,255,0.8)',
                    weight: 2,
                    fillOpacity: 0.9
                }).addTo(map);
            }
            marker.setLatLng([d.lat, d.lon]);
            marker.setStyle({ fillColor: d.color });
        });

        document.body.addEventListener('aqiAlert', function(e) {
            alert(e.detail.message);
        });

        document.body.addEventListener('htmx:sendError', function() {
            alert('Could not reach the aqiwatch server.');
        });
    </script>
</body>
</html>
"##;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{AirQualityReading, Pollutant};

    fn delhi_view() -> ViewState {
        let mut view = ViewState::default();
        view.render_reading(
            &AirQualityReading {
                aqi: 275,
                pollutants: Pollutant::ALL.iter().map(|p| (*p, Some(1.5))).collect(),
                station: Some("R.K. Puram <Delhi>".into()),
                location: Some((28.56, 77.18)),
            },
            METER_WIDTH_PERCENT,
        );
        view
    }

    #[test]
    fn test_fragment_marks_one_segment_active() {
        let html = render_fragment(&delhi_view());
        assert_eq!(html.matches(" active\"").count(), 1);
        assert!(html.contains(r#"class="meter-segment severe active""#));
        assert!(html.contains("left: 91.7%"));
        assert!(html.contains("R.K. Puram &lt;Delhi&gt;"));
        assert!(!html.contains("light-red"));
    }

    #[test]
    fn test_fragment_skips_unrendered_slots() {
        let html = render_fragment(&delhi_view());
        assert!(!html.contains("weatherTemp"));
        assert!(!html.contains("predAqi"));
    }

    #[test]
    fn test_failed_action_has_alert_only() {
        let rendered = Rendered::failure("City not found".into());
        let trigger = render_triggers(&rendered).unwrap();
        let value: serde_json::Value = serde_json::from_str(&trigger).unwrap();
        assert_eq!(value["aqiAlert"]["message"], "City not found");
        assert!(value.get("aqiMap").is_none());

        let response = fragment_response(&rendered);
        assert_eq!(response.headers().get(HX_RESWAP).unwrap(), "none");
    }

    #[test]
    fn test_success_moves_map() {
        let mut map = MapView::default();
        map.set_center(28.56, 77.18, 10);
        map.set_marker(28.56, 77.18);
        let rendered = Rendered {
            view: delhi_view(),
            map,
            alerts: Vec::new(),
            failed: false,
        };
        let trigger = render_triggers(&rendered).unwrap();
        let value: serde_json::Value = serde_json::from_str(&trigger).unwrap();
        assert_eq!(value["aqiMap"]["zoom"], 10);
        assert_eq!(value["aqiMap"]["color"], "#a855f7");
        assert!(value.get("aqiAlert").is_none());
    }

    #[test]
    fn test_ascii_json_escapes_unicode() {
        let encoded = ascii_json(&json!({ "message": "☠️ smog" }));
        assert!(encoded.is_ascii());
        let decoded: serde_json::Value = serde_json::from_str(&encoded).unwrap();
        assert_eq!(decoded["message"], "☠️ smog");
    }

    #[test]
    fn test_index_has_presets() {
        let html = index_html();
        assert!(html.contains(r#"<option value="Delhi">"#));
        assert!(html.contains("setView([20.5937, 78.9629], 5)"));
        assert!(!html.contains("{{"));
    }
}
