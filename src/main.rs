//! aqiwatch - City air quality from your terminal.
//!
//! Looks up current AQI via the WAQI API, asks a prediction backend for
//! forecasts and traffic timings, and serves a small map dashboard.

use std::io::{self, Write};
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::error;

mod classify;
mod cli;
mod client;
mod controller;
mod errors;
mod models;
mod output;
mod server;
mod theme;
mod traffic;
mod view;

use cli::{Cli, Command, ThemeAction};
use client::{AqiClient, ClientConfig};
use controller::{AlertLog, ViewController};
use theme::{FileStore, ThemeToggle};

fn main() -> ExitCode {
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{e:#}");
            eprintln!("Error: {e:#}");
            ExitCode::FAILURE
        }
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();

    // Initialize tracing based on verbosity
    init_tracing(cli.verbose, cli.quiet);

    let config = ClientConfig::from(cli.endpoints);

    match cli.command {
        Command::Lookup(args) => cmd_lookup(config, &args),
        Command::Predict(args) => cmd_predict(config, &args),
        Command::Theme(args) => cmd_theme(&args),
        Command::Ui(args) => cmd_ui(config, &args),
    }
}

/// Initialize tracing subscriber.
fn init_tracing(verbose: bool, quiet: bool) {
    use tracing_subscriber::EnvFilter;

    let filter = if quiet {
        EnvFilter::new("error")
    } else if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(io::stderr)
        .init();
}

/// Print the view, plus any alerts that did not abort the action.
fn print_outcome<C, N>(
    controller: &ViewController<C, N>,
    alerts: &AlertLog,
    format: output::Format,
) -> Result<()>
where
    C: client::QueryClient,
    N: controller::Notifier,
{
    let stdout = io::stdout();
    let mut handle = stdout.lock();
    output::write_view(&mut handle, controller.state(), controller.map(), format)?;
    handle.flush()?;

    if !alerts.is_empty() {
        output::write_alerts(&mut io::stderr().lock(), &alerts.take())?;
    }
    Ok(())
}

/// Execute the `lookup` command - one-shot WAQI query.
fn cmd_lookup(config: ClientConfig, args: &cli::LookupArgs) -> Result<()> {
    let client = AqiClient::new(config).context("failed to create HTTP client")?;
    let alerts = AlertLog::default();
    let mut controller = ViewController::new(client, &alerts, f64::from(args.meter_width));

    controller
        .lookup(&args.city)
        .context("air quality lookup failed")?;

    print_outcome(&controller, &alerts, args.format)
}

/// Execute the `predict` command - prediction, weather and traffic.
fn cmd_predict(config: ClientConfig, args: &cli::PredictArgs) -> Result<()> {
    let client = AqiClient::new(config).context("failed to create HTTP client")?;
    let alerts = AlertLog::default();
    let mut controller = ViewController::new(client, &alerts, f64::from(args.meter_width));

    let now_ms = u64::try_from(chrono::Utc::now().timestamp_millis())
        .context("system clock is before the Unix epoch")?;
    controller
        .predict(&args.city, now_ms)
        .context("prediction failed")?;

    print_outcome(&controller, &alerts, args.format)
}

/// Execute the `theme` command - show, set or toggle the saved theme.
fn cmd_theme(args: &cli::ThemeArgs) -> Result<()> {
    let store = FileStore::new(&args.store);
    let mut toggle = ThemeToggle::load(store)
        .with_context(|| format!("failed to read {}", args.store.display()))?;

    match args.action {
        ThemeAction::Show => {}
        ThemeAction::Toggle => {
            let theme = toggle.toggle().context("failed to save theme")?;
            tracing::info!("theme switched to {}", theme.as_str());
        }
        ThemeAction::Set(theme) => {
            toggle.set(theme).context("failed to save theme")?;
        }
    }

    let stdout = io::stdout();
    let mut handle = stdout.lock();
    output::write_theme(&mut handle, toggle.current(), args.format)?;
    Ok(())
}

/// Execute the `ui` command - start web server.
fn cmd_ui(config: ClientConfig, args: &cli::UiArgs) -> Result<()> {
    let server_config = server::ServerConfig {
        port: args.port,
        host: args.host.clone(),
        client: config,
    };

    // Print startup message
    let url = format!("http://{}:{}", args.host, args.port);
    println!("\x1b[1m🌫  aqiwatch Web UI\x1b[0m");
    println!("\x1b[2m───────────────────────────────────────\x1b[0m");
    println!("  Local:   \x1b[96m{url}\x1b[0m");
    println!("  WAQI:    {}", server_config.client.waqi_url);
    println!("  Backend: {}", server_config.client.backend_url);
    println!("\x1b[2m───────────────────────────────────────\x1b[0m");
    println!("\x1b[2mPress Ctrl+C to stop\x1b[0m\n");

    // Open browser if requested (using xdg-open/open command)
    if args.open {
        #[cfg(target_os = "linux")]
        let _ = std::process::Command::new("xdg-open").arg(&url).spawn();
        #[cfg(target_os = "macos")]
        let _ = std::process::Command::new("open").arg(&url).spawn();
        #[cfg(target_os = "windows")]
        let _ = std::process::Command::new("cmd").args(["/c", "start", &url]).spawn();
    }

    // Run the async server on tokio runtime
    tokio::runtime::Runtime::new()
        .context("failed to create tokio runtime")?
        .block_on(server::run_server(server_config))
}
