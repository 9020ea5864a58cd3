//! Command-line interface definitions.
//!
//! Uses clap derive API for argument parsing. Endpoints and the preference
//! file can also come from the environment.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::client::{BACKEND_BASE_URL, ClientConfig, WAQI_BASE_URL, WAQI_DEMO_TOKEN};
use crate::output::Format;
use crate::theme::Theme;

/// City air quality, AQI predictions and traffic phases from your terminal.
#[derive(Parser, Debug)]
#[command(name = "aqiwatch")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Command to run
    #[command(subcommand)]
    pub command: Command,

    #[command(flatten)]
    pub endpoints: EndpointArgs,

    /// Enable verbose debug logging
    #[arg(long, global = true)]
    pub verbose: bool,

    /// Suppress all output except errors
    #[arg(long, global = true)]
    pub quiet: bool,
}

/// Upstream services.
#[derive(Args, Debug, Clone)]
pub struct EndpointArgs {
    /// WAQI API token
    #[arg(long, global = true, env = "WAQI_TOKEN", default_value = WAQI_DEMO_TOKEN, hide_env_values = true)]
    pub token: String,

    /// WAQI API base URL
    #[arg(long, global = true, env = "WAQI_URL", default_value = WAQI_BASE_URL)]
    pub waqi_url: String,

    /// Prediction backend base URL (serves /predict and /traffic-data)
    #[arg(long, global = true, env = "AQIWATCH_BACKEND", default_value = BACKEND_BASE_URL)]
    pub backend: String,
}

impl From<EndpointArgs> for ClientConfig {
    fn from(args: EndpointArgs) -> Self {
        Self {
            waqi_url: args.waqi_url,
            token: args.token,
            backend_url: args.backend,
        }
    }
}

/// Available commands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Show the current AQI and pollutants for a city
    Lookup(LookupArgs),

    /// Ask the backend for an AQI prediction, weather and traffic phase
    Predict(PredictArgs),

    /// Show or change the saved light/dark theme
    Theme(ThemeArgs),

    /// Start the web UI server
    Ui(UiArgs),
}

/// Arguments for the `lookup` command.
#[derive(Parser, Debug)]
pub struct LookupArgs {
    /// City name (e.g. Delhi, Mumbai, Kolkata, Bangalore, Chennai)
    pub city: String,

    /// Width of the AQI meter in terminal cells
    #[arg(long, default_value = "30")]
    pub meter_width: u16,

    /// Output format
    #[arg(long, short = 'f', default_value = "human", value_parser = parse_format)]
    pub format: Format,
}

/// Arguments for the `predict` command.
#[derive(Parser, Debug)]
pub struct PredictArgs {
    /// City name (e.g. Delhi, Mumbai, Kolkata, Bangalore, Chennai)
    pub city: String,

    /// Width of the AQI meter in terminal cells
    #[arg(long, default_value = "30")]
    pub meter_width: u16,

    /// Output format
    #[arg(long, short = 'f', default_value = "human", value_parser = parse_format)]
    pub format: Format,
}

/// Arguments for the `theme` command.
#[derive(Parser, Debug)]
pub struct ThemeArgs {
    /// What to do with the theme
    #[arg(default_value = "show", value_parser = parse_theme_action)]
    pub action: ThemeAction,

    /// Preference file
    #[arg(long, env = "AQIWATCH_STORE", default_value = ".aqiwatch.json")]
    pub store: PathBuf,

    /// Output format
    #[arg(long, short = 'f', default_value = "human", value_parser = parse_format)]
    pub format: Format,
}

/// Theme command action.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ThemeAction {
    Show,
    Toggle,
    Set(Theme),
}

impl std::str::FromStr for ThemeAction {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "show" => Ok(Self::Show),
            "toggle" => Ok(Self::Toggle),
            other => other
                .parse::<Theme>()
                .map(Self::Set)
                .map_err(|_| format!("unknown theme action: {s} (expected: show, toggle, light, dark)")),
        }
    }
}

/// Arguments for the `ui` command.
#[derive(Parser, Debug)]
pub struct UiArgs {
    /// Port to listen on
    #[arg(long, short = 'p', default_value = "8080")]
    pub port: u16,

    /// Host to bind to
    #[arg(long, default_value = "127.0.0.1")]
    pub host: String,

    /// Open browser automatically
    #[arg(long)]
    pub open: bool,
}

/// Parse an output format from string.
fn parse_format(s: &str) -> Result<Format, String> {
    s.parse()
}

/// Parse a theme action from string.
fn parse_theme_action(s: &str) -> Result<ThemeAction, String> {
    s.parse()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_lookup() {
        let cli = Cli::try_parse_from(["aqiwatch", "lookup", "Delhi", "-f", "json"]).unwrap();
        match cli.command {
            Command::Lookup(args) => {
                assert_eq!(args.city, "Delhi");
                assert_eq!(args.format, Format::Json);
                assert_eq!(args.meter_width, 30);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_global_endpoint_flags() {
        let cli = Cli::try_parse_from([
            "aqiwatch",
            "predict",
            "Mumbai",
            "--backend",
            "http://10.0.0.2:5000",
        ])
        .unwrap();
        let config = ClientConfig::from(cli.endpoints);
        assert_eq!(config.backend_url, "http://10.0.0.2:5000");
    }

    #[test]
    fn test_theme_actions() {
        assert_eq!("toggle".parse::<ThemeAction>().unwrap(), ThemeAction::Toggle);
        assert_eq!(
            "Dark".parse::<ThemeAction>().unwrap(),
            ThemeAction::Set(Theme::Dark)
        );
        assert!("sepia".parse::<ThemeAction>().is_err());
    }
}
