#![forbid(unsafe_code)]

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use std::fs;
use std::io::Read;
use std::path::PathBuf;
use tracing::{info, Level as TraceLevel};
use tracing_subscriber::FmtSubscriber;

use reticle::config::CrosshairConfig;
use reticle::constants::canvas;
use reticle::geometry::{render, CanvasSize};
use reticle::{codec, store, svg};

/// Crosshair share-code tool
#[derive(Parser)]
#[command(name = "reticle")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Decode, encode and render crosshair share codes")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Decode a share code and print the resolved config as JSON
    Decode {
        /// Share code, e.g. ig10il20it2icFF0000io10inl4ce0ofr0ocx0adv0
        code: String,
    },
    /// Encode a structured JSON config into a share code
    Encode {
        /// Path to a JSON config; reads stdin when omitted
        file: Option<PathBuf>,
    },
    /// Render a crosshair into draw primitives or an SVG document
    Render {
        /// Share code; falls back to the saved default when omitted
        code: Option<String>,

        /// Canvas width in pixels
        #[arg(long, default_value_t = canvas::DEFAULT_WIDTH)]
        width: u32,

        /// Canvas height in pixels
        #[arg(long, default_value_t = canvas::DEFAULT_HEIGHT)]
        height: u32,

        /// Write an SVG document here instead of printing primitives
        #[arg(long)]
        svg: Option<PathBuf>,
    },
    /// Manage the saved default crosshair
    #[command(subcommand)]
    Default(DefaultAction),
}

#[derive(Subcommand)]
enum DefaultAction {
    /// Print the saved default as a share code
    Show,
    /// Decode a share code and save it as the default
    Set { code: String },
    /// Print the default config file location
    Path,
}

fn main() -> Result<()> {
    // Parse log level from environment variable
    let log_level = match std::env::var("LOG_LEVEL")
        .unwrap_or_else(|_| "info".to_string())
        .to_lowercase()
        .as_str()
    {
        "trace" => TraceLevel::TRACE,
        "debug" => TraceLevel::DEBUG,
        "warn" => TraceLevel::WARN,
        "error" => TraceLevel::ERROR,
        _ => TraceLevel::INFO,
    };

    // Logs go to stderr; stdout is reserved for codes, JSON and SVG
    let subscriber = FmtSubscriber::builder()
        .with_max_level(log_level)
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)
        .context("Failed to install tracing subscriber")?;

    match Cli::parse().command {
        Commands::Decode { code } => {
            let config = codec::decode(&code).context("Invalid share code")?;
            println!("{}", serde_json::to_string_pretty(&config)?);
        }
        Commands::Encode { file } => {
            let contents = match file {
                Some(path) => fs::read_to_string(&path)
                    .context(format!("Failed to read config file {}", path.display()))?,
                None => {
                    let mut buffer = String::new();
                    std::io::stdin()
                        .read_to_string(&mut buffer)
                        .context("Failed to read config JSON from stdin")?;
                    buffer
                }
            };
            let value: serde_json::Value =
                serde_json::from_str(&contents).context("Failed to parse config JSON")?;
            let config =
                CrosshairConfig::from_structured(value).context("Invalid crosshair config")?;
            println!("{}", codec::encode(&config));
        }
        Commands::Render { code, width, height, svg: svg_path } => {
            let config = config_from_code_or_default(code)?;
            let canvas = CanvasSize::new(width, height);
            if let Some(path) = svg_path {
                let document = svg::document(&config, canvas);
                fs::write(&path, document)
                    .context(format!("Failed to write SVG to {}", path.display()))?;
                info!(path = %path.display(), "Wrote SVG document");
            } else {
                let primitives = render(&config, canvas);
                println!("{}", serde_json::to_string_pretty(&primitives)?);
            }
        }
        Commands::Default(action) => match action {
            DefaultAction::Show => match store::load_default()? {
                Some(config) => println!("{}", codec::encode(&config)),
                None => bail!("No default crosshair saved yet"),
            },
            DefaultAction::Set { code } => {
                let config = codec::decode(&code).context("Invalid share code")?;
                store::save_default(&config)?;
            }
            DefaultAction::Path => println!("{}", store::config_path().display()),
        },
    }

    Ok(())
}

/// Decode the given code, or fall back to the saved default crosshair
fn config_from_code_or_default(code: Option<String>) -> Result<CrosshairConfig> {
    match code {
        Some(code) => codec::decode(&code).context("Invalid share code"),
        None => store::load_default()?
            .context("No share code given and no saved default crosshair"),
    }
}
