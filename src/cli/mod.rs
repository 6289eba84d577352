use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};

pub mod chat;
pub mod describe;
pub mod serve;

use crate::core::{AppConfig, config::DEFAULT_ENV_FILE, logging};

#[derive(Subcommand)]
enum Command {
    /// Run the web UI and JSON API
    Serve {
        /// Set the server host address
        #[arg(long, default_value = "127.0.0.1")]
        host: String,

        /// Set the server port
        #[arg(long, default_value = "8501")]
        port: String,
    },
    /// Start an interactive session in the terminal
    Chat {},
    /// Describe a single image and print the result
    Describe {
        /// Image to describe
        #[arg(default_value = "test_image.jpg")]
        path: PathBuf,

        /// Media type sent with the image, regardless of its extension
        #[arg(long, default_value = describe::DEFAULT_MIME_TYPE)]
        mime_type: String,
    },
}

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// File to load GEMINI_API_KEY (and other settings) from
    #[arg(long, global = true, env = "GLIMPSE_ENV_FILE", default_value = DEFAULT_ENV_FILE)]
    env_file: PathBuf,

    #[command(subcommand)]
    command: Option<Command>,
}

pub async fn run() -> Result<()> {
    let args = Cli::parse();

    match &args.command {
        Some(Command::Serve { .. }) => logging::init(&format!(
            "{}=debug,tower_http=debug,axum::rejection=trace",
            env!("CARGO_CRATE_NAME")
        )),
        _ => logging::init(&format!("{}=info", env!("CARGO_CRATE_NAME"))),
    }

    // Fail fast before doing anything else when the key is missing
    let config = AppConfig::load(&args.env_file)?;

    // Handle each sub command
    match args.command {
        Some(Command::Serve { host, port }) => {
            serve::run(&host, &port, config).await?;
        }
        Some(Command::Chat {}) => {
            chat::run(config).await?;
        }
        Some(Command::Describe { path, mime_type }) => {
            describe::run(&config, &path, &mime_type).await?;
        }
        None => {}
    }

    Ok(())
}
