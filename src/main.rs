use clap::Parser;
use colored::*;
use eyre::{Context, Result};
use log::info;
use std::fs;
use std::path::{Path, PathBuf};

use respnorm::ModelResponse;
use respnorm::llm::response_from_jsonl_file;

mod cli;
mod config;

use cli::Cli;
use cli::commands::Commands;
use config::Config;

fn setup_logging(verbose: bool, config: &Config) -> Result<()> {
    // Create log directory
    let log_dir = dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("respnorm")
        .join("logs");

    fs::create_dir_all(&log_dir).context("Failed to create log directory")?;

    let log_file = log_dir.join("respnorm.log");

    // Setup env_logger with file output
    let target = Box::new(
        fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&log_file)
            .context("Failed to open log file")?,
    );

    // RUST_LOG wins, then --verbose, then the configured level
    let default_filter = if verbose {
        "debug"
    } else {
        config.log_level.as_deref().unwrap_or("info")
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .target(env_logger::Target::Pipe(target))
        .init();

    info!("Logging initialized, writing to: {}", log_file.display());
    Ok(())
}

fn run_application(cli: &Cli, config: &Config) -> Result<()> {
    info!("Starting application");

    if !config.replay.color {
        colored::control::set_override(false);
    }

    if cli.is_verbose() {
        println!("{}", "Verbose mode enabled".yellow());
    }

    match &cli.command {
        Commands::Replay { file, final_only } => handle_replay_command(file, *final_only, config),
        Commands::Serialize { file, text } => handle_serialize_command(file.as_deref(), text.as_deref(), config),
    }
}

fn handle_replay_command(file: &Path, final_only: bool, config: &Config) -> Result<()> {
    info!("Replaying {} (final only: {})", file.display(), final_only);
    let show_partial = config.replay.show_partial && !final_only;

    let mut response = response_from_jsonl_file(file)
        .context(format!("Failed to open chunk file {}", file.display()))?
        .with_format(config.format.clone());

    let Some(stream) = response.stream() else {
        return Ok(());
    };

    for update in stream {
        let update = update.context("Replay failed")?;
        if update.is_final {
            println!("{}", "--- final ---".green().bold());
            println!("{}", update.text);
        } else if show_partial {
            println!("{}", update.text.dimmed());
        }
    }

    if let Some(calls) = &response.tool_calls
        && !calls.is_empty()
    {
        println!("{}", "--- tool calls ---".cyan().bold());
        for call in calls {
            println!("{} {}", call.name.cyan(), serde_json::to_string(&call.arguments)?);
        }
    }
    Ok(())
}

fn handle_serialize_command(file: Option<&Path>, text: Option<&str>, config: &Config) -> Result<()> {
    let mut response = match (file, text) {
        (_, Some(text)) => ModelResponse::from_text(text),
        (Some(file), None) => response_from_jsonl_file(file)
            .context(format!("Failed to open chunk file {}", file.display()))?,
        (None, None) => eyre::bail!("Either a chunk file or --text is required"),
    };
    response = response.with_format(config.format.clone());

    info!("Serializing response (stream: {})", response.has_stream());
    let serialized = response.serialize().context("Failed to serialize response")?;
    println!("{}", serialized);
    Ok(())
}

fn main() -> Result<()> {
    // Parse CLI arguments
    let cli = Cli::parse();

    // Load configuration
    let config = Config::load(cli.config.as_ref()).context("Failed to load configuration")?;

    // Setup logging with the configured level
    setup_logging(cli.is_verbose(), &config).context("Failed to setup logging")?;

    info!("Starting with config from: {:?}", cli.config);

    // Run the main application logic
    run_application(&cli, &config).context("Application failed")?;

    Ok(())
}
