//! Command-line interface
//!
//! `naijagate` with no arguments runs the gateway. The `config` subcommand
//! manages the TOML file without starting a server:
//! --show, --path, --reset, --edit, --update.

use std::io::{self, Write};
use std::path::PathBuf;
use std::process::Command;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};

use crate::config::{Config, VERSION};
use crate::startup;

/// naijagate - API gateway for the NaijaHub web client
#[derive(Parser)]
#[command(name = "naijagate")]
#[command(version = VERSION)]
#[command(about = "API gateway for the NaijaHub web client", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Inspect or manage the config file
    Config {
        /// Print the effective configuration (env > file > defaults)
        #[arg(long)]
        show: bool,

        /// Print the config file path
        #[arg(long)]
        path: bool,

        /// Overwrite the config file with defaults
        #[arg(long)]
        reset: bool,

        /// Open the config file in $EDITOR
        #[arg(long)]
        edit: bool,

        /// Rewrite the config file in the current format, keeping values
        #[arg(long)]
        update: bool,
    },
}

/// What a `config` invocation asked for
enum ConfigAction {
    Show,
    Path,
    Reset,
    Edit,
    Update,
    Help,
}

impl ConfigAction {
    fn from_flags(show: bool, path: bool, reset: bool, edit: bool, update: bool) -> Self {
        if path {
            Self::Path
        } else if show {
            Self::Show
        } else if reset {
            Self::Reset
        } else if edit {
            Self::Edit
        } else if update {
            Self::Update
        } else {
            Self::Help
        }
    }
}

/// Handle CLI commands. Returns true if a command was handled (exit after).
pub fn handle_cli() -> bool {
    let cli = Cli::parse();

    let Some(Commands::Config {
        show,
        path,
        reset,
        edit,
        update,
    }) = cli.command
    else {
        return false; // No subcommand, run the gateway
    };

    let action = ConfigAction::from_flags(show, path, reset, edit, update);
    if let Err(e) = run_config_action(action) {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
    true
}

fn run_config_action(action: ConfigAction) -> Result<()> {
    match action {
        ConfigAction::Show => show_config(),
        ConfigAction::Path => {
            println!("{}", require_config_path()?.display());
            Ok(())
        }
        ConfigAction::Reset => reset_config(),
        ConfigAction::Edit => edit_config(),
        ConfigAction::Update => update_config(),
        ConfigAction::Help => {
            println!("Usage: naijagate config [--show|--path|--reset|--edit|--update]");
            println!();
            println!("  --show    Print the effective configuration");
            println!("  --path    Print the config file path");
            println!("  --reset   Overwrite the config file with defaults");
            println!("  --edit    Open the config file in $EDITOR");
            println!("  --update  Rewrite the file in the current format, keeping values");
            Ok(())
        }
    }
}

fn require_config_path() -> Result<PathBuf> {
    Config::config_path().context("could not determine the config directory")
}

/// Print every effective setting, secrets reduced to fingerprints
fn show_config() -> Result<()> {
    let config = Config::from_env();

    println!("# Effective configuration (env > file > defaults)");
    println!();
    println!("bind_addr = {:?}", config.bind_addr.to_string());
    println!("news_api_url = {:?}", config.news_api_url);
    println!("openai_api_url = {:?}", config.openai_api_url);
    println!(
        "news_api_key = {}",
        describe_key(config.news_api_key.as_deref())
    );
    println!(
        "openai_api_key = {}",
        describe_key(config.openai_api_key.as_deref())
    );
    println!("news_ttl_secs = {}", config.news_ttl_secs);
    println!("summary_model = {:?}", config.summary_model);
    match &config.cors_origin {
        Some(origin) => println!("cors_origin = {:?}", origin),
        None => println!("cors_origin = <any origin>"),
    }
    println!();
    println!("[logging]");
    println!("level = {:?}", config.logging.level);
    println!("file_enabled = {}", config.logging.file_enabled);
    println!(
        "file_dir = {:?}",
        config.logging.file_dir.display().to_string()
    );
    println!("file_rotation = {:?}", config.logging.file_rotation.as_str());
    println!("file_prefix = {:?}", config.logging.file_prefix);

    println!();
    let path = require_config_path()?;
    if path.exists() {
        println!("# Source: {}", path.display());
    } else {
        println!("# Source: defaults (no config file)");
    }
    Ok(())
}

fn describe_key(key: Option<&str>) -> String {
    match key {
        Some(key) => format!("<set, sha256:{}>", startup::fingerprint(key)),
        None => "<not set>".to_string(),
    }
}

fn reset_config() -> Result<()> {
    let path = require_config_path()?;

    if path.exists() && !confirm(&format!("Overwrite {}?", path.display()))? {
        println!("Aborted.");
        return Ok(());
    }

    write_config_file(&path, &Config::default().to_toml())?;
    println!("Config reset to defaults: {}", path.display());
    Ok(())
}

fn edit_config() -> Result<()> {
    let path = require_config_path()?;
    if !path.exists() {
        Config::ensure_config_exists();
        println!("Created new config file: {}", path.display());
    }

    let editor = std::env::var("EDITOR")
        .or_else(|_| std::env::var("VISUAL"))
        .unwrap_or_else(|_| "nano".to_string());

    let status = Command::new(&editor)
        .arg(&path)
        .status()
        .with_context(|| format!("failed to launch editor {:?} (set $EDITOR)", editor))?;

    if !status.success() {
        bail!("editor exited with status {}", status);
    }
    Ok(())
}

/// Re-serialize the current effective config, backing up the old file
fn update_config() -> Result<()> {
    let path = require_config_path()?;

    if !path.exists() {
        Config::ensure_config_exists();
        println!("Created new config file: {}", path.display());
        return Ok(());
    }

    let backup = path.with_extension("toml.bak");
    std::fs::copy(&path, &backup)
        .with_context(|| format!("could not back up config to {}", backup.display()))?;
    println!("Backup created: {}", backup.display());

    // from_env folds the existing file in, so user values survive the rewrite
    let updated = Config::from_env().to_toml();
    write_config_file(&path, &updated)?;
    println!("Config rewritten in the current format: {}", path.display());
    Ok(())
}

fn write_config_file(path: &PathBuf, contents: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("could not create {}", parent.display()))?;
    }
    std::fs::write(path, contents).with_context(|| format!("could not write {}", path.display()))
}

fn confirm(prompt: &str) -> Result<bool> {
    eprint!("{} [y/N] ", prompt);
    io::stderr().flush()?;

    let mut input = String::new();
    io::stdin().read_line(&mut input)?;
    Ok(input.trim().eq_ignore_ascii_case("y"))
}
