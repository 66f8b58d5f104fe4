//! CLI entry and dispatch.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use folio_core::config;
use folio_core::logging;

mod commands;

#[derive(Parser)]
#[command(name = "folio")]
#[command(version = "0.1")]
#[command(about = "A greeting card you read in the terminal, one page turn at a time")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Card file to open (defaults to `card` from config, then the built-in card)
    #[arg(long, global = true, value_name = "PATH", env = "FOLIO_CARD")]
    card: Option<PathBuf>,

    /// Do not play the page-turn sound
    #[arg(long = "no-sound", global = true)]
    no_sound: bool,
}

#[derive(clap::Subcommand)]
enum Commands {
    /// Print every page of the card as plain text
    Pages,
    /// Page-turn sound utilities
    Sound {
        #[command(subcommand)]
        command: SoundCommands,
    },
    /// Manage configuration
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },
}

#[derive(clap::Subcommand)]
enum SoundCommands {
    /// Write the page-turn sound to a WAV file
    Export {
        /// Output file
        #[arg(value_name = "PATH")]
        path: PathBuf,

        /// Noise seed; the same seed always produces the same file
        #[arg(long)]
        seed: Option<u64>,

        /// Sample rate in Hz
        #[arg(long, default_value_t = folio_core::sound::DEFAULT_SAMPLE_RATE)]
        sample_rate: u32,
    },
}

#[derive(clap::Subcommand)]
enum ConfigCommands {
    /// Show the path to the config file
    Path,
    /// Initialize a default config file (if not present)
    Init,
    /// Generate a fresh config from Rust defaults (for xtask)
    Generate,
}

pub fn run() -> Result<()> {
    let cli = Cli::parse();

    let _log_guard = match logging::init(&config::paths::logs_dir()) {
        Ok(guard) => Some(guard),
        Err(e) => {
            eprintln!("Warning: logging disabled: {e:#}");
            None
        }
    };

    dispatch(cli)
}

fn dispatch(cli: Cli) -> Result<()> {
    let Cli {
        command,
        card,
        no_sound,
    } = cli;

    match command {
        // Config commands must work even when the existing file is broken.
        Some(Commands::Config { command }) => match command {
            ConfigCommands::Path => {
                commands::config::path();
                Ok(())
            }
            ConfigCommands::Init => commands::config::init(),
            ConfigCommands::Generate => commands::config::generate(),
        },
        Some(Commands::Pages) => {
            let config = load_config(no_sound)?;
            let card = commands::load_card(card.as_deref(), &config)?;
            commands::pages::run(&card)
        }
        Some(Commands::Sound { command }) => match command {
            SoundCommands::Export {
                path,
                seed,
                sample_rate,
            } => {
                let config = load_config(no_sound)?;
                commands::sound::export(&path, &config, seed, sample_rate)
            }
        },
        None => {
            let config = load_config(no_sound)?;
            let card = commands::load_card(card.as_deref(), &config)?;
            commands::show::run(&config, card)
        }
    }
}

fn load_config(no_sound: bool) -> Result<config::Config> {
    let mut config = config::Config::load().context("load config")?;
    if no_sound {
        config.sound = false;
    }
    Ok(config)
}
