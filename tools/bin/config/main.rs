use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, arg, command};
use tracing::{Level, debug};

use common::config::{UiConfig, parse_config, render_config};

#[derive(Parser)]
#[command(version, about, long_about = None)]
struct Cli {
    /// config file
    #[arg(short, long, default_value = "site-ui.toml")]
    config: String,

    /// log parsing details
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// validate the config file
    Check,

    /// print the effective config, defaults included
    Show,

    /// print the default config
    Defaults,

    /// print the config as a script block to embed in a page
    Inline,
}

fn read_config(filename: PathBuf) -> Result<UiConfig> {
    debug!(file = %filename.display(), "reading config file");

    let doc = std::fs::read_to_string(&filename)
        .with_context(|| format!("failed to read {}", filename.display()))?;

    parse_config(&doc)
}

fn summary(config: &UiConfig) -> String {
    let defaults = UiConfig::default();

    let mut changed = Vec::new();

    if config.breakpoint != defaults.breakpoint {
        changed.push("breakpoint");
    }
    if config.close_delay_ms != defaults.close_delay_ms {
        changed.push("close_delay_ms");
    }
    if config.scroll_delay_ms != defaults.scroll_delay_ms {
        changed.push("scroll_delay_ms");
    }
    if config.theme != defaults.theme {
        changed.push("theme");
    }
    if config.nav != defaults.nav {
        changed.push("nav");
    }
    if config.tabs != defaults.tabs {
        changed.push("tabs");
    }

    if changed.is_empty() {
        String::from("config is valid (all defaults)")
    } else {
        format!("config is valid, overrides: {}", changed.join(", "))
    }
}

fn inline_block(config: &UiConfig) -> Result<String> {
    let doc = render_config(config)?;

    Ok(format!(
        "<script type=\"application/toml\" id=\"site-ui-config\">\n{doc}</script>"
    ))
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_max_level(if cli.verbose { Level::DEBUG } else { Level::WARN })
        .with_writer(std::io::stderr)
        .init();

    match cli.command.unwrap_or(Commands::Check) {
        Commands::Check => {
            let config = read_config(PathBuf::from(cli.config))?;

            println!("{}", summary(&config));
        }
        Commands::Show => {
            let config = read_config(PathBuf::from(cli.config))?;

            print!("{}", render_config(&config)?);
        }
        Commands::Defaults => {
            print!("{}", render_config(&UiConfig::default())?);
        }
        Commands::Inline => {
            let config = read_config(PathBuf::from(cli.config))?;

            println!("{}", inline_block(&config)?);
        }
    }

    Ok(())
}
