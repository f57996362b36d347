use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

/// presenced — push Discord Rich Presence from a JSON config.
#[derive(Parser, Debug)]
#[command(name = "presenced", version, about)]
pub struct Cli {
    /// Config file path override (default: ./discord_config.json).
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Log level override (e.g. "presenced=debug").
    #[arg(long, global = true)]
    pub log_level: Option<String>,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Connect and push updates on a fixed interval (the default).
    Run(RunArgs),
    /// Interactive setup: client ID, config customization, checks.
    Setup,
    /// Exercise the update call with canned or configured payloads.
    Examples(ExamplesArgs),
}

#[derive(Args, Debug, Default, Clone)]
pub struct RunArgs {
    /// Discord application (client) ID; overrides env and config.
    #[arg(long)]
    pub client_id: Option<String>,

    /// Named config section applied as overrides for this run.
    #[arg(long)]
    pub section: Option<String>,

    /// Total run time in seconds; omit to run until interrupted.
    #[arg(long)]
    pub duration: Option<u64>,

    /// Per-field overrides; each wins over section and config values.
    #[arg(long)]
    pub state: Option<String>,
    #[arg(long)]
    pub details: Option<String>,
    #[arg(long)]
    pub large_image: Option<String>,
    #[arg(long)]
    pub large_text: Option<String>,
    #[arg(long)]
    pub small_image: Option<String>,
    #[arg(long)]
    pub small_text: Option<String>,
}

#[derive(Args, Debug, Default, Clone)]
pub struct ExamplesArgs {
    /// Run a single named section non-interactively.
    #[arg(long)]
    pub section: Option<String>,
}

pub fn parse() -> Cli {
    Cli::parse()
}
