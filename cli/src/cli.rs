//! CLI argument parsing with clap derive

use clap::Parser;

use crate::commands;
use crate::infra::config::load_install_config;
use crate::output::OutputContext;

/// Install The Sims - Complete Collection into a Bottles container
#[derive(Parser)]
#[command(name = "sims-bottler", version)]
pub struct Cli {
    /// Path to the game data .zip archive
    #[arg(value_name = "ARCHIVE")]
    pub archive: Option<String>,

    /// Suppress non-error output
    #[arg(short, long)]
    pub quiet: bool,

    /// Disable colored output (also honored via `NO_COLOR`)
    #[arg(long)]
    pub no_color: bool,

    /// Log every external command to stderr
    #[arg(short, long)]
    pub verbose: bool,
}

impl Cli {
    /// Execute the installation and return the process exit code.
    pub async fn run(self) -> u8 {
        let ctx = OutputContext::new(self.no_color, self.quiet);
        let result = match load_install_config() {
            Ok(config) => commands::install::run(&ctx, &config, self.archive.as_deref()).await,
            Err(e) => Err(e),
        };
        commands::install::report(&ctx, &result)
    }
}
