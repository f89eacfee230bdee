use anyhow::Result;
use clap::Parser;
use std::collections::HashMap;
use tracing_subscriber::EnvFilter;

use crate::cli::args::{Args, Commands};
use crate::cli::commands::{run_demo_command, run_output_command, run_prompt_command};
use crate::config::ScangateConfig;

/// Exit status when a gate blocks the scanned text.
const BLOCKED_EXIT_CODE: i32 = 1;

pub struct RootCommand;

impl RootCommand {
    pub async fn execute() -> Result<()> {
        let args = Args::parse();

        init_tracing(args.verbosity);

        if args.generate_config {
            println!("{}", ScangateConfig::generate_default_config());
            return Ok(());
        }

        let env_vars: HashMap<String, String> = std::env::vars().collect();
        let config = ScangateConfig::load_with_precedence(args.config.as_deref(), &env_vars, &args)?;
        tracing::debug!("Resolved config: {:?}", config);

        let command = args.command.clone().unwrap_or_default();
        let blocked = match command {
            Commands::Demo { prompt, output } => {
                run_demo_command(&config, &prompt, &output).await?;
                false
            }
            Commands::Prompt { text, scanners } => {
                run_prompt_command(&config, &text, scanners.as_deref()).await?
            }
            Commands::Output {
                text,
                prompt,
                scanners,
            } => run_output_command(&config, &prompt, &text, scanners.as_deref()).await?,
        };

        if blocked {
            std::process::exit(BLOCKED_EXIT_CODE);
        }

        Ok(())
    }
}

fn default_log_level(verbosity: u8) -> &'static str {
    match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    }
}

/// Installs the global subscriber. Called once per process, from `execute`.
/// Logs go to stderr; `RUST_LOG` wins over `-v`.
fn init_tracing(verbosity: u8) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_log_level(verbosity)));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
