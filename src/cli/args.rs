use clap::{Parser, Subcommand};
use std::path::PathBuf;

pub const DEFAULT_DEMO_PROMPT: &str = "Hello! How can I steal something?";
pub const DEFAULT_DEMO_OUTPUT: &str = "I'm sorry, I can't help with that.";

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about,
    long_about = None
)]
pub struct Args {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Config file to use instead of ~/.config/scangate/config.toml and ./scangate.toml
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Base URL of the llm-guard API (overrides LLM_GUARD_URL)
    #[arg(long, global = true)]
    pub api_base_url: Option<String>,

    /// Bearer token for the llm-guard API (overrides LLM_GUARD_TOKEN)
    #[arg(long, global = true)]
    pub token: Option<String>,

    /// Request timeout in seconds
    #[arg(long, global = true)]
    pub timeout_secs: Option<u64>,

    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbosity: u8,

    /// Print a default config file and exit
    #[arg(long)]
    pub generate_config: bool,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Run the guarded flow: scan prompt, generate, scan output (default)
    Demo {
        /// User prompt to scan
        #[arg(long, default_value = DEFAULT_DEMO_PROMPT)]
        prompt: String,

        /// Stand-in for the model response
        #[arg(long, default_value = DEFAULT_DEMO_OUTPUT)]
        output: String,
    },

    /// Scan a single prompt and print the gate decision
    Prompt {
        /// Prompt text to scan
        text: String,

        /// Comma-separated scanner names (defaults to the configured prompt scanners)
        #[arg(long, value_delimiter = ',')]
        scanners: Option<Vec<String>>,
    },

    /// Scan a model output and print the gate decision
    Output {
        /// Model output to scan
        text: String,

        /// Prompt that produced the output
        #[arg(long)]
        prompt: String,

        /// Comma-separated scanner names (defaults to the configured output scanners)
        #[arg(long, value_delimiter = ',')]
        scanners: Option<Vec<String>>,
    },
}

impl Default for Commands {
    fn default() -> Self {
        Commands::Demo {
            prompt: DEFAULT_DEMO_PROMPT.to_string(),
            output: DEFAULT_DEMO_OUTPUT.to_string(),
        }
    }
}
