use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Slack bot answering indicator lookups from a MISP instance
#[derive(Parser, Debug)]
#[command(name = "mispbot")]
#[command(version)]
#[command(about = "Slack bot answering indicator lookups from a MISP instance", long_about = None)]
pub struct Args {
    /// Path to the settings file (defaults to ./settings.yml when present)
    #[arg(short, long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub mode: Mode,
}

#[derive(Subcommand, Debug, PartialEq, Eq)]
pub enum Mode {
    /// Answer Slack payloads received over Socket Mode
    Serve {
        /// Read payloads from stdin, one JSON document per line
        #[arg(long)]
        stdin: bool,
        /// Print replies to stdout instead of posting them to Slack (implies --stdin)
        #[arg(long)]
        stdout: bool,
    },
    /// Answer a single command and print the reply
    Query {
        /// Command text, e.g. `searchip 93.184.216.34`
        #[arg(required = true, trailing_var_arg = true, allow_hyphen_values = true)]
        text: Vec<String>,
    },
}

impl Args {
    pub fn parse_args() -> Self {
        Self::parse()
    }
}

impl Mode {
    /// Command text for a one-shot query
    pub fn query_text(&self) -> Option<String> {
        match self {
            Mode::Query { text } => Some(text.join(" ")),
            Mode::Serve { .. } => None,
        }
    }
}
