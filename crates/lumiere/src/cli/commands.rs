//! CLI command definitions.

use clap::{Parser, Subcommand, ValueEnum};
use lumiere::{LogFormat, LumiereConfig, LumiereResult};
use std::path::PathBuf;

/// Lumière - AI editorial profile generator with pluggable publishing backends
#[derive(Parser, Debug)]
#[command(name = "lumiere")]
#[command(about = "AI editorial profile generator with pluggable publishing backends", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Command to execute
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Configuration file layered over the bundled defaults
    #[arg(short, long, global = true, env = "LUMIERE_CONFIG")]
    pub config: Option<PathBuf>,

    /// Log line format
    #[arg(long, global = true, default_value = "text")]
    pub log_format: LogFormatArg,
}

impl Cli {
    /// Configuration from `--config`, or the standard search path.
    pub fn load_config(&self) -> LumiereResult<LumiereConfig> {
        match &self.config {
            Some(path) => LumiereConfig::from_file(path),
            None => LumiereConfig::load(),
        }
    }
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Generate a record for a subject
    Generate {
        /// Subject name
        #[arg(long)]
        name: String,

        /// Topical niche, e.g. "Luxury Travel"
        #[arg(long)]
        niche: String,

        /// Physical description used in image prompts
        #[arg(long)]
        details: String,

        /// Publish to the remote backend once built
        #[arg(long)]
        publish: bool,
    },

    /// Draw a random persona and print it as JSON
    Persona,

    /// Record catalog commands
    #[command(flatten)]
    Records(RecordCommands),
}

/// Record catalog subcommands
#[derive(Subcommand, Debug)]
pub enum RecordCommands {
    /// List records, newest first
    List {
        /// Output format
        #[arg(long, default_value = "human")]
        format: OutputFormat,
    },

    /// Print one record as JSON
    Show {
        /// Record id
        id: String,
    },

    /// Other records picked at random
    Related {
        /// Record id
        id: String,

        /// How many to pick
        #[arg(long, default_value = "3")]
        count: usize,
    },

    /// Distinct niche labels
    Niches,

    /// Push a draft to the remote backend
    Publish {
        /// Record id
        id: String,
    },

    /// Remove a record locally and remotely
    Delete {
        /// Record id
        id: String,
    },

    /// Import records from a JSON file (one record or an array)
    Import {
        /// Path to the JSON file
        file: PathBuf,
    },
}

/// Output format options
#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum OutputFormat {
    /// Human-readable format
    Human,
    /// JSON format
    Json,
}

/// Log format options
#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum LogFormatArg {
    /// Human-readable lines
    Text,
    /// One JSON object per line
    Json,
}

impl From<LogFormatArg> for LogFormat {
    fn from(arg: LogFormatArg) -> Self {
        match arg {
            LogFormatArg::Text => LogFormat::Text,
            LogFormatArg::Json => LogFormat::Json,
        }
    }
}
