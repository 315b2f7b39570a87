use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::domain::DEFAULT_RECORD_COUNT;

/// Mock Data Forge - define a record schema and generate synthetic records
#[derive(Parser, Debug, Clone)]
#[command(name = "forge", version, about, long_about = None)]
pub struct Cli {
    /// Path to the configuration file
    #[arg(long, global = true, env = "FORGE_CONFIG", default_value = "forge.toml")]
    pub config: PathBuf,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Run the generation service
    Serve {
        /// Server host address
        #[arg(long, env = "FORGE_HOST")]
        host: Option<String>,

        /// Server port
        #[arg(long, env = "FORGE_PORT")]
        port: Option<u16>,
    },

    /// Generate records locally from a schema file and write them to disk
    Generate {
        /// Path to the input JSON schema file (e.g. schema.json)
        #[arg(short, long)]
        input: PathBuf,

        /// Path for the output JSON data file (e.g. data.json)
        #[arg(short, long)]
        output: PathBuf,

        /// Number of records to generate
        #[arg(short, long, default_value_t = 1, allow_negative_numbers = true)]
        count: i64,
    },

    /// Send a schema file to a running generation service and show the result
    Request {
        /// Path to the input JSON schema file
        #[arg(short, long)]
        input: PathBuf,

        /// Number of records to request
        #[arg(short, long, default_value_t = DEFAULT_RECORD_COUNT, allow_negative_numbers = true)]
        count: i64,

        /// Base URL of the generation service
        #[arg(long, env = "FORGE_API_URL")]
        api_url: Option<String>,
    },
}
