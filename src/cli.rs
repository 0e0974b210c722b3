use clap::Parser;
use std::path::PathBuf;

/// Mock API server - serves configurable fake data from templates
#[derive(Parser, Debug, Clone)]
#[command(name = "mimus", version, about, long_about = None)]
pub struct Cli {
    /// Path to the configuration file
    #[arg(short, long, env = "MIMUS_CONFIG", default_value = "mimus.toml")]
    pub config: PathBuf,

    /// Server host address
    #[arg(long, env = "MIMUS_HOST")]
    pub host: Option<String>,

    /// Server port
    #[arg(long, env = "MIMUS_PORT")]
    pub port: Option<u16>,
}
