pub mod cli;
pub mod parameters;
pub mod toml_config;

#[cfg(feature = "cli")]
use clap::Parser;

#[cfg(feature = "cli")]
#[derive(Debug, Clone, Parser)]
#[command(name = "mesh-vibration")]
#[command(about = "Prescribed vibration motion for a rigid moving-mesh boundary")]
pub struct CliConfig {
    /// Path to TOML run file
    #[arg(short, long, default_value = "motion.toml")]
    pub config: String,

    /// Override the motion kind from the run file
    #[arg(long)]
    pub kind: Option<String>,

    /// Evaluate a single instant and print the velocity
    #[arg(long)]
    pub time: Option<f64>,

    /// Show the time schedule without writing output
    #[arg(long)]
    pub dry_run: bool,

    #[arg(short, long, help = "Enable verbose output")]
    pub verbose: bool,
}
