use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(author, version, about = "Fire-alarm control panel configurator", long_about = None)]
pub struct Cli {
    /// Set the logging level
    #[arg(long, default_value = "info")]
    pub log_level: tracing::Level,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run the configurator over a project file
    Configure {
        /// Module catalog sheet (CSV)
        #[arg(long)]
        catalog: PathBuf,
        /// Placement-rule sheet (CSV)
        #[arg(long)]
        placement: PathBuf,
        /// Optional pricing-override document (JSON)
        #[arg(long)]
        pricing: Option<PathBuf>,
        /// Project file with answers and BOQ (JSON)
        #[arg(long)]
        project: PathBuf,
        /// Write per-panel results to this file instead of a summary
        #[arg(short, long)]
        out: Option<PathBuf>,
        /// Solver time budget in seconds
        #[arg(long, default_value_t = 10.0)]
        max_time: f64,
    },
    /// Summarise a loaded catalog (module and category counts)
    InspectCatalog {
        /// Module catalog sheet (CSV)
        #[arg(long)]
        catalog: PathBuf,
        /// Optional pricing-override document (JSON)
        #[arg(long)]
        pricing: Option<PathBuf>,
    },
    /// Export the per-panel configuration requests without optimising
    Plan {
        /// Project file with answers and BOQ (JSON)
        #[arg(long)]
        project: PathBuf,
        /// Write the configuration array to this file instead of stdout
        #[arg(short, long)]
        out: Option<PathBuf>,
    },
}
