//! CLI definition using clap

use clap::{Parser, Subcommand};
use rooftop_types::OutputFormat;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "rooftop-solar")]
#[command(author = "yuuji")]
#[command(version)]
#[command(about = "Solar potential assessment from rooftop images")]
#[command(long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Output format (json, table). Uses config value if not specified.
    #[arg(long, short = 'f', global = true)]
    pub format: Option<OutputFormat>,

    /// Verbose output (debug logging)
    #[arg(long, short = 'v', global = true)]
    pub verbose: bool,

    /// Panel type id. Uses config value if not specified.
    #[arg(long, short = 'p', global = true)]
    pub panel: Option<String>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Generate a report for a known roof area
    Report {
        /// Usable roof area in m²
        #[arg(long, short = 'a', allow_negative_numbers = true)]
        area: f64,
    },

    /// Compare every panel type in the catalog for one roof area
    Compare {
        /// Usable roof area in m²
        #[arg(long, short = 'a', allow_negative_numbers = true)]
        area: f64,
    },

    /// Assess a single rooftop image
    Analyze {
        /// Path to image file
        image: PathBuf,

        /// Ground area of one pixel in m². Uses config value if not specified.
        #[arg(long, allow_negative_numbers = true)]
        pixel_area: Option<f64>,

        /// Write the roof outline overlay to this PNG
        #[arg(long)]
        outline: Option<PathBuf>,

        /// Skip the AI roof description
        #[arg(long)]
        no_ai: bool,
    },

    /// Assess every image in a folder
    Batch {
        /// Path to folder containing images
        folder: PathBuf,

        /// CSV file for results
        #[arg(long, short = 'o')]
        output: Option<PathBuf>,

        /// Number of parallel assessments. 0 = auto (CPU count). Uses 4 if not specified.
        #[arg(long, short = 'j')]
        jobs: Option<usize>,

        /// Skip the AI roof description
        #[arg(long)]
        no_ai: bool,
    },

    /// List the panel catalog
    Panels,

    /// Manage configuration
    Config {
        /// Show current configuration
        #[arg(long)]
        show: bool,

        /// Set the analyzer command line (empty string clears it)
        #[arg(long)]
        set_analyzer_command: Option<String>,

        /// Set the minimum analysis confidence (0.0-1.0)
        #[arg(long, allow_negative_numbers = true)]
        set_threshold: Option<f64>,

        /// Set the ground area of one pixel in m²
        #[arg(long, allow_negative_numbers = true)]
        set_pixel_area: Option<f64>,

        /// Set the default panel type
        #[arg(long)]
        set_panel: Option<String>,

        /// Set default output format
        #[arg(long)]
        set_output: Option<OutputFormat>,

        /// Set the panel catalog TOML file (empty string uses the built-in catalog)
        #[arg(long)]
        set_catalog: Option<PathBuf>,

        /// Reset to defaults
        #[arg(long)]
        reset: bool,
    },
}
