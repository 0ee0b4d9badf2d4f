//! Shared vocabulary for the rooftop-solar workspace
//!
//! Every layer speaks these types: the one `Error` enum (and `Result`
//! alias) that the engine, the image/AI collaborators and the CLI all
//! return, the `RoofAnalysis` handed from the analyzer to the assessment,
//! the tagged `AnalysisFailure` shown in place of a report, and the
//! table/JSON switch used by config and the command line.

mod error;
mod types;

pub use error::*;
pub use types::*;

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

/// How reports and assessments are printed
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Aligned human-readable text
    #[default]
    Table,
    /// Pretty-printed JSON records
    Json,
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            OutputFormat::Table => "table",
            OutputFormat::Json => "json",
        })
    }
}
