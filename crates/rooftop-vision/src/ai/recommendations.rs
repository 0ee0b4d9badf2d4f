//! Installation hints derived from the free-text roof description
//!
//! Best effort only. The report math never reads these values, so the
//! keyword matcher can be swapped for structured extraction without
//! touching the engine.

use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InstallationComplexity {
    Low,
    Medium,
}

impl fmt::Display for InstallationComplexity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InstallationComplexity::Low => write!(f, "low"),
            InstallationComplexity::Medium => write!(f, "medium"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recommendations {
    pub panel_type: String,
    pub installation_complexity: InstallationComplexity,
    pub special_considerations: Vec<String>,
}

pub trait Recommender: Send + Sync {
    fn recommend(&self, description: &str, panel_type: &str) -> Recommendations;
}

/// Case-insensitive keyword matching over the description
#[derive(Debug, Clone, Copy, Default)]
pub struct KeywordRecommender;

impl Recommender for KeywordRecommender {
    fn recommend(&self, description: &str, panel_type: &str) -> Recommendations {
        let text = description.to_lowercase();

        let mut special_considerations = Vec::new();
        if text.contains("shading") {
            special_considerations.push("Potential shading issues".to_string());
        }
        if text.contains("obstacles") {
            special_considerations.push("Roof obstacles present".to_string());
        }

        // "flat" wins over "pitched" when both appear
        let installation_complexity = if text.contains("flat") {
            InstallationComplexity::Low
        } else {
            InstallationComplexity::Medium
        };

        Recommendations {
            panel_type: panel_type.to_string(),
            installation_complexity,
            special_considerations,
        }
    }
}
