//! Values that cross the boundary between the collaborators and the core

use serde::{Deserialize, Serialize};

use crate::error::Error;

/// Qualitative roof description returned by the vision-language model
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoofAnalysis {
    /// Free-text description (orientation, shading, roof type, ...)
    pub description: String,
    /// Model confidence in [0, 1]
    pub confidence: f64,
}

/// Tagged record for a failed collaborator call.
///
/// This is what the presentation layer shows instead of a report; it is
/// never mixed with numbers from a partial calculation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisFailure {
    pub error: String,
    pub confidence_score: f64,
    pub is_suitable: bool,
}

impl From<&Error> for AnalysisFailure {
    fn from(err: &Error) -> Self {
        Self {
            error: err.to_string(),
            confidence_score: 0.0,
            is_suitable: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_failure_record_is_unsuitable() {
        let err = Error::Analysis("backend exited with status 2".to_string());
        let failure = AnalysisFailure::from(&err);
        assert_eq!(failure.confidence_score, 0.0);
        assert!(!failure.is_suitable);
        assert!(failure.error.contains("status 2"));

        let json = serde_json::to_value(&failure).unwrap();
        assert_eq!(json["is_suitable"], serde_json::json!(false));
    }
}
