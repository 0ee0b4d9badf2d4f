//! Vision-language roof analysis boundary

pub mod backend_impl;
pub mod prompts;
pub mod recommendations;

use rooftop_types::{Error, Result, RoofAnalysis};
use std::path::Path;

/// Minimum confidence for an analysis to be used
pub const DEFAULT_CONFIDENCE_THRESHOLD: f64 = 0.7;

/// Anything that can describe a roof from an image.
///
/// Implementations own their timeout and retry policy; to the caller this
/// is a single blocking call that either yields a description or fails.
pub trait RoofAnalyzer: Send + Sync {
    fn analyze(&self, image_path: &Path) -> Result<RoofAnalysis>;
}

/// Confidence gate
pub fn is_valid(confidence: f64, threshold: f64) -> bool {
    confidence.is_finite() && confidence >= threshold
}

/// Same gate as [`is_valid`], as an error for `?` chains
pub fn check_confidence(analysis: &RoofAnalysis, threshold: f64) -> Result<()> {
    if is_valid(analysis.confidence, threshold) {
        Ok(())
    } else {
        Err(Error::LowConfidence {
            confidence: analysis.confidence,
            threshold,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_valid() {
        assert!(is_valid(0.9, DEFAULT_CONFIDENCE_THRESHOLD));
        assert!(is_valid(0.7, DEFAULT_CONFIDENCE_THRESHOLD));
        assert!(!is_valid(0.69, DEFAULT_CONFIDENCE_THRESHOLD));
        assert!(!is_valid(0.0, DEFAULT_CONFIDENCE_THRESHOLD));
        assert!(!is_valid(f64::NAN, DEFAULT_CONFIDENCE_THRESHOLD));
    }

    #[test]
    fn test_check_confidence() {
        let analysis = RoofAnalysis {
            description: "Pitched roof, light shading".to_string(),
            confidence: 0.5,
        };
        match check_confidence(&analysis, 0.7) {
            Err(Error::LowConfidence {
                confidence,
                threshold,
            }) => {
                assert_eq!(confidence, 0.5);
                assert_eq!(threshold, 0.7);
            }
            other => panic!("expected LowConfidence, got {:?}", other),
        }
        assert!(check_confidence(&analysis, 0.5).is_ok());
    }
}
