//! Vision module - roof segmentation and AI roof description
//!
//! Both parts are collaborators of the report engine: segmentation turns
//! an image into a usable area, the analyzer turns it into a qualitative
//! description. Neither knows anything about panels or money.

pub mod ai;
pub mod segmentation;

pub use ai::backend_impl::{CommandAnalyzer, DEFAULT_MAX_IMAGE_SIZE};
pub use ai::recommendations::{
    InstallationComplexity, KeywordRecommender, Recommendations, Recommender,
};
pub use ai::{check_confidence, is_valid, RoofAnalyzer, DEFAULT_CONFIDENCE_THRESHOLD};
pub use segmentation::{mask_area, outline, segment, RoofMask, DEFAULT_PIXEL_AREA_M2};

/// Extract JSON from response (handles markdown code blocks)
pub fn extract_json_from_response(response: &str) -> String {
    let response = response.trim();

    if response.starts_with("```") {
        if let Some(end) = response.rfind("```") {
            let start = response.find('\n').map(|i| i + 1).unwrap_or(response.len());
            if start < end {
                return response[start..end].trim().to_string();
            }
        }
    }

    if let Some(start) = response.find('{') {
        if let Some(end) = response.rfind('}') {
            if start < end {
                return response[start..=end].to_string();
            }
        }
    }

    response.to_string()
}
