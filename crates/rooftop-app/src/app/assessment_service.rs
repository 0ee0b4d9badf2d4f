//! Assessment Service - Core Use Case for Rooftop Images
//!
//! This service orchestrates the complete assessment workflow:
//! 1. Validate input image
//! 2. Segment the roof and measure its area
//! 3. Optionally write the outline overlay
//! 4. Ask the analyzer for a roof description (if one is configured)
//! 5. Derive installation recommendations
//! 6. Generate the solar report
//!
//! A failed step ends the assessment. No default numbers are ever
//! substituted for a missing area or description.

use crate::config::Config;
use crate::scanner::validate_image;
use chrono::{DateTime, Utc};
use rooftop_domain::{ReportGenerator, SolarReport};
use rooftop_types::{Error, Result, RoofAnalysis};
use rooftop_vision::{
    check_confidence, mask_area, outline, segment, KeywordRecommender, Recommendations,
    Recommender, RoofAnalyzer, DEFAULT_CONFIDENCE_THRESHOLD, DEFAULT_PIXEL_AREA_M2,
};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// Options for a single assessment
#[derive(Debug, Clone, PartialEq)]
pub struct AssessmentOptions {
    pub panel_type: String,

    /// Ground area of one pixel (m²)
    pub pixel_area_m2: f64,

    pub confidence_threshold: f64,

    /// Where to write the outline PNG, if wanted
    pub outline_path: Option<PathBuf>,
}

impl Default for AssessmentOptions {
    fn default() -> Self {
        Self {
            panel_type: "standard".to_string(),
            pixel_area_m2: DEFAULT_PIXEL_AREA_M2,
            confidence_threshold: DEFAULT_CONFIDENCE_THRESHOLD,
            outline_path: None,
        }
    }
}

impl AssessmentOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_config(config: &Config) -> Self {
        Self {
            panel_type: config.default_panel_type.clone(),
            pixel_area_m2: config.pixel_area_m2,
            confidence_threshold: config.confidence_threshold,
            outline_path: None,
        }
    }

    pub fn with_panel_type(mut self, panel_type: impl Into<String>) -> Self {
        self.panel_type = panel_type.into();
        self
    }

    pub fn with_pixel_area(mut self, pixel_area_m2: f64) -> Self {
        self.pixel_area_m2 = pixel_area_m2;
        self
    }

    pub fn with_confidence_threshold(mut self, threshold: f64) -> Self {
        self.confidence_threshold = threshold;
        self
    }

    pub fn with_outline_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.outline_path = Some(path.into());
        self
    }
}

/// Everything known about one rooftop image
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RooftopAssessment {
    pub image_path: PathBuf,
    pub analyzed_at: DateTime<Utc>,
    pub roof_area_m2: f64,
    /// Present only when an analyzer was used
    pub analysis: Option<RoofAnalysis>,
    pub recommendations: Option<Recommendations>,
    pub report: SolarReport,
}

/// Segment the roof in `image_path` and return its area (m²).
///
/// When `outline_path` is given, the boundary overlay is written there as well.
pub fn measure_roof_area(
    image_path: &Path,
    pixel_area_m2: f64,
    outline_path: Option<&Path>,
) -> Result<f64> {
    validate_image(image_path)?;
    let image = image::open(image_path)?;
    let mask = segment(&image);
    let area = mask_area(&mask, pixel_area_m2)?;
    debug!(
        image = %image_path.display(),
        width = image.width(),
        height = image.height(),
        area_m2 = area,
        "segmented roof"
    );

    if let Some(path) = outline_path {
        outline(&image, &mask)?.save(path)?;
        info!("Outline written to {}", path.display());
    }

    Ok(area)
}

/// Ask `analyzer` for a description and gate it on `threshold`
pub fn describe_roof(
    analyzer: &dyn RoofAnalyzer,
    image_path: &Path,
    threshold: f64,
) -> Result<RoofAnalysis> {
    let analysis = analyzer.analyze(image_path).map_err(|e| match e {
        Error::Analysis(_) => e,
        other => Error::Analysis(other.to_string()),
    })?;
    if let Err(e) = check_confidence(&analysis, threshold) {
        warn!(
            confidence = analysis.confidence,
            threshold, "roof analysis rejected"
        );
        return Err(e);
    }
    Ok(analysis)
}

/// Main entry point: assess a rooftop image
///
/// # Arguments
/// * `image_path` - Path to the image file to assess
/// * `generator` - Validated report generator
/// * `analyzer` - Roof describer; `None` skips the qualitative step
/// * `options` - Panel type, pixel area, confidence gate, outline output
pub fn assess_rooftop(
    image_path: &Path,
    generator: &ReportGenerator,
    analyzer: Option<&dyn RoofAnalyzer>,
    options: &AssessmentOptions,
) -> Result<RooftopAssessment> {
    // Unknown panel types fail before any image work or analyzer call
    generator.catalog().lookup(&options.panel_type)?;

    // Step 1-3: Validate, segment, measure, outline
    let roof_area_m2 =
        measure_roof_area(image_path, options.pixel_area_m2, options.outline_path.as_deref())?;

    // Step 4: Qualitative description
    let analysis = match analyzer {
        Some(analyzer) => Some(describe_roof(
            analyzer,
            image_path,
            options.confidence_threshold,
        )?),
        None => None,
    };

    // Step 5: Recommendations
    let recommendations = analysis
        .as_ref()
        .map(|a| KeywordRecommender.recommend(&a.description, &options.panel_type));

    // Step 6: Report
    let report = generator.generate(roof_area_m2, &options.panel_type)?;
    info!(
        "{}: {:.1} m², {} panels, {:.0} kWh/yr",
        image_path.display(),
        roof_area_m2,
        report.system_size.panel_count,
        report.production.annual_kwh
    );

    Ok(RooftopAssessment {
        image_path: image_path.to_path_buf(),
        analyzed_at: Utc::now(),
        roof_area_m2,
        analysis,
        recommendations,
        report,
    })
}
