//! Use cases

pub mod assessment_service;
pub mod batch;

pub use assessment_service::{
    assess_rooftop, describe_roof, measure_roof_area, AssessmentOptions, RooftopAssessment,
};
pub use batch::{run_batch, BatchOptions, BatchOutcome, ProgressCallback, RoofAnalyzerHandle};
