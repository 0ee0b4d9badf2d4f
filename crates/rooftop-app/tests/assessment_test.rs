//! End-to-end assessment pipeline on synthetic rooftop images

use image::{DynamicImage, GrayImage, Luma};
use rooftop_app::app::{
    assess_rooftop, run_batch, AssessmentOptions, BatchOptions, RoofAnalyzerHandle,
};
use rooftop_app::export::export_batch_csv;
use rooftop_domain::{PaybackPeriod, ReportGenerator};
use rooftop_types::{AnalysisFailure, Error, Result, RoofAnalysis};
use rooftop_vision::{mask_area, segment, InstallationComplexity, RoofAnalyzer};
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use tempfile::{tempdir, TempDir};

struct StubAnalyzer {
    description: &'static str,
    confidence: f64,
    calls: AtomicUsize,
}

impl StubAnalyzer {
    fn new(description: &'static str, confidence: f64) -> Self {
        Self {
            description,
            confidence,
            calls: AtomicUsize::new(0),
        }
    }
}

impl RoofAnalyzer for StubAnalyzer {
    fn analyze(&self, _image_path: &Path) -> Result<RoofAnalysis> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(RoofAnalysis {
            description: self.description.to_string(),
            confidence: self.confidence,
        })
    }
}

struct FailingAnalyzer;

impl RoofAnalyzer for FailingAnalyzer {
    fn analyze(&self, _image_path: &Path) -> Result<RoofAnalysis> {
        Err(Error::Analysis("model endpoint unreachable".to_string()))
    }
}

/// 120x120 bright image with a dark 40x40 "roof" in the middle
fn write_roof_image(dir: &TempDir, name: &str) -> PathBuf {
    let img = GrayImage::from_fn(120, 120, |x, y| {
        if (40..80).contains(&x) && (40..80).contains(&y) {
            Luma([40])
        } else {
            Luma([200])
        }
    });
    let path = dir.path().join(name);
    img.save(&path).unwrap();
    path
}

fn write_blank_image(dir: &TempDir, name: &str) -> PathBuf {
    let path = dir.path().join(name);
    GrayImage::from_pixel(64, 64, Luma([128])).save(&path).unwrap();
    path
}

fn expected_area(path: &Path, pixel_area: f64) -> f64 {
    let img: DynamicImage = image::open(path).unwrap();
    mask_area(&segment(&img), pixel_area).unwrap()
}

#[test]
fn test_assessment_without_analyzer() {
    let dir = tempdir().unwrap();
    let image = write_roof_image(&dir, "roof.png");
    let generator = ReportGenerator::with_defaults();
    let options = AssessmentOptions::new().with_pixel_area(0.25);

    let assessment = assess_rooftop(&image, &generator, None, &options).unwrap();

    let area = expected_area(&image, 0.25);
    assert!(area > 0.0);
    assert!((assessment.roof_area_m2 - area).abs() < 1e-9);
    assert!(assessment.analysis.is_none());
    assert!(assessment.recommendations.is_none());
    assert_eq!(assessment.image_path, image);

    // The report is exactly what the engine produces for the measured area
    let direct = generator.generate(area, "standard").unwrap();
    assert_eq!(assessment.report, direct);
}

#[test]
fn test_assessment_with_analyzer() {
    let dir = tempdir().unwrap();
    let image = write_roof_image(&dir, "roof.png");
    let generator = ReportGenerator::with_defaults();
    let analyzer = StubAnalyzer::new("Flat roof, some shading from a chimney", 0.85);
    let options = AssessmentOptions::new()
        .with_panel_type("premium")
        .with_pixel_area(1.0);

    let assessment = assess_rooftop(&image, &generator, Some(&analyzer), &options).unwrap();

    assert_eq!(analyzer.calls.load(Ordering::SeqCst), 1);
    let analysis = assessment.analysis.as_ref().unwrap();
    assert!((analysis.confidence - 0.85).abs() < f64::EPSILON);

    let recommendations = assessment.recommendations.as_ref().unwrap();
    assert_eq!(recommendations.panel_type, "premium");
    assert_eq!(
        recommendations.installation_complexity,
        InstallationComplexity::Low
    );
    assert_eq!(
        recommendations.special_considerations,
        vec!["Potential shading issues".to_string()]
    );
    assert_eq!(assessment.report.system_size.panel_type, "premium");
}

#[test]
fn test_low_confidence_is_a_hard_stop() {
    let dir = tempdir().unwrap();
    let image = write_roof_image(&dir, "roof.png");
    let generator = ReportGenerator::with_defaults();
    let analyzer = StubAnalyzer::new("Pitched roof", 0.5);

    let err = assess_rooftop(
        &image,
        &generator,
        Some(&analyzer),
        &AssessmentOptions::new(),
    )
    .unwrap_err();

    match err {
        Error::LowConfidence {
            confidence,
            threshold,
        } => {
            assert!((confidence - 0.5).abs() < f64::EPSILON);
            assert!((threshold - 0.7).abs() < f64::EPSILON);
        }
        other => panic!("expected LowConfidence, got {:?}", other),
    }

    // A lower gate lets the same description through
    let options = AssessmentOptions::new().with_confidence_threshold(0.5);
    assert!(assess_rooftop(&image, &generator, Some(&analyzer), &options).is_ok());
}

#[test]
fn test_analyzer_failure_yields_failure_record() {
    let dir = tempdir().unwrap();
    let image = write_roof_image(&dir, "roof.png");
    let generator = ReportGenerator::with_defaults();

    let err = assess_rooftop(
        &image,
        &generator,
        Some(&FailingAnalyzer),
        &AssessmentOptions::new(),
    )
    .unwrap_err();
    assert!(matches!(err, Error::Analysis(_)));

    let failure = AnalysisFailure::from(&err);
    assert!(!failure.is_suitable);
    assert_eq!(failure.confidence_score, 0.0);
    assert!(failure.error.contains("unreachable"));
}

#[test]
fn test_blank_image_gives_empty_system() {
    let dir = tempdir().unwrap();
    let image = write_blank_image(&dir, "blank.png");
    let generator = ReportGenerator::with_defaults();

    let assessment =
        assess_rooftop(&image, &generator, None, &AssessmentOptions::new()).unwrap();

    assert_eq!(assessment.roof_area_m2, 0.0);
    assert_eq!(assessment.report.system_size.panel_count, 0);
    assert_eq!(assessment.report.production.annual_kwh, 0.0);
    assert_eq!(assessment.report.roi.payback_period, PaybackPeriod::NotReached);
}

#[test]
fn test_outline_is_written() {
    let dir = tempdir().unwrap();
    let image = write_roof_image(&dir, "roof.png");
    let outline_path = dir.path().join("roof-outline.png");
    let options = AssessmentOptions::new().with_outline_path(&outline_path);

    assess_rooftop(&image, &ReportGenerator::with_defaults(), None, &options).unwrap();

    let outlined = image::open(&outline_path).unwrap();
    assert_eq!((outlined.width(), outlined.height()), (120, 120));
}

#[test]
fn test_missing_image_is_file_not_found() {
    let dir = tempdir().unwrap();
    let analyzer = StubAnalyzer::new("Flat roof", 0.9);
    let err = assess_rooftop(
        &dir.path().join("nope.png"),
        &ReportGenerator::with_defaults(),
        Some(&analyzer),
        &AssessmentOptions::new(),
    )
    .unwrap_err();

    assert!(matches!(err, Error::FileNotFound(_)));
    assert_eq!(analyzer.calls.load(Ordering::SeqCst), 0);
}

#[test]
fn test_batch_and_csv_export() {
    let dir = tempdir().unwrap();
    let images = vec![
        write_roof_image(&dir, "a.png"),
        dir.path().join("missing.png"),
        write_blank_image(&dir, "c.png"),
    ];
    let analyzer: RoofAnalyzerHandle = Arc::new(StubAnalyzer::new("Pitched roof", 0.9));
    let options = BatchOptions::new(AssessmentOptions::new()).with_jobs(2);

    let outcomes = run_batch(
        images.clone(),
        Arc::new(ReportGenerator::with_defaults()),
        Some(analyzer),
        &options,
    );

    assert_eq!(outcomes.len(), 3);
    assert!(outcomes[0].is_success());
    assert!(!outcomes[1].is_success());
    assert!(outcomes[2].is_success());
    assert_eq!(outcomes[1].image_path, images[1]);

    let csv_path = dir.path().join("batch.csv");
    export_batch_csv(&outcomes, &csv_path).unwrap();

    let mut reader = csv::Reader::from_path(&csv_path).unwrap();
    let rows: Vec<csv::StringRecord> = reader.records().map(|r| r.unwrap()).collect();
    assert_eq!(rows.len(), 3);
    assert_eq!(&rows[0][1], "ok");
    assert_eq!(&rows[1][1], "failed");
    assert!(rows[1][9].contains("missing.png"));
    assert_eq!(&rows[2][7], "not reached");
}
