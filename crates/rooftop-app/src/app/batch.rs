//! Parallel assessment of many rooftop images
//!
//! Workers pull the next image index from a shared counter; every image is
//! assessed independently, so one failure never affects the others.

use super::assessment_service::{assess_rooftop, AssessmentOptions, RooftopAssessment};
use indicatif::{ProgressBar, ProgressStyle};
use rooftop_domain::ReportGenerator;
use rooftop_vision::RoofAnalyzer;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::thread;
use tracing::{debug, warn};

/// Analyzer shared across workers
pub type RoofAnalyzerHandle = Arc<dyn RoofAnalyzer>;

/// Called after each image finishes, from the worker thread
pub type ProgressCallback = Arc<dyn Fn(&Path) + Send + Sync>;

#[derive(Clone)]
pub struct BatchOptions {
    pub assessment: AssessmentOptions,
    /// Worker threads, clamped to `1..=images.len()`
    pub jobs: usize,
    /// Draw an indicatif progress bar on stderr
    pub show_progress: bool,
    pub on_progress: Option<ProgressCallback>,
}

impl BatchOptions {
    pub fn new(assessment: AssessmentOptions) -> Self {
        Self {
            assessment,
            jobs: 1,
            show_progress: false,
            on_progress: None,
        }
    }

    pub fn with_jobs(mut self, jobs: usize) -> Self {
        self.jobs = jobs;
        self
    }

    pub fn with_progress_bar(mut self, enabled: bool) -> Self {
        self.show_progress = enabled;
        self
    }

    pub fn with_progress_callback(mut self, callback: ProgressCallback) -> Self {
        self.on_progress = Some(callback);
        self
    }
}

/// Result for a single image
#[derive(Debug, Clone)]
pub struct BatchOutcome {
    pub image_path: PathBuf,
    pub result: std::result::Result<RooftopAssessment, String>,
}

impl BatchOutcome {
    pub fn is_success(&self) -> bool {
        self.result.is_ok()
    }
}

fn progress_bar(len: usize) -> ProgressBar {
    let pb = ProgressBar::new(len as u64);
    if let Ok(style) = ProgressStyle::default_bar().template(
        "{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({eta}) {msg}",
    ) {
        pb.set_style(style.progress_chars("#>-"));
    }
    pb
}

/// Assess every image on a worker pool; outcomes come back in input order
pub fn run_batch(
    images: Vec<PathBuf>,
    generator: Arc<ReportGenerator>,
    analyzer: Option<RoofAnalyzerHandle>,
    options: &BatchOptions,
) -> Vec<BatchOutcome> {
    let total = images.len();
    if total == 0 {
        return Vec::new();
    }
    let jobs = options.jobs.clamp(1, total);
    debug!(images = total, jobs, "starting batch");

    let pb = if options.show_progress {
        progress_bar(total)
    } else {
        ProgressBar::hidden()
    };

    let slots: Arc<Mutex<Vec<Option<BatchOutcome>>>> = Arc::new(Mutex::new(vec![None; total]));
    let images = Arc::new(images);
    let next_index = Arc::new(AtomicUsize::new(0));

    let mut handles = Vec::with_capacity(jobs);
    for worker_id in 0..jobs {
        let images = Arc::clone(&images);
        let next_index = Arc::clone(&next_index);
        let slots = Arc::clone(&slots);
        let generator = Arc::clone(&generator);
        let analyzer = analyzer.clone();
        let assessment = options.assessment.clone();
        let on_progress = options.on_progress.clone();
        let pb = pb.clone();

        handles.push(thread::spawn(move || loop {
            let idx = next_index.fetch_add(1, Ordering::SeqCst);
            if idx >= images.len() {
                break;
            }
            let image = &images[idx];
            let filename = image
                .file_name()
                .and_then(|n| n.to_str())
                .unwrap_or("")
                .to_string();
            pb.set_message(format!("[W{}] {}", worker_id, filename));

            let result = assess_rooftop(image, &generator, analyzer.as_deref(), &assessment)
                .map_err(|e| e.to_string());
            if let Err(ref e) = result {
                warn!("Failed to assess {}: {}", image.display(), e);
            }

            slots.lock().unwrap_or_else(|p| p.into_inner())[idx] = Some(BatchOutcome {
                image_path: image.clone(),
                result,
            });

            if let Some(ref callback) = on_progress {
                callback(image);
            }
            pb.inc(1);
        }));
    }

    for handle in handles {
        if handle.join().is_err() {
            warn!("batch worker panicked");
        }
    }
    pb.finish_with_message("Complete");

    let slots = match Arc::try_unwrap(slots) {
        Ok(mutex) => mutex.into_inner().unwrap_or_else(|p| p.into_inner()),
        Err(shared) => {
            let guard = shared.lock().unwrap_or_else(|p| p.into_inner());
            guard.clone()
        }
    };

    // A slot is only empty if its worker panicked mid-image
    slots
        .into_iter()
        .zip(images.iter())
        .map(|(slot, image)| {
            slot.unwrap_or_else(|| BatchOutcome {
                image_path: image.clone(),
                result: Err("assessment aborted".to_string()),
            })
        })
        .collect()
}
