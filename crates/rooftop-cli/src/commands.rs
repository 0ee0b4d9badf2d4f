//! Command handlers

use crate::cli::{Cli, Commands};
use crate::output::{
    output_assessment, output_batch, output_comparison, output_failure, output_panels,
    output_report,
};
use rooftop_app::app::{
    assess_rooftop, run_batch, AssessmentOptions, BatchOptions, RoofAnalyzerHandle,
};
use rooftop_app::config::Config;
use rooftop_app::export::export_batch_csv;
use rooftop_app::scanner::scan_directory;
use rooftop_domain::ReportGenerator;
use rooftop_types::{AnalysisFailure, Error, OutputFormat, Result};
use rooftop_vision::RoofAnalyzer;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{debug, info};

/// Execute CLI command
pub fn execute(cli: Cli) -> Result<()> {
    let config = Config::load()?;
    let output_format = cli.format.unwrap_or(config.output_format);

    if let Commands::Config {
        show,
        set_analyzer_command,
        set_threshold,
        set_pixel_area,
        set_panel,
        set_output,
        set_catalog,
        reset,
    } = cli.command
    {
        return cmd_config(
            config,
            show,
            ConfigUpdate {
                analyzer_command: set_analyzer_command,
                threshold: set_threshold,
                pixel_area: set_pixel_area,
                panel: set_panel,
                output: set_output,
                catalog: set_catalog,
            },
            reset,
        );
    }

    // Everything else needs a validated engine; bad config stops here
    let generator = config.report_generator()?;
    let panel_type = cli
        .panel
        .clone()
        .unwrap_or_else(|| config.default_panel_type.clone());
    debug!(panel_type = %panel_type, output = %output_format, "starting");

    match cli.command {
        Commands::Report { area } => {
            let report = generator.generate(area, &panel_type)?;
            output_report(output_format, &report)
        }

        Commands::Compare { area } => {
            let reports = generator.generate_all(area)?;
            output_comparison(output_format, &reports)
        }

        Commands::Analyze {
            image,
            pixel_area,
            outline,
            no_ai,
        } => {
            let mut options = AssessmentOptions::from_config(&config).with_panel_type(panel_type);
            if let Some(pixel_area) = pixel_area {
                options = options.with_pixel_area(pixel_area);
            }
            if let Some(path) = outline {
                options = options.with_outline_path(path);
            }
            cmd_analyze(&config, &generator, image, &options, no_ai, output_format)
        }

        Commands::Batch {
            folder,
            output,
            jobs,
            no_ai,
        } => {
            // Use CLI jobs if specified, otherwise default 4. 0 = auto CPU count.
            let job_count = match jobs {
                Some(0) => num_cpus::get(),
                Some(n) => n,
                None => 4,
            };
            let options = AssessmentOptions::from_config(&config).with_panel_type(panel_type);
            cmd_batch(
                &config,
                generator,
                folder,
                output,
                BatchOptions::new(options)
                    .with_jobs(job_count)
                    .with_progress_bar(true),
                no_ai,
                output_format,
            )
        }

        Commands::Panels => output_panels(output_format, generator.catalog()),

        Commands::Config { .. } => Ok(()),
    }
}

fn analyzer_for(config: &Config, no_ai: bool) -> Result<Option<RoofAnalyzerHandle>> {
    if no_ai {
        return Ok(None);
    }
    let analyzer = config.analyzer()?;
    if analyzer.is_none() {
        info!("No analyzer command configured; skipping roof description");
    }
    Ok(analyzer.map(|a| Arc::new(a) as RoofAnalyzerHandle))
}

fn cmd_analyze(
    config: &Config,
    generator: &ReportGenerator,
    image: PathBuf,
    options: &AssessmentOptions,
    no_ai: bool,
    output_format: OutputFormat,
) -> Result<()> {
    let analyzer = analyzer_for(config, no_ai)?;
    let analyzer_ref: Option<&dyn RoofAnalyzer> = analyzer.as_deref();

    match assess_rooftop(&image, generator, analyzer_ref, options) {
        Ok(assessment) => output_assessment(output_format, &assessment),
        Err(e) => {
            if let Some(failure) = failure_record(output_format, &e) {
                output_failure(&failure)?;
            }
            Err(e)
        }
    }
}

/// Tagged record printed for a failed image or analyzer step under JSON output
fn failure_record(output_format: OutputFormat, err: &Error) -> Option<AnalysisFailure> {
    (output_format == OutputFormat::Json && err.is_collaborator_failure())
        .then(|| AnalysisFailure::from(err))
}

fn cmd_batch(
    config: &Config,
    generator: ReportGenerator,
    folder: PathBuf,
    output: Option<PathBuf>,
    options: BatchOptions,
    no_ai: bool,
    output_format: OutputFormat,
) -> Result<()> {
    let images = scan_directory(&folder)?;
    if images.is_empty() {
        return Err(Error::FileNotFound(format!(
            "No images found in {}",
            folder.display()
        )));
    }
    info!(
        "Found {} images to assess with {} parallel jobs",
        images.len(),
        options.jobs
    );

    let analyzer = analyzer_for(config, no_ai)?;
    let outcomes = run_batch(images, Arc::new(generator), analyzer, &options);

    if let Some(ref path) = output {
        export_batch_csv(&outcomes, path)?;
        info!("Results written to {}", path.display());
    }

    output_batch(output_format, &outcomes)
}

/// Requested config changes; `None` leaves a field alone
struct ConfigUpdate {
    analyzer_command: Option<String>,
    threshold: Option<f64>,
    pixel_area: Option<f64>,
    panel: Option<String>,
    output: Option<OutputFormat>,
    catalog: Option<PathBuf>,
}

impl ConfigUpdate {
    /// Apply to `config`; returns whether anything changed
    fn apply(self, config: &mut Config) -> bool {
        let mut modified = false;

        if let Some(cmd) = self.analyzer_command {
            config.analyzer_command = if cmd.trim().is_empty() { None } else { Some(cmd) };
            modified = true;
        }

        if let Some(threshold) = self.threshold {
            config.confidence_threshold = threshold;
            modified = true;
        }

        if let Some(pixel_area) = self.pixel_area {
            config.pixel_area_m2 = pixel_area;
            modified = true;
        }

        if let Some(panel) = self.panel {
            config.default_panel_type = panel;
            modified = true;
        }

        if let Some(output_format) = self.output {
            config.output_format = output_format;
            modified = true;
        }

        if let Some(path) = self.catalog {
            config.catalog_path = if path.as_os_str().is_empty() { None } else { Some(path) };
            modified = true;
        }

        modified
    }
}

fn cmd_config(mut config: Config, show: bool, update: ConfigUpdate, reset: bool) -> Result<()> {
    if reset {
        let config = Config::default();
        config.save()?;
        println!("Configuration reset to defaults");
        println!("\n{}", config);
        return Ok(());
    }

    let modified = update.apply(&mut config);

    if modified {
        // Never persist a config the engine would refuse to start with
        config.report_generator()?;
        config.save()?;
        println!("Configuration updated");
    }

    if show || !modified {
        println!("{}", config);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn empty_update() -> ConfigUpdate {
        ConfigUpdate {
            analyzer_command: None,
            threshold: None,
            pixel_area: None,
            panel: None,
            output: None,
            catalog: None,
        }
    }

    #[test]
    fn test_empty_update_changes_nothing() {
        let mut config = Config::default();
        assert!(!empty_update().apply(&mut config));
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_update_sets_and_clears() {
        let mut config = Config::default();
        let update = ConfigUpdate {
            analyzer_command: Some("vlm-bridge".to_string()),
            threshold: Some(0.55),
            panel: Some("premium".to_string()),
            output: Some(OutputFormat::Json),
            ..empty_update()
        };
        assert!(update.apply(&mut config));
        assert_eq!(config.analyzer_command.as_deref(), Some("vlm-bridge"));
        assert!((config.confidence_threshold - 0.55).abs() < f64::EPSILON);
        assert_eq!(config.default_panel_type, "premium");
        assert_eq!(config.output_format, OutputFormat::Json);

        let clear = ConfigUpdate {
            analyzer_command: Some(String::new()),
            catalog: Some(PathBuf::new()),
            ..empty_update()
        };
        assert!(clear.apply(&mut config));
        assert!(config.analyzer_command.is_none());
        assert!(config.catalog_path.is_none());
    }

    #[test]
    fn test_failure_record_for_collaborator_errors() {
        let image_err = Error::InvalidImageFormat("Unsupported image format: roof.gif".to_string());
        let failure = failure_record(OutputFormat::Json, &image_err).unwrap();
        assert!(!failure.is_suitable);
        assert_eq!(failure.confidence_score, 0.0);
        assert!(failure.error.contains("roof.gif"));

        let low = Error::LowConfidence {
            confidence: 0.3,
            threshold: 0.7,
        };
        assert!(failure_record(OutputFormat::Json, &low).is_some());
        assert!(failure_record(OutputFormat::Table, &low).is_none());
        assert!(failure_record(
            OutputFormat::Json,
            &Error::UnknownPanelType("bifacial".to_string())
        )
        .is_none());
    }

    #[test]
    fn test_negative_area_is_invalid_input() {
        let generator = ReportGenerator::with_defaults();
        assert!(matches!(
            generator.generate(-5.0, "standard"),
            Err(Error::InvalidInput(_))
        ));
    }

    #[test]
    fn test_no_ai_skips_analyzer() {
        let mut config = Config::default();
        config.analyzer_command = Some("vlm-bridge".to_string());
        assert!(analyzer_for(&config, true).unwrap().is_none());
        assert!(analyzer_for(&config, false).unwrap().is_some());
    }
}
