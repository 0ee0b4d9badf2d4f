//! CSV export of batch results

use crate::app::BatchOutcome;
use rooftop_types::Result;
use serde::Serialize;
use std::io::Write;
use std::path::Path;

#[derive(Debug, Serialize)]
struct CsvRow<'a> {
    image: String,
    status: &'a str,
    roof_area_m2: Option<f64>,
    panel_type: Option<&'a str>,
    panel_count: Option<u32>,
    annual_kwh: Option<f64>,
    installation_cost_usd: Option<f64>,
    payback_year: Option<String>,
    roi_percentage: Option<f64>,
    error: Option<&'a str>,
}

impl<'a> CsvRow<'a> {
    fn from_outcome(outcome: &'a BatchOutcome) -> Self {
        let image = outcome.image_path.display().to_string();
        match outcome.result {
            Ok(ref assessment) => {
                let report = &assessment.report;
                Self {
                    image,
                    status: "ok",
                    roof_area_m2: Some(round2(assessment.roof_area_m2)),
                    panel_type: Some(&report.system_size.panel_type),
                    panel_count: Some(report.system_size.panel_count),
                    annual_kwh: Some(round2(report.production.annual_kwh)),
                    installation_cost_usd: Some(round2(report.costs.installation_cost_usd)),
                    payback_year: Some(match report.roi.payback_period.year() {
                        Some(year) => year.to_string(),
                        None => "not reached".to_string(),
                    }),
                    roi_percentage: report.roi.roi_percentage.map(round2),
                    error: None,
                }
            }
            Err(ref e) => Self {
                image,
                status: "failed",
                roof_area_m2: None,
                panel_type: None,
                panel_count: None,
                annual_kwh: None,
                installation_cost_usd: None,
                payback_year: None,
                roi_percentage: None,
                error: Some(e),
            },
        }
    }
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Write one CSV row per outcome, with a header row
pub fn write_batch_csv<W: Write>(outcomes: &[BatchOutcome], writer: W) -> Result<()> {
    let mut wtr = csv::Writer::from_writer(writer);
    for outcome in outcomes {
        wtr.serialize(CsvRow::from_outcome(outcome))?;
    }
    wtr.flush()?;
    Ok(())
}

/// Export batch outcomes to a CSV file
pub fn export_batch_csv(outcomes: &[BatchOutcome], output_path: &Path) -> Result<()> {
    let file = std::fs::File::create(output_path)?;
    write_batch_csv(outcomes, file)
}
