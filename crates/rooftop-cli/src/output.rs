//! Output formatting module

use rooftop_app::app::{BatchOutcome, RooftopAssessment};
use rooftop_domain::{PanelCatalog, SolarReport};
use rooftop_types::{AnalysisFailure, OutputFormat, Result};
use serde_json::json;

fn print_json<T: serde::Serialize + ?Sized>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn roi_label(report: &SolarReport) -> String {
    match report.roi.roi_percentage {
        Some(pct) => format!("{:.1}%", pct),
        None => "n/a".to_string(),
    }
}

fn print_report_table(report: &SolarReport) {
    let size = &report.system_size;
    println!("\nSolar Report");
    println!("============");
    println!("Roof area:         {:.1} m²", report.roof_area_m2);
    println!("Panel type:        {}", size.panel_type);
    println!("Panels:            {}", size.panel_count);
    println!("System size:       {:.2} kW", size.total_power_kw());

    println!("\n--- Production ---");
    println!("Daily:             {:.2} kWh", report.production.daily_kwh);
    println!("Annual:            {:.0} kWh", report.production.annual_kwh);

    println!("\n--- Costs ---");
    println!("Installation:      ${:.2}", report.costs.installation_cost_usd);
    println!("Maintenance:       ${:.2}/yr", report.costs.annual_maintenance_usd);

    println!("\n--- Return ---");
    println!("Year-1 savings:    ${:.2}", report.annual_savings_usd);
    println!("Payback:           {}", report.roi.payback_period);
    println!(
        "Lifetime savings:  ${:.2} ({} years)",
        report.roi.lifetime_savings_usd, report.roi.horizon_years
    );
    println!("ROI:               {}", roi_label(report));
}

pub fn output_report(output_format: OutputFormat, report: &SolarReport) -> Result<()> {
    match output_format {
        OutputFormat::Json => print_json(report),
        OutputFormat::Table => {
            print_report_table(report);
            Ok(())
        }
    }
}

pub fn output_comparison(output_format: OutputFormat, reports: &[SolarReport]) -> Result<()> {
    if output_format == OutputFormat::Json {
        return print_json(reports);
    }

    println!(
        "\n{:<12} {:>7} {:>9} {:>12} {:>12} {:>10} {:>9}",
        "Panel", "Panels", "kW", "kWh/yr", "Cost", "Payback", "ROI"
    );
    println!("{}", "-".repeat(77));
    for report in reports {
        let payback = match report.roi.payback_period.year() {
            Some(year) => format!("{} yr", year),
            None => "-".to_string(),
        };
        println!(
            "{:<12} {:>7} {:>9.2} {:>12.0} {:>12.2} {:>10} {:>9}",
            report.system_size.panel_type,
            report.system_size.panel_count,
            report.system_size.total_power_kw(),
            report.production.annual_kwh,
            report.costs.installation_cost_usd,
            payback,
            roi_label(report)
        );
    }
    Ok(())
}

pub fn output_assessment(output_format: OutputFormat, assessment: &RooftopAssessment) -> Result<()> {
    if output_format == OutputFormat::Json {
        return print_json(assessment);
    }

    println!("\nRooftop Assessment");
    println!("==================");
    println!("Image:             {}", assessment.image_path.display());
    println!(
        "Analyzed at:       {}",
        assessment.analyzed_at.format("%Y-%m-%d %H:%M:%S UTC")
    );

    if let Some(ref analysis) = assessment.analysis {
        println!("Confidence:        {:.0}%", analysis.confidence * 100.0);
        println!("\nRoof description:");
        println!("{}", analysis.description);
    }

    if let Some(ref rec) = assessment.recommendations {
        println!("\nInstallation complexity: {}", rec.installation_complexity);
        for note in &rec.special_considerations {
            println!("  - {}", note);
        }
    }

    print_report_table(&assessment.report);
    Ok(())
}

/// JSON record for a failed collaborator step; never mixed with report numbers
pub fn output_failure(failure: &AnalysisFailure) -> Result<()> {
    print_json(failure)
}

pub fn output_batch(output_format: OutputFormat, outcomes: &[BatchOutcome]) -> Result<()> {
    let successful = outcomes.iter().filter(|o| o.is_success()).count();
    let failed = outcomes.len() - successful;

    if output_format == OutputFormat::Json {
        let entries: Vec<_> = outcomes
            .iter()
            .map(|o| match o.result {
                Ok(ref assessment) => json!({
                    "image_path": o.image_path,
                    "status": "ok",
                    "assessment": assessment,
                }),
                Err(ref e) => json!({
                    "image_path": o.image_path,
                    "status": "failed",
                    "error": e,
                }),
            })
            .collect();
        return print_json(&json!({
            "total_processed": outcomes.len(),
            "successful": successful,
            "failed": failed,
            "entries": entries,
        }));
    }

    println!("\nBatch Results");
    println!("=============");
    println!("Processed: {} ({} ok, {} failed)\n", outcomes.len(), successful, failed);
    println!(
        "{:<40} {:>10} {:>7} {:>12} {:>9}",
        "Image", "Area m²", "Panels", "kWh/yr", "ROI"
    );
    println!("{}", "-".repeat(82));
    for outcome in outcomes {
        let name = outcome
            .image_path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or("?");
        match outcome.result {
            Ok(ref a) => println!(
                "{:<40} {:>10.1} {:>7} {:>12.0} {:>9}",
                name,
                a.roof_area_m2,
                a.report.system_size.panel_count,
                a.report.production.annual_kwh,
                roi_label(&a.report)
            ),
            Err(ref e) => println!("{:<40} FAILED: {}", name, e),
        }
    }
    Ok(())
}

pub fn output_panels(output_format: OutputFormat, catalog: &PanelCatalog) -> Result<()> {
    if output_format == OutputFormat::Json {
        let panels: Vec<_> = catalog
            .iter()
            .map(|(id, spec)| {
                json!({
                    "id": id,
                    "efficiency": spec.efficiency,
                    "rated_power_watts": spec.rated_power_watts,
                    "width_m": spec.width_m,
                    "height_m": spec.height_m,
                    "unit_cost_usd": spec.unit_cost_usd,
                })
            })
            .collect();
        return print_json(&panels);
    }

    println!(
        "\n{:<12} {:>10} {:>8} {:>12} {:>10}",
        "Panel", "Efficiency", "Watts", "Size (m)", "Unit $"
    );
    println!("{}", "-".repeat(56));
    for (id, spec) in catalog.iter() {
        println!(
            "{:<12} {:>9.0}% {:>8.0} {:>12} {:>10.2}",
            id,
            spec.efficiency * 100.0,
            spec.rated_power_watts,
            format!("{}x{}", spec.width_m, spec.height_m),
            spec.unit_cost_usd
        );
    }
    Ok(())
}
