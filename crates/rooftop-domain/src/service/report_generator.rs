//! Report generation - runs sizing, production, cost and payback in order
//!
//! The generator owns its validated parameters and catalog. It holds no
//! mutable state, so one instance can be shared between threads.

use rooftop_types::Result;
use tracing::debug;

use crate::model::{
    CostBreakdown, ModelParameters, PanelCatalog, ProductionEstimate, SolarReport, SystemSizing,
};
use crate::service::{annual_savings, estimate_cost, estimate_panel_count, estimate_production, project_roi};

#[derive(Debug, Clone)]
pub struct ReportGenerator {
    params: ModelParameters,
    catalog: PanelCatalog,
}

impl ReportGenerator {
    /// Build a generator, rejecting invalid parameters up front
    pub fn new(params: ModelParameters, catalog: PanelCatalog) -> Result<Self> {
        params.validate()?;
        Ok(Self { params, catalog })
    }

    /// Generator with default parameters and the built-in catalog
    pub fn with_defaults() -> Self {
        Self {
            params: ModelParameters::default(),
            catalog: PanelCatalog::builtin(),
        }
    }

    pub fn params(&self) -> &ModelParameters {
        &self.params
    }

    pub fn catalog(&self) -> &PanelCatalog {
        &self.catalog
    }

    /// Panel count and nameplate power for a roof
    pub fn sizing(&self, roof_area_m2: f64, panel_type_id: &str) -> Result<SystemSizing> {
        let spec = self.catalog.lookup(panel_type_id)?;
        let panel_count = estimate_panel_count(roof_area_m2, spec)?;
        Ok(SystemSizing::new(panel_count, panel_type_id, spec))
    }

    pub fn production(&self, panel_count: u32, panel_type_id: &str) -> Result<ProductionEstimate> {
        let spec = self.catalog.lookup(panel_type_id)?;
        Ok(estimate_production(
            panel_count,
            spec,
            self.params.sun_hours_per_day,
            self.params.system_loss_ratio,
        ))
    }

    pub fn cost(&self, panel_count: u32, panel_type_id: &str) -> Result<CostBreakdown> {
        let spec = self.catalog.lookup(panel_type_id)?;
        Ok(estimate_cost(panel_count, spec, &self.params.costs))
    }

    /// Full report for one roof and one panel type.
    ///
    /// Either every field is computed or an error is returned; there is no
    /// partially filled report.
    pub fn generate(&self, roof_area_m2: f64, panel_type_id: &str) -> Result<SolarReport> {
        let system_size = self.sizing(roof_area_m2, panel_type_id)?;
        let production = self.production(system_size.panel_count, panel_type_id)?;
        let costs = self.cost(system_size.panel_count, panel_type_id)?;
        let savings = annual_savings(
            production.annual_kwh,
            self.params.electricity_rate_usd_per_kwh,
        )?;
        let roi = project_roi(
            costs.installation_cost_usd,
            savings,
            self.params.annual_rate_increase,
            self.params.system_lifetime_years,
        )?;

        debug!(
            roof_area_m2,
            panel_type = panel_type_id,
            panels = system_size.panel_count,
            annual_kwh = production.annual_kwh,
            payback = %roi.payback_period,
            "generated solar report"
        );

        Ok(SolarReport {
            roof_area_m2,
            system_size,
            production,
            costs,
            annual_savings_usd: savings,
            roi,
        })
    }

    /// One report per catalog entry for the same roof, in catalog order
    pub fn generate_all(&self, roof_area_m2: f64) -> Result<Vec<SolarReport>> {
        self.catalog
            .ids()
            .map(|id| self.generate(roof_area_m2, id))
            .collect()
    }
}
