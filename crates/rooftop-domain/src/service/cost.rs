//! Installation and maintenance cost
//!
//! Hardware is priced per physical panel (`panel_count x unit_cost_usd`).
//! There is no cost-per-watt model anywhere in the engine.
//!
//! Maintenance is a flat yearly amount. Real maintenance grows with system
//! size; this model ignores that on purpose.

use crate::model::{CostBreakdown, CostSchedule, PanelSpec};

/// Price of the panels themselves
pub fn hardware_cost(panel_count: u32, spec: &PanelSpec) -> f64 {
    f64::from(panel_count) * spec.unit_cost_usd
}

/// Installation and yearly maintenance cost.
///
/// # Formula
/// installation = panels x unit_cost + base_labor + panels x labor_per_panel + permit + inspection
/// maintenance  = cleaning + monitoring + base_maintenance
///
/// A zero-panel system still carries base labor, permit and inspection:
/// that is the fixed overhead of starting any installation. Callers that
/// want "no panels, no cost" have to special-case `panel_count == 0`.
pub fn estimate_cost(panel_count: u32, spec: &PanelSpec, schedule: &CostSchedule) -> CostBreakdown {
    let labor = schedule.base_installation_usd
        + f64::from(panel_count) * schedule.labor_per_panel_usd;
    let installation_cost_usd = hardware_cost(panel_count, spec)
        + labor
        + schedule.permit_usd
        + schedule.inspection_usd;

    let annual_maintenance_usd = schedule.annual_cleaning_usd
        + schedule.annual_monitoring_usd
        + schedule.annual_base_maintenance_usd;

    CostBreakdown {
        installation_cost_usd,
        annual_maintenance_usd,
    }
}
