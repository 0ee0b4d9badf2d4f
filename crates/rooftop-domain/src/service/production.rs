//! Energy yield of a panel array

use crate::model::{PanelSpec, ProductionEstimate};

/// Daily and annual energy production.
///
/// # Formula
/// daily_kwh = panel_count x rated_power_watts x sun_hours x (1 - losses) / 1000
///
/// `system_loss_ratio` is expected to lie in [0, 1); it is checked once when
/// the model parameters are validated, not on every call.
pub fn estimate_production(
    panel_count: u32,
    spec: &PanelSpec,
    sun_hours_per_day: f64,
    system_loss_ratio: f64,
) -> ProductionEstimate {
    let daily_kwh = f64::from(panel_count)
        * spec.rated_power_watts
        * sun_hours_per_day
        * (1.0 - system_loss_ratio)
        / 1000.0;
    ProductionEstimate::from_daily(daily_kwh)
}
