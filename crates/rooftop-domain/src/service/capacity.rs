//! How many panels physically fit on a roof

use rooftop_types::{Error, Result};

use crate::model::PanelSpec;

/// Share of the usable roof area that can actually carry panels.
///
/// Covers spacing between rows, walkways and fire setbacks. This is a
/// design constant of the model and is deliberately not configurable.
pub const USABLE_AREA_DERATE: f64 = 0.8;

/// Panel count for a usable roof area.
///
/// # Formula
/// panel_count = floor(roof_area_m2 x 0.8 / (width x height))
///
/// Zero is a valid answer (empty roof, or a panel larger than the derated
/// area). Negative, NaN or infinite areas are rejected.
pub fn estimate_panel_count(roof_area_m2: f64, spec: &PanelSpec) -> Result<u32> {
    if !roof_area_m2.is_finite() || roof_area_m2 < 0.0 {
        return Err(Error::InvalidInput(format!(
            "roof area must be a finite, non-negative number of m², got {}",
            roof_area_m2
        )));
    }

    let panel_area = spec.panel_area_m2();
    let count = (roof_area_m2 * USABLE_AREA_DERATE / panel_area).floor();
    if count > f64::from(u32::MAX) {
        return Err(Error::InvalidInput(format!(
            "roof area {} m² yields more panels than can be counted",
            roof_area_m2
        )));
    }

    Ok(count as u32)
}
