//! Domain model types

pub mod panel;
pub mod parameters;
pub mod report;

pub use panel::{PanelCatalog, PanelSpec};
pub use parameters::{CostSchedule, ModelParameters};
pub use report::{
    CostBreakdown, PaybackPeriod, ProductionEstimate, RoiProjection, SolarReport, SystemSizing,
};
