//! Rooftop solar financial and production engine
//!
//! Converts a usable roof area and a panel choice into a deterministic
//! report: panel count, energy yield, installation cost, payback and ROI.
//! Everything here is a pure function of its inputs; no I/O happens in
//! this crate.

pub mod model;
pub mod service;

pub use model::{
    CostBreakdown, CostSchedule, ModelParameters, PanelCatalog, PanelSpec, PaybackPeriod,
    ProductionEstimate, RoiProjection, SolarReport, SystemSizing,
};
pub use service::ReportGenerator;
