//! Domain services

pub mod capacity;
pub mod cost;
pub mod financial;
pub mod production;
pub mod report_generator;

pub use capacity::{estimate_panel_count, USABLE_AREA_DERATE};
pub use cost::{estimate_cost, hardware_cost};
pub use financial::{annual_savings, project_roi};
pub use production::estimate_production;
pub use report_generator::ReportGenerator;
