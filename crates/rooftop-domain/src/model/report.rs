//! Derived values that make up a solar report

use std::fmt;

use serde::{Deserialize, Serialize};

use super::panel::PanelSpec;

/// How many panels fit and what they are rated for
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SystemSizing {
    pub panel_count: u32,
    pub panel_type: String,
    /// panel_count * rated_power_watts
    pub total_power_watts: f64,
}

impl SystemSizing {
    pub fn new(panel_count: u32, panel_type: &str, spec: &PanelSpec) -> Self {
        Self {
            panel_count,
            panel_type: panel_type.to_string(),
            total_power_watts: f64::from(panel_count) * spec.rated_power_watts,
        }
    }

    /// Nameplate capacity in kW
    pub fn total_power_kw(&self) -> f64 {
        self.total_power_watts / 1000.0
    }
}

/// Expected energy yield
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductionEstimate {
    pub annual_kwh: f64,
    pub daily_kwh: f64,
}

impl ProductionEstimate {
    pub fn from_daily(daily_kwh: f64) -> Self {
        Self {
            annual_kwh: daily_kwh * 365.0,
            daily_kwh,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CostBreakdown {
    pub installation_cost_usd: f64,
    pub annual_maintenance_usd: f64,
}

/// Year in which cumulative savings first cover the installation cost
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaybackPeriod {
    /// 1-indexed year
    Year(u32),
    /// Savings never caught up within the projection horizon
    NotReached,
}

impl PaybackPeriod {
    pub fn year(&self) -> Option<u32> {
        match self {
            PaybackPeriod::Year(year) => Some(*year),
            PaybackPeriod::NotReached => None,
        }
    }

    pub fn is_reached(&self) -> bool {
        matches!(self, PaybackPeriod::Year(_))
    }
}

impl fmt::Display for PaybackPeriod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PaybackPeriod::Year(1) => write!(f, "1 year"),
            PaybackPeriod::Year(year) => write!(f, "{} years", year),
            PaybackPeriod::NotReached => write!(f, "not reached within horizon"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoiProjection {
    pub payback_period: PaybackPeriod,
    /// Savings accumulated over the whole horizon
    pub lifetime_savings_usd: f64,
    /// (lifetime savings - installation cost) / installation cost * 100.
    /// `None` when the installation cost is zero.
    pub roi_percentage: Option<f64>,
    pub horizon_years: u32,
}

/// The complete output of the engine for one roof and one panel type
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SolarReport {
    pub roof_area_m2: f64,
    pub system_size: SystemSizing,
    pub production: ProductionEstimate,
    pub costs: CostBreakdown,
    /// First-year electricity savings
    pub annual_savings_usd: f64,
    pub roi: RoiProjection,
}
