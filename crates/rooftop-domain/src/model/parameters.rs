//! Numeric assumptions behind the production and financial models
//!
//! All values are owned by configuration and validated once at startup.

use rooftop_types::{Error, Result};
use serde::{Deserialize, Serialize};

/// Fixed installation and maintenance costs (USD)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CostSchedule {
    #[serde(default = "default_base_installation")]
    pub base_installation_usd: f64,

    #[serde(default = "default_labor_per_panel")]
    pub labor_per_panel_usd: f64,

    #[serde(default = "default_permit")]
    pub permit_usd: f64,

    #[serde(default = "default_inspection")]
    pub inspection_usd: f64,

    #[serde(default = "default_annual_cleaning")]
    pub annual_cleaning_usd: f64,

    #[serde(default = "default_annual_monitoring")]
    pub annual_monitoring_usd: f64,

    #[serde(default = "default_annual_base_maintenance")]
    pub annual_base_maintenance_usd: f64,
}

fn default_base_installation() -> f64 {
    2000.0
}

fn default_labor_per_panel() -> f64 {
    150.0
}

fn default_permit() -> f64 {
    500.0
}

fn default_inspection() -> f64 {
    300.0
}

fn default_annual_cleaning() -> f64 {
    150.0
}

fn default_annual_monitoring() -> f64 {
    100.0
}

fn default_annual_base_maintenance() -> f64 {
    100.0
}

impl Default for CostSchedule {
    fn default() -> Self {
        Self {
            base_installation_usd: default_base_installation(),
            labor_per_panel_usd: default_labor_per_panel(),
            permit_usd: default_permit(),
            inspection_usd: default_inspection(),
            annual_cleaning_usd: default_annual_cleaning(),
            annual_monitoring_usd: default_annual_monitoring(),
            annual_base_maintenance_usd: default_annual_base_maintenance(),
        }
    }
}

impl CostSchedule {
    pub fn validate(&self) -> Result<()> {
        let fields = [
            ("costs.base_installation_usd", self.base_installation_usd),
            ("costs.labor_per_panel_usd", self.labor_per_panel_usd),
            ("costs.permit_usd", self.permit_usd),
            ("costs.inspection_usd", self.inspection_usd),
            ("costs.annual_cleaning_usd", self.annual_cleaning_usd),
            ("costs.annual_monitoring_usd", self.annual_monitoring_usd),
            ("costs.annual_base_maintenance_usd", self.annual_base_maintenance_usd),
        ];
        for (name, value) in fields {
            require_non_negative(name, value)?;
        }
        Ok(())
    }
}

/// Production and financial assumptions
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelParameters {
    /// Peak sun hours per day
    #[serde(default = "default_sun_hours")]
    pub sun_hours_per_day: f64,

    /// Inverter, wiring and soiling losses, in [0, 1)
    #[serde(default = "default_system_loss_ratio")]
    pub system_loss_ratio: f64,

    #[serde(default = "default_electricity_rate")]
    pub electricity_rate_usd_per_kwh: f64,

    /// Yearly growth of the electricity price
    #[serde(default = "default_annual_rate_increase")]
    pub annual_rate_increase: f64,

    /// Projection horizon
    #[serde(default = "default_system_lifetime")]
    pub system_lifetime_years: u32,

    #[serde(default)]
    pub costs: CostSchedule,
}

fn default_sun_hours() -> f64 {
    4.5
}

fn default_system_loss_ratio() -> f64 {
    0.14
}

fn default_electricity_rate() -> f64 {
    0.12
}

fn default_annual_rate_increase() -> f64 {
    0.03
}

fn default_system_lifetime() -> u32 {
    25
}

impl Default for ModelParameters {
    fn default() -> Self {
        Self {
            sun_hours_per_day: default_sun_hours(),
            system_loss_ratio: default_system_loss_ratio(),
            electricity_rate_usd_per_kwh: default_electricity_rate(),
            annual_rate_increase: default_annual_rate_increase(),
            system_lifetime_years: default_system_lifetime(),
            costs: CostSchedule::default(),
        }
    }
}

impl ModelParameters {
    /// Check every assumption; the first violation is reported as a configuration error
    pub fn validate(&self) -> Result<()> {
        require_non_negative("sun_hours_per_day", self.sun_hours_per_day)?;
        if self.sun_hours_per_day > 24.0 {
            return Err(Error::invalid_config(format!(
                "sun_hours_per_day cannot exceed 24, got {}",
                self.sun_hours_per_day
            )));
        }
        if !(self.system_loss_ratio >= 0.0 && self.system_loss_ratio < 1.0) {
            return Err(Error::invalid_config(format!(
                "system_loss_ratio must lie in [0, 1), got {}",
                self.system_loss_ratio
            )));
        }
        require_non_negative(
            "electricity_rate_usd_per_kwh",
            self.electricity_rate_usd_per_kwh,
        )?;
        if !(self.annual_rate_increase.is_finite() && self.annual_rate_increase > -1.0) {
            return Err(Error::invalid_config(format!(
                "annual_rate_increase must be greater than -1, got {}",
                self.annual_rate_increase
            )));
        }
        if self.system_lifetime_years == 0 {
            return Err(Error::invalid_config(
                "system_lifetime_years must be at least 1",
            ));
        }
        self.costs.validate()
    }
}

fn require_non_negative(name: &str, value: f64) -> Result<()> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(Error::invalid_config(format!(
            "{} must be a non-negative number, got {}",
            name, value
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let params = ModelParameters::default();
        assert!(params.validate().is_ok());
        assert_eq!(params.system_lifetime_years, 25);
        assert!((params.costs.permit_usd - 500.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_loss_ratio_bounds() {
        let mut params = ModelParameters::default();
        params.system_loss_ratio = 0.0;
        assert!(params.validate().is_ok());

        params.system_loss_ratio = 1.0;
        assert!(params.validate().is_err());

        params.system_loss_ratio = -0.01;
        assert!(params.validate().is_err());

        params.system_loss_ratio = f64::NAN;
        assert!(params.validate().is_err());
    }

    #[test]
    fn test_rejects_bad_values() {
        let mut params = ModelParameters::default();
        params.system_lifetime_years = 0;
        assert!(params.validate().is_err());

        let mut params = ModelParameters::default();
        params.annual_rate_increase = -1.0;
        assert!(params.validate().is_err());

        let mut params = ModelParameters::default();
        params.sun_hours_per_day = 25.0;
        assert!(params.validate().is_err());

        let mut params = ModelParameters::default();
        params.electricity_rate_usd_per_kwh = f64::INFINITY;
        assert!(params.validate().is_err());

        let mut params = ModelParameters::default();
        params.costs.inspection_usd = -300.0;
        let err = params.validate().unwrap_err();
        assert!(err.to_string().contains("costs.inspection_usd"));
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let params: ModelParameters =
            serde_json::from_str(r#"{"sun_hours_per_day": 5.2, "costs": {"permit_usd": 0}}"#)
                .unwrap();
        assert!((params.sun_hours_per_day - 5.2).abs() < f64::EPSILON);
        assert!((params.system_loss_ratio - 0.14).abs() < f64::EPSILON);
        assert!((params.costs.permit_usd - 0.0).abs() < f64::EPSILON);
        assert!((params.costs.base_installation_usd - 2000.0).abs() < f64::EPSILON);
    }
}
