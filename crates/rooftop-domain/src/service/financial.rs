//! Savings projection, payback period and lifetime ROI

use rooftop_types::{Error, Result};

use crate::model::{PaybackPeriod, RoiProjection};

/// First-year electricity savings (USD) for a given production (kWh)
pub fn annual_savings(annual_production_kwh: f64, electricity_rate_usd_per_kwh: f64) -> Result<f64> {
    require_non_negative("annual production", annual_production_kwh)?;
    require_non_negative("electricity rate", electricity_rate_usd_per_kwh)?;
    Ok(annual_production_kwh * electricity_rate_usd_per_kwh)
}

/// Simulate savings year by year over `horizon_years`.
///
/// Savings for year 1 are `annual_savings_year1`; each following year
/// grows by `annual_rate_increase`. The payback period is the first
/// (1-indexed) year whose cumulative savings reach the installation cost,
/// or [`PaybackPeriod::NotReached`] if that never happens inside the
/// horizon.
pub fn project_roi(
    installation_cost: f64,
    annual_savings_year1: f64,
    annual_rate_increase: f64,
    horizon_years: u32,
) -> Result<RoiProjection> {
    require_non_negative("installation cost", installation_cost)?;
    require_non_negative("annual savings", annual_savings_year1)?;
    if !(annual_rate_increase.is_finite() && annual_rate_increase > -1.0) {
        return Err(Error::InvalidInput(format!(
            "annual rate increase must be greater than -1, got {}",
            annual_rate_increase
        )));
    }

    let mut cumulative_savings = 0.0;
    let mut current_year_savings = annual_savings_year1;
    let mut payback_period = PaybackPeriod::NotReached;

    for year in 1..=horizon_years {
        cumulative_savings += current_year_savings;
        if !payback_period.is_reached() && cumulative_savings >= installation_cost {
            payback_period = PaybackPeriod::Year(year);
        }
        current_year_savings *= 1.0 + annual_rate_increase;
    }

    let roi_percentage = if installation_cost > 0.0 {
        Some((cumulative_savings - installation_cost) / installation_cost * 100.0)
    } else {
        None
    };

    Ok(RoiProjection {
        payback_period,
        lifetime_savings_usd: cumulative_savings,
        roi_percentage,
        horizon_years,
    })
}

fn require_non_negative(name: &str, value: f64) -> Result<()> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(Error::InvalidInput(format!(
            "{} must be a finite, non-negative number, got {}",
            name, value
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_annual_savings() {
        let savings = annual_savings(12995.46, 0.12).unwrap();
        assert!((savings - 1559.4552).abs() < 1e-9);
    }

    #[test]
    fn test_annual_savings_rejects_negative() {
        assert!(annual_savings(-1.0, 0.12).is_err());
        assert!(annual_savings(100.0, f64::NAN).is_err());
    }

    #[test]
    fn test_reference_scenario() {
        // 23 standard panels: cost 12000, year-1 savings 1559.4552, +3%/yr
        let roi = project_roi(12000.0, 1559.4552, 0.03, 25).unwrap();
        assert_eq!(roi.payback_period, PaybackPeriod::Year(8));
        assert!((roi.lifetime_savings_usd - 56856.589334816).abs() < 1e-6);
        assert!((roi.roi_percentage.unwrap() - 373.804911123).abs() < 1e-6);
        assert_eq!(roi.horizon_years, 25);
    }

    #[test]
    fn test_zero_cost_pays_back_in_first_year() {
        let roi = project_roi(0.0, 100.0, 0.03, 25).unwrap();
        assert_eq!(roi.payback_period, PaybackPeriod::Year(1));
        assert_eq!(roi.roi_percentage, None);
    }

    #[test]
    fn test_zero_savings_never_pays_back() {
        for horizon in [1, 5, 25, 100] {
            let roi = project_roi(2800.0, 0.0, 0.03, horizon).unwrap();
            assert_eq!(roi.payback_period, PaybackPeriod::NotReached);
            assert_eq!(roi.lifetime_savings_usd, 0.0);
            assert!((roi.roi_percentage.unwrap() + 100.0).abs() < 1e-12);
        }
    }

    #[test]
    fn test_not_reached_is_not_last_year() {
        // 10 years of flat 100/yr savings is 1000 < 1001
        let roi = project_roi(1001.0, 100.0, 0.0, 10).unwrap();
        assert_eq!(roi.payback_period, PaybackPeriod::NotReached);
        assert!(roi.roi_percentage.unwrap() < 0.0);
    }

    #[test]
    fn test_payback_on_exact_equality() {
        let roi = project_roi(1000.0, 100.0, 0.0, 25).unwrap();
        assert_eq!(roi.payback_period, PaybackPeriod::Year(10));
    }

    #[test]
    fn test_flat_savings_without_growth() {
        let roi = project_roi(1000.0, 250.0, 0.0, 20).unwrap();
        assert_eq!(roi.payback_period, PaybackPeriod::Year(4));
        assert!((roi.lifetime_savings_usd - 5000.0).abs() < 1e-9);
        assert!((roi.roi_percentage.unwrap() - 400.0).abs() < 1e-9);
    }

    #[test]
    fn test_declining_prices() {
        // Savings shrink 50% per year: 100 + 50 + 25 + ... never reaches 200
        let roi = project_roi(200.0, 100.0, -0.5, 20).unwrap();
        assert_eq!(roi.payback_period, PaybackPeriod::NotReached);
    }

    #[test]
    fn test_zero_horizon() {
        let roi = project_roi(500.0, 100.0, 0.03, 0).unwrap();
        assert_eq!(roi.payback_period, PaybackPeriod::NotReached);
        assert_eq!(roi.lifetime_savings_usd, 0.0);
    }

    #[test]
    fn test_invalid_inputs() {
        assert!(matches!(
            project_roi(-1.0, 100.0, 0.03, 25),
            Err(Error::InvalidInput(_))
        ));
        assert!(matches!(
            project_roi(1000.0, f64::NAN, 0.03, 25),
            Err(Error::InvalidInput(_))
        ));
        assert!(matches!(
            project_roi(1000.0, 100.0, -1.0, 25),
            Err(Error::InvalidInput(_))
        ));
    }
}
