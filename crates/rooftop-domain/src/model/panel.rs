//! Panel specifications and the read-only catalog

use std::collections::BTreeMap;

use rooftop_types::{Error, Result};
use serde::{Deserialize, Serialize};

/// Physical and commercial description of one panel model
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PanelSpec {
    /// Conversion efficiency, in (0, 1]
    pub efficiency: f64,
    /// Nameplate output (W)
    pub rated_power_watts: f64,
    /// Module width (m)
    pub width_m: f64,
    /// Module height (m)
    pub height_m: f64,
    /// Purchase price per module (USD)
    pub unit_cost_usd: f64,
}

impl PanelSpec {
    /// Footprint of a single module (m²)
    pub fn panel_area_m2(&self) -> f64 {
        self.width_m * self.height_m
    }

    fn validate(&self, id: &str) -> Result<()> {
        if !(self.efficiency > 0.0 && self.efficiency <= 1.0) {
            return Err(Error::invalid_config(format!(
                "panel '{}': efficiency must lie in (0, 1], got {}",
                id, self.efficiency
            )));
        }
        let positives = [
            ("rated_power_watts", self.rated_power_watts),
            ("width_m", self.width_m),
            ("height_m", self.height_m),
            ("unit_cost_usd", self.unit_cost_usd),
        ];
        for (field, value) in positives {
            if !(value.is_finite() && value > 0.0) {
                return Err(Error::invalid_config(format!(
                    "panel '{}': {} must be a positive number, got {}",
                    id, field, value
                )));
            }
        }
        Ok(())
    }
}

/// Immutable registry of panel specifications keyed by panel-type id.
///
/// Built once at startup and handed to the report generator; lookups of
/// ids that are not registered fail instead of falling back to a default.
#[derive(Debug, Clone, PartialEq)]
pub struct PanelCatalog {
    specs: BTreeMap<String, PanelSpec>,
}

impl PanelCatalog {
    /// Catalog shipped with the tool: a 400 W standard and a 450 W premium module
    pub fn builtin() -> Self {
        let mut specs = BTreeMap::new();
        specs.insert(
            "standard".to_string(),
            PanelSpec {
                efficiency: 0.20,
                rated_power_watts: 400.0,
                width_m: 1.7,
                height_m: 1.0,
                unit_cost_usd: 250.0,
            },
        );
        specs.insert(
            "premium".to_string(),
            PanelSpec {
                efficiency: 0.22,
                rated_power_watts: 450.0,
                width_m: 1.8,
                height_m: 1.1,
                unit_cost_usd: 350.0,
            },
        );
        Self { specs }
    }

    /// Build a catalog from `(id, spec)` pairs, validating every entry
    pub fn from_specs<I, S>(entries: I) -> Result<Self>
    where
        I: IntoIterator<Item = (S, PanelSpec)>,
        S: Into<String>,
    {
        let mut specs = BTreeMap::new();
        for (id, spec) in entries {
            let id = id.into();
            if id.trim().is_empty() {
                return Err(Error::invalid_config("panel id must not be empty"));
            }
            spec.validate(&id)?;
            if specs.insert(id.clone(), spec).is_some() {
                return Err(Error::invalid_config(format!(
                    "panel '{}' is defined more than once",
                    id
                )));
            }
        }
        if specs.is_empty() {
            return Err(Error::invalid_config("panel catalog is empty"));
        }
        Ok(Self { specs })
    }

    /// Look up a panel by id
    pub fn lookup(&self, panel_type_id: &str) -> Result<&PanelSpec> {
        self.specs
            .get(panel_type_id)
            .ok_or_else(|| Error::UnknownPanelType(panel_type_id.to_string()))
    }

    pub fn contains(&self, panel_type_id: &str) -> bool {
        self.specs.contains_key(panel_type_id)
    }

    /// Registered ids in sorted order
    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.specs.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &PanelSpec)> {
        self.specs.iter().map(|(id, spec)| (id.as_str(), spec))
    }

    pub fn len(&self) -> usize {
        self.specs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.specs.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn spec() -> PanelSpec {
        PanelSpec {
            efficiency: 0.21,
            rated_power_watts: 420.0,
            width_m: 1.75,
            height_m: 1.05,
            unit_cost_usd: 280.0,
        }
    }

    #[test]
    fn test_builtin_has_standard_and_premium() {
        let catalog = PanelCatalog::builtin();
        let standard = catalog.lookup("standard").unwrap();
        assert!((standard.rated_power_watts - 400.0).abs() < f64::EPSILON);
        assert!((standard.panel_area_m2() - 1.7).abs() < 1e-12);

        let premium = catalog.lookup("premium").unwrap();
        assert!((premium.panel_area_m2() - 1.98).abs() < 1e-12);
        assert_eq!(catalog.ids().collect::<Vec<_>>(), vec!["premium", "standard"]);
    }

    #[test]
    fn test_builtin_entries_are_valid() {
        for (id, spec) in PanelCatalog::builtin().iter() {
            assert!(spec.validate(id).is_ok(), "{} should be valid", id);
            assert!(spec.efficiency < 1.0);
        }
    }

    #[test]
    fn test_unknown_panel_type() {
        let catalog = PanelCatalog::builtin();
        match catalog.lookup("bifacial") {
            Err(Error::UnknownPanelType(id)) => assert_eq!(id, "bifacial"),
            other => panic!("expected UnknownPanelType, got {:?}", other),
        }
        // Ids are exact; no case folding or fallback
        assert!(catalog.lookup("Standard").is_err());
        assert!(catalog.lookup("").is_err());
    }

    #[test]
    fn test_from_specs() {
        let catalog = PanelCatalog::from_specs([("mid", spec())]).unwrap();
        assert_eq!(catalog.len(), 1);
        assert!(catalog.contains("mid"));
        assert!(!catalog.contains("standard"));
    }

    #[test]
    fn test_from_specs_rejects_bad_entries() {
        let mut bad = spec();
        bad.efficiency = 1.2;
        assert!(PanelCatalog::from_specs([("x", bad)]).is_err());

        let mut bad = spec();
        bad.width_m = 0.0;
        assert!(PanelCatalog::from_specs([("x", bad)]).is_err());

        let mut bad = spec();
        bad.unit_cost_usd = f64::NAN;
        assert!(PanelCatalog::from_specs([("x", bad)]).is_err());

        assert!(PanelCatalog::from_specs([("  ", spec())]).is_err());
        assert!(PanelCatalog::from_specs([("a", spec()), ("a", spec())]).is_err());
        assert!(PanelCatalog::from_specs(Vec::<(String, PanelSpec)>::new()).is_err());
    }

    #[test]
    fn test_efficiency_of_one_is_allowed() {
        let mut ideal = spec();
        ideal.efficiency = 1.0;
        assert!(PanelCatalog::from_specs([("ideal", ideal)]).is_ok());
    }
}
