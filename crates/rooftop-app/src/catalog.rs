//! Panel catalog loading from TOML
//!
//! ```toml
//! [[panels]]
//! id = "standard"
//! efficiency = 0.20
//! rated_power_watts = 400.0
//! width_m = 1.0
//! height_m = 1.7
//! unit_cost_usd = 200.0
//! ```

use rooftop_domain::{PanelCatalog, PanelSpec};
use rooftop_types::{ConfigError, Error, Result};
use serde::Deserialize;
use std::path::Path;

#[derive(Debug, Deserialize)]
struct CatalogFile {
    #[serde(default)]
    panels: Vec<PanelEntry>,
}

#[derive(Debug, Deserialize)]
struct PanelEntry {
    id: String,
    efficiency: f64,
    rated_power_watts: f64,
    width_m: f64,
    height_m: f64,
    unit_cost_usd: f64,
}

impl PanelEntry {
    fn into_spec(self) -> (String, PanelSpec) {
        (
            self.id,
            PanelSpec {
                efficiency: self.efficiency,
                rated_power_watts: self.rated_power_watts,
                width_m: self.width_m,
                height_m: self.height_m,
                unit_cost_usd: self.unit_cost_usd,
            },
        )
    }
}

/// Load a panel catalog from a TOML file
pub fn load_catalog_file(path: &Path) -> Result<PanelCatalog> {
    if !path.exists() {
        return Err(Error::FileNotFound(path.display().to_string()));
    }
    let content = std::fs::read_to_string(path)?;
    parse_catalog(&content).map_err(|e| match e {
        Error::Configuration(ConfigError::ParseError(msg)) => Error::Configuration(
            ConfigError::ParseError(format!("{}: {}", path.display(), msg)),
        ),
        other => other,
    })
}

/// Parse catalog TOML; every spec is validated
pub fn parse_catalog(content: &str) -> Result<PanelCatalog> {
    let file: CatalogFile =
        toml::from_str(content).map_err(|e| ConfigError::ParseError(e.to_string()))?;
    let catalog = PanelCatalog::from_specs(file.panels.into_iter().map(PanelEntry::into_spec))?;
    tracing::debug!(panel_types = catalog.len(), "loaded panel catalog");
    Ok(catalog)
}

#[cfg(test)]
mod tests {
    use super::*;

    const TWO_PANELS: &str = r#"
[[panels]]
id = "standard"
efficiency = 0.20
rated_power_watts = 400.0
width_m = 1.0
height_m = 1.7
unit_cost_usd = 200.0

[[panels]]
id = "thin-film"
efficiency = 0.12
rated_power_watts = 150.0
width_m = 0.6
height_m = 1.2
unit_cost_usd = 90.0
"#;

    #[test]
    fn test_parse_catalog() {
        let catalog = parse_catalog(TWO_PANELS).unwrap();
        assert_eq!(catalog.len(), 2);
        let thin = catalog.lookup("thin-film").unwrap();
        assert!((thin.panel_area_m2() - 0.72).abs() < 1e-9);
        assert!(!catalog.contains("premium"));
    }

    #[test]
    fn test_empty_catalog_rejected() {
        assert!(parse_catalog("").is_err());
    }

    #[test]
    fn test_bad_values_rejected() {
        let bad = TWO_PANELS.replace("efficiency = 0.12", "efficiency = 1.5");
        assert!(parse_catalog(&bad).is_err());
    }

    #[test]
    fn test_malformed_toml_is_parse_error() {
        assert!(matches!(
            parse_catalog("[[panels]\nid = "),
            Err(Error::Configuration(ConfigError::ParseError(_)))
        ));
    }

    #[test]
    fn test_missing_file() {
        assert!(matches!(
            load_catalog_file(Path::new("/nonexistent/panels.toml")),
            Err(Error::FileNotFound(_))
        ));
    }
}
