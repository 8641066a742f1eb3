//! Column configuration: how to interpret an arbitrary tabular input.
//!
//! A `ColumnConfig` names which column holds the record date, oil volume,
//! gas volume, days-produced count, and status code, plus the set of
//! status codes that mean "shut-in". It is pure data; its only behavior
//! is validation against an input schema.
//!
//! Presets for supported jurisdictions are embedded JSON files (one per
//! state, same schema as a user-supplied `--config` file).

use std::fs::File;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::domain::Jurisdiction;
use crate::error::AppError;

const PRESET_CO: &str = include_str!("presets/co.json");
const PRESET_MT: &str = include_str!("presets/mt.json");
const PRESET_ND: &str = include_str!("presets/nd.json");
const PRESET_WY: &str = include_str!("presets/wy.json");

/// Column semantics and shut-in codes for one record layout.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ColumnConfig {
    /// Header of the column whose date represents its entire month.
    pub date_col: String,
    /// Header for oil production volume (BBLs), if reported.
    #[serde(default)]
    pub oil_prod_col: Option<String>,
    /// Header for gas production volume (MCF), if reported.
    #[serde(default)]
    pub gas_prod_col: Option<String>,
    /// Header for the number of days the well produced in the month.
    #[serde(default)]
    pub days_produced_col: Option<String>,
    /// Header for the well-status code column.
    #[serde(default)]
    pub status_col: Option<String>,
    /// Case-sensitive status codes that mean "shut-in".
    #[serde(default)]
    pub shutin_codes: Vec<String>,
    /// Minimum oil volume (BBLs) to count as producing. Default 0.
    #[serde(default)]
    pub oil_prod_min: f64,
    /// Minimum gas volume (MCF) to count as producing. Default 0.
    #[serde(default)]
    pub gas_prod_min: f64,
    /// Row number (0-indexed) holding the headers in input files.
    #[serde(default)]
    pub header_row: usize,
    /// URL template for the agency's per-well production page, with
    /// `{0}`, `{1}`, ... placeholders for well-specific components.
    #[serde(default)]
    pub prod_url_template: Option<String>,
    /// Whether the agency endpoint needs login credentials.
    #[serde(default)]
    pub requires_credentials: bool,
}

impl ColumnConfig {
    /// Whether this configuration can detect shut-in months.
    pub fn is_configured_shutin(&self) -> bool {
        self.status_col.is_some() && !self.shutin_codes.is_empty()
    }

    /// Whether this configuration can detect production volumes.
    pub fn is_configured_production(&self) -> bool {
        self.oil_prod_col.is_some() || self.gas_prod_col.is_some()
    }

    /// All column headers this configuration expects in the input.
    pub fn configured_columns(&self) -> Vec<&str> {
        let possible = [
            Some(self.date_col.as_str()),
            self.oil_prod_col.as_deref(),
            self.gas_prod_col.as_deref(),
            self.days_produced_col.as_deref(),
            self.status_col.as_deref(),
        ];
        possible.into_iter().flatten().collect()
    }

    /// Internal consistency checks, independent of any input schema.
    pub fn validate(&self) -> Result<(), AppError> {
        if self.date_col.trim().is_empty() {
            return Err(AppError::new(2, "Config error: date_col must not be empty."));
        }
        if !self.shutin_codes.is_empty() && self.status_col.is_none() {
            return Err(AppError::new(
                2,
                "Config error: shutin_codes given without a status_col.",
            ));
        }
        if self.oil_prod_min < 0.0 || self.gas_prod_min < 0.0 {
            return Err(AppError::new(
                2,
                "Config error: production minimums must be non-negative.",
            ));
        }
        if !self.is_configured_production()
            && self.days_produced_col.is_none()
            && self.status_col.is_none()
        {
            return Err(AppError::new(
                2,
                "Config error: no oil, gas, days-produced, or status column configured; \
                 nothing to analyze.",
            ));
        }
        Ok(())
    }

    /// Verify that every configured column exists in the input schema.
    pub fn ensure_columns(&self, headers: &[String]) -> Result<(), AppError> {
        let missing: Vec<&str> = self
            .configured_columns()
            .into_iter()
            .filter(|col| !headers.iter().any(|h| h == col))
            .collect();
        if missing.is_empty() {
            Ok(())
        } else {
            Err(AppError::new(
                2,
                format!(
                    "Input schema is missing configured column(s): {}. Found: {}.",
                    missing.join(", "),
                    headers.join(", ")
                ),
            ))
        }
    }
}

/// Load the built-in configuration for a jurisdiction.
pub fn preset(jurisdiction: Jurisdiction) -> Result<ColumnConfig, AppError> {
    let raw = match jurisdiction {
        Jurisdiction::Co => PRESET_CO,
        Jurisdiction::Mt => PRESET_MT,
        Jurisdiction::Nd => PRESET_ND,
        Jurisdiction::Wy => PRESET_WY,
    };
    let config: ColumnConfig = serde_json::from_str(raw).map_err(|e| {
        AppError::new(
            2,
            format!(
                "Invalid built-in preset for {}: {e}",
                jurisdiction.display_name()
            ),
        )
    })?;
    config.validate()?;
    Ok(config)
}

/// Load a custom configuration from a JSON file.
pub fn load_config_file(path: &Path) -> Result<ColumnConfig, AppError> {
    let file = File::open(path)
        .map_err(|e| AppError::new(2, format!("Failed to open config '{}': {e}", path.display())))?;
    let config: ColumnConfig = serde_json::from_reader(file)
        .map_err(|e| AppError::new(2, format!("Invalid config '{}': {e}", path.display())))?;
    config.validate()?;
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn all_presets_parse_and_validate() {
        for jurisdiction in Jurisdiction::ALL {
            let config = preset(jurisdiction).unwrap();
            assert!(config.is_configured_production(), "{jurisdiction:?}");
            assert!(config.is_configured_shutin(), "{jurisdiction:?}");
        }
    }

    #[test]
    fn colorado_preset_columns() {
        let config = preset(Jurisdiction::Co).unwrap();
        assert_eq!(config.date_col, "First of Month");
        assert_eq!(config.shutin_codes, vec!["SI".to_string()]);
        assert!(config.prod_url_template.is_some());
    }

    #[test]
    fn ensure_columns_reports_missing() {
        let config = preset(Jurisdiction::Co).unwrap();
        let headers = vec!["First of Month".to_string(), "Oil Produced".to_string()];
        let err = config.ensure_columns(&headers).unwrap_err();
        assert_eq!(err.exit_code(), 2);
        assert!(err.to_string().contains("Gas Produced"));
    }

    #[test]
    fn ensure_columns_accepts_superset() {
        let config = preset(Jurisdiction::Co).unwrap();
        let mut headers: Vec<String> = config
            .configured_columns()
            .into_iter()
            .map(String::from)
            .collect();
        headers.push("Extra".to_string());
        assert!(config.ensure_columns(&headers).is_ok());
    }

    #[test]
    fn shutin_codes_require_status_col() {
        let config = ColumnConfig {
            date_col: "Date".to_string(),
            oil_prod_col: Some("Oil".to_string()),
            gas_prod_col: None,
            days_produced_col: None,
            status_col: None,
            shutin_codes: vec!["SI".to_string()],
            oil_prod_min: 0.0,
            gas_prod_min: 0.0,
            header_row: 0,
            prod_url_template: None,
            requires_credentials: false,
        };
        assert!(config.validate().is_err());
    }
}
