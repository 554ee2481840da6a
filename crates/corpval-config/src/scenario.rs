//! Scenario files.
//!
//! A scenario bundles the inputs of any subset of the three calculations:
//!
//! ```toml
//! [dcf]
//! initial_cash_flow = 1000.0
//! discount_rate = 12.0
//! terminal_growth_rate = 3.0
//!
//! [[dcf.stages]]
//! name = "expansion"
//! years = 3
//! growth_rate = 15.0
//!
//! [wacc]
//! equity_market_value = 50000000.0
//! tax_rate = 0.25
//!
//! [roic]
//! operating_profit = 11968858.0
//! parent_equity = 23310598.0
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, ConfigResult, Validate, ValidationError};
use crate::sections::{DcfSection, RoicSection, WaccSection};

/// File formats a scenario can be read from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScenarioFormat {
    /// TOML document.
    Toml,
    /// JSON document.
    Json,
}

impl ScenarioFormat {
    /// Picks the format from a file extension.
    pub fn from_path(path: &Path) -> ConfigResult<Self> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase);
        match ext.as_deref() {
            Some("toml") => Ok(Self::Toml),
            Some("json") => Ok(Self::Json),
            _ => Err(ConfigError::UnsupportedFormat(path.display().to_string())),
        }
    }
}

/// Inputs for one evaluation run.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Scenario {
    /// DCF inputs.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dcf: Option<DcfSection>,
    /// WACC inputs.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub wacc: Option<WaccSection>,
    /// ROIC inputs.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub roic: Option<RoicSection>,
}

impl Scenario {
    /// Parses a TOML scenario.
    pub fn from_toml_str(content: &str) -> ConfigResult<Self> {
        let scenario: Self = toml::from_str(content)?;
        scenario.validate_or_error()?;
        Ok(scenario)
    }

    /// Parses a JSON scenario.
    pub fn from_json_str(content: &str) -> ConfigResult<Self> {
        let scenario: Self = serde_json::from_str(content)?;
        scenario.validate_or_error()?;
        Ok(scenario)
    }

    /// Loads a scenario, choosing the parser from the file extension.
    pub fn from_file(path: impl AsRef<Path>) -> ConfigResult<Self> {
        let path = path.as_ref();
        let format = ScenarioFormat::from_path(path)?;
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        log::debug!("loading scenario from {}", path.display());

        match format {
            ScenarioFormat::Toml => Self::from_toml_str(&content),
            ScenarioFormat::Json => Self::from_json_str(&content),
        }
    }

    /// Writes the scenario, choosing the format from the file extension.
    pub fn save(&self, path: impl AsRef<Path>) -> ConfigResult<()> {
        let path = path.as_ref();
        let content = match ScenarioFormat::from_path(path)? {
            ScenarioFormat::Toml => self.to_toml_string()?,
            ScenarioFormat::Json => serde_json::to_string_pretty(self)?,
        };
        std::fs::write(path, content).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Serializes to TOML.
    pub fn to_toml_string(&self) -> ConfigResult<String> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// A scenario with every section filled with the default inputs.
    pub fn default_template() -> Self {
        Self {
            dcf: Some(DcfSection::default()),
            wacc: Some(WaccSection {
                equity_market_value: 50_000_000.0,
                pretax_income: Some(11_963_857.0),
                income_tax_expense: Some(3_030_385.0),
                ..WaccSection::default()
            }),
            roic: Some(RoicSection::sample()),
        }
    }

    /// True when no section is present.
    pub fn is_empty(&self) -> bool {
        self.dcf.is_none() && self.wacc.is_none() && self.roic.is_none()
    }
}

impl Validate for Scenario {
    fn validate(&self) -> Vec<ValidationError> {
        let mut errors = Vec::new();
        if self.is_empty() {
            errors.push(ValidationError::new(
                "scenario",
                "at least one of [dcf], [wacc] or [roic] is required",
            ));
        }
        if let Some(dcf) = &self.dcf {
            errors.extend(dcf.validate());
        }
        if let Some(wacc) = &self.wacc {
            errors.extend(wacc.validate());
        }
        errors
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use corpval_analytics::dcf::GrowthSpec;

    #[test]
    fn test_parse_multi_stage_toml() {
        let scenario = Scenario::from_toml_str(
            r#"
            [dcf]
            initial_cash_flow = 1000.0
            years = 10
            discount_rate = 12.0
            terminal_growth_rate = 3.0

            [[dcf.stages]]
            name = "expansion"
            years = 3
            growth_rate = 15.0

            [[dcf.stages]]
            name = "maturity"
            years = 2
            growth_rate = 8.0
            "#,
        )
        .unwrap();

        let inputs = scenario.dcf.unwrap().to_inputs().unwrap();
        assert_eq!(inputs.growth.forecast_years(), 5);
        assert!(matches!(inputs.growth, GrowthSpec::MultiStage { .. }));
    }

    #[test]
    fn test_missing_stage_rate_survives_parsing() {
        let scenario = Scenario::from_toml_str(
            r#"
            [[dcf.stages]]
            name = "draft"
            years = 2
            "#,
        )
        .unwrap();
        let stages = scenario.dcf.unwrap().stages.unwrap();
        assert_eq!(stages[0].growth_rate, None);
    }

    #[test]
    fn test_parse_json() {
        let scenario = Scenario::from_json_str(
            r#"{ "wacc": { "equity_market_value": 100.0, "tax_rate": 0.2 } }"#,
        )
        .unwrap();
        let wacc = scenario.wacc.unwrap();
        assert_eq!(wacc.beta, 1.1);
        assert_eq!(wacc.tax_rate, Some(0.2));
    }

    #[test]
    fn test_empty_scenario_rejected() {
        assert!(matches!(
            Scenario::from_toml_str(""),
            Err(ConfigError::Validation { .. })
        ));
    }

    #[test]
    fn test_unknown_section_rejected() {
        assert!(matches!(
            Scenario::from_toml_str("[capm]\nbeta = 1.0\n"),
            Err(ConfigError::Parse(_))
        ));
    }

    #[test]
    fn test_misspelled_fields_rejected() {
        for content in [
            "[dcf]\ndiscount_rte = 8.0\n",
            "[wacc]\ntax_rate = 0.25\nbeta_value = 1.3\n",
            "[roic]\noperating_proft = 100.0\n",
            "[[dcf.stages]]\nyears = 2\ngrowth = 5.0\n",
        ] {
            match Scenario::from_toml_str(content) {
                Err(ConfigError::Parse(message)) => {
                    assert!(message.contains("unknown field"), "{message}");
                }
                other => panic!("expected a parse error for {content:?}, got {other:?}"),
            }
        }

        assert!(matches!(
            Scenario::from_json_str(r#"{ "dcf": { "discount_rte": 8.0 } }"#),
            Err(ConfigError::Parse(_))
        ));
    }

    #[test]
    fn test_template_round_trips_through_toml() {
        let template = Scenario::default_template();
        let text = template.to_toml_string().unwrap();
        assert!(text.contains("[dcf]"));
        assert_eq!(Scenario::from_toml_str(&text).unwrap(), template);
    }

    #[test]
    fn test_format_from_extension() {
        assert_eq!(
            ScenarioFormat::from_path(Path::new("a/b.TOML")).unwrap(),
            ScenarioFormat::Toml
        );
        assert!(ScenarioFormat::from_path(Path::new("scenario.yaml")).is_err());
    }
}
