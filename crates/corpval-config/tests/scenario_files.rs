//! Integration tests for loading and saving scenario files.

use approx::assert_relative_eq;
use corpval_analytics::prelude::*;
use corpval_config::{ConfigError, Scenario};
use tempfile::tempdir;

#[test]
fn template_saved_as_toml_and_json_loads_back() {
    let dir = tempdir().unwrap();
    let template = Scenario::default_template();

    for name in ["scenario.toml", "scenario.json"] {
        let path = dir.path().join(name);
        template.save(&path).unwrap();
        assert_eq!(Scenario::from_file(&path).unwrap(), template);
    }
}

#[test]
fn template_evaluates_in_one_session() {
    let scenario = Scenario::default_template();
    let mut session = ValuationSession::new();

    let wacc = session
        .calculate_wacc(&scenario.wacc.unwrap().to_inputs().unwrap())
        .unwrap();
    assert_relative_eq!(wacc.wacc, 0.026 + 1.1 * 0.06, epsilon = 1e-12);

    let roic = session
        .calculate_roic(&scenario.roic.unwrap().to_inputs())
        .unwrap();
    assert_eq!(roic.comparison.unwrap().verdict, ValueVerdict::CreatesValue);

    let dcf = session
        .calculate_dcf(&scenario.dcf.unwrap().to_inputs().unwrap())
        .unwrap();
    assert_eq!(dcf.forecast_years, 5);
}

#[test]
fn missing_file_reports_path() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("absent.toml");

    match Scenario::from_file(&path) {
        Err(ConfigError::Io { path: reported, .. }) => assert_eq!(reported, path),
        other => panic!("expected I/O error, got {other:?}"),
    }
}

#[test]
fn unsupported_extension_is_rejected_before_reading() {
    let err = Scenario::from_file("scenario.yaml").unwrap_err();
    assert!(matches!(err, ConfigError::UnsupportedFormat(_)));
}

#[test]
fn malformed_toml_is_a_parse_error() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("broken.toml");
    std::fs::write(&path, "[dcf\ninitial_cash_flow = ").unwrap();

    assert!(matches!(Scenario::from_file(&path), Err(ConfigError::Parse(_))));
}
