//! End-to-end tests of the `corpval` binary.

use std::path::{Path, PathBuf};

use approx::assert_relative_eq;
use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn corpval() -> Command {
    let mut cmd = Command::cargo_bin("corpval").unwrap();
    cmd.env("NO_COLOR", "1").env_remove("RUST_LOG");
    cmd
}

fn write(dir: &Path, name: &str, content: &str) -> PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, content).unwrap();
    path
}

fn stdout_json(cmd: &mut Command) -> serde_json::Value {
    let output = cmd.output().unwrap();
    serde_json::from_slice(&output.stdout).unwrap()
}

// ============================================================================
// dcf
// ============================================================================

#[test]
fn test_dcf_defaults_minimal() {
    corpval()
        .args(["-f", "minimal", "dcf"])
        .assert()
        .success()
        .stdout("15,196.90\n");
}

#[test]
fn test_dcf_table_has_terminal_row() {
    corpval()
        .args(["dcf", "--share-capital", "100"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Year 5"))
        .stdout(predicate::str::contains("Terminal Value"))
        .stdout(predicate::str::contains("15,196.90"))
        .stdout(predicate::str::contains("151.97"));
}

#[test]
fn test_dcf_multi_stage_labels() {
    corpval()
        .args(["dcf", "--stage", "expansion:3:15", "--stage", "maturity:2:8"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Year 1 (expansion)"))
        .stdout(predicate::str::contains("Year 5 (maturity)"));
}

#[test]
fn test_dcf_json_output() {
    let json = stdout_json(corpval().args(["--format", "json", "dcf", "--years", "3"]));
    assert_eq!(json["yearly"].as_array().unwrap().len(), 3);
    assert_eq!(json["forecast_years"], 3);
    assert_relative_eq!(
        json["yearly"][0]["present_value"].as_f64().unwrap(),
        1100.0 / 1.12,
        epsilon = 1e-9
    );
}

#[test]
fn test_dcf_chart() {
    corpval()
        .args(["dcf", "--chart"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Cash flow vs present value"))
        .stdout(predicate::str::contains("present value"));
}

#[test]
fn test_dcf_discount_rate_must_exceed_terminal_growth() {
    corpval()
        .args(["dcf", "--discount-rate", "3", "--terminal-growth-rate", "3"])
        .assert()
        .failure()
        .stderr(predicate::str::contains(
            "discount rate must exceed terminal growth rate",
        ));
}

#[test]
fn test_dcf_stage_without_rate() {
    corpval()
        .args(["dcf", "--stage", "expansion:3:15", "--stage", "draft:2:"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("growth rate is missing"));
}

#[test]
fn test_dcf_rejects_malformed_stage() {
    corpval()
        .args(["dcf", "--stage", "expansion"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid stage"));
}

#[test]
fn test_dcf_growth_rate_conflicts_with_stages() {
    corpval()
        .args(["dcf", "--growth-rate", "5", "--stage", "a:2:5"])
        .assert()
        .failure();
}

#[test]
fn test_dcf_negative_terminal_growth() {
    corpval()
        .args(["-f", "minimal", "dcf", "--terminal-growth-rate", "-2"])
        .assert()
        .success();
}

// ============================================================================
// wacc
// ============================================================================

#[test]
fn test_wacc_all_equity() {
    corpval()
        .args(["-f", "minimal", "wacc", "--equity", "50000000", "--tax-rate", "0.25"])
        .assert()
        .success()
        .stdout("9.2000%\n");
}

#[test]
fn test_wacc_implied_tax_rate() {
    corpval()
        .args([
            "wacc",
            "--equity",
            "120000000",
            "--debt",
            "30000000",
            "--interest",
            "1500000",
            "--pretax-income",
            "11963857",
            "--income-tax",
            "3030385",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("25.3295%"))
        .stdout(predicate::str::contains("80.0000%"));
}

#[test]
fn test_wacc_tax_entries_conflict() {
    corpval()
        .args([
            "wacc",
            "--equity",
            "100",
            "--tax-rate",
            "0.2",
            "--pretax-income",
            "100",
            "--income-tax",
            "20",
        ])
        .assert()
        .failure();
}

#[test]
fn test_wacc_requires_tax_entry() {
    corpval()
        .args(["wacc", "--equity", "100"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("tax entry is required"));
}

#[test]
fn test_wacc_empty_capital_structure() {
    corpval()
        .args(["wacc", "--tax-rate", "0.25"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("cannot both be zero"));
}

// ============================================================================
// roic
// ============================================================================

#[test]
fn test_roic_reference_company() {
    corpval()
        .args(["-f", "minimal", "roic"])
        .assert()
        .success()
        .stdout("38.3443%\n");
}

#[test]
fn test_roic_without_wacc_has_no_comparison() {
    corpval()
        .args(["roic"])
        .assert()
        .success()
        .stdout(predicate::str::contains("no WACC calculated"));
}

#[test]
fn test_roic_compared_against_scenario_wacc() {
    let dir = TempDir::new().unwrap();
    let path = write(
        dir.path(),
        "wacc.toml",
        "[wacc]\nequity_market_value = 50000000.0\ntax_rate = 0.25\n",
    );

    corpval()
        .args(["roic", "--wacc-scenario"])
        .arg(&path)
        .assert()
        .success()
        .stdout(predicate::str::contains("ROIC > WACC (38.3443% > 9.2000%)"));
}

#[test]
fn test_roic_zero_operating_profit() {
    corpval()
        .args(["roic", "--operating-profit", "0"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("operating profit"));
}

// ============================================================================
// evaluate / config
// ============================================================================

#[test]
fn test_evaluate_template_in_one_session() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("scenario.toml");
    corpval()
        .args(["config", "template", "--output"])
        .arg(&path)
        .assert()
        .success();

    let json = stdout_json(corpval().args(["-f", "json", "evaluate"]).arg(&path));
    assert_relative_eq!(json["wacc"]["wacc"].as_f64().unwrap(), 0.092, epsilon = 1e-12);
    assert_eq!(json["roic"]["comparison"]["verdict"], "creates_value");
    assert_eq!(json["dcf"]["forecast_years"], 5);
}

#[test]
fn test_evaluate_continues_after_failed_section() {
    let dir = TempDir::new().unwrap();
    let path = write(
        dir.path(),
        "broken.toml",
        "[wacc]\ntax_rate = 0.25\n\n[roic]\noperating_profit = 100.0\nparent_equity = 1000.0\n",
    );

    corpval()
        .arg("evaluate")
        .arg(&path)
        .assert()
        .failure()
        .stdout(predicate::str::contains("NOPAT"))
        .stdout(predicate::str::contains("no WACC calculated"))
        .stderr(predicate::str::contains("[wacc]"))
        .stderr(predicate::str::contains("1 of the scenario sections failed"));
}

#[test]
fn test_evaluate_missing_file() {
    corpval()
        .args(["evaluate", "does-not-exist.toml"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("does-not-exist.toml"));
}

#[test]
fn test_config_template_prints_toml() {
    corpval()
        .args(["config", "template"])
        .assert()
        .success()
        .stdout(predicate::str::contains("[dcf]"))
        .stdout(predicate::str::contains("[roic]"));
}

#[test]
fn test_config_show_rejects_unknown_extension() {
    let dir = TempDir::new().unwrap();
    let path = write(dir.path(), "scenario.yaml", "dcf: {}\n");

    corpval()
        .args(["config", "show"])
        .arg(&path)
        .assert()
        .failure();
}

#[test]
fn test_config_show_flattens_stages() {
    let dir = TempDir::new().unwrap();
    let path = write(
        dir.path(),
        "stages.json",
        r#"{ "dcf": { "stages": [{ "name": "expansion", "years": 3, "growth_rate": 15.0 }] } }"#,
    );

    corpval()
        .args(["config", "show"])
        .arg(&path)
        .assert()
        .success()
        .stdout(predicate::str::contains("dcf.stages[0].name"))
        .stdout(predicate::str::contains("expansion"));
}

#[test]
fn test_quiet_hides_formula_notes() {
    corpval()
        .args(["--quiet", "roic"])
        .assert()
        .success()
        .stdout(predicate::str::contains("NOPAT"))
        .stdout(predicate::str::contains("NOPAT = (operating profit").not());
}

#[test]
fn test_roic_notes_shown_by_default() {
    corpval()
        .arg("roic")
        .assert()
        .success()
        .stdout(predicate::str::contains("NOPAT = (operating profit"));
}

#[test]
fn test_dcf_chart_names_stages() {
    corpval()
        .args([
            "dcf",
            "--stage",
            "expansion:3:15",
            "--stage",
            "maturity:2:8",
            "--chart",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("Year 1-3 expansion · Year 4-5 maturity"));
}
