//! End-to-end tests for the run command.

use std::fs;

use odts_audit::AuditDocument;
use odts_core::optimiser::TerminalStatus;
use service_cli::commands::run::run;
use service_cli::prelude::*;
use tempfile::tempdir;

fn config_in(dir: &std::path::Path) -> CliConfig {
    CliConfig {
        output_dir: dir.to_path_buf(),
        file_stem: "test".to_string(),
        ..CliConfig::default()
    }
}

#[test]
fn test_default_run_exports_audit_trail() {
    let dir = tempdir().unwrap();
    let report = run(config_in(dir.path()), &RunOverrides::default()).unwrap();

    let files = report.exported.expect("export enabled by default");
    assert_eq!(files.json_path, dir.path().join("test_audit.json"));

    let doc = AuditDocument::from_json(&fs::read_to_string(&files.json_path).unwrap()).unwrap();
    assert_eq!(doc.status, report.outcome.status);
    assert_eq!(doc.iterations, report.outcome.iterations());
    assert_eq!(doc.trace[0].x, vec![0.3, 0.8]);

    let csv = fs::read_to_string(&files.csv_path).unwrap();
    assert!(csv.starts_with("iter,x0,x1,g0,g1,res,status"));
}

#[test]
fn test_max_iter_override_bounds_trace() {
    let dir = tempdir().unwrap();
    let overrides = RunOverrides {
        max_iterations: Some(3),
        ..Default::default()
    };
    let report = run(config_in(dir.path()), &overrides).unwrap();

    assert_eq!(report.outcome.status, TerminalStatus::MaxIter);
    assert_eq!(report.outcome.iterations(), 3);
}

#[test]
fn test_quadratic_objective_converges() {
    let dir = tempdir().unwrap();
    let overrides = RunOverrides {
        x0: Some(vec![5.0, -3.0]),
        objective: Some(ObjectiveKind::Quadratic),
        no_export: true,
        ..Default::default()
    };
    let report = run(config_in(dir.path()), &overrides).unwrap();

    assert!(report.outcome.converged());
    assert!((report.outcome.point[0] - 1.0).abs() < 1e-4);
    assert!((report.outcome.point[1] - 2.0).abs() < 1e-4);
    assert!(report.exported.is_none());
    assert!(fs::read_dir(dir.path()).unwrap().next().is_none());
}

#[test]
fn test_config_file_drives_run() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("odts.toml");
    fs::write(
        &path,
        format!(
            "initial_point = [2.5, 0.5]\noutput_dir = {:?}\nfile_stem = \"far\"\n",
            dir.path().join("out").display().to_string()
        ),
    )
    .unwrap();

    let config = CliConfig::load_or_default(&path).unwrap();
    let report = run(config, &RunOverrides::default()).unwrap();

    assert_eq!(report.outcome.status, TerminalStatus::Diverged);
    assert!(dir.path().join("out").join("far_trace.csv").exists());
}

#[test]
fn test_malformed_config_file_is_error() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("odts.toml");
    fs::write(&path, "max_iterations = \"many\"").unwrap();

    assert!(matches!(
        CliConfig::load_or_default(&path),
        Err(ConfigError::Parse(_))
    ));
}
