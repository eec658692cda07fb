//! Command-line parsing and command execution

use std::fs;
use std::path::Path;
use clap::Parser;
use tempfile::tempdir;
use dependency_guardian::{
    cli::{commands::run_analysis, Args, Command},
    config::{load_config, CliArgs},
    models::config::OutputFormat,
};

fn create_module(root: &Path) {
    fs::write(root.join("go.mod"), "module example.com/svc\n").unwrap();
    for (dir, source) in [
        ("cmd/server", "package main\n\nimport \"example.com/svc/store\"\n"),
        ("store", "package store\n"),
    ] {
        fs::create_dir_all(root.join(dir)).unwrap();
        let name = dir.rsplit('/').next().unwrap();
        fs::write(root.join(dir).join(format!("{name}.go")), source).unwrap();
    }
}

#[test]
fn test_settings_from_command_line() {
    let temp_dir = tempdir().unwrap();
    let path = temp_dir.path().to_str().unwrap();
    let args = Args::try_parse_from([
        "dependency-guardian",
        "--path",
        path,
        "--output",
        "text",
        "--no-parallel",
        "--no-colors",
        "store/store.go",
    ])
    .unwrap();

    let settings = load_config(CliArgs::from(&args)).unwrap();
    assert_eq!(settings.repo_path, temp_dir.path());
    assert_eq!(settings.output_format, OutputFormat::Text);
    assert!(!settings.parallel);
    assert!(!settings.use_colors);
    assert_eq!(settings.module_path, None);
}

#[test]
fn test_zero_threads_rejected() {
    let temp_dir = tempdir().unwrap();
    let path = temp_dir.path().to_str().unwrap();
    let args = Args::try_parse_from(["dependency-guardian", "--path", path, "--threads", "0"]).unwrap();

    let err = load_config(CliArgs::from(&args)).unwrap_err();
    assert!(err.is_critical());
}

#[test]
fn test_analyze_writes_report_file() {
    let temp_dir = tempdir().unwrap();
    create_module(temp_dir.path());
    let report = temp_dir.path().join("out").join("impact.json");

    let args = Args::try_parse_from([
        "dependency-guardian",
        "--path",
        temp_dir.path().to_str().unwrap(),
        "--output",
        "json",
        "--output-file",
        report.to_str().unwrap(),
        "--no-progress",
        "store/store.go",
    ])
    .unwrap();

    Command::from_args(args).execute().unwrap();

    let parsed: serde_json::Value = serde_json::from_str(&fs::read_to_string(&report).unwrap()).unwrap();
    assert_eq!(parsed["impacts"][0]["changed_package"], "example.com/svc/store");
    assert_eq!(
        parsed["impacts"][0]["affected_packages"][0]["name"],
        "example.com/svc/cmd/server"
    );
}

#[test]
fn test_module_override_skips_go_mod() {
    let temp_dir = tempdir().unwrap();
    create_module(temp_dir.path());
    fs::remove_file(temp_dir.path().join("go.mod")).unwrap();

    let args = Args::try_parse_from([
        "dependency-guardian",
        "--path",
        temp_dir.path().to_str().unwrap(),
        "--no-parallel",
        "--no-progress",
    ])
    .unwrap();
    let settings = load_config(CliArgs::from(&args)).unwrap();
    assert!(run_analysis(&settings, &["store/store.go".to_string()]).is_err());

    let mut settings = settings;
    settings.module_path = Some("example.com/svc".to_string());
    let result = run_analysis(&settings, &["store/store.go".to_string()]).unwrap();
    assert_eq!(result.impacts[0].affected_packages.len(), 1);
}
