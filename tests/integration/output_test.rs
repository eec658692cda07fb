//! Report rendering for real analysis results

use std::fs;
use std::path::Path;
use tempfile::tempdir;
use dependency_guardian::{
    models::config::{Config, OutputFormat},
    output::{create_formatter, Formatter, REPORT_MARKER},
    ImpactAnalyzer,
};

fn analyze(root: &Path, files: &[&str]) -> dependency_guardian::AnalysisResult {
    fs::create_dir_all(root.join("c")).unwrap();
    fs::create_dir_all(root.join("d")).unwrap();
    fs::write(root.join("c/c.go"), "package c\n\nimport \"a/b/d\"\n").unwrap();
    fs::write(root.join("d/d.go"), "package d\n").unwrap();

    let mut config = Config::default();
    config.critical.packages = vec!["**/c".to_string()];
    let mut analyzer = ImpactAnalyzer::new(config, root);
    analyzer.set_module_path("a/b");
    analyzer.analyze(files).unwrap()
}

#[test]
fn test_markdown_report() {
    let temp_dir = tempdir().unwrap();
    let result = analyze(temp_dir.path(), &["d/d.go"]);

    let report = create_formatter(OutputFormat::Markdown, false, false, false)
        .format(&result)
        .unwrap();

    assert!(report.starts_with(REPORT_MARKER));
    assert!(report.contains("#### Changed Package: `a/b/d`"));
    assert!(report.contains("<details><summary>Affected Packages (1)</summary>"));
    assert!(report.contains("- 🚨 **`a/b/c`** (Critical)"));
    assert!(report.contains("- **Direct dependencies of changed packages**: 0"));
    assert!(report.contains("- **Indirectly affected packages**: 1"));
}

#[test]
fn test_reports_are_deterministic() {
    let temp_dir = tempdir().unwrap();
    let first = analyze(temp_dir.path(), &["d/d.go", "c/c.go"]);
    let second = analyze(temp_dir.path(), &["c/c.go", "d/d.go", "d/d.go"]);

    for format in [OutputFormat::Markdown, OutputFormat::Text, OutputFormat::Json, OutputFormat::Csv] {
        let formatter = create_formatter(format, false, true, false);
        assert_eq!(formatter.format(&first).unwrap(), formatter.format(&second).unwrap());
    }
}

#[test]
fn test_csv_report() {
    let temp_dir = tempdir().unwrap();
    let result = analyze(temp_dir.path(), &["d/d.go"]);

    let csv = create_formatter(OutputFormat::Csv, false, false, false)
        .format(&result)
        .unwrap();
    assert_eq!(csv, "Changed Package,Affected Package,Critical\na/b/d,a/b/c,true\n");
}
