//! Rules file loading against real checkouts

use std::fs;
use tempfile::tempdir;
use dependency_guardian::{
    config::{create_default_config, load_rules, parse_config_file},
    models::config::Config,
    GuardianError, ImpactAnalyzer,
};

#[test]
fn test_repository_rules_drive_analysis() {
    let temp_dir = tempdir().unwrap();
    let root = temp_dir.path();
    fs::write(root.join("go.mod"), "module a/b\n").unwrap();
    fs::create_dir_all(root.join("c")).unwrap();
    fs::create_dir_all(root.join("d")).unwrap();
    fs::write(root.join("c/c.go"), "package c\n\nimport \"a/b/d\"\n").unwrap();
    fs::write(root.join("d/d.go"), "package d\n").unwrap();
    fs::write(
        root.join(".dependency-guardian.yml"),
        "critical:\n  packages:\n    - \"**/c\"\n",
    )
    .unwrap();

    let rules = load_rules(root, None).unwrap();
    let mut analyzer = ImpactAnalyzer::new(rules, root);
    analyzer.set_module_path("a/b");
    let result = analyzer.analyze(&["d/d.go"]).unwrap();

    assert!(result.impacts[0].affected_packages[0].is_critical);
}

#[test]
fn test_template_matches_defaults() {
    let temp_dir = tempdir().unwrap();
    let path = temp_dir.path().join(".dependency-guardian.yml");
    create_default_config(&path).unwrap();

    assert_eq!(parse_config_file(&path).unwrap(), Config::default());
}

#[test]
fn test_toml_rules() {
    let temp_dir = tempdir().unwrap();
    let path = temp_dir.path().join("rules.toml");
    fs::write(&path, "[targets]\nhigh_level_packages = [\"a/b/cmd/*\"]\n").unwrap();

    let rules = load_rules(temp_dir.path(), Some(&path)).unwrap();
    assert_eq!(rules.targets.high_level_packages, vec!["a/b/cmd/*"]);
}

#[test]
fn test_invalid_yaml_is_critical() {
    let temp_dir = tempdir().unwrap();
    let path = temp_dir.path().join(".dependency-guardian.yml");
    fs::write(&path, "critical: [oops\n").unwrap();

    let err = load_rules(temp_dir.path(), Some(&path)).unwrap_err();
    assert!(matches!(err, GuardianError::YamlParse { .. }));
    assert!(err.is_critical());
}
