//! End-to-end analysis over Go module checkouts built in a temporary directory

use std::fs;
use std::path::Path;
use tempfile::tempdir;
use dependency_guardian::{
    models::config::Config,
    output::render_markdown,
    ImpactAnalyzer,
};

fn write_file(root: &Path, rel: &str, content: &str) {
    let path = root.join(rel);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, content).unwrap();
}

/// Module `a/b`: `c` imports `d`, `api` imports `c` and `fmt`
fn create_module(root: &Path) {
    write_file(root, "go.mod", "module a/b\n\ngo 1.21\n");
    write_file(root, "main.go", "package main\n\nimport \"a/b/api\"\n\nfunc main() { api.Serve() }\n");
    write_file(root, "c/c.go", "package c\n\nimport \"a/b/d\"\n\nfunc C() int { return d.D() }\n");
    write_file(root, "d/d.go", "package d\n\nfunc D() int { return 1 }\n");
    write_file(root, "d/d_test.go", "package d\n\nimport \"testing\"\n\nfunc TestD(t *testing.T) {}\n");
    write_file(
        root,
        "api/api.go",
        "package api\n\nimport (\n\t\"fmt\"\n\n\t\"a/b/c\"\n)\n\nfunc Serve() { fmt.Println(c.C()) }\n",
    );
}

fn analyzer(root: &Path, config: Config) -> ImpactAnalyzer {
    let mut analyzer = ImpactAnalyzer::new(config, root);
    analyzer.set_module_path("a/b");
    analyzer
}

#[test]
fn test_critical_dependent_scenario() {
    let temp_dir = tempdir().unwrap();
    create_module(temp_dir.path());

    let mut config = Config::default();
    config.critical.packages = vec!["**/c".to_string()];

    let result = analyzer(temp_dir.path(), config).analyze(&["d/d.go"]).unwrap();

    assert_eq!(result.impacts.len(), 1);
    assert_eq!(result.impacts[0].changed_package, "a/b/d");
    assert_eq!(result.impacts[0].affected_packages.len(), 1);
    assert_eq!(result.impacts[0].affected_packages[0].name, "a/b/c");
    assert!(result.impacts[0].affected_packages[0].is_critical);
    assert!(result.has_critical_impact());
}

#[test]
fn test_only_test_files_changed() {
    let temp_dir = tempdir().unwrap();
    create_module(temp_dir.path());

    let result = analyzer(temp_dir.path(), Config::default())
        .analyze(&["d/d_test.go"])
        .unwrap();

    assert!(result.impacts.is_empty());
    assert!(render_markdown(&result).contains("No changed packages found."));
}

#[test]
fn test_package_without_dependents() {
    let temp_dir = tempdir().unwrap();
    create_module(temp_dir.path());

    let result = analyzer(temp_dir.path(), Config::default())
        .analyze(&["api/api.go"])
        .unwrap();

    assert_eq!(result.impacts.len(), 1);
    assert!(result.impacts[0].affected_packages.is_empty());
    assert!(render_markdown(&result).contains("This change does not affect any other packages."));
}

#[test]
fn test_dependents_are_one_hop() {
    let temp_dir = tempdir().unwrap();
    create_module(temp_dir.path());

    // api reaches d only through c
    let result = analyzer(temp_dir.path(), Config::default())
        .analyze(&["d/d.go"])
        .unwrap();
    let names: Vec<&str> = result.affected_names().into_iter().collect();
    assert_eq!(names, vec!["a/b/c"]);
}

#[test]
fn test_root_package_change() {
    let temp_dir = tempdir().unwrap();
    create_module(temp_dir.path());

    let result = analyzer(temp_dir.path(), Config::default())
        .analyze(&["main.go", "README.md"])
        .unwrap();

    let changed: Vec<&str> = result.impacts.iter().map(|i| i.changed_package.as_str()).collect();
    assert_eq!(changed, vec!["a/b"]);
}

#[test]
fn test_direct_and_indirect_partition() {
    let temp_dir = tempdir().unwrap();
    create_module(temp_dir.path());

    let result = analyzer(temp_dir.path(), Config::default())
        .analyze(&["c/c.go", "d/d.go"])
        .unwrap();

    // c imports d, so d is a direct dependency of a changed package
    assert_eq!(result.direct_dependencies, vec!["a/b/d"]);
    // c and api are affected but not imported by a changed package
    assert!(result
        .indirect_dependencies
        .iter()
        .all(|name| !result.direct_dependencies.contains(name)));
    assert_eq!(result.indirect_dependencies, vec!["a/b/api", "a/b/c"]);
}

#[test]
fn test_high_level_and_ignore_filters() {
    let temp_dir = tempdir().unwrap();
    create_module(temp_dir.path());

    let mut config = Config::default();
    config.targets.high_level_packages = vec!["a/b/api".to_string()];
    let result = analyzer(temp_dir.path(), config).analyze(&["c/c.go", "d/d.go"]).unwrap();
    let affected: Vec<&str> = result.affected_names().into_iter().collect();
    assert_eq!(affected, vec!["a/b/api"]);

    let mut config = Config::default();
    config.patterns.ignore_patterns = vec!["a/b/*".to_string()];
    let result = analyzer(temp_dir.path(), config).analyze(&["c/c.go"]).unwrap();
    assert!(result.impacts[0].affected_packages.is_empty());
}

#[test]
fn test_parallel_matches_serial() {
    let temp_dir = tempdir().unwrap();
    create_module(temp_dir.path());
    let files = ["d/d.go", "c/c.go", "main.go"];

    let serial = analyzer(temp_dir.path(), Config::default()).analyze(&files).unwrap();
    let parallel = analyzer(temp_dir.path(), Config::default())
        .with_parallelism(4)
        .analyze(&files)
        .unwrap();

    assert_eq!(serial, parallel);
    assert_eq!(render_markdown(&serial), render_markdown(&parallel));
}

#[test]
fn test_import_cycle_terminates() {
    let temp_dir = tempdir().unwrap();
    write_file(temp_dir.path(), "go.mod", "module a/b\n");
    write_file(temp_dir.path(), "x/x.go", "package x\n\nimport \"a/b/y\"\n");
    write_file(temp_dir.path(), "y/y.go", "package y\n\nimport \"a/b/x\"\n");

    let mut analyzer = analyzer(temp_dir.path(), Config::default());
    let result = analyzer.analyze(&["x/x.go"]).unwrap();

    assert_eq!(result.impacts[0].affected_packages[0].name, "a/b/y");
    assert_eq!(result.direct_dependencies, vec!["a/b/y"]);
    assert!(result.indirect_dependencies.is_empty());
    assert_eq!(analyzer.graph().unwrap().cycles(), vec![vec!["a/b/x".to_string(), "a/b/y".to_string()]]);
}

#[test]
fn test_broken_package_is_reported_as_warning() {
    let temp_dir = tempdir().unwrap();
    create_module(temp_dir.path());
    write_file(temp_dir.path(), "broken/broken.go", "import \"a/b/d\"\n");

    let result = analyzer(temp_dir.path(), Config::default())
        .analyze(&["d/d.go"])
        .unwrap();

    assert_eq!(result.warnings.len(), 1);
    assert_eq!(result.warnings[0].package, "a/b/broken");
    let affected: Vec<&str> = result.affected_names().into_iter().collect();
    assert_eq!(affected, vec!["a/b/c"]);
}
