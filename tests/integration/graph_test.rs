//! Graph construction with the tree-sitter scanner

use std::fs;
use std::path::Path;
use tempfile::tempdir;
use dependency_guardian::{
    models::package::PackageState,
    parsers::ImportScanner,
    DependencyGraph,
};

fn write_go(root: &Path, rel: &str, source: &str) {
    let path = root.join(rel);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, source).unwrap();
}

#[test]
fn test_resolve_registers_internal_imports_only() {
    let temp_dir = tempdir().unwrap();
    let root = temp_dir.path();
    write_go(
        root,
        "api/api.go",
        "package api\n\nimport (\n\t\"net/http\"\n\tstore \"example.com/m/store\"\n\t\"example.com/mx/other\"\n)\n",
    );
    write_go(root, "store/store.go", "package store\n\nimport \"example.com/m/missing\"\n");

    let mut graph = DependencyGraph::new(root, "example.com/m");
    graph.resolve("example.com/m/api", &ImportScanner::new()).unwrap();

    let api = graph.get("example.com/m/api").unwrap();
    assert_eq!(api.imports, vec!["example.com/m/store"]);
    assert_eq!(graph.dependency_names(api).collect::<Vec<_>>(), vec!["example.com/m/store"]);

    assert!(!graph.contains("net/http"));
    assert!(!graph.contains("example.com/mx/other"));
    assert_eq!(graph.get("example.com/m/missing").unwrap().state, PackageState::Missing);

    let stats = graph.statistics();
    assert_eq!(stats.total_packages, 3);
    assert_eq!(stats.missing_packages, 1);
    assert_eq!(stats.cycles, 0);
}

#[test]
fn test_dot_export_lists_edges() {
    let temp_dir = tempdir().unwrap();
    let root = temp_dir.path();
    write_go(root, "a/a.go", "package a\n\nimport \"example.com/m/b\"\n");
    write_go(root, "b/b.go", "package b\n");

    let mut graph = DependencyGraph::new(root, "example.com/m");
    graph.resolve("example.com/m/a", &ImportScanner::new()).unwrap();

    let dot = graph.to_dot();
    assert!(dot.starts_with("digraph"));
    assert!(dot.contains("\"example.com/m/a\""));
    assert!(dot.contains("0 -> 1"));
}
