//! Import scanning for Go package directories
//!
//! Only the file header is inspected: the package clause and the import
//! declarations that follow it. Anything after the imports, including
//! syntax errors in function bodies, is ignored.

use crate::error::{GuardianError, Result, ResultExt};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};
use tree_sitter::{Node, Parser};

/// Source files and import paths found in one package directory
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScannedPackage {
    /// Non-test `.go` files, sorted
    pub files: Vec<PathBuf>,
    /// Import paths in first-seen order, deduplicated
    pub imports: Vec<String>,
}

/// Source of per-directory import information for graph resolution
pub trait PackageScanner {
    /// Scan `dir`; `Ok(None)` means the directory does not exist
    fn scan(&self, dir: &Path) -> Result<Option<ScannedPackage>>;
}

/// Whether `file_name` is a Go source file
pub fn is_go_source(file_name: &str) -> bool {
    file_name.ends_with(".go")
}

/// Whether `file_name` is a Go test file
pub fn is_go_test(file_name: &str) -> bool {
    file_name.ends_with("_test.go")
}

/// Scanner backed by the tree-sitter Go grammar
#[derive(Debug, Clone, Copy, Default)]
pub struct ImportScanner;

impl ImportScanner {
    pub fn new() -> Self {
        Self
    }

    fn parser() -> Result<Parser> {
        let mut parser = Parser::new();
        parser
            .set_language(&tree_sitter_go::LANGUAGE.into())
            .map_err(|e| GuardianError::Grammar { message: e.to_string() })?;
        Ok(parser)
    }

    /// Non-test Go files directly inside `dir`, sorted
    fn source_files(dir: &Path) -> Result<Vec<PathBuf>> {
        let mut files = Vec::new();
        for entry in fs::read_dir(dir).with_file_context(dir)? {
            let entry = entry.with_file_context(dir)?;
            let path = entry.path();
            let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
                continue;
            };
            if is_go_source(name) && !is_go_test(name) && path.is_file() {
                files.push(path);
            }
        }
        files.sort();
        Ok(files)
    }
}

impl PackageScanner for ImportScanner {
    fn scan(&self, dir: &Path) -> Result<Option<ScannedPackage>> {
        if !dir.exists() {
            return Ok(None);
        }
        if !dir.is_dir() {
            return Err(GuardianError::parse_error(dir, "not a directory"));
        }

        let files = Self::source_files(dir)?;
        if files.is_empty() {
            return Err(GuardianError::parse_error(dir, "no Go source files found"));
        }

        let mut parser = Self::parser()?;
        let mut seen = HashSet::new();
        let mut imports = Vec::new();

        for file in &files {
            let source = fs::read_to_string(file).with_file_context(file)?;
            for import_path in header_imports(&mut parser, &source, file)? {
                if seen.insert(import_path.clone()) {
                    imports.push(import_path);
                }
            }
        }

        Ok(Some(ScannedPackage { files, imports }))
    }
}

/// Extract the import paths of a single Go source text
pub fn parse_imports(source: &str) -> Result<Vec<String>> {
    let mut parser = ImportScanner::parser()?;
    header_imports(&mut parser, source, Path::new("<source>"))
}

fn header_imports(parser: &mut Parser, source: &str, file: &Path) -> Result<Vec<String>> {
    let tree = parser
        .parse(source, None)
        .ok_or_else(|| GuardianError::parse_error(file, "parser returned no syntax tree"))?;
    let root = tree.root_node();
    let bytes = source.as_bytes();

    let mut saw_package = false;
    let mut header_done = false;
    let mut imports = Vec::new();
    let mut cursor = root.walk();

    for child in root.named_children(&mut cursor) {
        if header_done {
            // imports must precede every other declaration
            if child.kind() == "import_declaration" {
                return Err(syntax_error(file, child));
            }
            continue;
        }

        match child.kind() {
            "comment" => continue,
            "package_clause" => {
                if child.has_error() {
                    return Err(syntax_error(file, child));
                }
                saw_package = true;
            }
            "import_declaration" => {
                if !saw_package {
                    return Err(GuardianError::parse_error(file, "expected 'package', found 'import'"));
                }
                if child.has_error() {
                    return Err(syntax_error(file, child));
                }
                collect_import_specs(child, bytes, &mut imports);
            }
            _ if child.is_error() => {
                let text = child.utf8_text(bytes).unwrap_or_default();
                if !saw_package || text.trim_start().starts_with("import") {
                    return Err(syntax_error(file, child));
                }
                break;
            }
            _ => header_done = true,
        }
    }

    if !saw_package {
        return Err(GuardianError::parse_error(file, "expected 'package' clause"));
    }

    Ok(imports)
}

fn collect_import_specs(node: Node<'_>, source: &[u8], imports: &mut Vec<String>) {
    if node.kind() == "import_spec" {
        if let Some(path_node) = node.child_by_field_name("path") {
            if let Some(path) = node_text(path_node, source).and_then(unquote_go_string) {
                if !path.is_empty() {
                    imports.push(path);
                }
            }
        }
        return;
    }

    let mut cursor = node.walk();
    for child in node.named_children(&mut cursor) {
        collect_import_specs(child, source, imports);
    }
}

fn node_text<'a>(node: Node<'_>, source: &'a [u8]) -> Option<&'a str> {
    node.utf8_text(source).ok()
}

fn unquote_go_string(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    if trimmed.len() < 2 {
        return None;
    }
    let quoted = (trimmed.starts_with('"') && trimmed.ends_with('"'))
        || (trimmed.starts_with('`') && trimmed.ends_with('`'));
    quoted.then(|| trimmed[1..trimmed.len() - 1].to_string())
}

fn syntax_error(file: &Path, node: Node<'_>) -> GuardianError {
    let position = node.start_position();
    GuardianError::parse_error(
        file,
        format!("syntax error at {}:{}", position.row + 1, position.column + 1),
    )
}
