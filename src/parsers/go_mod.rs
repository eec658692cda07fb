//! Module identity from `go.mod`

use crate::error::{GuardianError, Result};
use std::fs;
use std::path::Path;

pub const GO_MOD_FILE: &str = "go.mod";

/// Read the module path declared in `<repo_dir>/go.mod`
pub fn read_module_path(repo_dir: &Path) -> Result<String> {
    let path = repo_dir.join(GO_MOD_FILE);
    let content = fs::read_to_string(&path).map_err(|e| GuardianError::GoMod {
        path: path.clone(),
        message: format!("failed to read go.mod: {}", e),
    })?;

    parse_module_directive(&content).ok_or_else(|| GuardianError::GoMod {
        path,
        message: "no module directive found".to_string(),
    })
}

/// Extract the module path from go.mod content
///
/// Handles `//` line comments and quoted module paths.
pub fn parse_module_directive(content: &str) -> Option<String> {
    content.lines().find_map(|line| {
        let line = match line.find("//") {
            Some(idx) => &line[..idx],
            None => line,
        };
        let rest = line.trim().strip_prefix("module")?;
        if !rest.starts_with(char::is_whitespace) && !rest.starts_with('"') {
            return None;
        }
        let value = rest.trim();
        let value = value
            .strip_prefix('"')
            .and_then(|v| v.strip_suffix('"'))
            .or_else(|| value.strip_prefix('`').and_then(|v| v.strip_suffix('`')))
            .unwrap_or(value);
        (!value.is_empty()).then(|| value.to_string())
    })
}
