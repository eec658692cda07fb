//! Output formatting functionality
//!
//! Pure renderers for each output format. None of them read the clock or
//! the environment, so identical results always render identically.

use crate::error::{GuardianError, Result};
use crate::models::analysis::AnalysisResult;
use ansi_term::Colour::{Blue, Green, Red, Yellow};
use ansi_term::Style;

/// Hidden marker used to find and update a previously posted comment
pub const REPORT_MARKER: &str = "<!-- dependency-guardian -->";

/// Render the PR-comment markdown report
pub fn render_markdown(result: &AnalysisResult) -> String {
    let mut b = String::new();
    b.push_str(REPORT_MARKER);
    b.push('\n');
    b.push_str("## 🔍 Dependency Impact Analysis\n\n");

    if result.impacts.is_empty() {
        b.push_str("No changed packages found.\n");
        return b;
    }

    b.push_str("### Changed Packages and Their Impacts\n\n");
    for impact in &result.impacts {
        b.push_str(&format!("#### Changed Package: `{}`\n\n", impact.changed_package));
        if impact.affected_packages.is_empty() {
            b.push_str("This change does not affect any other packages.\n\n");
            continue;
        }

        b.push_str(&format!(
            "<details><summary>Affected Packages ({})</summary>\n\n",
            impact.affected_packages.len()
        ));
        for pkg in &impact.affected_packages {
            if pkg.is_critical {
                b.push_str(&format!("- 🚨 **`{}`** (Critical)\n", pkg.name));
            } else {
                b.push_str(&format!("- `{}`\n", pkg.name));
            }
        }
        b.push_str("\n</details>\n\n");
    }

    b.push_str("### Analysis Summary:\n\n");
    b.push_str(&format!("- **Changed packages**: {}\n", result.changed_count()));
    b.push_str(&format!("- **Affected packages**: {}\n", result.affected_count()));
    b.push_str(&format!(
        "- **Direct dependencies of changed packages**: {}\n",
        result.direct_dependencies.len()
    ));
    b.push_str(&format!(
        "- **Indirectly affected packages**: {}\n",
        result.indirect_dependencies.len()
    ));

    b
}

/// Format analysis results as text
pub fn format_results_text(result: &AnalysisResult, use_colors: bool, verbose: bool) -> String {
    let paint = |style: Style, text: &str| -> String {
        if use_colors {
            style.paint(text).to_string()
        } else {
            text.to_string()
        }
    };

    let mut output = String::new();
    output.push_str(&format!("{}\n\n", paint(Blue.bold(), "Dependency Impact Analysis")));

    if result.impacts.is_empty() {
        output.push_str("No changed packages found.\n");
        return output;
    }

    for impact in &result.impacts {
        output.push_str(&format!(
            "{} {}\n",
            paint(Style::new().bold(), "Changed package:"),
            paint(Yellow.bold(), &impact.changed_package)
        ));
        if impact.affected_packages.is_empty() {
            output.push_str(&format!("  {}\n", paint(Style::new().dimmed(), "no affected packages")));
        }
        for pkg in &impact.affected_packages {
            if pkg.is_critical {
                output.push_str(&format!(
                    "  {} {}\n",
                    paint(Red.bold(), "!"),
                    paint(Red.bold(), &format!("{} (critical)", pkg.name))
                ));
            } else {
                output.push_str(&format!("  - {}\n", pkg.name));
            }
        }
        output.push('\n');
    }

    output.push_str(&format!("{}\n", paint(Blue.bold(), "Summary")));
    output.push_str(&format!("  Changed packages: {}\n", result.changed_count()));
    output.push_str(&format!("  Affected packages: {}\n", result.affected_count()));
    let critical = result.critical_packages().len();
    let critical_str = critical.to_string();
    let critical_style = if critical > 0 { Red.bold() } else { Green.normal() };
    output.push_str(&format!("  Critical packages: {}\n", paint(critical_style, &critical_str)));
    output.push_str(&format!("  Direct dependencies: {}\n", result.direct_dependencies.len()));
    output.push_str(&format!("  Indirectly affected: {}\n", result.indirect_dependencies.len()));

    if verbose {
        if !result.direct_dependencies.is_empty() {
            output.push_str("\nDirect dependencies:\n");
            for name in &result.direct_dependencies {
                output.push_str(&format!("  {}\n", name));
            }
        }
        if !result.indirect_dependencies.is_empty() {
            output.push_str("\nIndirectly affected:\n");
            for name in &result.indirect_dependencies {
                output.push_str(&format!("  {}\n", name));
            }
        }
    }

    if !result.warnings.is_empty() {
        output.push_str(&format!("\n{}\n", paint(Yellow.bold(), "Warnings")));
        for warning in &result.warnings {
            output.push_str(&format!("  {}: {}\n", warning.package, warning.message));
        }
    }

    output
}

/// One-line summary for quiet mode
pub fn format_results_quiet(result: &AnalysisResult) -> String {
    format!(
        "Changed: {}, Affected: {}, Critical: {}\n",
        result.changed_count(),
        result.affected_count(),
        result.critical_packages().len()
    )
}

/// Format analysis results as JSON
pub fn format_results_json(result: &AnalysisResult, pretty: bool) -> Result<String> {
    let json = if pretty {
        serde_json::to_string_pretty(result)
    } else {
        serde_json::to_string(result)
    };
    json.map_err(|e| GuardianError::JsonSerialize { source: e })
}

/// Format analysis results as CSV, one row per changed/affected pair
pub fn format_results_csv(result: &AnalysisResult) -> Result<String> {
    let mut writer = csv::Writer::from_writer(vec![]);

    writer.write_record(["Changed Package", "Affected Package", "Critical"])?;

    for impact in &result.impacts {
        if impact.affected_packages.is_empty() {
            writer.write_record([impact.changed_package.as_str(), "", ""])?;
        }
        for pkg in &impact.affected_packages {
            writer.write_record([
                impact.changed_package.as_str(),
                pkg.name.as_str(),
                if pkg.is_critical { "true" } else { "false" },
            ])?;
        }
    }

    let bytes = writer
        .into_inner()
        .map_err(|e| GuardianError::Csv { source: e.into_error().into() })?;
    let data = String::from_utf8(bytes).map_err(|e| GuardianError::CsvSerialize { source: e })?;

    Ok(data)
}
