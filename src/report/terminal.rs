use std::collections::BTreeMap;
use std::path::Path;

use colored::*;
use comfy_table::presets::UTF8_FULL;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use crate::models::{BundleReport, LicenseRisk, PackageEntry};

/// Render a colored terminal report.
pub fn render(report: &BundleReport, path: &Path, verbose: bool, quiet: bool) {
    let total = report.packages.len();
    let bundled = report.bundled_count();
    let missing = total - bundled;

    if quiet {
        println!(
            "Packages: {}  Bundled: {}  Missing: {}  -> {}",
            total,
            bundled.to_string().green(),
            missing.to_string().yellow(),
            report.output.display(),
        );
        return;
    }

    println!(
        "\n {} v{}",
        "license-bundler".bold(),
        env!("CARGO_PKG_VERSION")
    );
    println!(" Project: {}\n", path.display());

    println!(" ┌────────────────────────────────────────────────────┐");
    println!(" │  {} │", format!("{:<48}", "SUMMARY").bold());
    println!("{}", box_row(&format!("Project license    : {}", report.project_label)));
    println!(
        "{}",
        box_row(&format!("Sub-licenses       : {}", report.sublicenses.len()))
    );
    println!("{}", box_row(&format!("Packages scanned   : {}", total)));
    println!(
        "{}",
        icon_row(
            "✓".green(),
            &format!("Bundled         : {:>4}  {}", bundled, summarize_risks(report))
        )
    );
    println!(
        "{}",
        icon_row("⚠".yellow(), &format!("No license      : {:>4}", missing))
    );
    println!(
        "{}",
        box_row(&format!("Copyright files    : {}", report.copyright_file_count()))
    );
    println!(" └────────────────────────────────────────────────────┘");
    println!(" Written to {}\n", report.output.display().to_string().bold());

    if missing > 0 {
        println!(
            " {} Packages without a copyright file:\n",
            "[WARN]".yellow().bold()
        );
        let mut table = new_table(&["Name", "Path"]);
        for pkg in report.missing() {
            table.add_row(vec![
                Cell::new(&pkg.name),
                Cell::new(pkg.path.display().to_string()).fg(Color::DarkGrey),
            ]);
        }
        println!("{}\n", table);
    }

    if verbose && bundled > 0 {
        println!(" {} Bundled packages:\n", "[OK]".green().bold());
        let mut table = new_table(&["Name", "Files", "License", "Risk"]);
        for pkg in report.packages.iter().filter(|p| p.is_bundled()) {
            table.add_row(bundled_row(pkg));
        }
        println!("{}\n", table);
    }
}

/// One line of the summary box. Padding is applied to plain text only.
fn box_row(text: &str) -> String {
    format!(" │  {:<48} │", text)
}

/// A summary line led by a colored one-column icon.
fn icon_row(icon: ColoredString, text: &str) -> String {
    format!(" │  {}  {:<45} │", icon, text)
}

fn new_table(headers: &[&str]) -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(
            headers
                .iter()
                .map(|h| Cell::new(h).add_attribute(Attribute::Bold))
                .collect::<Vec<_>>(),
        );
    table
}

fn bundled_row(pkg: &PackageEntry) -> Vec<Cell> {
    let risk_color = match pkg.risk {
        LicenseRisk::Permissive => Color::Green,
        LicenseRisk::WeakCopyleft => Color::Yellow,
        LicenseRisk::StrongCopyleft => Color::Red,
        LicenseRisk::Proprietary => Color::Magenta,
        LicenseRisk::Unknown => Color::DarkGrey,
    };

    vec![
        Cell::new(&pkg.name),
        Cell::new(pkg.copyright_paths.len()).set_alignment(CellAlignment::Right),
        Cell::new(pkg.license.as_deref().unwrap_or("unrecognized")),
        Cell::new(pkg.risk.to_string()).fg(risk_color),
    ]
}

/// Top risk classes among bundled packages, e.g. `[Permissive (12), Unknown (3)]`.
fn summarize_risks(report: &BundleReport) -> String {
    let mut counts: BTreeMap<String, usize> = BTreeMap::new();
    for pkg in report.packages.iter().filter(|p| p.is_bundled()) {
        *counts.entry(pkg.risk.to_string()).or_insert(0) += 1;
    }

    let mut pairs: Vec<(String, usize)> = counts.into_iter().collect();
    pairs.sort_by(|a, b| b.1.cmp(&a.1));

    let summary: Vec<String> = pairs
        .iter()
        .take(2)
        .map(|(risk, cnt)| format!("{} ({})", risk, cnt))
        .collect();

    if summary.is_empty() {
        String::new()
    } else {
        format!("[{}]", summary.join(", "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use colored::Colorize;
    use std::path::PathBuf;

    fn pkg(name: &str, files: usize, risk: LicenseRisk) -> PackageEntry {
        PackageEntry {
            name: name.to_string(),
            path: PathBuf::from(name),
            copyright_paths: (0..files).map(|i| PathBuf::from(format!("{name}/{i}"))).collect(),
            license: None,
            risk,
        }
    }

    #[test]
    fn test_summarize_risks_orders_by_count() {
        let report = BundleReport {
            output: PathBuf::from("ALL_LICENSES.txt"),
            project_label: "AFV Native".to_string(),
            sublicenses: Vec::new(),
            packages: vec![
                pkg("a", 1, LicenseRisk::Unknown),
                pkg("b", 1, LicenseRisk::Permissive),
                pkg("c", 2, LicenseRisk::Permissive),
                pkg("d", 0, LicenseRisk::Unknown),
            ],
        };

        assert_eq!(summarize_risks(&report), "[Permissive (2), Unknown (1)]");
    }

    #[test]
    fn test_icon_rows_align_with_plain_rows() {
        colored::control::set_override(true);
        let ansi = regex::Regex::new(r"\x1b\[[0-9;]*m").unwrap();
        let visible = |line: &str| ansi.replace_all(line, "").chars().count();

        let plain = box_row("Packages scanned   : 12");
        let bundled = icon_row("✓".green(), "Bundled         :   10  [Permissive (8)]");
        let missing = icon_row("⚠".yellow(), "No license      :    2");

        assert!(bundled.contains("\x1b["));
        assert_eq!(visible(&bundled), visible(&plain));
        assert_eq!(visible(&missing), visible(&plain));
    }

    #[test]
    fn test_summarize_risks_empty() {
        let report = BundleReport {
            output: PathBuf::from("ALL_LICENSES.txt"),
            project_label: "AFV Native".to_string(),
            sublicenses: Vec::new(),
            packages: Vec::new(),
        };

        assert_eq!(summarize_risks(&report), "");
    }
}
