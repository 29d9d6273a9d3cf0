//! `license-bundler` — collect project and dependency licenses into one file.
//!
//! # Flow
//! 1. Parse CLI arguments ([`cli`]).
//! 2. Load config ([`config::load_config`]) and apply CLI overrides.
//! 3. Resolve the dependency cache root ([`detector::detect_cache_root`]).
//! 4. Bundle the project license, sub-licenses and every package's
//!    `copyright` files, then write the output once ([`aggregator`]).
//! 5. Render the requested report ([`report`]).
//! 6. Exit `0`, or `1` under `--strict` when a package had no license.

mod aggregator;
mod cli;
mod config;
mod detector;
mod license;
mod models;
mod report;
mod scanner;

use anyhow::Result;
use clap::Parser;
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};

use aggregator::Aggregator;
use cli::{Cli, ReportFormat};
use config::load_config;
use detector::detect_cache_root;
use models::BundleReport;

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Resolve project path
    let path = cli
        .path
        .canonicalize()
        .unwrap_or_else(|_| cli.path.clone());

    let mut config = load_config(&path, cli.config.as_deref())?;

    // CLI flags win over the config file
    if let Some(license) = cli.license {
        config.project.license = license;
    }
    if let Some(root) = cli.cache_root {
        config.dependencies.cache_root = Some(root);
    }
    if let Some(output) = cli.output {
        config.output.path = output;
    }
    config.resolve_paths(&path);

    let cache_root = config
        .dependencies
        .cache_root
        .clone()
        .unwrap_or_else(|| detect_cache_root(&path));

    let mut aggregator = Aggregator::new(
        config.project.label.as_str(),
        config.dependencies.copyright_file.as_str(),
    )?;

    if !cli.quiet {
        eprintln!(
            "  {} Scanning {}",
            "→".cyan(),
            cache_root.display().to_string().bold()
        );

        let pb = ProgressBar::new(0);
        pb.set_style(
            ProgressStyle::default_bar()
                .template("{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} {msg}")?
                .progress_chars("#>-"),
        );
        aggregator = aggregator.with_progress(pb);
    }

    let packages = aggregator.aggregate_licenses(
        &config.project.license,
        &cache_root,
        &config.sublicenses,
        &config.output.path,
    )?;

    let bundle_report = BundleReport {
        output: config.output.path.clone(),
        project_label: config.project.label.clone(),
        sublicenses: config.sublicenses.iter().map(|s| s.label.clone()).collect(),
        packages,
    };

    if matches!(cli.report, ReportFormat::Json) {
        println!("{}", serde_json::to_string_pretty(&bundle_report)?);
    } else {
        report::terminal::render(&bundle_report, &path, cli.verbose, cli.quiet);
    }

    if cli.strict && bundle_report.missing().next().is_some() {
        std::process::exit(1);
    }

    Ok(())
}
