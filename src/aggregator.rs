use std::path::Path;

use anyhow::{Context, Result};
use colored::Colorize;
use indicatif::ProgressBar;

use crate::license::classifier::classify;
use crate::license::detect::{combine, LicenseDetector};
use crate::models::{LicenseBundle, LicenseRisk, PackageEntry, SubLicense};
use crate::scanner::{find_copyright_files, list_package_dirs, package_name};

/// Collects license texts into a [`LicenseBundle`] and writes it out.
pub struct Aggregator {
    project_label: String,
    copyright_file: String,
    detector: LicenseDetector,
    progress: ProgressBar,
    quiet: bool,
}

impl Aggregator {
    pub fn new(project_label: impl Into<String>, copyright_file: impl Into<String>) -> Result<Self> {
        Ok(Self {
            project_label: project_label.into(),
            copyright_file: copyright_file.into(),
            detector: LicenseDetector::new()?,
            progress: ProgressBar::hidden(),
            quiet: true,
        })
    }

    /// Print per-package notices, drawn around `progress`.
    pub fn with_progress(mut self, progress: ProgressBar) -> Self {
        self.progress = progress;
        self.quiet = false;
        self
    }

    /// Bundle every license and write the result to `output_path`.
    ///
    /// All reads happen before the output is opened, so a failure leaves any
    /// existing output file untouched.
    pub fn aggregate_licenses(
        &self,
        project_license_path: &Path,
        dependency_cache_root: &Path,
        static_sublicenses: &[SubLicense],
        output_path: &Path,
    ) -> Result<Vec<PackageEntry>> {
        let result = self
            .build_bundle(project_license_path, dependency_cache_root, static_sublicenses)
            .and_then(|(bundle, packages)| {
                std::fs::write(output_path, bundle.render())
                    .with_context(|| format!("failed to write {}", output_path.display()))?;
                Ok(packages)
            });

        // Clear the bar on every path so an error is not printed under it
        self.progress.finish_and_clear();
        result
    }

    /// Assemble the bundle in memory without touching the output file.
    pub fn build_bundle(
        &self,
        project_license_path: &Path,
        dependency_cache_root: &Path,
        static_sublicenses: &[SubLicense],
    ) -> Result<(LicenseBundle, Vec<PackageEntry>)> {
        let mut bundle = LicenseBundle::new();

        bundle.push(self.project_label.as_str(), read_text(project_license_path)?);

        for sub in static_sublicenses {
            self.notice(format!("Getting license for: {}", sub.label.bold()));
            bundle.push(sub.label.as_str(), read_text(&sub.path)?);
        }

        let package_dirs = list_package_dirs(dependency_cache_root)?;
        self.progress.set_length(package_dirs.len() as u64);

        let mut packages = Vec::with_capacity(package_dirs.len());
        for dir in package_dirs {
            let name = package_name(&dir);
            self.progress.set_message(name.clone());

            let copyright_paths = find_copyright_files(&dir, &self.copyright_file)?;
            let mut entry = PackageEntry {
                name,
                path: dir,
                copyright_paths,
                license: None,
                risk: LicenseRisk::Unknown,
            };

            if entry.is_bundled() {
                let texts = entry
                    .copyright_paths
                    .iter()
                    .map(|p| read_text(p))
                    .collect::<Result<Vec<_>>>()?;

                entry.license =
                    combine(texts.iter().filter_map(|t| self.detector.detect_license(t)));
                entry.risk = entry
                    .license
                    .as_deref()
                    .map(classify)
                    .unwrap_or(LicenseRisk::Unknown);

                bundle.push_many(entry.name.as_str(), texts);
            }

            self.notice(package_notice(&entry));

            packages.push(entry);
            self.progress.inc(1);
        }

        Ok((bundle, packages))
    }

    fn notice(&self, line: String) {
        if !self.quiet {
            self.progress
                .suspend(|| eprintln!("  {} {}", "→".cyan(), line));
        }
    }
}

/// The progress line printed for one scanned package.
pub fn package_notice(entry: &PackageEntry) -> String {
    let status = match entry.copyright_paths.len() {
        0 => "No license found!".yellow(),
        n => format!("Found {} licenses", n).green(),
    };
    format!("Getting license for: {} {}", entry.name.bold(), status)
}

fn read_text(path: &Path) -> Result<String> {
    std::fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))
}
