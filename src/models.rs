use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Separator appended after every label and every license text.
const SECTION_SEPARATOR: &str = "\n\n";

/// One labeled block of the output file.
#[derive(Debug, Clone, PartialEq)]
pub struct LicenseSection {
    pub label: String,
    pub texts: Vec<String>,
}

/// Ordered collection of license sections assembled before the single write.
#[derive(Debug, Default)]
pub struct LicenseBundle {
    sections: Vec<LicenseSection>,
}

impl LicenseBundle {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, label: impl Into<String>, text: impl Into<String>) {
        self.sections.push(LicenseSection {
            label: label.into(),
            texts: vec![text.into()],
        });
    }

    /// Add a section holding several texts under one label.
    pub fn push_many(&mut self, label: impl Into<String>, texts: Vec<String>) {
        self.sections.push(LicenseSection {
            label: label.into(),
            texts,
        });
    }

    /// Render every section as `label\n\n` followed by `text\n\n` per text.
    pub fn render(&self) -> String {
        let capacity = self
            .sections
            .iter()
            .map(|s| {
                s.label.len()
                    + s.texts.iter().map(String::len).sum::<usize>()
                    + SECTION_SEPARATOR.len() * (s.texts.len() + 1)
            })
            .sum();

        let mut out = String::with_capacity(capacity);
        for section in &self.sections {
            out.push_str(&section.label);
            out.push_str(SECTION_SEPARATOR);
            for text in &section.texts {
                out.push_str(text);
                out.push_str(SECTION_SEPARATOR);
            }
        }
        out
    }
}

/// A sub-project whose license is bundled right after the project's own.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct SubLicense {
    pub label: String,
    pub path: PathBuf,
}

/// A package directory found under the dependency cache root.
#[derive(Debug, Clone, Serialize)]
pub struct PackageEntry {
    pub name: String,
    pub path: PathBuf,
    pub copyright_paths: Vec<PathBuf>,
    pub license: Option<String>,
    pub risk: LicenseRisk,
}

impl PackageEntry {
    pub fn is_bundled(&self) -> bool {
        !self.copyright_paths.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum LicenseRisk {
    Permissive,
    WeakCopyleft,
    StrongCopyleft,
    Proprietary,
    Unknown,
}

impl std::fmt::Display for LicenseRisk {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LicenseRisk::Permissive => write!(f, "Permissive"),
            LicenseRisk::WeakCopyleft => write!(f, "Weak Copyleft"),
            LicenseRisk::StrongCopyleft => write!(f, "Strong Copyleft"),
            LicenseRisk::Proprietary => write!(f, "Proprietary"),
            LicenseRisk::Unknown => write!(f, "Unknown"),
        }
    }
}

/// Everything a run produced, for the terminal and JSON reports.
#[derive(Debug, Serialize)]
pub struct BundleReport {
    pub output: PathBuf,
    pub project_label: String,
    pub sublicenses: Vec<String>,
    pub packages: Vec<PackageEntry>,
}

impl BundleReport {
    pub fn bundled_count(&self) -> usize {
        self.packages.iter().filter(|p| p.is_bundled()).count()
    }

    pub fn missing(&self) -> impl Iterator<Item = &PackageEntry> {
        self.packages.iter().filter(|p| !p.is_bundled())
    }

    pub fn copyright_file_count(&self) -> usize {
        self.packages.iter().map(|p| p.copyright_paths.len()).sum()
    }
}
