use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::models::SubLicense;

/// Root configuration structure, deserialized from `.license-bundler/config.toml`.
///
/// Every key is optional; missing keys fall back to the built-in defaults,
/// which reproduce the historical `vcpkg` layout.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub project: ProjectConfig,
    pub dependencies: DependenciesConfig,
    pub output: OutputConfig,
    /// Embedded sub-projects, bundled in declaration order.
    #[serde(rename = "sublicense")]
    pub sublicenses: Vec<SubLicense>,
}

/// The host project's own license.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct ProjectConfig {
    /// Label written on the first line of the bundle.
    pub label: String,
    pub license: PathBuf,
}

impl Default for ProjectConfig {
    fn default() -> Self {
        Self {
            label: "AFV Native".to_string(),
            license: PathBuf::from("COPYING.md"),
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct DependenciesConfig {
    /// Dependency cache root. `None` means auto-detect.
    pub cache_root: Option<PathBuf>,
    /// Exact file name searched for inside each package.
    pub copyright_file: String,
}

impl Default for DependenciesConfig {
    fn default() -> Self {
        Self {
            cache_root: None,
            copyright_file: "copyright".to_string(),
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub path: PathBuf,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from("ALL_LICENSES.txt"),
        }
    }
}

impl Config {
    /// Make every relative path absolute against `project_path`.
    pub fn resolve_paths(&mut self, project_path: &Path) {
        self.project.license = project_path.join(&self.project.license);
        self.output.path = project_path.join(&self.output.path);
        if let Some(root) = self.dependencies.cache_root.take() {
            self.dependencies.cache_root = Some(project_path.join(root));
        }
        for sub in &mut self.sublicenses {
            sub.path = project_path.join(&sub.path);
        }
    }
}

/// Load the configuration, searching in order:
///
/// 1. `config_override` — path passed via `--config`
/// 2. `<project_path>/.license-bundler/config.toml`
/// 3. `~/.config/license-bundler/config.toml`
/// 4. Built-in [`Config::default`]
pub fn load_config(project_path: &Path, config_override: Option<&Path>) -> Result<Config> {
    if let Some(path) = config_override {
        return read_config(path);
    }

    let project_config = project_path.join(".license-bundler").join("config.toml");
    if project_config.exists() {
        return read_config(&project_config);
    }

    if let Some(home) = dirs::home_dir() {
        let home_config = home
            .join(".config")
            .join("license-bundler")
            .join("config.toml");
        if home_config.exists() {
            return read_config(&home_config);
        }
    }

    Ok(Config::default())
}

fn read_config(path: &Path) -> Result<Config> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read config {}", path.display()))?;
    toml::from_str(&content).with_context(|| format!("invalid config {}", path.display()))
}
