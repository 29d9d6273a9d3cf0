use std::path::PathBuf;

use clap::Parser;

#[derive(Parser, Debug)]
#[command(
    name = "license-bundler",
    about = "Bundle project and third-party dependency licenses into a single file",
    version
)]
pub struct Cli {
    /// Project directory; relative paths are resolved against it
    #[arg(default_value = ".")]
    pub path: PathBuf,

    /// Config file [default: ./.license-bundler/config.toml, fallback ~/.config/license-bundler/config.toml]
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Project license file [default: COPYING.md]
    #[arg(long, value_name = "FILE")]
    pub license: Option<PathBuf>,

    /// Dependency cache root, one directory per package [default: auto-detect vcpkg/packages]
    #[arg(long, value_name = "DIR")]
    pub cache_root: Option<PathBuf>,

    /// Output file [default: ALL_LICENSES.txt]
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Report format
    #[arg(long, default_value = "terminal", value_name = "FORMAT")]
    pub report: ReportFormat,

    /// Exit with status 1 if any package has no copyright file
    #[arg(long)]
    pub strict: bool,

    /// List every bundled package, not just the ones without a license
    #[arg(short, long)]
    pub verbose: bool,

    /// Only print summary line
    #[arg(short, long)]
    pub quiet: bool,
}

#[derive(Debug, Clone, clap::ValueEnum)]
pub enum ReportFormat {
    Terminal,
    Json,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_arguments() {
        let cli = Cli::try_parse_from(["license-bundler"]).unwrap();
        assert_eq!(cli.path, PathBuf::from("."));
        assert!(cli.license.is_none());
        assert!(cli.cache_root.is_none());
        assert!(cli.output.is_none());
        assert!(matches!(cli.report, ReportFormat::Terminal));
        assert!(!cli.strict);
    }

    #[test]
    fn test_overrides() {
        let cli = Cli::try_parse_from([
            "license-bundler",
            "afv-native",
            "--cache-root",
            "build/vcpkg_installed",
            "-o",
            "dist/LICENSES.txt",
            "--report",
            "json",
            "--strict",
        ])
        .unwrap();

        assert_eq!(cli.path, PathBuf::from("afv-native"));
        assert_eq!(cli.cache_root, Some(PathBuf::from("build/vcpkg_installed")));
        assert_eq!(cli.output, Some(PathBuf::from("dist/LICENSES.txt")));
        assert!(matches!(cli.report, ReportFormat::Json));
        assert!(cli.strict);
    }
}
