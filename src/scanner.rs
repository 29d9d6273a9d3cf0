use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use walkdir::WalkDir;

/// List the package directories directly under the dependency cache root,
/// sorted by name so the bundle is reproducible across filesystems.
pub fn list_package_dirs(root: &Path) -> Result<Vec<PathBuf>> {
    if !root.is_dir() {
        bail!("dependency cache root {} is not a directory", root.display());
    }

    let mut dirs = Vec::new();
    let entries = std::fs::read_dir(root)
        .with_context(|| format!("failed to list {}", root.display()))?;

    for entry in entries {
        let entry = entry.with_context(|| format!("failed to list {}", root.display()))?;
        let path = entry.path();
        // `is_dir` follows symlinks, so linked packages are scanned too
        if path.is_dir() {
            dirs.push(path);
        }
    }

    dirs.sort_by(|a, b| a.file_name().cmp(&b.file_name()));
    Ok(dirs)
}

/// Recursively collect files named exactly `file_name` beneath `package_dir`.
///
/// The walk is depth-first with siblings sorted by name. Directory links
/// inside the package are not followed; a link named `file_name` that points
/// at a regular file is collected.
pub fn find_copyright_files(package_dir: &Path, file_name: &str) -> Result<Vec<PathBuf>> {
    let mut found = Vec::new();

    for entry in WalkDir::new(package_dir).sort_by_file_name() {
        let entry = entry.with_context(|| format!("failed to walk {}", package_dir.display()))?;
        if entry.file_name() != file_name {
            continue;
        }
        let is_file = entry.file_type().is_file()
            || (entry.path_is_symlink() && entry.path().is_file());
        if is_file {
            found.push(entry.into_path());
        }
    }

    Ok(found)
}

/// The label used for a package: its directory's final path segment.
pub fn package_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_list_package_dirs_sorted_and_skips_files() {
        let root = tempdir().unwrap();
        fs::create_dir(root.path().join("zlib_x64-linux")).unwrap();
        fs::create_dir(root.path().join("curl_x64-linux")).unwrap();
        fs::create_dir(root.path().join("openssl_x64-linux")).unwrap();
        fs::write(root.path().join("README"), "not a package").unwrap();

        let names: Vec<String> = list_package_dirs(root.path())
            .unwrap()
            .iter()
            .map(|p| package_name(p))
            .collect();

        assert_eq!(names, ["curl_x64-linux", "openssl_x64-linux", "zlib_x64-linux"]);
    }

    #[test]
    fn test_list_package_dirs_missing_root() {
        let root = tempdir().unwrap();
        let missing = root.path().join("vcpkg").join("packages");
        assert!(list_package_dirs(&missing).is_err());
    }

    #[test]
    fn test_find_copyright_files_nested_in_name_order() {
        let pkg = tempdir().unwrap();
        let b = pkg.path().join("share").join("b");
        let a = pkg.path().join("share").join("a");
        fs::create_dir_all(&b).unwrap();
        fs::create_dir_all(&a).unwrap();
        fs::write(b.join("copyright"), "B").unwrap();
        fs::write(a.join("copyright"), "A").unwrap();
        fs::write(a.join("copyright.txt"), "not matched").unwrap();
        fs::write(pkg.path().join("COPYRIGHT"), "wrong case").unwrap();

        let found = find_copyright_files(pkg.path(), "copyright").unwrap();
        assert_eq!(found, vec![a.join("copyright"), b.join("copyright")]);
    }

    #[cfg(unix)]
    #[test]
    fn test_find_copyright_files_accepts_symlinked_file() {
        let pkg = tempdir().unwrap();
        let share = pkg.path().join("share").join("zlib");
        fs::create_dir_all(&share).unwrap();
        fs::write(pkg.path().join("LICENSE.real"), "zlib license").unwrap();
        std::os::unix::fs::symlink("../../LICENSE.real", share.join("copyright")).unwrap();

        let found = find_copyright_files(pkg.path(), "copyright").unwrap();
        assert_eq!(found, vec![share.join("copyright")]);
        assert_eq!(fs::read_to_string(&found[0]).unwrap(), "zlib license");
    }

    #[cfg(unix)]
    #[test]
    fn test_find_copyright_files_does_not_follow_directory_links() {
        let pkg = tempdir().unwrap();
        let elsewhere = tempdir().unwrap();
        fs::create_dir_all(elsewhere.path().join("doc")).unwrap();
        fs::write(elsewhere.path().join("doc").join("copyright"), "outside").unwrap();
        std::os::unix::fs::symlink(elsewhere.path(), pkg.path().join("linked")).unwrap();

        let found = find_copyright_files(pkg.path(), "copyright").unwrap();
        assert!(found.is_empty());
    }

    #[cfg(unix)]
    #[test]
    fn test_find_copyright_files_skips_dangling_link() {
        let pkg = tempdir().unwrap();
        std::os::unix::fs::symlink("missing", pkg.path().join("copyright")).unwrap();

        let found = find_copyright_files(pkg.path(), "copyright").unwrap();
        assert!(found.is_empty());
    }

    #[test]
    fn test_find_copyright_files_ignores_directories_named_copyright() {
        let pkg = tempdir().unwrap();
        fs::create_dir_all(pkg.path().join("copyright")).unwrap();

        let found = find_copyright_files(pkg.path(), "copyright").unwrap();
        assert!(found.is_empty());
    }
}
