use std::path::{Path, PathBuf};

/// Locate the dependency cache root when none is configured.
///
/// Probes `<project>/vcpkg/packages`, then `$VCPKG_ROOT/packages`. Falls back
/// to the project-local path so the missing directory is what gets reported.
pub fn detect_cache_root(project_path: &Path) -> PathBuf {
    let local = project_path.join("vcpkg").join("packages");
    let vcpkg_root = std::env::var_os("VCPKG_ROOT").map(PathBuf::from);
    pick_cache_root(local, vcpkg_root.as_deref())
}

fn pick_cache_root(local: PathBuf, vcpkg_root: Option<&Path>) -> PathBuf {
    if local.is_dir() {
        return local;
    }

    if let Some(root) = vcpkg_root {
        let packages = root.join("packages");
        if packages.is_dir() {
            return packages;
        }
    }

    local
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_prefers_project_local_cache() {
        let project = tempdir().unwrap();
        let vcpkg = tempdir().unwrap();
        let local = project.path().join("vcpkg").join("packages");
        fs::create_dir_all(&local).unwrap();
        fs::create_dir_all(vcpkg.path().join("packages")).unwrap();

        assert_eq!(pick_cache_root(local.clone(), Some(vcpkg.path())), local);
    }

    #[test]
    fn test_falls_back_to_vcpkg_root() {
        let project = tempdir().unwrap();
        let vcpkg = tempdir().unwrap();
        fs::create_dir_all(vcpkg.path().join("packages")).unwrap();
        let local = project.path().join("vcpkg").join("packages");

        assert_eq!(
            pick_cache_root(local, Some(vcpkg.path())),
            vcpkg.path().join("packages")
        );
    }

    #[test]
    fn test_nothing_found_returns_local_path() {
        let project = tempdir().unwrap();
        let local = project.path().join("vcpkg").join("packages");

        assert_eq!(pick_cache_root(local.clone(), None), local);
    }
}
