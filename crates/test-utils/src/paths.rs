//! Output locations for tests that write image files.

use std::path::PathBuf;

/// Creates a temporary directory for test output.
///
/// The directory is automatically cleaned up when the returned `TempDir` is dropped.
pub fn temp_test_dir() -> tempfile::TempDir {
    tempfile::tempdir().expect("Failed to create temporary test directory")
}

/// Creates a temporary directory with a specific prefix.
///
/// # Arguments
///
/// * `prefix` - A prefix for the directory name (e.g., "heatmap_png")
pub fn temp_test_dir_with_prefix(prefix: &str) -> tempfile::TempDir {
    tempfile::Builder::new()
        .prefix(prefix)
        .tempdir()
        .expect("Failed to create temporary test directory")
}

/// Base name (no extension) for an output file inside `dir`.
pub fn output_base(dir: &tempfile::TempDir, name: &str) -> PathBuf {
    dir.path().join(name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_temp_test_dir_exists() {
        let dir = temp_test_dir_with_prefix("heatmap_test");
        assert!(dir.path().is_dir());
        assert_eq!(output_base(&dir, "out"), dir.path().join("out"));
    }
}
