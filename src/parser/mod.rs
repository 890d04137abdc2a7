//! Input parsers
//!
//! - [`dts`] - `qca,ar8327-initvals` tables from device tree sources
//!
//! [`find_sources`] expands a command-line path into the files to scan.

pub mod dts;

use std::path::{Path, PathBuf};

pub use dts::{scan_file, scan_str, InitvalsBlock, ScanError};

/// Files to scan for `path`.
///
/// A file is returned as-is. A directory yields its direct entries whose
/// extension is in `extensions`, sorted by path.
pub fn find_sources(path: impl AsRef<Path>, extensions: &[String]) -> Result<Vec<PathBuf>, ScanError> {
    let path = path.as_ref();
    let io_err = |source| ScanError::Io {
        path: path.to_path_buf(),
        source,
    };

    let meta = std::fs::metadata(path).map_err(io_err)?;
    if !meta.is_dir() {
        return Ok(vec![path.to_path_buf()]);
    }

    let mut found = Vec::new();
    for entry in std::fs::read_dir(path).map_err(io_err)? {
        let entry_path = entry.map_err(io_err)?.path();
        if !entry_path.is_file() {
            continue;
        }
        let matches = entry_path
            .extension()
            .and_then(|e| e.to_str())
            .is_some_and(|ext| extensions.iter().any(|want| want == ext));
        if matches {
            found.push(entry_path);
        }
    }
    found.sort();

    log::debug!("{}: {} source file(s)", path.display(), found.len());
    Ok(found)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn scratch_dir(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("qca8k-initvals-{}-{}", name, std::process::id()));
        let _ = fs::remove_dir_all(&dir);
        fs::create_dir_all(&dir).unwrap();
        dir
    }

    #[test]
    fn test_directory_filters_by_extension() {
        let dir = scratch_dir("filter");
        fs::write(dir.join("b.dtsi"), "").unwrap();
        fs::write(dir.join("a.dts"), "").unwrap();
        fs::write(dir.join("notes.txt"), "").unwrap();
        fs::create_dir(dir.join("sub.dts")).unwrap();

        let exts = vec!["dts".to_string(), "dtsi".to_string()];
        let found = find_sources(&dir, &exts).unwrap();
        let names: Vec<_> = found
            .iter()
            .filter_map(|p| p.file_name().and_then(|n| n.to_str()))
            .collect();
        assert_eq!(names, vec!["a.dts", "b.dtsi"]);

        fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn test_file_passes_through() {
        let dir = scratch_dir("single");
        let file = dir.join("board.txt");
        fs::write(&file, "").unwrap();

        let found = find_sources(&file, &["dts".to_string()]).unwrap();
        assert_eq!(found, vec![file]);

        fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn test_missing_path() {
        assert!(find_sources("/nonexistent/dir", &[]).is_err());
    }
}
