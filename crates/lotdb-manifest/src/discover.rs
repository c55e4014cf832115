//! Manifest file discovery: enumerate `order_manifest_<order_id>.xlsx`
//! files and derive the order id each one belongs to.

use std::path::{Path, PathBuf};

use crate::error::ManifestError;

const FILE_PREFIX: &str = "order_manifest_";
const FILE_EXTENSION: &str = "xlsx";

/// One discovered manifest workbook and the order id taken from its name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ManifestFile {
    pub path: PathBuf,
    pub order_id: String,
}

/// List manifest workbooks in `dir`, sorted by file name.
///
/// Only files matching `order_manifest_<order_id>.xlsx` are returned. A
/// missing directory yields an empty list — the caller reports "no files"
/// rather than treating a fresh data directory as a failure.
///
/// # Errors
///
/// Returns [`ManifestError::Io`] if the directory exists but cannot be read.
pub fn find_manifest_files(dir: &Path) -> Result<Vec<ManifestFile>, ManifestError> {
    if !dir.is_dir() {
        tracing::warn!(dir = %dir.display(), "manifests directory does not exist");
        return Ok(Vec::new());
    }

    let entries = std::fs::read_dir(dir).map_err(|source| ManifestError::Io {
        path: dir.display().to_string(),
        source,
    })?;

    let mut files = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|source| ManifestError::Io {
            path: dir.display().to_string(),
            source,
        })?;
        let path = entry.path();
        let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
            continue;
        };
        if let Some(order_id) = order_id_from_filename(name) {
            files.push(ManifestFile { path, order_id });
        }
    }

    files.sort_by(|a, b| a.path.cmp(&b.path));
    Ok(files)
}

/// Derive the order id from a manifest file name, or `None` when the name
/// does not match the `order_manifest_<order_id>.xlsx` pattern.
#[must_use]
pub fn order_id_from_filename(name: &str) -> Option<String> {
    let stem = name.strip_prefix(FILE_PREFIX)?;
    let order_id = stem.strip_suffix(&format!(".{FILE_EXTENSION}"))?;
    if order_id.is_empty() {
        return None;
    }
    Some(order_id.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn order_id_is_stripped_from_the_filename() {
        assert_eq!(
            order_id_from_filename("order_manifest_BBY-1001.xlsx"),
            Some("BBY-1001".to_string())
        );
    }

    #[test]
    fn non_matching_names_are_rejected() {
        assert_eq!(order_id_from_filename("manifest_BBY-1001.xlsx"), None);
        assert_eq!(order_id_from_filename("order_manifest_BBY-1001.csv"), None);
        assert_eq!(order_id_from_filename("order_manifest_.xlsx"), None);
        assert_eq!(order_id_from_filename("orders.json"), None);
    }

    #[test]
    fn discovery_filters_and_sorts_by_name() {
        let dir = tempfile::tempdir().unwrap();
        for name in [
            "order_manifest_B2.xlsx",
            "order_manifest_A1.xlsx",
            "notes.txt",
            "order_manifest_bad.csv",
        ] {
            std::fs::write(dir.path().join(name), b"stub").unwrap();
        }

        let files = find_manifest_files(dir.path()).unwrap();
        let order_ids: Vec<&str> = files.iter().map(|f| f.order_id.as_str()).collect();
        assert_eq!(order_ids, vec!["A1", "B2"]);
    }

    #[test]
    fn missing_directory_yields_empty_list() {
        let dir = tempfile::tempdir().unwrap();
        let files = find_manifest_files(&dir.path().join("nope")).unwrap();
        assert!(files.is_empty());
    }
}
