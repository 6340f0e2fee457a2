//! Renaming documents in place.

use crate::error::{CliError, Result};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

/// Rename `path` to `new_name` within its directory.
///
/// Never overwrites an existing file. Renaming a file to its current name
/// is a no-op.
pub fn rename_document(path: &Path, new_name: &str) -> Result<PathBuf> {
    let target = match path.parent() {
        Some(dir) => dir.join(new_name),
        None => PathBuf::from(new_name),
    };

    if target == path {
        return Ok(target);
    }
    if target.exists() {
        return Err(CliError::Rename(format!(
            "{} already exists",
            target.display()
        )));
    }

    fs::rename(path, &target).map_err(|e| {
        CliError::Rename(format!(
            "{} -> {}: {}",
            path.display(),
            target.display(),
            e
        ))
    })?;

    info!("Renamed {} to {}", path.display(), target.display());
    Ok(target)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_rename_in_same_directory() {
        let dir = TempDir::new().unwrap();
        let original = dir.path().join("scan001.pdf");
        fs::write(&original, "x").unwrap();

        let renamed =
            rename_document(&original, "Jane Roe - Motion - Legal - 2022-07-01.pdf").unwrap();
        assert_eq!(renamed.parent(), Some(dir.path()));
        assert!(renamed.is_file());
        assert!(!original.exists());
    }

    #[test]
    fn test_refuses_to_overwrite() {
        let dir = TempDir::new().unwrap();
        let original = dir.path().join("a.txt");
        let existing = dir.path().join("b.txt");
        fs::write(&original, "a").unwrap();
        fs::write(&existing, "b").unwrap();

        let result = rename_document(&original, "b.txt");
        assert!(matches!(result, Err(CliError::Rename(_))));
        assert_eq!(fs::read_to_string(&existing).unwrap(), "b");
        assert!(original.exists());
    }

    #[test]
    fn test_same_name_is_noop() {
        let dir = TempDir::new().unwrap();
        let original = dir.path().join("a.txt");
        fs::write(&original, "a").unwrap();

        assert_eq!(rename_document(&original, "a.txt").unwrap(), original);
    }
}
