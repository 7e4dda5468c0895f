use std::fs;
use std::path::{Path, PathBuf};

use serde::Serialize;
use tracing::info;

use super::closure::ExportSet;
use super::error::{ExportError, Result};
use super::paths::Vault;

/// The destination must be missing or an empty directory.
pub fn ensure_destination_usable(outdir: &Path) -> Result<()> {
    if !outdir.exists() {
        return Ok(());
    }

    if outdir.is_dir() {
        let mut entries = fs::read_dir(outdir).map_err(|source| ExportError::Inspect {
            path: outdir.to_path_buf(),
            source,
        })?;
        if entries.next().is_none() {
            return Ok(());
        }
    }

    Err(ExportError::DestinationNotEmpty(outdir.to_path_buf()))
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExportEntry {
    pub source: PathBuf,
    pub destination: PathBuf,
}

#[derive(Debug, Default, Clone, Serialize)]
pub struct ExportPlan {
    pub entries: Vec<ExportEntry>,
}

impl ExportPlan {
    /// Maps every file of the set to its place under `outdir`, keeping its
    /// vault-relative path.
    pub fn build(vault: &Vault, set: &ExportSet, outdir: &Path) -> Result<Self> {
        let entries = set
            .iter()
            .map(|source| -> Result<ExportEntry> {
                let rel = vault.relative(source)?;
                Ok(ExportEntry {
                    source: source.to_path_buf(),
                    destination: outdir.join(rel),
                })
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(Self { entries })
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Copies every entry in order. Files copied before a failure stay on disk.
    ///
    /// Returns the number of files written, which is zero for a dry run.
    pub fn materialize(&self, dry_run: bool) -> Result<usize> {
        let mut written = 0;

        for entry in &self.entries {
            info!(
                "Exporting {} to {}",
                entry.source.display(),
                entry.destination.display()
            );
            if dry_run {
                continue;
            }

            if let Some(parent) = entry.destination.parent() {
                fs::create_dir_all(parent).map_err(|source| ExportError::CreateDir {
                    path: parent.to_path_buf(),
                    source,
                })?;
            }
            fs::copy(&entry.source, &entry.destination).map_err(|source| ExportError::Copy {
                from: entry.source.clone(),
                to: entry.destination.clone(),
                source,
            })?;
            written += 1;
        }

        Ok(written)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::closure::collect_export_set;
    use crate::core::paths::VAULT_MARKER;
    use tempfile::tempdir;

    fn write(root: &Path, rel: &str, content: &str) {
        let path = root.join(rel);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(path, content).unwrap();
    }

    #[test]
    fn test_destination_missing_or_empty_is_usable() {
        let tmp = tempdir().unwrap();
        assert!(ensure_destination_usable(&tmp.path().join("new")).is_ok());
        assert!(ensure_destination_usable(tmp.path()).is_ok());
    }

    #[test]
    fn test_destination_with_content_is_rejected() {
        let tmp = tempdir().unwrap();
        write(tmp.path(), "existing.txt", "x");
        assert!(matches!(
            ensure_destination_usable(tmp.path()),
            Err(ExportError::DestinationNotEmpty(_))
        ));
    }

    #[test]
    fn test_destination_that_is_a_file_is_rejected() {
        let tmp = tempdir().unwrap();
        let file = tmp.path().join("out");
        fs::write(&file, "").unwrap();
        assert!(matches!(
            ensure_destination_usable(&file),
            Err(ExportError::DestinationNotEmpty(_))
        ));
    }

    #[test]
    fn test_materialize_preserves_relative_paths() {
        let tmp = tempdir().unwrap();
        let root = tmp.path().join("vault");
        let out = tmp.path().join("out");
        fs::create_dir_all(root.join(VAULT_MARKER)).unwrap();
        write(&root, "index.md", "[[sub/Child]] ![[img/a.png]]");
        write(&root, "sub/Child.md", "child body");
        write(&root, "img/a.png", "\u{1}\u{2}binary");

        let vault = Vault::from_root(root.clone());
        let set = collect_export_set(&vault, &root.join("index.md")).unwrap();
        let plan = ExportPlan::build(&vault, &set, &out).unwrap();
        assert_eq!(plan.len(), 3);

        assert_eq!(plan.materialize(false).unwrap(), 3);
        assert_eq!(
            fs::read_to_string(out.join("sub/Child.md")).unwrap(),
            "child body"
        );
        assert_eq!(
            fs::read(out.join("img/a.png")).unwrap(),
            fs::read(root.join("img/a.png")).unwrap()
        );
        assert!(out.join("index.md").is_file());
    }

    #[test]
    fn test_dry_run_writes_nothing() {
        let tmp = tempdir().unwrap();
        let root = tmp.path().join("vault");
        let out = tmp.path().join("out");
        fs::create_dir_all(root.join(VAULT_MARKER)).unwrap();
        write(&root, "index.md", "![[missing.png]]");

        let vault = Vault::from_root(root.clone());
        let set = collect_export_set(&vault, &root.join("index.md")).unwrap();
        let plan = ExportPlan::build(&vault, &set, &out).unwrap();

        assert_eq!(plan.materialize(true).unwrap(), 0);
        assert!(!out.exists());
    }

    #[test]
    fn test_missing_leaf_fails_at_copy() {
        let tmp = tempdir().unwrap();
        let root = tmp.path().join("vault");
        let out = tmp.path().join("out");
        fs::create_dir_all(root.join(VAULT_MARKER)).unwrap();
        write(&root, "index.md", "![[missing.png]]");

        let vault = Vault::from_root(root.clone());
        let set = collect_export_set(&vault, &root.join("index.md")).unwrap();
        let plan = ExportPlan::build(&vault, &set, &out).unwrap();

        match plan.materialize(false) {
            Err(ExportError::Copy { from, .. }) => assert_eq!(from, root.join("missing.png")),
            other => panic!("expected Copy error, got {other:?}"),
        }
        // index.md sorts before missing.png and was already copied.
        assert!(out.join("index.md").is_file());
    }

    #[test]
    fn test_parent_dir_inside_vault_is_exported() {
        let tmp = tempdir().unwrap();
        let root = tmp.path().join("vault");
        let out = tmp.path().join("out");
        fs::create_dir_all(root.join(VAULT_MARKER)).unwrap();
        fs::create_dir_all(root.join("a")).unwrap();
        write(&root, "index.md", "![[a/../b.png]]");
        write(&root, "b.png", "PNG");

        let vault = Vault::from_root(root.clone());
        let set = collect_export_set(&vault, &root.join("index.md")).unwrap();
        let plan = ExportPlan::build(&vault, &set, &out).unwrap();
        assert!(plan
            .entries
            .iter()
            .any(|e| e.destination == out.join("a/../b.png")));

        assert_eq!(plan.materialize(false).unwrap(), 2);
        assert_eq!(fs::read_to_string(out.join("b.png")).unwrap(), "PNG");
    }

    #[test]
    fn test_plan_rejects_targets_escaping_vault() {
        let tmp = tempdir().unwrap();
        let root = tmp.path().join("vault");
        fs::create_dir_all(root.join(VAULT_MARKER)).unwrap();
        write(&root, "index.md", "[[../outside.png]]");

        let vault = Vault::from_root(root.clone());
        let set = collect_export_set(&vault, &root.join("index.md")).unwrap();
        assert!(matches!(
            ExportPlan::build(&vault, &set, &tmp.path().join("out")),
            Err(ExportError::OutsideVault { .. })
        ));
    }
}
