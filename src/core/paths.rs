use std::path::{Component, Path, PathBuf};

use super::error::{ExportError, Result};

/// Directory whose presence marks a vault root.
pub const VAULT_MARKER: &str = ".obsidian";

/// Extension of documents that are scanned for links.
pub const DOCUMENT_EXTENSION: &str = "md";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Vault {
    pub root: PathBuf,
}

impl Vault {
    pub fn from_root(root: PathBuf) -> Self {
        Self { root }
    }

    /// Finds the nearest ancestor of `seed` that contains the vault marker.
    pub fn discover(seed: &Path) -> Result<Self> {
        seed.ancestors()
            .skip(1)
            .find(|dir| dir.join(VAULT_MARKER).is_dir())
            .map(|root| Self::from_root(root.to_path_buf()))
            .ok_or_else(|| ExportError::NotInVault(seed.to_path_buf()))
    }

    /// Joins a raw link target onto the vault root, adding `.md` when the
    /// target has no extension. Purely syntactic; the file may not exist.
    pub fn resolve_target(&self, raw: &str) -> PathBuf {
        let has_extension = Path::new(raw)
            .extension()
            .is_some_and(|ext| !ext.is_empty());

        if has_extension {
            self.root.join(raw)
        } else {
            self.root.join(format!("{raw}.{DOCUMENT_EXTENSION}"))
        }
    }

    pub fn relative<'a>(&self, path: &'a Path) -> Result<&'a Path> {
        let outside = || ExportError::OutsideVault {
            path: path.to_path_buf(),
            root: self.root.clone(),
        };

        let rel = path.strip_prefix(&self.root).map_err(|_| outside())?;

        // `..` is kept as written; only reject it once it climbs above the root.
        let mut depth = 0usize;
        for component in rel.components() {
            match component {
                Component::Normal(_) => depth += 1,
                Component::CurDir => {}
                Component::ParentDir => depth = depth.checked_sub(1).ok_or_else(outside)?,
                Component::RootDir | Component::Prefix(_) => return Err(outside()),
            }
        }
        Ok(rel)
    }
}

pub fn is_document(path: &Path) -> bool {
    path.extension()
        .map(|e| e == DOCUMENT_EXTENSION)
        .unwrap_or(false)
}
