//! Breadth-first closure over the "document links to file" graph.

use std::collections::{BTreeSet, HashSet, VecDeque};
use std::fs;
use std::path::{Path, PathBuf};

use tracing::debug;

use super::error::{ExportError, Result};
use super::paths::{is_document, Vault};
use super::wikilink::{normalize_newlines, wikilink_targets};

/// Every file reachable from a seed document, the seed included.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ExportSet {
    files: BTreeSet<PathBuf>,
}

impl ExportSet {
    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    pub fn contains(&self, path: &Path) -> bool {
        self.files.contains(path)
    }

    /// Iterates in sorted path order.
    pub fn iter(&self) -> impl Iterator<Item = &Path> {
        self.files.iter().map(PathBuf::as_path)
    }
}

/// Follows wikilinks from `seed` until no new file is found.
///
/// Documents are read in FIFO order; the first one that cannot be read aborts
/// the whole traversal. Non-document targets are leaves and are never opened,
/// so a missing attachment does not fail here.
pub fn collect_export_set(vault: &Vault, seed: &Path) -> Result<ExportSet> {
    let mut queue = VecDeque::from([seed.to_path_buf()]);
    let mut visited: HashSet<PathBuf> = HashSet::new();

    while let Some(file) = queue.pop_front() {
        if visited.contains(&file) {
            continue;
        }
        visited.insert(file.clone());

        if !is_document(&file) {
            debug!("Leaf {}", file.display());
            continue;
        }

        let raw = fs::read_to_string(&file).map_err(|source| ExportError::Read {
            path: file.clone(),
            source,
        })?;
        debug!("Scanning {}", file.display());

        let content = normalize_newlines(&raw);
        for target in wikilink_targets(&content) {
            let linked = vault.resolve_target(target);
            debug!("  [[{}]] -> {}", target, linked.display());
            queue.push_back(linked);
        }
    }

    Ok(ExportSet {
        files: visited.into_iter().collect(),
    })
}
