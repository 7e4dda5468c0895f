//! vault-export library
//!
//! Exports an Obsidian note together with every file it links to, directly or
//! transitively, into a standalone directory.
//!
//! # Modules
//!
//! - `core`: link extraction, target resolution, closure traversal and copying
//! - `commands`: the export command behind the `vault-export` binary
//! - `logging`: tracing subscriber setup

pub mod commands;
pub mod core;
pub mod logging;

// Re-exports for convenience
pub use core::closure::{collect_export_set, ExportSet};
pub use core::error::ExportError;
pub use core::export::{ensure_destination_usable, ExportEntry, ExportPlan};
pub use core::paths::{Vault, DOCUMENT_EXTENSION, VAULT_MARKER};
pub use core::wikilink::{extract_wikilinks, wikilink_targets};
