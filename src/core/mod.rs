//! Link discovery and export over an Obsidian vault.

pub mod closure;
pub mod error;
pub mod export;
pub mod paths;
pub mod wikilink;
