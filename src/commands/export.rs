use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use colored::*;
use serde::Serialize;

use crate::core::closure::collect_export_set;
use crate::core::error::ExportError;
use crate::core::export::{ensure_destination_usable, ExportEntry, ExportPlan};
use crate::core::paths::Vault;

#[derive(Debug, Clone, Copy, Default)]
pub struct ExportOptions {
    pub dry_run: bool,
    pub json: bool,
}

#[derive(Serialize)]
struct ExportReport<'a> {
    vault: &'a Path,
    destination: &'a Path,
    dry_run: bool,
    files: &'a [ExportEntry],
}

pub fn run(file: &Path, outdir: &Path, options: ExportOptions) -> Result<()> {
    let (vault, plan) = prepare(file, outdir, options.dry_run)?;
    let written = plan.materialize(options.dry_run)?;

    if options.json {
        let report = ExportReport {
            vault: &vault.root,
            destination: outdir,
            dry_run: options.dry_run,
            files: &plan.entries,
        };
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else if options.dry_run {
        println!(
            "{} {} files would be exported to {}",
            "Dry run:".yellow(),
            plan.len().to_string().cyan(),
            outdir.display()
        );
    } else {
        println!(
            "{} Exported {} files to {}",
            "✓".green(),
            written.to_string().cyan(),
            outdir.display()
        );
    }

    Ok(())
}

/// Validates inputs and computes the export plan without writing anything.
pub fn prepare(file: &Path, outdir: &Path, dry_run: bool) -> Result<(Vault, ExportPlan)> {
    if !file.is_file() {
        return Err(ExportError::NotAFile(file.to_path_buf()).into());
    }
    if !dry_run {
        ensure_destination_usable(outdir)?;
    }

    let seed: PathBuf = fs::canonicalize(file)
        .with_context(|| format!("failed to resolve {}", file.display()))?;
    let vault = Vault::discover(&seed)?;
    tracing::debug!("Vault root {}", vault.root.display());

    let set = collect_export_set(&vault, &seed)?;
    let plan = ExportPlan::build(&vault, &set, outdir)?;

    Ok((vault, plan))
}
