use std::path::PathBuf;

use clap::Parser;

use vault_export::commands;
use vault_export::commands::export::ExportOptions;
use vault_export::logging;

#[derive(Parser)]
#[command(name = "vault-export")]
#[command(about = "Export an Obsidian note and everything it links to", long_about = None)]
#[command(version)]
struct Cli {
    #[arg(help = "Note to start the export from")]
    file: PathBuf,
    #[arg(help = "Destination directory (must be missing or empty)")]
    outdir: PathBuf,
    #[arg(long, alias = "dry-run", help = "Report what would be exported without copying")]
    dryrun: bool,
    #[arg(long, help = "Log every exported file")]
    verbose: bool,
    #[arg(long, help = "JSON output")]
    json: bool,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    logging::init(cli.verbose);

    let options = ExportOptions {
        dry_run: cli.dryrun,
        json: cli.json,
    };
    commands::export::run(&cli.file, &cli.outdir, options)
}
