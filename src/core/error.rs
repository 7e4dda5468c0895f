use std::io;
use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("{0} is not a file")]
    NotAFile(PathBuf),

    #[error("{0} is not an empty directory")]
    DestinationNotEmpty(PathBuf),

    #[error("{0} is not within an obsidian vault")]
    NotInVault(PathBuf),

    #[error("{path} is outside the vault at {root}")]
    OutsideVault { path: PathBuf, root: PathBuf },

    #[error("failed to read {path}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to inspect {path}")]
    Inspect {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to create directory {path}")]
    CreateDir {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to copy {from} to {to}")]
    Copy {
        from: PathBuf,
        to: PathBuf,
        #[source]
        source: io::Error,
    },
}

pub type Result<T> = std::result::Result<T, ExportError>;
