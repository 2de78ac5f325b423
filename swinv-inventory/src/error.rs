use std::io;
use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum InventoryError {
    #[error("You cannot use both filter and exclude options at the same time.")]
    ConflictingFilters,

    #[error("cannot open registry key HKLM\\{path}")]
    OpenRoot {
        path: String,
        #[source]
        source: io::Error,
    },

    #[error("cannot write {}", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to write CSV row")]
    Csv(#[from] csv::Error),

    #[error("failed to serialize records as JSON")]
    Json(#[from] serde_json::Error),
}
