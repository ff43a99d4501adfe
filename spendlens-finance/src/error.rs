use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum LedgerError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Ledger file is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("No ledger entry with id {0}")]
    NotFound(u64),

    #[error("Entry {id} does not belong to {user}")]
    Unauthorized { id: u64, user: String },

    #[error("Invalid amount: {0}")]
    InvalidAmount(f64),

    #[error("Not a PDF statement: {}", .0.display())]
    NotPdf(PathBuf),
}

pub type Result<T> = std::result::Result<T, LedgerError>;
