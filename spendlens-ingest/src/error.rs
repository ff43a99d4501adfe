//! Extraction errors. `extract` never surfaces these; `try_extract` does.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ExtractError {
    #[error("PDF error: {0}")]
    Pdf(#[from] pdfplumber::PdfError),

    #[error("PDF write error: {0}")]
    Write(#[from] lopdf::Error),

    #[error("Page {page}: {reason}")]
    Page { page: u32, reason: String },

    #[error("Regex error: {0}")]
    Regex(#[from] regex::Error),

    #[error("Render error: {0}")]
    Render(String),
}

pub type Result<T> = std::result::Result<T, ExtractError>;
