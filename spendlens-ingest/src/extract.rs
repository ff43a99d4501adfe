//! Statement extraction entry points.
//!
//! `try_extract` reports failures; `extract` is the boundary the import
//! pipeline calls and never fails: any error yields an empty list and a
//! warning in the log.

use pdfplumber::Pdf;
use std::path::Path;
use tracing::{debug, warn};

use crate::error::{ExtractError, Result};
use crate::page::StatementPage;
use crate::parsers::{default_parsers, parse_page};
use crate::types::{Extraction, PageSummary, RawTransaction};

/// Extract every transaction in the statement at `path`, page by page.
///
/// A failure on any page abandons the whole document; records from pages
/// already read are not returned.
pub fn try_extract(path: impl AsRef<Path>) -> Result<Extraction> {
    let path = path.as_ref();
    let pdf = Pdf::open_path(path, None)?;
    let parsers = default_parsers()?;

    let mut extraction = Extraction::default();
    for index in 0..pdf.page_count() {
        let page = pdf.page(index).map_err(|e| ExtractError::Page {
            page: index as u32 + 1,
            reason: e.to_string(),
        })?;
        let page_number = StatementPage::page_number(&page);
        let (strategy, records) = parse_page(&parsers, &page)?;
        debug!(
            file = %path.display(),
            page = page_number,
            ?strategy,
            records = records.len(),
            "page extracted"
        );
        extraction.pages.push(PageSummary { page_number, strategy, records: records.len() });
        extraction.transactions.extend(records);
    }

    Ok(extraction)
}

/// Extract transactions, treating an unreadable document as an empty one.
pub fn extract(path: impl AsRef<Path>) -> Vec<RawTransaction> {
    let path = path.as_ref();
    match try_extract(path) {
        Ok(extraction) => extraction.transactions,
        Err(e) => {
            warn!(file = %path.display(), error = %e, "statement could not be read; no transactions extracted");
            Vec::new()
        }
    }
}
