//! Statement import: extract every record from a statement PDF and label it.
//!
//! The extractor never fails, so an unreadable statement imports nothing.
//! Only files named `*.pdf` (any case) are accepted.

use serde::{Deserialize, Serialize};
use spendlens_core::Category;
use spendlens_ingest::RawTransaction;
use std::path::Path;
use tracing::info;

use crate::category_rules::categorize;
use crate::error::{LedgerError, Result};

/// A categorized transaction that has not been given an id or owner yet
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewEntry {
    pub date: String,
    pub description: String,
    pub amount: f64,
    pub category: Category,
}

impl From<RawTransaction> for NewEntry {
    fn from(raw: RawTransaction) -> Self {
        let category = categorize(&raw.description);
        NewEntry {
            date: raw.date,
            description: raw.description,
            amount: raw.amount,
            category,
        }
    }
}

/// True if the file name ends in `.pdf`, ignoring case.
pub fn is_pdf(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("pdf"))
}

/// Extract and categorize the transactions in a statement.
pub fn import_statement(path: impl AsRef<Path>) -> Result<Vec<NewEntry>> {
    let path = path.as_ref();
    if !is_pdf(path) {
        return Err(LedgerError::NotPdf(path.to_path_buf()));
    }

    let entries: Vec<NewEntry> = spendlens_ingest::extract(path)
        .into_iter()
        .map(NewEntry::from)
        .collect();

    info!(file = %path.display(), count = entries.len(), "statement imported");
    Ok(entries)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_pdf_ignores_case() {
        assert!(is_pdf(Path::new("uploads/October.PDF")));
        assert!(is_pdf(Path::new("statement.pdf")));
        assert!(!is_pdf(Path::new("statement.csv")));
        assert!(!is_pdf(Path::new("pdf")));
    }

    #[test]
    fn test_rejects_other_extensions() {
        let err = import_statement("statement.xlsx").unwrap_err();
        assert!(matches!(err, LedgerError::NotPdf(_)));
    }

    #[test]
    fn test_missing_pdf_imports_nothing() {
        let entries = import_statement("/nonexistent/statement.pdf").unwrap();
        assert!(entries.is_empty());
    }

    #[test]
    fn test_new_entry_is_categorized() {
        let raw = RawTransaction {
            date: "18/10/2023".to_string(),
            description: "Amazon Shopping".to_string(),
            amount: -2000.0,
        };
        let entry = NewEntry::from(raw);
        assert_eq!(entry.category, Category::Shopping);
        assert_eq!(entry.amount, -2000.0);
    }
}
