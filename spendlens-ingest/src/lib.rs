//! spendlens-ingest: statement PDF reading and transaction extraction.
//!
//! Pages with a ruled table are read row by row (debit/credit columns); other
//! pages fall back to matching transaction lines in the page text.

pub mod error;
pub mod extract;
pub mod page;
pub mod parsers;
pub mod render;
pub mod types;

pub use error::{ExtractError, Result};
pub use extract::{extract, try_extract};
pub use page::{StatementPage, TableRows};
pub use render::{render_statement, render_text_statement, sample_rows, StatementRow};
pub use types::{Extraction, PageStrategy, PageSummary, RawTransaction};
