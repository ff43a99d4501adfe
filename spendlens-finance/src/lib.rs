//! spendlens-finance: category rules, statement import, ledger, and budget summary

pub mod budget;
pub mod category_rules;
pub mod error;
pub mod import;
pub mod ledger;

pub use budget::{BudgetSummary, LimitStatus};
pub use category_rules::{categorize, categorize_opt};
pub use error::{LedgerError, Result};
pub use import::{import_statement, is_pdf, NewEntry};
pub use ledger::{EntryUpdate, Ledger};
