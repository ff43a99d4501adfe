//! spendlens-core: domain types shared across the SpendLens crates

pub mod finance;

pub use finance::{parse_statement_date, Category, LedgerEntry, UnknownCategory, STATEMENT_DATE_FORMAT};
