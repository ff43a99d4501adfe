//! Table strategy: ruled statement tables with separate debit and credit
//! columns.
//!
//! Expected grid (first row is a header and is skipped):
//!   Date        Particulars              Debit      Credit     Balance
//!   15/10/2023  Swiggy Order - Pizza     150.00                5000.00
//!   19/10/2023  Salary October                      42,000.00  47,000.00
//!
//! Debits become negative amounts and credits positive ones.

use tracing::debug;

use crate::error::Result;
use crate::page::{StatementPage, TableRows};
use crate::parsers::PageParser;
use crate::types::{PageStrategy, RawTransaction};

/// Text a missing or empty amount cell is read as
const ABSENT: &str = "0";

enum Side {
    Absent,
    Amount(f64),
    Unparseable,
}

fn read_side(text: &str) -> Side {
    if text.is_empty() || text == ABSENT {
        return Side::Absent;
    }
    match parse_amount(text) {
        // "0.00" carries no money either way.
        Some(v) if v == 0.0 => Side::Absent,
        Some(v) => Side::Amount(v),
        None => Side::Unparseable,
    }
}

/// Parse an amount cell, dropping thousands separators. Non-finite values
/// ("inf", "NaN") are rejected.
pub fn parse_amount(text: &str) -> Option<f64> {
    text.replace(',', "").trim().parse::<f64>().ok().filter(|v| v.is_finite())
}

fn cell(row: &[Option<String>], idx: usize) -> Option<&str> {
    row.get(idx).and_then(|c| c.as_deref())
}

/// Convert one data row. Returns `None` for short rows, rows with neither
/// side populated, and rows whose populated side does not parse.
pub fn parse_table_row(row: &[Option<String>]) -> Option<RawTransaction> {
    if row.len() < 4 {
        return None;
    }

    let date = cell(row, 0).unwrap_or("").trim().to_string();
    let description = cell(row, 1).unwrap_or("").trim().to_string();
    let debit = cell(row, 2).filter(|s| !s.is_empty()).unwrap_or(ABSENT).trim();
    let credit = cell(row, 3).filter(|s| !s.is_empty()).unwrap_or(ABSENT).trim();

    let amount = match (read_side(debit), read_side(credit)) {
        (Side::Amount(d), _) => -d.abs(),
        (Side::Unparseable, _) => return None,
        (Side::Absent, Side::Amount(c)) => c.abs(),
        (Side::Absent, _) => return None,
    };

    Some(RawTransaction { date, description, amount })
}

/// All data rows of one table, header skipped.
pub fn parse_table_rows(table: &[Vec<Option<String>>]) -> Vec<RawTransaction> {
    table
        .iter()
        .skip(1)
        .filter_map(|row| {
            let parsed = parse_table_row(row);
            if parsed.is_none() {
                debug!(?row, "skipping table row without a usable amount");
            }
            parsed
        })
        .collect()
}

pub struct TableParser;

impl PageParser for TableParser {
    fn strategy(&self) -> PageStrategy {
        PageStrategy::Table
    }

    fn parse(&self, page: &dyn StatementPage) -> Result<Option<Vec<RawTransaction>>> {
        // A table with only a header row still counts as found.
        let tables: Vec<TableRows> = page.tables().into_iter().filter(|t| !t.is_empty()).collect();
        if tables.is_empty() {
            return Ok(None);
        }
        debug!(page = page.page_number(), tables = tables.len(), "ruled tables found");
        Ok(Some(tables.iter().flat_map(|t| parse_table_rows(t)).collect()))
    }
}
