//! Text fallback strategy for pages without a ruled table.
//!
//! Any line containing `DD/MM/YYYY <description> <amount>` is a transaction:
//!   15/10/2023 Swiggy Order - Pizza -150.00
//!   16/10/2023 UPI credit from Ravi 1,200.00 6,200.00
//!
//! The description is the shortest span that still lets an amount follow,
//! so a trailing balance column is ignored. The amount keeps the sign written
//! in the text; nothing is inferred about debit or credit here.

use regex::Regex;
use tracing::debug;

use crate::error::Result;
use crate::page::StatementPage;
use crate::parsers::PageParser;
use crate::types::{PageStrategy, RawTransaction};

const LINE_PATTERN: &str = concat!(
    r"(?P<date>\d{2}/\d{2}/\d{4})\s+",
    r"(?P<desc>.+?)\s+",
    r"(?P<amount>-?\d+(?:,\d{3})*(?:\.\d{2})?)"
);

fn parse_line(re: &Regex, line: &str) -> Option<RawTransaction> {
    let caps = re.captures(line)?;
    let amount: f64 = caps["amount"].replace(',', "").parse().ok()?;
    Some(RawTransaction {
        date: caps["date"].to_string(),
        description: caps["desc"].trim().to_string(),
        amount,
    })
}

/// Parse flowing statement text line by line. Lines that do not match are ignored.
pub fn parse_statement_lines(text: &str) -> Result<Vec<RawTransaction>> {
    let re = Regex::new(LINE_PATTERN)?;
    Ok(text.lines().filter_map(|line| parse_line(&re, line)).collect())
}

/// Holds the compiled line pattern for reuse across pages.
pub struct TextLineParser {
    re: Regex,
}

impl TextLineParser {
    pub fn new() -> Result<Self> {
        Ok(TextLineParser { re: Regex::new(LINE_PATTERN)? })
    }
}

impl PageParser for TextLineParser {
    fn strategy(&self) -> PageStrategy {
        PageStrategy::Text
    }

    fn parse(&self, page: &dyn StatementPage) -> Result<Option<Vec<RawTransaction>>> {
        let text = page.text();
        if text.trim().is_empty() {
            return Ok(None);
        }
        let records: Vec<RawTransaction> = text.lines().filter_map(|l| parse_line(&self.re, l)).collect();
        debug!(
            page = page.page_number(),
            lines = text.lines().count(),
            matched = records.len(),
            "text fallback"
        );
        Ok(Some(records))
    }
}
