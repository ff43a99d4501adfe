use serde::{Deserialize, Serialize};

/// One transaction as read off a statement page, before categorization
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawTransaction {
    /// Usually DD/MM/YYYY; empty when the statement left the cell blank
    pub date: String,
    pub description: String,
    /// Negative means debit (money out); positive means credit (money in).
    pub amount: f64,
}

/// Which strategy produced a page's records
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PageStrategy {
    /// At least one ruled table was found on the page
    Table,
    /// No table; lines were pattern-matched from the page text
    Text,
    /// No table and no text
    Empty,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PageSummary {
    /// 1-based
    pub page_number: u32,
    pub strategy: PageStrategy,
    pub records: usize,
}

/// Result of reading a whole statement
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Extraction {
    pub transactions: Vec<RawTransaction>,
    pub pages: Vec<PageSummary>,
}
