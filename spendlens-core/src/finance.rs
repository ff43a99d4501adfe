//! Ledger record and category types shared by the ingest, finance and CLI crates

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Statement dates are written day first.
pub const STATEMENT_DATE_FORMAT: &str = "%d/%m/%Y";

/// Spending categories assigned from a transaction description
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Category {
    #[serde(rename = "Food & Dining")]
    FoodAndDining,
    #[serde(rename = "Groceries")]
    Groceries,
    #[serde(rename = "Transportation")]
    Transportation,
    #[serde(rename = "Shopping")]
    Shopping,
    #[serde(rename = "Bills & Utilities")]
    BillsAndUtilities,
    #[serde(rename = "Entertainment")]
    Entertainment,
    #[serde(rename = "Health & Medical")]
    HealthAndMedical,
    #[serde(rename = "Travel")]
    Travel,
    #[serde(rename = "Cash Withdrawal")]
    CashWithdrawal,
    #[serde(rename = "Income")]
    Income,
    #[default]
    #[serde(rename = "Others")]
    Others,
}

impl Category {
    pub const ALL: [Category; 11] = [
        Category::FoodAndDining,
        Category::Groceries,
        Category::Transportation,
        Category::Shopping,
        Category::BillsAndUtilities,
        Category::Entertainment,
        Category::HealthAndMedical,
        Category::Travel,
        Category::CashWithdrawal,
        Category::Income,
        Category::Others,
    ];

    /// Human-readable label, identical to the serialized form
    pub fn label(&self) -> &'static str {
        match self {
            Category::FoodAndDining => "Food & Dining",
            Category::Groceries => "Groceries",
            Category::Transportation => "Transportation",
            Category::Shopping => "Shopping",
            Category::BillsAndUtilities => "Bills & Utilities",
            Category::Entertainment => "Entertainment",
            Category::HealthAndMedical => "Health & Medical",
            Category::Travel => "Travel",
            Category::CashWithdrawal => "Cash Withdrawal",
            Category::Income => "Income",
            Category::Others => "Others",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownCategory(pub String);

impl fmt::Display for UnknownCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown category: {}", self.0)
    }
}

impl std::error::Error for UnknownCategory {}

impl FromStr for Category {
    type Err = UnknownCategory;

    /// Accepts the label in any case ("food & dining", "Others").
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Category::ALL
            .iter()
            .copied()
            .find(|c| c.label().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| UnknownCategory(wanted.to_string()))
    }
}

/// A persisted transaction owned by one user
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LedgerEntry {
    pub id: u64,
    /// Owner of the entry; every ledger query is scoped by it
    pub user: String,
    /// Statement date as written, usually DD/MM/YYYY
    pub date: String,
    pub description: String,
    /// Positive = money in, negative = money out
    pub amount: f64,
    #[serde(default)]
    pub category: Category,
}

impl LedgerEntry {
    /// Returns true if this is an expense (negative amount)
    pub fn is_expense(&self) -> bool {
        self.amount < 0.0
    }

    /// Returns true if this is income (positive amount)
    pub fn is_income(&self) -> bool {
        self.amount > 0.0
    }

    pub fn abs_amount(&self) -> f64 {
        self.amount.abs()
    }

    /// Parsed statement date, if the stored text is DD/MM/YYYY
    pub fn parsed_date(&self) -> Option<NaiveDate> {
        parse_statement_date(&self.date)
    }
}

pub fn parse_statement_date(s: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(s.trim(), STATEMENT_DATE_FORMAT).ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(amount: f64) -> LedgerEntry {
        LedgerEntry {
            id: 1,
            user: "asha".to_string(),
            date: "15/10/2023".to_string(),
            description: "Swiggy Order".to_string(),
            amount,
            category: Category::FoodAndDining,
        }
    }

    #[test]
    fn test_expense_and_income() {
        assert!(entry(-150.0).is_expense());
        assert!(!entry(-150.0).is_income());
        assert!(entry(2500.0).is_income());
        assert_eq!(entry(-150.0).abs_amount(), 150.0);
    }

    #[test]
    fn test_parsed_date_day_first() {
        let d = entry(-1.0).parsed_date().unwrap();
        assert_eq!(d, NaiveDate::from_ymd_opt(2023, 10, 15).unwrap());

        let mut bad = entry(-1.0);
        bad.date = "2023-10-15".to_string();
        assert!(bad.parsed_date().is_none());
    }

    #[test]
    fn test_category_labels_round_trip_through_from_str() {
        for c in Category::ALL {
            assert_eq!(c.label().parse::<Category>().unwrap(), c);
        }
        assert_eq!("bills & utilities".parse::<Category>().unwrap(), Category::BillsAndUtilities);
        assert!("Pets".parse::<Category>().is_err());
    }

    #[test]
    fn test_category_serializes_as_label() {
        let json = serde_json::to_string(&Category::HealthAndMedical).unwrap();
        assert_eq!(json, "\"Health & Medical\"");
        let back: Category = serde_json::from_str("\"Cash Withdrawal\"").unwrap();
        assert_eq!(back, Category::CashWithdrawal);
    }

    #[test]
    fn test_missing_category_defaults_to_others() {
        let json = r#"{"id":3,"user":"asha","date":"","description":"","amount":-1.0}"#;
        let e: LedgerEntry = serde_json::from_str(json).unwrap();
        assert_eq!(e.category, Category::Others);
    }
}
