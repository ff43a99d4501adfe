//! Budget dashboard figures for one user's ledger entries.

use chrono::{Datelike, NaiveDate};
use serde::Serialize;
use spendlens_core::{parse_statement_date, Category, LedgerEntry};
use std::collections::{BTreeMap, HashMap};
use std::fmt;

/// Share of the monthly limit spent, bucketed for display
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LimitStatus {
    Success,
    Warning,
    Danger,
}

impl LimitStatus {
    pub fn from_percentage(pct: f64) -> Self {
        if pct >= 90.0 {
            LimitStatus::Danger
        } else if pct >= 70.0 {
            LimitStatus::Warning
        } else {
            LimitStatus::Success
        }
    }
}

impl fmt::Display for LimitStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            LimitStatus::Success => "success",
            LimitStatus::Warning => "warning",
            LimitStatus::Danger => "danger",
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BudgetSummary {
    /// Sum of |amount| per category, income included
    pub categories: BTreeMap<Category, f64>,
    /// Expense totals per statement date, oldest first; unparseable dates last
    pub date_wise: Vec<(String, f64)>,
    pub total_expenses: f64,
    pub monthly_limit: f64,
    pub current_month_expenses: f64,
    pub remaining_budget: f64,
    pub limit_percentage: f64,
    pub limit_status: LimitStatus,
}

impl BudgetSummary {
    pub fn compute<'a, I>(entries: I, monthly_limit: f64, today: NaiveDate) -> Self
    where
        I: IntoIterator<Item = &'a LedgerEntry>,
    {
        let mut categories: BTreeMap<Category, f64> = BTreeMap::new();
        let mut by_date: HashMap<String, f64> = HashMap::new();
        let mut total_expenses = 0.0;
        let mut current_month_expenses = 0.0;

        for entry in entries {
            *categories.entry(entry.category).or_default() += entry.abs_amount();
            if !entry.is_expense() {
                continue;
            }
            total_expenses += entry.abs_amount();
            *by_date.entry(entry.date.clone()).or_default() += entry.abs_amount();
            if let Some(d) = entry.parsed_date() {
                if d.year() == today.year() && d.month() == today.month() {
                    current_month_expenses += entry.abs_amount();
                }
            }
        }

        let mut date_wise: Vec<(String, f64)> = by_date.into_iter().collect();
        date_wise.sort_by(|(a, _), (b, _)| {
            match (parse_statement_date(a), parse_statement_date(b)) {
                (Some(x), Some(y)) => x.cmp(&y).then_with(|| a.cmp(b)),
                (Some(_), None) => std::cmp::Ordering::Less,
                (None, Some(_)) => std::cmp::Ordering::Greater,
                (None, None) => a.cmp(b),
            }
        });

        let (remaining_budget, limit_percentage) = if monthly_limit > 0.0 {
            (
                monthly_limit - current_month_expenses,
                current_month_expenses / monthly_limit * 100.0,
            )
        } else {
            (0.0, 0.0)
        };

        BudgetSummary {
            categories,
            date_wise,
            total_expenses,
            monthly_limit,
            current_month_expenses,
            remaining_budget,
            limit_percentage,
            limit_status: LimitStatus::from_percentage(limit_percentage),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(id: u64, date: &str, amount: f64, category: Category) -> LedgerEntry {
        LedgerEntry {
            id,
            user: "asha".to_string(),
            date: date.to_string(),
            description: String::new(),
            amount,
            category,
        }
    }

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2023, 10, 20).unwrap()
    }

    #[test]
    fn test_totals_and_current_month() {
        let entries = vec![
            entry(1, "15/10/2023", -150.0, Category::FoodAndDining),
            entry(2, "16/10/2023", -500.0, Category::Groceries),
            entry(3, "28/09/2023", -120.0, Category::Transportation),
            entry(4, "01/10/2023", 50000.0, Category::Income),
            entry(5, "15/10/2022", -1000.0, Category::Shopping),
        ];
        let s = BudgetSummary::compute(&entries, 800.0, today());

        assert_eq!(s.total_expenses, 1770.0);
        assert_eq!(s.current_month_expenses, 650.0);
        assert_eq!(s.remaining_budget, 150.0);
        assert!((s.limit_percentage - 81.25).abs() < 1e-9);
        assert_eq!(s.limit_status, LimitStatus::Warning);
        assert_eq!(s.categories[&Category::Income], 50000.0);
    }

    #[test]
    fn test_date_wise_is_chronological_and_expense_only() {
        let entries = vec![
            entry(1, "02/11/2023", -10.0, Category::Others),
            entry(2, "15/10/2023", -5.0, Category::Others),
            entry(3, "15/10/2023", -7.5, Category::Others),
            entry(4, "03/10/2023", 99.0, Category::Income),
            entry(5, "yesterday", -1.0, Category::Others),
            entry(6, "", -2.0, Category::Others),
        ];
        let s = BudgetSummary::compute(&entries, 0.0, today());
        let dates: Vec<&str> = s.date_wise.iter().map(|(d, _)| d.as_str()).collect();
        assert_eq!(dates, vec!["15/10/2023", "02/11/2023", "", "yesterday"]);
        assert_eq!(s.date_wise[0].1, 12.5);
    }

    #[test]
    fn test_date_wise_order_is_stable_for_same_day_spellings() {
        let entries = vec![
            entry(1, "5/10/2023", -1.0, Category::Others),
            entry(2, "05/10/2023", -2.0, Category::Others),
            entry(3, "04/10/2023", -3.0, Category::Others),
        ];
        for _ in 0..20 {
            let s = BudgetSummary::compute(&entries, 0.0, today());
            let dates: Vec<&str> = s.date_wise.iter().map(|(d, _)| d.as_str()).collect();
            assert_eq!(dates, vec!["04/10/2023", "05/10/2023", "5/10/2023"]);
        }
    }

    #[test]
    fn test_no_limit_means_no_percentage() {
        let entries = vec![entry(1, "15/10/2023", -900.0, Category::Shopping)];
        let s = BudgetSummary::compute(&entries, 0.0, today());
        assert_eq!(s.remaining_budget, 0.0);
        assert_eq!(s.limit_percentage, 0.0);
        assert_eq!(s.limit_status, LimitStatus::Success);
    }

    #[test]
    fn test_status_thresholds() {
        assert_eq!(LimitStatus::from_percentage(69.9), LimitStatus::Success);
        assert_eq!(LimitStatus::from_percentage(70.0), LimitStatus::Warning);
        assert_eq!(LimitStatus::from_percentage(90.0), LimitStatus::Danger);
        assert_eq!(LimitStatus::from_percentage(140.0), LimitStatus::Danger);

        let entries = vec![entry(1, "15/10/2023", -950.0, Category::Shopping)];
        let s = BudgetSummary::compute(&entries, 1000.0, today());
        assert_eq!(s.limit_status, LimitStatus::Danger);
        assert_eq!(s.remaining_budget, 50.0);
    }
}
