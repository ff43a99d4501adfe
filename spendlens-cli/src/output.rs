use anyhow::{Context, Result};
use clap::ValueEnum;
use serde::Serialize;
use spendlens_core::{Category, LedgerEntry};
use spendlens_finance::BudgetSummary;
use std::io::Write;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Table,
    Json,
    Csv,
}

/// One extracted and categorized record, tagged with its source file
#[derive(Debug, Clone, Serialize)]
pub struct ExtractedRow {
    pub file: String,
    pub date: String,
    pub description: String,
    pub amount: f64,
    pub category: Category,
}

pub fn write_rows<W: Write>(out: &mut W, rows: &[ExtractedRow], format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Json => {
            serde_json::to_writer_pretty(&mut *out, rows).context("serialize rows")?;
            writeln!(out)?;
        }
        OutputFormat::Csv => {
            let mut wtr = csv::Writer::from_writer(&mut *out);
            for row in rows {
                wtr.serialize(row).context("write csv row")?;
            }
            wtr.flush()?;
        }
        OutputFormat::Table => {
            for row in rows {
                writeln!(
                    out,
                    "{:<12} {:<40} {:>12.2}  {}",
                    row.date,
                    truncate(&row.description, 40),
                    row.amount,
                    row.category
                )?;
            }
        }
    }
    Ok(())
}

pub fn print_entries(entries: &[&LedgerEntry]) {
    if entries.is_empty() {
        println!("No transactions yet.");
        return;
    }
    println!("{:>5}  {:<12} {:<40} {:>12}  Category", "Id", "Date", "Description", "Amount");
    for e in entries {
        println!(
            "{:>5}  {:<12} {:<40} {:>12.2}  {}",
            e.id,
            e.date,
            truncate(&e.description, 40),
            e.amount,
            e.category
        );
    }
}

pub fn print_summary(user: &str, s: &BudgetSummary) {
    println!("# Budget for {user}\n");
    println!("Total expenses:          {:>12.2}", s.total_expenses);
    println!("This month:              {:>12.2}", s.current_month_expenses);
    if s.monthly_limit > 0.0 {
        println!("Monthly limit:           {:>12.2}", s.monthly_limit);
        println!("Remaining:               {:>12.2}", s.remaining_budget);
        println!("Used:                    {:>11.1}%  [{}]", s.limit_percentage, s.limit_status);
    } else {
        println!("Monthly limit:           not set (spendlens config set-limit <amount>)");
    }

    if !s.categories.is_empty() {
        println!("\n## By category\n");
        for (category, total) in &s.categories {
            println!("{:<20} {:>12.2}", category.label(), total);
        }
    }

    if !s.date_wise.is_empty() {
        println!("\n## Expenses by date\n");
        for (date, total) in &s.date_wise {
            let date = if date.is_empty() { "(no date)" } else { date.as_str() };
            println!("{:<12} {:>12.2}", date, total);
        }
    }
}

fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        return s.to_string();
    }
    let mut t: String = s.chars().take(max.saturating_sub(1)).collect();
    t.push('~');
    t
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rows() -> Vec<ExtractedRow> {
        vec![
            ExtractedRow {
                file: "a.pdf".to_string(),
                date: "15/10/2023".to_string(),
                description: "Swiggy Order - Pizza".to_string(),
                amount: -150.0,
                category: Category::FoodAndDining,
            },
            ExtractedRow {
                file: "a.pdf".to_string(),
                date: "20/10/2023".to_string(),
                description: "Salary, October".to_string(),
                amount: 50000.0,
                category: Category::Income,
            },
        ]
    }

    #[test]
    fn test_csv_output_has_header_and_quotes() {
        let mut buf = Vec::new();
        write_rows(&mut buf, &rows(), OutputFormat::Csv).unwrap();
        let text = String::from_utf8(buf).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "file,date,description,amount,category");
        assert_eq!(lines[1], "a.pdf,15/10/2023,Swiggy Order - Pizza,-150.0,Food & Dining");
        assert_eq!(lines[2], "a.pdf,20/10/2023,\"Salary, October\",50000.0,Income");
    }

    #[test]
    fn test_json_output_uses_category_labels() {
        let mut buf = Vec::new();
        write_rows(&mut buf, &rows(), OutputFormat::Json).unwrap();
        let v: serde_json::Value = serde_json::from_slice(&buf).unwrap();
        assert_eq!(v[0]["category"], "Food & Dining");
        assert_eq!(v[1]["amount"], 50000.0);
    }

    #[test]
    fn test_table_output_one_line_per_row() {
        let mut buf = Vec::new();
        write_rows(&mut buf, &rows(), OutputFormat::Table).unwrap();
        let text = String::from_utf8(buf).unwrap();
        assert_eq!(text.lines().count(), 2);
        assert!(text.contains("-150.00"));
    }

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("short", 40), "short");
        assert_eq!(truncate("abcdef", 4), "abc~");
    }
}
