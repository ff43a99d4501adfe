//! Keyword category rules for statement descriptions.
//!
//! Rules are checked top to bottom and the first rule with any keyword
//! contained in the lower-cased description wins, so "Amazon Pizza Combo"
//! lands in Food & Dining even though "amazon" is a Shopping keyword.
//! Keep the order when adding keywords.

use spendlens_core::Category;

/// Ordered `(category, keywords)` rules; keywords are lower case.
pub const RULES: &[(Category, &[&str])] = &[
    (
        Category::FoodAndDining,
        &["swiggy", "zomato", "food", "restaurant", "cafe", "dominos", "pizza", "kfc"],
    ),
    (
        Category::Groceries,
        &["bigbasket", "dmart", "grocery", "supermarket", "reliance fresh"],
    ),
    (
        Category::Transportation,
        &["uber", "ola", "taxi", "transport", "rapido", "auto", "redbus"],
    ),
    (
        Category::Shopping,
        &["amazon", "flipkart", "shopping", "myntra", "ajio"],
    ),
    (
        Category::BillsAndUtilities,
        &["recharge", "bill", "electricity", "water", "gas", "broadband", "internet"],
    ),
    (
        Category::Entertainment,
        &["netflix", "prime", "hotstar", "movie", "entertainment"],
    ),
    (
        Category::HealthAndMedical,
        &["pharmacy", "medical", "health", "apollo", "max"],
    ),
    (
        Category::Travel,
        &["irctc", "train", "flight", "travel", "booking"],
    ),
    (Category::CashWithdrawal, &["atm", "cash", "withdraw"]),
    (Category::Income, &["salary", "income", "credit"]),
];

/// Categorize a transaction description. Never fails; no match is `Others`.
pub fn categorize(description: &str) -> Category {
    let desc = description.to_lowercase();
    RULES
        .iter()
        .find(|(_, keywords)| keywords.iter().any(|k| desc.contains(k)))
        .map(|(category, _)| *category)
        .unwrap_or(Category::Others)
}

/// Same as [`categorize`] for a description that may be missing.
pub fn categorize_opt(description: Option<&str>) -> Category {
    categorize(description.unwrap_or(""))
}
