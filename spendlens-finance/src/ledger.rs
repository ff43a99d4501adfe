//! JSON ledger of user transactions.
//!
//! The whole ledger is one file, read on open and rewritten on every save.
//! Ids are never reused: `next_id` only grows, even across deletes.

use serde::{Deserialize, Serialize};
use spendlens_core::{Category, LedgerEntry};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::error::{LedgerError, Result};
use crate::import::NewEntry;

#[derive(Debug, Clone, Serialize, Deserialize)]
struct LedgerFile {
    next_id: u64,
    entries: Vec<LedgerEntry>,
}

impl Default for LedgerFile {
    fn default() -> Self {
        LedgerFile { next_id: 1, entries: Vec::new() }
    }
}

/// Fields to change on an existing entry; `None` keeps the current value.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EntryUpdate {
    pub date: Option<String>,
    pub description: Option<String>,
    /// Stored as given, sign included
    pub amount: Option<f64>,
    pub category: Option<Category>,
}

pub struct Ledger {
    path: PathBuf,
    data: LedgerFile,
}

impl Ledger {
    /// Open the ledger at `path`; a missing file is an empty ledger.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let data = if path.exists() {
            let s = fs::read_to_string(&path)?;
            serde_json::from_str(&s)?
        } else {
            LedgerFile::default()
        };
        debug!(file = %path.display(), entries = data.entries.len(), "ledger opened");
        Ok(Ledger { path, data })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Write the ledger, replacing the file in one rename.
    pub fn save(&self) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, serde_json::to_string_pretty(&self.data)?)?;
        fs::rename(&tmp, &self.path)?;
        Ok(())
    }

    fn push(&mut self, user: &str, entry: NewEntry) -> u64 {
        let id = self.data.next_id;
        self.data.next_id += 1;
        self.data.entries.push(LedgerEntry {
            id,
            user: user.to_string(),
            date: entry.date,
            description: entry.description,
            amount: entry.amount,
            category: entry.category,
        });
        id
    }

    /// Add imported entries for `user`, returning the assigned ids in order.
    pub fn append(&mut self, user: &str, entries: Vec<NewEntry>) -> Vec<u64> {
        entries.into_iter().map(|e| self.push(user, e)).collect()
    }

    /// Record a manual expense. The amount is always stored as money out.
    pub fn add_expense(
        &mut self,
        user: &str,
        date: &str,
        description: &str,
        amount: f64,
        category: Category,
    ) -> Result<&LedgerEntry> {
        if !amount.is_finite() {
            return Err(LedgerError::InvalidAmount(amount));
        }
        let id = self.push(
            user,
            NewEntry {
                date: date.to_string(),
                description: description.to_string(),
                amount: -amount.abs(),
                category,
            },
        );
        self.get(id)
    }

    pub fn get(&self, id: u64) -> Result<&LedgerEntry> {
        self.data
            .entries
            .iter()
            .find(|e| e.id == id)
            .ok_or(LedgerError::NotFound(id))
    }

    fn owned_index(&self, user: &str, id: u64) -> Result<usize> {
        let idx = self
            .data
            .entries
            .iter()
            .position(|e| e.id == id)
            .ok_or(LedgerError::NotFound(id))?;
        if self.data.entries[idx].user != user {
            return Err(LedgerError::Unauthorized { id, user: user.to_string() });
        }
        Ok(idx)
    }

    pub fn update(&mut self, user: &str, id: u64, update: EntryUpdate) -> Result<&LedgerEntry> {
        if let Some(amount) = update.amount {
            if !amount.is_finite() {
                return Err(LedgerError::InvalidAmount(amount));
            }
        }
        let idx = self.owned_index(user, id)?;
        let entry = &mut self.data.entries[idx];
        if let Some(date) = update.date {
            entry.date = date;
        }
        if let Some(description) = update.description {
            entry.description = description;
        }
        if let Some(amount) = update.amount {
            entry.amount = amount;
        }
        if let Some(category) = update.category {
            entry.category = category;
        }
        Ok(&self.data.entries[idx])
    }

    pub fn delete(&mut self, user: &str, id: u64) -> Result<LedgerEntry> {
        let idx = self.owned_index(user, id)?;
        Ok(self.data.entries.remove(idx))
    }

    /// Entries owned by `user`, newest first.
    pub fn entries_for(&self, user: &str) -> Vec<&LedgerEntry> {
        let mut entries: Vec<&LedgerEntry> = self.data.entries.iter().filter(|e| e.user == user).collect();
        entries.sort_by(|a, b| b.id.cmp(&a.id));
        entries
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn imported(description: &str, amount: f64) -> NewEntry {
        NewEntry {
            date: "15/10/2023".to_string(),
            description: description.to_string(),
            amount,
            category: crate::categorize(description),
        }
    }

    #[test]
    fn test_missing_file_is_empty_ledger() {
        let dir = tempdir().unwrap();
        let ledger = Ledger::open(dir.path().join("ledger.json")).unwrap();
        assert!(ledger.entries_for("asha").is_empty());
    }

    #[test]
    fn test_append_save_and_reopen() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("data").join("ledger.json");

        let mut ledger = Ledger::open(&path).unwrap();
        let ids = ledger.append("asha", vec![imported("Swiggy Order", -150.0), imported("Salary", 50000.0)]);
        assert_eq!(ids, vec![1, 2]);
        ledger.save().unwrap();

        let reopened = Ledger::open(&path).unwrap();
        let entries = reopened.entries_for("asha");
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].id, 2);
        assert_eq!(entries[0].category, Category::Income);
        assert_eq!(entries[1].amount, -150.0);
    }

    #[test]
    fn test_add_expense_is_always_negative() {
        let dir = tempdir().unwrap();
        let mut ledger = Ledger::open(dir.path().join("ledger.json")).unwrap();
        let e = ledger.add_expense("asha", "20/10/2023", "Chai", 40.0, Category::FoodAndDining).unwrap();
        assert_eq!(e.amount, -40.0);
        let e = ledger.add_expense("asha", "20/10/2023", "Chai", -40.0, Category::FoodAndDining).unwrap();
        assert_eq!(e.amount, -40.0);
        assert!(matches!(
            ledger.add_expense("asha", "", "", f64::NAN, Category::Others),
            Err(LedgerError::InvalidAmount(_))
        ));
    }

    #[test]
    fn test_entries_are_scoped_by_user() {
        let dir = tempdir().unwrap();
        let mut ledger = Ledger::open(dir.path().join("ledger.json")).unwrap();
        ledger.append("asha", vec![imported("Swiggy", -150.0)]);
        ledger.append("ravi", vec![imported("Uber", -90.0)]);

        let ravi = ledger.entries_for("ravi");
        assert_eq!(ravi.len(), 1);
        assert_eq!(ravi[0].description, "Uber");
    }

    #[test]
    fn test_update_and_delete_require_owner() {
        let dir = tempdir().unwrap();
        let mut ledger = Ledger::open(dir.path().join("ledger.json")).unwrap();
        let ids = ledger.append("asha", vec![imported("Swiggy", -150.0)]);
        let id = ids[0];

        let change = EntryUpdate { amount: Some(-175.0), ..Default::default() };
        assert!(matches!(
            ledger.update("ravi", id, change.clone()),
            Err(LedgerError::Unauthorized { .. })
        ));
        assert!(matches!(ledger.delete("ravi", id), Err(LedgerError::Unauthorized { .. })));

        let updated = ledger.update("asha", id, change).unwrap();
        assert_eq!(updated.amount, -175.0);
        assert_eq!(updated.description, "Swiggy");

        ledger.delete("asha", id).unwrap();
        assert!(matches!(ledger.get(id), Err(LedgerError::NotFound(_))));
        assert!(matches!(ledger.delete("asha", id), Err(LedgerError::NotFound(_))));
    }

    #[test]
    fn test_ids_are_not_reused_after_delete() {
        let dir = tempdir().unwrap();
        let mut ledger = Ledger::open(dir.path().join("ledger.json")).unwrap();
        ledger.append("asha", vec![imported("a", -1.0), imported("b", -2.0)]);
        ledger.delete("asha", 2).unwrap();
        let ids = ledger.append("asha", vec![imported("c", -3.0)]);
        assert_eq!(ids, vec![3]);
    }

    #[test]
    fn test_corrupt_file_is_an_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("ledger.json");
        fs::write(&path, "not json").unwrap();
        assert!(matches!(Ledger::open(&path), Err(LedgerError::Json(_))));
    }
}
