//! What the strategies see of a page: its ruled tables and its text.
//!
//! PDF reading is done by `pdfplumber`, which follows Form XObjects and
//! resolves simple-font encodings (WinAnsi, ToUnicode) before any of this
//! runs.

use pdfplumber::{Page, TableSettings, TextOptions};

/// Rows of one table; a cell is `None` when no cell box covers it.
pub type TableRows = Vec<Vec<Option<String>>>;

pub trait StatementPage {
    /// 1-based
    fn page_number(&self) -> u32;

    /// Tables found from the page's ruling lines, in reading order.
    fn tables(&self) -> Vec<TableRows>;

    /// Page text, one visual line per `\n`-separated line.
    fn text(&self) -> String;
}

impl StatementPage for Page {
    fn page_number(&self) -> u32 {
        Page::page_number(self) as u32 + 1
    }

    fn tables(&self) -> Vec<TableRows> {
        // Lattice strategy: cells come only from drawn lines and rectangles.
        self.extract_tables(&TableSettings::default())
    }

    fn text(&self) -> String {
        self.extract_text(&TextOptions::default())
    }
}
