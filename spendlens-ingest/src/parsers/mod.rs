//! Per-page extraction strategies, tried in order until one applies.

pub mod table_rows;
pub mod text_lines;

use crate::error::Result;
use crate::page::StatementPage;
use crate::types::{PageStrategy, RawTransaction};

pub use table_rows::{parse_table_row, parse_table_rows, TableParser};
pub use text_lines::{parse_statement_lines, TextLineParser};

/// One way of reading transactions off a page
pub trait PageParser {
    fn strategy(&self) -> PageStrategy;

    /// `None` when the strategy does not apply to this page at all, which
    /// hands the page to the next strategy. `Some(vec![])` means it applied
    /// and found nothing.
    fn parse(&self, page: &dyn StatementPage) -> Result<Option<Vec<RawTransaction>>>;
}

/// Table strategy first, text fallback second.
pub fn default_parsers() -> Result<Vec<Box<dyn PageParser>>> {
    Ok(vec![Box::new(TableParser), Box::new(TextLineParser::new()?)])
}

/// Run the first applicable strategy on a page.
pub fn parse_page(
    parsers: &[Box<dyn PageParser>],
    page: &dyn StatementPage,
) -> Result<(PageStrategy, Vec<RawTransaction>)> {
    for parser in parsers {
        if let Some(records) = parser.parse(page)? {
            return Ok((parser.strategy(), records));
        }
    }
    Ok((PageStrategy::Empty, Vec::new()))
}

#[cfg(test)]
pub(crate) mod fake {
    use crate::page::{StatementPage, TableRows};

    /// In-memory page for strategy tests.
    #[derive(Default)]
    pub struct FakePage {
        pub tables: Vec<TableRows>,
        pub text: String,
    }

    impl StatementPage for FakePage {
        fn page_number(&self) -> u32 {
            1
        }

        fn tables(&self) -> Vec<TableRows> {
            self.tables.clone()
        }

        fn text(&self) -> String {
            self.text.clone()
        }
    }

    pub fn cells(cells: &[Option<&str>]) -> Vec<Option<String>> {
        cells.iter().map(|c| c.map(str::to_string)).collect()
    }
}
