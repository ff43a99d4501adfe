//! Writes simple statement PDFs: a bordered transaction grid like most bank
//! exports, or plain lines of text for statements without a table.

use lopdf::content::{Content, Operation};
use lopdf::{dictionary, Document, Object, ObjectId, Stream};
use std::path::Path;

use crate::error::{ExtractError, Result};

const PAGE_WIDTH: i64 = 595;
const PAGE_HEIGHT: i64 = 842;
const MARGIN: i64 = 28;
const ROW_HEIGHT: i64 = 28;
const FONT_SIZE: i64 = 10;
const COLUMN_WIDTHS: [i64; 5] = [85, 227, 85, 85, 85];
const HEADERS: [&str; 5] = ["Date", "Particulars", "Debit", "Credit", "Balance"];

/// Data rows that fit below the title block on one page
pub const ROWS_PER_PAGE: usize = 24;

/// One printed statement line; amounts are pre-formatted text.
#[derive(Debug, Clone, PartialEq)]
pub struct StatementRow {
    pub date: String,
    pub particulars: String,
    pub debit: String,
    pub credit: String,
    pub balance: String,
}

impl StatementRow {
    pub fn new(date: &str, particulars: &str, debit: &str, credit: &str, balance: &str) -> Self {
        StatementRow {
            date: date.to_string(),
            particulars: particulars.to_string(),
            debit: debit.to_string(),
            credit: credit.to_string(),
            balance: balance.to_string(),
        }
    }

    fn cells(&self) -> [&str; 5] {
        [&self.date, &self.particulars, &self.debit, &self.credit, &self.balance]
    }
}

/// The four-transaction sample statement.
pub fn sample_rows() -> Vec<StatementRow> {
    vec![
        StatementRow::new("15/10/2023", "Swiggy Order - Pizza", "150.00", "", "5000.00"),
        StatementRow::new("16/10/2023", "BigBasket Groceries", "500.00", "", "4500.00"),
        StatementRow::new("17/10/2023", "Ola Ride to Office", "120.00", "", "4380.00"),
        StatementRow::new("18/10/2023", "Amazon Shopping", "2000.00", "", "2380.00"),
    ]
}

fn int(v: i64) -> Object {
    Object::Integer(v)
}

fn text_at(ops: &mut Vec<Operation>, font: &str, size: i64, x: i64, y: i64, text: &str) {
    if text.is_empty() {
        return;
    }
    ops.push(Operation::new("BT", vec![]));
    ops.push(Operation::new("Tf", vec![Object::Name(font.as_bytes().to_vec()), int(size)]));
    ops.push(Operation::new("Td", vec![int(x), int(y)]));
    ops.push(Operation::new("Tj", vec![Object::string_literal(text)]));
    ops.push(Operation::new("ET", vec![]));
}

fn grid_row(ops: &mut Vec<Operation>, top: i64, cells: [&str; 5], font: &str) {
    let bottom = top - ROW_HEIGHT;
    let mut x = MARGIN;
    for (width, text) in COLUMN_WIDTHS.iter().zip(cells) {
        ops.push(Operation::new("re", vec![int(x), int(bottom), int(*width), int(ROW_HEIGHT)]));
        ops.push(Operation::new("S", vec![]));
        text_at(ops, font, FONT_SIZE, x + 3, bottom + 10, text);
        x += width;
    }
}

fn page_header(ops: &mut Vec<Operation>, title: &str) -> i64 {
    // Rough centering; the title is decoration only.
    let title_x = PAGE_WIDTH / 2 - (title.len() as i64 * 3);
    text_at(ops, "F2", 12, title_x, PAGE_HEIGHT - 40, title);
    text_at(ops, "F1", FONT_SIZE, MARGIN, PAGE_HEIGHT - 70, "Transaction History");
    PAGE_HEIGHT - 90
}

fn page_footer(ops: &mut Vec<Operation>, page_no: usize) {
    text_at(ops, "F1", 8, PAGE_WIDTH / 2 - 12, 20, &format!("Page {page_no}"));
}

/// Render rows as a bordered table, repeating the header row on every page.
pub fn render_statement(title: &str, rows: &[StatementRow], path: impl AsRef<Path>) -> Result<()> {
    let chunks: Vec<&[StatementRow]> = if rows.is_empty() { vec![rows] } else { rows.chunks(ROWS_PER_PAGE).collect() };

    let pages = chunks
        .iter()
        .enumerate()
        .map(|(i, chunk)| {
            let mut ops = Vec::new();
            let mut top = page_header(&mut ops, title);
            grid_row(&mut ops, top, HEADERS, "F2");
            for row in chunk.iter() {
                top -= ROW_HEIGHT;
                grid_row(&mut ops, top, row.cells(), "F1");
            }
            page_footer(&mut ops, i + 1);
            ops
        })
        .collect();

    write_pdf(pages, path.as_ref())
}

/// Render free text lines with no ruling, one line per text row.
pub fn render_text_statement(title: &str, lines: &[String], path: impl AsRef<Path>) -> Result<()> {
    let per_page = ((PAGE_HEIGHT - 150) / 14) as usize;
    let chunks: Vec<&[String]> = if lines.is_empty() { vec![lines] } else { lines.chunks(per_page).collect() };

    let pages = chunks
        .iter()
        .enumerate()
        .map(|(i, chunk)| {
            let mut ops = Vec::new();
            let mut y = page_header(&mut ops, title);
            for line in chunk.iter() {
                text_at(&mut ops, "F1", FONT_SIZE, MARGIN, y, line);
                y -= 14;
            }
            page_footer(&mut ops, i + 1);
            ops
        })
        .collect();

    write_pdf(pages, path.as_ref())
}

fn write_pdf(pages: Vec<Vec<Operation>>, path: &Path) -> Result<()> {
    let mut doc = Document::with_version("1.5");
    let pages_id = doc.new_object_id();

    let regular = doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => "Helvetica",
    });
    let bold = doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => "Helvetica-Bold",
    });
    // Shared through the page tree rather than repeated on every page.
    let resources_id = doc.add_object(dictionary! {
        "Font" => dictionary! {
            "F1" => regular,
            "F2" => bold,
        },
    });

    let mut kids: Vec<Object> = Vec::new();
    for operations in pages {
        let page_id = add_page(&mut doc, pages_id, operations)?;
        kids.push(page_id.into());
    }

    let count = kids.len() as i64;
    doc.objects.insert(
        pages_id,
        Object::Dictionary(dictionary! {
            "Type" => "Pages",
            "Kids" => kids,
            "Count" => count,
            "Resources" => resources_id,
            "MediaBox" => vec![int(0), int(0), int(PAGE_WIDTH), int(PAGE_HEIGHT)],
        }),
    );

    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    doc.trailer.set("Root", catalog_id);
    doc.compress();

    doc.save(path)
        .map_err(|e| ExtractError::Render(format!("{}: {}", path.display(), e)))?;
    Ok(())
}

fn add_page(doc: &mut Document, parent: ObjectId, operations: Vec<Operation>) -> Result<ObjectId> {
    let content = Content { operations };
    let content_id = doc.add_object(Stream::new(dictionary! {}, content.encode()?));
    Ok(doc.add_object(dictionary! {
        "Type" => "Page",
        "Parent" => parent,
        "Contents" => content_id,
    }))
}
