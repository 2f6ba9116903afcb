use std::sync::LazyLock;

use regex::Regex;

use crate::block::{Block, Document, HeadingLevel, InlineSpan};
use crate::inline::format;
use crate::lines::LineCursor;

/// Digits and a period, plus whatever whitespace follows them.
static ORDERED_MARKER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9]+\.\s*").expect("ordered marker pattern is valid"));

/// What a single trimmed line starts, checked in priority order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum LineKind {
    Heading(HeadingLevel),
    TableRow,
    UnorderedItem,
    OrderedItem,
    Text,
    Blank,
}

fn classify(line: &str) -> LineKind {
    if line.starts_with("### ") {
        LineKind::Heading(HeadingLevel::H3)
    } else if line.starts_with("## ") {
        LineKind::Heading(HeadingLevel::H2)
    } else if is_table_row(line) {
        LineKind::TableRow
    } else if is_unordered_item(line) {
        LineKind::UnorderedItem
    } else if is_ordered_item(line) {
        LineKind::OrderedItem
    } else if line.is_empty() {
        LineKind::Blank
    } else {
        LineKind::Text
    }
}

fn is_table_row(line: &str) -> bool {
    line.starts_with('|')
}

fn is_unordered_item(line: &str) -> bool {
    line.starts_with("* ") || line.starts_with("- ")
}

fn is_ordered_item(line: &str) -> bool {
    ORDERED_MARKER.is_match(line)
}

/// Parse reply text into a document. Never fails.
pub fn segment(text: &str) -> Document {
    // A leading byte-order mark is not whitespace to `str::trim`
    let text = text.strip_prefix('\u{feff}').unwrap_or(text);
    let mut cursor = LineCursor::new(text);
    let mut blocks = Vec::new();

    while let Some(line) = cursor.peek() {
        match classify(line) {
            LineKind::Heading(level) => {
                cursor.advance();
                let marker = level.as_u8() as usize + 1;
                blocks.push(Block::Heading {
                    level,
                    text: format(&line[marker..]),
                });
            }
            LineKind::TableRow => {
                let run = cursor.take_run(is_table_row);
                if let Some(table) = table_from_run(&run) {
                    blocks.push(table);
                } else {
                    log::debug!("dropping table run of {} line(s): {:?}", run.len(), run);
                }
            }
            LineKind::UnorderedItem => {
                let items = cursor
                    .take_run(is_unordered_item)
                    .into_iter()
                    .map(|item| format(&item[2..]))
                    .collect();
                blocks.push(Block::UnorderedList { items });
            }
            LineKind::OrderedItem => {
                let items = cursor
                    .take_run(is_ordered_item)
                    .into_iter()
                    .map(ordered_item_text)
                    .collect();
                blocks.push(Block::OrderedList { items });
            }
            LineKind::Text => {
                cursor.advance();
                blocks.push(Block::Paragraph { text: format(line) });
            }
            LineKind::Blank => {
                cursor.advance();
            }
        }
    }

    log::trace!("segmented {} line(s) into {} block(s)", text.lines().count(), blocks.len());
    Document::new(blocks)
}

fn ordered_item_text(line: &str) -> Vec<InlineSpan> {
    let start = ORDERED_MARKER.find(line).map_or(0, |m| m.end());
    format(&line[start..])
}

/// Build a table from a run of pipe rows. The second row is taken to be the
/// separator and is skipped unread. Runs shorter than two rows give nothing.
fn table_from_run(run: &[&str]) -> Option<Block> {
    if run.len() < 2 {
        return None;
    }

    let headers = split_cells(run[0]).map(str::to_string).collect();
    let rows = run[2..]
        .iter()
        .map(|row| split_cells(row).map(format).collect())
        .collect();

    Some(Block::Table { headers, rows })
}

/// Trimmed, non-empty cells of a pipe row.
fn split_cells(row: &str) -> impl Iterator<Item = &str> {
    row.split('|').map(str::trim).filter(|cell| !cell.is_empty())
}
