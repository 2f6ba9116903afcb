use crate::block::{Block, Document, InlineSpan};

/// Write a document back out as the minimal markup the parser reads.
///
/// Blocks are separated by a blank line so that neighbouring lists of the
/// same kind stay apart when parsed again. Ordered items are numbered from 1.
pub fn to_markup(doc: &Document) -> String {
    let mut out = String::new();

    for (i, block) in doc.iter().enumerate() {
        if i > 0 {
            out.push('\n');
        }
        emit_block(block, &mut out);
    }

    out
}

fn emit_block(block: &Block, out: &mut String) {
    match block {
        Block::Heading { level, text } => {
            for _ in 0..level.as_u8() {
                out.push('#');
            }
            out.push(' ');
            spans_to_markup(text, out);
            out.push('\n');
        }
        Block::Paragraph { text } => {
            spans_to_markup(text, out);
            out.push('\n');
        }
        Block::UnorderedList { items } => {
            for item in items {
                out.push_str("* ");
                spans_to_markup(item, out);
                out.push('\n');
            }
        }
        Block::OrderedList { items } => {
            for (n, item) in items.iter().enumerate() {
                out.push_str(&format!("{}. ", n + 1));
                spans_to_markup(item, out);
                out.push('\n');
            }
        }
        Block::Table { headers, rows } => {
            out.push('|');
            for header in headers {
                out.push(' ');
                out.push_str(header);
                out.push_str(" |");
            }
            out.push('\n');

            out.push('|');
            for _ in headers {
                out.push_str(" --- |");
            }
            out.push('\n');

            for row in rows {
                out.push('|');
                for cell in row {
                    out.push(' ');
                    spans_to_markup(cell, out);
                    out.push_str(" |");
                }
                out.push('\n');
            }
        }
    }
}

fn spans_to_markup(spans: &[InlineSpan], out: &mut String) {
    for span in spans {
        match span {
            InlineSpan::PlainText(text) => out.push_str(text),
            InlineSpan::Emphasized(text) => {
                out.push_str("**");
                out.push_str(text);
                out.push_str("**");
            }
        }
    }
}
