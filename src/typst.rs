use crate::block::{Block, Document, InlineSpan};
use crate::config::Config;

/// Convert a document to Typst markup
pub fn document_to_typst(doc: &Document, config: &Config) -> String {
    let mut out = String::new();

    // Set up paragraph settings to prevent widows/orphans
    out.push_str("#set par(linebreaks: \"optimized\")\n");
    if config.page.numbers {
        out.push_str("#set page(numbering: \"1\")\n");
    }
    if let Some(family) = &config.font.family {
        out.push_str(&format!("#set text(font: \"{}\")\n", escape_string(family)));
    }
    out.push('\n');

    let mut blocks = doc.iter().peekable();
    while let Some(block) = blocks.next() {
        match block {
            Block::Heading { .. } if config.layout.keep_heading_with_next => {
                // Keep heading with following content using a block that prevents breaks
                out.push_str("#block(breakable: false)[\n");
                emit_block(block, config, &mut out);
                if let Some(next) = blocks.next() {
                    emit_block(next, config, &mut out);
                }
                out.push_str("]\n\n");
            }
            _ => emit_block(block, config, &mut out),
        }
    }

    out
}

fn emit_block(block: &Block, config: &Config, out: &mut String) {
    match block {
        Block::Heading { level, text } => {
            for _ in 0..level.as_u8() {
                out.push('=');
            }
            out.push(' ');
            spans_to_typst(text, out);
            out.push_str("\n\n");
        }
        Block::Paragraph { text } => {
            spans_to_typst(text, out);
            out.push_str("\n\n");
        }
        Block::UnorderedList { items } => list_to_typst("-", items, config, out),
        // `+` items are numbered by position, whatever the source said
        Block::OrderedList { items } => list_to_typst("+", items, config, out),
        Block::Table { headers, rows } => {
            if config.layout.keep_tables_together {
                out.push_str("#block(breakable: false)[\n");
                table_to_typst(headers, rows, out);
                out.push_str("]\n\n");
            } else {
                table_to_typst(headers, rows, out);
                out.push('\n');
            }
        }
    }
}

fn list_to_typst(marker: &str, items: &[Vec<InlineSpan>], config: &Config, out: &mut String) {
    // Wrap list to keep together when small, allow breaks when large
    let keep_together = items.len() <= config.layout.keep_together_max_items;
    if keep_together {
        out.push_str("#block(breakable: false)[\n");
    }

    for item in items {
        out.push_str(marker);
        out.push(' ');
        spans_to_typst(item, out);
        out.push('\n');
    }

    if keep_together {
        out.push_str("]\n\n");
    } else {
        out.push('\n');
    }
}

fn table_to_typst(headers: &[String], rows: &[Vec<Vec<InlineSpan>>], out: &mut String) {
    // Rows can be wider or narrower than the header; pad so cells stay in their column
    let columns = rows
        .iter()
        .map(Vec::len)
        .chain(std::iter::once(headers.len()))
        .max()
        .unwrap_or(0);
    if columns == 0 {
        return;
    }

    out.push_str("#table(\n");
    out.push_str(&format!("  columns: {},\n", columns));

    // Header cells (bold, literal)
    for i in 0..columns {
        match headers.get(i) {
            Some(header) => {
                out.push_str("  [#strong[");
                escape_markup(header, out);
                out.push_str("]],\n");
            }
            None => out.push_str("  [],\n"),
        }
    }

    for row in rows {
        for i in 0..columns {
            out.push_str("  [");
            if let Some(cell) = row.get(i) {
                spans_to_typst(cell, out);
            }
            out.push_str("],\n");
        }
    }

    out.push_str(")\n");
}

fn spans_to_typst(spans: &[InlineSpan], out: &mut String) {
    let mut after_strong = false;
    for span in spans {
        match span {
            InlineSpan::PlainText(text) => {
                // `(` or `.` straight after `#strong[..]` would extend the call
                if after_strong && text.starts_with(['(', '.']) {
                    out.push('\\');
                }
                escape_markup(text, out);
                after_strong = false;
            }
            InlineSpan::Emphasized(text) if text.is_empty() => {}
            InlineSpan::Emphasized(text) => {
                // A function call, since `*` only delimits at word boundaries
                out.push_str("#strong[");
                escape_markup(text, out);
                out.push(']');
                after_strong = true;
            }
        }
    }
}

/// Escape characters that would otherwise start Typst markup.
///
/// Leading digits and a period would read as an enum marker at the start of
/// an item or cell, so that period is escaped too.
fn escape_markup(text: &str, out: &mut String) {
    let digits = text.len() - text.trim_start_matches(|c: char| c.is_ascii_digit()).len();
    let marker_dot = (digits > 0 && text[digits..].starts_with('.')).then_some(digits);

    for (i, ch) in text.char_indices() {
        match ch {
            '#' | '*' | '_' | '@' | '$' | '\\' | '`' | '<' | '>' | '[' | ']' | '=' | '-' | '+'
            | '/' | '~' => {
                out.push('\\');
                out.push(ch);
            }
            '.' if marker_dot == Some(i) => out.push_str("\\."),
            _ => out.push(ch),
        }
    }
}

fn escape_string(text: &str) -> String {
    text.replace('\\', "\\\\").replace('"', "\\\"")
}

#[cfg(test)]
mod tests {
    use crate::{Config, reply_to_typst, reply_to_typst_with_config};
    use pretty_assertions::assert_eq;

    const PREAMBLE: &str = "#set par(linebreaks: \"optimized\")\n\n";

    #[test]
    fn heading() {
        assert_eq!(
            reply_to_typst("### Hello"),
            format!("{PREAMBLE}#block(breakable: false)[\n=== Hello\n\n]\n\n")
        );
    }

    #[test]
    fn heading_with_following_content() {
        // Heading should be grouped with following paragraph
        let result = reply_to_typst("## Title\n\nSome text.");
        assert_eq!(
            result,
            format!("{PREAMBLE}#block(breakable: false)[\n== Title\n\nSome text.\n\n]\n\n")
        );
    }

    #[test]
    fn heading_grouping_can_be_disabled() {
        let mut config = Config::compiled_default();
        config.layout.keep_heading_with_next = false;
        assert_eq!(
            reply_to_typst_with_config("### Title\nBody", &config),
            format!("{PREAMBLE}=== Title\n\nBody\n\n")
        );
    }

    #[test]
    fn paragraph() {
        assert_eq!(
            reply_to_typst("Hello world"),
            format!("{PREAMBLE}Hello world\n\n")
        );
    }

    #[test]
    fn emphasis() {
        assert_eq!(
            reply_to_typst("**Warning**: drowsiness"),
            format!("{PREAMBLE}#strong[Warning]: drowsiness\n\n")
        );
    }

    #[test]
    fn emphasis_inside_a_word() {
        assert_eq!(
            reply_to_typst("Take**two** tablets daily."),
            format!("{PREAMBLE}Take#strong[two] tablets daily.\n\n")
        );
        assert_eq!(reply_to_typst("a**b**c"), format!("{PREAMBLE}a#strong[b]c\n\n"));
    }

    #[test]
    fn text_after_emphasis_cannot_extend_the_call() {
        assert_eq!(
            reply_to_typst("**Dose**(adult).**x**.y"),
            format!("{PREAMBLE}#strong[Dose]\\(adult).#strong[x]\\.y\n\n")
        );
    }

    #[test]
    fn leading_number_in_item_or_cell_is_not_an_enum_marker() {
        assert_eq!(
            reply_to_typst("* 2. Take with water"),
            format!("{PREAMBLE}#block(breakable: false)[\n- 2\\. Take with water\n]\n\n")
        );
        let md = "| Step |\n|---|\n| 1. Rinse |";
        let expected = format!(
            "{PREAMBLE}#block(breakable: false)[\n#table(\n  columns: 1,\n  [#strong[Step]],\n  [1\\. Rinse],\n)\n]\n\n"
        );
        assert_eq!(reply_to_typst(md), expected);
    }

    #[test]
    fn numbers_later_in_text_are_untouched() {
        assert_eq!(
            reply_to_typst("Take 2. Then rest"),
            format!("{PREAMBLE}Take 2. Then rest\n\n")
        );
    }

    #[test]
    fn empty_emphasis_renders_nothing() {
        assert_eq!(reply_to_typst("a****b"), format!("{PREAMBLE}ab\n\n"));
    }

    #[test]
    fn unordered_list() {
        assert_eq!(
            reply_to_typst("- one\n* two"),
            format!("{PREAMBLE}#block(breakable: false)[\n- one\n- two\n]\n\n")
        );
    }

    #[test]
    fn ordered_list_is_numbered_by_position() {
        assert_eq!(
            reply_to_typst("5. one\n9. two"),
            format!("{PREAMBLE}#block(breakable: false)[\n+ one\n+ two\n]\n\n")
        );
    }

    #[test]
    fn long_list_may_break() {
        let md = "* a\n* b\n* c\n* d\n* e\n* f";
        assert_eq!(
            reply_to_typst(md),
            format!("{PREAMBLE}- a\n- b\n- c\n- d\n- e\n- f\n\n")
        );
    }

    #[test]
    fn escapes_special_chars() {
        assert_eq!(reply_to_typst("a ** b"), format!("{PREAMBLE}a \\*\\* b\n\n"));
        assert_eq!(reply_to_typst("a # b"), format!("{PREAMBLE}a \\# b\n\n"));
        assert_eq!(reply_to_typst("a_b"), format!("{PREAMBLE}a\\_b\n\n"));
        assert_eq!(
            reply_to_typst("= not a heading"),
            format!("{PREAMBLE}\\= not a heading\n\n")
        );
    }

    #[test]
    fn table() {
        let md = "| A | B |\n|---|---|\n| 1 | 2 |";
        let expected = format!(
            "{PREAMBLE}#block(breakable: false)[\n#table(\n  columns: 2,\n  [#strong[A]],\n  [#strong[B]],\n  [1],\n  [2],\n)\n]\n\n"
        );
        assert_eq!(reply_to_typst(md), expected);
    }

    #[test]
    fn short_table_rows_are_padded() {
        let md = "| A | B |\n|---|---|\n| **1** |";
        let expected = format!(
            "{PREAMBLE}#block(breakable: false)[\n#table(\n  columns: 2,\n  [#strong[A]],\n  [#strong[B]],\n  [#strong[1]],\n  [],\n)\n]\n\n"
        );
        assert_eq!(reply_to_typst(md), expected);
    }

    #[test]
    fn header_cells_are_literal() {
        let md = "| **A** |\n|---|";
        let expected = format!(
            "{PREAMBLE}#block(breakable: false)[\n#table(\n  columns: 1,\n  [#strong[\\*\\*A\\*\\*]],\n)\n]\n\n"
        );
        assert_eq!(reply_to_typst(md), expected);
    }

    #[test]
    fn preamble_follows_config() {
        let mut config = Config::compiled_default();
        config.page.numbers = true;
        config.font.family = Some("Libertinus Serif".to_string());
        assert_eq!(
            reply_to_typst_with_config("x", &config),
            "#set par(linebreaks: \"optimized\")\n#set page(numbering: \"1\")\n#set text(font: \"Libertinus Serif\")\n\nx\n\n"
        );
    }
}
