use std::sync::LazyLock;

use regex::Regex;

use crate::block::InlineSpan;

/// A `**...**` pair, matched lazily so adjacent pairs stay separate.
static EMPHASIS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\*\*(.*?)\*\*").expect("emphasis pattern is valid"));

/// Split text into plain and emphasized spans.
///
/// Delimiter pairs are matched left to right without nesting. A `**` with no
/// closing partner is left in the plain text as written. Empty plain segments
/// are skipped, so `format("")` is empty.
pub fn format(text: &str) -> Vec<InlineSpan> {
    let mut spans = Vec::new();
    let mut last = 0;

    for caps in EMPHASIS.captures_iter(text) {
        let (Some(whole), Some(inner)) = (caps.get(0), caps.get(1)) else {
            continue;
        };
        push_plain(&mut spans, &text[last..whole.start()]);
        spans.push(InlineSpan::Emphasized(inner.as_str().to_string()));
        last = whole.end();
    }

    push_plain(&mut spans, &text[last..]);
    spans
}

fn push_plain(spans: &mut Vec<InlineSpan>, text: &str) {
    if !text.is_empty() {
        spans.push(InlineSpan::PlainText(text.to_string()));
    }
}
