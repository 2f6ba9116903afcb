use std::iter::Peekable;
use std::str::Lines;

/// Forward cursor over the trimmed lines of a text.
///
/// Every line is trimmed on its own as it is read. Grouping is done with
/// [`LineCursor::take_run`], which stops on the first line that does not
/// match and leaves that line for the next read.
pub struct LineCursor<'a> {
    lines: Peekable<Lines<'a>>,
}

impl<'a> LineCursor<'a> {
    pub fn new(text: &'a str) -> Self {
        Self {
            lines: text.lines().peekable(),
        }
    }

    /// The next trimmed line, without consuming it.
    pub fn peek(&mut self) -> Option<&'a str> {
        self.lines.peek().copied().map(str::trim)
    }

    /// Consume and return the next trimmed line.
    pub fn advance(&mut self) -> Option<&'a str> {
        self.lines.next().map(str::trim)
    }

    /// Consume the longest run of upcoming lines that satisfy `pred`.
    pub fn take_run(&mut self, pred: impl Fn(&str) -> bool) -> Vec<&'a str> {
        let mut run = Vec::new();
        while let Some(line) = self.peek() {
            if !pred(line) {
                break;
            }
            run.push(line);
            self.lines.next();
        }
        run
    }
}
