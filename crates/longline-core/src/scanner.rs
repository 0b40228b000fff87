//! Line-length scan.

use std::iter::Enumerate;
use std::str::SplitInclusive;

use tracing::trace;

/// A line longer than the limit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LongLine<'a> {
    /// Line number (1-indexed).
    pub number: usize,
    /// Raw text, line terminator included.
    pub text: &'a str,
}

/// Iterator over the lines of a file whose length exceeds a limit.
///
/// Length is counted in characters and includes the trailing newline, so a
/// 100-character line followed by `\n` exceeds a limit of 100.
#[derive(Debug, Clone)]
pub struct LongLines<'a> {
    lines: Enumerate<SplitInclusive<'a, char>>,
    limit: usize,
}

impl<'a> Iterator for LongLines<'a> {
    type Item = LongLine<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        for (index, text) in self.lines.by_ref() {
            let number = index + 1;
            if text.chars().count() > self.limit {
                trace!("✗ {number}");
                return Some(LongLine { number, text });
            }
            trace!("✓ {number}");
        }
        None
    }
}

/// Scans `content` for lines longer than `limit`.
#[must_use]
pub fn long_lines(content: &str, limit: usize) -> LongLines<'_> {
    LongLines {
        lines: content.split_inclusive('\n').enumerate(),
        limit,
    }
}
