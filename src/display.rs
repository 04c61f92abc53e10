//! Textual rendering of line sets and assembled messages.
//!
//! These Display implementations are the crate's debugging surface:
//! snapshot tests assert against them, and they make editor state
//! readable in logs without any widget code.

use std::fmt;
use std::fmt::Write;

use unicode_width::UnicodeWidthStr;

use crate::line_set::OrderedLineSet;

// ROAD WORK      ╰rank 05
// NEXT 5 MILES   ╰rank 10 «selected»
// USE CAUTION    ╰rank 20
/// Renders the candidates of one line set in comparator order, with the
/// content column aligned by display width and the rank and selection
/// annotated after it.
pub struct LineSetDisplay<'a> {
    set: &'a OrderedLineSet,
}

impl<'a> LineSetDisplay<'a> {
    pub fn new(set: &'a OrderedLineSet) -> Self {
        Self { set }
    }
}

impl fmt::Display for LineSetDisplay<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        const SPACE_PADDING: usize = 2;
        let column = self
            .set
            .iter()
            .map(|c| UnicodeWidthStr::width(c.content.as_str()))
            .max()
            .unwrap_or(0)
            + SPACE_PADDING;
        let selected = self.set.selected_index();

        for (index, candidate) in self.set.iter().enumerate() {
            if index > 0 {
                f.write_char('\n')?;
            }
            f.write_str(&candidate.content)?;
            let pad = column - UnicodeWidthStr::width(candidate.content.as_str());
            for _ in 0..pad {
                f.write_char(' ')?;
            }
            write!(f, "╰rank {:02}", candidate.rank)?;
            if selected == Some(index) {
                f.write_str(" «selected»")?;
            }
        }
        Ok(())
    }
}

/// Renders an assembled line buffer page by page.
///
/// The buffer itself is flat; the caller supplies the per-page line
/// count it was assembled with.
pub struct PageDisplay<'a> {
    lines: &'a [String],
    lines_per_page: usize,
}

impl<'a> PageDisplay<'a> {
    pub fn new(lines: &'a [String], lines_per_page: usize) -> Self {
        Self {
            lines,
            lines_per_page: lines_per_page.max(1),
        }
    }
}

impl fmt::Display for PageDisplay<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (page, chunk) in self.lines.chunks(self.lines_per_page).enumerate() {
            if page > 0 {
                f.write_char('\n')?;
            }
            write!(f, "page {}", page + 1)?;
            for line in chunk {
                if line.is_empty() {
                    f.write_str("\n│")?;
                } else {
                    write!(f, "\n│ {}", line)?;
                }
            }
        }
        Ok(())
    }
}
