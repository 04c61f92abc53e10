//! Bracket-tag message markup parser.
//!
//! Sign messages are stored as a single string with `[..]` control
//! tags embedded in the text, e.g.
//!
//! ```text
//! [jl3]ROAD WORK[nl]NEXT 5 MILES[np]USE[nl]CAUTION
//! ```
//!
//! [`parse_markup`] walks the string left to right and emits one
//! [`Span`] per uninterrupted text run, positioned by the page/line
//! counters and carrying the font and justification in effect at that
//! point. The span stream is in document order and feeds straight into
//! [`MessageAssembler`](crate::MessageAssembler), which stays
//! independent of this syntax.
//!
//! Supported tags (case-insensitive): `[np]` page break, `[nl]` line
//! break, `[foN]` font select, `[jlN]` line justification, `[jpN]` page
//! justification. `[[` and `]]` are literal brackets.

use std::collections::HashMap;

use once_cell::sync::Lazy;
use thiserror::Error;

use crate::assembly::{FontId, LineJustification, MessageAssembler, PageJustification, Span};

/// Errors raised while scanning message markup.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MarkupError {
    /// A `[` was never closed by `]`.
    #[error("unclosed tag starting at offset {offset}")]
    UnclosedTag { offset: usize },

    /// A `]` appeared outside any tag (escape literal brackets as `]]`).
    #[error("stray ']' at offset {offset}")]
    StrayBracket { offset: usize },

    /// The tag name is not recognized.
    #[error("unknown tag '[{tag}]' at offset {offset}")]
    UnknownTag { tag: String, offset: usize },

    /// The tag argument is missing, malformed, or out of range.
    #[error("invalid {field} value '{value}' at offset {offset}")]
    InvalidValue {
        field: &'static str,
        value: String,
        offset: usize,
    },
}

/// Result type for markup parsing.
pub type MarkupResult<T> = Result<T, MarkupError>;

#[derive(Debug, Clone, Copy)]
enum TagKind {
    NewPage,
    NewLine,
    Font,
    LineJust,
    PageJust,
}

static TAG_KINDS: Lazy<HashMap<&'static str, TagKind>> = Lazy::new(|| {
    let mut kinds = HashMap::new();
    kinds.insert("np", TagKind::NewPage);
    kinds.insert("nl", TagKind::NewLine);
    kinds.insert("fo", TagKind::Font);
    kinds.insert("jl", TagKind::LineJust);
    kinds.insert("jp", TagKind::PageJust);
    kinds
});

/// Scanner state: position counters plus the formatting in effect.
struct Scanner {
    spans: Vec<Span>,
    page: usize,
    line: usize,
    font: FontId,
    line_just: LineJustification,
    page_just: PageJustification,
    text: String,
}

impl Scanner {
    fn new() -> Self {
        Self {
            spans: Vec::new(),
            page: 0,
            line: 0,
            font: FontId::default(),
            line_just: LineJustification::default(),
            page_just: PageJustification::default(),
            text: String::new(),
        }
    }

    /// Emit the pending text run, if any, under the current state.
    fn flush(&mut self) {
        if self.text.is_empty() {
            return;
        }
        self.spans.push(Span {
            page: self.page,
            page_justification: self.page_just,
            line: self.line,
            line_justification: self.line_just,
            font: self.font,
            text: std::mem::take(&mut self.text),
        });
    }

    fn apply_tag(&mut self, tag: &str, offset: usize) -> MarkupResult<()> {
        let lower = tag.to_ascii_lowercase();
        let name_len = lower
            .find(|c: char| !c.is_ascii_alphabetic())
            .unwrap_or_else(|| lower.len());
        let (name, value) = lower.split_at(name_len);

        let kind = TAG_KINDS
            .get(name)
            .copied()
            .ok_or_else(|| MarkupError::UnknownTag {
                tag: tag.to_string(),
                offset,
            })?;

        // Every tag terminates the current text run before taking effect.
        self.flush();

        match kind {
            TagKind::NewPage => {
                expect_no_value("page break", value, offset)?;
                self.page += 1;
                self.line = 0;
            }
            TagKind::NewLine => {
                expect_no_value("line break", value, offset)?;
                self.line += 1;
            }
            TagKind::Font => {
                let id: u8 = value.parse().map_err(|_| MarkupError::InvalidValue {
                    field: "font",
                    value: value.to_string(),
                    offset,
                })?;
                self.font = FontId(id);
            }
            TagKind::LineJust => {
                self.line_just = match value {
                    "2" => LineJustification::Left,
                    "3" => LineJustification::Center,
                    "4" => LineJustification::Right,
                    "5" => LineJustification::Full,
                    _ => {
                        return Err(MarkupError::InvalidValue {
                            field: "line justification",
                            value: value.to_string(),
                            offset,
                        })
                    }
                };
            }
            TagKind::PageJust => {
                self.page_just = match value {
                    "2" => PageJustification::Top,
                    "3" => PageJustification::Middle,
                    "4" => PageJustification::Bottom,
                    _ => {
                        return Err(MarkupError::InvalidValue {
                            field: "page justification",
                            value: value.to_string(),
                            offset,
                        })
                    }
                };
            }
        }
        Ok(())
    }
}

fn expect_no_value(field: &'static str, value: &str, offset: usize) -> MarkupResult<()> {
    if value.is_empty() {
        Ok(())
    } else {
        Err(MarkupError::InvalidValue {
            field,
            value: value.to_string(),
            offset,
        })
    }
}

/// Parse message markup into a document-ordered span stream.
///
/// An empty input yields an empty stream.
pub fn parse_markup(input: &str) -> MarkupResult<Vec<Span>> {
    let mut scanner = Scanner::new();
    let mut chars = input.char_indices().peekable();

    while let Some((pos, ch)) = chars.next() {
        match ch {
            '[' => {
                // '[[' is a literal bracket.
                if let Some((_, '[')) = chars.peek() {
                    chars.next();
                    scanner.text.push('[');
                    continue;
                }
                let mut tag = String::new();
                loop {
                    match chars.next() {
                        Some((_, ']')) => break,
                        Some((_, c)) => tag.push(c),
                        None => return Err(MarkupError::UnclosedTag { offset: pos }),
                    }
                }
                scanner.apply_tag(&tag, pos)?;
            }
            ']' => {
                if let Some((_, ']')) = chars.peek() {
                    chars.next();
                    scanner.text.push(']');
                } else {
                    return Err(MarkupError::StrayBracket { offset: pos });
                }
            }
            _ => scanner.text.push(ch),
        }
    }

    scanner.flush();
    Ok(scanner.spans)
}

/// Parse markup and assemble it into per-(page, line) display strings.
pub fn assemble_markup(input: &str) -> MarkupResult<Vec<String>> {
    Ok(MessageAssembler::assemble(parse_markup(input)?))
}
