//! Reconstruction of display text from positioned spans.
//!
//! A parsed message arrives as a stream of [`Span`] events in document
//! order (page-major, then line-major, then left-to-right). The
//! [`MessageAssembler`] folds that stream into one display string per
//! (page, line) slot. Font and justification ride along on the span for
//! renderers but play no part in text assembly.

/// A sign page never has fewer than this many lines, even when the
/// message only writes to the first one.
pub const MIN_LINES_PER_PAGE: usize = 3;

/// Horizontal justification of a line on the sign face.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum LineJustification {
    Left,
    Center,
    Right,
    Full,
}

impl Default for LineJustification {
    fn default() -> Self {
        LineJustification::Center
    }
}

/// Vertical justification of a page on the sign face.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum PageJustification {
    Top,
    Middle,
    Bottom,
}

impl Default for PageJustification {
    fn default() -> Self {
        PageJustification::Middle
    }
}

/// Identifier of a sign font.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct FontId(pub u8);

impl Default for FontId {
    fn default() -> Self {
        FontId(1)
    }
}

/// One positioned fragment of parsed message text.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Span {
    /// 0-based page index.
    pub page: usize,
    pub page_justification: PageJustification,
    /// 0-based line index within the page.
    pub line: usize,
    pub line_justification: LineJustification,
    pub font: FontId,
    pub text: String,
}

impl Span {
    /// A span at the given position with default font and justification.
    pub fn text_at(page: usize, line: usize, text: impl Into<String>) -> Self {
        Self {
            page,
            page_justification: PageJustification::default(),
            line,
            line_justification: LineJustification::default(),
            font: FontId::default(),
            text: text.into(),
        }
    }
}

/// Growable per-(page, line) string buffer fed by a span stream.
///
/// Slots are addressed by the flat index `page * lines_per_page + line`
/// where `lines_per_page` is the larger of [`MIN_LINES_PER_PAGE`] and
/// `line + 1` of the span being placed. The buffer grows monotonically
/// and already written slots are never renumbered.
#[derive(Debug, Default)]
pub struct MessageAssembler {
    lines: Vec<String>,
}

impl MessageAssembler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Assemble a whole span stream. An empty stream yields an empty
    /// sequence.
    pub fn assemble<I>(spans: I) -> Vec<String>
    where
        I: IntoIterator<Item = Span>,
    {
        let mut assembler = Self::new();
        for span in spans {
            assembler.push(&span);
        }
        assembler.into_lines()
    }

    /// Place one span into its (page, line) slot.
    ///
    /// Multiple spans landing on the same slot are joined with a single
    /// space; the slot is trimmed after every write.
    pub fn push(&mut self, span: &Span) {
        let lines_per_page = MIN_LINES_PER_PAGE.max(span.line + 1);
        while self.lines.len() < (span.page + 1) * lines_per_page {
            self.lines.push(String::new());
        }
        let index = span.page * lines_per_page + span.line;
        let joined = format!("{} {}", self.lines[index], span.text);
        self.lines[index] = joined.trim().to_string();
    }

    /// The assembled lines so far.
    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    /// Take ownership of the assembled lines.
    pub fn into_lines(self) -> Vec<String> {
        self.lines
    }
}
