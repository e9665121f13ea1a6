use std::{fmt, rc::Rc};

/// A named piece of source text.
///
/// Every `Position` holds a shared handle to the source it points into, so a
/// diagnostic can always be rendered without the caller passing the text
/// around separately.
#[derive(Debug, PartialEq, Eq)]
pub struct Source {
    /// Identifier shown in diagnostics, usually a file name or `<stdin>`.
    pub id:   String,
    /// The full text.
    pub text: String,
}

impl Source {
    /// Wraps a source identifier and its text in a shared handle.
    pub fn new(id: impl Into<String>, text: impl Into<String>) -> Rc<Self> {
        Rc::new(Self { id:   id.into(),
                       text: text.into(), })
    }
}

/// A cursor into a `Source`.
///
/// `offset` is a byte index into the text; `line` and `col` are zero-based and
/// count characters, which is what the caret renderer needs.
#[derive(Clone)]
pub struct Position {
    pub offset: usize,
    pub line:   usize,
    pub col:    usize,
    pub source: Rc<Source>,
}

impl Position {
    /// Returns the position of the first character of `source`.
    pub const fn start(source: Rc<Source>) -> Self {
        Self { offset: 0,
               line: 0,
               col: 0,
               source }
    }

    /// Moves the cursor past `ch`.
    ///
    /// A newline bumps `line` and resets `col`; anything else bumps `col`.
    ///
    /// # Example
    /// ```
    /// use basic::diagnostics::{Position, Source};
    ///
    /// let mut pos = Position::start(Source::new("<test>", "a\nb"));
    /// pos.advance('a');
    /// pos.advance('\n');
    ///
    /// assert_eq!((pos.offset, pos.line, pos.col), (2, 1, 0));
    /// ```
    pub fn advance(&mut self, ch: char) {
        self.offset += ch.len_utf8();
        if ch == '\n' {
            self.line += 1;
            self.col = 0;
        } else {
            self.col += 1;
        }
    }

    /// Returns a copy of this position one column further along the same line.
    ///
    /// Used for single-column spans such as an illegal character or a
    /// statement separator.
    #[must_use]
    pub fn next_column(&self) -> Self {
        let mut next = self.clone();
        next.offset += 1;
        next.col += 1;
        next
    }
}

impl fmt::Debug for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}:{}", self.source.id, self.line + 1, self.col + 1)
    }
}

impl PartialEq for Position {
    fn eq(&self, other: &Self) -> bool {
        self.offset == other.offset
        && self.line == other.line
        && self.col == other.col
        && Rc::ptr_eq(&self.source, &other.source)
    }
}

/// A half-open source range `start..end`.
#[derive(Clone, Debug, PartialEq)]
pub struct Span {
    pub start: Position,
    pub end:   Position,
}

impl Span {
    pub const fn new(start: Position, end: Position) -> Self {
        Self { start, end }
    }

    /// Returns the range from the start of `self` to the end of `other`.
    #[must_use]
    pub fn to(&self, other: &Self) -> Self {
        Self::new(self.start.clone(), other.end.clone())
    }

    /// Renders the covered source lines with a row of carets under each.
    pub fn snippet(&self) -> String {
        underline(&self.start, &self.end)
    }
}

/// Renders every source line from `start.line` to `end.line`, each followed by
/// a caret row that marks the covered columns.
///
/// On the first line the carets begin at `start.col`; on the last line they
/// stop at `end.col`; lines in between are underlined completely. Tabs are
/// stripped from the result so the carets stay aligned.
///
/// # Example
/// ```
/// use basic::diagnostics::{Position, Source, underline};
///
/// let source = Source::new("<test>", "var a = 1 / 0");
/// let mut start = Position::start(source);
/// for ch in "var a = ".chars() {
///     start.advance(ch);
/// }
/// let mut end = start.clone();
/// for ch in "1 / 0".chars() {
///     end.advance(ch);
/// }
///
/// assert_eq!(underline(&start, &end), "var a = 1 / 0\n        ^^^^^");
/// ```
pub fn underline(start: &Position, end: &Position) -> String {
    let text = start.source.text.as_str();
    let mut line_start = text[..start.offset.min(text.len())].rfind('\n')
                                                             .map_or(0, |i| i + 1);
    let line_count = end.line.saturating_sub(start.line) + 1;
    let mut rows = Vec::with_capacity(line_count);

    for i in 0..line_count {
        let line_end = text[line_start..].find('\n')
                                         .map_or(text.len(), |i| line_start + i);
        let line = &text[line_start..line_end];

        let col_start = if i == 0 { start.col } else { 0 };
        let col_end = if i + 1 == line_count {
            end.col
        } else {
            line.chars().count()
        };

        rows.push(format!("{line}\n{}{}",
                          " ".repeat(col_start),
                          "^".repeat(col_end.saturating_sub(col_start))));

        line_start = (line_end + 1).min(text.len());
    }

    rows.join("\n").replace('\t', "")
}
