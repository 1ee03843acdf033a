//! crates/codesnack_core/src/layout.rs
//!
//! Lays plain text out onto fixed-size pages.
//!
//! Coordinates are in PDF points with the origin at the bottom-left corner of
//! the page, so the cursor starts near the top and moves downward. The result
//! is independent of any PDF library; renderers only have to draw each
//! [`PositionedLine`] at its coordinates.

/// A4 width in points.
pub const A4_WIDTH: f32 = 595.275_6;
/// A4 height in points.
pub const A4_HEIGHT: f32 = 841.889_8;

/// Page geometry and typography used by [`paginate`].
#[derive(Debug, Clone, PartialEq)]
pub struct LayoutOptions {
    pub page_width: f32,
    pub page_height: f32,
    /// X coordinate of every line.
    pub left_margin: f32,
    /// Y coordinate of the first line on each page.
    pub top: f32,
    /// A new page starts once the cursor falls below this Y coordinate.
    pub bottom_margin: f32,
    pub font_size: f32,
    pub line_height_factor: f32,
    pub max_chars_per_line: usize,
}

impl LayoutOptions {
    /// Options for an arbitrary page size with margins derived from it.
    pub fn for_page(page_width: f32, page_height: f32) -> Self {
        Self {
            page_width,
            page_height,
            left_margin: page_width / 8.0,
            top: page_height - 50.0,
            bottom_margin: 50.0,
            font_size: 12.0,
            line_height_factor: 1.2,
            max_chars_per_line: 90,
        }
    }

    /// Sets the wrap budget, never below one character.
    pub fn with_max_chars_per_line(mut self, max_chars_per_line: usize) -> Self {
        self.max_chars_per_line = max_chars_per_line.max(1);
        self
    }

    pub fn line_height(&self) -> f32 {
        self.font_size * self.line_height_factor
    }
}

impl Default for LayoutOptions {
    fn default() -> Self {
        Self::for_page(A4_WIDTH, A4_HEIGHT)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct PositionedLine {
    pub x: f32,
    pub y: f32,
    pub text: String,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Page {
    pub lines: Vec<PositionedLine>,
}

/// The laid-out document. Always holds at least one page.
#[derive(Debug, Clone, PartialEq)]
pub struct PageLayout {
    pub options: LayoutOptions,
    pub pages: Vec<Page>,
}

impl PageLayout {
    pub fn line_count(&self) -> usize {
        self.pages.iter().map(|p| p.lines.len()).sum()
    }
}

/// Splits one raw line into rendered lines of at most `max_chars` characters.
///
/// A line longer than the budget is broken at the last space within the first
/// `max_chars` characters, and that space is dropped. Without such a space the
/// line is cut at exactly `max_chars`. An empty line yields one empty line.
/// A zero budget is treated as one character per line.
pub fn wrap_line(line: &str, max_chars: usize) -> Vec<String> {
    let max_chars = max_chars.max(1);
    let mut rendered = Vec::new();
    let mut rest: Vec<char> = line.chars().collect();

    while rest.len() > max_chars {
        let (cut, resume) = match rest[..max_chars].iter().rposition(|&c| c == ' ') {
            Some(space) => (space, space + 1),
            None => (max_chars, max_chars),
        };
        rendered.push(rest[..cut].iter().collect());
        rest.drain(..resume);
    }
    rendered.push(rest.into_iter().collect());
    rendered
}

fn is_line_break(c: char) -> bool {
    matches!(
        c,
        '\n' | '\r' | '\u{0b}' | '\u{0c}' | '\u{1c}' | '\u{1d}' | '\u{1e}' | '\u{85}'
            | '\u{2028}' | '\u{2029}'
    )
}

/// Splits text into raw lines on every Unicode line boundary, including a
/// lone `\r`, form feed and the line/paragraph separators. `\r\n` counts as
/// one break and a trailing break does not add an empty line.
pub fn split_lines(text: &str) -> Vec<&str> {
    let mut lines = Vec::new();
    let mut start = 0;
    let mut chars = text.char_indices().peekable();

    while let Some((index, c)) = chars.next() {
        if !is_line_break(c) {
            continue;
        }
        lines.push(&text[start..index]);
        start = index + c.len_utf8();
        if c == '\r' {
            if let Some(&(next, '\n')) = chars.peek() {
                chars.next();
                start = next + 1;
            }
        }
    }
    if start < text.len() {
        lines.push(&text[start..]);
    }
    lines
}

/// Lays `text` out onto as many pages as it needs.
pub fn paginate(text: &str, options: &LayoutOptions) -> PageLayout {
    let line_height = options.line_height();
    let mut pages = vec![Page::default()];
    let mut y = options.top;

    for raw in split_lines(text) {
        for rendered in wrap_line(raw, options.max_chars_per_line) {
            if y < options.bottom_margin {
                pages.push(Page::default());
                y = options.top;
            }
            if let Some(page) = pages.last_mut() {
                page.lines.push(PositionedLine {
                    x: options.left_margin,
                    y,
                    text: rendered,
                });
            }
            y -= line_height;
        }
    }

    PageLayout {
        options: options.clone(),
        pages,
    }
}
