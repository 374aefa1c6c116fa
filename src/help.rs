//! Renders the help text: every parameter as a block of two
//! word-wrapped columns, the name on the left, the help text and the
//! optional example on the right.
//!
//! ```text
//! command     : The command to be executed
//!             : Example: --command=build
//! ------------------------------------------
//! ```

use std::mem;
use std::str::SplitWhitespace;

use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

use crate::parameter::Parameter;

/// Separates the left and the right column.
pub const COLUMN_SEPARATOR: &str = " : ";

/// Prepended to the first line of an example.
pub const EXAMPLE_HEADER: &str = "Example: ";

/// Room reserved in the left column for decorating the name (`[--` and `]`).
pub const NAME_DECORATION_WIDTH: usize = 4;

pub const DEFAULT_DISPLAY_WIDTH: usize = 132;

/// Lazily wraps text into lines of a fixed width.
///
/// Widths are terminal columns, so wide (e.g. CJK) characters count twice.
///
/// Words are appended greedily while the line fits in the usable width,
/// which is the requested width minus the header length. Every line
/// is right-padded to the usable width. A word longer than the usable
/// width is cut into chunks of exactly that width.
///
/// The first line is prefixed with the header, the following ones
/// with as many spaces.
pub struct Wrap<'a> {
    words: SplitWhitespace<'a>,
    // Remainder of a word which did not fit into the previous line
    pending: Option<&'a str>,
    usable: usize,
    header: &'a str,
    first: bool,
    line: String,
    line_len: usize,
}

/// Wraps `text` into lines of `width` characters, header included.
/// Blank text produces no lines at all.
pub fn wrap<'a>(text: &'a str, width: usize, header: &'a str) -> Wrap<'a> {
    Wrap {
        words: text.split_whitespace(),
        pending: None,
        usable: width.saturating_sub(display_width(header)).max(1),
        header,
        first: true,
        line: String::new(),
        line_len: 0,
    }
}

impl Wrap<'_> {
    fn emit(&mut self, body: &str) -> String {
        let prefix = if mem::replace(&mut self.first, false) {
            self.header.to_owned()
        } else {
            " ".repeat(display_width(self.header))
        };
        let padding = self.usable.saturating_sub(display_width(body));
        format!("{prefix}{body}{}", " ".repeat(padding))
    }

    fn flush(&mut self) -> String {
        let line = mem::take(&mut self.line);
        self.line_len = 0;
        self.emit(&line)
    }
}

impl Iterator for Wrap<'_> {
    type Item = String;

    fn next(&mut self) -> Option<String> {
        loop {
            let Some(word) = self.pending.take().or_else(|| self.words.next()) else {
                if self.line.is_empty() {
                    return None;
                }
                return Some(self.flush());
            };
            let word_len = display_width(word);

            if self.line.is_empty() {
                if word_len > self.usable {
                    let (chunk, rest) = split_at_width(word, self.usable);
                    self.pending = Some(rest);
                    return Some(self.emit(chunk));
                }
                self.line.push_str(word);
                self.line_len = word_len;
                continue;
            }

            if self.line_len + 1 + word_len <= self.usable {
                self.line.push(' ');
                self.line.push_str(word);
                self.line_len += 1 + word_len;
                continue;
            }

            // The word starts the next line
            self.pending = Some(word);
            return Some(self.flush());
        }
    }
}

fn display_width(s: &str) -> usize {
    UnicodeWidthStr::width(s)
}

// The head is at most `width` columns wide, but never empty.
fn split_at_width(s: &str, width: usize) -> (&str, &str) {
    let mut used = 0;
    for (i, c) in s.char_indices() {
        let w = c.width().unwrap_or(0);
        if i > 0 && used + w > width {
            return s.split_at(i);
        }
        used += w;
    }
    (s, "")
}

/// Renders a single parameter as a block of lines.
///
/// The left column is `left_width` characters wide, the right column,
/// separator included, `right_width`. The block ends with a divider.
pub fn render(parameter: &Parameter, left_width: usize, right_width: usize) -> Vec<String> {
    let text_width = right_width
        .saturating_sub(COLUMN_SEPARATOR.len())
        .max(1);

    let mut left = wrap(parameter.name(), left_width, "");
    let mut right = wrap(parameter.help(), text_width, "").chain(
        parameter
            .example()
            .into_iter()
            .flat_map(|example| wrap(example, text_width, EXAMPLE_HEADER)),
    );

    let left_filler = " ".repeat(left_width.max(1));
    let right_filler = " ".repeat(text_width);

    let mut lines = Vec::new();
    loop {
        let (l, r) = match (left.next(), right.next()) {
            (None, None) => break,
            (l, r) => (l, r),
        };
        lines.push(format!(
            "{}{COLUMN_SEPARATOR}{}",
            l.as_deref().unwrap_or(&left_filler),
            r.as_deref().unwrap_or(&right_filler),
        ));
    }
    lines.push("-".repeat(left_width + right_width));
    lines
}

/// Renders the whole help text.
///
/// The left column is as wide as the longest name plus
/// [NAME_DECORATION_WIDTH], the right column takes the rest of
/// `display_width`.
pub fn render_all(
    application_name: &str,
    application_description: &str,
    parameters: &[Parameter],
    display_width: usize,
) -> String {
    let left_width = parameters
        .iter()
        .map(|p| self::display_width(p.name()))
        .max()
        .unwrap_or(0)
        + NAME_DECORATION_WIDTH;
    let right_width = display_width.saturating_sub(left_width);

    let header = [
        application_description.to_owned(),
        format!("{application_name} usage is:"),
    ];
    let blocks = parameters
        .iter()
        .flat_map(|p| render(p, left_width, right_width));

    header
        .into_iter()
        .chain(blocks)
        .collect::<Vec<_>>()
        .join("\n")
}
