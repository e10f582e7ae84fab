// Copyright (c) 2018  Brendan Molloy <brendan@bbqsrc.net>
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Accumulating a `"""`/`'''` doc-string across several lines.

use crate::ast::Text;
use crate::error::{Error, ErrorKind};

/// Collects the raw lines of an open doc-string until its closing fence is
/// seen, then strips indentation and hands back a [`Text`].
#[derive(Debug)]
pub(crate) struct DocStringBuilder {
    fence: &'static str,
    indent: usize,
    content_type: String,
    line: usize,
    raw_lines: Vec<String>,
}

impl DocStringBuilder {
    /// Starts a doc-string opened by `fence` (`"""` or `'''`) at column
    /// `indent`, on source line `line`. `content_type` is whatever trailed
    /// the fence on the opening line (often empty).
    pub(crate) fn new(fence: &'static str, indent: usize, content_type: String, line: usize) -> Self {
        DocStringBuilder {
            fence,
            indent,
            content_type,
            line,
            raw_lines: Vec::new(),
        }
    }

    /// Whether `line` closes this doc-string: its stripped form starts with
    /// the same fence that opened it (trailing content on the closing line,
    /// e.g. a re-stated content type, does not prevent the close).
    pub(crate) fn is_closing_line(&self, line: &str) -> bool {
        line.trim_start().starts_with(self.fence)
    }

    /// Appends one content line verbatim (indentation stripping happens at
    /// [`Self::finish`], once every line is known).
    pub(crate) fn push_line(&mut self, line: &str) {
        self.raw_lines.push(line.to_string());
    }

    /// Strips exactly `self.indent` leading characters from every content
    /// line, then trims trailing whitespace, then joins with `\n`.
    ///
    /// # Errors
    ///
    /// Returns [`ErrorKind::BadDocStringIndent`] if a line's first
    /// `self.indent` characters contain a non-whitespace character (i.e.
    /// the line was indented less than the opening fence and stripping
    /// would eat real content).
    pub(crate) fn finish(self) -> Result<Text, Error> {
        let mut stripped_lines = Vec::with_capacity(self.raw_lines.len());
        for (offset, raw) in self.raw_lines.iter().enumerate() {
            let take = self.indent.min(raw.chars().count());
            let prefix: String = raw.chars().take(take).collect();
            if !prefix.chars().all(char::is_whitespace) {
                return Err(Error::new(
                    ErrorKind::BadDocStringIndent,
                    self.line + offset + 1,
                    raw.as_str(),
                ));
            }
            let rest: String = raw.chars().skip(take).collect();
            stripped_lines.push(rest.trim_end().to_string());
        }

        Ok(Text {
            value: stripped_lines.join("\n"),
            content_type: if self.content_type.is_empty() {
                "text/plain".to_string()
            } else {
                self.content_type
            },
            line: self.line,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_common_indentation() {
        let mut b = DocStringBuilder::new(r#"""""#, 4, String::new(), 1);
        b.push_line("    hello");
        b.push_line("    world");
        let text = b.finish().unwrap();
        assert_eq!(text.value, "hello\nworld");
    }

    #[test]
    fn blank_lines_are_exempt_from_the_indent_check() {
        let mut b = DocStringBuilder::new(r#"""""#, 4, String::new(), 1);
        b.push_line("    hello");
        b.push_line("");
        b.push_line("    world");
        let text = b.finish().unwrap();
        assert_eq!(text.value, "hello\n\nworld");
    }

    #[test]
    fn overindented_line_keeps_its_extra_leading_space() {
        // Content indented one column past the fence keeps that one column.
        let mut b = DocStringBuilder::new(r#"""""#, 4, String::new(), 1);
        b.push_line("    hello");
        b.push_line("     world");
        let text = b.finish().unwrap();
        assert_eq!(text.value, "hello\n world");
    }

    #[test]
    fn under_indented_line_is_an_error() {
        let mut b = DocStringBuilder::new(r#"""""#, 4, String::new(), 1);
        b.push_line("  too shallow");
        let err = b.finish().unwrap_err();
        assert_eq!(err.kind, ErrorKind::BadDocStringIndent);
    }

    #[test]
    fn closing_line_matches_opening_fence_only() {
        let b = DocStringBuilder::new(r#"""""#, 0, String::new(), 1);
        assert!(b.is_closing_line(r#"""""#));
        assert!(!b.is_closing_line("'''"));
    }

    #[test]
    fn closing_line_with_trailing_content_still_closes() {
        let b = DocStringBuilder::new(r#"""""#, 0, String::new(), 1);
        assert!(b.is_closing_line(r#"""" trailing junk"#));
    }

    #[test]
    fn defaults_content_type_to_text_plain() {
        let b = DocStringBuilder::new(r#"""""#, 0, String::new(), 1);
        let text = b.finish().unwrap();
        assert_eq!(text.content_type, "text/plain");
    }
}
