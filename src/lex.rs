// Copyright (c) 2018  Brendan Molloy <brendan@bbqsrc.net>
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Line classification shared by every state handler.
//!
//! None of this does keyword matching; it only answers "what kind of line
//! is this, syntactically" so [`crate::state`] can route it.

/// Splits `text` into logical lines, treating any of LF, CRLF, or CR as a
/// line terminator. Mirrors `str::lines` except it also tolerates a bare
/// `\r` as a terminator, which `str::lines` does not.
pub(crate) fn split_lines(text: &str) -> Vec<&str> {
    let mut lines = Vec::new();
    let mut start = 0;
    let bytes = text.as_bytes();
    let mut i = 0;
    while i < bytes.len() {
        match bytes[i] {
            b'\n' => {
                lines.push(&text[start..i]);
                i += 1;
                start = i;
            }
            b'\r' => {
                lines.push(&text[start..i]);
                i += 1;
                if bytes.get(i) == Some(&b'\n') {
                    i += 1;
                }
                start = i;
            }
            _ => i += 1,
        }
    }
    if start < bytes.len() {
        lines.push(&text[start..]);
    }
    lines
}

/// A line is blank if, once trimmed, nothing is left.
pub(crate) fn is_blank(line: &str) -> bool {
    line.trim().is_empty()
}

/// A comment line starts with `#` once leading whitespace is stripped.
pub(crate) fn is_comment(line: &str) -> bool {
    line.trim_start().starts_with('#')
}

/// The column (in chars) of the first non-whitespace character, i.e. how
/// many leading characters would be stripped to left-align `line`.
pub(crate) fn leading_indent(line: &str) -> usize {
    line.chars().take_while(|c| c.is_whitespace()).count()
}

/// A table row starts with `|` once trimmed.
pub(crate) fn is_table_row(line: &str) -> bool {
    line.trim().starts_with('|')
}

/// A *well-formed* table row both starts and ends with `|` once trimmed.
/// A row that satisfies [`is_table_row`] but not this is still parsed
/// (best-effort, same splitting rule), just with a warning attached.
pub(crate) fn is_well_formed_table_row(line: &str) -> bool {
    let trimmed = line.trim();
    trimmed.starts_with('|') && trimmed.ends_with('|')
}

/// A doc-string fence opener is `"""` or `'''`, once trimmed. Returns the
/// three-byte fence string if so.
pub(crate) fn doc_string_fence(line: &str) -> Option<&'static str> {
    let stripped = line.trim_start();
    if stripped.starts_with(r#"""""#) {
        Some(r#"""""#)
    } else if stripped.starts_with("'''") {
        Some("'''")
    } else {
        None
    }
}

/// A tag line starts with `@` once trimmed.
pub(crate) fn is_tag_line(line: &str) -> bool {
    line.trim_start().starts_with('@')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn splits_lf_crlf_and_cr() {
        assert_eq!(split_lines("a\nb\r\nc\rd"), vec!["a", "b", "c", "d"]);
    }

    #[test]
    fn trailing_newline_does_not_add_empty_line() {
        assert_eq!(split_lines("a\n"), vec!["a"]);
    }

    #[test]
    fn no_trailing_newline_keeps_last_line() {
        assert_eq!(split_lines("a\nb"), vec!["a", "b"]);
    }

    #[test]
    fn classification() {
        assert!(is_blank("   "));
        assert!(is_comment("  # hello"));
        assert!(is_table_row("  | a | b |"));
        assert!(is_tag_line("  @wip"));
        assert_eq!(doc_string_fence("  \"\"\""), Some(r#"""""#));
        assert_eq!(doc_string_fence("  '''"), Some("'''"));
        assert_eq!(doc_string_fence("plain text"), None);
    }

    #[test]
    fn leading_indent_counts_whitespace_chars() {
        assert_eq!(leading_indent("    \"\"\""), 4);
        assert_eq!(leading_indent("\"\"\""), 0);
    }

    #[test]
    fn well_formed_table_row_requires_both_pipes() {
        assert!(is_well_formed_table_row("| a | b |"));
        assert!(is_table_row("| a | b"));
        assert!(!is_well_formed_table_row("| a | b"));
    }
}
