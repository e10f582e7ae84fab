// Copyright (c) 2018  Brendan Molloy <brendan@bbqsrc.net>
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Tokenizing `@tag` lines.

use crate::ast::Tag;
use crate::error::{Error, ErrorKind};

/// Parses one line of whitespace-separated `@tag` words, stopping at a
/// `#` comment. `line` must already start with `@`.
///
/// # Errors
///
/// Returns [`ErrorKind::BadTag`] if a word is neither `@`-prefixed nor a
/// `#`-comment starter.
pub(crate) fn parse_tag_line(line: &str, line_number: usize) -> Result<Vec<Tag>, Error> {
    let trimmed = line.trim();
    debug_assert!(trimmed.starts_with('@'));

    let mut tags = Vec::new();
    for word in trimmed.split_whitespace() {
        if let Some(name) = word.strip_prefix('@') {
            tags.push(Tag {
                name: name.to_string(),
                line: line_number,
            });
        } else if word.starts_with('#') {
            break;
        } else {
            return Err(Error::new(ErrorKind::BadTag, line_number, line));
        }
    }
    Ok(tags)
}

/// The public entry point for the tags-only sub-grammar (spec §4.9): parses
/// every `@`-prefixed line in `text`, in order, ignoring blank lines.
///
/// # Errors
///
/// Returns [`crate::Error`] if any non-blank line is not a valid tag line.
pub fn parse_tags(text: &str) -> Result<Vec<Tag>, Error> {
    let mut tags = Vec::new();
    for (i, line) in crate::lex::split_lines(text).into_iter().enumerate() {
        let line_number = i + 1;
        if crate::lex::is_blank(line) {
            continue;
        }
        if !crate::lex::is_tag_line(line) {
            return Err(Error::new(ErrorKind::BadTag, line_number, line));
        }
        tags.extend(parse_tag_line(line, line_number)?);
    }
    Ok(tags)
}
