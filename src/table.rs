// Copyright (c) 2018  Brendan Molloy <brendan@bbqsrc.net>
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Parsing `| a | b |` data table rows.

use crate::ast::{Table, TableRow};
use crate::error::{Error, ErrorKind};

/// Splits one `|`-delimited row into cells, unescaping `\|` to `|` and
/// trimming surrounding whitespace from each cell.
///
/// `line` is expected to already satisfy [`crate::lex::is_table_row`].
pub(crate) fn split_row(line: &str) -> Vec<String> {
    let trimmed = line.trim();
    let without_leading = trimmed.strip_prefix('|').unwrap_or(trimmed);
    let inner = without_leading.strip_suffix('|').unwrap_or(without_leading);

    let mut cells = Vec::new();
    let mut current = String::new();
    let mut chars = inner.chars().peekable();
    while let Some(c) = chars.next() {
        match c {
            '\\' => match chars.next() {
                Some('|') => current.push('|'),
                Some(other) => {
                    current.push('\\');
                    current.push(other);
                }
                None => current.push('\\'),
            },
            '|' => {
                cells.push(current.trim().to_string());
                current = String::new();
            }
            _ => current.push(c),
        }
    }
    cells.push(current.trim().to_string());
    cells
}

/// Accumulates table rows until the block ends, then validates
/// rectangularity.
#[derive(Debug, Default)]
pub(crate) struct TableBuilder {
    rows: Vec<TableRow>,
}

impl TableBuilder {
    pub(crate) fn new() -> Self {
        TableBuilder::default()
    }

    pub(crate) fn push_row(&mut self, line: &str, line_number: usize) {
        self.rows.push(TableRow {
            cells: split_row(line),
            line: line_number,
        });
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Finishes the table: the first accumulated row becomes the header,
    /// every remaining row must have the same cell count.
    ///
    /// # Errors
    ///
    /// Returns [`ErrorKind::MalformedTable`] if any row's cell count
    /// disagrees with the header's.
    pub(crate) fn finish(mut self) -> Result<Table, Error> {
        debug_assert!(!self.rows.is_empty());
        let header_row = self.rows.remove(0);
        let width = header_row.cells.len();

        for row in &self.rows {
            if row.cells.len() != width {
                return Err(Error::new(
                    ErrorKind::MalformedTable,
                    row.line,
                    format!("expected {} cells, found {}", width, row.cells.len()),
                ));
            }
        }

        Ok(Table {
            header: header_row.cells,
            rows: self.rows,
            line: header_row.line,
        })
    }
}
