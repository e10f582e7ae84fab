// Copyright (c) 2018  Brendan Molloy <brendan@bbqsrc.net>
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! The error types returned by every entry point in this crate.

use std::fmt;
use std::path::PathBuf;

/// The reason a line was rejected by the state machine.
///
/// This is the internal sub-kind referenced by [`Error`]; the oracle in
/// [`crate::oracle`] is responsible for picking one when it can explain a
/// failure, but a parse can also fail for reasons the oracle has no
/// special-cased probe for (`UnexpectedKeyword`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum ErrorKind {
    /// The state machine reached a state with no registered handler. This
    /// should not be reachable from safe entry points; it exists so the
    /// dispatch match stays total.
    #[error("parser in an unknown state")]
    UnknownState,
    /// A line was not accepted by the current state and the oracle had no
    /// specific diagnosis to offer.
    #[error("unexpected keyword or line")]
    UnexpectedKeyword,
    /// `Feature:` appeared somewhere other than the very start of the file.
    #[error("feature is misplaced")]
    FeatureMisplaced,
    /// A second `Feature:` was found in the same file.
    #[error("multiple features in one file are not supported")]
    MultipleFeatures,
    /// `Background:` appeared after a `Scenario`/`ScenarioOutline` in the
    /// same container.
    #[error("background may not occur after scenario or scenario outline")]
    BackgroundAfterScenario,
    /// `Background:` was preceded by pending tags.
    #[error("background does not support tags")]
    BackgroundWithTags,
    /// A container already had a `Background` with steps.
    #[error("second background is not supported")]
    SecondBackground,
    /// `Examples:` appeared outside a `ScenarioOutline`.
    #[error("examples must only appear inside a scenario outline")]
    ExamplesOutsideOutline,
    /// A step appeared before any `Scenario`/`Background` was opened.
    #[error("step may not occur before a scenario")]
    StepBeforeScenario,
    /// A doc-string fence appeared before any step in the current
    /// container.
    #[error("doc-string may not occur before any step")]
    DocStringBeforeStep,
    /// A table row appeared before any step in the current container.
    #[error("table may not occur before any step")]
    TableBeforeStep,
    /// A doc-string line's stripped indent prefix contained non-whitespace.
    #[error("doc-string has inconsistent indentation")]
    BadDocStringIndent,
    /// A table row did not have the same cell count as the header row.
    #[error("table row has the wrong number of cells")]
    MalformedTable,
    /// A tag line contained a word that was neither a tag nor a comment.
    #[error("tag line contains a word that is not a tag")]
    BadTag,
    /// `And`/`But` had no prior typed step to inherit from.
    #[error("`and`/`but` step requires a preceding given/when/then step")]
    AndOrButWithoutPrior,
    /// The requested language tag has no keyword table.
    #[error("language is not supported")]
    LanguageNotSupported,
    /// The `steps`-entry-point-with-exactly-one-step contract was violated.
    #[error("expected exactly one step")]
    MultipleSteps,
    /// The whole-file entry point reached end of input without ever
    /// building a `Feature`.
    #[error("no feature found")]
    NoFeature,
}

/// A parse failure, annotated with everything needed to report it to a
/// human: where it happened, what the offending line looked like, and
/// (when the [`crate::oracle`] could work one out) why it happened.
#[derive(Debug, Clone)]
pub struct Error {
    /// The specific rule that rejected the line.
    pub kind: ErrorKind,
    /// 1-based line number within the parsed text.
    pub line: usize,
    /// The offending line, already trimmed.
    pub line_text: String,
    /// The file the text came from, if parsing went through
    /// [`crate::Feature::parse_path`].
    pub filename: Option<PathBuf>,
    /// The oracle's best guess at *why*, when it has one.
    pub reason: Option<String>,
}

impl Error {
    pub(crate) fn new(kind: ErrorKind, line: usize, line_text: impl Into<String>) -> Self {
        Error {
            kind,
            line,
            line_text: line_text.into(),
            filename: None,
            reason: None,
        }
    }

    pub(crate) fn with_reason(mut self, reason: Option<String>) -> Self {
        self.reason = reason;
        self
    }

    pub(crate) fn with_filename(mut self, filename: Option<PathBuf>) -> Self {
        self.filename = filename;
        self
    }
}

impl std::error::Error for Error {}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(filename) = &self.filename {
            write!(f, "Failed to parse \"{}\": ", filename.display())?;
        } else {
            write!(f, "Failed to parse <string>: ")?;
        }
        write!(f, "{}", self.kind)?;
        write!(f, " at line {}", self.line)?;
        if !self.line_text.is_empty() {
            write!(f, ": \"{}\"", self.line_text.trim())?;
        }
        if let Some(reason) = &self.reason {
            write!(f, "\nREASON: {}", reason)?;
        }
        Ok(())
    }
}

/// The failure modes of [`crate::Feature::parse_path`]: either the file
/// could not be read, or it could be read but not parsed.
#[derive(Debug, thiserror::Error)]
pub enum FileParseError {
    /// The file could not be read as UTF-8 text.
    #[error("failed to read {path}: {source}")]
    Reading {
        /// The path that could not be read.
        path: PathBuf,
        /// The underlying I/O error.
        #[source]
        source: std::io::Error,
    },
    /// The file was read, but its contents did not parse.
    #[error(transparent)]
    Parsing(#[from] Error),
}
