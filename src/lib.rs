// Copyright (c) 2018  Brendan Molloy <brendan@bbqsrc.net>
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! A Gherkin parser for Cucumber-style behavior-driven test frameworks.
//!
//! It parses the Gherkin dialect described by
//! [cucumber/gherkin](https://github.com/cucumber/gherkin): Gherkin v5 plus
//! the v6 `Rule` keyword, localized keyword aliases, doc-strings, data
//! tables, and Scenario Outlines with their bound `Examples`.
//!
//! ### .feature file structure
//!
//! - Optionally an initial `# language: xx` comment.
//! - Optionally one or more tags.
//! - The feature definition, with an optional description.
//! - An optional background.
//! - Any mix of scenarios (including scenario outlines with examples) and
//!   rules (each of which may have its own background and scenarios).
//!
//! ### Entry points
//!
//! [`Feature::parse`] and [`Feature::parse_path`] are the whole-file entry
//! points. [`Rule::parse`] and [`Scenario::parse`] parse the corresponding
//! sub-grammar directly (without a wrapping `Feature:`). [`parse_steps`] and
//! [`parse_step`] parse a bare list of steps. [`parse_tags`] tokenizes
//! `@tag` lines on their own.
//!
//! Every entry point takes a [`GherkinEnv`], which carries the active
//! language override (absent a forced language, the file's own
//! `# language:` comment or `en` decides) and the resolved
//! `BEHAVE_STRIP_STEPS_WITH_TRAILING_COLON` behavior.
//!
//! ### Unparsed elements
//!
//! Comments are not preserved in the AST (the `# language:` directive is
//! consumed, not retained). Everything else the grammar recognizes is
//! available via the typed [`Feature`]/[`Rule`]/[`Scenario`]/[`Step`] tree.

mod ast;
mod docstring;
mod env;
mod error;
mod keywords;
mod lex;
mod matcher;
mod oracle;
mod state;
mod step;
mod table;
mod tags;

pub use ast::{
    Background, Examples, Feature, Rule, Scenario, Step, StepType, Table, TableRow, Tag, Text,
};
pub use env::{GherkinEnv, STRIP_STEPS_WITH_TRAILING_COLON_VAR};
pub use error::{Error, ErrorKind, FileParseError};
pub use tags::parse_tags;

use std::path::Path;

impl Feature {
    /// Parses a whole `.feature` file's contents.
    ///
    /// # Errors
    ///
    /// Returns [`Error`] on the first line that doesn't fit the grammar, or
    /// if `env` forces an unsupported language.
    pub fn parse(text: impl AsRef<str>, env: GherkinEnv) -> Result<Feature, Error> {
        state::Parser::new(&env).parse_feature(text.as_ref())
    }

    /// Reads `path` as UTF-8 and parses it as a whole feature file.
    ///
    /// # Errors
    ///
    /// Returns [`FileParseError::Reading`] if the file cannot be read, or
    /// [`FileParseError::Parsing`] (with `filename` set on the inner
    /// [`Error`]) if it can be read but not parsed.
    pub fn parse_path(path: impl AsRef<Path>, env: GherkinEnv) -> Result<Feature, FileParseError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| FileParseError::Reading {
            path: path.to_path_buf(),
            source,
        })?;
        Feature::parse(&text, env)
            .map_err(|e| e.with_filename(Some(path.to_path_buf())))
            .map_err(FileParseError::Parsing)
    }
}

impl<'a> std::convert::TryFrom<&'a str> for Feature {
    type Error = Error;

    fn try_from(text: &'a str) -> Result<Feature, Error> {
        Feature::parse(text, GherkinEnv::default())
    }
}

impl<'a> std::convert::TryFrom<&'a Path> for Feature {
    type Error = FileParseError;

    fn try_from(path: &'a Path) -> Result<Feature, FileParseError> {
        Feature::parse_path(path, GherkinEnv::default())
    }
}

impl Rule {
    /// Parses a single `Rule: ...` block (and everything nested under it)
    /// directly, without a wrapping `Feature:`.
    ///
    /// # Errors
    ///
    /// Returns [`Error`] if the text isn't exactly one rule.
    pub fn parse(text: impl AsRef<str>, env: GherkinEnv) -> Result<Rule, Error> {
        state::Parser::new(&env).parse_rule_only(text.as_ref())
    }
}

impl Scenario {
    /// Parses a single `Scenario:`/`Scenario Outline:` block directly,
    /// without a wrapping `Feature:`.
    ///
    /// # Errors
    ///
    /// Returns [`Error`] if the text isn't exactly one scenario.
    pub fn parse(text: impl AsRef<str>, env: GherkinEnv) -> Result<Scenario, Error> {
        state::Parser::new(&env).parse_scenario_only(text.as_ref())
    }
}

/// Parses a bare list of steps, with no enclosing `Scenario:`/`Background:`.
///
/// # Errors
///
/// Returns [`Error`] if any line isn't a step (or a doc-string/table
/// attached to one).
pub fn parse_steps(text: impl AsRef<str>, env: GherkinEnv) -> Result<Vec<Step>, Error> {
    state::Parser::new(&env).parse_steps_only(text.as_ref())
}

/// Parses exactly one step.
///
/// # Errors
///
/// Returns [`Error`] with [`ErrorKind::MultipleSteps`] if `text` contains
/// more than one step, or any other [`ErrorKind`] the step itself fails on.
pub fn parse_step(text: impl AsRef<str>, env: GherkinEnv) -> Result<Step, Error> {
    state::Parser::new(&env).parse_one_step(text.as_ref())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::convert::TryFrom;

    const MINIMAL: &str = "Feature: Eating\n  Scenario: Well\n    Given a thing\n";

    #[test]
    fn parses_minimal_feature_via_public_entry_point() {
        let feature = Feature::parse(MINIMAL, GherkinEnv::default()).unwrap();
        assert_eq!(feature.name, "Eating");
        assert_eq!(feature.scenarios[0].name, "Well");
    }

    #[test]
    fn try_from_str_matches_parse() {
        let via_parse = Feature::parse(MINIMAL, GherkinEnv::default()).unwrap();
        let via_try_from = Feature::try_from(MINIMAL).unwrap();
        assert_eq!(via_parse, via_try_from);
    }

    #[test]
    fn rule_entry_point_parses_a_bare_rule() {
        let rule = Rule::parse(
            "Rule: checkout\n  Scenario: pay\n    Given a cart\n",
            GherkinEnv::default(),
        )
        .unwrap();
        assert_eq!(rule.name, "checkout");
        assert_eq!(rule.scenarios.len(), 1);
    }

    #[test]
    fn scenario_entry_point_parses_a_bare_scenario() {
        let scenario = Scenario::parse(
            "Scenario: pay\n  Given a cart\n  When I pay\n  Then I get a receipt\n",
            GherkinEnv::default(),
        )
        .unwrap();
        assert_eq!(scenario.name, "pay");
        assert_eq!(scenario.steps.len(), 3);
    }

    #[test]
    fn parse_steps_entry_point() {
        let steps = parse_steps("Given a\nWhen b\nThen c\n", GherkinEnv::default()).unwrap();
        assert_eq!(steps.len(), 3);
    }

    #[test]
    fn parse_step_entry_point_rejects_more_than_one() {
        let err = parse_step("Given a\nWhen b\n", GherkinEnv::default()).unwrap_err();
        assert_eq!(err.kind, ErrorKind::MultipleSteps);
    }

    #[test]
    fn leading_language_comment_is_inert_outside_the_whole_file_entry_point() {
        // spec.md §4.7 bullet 1 scopes `# language:` detection to the
        // whole-file entry point; a bogus language tag ahead of a bare
        // rule/scenario/step list is just an ordinary comment.
        let text = "# language: bogus\nGiven a\n";
        parse_steps(text, GherkinEnv::default()).unwrap();

        let text = "# language: bogus\nRule: R\n  Scenario: S\n    Given a\n";
        Rule::parse(text, GherkinEnv::default()).unwrap();

        let text = "# language: bogus\nScenario: S\n  Given a\n";
        Scenario::parse(text, GherkinEnv::default()).unwrap();
    }

    #[test]
    fn leading_language_comment_still_switches_language_for_the_whole_file_entry_point() {
        let text = "# language: de\nFunktionalität: F\n  Szenario: S\n    Angenommen a\n";
        let feature = Feature::parse(text, GherkinEnv::default()).unwrap();
        assert_eq!(feature.name, "F");
        assert_eq!(feature.language.as_deref(), Some("de"));
    }

    #[test]
    fn parse_tags_entry_point() {
        let tags = parse_tags("@wip @slow\n").unwrap();
        let names: Vec<_> = tags.iter().map(|t| t.name.as_str()).collect();
        assert_eq!(names, vec!["wip", "slow"]);
    }

    #[test]
    fn parse_path_reports_a_missing_file() {
        let err = Feature::parse_path("/no/such/file.feature", GherkinEnv::default()).unwrap_err();
        assert!(matches!(err, FileParseError::Reading { .. }));
    }

    #[test]
    fn determinism_parsing_twice_yields_equal_asts() {
        let a = Feature::parse(MINIMAL, GherkinEnv::default()).unwrap();
        let b = Feature::parse(MINIMAL, GherkinEnv::default()).unwrap();
        assert_eq!(a, b);
    }
}
