// Copyright (c) 2018  Brendan Molloy <brendan@bbqsrc.net>
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Keyword recognition: turning a line into "this concept's keyword,
//! matched" without yet knowing what to do about it.

use crate::keywords::Keywords;

/// The block-level (colon-terminated) concepts a line can open.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum BlockConcept {
    Feature,
    Rule,
    Background,
    Scenario,
    ScenarioOutline,
    Examples,
}

impl BlockConcept {
    fn aliases<'a>(self, kw: &Keywords<'a>) -> &'a [&'a str] {
        match self {
            BlockConcept::Feature => kw.feature,
            BlockConcept::Rule => kw.rule,
            BlockConcept::Background => kw.background,
            BlockConcept::Scenario => kw.scenario,
            BlockConcept::ScenarioOutline => kw.scenario_outline,
            BlockConcept::Examples => kw.examples,
        }
    }
}

/// Matches `line` against every alias of `concept`, requiring a trailing
/// `:`. Returns `(alias, name)` where `name` is everything after the colon,
/// trimmed. Leading indentation on `line` is ignored, the same as every
/// classifier in [`crate::lex`].
pub(crate) fn match_block_keyword<'a>(
    line: &str,
    concept: BlockConcept,
    kw: &Keywords<'a>,
) -> Option<(&'a str, String)> {
    let line = line.trim_start();
    for alias in concept.aliases(kw) {
        let prefix = format!("{}:", alias);
        if let Some(rest) = line.strip_prefix(&prefix) {
            return Some((alias, rest.trim().to_string()));
        }
    }
    None
}

/// The semantic role a matched step keyword plays, before `and`/`but`/`*`
/// resolution.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum RawStepKind {
    Given,
    When,
    Then,
    And,
    But,
    /// The generic `*` bullet: inherits whatever type applies at the call
    /// site.
    Bullet,
}

/// The bullet that stands in for any step keyword, identical across every
/// supported language (Gherkin never localizes it).
const BULLET: &str = "*";

/// Attempts to match a step keyword at the start of `line`, trying each
/// semantic category in the fixed order given/when/then/and/but, and each
/// alias within a category in the table's declared order. A keyword with a
/// trailing space in its alias requires a word separator after it; one
/// without may abut its argument. Falls back to a case-insensitive match
/// of the same aliases if no case-sensitive one hit.
///
/// Returns `(raw_kind, matched_keyword, rest_of_line)`.
pub(crate) fn match_step_keyword<'a>(
    line: &str,
    kw: &Keywords<'a>,
) -> Option<(RawStepKind, &'a str, String)> {
    let line = line.trim_start();
    let categories: [(RawStepKind, &[&str]); 5] = [
        (RawStepKind::Given, kw.given),
        (RawStepKind::When, kw.when),
        (RawStepKind::Then, kw.then),
        (RawStepKind::And, kw.and),
        (RawStepKind::But, kw.but),
    ];

    // Case-sensitive pass first, then a case-insensitive fallback pass, in
    // that order, across the whole table -- not per category -- so a
    // case-sensitive hit anywhere always wins over a case-insensitive hit
    // elsewhere.
    for (kind, aliases) in categories.iter() {
        for alias in *aliases {
            if line.starts_with(alias) {
                return Some((*kind, alias, line[alias.len()..].trim().to_string()));
            }
        }
    }
    for (kind, aliases) in categories.iter() {
        for alias in *aliases {
            if line.to_lowercase().starts_with(&alias.to_lowercase()) {
                return Some((*kind, alias, line[alias.len()..].trim().to_string()));
            }
        }
    }

    if let Some(rest) = line.strip_prefix(BULLET) {
        return Some((RawStepKind::Bullet, BULLET, rest.trim().to_string()));
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::keywords::Keywords;

    #[test]
    fn block_keyword_requires_colon() {
        let kw = Keywords::default();
        assert!(match_block_keyword("Feature without colon", BlockConcept::Feature, &kw).is_none());
        let (alias, name) =
            match_block_keyword("Feature: My feature", BlockConcept::Feature, &kw).unwrap();
        assert_eq!(alias, "Feature");
        assert_eq!(name, "My feature");
    }

    #[test]
    fn block_keyword_ignores_leading_indentation() {
        let kw = Keywords::default();
        let (alias, name) =
            match_block_keyword("    Scenario: indented", BlockConcept::Scenario, &kw).unwrap();
        assert_eq!(alias, "Scenario");
        assert_eq!(name, "indented");
    }

    #[test]
    fn step_keyword_ignores_leading_indentation() {
        let kw = Keywords::default();
        let (kind, _, rest) = match_step_keyword("    Given a thing", &kw).unwrap();
        assert_eq!(kind, RawStepKind::Given);
        assert_eq!(rest, "a thing");
    }

    #[test]
    fn step_keyword_case_sensitive_then_insensitive() {
        let kw = Keywords::default();
        let (kind, alias, rest) = match_step_keyword("Given a thing", &kw).unwrap();
        assert_eq!(kind, RawStepKind::Given);
        assert_eq!(alias, "Given ");
        assert_eq!(rest, "a thing");

        let (kind, _, rest) = match_step_keyword("given lowercase works too", &kw).unwrap();
        assert_eq!(kind, RawStepKind::Given);
        assert_eq!(rest, "lowercase works too");
    }

    #[test]
    fn bullet_matches_regardless_of_language() {
        let kw = Keywords::default();
        let (kind, alias, rest) = match_step_keyword("* a generic step", &kw).unwrap();
        assert_eq!(kind, RawStepKind::Bullet);
        assert_eq!(alias, "*");
        assert_eq!(rest, "a generic step");
    }

    #[test]
    fn non_step_line_does_not_match() {
        let kw = Keywords::default();
        assert!(match_step_keyword("Just a description line", &kw).is_none());
    }
}
