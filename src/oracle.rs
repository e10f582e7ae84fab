// Copyright (c) 2018  Brendan Molloy <brendan@bbqsrc.net>
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Turning a rejected line into a reason a human would find useful,
//! beyond "this is the wrong state".
//!
//! None of this changes whether a line is accepted; it only explains a
//! rejection after the fact, the way a linter attaches a hint to an
//! error it already knows it's going to raise.

use crate::error::ErrorKind;
use crate::keywords::Keywords;
use crate::matcher::{self, BlockConcept};
use crate::state::State;

/// The structural facts `diagnose_block_keyword_usage` needs to reproduce
/// behave's `diagnose_*_usage_error` family -- the handful of fields
/// `Parser` tracks about `self.feature`/`self.scenario_container`/`self.tags`
/// at the point a line got rejected.
#[derive(Debug, Clone, Copy, Default)]
pub(crate) struct Context {
    /// A `Feature` has already been built in this parse.
    pub(crate) has_feature: bool,
    /// The enclosing container (`Feature` or `Rule`) a `Scenario`/
    /// `ScenarioOutline` would attach to already exists.
    pub(crate) has_scenario_container: bool,
    /// That container already holds at least one scenario.
    pub(crate) container_has_scenarios: bool,
    /// Tags are pending, unattached to anything yet.
    pub(crate) pending_tags: bool,
}

/// Probes `line` against each block keyword in behave's fixed precedence --
/// feature, then rule, then background, then scenario, then scenario
/// outline -- and returns the `(ErrorKind, reason)` the first match
/// explains, mirroring `ask_parse_failure_oracle`'s keyword checks ahead of
/// its own "no feature found" fallback. Returns `None` when `line` doesn't
/// look like any block keyword, leaving the caller's own fallback reason in
/// play.
pub(crate) fn diagnose_block_keyword_usage(
    line: &str,
    keywords: &Keywords,
    ctx: Context,
) -> Option<(ErrorKind, String)> {
    if matcher::match_block_keyword(line, BlockConcept::Feature, keywords).is_some() {
        return Some(diagnose_feature_usage_error(ctx));
    }
    if matcher::match_block_keyword(line, BlockConcept::Rule, keywords).is_some() {
        return Some((ErrorKind::UnexpectedKeyword, diagnose_rule_usage_error()));
    }
    if matcher::match_block_keyword(line, BlockConcept::Background, keywords).is_some() {
        return Some((ErrorKind::UnexpectedKeyword, diagnose_background_usage_error(ctx)));
    }
    if matcher::match_block_keyword(line, BlockConcept::Scenario, keywords).is_some() {
        return Some((ErrorKind::UnexpectedKeyword, diagnose_scenario_usage_error(ctx)));
    }
    if matcher::match_block_keyword(line, BlockConcept::ScenarioOutline, keywords).is_some() {
        return Some((ErrorKind::UnexpectedKeyword, diagnose_scenario_outline_usage_error(ctx)));
    }
    None
}

/// A `Feature:` line showed up somewhere it shouldn't have.
fn diagnose_feature_usage_error(ctx: Context) -> (ErrorKind, String) {
    if ctx.has_feature {
        (
            ErrorKind::MultipleFeatures,
            "Multiple features in one file are not supported.".to_string(),
        )
    } else {
        (ErrorKind::FeatureMisplaced, "Feature should not be used here.".to_string())
    }
}

/// A `Rule:` line showed up somewhere it shouldn't have. behave has no
/// finer-grained case here: a misplaced `Rule` is always just "should not
/// be used here".
fn diagnose_rule_usage_error() -> String {
    "Rule should not be used here.".to_string()
}

/// A `Background:` line showed up somewhere it shouldn't have.
fn diagnose_background_usage_error(ctx: Context) -> String {
    if ctx.container_has_scenarios {
        "Background may not occur after Scenario/ScenarioOutline.".to_string()
    } else if ctx.pending_tags {
        "Background does not support tags.".to_string()
    } else {
        "Background should not be used here.".to_string()
    }
}

/// A `Scenario:` line showed up somewhere it shouldn't have.
fn diagnose_scenario_usage_error(ctx: Context) -> String {
    if ctx.has_scenario_container {
        "Scenario should not be used here.".to_string()
    } else {
        "Scenario may not occur before Feature.".to_string()
    }
}

/// A `Scenario Outline:` line showed up somewhere it shouldn't have.
fn diagnose_scenario_outline_usage_error(ctx: Context) -> String {
    if ctx.has_scenario_container {
        "Scenario Outline should not be used here.".to_string()
    } else {
        "Scenario Outline may not occur before Feature.".to_string()
    }
}

/// Builds a `REASON:` string for a line that was rejected in `state`,
/// given the keyword table that was active. Returns `None` when nothing
/// more useful can be said than the error kind's own message.
pub(crate) fn diagnose(kind: ErrorKind, state: State, line: &str, keywords: &Keywords) -> Option<String> {
    match kind {
        ErrorKind::UnexpectedKeyword | ErrorKind::UnknownState => diagnose_misplaced_line(state, line, keywords),
        ErrorKind::AndOrButWithoutPrior => Some(
            "`And`/`But` borrows its type from the nearest Given/When/Then before it; \
             there isn't one in this block or its Background"
                .to_string(),
        ),
        ErrorKind::ExamplesOutsideOutline => {
            Some("Examples must only appear inside scenario outline.".to_string())
        }
        ErrorKind::BackgroundAfterScenario => {
            Some("Background may not occur after Scenario/ScenarioOutline.".to_string())
        }
        ErrorKind::BackgroundWithTags => Some("Background does not support tags.".to_string()),
        ErrorKind::NoFeature => Some("No feature found.".to_string()),
        _ => None,
    }
}

/// Looks for a keyword elsewhere in the active table that *does* match
/// `line`'s prefix, to tell the reader "you probably meant the X block
/// keyword, not Y" instead of a bare "unexpected line".
fn diagnose_misplaced_line(state: State, line: &str, keywords: &Keywords) -> Option<String> {
    let trimmed = line.trim_start();

    let named_concepts: [(&str, &[&str]); 6] = [
        ("Feature", keywords.feature),
        ("Rule", keywords.rule),
        ("Background", keywords.background),
        ("Scenario", keywords.scenario),
        ("Scenario Outline", keywords.scenario_outline),
        ("Examples", keywords.examples),
    ];

    for (concept, aliases) in named_concepts {
        for alias in aliases {
            if trimmed.starts_with(alias) {
                return Some(format!(
                    "this looks like a `{}` line, which isn't valid while parsing {:?}",
                    concept, state
                ));
            }
        }
    }

    if crate::lex::is_tag_line(trimmed) {
        return Some("a tag line here doesn't attach to anything parseable next".to_string());
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn recognizes_a_misplaced_block_keyword() {
        let kw = Keywords::default();
        let reason = diagnose_misplaced_line(State::Steps, "Scenario: stray", &kw);
        assert!(reason.unwrap().contains("Scenario"));
    }

    #[test]
    fn returns_none_for_plain_garbage() {
        let kw = Keywords::default();
        assert!(diagnose_misplaced_line(State::Steps, "nothing recognizable here", &kw).is_none());
    }

    #[test]
    fn and_but_without_prior_has_a_fixed_reason() {
        let kw = Keywords::default();
        let reason = diagnose(ErrorKind::AndOrButWithoutPrior, State::Steps, "And x", &kw);
        assert!(reason.unwrap().contains("nearest"));
    }

    #[test]
    fn no_feature_has_the_documented_reason() {
        let kw = Keywords::default();
        let reason = diagnose(ErrorKind::NoFeature, State::Initial, "not a feature", &kw);
        assert_eq!(reason.as_deref(), Some("No feature found."));
    }

    #[test]
    fn scenario_before_any_feature_blames_missing_feature() {
        let kw = Keywords::default();
        let (kind, reason) =
            diagnose_block_keyword_usage("Scenario: foo", &kw, Context::default()).unwrap();
        assert_eq!(kind, ErrorKind::UnexpectedKeyword);
        assert_eq!(reason, "Scenario may not occur before Feature.");
    }

    #[test]
    fn scenario_outline_before_any_feature_blames_missing_feature() {
        let kw = Keywords::default();
        let (kind, reason) =
            diagnose_block_keyword_usage("Scenario Outline: foo", &kw, Context::default()).unwrap();
        assert_eq!(kind, ErrorKind::UnexpectedKeyword);
        assert_eq!(reason, "Scenario Outline may not occur before Feature.");
    }

    #[test]
    fn scenario_with_an_existing_container_is_just_misplaced() {
        let kw = Keywords::default();
        let ctx = Context {
            has_scenario_container: true,
            ..Context::default()
        };
        let (_, reason) = diagnose_block_keyword_usage("Scenario: foo", &kw, ctx).unwrap();
        assert_eq!(reason, "Scenario should not be used here.");
    }

    #[test]
    fn rule_is_always_just_misplaced() {
        let kw = Keywords::default();
        let (kind, reason) = diagnose_block_keyword_usage("Rule: foo", &kw, Context::default()).unwrap();
        assert_eq!(kind, ErrorKind::UnexpectedKeyword);
        assert_eq!(reason, "Rule should not be used here.");
    }

    #[test]
    fn feature_with_no_prior_feature_is_feature_misplaced() {
        let kw = Keywords::default();
        let (kind, reason) =
            diagnose_block_keyword_usage("Feature: foo", &kw, Context::default()).unwrap();
        assert_eq!(kind, ErrorKind::FeatureMisplaced);
        assert_eq!(reason, "Feature should not be used here.");
    }

    #[test]
    fn second_feature_is_multiple_features() {
        let kw = Keywords::default();
        let ctx = Context {
            has_feature: true,
            ..Context::default()
        };
        let (kind, reason) = diagnose_block_keyword_usage("Feature: foo", &kw, ctx).unwrap();
        assert_eq!(kind, ErrorKind::MultipleFeatures);
        assert_eq!(reason, "Multiple features in one file are not supported.");
    }

    #[test]
    fn background_after_scenarios_blames_ordering() {
        let kw = Keywords::default();
        let ctx = Context {
            container_has_scenarios: true,
            ..Context::default()
        };
        let (_, reason) = diagnose_block_keyword_usage("Background:", &kw, ctx).unwrap();
        assert_eq!(reason, "Background may not occur after Scenario/ScenarioOutline.");
    }

    #[test]
    fn background_with_pending_tags_blames_tags() {
        let kw = Keywords::default();
        let ctx = Context {
            pending_tags: true,
            ..Context::default()
        };
        let (_, reason) = diagnose_block_keyword_usage("Background:", &kw, ctx).unwrap();
        assert_eq!(reason, "Background does not support tags.");
    }

    #[test]
    fn plain_garbage_has_no_block_keyword_diagnosis() {
        let kw = Keywords::default();
        assert!(diagnose_block_keyword_usage("nothing recognizable here", &kw, Context::default()).is_none());
    }
}
