// Copyright (c) 2018  Brendan Molloy <brendan@bbqsrc.net>
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! The typed AST this crate parses text into.
//!
//! Every node is created at the line that introduces it and is only
//! mutated by [`crate::state`] while its container is still open; callers
//! only ever observe the finished, immutable tree.

#[cfg(feature = "parser")]
use typed_builder::TypedBuilder;

/// A bare `@tag`, without its leading `@`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "parser", derive(TypedBuilder))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Tag {
    /// The tag text, without the leading `@`.
    pub name: String,
    /// 1-based source line the tag appeared on.
    pub line: usize,
}

/// A single row of a [`Table`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "parser", derive(TypedBuilder))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TableRow {
    /// The row's cells, in column order. Always the same length as the
    /// owning [`Table::header`].
    pub cells: Vec<String>,
    /// 1-based source line this row appeared on.
    pub line: usize,
}

/// A pipe-delimited grid, attached to a step (a data table) or to an
/// [`Examples`] block.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "parser", derive(TypedBuilder))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Table {
    /// The header row's cells.
    pub header: Vec<String>,
    /// Every row after the header. Each is guaranteed (by construction) to
    /// have `header.len()` cells.
    pub rows: Vec<TableRow>,
    /// 1-based source line the table's header row appeared on.
    pub line: usize,
}

impl Table {
    /// Whether every row has exactly as many cells as the header.
    pub fn is_rectangular(&self) -> bool {
        self.rows.iter().all(|r| r.cells.len() == self.header.len())
    }
}

/// A doc-string attached to a step.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "parser", derive(TypedBuilder))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Text {
    /// The indentation-stripped, newline-joined body.
    pub value: String,
    /// The MIME-ish content type, e.g. `text/plain` or whatever follows
    /// the opening fence on the same line.
    pub content_type: String,
    /// 1-based source line the opening fence appeared on.
    pub line: usize,
}

/// The fundamental Gherkin step type, after `And`/`But`/`*` resolution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum StepType {
    Given,
    When,
    Then,
    /// A `*` bullet with no prior typed step in its block and no
    /// background step to inherit from. Resolution is deferred to
    /// whatever resolves step names against a registry; this crate does
    /// not guess.
    Step,
}

impl StepType {
    /// The canonical English name of this step type, irrespective of which
    /// localized surface keyword actually matched.
    pub fn as_str(&self) -> &'static str {
        match self {
            StepType::Given => "Given",
            StepType::When => "When",
            StepType::Then => "Then",
            StepType::Step => "Step",
        }
    }
}

/// One line of behavior.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "parser", derive(TypedBuilder))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Step {
    /// The surface keyword as it appeared in the source (e.g. `Given`,
    /// `And`, `*`), trailing whitespace trimmed.
    pub keyword: String,
    /// The resolved semantic type.
    pub ty: StepType,
    /// The text after the keyword.
    pub text: String,
    /// A doc-string, if one followed this step.
    #[cfg_attr(feature = "parser", builder(default))]
    pub docstring: Option<Text>,
    /// A data table, if one followed this step.
    #[cfg_attr(feature = "parser", builder(default))]
    pub table: Option<Table>,
    /// 1-based source line this step appeared on.
    pub line: usize,
}

impl std::fmt::Display for Step {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}", self.keyword.trim(), self.text)
    }
}

/// A shared step prelude attached to a [`Feature`] or [`Rule`].
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "parser", derive(TypedBuilder))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Background {
    /// The matched surface keyword (e.g. `Background`, `Grundlage`).
    pub keyword: String,
    /// The title on the same line, if any.
    pub name: String,
    /// Free-text description lines between the title and the first step.
    #[cfg_attr(feature = "parser", builder(default))]
    pub description: Option<String>,
    /// The background's steps, in order.
    #[cfg_attr(feature = "parser", builder(default))]
    pub steps: Vec<Step>,
    /// 1-based source line the `Background:` line appeared on.
    pub line: usize,
}

/// A named table of placeholder values for a [`Scenario`]'s outline.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "parser", derive(TypedBuilder))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Examples {
    /// The matched surface keyword (e.g. `Examples`, `Scenarios`).
    pub keyword: String,
    /// The title on the same line, if any.
    pub name: String,
    /// Tags attached directly to this `Examples:` block.
    #[cfg_attr(feature = "parser", builder(default))]
    pub tags: Vec<crate::ast::Tag>,
    /// The placeholder table.
    pub table: Table,
    /// 1-based source line the `Examples:` line appeared on.
    pub line: usize,
}

/// A single executable sequence of steps, or -- when `examples` is
/// non-empty -- a Scenario Outline parameterized by one or more
/// [`Examples`] tables.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "parser", derive(TypedBuilder))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Scenario {
    /// The matched surface keyword (e.g. `Scenario`, `Scenario Outline`).
    pub keyword: String,
    /// The title on the same line, if any.
    pub name: String,
    /// Free-text description lines between the title and the first step.
    #[cfg_attr(feature = "parser", builder(default))]
    pub description: Option<String>,
    /// Tags attached directly to this scenario (not including any
    /// container-level tags -- see [`Scenario::effective_tags`]).
    #[cfg_attr(feature = "parser", builder(default))]
    pub tags: Vec<Tag>,
    /// The scenario's steps, in order.
    #[cfg_attr(feature = "parser", builder(default))]
    pub steps: Vec<Step>,
    /// Non-empty only for a Scenario Outline / Scenario Template.
    #[cfg_attr(feature = "parser", builder(default))]
    pub examples: Vec<Examples>,
    /// 1-based source line the scenario's keyword line appeared on.
    pub line: usize,
}

impl Scenario {
    /// Whether this scenario is a Scenario Outline (has at least one
    /// `Examples` table bound to it).
    pub fn is_outline(&self) -> bool {
        !self.examples.is_empty()
    }

    /// This scenario's own tags, unioned with the tags of `container_tags`
    /// (the owning [`Feature`]'s or [`Rule`]'s tags).
    pub fn effective_tags<'a>(&'a self, container_tags: &'a [Tag]) -> Vec<&'a Tag> {
        let mut tags: Vec<&Tag> = container_tags.iter().collect();
        tags.extend(self.tags.iter());
        tags
    }
}

/// A business-rule grouping of scenarios within a [`Feature`] (Gherkin v6).
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "parser", derive(TypedBuilder))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Rule {
    /// The matched surface keyword (e.g. `Rule`, `Regel`).
    pub keyword: String,
    /// The title on the same line, if any.
    pub name: String,
    /// Free-text description lines between the title and the first
    /// statement.
    #[cfg_attr(feature = "parser", builder(default))]
    pub description: Option<String>,
    /// Tags attached directly to this rule.
    #[cfg_attr(feature = "parser", builder(default))]
    pub tags: Vec<Tag>,
    /// This rule's own background, if it declares one.
    #[cfg_attr(feature = "parser", builder(default))]
    pub background: Option<Background>,
    /// The scenarios (and scenario outlines) belonging to this rule.
    #[cfg_attr(feature = "parser", builder(default))]
    pub scenarios: Vec<Scenario>,
    /// 1-based source line the `Rule:` line appeared on.
    pub line: usize,
}

/// The top-level grouping; a file holds at most one.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "parser", derive(TypedBuilder))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Feature {
    /// The matched surface keyword (e.g. `Feature`, `Funktionalität`).
    pub keyword: String,
    /// The title on the same line, if any.
    pub name: String,
    /// Free-text description lines between the title and the first
    /// statement.
    #[cfg_attr(feature = "parser", builder(default))]
    pub description: Option<String>,
    /// Tags attached directly to this feature.
    #[cfg_attr(feature = "parser", builder(default))]
    pub tags: Vec<Tag>,
    /// This feature's own background, if it declares one.
    #[cfg_attr(feature = "parser", builder(default))]
    pub background: Option<Background>,
    /// The scenarios (and scenario outlines) that belong directly to this
    /// feature (not to one of its rules).
    #[cfg_attr(feature = "parser", builder(default))]
    pub scenarios: Vec<Scenario>,
    /// This feature's rules, in order.
    #[cfg_attr(feature = "parser", builder(default))]
    pub rules: Vec<Rule>,
    /// The active language this feature was parsed with (`en` unless a
    /// `# language:` comment or a forced [`crate::GherkinEnv`] said
    /// otherwise).
    #[cfg_attr(feature = "parser", builder(default))]
    pub language: Option<String>,
    /// 1-based source line the `Feature:` line appeared on.
    pub line: usize,
}

impl Feature {
    /// The background steps a `rule` should inherit from when it declares
    /// no background steps of its own: the rule's own background if it has
    /// steps, otherwise this feature's background, otherwise an empty
    /// slice. A read-through query, never copied onto the `Rule` itself.
    pub fn inherited_steps_for<'a>(&'a self, rule: &'a Rule) -> &'a [Step] {
        if let Some(bg) = &rule.background {
            if !bg.steps.is_empty() {
                return &bg.steps;
            }
        }
        self.background
            .as_ref()
            .map(|bg| bg.steps.as_slice())
            .unwrap_or(&[])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn step(ty: StepType, line: usize) -> Step {
        Step {
            keyword: "Given".into(),
            ty,
            text: "x".into(),
            docstring: None,
            table: None,
            line,
        }
    }

    #[test]
    fn table_rectangularity() {
        let t = Table {
            header: vec!["a".into(), "b".into()],
            rows: vec![TableRow {
                cells: vec!["1".into(), "2".into()],
                line: 2,
            }],
            line: 1,
        };
        assert!(t.is_rectangular());

        let bad = Table {
            header: vec!["a".into(), "b".into()],
            rows: vec![TableRow {
                cells: vec!["1".into()],
                line: 2,
            }],
            line: 1,
        };
        assert!(!bad.is_rectangular());
    }

    #[test]
    fn scenario_is_outline_iff_it_has_examples() {
        let mut scenario = Scenario {
            keyword: "Scenario".into(),
            name: "s".into(),
            description: None,
            tags: vec![],
            steps: vec![],
            examples: vec![],
            line: 1,
        };
        assert!(!scenario.is_outline());
        scenario.examples.push(Examples {
            keyword: "Examples".into(),
            name: String::new(),
            tags: vec![],
            table: Table {
                header: vec!["n".into()],
                rows: vec![],
                line: 5,
            },
            line: 4,
        });
        assert!(scenario.is_outline());
    }

    #[test]
    fn rule_inherits_feature_background_when_its_own_is_empty() {
        let feature = Feature {
            keyword: "Feature".into(),
            name: "f".into(),
            description: None,
            tags: vec![],
            background: Some(Background {
                keyword: "Background".into(),
                name: String::new(),
                description: None,
                steps: vec![step(StepType::Given, 2)],
                line: 1,
            }),
            scenarios: vec![],
            rules: vec![],
            language: None,
            line: 1,
        };
        let rule_without_bg = Rule {
            keyword: "Rule".into(),
            name: "r".into(),
            description: None,
            tags: vec![],
            background: None,
            scenarios: vec![],
            line: 3,
        };
        assert_eq!(feature.inherited_steps_for(&rule_without_bg).len(), 1);

        let rule_with_own_bg = Rule {
            background: Some(Background {
                keyword: "Background".into(),
                name: String::new(),
                description: None,
                steps: vec![step(StepType::When, 4), step(StepType::When, 5)],
                line: 3,
            }),
            ..rule_without_bg
        };
        assert_eq!(feature.inherited_steps_for(&rule_with_own_bg).len(), 2);
    }
}
