// Copyright (c) 2018  Brendan Molloy <brendan@bbqsrc.net>
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Resolving a matched step keyword into a concrete [`StepType`].
//!
//! `Given`/`When`/`Then` are self-explanatory. `And`/`But` and the generic
//! `*` bullet all mean "same type as whatever came before"; this module is
//! the one place that decides what "before" means.

use crate::ast::StepType;
use crate::matcher::RawStepKind;

/// Resolves a matched step's raw kind against the nearest preceding typed
/// step in the same block (`last_in_block`) and, failing that, the last
/// step of the applicable Background (`last_in_background`).
///
/// `Given`/`When`/`Then` resolve to themselves outright. `And`/`But`/`*`
/// inherit `last_in_block` if one exists, else `last_in_background`, else
/// -- for `*` only -- the sentinel [`StepType::Step`]. `And`/`But` with
/// neither available is not resolvable here; the caller is expected to have
/// already rejected that case (see [`crate::error::ErrorKind::AndOrButWithoutPrior`]).
pub(crate) fn resolve(
    raw: RawStepKind,
    last_in_block: Option<StepType>,
    last_in_background: Option<StepType>,
) -> Option<StepType> {
    match raw {
        RawStepKind::Given => Some(StepType::Given),
        RawStepKind::When => Some(StepType::When),
        RawStepKind::Then => Some(StepType::Then),
        RawStepKind::And | RawStepKind::But => last_in_block.or(last_in_background),
        RawStepKind::Bullet => Some(last_in_block.or(last_in_background).unwrap_or(StepType::Step)),
    }
}

/// Whether `raw` requires a preceding typed step to resolve at all (i.e.
/// would return `None` from [`resolve`] absent one). `*` never needs one --
/// it falls back to the sentinel type instead.
pub(crate) fn requires_prior_type(raw: RawStepKind) -> bool {
    matches!(raw, RawStepKind::And | RawStepKind::But)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn given_when_then_are_self_resolving() {
        assert_eq!(resolve(RawStepKind::Given, None, None), Some(StepType::Given));
        assert_eq!(resolve(RawStepKind::When, Some(StepType::Given), None), Some(StepType::When));
        assert_eq!(resolve(RawStepKind::Then, None, Some(StepType::Given)), Some(StepType::Then));
    }

    #[test]
    fn and_inherits_block_before_background() {
        assert_eq!(
            resolve(RawStepKind::And, Some(StepType::When), Some(StepType::Given)),
            Some(StepType::When)
        );
        assert_eq!(
            resolve(RawStepKind::And, None, Some(StepType::Given)),
            Some(StepType::Given)
        );
        assert_eq!(resolve(RawStepKind::And, None, None), None);
    }

    #[test]
    fn but_behaves_like_and() {
        assert_eq!(
            resolve(RawStepKind::But, Some(StepType::Then), None),
            Some(StepType::Then)
        );
        assert_eq!(resolve(RawStepKind::But, None, None), None);
    }

    #[test]
    fn bullet_falls_back_to_sentinel_step_type() {
        assert_eq!(resolve(RawStepKind::Bullet, Some(StepType::When), None), Some(StepType::When));
        assert_eq!(resolve(RawStepKind::Bullet, None, Some(StepType::Then)), Some(StepType::Then));
        assert_eq!(resolve(RawStepKind::Bullet, None, None), Some(StepType::Step));
    }

    #[test]
    fn only_and_but_require_a_prior_type() {
        assert!(requires_prior_type(RawStepKind::And));
        assert!(requires_prior_type(RawStepKind::But));
        assert!(!requires_prior_type(RawStepKind::Bullet));
        assert!(!requires_prior_type(RawStepKind::Given));
    }
}
