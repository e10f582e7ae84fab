// Copyright (c) 2018  Brendan Molloy <brendan@bbqsrc.net>
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Parser-visible configuration, threaded through every entry point.

/// The only environment variable this crate reads. When set to `yes`, a
/// single trailing `:` is stripped from a step's name once that step gains
/// a doc-string or a table. Anything else (including unset) leaves step
/// names untouched.
pub const STRIP_STEPS_WITH_TRAILING_COLON_VAR: &str = "BEHAVE_STRIP_STEPS_WITH_TRAILING_COLON";

/// Configuration for a single parse.
///
/// Constructed once per call to an entry point. `Default` resolves the
/// environment variable immediately and leaves the language unset, so the
/// file's own `# language:` comment (or `en`, absent that) decides the
/// active [`crate::keywords::Keywords`] table.
#[derive(Debug, Clone)]
pub struct GherkinEnv {
    language: Option<String>,
    strip_trailing_colon: bool,
}

impl Default for GherkinEnv {
    fn default() -> Self {
        GherkinEnv {
            language: None,
            strip_trailing_colon: read_strip_env(),
        }
    }
}

impl GherkinEnv {
    /// Build an environment that forces `language` instead of honoring a
    /// `# language:` comment or falling back to `en`.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error`] with [`crate::ErrorKind::LanguageNotSupported`]
    /// if `language` has no keyword table.
    pub fn new(language: impl Into<String>) -> Result<Self, crate::Error> {
        let language = language.into();
        if !crate::keywords::has_language(&language) {
            return Err(crate::Error::new(
                crate::ErrorKind::LanguageNotSupported,
                0,
                language,
            ));
        }
        Ok(GherkinEnv {
            language: Some(language),
            strip_trailing_colon: read_strip_env(),
        })
    }

    pub(crate) fn forced_language(&self) -> Option<&str> {
        self.language.as_deref()
    }

    pub(crate) fn strip_trailing_colon(&self) -> bool {
        self.strip_trailing_colon
    }
}

fn read_strip_env() -> bool {
    std::env::var(STRIP_STEPS_WITH_TRAILING_COLON_VAR)
        .map(|v| v == "yes")
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_has_no_forced_language() {
        let env = GherkinEnv::default();
        assert_eq!(env.forced_language(), None);
    }

    #[test]
    fn unknown_language_is_rejected() {
        let err = GherkinEnv::new("xx-not-a-language").unwrap_err();
        assert_eq!(err.kind, crate::ErrorKind::LanguageNotSupported);
    }

    #[test]
    fn known_language_is_accepted() {
        let env = GherkinEnv::new("de").unwrap();
        assert_eq!(env.forced_language(), Some("de"));
    }
}
