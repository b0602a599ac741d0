//! Container-name pattern matching.
//!
//! A pattern is an extended regular expression that must match the whole
//! container name. `web` matches only `web`; `web.*` matches `web1` and
//! `web-prod` but not `aweb1`.

use lxcmon_common::error::{MonitorError, Result};
use regex::Regex;

/// A compiled, anchored container-name matcher.
#[derive(Debug, Clone)]
pub struct Pattern {
    source: String,
    regex: Regex,
}

impl Pattern {
    /// Compiles `input` into a matcher anchored at both ends.
    ///
    /// The input is wrapped in a non-capturing group so that alternations
    /// such as `web|db` stay anchored as a whole.
    ///
    /// # Errors
    ///
    /// Returns [`MonitorError::InvalidPattern`] if `input` is empty or is
    /// not a valid regular expression on its own.
    pub fn compile(input: &str) -> Result<Self> {
        if input.is_empty() {
            return Err(MonitorError::InvalidPattern {
                pattern: String::new(),
                reason: "empty pattern".into(),
            });
        }

        // `a)(b` only balances once wrapped; reject it up front.
        let _ = Regex::new(input).map_err(|e| invalid(input, &e))?;

        let regex = Regex::new(&format!("^(?:{input})$")).map_err(|e| invalid(input, &e))?;
        tracing::debug!(pattern = input, "compiled container name pattern");

        Ok(Self {
            source: input.to_string(),
            regex,
        })
    }

    /// Returns `true` if `name` matches the pattern in its entirety.
    #[must_use]
    pub fn matches(&self, name: &str) -> bool {
        self.regex.is_match(name)
    }

    /// Returns the pattern as supplied by the user.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.source
    }
}

fn invalid(input: &str, err: &regex::Error) -> MonitorError {
    MonitorError::InvalidPattern {
        pattern: input.to_string(),
        reason: err.to_string(),
    }
}
