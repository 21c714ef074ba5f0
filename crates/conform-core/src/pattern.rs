//! Namespace and name matching with explicit match modes.
//!
//! Two ambiguities from ad hoc pattern strings are resolved here by
//! construction: namespace patterns are literal with an optional trailing
//! subtree wildcard (never regex), and name patterns declare literal vs
//! regex mode explicitly per call site.

use std::fmt;

use crate::error::ConfigError;

/// How a namespace pattern matches.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum NamespaceMode {
    /// The namespace must equal the pattern exactly.
    Exact,
    /// The namespace must equal the prefix or start with `prefix + "."`.
    Subtree,
}

/// A validated namespace pattern.
///
/// `"Domain.Entities"` matches that namespace exactly; `"Domain.*"` matches
/// `Domain` and every namespace under it. Pattern text is literal: `|`
/// alternations are rejected at construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NamespacePattern {
    prefix: String,
    mode: NamespaceMode,
}

impl NamespacePattern {
    /// Parses a namespace pattern, choosing exact or subtree mode from the
    /// presence of a trailing `.*`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::EmptyNamespacePattern`] for an empty string and
    /// [`ConfigError::AlternationInNamespacePattern`] if the text contains `|`.
    pub fn parse(pattern: &str) -> Result<Self, ConfigError> {
        if pattern.is_empty() {
            return Err(ConfigError::EmptyNamespacePattern);
        }
        if pattern.contains('|') {
            return Err(ConfigError::AlternationInNamespacePattern {
                pattern: pattern.to_string(),
            });
        }
        let (prefix, mode) = match pattern.strip_suffix(".*") {
            Some(prefix) => (prefix, NamespaceMode::Subtree),
            None => (pattern, NamespaceMode::Exact),
        };
        if prefix.is_empty() {
            return Err(ConfigError::EmptyNamespacePattern);
        }
        Ok(Self {
            prefix: prefix.to_string(),
            mode,
        })
    }

    /// Tests whether a namespace satisfies this pattern.
    #[must_use]
    pub fn contains(&self, namespace: &str) -> bool {
        match self.mode {
            NamespaceMode::Exact => namespace == self.prefix,
            NamespaceMode::Subtree => {
                namespace == self.prefix
                    || namespace
                        .strip_prefix(&self.prefix)
                        .is_some_and(|rest| rest.starts_with('.'))
            }
        }
    }

    /// True if this pattern matches a whole subtree rather than one namespace.
    #[must_use]
    pub fn is_subtree(&self) -> bool {
        self.mode == NamespaceMode::Subtree
    }
}

impl fmt::Display for NamespacePattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.mode {
            NamespaceMode::Exact => write!(f, "{}", self.prefix),
            NamespaceMode::Subtree => write!(f, "{}.*", self.prefix),
        }
    }
}

/// A simple-name matcher with explicit literal vs regex mode.
#[derive(Debug, Clone)]
pub enum NamePattern {
    /// Whole-name literal equality.
    Literal(String),
    /// Anchored regex full-match over the simple name.
    Regex(regex::Regex),
}

impl NamePattern {
    /// Creates a literal whole-name matcher.
    #[must_use]
    pub fn literal(name: impl Into<String>) -> Self {
        Self::Literal(name.into())
    }

    /// Compiles an anchored regex matcher over the simple name.
    ///
    /// The pattern is wrapped in `^(?:...)$` so it must match the whole name.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidRegex`] if the pattern does not compile.
    pub fn regex(pattern: &str) -> Result<Self, ConfigError> {
        let anchored = format!("^(?:{pattern})$");
        let compiled = regex::Regex::new(&anchored).map_err(|e| ConfigError::InvalidRegex {
            pattern: pattern.to_string(),
            reason: e.to_string(),
        })?;
        Ok(Self::Regex(compiled))
    }

    /// Tests whether a simple name satisfies this pattern.
    #[must_use]
    pub fn matches(&self, simple_name: &str) -> bool {
        match self {
            Self::Literal(expected) => simple_name == expected,
            Self::Regex(re) => re.is_match(simple_name),
        }
    }
}

impl fmt::Display for NamePattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Literal(name) => write!(f, "'{name}'"),
            Self::Regex(re) => write!(f, "/{}/", re.as_str()),
        }
    }
}

impl PartialEq for NamePattern {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Literal(a), Self::Literal(b)) => a == b,
            (Self::Regex(a), Self::Regex(b)) => a.as_str() == b.as_str(),
            _ => false,
        }
    }
}
