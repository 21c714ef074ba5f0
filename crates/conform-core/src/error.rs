//! Error types for graph loading and rule construction.
//!
//! Rule *violations* are never represented here. A failing rule is ordinary
//! reportable data ([`crate::report::Violation`]); only an inconsistent graph
//! or a malformed rule definition is an error.

use std::path::PathBuf;

/// The graph loader could not produce a consistent [`crate::GraphModel`].
///
/// Fatal by contract: when construction fails, the whole conformance run is
/// aborted before any rule evaluates.
#[derive(Debug, thiserror::Error)]
pub enum FatalLoadError {
    /// IO error reading the graph document.
    #[error("failed to read graph from {path}: {source}")]
    Io {
        /// Path that failed to read.
        path: PathBuf,
        /// Underlying IO error.
        source: std::io::Error,
    },

    /// The graph document is not valid JSON or violates the schema.
    #[error("invalid graph document: {0}")]
    Json(#[from] serde_json::Error),

    /// Two symbols share a full name.
    #[error("duplicate symbol `{name}`")]
    DuplicateSymbol {
        /// The colliding full name.
        name: String,
    },

    /// An edge references a symbol absent from the symbol set.
    #[error("edge {from} -> {to} references unknown symbol `{missing}`")]
    DanglingEdge {
        /// Edge source.
        from: String,
        /// Edge target.
        to: String,
        /// Whichever endpoint was not found.
        missing: String,
    },

    /// A symbol declares a return type that does not parse.
    #[error("symbol `{symbol}` has malformed return type: {reason}")]
    InvalidReturnType {
        /// The symbol carrying the bad type text.
        symbol: String,
        /// Why the type text did not parse.
        reason: String,
    },
}

/// A selection or rule was constructed with invalid syntax.
///
/// Raised at construction time, before any evaluation. The caller decides
/// whether to abort the batch or skip the offending rule.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Namespace pattern is empty.
    #[error("namespace pattern must not be empty")]
    EmptyNamespacePattern,

    /// Namespace pattern contains a `|` alternation.
    ///
    /// Namespace patterns are literal. Alternation is expressed by composing
    /// selections with `or`, never inside one pattern string.
    #[error("namespace pattern `{pattern}` contains `|`: compose selections with `or` instead")]
    AlternationInNamespacePattern {
        /// The offending pattern.
        pattern: String,
    },

    /// A name regex did not compile.
    #[error("invalid name pattern `{pattern}`: {reason}")]
    InvalidRegex {
        /// The pattern that failed to compile.
        pattern: String,
        /// Compiler message.
        reason: String,
    },

    /// A type reference did not parse.
    #[error("malformed type reference `{input}`: {reason}")]
    MalformedTypeRef {
        /// The raw type text.
        input: String,
        /// Why it did not parse.
        reason: String,
    },

    /// A name suffix is empty.
    #[error("name suffix must not be empty")]
    EmptySuffix,

    /// A rule was built without any condition.
    #[error("rule `{rule}` has no condition")]
    EmptyRule {
        /// The rule missing a condition.
        rule: String,
    },

    /// A declarative rule references an undefined selection.
    #[error("rule `{rule}` references unknown selection `{selection}`")]
    UnknownSelection {
        /// The referencing rule.
        rule: String,
        /// The undefined selection name.
        selection: String,
    },

    /// A declarative selection names a kind that does not exist.
    #[error("selection `{selection}`: unknown kind `{value}`, expected: class, interface, method, property, type")]
    UnknownKind {
        /// The selection with the bad kind.
        selection: String,
        /// The invalid value.
        value: String,
    },

    /// A declarative rule sets both a named subject and an inline namespace.
    #[error("rule `{rule}`: exactly one of `subject` or `subject-namespace` must be set")]
    AmbiguousSubject {
        /// The rule with the conflict.
        rule: String,
    },

    /// Declarative TOML failed to parse.
    #[error("rule config parse error: {0}")]
    Toml(#[from] toml::de::Error),
}
