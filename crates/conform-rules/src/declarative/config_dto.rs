//! TOML deserialization types (DTO layer).
//!
//! These types exist solely for serde deserialization. They are converted
//! to validated [`crate::RuleSet`] values via the loader.

use serde::Deserialize;

/// Raw TOML representation of a rule configuration: `[[selections]]` plus
/// `[[rules]]` sections.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RuleConfigDto {
    /// Named selection definitions.
    #[serde(default)]
    pub selections: Vec<SelectionDto>,

    /// Conformance rules.
    #[serde(default)]
    pub rules: Vec<RuleDto>,
}

/// TOML representation of a named selection.
#[derive(Debug, Clone, Deserialize)]
pub struct SelectionDto {
    /// Selection name (e.g., "domain").
    pub name: String,

    /// Namespace pattern (`"A.B"` exact, `"A.B.*"` subtree).
    #[serde(default)]
    pub namespace: Option<String>,

    /// Symbol kind filter: class, interface, method, property, or type.
    #[serde(default)]
    pub kind: Option<String>,

    /// Anchored regex over the simple name.
    #[serde(default, rename = "name-regex")]
    pub name_regex: Option<String>,

    /// Interface the symbols must implement (`.*` suffix = namespace mode).
    #[serde(default)]
    pub implements: Option<String>,

    /// Restrict to public symbols.
    #[serde(default)]
    pub public: Option<bool>,

    /// Restrict to record-like symbols.
    #[serde(default, rename = "record-like")]
    pub record_like: Option<bool>,
}

/// TOML representation of one rule.
///
/// Exactly one of `subject` / `subject-namespace` picks the subject; the
/// remaining keys each contribute a condition, conjoined when several are
/// present.
#[derive(Debug, Clone, Deserialize)]
pub struct RuleDto {
    /// Rule name, as shown in reports.
    pub name: String,

    /// Named selection reference (mutually exclusive with
    /// `subject-namespace`).
    #[serde(default)]
    pub subject: Option<String>,

    /// Inline namespace pattern subject (mutually exclusive with `subject`).
    #[serde(default, rename = "subject-namespace")]
    pub subject_namespace: Option<String>,

    /// Allowed dependency targets (union of named selections).
    #[serde(default, rename = "only-depend-on")]
    pub only_depend_on: Option<Vec<String>>,

    /// Denied dependency targets (union of named selections).
    #[serde(default, rename = "not-depend-on-any")]
    pub not_depend_on_any: Option<Vec<String>>,

    /// Accepted name suffixes (alternatives).
    #[serde(default, rename = "name-ends-with")]
    pub name_ends_with: Option<Vec<String>>,

    /// Anchored regex the simple name must match.
    #[serde(default, rename = "name-matches")]
    pub name_matches: Option<String>,

    /// Required return type.
    #[serde(default, rename = "return-type")]
    pub return_type: Option<String>,

    /// Forbidden return type.
    #[serde(default, rename = "not-return-type")]
    pub not_return_type: Option<String>,

    /// Require (`true`) or forbid (`false`) the record-like tag.
    #[serde(default, rename = "record-like")]
    pub record_like: Option<bool>,

    /// Interface the subject must implement (`.*` suffix = namespace mode).
    #[serde(default)]
    pub implements: Option<String>,
}
