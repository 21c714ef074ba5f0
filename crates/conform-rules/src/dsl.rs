//! Fluent rule authoring surface.
//!
//! The declarative vocabulary of the conformance checker: pick a subject
//! with [`types`], [`classes`], [`interfaces`], or [`method_members`],
//! refine it, then describe what every subject symbol `should` do.
//!
//! ```
//! use conform_rules::dsl::types;
//!
//! # fn main() -> Result<(), conform_core::ConfigError> {
//! let domain = types()
//!     .that()
//!     .reside_in_namespace("Catalog.Domain.*")?
//!     .as_selection("domain");
//!
//! let rule = types()
//!     .that()
//!     .reside_in_namespace("Catalog.Domain.*")?
//!     .should()
//!     .only_depend_on(&domain)
//!     .build("domain-isolation")?;
//! # let _ = rule;
//! # Ok(())
//! # }
//! ```
//!
//! Every malformed pattern (invalid regex, empty namespace, bad type text)
//! is a [`ConfigError`] at construction time, before any evaluation.

use conform_core::{
    ConfigError, InterfaceTarget, NamePattern, NamespacePattern, Predicate, Selection, SymbolKind,
    TypeRef,
};

use crate::condition::Condition;
use crate::rule::Rule;

/// All types: classes and interfaces.
#[must_use]
pub fn types() -> GivenSymbols {
    GivenSymbols::new(
        "types",
        Predicate::Or(vec![
            Predicate::Kind(SymbolKind::Class),
            Predicate::Kind(SymbolKind::Interface),
        ]),
    )
}

/// All classes.
#[must_use]
pub fn classes() -> GivenSymbols {
    GivenSymbols::new("classes", Predicate::Kind(SymbolKind::Class))
}

/// All interfaces.
#[must_use]
pub fn interfaces() -> GivenSymbols {
    GivenSymbols::new("interfaces", Predicate::Kind(SymbolKind::Interface))
}

/// All method members.
#[must_use]
pub fn method_members() -> GivenSymbols {
    GivenSymbols::new("methods", Predicate::Kind(SymbolKind::Method))
}

/// All property members.
#[must_use]
pub fn property_members() -> GivenSymbols {
    GivenSymbols::new("properties", Predicate::Kind(SymbolKind::Property))
}

/// A subject under construction: a predicate being refined before it
/// becomes a [`Selection`] or the subject of a rule.
#[derive(Debug, Clone)]
pub struct GivenSymbols {
    label: String,
    predicate: Predicate,
}

impl GivenSymbols {
    fn new(label: &str, predicate: Predicate) -> Self {
        Self {
            label: label.to_string(),
            predicate,
        }
    }

    /// Fluent connective, no effect.
    #[must_use]
    pub fn that(self) -> Self {
        self
    }

    /// Fluent connective, no effect.
    #[must_use]
    pub fn and(self) -> Self {
        self
    }

    /// Restricts to symbols whose namespace satisfies the pattern
    /// (`"A.B"` exact, `"A.B.*"` subtree).
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] for an empty or alternation-carrying pattern.
    pub fn reside_in_namespace(mut self, pattern: &str) -> Result<Self, ConfigError> {
        let pattern = NamespacePattern::parse(pattern)?;
        self.predicate = self.predicate.and(Predicate::ResidesIn(pattern));
        Ok(self)
    }

    /// Restricts to publicly visible symbols.
    #[must_use]
    pub fn are_public(mut self) -> Self {
        self.predicate = self.predicate.and(Predicate::Public);
        self
    }

    /// Excludes constructors.
    #[must_use]
    pub fn are_no_constructors(mut self) -> Self {
        self.predicate = self
            .predicate
            .and(Predicate::Not(Box::new(Predicate::Constructor)));
        self
    }

    /// Restricts to record-like symbols.
    #[must_use]
    pub fn are_record_like(mut self) -> Self {
        self.predicate = self.predicate.and(Predicate::RecordLike);
        self
    }

    /// Restricts to abstract symbols.
    #[must_use]
    pub fn are_abstract(mut self) -> Self {
        self.predicate = self.predicate.and(Predicate::Abstract);
        self
    }

    /// Restricts to static symbols.
    #[must_use]
    pub fn are_static(mut self) -> Self {
        self.predicate = self.predicate.and(Predicate::Static);
        self
    }

    /// Restricts to symbols whose simple name matches the anchored regex.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidRegex`] if the pattern does not compile.
    pub fn have_name_matching(mut self, pattern: &str) -> Result<Self, ConfigError> {
        let pattern = NamePattern::regex(pattern)?;
        self.predicate = self.predicate.and(Predicate::NameMatches(pattern));
        Ok(self)
    }

    /// Restricts to symbols whose simple name equals the literal.
    #[must_use]
    pub fn have_name(mut self, name: &str) -> Self {
        self.predicate = self
            .predicate
            .and(Predicate::NameMatches(NamePattern::literal(name)));
        self
    }

    /// Restricts to symbols implementing exactly the named interface.
    #[must_use]
    pub fn implement_interface(mut self, full_name: &str) -> Self {
        self.predicate = self.predicate.and(Predicate::Implements {
            target: InterfaceTarget::Exact(full_name.to_string()),
            transitive: true,
        });
        self
    }

    /// Restricts to symbols implementing any interface in the namespace
    /// pattern.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] for a malformed namespace pattern.
    pub fn implement_interface_in(mut self, pattern: &str) -> Result<Self, ConfigError> {
        let pattern = NamespacePattern::parse(pattern)?;
        self.predicate = self.predicate.and(Predicate::Implements {
            target: InterfaceTarget::InNamespace(pattern),
            transitive: true,
        });
        Ok(self)
    }

    /// Restricts to symbols declared by a member of the given selection.
    #[must_use]
    pub fn are_declared_in(mut self, selection: &Selection) -> Self {
        self.predicate = self
            .predicate
            .and(Predicate::DeclaredIn(Box::new(selection.clone())));
        self
    }

    /// Unions this subject with another.
    #[must_use]
    pub fn or(mut self, other: GivenSymbols) -> Self {
        self.label = format!("{} or {}", self.label, other.label);
        self.predicate = Predicate::Or(vec![self.predicate, other.predicate]);
        self
    }

    /// Finishes into a named selection.
    #[must_use]
    pub fn as_selection(self, name: &str) -> Selection {
        Selection::new(name, self.predicate)
    }

    /// Starts describing the condition every subject symbol must satisfy.
    #[must_use]
    pub fn should(self) -> RuleBuilder {
        RuleBuilder {
            subject: Selection::new(self.label, self.predicate),
            current: Vec::new(),
            alternatives: Vec::new(),
        }
    }
}

/// Builds the condition side of a rule.
///
/// Chained condition methods combine with AND; [`RuleBuilder::or_should`]
/// starts an alternative, making the rule pass when either alternative
/// holds for a subject symbol.
#[derive(Debug, Clone)]
pub struct RuleBuilder {
    subject: Selection,
    current: Vec<Condition>,
    alternatives: Vec<Condition>,
}

impl RuleBuilder {
    fn push(mut self, condition: Condition) -> Self {
        self.current.push(condition);
        self
    }

    /// Every dependency edge out of a subject symbol must land in `objects`.
    #[must_use]
    pub fn only_depend_on(self, objects: &Selection) -> Self {
        self.push(Condition::OnlyDependOn(objects.clone()))
    }

    /// No dependency edge out of a subject symbol may land in `objects`.
    #[must_use]
    pub fn not_depend_on_any(self, objects: &Selection) -> Self {
        self.push(Condition::NotDependOnAny(objects.clone()))
    }

    /// The simple name must end with the suffix.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::EmptySuffix`] for an empty suffix.
    pub fn have_name_ending_with(self, suffix: &str) -> Result<Self, ConfigError> {
        if suffix.is_empty() {
            return Err(ConfigError::EmptySuffix);
        }
        Ok(self.push(Condition::HaveNameEndingWith(suffix.to_string())))
    }

    /// The simple name must match the anchored regex.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidRegex`] if the pattern does not compile.
    pub fn have_name_matching(self, pattern: &str) -> Result<Self, ConfigError> {
        let pattern = NamePattern::regex(pattern)?;
        Ok(self.push(Condition::HaveName(pattern)))
    }

    /// The return type must equal the given type structurally.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MalformedTypeRef`] if the type text is invalid.
    pub fn have_return_type(self, ty: &str) -> Result<Self, ConfigError> {
        let ty = TypeRef::parse(ty)?;
        Ok(self.push(Condition::HaveReturnType(ty)))
    }

    /// The return type must not equal the given type.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MalformedTypeRef`] if the type text is invalid.
    pub fn not_have_return_type(self, ty: &str) -> Result<Self, ConfigError> {
        let ty = TypeRef::parse(ty)?;
        Ok(self.push(Condition::NotHaveReturnType(ty)))
    }

    /// The record-like tag must be set.
    #[must_use]
    pub fn be_record_like(self) -> Self {
        self.push(Condition::BeRecordLike)
    }

    /// The symbol must be publicly visible.
    #[must_use]
    pub fn be_public(self) -> Self {
        self.push(Condition::BePublic)
    }

    /// The symbol must implement exactly the named interface.
    #[must_use]
    pub fn implement_interface(self, full_name: &str) -> Self {
        self.push(Condition::ImplementInterface {
            target: InterfaceTarget::Exact(full_name.to_string()),
            transitive: true,
        })
    }

    /// The symbol must implement an interface in the namespace pattern.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] for a malformed namespace pattern.
    pub fn implement_interface_in(self, pattern: &str) -> Result<Self, ConfigError> {
        let pattern = NamespacePattern::parse(pattern)?;
        Ok(self.push(Condition::ImplementInterface {
            target: InterfaceTarget::InNamespace(pattern),
            transitive: true,
        }))
    }

    /// Fluent connective: the next condition is a further requirement on the
    /// same alternative.
    #[must_use]
    pub fn and_should(self) -> Self {
        self
    }

    /// Starts an alternative: the rule passes when either the conditions so
    /// far or the conditions that follow hold.
    #[must_use]
    pub fn or_should(mut self) -> Self {
        if let Some(alternative) = flush(&mut self.current) {
            self.alternatives.push(alternative);
        }
        self
    }

    /// Finishes the rule.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::EmptyRule`] if no condition was given.
    pub fn build(mut self, name: &str) -> Result<Rule, ConfigError> {
        if let Some(alternative) = flush(&mut self.current) {
            self.alternatives.push(alternative);
        }
        let condition = match self.alternatives.len() {
            0 => {
                return Err(ConfigError::EmptyRule {
                    rule: name.to_string(),
                })
            }
            1 => self.alternatives.remove(0),
            _ => Condition::AnyOf(self.alternatives),
        };
        Ok(Rule::new(name, self.subject, condition.normalize()))
    }
}

/// Drains pending conditions into one (possibly conjoined) condition.
fn flush(current: &mut Vec<Condition>) -> Option<Condition> {
    match current.len() {
        0 => None,
        1 => current.pop(),
        _ => Some(Condition::All(std::mem::take(current))),
    }
}
