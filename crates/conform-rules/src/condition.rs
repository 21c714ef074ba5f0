//! Relationship conditions and their single interpreter.
//!
//! A condition is an explicit tagged expression tree (AND/OR/NOT nodes over
//! leaf relationship predicates) built once at rule construction, then
//! interpreted by [`Condition::check_symbols`]. Failure is always data: the
//! interpreter returns per-symbol reason lists, never an error.

use std::collections::BTreeSet;
use std::fmt;

use conform_core::{
    EdgeKind, GraphModel, InterfaceTarget, NamePattern, Selection, Symbol, TypeRef,
};

/// Edge kinds that count as a dependency for depend-on conditions.
///
/// `Declares` is structural containment, not a dependency.
const DEPENDENCY_KINDS: [EdgeKind; 3] = [EdgeKind::Uses, EdgeKind::Inherits, EdgeKind::Implements];

/// A condition every subject symbol must satisfy.
#[derive(Debug, Clone, PartialEq)]
pub enum Condition {
    /// Every dependency edge out of the subject must land in the selection.
    ///
    /// Vacuously satisfied by a subject with no outgoing dependency edges.
    OnlyDependOn(Selection),
    /// No dependency edge out of the subject may land in the selection.
    ///
    /// Vacuously satisfied when the object selection is empty.
    NotDependOnAny(Selection),
    /// The simple name must end with the suffix.
    HaveNameEndingWith(String),
    /// The simple name must satisfy the pattern.
    HaveName(NamePattern),
    /// The return type must equal the given type structurally.
    HaveReturnType(TypeRef),
    /// The return type must not equal the given type.
    NotHaveReturnType(TypeRef),
    /// The record-like tag must be set.
    BeRecordLike,
    /// The symbol must be publicly visible.
    BePublic,
    /// The symbol must implement an interface accepted by the target.
    ImplementInterface {
        /// Which interfaces count.
        target: InterfaceTarget,
        /// Whether chained `Inherits`/`Implements` edges count.
        transitive: bool,
    },
    /// Every inner condition must hold.
    All(Vec<Condition>),
    /// At least one inner condition must hold.
    AnyOf(Vec<Condition>),
    /// The inner condition must not hold.
    Not(Box<Condition>),
}

impl Condition {
    /// Removes double negation so `Not(Not(c))` evaluates identically to `c`.
    #[must_use]
    pub fn normalize(self) -> Condition {
        match self {
            Self::Not(inner) => match inner.normalize() {
                Self::Not(twice) => *twice,
                other => Self::Not(Box::new(other)),
            },
            Self::All(inner) => Self::All(inner.into_iter().map(Self::normalize).collect()),
            Self::AnyOf(inner) => Self::AnyOf(inner.into_iter().map(Self::normalize).collect()),
            leaf => leaf,
        }
    }

    /// Evaluates this condition for a list of subject symbols.
    ///
    /// Returns one reason list per symbol, parallel to `subjects`; an empty
    /// list means the symbol satisfies the condition. Object selections are
    /// materialized once per condition node, not once per symbol.
    #[must_use]
    pub fn check_symbols(&self, graph: &GraphModel, subjects: &[&Symbol]) -> Vec<Vec<String>> {
        match self {
            Self::OnlyDependOn(objects) => {
                let allowed = member_names(objects, graph);
                subjects
                    .iter()
                    .map(|s| {
                        dependency_edges(graph, s)
                            .filter(|to| !allowed.contains(to.as_str()))
                            .map(|to| format!("depends on {to}"))
                            .collect()
                    })
                    .collect()
            }
            Self::NotDependOnAny(objects) => {
                let denied = member_names(objects, graph);
                subjects
                    .iter()
                    .map(|s| {
                        dependency_edges(graph, s)
                            .filter(|to| denied.contains(to.as_str()))
                            .map(|to| format!("depends on {to}"))
                            .collect()
                    })
                    .collect()
            }
            Self::HaveNameEndingWith(suffix) => check_each(subjects, |s| {
                if s.simple_name().ends_with(suffix.as_str()) {
                    None
                } else {
                    Some(format!("name does not end with '{suffix}'"))
                }
            }),
            Self::HaveName(pattern) => check_each(subjects, |s| {
                if pattern.matches(s.simple_name()) {
                    None
                } else {
                    Some(format!("name does not match {pattern}"))
                }
            }),
            Self::HaveReturnType(expected) => check_each(subjects, |s| {
                if s.return_type.as_ref() == Some(expected) {
                    None
                } else {
                    Some(match &s.return_type {
                        Some(actual) => format!("returns {actual}, expected {expected}"),
                        None => format!("returns nothing, expected {expected}"),
                    })
                }
            }),
            Self::NotHaveReturnType(forbidden) => check_each(subjects, |s| {
                if s.return_type.as_ref() == Some(forbidden) {
                    Some(format!("must not return {forbidden}"))
                } else {
                    None
                }
            }),
            Self::BeRecordLike => check_each(subjects, |s| {
                if s.tags.is_record_like {
                    None
                } else {
                    Some("is not record-like".to_string())
                }
            }),
            Self::BePublic => check_each(subjects, |s| {
                if s.is_public() {
                    None
                } else {
                    Some("is not public".to_string())
                }
            }),
            Self::ImplementInterface { target, transitive } => check_each(subjects, |s| {
                if graph.implements_where(&s.full_name, *transitive, |i| target.matches(i)) {
                    None
                } else {
                    Some(format!("does not implement {target}"))
                }
            }),
            Self::All(inner) => {
                let mut merged = vec![Vec::new(); subjects.len()];
                for condition in inner {
                    for (slot, reasons) in merged
                        .iter_mut()
                        .zip(condition.check_symbols(graph, subjects))
                    {
                        slot.extend(reasons);
                    }
                }
                merged
            }
            Self::AnyOf(inner) => {
                let branches: Vec<Vec<Vec<String>>> = inner
                    .iter()
                    .map(|c| c.check_symbols(graph, subjects))
                    .collect();
                (0..subjects.len())
                    .map(|i| {
                        if branches.iter().any(|b| b[i].is_empty()) {
                            Vec::new()
                        } else {
                            vec![format!("does not satisfy: {self}")]
                        }
                    })
                    .collect()
            }
            Self::Not(inner) => inner
                .check_symbols(graph, subjects)
                .into_iter()
                .map(|reasons| {
                    if reasons.is_empty() {
                        vec![format!("must not {inner}")]
                    } else {
                        Vec::new()
                    }
                })
                .collect(),
        }
    }
}

/// Materializes a selection's member full names once.
fn member_names<'g>(selection: &Selection, graph: &'g GraphModel) -> BTreeSet<&'g str> {
    selection
        .evaluate(graph)
        .into_iter()
        .map(|s| s.full_name.as_str())
        .collect()
}

/// Targets of the symbol's outgoing dependency edges.
fn dependency_edges<'g>(
    graph: &'g GraphModel,
    symbol: &Symbol,
) -> impl Iterator<Item = &'g String> {
    graph
        .edges_from(&symbol.full_name)
        .filter(|e| DEPENDENCY_KINDS.contains(&e.kind))
        .map(|e| &e.to)
}

fn check_each<F>(subjects: &[&Symbol], check: F) -> Vec<Vec<String>>
where
    F: Fn(&Symbol) -> Option<String>,
{
    subjects
        .iter()
        .map(|s| check(s).into_iter().collect())
        .collect()
}

impl fmt::Display for Condition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::OnlyDependOn(sel) => write!(f, "only depend on '{sel}'"),
            Self::NotDependOnAny(sel) => write!(f, "not depend on '{sel}'"),
            Self::HaveNameEndingWith(suffix) => write!(f, "have a name ending with '{suffix}'"),
            Self::HaveName(pattern) => write!(f, "have a name matching {pattern}"),
            Self::HaveReturnType(ty) => write!(f, "have return type {ty}"),
            Self::NotHaveReturnType(ty) => write!(f, "not have return type {ty}"),
            Self::BeRecordLike => write!(f, "be record-like"),
            Self::BePublic => write!(f, "be public"),
            Self::ImplementInterface { target, .. } => match target {
                InterfaceTarget::Exact(_) => write!(f, "implement interface {target}"),
                InterfaceTarget::InNamespace(_) => {
                    write!(f, "implement an interface in {target}")
                }
            },
            Self::All(inner) => write_joined(f, inner, " and "),
            Self::AnyOf(inner) => write_joined(f, inner, " or "),
            Self::Not(inner) => write!(f, "not ({inner})"),
        }
    }
}

fn write_joined(
    f: &mut fmt::Formatter<'_>,
    conditions: &[Condition],
    separator: &str,
) -> fmt::Result {
    for (i, condition) in conditions.iter().enumerate() {
        if i > 0 {
            write!(f, "{separator}")?;
        }
        write!(f, "{condition}")?;
    }
    Ok(())
}
