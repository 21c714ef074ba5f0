//! Named, lazily evaluated subsets of the graph.
//!
//! A [`Selection`] is a pure function of the [`GraphModel`]: re-evaluating
//! it against an unchanged graph always yields the same set, in full-name
//! order. Predicates form a tagged expression tree interpreted by one
//! function rather than a web of dispatching objects.

use std::fmt;

use crate::graph::{EdgeKind, GraphModel};
use crate::pattern::{NamePattern, NamespacePattern};
use crate::symbol::{Symbol, SymbolKind, TypeRef};

/// Which interface symbols an implements-check accepts.
#[derive(Debug, Clone, PartialEq)]
pub enum InterfaceTarget {
    /// The interface with exactly this full name.
    Exact(String),
    /// Any interface whose namespace satisfies the pattern.
    InNamespace(NamespacePattern),
}

impl InterfaceTarget {
    /// Tests whether an interface symbol is accepted by this target.
    #[must_use]
    pub fn matches(&self, symbol: &Symbol) -> bool {
        match self {
            Self::Exact(full_name) => symbol.full_name == *full_name,
            Self::InNamespace(pattern) => pattern.contains(symbol.namespace()),
        }
    }
}

impl fmt::Display for InterfaceTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Exact(name) => write!(f, "{name}"),
            Self::InNamespace(pattern) => write!(f, "{pattern}"),
        }
    }
}

/// A boolean expression over symbol attributes and graph relationships.
#[derive(Debug, Clone, PartialEq)]
pub enum Predicate {
    /// Matches every symbol.
    True,
    /// Symbol has the given kind.
    Kind(SymbolKind),
    /// Symbol is publicly visible.
    Public,
    /// Symbol carries the constructor tag.
    Constructor,
    /// Symbol carries the record-like tag.
    RecordLike,
    /// Symbol carries the abstract tag.
    Abstract,
    /// Symbol carries the static tag.
    Static,
    /// Symbol's namespace satisfies the pattern.
    ResidesIn(NamespacePattern),
    /// Symbol's simple name satisfies the pattern.
    NameMatches(NamePattern),
    /// Symbol's return type equals the given type structurally.
    Returns(TypeRef),
    /// Symbol implements an interface accepted by the target.
    Implements {
        /// Which interfaces count.
        target: InterfaceTarget,
        /// Whether chained `Inherits`/`Implements` edges count.
        transitive: bool,
    },
    /// Symbol is declared (via a `Declares` edge) by a symbol matching the
    /// inner selection.
    DeclaredIn(Box<Selection>),
    /// All inner predicates hold.
    And(Vec<Predicate>),
    /// At least one inner predicate holds.
    Or(Vec<Predicate>),
    /// The inner predicate does not hold.
    Not(Box<Predicate>),
}

impl Predicate {
    /// Evaluates this predicate for one symbol.
    #[must_use]
    pub fn matches(&self, graph: &GraphModel, symbol: &Symbol) -> bool {
        match self {
            Self::True => true,
            Self::Kind(kind) => symbol.kind == *kind,
            Self::Public => symbol.is_public(),
            Self::Constructor => symbol.tags.is_constructor,
            Self::RecordLike => symbol.tags.is_record_like,
            Self::Abstract => symbol.tags.is_abstract,
            Self::Static => symbol.tags.is_static,
            Self::ResidesIn(pattern) => pattern.contains(symbol.namespace()),
            Self::NameMatches(pattern) => pattern.matches(symbol.simple_name()),
            Self::Returns(expected) => symbol.return_type.as_ref() == Some(expected),
            Self::Implements { target, transitive } => {
                graph.implements_where(&symbol.full_name, *transitive, |s| target.matches(s))
            }
            Self::DeclaredIn(selection) => graph.edges_of_kind(EdgeKind::Declares).any(|e| {
                e.to == symbol.full_name
                    && graph
                        .symbol(&e.from)
                        .is_some_and(|decl| selection.contains(graph, decl))
            }),
            Self::And(inner) => inner.iter().all(|p| p.matches(graph, symbol)),
            Self::Or(inner) => inner.iter().any(|p| p.matches(graph, symbol)),
            Self::Not(inner) => !inner.matches(graph, symbol),
        }
    }

    /// Conjoins another predicate onto this one.
    #[must_use]
    pub fn and(self, other: Predicate) -> Predicate {
        match self {
            Self::True => other,
            Self::And(mut inner) => {
                inner.push(other);
                Self::And(inner)
            }
            first => Self::And(vec![first, other]),
        }
    }
}

/// A named, derived, read-only set of symbols defined by a predicate.
#[derive(Debug, Clone, PartialEq)]
pub struct Selection {
    name: String,
    predicate: Predicate,
}

impl Selection {
    /// Creates a named selection from a predicate.
    #[must_use]
    pub fn new(name: impl Into<String>, predicate: Predicate) -> Self {
        Self {
            name: name.into(),
            predicate,
        }
    }

    /// The selection's name, used in reports and declarative configs.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The defining predicate.
    #[must_use]
    pub fn predicate(&self) -> &Predicate {
        &self.predicate
    }

    /// Tests one symbol for membership without materializing the set.
    #[must_use]
    pub fn contains(&self, graph: &GraphModel, symbol: &Symbol) -> bool {
        self.predicate.matches(graph, symbol)
    }

    /// Materializes the selection, sorted by full name.
    #[must_use]
    pub fn evaluate<'g>(&self, graph: &'g GraphModel) -> Vec<&'g Symbol> {
        // GraphModel iterates in full-name order already.
        graph
            .symbols()
            .filter(|s| self.predicate.matches(graph, s))
            .collect()
    }

    /// Set union.
    #[must_use]
    pub fn or(self, other: Selection) -> Selection {
        Selection {
            name: format!("{} or {}", self.name, other.name),
            predicate: Predicate::Or(vec![self.predicate, other.predicate]),
        }
    }

    /// Set intersection.
    #[must_use]
    pub fn and(self, other: Selection) -> Selection {
        Selection {
            name: format!("{} and {}", self.name, other.name),
            predicate: Predicate::And(vec![self.predicate, other.predicate]),
        }
    }

    /// Set difference.
    #[must_use]
    pub fn except(self, other: Selection) -> Selection {
        Selection {
            name: format!("{} except {}", self.name, other.name),
            predicate: Predicate::And(vec![
                self.predicate,
                Predicate::Not(Box::new(other.predicate)),
            ]),
        }
    }
}

impl fmt::Display for Selection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::DependencyEdge;
    use crate::symbol::{Tags, Visibility};

    fn graph() -> GraphModel {
        GraphModel::new(
            vec![
                Symbol::new("Catalog.Domain.Order", SymbolKind::Class),
                Symbol::new("Catalog.Domain.Interfaces.IOrderRepository", SymbolKind::Interface),
                Symbol::new("Catalog.Infrastructure.OrderRepository", SymbolKind::Class),
                Symbol::new("Catalog.Infrastructure.OrderRepository.GetAll", SymbolKind::Method)
                    .with_visibility(Visibility::Private),
                Symbol::new("Catalog.Application.DTO.OrderDto", SymbolKind::Class).with_tags(
                    Tags {
                        is_record_like: true,
                        ..Tags::default()
                    },
                ),
            ],
            vec![
                DependencyEdge::new(
                    "Catalog.Infrastructure.OrderRepository",
                    "Catalog.Domain.Interfaces.IOrderRepository",
                    EdgeKind::Implements,
                ),
                DependencyEdge::new(
                    "Catalog.Infrastructure.OrderRepository",
                    "Catalog.Infrastructure.OrderRepository.GetAll",
                    EdgeKind::Declares,
                ),
            ],
        )
        .unwrap()
    }

    fn names(symbols: &[&Symbol]) -> Vec<String> {
        symbols.iter().map(|s| s.full_name.clone()).collect()
    }

    #[test]
    fn resides_in_subtree() {
        let g = graph();
        let sel = Selection::new(
            "domain",
            Predicate::ResidesIn(NamespacePattern::parse("Catalog.Domain.*").unwrap()),
        );
        assert_eq!(
            names(&sel.evaluate(&g)),
            vec![
                "Catalog.Domain.Interfaces.IOrderRepository",
                "Catalog.Domain.Order"
            ]
        );
    }

    #[test]
    fn kind_and_visibility_predicates() {
        let g = graph();
        let sel = Selection::new(
            "public-methods",
            Predicate::Kind(SymbolKind::Method).and(Predicate::Public),
        );
        assert!(sel.evaluate(&g).is_empty()); // the only method is private
    }

    #[test]
    fn implements_predicate_via_namespace_target() {
        let g = graph();
        let sel = Selection::new(
            "repo-impls",
            Predicate::Implements {
                target: InterfaceTarget::InNamespace(
                    NamespacePattern::parse("Catalog.Domain.Interfaces.*").unwrap(),
                ),
                transitive: true,
            },
        );
        assert_eq!(
            names(&sel.evaluate(&g)),
            vec!["Catalog.Infrastructure.OrderRepository"]
        );
    }

    #[test]
    fn declared_in_predicate_follows_declares_edges() {
        let g = graph();
        let repos = Selection::new(
            "repos",
            Predicate::ResidesIn(NamespacePattern::parse("Catalog.Infrastructure").unwrap()),
        );
        let sel = Selection::new(
            "repo-members",
            Predicate::Kind(SymbolKind::Method).and(Predicate::DeclaredIn(Box::new(repos))),
        );
        assert_eq!(
            names(&sel.evaluate(&g)),
            vec!["Catalog.Infrastructure.OrderRepository.GetAll"]
        );
    }

    #[test]
    fn tag_predicates_match_loader_flags() {
        let g = GraphModel::new(
            vec![
                Symbol::new("A.Base", SymbolKind::Class).with_tags(Tags {
                    is_abstract: true,
                    ..Tags::default()
                }),
                Symbol::new("A.Helper", SymbolKind::Class).with_tags(Tags {
                    is_static: true,
                    ..Tags::default()
                }),
            ],
            vec![],
        )
        .unwrap();

        let abstracts = Selection::new("abstracts", Predicate::Abstract);
        assert_eq!(names(&abstracts.evaluate(&g)), vec!["A.Base"]);

        let statics = Selection::new("statics", Predicate::Static);
        assert_eq!(names(&statics.evaluate(&g)), vec!["A.Helper"]);
    }

    #[test]
    fn set_algebra_union_and_difference() {
        let g = graph();
        let domain = Selection::new(
            "domain",
            Predicate::ResidesIn(NamespacePattern::parse("Catalog.Domain.*").unwrap()),
        );
        let dtos = Selection::new("dtos", Predicate::RecordLike);
        let both = domain.clone().or(dtos);
        assert_eq!(both.evaluate(&g).len(), 3);

        let interfaces = Selection::new("ifaces", Predicate::Kind(SymbolKind::Interface));
        let concrete_domain = domain.except(interfaces);
        assert_eq!(
            names(&concrete_domain.evaluate(&g)),
            vec!["Catalog.Domain.Order"]
        );
    }

    #[test]
    fn evaluation_is_idempotent() {
        let g = graph();
        let sel = Selection::new(
            "domain",
            Predicate::ResidesIn(NamespacePattern::parse("Catalog.*").unwrap()),
        );
        assert_eq!(names(&sel.evaluate(&g)), names(&sel.evaluate(&g)));
    }
}
