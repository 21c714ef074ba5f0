//! The immutable dependency graph a conformance run analyzes.

use std::collections::{BTreeMap, BTreeSet, VecDeque};
use std::fmt;

use tracing::debug;

use crate::error::FatalLoadError;
use crate::symbol::{Symbol, SymbolKind};

/// The kind of a directed dependency between two symbols.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum EdgeKind {
    /// `From` references `To` in a member body, field, or signature.
    Uses,
    /// `From` implements the interface `To`.
    Implements,
    /// `From` inherits from `To`.
    Inherits,
    /// `From` declares the member `To`.
    Declares,
}

impl fmt::Display for EdgeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Uses => write!(f, "uses"),
            Self::Implements => write!(f, "implements"),
            Self::Inherits => write!(f, "inherits"),
            Self::Declares => write!(f, "declares"),
        }
    }
}

/// A directed, typed dependency edge between two symbols.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct DependencyEdge {
    /// Full name of the source symbol.
    pub from: String,
    /// Full name of the target symbol.
    pub to: String,
    /// Relationship kind.
    pub kind: EdgeKind,
}

impl DependencyEdge {
    /// Creates a new edge.
    #[must_use]
    pub fn new(from: impl Into<String>, to: impl Into<String>, kind: EdgeKind) -> Self {
        Self {
            from: from.into(),
            to: to.into(),
            kind,
        }
    }
}

/// Immutable container of symbols and typed dependency edges.
///
/// Built once per conformance run by a loader and never mutated afterwards:
/// there is no mutation API, so the model is safe for unlimited concurrent
/// readers. Construction validates referential integrity; an inconsistent
/// input is a [`FatalLoadError`] and nothing downstream runs.
#[derive(Debug)]
pub struct GraphModel {
    symbols: BTreeMap<String, Symbol>,
    edges: Vec<DependencyEdge>,
    outgoing: BTreeMap<String, Vec<usize>>,
}

impl GraphModel {
    /// Builds a graph from symbols and edges.
    ///
    /// Edges are deduplicated by `(from, to, kind)`.
    ///
    /// # Errors
    ///
    /// Returns [`FatalLoadError::DuplicateSymbol`] if two symbols share a
    /// full name, and [`FatalLoadError::DanglingEdge`] if an edge endpoint
    /// is absent from the symbol set.
    pub fn new(
        symbols: Vec<Symbol>,
        edges: Vec<DependencyEdge>,
    ) -> Result<Self, FatalLoadError> {
        let mut map = BTreeMap::new();
        for symbol in symbols {
            let name = symbol.full_name.clone();
            if map.insert(name.clone(), symbol).is_some() {
                return Err(FatalLoadError::DuplicateSymbol { name });
            }
        }

        let deduped: BTreeSet<DependencyEdge> = edges.into_iter().collect();
        for edge in &deduped {
            let missing = if !map.contains_key(&edge.from) {
                Some(&edge.from)
            } else if !map.contains_key(&edge.to) {
                Some(&edge.to)
            } else {
                None
            };
            if let Some(missing) = missing {
                return Err(FatalLoadError::DanglingEdge {
                    from: edge.from.clone(),
                    to: edge.to.clone(),
                    missing: missing.clone(),
                });
            }
        }

        let edges: Vec<DependencyEdge> = deduped.into_iter().collect();
        let mut outgoing: BTreeMap<String, Vec<usize>> = BTreeMap::new();
        for (i, edge) in edges.iter().enumerate() {
            outgoing.entry(edge.from.clone()).or_default().push(i);
        }

        debug!(
            symbols = map.len(),
            edges = edges.len(),
            "graph model constructed"
        );

        Ok(Self {
            symbols: map,
            edges,
            outgoing,
        })
    }

    /// All symbols, in full-name order.
    pub fn symbols(&self) -> impl Iterator<Item = &Symbol> {
        self.symbols.values()
    }

    /// Looks up a symbol by full name.
    #[must_use]
    pub fn symbol(&self, full_name: &str) -> Option<&Symbol> {
        self.symbols.get(full_name)
    }

    /// All edges, deduplicated, in deterministic order.
    #[must_use]
    pub fn edges(&self) -> &[DependencyEdge] {
        &self.edges
    }

    /// All edges of one kind.
    pub fn edges_of_kind(&self, kind: EdgeKind) -> impl Iterator<Item = &DependencyEdge> {
        self.edges.iter().filter(move |e| e.kind == kind)
    }

    /// All edges whose source is the given symbol.
    pub fn edges_from(&self, full_name: &str) -> impl Iterator<Item = &DependencyEdge> {
        self.outgoing
            .get(full_name)
            .into_iter()
            .flatten()
            .map(|&i| &self.edges[i])
    }

    /// Number of symbols in the graph.
    #[must_use]
    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    /// True if the graph holds no symbols.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }

    /// Tests whether a symbol implements an interface accepted by `matches`.
    ///
    /// Direct mode inspects only the symbol's own `Implements` edges.
    /// Transitive mode additionally walks chained `Inherits`/`Implements`
    /// edges (cycle-safe), so an interface implemented by a base class or
    /// extended by an implemented interface counts. Only reached symbols of
    /// kind [`SymbolKind::Interface`] are candidates.
    pub fn implements_where<F>(&self, full_name: &str, transitive: bool, matches: F) -> bool
    where
        F: Fn(&Symbol) -> bool,
    {
        if !transitive {
            return self.edges_from(full_name).any(|e| {
                e.kind == EdgeKind::Implements
                    && self
                        .symbol(&e.to)
                        .is_some_and(|s| s.kind == SymbolKind::Interface && matches(s))
            });
        }

        let mut visited = BTreeSet::new();
        let mut queue = VecDeque::from([full_name]);
        while let Some(current) = queue.pop_front() {
            for edge in self.edges_from(current) {
                if !matches!(edge.kind, EdgeKind::Implements | EdgeKind::Inherits) {
                    continue;
                }
                if !visited.insert(edge.to.as_str()) {
                    continue;
                }
                if let Some(target) = self.symbol(&edge.to) {
                    if target.kind == SymbolKind::Interface && matches(target) {
                        return true;
                    }
                    queue.push_back(edge.to.as_str());
                }
            }
        }
        false
    }
}
