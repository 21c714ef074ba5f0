//! # conform-core
//!
//! Core framework for architecture conformance checking over a resolved
//! symbol graph.
//!
//! This crate provides the foundational types for building conformance
//! checks. It includes:
//!
//! - [`GraphModel`] — immutable container of symbols and dependency edges
//! - [`Selection`] and [`Predicate`] — named, lazily evaluated graph subsets
//! - [`loader`] — the documented JSON input schema for external graph loaders
//! - [`report`] — deterministic pass/fail results and their renderings
//!
//! The core never inspects raw program metadata; extraction from compiled
//! artifacts is an external collaborator that produces the [`loader`]
//! schema. Rule combinators and evaluation live in `conform-rules`.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod error;
mod graph;
mod pattern;
mod selection;
mod symbol;

/// Graph document loading (the external loader's output contract).
pub mod loader;
/// Run results and renderings.
pub mod report;

pub use error::{ConfigError, FatalLoadError};
pub use graph::{DependencyEdge, EdgeKind, GraphModel};
pub use pattern::{NamePattern, NamespacePattern};
pub use report::{ConformanceReport, RuleOutcome, RuleStatus, Violation};
pub use selection::{InterfaceTarget, Predicate, Selection};
pub use symbol::{Symbol, SymbolKind, Tags, TypeRef, Visibility};
