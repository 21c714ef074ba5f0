//! # conform-rules
//!
//! Rule combinators, the fluent authoring surface, and the batch evaluator
//! for architecture conformance checking.
//!
//! This crate turns selections from `conform-core` into rules:
//!
//! - [`Condition`] — tagged AND/OR/NOT trees over relationship predicates
//! - [`dsl`] — the fluent vocabulary (`types()`, `classes()`, `should()`…)
//! - [`declarative`] — the same rules, loaded from TOML
//! - [`Evaluator`] — parallel, cancellable batch evaluation
//!
//! ## Example
//!
//! ```
//! use conform_core::loader;
//! use conform_rules::dsl::types;
//! use conform_rules::Evaluator;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let graph = loader::from_json_str(r#"{
//!     "symbols": [{"name": "Domain.Order", "kind": "class"}],
//!     "edges": []
//! }"#)?;
//!
//! let domain = types().that().reside_in_namespace("Domain.*")?.as_selection("domain");
//! let rules = types()
//!     .that()
//!     .reside_in_namespace("Domain.*")?
//!     .should()
//!     .only_depend_on(&domain)
//!     .build("domain-isolation")?
//!     .into();
//!
//! let report = Evaluator::new(&graph).run(&rules);
//! assert!(report.passed());
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod condition;
mod evaluator;
mod rule;

/// Declarative TOML rule loading.
pub mod declarative;
/// Fluent rule authoring surface.
pub mod dsl;

pub use condition::Condition;
pub use evaluator::{CancelToken, Evaluator};
pub use rule::{Rule, RuleSet};
