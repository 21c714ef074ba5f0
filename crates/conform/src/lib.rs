//! # conform
//!
//! Architecture conformance checking for compiled symbol graphs.
//!
//! This is the main facade crate that re-exports the graph model, rule
//! combinators, and evaluator.
//!
//! ## Quick Start — `cargo test` Integration
//!
//! ```toml
//! [dev-dependencies]
//! conform = "0.2"
//! ```
//!
//! ```rust,ignore
//! // tests/architecture.rs
//! use conform::dsl::types;
//!
//! #[test]
//! fn domain_is_isolated() -> Result<(), conform::ConfigError> {
//!     let graph = conform::loader::from_file("target/graph.json".as_ref())
//!         .expect("graph document");
//!     let domain = types().that().reside_in_namespace("App.Domain.*")?
//!         .as_selection("domain");
//!     let rules = types().that().reside_in_namespace("App.Domain.*")?
//!         .should().only_depend_on(&domain)
//!         .build("domain-isolation")?
//!         .into();
//!     conform::runner::check_rules(&graph, &rules);
//!     Ok(())
//! }
//! ```
//!
//! `check_rules` panics with a formatted report when any rule fails, which
//! is the `cargo test` adapter's contract; the library itself reports rule
//! failure as data, never as an error.
//!
//! ## Programmatic Usage
//!
//! ```rust,ignore
//! use conform::{Evaluator, loader};
//!
//! let graph = loader::from_file("graph.json".as_ref())?;
//! let rules = conform::declarative::load_rules_from_toml(&config_text)?;
//! let report = Evaluator::new(&graph).run(&rules);
//! std::process::exit(report.exit_code());
//! ```

#![forbid(unsafe_code)]

// Re-export core types.
pub use conform_core::*;

// Re-export rule combinators and evaluation.
pub use conform_rules::{declarative, dsl, CancelToken, Condition, Evaluator, Rule, RuleSet};

pub mod runner;
