//! Declarative conformance rules driven by TOML configuration.
//!
//! This module provides a selection-based model for defining conformance
//! rules without writing Rust rule code.
//!
//! # Architecture
//!
//! ```text
//! TOML text
//!   ↓ serde (DTO layer)
//! config_dto types
//!   ↓ validate + convert
//! RuleSet (fluent-equivalent rules)
//! ```

pub mod config_dto;
pub mod loader;

use crate::rule::RuleSet;
use conform_core::ConfigError;

/// Parses TOML content and builds the configured rule set.
///
/// Returns an empty set if no `[[rules]]` sections are present.
///
/// # Errors
///
/// Returns a [`ConfigError`] if TOML parsing or rule validation fails.
pub fn load_rules_from_toml(content: &str) -> Result<RuleSet, ConfigError> {
    let dto: config_dto::RuleConfigDto = toml::from_str(content)?;
    loader::load(dto)
}
