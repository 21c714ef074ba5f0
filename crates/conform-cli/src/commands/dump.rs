//! Dump command implementation.
//!
//! Lists every symbol matched by a selection, independent of any rule.
//! A dump carries no pass/fail judgment; it exists to debug predicates.

use std::path::Path;

use anyhow::{bail, Context, Result};
use conform_core::{loader, report, NamespacePattern, Predicate, Selection, SymbolKind};

/// Runs the dump command, returning the process exit code.
pub fn run(graph_path: &Path, namespace: &str, kind: Option<&str>) -> Result<i32> {
    let graph = loader::from_file(graph_path)
        .with_context(|| format!("failed to load graph: {}", graph_path.display()))?;

    let mut predicate = Predicate::ResidesIn(
        NamespacePattern::parse(namespace).context("invalid namespace pattern")?,
    );
    if let Some(kind) = kind {
        predicate = predicate.and(Predicate::Kind(parse_kind(kind)?));
    }

    let selection = Selection::new(namespace, predicate);
    print!("{}", report::format_selection_dump(&selection, &graph));
    Ok(0)
}

fn parse_kind(value: &str) -> Result<SymbolKind> {
    Ok(match value {
        "class" => SymbolKind::Class,
        "interface" => SymbolKind::Interface,
        "method" => SymbolKind::Method,
        "property" => SymbolKind::Property,
        other => bail!("unknown kind `{other}`, expected: class, interface, method, property"),
    })
}
