//! `cargo test` adapter for conformance rules.
//!
//! The library reports rule failure as data; a test run needs a panic.
//! This module is the one place where that translation happens.

use conform_core::{ConformanceReport, GraphModel};
use conform_rules::{Evaluator, RuleSet};

/// Runs a rule set and panics with a formatted report if any rule fails.
///
/// # Panics
///
/// Panics when at least one rule reports violations. The panic message is
/// the human-readable report of the failing run.
pub fn check_rules(graph: &GraphModel, rules: &RuleSet) {
    let report = Evaluator::new(graph).run(rules);
    if !report.passed() {
        panic!("{}", format_failure(&report));
    }
}

/// Formats the failure message for a failing run.
fn format_failure(report: &ConformanceReport) -> String {
    format!(
        "\n=== conform: {} violation(s) ===\n\n{}",
        report.violation_count(),
        report.format_text()
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use conform_core::{
        DependencyEdge, EdgeKind, NamespacePattern, Predicate, Selection, Symbol, SymbolKind,
    };
    use conform_rules::{Condition, Rule};

    fn graph() -> GraphModel {
        GraphModel::new(
            vec![
                Symbol::new("Domain.Order", SymbolKind::Class),
                Symbol::new("Infrastructure.Repo", SymbolKind::Class),
            ],
            vec![DependencyEdge::new(
                "Domain.Order",
                "Infrastructure.Repo",
                EdgeKind::Uses,
            )],
        )
        .unwrap()
    }

    fn domain() -> Selection {
        Selection::new(
            "domain",
            Predicate::ResidesIn(NamespacePattern::parse("Domain.*").unwrap()),
        )
    }

    #[test]
    fn passing_rules_do_not_panic() {
        let rules: RuleSet = Rule::new(
            "naming",
            domain(),
            Condition::HaveNameEndingWith("Order".to_string()),
        )
        .into();
        check_rules(&graph(), &rules);
    }

    #[test]
    #[should_panic(expected = "depends on Infrastructure.Repo")]
    fn failing_rules_panic_with_report() {
        let rules: RuleSet =
            Rule::new("iso", domain(), Condition::OnlyDependOn(domain())).into();
        check_rules(&graph(), &rules);
    }
}
