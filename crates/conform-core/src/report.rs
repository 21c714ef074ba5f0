//! Conformance run results and their renderings.
//!
//! A rule failing is expected, reportable data. The types here carry that
//! data in a deterministic shape: rules in authoring order, violations
//! within a rule sorted by symbol full name.

use serde::{Deserialize, Serialize};

use crate::graph::GraphModel;
use crate::selection::Selection;

/// One subject symbol that failed a rule condition, with a reason.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Violation {
    /// Full name of the offending symbol.
    pub symbol: String,
    /// Human-readable reason text.
    pub reason: String,
}

impl Violation {
    /// Creates a new violation.
    #[must_use]
    pub fn new(symbol: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            symbol: symbol.into(),
            reason: reason.into(),
        }
    }
}

/// Verdict for one rule in a conformance run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RuleStatus {
    /// Every subject symbol satisfied the condition.
    Passed,
    /// At least one subject symbol violated the condition.
    Failed,
    /// The rule was not evaluated (run cancelled before it was reached).
    NotRun,
}

impl std::fmt::Display for RuleStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Passed => write!(f, "passed"),
            Self::Failed => write!(f, "failed"),
            Self::NotRun => write!(f, "not run"),
        }
    }
}

/// Result of evaluating one rule.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RuleOutcome {
    /// Rule name, as authored.
    pub rule: String,
    /// Pass/fail/not-run verdict.
    pub status: RuleStatus,
    /// Violations, sorted by symbol full name ascending.
    pub violations: Vec<Violation>,
}

impl RuleOutcome {
    /// Creates an outcome from collected violations, sorting them and
    /// deriving the verdict (`pass = violations.is_empty()`).
    #[must_use]
    pub fn from_violations(rule: impl Into<String>, mut violations: Vec<Violation>) -> Self {
        violations.sort();
        violations.dedup();
        let status = if violations.is_empty() {
            RuleStatus::Passed
        } else {
            RuleStatus::Failed
        };
        Self {
            rule: rule.into(),
            status,
            violations,
        }
    }

    /// Marks a rule that was skipped by cancellation.
    #[must_use]
    pub fn not_run(rule: impl Into<String>) -> Self {
        Self {
            rule: rule.into(),
            status: RuleStatus::NotRun,
            violations: Vec::new(),
        }
    }
}

/// Results of one conformance run: one outcome per rule, in authoring order.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ConformanceReport {
    /// Per-rule outcomes.
    pub outcomes: Vec<RuleOutcome>,
}

impl ConformanceReport {
    /// Creates a report from outcomes.
    #[must_use]
    pub fn new(outcomes: Vec<RuleOutcome>) -> Self {
        Self { outcomes }
    }

    /// True iff no rule failed.
    #[must_use]
    pub fn passed(&self) -> bool {
        self.outcomes
            .iter()
            .all(|o| o.status != RuleStatus::Failed)
    }

    /// Counts outcomes by status: `(passed, failed, not_run)`.
    #[must_use]
    pub fn count_by_status(&self) -> (usize, usize, usize) {
        let mut counts = (0, 0, 0);
        for o in &self.outcomes {
            match o.status {
                RuleStatus::Passed => counts.0 += 1,
                RuleStatus::Failed => counts.1 += 1,
                RuleStatus::NotRun => counts.2 += 1,
            }
        }
        counts
    }

    /// Exit status for batch integration: non-zero iff any rule failed.
    #[must_use]
    pub fn exit_code(&self) -> i32 {
        i32::from(!self.passed())
    }

    /// Total number of violations across all rules.
    #[must_use]
    pub fn violation_count(&self) -> usize {
        self.outcomes.iter().map(|o| o.violations.len()).sum()
    }

    /// Renders the human-readable multi-line report.
    #[must_use]
    pub fn format_text(&self) -> String {
        use std::fmt::Write;

        let mut out = String::new();
        for outcome in &self.outcomes {
            match outcome.status {
                RuleStatus::Passed => {
                    let _ = writeln!(out, "PASS {}", outcome.rule);
                }
                RuleStatus::NotRun => {
                    let _ = writeln!(out, "SKIP {} (not run)", outcome.rule);
                }
                RuleStatus::Failed => {
                    let _ = writeln!(
                        out,
                        "FAIL {} ({} violation(s))",
                        outcome.rule,
                        outcome.violations.len()
                    );
                    for v in &outcome.violations {
                        let _ = writeln!(out, "  {}: {}", v.symbol, v.reason);
                    }
                }
            }
        }

        let (passed, failed, not_run) = self.count_by_status();
        let _ = writeln!(
            out,
            "\n{} rule(s): {} passed, {} failed, {} not run",
            self.outcomes.len(),
            passed,
            failed,
            not_run
        );
        out
    }

    /// Renders one line per violation, for grep-friendly consumption.
    #[must_use]
    pub fn format_compact(&self) -> String {
        use std::fmt::Write;

        let mut out = String::new();
        for outcome in &self.outcomes {
            for v in &outcome.violations {
                let _ = writeln!(out, "{}: {}: {}", outcome.rule, v.symbol, v.reason);
            }
        }
        out
    }

    /// Renders the structured record list as pretty JSON.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn format_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

/// Renders a diagnostic dump of every symbol matched by a selection.
///
/// Used for debugging selection predicates, independent of any rule; a dump
/// carries no pass/fail judgment.
#[must_use]
pub fn format_selection_dump(selection: &Selection, graph: &GraphModel) -> String {
    use std::fmt::Write;

    let matched = selection.evaluate(graph);
    let mut out = format!(
        "selection '{}': {} symbol(s)\n",
        selection.name(),
        matched.len()
    );
    for symbol in matched {
        let _ = writeln!(out, "  {} [{}]", symbol.full_name, symbol.kind);
    }
    out
}
