//! Batch rule evaluation against one graph.
//!
//! Rules are mutually independent and the graph is read-only, so the rule
//! list is evaluated on a rayon worker pool with no ordering dependency
//! between workers; results are collected back into authoring order.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

use conform_core::{ConformanceReport, GraphModel, RuleOutcome};
use rayon::prelude::*;
use tracing::info;

use crate::rule::RuleSet;

/// Cooperative cancellation for a whole evaluation batch.
///
/// Cancellation is checked before each rule starts: already-completed rules
/// keep their verdicts, the rest are reported as not run.
#[derive(Debug, Clone, Default)]
pub struct CancelToken {
    flag: Arc<AtomicBool>,
    deadline: Option<Instant>,
}

impl CancelToken {
    /// Creates a token that only cancels when [`CancelToken::cancel`] is called.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a token that also cancels once the timeout elapses.
    #[must_use]
    pub fn with_deadline(timeout: Duration) -> Self {
        Self {
            flag: Arc::new(AtomicBool::new(false)),
            deadline: Instant::now().checked_add(timeout),
        }
    }

    /// Requests cancellation of the remaining rules.
    pub fn cancel(&self) {
        self.flag.store(true, Ordering::Relaxed);
    }

    /// True once cancellation was requested or the deadline passed.
    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        self.flag.load(Ordering::Relaxed)
            || self.deadline.is_some_and(|d| Instant::now() >= d)
    }
}

/// Runs an ordered rule list against one graph model.
#[derive(Debug, Clone, Copy)]
pub struct Evaluator<'g> {
    graph: &'g GraphModel,
}

impl<'g> Evaluator<'g> {
    /// Creates an evaluator over a graph.
    #[must_use]
    pub fn new(graph: &'g GraphModel) -> Self {
        Self { graph }
    }

    /// Evaluates every rule, collecting one outcome per rule in authoring
    /// order.
    #[must_use]
    pub fn run(&self, rules: &RuleSet) -> ConformanceReport {
        self.run_with_cancel(rules, &CancelToken::new())
    }

    /// Evaluates rules until done or cancelled.
    ///
    /// Rules not yet started when the token trips are reported with
    /// [`conform_core::RuleStatus::NotRun`]; the report is partial but
    /// ordered as authored.
    #[must_use]
    pub fn run_with_cancel(&self, rules: &RuleSet, cancel: &CancelToken) -> ConformanceReport {
        info!(rules = rules.len(), "starting conformance run");

        let outcomes: Vec<RuleOutcome> = rules
            .rules()
            .par_iter()
            .map(|rule| {
                if cancel.is_cancelled() {
                    RuleOutcome::not_run(rule.name())
                } else {
                    rule.evaluate(self.graph)
                }
            })
            .collect();

        let report = ConformanceReport::new(outcomes);
        let (passed, failed, not_run) = report.count_by_status();
        info!(passed, failed, not_run, "conformance run complete");
        report
    }
}
