//! Rules: a subject selection paired with a condition.

use conform_core::{GraphModel, RuleOutcome, Selection, Violation};
use tracing::debug;

use crate::condition::Condition;

/// A structural rule: every symbol in the subject selection must satisfy
/// the condition. Its negation set is the violation list.
#[derive(Debug, Clone)]
pub struct Rule {
    name: String,
    subject: Selection,
    condition: Condition,
}

impl Rule {
    /// Creates a rule.
    #[must_use]
    pub fn new(name: impl Into<String>, subject: Selection, condition: Condition) -> Self {
        Self {
            name: name.into(),
            subject,
            condition,
        }
    }

    /// The rule's name, used in reports.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The subject selection.
    #[must_use]
    pub fn subject(&self) -> &Selection {
        &self.subject
    }

    /// The condition tree.
    #[must_use]
    pub fn condition(&self) -> &Condition {
        &self.condition
    }

    /// Evaluates this rule against a graph.
    ///
    /// Pure with respect to the graph: the same rule and graph always yield
    /// the same outcome. Violations are sorted by symbol full name.
    #[must_use]
    pub fn evaluate(&self, graph: &GraphModel) -> RuleOutcome {
        let subjects = self.subject.evaluate(graph);
        let per_symbol = self.condition.check_symbols(graph, &subjects);

        let violations: Vec<Violation> = subjects
            .iter()
            .zip(per_symbol)
            .flat_map(|(symbol, reasons)| {
                reasons
                    .into_iter()
                    .map(|reason| Violation::new(&symbol.full_name, reason))
            })
            .collect();

        debug!(
            rule = %self.name,
            subjects = subjects.len(),
            violations = violations.len(),
            "rule evaluated"
        );

        RuleOutcome::from_violations(&self.name, violations)
    }

    /// Combines this rule with an independent rule into a set evaluated
    /// separately and merged for reporting. Subjects are not intersected.
    #[must_use]
    pub fn and(self, other: Rule) -> RuleSet {
        let mut set = RuleSet::new();
        set.push(self);
        set.push(other);
        set
    }
}

/// An ordered list of mutually independent rules.
#[derive(Debug, Clone, Default)]
pub struct RuleSet {
    rules: Vec<Rule>,
}

impl RuleSet {
    /// Creates an empty set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a rule, preserving authoring order.
    pub fn push(&mut self, rule: Rule) {
        self.rules.push(rule);
    }

    /// Appends a rule, builder style.
    #[must_use]
    pub fn and(mut self, rule: Rule) -> Self {
        self.push(rule);
        self
    }

    /// The rules in authoring order.
    #[must_use]
    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    /// Number of rules in the set.
    #[must_use]
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    /// True if the set holds no rules.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Keeps only rules whose name is in `names`.
    #[must_use]
    pub fn filter_by_name(self, names: &[&str]) -> Self {
        Self {
            rules: self
                .rules
                .into_iter()
                .filter(|r| names.contains(&r.name()))
                .collect(),
        }
    }
}

impl From<Rule> for RuleSet {
    fn from(rule: Rule) -> Self {
        let mut set = Self::new();
        set.push(rule);
        set
    }
}

impl IntoIterator for RuleSet {
    type Item = Rule;
    type IntoIter = std::vec::IntoIter<Rule>;

    fn into_iter(self) -> Self::IntoIter {
        self.rules.into_iter()
    }
}

impl FromIterator<Rule> for RuleSet {
    fn from_iter<T: IntoIterator<Item = Rule>>(iter: T) -> Self {
        Self {
            rules: iter.into_iter().collect(),
        }
    }
}
