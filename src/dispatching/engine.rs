//! Rule engine for multi-criteria dispatching.
//!
//! Applies rules in sequence: the next rule is consulted only when all
//! previous rules tie. Scores are compared with `f64::total_cmp`, so the
//! comparison is a total order and sorting is stable across runs.
//!
//! # Reference
//! Haupt (1989), "A Survey of Priority Rule-Based Scheduling"

use std::cmp::Ordering;
use std::sync::Arc;

use super::{Candidate, DispatchingRule};
use crate::models::compare_ids;

/// A composable rule engine for candidate prioritization.
///
/// When every rule ties, candidates are ordered by order id, then machine
/// id (natural order). Two distinct candidates never compare equal, so the
/// outcome does not depend on input order.
///
/// # Example
/// ```
/// use dfjsp::dispatching::{rules, RuleEngine};
///
/// let spt = RuleEngine::new().with_rule(rules::ProcessTime);
/// assert_eq!(spt.rule_names(), vec!["SPT"]);
/// ```
#[derive(Clone, Default)]
pub struct RuleEngine {
    rules: Vec<Arc<dyn DispatchingRule>>,
}

impl RuleEngine {
    /// Creates an empty rule engine.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a rule; earlier rules take precedence.
    pub fn with_rule<R: DispatchingRule + 'static>(mut self, rule: R) -> Self {
        self.rules.push(Arc::new(rule));
        self
    }

    /// Names of the configured rules, in precedence order.
    pub fn rule_names(&self) -> Vec<&'static str> {
        self.rules.iter().map(|r| r.name()).collect()
    }

    /// Returns the index of the highest-priority candidate.
    pub fn select_best(&self, candidates: &[Candidate<'_>]) -> Option<usize> {
        (0..candidates.len()).reduce(|best, i| {
            if self.compare(&candidates[i], &candidates[best]) == Ordering::Less {
                i
            } else {
                best
            }
        })
    }

    /// Compares two candidates rule by rule, then by id.
    pub fn compare(&self, a: &Candidate<'_>, b: &Candidate<'_>) -> Ordering {
        for rule in &self.rules {
            let ord = rule.evaluate(a).total_cmp(&rule.evaluate(b));
            if ord != Ordering::Equal {
                return ord;
            }
        }

        compare_ids(&a.order.order_id, &b.order.order_id)
            .then_with(|| compare_ids(a.machine_id, b.machine_id))
    }
}

impl std::fmt::Debug for RuleEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RuleEngine")
            .field("rules", &self.rule_names())
            .finish()
    }
}
