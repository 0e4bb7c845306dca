//! Built-in dispatch policies.

use std::fmt;
use std::str::FromStr;

use rand::Rng;
use serde::{Deserialize, Serialize};

use super::{rules, Candidate, RuleEngine};
use crate::error::ScheduleError;

/// Dispatch policy selected for a scheduling call.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Policy {
    /// Earliest arrival first.
    Fifo,
    /// Earliest due date first.
    Edd,
    /// Shortest processing time first.
    Spt,
    /// Uniform operation, then uniform machine.
    #[default]
    Random,
}

impl Policy {
    /// All built-in policies.
    pub const ALL: [Policy; 4] = [Policy::Fifo, Policy::Edd, Policy::Spt, Policy::Random];

    pub fn name(&self) -> &'static str {
        match self {
            Policy::Fifo => "fifo",
            Policy::Edd => "edd",
            Policy::Spt => "spt",
            Policy::Random => "random",
        }
    }

    /// Rule chain of a deterministic policy.
    pub fn rule_engine(&self) -> Option<RuleEngine> {
        match self {
            Policy::Fifo => Some(RuleEngine::new().with_rule(rules::ArrivalTime)),
            Policy::Edd => Some(
                RuleEngine::new()
                    .with_rule(rules::DueDate)
                    .with_rule(rules::ArrivalTime),
            ),
            Policy::Spt => Some(RuleEngine::new().with_rule(rules::ProcessTime)),
            Policy::Random => None,
        }
    }

    /// Builds the selector used for one scheduling call.
    pub fn selector(&self) -> Selector {
        Selector {
            policy: *self,
            engine: self.rule_engine(),
        }
    }
}

/// A policy with its rule chain built once.
///
/// Reused across the rounds of one scheduling call.
#[derive(Debug, Clone)]
pub struct Selector {
    policy: Policy,
    engine: Option<RuleEngine>,
}

impl Selector {
    pub fn policy(&self) -> Policy {
        self.policy
    }

    /// Picks the candidate to commit next.
    ///
    /// `Random` first draws an operation uniformly among those that have a
    /// candidate, then a machine uniformly among that operation's
    /// candidates. The other policies never touch `rng`.
    pub fn select<R: Rng + ?Sized>(
        &self,
        candidates: &[Candidate<'_>],
        rng: &mut R,
    ) -> Option<usize> {
        if candidates.is_empty() {
            return None;
        }
        match &self.engine {
            Some(engine) => engine.select_best(candidates),
            None => {
                let mut operations: Vec<usize> = candidates.iter().map(|c| c.operation).collect();
                operations.sort_unstable();
                operations.dedup();
                let operation = operations[rng.random_range(0..operations.len())];

                let machines: Vec<usize> = candidates
                    .iter()
                    .enumerate()
                    .filter(|(_, c)| c.operation == operation)
                    .map(|(i, _)| i)
                    .collect();
                Some(machines[rng.random_range(0..machines.len())])
            }
        }
    }
}

impl fmt::Display for Policy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Policy {
    type Err = ScheduleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "fifo" => Ok(Policy::Fifo),
            "edd" => Ok(Policy::Edd),
            "spt" => Ok(Policy::Spt),
            "random" => Ok(Policy::Random),
            _ => Err(ScheduleError::PolicyMisconfiguration(s.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Order;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn candidate<'a>(
        operation: usize,
        order: &'a Order,
        machine_id: &'a str,
        process_time: f64,
    ) -> Candidate<'a> {
        Candidate {
            operation,
            order,
            stage: "0",
            machine_id,
            process_time,
            start_time: 0.0,
        }
    }

    #[test]
    fn test_parse_policy() {
        assert_eq!("FIFO".parse::<Policy>().unwrap(), Policy::Fifo);
        assert_eq!(" edd ".parse::<Policy>().unwrap(), Policy::Edd);
        assert_eq!("Spt".parse::<Policy>().unwrap(), Policy::Spt);
        assert_eq!("random".parse::<Policy>().unwrap(), Policy::Random);
        assert!(matches!(
            "lifo".parse::<Policy>(),
            Err(ScheduleError::PolicyMisconfiguration(name)) if name == "lifo"
        ));
    }

    #[test]
    fn test_display_roundtrip() {
        for policy in Policy::ALL {
            assert_eq!(policy.to_string().parse::<Policy>().unwrap(), policy);
        }
        assert_eq!(Policy::default(), Policy::Random);
    }

    #[test]
    fn test_fifo_prefers_first_idle_machine_of_earliest_order() {
        let early = Order::new("2", "0", 1.0, 100.0);
        let late = Order::new("1", "0", 5.0, 10.0);
        let candidates = vec![
            candidate(0, &late, "M1", 1.0),
            candidate(1, &early, "M3", 9.0),
            candidate(1, &early, "M2", 9.0),
        ];
        let mut rng = StdRng::seed_from_u64(7);
        assert_eq!(Policy::Fifo.selector().select(&candidates, &mut rng), Some(2));
        assert_eq!(Policy::Edd.selector().select(&candidates, &mut rng), Some(0));
        assert_eq!(Policy::Spt.selector().select(&candidates, &mut rng), Some(0));
    }

    #[test]
    fn test_random_is_reproducible_with_seed() {
        let a = Order::new("1", "0", 0.0, 10.0);
        let b = Order::new("2", "0", 0.0, 10.0);
        let candidates = vec![
            candidate(0, &a, "M1", 1.0),
            candidate(0, &a, "M2", 1.0),
            candidate(1, &b, "M1", 1.0),
        ];
        let picks = |seed| {
            let mut rng = StdRng::seed_from_u64(seed);
            (0..20)
                .map(|_| Policy::Random.selector().select(&candidates, &mut rng).unwrap())
                .collect::<Vec<_>>()
        };
        assert_eq!(picks(42), picks(42));
        assert!(picks(42).iter().all(|&i| i < candidates.len()));
    }

    #[test]
    fn test_random_covers_all_candidates() {
        let a = Order::new("1", "0", 0.0, 10.0);
        let b = Order::new("2", "0", 0.0, 10.0);
        let candidates = vec![
            candidate(0, &a, "M1", 1.0),
            candidate(0, &a, "M2", 1.0),
            candidate(1, &b, "M1", 1.0),
        ];
        let mut rng = StdRng::seed_from_u64(1);
        let mut seen = [false; 3];
        for _ in 0..200 {
            seen[Policy::Random.selector().select(&candidates, &mut rng).unwrap()] = true;
        }
        assert!(seen.iter().all(|&s| s));
    }

    #[test]
    fn test_selector_reused_across_rounds() {
        let a = Order::new("1", "0", 4.0, 10.0);
        let b = Order::new("2", "0", 2.0, 10.0);
        let candidates = vec![candidate(0, &a, "M1", 1.0), candidate(1, &b, "M1", 1.0)];
        let selector = Policy::Fifo.selector();
        let mut rng = StdRng::seed_from_u64(3);

        assert_eq!(selector.policy(), Policy::Fifo);
        assert_eq!(selector.select(&candidates, &mut rng), Some(1));
        assert_eq!(selector.select(&candidates[..1], &mut rng), Some(0));
    }

    #[test]
    fn test_empty_candidates() {
        let mut rng = StdRng::seed_from_u64(0);
        for policy in Policy::ALL {
            assert!(policy.selector().select(&[], &mut rng).is_none());
        }
    }

    #[test]
    fn test_rule_chains() {
        assert!(Policy::Random.rule_engine().is_none());
        assert_eq!(Policy::Edd.rule_engine().unwrap().rule_names(), vec!["EDD", "FIFO"]);
    }
}
