//! Assignment Planner Engine
//!
//! Turns a roster into a gift-giving cycle, relaxing exclusions when the
//! current constraints admit no cycle at all.
//!
//! # Architecture
//!
//! ```text
//! working = private copy of the roster
//! For each attempt a = 1, 2, ...:
//! 1. Build ExclusionGraph from working exclusions
//! 2. Search for a random Hamiltonian cycle
//! 3. Found            -> return plan (terminal success)
//! 4. Budget exhausted -> SearchBudgetExceeded (nothing relaxed)
//! 5. No cycle:
//!    - no exclusions left -> AssignmentsNotPossible (terminal failure)
//!    - otherwise drop one random entry from one random participant, retry
//! ```
//!
//! Every failed attempt removes exactly one exclusion entry, so a run makes
//! at most `roster.total_exclusions() + 1` attempts. With no exclusions left
//! any roster of two or more participants has a cycle, so the terminal
//! failure only happens for rosters of zero or one participant.
//!
//! Relaxation is scoped to the run: the caller's roster is never modified.
//! The relaxed entries and the final working roster are part of the plan.
//!
//! # Example
//!
//! ```rust
//! use secret_santa_core::{AssignmentPlanner, PlannerConfig, Roster};
//!
//! let roster = Roster::from_entries([
//!     ("alice", vec!["bob"]),
//!     ("bob", vec![]),
//!     ("carol", vec![]),
//!     ("dave", vec![]),
//! ])
//! .unwrap();
//!
//! let config = PlannerConfig {
//!     rng_seed: 12345,
//!     ..Default::default()
//! };
//! let mut planner = AssignmentPlanner::from_config(config).unwrap();
//! let plan = planner.plan(&roster).unwrap();
//!
//! assert_eq!(plan.cycle().len(), 4);
//! assert!(plan.relaxations().is_empty());
//! for (giver, receiver) in plan.cycle().pairs() {
//!     println!("{} buys for {}", giver, receiver);
//! }
//! ```

use crate::graph::{ExclusionGraph, SearchError};
use crate::models::{
    Cycle, ExclusionSemantics, ParticipantId, PlanEvent, PlanLog, Roster, RosterError,
};
use crate::rng::{RandomSource, RngManager};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

// ============================================================================
// Configuration Types
// ============================================================================

/// Planner configuration
///
/// # Fields
///
/// * `rng_seed` - Seed for the default xorshift generator (0 behaves as 1)
/// * `exclusion_semantics` - Whether one-sided exclusions block both directions
/// * `max_search_steps` - Optional cap on vertex expansions per cycle search
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlannerConfig {
    pub rng_seed: u64,

    pub exclusion_semantics: ExclusionSemantics,

    /// `None` searches exhaustively with no cutoff
    pub max_search_steps: Option<u64>,
}

impl PlannerConfig {
    pub fn validate(&self) -> Result<(), PlanError> {
        if self.max_search_steps == Some(0) {
            return Err(PlanError::InvalidConfig(
                "max_search_steps must be > 0".to_string(),
            ));
        }
        Ok(())
    }
}

// ============================================================================
// Errors
// ============================================================================

/// Errors surfaced by a planning run
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PlanError {
    /// Nothing left to relax and still no cycle
    #[error("Assignments not possible for {} participant(s)", .participants.len())]
    AssignmentsNotPossible { participants: Vec<ParticipantId> },

    /// A single search hit `max_search_steps`; retry or escalate
    #[error("Cycle search exceeded its budget on attempt {attempt} after {steps} steps")]
    SearchBudgetExceeded { attempt: usize, steps: u64 },

    #[error("Invalid config: {0}")]
    InvalidConfig(String),

    #[error("Invalid roster: {0}")]
    InvalidRoster(#[from] RosterError),
}

// ============================================================================
// Plan Results
// ============================================================================

/// One exclusion entry dropped during a run
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RelaxedExclusion {
    /// Attempt whose failure triggered the removal
    pub attempt: usize,
    pub participant: ParticipantId,
    pub excluded: ParticipantId,
}

/// Successful planning run
#[derive(Debug, Clone)]
pub struct AssignmentPlan {
    run_id: Uuid,
    rng_seed: Option<u64>,
    semantics: ExclusionSemantics,
    cycle: Cycle,
    attempts: usize,
    relaxed: Vec<RelaxedExclusion>,
    final_roster: Roster,
    log: PlanLog,
}

impl AssignmentPlan {
    pub fn run_id(&self) -> Uuid {
        self.run_id
    }

    /// Seed of the generator, when the planner was built from config
    pub fn rng_seed(&self) -> Option<u64> {
        self.rng_seed
    }

    pub fn semantics(&self) -> ExclusionSemantics {
        self.semantics
    }

    pub fn cycle(&self) -> &Cycle {
        &self.cycle
    }

    pub fn into_cycle(self) -> Cycle {
        self.cycle
    }

    /// Number of graph searches run, including the successful one
    pub fn attempts(&self) -> usize {
        self.attempts
    }

    /// Exclusion entries dropped to reach this cycle, in removal order
    pub fn relaxations(&self) -> &[RelaxedExclusion] {
        &self.relaxed
    }

    pub fn was_relaxed(&self) -> bool {
        !self.relaxed.is_empty()
    }

    /// Working exclusions the cycle was found under
    ///
    /// Callers that want relaxation to stick persist these sets.
    pub fn final_roster(&self) -> &Roster {
        &self.final_roster
    }

    pub fn log(&self) -> &PlanLog {
        &self.log
    }
}

/// Receiver of terminal planning outcomes
///
/// Implemented by whatever persists assignments and notifies people.
pub trait OutcomeSink {
    fn assignment_found(&mut self, plan: &AssignmentPlan);

    fn assignments_not_possible(&mut self, participants: &[ParticipantId]);
}

// ============================================================================
// Planner
// ============================================================================

/// Repeated cycle search with exclusion relaxation
pub struct AssignmentPlanner<R: RandomSource = RngManager> {
    config: PlannerConfig,
    rng: R,
    rng_seed: Option<u64>,
}

impl AssignmentPlanner<RngManager> {
    /// Create a planner seeded from `config.rng_seed`
    pub fn from_config(config: PlannerConfig) -> Result<Self, PlanError> {
        let rng = RngManager::new(config.rng_seed);
        let seed = config.rng_seed;
        let mut planner = Self::new(config, rng)?;
        planner.rng_seed = Some(seed);
        Ok(planner)
    }
}

impl<R: RandomSource> AssignmentPlanner<R> {
    /// Create a planner with an injected random source
    pub fn new(config: PlannerConfig, rng: R) -> Result<Self, PlanError> {
        config.validate()?;
        Ok(Self {
            config,
            rng,
            rng_seed: None,
        })
    }

    pub fn config(&self) -> &PlannerConfig {
        &self.config
    }

    /// Validate `(id, exclusions)` entries and plan them
    pub fn plan_entries<I, S, E, X>(&mut self, entries: I) -> Result<AssignmentPlan, PlanError>
    where
        I: IntoIterator<Item = (S, E)>,
        S: Into<ParticipantId>,
        E: IntoIterator<Item = X>,
        X: Into<ParticipantId>,
    {
        let roster = Roster::from_entries(entries)?;
        self.plan(&roster)
    }

    /// Find an assignment cycle for the roster
    ///
    /// # Errors
    ///
    /// * `AssignmentsNotPossible` - fewer than two participants
    /// * `SearchBudgetExceeded` - a search hit `max_search_steps`
    pub fn plan(&mut self, roster: &Roster) -> Result<AssignmentPlan, PlanError> {
        let run_id = Uuid::new_v4();
        let semantics = self.config.exclusion_semantics;
        let span = tracing::info_span!(
            "plan",
            %run_id,
            participants = roster.len(),
            exclusions = roster.total_exclusions()
        );
        let _guard = span.enter();

        let mut working = roster.clone();
        let mut log = PlanLog::new();
        let mut relaxed = Vec::new();
        let mut attempt = 0;

        loop {
            attempt += 1;
            let graph = ExclusionGraph::build(&working, semantics);
            tracing::debug!(attempt, edges = graph.edge_count(), "searching for assignment cycle");

            let err = match graph.random_cycle_within(&mut self.rng, self.config.max_search_steps) {
                Ok(cycle) => {
                    log.log(PlanEvent::CycleFound {
                        attempt,
                        length: cycle.len(),
                    });
                    tracing::info!(attempt, relaxed = relaxed.len(), "assignment cycle found");
                    return Ok(AssignmentPlan {
                        run_id,
                        rng_seed: self.rng_seed,
                        semantics,
                        cycle,
                        attempts: attempt,
                        relaxed,
                        final_roster: working,
                        log,
                    });
                }
                Err(SearchError::BudgetExhausted { steps }) => {
                    tracing::warn!(attempt, steps, "cycle search budget exhausted");
                    return Err(PlanError::SearchBudgetExceeded { attempt, steps });
                }
                Err(SearchError::NoCycle(err)) => err,
            };

            tracing::debug!(attempt, error = %err, "no cycle under current exclusions");
            log.log(PlanEvent::SearchFailed {
                attempt,
                start: err.start,
                dead_end: err.dead_end,
            });

            let Some((participant, excluded)) = self.relax_one(&mut working) else {
                log.log(PlanEvent::AssignmentsNotPossible { attempt });
                tracing::warn!(attempt, "no exclusions left to relax, assignments not possible");
                return Err(PlanError::AssignmentsNotPossible {
                    participants: roster.ids().cloned().collect(),
                });
            };

            tracing::warn!(
                attempt,
                participant = %participant,
                excluded = %excluded,
                "relaxing exclusion"
            );
            log.log(PlanEvent::ExclusionRelaxed {
                attempt,
                participant: participant.clone(),
                excluded: excluded.clone(),
            });
            relaxed.push(RelaxedExclusion {
                attempt,
                participant,
                excluded,
            });
        }
    }

    /// Run [`plan`](Self::plan) and hand the terminal outcome to `sink`
    ///
    /// Budget and config errors are returned without touching the sink.
    pub fn plan_into<S: OutcomeSink + ?Sized>(
        &mut self,
        roster: &Roster,
        sink: &mut S,
    ) -> Result<(), PlanError> {
        match self.plan(roster) {
            Ok(plan) => {
                sink.assignment_found(&plan);
                Ok(())
            }
            Err(PlanError::AssignmentsNotPossible { participants }) => {
                sink.assignments_not_possible(&participants);
                Ok(())
            }
            Err(other) => Err(other),
        }
    }

    /// Drop one random exclusion from one random participant that has any
    ///
    /// Returns the removed `(participant, excluded)` pair, or `None` when no
    /// participant has exclusions left.
    fn relax_one(&mut self, working: &mut Roster) -> Option<(ParticipantId, ParticipantId)> {
        let mut order: Vec<usize> = (0..working.len()).collect();
        self.rng.shuffle(&mut order);

        let candidate = order
            .into_iter()
            .map(|idx| &working.participants()[idx])
            .find(|p| p.has_exclusions())?;

        let pick = self.rng.below(candidate.exclusions().len());
        let excluded = candidate.exclusions().iter().nth(pick)?.clone();
        let participant = candidate.id().clone();

        working.remove_exclusion(participant.as_str(), excluded.as_str());
        Some((participant, excluded))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_search_budget_rejected() {
        let config = PlannerConfig {
            max_search_steps: Some(0),
            ..Default::default()
        };
        let result = AssignmentPlanner::from_config(config);
        assert!(matches!(result, Err(PlanError::InvalidConfig(_))));
    }

    #[test]
    fn test_config_deserializes_with_defaults() {
        let config: PlannerConfig =
            serde_json::from_str(r#"{"exclusion_semantics": "directional"}"#).unwrap();
        assert_eq!(config.exclusion_semantics, ExclusionSemantics::Directional);
        assert_eq!(config.rng_seed, 0);
        assert_eq!(config.max_search_steps, None);
    }

    #[test]
    fn test_relax_one_removes_exactly_one_entry() {
        let mut planner = AssignmentPlanner::from_config(PlannerConfig::default()).unwrap();
        let mut roster =
            Roster::from_entries([("a", vec!["b", "c"]), ("b", vec![]), ("c", vec!["a"])])
                .unwrap();

        let (participant, excluded) = planner.relax_one(&mut roster).unwrap();

        assert_eq!(roster.total_exclusions(), 2);
        let original = Roster::from_entries([("a", vec!["b", "c"]), ("b", vec![]), ("c", vec!["a"])])
            .unwrap();
        assert!(original
            .exclusions_of(participant.as_str())
            .unwrap()
            .contains(excluded.as_str()));
        assert!(!roster
            .exclusions_of(participant.as_str())
            .unwrap()
            .contains(excluded.as_str()));
    }

    #[test]
    fn test_relax_one_none_when_nothing_left() {
        let mut planner = AssignmentPlanner::from_config(PlannerConfig::default()).unwrap();
        let mut roster = Roster::from_entries([("a", Vec::<&str>::new()), ("b", vec![])]).unwrap();
        assert!(planner.relax_one(&mut roster).is_none());
    }

    #[test]
    fn test_from_config_records_seed() {
        let config = PlannerConfig {
            rng_seed: 77,
            ..Default::default()
        };
        let mut planner = AssignmentPlanner::from_config(config).unwrap();
        let roster = Roster::from_entries([("a", Vec::<&str>::new()), ("b", vec![])]).unwrap();
        let plan = planner.plan(&roster).unwrap();
        assert_eq!(plan.rng_seed(), Some(77));

        let mut injected = AssignmentPlanner::new(PlannerConfig::default(), RngManager::new(77)).unwrap();
        assert_eq!(injected.plan(&roster).unwrap().rng_seed(), None);
    }
}
