//! Exclusion graph and randomized Hamiltonian cycle search
//!
//! Vertices: roster participants (arena-indexed, roster order)
//! Edges: giver → receiver pairs not blocked by any exclusion
//!
//! # Search
//!
//! [`ExclusionGraph::random_cycle`] is an exhaustive randomized depth-first
//! backtracking search:
//!
//! ```text
//! path = [random start]
//! extend(path):
//!     path covers every vertex?  -> Closed if last → start is an edge, else DeadEnd
//!     for next in shuffle(successors(last)) not yet visited:
//!         push next; extend; Closed/OutOfBudget bubble up, DeadEnd pops and continues
//!     DeadEnd
//! ```
//!
//! Worst case is exponential. Rosters are tens of people with sparse
//! exclusions, and an optional step budget caps a single search.

use crate::models::{Cycle, ExclusionSemantics, ParticipantId, Roster};
use crate::rng::RandomSource;
use std::collections::BTreeMap;
use thiserror::Error;

// ============================================================================
// Errors
// ============================================================================

/// Every exploration path was exhausted without closing a cycle
///
/// `start` is the random start vertex and `dead_end` the last vertex that ran
/// out of candidates. Both are `None` for an empty graph.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("No cycle found from {} to {}", endpoint(.dead_end), endpoint(.start))]
pub struct NoCycleFound {
    pub start: Option<ParticipantId>,
    pub dead_end: Option<ParticipantId>,
}

fn endpoint(id: &Option<ParticipantId>) -> &str {
    id.as_ref().map_or("<none>", ParticipantId::as_str)
}

/// Failure of a bounded cycle search
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SearchError {
    #[error(transparent)]
    NoCycle(#[from] NoCycleFound),

    /// The step budget ran out before the search proved anything
    #[error("Search budget exhausted after {steps} steps")]
    BudgetExhausted { steps: u64 },
}

// ============================================================================
// Exclusion Graph
// ============================================================================

/// Directed eligibility graph built from a roster's exclusions
///
/// # Example
/// ```
/// use secret_santa_core::{ExclusionGraph, ExclusionSemantics, RngManager, Roster};
///
/// let roster = Roster::from_entries([
///     ("alice", vec!["bob"]),
///     ("bob", vec![]),
///     ("carol", vec![]),
/// ])
/// .unwrap();
///
/// let graph = ExclusionGraph::build(&roster, ExclusionSemantics::Directional);
/// assert!(!graph.has_edge("alice", "bob"));
/// assert!(graph.has_edge("bob", "alice"));
///
/// let mut rng = RngManager::new(42);
/// let cycle = graph.random_cycle(&mut rng).unwrap();
/// assert_eq!(cycle.len(), 3);
/// assert!(graph.admits(&cycle));
/// ```
#[derive(Debug, Clone)]
pub struct ExclusionGraph {
    /// Participant id → vertex index
    id_to_index: BTreeMap<ParticipantId, usize>,

    /// Vertex index → participant id (roster order)
    index_to_id: Vec<ParticipantId>,

    /// Eligible successors per vertex, in roster order
    successors: Vec<Vec<usize>>,

    semantics: ExclusionSemantics,
}

impl ExclusionGraph {
    /// Build the eligibility graph for the roster's current exclusions
    pub fn build(roster: &Roster, semantics: ExclusionSemantics) -> Self {
        let index_to_id: Vec<ParticipantId> = roster.ids().cloned().collect();
        let id_to_index = index_to_id
            .iter()
            .enumerate()
            .map(|(idx, id)| (id.clone(), idx))
            .collect();

        let successors = index_to_id
            .iter()
            .map(|giver| {
                index_to_id
                    .iter()
                    .enumerate()
                    .filter(|(_, receiver)| {
                        !roster.blocks(giver.as_str(), receiver.as_str(), semantics)
                    })
                    .map(|(idx, _)| idx)
                    .collect()
            })
            .collect();

        Self {
            id_to_index,
            index_to_id,
            successors,
            semantics,
        }
    }

    pub fn participant_count(&self) -> usize {
        self.index_to_id.len()
    }

    pub fn edge_count(&self) -> usize {
        self.successors.iter().map(Vec::len).sum()
    }

    pub fn semantics(&self) -> ExclusionSemantics {
        self.semantics
    }

    /// Check if `giver → receiver` is an eligible edge
    pub fn has_edge(&self, giver: &str, receiver: &str) -> bool {
        match (self.id_to_index.get(giver), self.id_to_index.get(receiver)) {
            (Some(&g), Some(&r)) => self.successors[g].contains(&r),
            _ => false,
        }
    }

    /// Eligible receivers for `giver`, in roster order
    pub fn successors(&self, giver: &str) -> Vec<&ParticipantId> {
        self.id_to_index
            .get(giver)
            .map(|&g| {
                self.successors[g]
                    .iter()
                    .map(|&r| &self.index_to_id[r])
                    .collect()
            })
            .unwrap_or_default()
    }

    /// True if `cycle` covers this graph and every pair is an edge
    pub fn admits(&self, cycle: &Cycle) -> bool {
        cycle.len() == self.participant_count()
            && cycle
                .pairs()
                .all(|(giver, receiver)| self.has_edge(giver.as_str(), receiver.as_str()))
    }

    /// Find one random Hamiltonian cycle, searching exhaustively
    pub fn random_cycle<R: RandomSource>(&self, rng: &mut R) -> Result<Cycle, NoCycleFound> {
        match self.random_cycle_within(rng, None) {
            Ok(cycle) => Ok(cycle),
            Err(SearchError::NoCycle(err)) => Err(err),
            // Unreachable without a budget; report as exhausted from nowhere.
            Err(SearchError::BudgetExhausted { .. }) => Err(NoCycleFound {
                start: None,
                dead_end: None,
            }),
        }
    }

    /// Find one random Hamiltonian cycle, giving up after `max_steps`
    /// vertex expansions when a budget is set
    pub fn random_cycle_within<R: RandomSource>(
        &self,
        rng: &mut R,
        max_steps: Option<u64>,
    ) -> Result<Cycle, SearchError> {
        let n = self.participant_count();
        if n == 0 {
            return Err(NoCycleFound {
                start: None,
                dead_end: None,
            }
            .into());
        }

        let start = rng.below(n);
        let mut search = Search {
            graph: self,
            rng,
            path: Vec::with_capacity(n),
            visited: vec![false; n],
            steps: 0,
            max_steps,
            last_dead_end: None,
        };
        search.path.push(start);
        search.visited[start] = true;

        let probe = search.extend();
        let steps = search.steps;
        tracing::debug!(participants = n, steps, outcome = ?probe, "cycle search finished");

        match probe {
            Probe::Closed => {
                let order = search
                    .path
                    .iter()
                    .map(|&idx| self.index_to_id[idx].clone())
                    .collect();
                Cycle::from_order(order).ok_or_else(|| {
                    NoCycleFound {
                        start: Some(self.index_to_id[start].clone()),
                        dead_end: None,
                    }
                    .into()
                })
            }
            Probe::DeadEnd => Err(NoCycleFound {
                start: Some(self.index_to_id[start].clone()),
                dead_end: search.last_dead_end.map(|idx| self.index_to_id[idx].clone()),
            }
            .into()),
            Probe::OutOfBudget => Err(SearchError::BudgetExhausted { steps }),
        }
    }
}

// ============================================================================
// Backtracking Search
// ============================================================================

/// Outcome of extending the current path by one vertex
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Probe {
    /// Path covers every vertex and closes back to the start
    Closed,
    /// Nothing reachable from here completes a cycle; caller tries its next candidate
    DeadEnd,
    /// Step budget exhausted; abandon the whole search
    OutOfBudget,
}

struct Search<'g, R> {
    graph: &'g ExclusionGraph,
    rng: &'g mut R,
    /// Vertex indices from the start; never empty during a search
    path: Vec<usize>,
    visited: Vec<bool>,
    steps: u64,
    max_steps: Option<u64>,
    last_dead_end: Option<usize>,
}

impl<R: RandomSource> Search<'_, R> {
    fn extend(&mut self) -> Probe {
        self.steps += 1;
        if self.max_steps.is_some_and(|max| self.steps > max) {
            return Probe::OutOfBudget;
        }

        let graph = self.graph;
        let current = self.path[self.path.len() - 1];
        let successors = &graph.successors[current];

        if self.path.len() == graph.participant_count() {
            if successors.contains(&self.path[0]) {
                return Probe::Closed;
            }
            self.last_dead_end = Some(current);
            return Probe::DeadEnd;
        }

        let mut candidates = successors.clone();
        self.rng.shuffle(&mut candidates);

        for next in candidates {
            if self.visited[next] {
                continue;
            }

            self.path.push(next);
            self.visited[next] = true;

            match self.extend() {
                Probe::DeadEnd => {
                    self.path.pop();
                    self.visited[next] = false;
                }
                other => return other,
            }
        }

        self.last_dead_end = Some(current);
        Probe::DeadEnd
    }
}
