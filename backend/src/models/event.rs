//! Event logging for planning runs.
//!
//! Each planning run records what happened on every attempt so a caller can
//! see exactly which constraints had to be dropped to reach an assignment.
//!
//! # Event Types
//!
//! - **SearchFailed**: cycle search exhausted every path for one attempt
//! - **ExclusionRelaxed**: one exclusion entry was dropped from the working copy
//! - **CycleFound**: the run ended with an assignment
//! - **AssignmentsNotPossible**: the run ended with nothing left to relax
//!
//! # Example
//!
//! ```rust
//! use secret_santa_core::models::PlanEvent;
//!
//! let event = PlanEvent::CycleFound { attempt: 1, length: 5 };
//! assert_eq!(event.attempt(), 1);
//! assert_eq!(event.event_type(), "CycleFound");
//! ```

use crate::models::participant::ParticipantId;
use serde::{Deserialize, Serialize};

/// Planning event capturing one step of a run.
///
/// Attempts are numbered from 1.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum PlanEvent {
    /// No cycle exists under the attempt's exclusions
    SearchFailed {
        attempt: usize,
        start: Option<ParticipantId>,
        dead_end: Option<ParticipantId>,
    },

    /// `participant` no longer excludes `excluded` for the rest of the run
    ExclusionRelaxed {
        attempt: usize,
        participant: ParticipantId,
        excluded: ParticipantId,
    },

    CycleFound { attempt: usize, length: usize },

    AssignmentsNotPossible { attempt: usize },
}

impl PlanEvent {
    pub fn attempt(&self) -> usize {
        match self {
            PlanEvent::SearchFailed { attempt, .. }
            | PlanEvent::ExclusionRelaxed { attempt, .. }
            | PlanEvent::CycleFound { attempt, .. }
            | PlanEvent::AssignmentsNotPossible { attempt } => *attempt,
        }
    }

    pub fn event_type(&self) -> &'static str {
        match self {
            PlanEvent::SearchFailed { .. } => "SearchFailed",
            PlanEvent::ExclusionRelaxed { .. } => "ExclusionRelaxed",
            PlanEvent::CycleFound { .. } => "CycleFound",
            PlanEvent::AssignmentsNotPossible { .. } => "AssignmentsNotPossible",
        }
    }
}

/// Ordered log of planning events
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PlanLog {
    events: Vec<PlanEvent>,
}

impl PlanLog {
    pub fn new() -> Self {
        Self { events: Vec::new() }
    }

    pub fn log(&mut self, event: PlanEvent) {
        self.events.push(event);
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn events(&self) -> &[PlanEvent] {
        &self.events
    }

    /// Events for a specific attempt
    pub fn events_for_attempt(&self, attempt: usize) -> Vec<&PlanEvent> {
        self.events.iter().filter(|e| e.attempt() == attempt).collect()
    }

    /// Events of a specific type
    pub fn events_of_type(&self, event_type: &str) -> Vec<&PlanEvent> {
        self.events
            .iter()
            .filter(|e| e.event_type() == event_type)
            .collect()
    }
}
