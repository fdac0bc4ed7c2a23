//! Domain models for the assignment planner

pub mod cycle;
pub mod event;
pub mod participant;
pub mod roster;

// Re-exports
pub use cycle::{Assignment, Cycle};
pub use event::{PlanEvent, PlanLog};
pub use participant::{Participant, ParticipantId};
pub use roster::{ExclusionSemantics, Roster, RosterError};
