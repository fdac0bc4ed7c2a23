//! Roster - the validated participant set for one planning run
//!
//! The surrounding application resolves its stored records into
//! [`Participant`] values (already filtered to people who signed up) and
//! hands them over as a roster.
//!
//! # Critical Invariants
//!
//! 1. **Unique ids**: every participant id appears exactly once
//! 2. **Closed references**: every exclusion names a participant in the roster
//! 3. **No self-exclusion**: nobody excludes themself
//!
//! Construction fails fast on any violation rather than letting the graph
//! quietly collapse or ignore bad entries.

use crate::models::participant::{Participant, ParticipantId};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use thiserror::Error;

/// Errors raised while validating roster input
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RosterError {
    #[error("Duplicate participant id: {0}")]
    DuplicateParticipant(ParticipantId),

    #[error("Participant {participant} excludes unknown participant {excluded}")]
    UnknownExclusion {
        participant: ParticipantId,
        excluded: ParticipantId,
    },

    #[error("Participant {0} excludes themself")]
    SelfExclusion(ParticipantId),
}

/// How a recorded exclusion blocks cycle edges
///
/// - `Symmetric`: A excluding B blocks both A→B and B→A
/// - `Directional`: A excluding B only blocks A→B (A never gives to B)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExclusionSemantics {
    #[default]
    Symmetric,
    Directional,
}

/// Validated, ordered collection of participants
///
/// Input order is preserved; lookups go through a sorted id index.
///
/// # Example
/// ```
/// use secret_santa_core::{ExclusionSemantics, Participant, Roster};
///
/// let roster = Roster::new(vec![
///     Participant::new("alice").with_exclusions(["bob"]),
///     Participant::new("bob"),
///     Participant::new("carol"),
/// ])
/// .unwrap();
///
/// assert_eq!(roster.len(), 3);
/// assert_eq!(roster.total_exclusions(), 1);
/// assert!(roster.blocks("bob", "alice", ExclusionSemantics::Symmetric));
/// assert!(!roster.blocks("bob", "alice", ExclusionSemantics::Directional));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Roster {
    participants: Vec<Participant>,

    #[serde(skip)]
    index: BTreeMap<ParticipantId, usize>,
}

impl Roster {
    /// Validate participants and build a roster
    pub fn new(participants: Vec<Participant>) -> Result<Self, RosterError> {
        let mut index = BTreeMap::new();
        for (idx, participant) in participants.iter().enumerate() {
            if index.insert(participant.id().clone(), idx).is_some() {
                return Err(RosterError::DuplicateParticipant(participant.id().clone()));
            }
        }

        for participant in &participants {
            for excluded in participant.exclusions() {
                if excluded == participant.id() {
                    return Err(RosterError::SelfExclusion(participant.id().clone()));
                }
                if !index.contains_key(excluded) {
                    return Err(RosterError::UnknownExclusion {
                        participant: participant.id().clone(),
                        excluded: excluded.clone(),
                    });
                }
            }
        }

        Ok(Self {
            participants,
            index,
        })
    }

    /// Build a roster from `(id, exclusions)` pairs
    ///
    /// # Example
    /// ```
    /// use secret_santa_core::Roster;
    ///
    /// let roster = Roster::from_entries([
    ///     ("alice", vec!["bob"]),
    ///     ("bob", vec![]),
    /// ])
    /// .unwrap();
    /// assert!(roster.contains("alice"));
    /// ```
    pub fn from_entries<I, S, E, X>(entries: I) -> Result<Self, RosterError>
    where
        I: IntoIterator<Item = (S, E)>,
        S: Into<ParticipantId>,
        E: IntoIterator<Item = X>,
        X: Into<ParticipantId>,
    {
        let participants = entries
            .into_iter()
            .map(|(id, exclusions)| Participant::new(id).with_exclusions(exclusions))
            .collect();
        Self::new(participants)
    }

    pub fn len(&self) -> usize {
        self.participants.len()
    }

    pub fn is_empty(&self) -> bool {
        self.participants.is_empty()
    }

    /// Participants in input order
    pub fn participants(&self) -> &[Participant] {
        &self.participants
    }

    /// Participant ids in input order
    pub fn ids(&self) -> impl Iterator<Item = &ParticipantId> + '_ {
        self.participants.iter().map(Participant::id)
    }

    pub fn get(&self, id: &str) -> Option<&Participant> {
        self.index.get(id).map(|&idx| &self.participants[idx])
    }

    pub fn contains(&self, id: &str) -> bool {
        self.index.contains_key(id)
    }

    pub fn exclusions_of(&self, id: &str) -> Option<&BTreeSet<ParticipantId>> {
        self.get(id).map(Participant::exclusions)
    }

    /// Total number of exclusion entries across all participants
    pub fn total_exclusions(&self) -> usize {
        self.participants.iter().map(|p| p.exclusions().len()).sum()
    }

    /// True if at least one participant still has an exclusion
    pub fn has_exclusions(&self) -> bool {
        self.participants.iter().any(Participant::has_exclusions)
    }

    /// Check whether the edge `giver → receiver` is blocked
    ///
    /// Unknown ids and self-pairs are always blocked.
    pub fn blocks(&self, giver: &str, receiver: &str, semantics: ExclusionSemantics) -> bool {
        let (Some(g), Some(r)) = (self.get(giver), self.get(receiver)) else {
            return true;
        };
        if g.id() == r.id() {
            return true;
        }
        match semantics {
            ExclusionSemantics::Directional => g.excludes(receiver),
            ExclusionSemantics::Symmetric => g.excludes(receiver) || r.excludes(giver),
        }
    }

    /// Drop one exclusion entry; returns false if it was not present
    pub(crate) fn remove_exclusion(&mut self, participant: &str, excluded: &str) -> bool {
        match self.index.get(participant) {
            Some(&idx) => self.participants[idx].remove_exclusion(excluded),
            None => false,
        }
    }
}

impl<'de> Deserialize<'de> for Roster {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        #[derive(Deserialize)]
        struct RawRoster {
            participants: Vec<Participant>,
        }

        let raw = RawRoster::deserialize(deserializer)?;
        Roster::new(raw.participants).map_err(serde::de::Error::custom)
    }
}
