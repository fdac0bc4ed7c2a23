//! Participant model
//!
//! A participant is one person taking part in a gift exchange. The planner
//! only cares about two things:
//! - A stable identifier (resolved from the datastore key by the caller)
//! - The set of other participants they refuse to be paired with
//!
//! Exclusions are recorded one-sided (A excluding B says nothing about what B
//! recorded). Whether an exclusion blocks the reverse edge as well is decided
//! at graph construction time by [`crate::models::ExclusionSemantics`].

use serde::{Deserialize, Serialize};
use std::borrow::Borrow;
use std::collections::BTreeSet;
use std::fmt;

/// Opaque participant identifier
///
/// Ordered and hashable so it can key sorted maps; ordering matches the
/// underlying string so lookups by `&str` work through [`Borrow`].
///
/// # Example
/// ```
/// use secret_santa_core::ParticipantId;
///
/// let id = ParticipantId::new("alice");
/// assert_eq!(id.as_str(), "alice");
/// assert_eq!(id.to_string(), "alice");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ParticipantId(String);

impl ParticipantId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ParticipantId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl Borrow<str> for ParticipantId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl From<&str> for ParticipantId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl From<String> for ParticipantId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

/// One participant and the people they refuse to be matched with
///
/// # Example
/// ```
/// use secret_santa_core::Participant;
///
/// let alice = Participant::new("alice").with_exclusions(["bob", "carol"]);
/// assert_eq!(alice.exclusions().len(), 2);
/// assert!(alice.excludes("bob"));
/// assert!(!alice.excludes("dave"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Participant {
    /// Identity, unique within a roster
    id: ParticipantId,

    /// People this participant refuses to be paired with ("blacklist")
    #[serde(default)]
    exclusions: BTreeSet<ParticipantId>,
}

impl Participant {
    /// Create a participant with no exclusions
    pub fn new(id: impl Into<ParticipantId>) -> Self {
        Self {
            id: id.into(),
            exclusions: BTreeSet::new(),
        }
    }

    /// Builder-style helper adding exclusions
    pub fn with_exclusions<I, E>(mut self, exclusions: I) -> Self
    where
        I: IntoIterator<Item = E>,
        E: Into<ParticipantId>,
    {
        self.exclusions
            .extend(exclusions.into_iter().map(Into::into));
        self
    }

    pub fn id(&self) -> &ParticipantId {
        &self.id
    }

    pub fn exclusions(&self) -> &BTreeSet<ParticipantId> {
        &self.exclusions
    }

    /// Check whether `other` is on this participant's exclusion list
    pub fn excludes(&self, other: &str) -> bool {
        self.exclusions.contains(other)
    }

    pub fn has_exclusions(&self) -> bool {
        !self.exclusions.is_empty()
    }

    pub(crate) fn remove_exclusion(&mut self, other: &str) -> bool {
        self.exclusions.remove(other)
    }
}
