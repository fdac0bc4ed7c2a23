//! Assignment cycle
//!
//! A cycle is an ordering of every participant where each person gives to
//! the next one and the last gives to the first:
//!
//! ```text
//! order = [A, B, C]   =>   A → B, B → C, C → A
//! ```

use crate::models::participant::ParticipantId;
use crate::models::roster::{ExclusionSemantics, Roster};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

/// One giver → receiver pairing
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Assignment {
    pub giver: ParticipantId,
    pub receiver: ParticipantId,
}

/// Ordered gift-giving cycle over all participants
///
/// # Example
/// ```
/// use secret_santa_core::{Cycle, ParticipantId};
///
/// let cycle = Cycle::from_order(vec!["a".into(), "b".into(), "c".into()]).unwrap();
/// assert_eq!(cycle.receiver_for("c").map(ParticipantId::as_str), Some("a"));
/// assert_eq!(cycle.giver_for("b").map(ParticipantId::as_str), Some("a"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Cycle {
    order: Vec<ParticipantId>,
}

impl Cycle {
    /// Wrap an ordering as a cycle
    ///
    /// Returns `None` for fewer than two ids or when an id repeats.
    pub fn from_order(order: Vec<ParticipantId>) -> Option<Self> {
        if order.len() < 2 {
            return None;
        }
        let distinct: BTreeSet<&ParticipantId> = order.iter().collect();
        if distinct.len() != order.len() {
            return None;
        }
        Some(Self { order })
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    /// A cycle is never empty
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Participant ids in cycle order
    pub fn ids(&self) -> &[ParticipantId] {
        &self.order
    }

    pub fn into_order(self) -> Vec<ParticipantId> {
        self.order
    }

    /// Giver → receiver pairs in cycle order, including the wraparound pair
    pub fn pairs(&self) -> impl Iterator<Item = (&ParticipantId, &ParticipantId)> + '_ {
        let n = self.order.len();
        (0..n).map(move |i| (&self.order[i], &self.order[(i + 1) % n]))
    }

    /// Owned pairs, for records and notifications
    pub fn assignment_list(&self) -> Vec<Assignment> {
        self.pairs()
            .map(|(giver, receiver)| Assignment {
                giver: giver.clone(),
                receiver: receiver.clone(),
            })
            .collect()
    }

    /// Giver → receiver lookup table
    pub fn assignments(&self) -> BTreeMap<ParticipantId, ParticipantId> {
        self.pairs()
            .map(|(giver, receiver)| (giver.clone(), receiver.clone()))
            .collect()
    }

    /// Who `giver` buys a gift for
    pub fn receiver_for(&self, giver: &str) -> Option<&ParticipantId> {
        let pos = self.order.iter().position(|id| id.as_str() == giver)?;
        Some(&self.order[(pos + 1) % self.order.len()])
    }

    /// Who buys a gift for `receiver`
    pub fn giver_for(&self, receiver: &str) -> Option<&ParticipantId> {
        let n = self.order.len();
        let pos = self.order.iter().position(|id| id.as_str() == receiver)?;
        Some(&self.order[(pos + n - 1) % n])
    }

    /// True if the cycle visits every roster participant exactly once
    pub fn covers(&self, roster: &Roster) -> bool {
        self.order.len() == roster.len() && self.order.iter().all(|id| roster.contains(id.as_str()))
    }

    /// True if no pair in the cycle is blocked by the roster's exclusions
    pub fn respects(&self, roster: &Roster, semantics: ExclusionSemantics) -> bool {
        self.pairs()
            .all(|(giver, receiver)| !roster.blocks(giver.as_str(), receiver.as_str(), semantics))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ids(names: &[&str]) -> Vec<ParticipantId> {
        names.iter().map(|n| ParticipantId::new(*n)).collect()
    }

    #[test]
    fn test_rejects_short_or_repeating_orders() {
        assert!(Cycle::from_order(Vec::new()).is_none());
        assert!(Cycle::from_order(ids(&["a"])).is_none());
        assert!(Cycle::from_order(ids(&["a", "a"])).is_none());
    }

    #[test]
    fn test_pairs_wrap_around() {
        let cycle = Cycle::from_order(ids(&["a", "b", "c"])).unwrap();
        let pairs: Vec<(&str, &str)> = cycle
            .pairs()
            .map(|(g, r)| (g.as_str(), r.as_str()))
            .collect();
        assert_eq!(pairs, vec![("a", "b"), ("b", "c"), ("c", "a")]);
    }

    #[test]
    fn test_two_cycle_gives_both_ways() {
        let cycle = Cycle::from_order(ids(&["a", "b"])).unwrap();
        let map = cycle.assignments();
        assert_eq!(map[&ParticipantId::new("a")].as_str(), "b");
        assert_eq!(map[&ParticipantId::new("b")].as_str(), "a");
    }

    #[test]
    fn test_lookup_unknown() {
        let cycle = Cycle::from_order(ids(&["a", "b"])).unwrap();
        assert!(cycle.receiver_for("z").is_none());
        assert!(cycle.giver_for("z").is_none());
    }

    #[test]
    fn test_smallest_cycle_is_not_empty() {
        let cycle = Cycle::from_order(ids(&["a", "b"])).unwrap();
        assert_eq!(cycle.len(), 2);
        assert!(!cycle.is_empty());
        assert!(Cycle::from_order(Vec::new()).is_none());
    }
}
