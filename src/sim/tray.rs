//! The tray: a fixed row of slots that fruits are picked into
//!
//! Occupied slots are always packed to the left. Whenever a type reaches
//! three occurrences, the first three slots holding it (in slot order) are
//! cleared and the survivors slide left.

use serde::{Deserialize, Serialize};

use super::state::FruitType;

/// Number of slots a triple removes
pub const MATCH_SIZE: usize = 3;

/// Result of [`Tray::try_add`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TryAddOutcome {
    /// No empty slot; the tray was not touched
    Rejected,
    /// Placed into `slot`. When `cleared` is set, it holds the original
    /// indices (ascending) of the three slots that were removed.
    Accepted {
        slot: usize,
        cleared: Option<[usize; MATCH_SIZE]>,
    },
}

impl TryAddOutcome {
    pub fn is_rejected(&self) -> bool {
        matches!(self, TryAddOutcome::Rejected)
    }

    pub fn cleared(&self) -> Option<[usize; MATCH_SIZE]> {
        match self {
            TryAddOutcome::Accepted { cleared, .. } => *cleared,
            TryAddOutcome::Rejected => None,
        }
    }
}

/// Fixed-capacity slot array of fruit types
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tray {
    slots: Vec<Option<FruitType>>,
}

impl Tray {
    pub fn new(capacity: usize) -> Self {
        Self {
            slots: vec![None; capacity],
        }
    }

    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    /// Occupied slot count
    pub fn len(&self) -> usize {
        self.slots.iter().filter(|s| s.is_some()).count()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.iter().all(|s| s.is_none())
    }

    pub fn is_full(&self) -> bool {
        self.slots.iter().all(|s| s.is_some())
    }

    pub fn slots(&self) -> &[Option<FruitType>] {
        &self.slots
    }

    /// How many slots currently hold `fruit_type`
    pub fn count_of(&self, fruit_type: FruitType) -> usize {
        self.slots
            .iter()
            .filter(|s| **s == Some(fruit_type))
            .count()
    }

    pub fn clear(&mut self) {
        self.slots.iter_mut().for_each(|s| *s = None);
    }

    /// Place a fruit type into the first empty slot, clearing a triple if one forms
    pub fn try_add(&mut self, fruit_type: FruitType) -> TryAddOutcome {
        let Some(slot) = self.slots.iter().position(|s| s.is_none()) else {
            return TryAddOutcome::Rejected;
        };
        self.slots[slot] = Some(fruit_type);

        if self.count_of(fruit_type) < MATCH_SIZE {
            return TryAddOutcome::Accepted {
                slot,
                cleared: None,
            };
        }

        let mut removed = [0usize; MATCH_SIZE];
        let matching = self
            .slots
            .iter()
            .enumerate()
            .filter(|(_, s)| **s == Some(fruit_type))
            .map(|(i, _)| i)
            .take(MATCH_SIZE);
        for (dst, i) in removed.iter_mut().zip(matching) {
            *dst = i;
        }

        remove_and_compact(&mut self.slots, &removed);

        TryAddOutcome::Accepted {
            slot,
            cleared: Some(removed),
        }
    }
}

/// Empty the given indices, then slide every remaining entry left so there
/// are no gaps before the first empty slot. Relative order is preserved.
///
/// Shared by the tray and anything mirroring it slot-for-slot.
pub fn remove_and_compact<T>(slots: &mut [Option<T>], removed: &[usize]) {
    for &i in removed {
        if let Some(slot) = slots.get_mut(i) {
            *slot = None;
        }
    }

    let mut write = 0;
    for read in 0..slots.len() {
        if slots[read].is_some() {
            if read != write {
                slots[write] = slots[read].take();
            }
            write += 1;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn no_gaps(slots: &[Option<FruitType>]) -> bool {
        match slots.iter().position(|s| s.is_none()) {
            Some(first_empty) => slots[first_empty..].iter().all(|s| s.is_none()),
            None => true,
        }
    }

    #[test]
    fn test_three_of_a_kind_clears() {
        let mut tray = Tray::new(7);

        assert_eq!(
            tray.try_add(4),
            TryAddOutcome::Accepted {
                slot: 0,
                cleared: None
            }
        );
        assert_eq!(
            tray.try_add(4),
            TryAddOutcome::Accepted {
                slot: 1,
                cleared: None
            }
        );
        assert_eq!(
            tray.try_add(4),
            TryAddOutcome::Accepted {
                slot: 2,
                cleared: Some([0, 1, 2])
            }
        );
        assert!(tray.is_empty());
    }

    #[test]
    fn test_clear_compacts_survivors_in_order() {
        let mut tray = Tray::new(7);
        for t in [1, 2, 1, 3] {
            tray.try_add(t);
        }

        let outcome = tray.try_add(1);
        assert_eq!(outcome.cleared(), Some([0, 2, 4]));
        assert_eq!(tray.slots()[..3], [Some(2), Some(3), None]);
        assert_eq!(tray.len(), 2);
    }

    #[test]
    fn test_full_tray_rejects_without_mutation() {
        let mut tray = Tray::new(4);
        for t in [1, 2, 3, 1] {
            tray.try_add(t);
        }
        assert!(tray.is_full());

        let before = tray.clone();
        assert!(tray.try_add(1).is_rejected());
        assert_eq!(tray, before);
    }

    #[test]
    fn test_last_slot_can_complete_a_triple() {
        let mut tray = Tray::new(3);
        tray.try_add(9);
        tray.try_add(9);
        let outcome = tray.try_add(9);
        assert_eq!(outcome.cleared(), Some([0, 1, 2]));
        assert!(tray.is_empty());
    }

    #[test]
    fn test_remove_and_compact_generic() {
        let mut slots = [Some('a'), Some('b'), Some('c'), Some('d'), None];
        remove_and_compact(&mut slots, &[0, 2]);
        assert_eq!(slots, [Some('b'), Some('d'), None, None, None]);
    }

    proptest! {
        #[test]
        fn prop_no_gaps_after_any_sequence(types in proptest::collection::vec(0u32..5, 0..40)) {
            let mut tray = Tray::new(7);
            for t in types {
                let outcome = tray.try_add(t);
                prop_assert!(no_gaps(tray.slots()));
                prop_assert!(tray.len() <= tray.capacity());
                // A type never sits in the tray three times
                prop_assert!(tray.count_of(t) < MATCH_SIZE);
                if let Some(cleared) = outcome.cleared() {
                    prop_assert!(cleared[0] < cleared[1] && cleared[1] < cleared[2]);
                }
            }
        }

        #[test]
        fn prop_same_type_three_times_clears_once(capacity in 3usize..12, t in 0u32..100) {
            let mut tray = Tray::new(capacity);
            let clears = (0..3)
                .map(|_| tray.try_add(t))
                .filter(|o| o.cleared().is_some())
                .count();
            prop_assert_eq!(clears, 1);
        }
    }
}
