use super::time_slot_grid::GridCell;
use shared::{TimeSlot, Timestamp};
use std::collections::HashSet;

/// Server-confirmed free slots, looked up by exact start time
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Availability {
    starts: HashSet<Timestamp>,
}

impl Availability {
    pub fn new(slots: &[TimeSlot]) -> Self {
        Self {
            starts: slots.iter().map(|slot| slot.starts_at).collect(),
        }
    }

    pub fn is_offerable(&self, starts_at: Timestamp) -> bool {
        self.starts.contains(&starts_at)
    }

    pub fn cell_is_offerable(&self, cell: &GridCell) -> bool {
        cell.starts_at.is_some_and(|starts_at| self.is_offerable(starts_at))
    }
}
