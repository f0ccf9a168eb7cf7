use crate::location::*;
use serde::{Deserialize, Serialize};

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BreachRecord {
    pub location: Location,
    pub turn: u32,
}

/// Every point where the opponent has scored on us this match, in order.
/// Repeat breaches at the same point are kept.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct BreachLog {
    entries: Vec<BreachRecord>,
}

impl BreachLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a breach. Turn tags never go backwards; a late report is
    /// filed under the latest turn already logged.
    pub fn record(&mut self, location: Location, turn: u32) {
        let turn = self.entries.last().map(|last| last.turn.max(turn)).unwrap_or(turn);
        self.entries.push(BreachRecord { location, turn });
    }

    pub fn entries(&self) -> &[BreachRecord] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn count_at(&self, location: Location) -> usize {
        self.entries.iter().filter(|e| e.location == location).count()
    }

    /// True if any breach landed on one of `zone`'s points.
    pub fn any_in(&self, zone: &[Location]) -> bool {
        self.entries.iter().any(|e| zone.contains(&e.location))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn repeat_breaches_are_kept() {
        let mut log = BreachLog::new();
        let corner = Location::from_coords(0, 13);
        log.record(corner, 3);
        log.record(corner, 3);

        assert_eq!(log.len(), 2);
        assert_eq!(log.count_at(corner), 2);
    }

    #[test]
    fn turns_stay_monotonic() {
        let mut log = BreachLog::new();
        log.record(Location::from_coords(0, 13), 5);
        log.record(Location::from_coords(27, 13), 2);

        assert_eq!(log.entries()[1].turn, 5);
    }

    #[test]
    fn zone_membership() {
        let mut log = BreachLog::new();
        log.record(Location::from_coords(1, 12), 0);

        assert!(log.any_in(&locations(&[[0, 13], [1, 12]])));
        assert!(!log.any_in(&locations(&[[27, 13], [26, 12]])));
    }
}
