//! Predicted opponent board: this turn's live board plus every opponent
//! structure the engine reported spawning since the last prediction.

use crate::board::Board;
use crate::frames::SpawnEvent;
use crate::units::*;
use log::*;
use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReplayStats {
    pub applied: usize,
    pub skipped: usize,
    pub malformed: usize,
}

pub struct HypotheticalBoard<B> {
    board: Option<B>,
    pending: Vec<Value>,
}

impl<B> Default for HypotheticalBoard<B> {
    fn default() -> Self {
        HypotheticalBoard {
            board: None,
            pending: Vec::new(),
        }
    }
}

impl<B: Board + Clone> HypotheticalBoard<B> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the snapshot. Queued events stay queued.
    pub fn seed(&mut self, board: B) {
        self.board = Some(board);
    }

    pub fn queue(&mut self, event: Value) {
        self.pending.push(event);
    }

    pub fn pending_len(&self) -> usize {
        self.pending.len()
    }

    pub fn discard_pending(&mut self) {
        self.pending.clear();
    }

    pub fn board(&self) -> Option<&B> {
        self.board.as_ref()
    }

    /// Apply every queued event and hand back the predicted board. With no
    /// seed yet, `fallback` is used as the starting point.
    ///
    /// Nothing here fails: events that do not decode, belong to us, are not
    /// structures, or expire before next turn are skipped.
    pub fn replay(&mut self, fallback: &B, catalog: &UnitCatalog) -> (&B, ReplayStats) {
        let pending = std::mem::take(&mut self.pending);
        let board = self.board.get_or_insert_with(|| fallback.clone());
        let mut stats = ReplayStats::default();

        for raw in &pending {
            let event = match SpawnEvent::decode(raw) {
                Ok(event) => event,
                Err(err) => {
                    warn!("Skipping replay event {}: {}", raw, err);
                    stats.malformed += 1;
                    continue;
                }
            };

            let unit_type = match event.unit_type() {
                Some(unit_type) if unit_type.is_stationary() => unit_type,
                _ => {
                    trace!("Replay ignores non-structure type {} at {}", event.type_index, event.location);
                    stats.skipped += 1;
                    continue;
                }
            };

            if event.owner == Owner::Player || event.expires_in == 0 {
                stats.skipped += 1;
                continue;
            }

            let mut unit = catalog.fresh(unit_type, event.owner);
            unit.expires_in = Some(event.expires_in);

            if board.place_structure(event.location, unit) {
                stats.applied += 1;
            } else {
                trace!("Replay could not place {:?} at {}", unit_type, event.location);
                stats.skipped += 1;
            }
        }

        (&*board, stats)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::arena_board::ArenaBoard;
    use crate::location::*;
    use serde_json::json;

    #[test]
    fn replays_opponent_structures_only() {
        let real = ArenaBoard::new(UnitCatalog::default());
        let catalog = UnitCatalog::default();
        let mut hypothetical = HypotheticalBoard::new();

        hypothetical.queue(json!([[10, 16], 2, "1", 2, 3]));
        hypothetical.queue(json!([[11, 16], 0, "2", 1, 3]));
        hypothetical.queue(json!([[12, 16], 3, "3", 2, 3]));
        hypothetical.queue(json!([[13, 16], 0, "4", 2, 0]));
        hypothetical.queue(json!([[14, 16], 7, "5", 2, 3]));

        let (board, stats) = hypothetical.replay(&real, &catalog);

        assert_eq!(stats.applied, 1);
        assert_eq!(stats.skipped, 4);
        let turret = board.stationary_unit_at(Location::from_coords(10, 16)).unwrap();
        assert_eq!(turret.unit_type, UnitType::Turret);
        assert_eq!(turret.owner, Owner::Opponent);
        assert!(!board.is_occupied(Location::from_coords(11, 16)));
        assert_eq!(hypothetical.pending_len(), 0);
    }

    #[test]
    fn malformed_events_do_not_stop_replay() {
        let real = ArenaBoard::new(UnitCatalog::default());
        let catalog = UnitCatalog::default();
        let mut hypothetical = HypotheticalBoard::new();

        hypothetical.queue(json!([[10, 16], 0, "1", 2]));
        hypothetical.queue(json!("garbage"));
        hypothetical.queue(json!([[12, 16], 0, "3", 2, 2]));

        let (board, stats) = hypothetical.replay(&real, &catalog);

        assert_eq!(stats.malformed, 2);
        assert_eq!(stats.applied, 1);
        assert!(board.is_occupied(Location::from_coords(12, 16)));
    }

    #[test]
    fn seeded_board_wins_over_fallback() {
        let mut seeded = ArenaBoard::new(UnitCatalog::default());
        seeded.add_structure(Location::from_coords(5, 10), UnitType::Wall, Owner::Player);
        let real = ArenaBoard::new(UnitCatalog::default());
        let mut hypothetical = HypotheticalBoard::new();
        hypothetical.seed(seeded);

        let (board, _) = hypothetical.replay(&real, &UnitCatalog::default());
        assert!(board.is_occupied(Location::from_coords(5, 10)));
    }
}
