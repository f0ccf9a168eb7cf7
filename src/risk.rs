//! Path risk: how much turret fire a mobile unit soaks up on its way across.

use crate::board::Board;
use crate::constants::*;
use crate::location::*;
use crate::units::*;
use serde::{Deserialize, Serialize};

/// Which part of a forced path counts toward its risk.
///
/// The path is cut to its first `cap` points (when set) and then the first
/// `skip` points are dropped.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PathWindow {
    #[serde(default)]
    pub skip: usize,
    #[serde(default)]
    pub cap: Option<usize>,
}

impl PathWindow {
    /// Every point on the path.
    pub const WHOLE: PathWindow = PathWindow { skip: 0, cap: None };

    /// A full wave ignores the opening stretch near its own edge.
    pub fn full_wave() -> Self {
        PathWindow {
            skip: FULL_WAVE_SKIP_PREFIX,
            cap: None,
        }
    }

    /// Interceptors only matter for the first few steps.
    pub fn interceptor() -> Self {
        PathWindow {
            skip: 0,
            cap: Some(INTERCEPTOR_PATH_CAP),
        }
    }

    pub fn apply<'p>(&self, path: &'p [Location]) -> impl Iterator<Item = &'p Location> {
        path.iter().take(self.cap.unwrap_or(usize::MAX)).skip(self.skip)
    }
}

impl Default for PathWindow {
    fn default() -> Self {
        PathWindow::full_wave()
    }
}

/// Expected damage a unit spawned at `spawn` takes along the windowed part
/// of its forced path: every enemy turret able to hit a point deals one
/// shot of turret damage there.
///
/// `spawn` must not hold a structure; callers filter occupied candidates.
pub fn estimate_risk(board: &dyn Board, catalog: &UnitCatalog, spawn: Location, window: PathWindow) -> f64 {
    let damage = catalog.stats(UnitType::Turret).damage;
    let path = board.path_to_edge(spawn);

    window
        .apply(&path)
        .map(|point| board.attackers_of(*point, Owner::Player).len() as f64 * damage)
        .sum()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::arena_board::ArenaBoard;

    #[test]
    fn window_caps_before_skipping() {
        let path = locations(&[[0, 0], [1, 0], [2, 0], [3, 0], [4, 0]]);
        let window = PathWindow {
            skip: 1,
            cap: Some(3),
        };
        let kept: Vec<_> = window.apply(&path).copied().collect();
        assert_eq!(kept, locations(&[[1, 0], [2, 0]]));
    }

    #[test]
    fn empty_board_has_no_risk() {
        let board = ArenaBoard::new(UnitCatalog::default());
        let catalog = UnitCatalog::default();
        for spawn in crate::arena::friendly_edges() {
            assert_eq!(estimate_risk(&board, &catalog, spawn, PathWindow::WHOLE), 0.0);
        }
    }

    #[test]
    fn risk_grows_with_turrets_on_the_path() {
        let mut board = ArenaBoard::new(UnitCatalog::default());
        let catalog = UnitCatalog::default();
        let spawn = Location::from_coords(13, 0);

        let before = estimate_risk(&board, &catalog, spawn, PathWindow::WHOLE);
        // Any path starts at the spawn, which this turret covers.
        board.add_structure(Location::from_coords(14, 1), UnitType::Turret, Owner::Opponent);
        let one = estimate_risk(&board, &catalog, spawn, PathWindow::WHOLE);
        board.add_structure(Location::from_coords(12, 1), UnitType::Turret, Owner::Opponent);
        let two = estimate_risk(&board, &catalog, spawn, PathWindow::WHOLE);

        assert_eq!(before, 0.0);
        assert!(one >= TURRET_DAMAGE);
        assert!(two >= one + TURRET_DAMAGE);
        // The skipped opening stretch hides both.
        assert_eq!(estimate_risk(&board, &catalog, spawn, PathWindow::full_wave()), 0.0);
    }
}
