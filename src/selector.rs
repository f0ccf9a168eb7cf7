use crate::board::Board;
use crate::error::*;
use crate::location::*;
use crate::risk::*;
use crate::units::UnitCatalog;
use log::*;
use serde::{Deserialize, Serialize};

/// A spawn point together with the risk estimated for it.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SpawnChoice {
    pub location: Location,
    pub risk: f64,
}

/// The least risky unoccupied candidate. Ties go to whichever candidate
/// comes first.
pub fn select_best_spawn(
    board: &dyn Board,
    catalog: &UnitCatalog,
    candidates: &[Location],
    window: PathWindow,
) -> Result<SpawnChoice> {
    let mut best: Option<SpawnChoice> = None;

    for &location in candidates {
        if board.is_occupied(location) {
            trace!("Spawn candidate {} is occupied", location);
            continue;
        }

        let risk = estimate_risk(board, catalog, location, window);

        if best.map(|b| risk < b.risk).unwrap_or(true) {
            best = Some(SpawnChoice { location, risk });
        }
    }

    best.ok_or(StrategyError::NoLegalSpawn {
        candidates: candidates.len(),
    })
}

/// Pick an interceptor lane: the first option whose risk stays below
/// `safe_below`, otherwise the least risky one.
pub fn select_interceptor_spawn(
    board: &dyn Board,
    catalog: &UnitCatalog,
    options: &[Location],
    window: PathWindow,
    safe_below: f64,
) -> Option<SpawnChoice> {
    let mut best: Option<SpawnChoice> = None;

    for &location in options.iter().filter(|loc| !board.is_occupied(**loc)) {
        let risk = estimate_risk(board, catalog, location, window);
        let choice = SpawnChoice { location, risk };

        if risk < safe_below {
            return Some(choice);
        }

        if best.map(|b| risk < b.risk).unwrap_or(true) {
            best = Some(choice);
        }
    }

    best
}
