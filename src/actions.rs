use crate::arena::*;
use crate::board::Board;
use crate::error::*;
use crate::location::*;
use crate::units::*;
use fnv::{FnvHashMap, FnvHashSet};
use log::*;
use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Turn actions (pure data, no engine API)
// ---------------------------------------------------------------------------

/// An action the engine wants the caller to submit.
///
/// Produced by [`ActionBatch::finish`]. The caller is responsible for
/// submitting these to the game engine in order.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum TurnAction {
    Spawn { unit: UnitType, location: Location },
    Upgrade { location: Location },
    Remove { location: Location },
}

impl TurnAction {
    pub fn location(&self) -> Location {
        match *self {
            TurnAction::Spawn { location, .. }
            | TurnAction::Upgrade { location }
            | TurnAction::Remove { location } => location,
        }
    }

    pub fn is_removal(&self) -> bool {
        matches!(self, TurnAction::Remove { .. })
    }
}

// ---------------------------------------------------------------------------
// Action batch
// ---------------------------------------------------------------------------

/// Accumulates one turn's actions against a board snapshot, tracking the
/// projected currency and occupancy as actions are added.
///
/// The `attempt_*` methods mirror the engine's behaviour: a location that
/// cannot be used (out of bounds, occupied, unaffordable) is skipped and the
/// rest of the request still goes through. The `try_*` methods report why a
/// single location was rejected.
pub struct ActionBatch<'a> {
    board: &'a dyn Board,
    catalog: &'a UnitCatalog,
    structure_budget: f64,
    mobile_budget: f64,
    built: FnvHashMap<Location, UnitType>,
    upgraded: FnvHashSet<Location>,
    removed: FnvHashSet<Location>,
    actions: Vec<TurnAction>,
    rejections: usize,
}

impl<'a> ActionBatch<'a> {
    pub fn new(board: &'a dyn Board, catalog: &'a UnitCatalog) -> Self {
        ActionBatch {
            board,
            catalog,
            structure_budget: board.resource(ResourceKind::Structure, Owner::Player),
            mobile_budget: board.resource(ResourceKind::Mobile, Owner::Player),
            built: FnvHashMap::default(),
            upgraded: FnvHashSet::default(),
            removed: FnvHashSet::default(),
            actions: Vec::new(),
            rejections: 0,
        }
    }

    pub fn board(&self) -> &'a dyn Board {
        self.board
    }

    pub fn catalog(&self) -> &'a UnitCatalog {
        self.catalog
    }

    /// Structure currency left after the actions added so far.
    pub fn structure_budget(&self) -> f64 {
        self.structure_budget
    }

    /// Mobile currency left after the actions added so far.
    pub fn mobile_budget(&self) -> f64 {
        self.mobile_budget
    }

    pub fn rejections(&self) -> usize {
        self.rejections
    }

    pub fn actions(&self) -> &[TurnAction] {
        &self.actions
    }

    /// Whether a structure will be standing at `location` once this batch
    /// is applied.
    pub fn is_occupied(&self, location: Location) -> bool {
        self.built.contains_key(&location)
            || (self.board.is_occupied(location) && !self.removed.contains(&location))
    }

    /// Type of the player's structure at `location` once this batch is
    /// applied.
    pub fn planned_unit(&self, location: Location) -> Option<UnitType> {
        self.built
            .get(&location)
            .copied()
            .or_else(|| self.own_structure(location).map(|unit| unit.unit_type))
    }

    /// The player's structure at `location` on the snapshot, unless this
    /// batch already removes it.
    fn own_structure(&self, location: Location) -> Option<StationaryUnit> {
        if self.removed.contains(&location) {
            return None;
        }
        self.board
            .stationary_unit_at(location)
            .filter(|unit| unit.owner == Owner::Player)
    }

    fn charge(&mut self, unit: UnitType, location: Location, kind: ResourceKind, needed: f64) -> Result<()> {
        let available = match kind {
            ResourceKind::Structure => self.structure_budget,
            ResourceKind::Mobile => self.mobile_budget,
        };
        if needed > available {
            return Err(StrategyError::InsufficientResource {
                unit,
                location,
                needed,
                available,
            });
        }
        match kind {
            ResourceKind::Structure => self.structure_budget -= needed,
            ResourceKind::Mobile => self.mobile_budget -= needed,
        }
        Ok(())
    }

    pub fn try_spawn(&mut self, unit: UnitType, location: Location) -> Result<()> {
        let illegal = |reason| StrategyError::IllegalPlacement {
            action: "spawn",
            location,
            reason,
        };

        if !in_arena_bounds(location) {
            return Err(illegal("outside the arena"));
        }

        if unit.is_stationary() {
            if !is_player_half(location) {
                return Err(illegal("outside the player's half"));
            }
            if self.is_occupied(location) {
                return Err(illegal("occupied"));
            }
        } else {
            if !is_on_edge(location, EdgeFlags::PLAYER) {
                return Err(illegal("not a deploy edge"));
            }
            // Removals only take effect after the turn, so a cell being
            // cleared still blocks deployment.
            if self.board.is_occupied(location) || self.built.contains_key(&location) {
                return Err(illegal("occupied"));
            }
        }

        self.charge(unit, location, unit.resource(), self.catalog.cost(unit))?;

        if unit.is_stationary() {
            self.built.insert(location, unit);
        }
        self.actions.push(TurnAction::Spawn { unit, location });
        Ok(())
    }

    pub fn try_upgrade(&mut self, location: Location) -> Result<()> {
        let illegal = |reason| StrategyError::IllegalPlacement {
            action: "upgrade",
            location,
            reason,
        };

        if self.upgraded.contains(&location) {
            return Err(illegal("already upgraded this turn"));
        }

        let unit_type = match self.built.get(&location) {
            Some(unit_type) => *unit_type,
            None => match self.own_structure(location) {
                Some(unit) if unit.upgraded => return Err(illegal("already upgraded")),
                Some(unit) => unit.unit_type,
                None => return Err(illegal("no friendly structure")),
            },
        };

        self.charge(
            unit_type,
            location,
            ResourceKind::Structure,
            self.catalog.upgrade_cost(unit_type),
        )?;

        self.upgraded.insert(location);
        self.actions.push(TurnAction::Upgrade { location });
        Ok(())
    }

    pub fn try_remove(&mut self, location: Location) -> Result<()> {
        if self.own_structure(location).is_none() || self.built.contains_key(&location) {
            return Err(StrategyError::IllegalPlacement {
                action: "remove",
                location,
                reason: "no friendly structure",
            });
        }
        self.removed.insert(location);
        self.actions.push(TurnAction::Remove { location });
        Ok(())
    }

    /// Spawn `unit` at each location; returns how many were placed.
    pub fn attempt_spawn(&mut self, unit: UnitType, locations: &[Location]) -> usize {
        let mut placed = 0;
        for &location in locations {
            match self.try_spawn(unit, location) {
                Ok(()) => placed += 1,
                Err(err) => self.reject(err),
            }
        }
        placed
    }

    /// Deploy `count` mobile units on one cell; stops at the first failure.
    pub fn attempt_deploy(&mut self, unit: UnitType, location: Location, count: u32) -> u32 {
        let mut placed = 0;
        for _ in 0..count {
            match self.try_deploy(unit, location) {
                Ok(()) => placed += 1,
                Err(err) => {
                    self.reject(err);
                    break;
                }
            }
        }
        placed
    }

    /// Several mobile units may share a cell, unlike structures.
    fn try_deploy(&mut self, unit: UnitType, location: Location) -> Result<()> {
        self.try_spawn(unit, location)
    }

    pub fn attempt_upgrade(&mut self, locations: &[Location]) -> usize {
        let mut upgraded = 0;
        for &location in locations {
            match self.try_upgrade(location) {
                Ok(()) => upgraded += 1,
                Err(err) => self.reject(err),
            }
        }
        upgraded
    }

    pub fn attempt_remove(&mut self, locations: &[Location]) -> usize {
        let mut removed = 0;
        for &location in locations {
            match self.try_remove(location) {
                Ok(()) => removed += 1,
                Err(err) => self.reject(err),
            }
        }
        removed
    }

    fn reject(&mut self, err: StrategyError) {
        self.rejections += 1;
        trace!("Skipped: {}", err);
    }

    /// The ordered batch: removals first, everything else in the order it
    /// was added.
    pub fn finish(self) -> Vec<TurnAction> {
        let (mut ordered, rest): (Vec<_>, Vec<_>) =
            self.actions.into_iter().partition(|a| a.is_removal());
        ordered.extend(rest);
        ordered
    }
}
