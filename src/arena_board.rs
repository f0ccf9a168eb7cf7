//! In-memory board for offline play, benchmarking and tests.
//!
//! Pathing follows the engine's forced-movement rule closely enough for risk
//! estimation: a unit takes a shortest 4-neighbour route around structures to
//! the edge opposite its starting quadrant, preferring steps toward that edge.
//! When the edge is sealed off it walks to the deepest cell it can reach and
//! self-destructs there.

use crate::actions::TurnAction;
use crate::arena::*;
use crate::board::Board;
use crate::location::*;
use crate::units::*;
use fnv::FnvHashMap;
use itertools::Itertools;
use pathfinding::directed::bfs::{bfs, bfs_reach};

#[derive(Clone, Debug)]
pub struct ArenaBoard {
    turn: u32,
    /// Indexed by `[owner][kind]`.
    resources: [[f64; 2]; 2],
    structures: FnvHashMap<Location, StationaryUnit>,
    catalog: UnitCatalog,
}

impl ArenaBoard {
    pub fn new(catalog: UnitCatalog) -> Self {
        ArenaBoard {
            turn: 0,
            resources: [[0.0; 2]; 2],
            structures: FnvHashMap::default(),
            catalog,
        }
    }

    pub fn catalog(&self) -> &UnitCatalog {
        &self.catalog
    }

    pub fn set_turn(&mut self, turn: u32) {
        self.turn = turn;
    }

    pub fn set_resource(&mut self, kind: ResourceKind, owner: Owner, amount: f64) {
        self.resources[owner.index()][kind_index(kind)] = amount;
    }

    /// Build a fresh structure. Returns false if the cell is unusable.
    pub fn add_structure(&mut self, location: Location, unit_type: UnitType, owner: Owner) -> bool {
        let unit = self.catalog.fresh(unit_type, owner);
        self.place_structure(location, unit)
    }

    pub fn remove_structure(&mut self, location: Location) -> Option<StationaryUnit> {
        self.structures.remove(&location)
    }

    pub fn upgrade_structure(&mut self, location: Location) -> bool {
        let catalog = &self.catalog;
        match self.structures.get_mut(&location) {
            Some(unit) if !unit.upgraded => {
                unit.upgraded = true;
                unit.health = catalog.stats(unit.unit_type).upgraded_health.max(unit.health);
                true
            }
            _ => false,
        }
    }

    pub fn set_health(&mut self, location: Location, health: f64) -> bool {
        match self.structures.get_mut(&location) {
            Some(unit) => {
                unit.health = health;
                true
            }
            None => false,
        }
    }

    pub fn structure_count(&self, owner: Owner) -> usize {
        self.structures.values().filter(|u| u.owner == owner).count()
    }

    /// Apply the player's submitted actions, the way the engine would at the
    /// start of the resolution phase. Mobile spawns only spend currency.
    pub fn apply(&mut self, actions: &[TurnAction]) {
        for action in actions {
            match *action {
                TurnAction::Remove { location } => {
                    if matches!(self.structures.get(&location), Some(u) if u.owner == Owner::Player) {
                        self.structures.remove(&location);
                    }
                }
                TurnAction::Spawn { unit, location } => {
                    let cost = self.catalog.cost(unit);
                    let placed = if unit.is_stationary() {
                        self.add_structure(location, unit, Owner::Player)
                    } else {
                        true
                    };
                    if placed {
                        self.spend(unit.resource(), cost);
                    }
                }
                TurnAction::Upgrade { location } => {
                    let unit_type = self.structures.get(&location).map(|u| u.unit_type);
                    if let Some(unit_type) = unit_type {
                        if self.upgrade_structure(location) {
                            self.spend(ResourceKind::Structure, self.catalog.upgrade_cost(unit_type));
                        }
                    }
                }
            }
        }
    }

    fn spend(&mut self, kind: ResourceKind, amount: f64) {
        let pool = &mut self.resources[Owner::Player.index()][kind_index(kind)];
        *pool = (*pool - amount).max(0.0);
    }

    fn is_walkable(&self, loc: Location) -> bool {
        in_arena_bounds(loc) && !self.structures.contains_key(&loc)
    }

    fn successors(&self, loc: Location, order: &[(i32, i32); 4]) -> Vec<Location> {
        order
            .iter()
            .filter_map(|&(dx, dy)| Location::checked(loc.x() as i32 + dx, loc.y() as i32 + dy))
            .filter(|n| self.is_walkable(*n))
            .collect()
    }
}

fn kind_index(kind: ResourceKind) -> usize {
    match kind {
        ResourceKind::Structure => 0,
        ResourceKind::Mobile => 1,
    }
}

/// Neighbour order for a unit heading to `edge`: forward first, then the
/// lateral step toward the edge's corner, then away, then back.
fn step_order(edge: Edge) -> [(i32, i32); 4] {
    match edge {
        Edge::TopRight => [(0, 1), (1, 0), (-1, 0), (0, -1)],
        Edge::TopLeft => [(0, 1), (-1, 0), (1, 0), (0, -1)],
        Edge::BottomLeft => [(0, -1), (-1, 0), (1, 0), (0, 1)],
        Edge::BottomRight => [(0, -1), (1, 0), (-1, 0), (0, 1)],
    }
}

/// How far toward `edge` a cell is, for picking the self-destruct point.
fn depth_toward(edge: Edge, loc: Location) -> (i32, i32) {
    let (x, y) = (loc.x() as i32, loc.y() as i32);
    match edge {
        Edge::TopRight => (y, x),
        Edge::TopLeft => (y, -x),
        Edge::BottomLeft => (-y, -x),
        Edge::BottomRight => (-y, x),
    }
}

impl Board for ArenaBoard {
    fn turn_number(&self) -> u32 {
        self.turn
    }

    fn resource(&self, kind: ResourceKind, owner: Owner) -> f64 {
        self.resources[owner.index()][kind_index(kind)]
    }

    fn path_to_edge(&self, start: Location) -> Vec<Location> {
        if !self.is_walkable(start) {
            return vec![start];
        }

        let edge = target_edge(start);
        let order = step_order(edge);
        let goal = edge.flag();

        if let Some(path) = bfs(
            &start,
            |loc| self.successors(*loc, &order),
            |loc| edge_flags(*loc).contains(goal),
        ) {
            return path;
        }

        // Edge unreachable: walk to the deepest reachable cell.
        let deepest = bfs_reach(start, |loc| self.successors(*loc, &order))
            .max_by_key(|loc| depth_toward(edge, *loc))
            .unwrap_or(start);

        bfs(&start, |loc| self.successors(*loc, &order), |loc| *loc == deepest)
            .unwrap_or_else(|| vec![start])
    }

    fn attackers_of(&self, location: Location, defender: Owner) -> Vec<Location> {
        let attacker = defender.opponent();
        self.structures
            .iter()
            .filter(|(_, unit)| unit.owner == attacker && unit.unit_type == UnitType::Turret)
            .filter(|(loc, unit)| loc.distance_to(location) <= self.catalog.range(unit))
            .map(|(loc, _)| *loc)
            .sorted()
            .collect()
    }

    fn stationary_unit_at(&self, location: Location) -> Option<StationaryUnit> {
        self.structures.get(&location).copied()
    }

    fn place_structure(&mut self, location: Location, unit: StationaryUnit) -> bool {
        if !in_arena_bounds(location) || self.structures.contains_key(&location) {
            return false;
        }
        self.structures.insert(location, unit);
        true
    }
}
