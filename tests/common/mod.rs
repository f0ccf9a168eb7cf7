#![allow(dead_code)]

use fnv::FnvHashMap;
use lane_sentinel::*;
use std::cell::Cell;
use std::rc::Rc;

/// An `ArenaBoard` whose paths and turret coverage can be scripted.
///
/// The path terminal is shared between clones, so a scripted block shows up
/// on the predicted board the session keeps as well as on the live one.
#[derive(Clone)]
pub struct ScriptedBoard {
    pub inner: ArenaBoard,
    pub terminal: Rc<Cell<Option<Location>>>,
    pub coverage: FnvHashMap<Location, Vec<Location>>,
}

impl ScriptedBoard {
    pub fn new() -> Self {
        ScriptedBoard {
            inner: ArenaBoard::new(UnitCatalog::default()),
            terminal: Rc::new(Cell::new(None)),
            coverage: FnvHashMap::default(),
        }
    }

    /// Every path from now on ends at `terminal`.
    pub fn end_paths_at(&self, terminal: [u8; 2]) {
        self.terminal.set(Some(terminal.into()));
    }

    /// An enemy turret at `turret` hits exactly `points`.
    pub fn cover(&mut self, turret: [u8; 2], points: &[[u8; 2]]) {
        for &point in points {
            self.coverage.entry(point.into()).or_default().push(turret.into());
        }
    }
}

impl Board for ScriptedBoard {
    fn turn_number(&self) -> u32 {
        self.inner.turn_number()
    }

    fn resource(&self, kind: ResourceKind, owner: Owner) -> f64 {
        self.inner.resource(kind, owner)
    }

    fn path_to_edge(&self, start: Location) -> Vec<Location> {
        match self.terminal.get() {
            Some(terminal) => vec![start, terminal],
            None => self.inner.path_to_edge(start),
        }
    }

    fn attackers_of(&self, location: Location, defender: Owner) -> Vec<Location> {
        if defender != Owner::Player {
            return Vec::new();
        }
        self.coverage.get(&location).cloned().unwrap_or_default()
    }

    fn stationary_unit_at(&self, location: Location) -> Option<StationaryUnit> {
        self.inner.stationary_unit_at(location)
    }

    fn place_structure(&mut self, location: Location, unit: StationaryUnit) -> bool {
        self.inner.place_structure(location, unit)
    }
}

pub fn fund(board: &mut ArenaBoard, turn: u32, structure: f64, mobile: f64) {
    board.set_turn(turn);
    board.set_resource(ResourceKind::Structure, Owner::Player, structure);
    board.set_resource(ResourceKind::Mobile, Owner::Player, mobile);
}

pub fn frame(turn: u32, breaches: &str, spawns: &str) -> String {
    format!(
        r#"{{"turnInfo":[1,{},0,0],"events":{{"breach":[{}],"spawn":[{}]}}}}"#,
        turn, breaches, spawns
    )
}

pub fn loc(x: u32, y: u32) -> Location {
    Location::from_coords(x, y)
}
