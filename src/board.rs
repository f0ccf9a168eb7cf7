use crate::arena::{self, Edge};
use crate::location::*;
use crate::units::*;

/// Trait for providing board state to the decision engine.
/// The engine adapter implements it against the live turn state; `ArenaBoard`
/// implements it in memory for offline use and tests.
///
/// A board is a snapshot: every query answers for the state at the start of
/// the turn. Actions the engine decides on are returned as a batch, never
/// applied through this trait. The one mutation, [`Board::place_structure`],
/// exists so a cloned snapshot can be advanced hypothetically.
pub trait Board {
    fn turn_number(&self) -> u32;

    fn resource(&self, kind: ResourceKind, owner: Owner) -> f64;

    /// The path a mobile unit deployed at `start` is forced to walk given the
    /// current structure layout, starting with `start` itself. It ends on the
    /// target edge, or at the point where the unit would self-destruct when
    /// the edge cannot be reached.
    fn path_to_edge(&self, start: Location) -> Vec<Location>;

    /// Structures able to attack a unit of `defender` standing at `location`,
    /// identified by their own location.
    fn attackers_of(&self, location: Location, defender: Owner) -> Vec<Location>;

    fn stationary_unit_at(&self, location: Location) -> Option<StationaryUnit>;

    fn is_occupied(&self, location: Location) -> bool {
        self.stationary_unit_at(location).is_some()
    }

    fn edge_locations(&self, edge: Edge) -> Vec<Location> {
        arena::edge_locations(edge)
    }

    /// Put a structure on this snapshot. Returns false if the location is
    /// out of bounds or already occupied.
    fn place_structure(&mut self, location: Location, unit: StationaryUnit) -> bool;
}
