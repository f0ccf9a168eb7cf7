//! Diamond arena geometry: bounds, the four edges and which edge a unit
//! walking from a given cell is heading for.

use crate::constants::*;
use crate::location::*;
use bitflags::*;
use itertools::iproduct;
use serde::{Deserialize, Serialize};

bitflags! {
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
    pub struct EdgeFlags: u8 {
        const NONE = 0;
        const TOP_RIGHT = 1;
        const TOP_LEFT = 2;
        const BOTTOM_LEFT = 4;
        const BOTTOM_RIGHT = 8;
        /// Back row of the opponent's half.
        const OPPONENT = Self::TOP_RIGHT.bits() | Self::TOP_LEFT.bits();
        /// Deploy row of the player's half.
        const PLAYER = Self::BOTTOM_LEFT.bits() | Self::BOTTOM_RIGHT.bits();
    }
}

#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, Serialize, Deserialize)]
pub enum Edge {
    TopRight,
    TopLeft,
    BottomLeft,
    BottomRight,
}

impl Edge {
    pub const ALL: [Edge; 4] = [
        Edge::TopRight,
        Edge::TopLeft,
        Edge::BottomLeft,
        Edge::BottomRight,
    ];

    pub fn flag(self) -> EdgeFlags {
        match self {
            Edge::TopRight => EdgeFlags::TOP_RIGHT,
            Edge::TopLeft => EdgeFlags::TOP_LEFT,
            Edge::BottomLeft => EdgeFlags::BOTTOM_LEFT,
            Edge::BottomRight => EdgeFlags::BOTTOM_RIGHT,
        }
    }

    /// Cell `i` (0..14) along this edge, in engine enumeration order.
    fn cell(self, i: u8) -> Location {
        let (x, y) = match self {
            Edge::TopRight => (HALF_ARENA + i, ARENA_SIZE - 1 - i),
            Edge::TopLeft => (HALF_ARENA - 1 - i, ARENA_SIZE - 1 - i),
            Edge::BottomLeft => (HALF_ARENA - 1 - i, i),
            Edge::BottomRight => (HALF_ARENA + i, i),
        };
        Location::from_coords(x as u32, y as u32)
    }
}

pub fn in_arena_bounds(loc: Location) -> bool {
    let (x, y) = (loc.x(), loc.y());
    if x >= ARENA_SIZE || y >= ARENA_SIZE {
        return false;
    }
    let row = if y < HALF_ARENA { y + 1 } else { ARENA_SIZE - y };
    let start = HALF_ARENA - row;
    let end = start + 2 * row - 1;

    (start..=end).contains(&x)
}

/// The player deploys and builds on the bottom half.
pub fn is_player_half(loc: Location) -> bool {
    loc.y() < HALF_ARENA
}

/// Edge cells in the order the engine enumerates them.
pub fn edge_locations(edge: Edge) -> Vec<Location> {
    (0..HALF_ARENA).map(|i| edge.cell(i)).collect()
}

pub fn edge_flags(loc: Location) -> EdgeFlags {
    if !in_arena_bounds(loc) {
        return EdgeFlags::NONE;
    }
    let mut flags = EdgeFlags::NONE;
    let (x, y) = (loc.x() as i16, loc.y() as i16);
    let half = HALF_ARENA as i16;
    let last = ARENA_SIZE as i16 - 1;
    if y >= half && x >= half && x - half == last - y {
        flags |= EdgeFlags::TOP_RIGHT;
    }
    if y >= half && x < half && half - 1 - x == last - y {
        flags |= EdgeFlags::TOP_LEFT;
    }
    if y < half && x < half && half - 1 - x == y {
        flags |= EdgeFlags::BOTTOM_LEFT;
    }
    if y < half && x >= half && x - half == y {
        flags |= EdgeFlags::BOTTOM_RIGHT;
    }
    flags
}

/// True if the location lies on any of the edges in `edges`.
pub fn is_on_edge(loc: Location, edges: EdgeFlags) -> bool {
    edge_flags(loc).intersects(edges)
}

/// The edge a mobile unit starting at `start` walks toward: the one
/// diagonally opposite its starting quadrant.
pub fn target_edge(start: Location) -> Edge {
    let left = start.x() < HALF_ARENA;
    let bottom = start.y() < HALF_ARENA;
    match (left, bottom) {
        (true, true) => Edge::TopRight,
        (true, false) => Edge::BottomRight,
        (false, true) => Edge::TopLeft,
        (false, false) => Edge::BottomLeft,
    }
}

/// Deploy locations for the player's mobile units, bottom-left edge first.
pub fn friendly_edges() -> Vec<Location> {
    let mut edges = edge_locations(Edge::BottomLeft);
    edges.extend(edge_locations(Edge::BottomRight));
    edges
}

/// Every in-bounds cell, row-major from the bottom.
pub fn all_locations() -> impl Iterator<Item = Location> {
    iproduct!(0..ARENA_SIZE, 0..ARENA_SIZE)
        .map(|(y, x)| Location::from_coords(x as u32, y as u32))
        .filter(|loc| in_arena_bounds(*loc))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn diamond_has_expected_cell_count() {
        // 2 * (2 + 4 + ... + 28)
        assert_eq!(all_locations().count(), 420);
    }

    #[test]
    fn corners_of_rows() {
        assert!(in_arena_bounds(Location::from_coords(13, 0)));
        assert!(in_arena_bounds(Location::from_coords(14, 0)));
        assert!(!in_arena_bounds(Location::from_coords(12, 0)));
        assert!(in_arena_bounds(Location::from_coords(0, 13)));
        assert!(in_arena_bounds(Location::from_coords(27, 14)));
        assert!(!in_arena_bounds(Location::from_coords(0, 27)));
    }

    #[test]
    fn every_edge_cell_is_flagged_for_its_edge() {
        for edge in Edge::ALL {
            for loc in edge_locations(edge) {
                assert!(in_arena_bounds(loc), "{} off the board", loc);
                assert!(edge_flags(loc).contains(edge.flag()), "{} not on {:?}", loc, edge);
            }
        }
    }

    #[test]
    fn bottom_left_starts_at_the_centre() {
        let edge = edge_locations(Edge::BottomLeft);
        assert_eq!(edge[0], Location::from_coords(13, 0));
        assert_eq!(edge[13], Location::from_coords(0, 13));
    }

    #[test]
    fn interior_cells_are_not_edges() {
        assert_eq!(edge_flags(Location::from_coords(13, 13)), EdgeFlags::NONE);
        assert!(!is_on_edge(Location::from_coords(5, 12), EdgeFlags::OPPONENT));
    }

    #[test]
    fn targets_are_diagonally_opposite() {
        assert_eq!(target_edge(Location::from_coords(3, 10)), Edge::TopRight);
        assert_eq!(target_edge(Location::from_coords(21, 7)), Edge::TopLeft);
        assert_eq!(target_edge(Location::from_coords(3, 17)), Edge::BottomRight);
    }
}
