use crate::constants::*;
use serde::*;
use std::fmt;

#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, PartialOrd, Ord)]
#[repr(transparent)]
pub struct Location {
    packed: u16,
}

impl Location {
    pub fn from_coords(x: u32, y: u32) -> Self {
        Location {
            packed: ((x << 8) | y) as u16,
        }
    }

    /// Signed constructor for neighbour arithmetic. Returns `None` for
    /// negative or out-of-grid coordinates (diamond bounds are checked by
    /// [`crate::arena::in_arena_bounds`]).
    pub fn checked(x: i32, y: i32) -> Option<Self> {
        let size = ARENA_SIZE as i32;
        if (0..size).contains(&x) && (0..size).contains(&y) {
            Some(Location::from_coords(x as u32, y as u32))
        } else {
            None
        }
    }

    #[inline]
    pub fn x(self) -> u8 {
        ((self.packed >> 8) & 0xFF) as u8
    }

    #[inline]
    pub fn y(self) -> u8 {
        (self.packed & 0xFF) as u8
    }

    #[inline]
    pub fn packed_repr(self) -> u16 {
        self.packed
    }

    #[inline]
    pub fn from_packed(packed: u16) -> Self {
        Location { packed }
    }

    /// Euclidean distance, which is what structure ranges are measured in.
    pub fn distance_to(self, other: Self) -> f64 {
        let dx = self.x() as f64 - other.x() as f64;
        let dy = self.y() as f64 - other.y() as f64;

        (dx * dx + dy * dy).sqrt()
    }

    /// Which lane of the board this location belongs to.
    pub fn side(self) -> Side {
        if self.x() < HALF_ARENA {
            Side::Left
        } else {
            Side::Right
        }
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {}]", self.x(), self.y())
    }
}

impl From<[u8; 2]> for Location {
    fn from(xy: [u8; 2]) -> Self {
        Location::from_coords(xy[0] as u32, xy[1] as u32)
    }
}

/// Locations are exchanged with the engine as `[x, y]` pairs.
impl Serialize for Location {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        [self.x(), self.y()].serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for Location {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let [x, y] = <[i64; 2]>::deserialize(deserializer)?;
        let x = i32::try_from(x).map_err(de::Error::custom)?;
        let y = i32::try_from(y).map_err(de::Error::custom)?;
        Location::checked(x, y)
            .ok_or_else(|| de::Error::custom(format!("location [{}, {}] is off the grid", x, y)))
    }
}

/// Build a list of locations from literal coordinate pairs.
pub fn locations(coords: &[[u8; 2]]) -> Vec<Location> {
    coords.iter().map(|&xy| Location::from(xy)).collect()
}

/// Half of the board split at the vertical midline.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, Serialize, Deserialize)]
pub enum Side {
    Left,
    Right,
}

impl Side {
    pub fn opposite(self) -> Side {
        match self {
            Side::Left => Side::Right,
            Side::Right => Side::Left,
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Side::Left => write!(f, "left"),
            Side::Right => write!(f, "right"),
        }
    }
}
