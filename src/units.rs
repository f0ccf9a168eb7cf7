use crate::constants::*;
use serde::{Deserialize, Serialize};

#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, Ord, PartialOrd, Serialize, Deserialize)]
pub enum UnitType {
    Wall,
    Support,
    Turret,
    Scout,
    Demolisher,
    Interceptor,
}

impl UnitType {
    pub const ALL: [UnitType; 6] = [
        UnitType::Wall,
        UnitType::Support,
        UnitType::Turret,
        UnitType::Scout,
        UnitType::Demolisher,
        UnitType::Interceptor,
    ];

    /// Decode the engine's unit type index. Indices past the six unit kinds
    /// (removal and upgrade markers among them) have no unit type.
    pub fn from_index(index: u64) -> Option<UnitType> {
        match index {
            0 => Some(UnitType::Wall),
            1 => Some(UnitType::Support),
            2 => Some(UnitType::Turret),
            3 => Some(UnitType::Scout),
            4 => Some(UnitType::Demolisher),
            5 => Some(UnitType::Interceptor),
            _ => None,
        }
    }

    pub fn is_stationary(self) -> bool {
        matches!(self, UnitType::Wall | UnitType::Support | UnitType::Turret)
    }

    /// Which currency pool pays for this unit.
    pub fn resource(self) -> ResourceKind {
        if self.is_stationary() {
            ResourceKind::Structure
        } else {
            ResourceKind::Mobile
        }
    }
}

#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, Serialize, Deserialize)]
pub enum ResourceKind {
    Structure,
    Mobile,
}

#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, Serialize, Deserialize)]
pub enum Owner {
    Player,
    Opponent,
}

impl Owner {
    /// Frame data numbers players 1 (self) and 2 (opponent).
    pub fn from_frame_index(index: u64) -> Option<Owner> {
        match index {
            1 => Some(Owner::Player),
            2 => Some(Owner::Opponent),
            _ => None,
        }
    }

    pub fn opponent(self) -> Owner {
        match self {
            Owner::Player => Owner::Opponent,
            Owner::Opponent => Owner::Player,
        }
    }

    pub fn index(self) -> usize {
        match self {
            Owner::Player => 0,
            Owner::Opponent => 1,
        }
    }
}

/// A structure standing on the board.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct StationaryUnit {
    pub unit_type: UnitType,
    pub owner: Owner,
    pub health: f64,
    pub upgraded: bool,
    /// Turns until the structure is removed, when removal is pending.
    #[serde(default)]
    pub expires_in: Option<u32>,
}

impl StationaryUnit {
    pub fn new(unit_type: UnitType, owner: Owner, health: f64) -> Self {
        StationaryUnit {
            unit_type,
            owner,
            health,
            upgraded: false,
            expires_in: None,
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct UnitStats {
    pub cost: f64,
    #[serde(default)]
    pub upgrade_cost: f64,
    #[serde(default)]
    pub damage: f64,
    #[serde(default)]
    pub range: f64,
    #[serde(default)]
    pub upgraded_range: f64,
    pub health: f64,
    #[serde(default)]
    pub upgraded_health: f64,
}

/// Costs and combat numbers for every unit kind.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct UnitCatalog {
    pub wall: UnitStats,
    pub support: UnitStats,
    pub turret: UnitStats,
    pub scout: UnitStats,
    pub demolisher: UnitStats,
    pub interceptor: UnitStats,
}

impl UnitCatalog {
    pub fn stats(&self, unit_type: UnitType) -> &UnitStats {
        match unit_type {
            UnitType::Wall => &self.wall,
            UnitType::Support => &self.support,
            UnitType::Turret => &self.turret,
            UnitType::Scout => &self.scout,
            UnitType::Demolisher => &self.demolisher,
            UnitType::Interceptor => &self.interceptor,
        }
    }

    pub fn cost(&self, unit_type: UnitType) -> f64 {
        self.stats(unit_type).cost
    }

    pub fn upgrade_cost(&self, unit_type: UnitType) -> f64 {
        self.stats(unit_type).upgrade_cost
    }

    /// Reach of a structure, which grows once it is upgraded.
    pub fn range(&self, unit: &StationaryUnit) -> f64 {
        let stats = self.stats(unit.unit_type);
        if unit.upgraded {
            stats.upgraded_range.max(stats.range)
        } else {
            stats.range
        }
    }

    /// A freshly built unit of the given kind.
    pub fn fresh(&self, unit_type: UnitType, owner: Owner) -> StationaryUnit {
        StationaryUnit::new(unit_type, owner, self.stats(unit_type).health)
    }
}

impl Default for UnitCatalog {
    fn default() -> Self {
        UnitCatalog {
            wall: UnitStats {
                cost: WALL_COST,
                upgrade_cost: WALL_UPGRADE_COST,
                damage: 0.0,
                range: 0.0,
                upgraded_range: 0.0,
                health: WALL_HEALTH,
                upgraded_health: WALL_UPGRADED_HEALTH,
            },
            support: UnitStats {
                cost: SUPPORT_COST,
                upgrade_cost: SUPPORT_UPGRADE_COST,
                damage: 0.0,
                range: 0.0,
                upgraded_range: 0.0,
                health: SUPPORT_HEALTH,
                upgraded_health: SUPPORT_HEALTH,
            },
            turret: UnitStats {
                cost: TURRET_COST,
                upgrade_cost: TURRET_UPGRADE_COST,
                damage: TURRET_DAMAGE,
                range: TURRET_RANGE,
                upgraded_range: TURRET_UPGRADED_RANGE,
                health: TURRET_HEALTH,
                upgraded_health: TURRET_HEALTH,
            },
            scout: UnitStats {
                cost: SCOUT_COST,
                upgrade_cost: 0.0,
                damage: SCOUT_DAMAGE,
                range: 0.0,
                upgraded_range: 0.0,
                health: SCOUT_HEALTH,
                upgraded_health: SCOUT_HEALTH,
            },
            demolisher: UnitStats {
                cost: DEMOLISHER_COST,
                upgrade_cost: 0.0,
                damage: DEMOLISHER_DAMAGE,
                range: 0.0,
                upgraded_range: 0.0,
                health: DEMOLISHER_HEALTH,
                upgraded_health: DEMOLISHER_HEALTH,
            },
            interceptor: UnitStats {
                cost: INTERCEPTOR_COST,
                upgrade_cost: 0.0,
                damage: INTERCEPTOR_DAMAGE,
                range: 0.0,
                upgraded_range: 0.0,
                health: INTERCEPTOR_HEALTH,
                upgraded_health: INTERCEPTOR_HEALTH,
            },
        }
    }
}
