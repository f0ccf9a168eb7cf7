//! Strategy configuration: structure menus, thresholds and formations.
//!
//! One engine plays every variant; a variant is just a `StrategyConfig`.
//! Configs load from JSON and are validated before a session accepts them.

use crate::arena::*;
use crate::commitment::*;
use crate::constants::*;
use crate::error::*;
use crate::location::*;
use crate::risk::PathWindow;
use crate::units::*;
use serde::{Deserialize, Serialize};

#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RiskWindows {
    pub full_wave: PathWindow,
    pub interceptor: PathWindow,
    /// An interceptor lane below this risk is taken without looking further.
    pub interceptor_safe_below: f64,
}

impl Default for RiskWindows {
    fn default() -> Self {
        RiskWindows {
            full_wave: PathWindow::full_wave(),
            interceptor: PathWindow::interceptor(),
            interceptor_safe_below: INTERCEPTOR_SAFE_BELOW,
        }
    }
}

/// Corner that gets extra walls once the opponent scores inside its zone.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Flank {
    pub name: String,
    pub risk_zone: Vec<Location>,
    pub walls: Vec<Location>,
}

/// Turn and structure-budget gate, both inclusive.
#[derive(Copy, Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct TierGate {
    #[serde(default)]
    pub min_turn: u32,
    #[serde(default)]
    pub min_budget: f64,
}

impl TierGate {
    pub const ALWAYS: TierGate = TierGate {
        min_turn: 0,
        min_budget: 0.0,
    };

    pub fn at(min_turn: u32, min_budget: f64) -> Self {
        TierGate { min_turn, min_budget }
    }

    pub fn allows(&self, turn: u32, budget: f64) -> bool {
        turn >= self.min_turn && budget >= self.min_budget
    }
}

/// From `min_turn`, upgraded structures that dropped below `below_health`
/// are taken down to be rebuilt, and the rest get upgraded once the budget
/// covers them.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RepairRule {
    pub min_turn: u32,
    pub below_health: f64,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PlacementTier {
    pub name: String,
    pub unit: UnitType,
    pub locations: Vec<Location>,
    #[serde(default)]
    pub spawn: TierGate,
    #[serde(default)]
    pub upgrade: Option<TierGate>,
    /// Restrict upgrades to these locations instead of the whole tier.
    #[serde(default)]
    pub upgrade_locations: Option<Vec<Location>>,
    #[serde(default)]
    pub repair: Option<RepairRule>,
}

impl PlacementTier {
    pub fn new(name: &str, unit: UnitType, coords: &[[u8; 2]]) -> Self {
        PlacementTier {
            name: name.to_owned(),
            unit,
            locations: locations(coords),
            spawn: TierGate::ALWAYS,
            upgrade: None,
            upgrade_locations: None,
            repair: None,
        }
    }

    pub fn spawn_when(mut self, gate: TierGate) -> Self {
        self.spawn = gate;
        self
    }

    pub fn upgrade_when(mut self, gate: TierGate) -> Self {
        self.upgrade = Some(gate);
        self
    }

    pub fn upgrade_only(mut self, coords: &[[u8; 2]]) -> Self {
        self.upgrade_locations = Some(locations(coords));
        self
    }

    pub fn repair_from(mut self, min_turn: u32, below_health: f64) -> Self {
        self.repair = Some(RepairRule { min_turn, below_health });
        self
    }

    pub fn upgrade_targets(&self) -> &[Location] {
        self.upgrade_locations.as_deref().unwrap_or(&self.locations)
    }
}

/// Walls that close the attack lane while we are not attacking. Enough mobile
/// currency keeps the walls down; `min_turn` only gates opening the lane and
/// sending the wave.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GateConfig {
    pub locations: Vec<Location>,
    pub min_turn: u32,
    pub open_at_currency: f64,
}

impl GateConfig {
    /// Whether we can afford to attack, so the gate is not rebuilt.
    pub fn is_attacking(&self, mobile: f64) -> bool {
        mobile >= self.open_at_currency
    }

    /// Whether the lane may be opened and a wave sent this turn.
    pub fn is_open(&self, turn: u32, mobile: f64) -> bool {
        turn >= self.min_turn && self.is_attacking(mobile)
    }
}

/// Interceptors sent out to meet opponent waves.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct InterceptorDefense {
    /// Always defend before this turn.
    pub always_before_turn: u32,
    /// Before this turn, defend while the opponent holds more than
    /// `opponent_currency_above`.
    #[serde(default)]
    pub until_turn: u32,
    #[serde(default)]
    pub opponent_currency_above: f64,
    pub sizing: InterceptorSizing,
    /// Used on turn 0, and every turn when there are no lanes.
    pub opening: Vec<Location>,
    /// One interceptor group per lane, at its least risky point.
    #[serde(default)]
    pub lanes: Vec<Vec<Location>>,
}

impl InterceptorDefense {
    pub fn is_active(&self, turn: u32, opponent_mobile: f64) -> bool {
        turn < self.always_before_turn
            || (turn < self.until_turn && opponent_mobile > self.opponent_currency_above)
    }
}

/// Where the offensive wave deploys outside of a counter formation.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum SpawnPlan {
    LeastRisk,
    Fixed(Location),
}

/// A group sent ahead of the main wave to soak or clear the way.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct EscortConfig {
    pub unit: UnitType,
    pub location: Location,
    pub sizing: InterceptorSizing,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct OffenseConfig {
    pub spawn: SpawnPlan,
    /// Tried when no spawn from `spawn` is free.
    #[serde(default)]
    pub fallback_spawns: Vec<Location>,
    #[serde(default)]
    pub escort: Option<EscortConfig>,
    pub commitment: CommitmentPolicy,
}

/// Temporary funnel for one side of the board, and the deploy point the
/// wave uses while it stands.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CounterFormation {
    pub walls: Vec<Location>,
    pub chokepoint: Location,
}

fn default_release() -> Option<u32> {
    Some(2)
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CounterConfig {
    pub left: CounterFormation,
    pub right: CounterFormation,
    /// Consecutive clear probes before the formation comes down. `None`
    /// keeps it up for the rest of the match.
    #[serde(default = "default_release")]
    pub release_after_clear: Option<u32>,
}

impl CounterConfig {
    pub fn formation(&self, side: Side) -> &CounterFormation {
        match side {
            Side::Left => &self.left,
            Side::Right => &self.right,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct StrategyConfig {
    pub name: String,
    #[serde(default)]
    pub units: UnitCatalog,
    #[serde(default)]
    pub windows: RiskWindows,
    #[serde(default)]
    pub flanks: Vec<Flank>,
    #[serde(default)]
    pub gate: Option<GateConfig>,
    #[serde(default)]
    pub tiers: Vec<PlacementTier>,
    #[serde(default)]
    pub interceptors: Option<InterceptorDefense>,
    pub offense: OffenseConfig,
    #[serde(default)]
    pub counter: Option<CounterConfig>,
}

fn invalid(message: String) -> StrategyError {
    StrategyError::InvalidConfig(message)
}

fn check_structure_cells(what: &str, cells: &[Location]) -> Result<()> {
    match cells.iter().find(|loc| !in_arena_bounds(**loc) || !is_player_half(**loc)) {
        Some(loc) => Err(invalid(format!("{}: {} is not a buildable cell", what, loc))),
        None => Ok(()),
    }
}

fn check_deploy_cells(what: &str, cells: &[Location]) -> Result<()> {
    match cells.iter().find(|loc| !is_on_edge(**loc, EdgeFlags::PLAYER)) {
        Some(loc) => Err(invalid(format!("{}: {} is not on a deploy edge", what, loc))),
        None => Ok(()),
    }
}

fn check_sizing(what: &str, sizing: &InterceptorSizing) -> Result<()> {
    let counts = match sizing {
        InterceptorSizing::Fixed(n) => vec![*n],
        InterceptorSizing::Tiered(t) => vec![t.low, t.high, t.otherwise],
        InterceptorSizing::Chokepoint(c) => {
            check_deploy_cells(what, &[c.probe])?;
            vec![c.contested.small, c.contested.large, c.open.small, c.open.large]
        }
    };
    match counts.into_iter().find(|n| !(1..=MAX_ESCORTS).contains(n)) {
        Some(n) => Err(invalid(format!("{}: group size {} outside 1..={}", what, n, MAX_ESCORTS))),
        None => Ok(()),
    }
}

fn check_mobile(what: &str, unit: UnitType) -> Result<()> {
    if unit.is_stationary() {
        Err(invalid(format!("{}: {:?} cannot be deployed", what, unit)))
    } else {
        Ok(())
    }
}

impl StrategyConfig {
    pub fn from_json_str(text: &str) -> Result<Self> {
        let config: StrategyConfig = serde_json::from_str(text).map_err(StrategyError::Config)?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_json_string(&self) -> Result<String> {
        serde_json::to_string_pretty(self).map_err(StrategyError::Config)
    }

    pub fn validate(&self) -> Result<()> {
        for unit in UnitType::ALL {
            if self.units.cost(unit) <= 0.0 {
                return Err(invalid(format!("{:?} must have a positive cost", unit)));
            }
        }

        for flank in &self.flanks {
            check_structure_cells(&flank.name, &flank.walls)?;
        }

        if let Some(gate) = &self.gate {
            check_structure_cells("gate", &gate.locations)?;
        }

        for tier in &self.tiers {
            if !tier.unit.is_stationary() {
                return Err(invalid(format!("{}: {:?} is not a structure", tier.name, tier.unit)));
            }
            check_structure_cells(&tier.name, &tier.locations)?;
            check_structure_cells(&tier.name, tier.upgrade_targets())?;
        }

        if let Some(defense) = &self.interceptors {
            check_sizing("interceptors", &defense.sizing)?;
            check_deploy_cells("interceptors", &defense.opening)?;
            for lane in &defense.lanes {
                check_deploy_cells("interceptor lane", lane)?;
            }
        }

        let offense = &self.offense;
        if let SpawnPlan::Fixed(location) = offense.spawn {
            check_deploy_cells("offense", &[location])?;
        }
        check_deploy_cells("fallback spawns", &offense.fallback_spawns)?;
        check_mobile("offense", offense.commitment.primary)?;
        if let Some(fallback) = &offense.commitment.fallback {
            check_mobile("fallback", fallback.unit)?;
        }
        if offense.commitment.ratio_threshold < 0.0 {
            return Err(invalid("offense: ratio threshold is negative".to_owned()));
        }
        if let Some(escort) = &offense.escort {
            check_mobile("escort", escort.unit)?;
            check_deploy_cells("escort", &[escort.location])?;
            check_sizing("escort", &escort.sizing)?;
        }

        if let Some(counter) = &self.counter {
            for (name, formation) in [("left counter", &counter.left), ("right counter", &counter.right)] {
                check_structure_cells(name, &formation.walls)?;
                check_deploy_cells(name, &[formation.chokepoint])?;
            }
            if counter.release_after_clear == Some(0) {
                return Err(invalid("counter: release needs at least one clear probe".to_owned()));
            }
        }

        Ok(())
    }

    /// Long wall lines with a turret funnel in the middle; least-risk
    /// scouts, demolishers when the lane is too hot.
    pub fn funnel_line() -> Self {
        let mut base_walls: Vec<[u8; 2]> = (0..10).map(|x| [x, 13]).collect();
        base_walls.extend((18..28).rev().map(|x| [x, 13]));

        StrategyConfig {
            name: "funnel_line".to_owned(),
            units: UnitCatalog::default(),
            windows: RiskWindows::default(),
            flanks: vec![
                Flank {
                    name: "left flank".to_owned(),
                    risk_zone: locations(&[[0, 13], [1, 12], [2, 11], [3, 10]]),
                    walls: locations(&[[0, 13], [1, 13], [1, 12], [2, 12]]),
                },
                Flank {
                    name: "right flank".to_owned(),
                    risk_zone: locations(&[[27, 13], [26, 12], [25, 11], [24, 10]]),
                    walls: locations(&[[27, 13], [26, 13], [26, 12], [25, 12]]),
                },
            ],
            gate: None,
            tiers: vec![
                PlacementTier::new("base walls", UnitType::Wall, &base_walls)
                    .upgrade_when(TierGate::at(13, 15.1))
                    .upgrade_only(&[
                        [0, 13], [1, 13], [2, 13], [8, 13], [9, 13],
                        [27, 13], [26, 13], [25, 13], [19, 13], [18, 13],
                    ]),
                PlacementTier::new("main turrets", UnitType::Turret, &[[18, 10], [9, 10]])
                    .upgrade_when(TierGate::ALWAYS),
                PlacementTier::new("outer turrets", UnitType::Turret, &[[3, 12], [24, 12]])
                    .spawn_when(TierGate::at(2, 15.1))
                    .upgrade_when(TierGate::at(2, 15.1)),
                PlacementTier::new("inner turrets", UnitType::Turret, &[[6, 12], [21, 12]])
                    .spawn_when(TierGate::at(5, 15.1))
                    .upgrade_when(TierGate::at(5, 15.1)),
                PlacementTier::new("secondary turrets", UnitType::Turret, &[[15, 8], [12, 8]])
                    .spawn_when(TierGate::at(11, 8.1))
                    .upgrade_when(TierGate::at(31, 20.1)),
                PlacementTier::new("funnel walls", UnitType::Wall, &[[10, 10], [17, 10], [11, 9], [16, 9]]),
                PlacementTier::new("supports", UnitType::Support, &[[18, 9], [9, 9]])
                    .spawn_when(TierGate::at(10, 20.1))
                    .upgrade_when(TierGate::at(10, 20.1)),
                PlacementTier::new("rear supports", UnitType::Support, &[[17, 9], [10, 9]])
                    .spawn_when(TierGate::at(20, 20.1))
                    .upgrade_when(TierGate::at(20, 20.1)),
                PlacementTier::new(
                    "turret walls",
                    UnitType::Wall,
                    &[[10, 10], [10, 11], [9, 11], [8, 11], [17, 10], [17, 11], [18, 11], [19, 11]],
                )
                .spawn_when(TierGate::at(10, 20.1))
                .upgrade_when(TierGate::at(10, 20.1)),
            ],
            interceptors: Some(InterceptorDefense {
                always_before_turn: 2,
                until_turn: 20,
                opponent_currency_above: 10.0,
                sizing: InterceptorSizing::Tiered(TieredSizing {
                    low: 1,
                    low_below_currency: 13.0,
                    low_before_turn: 15,
                    high: 3,
                    high_after_turn: 30,
                    high_above_currency: 15.0,
                    otherwise: 2,
                }),
                opening: locations(&[[1, 12], [26, 12]]),
                lanes: vec![
                    locations(&[[2, 11], [3, 10], [4, 9], [5, 8]]),
                    locations(&[[25, 11], [24, 10], [23, 9], [22, 8]]),
                ],
            }),
            offense: OffenseConfig {
                spawn: SpawnPlan::LeastRisk,
                fallback_spawns: Vec::new(),
                escort: None,
                commitment: CommitmentPolicy {
                    primary: UnitType::Scout,
                    primary_value: 15.0,
                    ratio_threshold: 2.8,
                    min_turn: 0,
                    min_wave: 5,
                    fallback: Some(FallbackUnit {
                        unit: UnitType::Demolisher,
                        value: 5.0,
                        ratio_threshold: None,
                        min_wave: 4,
                    }),
                },
            },
            counter: None,
        }
    }

    /// Diagonal walls pushing everything to one corner, a gate that opens
    /// for scout rushes, and counter formations when the lane gets walled.
    pub fn corner_rush() -> Self {
        let repair_turn = 7;
        let repair_health = 80.0;
        let support_upgrade = TierGate::at(10, 20.1);

        StrategyConfig {
            name: "corner_rush".to_owned(),
            units: UnitCatalog::default(),
            windows: RiskWindows::default(),
            flanks: Vec::new(),
            gate: Some(GateConfig {
                locations: locations(&[[0, 13], [1, 13]]),
                min_turn: 4,
                open_at_currency: 13.0,
            }),
            tiers: vec![
                PlacementTier::new(
                    "base walls",
                    UnitType::Wall,
                    &[
                        [2, 13], [3, 13], [4, 12], [5, 11], [6, 11], [8, 10], [10, 10], [11, 9], [13, 8],
                        [27, 13], [26, 13], [25, 13], [24, 13], [23, 12], [22, 11], [21, 11], [19, 10],
                        [17, 10], [16, 9], [14, 8],
                    ],
                )
                .repair_from(repair_turn, repair_health),
                PlacementTier::new("late walls", UnitType::Wall, &[[7, 10], [20, 10]])
                    .spawn_when(TierGate::at(4, 0.0))
                    .repair_from(repair_turn, repair_health),
                PlacementTier::new("main turrets", UnitType::Turret, &[[18, 10], [9, 10]])
                    .upgrade_when(TierGate::at(3, 20.1)),
                PlacementTier::new("outer turrets", UnitType::Turret, &[[3, 12], [24, 12]])
                    .spawn_when(TierGate::at(6, 4.0))
                    .upgrade_when(TierGate::at(6, 20.1)),
                PlacementTier::new("inner turrets", UnitType::Turret, &[[7, 12], [20, 12]])
                    .spawn_when(TierGate::at(8, 8.0))
                    .upgrade_when(TierGate::at(8, 20.1)),
                PlacementTier::new("secondary turrets", UnitType::Turret, &[[15, 8], [12, 8]]),
                PlacementTier::new("supports", UnitType::Support, &[[15, 7], [16, 7]])
                    .spawn_when(TierGate::at(4, 4.0))
                    .upgrade_when(support_upgrade),
                PlacementTier::new("mid supports", UnitType::Support, &[[16, 8], [17, 8]])
                    .spawn_when(TierGate::at(6, 4.0))
                    .upgrade_when(support_upgrade),
                PlacementTier::new("late support", UnitType::Support, &[[17, 9]])
                    .spawn_when(TierGate::at(10, 4.0))
                    .upgrade_when(support_upgrade),
            ],
            interceptors: Some(InterceptorDefense {
                always_before_turn: 4,
                until_turn: 0,
                opponent_currency_above: 0.0,
                sizing: InterceptorSizing::Fixed(1),
                opening: locations(&[[4, 9], [23, 9]]),
                lanes: Vec::new(),
            }),
            offense: OffenseConfig {
                spawn: SpawnPlan::Fixed(Location::from_coords(21, 7)),
                fallback_spawns: locations(&[[22, 8], [20, 6]]),
                escort: Some(EscortConfig {
                    unit: UnitType::Scout,
                    location: Location::from_coords(14, 0),
                    sizing: InterceptorSizing::Fixed(MAX_ESCORTS),
                }),
                commitment: CommitmentPolicy {
                    primary: UnitType::Scout,
                    primary_value: 17.0,
                    ratio_threshold: 0.7,
                    min_turn: 4,
                    min_wave: 1,
                    fallback: Some(FallbackUnit {
                        unit: UnitType::Demolisher,
                        value: 5.0,
                        ratio_threshold: Some(0.02),
                        min_wave: 4,
                    }),
                },
            },
            counter: Some(CounterConfig {
                left: CounterFormation {
                    walls: locations(&[[5, 10], [6, 10], [7, 9]]),
                    chokepoint: Location::from_coords(22, 8),
                },
                right: CounterFormation {
                    walls: locations(&[[22, 10], [21, 10], [20, 9]]),
                    chokepoint: Location::from_coords(5, 8),
                },
                release_after_clear: default_release(),
            }),
        }
    }

    /// Turret-heavy wall with a one-cell gate; sacrificial interceptors
    /// clear the corner before a scout wave from the centre.
    pub fn infiltrator() -> Self {
        let turret_upgrade = TierGate::at(6, 30.1);
        let support_upgrade = TierGate::at(6, 20.1);

        StrategyConfig {
            name: "infiltrator".to_owned(),
            units: UnitCatalog::default(),
            windows: RiskWindows::default(),
            flanks: Vec::new(),
            gate: Some(GateConfig {
                locations: locations(&[[1, 13]]),
                min_turn: 2,
                open_at_currency: 12.0,
            }),
            tiers: vec![
                PlacementTier::new(
                    "base walls",
                    UnitType::Wall,
                    &[
                        [3, 13], [4, 12], [5, 11], [6, 11], [7, 10], [8, 10], [10, 10], [11, 9], [13, 8],
                        [27, 13], [26, 13], [25, 13], [24, 13], [23, 12], [22, 11], [21, 11], [20, 10],
                        [19, 10], [17, 10], [16, 9], [14, 8],
                    ],
                )
                .upgrade_when(TierGate::at(5, 0.0))
                .upgrade_only(&[[3, 13], [27, 13], [26, 13], [25, 13], [24, 13]])
                .repair_from(6, 80.0),
                PlacementTier::new("corner turrets", UnitType::Turret, &[[0, 13], [2, 13]])
                    .spawn_when(TierGate::at(2, 4.0))
                    .upgrade_when(TierGate::at(2, 10.0)),
                PlacementTier::new("corner walls", UnitType::Wall, &[[0, 13], [2, 13]]),
                PlacementTier::new(
                    "main turrets",
                    UnitType::Turret,
                    &[[18, 10], [9, 10], [6, 10], [21, 10], [24, 12], [3, 12], [12, 8], [15, 8]],
                )
                .upgrade_when(turret_upgrade),
                PlacementTier::new("extra turrets", UnitType::Turret, &[[7, 12], [20, 12], [11, 8], [16, 8]])
                    .spawn_when(TierGate::at(4, 4.0))
                    .upgrade_when(turret_upgrade),
                PlacementTier::new("supports", UnitType::Support, &[[7, 9], [8, 9]])
                    .spawn_when(TierGate::at(3, 4.0))
                    .upgrade_when(support_upgrade),
                PlacementTier::new("rear supports", UnitType::Support, &[[7, 8], [8, 8]])
                    .spawn_when(TierGate::at(5, 4.0))
                    .upgrade_when(support_upgrade),
            ],
            interceptors: None,
            offense: OffenseConfig {
                spawn: SpawnPlan::Fixed(Location::from_coords(14, 0)),
                fallback_spawns: locations(&[[13, 0], [15, 1]]),
                escort: Some(EscortConfig {
                    unit: UnitType::Interceptor,
                    location: Location::from_coords(3, 10),
                    sizing: InterceptorSizing::Chokepoint(ChokepointSizing {
                        probe: Location::from_coords(3, 10),
                        risk_above: 30.0,
                        blockers: locations(&[[1, 14], [0, 14]]),
                        contested: HealthSplit {
                            max_health: 50.0,
                            small: 6,
                            large: 7,
                        },
                        open: HealthSplit {
                            max_health: 60.0,
                            small: 3,
                            large: 4,
                        },
                    }),
                }),
                commitment: CommitmentPolicy {
                    primary: UnitType::Scout,
                    primary_value: 1.0,
                    ratio_threshold: 0.0,
                    min_turn: 2,
                    min_wave: 8,
                    fallback: None,
                },
            },
            counter: Some(CounterConfig {
                left: CounterFormation {
                    walls: locations(&[[4, 11], [5, 10], [6, 9]]),
                    chokepoint: Location::from_coords(22, 8),
                },
                right: CounterFormation {
                    walls: locations(&[[23, 11], [22, 10], [21, 9]]),
                    chokepoint: Location::from_coords(5, 8),
                },
                release_after_clear: default_release(),
            }),
        }
    }

    pub fn presets() -> Vec<StrategyConfig> {
        vec![Self::funnel_line(), Self::corner_rush(), Self::infiltrator()]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn presets_are_valid() {
        for preset in StrategyConfig::presets() {
            preset.validate().unwrap_or_else(|err| panic!("{}: {}", preset.name, err));
        }
    }

    #[test]
    fn presets_survive_json() {
        for preset in StrategyConfig::presets() {
            let text = preset.to_json_string().unwrap();
            let back = StrategyConfig::from_json_str(&text).unwrap();
            assert_eq!(back, preset);
        }
    }

    #[test]
    fn minimal_json_uses_defaults() {
        let config = StrategyConfig::from_json_str(
            r#"{
                "name": "bare",
                "offense": {
                    "spawn": "LeastRisk",
                    "commitment": { "primary": "Scout", "primary_value": 15.0, "ratio_threshold": 2.8 }
                },
                "counter": {
                    "left": { "walls": [[5, 10]], "chokepoint": [22, 8] },
                    "right": { "walls": [[22, 10]], "chokepoint": [5, 8] }
                }
            }"#,
        )
        .unwrap();

        assert_eq!(config.units, UnitCatalog::default());
        assert_eq!(config.windows.full_wave.skip, FULL_WAVE_SKIP_PREFIX);
        assert_eq!(config.counter.unwrap().release_after_clear, Some(2));
    }

    #[test]
    fn rejects_bad_cells() {
        let mut config = StrategyConfig::funnel_line();
        config.tiers[0].locations.push(Location::from_coords(10, 16));
        assert!(matches!(config.validate(), Err(StrategyError::InvalidConfig(_))));

        let mut config = StrategyConfig::corner_rush();
        config.offense.spawn = SpawnPlan::Fixed(Location::from_coords(10, 10));
        assert!(config.validate().is_err());

        let mut config = StrategyConfig::corner_rush();
        config.offense.escort.as_mut().unwrap().sizing = InterceptorSizing::Fixed(9);
        assert!(config.validate().is_err());
    }

    #[test]
    fn unparseable_json_is_a_config_error() {
        assert!(matches!(
            StrategyConfig::from_json_str("{\"name\": 3}"),
            Err(StrategyError::Config(_))
        ));
    }

    #[test]
    fn gate_opens_on_turn_and_currency() {
        let gate = StrategyConfig::corner_rush().gate.unwrap();
        assert!(!gate.is_open(3, 20.0));
        assert!(!gate.is_open(4, 12.9));
        assert!(gate.is_open(4, 13.0));
        // Rich early turns already keep the gate down.
        assert!(gate.is_attacking(20.0));
        assert!(!gate.is_attacking(12.9));
    }
}
