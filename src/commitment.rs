//! Go/no-go for an offensive wave, and how many of each unit to send.

use crate::board::Board;
use crate::constants::*;
use crate::location::*;
use crate::risk::*;
use crate::units::*;
use itertools::Itertools;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Heavy unit sent when the primary wave does not clear its threshold.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct FallbackUnit {
    pub unit: UnitType,
    pub value: f64,
    /// `None` commits the fallback whenever the primary is held back.
    #[serde(default)]
    pub ratio_threshold: Option<f64>,
    #[serde(default)]
    pub min_wave: u32,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CommitmentPolicy {
    pub primary: UnitType,
    /// Damage-soaking value credited per primary unit.
    pub primary_value: f64,
    pub ratio_threshold: f64,
    /// Earliest turn the ratio test may commit.
    #[serde(default)]
    pub min_turn: u32,
    /// Smallest wave actually dispatched.
    #[serde(default)]
    pub min_wave: u32,
    #[serde(default)]
    pub fallback: Option<FallbackUnit>,
}

impl CommitmentPolicy {
    pub fn min_wave_for(&self, unit: UnitType) -> u32 {
        match &self.fallback {
            Some(fallback) if fallback.unit == unit && unit != self.primary => fallback.min_wave,
            _ => self.min_wave,
        }
    }
}

/// Unit counts in spawn order, escorts first.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct UnitAllocation {
    pub groups: Vec<(UnitType, u32)>,
}

impl UnitAllocation {
    pub fn count(&self, unit: UnitType) -> u32 {
        self.groups
            .iter()
            .filter(|(u, _)| *u == unit)
            .map(|(_, n)| n)
            .sum()
    }

    pub fn total(&self) -> u32 {
        self.groups.iter().map(|(_, n)| n).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.total() == 0
    }
}

impl fmt::Display for UnitAllocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}",
            self.groups
                .iter()
                .map(|(unit, count)| format!("{}x{:?}", count, unit))
                .join(" + ")
        )
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct OffenseDecision {
    pub commit: bool,
    /// The wave's main unit, when committing.
    pub unit: Option<UnitType>,
    pub allocation: UnitAllocation,
}

impl OffenseDecision {
    fn hold() -> Self {
        OffenseDecision {
            commit: false,
            unit: None,
            allocation: UnitAllocation::default(),
        }
    }
}

fn affordable(currency: f64, cost: f64) -> u32 {
    if cost <= 0.0 || currency <= 0.0 {
        0
    } else {
        (currency / cost).floor() as u32
    }
}

/// Decide whether to send a wave down a path with the given risk.
///
/// Escorts are funded first, capped to what the currency affords; the rest
/// goes to the committed unit. Advisory only.
pub fn decide_offense(
    risk: f64,
    available_mobile: f64,
    turn: u32,
    escort: Option<(UnitType, u32)>,
    policy: &CommitmentPolicy,
    catalog: &UnitCatalog,
) -> OffenseDecision {
    if available_mobile <= 0.0 {
        return OffenseDecision::hold();
    }

    let escort = escort.map(|(unit, wanted)| {
        let cost = catalog.cost(unit);
        (unit, wanted.min(affordable(available_mobile, cost)), cost)
    });
    let escort_spend = escort.map(|(_, n, cost)| n as f64 * cost).unwrap_or(0.0);
    let remaining = available_mobile - escort_spend;

    let commit_with = |unit: UnitType| {
        let mut groups = Vec::new();
        if let Some((escort_unit, n, _)) = escort {
            if n > 0 {
                groups.push((escort_unit, n));
            }
        }
        groups.push((unit, affordable(remaining, catalog.cost(unit))));
        OffenseDecision {
            commit: true,
            unit: Some(unit),
            allocation: UnitAllocation { groups },
        }
    };

    if risk <= 0.0 {
        return commit_with(policy.primary);
    }

    let primary_count = affordable(remaining, catalog.cost(policy.primary));
    if turn >= policy.min_turn && primary_count as f64 * policy.primary_value / risk >= policy.ratio_threshold {
        return commit_with(policy.primary);
    }

    if let Some(fallback) = &policy.fallback {
        let count = affordable(remaining, catalog.cost(fallback.unit));
        let clears = fallback
            .ratio_threshold
            .map(|threshold| count as f64 * fallback.value / risk >= threshold)
            .unwrap_or(true);
        if clears {
            return commit_with(fallback.unit);
        }
    }

    OffenseDecision::hold()
}

/// One branch of [`ChokepointSizing`]: `small` when the strongest blocker
/// has at most `max_health`, otherwise `large`.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct HealthSplit {
    pub max_health: f64,
    pub small: u32,
    pub large: u32,
}

impl HealthSplit {
    fn pick(&self, health: f64) -> u32 {
        if health <= self.max_health {
            self.small
        } else {
            self.large
        }
    }
}

/// Size escorts by how hot a chokepoint is and how tough the structures
/// plugging it are.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ChokepointSizing {
    pub probe: Location,
    pub risk_above: f64,
    pub blockers: Vec<Location>,
    pub contested: HealthSplit,
    pub open: HealthSplit,
}

/// Size by opponent currency and turn.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TieredSizing {
    /// `low` while the opponent holds less than `low_below_currency` or it is
    /// before `low_before_turn`.
    pub low: u32,
    pub low_below_currency: f64,
    pub low_before_turn: u32,
    /// `high` after `high_after_turn` once the opponent holds more than
    /// `high_above_currency`.
    pub high: u32,
    pub high_after_turn: u32,
    pub high_above_currency: f64,
    pub otherwise: u32,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum InterceptorSizing {
    Fixed(u32),
    Tiered(TieredSizing),
    Chokepoint(ChokepointSizing),
}

impl InterceptorSizing {
    pub fn size(&self, board: &dyn Board, catalog: &UnitCatalog) -> u32 {
        let count = match self {
            InterceptorSizing::Fixed(n) => *n,
            InterceptorSizing::Tiered(tiers) => {
                let turn = board.turn_number();
                let currency = board.resource(ResourceKind::Mobile, Owner::Opponent);
                if currency < tiers.low_below_currency || turn < tiers.low_before_turn {
                    tiers.low
                } else if turn > tiers.high_after_turn && currency > tiers.high_above_currency {
                    tiers.high
                } else {
                    tiers.otherwise
                }
            }
            InterceptorSizing::Chokepoint(choke) => {
                let strongest = choke
                    .blockers
                    .iter()
                    .filter_map(|loc| board.stationary_unit_at(*loc))
                    .map(|unit| unit.health)
                    .fold(0.0, f64::max);
                let risk = estimate_risk(board, catalog, choke.probe, PathWindow::WHOLE);
                if risk > choke.risk_above {
                    choke.contested.pick(strongest)
                } else {
                    choke.open.pick(strongest)
                }
            }
        };

        count.clamp(1, MAX_ESCORTS)
    }
}
