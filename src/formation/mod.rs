//! Formation layers: the structure-placement passes run every turn.
//!
//! Each layer reads the turn context and adds actions to the shared
//! [`ActionBatch`]. Layers are built once per session from the config and
//! hold no per-turn state.

pub mod counter_walls;
pub mod flank;
pub mod gate;
pub mod interceptors;
pub mod tier;

pub use counter_walls::CounterWallLayer;
pub use flank::FlankLayer;
pub use gate::GateLayer;
pub use interceptors::InterceptorLayer;
pub use tier::TierLayer;

use crate::actions::ActionBatch;
use crate::breach::BreachLog;
use crate::config::StrategyConfig;
use crate::counter::CounterState;

/// What a layer can see about the turn besides the batch itself.
pub struct TurnContext<'a> {
    pub turn: u32,
    pub breaches: &'a BreachLog,
    pub counter: CounterState,
    /// Whether mobile currency is high enough to attack (always true without
    /// a gate). The gate's own turn threshold is checked by the gate.
    pub attacking: bool,
    pub opponent_mobile: f64,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum LayerOutcome {
    Continue,
    /// The layer used this turn to reshape the board; do not attack.
    HoldOffense,
}

pub trait FormationLayer {
    /// Human-readable name for logging.
    fn name(&self) -> &str;

    /// Return false to skip this layer for the turn.
    fn is_applicable(&self, _ctx: &TurnContext) -> bool {
        true
    }

    fn place(&self, ctx: &TurnContext, batch: &mut ActionBatch<'_>) -> LayerOutcome;
}

/// Build the layer stack for a config, in placement order:
///
/// 1. FlankLayer per flank -- reinforcement after breaches
/// 2. GateLayer -- attack lane walls
/// 3. TierLayer per menu tier -- walls, turrets, supports
/// 4. InterceptorLayer -- defensive interceptors
/// 5. CounterWallLayer -- temporary funnel while countering
pub fn formation_layers(config: &StrategyConfig) -> Vec<Box<dyn FormationLayer>> {
    let mut layers: Vec<Box<dyn FormationLayer>> = Vec::new();

    for flank in &config.flanks {
        layers.push(Box::new(FlankLayer::new(flank.clone())));
    }

    if let Some(gate) = &config.gate {
        layers.push(Box::new(GateLayer::new(gate.clone())));
    }

    for tier in &config.tiers {
        layers.push(Box::new(TierLayer::new(tier.clone())));
    }

    if let Some(defense) = &config.interceptors {
        layers.push(Box::new(InterceptorLayer::new(defense.clone(), config.windows)));
    }

    if let Some(counter) = &config.counter {
        layers.push(Box::new(CounterWallLayer::new(counter.clone())));
    }

    layers
}

#[cfg(test)]
pub(crate) mod test_support {
    use super::*;

    pub fn context(turn: u32, breaches: &BreachLog) -> TurnContext<'_> {
        TurnContext {
            turn,
            breaches,
            counter: CounterState::default(),
            attacking: false,
            opponent_mobile: 0.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn layer_stack_follows_config() {
        let names: Vec<String> = formation_layers(&StrategyConfig::corner_rush())
            .iter()
            .map(|l| l.name().to_owned())
            .collect();

        assert_eq!(names.first().map(String::as_str), Some("gate"));
        assert_eq!(names.last().map(String::as_str), Some("counter walls"));
        assert!(names.iter().any(|n| n == "base walls"));
        assert!(names.iter().any(|n| n == "interceptors"));

        let funnel = formation_layers(&StrategyConfig::funnel_line());
        assert_eq!(funnel[0].name(), "left flank");
        assert_eq!(funnel.last().map(|l| l.name()), Some("interceptors"));
    }
}
