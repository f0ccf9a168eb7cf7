//! FlankLayer: walls up a corner once the opponent has scored through it.

use super::*;
use crate::config::Flank;
use crate::units::UnitType;
use log::*;

pub struct FlankLayer {
    flank: Flank,
}

impl FlankLayer {
    pub fn new(flank: Flank) -> Self {
        FlankLayer { flank }
    }
}

impl FormationLayer for FlankLayer {
    fn name(&self) -> &str {
        &self.flank.name
    }

    fn is_applicable(&self, ctx: &TurnContext) -> bool {
        ctx.breaches.any_in(&self.flank.risk_zone)
    }

    fn place(&self, _ctx: &TurnContext, batch: &mut ActionBatch<'_>) -> LayerOutcome {
        let placed = batch.attempt_spawn(UnitType::Wall, &self.flank.walls);
        let upgraded = batch.attempt_upgrade(&self.flank.walls);

        debug!("Reinforcing {}: {} walls, {} upgrades", self.flank.name, placed, upgraded);

        LayerOutcome::Continue
    }
}

#[cfg(test)]
mod tests {
    use super::test_support::context;
    use super::*;
    use crate::arena_board::ArenaBoard;
    use crate::location::*;
    use crate::units::*;

    #[test]
    fn only_reinforces_after_a_breach_in_the_zone() {
        let mut board = ArenaBoard::new(UnitCatalog::default());
        board.set_resource(ResourceKind::Structure, Owner::Player, 30.0);
        let catalog = UnitCatalog::default();
        let layer = FlankLayer::new(StrategyConfig::funnel_line().flanks[0].clone());

        let mut breaches = BreachLog::new();
        breaches.record(Location::from_coords(27, 13), 1);
        assert!(!layer.is_applicable(&context(2, &breaches)));

        breaches.record(Location::from_coords(1, 12), 2);
        let ctx = context(3, &breaches);
        assert!(layer.is_applicable(&ctx));

        let mut batch = ActionBatch::new(&board, &catalog);
        layer.place(&ctx, &mut batch);
        // Four walls, each upgraded in the same turn.
        assert_eq!(batch.actions().len(), 8);
    }
}
