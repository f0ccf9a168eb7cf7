//! CounterWallLayer: the active side's temporary funnel while countering.

use super::*;
use crate::config::CounterConfig;
use crate::counter::FormationMode;
use crate::units::UnitType;
use log::*;

pub struct CounterWallLayer {
    counter: CounterConfig,
}

impl CounterWallLayer {
    pub fn new(counter: CounterConfig) -> Self {
        CounterWallLayer { counter }
    }
}

impl FormationLayer for CounterWallLayer {
    fn name(&self) -> &str {
        "counter walls"
    }

    fn is_applicable(&self, ctx: &TurnContext) -> bool {
        ctx.counter.mode == FormationMode::Counter
    }

    fn place(&self, ctx: &TurnContext, batch: &mut ActionBatch<'_>) -> LayerOutcome {
        if let Some(side) = ctx.counter.active_side {
            let walls = &self.counter.formation(side).walls;
            let placed = batch.attempt_spawn(UnitType::Wall, walls);
            trace!("Counter walls on {}: {} of {} placed", side, placed, walls.len());
        }

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
    fn walls_follow_the_active_side() {
        let mut board = ArenaBoard::new(UnitCatalog::default());
        board.set_resource(ResourceKind::Structure, Owner::Player, 10.0);
        let catalog = UnitCatalog::default();
        let config = StrategyConfig::corner_rush().counter.unwrap();
        let layer = CounterWallLayer::new(config.clone());
        let breaches = BreachLog::new();

        let mut ctx = context(5, &breaches);
        assert!(!layer.is_applicable(&ctx));

        ctx.counter = CounterState {
            mode: FormationMode::Counter,
            active_side: Some(Side::Right),
        };
        assert!(layer.is_applicable(&ctx));

        let mut batch = ActionBatch::new(&board, &catalog);
        layer.place(&ctx, &mut batch);
        let placed: Vec<Location> = batch.actions().iter().map(|a| a.location()).collect();
        assert_eq!(placed, config.right.walls);
    }
}
