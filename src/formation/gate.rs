//! GateLayer: keeps the attack lane walled while we cannot afford to attack.
//! Once we can and the gate's turn has come, the gate is torn down and that
//! turn is spent waiting for it to clear.

use super::*;
use crate::config::GateConfig;
use crate::units::UnitType;
use log::*;

pub struct GateLayer {
    gate: GateConfig,
}

impl GateLayer {
    pub fn new(gate: GateConfig) -> Self {
        GateLayer { gate }
    }
}

impl FormationLayer for GateLayer {
    fn name(&self) -> &str {
        "gate"
    }

    fn place(&self, ctx: &TurnContext, batch: &mut ActionBatch<'_>) -> LayerOutcome {
        if !ctx.attacking {
            batch.attempt_spawn(UnitType::Wall, &self.gate.locations);
            return LayerOutcome::Continue;
        }

        if ctx.turn < self.gate.min_turn {
            return LayerOutcome::Continue;
        }

        let board = batch.board();
        if self.gate.locations.iter().any(|loc| board.is_occupied(*loc)) {
            let removed = batch.attempt_remove(&self.gate.locations);
            debug!("Opening gate ({} removed), holding offense", removed);
            return LayerOutcome::HoldOffense;
        }

        LayerOutcome::Continue
    }
}

#[cfg(test)]
mod tests {
    use super::test_support::context;
    use super::*;
    use crate::actions::TurnAction;
    use crate::arena_board::ArenaBoard;
    use crate::board::Board;
    use crate::location::*;
    use crate::units::*;

    #[test]
    fn gate_closes_then_opens() {
        let mut board = ArenaBoard::new(UnitCatalog::default());
        board.set_resource(ResourceKind::Structure, Owner::Player, 10.0);
        let catalog = UnitCatalog::default();
        let layer = GateLayer::new(StrategyConfig::corner_rush().gate.unwrap());
        let breaches = BreachLog::new();

        let mut ctx = context(1, &breaches);
        let mut batch = ActionBatch::new(&board, &catalog);
        assert_eq!(layer.place(&ctx, &mut batch), LayerOutcome::Continue);
        let actions = batch.finish();
        assert_eq!(actions.len(), 2);
        board.apply(&actions);
        assert!(board.is_occupied(Location::from_coords(0, 13)));

        // Affordable but too early: the gate is neither rebuilt nor opened.
        ctx.attacking = true;
        let mut batch = ActionBatch::new(&board, &catalog);
        assert_eq!(layer.place(&ctx, &mut batch), LayerOutcome::Continue);
        assert!(batch.actions().is_empty());

        ctx.turn = 4;
        let mut batch = ActionBatch::new(&board, &catalog);
        assert_eq!(layer.place(&ctx, &mut batch), LayerOutcome::HoldOffense);
        let actions = batch.finish();
        assert!(actions.iter().all(TurnAction::is_removal));
        board.apply(&actions);

        let mut batch = ActionBatch::new(&board, &catalog);
        assert_eq!(layer.place(&ctx, &mut batch), LayerOutcome::Continue);
        assert!(batch.actions().is_empty());
    }
}
