//! InterceptorLayer: defensive interceptors to meet early or well-funded
//! opponent waves.

use super::*;
use crate::config::{InterceptorDefense, RiskWindows};
use crate::location::Location;
use crate::selector::select_interceptor_spawn;
use crate::units::UnitType;
use log::*;

pub struct InterceptorLayer {
    defense: InterceptorDefense,
    windows: RiskWindows,
}

impl InterceptorLayer {
    pub fn new(defense: InterceptorDefense, windows: RiskWindows) -> Self {
        InterceptorLayer { defense, windows }
    }

    fn deploy_points(&self, turn: u32, batch: &ActionBatch<'_>) -> Vec<Location> {
        if turn == 0 || self.defense.lanes.is_empty() {
            return self.defense.opening.clone();
        }

        self.defense
            .lanes
            .iter()
            .filter_map(|lane| {
                select_interceptor_spawn(
                    batch.board(),
                    batch.catalog(),
                    lane,
                    self.windows.interceptor,
                    self.windows.interceptor_safe_below,
                )
            })
            .map(|choice| choice.location)
            .collect()
    }
}

impl FormationLayer for InterceptorLayer {
    fn name(&self) -> &str {
        "interceptors"
    }

    fn is_applicable(&self, ctx: &TurnContext) -> bool {
        self.defense.is_active(ctx.turn, ctx.opponent_mobile)
    }

    fn place(&self, ctx: &TurnContext, batch: &mut ActionBatch<'_>) -> LayerOutcome {
        let count = self.defense.sizing.size(batch.board(), batch.catalog());
        let points = self.deploy_points(ctx.turn, batch);

        let mut sent = 0;
        for _ in 0..count {
            sent += batch.attempt_spawn(UnitType::Interceptor, &points);
        }

        debug!("Defending with {} interceptors ({} per point)", sent, count);

        LayerOutcome::Continue
    }
}

#[cfg(test)]
mod tests {
    use super::test_support::context;
    use super::*;
    use crate::actions::TurnAction;
    use crate::arena_board::ArenaBoard;
    use crate::units::*;

    fn layer() -> InterceptorLayer {
        let config = StrategyConfig::funnel_line();
        InterceptorLayer::new(config.interceptors.unwrap(), config.windows)
    }

    #[test]
    fn active_early_or_against_rich_opponents() {
        let layer = layer();
        let breaches = BreachLog::new();

        assert!(layer.is_applicable(&context(1, &breaches)));
        assert!(!layer.is_applicable(&context(5, &breaches)));

        let mut ctx = context(5, &breaches);
        ctx.opponent_mobile = 11.0;
        assert!(layer.is_applicable(&ctx));
        ctx.turn = 20;
        assert!(!layer.is_applicable(&ctx));
    }

    #[test]
    fn opening_turn_uses_opening_points_then_lanes() {
        let mut board = ArenaBoard::new(UnitCatalog::default());
        board.set_resource(ResourceKind::Mobile, Owner::Player, 5.0);
        let catalog = UnitCatalog::default();
        let layer = layer();
        let breaches = BreachLog::new();

        let mut batch = ActionBatch::new(&board, &catalog);
        layer.place(&context(0, &breaches), &mut batch);
        assert_eq!(
            batch.finish(),
            vec![
                TurnAction::Spawn {
                    unit: UnitType::Interceptor,
                    location: Location::from_coords(1, 12)
                },
                TurnAction::Spawn {
                    unit: UnitType::Interceptor,
                    location: Location::from_coords(26, 12)
                },
            ]
        );

        board.set_turn(1);
        let mut batch = ActionBatch::new(&board, &catalog);
        layer.place(&context(1, &breaches), &mut batch);
        let spawned: Vec<_> = batch.finish().iter().map(TurnAction::location).collect();
        // Empty board: the first point of each lane is safe.
        assert_eq!(spawned, vec![Location::from_coords(2, 11), Location::from_coords(25, 11)]);
    }
}
