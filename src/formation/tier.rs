//! TierLayer: one gated entry of a structure menu, with optional upgrades
//! and upkeep.

use super::*;
use crate::config::{PlacementTier, RepairRule};
use crate::location::Location;
use crate::units::Owner;
use log::*;

pub struct TierLayer {
    tier: PlacementTier,
}

impl TierLayer {
    pub fn new(tier: PlacementTier) -> Self {
        TierLayer { tier }
    }

    /// Tier locations holding a structure of this tier's kind.
    fn own_kind(&self, batch: &ActionBatch<'_>, locations: &[Location]) -> Vec<Location> {
        locations
            .iter()
            .copied()
            .filter(|loc| batch.planned_unit(*loc) == Some(self.tier.unit))
            .collect()
    }

    fn repair(&self, rule: &RepairRule, batch: &mut ActionBatch<'_>) {
        let board = batch.board();
        let mut worn = Vec::new();
        let mut upgradable = Vec::new();

        for &location in &self.tier.locations {
            let unit = match board.stationary_unit_at(location) {
                Some(unit) if unit.owner == Owner::Player && unit.unit_type == self.tier.unit => unit,
                _ => continue,
            };
            if unit.upgraded && unit.health < rule.below_health {
                worn.push(location);
            } else if !unit.upgraded {
                upgradable.push(location);
            }
        }

        if !worn.is_empty() {
            debug!("{}: taking down {} worn structures", self.tier.name, worn.len());
            batch.attempt_remove(&worn);
        }

        if batch.structure_budget() > upgradable.len() as f64 {
            batch.attempt_upgrade(&upgradable);
        }
    }
}

impl FormationLayer for TierLayer {
    fn name(&self) -> &str {
        &self.tier.name
    }

    fn place(&self, ctx: &TurnContext, batch: &mut ActionBatch<'_>) -> LayerOutcome {
        let tier = &self.tier;

        if tier.spawn.allows(ctx.turn, batch.structure_budget()) {
            let placed = batch.attempt_spawn(tier.unit, &tier.locations);
            if placed > 0 {
                debug!("{}: placed {} {:?}", tier.name, placed, tier.unit);
            }
        }

        if let Some(gate) = &tier.upgrade {
            if gate.allows(ctx.turn, batch.structure_budget()) {
                let targets = self.own_kind(batch, tier.upgrade_targets());
                batch.attempt_upgrade(&targets);
            }
        }

        if let Some(rule) = &tier.repair {
            if ctx.turn >= rule.min_turn {
                self.repair(rule, batch);
            }
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
    use crate::config::TierGate;
    use crate::location::*;
    use crate::units::*;

    fn board(budget: f64) -> ArenaBoard {
        let mut board = ArenaBoard::new(UnitCatalog::default());
        board.set_resource(ResourceKind::Structure, Owner::Player, budget);
        board
    }

    #[test]
    fn spawn_gate_is_inclusive() {
        let catalog = UnitCatalog::default();
        let layer = TierLayer::new(
            PlacementTier::new("outer turrets", UnitType::Turret, &[[3, 12], [24, 12]])
                .spawn_when(TierGate::at(6, 4.0)),
        );
        let breaches = BreachLog::new();

        let board = board(4.0);
        let mut batch = ActionBatch::new(&board, &catalog);
        layer.place(&context(5, &breaches), &mut batch);
        assert!(batch.actions().is_empty());

        let mut batch = ActionBatch::new(&board, &catalog);
        layer.place(&context(6, &breaches), &mut batch);
        assert_eq!(batch.actions().len(), 2);
    }

    #[test]
    fn upgrades_skip_other_kinds() {
        let mut board = board(20.0);
        board.add_structure(Location::from_coords(0, 13), UnitType::Wall, Owner::Player);
        let catalog = UnitCatalog::default();
        let layer = TierLayer::new(
            PlacementTier::new("corner turrets", UnitType::Turret, &[[0, 13], [2, 13]])
                .upgrade_when(TierGate::ALWAYS),
        );
        let breaches = BreachLog::new();

        let mut batch = ActionBatch::new(&board, &catalog);
        layer.place(&context(3, &breaches), &mut batch);
        let actions = batch.finish();

        assert!(actions.contains(&TurnAction::Upgrade {
            location: Location::from_coords(2, 13)
        }));
        assert!(!actions.contains(&TurnAction::Upgrade {
            location: Location::from_coords(0, 13)
        }));
    }

    #[test]
    fn repair_replaces_worn_upgraded_walls() {
        let mut board = board(10.0);
        let worn = Location::from_coords(2, 13);
        let fresh = Location::from_coords(3, 13);
        board.add_structure(worn, UnitType::Wall, Owner::Player);
        board.upgrade_structure(worn);
        board.set_health(worn, 40.0);
        board.add_structure(fresh, UnitType::Wall, Owner::Player);
        let catalog = UnitCatalog::default();
        let layer = TierLayer::new(
            PlacementTier::new("base walls", UnitType::Wall, &[[2, 13], [3, 13]]).repair_from(7, 80.0),
        );
        let breaches = BreachLog::new();

        let mut batch = ActionBatch::new(&board, &catalog);
        layer.place(&context(6, &breaches), &mut batch);
        assert!(batch.actions().is_empty());

        let mut batch = ActionBatch::new(&board, &catalog);
        layer.place(&context(7, &breaches), &mut batch);
        let actions = batch.finish();
        assert_eq!(
            actions,
            vec![
                TurnAction::Remove { location: worn },
                TurnAction::Upgrade { location: fresh },
            ]
        );
    }
}
