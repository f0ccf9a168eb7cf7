mod common;

use common::*;
use lane_sentinel::arena::friendly_edges;
use lane_sentinel::commitment::*;
use lane_sentinel::risk::*;
use lane_sentinel::selector::*;
use lane_sentinel::*;

#[test]
fn risk_is_zero_without_enemy_turrets() {
    let catalog = UnitCatalog::default();
    let mut board = ArenaBoard::new(catalog.clone());
    board.add_structure(loc(5, 10), UnitType::Wall, Owner::Player);
    board.add_structure(loc(9, 10), UnitType::Turret, Owner::Player);
    board.add_structure(loc(12, 16), UnitType::Wall, Owner::Opponent);
    board.add_structure(loc(15, 16), UnitType::Support, Owner::Opponent);

    for spawn in friendly_edges() {
        for window in [PathWindow::WHOLE, PathWindow::full_wave(), PathWindow::interceptor()] {
            assert_eq!(estimate_risk(&board, &catalog, spawn, window), 0.0, "{}", spawn);
        }
    }
}

#[test]
fn occupied_candidates_are_never_chosen() {
    let catalog = UnitCatalog::default();
    let mut board = ArenaBoard::new(catalog.clone());
    let candidates = friendly_edges();
    // Block every other candidate, including the first.
    for spawn in candidates.iter().step_by(2) {
        board.add_structure(*spawn, UnitType::Wall, Owner::Player);
    }
    board.add_structure(loc(14, 16), UnitType::Turret, Owner::Opponent);

    let choice = select_best_spawn(&board, &catalog, &candidates, PathWindow::full_wave()).unwrap();
    assert!(!board.is_occupied(choice.location));

    for spawn in &candidates {
        board.add_structure(*spawn, UnitType::Wall, Owner::Player);
    }
    assert!(matches!(
        select_best_spawn(&board, &catalog, &candidates, PathWindow::full_wave()),
        Err(StrategyError::NoLegalSpawn { candidates: 28 })
    ));
}

#[test]
fn equal_risk_goes_to_the_first_candidate_every_time() {
    let catalog = UnitCatalog::default();
    let board = ArenaBoard::new(catalog.clone());
    let candidates = vec![loc(20, 6), loc(3, 10), loc(13, 0)];

    for _ in 0..3 {
        let choice = select_best_spawn(&board, &catalog, &candidates, PathWindow::full_wave()).unwrap();
        assert_eq!(choice.location, loc(20, 6));
    }
}

#[test]
fn zero_risk_always_commits_unless_broke() {
    let catalog = UnitCatalog::default();
    let policy = StrategyConfig::funnel_line().offense.commitment;

    for currency in [0.5, 1.0, 3.0, 17.5, 40.0] {
        let decision = decide_offense(0.0, currency, 0, None, &policy, &catalog);
        assert!(decision.commit, "currency {}", currency);
        assert_eq!(decision.unit, Some(policy.primary));
    }

    for risk in [0.0, 5.0, 500.0] {
        assert!(!decide_offense(risk, 0.0, 30, None, &policy, &catalog).commit);
    }
}

#[test]
fn path_clear_of_covered_points_sends_everything_as_primary() {
    let catalog = UnitCatalog::default();
    let mut board = ScriptedBoard::new();
    board.cover([5, 16], &[[5, 8], [5, 9]]);

    let path = board.path_to_edge(loc(0, 13));
    assert!(!path.contains(&loc(5, 8)) && !path.contains(&loc(5, 9)));

    // The turret does hit a spawn whose path runs through its points.
    assert!(estimate_risk(&board, &catalog, loc(5, 8), PathWindow::WHOLE) > 0.0);

    let choice = select_best_spawn(&board, &catalog, &[loc(0, 13)], PathWindow::full_wave()).unwrap();
    assert_eq!(choice.risk, 0.0);

    let policy = StrategyConfig::funnel_line().offense.commitment;
    let decision = decide_offense(choice.risk, 12.0, 5, None, &policy, &catalog);
    assert!(decision.commit);
    assert_eq!(decision.allocation.groups, vec![(UnitType::Scout, 12)]);
}

#[test]
fn hot_lane_falls_back_to_demolishers() {
    let catalog = UnitCatalog::default();
    let policy = StrategyConfig::funnel_line().offense.commitment;

    // 9 scouts * 15 / 60 = 2.25, below the 2.8 threshold.
    let decision = decide_offense(60.0, 9.0, 10, None, &policy, &catalog);
    assert!(decision.commit);
    assert_eq!(decision.unit, Some(UnitType::Demolisher));
    assert_eq!(decision.allocation.count(UnitType::Demolisher), 3);
}
