//! Public API for playing a match.
//!
//! A `StrategySession` owns everything that lives across turns: the breach
//! log, the counter state machine and the predicted opponent board. The
//! engine adapter feeds it action frames as they stream in and asks it for
//! a `TurnPlan` once per turn.

use crate::actions::*;
use crate::arena::friendly_edges;
use crate::board::Board;
use crate::breach::BreachLog;
use crate::commitment::*;
use crate::config::*;
use crate::counter::*;
use crate::error::*;
use crate::formation::*;
use crate::frames::*;
use crate::hypothetical::*;
use crate::location::*;
use crate::risk::estimate_risk;
use crate::selector::*;
use crate::units::*;
use itertools::Itertools;
use log::*;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Why no wave went out this turn.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum OffenseSkip {
    /// Counter walls are moving sides.
    Reforming,
    /// Gate walls are coming down this turn.
    GateOpening,
    /// Not attacking, or too early to open the gate.
    GateClosed,
    ChokepointOccupied,
    NoLegalSpawn,
    /// Commitment policy held back.
    Holding,
    BelowMinimumWave { count: u32, min_wave: u32 },
}

/// What happened on a turn and why.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TurnReport {
    pub turn: u32,
    pub transition: CounterTransition,
    pub state: CounterState,
    pub replay: ReplayStats,
    pub spawn: Option<Location>,
    pub risk: Option<f64>,
    pub decision: Option<OffenseDecision>,
    pub skipped_offense: Option<OffenseSkip>,
    /// Placement points that were skipped.
    pub rejections: usize,
}

/// The actions to submit for a turn, removals first.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TurnPlan {
    pub actions: Vec<TurnAction>,
    pub report: TurnReport,
}

pub struct StrategySession<B> {
    config: StrategyConfig,
    layers: Vec<Box<dyn FormationLayer>>,
    breaches: BreachLog,
    counter: CounterController,
    hypothetical: HypotheticalBoard<B>,
    last_turn: u32,
}

impl<B: Board + Clone> StrategySession<B> {
    pub fn new(config: StrategyConfig) -> Result<Self> {
        config.validate()?;

        let release = config.counter.as_ref().and_then(|c| c.release_after_clear);

        Ok(StrategySession {
            layers: formation_layers(&config),
            counter: CounterController::new(release),
            config,
            breaches: BreachLog::new(),
            hypothetical: HypotheticalBoard::new(),
            last_turn: 0,
        })
    }

    /// Append a layer after the configured ones.
    pub fn add_layer(&mut self, layer: Box<dyn FormationLayer>) {
        self.layers.push(layer);
    }

    pub fn config(&self) -> &StrategyConfig {
        &self.config
    }

    pub fn breach_log(&self) -> &BreachLog {
        &self.breaches
    }

    pub fn counter_state(&self) -> CounterState {
        self.counter.state()
    }

    pub fn hypothetical(&self) -> &HypotheticalBoard<B> {
        &self.hypothetical
    }

    /// Digest one action frame. Only a frame that is not JSON at all is an
    /// error; bad events inside it are skipped.
    pub fn on_action_frame(&mut self, frame: &str) -> Result<FrameSummary> {
        let frame = parse_frame(frame)?;

        if let Some(turn) = frame.turn {
            self.last_turn = turn;
        }

        let mut summary = FrameSummary {
            turn: frame.turn,
            ..FrameSummary::default()
        };

        for raw in &frame.breaches {
            match BreachEvent::decode(raw) {
                Ok(breach) if breach.owner == Owner::Opponent => {
                    debug!("Scored on at {}", breach.location);
                    self.record_breach(breach.location);
                    summary.breaches_recorded += 1;
                }
                Ok(_) => {}
                Err(err) => {
                    warn!("Skipping breach event: {}", err);
                    summary.malformed += 1;
                }
            }
        }

        summary.spawns_queued = frame.spawns.len();
        for raw in frame.spawns {
            self.queue_spawn_event(raw);
        }

        Ok(summary)
    }

    /// Log an opponent breach against the latest turn seen.
    pub fn record_breach(&mut self, location: Location) {
        self.breaches.record(location, self.last_turn);
    }

    /// Queue a raw spawn event for the next hypothetical replay.
    pub fn queue_spawn_event(&mut self, event: Value) {
        self.hypothetical.queue(event);
    }

    pub fn on_turn(&mut self, board: &B) -> TurnPlan {
        let turn = board.turn_number();
        self.last_turn = turn;

        let catalog = &self.config.units;

        let (transition, replay) = match &self.config.counter {
            Some(_) => {
                // Prediction starts from the live board, so our own removals
                // and the opponent's latest layout are both in it.
                self.hypothetical.seed(board.clone());
                let (predicted, replay) = self.hypothetical.replay(board, catalog);
                let probe = match probe_block(predicted, catalog, &friendly_edges(), self.config.windows.full_wave) {
                    Ok(probe) => Some(probe),
                    Err(err) => {
                        warn!("Block probe failed, counter state unchanged: {}", err);
                        None
                    }
                };
                (self.counter.advance(probe.as_ref()), replay)
            }
            None => {
                self.hypothetical.discard_pending();
                (CounterTransition::Hold, ReplayStats::default())
            }
        };

        let state = self.counter.state();
        let mut batch = ActionBatch::new(board, catalog);

        if let (Some(side), Some(counter)) = (transition.teardown_side(), &self.config.counter) {
            let removed = batch.attempt_remove(&counter.formation(side).walls);
            debug!("Tearing down {} counter walls ({} removed)", side, removed);
        }

        let mobile = board.resource(ResourceKind::Mobile, Owner::Player);
        let gate = self.config.gate.as_ref();
        let attacking = gate.map(|gate| gate.is_attacking(mobile)).unwrap_or(true);
        let lane_open = gate.map(|gate| gate.is_open(turn, mobile)).unwrap_or(true);

        let ctx = TurnContext {
            turn,
            breaches: &self.breaches,
            counter: state,
            attacking,
            opponent_mobile: board.resource(ResourceKind::Mobile, Owner::Opponent),
        };

        let mut hold = false;
        for layer in &self.layers {
            if !layer.is_applicable(&ctx) {
                trace!("Layer {} not applicable", layer.name());
                continue;
            }
            if layer.place(&ctx, &mut batch) == LayerOutcome::HoldOffense {
                hold = true;
            }
        }

        let mut report = TurnReport {
            turn,
            transition,
            state,
            replay,
            spawn: None,
            risk: None,
            decision: None,
            skipped_offense: None,
            rejections: 0,
        };

        let skip = if matches!(transition, CounterTransition::Shift { .. }) {
            Some(OffenseSkip::Reforming)
        } else if hold {
            Some(OffenseSkip::GateOpening)
        } else if !lane_open {
            Some(OffenseSkip::GateClosed)
        } else {
            self.plan_offense(transition, board, &mut batch, &mut report).err()
        };

        if let Some(reason) = skip {
            debug!("No offense on turn {}: {:?}", turn, reason);
        }
        report.skipped_offense = skip;
        report.rejections = batch.rejections();

        let actions = batch.finish();

        info!(
            "Turn {} [{}] {:?}: {} actions, offense {}",
            turn,
            state,
            transition,
            actions.len(),
            match (&report.decision, skip) {
                (Some(decision), None) => decision.allocation.to_string(),
                (_, Some(reason)) => format!("{:?}", reason),
                (None, None) => "none".to_owned(),
            }
        );
        trace!(
            "Turn {} actions: {}",
            turn,
            actions.iter().map(|a| format!("{:?}", a)).join(", ")
        );

        TurnPlan { actions, report }
    }

    fn choose_spawn(&self, board: &B) -> std::result::Result<SpawnChoice, OffenseSkip> {
        let catalog = &self.config.units;
        let offense = &self.config.offense;
        let window = self.config.windows.full_wave;

        let candidates = match offense.spawn {
            SpawnPlan::LeastRisk => friendly_edges(),
            SpawnPlan::Fixed(location) => vec![location],
        };

        select_best_spawn(board, catalog, &candidates, window)
            .or_else(|err| {
                debug!("{}, trying fallback spawns", err);
                select_best_spawn(board, catalog, &offense.fallback_spawns, window)
            })
            .map_err(|err| {
                warn!("Skipping offense: {}", err);
                OffenseSkip::NoLegalSpawn
            })
    }

    fn plan_offense(
        &self,
        transition: CounterTransition,
        board: &B,
        batch: &mut ActionBatch<'_>,
        report: &mut TurnReport,
    ) -> std::result::Result<(), OffenseSkip> {
        let catalog = &self.config.units;
        let offense = &self.config.offense;

        let choice = match (transition.attack_side(), &self.config.counter) {
            (Some(side), Some(counter)) => {
                let chokepoint = counter.formation(side).chokepoint;
                if board.is_occupied(chokepoint) {
                    warn!("Counter chokepoint {} is occupied", chokepoint);
                    return Err(OffenseSkip::ChokepointOccupied);
                }
                SpawnChoice {
                    location: chokepoint,
                    risk: estimate_risk(board, catalog, chokepoint, self.config.windows.full_wave),
                }
            }
            _ => self.choose_spawn(board)?,
        };

        report.spawn = Some(choice.location);
        report.risk = Some(choice.risk);

        let escort = offense
            .escort
            .as_ref()
            .map(|escort| (escort.unit, escort.sizing.size(board, catalog)));

        let decision = decide_offense(
            choice.risk,
            batch.mobile_budget(),
            report.turn,
            escort,
            &offense.commitment,
            catalog,
        );
        report.decision = Some(decision.clone());

        let unit = match decision.unit {
            Some(unit) if decision.commit => unit,
            _ => return Err(OffenseSkip::Holding),
        };

        let (wave, escorts) = match decision.allocation.groups.split_last() {
            Some(((_, count), escorts)) => (*count, escorts),
            None => return Err(OffenseSkip::Holding),
        };

        let min_wave = offense.commitment.min_wave_for(unit);
        if wave < min_wave {
            return Err(OffenseSkip::BelowMinimumWave { count: wave, min_wave });
        }

        if let Some(escort) = &offense.escort {
            for &(escort_unit, count) in escorts {
                batch.attempt_deploy(escort_unit, escort.location, count);
            }
        }
        let sent = batch.attempt_deploy(unit, choice.location, wave);

        debug!(
            "Sending {} from {} (risk {}), {} of {} deployed",
            decision.allocation, choice.location, choice.risk, sent, wave
        );

        Ok(())
    }
}
