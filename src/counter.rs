//! Cross-turn adaptation to an opponent walling off our attack lane.
//!
//! Each turn the best spawn is probed against the predicted opponent board.
//! If that path dies inside the opponent's half instead of reaching the back
//! edges it is blocked, and the lane it dies in picks the counter formation.

use crate::arena::*;
use crate::board::Board;
use crate::error::*;
use crate::location::*;
use crate::risk::*;
use crate::selector::*;
use crate::units::UnitCatalog;
use log::*;
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FormationMode {
    Normal,
    Counter,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CounterState {
    pub mode: FormationMode,
    pub active_side: Option<Side>,
}

impl Default for CounterState {
    fn default() -> Self {
        CounterState {
            mode: FormationMode::Normal,
            active_side: None,
        }
    }
}

impl fmt::Display for CounterState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.active_side {
            Some(side) => write!(f, "{:?}/{}", self.mode, side),
            None => write!(f, "{:?}/none", self.mode),
        }
    }
}

/// Where the best predicted path ends up.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct BlockProbe {
    pub spawn: Location,
    pub terminal: Location,
    pub risk: f64,
}

impl BlockProbe {
    /// Only the opponent's structures can block: a path stopped short in our
    /// own half is our funnel, not a block.
    pub fn is_blocked(&self) -> bool {
        !is_player_half(self.terminal) && !is_on_edge(self.terminal, EdgeFlags::OPPONENT)
    }

    pub fn side(&self) -> Side {
        self.terminal.side()
    }
}

/// Run the spawn selector over `candidates` and follow the winner's path to
/// its end.
pub fn probe_block(
    board: &dyn Board,
    catalog: &UnitCatalog,
    candidates: &[Location],
    window: PathWindow,
) -> Result<BlockProbe> {
    let choice = select_best_spawn(board, catalog, candidates, window)?;
    let terminal = board
        .path_to_edge(choice.location)
        .last()
        .copied()
        .unwrap_or(choice.location);

    Ok(BlockProbe {
        spawn: choice.location,
        terminal,
        risk: choice.risk,
    })
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum CounterTransition {
    /// Normal play.
    Hold,
    /// First block: raise the side's walls and attack through its chokepoint.
    Enter { side: Side },
    /// The block moved: tear down `from`, raise `to`, no offense this turn.
    Shift { from: Side, to: Side },
    /// Keep the current formation.
    Maintain { side: Side },
    /// Block gone long enough: tear down the formation.
    Release { side: Side },
}

impl CounterTransition {
    /// Whether offense goes through the counter chokepoint this turn.
    pub fn attack_side(&self) -> Option<Side> {
        match *self {
            CounterTransition::Enter { side } | CounterTransition::Maintain { side } => Some(side),
            _ => None,
        }
    }

    /// Side whose temporary walls come down this turn.
    pub fn teardown_side(&self) -> Option<Side> {
        match *self {
            CounterTransition::Shift { from, .. } => Some(from),
            CounterTransition::Release { side } => Some(side),
            _ => None,
        }
    }
}

/// The per-match state machine. Starts `Normal` with no active side.
#[derive(Clone, Debug)]
pub struct CounterController {
    state: CounterState,
    clear_streak: u32,
    release_after_clear: Option<u32>,
}

impl CounterController {
    pub fn new(release_after_clear: Option<u32>) -> Self {
        CounterController {
            state: CounterState::default(),
            clear_streak: 0,
            release_after_clear,
        }
    }

    pub fn state(&self) -> CounterState {
        self.state
    }

    /// Advance one turn. `None` means the probe could not run, which leaves
    /// the state untouched.
    pub fn advance(&mut self, probe: Option<&BlockProbe>) -> CounterTransition {
        let active = self.state.active_side;

        let probe = match probe {
            Some(probe) => probe,
            None => {
                return match active {
                    Some(side) => CounterTransition::Maintain { side },
                    None => CounterTransition::Hold,
                }
            }
        };

        let transition = if probe.is_blocked() {
            let side = probe.side();
            self.clear_streak = 0;
            match active {
                None => CounterTransition::Enter { side },
                Some(from) if from != side => CounterTransition::Shift { from, to: side },
                Some(_) => CounterTransition::Maintain { side },
            }
        } else {
            match active {
                None => CounterTransition::Hold,
                Some(side) => {
                    self.clear_streak += 1;
                    match self.release_after_clear {
                        Some(limit) if self.clear_streak >= limit => CounterTransition::Release { side },
                        _ => CounterTransition::Maintain { side },
                    }
                }
            }
        };

        match transition {
            CounterTransition::Enter { side } | CounterTransition::Shift { to: side, .. } => {
                self.state = CounterState {
                    mode: FormationMode::Counter,
                    active_side: Some(side),
                };
            }
            CounterTransition::Release { .. } => {
                self.state = CounterState::default();
                self.clear_streak = 0;
            }
            CounterTransition::Hold | CounterTransition::Maintain { .. } => {}
        }

        debug!(
            "Counter probe {} -> {} (risk {}): {:?}, now {}",
            probe.spawn, probe.terminal, probe.risk, transition, self.state
        );

        transition
    }
}
