//! Round orchestration
//!
//! The game owns the cups and at most one animation at a time. Every phase
//! change out of an animating phase happens only when that animation reports
//! completion on a tick, so shuffles and lifts can never overlap and a pick
//! can only land while the cups are still.

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use super::cup::{Cup, CupFactory, CupId, PoseFactory};
use super::hits::{PickHit, Verdict, evaluate};
use super::level::Difficulty;
use super::lift::{LiftDirection, LiftSequence};
use super::shuffle::ShuffleRun;
use super::state::{GameEvent, GamePhase, GameState};
use crate::consts::{CUP_COUNT, MAX_LEVEL};
use crate::tuning::Tuning;

/// The animation currently moving the cups
#[derive(Debug, Clone)]
enum Motion {
    Lift(LiftSequence),
    Shuffle(ShuffleRun),
}

/// A shell game: three cups, one ball, ten levels
pub struct Game<F: CupFactory = PoseFactory> {
    tuning: Tuning,
    factory: F,
    seed: u64,
    rng: Pcg32,
    state: GameState,
    /// Indexed by cup id
    cups: Vec<Cup<F::View>>,
    motion: Option<Motion>,
    /// Verdict waiting for the reveal lift to finish
    pending: Option<Verdict>,
    events: Vec<GameEvent>,
}

impl Game<PoseFactory> {
    /// A headless game with default tuning
    pub fn new(seed: u64) -> Self {
        Self::with_factory(seed, Tuning::default(), PoseFactory)
    }

    pub fn with_tuning(seed: u64, tuning: Tuning) -> Self {
        Self::with_factory(seed, tuning, PoseFactory)
    }
}

impl<F: CupFactory> Game<F> {
    /// Create a game and set up its first round. `tuning` is expected to be
    /// validated already.
    pub fn with_factory(seed: u64, tuning: Tuning, factory: F) -> Self {
        let difficulty = Difficulty::with_frame_base(tuning.start_level, tuning.frame_base);
        let mut game = Self {
            tuning,
            factory,
            seed,
            rng: Pcg32::seed_from_u64(seed),
            state: GameState::new(0, difficulty),
            cups: Vec::with_capacity(CUP_COUNT),
            motion: None,
            pending: None,
            events: Vec::new(),
        };
        game.new_game();
        game
    }

    /// Start over at the configured start level with a freshly hidden ball.
    ///
    /// Refused while an animation is in flight. Returns whether it happened.
    pub fn new_game(&mut self) -> bool {
        if self.state.phase.is_animating() {
            log::warn!("New game ignored during {:?}", self.state.phase);
            return false;
        }

        let secret = self.rng.random_range(0..CUP_COUNT);
        let difficulty =
            Difficulty::with_frame_base(self.tuning.start_level, self.tuning.frame_base);
        self.state = GameState::new(secret, difficulty);
        self.motion = None;
        self.pending = None;

        self.cups.clear();
        for id in 0..CUP_COUNT {
            let base_x = self.tuning.cup_spacing * id as f64;
            let carries_ball = id == secret;
            let view = self.factory.create(base_x, id, carries_ball);
            self.cups.push(Cup::new(id, base_x, carries_ball, view));
        }

        log::info!("New game at level {}", difficulty.level);
        self.events.push(GameEvent::Reset);
        self.events.push(GameEvent::LevelChanged {
            level: difficulty.level,
        });
        true
    }

    /// Start a round: reveal the ball (first round) or lower the cups, then
    /// shuffle. Only accepted when idle.
    pub fn play(&mut self) -> bool {
        if self.state.phase != GamePhase::Idle {
            log::warn!("Play ignored during {:?}", self.state.phase);
            return false;
        }

        let direction = if self.state.first_round {
            self.state.first_round = false;
            None
        } else {
            Some(LiftDirection::Down)
        };

        log::info!(
            "Round {} at level {}: {} passes of {} frames",
            self.state.rounds + 1,
            self.state.level(),
            self.state.difficulty.shuffle_count,
            self.state.difficulty.frame_budget
        );
        self.events.push(GameEvent::Hide);
        self.start_lift(self.state.secret(), direction);
        self.set_phase(GamePhase::Revealing);
        true
    }

    /// Handle a pick from the pointer source, hits ranked nearest first.
    ///
    /// Ignored unless waiting for input. An empty pick leaves input open.
    /// Returns whether the pick was taken.
    ///
    /// # Panics
    ///
    /// If any hit names a cup id the game never created.
    pub fn on_pick(&mut self, hits: &[PickHit]) -> bool {
        for hit in hits {
            assert!(
                hit.cup < CUP_COUNT,
                "pick source reported unknown cup {}",
                hit.cup
            );
        }

        if self.state.phase != GamePhase::AwaitingInput {
            log::debug!("Pick ignored during {:?}", self.state.phase);
            return false;
        }
        if hits.is_empty() {
            log::debug!("Pick missed every cup");
            return false;
        }

        let verdict = evaluate(hits, self.state.secret());
        log::debug!("Picked cup {}", verdict.cup);
        self.pending = Some(verdict);
        self.start_lift(verdict.cup, Some(LiftDirection::Up));
        self.set_phase(GamePhase::Resolving);
        true
    }

    /// Advance one display frame; `dt_ms` is the wall-clock time since the
    /// previous tick.
    pub fn tick(&mut self, dt_ms: f64) {
        let Some(motion) = self.motion.as_mut() else {
            return;
        };

        let status = match motion {
            Motion::Lift(sequence) => sequence.advance(dt_ms, &mut self.cups),
            Motion::Shuffle(run) => run.advance(&mut self.cups, &mut self.rng),
        };

        if status.is_complete() {
            self.motion = None;
            self.motion_complete();
        }
    }

    fn motion_complete(&mut self) {
        match self.state.phase {
            GamePhase::Revealing => {
                let difficulty = self.state.difficulty;
                if difficulty.shuffle_count == 0 {
                    self.set_phase(GamePhase::AwaitingInput);
                    return;
                }
                self.motion = Some(Motion::Shuffle(ShuffleRun::new(
                    difficulty.shuffle_count,
                    self.tuning.move_distance,
                    difficulty.frame_budget,
                )));
                self.set_phase(GamePhase::Shuffling);
            }
            GamePhase::Shuffling => self.set_phase(GamePhase::AwaitingInput),
            GamePhase::Resolving => {
                if let Some(verdict) = self.pending.take() {
                    self.resolve(verdict);
                }
                self.set_phase(GamePhase::Idle);
            }
            phase => log::warn!("Animation finished with nothing to continue in {phase:?}"),
        }
    }

    fn resolve(&mut self, verdict: Verdict) {
        self.state.rounds += 1;
        let delta = if verdict.hit {
            self.state.wins += 1;
            self.events.push(GameEvent::Win);
            if self.state.level() == MAX_LEVEL {
                log::info!("Top level cleared");
                self.events.push(GameEvent::RescueAchieved);
            }
            1
        } else {
            self.events.push(GameEvent::Lose);
            -1
        };

        let level = self.state.shift_level(delta, self.tuning.frame_base);
        log::info!(
            "Round {} {}: level {}",
            self.state.rounds,
            if verdict.hit { "won" } else { "lost" },
            level
        );
        self.events.push(GameEvent::LevelChanged { level });
        self.events.push(GameEvent::PlayAgainAvailable);
    }

    fn start_lift(&mut self, first: CupId, direction: Option<LiftDirection>) {
        debug_assert!(self.motion.is_none(), "lift started over a running animation");
        self.motion = Some(Motion::Lift(LiftSequence::new(
            first,
            direction,
            self.state.difficulty.frame_budget,
            self.tuning.lift_stagger_ms,
        )));
    }

    fn set_phase(&mut self, phase: GamePhase) {
        log::debug!("Phase {:?} -> {:?}", self.state.phase, phase);
        self.state.phase = phase;
    }

    /// Take the signals emitted since the last call
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn phase(&self) -> GamePhase {
        self.state.phase
    }

    pub fn accepts_input(&self) -> bool {
        self.state.phase == GamePhase::AwaitingInput
    }

    pub fn level(&self) -> u8 {
        self.state.level()
    }

    pub fn difficulty(&self) -> Difficulty {
        self.state.difficulty
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    /// Cups in id order
    pub fn cups(&self) -> &[Cup<F::View>] {
        &self.cups
    }

    pub fn views(&self) -> impl Iterator<Item = &F::View> {
        self.cups.iter().map(|cup| &cup.view)
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn tuning(&self) -> &Tuning {
        &self.tuning
    }
}
