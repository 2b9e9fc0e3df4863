//! Game object owning the session and the hole pool
//!
//! Every mutation of score, timing or hole state goes through the controller
//! operations here. Misuse (calls before `initialize`, after `finalize`) panics.

use glam::IVec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;

use super::hole::{HolePool, HoleSpec};
use super::session::{Session, SessionPhase, SessionSummary};
use crate::consts::*;
use crate::settings::Settings;

/// Result of a click after hit testing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClickResult {
    /// Active hole hit; carries the points awarded
    Hit { hole: usize, reward: i64 },
    /// Click on an inactive hole or on no hole at all
    Miss,
}

/// One whack-a-hole game
#[derive(Debug, Clone)]
pub struct Game {
    /// Run seed for reproducibility
    pub seed: u64,
    rng: Pcg32,
    session: Session,
    holes: HolePool,
    /// Activations so far, including repeats of the same hole
    activations: u64,
}

impl Game {
    /// Create an uninitialized game with the given seed
    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            session: Session::default(),
            holes: HolePool::default(),
            activations: 0,
        }
    }

    /// Create and initialize a game from settings
    pub fn from_settings(settings: &Settings, seed: u64) -> Self {
        let mut game = Self::new(seed);
        game.initialize(
            settings.session_duration_ms,
            settings.base_window_ms,
            &settings.layout,
        );
        game
    }

    /// Start the session: zero the clocks and score, build the layout and
    /// activate the first hole.
    pub fn initialize(
        &mut self,
        session_duration_ms: u64,
        base_window_ms: u64,
        layout: &[HoleSpec],
    ) {
        assert_eq!(
            self.session.phase,
            SessionPhase::NotStarted,
            "initialize called on a game that already started"
        );
        assert!(base_window_ms > 0, "base window must be positive");

        self.session = Session::new(session_duration_ms, base_window_ms);
        self.holes = HolePool::create_layout(layout);
        self.activate_next();

        log::info!(
            "Session started: {} holes, {} ms duration, {} ms window, seed {}",
            self.holes.len(),
            session_duration_ms,
            base_window_ms,
            self.seed
        );
    }

    /// Advance time by `delta_ms`, applying a timeout if the active window expired.
    ///
    /// No timeout is applied once the session has run out; the frame that
    /// crosses the end only finalizes.
    pub fn tick(&mut self, delta_ms: u64) {
        self.assert_running("tick");
        self.session.advance(delta_ms);
        if self.session.timed_out() && !self.session.is_over() {
            self.register_timeout();
        }
    }

    /// Score a hit on the active hole and activate a new one
    pub fn register_hit(&mut self) -> i64 {
        self.assert_running("register_hit");
        let reward = self.session.hit_reward();
        let hole = self.holes.deactivate_active();
        self.session.score += reward;
        self.session.since_activation_ms = 0;
        self.activate_next();
        log::debug!(
            "Hit hole {:?} for {} (score {})",
            hole,
            reward,
            self.session.score
        );
        reward
    }

    /// Penalize a click that hit no active hole
    pub fn register_miss(&mut self) {
        self.assert_running("register_miss");
        self.session.score -= MISS_PENALTY;
        log::debug!("Miss (score {})", self.session.score);
    }

    /// Expire the active hole, penalize and activate a new one.
    ///
    /// With no active hole (empty layout) only the activation clock resets.
    pub fn register_timeout(&mut self) {
        self.assert_running("register_timeout");
        self.session.since_activation_ms = 0;
        let Some(hole) = self.holes.deactivate_active() else {
            return;
        };
        self.session.score -= TIMEOUT_PENALTY;
        self.activate_next();
        log::debug!("Hole {} timed out (score {})", hole, self.session.score);
    }

    /// Hit test a click in canonical coordinates and score it.
    ///
    /// Only the first containing hole in layout order is considered, so an
    /// inactive hole overlapping the active one shadows it.
    pub fn click(&mut self, point: IVec2) -> ClickResult {
        self.assert_running("click");
        let target = self.holes.hit_test(point).map(|(i, h)| (i, h.is_active()));
        match target {
            Some((hole, true)) => {
                let reward = self.register_hit();
                ClickResult::Hit { hole, reward }
            }
            _ => {
                self.register_miss();
                ClickResult::Miss
            }
        }
    }

    pub fn is_session_over(&self) -> bool {
        self.assert_running("is_session_over");
        self.session.is_over()
    }

    /// End the session and produce its summary. Panics if called twice.
    pub fn finalize(&mut self) -> SessionSummary {
        self.assert_running("finalize");
        self.session.phase = SessionPhase::Ended;
        self.holes.deactivate_active();
        let summary = self.session.summary();
        log::info!("Session ended: {}", summary);
        summary
    }

    pub fn phase(&self) -> SessionPhase {
        self.session.phase
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn holes(&self) -> &HolePool {
        &self.holes
    }

    pub fn score(&self) -> i64 {
        self.session.score
    }

    pub fn active_window_ms(&self) -> u64 {
        self.session.active_window_ms
    }

    /// Activation counter; changes whenever a hole (re)activates
    pub fn activations(&self) -> u64 {
        self.activations
    }

    fn activate_next(&mut self) {
        if self.holes.activate_random(&mut self.rng).is_some() {
            self.activations += 1;
        }
    }

    fn assert_running(&self, op: &str) {
        match self.session.phase {
            SessionPhase::Running => {}
            SessionPhase::NotStarted => panic!("{op} called before initialize"),
            SessionPhase::Ended => panic!("{op} called after finalize"),
        }
    }
}
