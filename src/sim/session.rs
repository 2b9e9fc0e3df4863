//! Session timing and scoring
//!
//! Pure bookkeeping for one timed play-through. Hole activation is driven by
//! [`Game`](super::Game), which owns both the session and the hole pool.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::format_hms;

/// Session lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum SessionPhase {
    /// Created, `initialize` not yet called
    #[default]
    NotStarted,
    /// Ticking and accepting input
    Running,
    /// `finalize` has produced the summary
    Ended,
}

/// Timing and score state of a session
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Session {
    pub phase: SessionPhase,
    pub session_duration_ms: u64,
    pub base_window_ms: u64,
    pub elapsed_ms: u64,
    /// Current countdown budget for the active hole
    pub active_window_ms: u64,
    pub since_activation_ms: u64,
    /// Unbounded in both directions
    pub score: i64,
}

impl Session {
    pub fn new(session_duration_ms: u64, base_window_ms: u64) -> Self {
        Self {
            phase: SessionPhase::Running,
            session_duration_ms,
            base_window_ms,
            elapsed_ms: 0,
            active_window_ms: base_window_ms,
            since_activation_ms: 0,
            score: 0,
        }
    }

    /// Advance both clocks and recompute the active window
    pub fn advance(&mut self, delta_ms: u64) {
        self.elapsed_ms = self.elapsed_ms.saturating_add(delta_ms);
        self.since_activation_ms = self.since_activation_ms.saturating_add(delta_ms);

        let window = window_for(self.base_window_ms, self.elapsed_ms);
        if window != self.active_window_ms {
            log::trace!(
                "Active window {} -> {} ms at {} ms",
                self.active_window_ms,
                window,
                self.elapsed_ms
            );
            self.active_window_ms = window;
        }
    }

    /// Points for a hit at the current difficulty
    pub fn hit_reward(&self) -> i64 {
        hit_reward(self.base_window_ms, self.active_window_ms)
    }

    pub fn timed_out(&self) -> bool {
        self.since_activation_ms > self.active_window_ms
    }

    pub fn is_over(&self) -> bool {
        self.elapsed_ms >= self.session_duration_ms
    }

    pub fn summary(&self) -> SessionSummary {
        SessionSummary {
            score: self.score,
            elapsed_ms: self.elapsed_ms,
        }
    }
}

/// Active window after `elapsed_ms`: `base / (2 * whole_minutes + 1)`, never below 1 ms
pub fn window_for(base_window_ms: u64, elapsed_ms: u64) -> u64 {
    let minutes = elapsed_ms / DIFFICULTY_UNIT_MS;
    let divisor = minutes.saturating_mul(2).saturating_add(1);
    (base_window_ms / divisor).max(1)
}

/// `round(HIT_REWARD * base / active)`
pub fn hit_reward(base_window_ms: u64, active_window_ms: u64) -> i64 {
    let ratio = base_window_ms as f64 / active_window_ms.max(1) as f64;
    (HIT_REWARD as f64 * ratio).round() as i64
}

/// Final result of a session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionSummary {
    pub score: i64,
    pub elapsed_ms: u64,
}

impl SessionSummary {
    /// Elapsed time as `HH:MM:SS`
    pub fn elapsed_hms(&self) -> String {
        format_hms(self.elapsed_ms)
    }
}

impl fmt::Display for SessionSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}\t{}", self.score, self.elapsed_hms())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_window_steps_on_minute_boundaries() {
        assert_eq!(window_for(1000, 0), 1000);
        assert_eq!(window_for(1000, 30_000), 1000);
        assert_eq!(window_for(1000, 59_999), 1000);
        assert_eq!(window_for(1000, 60_000), 333);
        assert_eq!(window_for(1000, 120_000), 200);
    }

    #[test]
    fn test_window_never_zero() {
        assert_eq!(window_for(1000, u64::MAX), 1);
        assert_eq!(window_for(1, 600_000), 1);
    }

    #[test]
    fn test_hit_reward() {
        assert_eq!(hit_reward(1000, 1000), 100);
        assert_eq!(hit_reward(1000, 500), 200);
        assert_eq!(hit_reward(1000, 333), 300);
        assert_eq!(hit_reward(1000, 200), 500);
    }

    #[test]
    fn test_advance_and_timeout() {
        let mut session = Session::new(60_000, 1000);
        session.advance(1000);
        assert!(!session.timed_out());
        session.advance(1);
        assert!(session.timed_out());
        assert_eq!(session.elapsed_ms, 1001);
    }

    #[test]
    fn test_advance_huge_delta_saturates() {
        let mut session = Session::new(60_000, 1000);
        session.advance(u64::MAX);
        session.advance(u64::MAX);
        assert_eq!(session.elapsed_ms, u64::MAX);
        assert_eq!(session.active_window_ms, 1);
        assert!(session.is_over());
    }

    #[test]
    fn test_summary_display() {
        let summary = SessionSummary {
            score: -150,
            elapsed_ms: 61_500,
        };
        assert_eq!(summary.to_string(), "-150\t00:01:01");
    }
}
