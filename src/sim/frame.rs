//! One frame of the run loop
//!
//! Input is processed first, then time advances. The loop ends when the player
//! quits or the session runs out; the caller owns process exit.

use glam::IVec2;

use super::session::SessionSummary;
use super::state::{ClickResult, Game};

/// Canonical input for a single frame
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FrameInput {
    /// Quit or escape requested
    pub quit: bool,
    /// Primary-button clicks in canonical field space, oldest first
    pub clicks: Vec<IVec2>,
}

/// What the run loop should do after a frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameOutcome {
    Continue,
    /// Player asked to leave; no summary is produced
    Quit,
    /// Session time ran out
    Finished(SessionSummary),
}

/// Run one frame: clicks, then `tick(delta_ms)`, then the end-of-session check
pub fn run_frame(game: &mut Game, input: &FrameInput, delta_ms: u64) -> FrameOutcome {
    if input.quit {
        log::info!("Quit requested at {} ms", game.session().elapsed_ms);
        return FrameOutcome::Quit;
    }

    for &click in &input.clicks {
        if let ClickResult::Hit { hole, reward } = game.click(click) {
            log::trace!("Click {:?} hit hole {} (+{})", click, hole, reward);
        }
    }

    game.tick(delta_ms);

    if game.is_session_over() {
        FrameOutcome::Finished(game.finalize())
    } else {
        FrameOutcome::Continue
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::HoleSpec;

    fn game(duration: u64) -> Game {
        let mut game = Game::new(99);
        game.initialize(duration, 1000, &[HoleSpec::new(0, 0, 100)]);
        game
    }

    #[test]
    fn test_quit_stops_before_tick() {
        let mut g = game(60_000);
        let input = FrameInput {
            quit: true,
            clicks: vec![IVec2::new(50, 50)],
        };
        assert_eq!(run_frame(&mut g, &input, 16), FrameOutcome::Quit);
        assert_eq!(g.session().elapsed_ms, 0);
        assert_eq!(g.score(), 0);
    }

    #[test]
    fn test_clicks_processed_in_order() {
        let mut g = game(60_000);
        // Single hole is always the active one
        let input = FrameInput {
            quit: false,
            clicks: vec![IVec2::new(50, 50), IVec2::new(500, 500), IVec2::new(50, 50)],
        };
        assert_eq!(run_frame(&mut g, &input, 16), FrameOutcome::Continue);
        assert_eq!(g.score(), 100 - 50 + 100);
        assert_eq!(g.session().elapsed_ms, 16);
    }

    #[test]
    fn test_finishes_when_time_runs_out() {
        let mut g = game(1000);
        let outcome = run_frame(&mut g, &FrameInput::default(), 1001);
        // The frame that ends the session applies no timeout
        assert_eq!(
            outcome,
            FrameOutcome::Finished(SessionSummary {
                score: 0,
                elapsed_ms: 1001,
            })
        );
    }
}
