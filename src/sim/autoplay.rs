//! Scripted player for headless runs

use glam::IVec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use super::frame::FrameInput;
use super::state::Game;

/// Point that no default layout covers; used for deliberate misclicks
const MISCLICK_POINT: IVec2 = IVec2::new(-1, -1);

/// Reaction behaviour of the autoplayer
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AutoplayProfile {
    pub min_reaction_ms: u64,
    pub max_reaction_ms: u64,
    /// Chance (0-1) that a click lands outside every hole
    pub miss_chance: f64,
}

impl Default for AutoplayProfile {
    fn default() -> Self {
        Self {
            min_reaction_ms: 250,
            max_reaction_ms: 700,
            miss_chance: 0.1,
        }
    }
}

/// Clicks the active hole after a random reaction delay
#[derive(Debug, Clone)]
pub struct Autoplayer {
    profile: AutoplayProfile,
    rng: Pcg32,
    /// Activation the current reaction delay belongs to
    seen_activation: u64,
    reaction_ms: u64,
    fired: bool,
}

impl Autoplayer {
    pub fn new(seed: u64, profile: AutoplayProfile) -> Self {
        let mut rng = Pcg32::seed_from_u64(seed);
        let reaction_ms = roll_reaction(&mut rng, &profile);
        Self {
            profile,
            rng,
            seen_activation: 0,
            reaction_ms,
            fired: false,
        }
    }

    /// Input for the next frame
    pub fn plan(&mut self, game: &Game) -> FrameInput {
        let Some(hole) = game.holes().active() else {
            return FrameInput::default();
        };

        if game.activations() != self.seen_activation {
            self.seen_activation = game.activations();
            self.reaction_ms = roll_reaction(&mut self.rng, &self.profile);
            self.fired = false;
        }

        if self.fired || game.session().since_activation_ms < self.reaction_ms {
            return FrameInput::default();
        }
        self.fired = true;

        let target = if self.rng.random_bool(self.profile.miss_chance.clamp(0.0, 1.0)) {
            MISCLICK_POINT
        } else {
            hole.center()
        };
        FrameInput {
            quit: false,
            clicks: vec![target],
        }
    }
}

fn roll_reaction(rng: &mut Pcg32, profile: &AutoplayProfile) -> u64 {
    let max = profile.max_reaction_ms.max(profile.min_reaction_ms);
    rng.random_range(profile.min_reaction_ms..=max)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::Settings;
    use crate::sim::{FrameOutcome, run_frame};

    #[test]
    fn test_perfect_player_scores() {
        let settings = Settings::default();
        let mut game = Game::from_settings(&settings, 5);
        let mut player = Autoplayer::new(
            5,
            AutoplayProfile {
                min_reaction_ms: 100,
                max_reaction_ms: 200,
                miss_chance: 0.0,
            },
        );

        let summary = loop {
            let input = player.plan(&game);
            match run_frame(&mut game, &input, 16) {
                FrameOutcome::Continue => {}
                FrameOutcome::Finished(summary) => break summary,
                FrameOutcome::Quit => unreachable!(),
            }
        };

        // Always faster than the one-second window: every activation is a hit
        assert!(summary.score > 0);
        assert_eq!(summary.score % 100, 0);
        assert!(summary.elapsed_ms >= settings.session_duration_ms);
    }

    #[test]
    fn test_one_click_per_activation() {
        let mut game = Game::from_settings(&Settings::default(), 9);
        let mut player = Autoplayer::new(
            9,
            AutoplayProfile {
                min_reaction_ms: 0,
                max_reaction_ms: 0,
                miss_chance: 1.0,
            },
        );

        assert_eq!(player.plan(&game).clicks, vec![MISCLICK_POINT]);
        // Missing does not reactivate, so no second click
        run_frame(&mut game, &FrameInput { quit: false, clicks: vec![MISCLICK_POINT] }, 16);
        assert!(player.plan(&game).clicks.is_empty());
    }
}
