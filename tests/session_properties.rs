//! Property tests for session timing, scoring and hole activation

use glam::IVec2;
use proptest::prelude::*;

use whack_hole::Settings;
use whack_hole::sim::{FrameInput, FrameOutcome, Game, hit_reward, run_frame, window_for};

#[derive(Debug, Clone)]
enum Op {
    Tick(u64),
    Click(i32, i32),
}

fn op() -> impl Strategy<Value = Op> {
    prop_oneof![
        (0u64..5_000).prop_map(Op::Tick),
        (-100i32..2_000, -100i32..1_200).prop_map(|(x, y)| Op::Click(x, y)),
    ]
}

fn running_game(seed: u64) -> Game {
    let mut game = Game::new(seed);
    game.initialize(600_000, 1000, &Settings::default().layout);
    game
}

proptest! {
    #[test]
    fn at_most_one_active_hole(seed in any::<u64>(), ops in prop::collection::vec(op(), 0..200)) {
        let mut game = running_game(seed);
        prop_assert_eq!(game.holes().active_count(), 1);
        for op in ops {
            match op {
                Op::Tick(dt) => game.tick(dt),
                Op::Click(x, y) => {
                    game.click(IVec2::new(x, y));
                }
            }
            prop_assert_eq!(game.holes().active_count(), 1);
            if game.is_session_over() {
                break;
            }
        }
    }

    #[test]
    fn window_is_non_increasing(
        base in 1u64..10_000,
        a in 0u64..10_000_000,
        b in 0u64..10_000_000,
    ) {
        let (early, late) = (a.min(b), a.max(b));
        prop_assert!(window_for(base, late) <= window_for(base, early));
        prop_assert!(window_for(base, late) > 0);
    }

    #[test]
    fn hit_reward_grows_with_time(
        base in 1u64..10_000,
        a in 0u64..10_000_000,
        b in 0u64..10_000_000,
    ) {
        let (early, late) = (a.min(b), a.max(b));
        let early_reward = hit_reward(base, window_for(base, early));
        let late_reward = hit_reward(base, window_for(base, late));
        prop_assert!(early_reward > 0);
        prop_assert!(late_reward >= early_reward);
    }

    #[test]
    fn miss_costs_fifty(
        seed in any::<u64>(),
        elapsed in 0u64..50_000,
        x in -500i32..0,
        y in -500i32..0,
    ) {
        let mut game = running_game(seed);
        game.tick(elapsed);
        let before = game.score();
        game.click(IVec2::new(x, y));
        prop_assert_eq!(game.score(), before - 50);
    }

    #[test]
    fn timeout_costs_hundred_and_reactivates_once(seed in any::<u64>(), overshoot in 1u64..1_000) {
        let mut game = running_game(seed);
        let activations = game.activations();
        game.tick(game.active_window_ms() + overshoot);
        prop_assert_eq!(game.score(), -100);
        prop_assert_eq!(game.activations(), activations + 1);
        prop_assert_eq!(game.holes().active_count(), 1);
    }

    #[test]
    fn large_deltas_never_panic(deltas in prop::collection::vec(any::<u64>(), 1..20)) {
        let mut game = running_game(3);
        for dt in deltas {
            match run_frame(&mut game, &FrameInput::default(), dt) {
                FrameOutcome::Continue => {}
                FrameOutcome::Finished(summary) => {
                    prop_assert!(summary.elapsed_ms >= 600_000);
                    break;
                }
                FrameOutcome::Quit => prop_assert!(false, "no quit requested"),
            }
        }
    }
}
