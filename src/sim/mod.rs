//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Seeded RNG only
//! - Time only advances through `Game::tick`
//! - No rendering or platform dependencies

pub mod autoplay;
pub mod frame;
pub mod hole;
pub mod session;
pub mod state;

pub use autoplay::{AutoplayProfile, Autoplayer};
pub use frame::{FrameInput, FrameOutcome, run_frame};
pub use hole::{Hole, HolePool, HoleSpec};
pub use session::{Session, SessionPhase, SessionSummary, hit_reward, window_for};
pub use state::{ClickResult, Game};
