//! Hole pool and random selector
//!
//! Holes are fixed square regions in canonical field space (origin bottom-left,
//! y up). At most one hole is active at a time.

use glam::IVec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

/// Layout entry used to build a hole
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HoleSpec {
    pub x: i32,
    pub y: i32,
    pub size: i32,
}

impl HoleSpec {
    pub const fn new(x: i32, y: i32, size: i32) -> Self {
        Self { x, y, size }
    }
}

/// A clickable square region
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Hole {
    pos: IVec2,
    size: i32,
    is_active: bool,
}

impl Hole {
    fn from_spec(spec: &HoleSpec) -> Self {
        Self {
            pos: IVec2::new(spec.x, spec.y),
            size: spec.size,
            is_active: false,
        }
    }

    /// Lower-left corner
    #[inline]
    pub fn pos(&self) -> IVec2 {
        self.pos
    }

    #[inline]
    pub fn size(&self) -> i32 {
        self.size
    }

    #[inline]
    pub fn is_active(&self) -> bool {
        self.is_active
    }

    /// Upper-right corner, clamped at the edge of `i32`
    pub fn max(&self) -> IVec2 {
        self.pos.saturating_add(IVec2::splat(self.size))
    }

    /// Centre point (rounded down)
    pub fn center(&self) -> IVec2 {
        self.pos.saturating_add(IVec2::splat(self.size / 2))
    }

    /// True if the point lies strictly inside the square; edges never count
    pub fn contains(&self, point: IVec2) -> bool {
        let max = self.max();
        self.pos.x < point.x && point.x < max.x && self.pos.y < point.y && point.y < max.y
    }
}

/// The fixed set of holes for one session
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct HolePool {
    holes: Vec<Hole>,
    /// Index of the active hole, mirrors the `is_active` flags
    active: Option<usize>,
}

impl HolePool {
    /// Build the pool from layout specs; every hole starts inactive
    pub fn create_layout(specs: &[HoleSpec]) -> Self {
        Self {
            holes: specs.iter().map(Hole::from_spec).collect(),
            active: None,
        }
    }

    /// Holes in layout order
    pub fn holes(&self) -> &[Hole] {
        &self.holes
    }

    pub fn len(&self) -> usize {
        self.holes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.holes.is_empty()
    }

    pub fn active_index(&self) -> Option<usize> {
        self.active
    }

    pub fn active(&self) -> Option<&Hole> {
        self.active.map(|i| &self.holes[i])
    }

    /// Activate one hole picked uniformly from the whole pool.
    ///
    /// The previously active hole may be picked again. Returns the index of
    /// the new active hole, or `None` for an empty pool.
    ///
    /// # Panics
    /// If a hole is already active.
    pub fn activate_random<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Option<usize> {
        assert!(
            self.active.is_none(),
            "activate_random called while hole {:?} is still active",
            self.active
        );
        if self.holes.is_empty() {
            return None;
        }
        let index = rng.random_range(0..self.holes.len());
        self.holes[index].is_active = true;
        self.active = Some(index);
        log::debug!("Activated hole {}", index);
        Some(index)
    }

    /// Deactivate the active hole, if any. Returns its index.
    pub fn deactivate_active(&mut self) -> Option<usize> {
        let index = self.active.take()?;
        self.holes[index].is_active = false;
        Some(index)
    }

    /// First hole (in layout order) strictly containing the point
    pub fn hit_test(&self, point: IVec2) -> Option<(usize, &Hole)> {
        self.holes
            .iter()
            .enumerate()
            .find(|(_, hole)| hole.contains(point))
    }

    /// Number of holes flagged active
    pub fn active_count(&self) -> usize {
        self.holes.iter().filter(|h| h.is_active).count()
    }
}
