//! The [`Tile`] type and its transition state machine.
//!
//! A tile records where it logically sits (`pos`) and where the last move
//! sent it (`target`). While the two differ the tile is *sliding*: its
//! visual offset interpolates linearly from its old cell toward the new
//! one as the externally supplied progress `t` goes from 0 to 1. Settling
//! (at `t >= 1`) is the only place `pos` catches up with `target`.

use crate::geom::{Offset, Point, lerp};

/// The transition state of a tile, derived from its positions.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Transition {
    /// `pos == target`; the visual offset is zero.
    Settled,
    /// `pos != target`; the tile is mid-slide.
    Sliding,
}

/// A single numbered block on the board.
///
/// The value is always a power of two. Tiles are owned exclusively by the
/// board cell they occupy; a merged-away tile is dropped at resolution
/// time.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Tile {
    value: u32,
    pos: Point,
    target: Point,
}

impl Tile {
    /// Create a settled tile at `pos`.
    pub const fn new(value: u32, pos: Point) -> Self {
        Self {
            value,
            pos,
            target: pos,
        }
    }

    /// The tile's value.
    #[inline]
    pub const fn value(&self) -> u32 {
        self.value
    }

    /// Current (logical) position; lags `target` while sliding.
    #[inline]
    pub const fn pos(&self) -> Point {
        self.pos
    }

    /// Target position set by the last move resolution.
    #[inline]
    pub const fn target(&self) -> Point {
        self.target
    }

    /// Derived transition state.
    #[inline]
    pub fn transition(&self) -> Transition {
        if self.pos == self.target {
            Transition::Settled
        } else {
            Transition::Sliding
        }
    }

    /// Whether the tile is mid-slide.
    #[inline]
    pub fn is_sliding(&self) -> bool {
        self.transition() == Transition::Sliding
    }

    /// Begin a slide toward `target`.
    #[inline]
    pub(crate) fn set_target(&mut self, target: Point) {
        self.target = target;
    }

    /// Double the value (another tile merged into this one).
    #[inline]
    pub(crate) fn double(&mut self) {
        self.value *= 2;
    }

    /// Complete the transition: `pos` catches up with `target`.
    #[inline]
    pub fn settle(&mut self) {
        self.pos = self.target;
    }

    /// Visual displacement at progress `t` for cells of `cell_size` pixels.
    ///
    /// Drawn at `pos * cell_size + offset`, the tile appears at its old
    /// cell at `t = 0` and at its new cell as `t` reaches 1. Zero for a
    /// settled tile at any `t`.
    pub fn offset(&self, t: f32, cell_size: f32) -> Offset {
        if self.pos == self.target {
            return Offset::ZERO;
        }
        let t = t.clamp(0.0, 1.0);
        let delta = self.target - self.pos;
        Offset::new(
            lerp(0.0, delta.x as f32 * cell_size, t),
            lerp(0.0, delta.y as f32 * cell_size, t),
        )
    }
}
