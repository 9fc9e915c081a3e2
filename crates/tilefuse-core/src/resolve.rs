//! Move resolution: per-lane slide-and-merge.
//!
//! Every move processes each lane (a row for horizontal moves, a column
//! for vertical ones) independently, nearest the wall first, against a
//! read-only snapshot of the pre-move board. The whole board is then
//! committed in one step, so no tile's decision can observe a partially
//! updated grid.
//!
//! Merge rule: a moving tile that runs into an equal-valued tile absorbs
//! it, doubling the mover's value, and a tile produced by a merge cannot
//! merge again in the same sweep. So `[2, _, 2, 4]` pushed left becomes
//! `[4, 4, _, _]`: the freshly merged 4 does not absorb the sliding 4.

use crate::board::Board;
use crate::geom::Point;
use crate::tile::Tile;

/// A move direction.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Dir {
    Left,
    Right,
    Up,
    Down,
}

/// The result of a move resolution.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum MoveOutcome {
    /// At least one tile slid or merged; `merges` counts absorbed pairs.
    Moved { merges: usize },
    /// No tile could move or merge; the board was left untouched.
    Unchanged,
}

impl MoveOutcome {
    /// Whether the move had any effect.
    #[inline]
    pub fn changed(&self) -> bool {
        matches!(self, Self::Moved { .. })
    }
}

impl Board {
    /// Resolve a move in `dir`: slide every tile toward the wall, merging
    /// equal-valued pairs, and commit all destinations atomically.
    ///
    /// Surviving tiles keep their current position and receive their new
    /// cell as target, which drives the slide animation. A tile absorbed
    /// by a merge is removed from the board here.
    pub fn resolve_move(&mut self, dir: Dir) -> MoveOutcome {
        let w = self.width();
        let h = self.height();
        let (lanes, lane_len) = match dir {
            Dir::Left | Dir::Right => (h, w),
            Dir::Up | Dir::Down => (w, h),
        };
        // Cell occupied by `slot` in `lane`, slot 0 being at the wall.
        let cell_at = move |lane: i32, slot: i32| -> Point {
            match dir {
                Dir::Left => Point::new(slot, lane),
                Dir::Right => Point::new(w - 1 - slot, lane),
                Dir::Up => Point::new(lane, slot),
                Dir::Down => Point::new(lane, h - 1 - slot),
            }
        };

        let mut next: Vec<Option<Tile>> = vec![None; self.cells().len()];
        let mut merges = 0usize;
        let mut changed = false;

        for lane in 0..lanes {
            // (tile, merged-this-sweep) per filled slot, wall outward.
            let mut slots: Vec<(Tile, bool)> = Vec::new();
            for s in 0..lane_len {
                let src = cell_at(lane, s);
                let Some(&tile) = self.cells()[(src.y * w + src.x) as usize].as_ref() else {
                    continue;
                };
                if let Some((slot_tile, merged)) = slots.last_mut() {
                    if !*merged && slot_tile.value() == tile.value() {
                        // The mover absorbs the tile already at the slot.
                        let mut mover = tile;
                        mover.double();
                        *slot_tile = mover;
                        *merged = true;
                        merges += 1;
                        changed = true;
                        continue;
                    }
                }
                if cell_at(lane, slots.len() as i32) != src {
                    changed = true;
                }
                slots.push((tile, false));
            }
            for (s, (mut tile, _)) in slots.into_iter().enumerate() {
                let dest = cell_at(lane, s as i32);
                tile.set_target(dest);
                next[(dest.y * w + dest.x) as usize] = Some(tile);
            }
        }

        if !changed {
            return MoveOutcome::Unchanged;
        }
        self.replace_cells(next);
        log::debug!("move {dir:?}: {merges} merges");
        MoveOutcome::Moved { merges }
    }
}
