//! The [`Board`] type — an exclusive cell-to-tile mapping.
//!
//! The board is the single source of truth for occupancy: tiles do not
//! track it themselves. Storage is a plain row-major buffer; after a move
//! resolution commits, the cell a tile is stored under equals the tile's
//! target position (its current position lags until the slide settles).

use rand::Rng;

use crate::error::{BoardError, Result};
use crate::geom::Point;
use crate::tile::Tile;

/// A fixed-size grid of cells, each holding at most one [`Tile`].
#[derive(Debug, Clone)]
pub struct Board {
    width: i32,
    height: i32,
    cells: Vec<Option<Tile>>,
}

impl Board {
    /// Create an empty board. Dimensions must be positive.
    pub fn new(width: i32, height: i32) -> Self {
        assert!(width > 0 && height > 0, "board dimensions must be positive");
        Self {
            width,
            height,
            cells: vec![None; (width * height) as usize],
        }
    }

    /// Width in columns.
    #[inline]
    pub fn width(&self) -> i32 {
        self.width
    }

    /// Height in rows.
    #[inline]
    pub fn height(&self) -> i32 {
        self.height
    }

    /// Whether `p` is inside the board.
    #[inline]
    pub fn contains(&self, p: Point) -> bool {
        p.x >= 0 && p.x < self.width && p.y >= 0 && p.y < self.height
    }

    #[inline]
    fn index(&self, p: Point) -> usize {
        (p.y * self.width + p.x) as usize
    }

    fn check(&self, p: Point) -> Result<()> {
        if self.contains(p) {
            Ok(())
        } else {
            Err(BoardError::OutOfBounds {
                pos: p,
                width: self.width,
                height: self.height,
            })
        }
    }

    /// The tile at `p`, or `None` for an empty cell.
    ///
    /// Out-of-bounds coordinates are an error, never clamped.
    pub fn at(&self, p: Point) -> Result<Option<&Tile>> {
        self.check(p)?;
        Ok(self.cells[self.index(p)].as_ref())
    }

    /// Bind the cell at `p` to `tile`, overwriting any prior occupant
    /// reference. A prior occupant must already have been logically
    /// removed by the caller; the board does not enforce that.
    pub fn place(&mut self, p: Point, tile: Tile) -> Result<()> {
        self.check(p)?;
        let idx = self.index(p);
        self.cells[idx] = Some(tile);
        Ok(())
    }

    /// Remove and return the tile at `p`.
    pub fn take(&mut self, p: Point) -> Result<Option<Tile>> {
        self.check(p)?;
        let idx = self.index(p);
        Ok(self.cells[idx].take())
    }

    /// Every empty cell, in row-major order.
    pub fn empty_cells(&self) -> Vec<Point> {
        self.iter()
            .filter(|(_, t)| t.is_none())
            .map(|(p, _)| p)
            .collect()
    }

    /// Whether every cell is occupied.
    pub fn is_full(&self) -> bool {
        self.cells.iter().all(Option::is_some)
    }

    /// Number of tiles on the board.
    pub fn tile_count(&self) -> usize {
        self.cells.iter().filter(|c| c.is_some()).count()
    }

    /// Place a new tile of value 2 or 4 (50/50) on a uniformly chosen
    /// empty cell. Returns the chosen cell, or [`BoardError::Full`] when
    /// no cell is empty.
    pub fn spawn_random<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Result<Point> {
        let empty = self.empty_cells();
        if empty.is_empty() {
            return Err(BoardError::Full);
        }
        let pos = empty[rng.random_range(0..empty.len())];
        let value = if rng.random_bool(0.5) { 2 } else { 4 };
        log::trace!("spawn {value} at {pos}");
        self.place(pos, Tile::new(value, pos))?;
        Ok(pos)
    }

    /// Clear all cells and seed two random tiles.
    pub fn reset<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Result<()> {
        self.cells.fill(None);
        self.spawn_random(rng)?;
        self.spawn_random(rng)?;
        Ok(())
    }

    /// Complete every in-flight slide (`pos` catches up with `target`).
    pub fn settle_all(&mut self) {
        for cell in self.cells.iter_mut().flatten() {
            cell.settle();
        }
    }

    /// Whether any tile is mid-slide.
    pub fn any_sliding(&self) -> bool {
        self.tiles().any(Tile::is_sliding)
    }

    /// Row-major iterator over `(Point, Option<&Tile>)` for drawing.
    pub fn iter(&self) -> impl Iterator<Item = (Point, Option<&Tile>)> {
        let width = self.width;
        self.cells
            .iter()
            .enumerate()
            .map(move |(i, cell)| (Point::new(i as i32 % width, i as i32 / width), cell.as_ref()))
    }

    /// Iterator over occupied cells only.
    pub fn tiles(&self) -> impl Iterator<Item = &Tile> {
        self.cells.iter().flatten()
    }

    pub(crate) fn replace_cells(&mut self, cells: Vec<Option<Tile>>) {
        debug_assert_eq!(cells.len(), self.cells.len());
        self.cells = cells;
    }

    pub(crate) fn cells(&self) -> &[Option<Tile>] {
        &self.cells
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::SmallRng;

    #[test]
    fn at_rejects_out_of_bounds() {
        let b = Board::new(4, 4);
        assert!(b.at(Point::new(0, 0)).is_ok());
        assert_eq!(
            b.at(Point::new(4, 0)),
            Err(BoardError::OutOfBounds {
                pos: Point::new(4, 0),
                width: 4,
                height: 4,
            })
        );
        assert!(b.at(Point::new(-1, 2)).is_err());
        assert!(b.at(Point::new(2, 17)).is_err());
    }

    #[test]
    fn place_and_take() {
        let mut b = Board::new(4, 4);
        let p = Point::new(2, 3);
        b.place(p, Tile::new(8, p)).unwrap();
        assert_eq!(b.at(p).unwrap().map(Tile::value), Some(8));
        assert_eq!(b.take(p).unwrap().map(|t| t.value()), Some(8));
        assert_eq!(b.at(p).unwrap(), None);
    }

    #[test]
    fn spawn_fills_an_empty_cell() {
        let mut b = Board::new(4, 4);
        let mut rng = SmallRng::seed_from_u64(7);
        let pos = b.spawn_random(&mut rng).unwrap();
        let tile = b.at(pos).unwrap().copied().unwrap();
        assert!(tile.value() == 2 || tile.value() == 4);
        assert_eq!(tile.pos(), pos);
        assert_eq!(b.tile_count(), 1);
    }

    #[test]
    fn spawn_on_full_board_fails() {
        let mut b = Board::new(2, 2);
        for y in 0..2 {
            for x in 0..2 {
                let p = Point::new(x, y);
                b.place(p, Tile::new(2, p)).unwrap();
            }
        }
        assert!(b.is_full());
        let mut rng = SmallRng::seed_from_u64(0);
        assert_eq!(b.spawn_random(&mut rng), Err(BoardError::Full));
    }

    #[test]
    fn spawn_only_targets_empty_cells() {
        let mut b = Board::new(2, 2);
        for p in [Point::new(0, 0), Point::new(1, 0), Point::new(0, 1)] {
            b.place(p, Tile::new(2, p)).unwrap();
        }
        let mut rng = SmallRng::seed_from_u64(3);
        // Only (1, 1) is free.
        assert_eq!(b.spawn_random(&mut rng).unwrap(), Point::new(1, 1));
    }

    #[test]
    fn reset_seeds_two_tiles() {
        let mut b = Board::new(4, 4);
        let mut rng = SmallRng::seed_from_u64(42);
        for y in 0..4 {
            for x in 0..4 {
                let p = Point::new(x, y);
                b.place(p, Tile::new(2, p)).unwrap();
            }
        }
        b.reset(&mut rng).unwrap();
        assert_eq!(b.tile_count(), 2);
        for t in b.tiles() {
            assert!(t.value() == 2 || t.value() == 4);
        }
    }

    #[test]
    fn iter_is_row_major() {
        let b = Board::new(3, 2);
        let points: Vec<Point> = b.iter().map(|(p, _)| p).collect();
        assert_eq!(points.len(), 6);
        assert_eq!(points[0], Point::new(0, 0));
        assert_eq!(points[2], Point::new(2, 0));
        assert_eq!(points[3], Point::new(0, 1));
    }
}
