use serde::{Deserialize, Serialize};

use crate::utils::{
    Size,
    coords::{Cell, CellRange},
};

use super::{Tile, TileKind};

// ----------------------------------------------
// TileMap
// ----------------------------------------------

// Raw tile storage. Row-major grid of `size.width * size.height` tiles.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TileMap {
    size: Size,
    tiles: Vec<Tile>,
}

impl TileMap {
    pub fn new(size: Size) -> Self {
        debug_assert!(size.is_valid());
        Self {
            size,
            tiles: vec![Tile::default(); size.area() as usize],
        }
    }

    #[inline]
    pub fn size(&self) -> Size {
        self.size
    }

    #[inline]
    pub fn max_x(&self) -> i32 {
        self.size.width - 1
    }

    #[inline]
    pub fn max_y(&self) -> i32 {
        self.size.height - 1
    }

    #[inline]
    pub fn is_cell_within_bounds(&self, cell: Cell) -> bool {
        cell.is_valid() && cell.x < self.size.width && cell.y < self.size.height
    }

    #[inline]
    pub fn is_range_within_bounds(&self, range: CellRange) -> bool {
        range.is_valid() && self.is_cell_within_bounds(range.start) && self.is_cell_within_bounds(range.end)
    }

    // Cells along the map border are void in the classic map layout.
    #[inline]
    pub fn is_inner_cell(&self, cell: Cell) -> bool {
        cell.x > 0 && cell.y > 0 && cell.x < self.max_x() && cell.y < self.max_y()
    }

    #[inline]
    pub fn full_range(&self) -> CellRange {
        CellRange::new(Cell::zero(), Cell::new(self.max_x(), self.max_y()))
    }

    #[inline]
    fn cell_to_index(&self, cell: Cell) -> usize {
        debug_assert!(self.is_cell_within_bounds(cell), "Cell {cell} out of map bounds {}", self.size);
        (cell.x + (cell.y * self.size.width)) as usize
    }

    // ----------------------
    // Tile access:
    // ----------------------

    // Panics if the cell is outside the map.
    #[inline]
    pub fn tile(&self, cell: Cell) -> &Tile {
        &self.tiles[self.cell_to_index(cell)]
    }

    #[inline]
    pub fn tile_mut(&mut self, cell: Cell) -> &mut Tile {
        let index = self.cell_to_index(cell);
        &mut self.tiles[index]
    }

    #[inline]
    pub fn try_tile(&self, cell: Cell) -> Option<&Tile> {
        if !self.is_cell_within_bounds(cell) {
            return None;
        }
        Some(self.tile(cell))
    }

    #[inline]
    pub fn try_tile_mut(&mut self, cell: Cell) -> Option<&mut Tile> {
        if !self.is_cell_within_bounds(cell) {
            return None;
        }
        Some(self.tile_mut(cell))
    }

    #[inline]
    pub fn is_tile_kind(&self, cell: Cell, kind: TileKind) -> bool {
        self.try_tile(cell).is_some_and(|tile| tile.is(kind))
    }

    pub fn count_tiles<F>(&self, mut predicate: F) -> usize
        where F: FnMut(&Tile) -> bool
    {
        self.tiles.iter().filter(|tile| predicate(tile)).count()
    }

    pub fn for_each_cell<F>(&self, mut visitor_fn: F)
        where F: FnMut(Cell, &Tile)
    {
        for cell in &self.full_range() {
            visitor_fn(cell, self.tile(cell));
        }
    }

    // ----------------------
    // Searching:
    // ----------------------

    // Visits square rings of increasing radius around `center`, clockwise from
    // the north corner, and returns the first in-bounds cell accepted by `predicate`.
    pub fn circular_search<F>(&self, center: Cell, radius: i32, mut predicate: F) -> Option<Cell>
        where F: FnMut(&TileMap, Cell) -> bool
    {
        debug_assert!(radius >= 0);

        for r in 0..=radius {
            for cell in ring_cells(center, r) {
                if self.is_cell_within_bounds(cell) && predicate(self, cell) {
                    return Some(cell);
                }
            }
        }

        None
    }
}

fn ring_cells(center: Cell, r: i32) -> Vec<Cell> {
    if r == 0 {
        return vec![center];
    }

    let mut cells = Vec::with_capacity((r * 8) as usize);
    for dx in -r..=r {
        cells.push(center.offset(dx, -r));
    }
    for dy in (-r + 1)..=r {
        cells.push(center.offset(r, dy));
    }
    for dx in (-r..r).rev() {
        cells.push(center.offset(dx, r));
    }
    for dy in ((-r + 1)..r).rev() {
        cells.push(center.offset(-r, dy));
    }
    cells
}
