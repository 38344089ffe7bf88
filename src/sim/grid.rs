//! Maze grid and the per-frame view derived from it

use std::fmt;

use glam::{IVec2, Vec2};
use serde::{Deserialize, Serialize};

/// State of a single maze cell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Cell {
    Path,
    /// Solid wall the player cannot currently see
    HiddenWall,
    /// Solid wall lit by an echo pulse (view only, never stored in a `Grid`)
    ShownWall,
}

impl Cell {
    /// Both wall states are solid for collision
    #[inline]
    pub fn is_wall(self) -> bool {
        !matches!(self, Cell::Path)
    }

    /// ASCII glyph used by snapshots
    pub fn glyph(self) -> char {
        match self {
            Cell::Path => '.',
            Cell::HiddenWall => ' ',
            Cell::ShownWall => '#',
        }
    }
}

/// Integer cell coordinate. May be out of range; queries treat that as a safe default.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct CellPos {
    pub x: i32,
    pub y: i32,
}

impl CellPos {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Neighbour offset by a step
    #[inline]
    pub fn offset(self, dx: i32, dy: i32) -> Self {
        Self::new(self.x + dx, self.y + dy)
    }
}

/// Flat index of `pos` in a `width` x `height` row-major buffer
#[inline]
fn row_major_index(width: usize, height: usize, pos: CellPos) -> Option<usize> {
    let x = usize::try_from(pos.x).ok().filter(|x| *x < width)?;
    let y = usize::try_from(pos.y).ok().filter(|y| *y < height)?;
    Some(y * width + x)
}

/// Canonical maze layout. Holds only `Path` and `HiddenWall`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Grid {
    width: usize,
    height: usize,
    cells: Vec<Cell>,
}

impl Grid {
    /// A grid with every cell set to `cell`
    pub fn filled(width: usize, height: usize, cell: Cell) -> Self {
        Self {
            width,
            height,
            cells: vec![cell; width * height],
        }
    }

    /// Build a grid from text rows: `#` is a wall, anything else is path
    pub fn parse(rows: &[&str]) -> Self {
        let height = rows.len();
        let width = rows.iter().map(|r| r.chars().count()).max().unwrap_or(0);
        let mut grid = Self::filled(width, height, Cell::Path);
        for (y, row) in rows.iter().enumerate() {
            for (x, ch) in row.chars().enumerate() {
                if ch == '#' {
                    grid.cells[y * width + x] = Cell::HiddenWall;
                }
            }
        }
        grid
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Row-major cell slice
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Top-left start cell
    pub fn start(&self) -> CellPos {
        CellPos::new(0, 0)
    }

    /// Bottom-right exit cell
    pub fn exit(&self) -> CellPos {
        CellPos::new(self.width as i32 - 1, self.height as i32 - 1)
    }

    #[inline]
    pub fn in_bounds(&self, pos: CellPos) -> bool {
        self.index(pos).is_some()
    }

    #[inline]
    fn index(&self, pos: CellPos) -> Option<usize> {
        row_major_index(self.width, self.height, pos)
    }

    pub fn get(&self, pos: CellPos) -> Option<Cell> {
        self.index(pos).map(|i| self.cells[i])
    }

    /// Solid cell check; out-of-range cells are not walls
    #[inline]
    pub fn is_wall(&self, pos: CellPos) -> bool {
        self.get(pos).is_some_and(Cell::is_wall)
    }

    /// Overwrite a cell. Out-of-range writes are ignored.
    pub(crate) fn set(&mut self, pos: CellPos, cell: Cell) {
        debug_assert!(cell != Cell::ShownWall, "ShownWall is view-only");
        if let Some(i) = self.index(pos) {
            self.cells[i] = cell;
        }
    }

    /// Pixel rectangle (min corner, size) of a cell
    pub fn cell_rect(pos: CellPos, cell_size: i32) -> (IVec2, IVec2) {
        (
            IVec2::new(pos.x * cell_size, pos.y * cell_size),
            IVec2::splat(cell_size),
        )
    }

    /// Pixel-space centre of a cell
    pub fn cell_center(pos: CellPos, cell_size: i32) -> Vec2 {
        let size = cell_size as f32;
        Vec2::new((pos.x as f32 + 0.5) * size, (pos.y as f32 + 0.5) * size)
    }

    /// Cell containing a pixel point, clamped into the grid
    pub fn cell_at_clamped(&self, point: Vec2, cell_size: i32) -> CellPos {
        let size = cell_size as f32;
        let x = (point.x / size).floor() as i32;
        let y = (point.y / size).floor() as i32;
        CellPos::new(
            x.clamp(0, self.width as i32 - 1),
            y.clamp(0, self.height as i32 - 1),
        )
    }
}

/// Render-facing projection of a `Grid` with some walls revealed
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GridView {
    width: usize,
    height: usize,
    cells: Vec<Cell>,
}

impl GridView {
    pub(crate) fn new(width: usize, height: usize, cells: Vec<Cell>) -> Self {
        debug_assert_eq!(cells.len(), width * height);
        Self {
            width,
            height,
            cells,
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    pub fn get(&self, pos: CellPos) -> Option<Cell> {
        row_major_index(self.width, self.height, pos).map(|i| self.cells[i])
    }

    /// Number of walls currently lit
    pub fn shown_count(&self) -> usize {
        self.cells.iter().filter(|c| **c == Cell::ShownWall).count()
    }
}

impl From<&Grid> for GridView {
    fn from(grid: &Grid) -> Self {
        Self::new(grid.width, grid.height, grid.cells.clone())
    }
}

impl fmt::Display for GridView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in self.cells.chunks(self.width.max(1)) {
            let line: String = row.iter().map(|c| c.glyph()).collect();
            writeln!(f, "{line}")?;
        }
        Ok(())
    }
}
