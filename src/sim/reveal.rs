//! Echo visibility
//!
//! Projects the canonical grid into a view where hidden walls near the
//! player are lit. Rebuilt from scratch each call: a wall goes dark again as
//! soon as the reveal radius no longer covers it.
// NOTE: only the current largest radius is used, not the union of past
// radii, so walls re-hide once a pulse expires. Kept as-is pending a design
// call on persistent fog-of-war.

use glam::Vec2;

use super::grid::{Cell, CellPos, Grid, GridView};

/// View of `grid` with hidden walls whose cell centre lies within `radius` of `center` shown
pub fn reveal(grid: &Grid, center: Vec2, radius: f32, cell_size: i32) -> GridView {
    if !(radius > 0.0) || cell_size <= 0 {
        return GridView::from(grid);
    }

    let radius_sq = radius * radius;
    let width = grid.width();
    let cells = grid
        .cells()
        .iter()
        .enumerate()
        .map(|(i, cell)| match cell {
            Cell::HiddenWall => {
                let pos = CellPos::new((i % width) as i32, (i / width) as i32);
                let dist_sq = Grid::cell_center(pos, cell_size).distance_squared(center);
                if dist_sq <= radius_sq {
                    Cell::ShownWall
                } else {
                    Cell::HiddenWall
                }
            }
            other => *other,
        })
        .collect();

    GridView::new(width, grid.height(), cells)
}

#[cfg(test)]
mod tests {
    use super::*;

    const CELL: i32 = 20;

    fn maze() -> Grid {
        Grid::parse(&[".####", ".#...", "...#.", "###..", "....."])
    }

    #[test]
    fn test_zero_radius_reveals_nothing() {
        let grid = maze();
        let center = Grid::cell_center(CellPos::new(1, 1), CELL);
        let view = reveal(&grid, center, 0.0, CELL);
        assert_eq!(view, GridView::from(&grid));
        assert_eq!(view.shown_count(), 0);
    }

    #[test]
    fn test_reveals_within_radius_only() {
        let grid = maze();
        let center = Grid::cell_center(CellPos::new(0, 2), CELL);
        // One cell away orthogonally is exactly 20px
        let view = reveal(&grid, center, 20.0, CELL);
        assert_eq!(view.get(CellPos::new(0, 3)), Some(Cell::ShownWall));
        // Diagonal neighbour is ~28.3px away
        assert_eq!(view.get(CellPos::new(1, 3)), Some(Cell::HiddenWall));
        assert_eq!(view.get(CellPos::new(1, 1)), Some(Cell::HiddenWall));
        // Paths stay paths
        assert_eq!(view.get(CellPos::new(0, 1)), Some(Cell::Path));
        assert_eq!(view.shown_count(), 1);
    }

    #[test]
    fn test_reveal_is_not_cumulative() {
        let grid = maze();
        let center = Grid::cell_center(CellPos::new(2, 2), CELL);
        let wide = reveal(&grid, center, 60.0, CELL);
        assert!(wide.shown_count() > 3);

        let narrow = reveal(&grid, center, 20.0, CELL);
        assert!(narrow.shown_count() < wide.shown_count());
        assert_eq!(narrow.get(CellPos::new(4, 0)), Some(Cell::HiddenWall));
        assert_eq!(wide.get(CellPos::new(4, 0)), Some(Cell::ShownWall));
        assert_eq!(wide.get(CellPos::new(3, 3)), Some(Cell::Path));
    }

    #[test]
    fn test_canonical_grid_untouched() {
        let grid = maze();
        let before = grid.clone();
        let _ = reveal(&grid, Vec2::new(50.0, 50.0), 500.0, CELL);
        assert_eq!(grid, before);
    }

    #[test]
    fn test_huge_radius_shows_every_wall() {
        let grid = maze();
        let view = reveal(&grid, Vec2::ZERO, 10_000.0, CELL);
        let walls = grid.cells().iter().filter(|c| c.is_wall()).count();
        assert_eq!(view.shown_count(), walls);
    }
}
