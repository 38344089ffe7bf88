//! Collision detection and response against the wall grid
//!
//! Detection only asks whether any wall sits under the box. Response looks at
//! every overlapping wall at once and picks a single axis-aligned push, so a
//! box straddling a wall corner never jitters between cells.

use glam::IVec2;

use super::bounds::PixelBox;
use super::grid::{CellPos, Grid};

/// Deepest push needed in each direction, as non-negative magnitudes
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Clearances {
    pub left: i32,
    pub right: i32,
    pub up: i32,
    pub down: i32,
}

impl Clearances {
    /// A push along one axis, if walls only push that way
    fn coherent(negative: i32, positive: i32) -> Option<i32> {
        match (negative > 0, positive > 0) {
            (true, false) => Some(-negative),
            (false, true) => Some(positive),
            _ => None,
        }
    }

    /// Smallest non-zero push of the four (left, right, up, down on ties)
    fn smallest(&self) -> IVec2 {
        [
            IVec2::new(-self.left, 0),
            IVec2::new(self.right, 0),
            IVec2::new(0, -self.up),
            IVec2::new(0, self.down),
        ]
        .into_iter()
        .filter(|d| *d != IVec2::ZERO)
        .min_by_key(|d| d.x.abs() + d.y.abs())
        .unwrap_or(IVec2::ZERO)
    }
}

/// Cells under the box, limited to the grid
fn footprint(b: &PixelBox, grid: &Grid, cell_size: i32) -> impl Iterator<Item = CellPos> {
    let first = b.min().div_euclid(IVec2::splat(cell_size));
    let last = (b.max() - IVec2::ONE).div_euclid(IVec2::splat(cell_size));
    let x0 = first.x.max(0);
    let y0 = first.y.max(0);
    let x1 = last.x.min(grid.width() as i32 - 1);
    let y1 = last.y.min(grid.height() as i32 - 1);
    (y0..=y1).flat_map(move |y| (x0..=x1).map(move |x| CellPos::new(x, y)))
}

/// Whether the box overlaps any wall cell
pub fn detect(b: &PixelBox, grid: &Grid, cell_size: i32) -> bool {
    if cell_size <= 0 {
        return false;
    }
    footprint(b, grid, cell_size).any(|pos| grid.is_wall(pos))
}

/// Push along one axis that separates `[bmin, bmax)` from `[wmin, wmax)`.
///
/// Goes toward the negative side when `negative` is set, unless that would
/// leave `[0, arena)` and the positive side would not.
fn axis_push(bmin: i32, bmax: i32, wmin: i32, wmax: i32, negative: bool, arena: i32) -> i32 {
    let back = -(bmax - wmin);
    let forward = wmax - bmin;
    let fits = |d: i32| bmin + d >= 0 && bmax + d <= arena;
    match (negative, fits(back), fits(forward)) {
        (true, false, true) => forward,
        (false, true, false) => back,
        (true, ..) => back,
        (false, ..) => forward,
    }
}

/// Accumulate the per-direction pushes over every overlapping wall.
///
/// Each wall pushes the box away from its own centre, along whichever axis it
/// penetrates less (both axes when equal). Space outside the grid counts as
/// solid here, so a push never moves the box out of the arena when the other
/// side of the wall is free.
pub fn clearances(b: &PixelBox, grid: &Grid, cell_size: i32) -> Clearances {
    let mut acc = Clearances::default();
    if cell_size <= 0 {
        return acc;
    }

    let (bmin, bmax) = (b.min(), b.max());
    let center = b.center_x2();
    let arena = IVec2::new(grid.width() as i32, grid.height() as i32) * cell_size;

    for pos in footprint(b, grid, cell_size).filter(|p| grid.is_wall(*p)) {
        let (wmin, wsize) = Grid::cell_rect(pos, cell_size);
        let wmax = wmin + wsize;
        if !b.overlaps(wmin, wmax) {
            continue;
        }
        let wall_center = wmin * 2 + wsize;

        // Wall to the right (or dead centre) pushes left
        let push_x = axis_push(
            bmin.x,
            bmax.x,
            wmin.x,
            wmax.x,
            wall_center.x >= center.x,
            arena.x,
        );
        let push_y = axis_push(
            bmin.y,
            bmax.y,
            wmin.y,
            wmax.y,
            wall_center.y >= center.y,
            arena.y,
        );

        if push_x.abs() <= push_y.abs() {
            if push_x < 0 {
                acc.left = acc.left.max(-push_x);
            } else {
                acc.right = acc.right.max(push_x);
            }
        }
        if push_y.abs() <= push_x.abs() {
            if push_y < 0 {
                acc.up = acc.up.max(-push_y);
            } else {
                acc.down = acc.down.max(push_y);
            }
        }
    }

    acc
}

/// Minimal axis-aligned displacement that pushes the box out of the walls.
///
/// Never diagonal. Returns zero when nothing overlaps; the caller applies it.
pub fn resolve(b: &PixelBox, grid: &Grid, cell_size: i32) -> IVec2 {
    let acc = clearances(b, grid, cell_size);
    let x = Clearances::coherent(acc.left, acc.right);
    let y = Clearances::coherent(acc.up, acc.down);

    match (x, y) {
        (Some(dx), None) => IVec2::new(dx, 0),
        (None, Some(dy)) => IVec2::new(0, dy),
        (Some(dx), Some(dy)) if dx.abs() < dy.abs() => IVec2::new(dx, 0),
        (Some(dx), Some(dy)) if dy.abs() < dx.abs() => IVec2::new(0, dy),
        _ => acc.smallest(),
    }
}
