//! Breadth-first connectivity queries over path cells

use std::collections::VecDeque;

use super::grid::{CellPos, Grid};

/// 4-connected neighbour offsets: up, right, down, left
const NEIGHBOURS: [(i32, i32); 4] = [(0, -1), (1, 0), (0, 1), (-1, 0)];

/// Whether `end` can be reached from `start` through path cells.
///
/// Out-of-range or wall endpoints are unreachable.
pub fn is_reachable(grid: &Grid, start: CellPos, end: CellPos) -> bool {
    if !is_open(grid, start) || !is_open(grid, end) {
        return false;
    }
    if start == end {
        return true;
    }

    let mut visited = vec![false; grid.width() * grid.height()];
    let mut queue = VecDeque::new();
    visited[flat(grid, start)] = true;
    queue.push_back(start);

    while let Some(cell) = queue.pop_front() {
        if cell == end {
            return true;
        }
        for (dx, dy) in NEIGHBOURS {
            let next = cell.offset(dx, dy);
            if is_open(grid, next) && !visited[flat(grid, next)] {
                visited[flat(grid, next)] = true;
                queue.push_back(next);
            }
        }
    }

    false
}

/// Shortest path of cells from `start` to `end` (both inclusive)
pub fn shortest_path(grid: &Grid, start: CellPos, end: CellPos) -> Option<Vec<CellPos>> {
    if !is_open(grid, start) || !is_open(grid, end) {
        return None;
    }

    let mut parent: Vec<Option<CellPos>> = vec![None; grid.width() * grid.height()];
    let mut visited = vec![false; grid.width() * grid.height()];
    let mut queue = VecDeque::new();
    visited[flat(grid, start)] = true;
    queue.push_back(start);

    while let Some(cell) = queue.pop_front() {
        if cell == end {
            let mut path = vec![end];
            let mut cursor = end;
            while let Some(prev) = parent[flat(grid, cursor)] {
                path.push(prev);
                cursor = prev;
            }
            path.reverse();
            return Some(path);
        }
        for (dx, dy) in NEIGHBOURS {
            let next = cell.offset(dx, dy);
            if is_open(grid, next) && !visited[flat(grid, next)] {
                visited[flat(grid, next)] = true;
                parent[flat(grid, next)] = Some(cell);
                queue.push_back(next);
            }
        }
    }

    None
}

#[inline]
fn is_open(grid: &Grid, pos: CellPos) -> bool {
    grid.get(pos).is_some_and(|c| !c.is_wall())
}

/// Row-major index; only called on in-bounds cells
#[inline]
fn flat(grid: &Grid, pos: CellPos) -> usize {
    pos.y as usize * grid.width() + pos.x as usize
}
