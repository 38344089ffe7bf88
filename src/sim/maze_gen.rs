//! Maze generation
//!
//! Randomized depth-first carving on the even sub-lattice, driven by an
//! explicit stack so large grids never depend on call-stack depth. Each
//! carved maze is checked for a start-to-exit path and regenerated up to a
//! fixed number of attempts.

use rand::Rng;
use rand::seq::SliceRandom;

use super::grid::{Cell, CellPos, Grid};
use super::reachability::is_reachable;
use crate::config::sanitize_turn_bias;
use crate::error::GenerationError;

/// Cardinal carving direction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Direction {
    Up,
    Right,
    Down,
    Left,
}

impl Direction {
    const ALL: [Direction; 4] = [
        Direction::Up,
        Direction::Right,
        Direction::Down,
        Direction::Left,
    ];

    fn delta(self) -> (i32, i32) {
        match self {
            Direction::Up => (0, -1),
            Direction::Right => (1, 0),
            Direction::Down => (0, 1),
            Direction::Left => (-1, 0),
        }
    }
}

/// A successfully generated maze
#[derive(Debug, Clone)]
pub struct Generated {
    pub grid: Grid,
    /// Attempts used, including the successful one
    pub attempts: u32,
}

/// Generate a maze whose exit is reachable from its start.
///
/// `turn_bias` outside [0, 1] is replaced by the default. Fails with
/// [`GenerationError::AttemptsExhausted`] if `max_attempts` carvings all leave
/// the exit disconnected, which is fatal for the caller.
pub fn generate<R: Rng + ?Sized>(
    width: usize,
    height: usize,
    turn_bias: f32,
    max_attempts: u32,
    rng: &mut R,
) -> Result<Generated, GenerationError> {
    if width == 0 || height == 0 {
        return Err(GenerationError::EmptyGrid { width, height });
    }
    let turn_bias = sanitize_turn_bias(turn_bias);

    for attempt in 1..=max_attempts {
        let grid = carve(width, height, turn_bias, rng);
        if is_reachable(&grid, grid.start(), grid.exit()) {
            log::info!(
                "Generated {}x{} maze (bias {}) in {} attempt(s)",
                width,
                height,
                turn_bias,
                attempt
            );
            return Ok(Generated {
                grid,
                attempts: attempt,
            });
        }
        log::debug!("Attempt {} left the exit disconnected, regenerating", attempt);
    }

    log::error!(
        "Giving up on {}x{} maze after {} attempts",
        width,
        height,
        max_attempts
    );
    Err(GenerationError::AttemptsExhausted {
        width,
        height,
        turn_bias,
        attempts: max_attempts,
    })
}

/// One pending cell on the carving stack
struct Frame {
    cell: CellPos,
    order: [Direction; 4],
    cursor: usize,
}

impl Frame {
    fn new<R: Rng + ?Sized>(
        cell: CellPos,
        incoming: Option<Direction>,
        grid: &Grid,
        turn_bias: f32,
        rng: &mut R,
    ) -> Self {
        let mut order = Direction::ALL;
        order.shuffle(rng);

        // Keep going straight when the corridor can continue
        if let Some(dir) = incoming {
            if rng.random_bool(f64::from(1.0 - turn_bias)) && can_carve(grid, cell, dir) {
                if let Some(pos) = order.iter().position(|d| *d == dir) {
                    order[..=pos].rotate_right(1);
                }
            }
        }

        Self {
            cell,
            order,
            cursor: 0,
        }
    }

    fn next_direction(&mut self) -> Option<Direction> {
        let dir = self.order.get(self.cursor).copied();
        self.cursor += 1;
        dir
    }
}

/// Target two cells away is in bounds and still uncarved
fn can_carve(grid: &Grid, cell: CellPos, dir: Direction) -> bool {
    let (dx, dy) = dir.delta();
    grid.get(cell.offset(dx * 2, dy * 2)) == Some(Cell::HiddenWall)
}

/// Single carving pass; the exit may end up disconnected
fn carve<R: Rng + ?Sized>(width: usize, height: usize, turn_bias: f32, rng: &mut R) -> Grid {
    let mut grid = Grid::filled(width, height, Cell::HiddenWall);
    let origin = grid.start();
    grid.set(origin, Cell::Path);

    let mut stack = vec![Frame::new(origin, None, &grid, turn_bias, rng)];
    while let Some(frame) = stack.last_mut() {
        let Some(dir) = frame.next_direction() else {
            stack.pop();
            continue;
        };
        let cell = frame.cell;

        if can_carve(&grid, cell, dir) {
            let (dx, dy) = dir.delta();
            let target = cell.offset(dx * 2, dy * 2);
            grid.set(cell.offset(dx, dy), Cell::Path);
            grid.set(target, Cell::Path);
            stack.push(Frame::new(target, Some(dir), &grid, turn_bias, rng));
        }
    }

    let (start, exit) = (grid.start(), grid.exit());
    grid.set(start, Cell::Path);
    grid.set(exit, Cell::Path);
    grid
}
