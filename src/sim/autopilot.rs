//! Demo autopilot
//!
//! Walks the player along the shortest path to the exit, one cell centre at a
//! time and one axis at a time, so it never scrapes a corridor wall.

use glam::Vec2;

use super::grid::{CellPos, Grid};
use super::reachability::shortest_path;
use super::state::MazeEngine;

/// Within this distance of a waypoint the player counts as on it
const WAYPOINT_TOLERANCE: f32 = 0.5;

#[derive(Debug, Clone)]
pub struct Autopilot {
    path: Vec<CellPos>,
    next: usize,
}

impl Autopilot {
    /// Plan from the player's current cell to the exit
    pub fn plan(engine: &MazeEngine) -> Option<Self> {
        let grid = engine.grid();
        let from = grid.cell_at_clamped(engine.player().center(), engine.config().cell_size);
        let path = shortest_path(grid, from, grid.exit())?;
        log::debug!("Autopilot planned {} cells", path.len());
        Some(Self { path, next: 0 })
    }

    /// Remaining waypoints
    pub fn remaining(&self) -> &[CellPos] {
        self.path.get(self.next..).unwrap_or_default()
    }

    /// Intent for this tick
    pub fn steer(&mut self, engine: &MazeEngine) -> Vec2 {
        let config = engine.config();
        let center = engine.player().center();
        let speed = config.move_speed;

        while let Some(&cell) = self.path.get(self.next) {
            let error = Grid::cell_center(cell, config.cell_size) - center;
            if error.abs().max_element() <= WAYPOINT_TOLERANCE {
                self.next += 1;
                continue;
            }
            return if error.x.abs() >= error.y.abs() {
                Vec2::new(error.x.clamp(-speed, speed), 0.0)
            } else {
                Vec2::new(0.0, error.y.clamp(-speed, speed))
            };
        }

        Vec2::ZERO
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::EngineConfig;
    use crate::sim::tick::{TickInput, tick};

    #[test]
    fn test_autopilot_solves_generated_maze() {
        let mut engine = MazeEngine::new(EngineConfig {
            width: 21,
            height: 15,
            seed: 5,
            ..Default::default()
        })
        .unwrap();
        let mut pilot = Autopilot::plan(&engine).unwrap();
        assert_eq!(pilot.remaining().first(), Some(&CellPos::new(0, 0)));

        for n in 0..10_000 {
            let input = TickInput {
                intent: pilot.steer(&engine),
                pulse: n % 40 == 0,
            };
            tick(&mut engine, &input);
            assert!(!engine.collided(), "scraped a wall at tick {n}");
            if engine.is_solved() {
                break;
            }
        }
        assert!(engine.is_solved());
    }

    #[test]
    fn test_no_plan_when_exit_walled_off() {
        let grid = Grid::parse(&["..#", "###", "..."]);
        let engine = MazeEngine::with_grid(EngineConfig::default(), grid).unwrap();
        assert!(Autopilot::plan(&engine).is_none());
    }
}
