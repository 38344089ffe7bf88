//! Per-tick engine update
//!
//! Fixed order every tick: move, collide, clamp, check the exit, advance
//! pulses, rebuild the view. A tick always runs to completion.

use glam::{IVec2, Vec2};

use super::bounds::PixelBox;
use super::collision::{detect, resolve};
use super::grid::Grid;
use super::reveal::reveal;
use super::state::{EngineEvent, MazeEngine, Phase};
use crate::consts::*;

/// Pressed-direction state from the input layer
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MoveKeys {
    pub up: bool,
    pub down: bool,
    pub left: bool,
    pub right: bool,
    /// Sprint modifier
    pub sprint: bool,
}

impl MoveKeys {
    /// Displacement for one tick. Opposite keys cancel; diagonals are scaled
    /// so they never outrun straight movement.
    pub fn intent(&self, move_speed: f32, sprint_multiplier: f32) -> Vec2 {
        let dx = f32::from(u8::from(self.right)) - f32::from(u8::from(self.left));
        let dy = f32::from(u8::from(self.down)) - f32::from(u8::from(self.up));
        let speed = if self.sprint {
            move_speed * sprint_multiplier
        } else {
            move_speed
        };
        let factor = if dx != 0.0 && dy != 0.0 {
            DIAGONAL_FACTOR
        } else {
            1.0
        };
        Vec2::new(dx, dy) * speed * factor
    }
}

/// Input commands for a single tick
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct TickInput {
    /// Desired displacement in pixels
    pub intent: Vec2,
    /// Emit an echo pulse from the player's centre
    pub pulse: bool,
}

impl TickInput {
    pub fn from_keys(keys: &MoveKeys, pulse: bool, engine: &MazeEngine) -> Self {
        let config = engine.config();
        Self {
            intent: keys.intent(config.move_speed, config.sprint_multiplier),
            pulse,
        }
    }
}

/// Whether a point counts as being on the exit.
///
/// The point's (clamped) cell must be the exit cell and the point itself must
/// lie inside the exit cell's pixel rectangle.
pub fn exit_reached(grid: &Grid, cell_size: i32, center: Vec2) -> bool {
    let exit = grid.exit();
    if grid.cell_at_clamped(center, cell_size) != exit {
        return false;
    }
    let (min, size) = Grid::cell_rect(exit, cell_size);
    let (min, max) = (min.as_vec2(), (min + size).as_vec2());
    center.x >= min.x && center.x < max.x && center.y >= min.y && center.y < max.y
}

/// Largest per-axis movement applied before collisions are checked again.
///
/// Half the smaller of the player size and the corridor slack, so a single
/// step can never carry the box past the middle of a wall cell.
pub fn move_step_limit(cell_size: i32, player_size: i32) -> i32 {
    ((cell_size - player_size).min(player_size) / 2).max(1)
}

/// Move the box by one step and push it back out of any walls.
///
/// Returns the new box and whether it hit something. A step the resolver
/// cannot clear is dropped and the box stays at `from`.
fn step_player(
    from: PixelBox,
    delta: IVec2,
    grid: &Grid,
    cell_size: i32,
    extent: IVec2,
) -> (PixelBox, bool) {
    let moved = from.translated(delta).clamped_within(extent);
    if !detect(&moved, grid, cell_size) {
        return (moved, false);
    }

    let mut corrected = moved;
    for _ in 0..MAX_RESOLVE_PASSES {
        let push = resolve(&corrected, grid, cell_size);
        if push == IVec2::ZERO {
            break;
        }
        corrected = corrected.translated(push).clamped_within(extent);
        if !detect(&corrected, grid, cell_size) {
            return (corrected, true);
        }
    }

    if detect(&from, grid, cell_size) {
        return (corrected, true);
    }
    log::debug!(
        "Dropped step {:?} at ({}, {}): could not clear walls",
        delta,
        from.pos.x,
        from.pos.y
    );
    (from, true)
}

/// Advance the engine by one tick
pub fn tick(engine: &mut MazeEngine, input: &TickInput) {
    engine.events.clear();
    engine.collided = false;

    // Solved is terminal
    if engine.phase == Phase::Solved {
        return;
    }

    engine.time_ticks += 1;
    let cell_size = engine.config.cell_size;
    let extent = engine.arena_extent();

    // 1. Apply intent, carrying the fractional part to later ticks
    let intent = if input.intent.is_finite() {
        input.intent
    } else {
        Vec2::ZERO
    };
    let limit = extent.as_vec2();
    let total = (intent + engine.carry).clamp(-limit, limit);
    let whole = total.trunc().as_ivec2();
    engine.carry = total - total.trunc();

    // 2. Move in short steps, pushing out of walls after each one
    let start = engine.player;
    let max_step = move_step_limit(cell_size, engine.config.player_size);
    let steps = (whole.abs().max_element() + max_step - 1) / max_step;
    let mut applied = IVec2::ZERO;
    let mut hit = false;
    for i in 1..=steps {
        let target = (whole.as_i64vec2() * i64::from(i) / i64::from(steps)).as_ivec2();
        let (next, collided) = step_player(
            engine.player,
            target - applied,
            &engine.grid,
            cell_size,
            extent,
        );
        engine.player = next;
        applied = target;
        hit |= collided;
    }
    if hit {
        let unobstructed = start.translated(whole).clamped_within(extent);
        let correction = engine.player.pos - unobstructed.pos;
        engine.carry = Vec2::ZERO;
        engine.collided = true;
        engine.events.push(EngineEvent::Collided { correction });
    }

    // 3. Stay inside the arena
    engine.player = engine.player.clamped_within(extent);

    // 4. Exit check
    if exit_reached(&engine.grid, cell_size, engine.player.center()) {
        engine.phase = Phase::Solved;
        engine.events.push(EngineEvent::Solved {
            tick: engine.time_ticks,
        });
        log::info!("Maze solved at tick {}", engine.time_ticks);
    }

    // 5. Pulses
    if input.pulse {
        let origin = engine.player.center();
        engine.pulses.trigger(origin);
        engine.events.push(EngineEvent::PulseEmitted { origin });
        log::debug!("Pulse emitted at ({}, {})", origin.x, origin.y);
    }
    engine.pulses.advance();

    // 6. Rebuild the view from the widest live pulse
    engine.view = match engine.pulses.widest() {
        Some(pulse) => reveal(&engine.grid, pulse.origin, pulse.radius, cell_size),
        None => reveal(&engine.grid, engine.player.center(), 0.0, cell_size),
    };
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::EngineConfig;
    use crate::sim::grid::{Cell, CellPos};
    use proptest::prelude::*;

    fn open_engine(rows: &[&str], player_size: i32) -> MazeEngine {
        let config = EngineConfig {
            player_size,
            ..Default::default()
        };
        MazeEngine::with_grid(config, Grid::parse(rows)).unwrap()
    }

    fn walled() -> Vec<&'static str> {
        vec![".....", "...#.", "...#.", "...#.", "....."]
    }

    #[test]
    fn test_axis_and_diagonal_intent() {
        let right = MoveKeys {
            right: true,
            ..Default::default()
        };
        assert_eq!(right.intent(2.0, 2.0), Vec2::new(2.0, 0.0));

        let diag = MoveKeys {
            up: true,
            right: true,
            ..Default::default()
        };
        let v = diag.intent(2.0, 2.0);
        assert!((v.x - 2.0 * DIAGONAL_FACTOR).abs() < 1e-6);
        assert!((v.y + 2.0 * DIAGONAL_FACTOR).abs() < 1e-6);
        assert!(v.length() <= 2.0 + 1e-5);
    }

    #[test]
    fn test_sprint_doubles_and_opposites_cancel() {
        let sprint = MoveKeys {
            left: true,
            sprint: true,
            ..Default::default()
        };
        assert_eq!(sprint.intent(2.0, 2.0), Vec2::new(-4.0, 0.0));

        let cancel = MoveKeys {
            left: true,
            right: true,
            down: true,
            ..Default::default()
        };
        assert_eq!(cancel.intent(2.0, 2.0), Vec2::new(0.0, 2.0));
    }

    #[test]
    fn test_input_from_keys_uses_config_speeds() {
        let engine = open_engine(&["...", "...", "..."], 12);
        let keys = MoveKeys {
            down: true,
            sprint: true,
            ..Default::default()
        };
        let input = TickInput::from_keys(&keys, true, &engine);
        assert_eq!(input.intent, Vec2::new(0.0, 4.0));
        assert!(input.pulse);
    }

    #[test]
    fn test_unit_box_stops_at_wall() {
        let mut engine = open_engine(&walled(), 1);
        let wall_left = 3 * 20;
        // One cell left of the wall at (3, 2)
        engine.place_player(IVec2::new(wall_left - 20, 50));
        let input = TickInput {
            intent: Vec2::new(2.0, 0.0),
            pulse: false,
        };

        let mut hits = 0;
        for _ in 0..30 {
            tick(&mut engine, &input);
            let player = engine.player();
            assert!(!detect(&player, engine.grid(), 20));
            assert!(player.pos.x <= wall_left - player.size.x);
            assert_eq!(player.pos.y, 50);
            if engine.collided() {
                hits += 1;
            }
        }
        assert_eq!(engine.player().pos.x, wall_left - 1);
        assert!(hits > 0);
    }

    #[test]
    fn test_collision_flag_is_per_tick() {
        let mut engine = open_engine(&walled(), 12);
        engine.place_player(IVec2::new(46, 44));
        tick(
            &mut engine,
            &TickInput {
                intent: Vec2::new(4.0, 0.0),
                pulse: false,
            },
        );
        assert!(engine.collided());
        assert_eq!(engine.player().pos.x, 48);
        assert!(matches!(
            engine.events(),
            [EngineEvent::Collided { correction }] if *correction == IVec2::new(-2, 0)
        ));

        tick(&mut engine, &TickInput::default());
        assert!(!engine.collided());
        assert!(engine.events().is_empty());
    }

    #[test]
    fn test_concave_corner_fully_cleared() {
        let mut engine = open_engine(&[".#...", "##...", ".....", ".....", "....."], 12);
        engine.place_player(IVec2::new(6, 6));
        tick(
            &mut engine,
            &TickInput {
                intent: Vec2::new(4.0, 3.0),
                pulse: false,
            },
        );
        assert!(engine.collided());
        assert!(!detect(&engine.player(), engine.grid(), 20));
        assert_eq!(engine.player().pos, IVec2::new(8, 8));
    }

    #[test]
    fn test_fractional_intent_accumulates() {
        let mut engine = open_engine(&["...", "...", "..."], 12);
        let input = TickInput {
            intent: Vec2::new(0.5, 0.0),
            pulse: false,
        };
        let start = engine.player().pos.x;
        for _ in 0..4 {
            tick(&mut engine, &input);
        }
        assert_eq!(engine.player().pos.x, start + 2);
    }

    #[test]
    fn test_oversized_intent_is_clamped() {
        let mut engine = open_engine(&["...", "...", "..."], 12);
        tick(
            &mut engine,
            &TickInput {
                intent: Vec2::new(-1.0e9, f32::INFINITY),
                pulse: false,
            },
        );
        assert_eq!(engine.player().pos, IVec2::new(4, 4));

        tick(
            &mut engine,
            &TickInput {
                intent: Vec2::new(-1.0e9, -1.0e9),
                pulse: false,
            },
        );
        assert_eq!(engine.player().pos, IVec2::ZERO);
    }

    #[test]
    fn test_exit_double_check() {
        let grid = Grid::parse(&[".....", ".....", ".....", ".....", "....."]);
        // Exact pixel centre of the exit cell
        assert!(exit_reached(&grid, 20, Vec2::new(90.0, 90.0)));
        assert!(exit_reached(&grid, 20, Vec2::new(80.0, 80.0)));
        // One pixel past the exit rectangle still clamps to the exit cell
        assert_eq!(
            grid.cell_at_clamped(Vec2::new(100.0, 90.0), 20),
            CellPos::new(4, 4)
        );
        assert!(!exit_reached(&grid, 20, Vec2::new(100.0, 90.0)));
        assert!(!exit_reached(&grid, 20, Vec2::new(79.0, 90.0)));
    }

    #[test]
    fn test_solved_when_centred_on_exit() {
        let mut engine = open_engine(&["...", "...", "..."], 12);
        engine.place_player(IVec2::new(44, 44));
        assert_eq!(engine.player().center(), Vec2::new(50.0, 50.0));
        tick(&mut engine, &TickInput::default());
        assert!(engine.is_solved());
        assert!(matches!(engine.events(), [EngineEvent::Solved { tick: 1 }]));

        // Terminal: nothing moves any more
        tick(
            &mut engine,
            &TickInput {
                intent: Vec2::new(-2.0, 0.0),
                pulse: true,
            },
        );
        assert_eq!(engine.player().pos, IVec2::new(44, 44));
        assert_eq!(engine.time_ticks(), 1);
        assert!(engine.events().is_empty());
    }

    #[test]
    fn test_not_solved_next_to_exit() {
        let mut engine = open_engine(&["...", "...", "..."], 12);
        engine.place_player(IVec2::new(24, 44));
        tick(&mut engine, &TickInput::default());
        assert!(!engine.is_solved());
    }

    #[test]
    fn test_pulse_reveals_then_fades() {
        let mut engine = open_engine(&walled(), 12);
        // Centre of cell (2, 2), right next to the wall column
        engine.place_player(IVec2::new(44, 44));
        tick(
            &mut engine,
            &TickInput {
                intent: Vec2::ZERO,
                pulse: true,
            },
        );
        assert_eq!(engine.pulses().len(), 1);
        assert_eq!(engine.reveal_radius(), 6.0);
        assert_eq!(engine.view().shown_count(), 0);

        // Radius 24 covers the wall cell centred 20px away
        for _ in 0..3 {
            tick(&mut engine, &TickInput::default());
        }
        assert_eq!(engine.reveal_radius(), 24.0);
        assert_eq!(engine.view().get(CellPos::new(3, 2)), Some(Cell::ShownWall));
        assert_eq!(engine.grid().get(CellPos::new(3, 2)), Some(Cell::HiddenWall));

        // Run the pulse out; the wall goes dark again
        for _ in 0..64 {
            tick(&mut engine, &TickInput::default());
        }
        assert!(engine.pulses().is_empty());
        assert_eq!(engine.view().shown_count(), 0);
    }

    #[test]
    fn test_every_pulse_counts_toward_reveal() {
        let mut engine = open_engine(&walled(), 12);
        let input = TickInput {
            intent: Vec2::ZERO,
            pulse: true,
        };
        for _ in 0..9 {
            tick(&mut engine, &input);
        }
        assert_eq!(engine.pulses().len(), 9);
        assert_eq!(engine.reveal_radius(), 54.0);
    }

    #[test]
    fn test_edge_hugging_box_stays_out_of_wall() {
        let mut engine = open_engine(&["...", "#..", "..."], 12);
        engine.place_player(IVec2::new(0, 4));
        tick(
            &mut engine,
            &TickInput {
                intent: Vec2::new(-5.0, 12.0),
                pulse: false,
            },
        );
        assert!(engine.collided());
        assert!(!detect(&engine.player(), engine.grid(), 20));
        assert_eq!(engine.player().pos, IVec2::new(0, 8));
    }

    #[test]
    fn test_fast_move_stops_flush_against_wall() {
        let config = EngineConfig {
            move_speed: 8.0,
            ..Default::default()
        };
        let grid = Grid::parse(&["...", ".#.", "..."]);
        let mut engine = MazeEngine::with_grid(config, grid).unwrap();
        engine.place_player(IVec2::new(24, 44));
        let keys = MoveKeys {
            up: true,
            sprint: true,
            ..Default::default()
        };
        let input = TickInput::from_keys(&keys, false, &engine);
        assert_eq!(input.intent, Vec2::new(0.0, -16.0));

        tick(&mut engine, &input);
        assert!(engine.collided());
        assert!(!detect(&engine.player(), engine.grid(), 20));
        assert_eq!(engine.player().pos, IVec2::new(24, 40));
    }

    #[test]
    fn test_move_step_limit() {
        assert_eq!(move_step_limit(20, 12), 4);
        assert_eq!(move_step_limit(20, 1), 1);
        assert_eq!(move_step_limit(20, 20), 1);
        assert_eq!(move_step_limit(32, 16), 8);
    }

    fn keys_from_bits(bits: u8) -> MoveKeys {
        MoveKeys {
            up: bits & 1 != 0,
            down: bits & 2 != 0,
            left: bits & 4 != 0,
            right: bits & 8 != 0,
            sprint: bits & 16 != 0,
        }
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(48))]

        #[test]
        fn player_never_ends_a_tick_inside_a_wall(
            seed in any::<u64>(),
            move_speed in 0.5_f32..8.0,
            player_size in 4_i32..=16,
            presses in prop::collection::vec((0_u8..32, 1_usize..24), 1..40),
        ) {
            let config = EngineConfig {
                width: 11,
                height: 9,
                seed,
                move_speed,
                player_size,
                ..Default::default()
            };
            let mut engine = MazeEngine::new(config).unwrap();
            let cell_size = engine.config().cell_size;
            for (bits, hold) in presses {
                let keys = keys_from_bits(bits);
                for _ in 0..hold {
                    let input = TickInput::from_keys(&keys, false, &engine);
                    tick(&mut engine, &input);
                    let player = engine.player();
                    prop_assert!(
                        !detect(&player, engine.grid(), cell_size),
                        "player inside a wall at {:?}",
                        player.pos
                    );
                }
            }
        }
    }
}
