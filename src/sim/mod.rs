//! Deterministic simulation module
//!
//! All maze logic lives here. This module must be pure and deterministic:
//! - Seeded RNG only
//! - One synchronous update per tick
//! - No rendering or platform dependencies

pub mod autopilot;
pub mod bounds;
pub mod collision;
pub mod grid;
pub mod maze_gen;
pub mod pulse;
pub mod reachability;
pub mod reveal;
pub mod state;
pub mod tick;

pub use autopilot::Autopilot;
pub use bounds::PixelBox;
pub use collision::{Clearances, detect, resolve};
pub use grid::{Cell, CellPos, Grid, GridView};
pub use maze_gen::{Generated, generate};
pub use pulse::{Pulse, PulseRates, PulseTracker};
pub use reachability::{is_reachable, shortest_path};
pub use reveal::reveal;
pub use state::{EngineEvent, MazeEngine, Phase};
pub use tick::{MoveKeys, TickInput, exit_reached, tick};
