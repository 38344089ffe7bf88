//! Echo Maze - A top-down maze game engine
//!
//! Core modules:
//! - `sim`: Deterministic simulation (maze generation, collisions, echo pulses)
//! - `config`: Static engine configuration
//! - `error`: Error taxonomy for startup and generation

pub mod config;
pub mod error;
pub mod sim;

pub use config::EngineConfig;
pub use error::{ConfigError, EngineError, GenerationError};

/// Engine configuration constants
pub mod consts {
    /// Default maze dimensions in cells (odd numbers carve cleanly)
    pub const DEFAULT_MAZE_WIDTH: usize = 31;
    pub const DEFAULT_MAZE_HEIGHT: usize = 21;
    /// Side length of one cell in pixels
    pub const DEFAULT_CELL_SIZE: i32 = 20;

    /// Player box defaults
    pub const DEFAULT_PLAYER_SIZE: i32 = 12;
    /// Pixels per tick along one axis
    pub const DEFAULT_MOVE_SPEED: f32 = 2.0;
    /// Speed multiplier while the sprint modifier is held
    pub const DEFAULT_SPRINT_MULTIPLIER: f32 = 2.0;
    /// Per-axis scale for diagonal movement so it never outruns axis movement
    pub const DIAGONAL_FACTOR: f32 = std::f32::consts::FRAC_1_SQRT_2;

    /// Carving bias: 0 = long straight corridors, 1 = fully random turns
    pub const DEFAULT_TURN_BIAS: f32 = 0.5;
    /// Regeneration attempts before startup is aborted
    pub const DEFAULT_MAX_GEN_ATTEMPTS: u32 = 8;

    /// Echo pulse defaults
    pub const PULSE_MAX_INTENSITY: f32 = 255.0;
    pub const DEFAULT_PULSE_RADIUS_STEP: f32 = 6.0;
    pub const DEFAULT_PULSE_DECAY_STEP: f32 = 4.0;

    /// Detect/resolve passes per movement step (one per axis)
    pub const MAX_RESOLVE_PASSES: usize = 2;
}
