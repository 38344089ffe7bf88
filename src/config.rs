//! Engine configuration
//!
//! Static startup parameters. Loaded once from JSON (or defaults) and never
//! changed while the tick loop runs.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::error::ConfigError;

/// Startup parameters for a maze run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    // === Maze ===
    /// Grid width in cells
    pub width: usize,
    /// Grid height in cells
    pub height: usize,
    /// Cell side length in pixels
    pub cell_size: i32,
    /// Corridor straightness (0 = straight, 1 = random). Out-of-range values fall back to the default.
    pub turn_bias: f32,
    /// Regeneration attempts before giving up
    pub max_gen_attempts: u32,
    /// RNG seed for generation
    pub seed: u64,

    // === Player ===
    /// Player box side length in pixels
    pub player_size: i32,
    /// Pixels per tick along one axis
    pub move_speed: f32,
    /// Speed multiplier while sprinting
    pub sprint_multiplier: f32,

    // === Echo pulses ===
    /// Radius growth per tick
    pub pulse_radius_step: f32,
    /// Intensity decay per tick
    pub pulse_decay_step: f32,
    /// Starting intensity of a fresh pulse
    pub pulse_max_intensity: f32,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            width: DEFAULT_MAZE_WIDTH,
            height: DEFAULT_MAZE_HEIGHT,
            cell_size: DEFAULT_CELL_SIZE,
            turn_bias: DEFAULT_TURN_BIAS,
            max_gen_attempts: DEFAULT_MAX_GEN_ATTEMPTS,
            seed: 0,

            player_size: DEFAULT_PLAYER_SIZE,
            move_speed: DEFAULT_MOVE_SPEED,
            sprint_multiplier: DEFAULT_SPRINT_MULTIPLIER,

            pulse_radius_step: DEFAULT_PULSE_RADIUS_STEP,
            pulse_decay_step: DEFAULT_PULSE_DECAY_STEP,
            pulse_max_intensity: PULSE_MAX_INTENSITY,
        }
    }
}

impl EngineConfig {
    /// Parse a (possibly partial) JSON config; missing fields take defaults
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a JSON config file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)?;
        let config = Self::from_json_str(&json)?;
        log::info!("Loaded config from {}", path.display());
        Ok(config)
    }

    /// Reject parameter combinations the engine cannot run with
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.width < 3 || self.height < 3 {
            return Err(ConfigError::Invalid("maze must be at least 3x3 cells"));
        }
        if self.cell_size <= 0 {
            return Err(ConfigError::Invalid("cell_size must be positive"));
        }
        if self.player_size <= 0 {
            return Err(ConfigError::Invalid("player_size must be positive"));
        }
        if self.player_size > self.cell_size {
            return Err(ConfigError::Invalid("player must fit inside one cell"));
        }
        if !(self.move_speed > 0.0) || !(self.sprint_multiplier >= 1.0) {
            return Err(ConfigError::Invalid(
                "move_speed must be positive and sprint_multiplier at least 1",
            ));
        }
        if !(self.pulse_radius_step > 0.0)
            || !(self.pulse_decay_step > 0.0)
            || !(self.pulse_max_intensity > 0.0)
        {
            return Err(ConfigError::Invalid("pulse rates must be positive"));
        }
        if self.max_gen_attempts == 0 {
            return Err(ConfigError::Invalid("max_gen_attempts must be at least 1"));
        }
        Ok(())
    }

    /// Turn bias actually used for carving
    pub fn effective_turn_bias(&self) -> f32 {
        sanitize_turn_bias(self.turn_bias)
    }

    /// Playable area in pixels
    pub fn arena_size(&self) -> (i32, i32) {
        (
            self.width as i32 * self.cell_size,
            self.height as i32 * self.cell_size,
        )
    }
}

/// Replace a bias outside [0, 1] (or NaN) with the default
pub fn sanitize_turn_bias(bias: f32) -> f32 {
    if (0.0..=1.0).contains(&bias) {
        bias
    } else {
        DEFAULT_TURN_BIAS
    }
}
