//! Engine state
//!
//! Everything the tick loop mutates lives here, owned by a single
//! `MazeEngine`. Rendering reads it through the accessors.

use glam::{IVec2, Vec2};
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::bounds::PixelBox;
use super::grid::{Grid, GridView};
use super::maze_gen::generate;
use super::pulse::{Pulse, PulseRates, PulseTracker};
use crate::config::EngineConfig;
use crate::error::EngineError;

/// Current phase of a run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Phase {
    /// Player is navigating
    Playing,
    /// Exit reached; ticks no longer change anything
    Solved,
}

/// Things that happened during the last tick
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum EngineEvent {
    PulseEmitted { origin: Vec2 },
    /// Player was pushed out of a wall by `correction` pixels
    Collided { correction: IVec2 },
    Solved { tick: u64 },
}

/// Composition root: grid, player box, pulses and the derived view
#[derive(Debug, Clone)]
pub struct MazeEngine {
    pub(crate) config: EngineConfig,
    pub(crate) grid: Grid,
    pub(crate) view: GridView,
    pub(crate) player: PixelBox,
    /// Sub-pixel movement not yet applied to the box
    pub(crate) carry: Vec2,
    pub(crate) pulses: PulseTracker,
    pub(crate) phase: Phase,
    pub(crate) collided: bool,
    pub(crate) time_ticks: u64,
    pub(crate) events: Vec<EngineEvent>,
    generation_attempts: u32,
}

impl MazeEngine {
    /// Validate the config and generate a maze from its seed.
    ///
    /// Fails with [`EngineError::Generation`] when no connected maze could be
    /// carved; no engine is built in that case.
    pub fn new(config: EngineConfig) -> Result<Self, EngineError> {
        config.validate()?;
        let mut rng = Pcg32::seed_from_u64(config.seed);
        let generated = generate(
            config.width,
            config.height,
            config.effective_turn_bias(),
            config.max_gen_attempts,
            &mut rng,
        )?;
        log::info!("Engine started with seed: {}", config.seed);
        let mut engine = Self::with_grid(config, generated.grid)?;
        engine.generation_attempts = generated.attempts;
        Ok(engine)
    }

    /// Build an engine around an existing grid (config dimensions are taken from the grid)
    pub fn with_grid(mut config: EngineConfig, grid: Grid) -> Result<Self, EngineError> {
        config.width = grid.width();
        config.height = grid.height();
        config.validate()?;

        // Spawn centred in the start cell
        let size = IVec2::splat(config.player_size);
        let offset = (config.cell_size - config.player_size) / 2;
        let start = grid.start();
        let player = PixelBox::new(
            IVec2::new(start.x * config.cell_size + offset, start.y * config.cell_size + offset),
            size,
        );

        let pulses = PulseTracker::new(PulseRates {
            radius_step: config.pulse_radius_step,
            decay_step: config.pulse_decay_step,
            max_intensity: config.pulse_max_intensity,
        });

        Ok(Self {
            view: GridView::from(&grid),
            grid,
            player,
            carry: Vec2::ZERO,
            pulses,
            phase: Phase::Playing,
            collided: false,
            time_ticks: 0,
            events: Vec::new(),
            generation_attempts: 0,
            config,
        })
    }

    /// Move the player box to `pos` (clamped to the arena) and drop any carry
    pub fn place_player(&mut self, pos: IVec2) {
        self.player = PixelBox::new(pos, self.player.size).clamped_within(self.arena_extent());
        self.carry = Vec2::ZERO;
    }

    /// Playable area in pixels
    pub fn arena_extent(&self) -> IVec2 {
        let (w, h) = self.config.arena_size();
        IVec2::new(w, h)
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Canonical maze (never shows revealed walls)
    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    /// Per-frame view with echo-lit walls
    pub fn view(&self) -> &GridView {
        &self.view
    }

    pub fn player(&self) -> PixelBox {
        self.player
    }

    /// Live pulses for drawing rings
    pub fn pulses(&self) -> &[Pulse] {
        self.pulses.pulses()
    }

    /// Radius currently driving the reveal
    pub fn reveal_radius(&self) -> f32 {
        self.pulses.max_active_radius()
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn is_solved(&self) -> bool {
        self.phase == Phase::Solved
    }

    /// Whether the last tick pushed the player out of a wall
    pub fn collided(&self) -> bool {
        self.collided
    }

    pub fn time_ticks(&self) -> u64 {
        self.time_ticks
    }

    /// Events raised by the last tick
    pub fn events(&self) -> &[EngineEvent] {
        &self.events
    }

    /// Carving attempts used at startup (0 for a supplied grid)
    pub fn generation_attempts(&self) -> u32 {
        self.generation_attempts
    }
}
