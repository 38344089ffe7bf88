//! Echo pulses
//!
//! A pulse starts at the player's centre with zero radius and full intensity,
//! grows and fades each tick, and is dropped once its intensity runs out.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// A single expanding, fading echo ring
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Pulse {
    /// Fixed at trigger time
    pub origin: Vec2,
    pub radius: f32,
    pub intensity: f32,
    /// Ticks survived so far
    pub age: u32,
}

/// Growth/decay rates shared by every pulse
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PulseRates {
    pub radius_step: f32,
    pub decay_step: f32,
    pub max_intensity: f32,
}

/// Owns the live pulses, oldest first. A pulse only ever leaves by fading out.
#[derive(Debug, Clone)]
pub struct PulseTracker {
    rates: PulseRates,
    pulses: Vec<Pulse>,
}

impl PulseTracker {
    pub fn new(rates: PulseRates) -> Self {
        Self {
            rates,
            pulses: Vec::new(),
        }
    }

    /// Start a new pulse at full intensity
    pub fn trigger(&mut self, origin: Vec2) {
        self.pulses.push(Pulse {
            origin,
            radius: 0.0,
            intensity: self.rates.max_intensity,
            age: 0,
        });
    }

    /// Grow and fade every pulse, pruning the spent ones in the same pass
    pub fn advance(&mut self) {
        let rates = self.rates;
        self.pulses.retain_mut(|pulse| {
            pulse.radius += rates.radius_step;
            pulse.intensity -= rates.decay_step;
            pulse.age += 1;
            pulse.intensity > 0.0
        });
    }

    /// Largest radius among live pulses, 0 when none
    pub fn max_active_radius(&self) -> f32 {
        self.widest().map_or(0.0, |p| p.radius)
    }

    /// The live pulse with the largest radius (oldest on ties)
    pub fn widest(&self) -> Option<&Pulse> {
        self.pulses
            .iter()
            .reduce(|best, p| if p.radius > best.radius { p } else { best })
    }

    /// Live pulses for drawing rings
    pub fn pulses(&self) -> &[Pulse] {
        &self.pulses
    }

    pub fn is_empty(&self) -> bool {
        self.pulses.is_empty()
    }
}
