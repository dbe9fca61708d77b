//! Configuration constants for the tank arena.

use crate::error::SetupError;
use std::f64::consts::TAU;

// Tank body and weapons
pub const TANK_RADIUS: f64 = 7.5;
pub const TANK_SENSOR_RANGE: f64 = 100.0;
pub const TANK_CANNON_RANGE: f64 = TANK_SENSOR_RANGE / 2.0;
pub const TANK_CANNON_RECHARGE: u32 = 20; // Ticks to recharge cannon
pub const TANK_ENABLE_TELEPORT: bool = true;
pub const TANK_TELEPORT_RECHARGE: u32 = 60; // Ticks to recharge teleport
pub const TANK_AMMO: i32 = -1; // Negative ammo means unlimited
pub const TANK_MAX_SENSORS: usize = 10;

// Tank movement
pub const TANK_MAX_ACCEL: f64 = 35.0; // Tread speed change per tick
pub const TANK_MAX_TURRET_ROT: f64 = TAU / 8.0; // Radians per tick
pub const TANK_TOP_SPEED: f64 = 7.0; // Arena units per tick at speed 100
pub const TANK_FRICTION: f64 = 0.75;

// Programs
pub const TANK_MAX_PROGRAM_LENGTH: usize = 0; // Non-whitespace chars, 0 = no limit
pub const MEMORY_SIZE: usize = 10;
pub const MAX_INSTRUCTIONS_PER_TICK: usize = 10_000;
pub const MAX_DATA_STACK_SIZE: usize = 1024;

// Pillars
pub const PILLAR_MIN_RADIUS: f64 = 25.0;
pub const PILLAR_MAX_RADIUS: f64 = 35.0;
pub const PILLAR_TO_WALL: f64 = 50.0;

// Board layout
pub const GRID_SPACING: f64 = 160.0; // Arena units per placement cell
pub const SPACING_TANK_TANK: f64 = 150.0;
pub const SPACING_PILLAR_PILLAR: f64 = 50.0;
pub const SPACING_TANK_PILLAR: f64 = 10.0;
pub const MAX_PLACEMENT_ATTEMPTS: u32 = 10_000;

// Game rules
pub const MAX_TICKS: u32 = 500; // Ticks before the match is called

/// Tunables for a single match. `Default` mirrors the constants above.
#[derive(Debug, Clone, PartialEq)]
pub struct GameConfig {
    pub tank_radius: f64,
    pub sensor_range: f64,
    pub cannon_range: f64,
    pub cannon_recharge: u32,
    pub teleport_enabled: bool,
    pub teleport_recharge: u32,
    pub ammo: i32,
    pub max_accel: f64,
    pub max_turret_rotation: f64,
    pub top_speed: f64,
    pub friction: f64,
    pub max_program_length: usize,
    pub instruction_budget: usize,
    pub data_stack_size: usize,
    pub pillar_min_radius: f64,
    pub pillar_max_radius: f64,
    pub pillar_to_wall: f64,
    pub grid_spacing: f64,
    pub max_ticks: u32,
}

impl Default for GameConfig {
    fn default() -> Self {
        GameConfig {
            tank_radius: TANK_RADIUS,
            sensor_range: TANK_SENSOR_RANGE,
            cannon_range: TANK_CANNON_RANGE,
            cannon_recharge: TANK_CANNON_RECHARGE,
            teleport_enabled: TANK_ENABLE_TELEPORT,
            teleport_recharge: TANK_TELEPORT_RECHARGE,
            ammo: TANK_AMMO,
            max_accel: TANK_MAX_ACCEL,
            max_turret_rotation: TANK_MAX_TURRET_ROT,
            top_speed: TANK_TOP_SPEED,
            friction: TANK_FRICTION,
            max_program_length: TANK_MAX_PROGRAM_LENGTH,
            instruction_budget: MAX_INSTRUCTIONS_PER_TICK,
            data_stack_size: MAX_DATA_STACK_SIZE,
            pillar_min_radius: PILLAR_MIN_RADIUS,
            pillar_max_radius: PILLAR_MAX_RADIUS,
            pillar_to_wall: PILLAR_TO_WALL,
            grid_spacing: GRID_SPACING,
            max_ticks: MAX_TICKS,
        }
    }
}

impl GameConfig {
    /// (2 * tank radius)^2: two hulls closer than this have collided.
    pub fn collision_adj2(&self) -> f64 {
        (2.0 * self.tank_radius).powi(2)
    }

    /// (cannon range + tank radius)^2
    pub fn cannon_adj2(&self) -> f64 {
        (self.cannon_range + self.tank_radius).powi(2)
    }

    /// Rejects values the tick loop would otherwise have to guard against.
    pub fn validate(&self) -> Result<(), SetupError> {
        let positive = [
            ("tank_radius", self.tank_radius),
            ("top_speed", self.top_speed),
            ("max_accel", self.max_accel),
            ("max_turret_rotation", self.max_turret_rotation),
            ("grid_spacing", self.grid_spacing),
            ("pillar_min_radius", self.pillar_min_radius),
        ];
        for (name, value) in positive {
            if !(value.is_finite() && value > 0.0) {
                return Err(SetupError::InvalidConfig(format!(
                    "{} must be positive, got {}",
                    name, value
                )));
            }
        }
        if !(self.sensor_range >= 0.0 && self.cannon_range >= 0.0) {
            return Err(SetupError::InvalidConfig(
                "sensor and cannon ranges must be non-negative".to_string(),
            ));
        }
        // At 1.0 fully opposed treads leave no turning radius
        if !(0.0..1.0).contains(&self.friction) {
            return Err(SetupError::InvalidConfig(format!(
                "friction must be within [0, 1), got {}",
                self.friction
            )));
        }
        if self.pillar_max_radius < self.pillar_min_radius {
            return Err(SetupError::InvalidConfig(
                "pillar_max_radius is smaller than pillar_min_radius".to_string(),
            ));
        }
        if self.instruction_budget == 0 || self.data_stack_size == 0 {
            return Err(SetupError::InvalidConfig(
                "instruction budget and data stack size must be non-zero".to_string(),
            ));
        }
        Ok(())
    }
}
