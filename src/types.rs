// Shared value types: points, object type bits, tank handles, cause of death

use std::fmt;
use std::ops::{Add, Neg, Sub};

/// The one random source a match draws from; seeded so matches replay exactly.
pub type GameRng = rand_pcg::Pcg64;

/// A position or displacement in arena units.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Self {
        Point { x, y }
    }

    pub fn length_sq(self) -> f64 {
        self.x * self.x + self.y * self.y
    }

    pub fn distance_sq(self, other: Point) -> f64 {
        (self - other).length_sq()
    }
}

impl Add for Point {
    type Output = Point;

    fn add(self, rhs: Point) -> Point {
        Point::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for Point {
    type Output = Point;

    fn sub(self, rhs: Point) -> Point {
        Point::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl Neg for Point {
    type Output = Point;

    fn neg(self) -> Point {
        Point::new(-self.x, -self.y)
    }
}

/// Object type tags. Each is a single bit so sensors can OR them into a mask.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ObjectType {
    Tank = 1,
    Pillar = 2,
}

impl ObjectType {
    pub fn bit(self) -> u32 {
        self as u32
    }

    /// Minimum clearance between two placed objects, on top of their radii.
    pub fn spacing(self, other: ObjectType) -> f64 {
        use crate::config::{SPACING_PILLAR_PILLAR, SPACING_TANK_PILLAR, SPACING_TANK_TANK};
        match (self, other) {
            (ObjectType::Tank, ObjectType::Tank) => SPACING_TANK_TANK,
            (ObjectType::Pillar, ObjectType::Pillar) => SPACING_PILLAR_PILLAR,
            _ => SPACING_TANK_PILLAR,
        }
    }
}

/// Opaque handle for a tank: its index in the game's tank table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TankId(pub usize);

impl fmt::Display for TankId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CauseOfDeath {
    Collision,
    Shot,
}

impl fmt::Display for CauseOfDeath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CauseOfDeath::Collision => write!(f, "collision"),
            CauseOfDeath::Shot => write!(f, "shot"),
        }
    }
}
