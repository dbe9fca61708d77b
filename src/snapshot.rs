// What the outside world sees of a match: per-tick frames and final standings

use crate::arena::Pillar;
use crate::tank::Tank;
use crate::types::{CauseOfDeath, TankId};
use crate::utils::to_precision;
use std::fmt;

pub const FLAG_FIRING: u8 = 1;
pub const FLAG_LED: u8 = 1 << 1;
pub const FLAG_CRATER: u8 = 1 << 2;
pub const FLAG_TELEPORTING: u8 = 1 << 3;

/// One tank as drawn for one tick. Positions are whole units and angles
/// carry three significant digits.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TankFrame {
    pub id: TankId,
    pub x: f64,
    pub y: f64,
    pub angle: f64,
    pub turret: f64,
    pub flags: u8,
    pub sensors: u32, // Bit k set when sensor k triggered
}

impl TankFrame {
    pub fn capture(tank: &Tank) -> Self {
        let mut flags = 0;
        if tank.turret.firing {
            flags |= FLAG_FIRING;
        }
        if tank.led {
            flags |= FLAG_LED;
        }
        if tank.is_crater() {
            flags |= FLAG_CRATER;
        }
        if tank.teleport.teleporting {
            flags |= FLAG_TELEPORTING;
        }

        let sensors = tank
            .sensors
            .iter()
            .enumerate()
            .filter(|(_, sensor)| sensor.triggered != 0)
            .fold(0, |mask, (index, _)| mask | 1 << index);

        TankFrame {
            id: tank.id,
            x: tank.position.x.round(),
            y: tank.position.y.round(),
            angle: to_precision(tank.angle, 3),
            turret: to_precision(tank.turret.current, 3),
            flags,
            sensors,
        }
    }

    pub fn has(&self, flag: u8) -> bool {
        self.flags & flag != 0
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PillarFrame {
    pub x: f64,
    pub y: f64,
    pub radius: f64,
}

impl From<&Pillar> for PillarFrame {
    fn from(pillar: &Pillar) -> Self {
        PillarFrame {
            x: pillar.position.x,
            y: pillar.position.y,
            radius: pillar.radius,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct TickSnapshot {
    pub tick: u32,
    pub tanks: Vec<TankFrame>,
    pub pillars: Vec<PillarFrame>,
}

/// How a tank finished the match, for whoever scores it
#[derive(Debug, Clone, PartialEq)]
pub struct Standing {
    pub id: TankId,
    pub path: String,
    pub cause: Option<CauseOfDeath>,
    pub killer: Option<TankId>,
    pub error_position: usize,
    pub error: Option<String>,
}

impl Standing {
    pub fn from_tank(tank: &Tank) -> Self {
        Standing {
            id: tank.id,
            path: tank.path.clone(),
            cause: tank.cause_of_death,
            killer: tank.killer,
            error_position: tank.error.as_ref().map_or(0, |err| err.position()),
            error: tank.error.as_ref().map(|err| err.to_string()),
        }
    }
}

/// Tab-separated: id, path, cause, killer, error position, error
impl fmt::Display for Standing {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}\t{}\t", self.id, self.path)?;
        match self.cause {
            Some(cause) => write!(f, "{}\t", cause)?,
            None => write!(f, "(null)\t")?,
        }
        match self.killer {
            Some(killer) => write!(f, "{}\t", killer)?,
            None => write!(f, "(nil)\t")?,
        }
        write!(
            f,
            "{}\t{}",
            self.error_position,
            self.error.as_deref().unwrap_or("None")
        )
    }
}
