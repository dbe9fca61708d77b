use crate::config::{self, GameConfig};
use crate::error::SetupError;
use crate::types::{CauseOfDeath, GameRng, Point, TankId};
use crate::utils::deg_to_rad;
use crate::vm::executor::InstructionExecutor;
use crate::vm::host::TankHost;
use crate::vm::parser::{parse_program, truncate_program};
use crate::vm::{ProgramError, VMState};
use log::warn;
use rand::Rng;
use std::f64::consts::TAU;
use std::str::FromStr;

/// Sensor settings as a tank author writes them: range, then angle and
/// width in degrees, then whether the cone follows the turret.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct SensorConfig {
    pub range: f64,
    pub angle: f64,
    pub width: f64,
    pub turret: bool,
}

impl SensorConfig {
    pub fn new(range: f64, angle: f64, width: f64, turret: bool) -> Self {
        SensorConfig {
            range,
            angle,
            width,
            turret,
        }
    }
}

/// Parses `range angle width turret`, e.g. `50 0 7 1`
impl FromStr for SensorConfig {
    type Err = SetupError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let fields: Vec<&str> = s.split_whitespace().collect();
        if fields.len() != 4 {
            return Err(SetupError::InvalidConfig(format!(
                "sensor needs 4 fields (range angle width turret), got '{}'",
                s.trim()
            )));
        }
        let mut numbers = [0.0; 4];
        for (slot, field) in numbers.iter_mut().zip(&fields) {
            *slot = field.parse::<f64>().map_err(|_| {
                SetupError::InvalidConfig(format!("sensor field '{}' is not a number", field))
            })?;
        }
        Ok(SensorConfig::new(
            numbers[0],
            numbers[1],
            numbers[2],
            numbers[3] != 0.0,
        ))
    }
}

// A mounted sensor. Angles are in radians relative to the hull (or turret).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sensor {
    pub range: f64, // 0 means the slot is empty
    pub angle: f64,
    pub width: f64, // Full cone width
    pub turret: bool,
    pub triggered: u32, // ObjectType bits seen this tick
}

impl Sensor {
    fn from_config(sensor: &SensorConfig, max_range: f64) -> Self {
        Sensor {
            range: sensor.range.min(max_range),
            angle: deg_to_rad(sensor.angle % 360.0),
            width: deg_to_rad(sensor.width % 360.0),
            turret: sensor.turret,
            triggered: 0,
        }
    }
}

/// Everything needed to enter a tank into a match
#[derive(Debug, Clone, Default)]
pub struct TankSetup {
    pub name: String,
    pub path: String,
    pub program: String,
    pub sensors: Vec<SensorConfig>,
}

impl TankSetup {
    pub fn new(name: impl Into<String>, program: impl Into<String>) -> Self {
        let name = name.into();
        TankSetup {
            path: name.clone(),
            name,
            program: program.into(),
            sensors: Vec::new(),
        }
    }

    pub fn with_sensor(mut self, sensor: SensorConfig) -> Self {
        self.sensors.push(sensor);
        self
    }

    pub fn with_path(mut self, path: impl Into<String>) -> Self {
        self.path = path.into();
        self
    }
}

// Tread speeds, left then right, in [-100, 100]
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct TreadSpeed {
    pub desired: [f64; 2],
    pub current: [f64; 2],
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Turret {
    pub current: f64, // Radians relative to the hull
    pub desired: f64,
    pub firing: bool,
    pub recharge: u32, // Ticks until the cannon can fire again
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Teleporter {
    pub recharge: u32,
    pub teleporting: bool,
}

// A tank: hull, treads, turret, sensors and the program driving them
#[derive(Debug, Clone)]
pub struct Tank {
    pub id: TankId,
    pub name: String,
    pub path: String,
    pub position: Point,
    pub next_position: Point, // Where the tank will be at the start of next tick
    pub angle: f64,           // Hull heading in radians
    pub movement_radius: f64, // Turning circle radius while the treads differ
    pub speed: TreadSpeed,
    pub turret: Turret,
    pub teleport: Teleporter,
    pub ammo: i32, // Negative is unlimited
    pub led: bool,
    pub sensors: Vec<Sensor>,
    pub killer: Option<TankId>,
    pub cause_of_death: Option<CauseOfDeath>,
    pub collided_with: Option<usize>, // Pillar that blocked the last move
    pub program: String,
    pub vm: VMState,
    pub error: Option<ProgramError>, // Last program failure, kept until replaced
}

impl Tank {
    /// Build a tank from its setup, checking sensors and trimming the program.
    /// The tank starts at the origin facing east; placement comes later.
    pub fn new(id: TankId, setup: TankSetup, config: &GameConfig) -> Result<Self, SetupError> {
        if setup.sensors.len() > config::TANK_MAX_SENSORS {
            return Err(SetupError::TooManySensors {
                tank: setup.name,
                count: setup.sensors.len(),
                max: config::TANK_MAX_SENSORS,
            });
        }
        for (index, sensor) in setup.sensors.iter().enumerate() {
            if !(sensor.range.is_finite() && sensor.range >= 0.0)
                || !sensor.angle.is_finite()
                || !sensor.width.is_finite()
            {
                return Err(SetupError::InvalidSensorRange {
                    tank: setup.name,
                    index,
                    range: sensor.range,
                });
            }
        }

        let sensors = setup
            .sensors
            .iter()
            .map(|sensor| Sensor::from_config(sensor, config.sensor_range))
            .collect();
        let program = truncate_program(&setup.program, config.max_program_length).to_string();

        Ok(Tank {
            id,
            name: setup.name,
            path: setup.path,
            position: Point::default(),
            next_position: Point::default(),
            angle: 0.0,
            movement_radius: 0.0,
            speed: TreadSpeed::default(),
            turret: Turret::default(),
            teleport: Teleporter::default(),
            ammo: config.ammo,
            led: false,
            sensors,
            killer: None,
            cause_of_death: None,
            collided_with: None,
            program,
            vm: VMState::with_stack_size(config.data_stack_size),
            error: None,
        })
    }

    /// Put the tank on the field
    pub fn place(&mut self, position: Point, angle: f64, turret: f64) {
        self.position = position;
        self.next_position = position;
        self.angle = angle;
        self.turret.current = turret;
        self.turret.desired = turret;
    }

    pub fn is_crater(&self) -> bool {
        self.killer.is_some()
    }

    /// Blocked by a pillar on the last move
    pub fn collided(&self) -> bool {
        self.collided_with.is_some()
    }

    pub fn kill(&mut self, killer: TankId, cause: CauseOfDeath) {
        self.killer = Some(killer);
        self.cause_of_death = Some(cause);
    }

    pub fn fire_ready(&self) -> bool {
        self.ammo != 0 && self.turret.recharge == 0
    }

    /// Fires only when ready; the flag records whether a shot went out
    pub fn fire(&mut self) {
        let ready = self.fire_ready();
        if ready && self.ammo > 0 {
            self.ammo -= 1;
        }
        self.turret.firing = ready;
    }

    pub fn teleport_ready(&self) -> bool {
        self.teleport.recharge == 0
    }

    pub fn request_teleport(&mut self) {
        self.teleport.teleporting = self.teleport_ready();
    }

    pub fn set_speed(&mut self, left: f64, right: f64) {
        self.speed.desired = [left.clamp(-100.0, 100.0), right.clamp(-100.0, 100.0)];
    }

    pub fn set_turret(&mut self, angle: f64) {
        self.turret.desired = angle.rem_euclid(TAU);
    }

    /// Trigger mask for sensor `index`; anything but a mounted sensor's index reads 0
    pub fn sensor(&self, index: f64) -> u32 {
        if index < 0.0 || index.fract() != 0.0 {
            return 0;
        }
        self.sensors
            .get(index as usize)
            .map_or(0, |sensor| sensor.triggered)
    }

    /// Start-of-tick bookkeeping: finish last tick's shot and teleport,
    /// count down recharges, and clear the sensors.
    pub fn recharge(&mut self, config: &GameConfig) {
        if self.turret.firing {
            self.turret.firing = false;
            self.turret.recharge = config.cannon_recharge;
        }
        if self.teleport.teleporting {
            self.teleport.teleporting = false;
            self.teleport.recharge = config.teleport_recharge;
        }
        if self.is_crater() {
            return;
        }
        self.turret.recharge = self.turret.recharge.saturating_sub(1);
        self.teleport.recharge = self.teleport.recharge.saturating_sub(1);
        for sensor in &mut self.sensors {
            sensor.triggered = 0;
        }
    }

    /// Re-parse and run the program. A failure is recorded on the tank and
    /// leaves whatever intents were set before it in place.
    pub fn run_program(&mut self, executor: &InstructionExecutor, rng: &mut GameRng, tick: u32) {
        let result = match parse_program(&self.program) {
            Ok(program) => {
                let mut vm = std::mem::take(&mut self.vm);
                let result = executor.run(&mut vm, &mut TankBody { tank: self, rng }, program);
                self.vm = vm;
                result
            }
            Err(err) => Err(ProgramError::from(err)),
        };

        match result {
            Ok(()) => {
                crate::debug_vm!(
                    self.id,
                    tick,
                    "ran {} instructions, {} values left on the stack",
                    self.vm.executed,
                    self.vm.data.len()
                );
            }
            Err(err) => {
                warn!("Tank {} Tick {}: {} ({})", self.id, tick, err, self.name);
                self.error = Some(err);
            }
        }
    }
}

/// Mutable access to two different tanks at once, `i < j`
pub fn pair_mut(tanks: &mut [Tank], i: usize, j: usize) -> (&mut Tank, &mut Tank) {
    let (head, tail) = tanks.split_at_mut(j);
    (&mut head[i], &mut tail[0])
}

// The tank as its program sees it
struct TankBody<'a> {
    tank: &'a mut Tank,
    rng: &'a mut GameRng,
}

impl TankHost for TankBody<'_> {
    fn fire_ready(&self) -> bool {
        self.tank.fire_ready()
    }

    fn fire(&mut self) {
        self.tank.fire();
    }

    fn teleport_ready(&self) -> bool {
        self.tank.teleport_ready()
    }

    fn teleport(&mut self) {
        self.tank.request_teleport();
    }

    fn set_speed(&mut self, left: f64, right: f64) {
        self.tank.set_speed(left, right);
    }

    fn set_turret(&mut self, angle: f64) {
        self.tank.set_turret(angle);
    }

    fn turret(&self) -> f64 {
        self.tank.turret.current
    }

    fn sensor(&self, index: f64) -> u32 {
        self.tank.sensor(index)
    }

    fn set_led(&mut self, on: bool) {
        self.tank.led = on;
    }

    fn random(&mut self, max: f64) -> f64 {
        (self.rng.r#gen::<f64>() * max).floor()
    }
}
