// Built-in opponents for filling out a match

use crate::tank::{SensorConfig, TankSetup};

const BERZERKER: &str = "2 random 0 = { 50 100 set-speed! } { 100 50 set-speed! } ifelse  \
                         4 random 0 = { 360 random  set-turret! } if  \
                         30 random 0 = { fire! } if";

/// Wanders in random arcs, spins its turret and fires at random.
pub fn berzerker() -> TankSetup {
    TankSetup::new("Berzerker", BERZERKER).with_path("NA")
}

/// The Tweedledum family: sweep the turret, drive at fixed tread speeds,
/// shoot whatever the narrow turret sensor sees and turn away from anything
/// the wide hull sensor sees.
pub fn tweedledums() -> Vec<TankSetup> {
    [
        ("Tweedledum", 60, 50),
        ("Tweedledummer", -80, -70),
        ("Tweedledummerer", 20, 30),
        ("Tweedledummerest", 40, 35),
    ]
    .into_iter()
    .map(|(name, left, right)| tweedledum(name, left, right))
    .collect()
}

fn tweedledum(name: &str, left: i32, right: i32) -> TankSetup {
    let program = format!(
        "get-turret 12 + set-turret! {} {} set-speed! \
         0 sensor? {{ fire! }} if 1 sensor? {{ -50 50 set-speed! }} if",
        left, right
    );
    TankSetup::new(name, program)
        .with_path("NA")
        .with_sensor(SensorConfig::new(50.0, 0.0, 7.0, true))
        .with_sensor(SensorConfig::new(50.0, 0.0, 90.0, false))
}
