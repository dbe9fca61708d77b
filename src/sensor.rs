// Sensor sweep: which cones can see which tanks and pillars this tick

use crate::arena::Arena;
use crate::config::GameConfig;
use crate::tank::{Tank, pair_mut};
use crate::types::{ObjectType, Point};
use crate::utils::rotate_point;

/// Recompute every sensor's trigger mask from current positions.
///
/// Each pair of live tanks is checked both ways, then every live tank
/// against every pillar. Masks are assumed cleared by the recharge pass.
pub fn update_sensors(tanks: &mut [Tank], arena: &Arena, config: &GameConfig) {
    for i in 0..tanks.len() {
        if tanks[i].is_crater() {
            continue;
        }
        for j in i + 1..tanks.len() {
            let (this, that) = pair_mut(tanks, i, j);
            if that.is_crater() {
                continue;
            }
            let (offset, dist2) = arena.displacement(this.position, that.position);
            sense(this, offset, dist2, config.tank_radius, ObjectType::Tank, config);
            sense(that, -offset, dist2, config.tank_radius, ObjectType::Tank, config);
        }

        let tank = &mut tanks[i];
        for pillar in &arena.pillars {
            let (offset, dist2) = arena.displacement(tank.position, pillar.position);
            sense(tank, offset, dist2, pillar.radius, ObjectType::Pillar, config);
        }
    }
}

/// Check one target, `offset` away from `observer`, against each of the
/// observer's sensors and OR its type bit into those that see it.
pub fn sense(
    observer: &mut Tank,
    offset: Point,
    dist2: f64,
    radius: f64,
    kind: ObjectType,
    config: &GameConfig,
) {
    if dist2 > (config.sensor_range + radius).powi(2) {
        return;
    }

    let hull = observer.angle;
    let turret = observer.turret.current;
    for (index, sensor) in observer.sensors.iter_mut().enumerate() {
        if sensor.range == 0.0 || sensor.triggered & kind.bit() != 0 {
            continue;
        }
        if dist2 > (sensor.range + radius).powi(2) {
            continue;
        }

        let mut theta = hull + sensor.angle;
        if sensor.turret {
            theta += turret;
        }

        // The cone is symmetric, so fold the target into the upper half
        let mut relative = rotate_point(-theta, offset);
        relative.y = relative.y.abs();

        // Inverse slopes: cone edge versus bearing to the target
        let edge = 1.0 / (sensor.width / 2.0).tan();
        let bearing = relative.x / relative.y;

        let seen = if bearing >= edge {
            true
        } else {
            // Outside the cone, but the edge ray may still clip the target
            let along_edge = rotate_point(-sensor.width / 2.0, relative);
            along_edge.x > 0.0 && along_edge.y.abs() < radius
        };

        if seen {
            sensor.triggered |= kind.bit();
            crate::debug_sensor!(
                "Tank {} sensor {} sees {:?} at ({:.1}, {:.1})",
                observer.id,
                index,
                kind,
                offset.x,
                offset.y
            );
        }
    }
}
