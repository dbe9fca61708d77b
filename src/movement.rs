// Differential-drive kinematics: turret slew, tread ramp, and the provisional next position

use crate::arena::Arena;
use crate::config::GameConfig;
use crate::tank::Tank;
use crate::types::Point;
use crate::utils::wrap_angle;
use std::f64::consts::TAU;

/// Advance a tank's turret and treads one tick and compute where it would
/// end up with nothing in the way. Updates heading, `movement_radius` and
/// `next_position`; obstacles are handled afterwards by the collision pass.
pub fn precalc_next_position(tank: &mut Tank, arena: &Arena, config: &GameConfig) {
    slew_turret(tank, config);
    ramp_treads(tank, config);

    let [left, right] = tank.speed.current;
    let mut dir = 1.0;
    let (movement, swept) = if left == right {
        (left * config.top_speed / 100.0, 0.0)
    } else {
        // Opposing treads bleed off speed
        let friction = config.friction * (left - right).abs() / 200.0;
        let scale = (1.0 - friction) * config.top_speed / 100.0;
        let v = [left * scale, right * scale];

        // Inside and outside tread speeds
        let (inner, outer) = if v[0].abs() > v[1].abs() {
            (v[1], v[0])
        } else {
            dir = -1.0;
            (v[0], v[1])
        };

        // Outside tread's turning radius, by similar triangles
        tank.movement_radius = outer * (2.0 * config.tank_radius) / (outer - inner);

        let theta = outer / tank.movement_radius * dir;
        (tank.movement_radius * theta.tan(), theta)
    };

    tank.angle = (tank.angle + swept).rem_euclid(TAU);
    let step = Point::new(
        tank.angle.cos() * movement * dir,
        tank.angle.sin() * movement * dir,
    );
    tank.next_position = arena.wrap(tank.position + step);

    crate::debug_drive!(
        "Tank {}: treads {:?} heading {:.3} next ({:.2}, {:.2})",
        tank.id,
        tank.speed.current,
        tank.angle,
        tank.next_position.x,
        tank.next_position.y
    );
}

// Rotate toward the desired angle the short way, no more than the max step
fn slew_turret(tank: &mut Tank, config: &GameConfig) {
    let wanted = wrap_angle(tank.turret.desired - tank.turret.current);
    let step = wanted.clamp(-config.max_turret_rotation, config.max_turret_rotation);
    tank.turret.current = (tank.turret.current + step).rem_euclid(TAU);
}

fn ramp_treads(tank: &mut Tank, config: &GameConfig) {
    for (current, desired) in tank
        .speed
        .current
        .iter_mut()
        .zip(tank.speed.desired.iter())
    {
        if *current < *desired {
            *current = (*current + config.max_accel).min(*desired);
        } else if *current > *desired {
            *current = (*current - config.max_accel).max(*desired);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tank::TankSetup;
    use crate::types::TankId;
    use assert_approx_eq::assert_approx_eq;
    use std::f64::consts::PI;

    fn setup(position: Point, angle: f64) -> (Tank, Arena, GameConfig) {
        let config = GameConfig::default();
        let mut tank = Tank::new(TankId(0), TankSetup::new("t", ""), &config).unwrap();
        tank.place(position, angle, 0.0);
        (tank, Arena::new(400.0, 400.0), config)
    }

    #[test]
    fn test_treads_ramp_by_max_accel() {
        let (mut tank, arena, config) = setup(Point::new(100.0, 100.0), 0.0);
        tank.set_speed(100.0, -50.0);
        precalc_next_position(&mut tank, &arena, &config);
        assert_eq!(tank.speed.current, [35.0, -35.0]);
        precalc_next_position(&mut tank, &arena, &config);
        assert_eq!(tank.speed.current, [70.0, -50.0]);
        precalc_next_position(&mut tank, &arena, &config);
        assert_eq!(tank.speed.current, [100.0, -50.0]);
    }

    #[test]
    fn test_straight_line() {
        let (mut tank, arena, config) = setup(Point::new(100.0, 100.0), PI / 2.0);
        tank.speed.current = [100.0, 100.0];
        tank.speed.desired = [100.0, 100.0];
        precalc_next_position(&mut tank, &arena, &config);
        assert_approx_eq!(tank.next_position.x, 100.0);
        assert_approx_eq!(tank.next_position.y, 107.0);
        assert_approx_eq!(tank.angle, PI / 2.0);
        assert_eq!(tank.position, Point::new(100.0, 100.0));
    }

    #[test]
    fn test_reverse_and_wrap() {
        let (mut tank, arena, config) = setup(Point::new(2.0, 50.0), 0.0);
        tank.speed.current = [-50.0, -50.0];
        tank.speed.desired = [-50.0, -50.0];
        precalc_next_position(&mut tank, &arena, &config);
        assert_approx_eq!(tank.next_position.x, 398.5);
        assert_approx_eq!(tank.next_position.y, 50.0);
    }

    #[test]
    fn test_differential_turn() {
        let (mut tank, arena, config) = setup(Point::new(200.0, 200.0), 0.0);
        tank.speed.current = [100.0, 50.0];
        tank.speed.desired = [100.0, 50.0];
        precalc_next_position(&mut tank, &arena, &config);

        let friction = 0.75 * 50.0 / 200.0;
        let outer = 100.0 * (1.0 - friction) * 0.07;
        let inner = 50.0 * (1.0 - friction) * 0.07;
        let radius = outer * 15.0 / (outer - inner);
        let theta = outer / radius;
        assert_approx_eq!(tank.movement_radius, radius);
        assert_approx_eq!(tank.angle, theta);

        let movement = radius * theta.tan();
        assert_approx_eq!(tank.next_position.x, 200.0 + theta.cos() * movement);
        assert_approx_eq!(tank.next_position.y, 200.0 + theta.sin() * movement);
    }

    #[test]
    fn test_turn_direction_follows_faster_tread() {
        let (mut tank, arena, config) = setup(Point::new(200.0, 200.0), 1.0);
        tank.speed.current = [50.0, 100.0];
        tank.speed.desired = [50.0, 100.0];
        precalc_next_position(&mut tank, &arena, &config);
        assert!(tank.angle < 1.0);
    }

    #[test]
    fn test_spin_in_place_moves_little() {
        let (mut tank, arena, config) = setup(Point::new(200.0, 200.0), 0.0);
        tank.speed.current = [-100.0, 100.0];
        tank.speed.desired = [-100.0, 100.0];
        precalc_next_position(&mut tank, &arena, &config);
        assert_approx_eq!(tank.movement_radius, config.tank_radius);
        assert!(tank.next_position.distance_sq(tank.position) < 4.0);
    }

    #[test]
    fn test_turret_takes_short_way() {
        let (mut tank, arena, config) = setup(Point::new(200.0, 200.0), 0.0);
        tank.turret.current = 0.1;
        tank.turret.desired = TAU - 0.1;
        precalc_next_position(&mut tank, &arena, &config);
        assert_approx_eq!(tank.turret.current, TAU - 0.1);

        tank.turret.desired = PI;
        precalc_next_position(&mut tank, &arena, &config);
        assert_approx_eq!(tank.turret.current, TAU - 0.1 - config.max_turret_rotation);
    }
}
