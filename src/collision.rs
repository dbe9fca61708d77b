// Clamps a tank's provisional move to the first point of contact with a pillar

use crate::arena::Arena;
use crate::tank::Tank;
use crate::types::Point;
use crate::utils::{angular_distance, normalize_rad};

/// Slopes steeper than this are treated as vertical lines
const VERTICAL_SLOPE: f64 = 100_000.0;

/// Check the tank's next position against every pillar and pull it back to
/// the point where its hull first touches one.
///
/// A tank that was already blocked by the same pillar last tick is held
/// where it stands instead. Geometry is done in the tank's own unwrapped
/// frame so contacts across the arena edge resolve like any other.
pub fn clamp_to_pillars(tank: &mut Tank, arena: &Arena, tank_radius: f64) {
    let blocked_by = tank.collided_with.take();

    for (index, pillar) in arena.pillars.iter().enumerate() {
        let origin = tank.position;
        let center = origin + arena.displacement(origin, pillar.position).0;
        let next = origin + arena.displacement(origin, tank.next_position).0;
        let reach = pillar.radius + tank_radius;

        if next.distance_sq(center) > reach * reach {
            continue;
        }

        let contact = if blocked_by == Some(index) {
            origin
        } else if tank.speed.current[0] == tank.speed.current[1] {
            straight_contact(origin, tank.angle, center, reach)
        } else {
            arc_contact(tank, center, reach)
        };

        crate::debug_collision!(
            "Tank {} meets pillar {} at ({:.2}, {:.2}){}",
            tank.id,
            index,
            contact.x,
            contact.y,
            if blocked_by == Some(index) { ", held" } else { "" }
        );
        tank.next_position = arena.wrap(contact);
        tank.collided_with = Some(index);
    }
}

/// Where a line through `origin` at `heading` first meets the circle of
/// radius `reach` around `center`: the intersection nearer the origin.
fn straight_contact(origin: Point, heading: f64, center: Point, reach: f64) -> Point {
    let m = heading.tan();

    if m.abs() > VERTICAL_SLOPE {
        let dx = origin.x - center.x;
        let dy = (reach * reach - dx * dx).max(0.0).sqrt();
        let y = if origin.y > center.y {
            center.y + dy
        } else {
            center.y - dy
        };
        return Point::new(origin.x, y);
    }

    // y = mx + c substituted into the circle gives Ax^2 + Bx + C = 0
    let c = origin.y - m * origin.x;
    let a = m * m + 1.0;
    let b = 2.0 * (m * c - m * center.y - center.x);
    let cc = center.y * center.y - reach * reach + center.x * center.x - 2.0 * c * center.y + c * c;
    // Only rounding can push this negative: the move ended inside the circle
    let root = (b * b - 4.0 * a * cc).max(0.0).sqrt();

    let x1 = (-b + root) / (2.0 * a);
    let x2 = (-b - root) / (2.0 * a);
    let x = if (x1 - origin.x).abs() < (x2 - origin.x).abs() {
        x1
    } else {
        x2
    };
    Point::new(x, m * x + c)
}

/// Where the tank's turning circle first brings its hull against the circle
/// of radius `reach` around `center`.
fn arc_contact(tank: &Tank, center: Point, reach: f64) -> Point {
    let radius = tank.movement_radius;
    let heading = Point::new(tank.angle.cos() * radius, tank.angle.sin() * radius);
    let inward = if tank.speed.current[0] < tank.speed.current[1] {
        Point::new(heading.y, -heading.x)
    } else {
        Point::new(-heading.y, heading.x)
    };
    let pivot = tank.position + inward;

    let to_pillar = center - pivot;
    let to_tank = tank.position - pivot;
    let pillar_distance = to_pillar.length_sq().sqrt();
    let pillar_bearing = normalize_rad(to_pillar.y.atan2(to_pillar.x));
    let tank_bearing = normalize_rad(to_tank.y.atan2(to_tank.x));

    // Law of cosines: half the angle between the two tangent positions
    let spread = (-(reach * reach - pillar_distance * pillar_distance - radius * radius)
        / (2.0 * pillar_distance * radius))
        .acos();

    let bearing = if spread.is_nan() {
        pillar_bearing
    } else {
        let first = normalize_rad(pillar_bearing - spread);
        let second = normalize_rad(pillar_bearing + spread);
        if angular_distance(tank_bearing, first) < angular_distance(tank_bearing, second) {
            first
        } else {
            second
        }
    };

    Point::new(
        pivot.x + bearing.cos() * radius,
        pivot.y + bearing.sin() * radius,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::arena::Pillar;
    use crate::config::GameConfig;
    use crate::movement::precalc_next_position;
    use crate::tank::TankSetup;
    use crate::types::TankId;
    use assert_approx_eq::assert_approx_eq;
    use std::f64::consts::PI;

    fn arena_with_pillar(position: Point, radius: f64) -> Arena {
        let mut arena = Arena::new(400.0, 400.0);
        arena.pillars.push(Pillar::new(position, radius));
        arena
    }

    fn moving_tank(position: Point, angle: f64, speed: [f64; 2]) -> Tank {
        let config = GameConfig::default();
        let mut tank = Tank::new(TankId(0), TankSetup::new("t", ""), &config).unwrap();
        tank.place(position, angle, 0.0);
        tank.speed.current = speed;
        tank.speed.desired = speed;
        tank
    }

    #[test]
    fn test_straight_contact_lands_on_boundary() {
        let config = GameConfig::default();
        let arena = arena_with_pillar(Point::new(150.0, 100.0), 40.0);
        let mut tank = moving_tank(Point::new(100.0, 100.0), 0.0, [100.0, 100.0]);
        precalc_next_position(&mut tank, &arena, &config);
        assert_approx_eq!(tank.next_position.x, 107.0);

        clamp_to_pillars(&mut tank, &arena, config.tank_radius);
        assert_approx_eq!(tank.next_position.x, 102.5);
        assert_approx_eq!(tank.next_position.y, 100.0);
        assert!(tank.collided());
    }

    #[test]
    fn test_straight_contact_at_an_angle() {
        let reach = 37.5;
        let center = Point::new(200.0, 200.0);
        let heading = PI / 4.0;
        let origin = Point::new(200.0 - 40.0 * heading.cos(), 200.0 - 40.0 * heading.sin());
        let contact = straight_contact(origin, heading, center, reach);
        assert_approx_eq!(contact.distance_sq(center).sqrt(), reach);
        assert!(contact.distance_sq(origin) < 9.0);
    }

    #[test]
    fn test_vertical_contact() {
        let contact = straight_contact(Point::new(100.0, 50.0), PI / 2.0, Point::new(100.0, 100.0), 30.0);
        assert_approx_eq!(contact.x, 100.0);
        assert_approx_eq!(contact.y, 70.0);

        let contact = straight_contact(Point::new(100.0, 150.0), -PI / 2.0, Point::new(100.0, 100.0), 30.0);
        assert_approx_eq!(contact.y, 130.0);
    }

    #[test]
    fn test_blocked_twice_is_held() {
        let config = GameConfig::default();
        let arena = arena_with_pillar(Point::new(150.0, 100.0), 40.0);
        let mut tank = moving_tank(Point::new(102.5, 100.0), 0.0, [100.0, 100.0]);
        tank.collided_with = Some(0);
        precalc_next_position(&mut tank, &arena, &config);
        clamp_to_pillars(&mut tank, &arena, config.tank_radius);
        assert_eq!(tank.next_position, tank.position);
        assert_eq!(tank.collided_with, Some(0));
    }

    #[test]
    fn test_clear_path_resets_flag() {
        let config = GameConfig::default();
        let arena = arena_with_pillar(Point::new(150.0, 100.0), 30.0);
        let mut tank = moving_tank(Point::new(100.0, 100.0), PI, [100.0, 100.0]);
        tank.collided_with = Some(0);
        precalc_next_position(&mut tank, &arena, &config);
        clamp_to_pillars(&mut tank, &arena, config.tank_radius);
        assert!(!tank.collided());
        assert_approx_eq!(tank.next_position.x, 93.0);
    }

    #[test]
    fn test_arc_contact_touches_pillar() {
        let config = GameConfig::default();
        let pillar = Point::new(145.0, 110.0);
        let reach = 30.0 + config.tank_radius;
        let arena = arena_with_pillar(pillar, 30.0);
        let mut tank = moving_tank(Point::new(104.0, 100.0), 0.0, [100.0, 90.0]);
        assert!(tank.position.distance_sq(pillar) > reach * reach);
        precalc_next_position(&mut tank, &arena, &config);
        assert!(tank.next_position.distance_sq(pillar) < reach * reach);

        clamp_to_pillars(&mut tank, &arena, config.tank_radius);
        assert!(tank.collided());
        let distance = tank.next_position.distance_sq(pillar).sqrt();
        assert_approx_eq!(distance, reach, 1e-6);
        // Stays on the turning circle, close to where the tank started
        assert!(tank.next_position.distance_sq(tank.position) < config.top_speed.powi(2));
    }

    #[test]
    fn test_arc_contact_without_tangent_faces_pillar() {
        let reach = 30.0 + GameConfig::default().tank_radius;
        let mut tank = moving_tank(Point::new(100.0, 100.0), 0.0, [100.0, 50.0]);
        tank.movement_radius = 20.0;
        // Turning circle centred on (100, 120) stays far short of the pillar
        let center = Point::new(100.0, 220.0);

        let contact = arc_contact(&tank, center, reach);
        assert_approx_eq!(contact.x, 100.0);
        assert_approx_eq!(contact.y, 140.0);
        assert_approx_eq!(contact.distance_sq(Point::new(100.0, 120.0)).sqrt(), 20.0);
    }

    #[test]
    fn test_contact_across_the_edge() {
        let config = GameConfig::default();
        let arena = arena_with_pillar(Point::new(30.0, 200.0), 25.0);
        let mut tank = moving_tank(Point::new(393.0, 200.0), 0.0, [100.0, 100.0]);
        precalc_next_position(&mut tank, &arena, &config);
        assert_approx_eq!(tank.next_position.x, 0.0);

        clamp_to_pillars(&mut tank, &arena, config.tank_radius);
        assert!(tank.collided());
        assert_approx_eq!(tank.next_position.x, 397.5);
        assert_approx_eq!(tank.next_position.y, 200.0);
    }
}
