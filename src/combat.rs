// Tank-on-tank resolution: hull collisions, cannon hits and teleports

use crate::arena::Arena;
use crate::config::GameConfig;
use crate::tank::{Tank, pair_mut};
use crate::types::{CauseOfDeath, GameRng, Point};
use crate::utils::rotate_point;
use log::info;

/// What came of one tank acting on another
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Engagement {
    None,
    Collision,
    Shot,
}

/// Resolve `shooter` against `target`, `offset` being the shortest vector
/// from the shooter to the target.
///
/// Hulls that overlap destroy each other. Otherwise a firing shooter kills a
/// target that is within cannon range and whose center lies within a hull
/// radius of the line of fire.
pub fn engage(
    shooter: &mut Tank,
    target: &mut Tank,
    offset: Point,
    dist2: f64,
    config: &GameConfig,
) -> Engagement {
    if shooter.is_crater() || target.is_crater() {
        return Engagement::None;
    }

    if dist2 <= config.collision_adj2() {
        shooter.kill(target.id, CauseOfDeath::Collision);
        target.kill(shooter.id, CauseOfDeath::Collision);
        return Engagement::Collision;
    }

    if !shooter.turret.firing || dist2 > config.cannon_adj2() {
        return Engagement::None;
    }

    let line_of_fire = rotate_point(-(shooter.angle + shooter.turret.current), offset);
    if line_of_fire.x > 0.0 && line_of_fire.y.abs() < config.tank_radius {
        target.kill(shooter.id, CauseOfDeath::Shot);
        return Engagement::Shot;
    }

    crate::debug_weapon!(
        "Tank {} misses Tank {} by {:.2}",
        shooter.id,
        target.id,
        line_of_fire.y.abs()
    );
    Engagement::None
}

/// Move every live tank that asked to teleport to a random spot.
/// The destination is not checked against pillars or other tanks.
pub fn teleport_tanks(tanks: &mut [Tank], arena: &Arena, rng: &mut GameRng, tick: u32) {
    for tank in tanks.iter_mut() {
        if tank.is_crater() || !tank.teleport.teleporting {
            continue;
        }
        tank.position = arena.random_point(rng);
        crate::debug_tank!(
            tank.id,
            tick,
            "teleported to ({}, {})",
            tank.position.x,
            tank.position.y
        );
    }
}

/// Run every pair of tanks through `engage`, lower index acting first.
/// A tank killed by an earlier pair takes no further part this tick.
pub fn resolve_combat(tanks: &mut [Tank], arena: &Arena, config: &GameConfig, tick: u32) {
    for i in 0..tanks.len() {
        for j in i + 1..tanks.len() {
            let (this, that) = pair_mut(tanks, i, j);
            let (offset, dist2) = arena.displacement(this.position, that.position);

            match engage(this, that, offset, dist2, config) {
                Engagement::Collision => {
                    info!("Tank {} Tick {}: collided with Tank {}", this.id, tick, that.id);
                }
                Engagement::Shot => {
                    info!("Tank {} Tick {}: shot by Tank {}", that.id, tick, this.id);
                }
                Engagement::None => {
                    if engage(that, this, -offset, dist2, config) == Engagement::Shot {
                        info!("Tank {} Tick {}: shot by Tank {}", this.id, tick, that.id);
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tank::TankSetup;
    use crate::types::TankId;
    use rand::SeedableRng;
    use std::f64::consts::PI;

    fn tank_at(id: usize, position: Point, angle: f64) -> Tank {
        let config = GameConfig::default();
        let mut tank = Tank::new(TankId(id), TankSetup::new(format!("t{}", id), ""), &config).unwrap();
        tank.place(position, angle, 0.0);
        tank
    }

    #[test]
    fn test_collision_kills_both() {
        let config = GameConfig::default();
        let arena = Arena::new(400.0, 400.0);
        let mut tanks = vec![
            tank_at(0, Point::new(100.0, 100.0), 0.0),
            tank_at(1, Point::new(110.0, 105.0), 0.0),
        ];
        resolve_combat(&mut tanks, &arena, &config, 1);

        assert_eq!(tanks[0].killer, Some(TankId(1)));
        assert_eq!(tanks[1].killer, Some(TankId(0)));
        assert_eq!(tanks[0].cause_of_death, Some(CauseOfDeath::Collision));
        assert_eq!(tanks[1].cause_of_death, Some(CauseOfDeath::Collision));
    }

    #[test]
    fn test_collision_at_exact_hull_distance() {
        let config = GameConfig::default();
        let mut a = tank_at(0, Point::new(100.0, 100.0), 0.0);
        let mut b = tank_at(1, Point::new(115.0, 100.0), 0.0);
        let outcome = engage(&mut a, &mut b, Point::new(15.0, 0.0), 225.0, &config);
        assert_eq!(outcome, Engagement::Collision);
    }

    #[test]
    fn test_shot_straight_ahead() {
        let config = GameConfig::default();
        let mut shooter = tank_at(0, Point::new(100.0, 100.0), PI / 2.0);
        let mut target = tank_at(1, Point::new(103.0, 140.0), 0.0);
        shooter.turret.firing = true;

        let offset = Point::new(3.0, 40.0);
        let outcome = engage(&mut shooter, &mut target, offset, offset.length_sq(), &config);
        assert_eq!(outcome, Engagement::Shot);
        assert_eq!(target.killer, Some(TankId(0)));
        assert_eq!(target.cause_of_death, Some(CauseOfDeath::Shot));
        assert!(!shooter.is_crater());
    }

    #[test]
    fn test_shot_follows_turret() {
        let config = GameConfig::default();
        let mut shooter = tank_at(0, Point::new(100.0, 100.0), 0.0);
        shooter.turret.current = PI;
        shooter.turret.firing = true;

        let mut ahead = tank_at(1, Point::new(140.0, 100.0), 0.0);
        let offset = Point::new(40.0, 0.0);
        assert_eq!(
            engage(&mut shooter, &mut ahead, offset, offset.length_sq(), &config),
            Engagement::None
        );

        let mut behind = tank_at(2, Point::new(60.0, 100.0), 0.0);
        assert_eq!(
            engage(&mut shooter, &mut behind, -offset, offset.length_sq(), &config),
            Engagement::Shot
        );
    }

    #[test]
    fn test_no_shot_behind_or_out_of_range() {
        let config = GameConfig::default();
        let mut shooter = tank_at(0, Point::new(100.0, 100.0), 0.0);
        shooter.turret.firing = true;

        let mut behind = tank_at(1, Point::new(70.0, 100.0), 0.0);
        let offset = Point::new(-30.0, 0.0);
        assert_eq!(
            engage(&mut shooter, &mut behind, offset, offset.length_sq(), &config),
            Engagement::None
        );

        let mut far = tank_at(2, Point::new(160.0, 100.0), 0.0);
        let offset = Point::new(60.0, 0.0);
        assert_eq!(
            engage(&mut shooter, &mut far, offset, offset.length_sq(), &config),
            Engagement::None
        );
    }

    #[test]
    fn test_not_firing_does_nothing() {
        let config = GameConfig::default();
        let mut shooter = tank_at(0, Point::new(100.0, 100.0), 0.0);
        let mut target = tank_at(1, Point::new(130.0, 100.0), 0.0);
        let offset = Point::new(30.0, 0.0);
        assert_eq!(
            engage(&mut shooter, &mut target, offset, offset.length_sq(), &config),
            Engagement::None
        );
        assert!(!target.is_crater());
    }

    #[test]
    fn test_craters_are_skipped() {
        let config = GameConfig::default();
        let mut shooter = tank_at(0, Point::new(100.0, 100.0), 0.0);
        let mut target = tank_at(1, Point::new(105.0, 100.0), 0.0);
        target.kill(TankId(7), CauseOfDeath::Shot);

        let offset = Point::new(5.0, 0.0);
        assert_eq!(
            engage(&mut shooter, &mut target, offset, offset.length_sq(), &config),
            Engagement::None
        );
        assert!(!shooter.is_crater());
        assert_eq!(target.killer, Some(TankId(7)));
    }

    #[test]
    fn test_first_shot_wins() {
        let config = GameConfig::default();
        let arena = Arena::new(400.0, 400.0);
        let mut tanks = vec![
            tank_at(0, Point::new(100.0, 100.0), 0.0),
            tank_at(1, Point::new(130.0, 100.0), PI),
        ];
        tanks[0].turret.firing = true;
        tanks[1].turret.firing = true;
        resolve_combat(&mut tanks, &arena, &config, 1);

        assert!(!tanks[0].is_crater());
        assert_eq!(tanks[1].killer, Some(TankId(0)));
    }

    #[test]
    fn test_shot_across_the_edge() {
        let config = GameConfig::default();
        let arena = Arena::new(400.0, 400.0);
        let mut tanks = vec![
            tank_at(0, Point::new(20.0, 200.0), 0.0),
            tank_at(1, Point::new(380.0, 200.0), 0.0),
        ];
        tanks[1].turret.firing = true;
        resolve_combat(&mut tanks, &arena, &config, 1);
        assert_eq!(tanks[0].killer, Some(TankId(1)));
    }

    #[test]
    fn test_teleport_moves_only_live_requests() {
        let arena = Arena::new(400.0, 400.0);
        let mut rng = GameRng::seed_from_u64(11);
        let mut tanks = vec![
            tank_at(0, Point::new(100.5, 100.5), 0.0),
            tank_at(1, Point::new(200.5, 200.5), 0.0),
            tank_at(2, Point::new(300.5, 300.5), 0.0),
        ];
        tanks[0].teleport.teleporting = true;
        tanks[2].teleport.teleporting = true;
        tanks[2].kill(TankId(1), CauseOfDeath::Shot);

        teleport_tanks(&mut tanks, &arena, &mut rng, 1);
        // Destinations are whole units, so a half-unit start cannot survive
        assert_eq!(tanks[0].position.x.fract(), 0.0);
        assert_eq!(tanks[1].position, Point::new(200.5, 200.5));
        assert_eq!(tanks[2].position, Point::new(300.5, 300.5));
    }
}
