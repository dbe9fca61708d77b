use crate::arena::Arena;
use crate::collision::clamp_to_pillars;
use crate::combat::{resolve_combat, teleport_tanks};
use crate::config::GameConfig;
use crate::error::SetupError;
use crate::movement::precalc_next_position;
use crate::sensor::update_sensors;
use crate::snapshot::{PillarFrame, Standing, TankFrame, TickSnapshot};
use crate::tank::{Tank, TankSetup};
use crate::types::{GameRng, TankId};
use crate::vm::InstructionExecutor;
use log::info;
use rand::{Rng, SeedableRng};
use std::f64::consts::TAU;

/// The Game struct owns everything in a match and advances it one tick at a time
pub struct Game {
    pub arena: Arena,
    pub tanks: Vec<Tank>,
    pub config: GameConfig,
    pub tick: u32,
    executor: InstructionExecutor,
    rng: GameRng,
}

impl Game {
    /// Set up a match: size the arena for the tanks and `pillar_count`
    /// pillars, place everything at random and point each tank and turret
    /// in a random direction. The same seed always gives the same match.
    pub fn new(
        setups: Vec<TankSetup>,
        pillar_count: usize,
        config: GameConfig,
        seed: u64,
    ) -> Result<Self, SetupError> {
        config.validate()?;
        if setups.is_empty() {
            return Err(SetupError::NoTanks);
        }

        let mut tanks = setups
            .into_iter()
            .enumerate()
            .map(|(index, setup)| Tank::new(TankId(index), setup, &config))
            .collect::<Result<Vec<_>, _>>()?;

        let mut rng = GameRng::seed_from_u64(seed);
        let mut arena = Arena::sized_for(tanks.len() + pillar_count, config.grid_spacing);
        let positions = arena.populate(pillar_count, tanks.len(), &config, &mut rng)?;

        for (tank, position) in tanks.iter_mut().zip(positions) {
            let angle = rng.r#gen::<f64>() * TAU;
            let turret = rng.r#gen::<f64>() * TAU;
            tank.place(position, angle, turret);
            info!(
                "Loaded Tank {} '{}' from {} at ({}, {})",
                tank.id, tank.name, tank.path, position.x, position.y
            );
        }

        Ok(Self::assemble(arena, tanks, config, rng))
    }

    /// A match on a hand-built arena with tanks already placed
    pub fn with_layout(
        arena: Arena,
        tanks: Vec<Tank>,
        config: GameConfig,
        seed: u64,
    ) -> Result<Self, SetupError> {
        config.validate()?;
        if tanks.is_empty() {
            return Err(SetupError::NoTanks);
        }
        Ok(Self::assemble(arena, tanks, config, GameRng::seed_from_u64(seed)))
    }

    fn assemble(arena: Arena, mut tanks: Vec<Tank>, config: GameConfig, rng: GameRng) -> Self {
        // Tick 1 starts by committing a next position, so have one ready
        for tank in tanks.iter_mut() {
            precalc_next_position(tank, &arena, &config);
            clamp_to_pillars(tank, &arena, config.tank_radius);
        }

        info!(
            "Match ready: {} tanks, {} pillars on a {}x{} arena, up to {} ticks",
            tanks.len(),
            arena.pillars.len(),
            arena.width,
            arena.height,
            config.max_ticks
        );

        Game {
            arena,
            tanks,
            executor: InstructionExecutor::for_tanks(&config),
            config,
            tick: 0,
            rng,
        }
    }

    /// Advance the match by one tick and return what it looks like afterwards
    pub fn tick(&mut self) -> TickSnapshot {
        self.tick += 1;

        // Phase 1: recharge and clear sensors
        for tank in self.tanks.iter_mut() {
            tank.recharge(&self.config);
        }

        // Phase 2: commit last tick's moves
        for tank in self.tanks.iter_mut().filter(|tank| !tank.is_crater()) {
            tank.position = tank.next_position;
        }

        // Phase 3: sensors
        update_sensors(&mut self.tanks, &self.arena, &self.config);

        // Phase 4: programs
        for tank in self.tanks.iter_mut().filter(|tank| !tank.is_crater()) {
            tank.run_program(&self.executor, &mut self.rng, self.tick);
        }

        // Phase 5: teleports, then rams and shots
        teleport_tanks(&mut self.tanks, &self.arena, &mut self.rng, self.tick);
        resolve_combat(&mut self.tanks, &self.arena, &self.config, self.tick);

        // Phase 6: plan next tick's moves
        for tank in self.tanks.iter_mut().filter(|tank| !tank.is_crater()) {
            precalc_next_position(tank, &self.arena, &self.config);
            clamp_to_pillars(tank, &self.arena, self.config.tank_radius);
        }

        self.snapshot()
    }

    pub fn snapshot(&self) -> TickSnapshot {
        TickSnapshot {
            tick: self.tick,
            tanks: self.tanks.iter().map(TankFrame::capture).collect(),
            pillars: self.arena.pillars.iter().map(PillarFrame::from).collect(),
        }
    }

    /// Tanks that are not craters
    pub fn active_tanks(&self) -> usize {
        self.tanks.iter().filter(|tank| !tank.is_crater()).count()
    }

    pub fn is_over(&self) -> bool {
        self.active_tanks() < 2 || self.tick >= self.config.max_ticks
    }

    /// Play until one tank (or none) is left or the tick limit is reached.
    /// At least one tick is always played.
    pub fn run(&mut self) -> Vec<TickSnapshot> {
        let mut frames = Vec::new();
        loop {
            frames.push(self.tick());
            if self.is_over() {
                break;
            }
        }
        info!(
            "Match over after {} ticks, {} tanks standing",
            self.tick,
            self.active_tanks()
        );
        frames
    }

    pub fn standings(&self) -> Vec<Standing> {
        self.tanks.iter().map(Standing::from_tank).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::presets;
    use crate::snapshot::{FLAG_CRATER, FLAG_FIRING, FLAG_LED};
    use crate::tank::SensorConfig;
    use crate::types::{CauseOfDeath, Point};
    use crate::vm::VMFault;
    use std::f64::consts::PI;

    fn placed(id: usize, setup: TankSetup, position: Point, angle: f64) -> Tank {
        let mut tank = Tank::new(TankId(id), setup, &GameConfig::default()).unwrap();
        tank.place(position, angle, 0.0);
        tank
    }

    fn duel(first: &str, second: &str) -> Game {
        let tanks = vec![
            placed(0, TankSetup::new("a", first), Point::new(100.0, 100.0), 0.0),
            placed(1, TankSetup::new("b", second), Point::new(130.0, 100.0), 0.0),
        ];
        Game::with_layout(Arena::new(400.0, 400.0), tanks, GameConfig::default(), 1).unwrap()
    }

    #[test]
    fn test_needs_a_tank() {
        let result = Game::new(Vec::new(), 2, GameConfig::default(), 1);
        assert!(matches!(result, Err(SetupError::NoTanks)));
    }

    #[test]
    fn test_rejects_bad_config() {
        let config = GameConfig {
            tank_radius: 0.0,
            ..GameConfig::default()
        };
        let result = Game::new(vec![presets::berzerker()], 0, config, 1);
        assert!(matches!(result, Err(SetupError::InvalidConfig(_))));
    }

    #[test]
    fn test_setup_places_everything() {
        let game = Game::new(presets::tweedledums(), 1, GameConfig::default(), 5).unwrap();
        assert_eq!((game.arena.width, game.arena.height), (480.0, 320.0));
        assert_eq!(game.arena.pillars.len(), 1);
        assert_eq!(game.tanks.len(), 4);
        assert_eq!(game.tick, 0);
        assert_eq!(game.active_tanks(), 4);
    }

    #[test]
    fn test_full_grid_of_tanks_sets_up() {
        for count in [9, 16] {
            for seed in 0..10 {
                let setups = (0..count).map(|_| presets::berzerker()).collect();
                let game = Game::new(setups, 0, GameConfig::default(), seed).unwrap();
                assert_eq!(game.active_tanks(), count, "seed {}", seed);
            }
        }
    }

    #[test]
    fn test_same_seed_same_match() {
        let config = GameConfig {
            max_ticks: 60,
            ..GameConfig::default()
        };
        let setups = || vec![presets::berzerker(), presets::berzerker(), presets::berzerker()];
        let mut first = Game::new(setups(), 1, config.clone(), 99).unwrap();
        let mut second = Game::new(setups(), 1, config, 99).unwrap();
        assert_eq!(first.run(), second.run());
    }

    #[test]
    fn test_shot_ends_match() {
        let mut game = duel("fire!", "");
        let frames = game.run();
        assert_eq!(frames.len(), 1);
        assert_eq!(game.tanks[1].killer, Some(TankId(0)));
        assert_eq!(game.tanks[1].cause_of_death, Some(CauseOfDeath::Shot));
        assert!(frames[0].tanks[1].has(FLAG_CRATER));
        assert!(game.is_over());
    }

    #[test]
    fn test_cannon_recharges() {
        // Facing away from each other: shots go nowhere
        let tanks = vec![
            placed(0, TankSetup::new("a", "fire!"), Point::new(100.0, 100.0), 0.0),
            placed(1, TankSetup::new("b", ""), Point::new(300.0, 300.0), 0.0),
        ];
        let mut game = Game::with_layout(Arena::new(400.0, 400.0), tanks, GameConfig::default(), 1).unwrap();

        assert!(game.tick().tanks[0].has(FLAG_FIRING));
        assert_eq!(game.tanks[0].turret.recharge, 0);
        // The next tick starts the recharge and counts it down once
        assert!(!game.tick().tanks[0].has(FLAG_FIRING));
        assert_eq!(game.tanks[0].turret.recharge, game.config.cannon_recharge - 1);
    }

    #[test]
    fn test_ram_kills_both() {
        let tanks = vec![
            placed(0, TankSetup::new("a", "100 100 set-speed!"), Point::new(100.0, 100.0), 0.0),
            placed(1, TankSetup::new("b", "100 100 set-speed!"), Point::new(140.0, 100.0), PI),
        ];
        let mut game = Game::with_layout(Arena::new(400.0, 400.0), tanks, GameConfig::default(), 1).unwrap();
        game.run();
        assert_eq!(game.tanks[0].killer, Some(TankId(1)));
        assert_eq!(game.tanks[1].killer, Some(TankId(0)));
        assert_eq!(game.tanks[0].cause_of_death, Some(CauseOfDeath::Collision));
        assert_eq!(game.active_tanks(), 0);
    }

    #[test]
    fn test_program_error_is_recorded_not_fatal() {
        let mut game = duel("50 50 set-speed! 1 0 /", "");
        game.tick();
        let error = game.tanks[0].error.as_ref().unwrap();
        assert_eq!(error.fault(), Some(&VMFault::DivisionByZero));
        assert!(!game.tanks[0].is_crater());
        // Intents set before the failure stand
        assert_eq!(game.tanks[0].speed.desired, [50.0, 50.0]);
        assert!(!game.is_over());
    }

    #[test]
    fn test_sensors_are_fresh_for_programs() {
        let setup = TankSetup::new("watcher", "0 sensor? set-led!")
            .with_sensor(SensorConfig::new(50.0, 0.0, 30.0, false));
        let tanks = vec![
            placed(0, setup, Point::new(100.0, 100.0), 0.0),
            placed(1, TankSetup::new("b", ""), Point::new(130.0, 100.0), 0.0),
        ];
        let mut game = Game::with_layout(Arena::new(400.0, 400.0), tanks, GameConfig::default(), 1).unwrap();
        let frame = game.tick();
        assert!(frame.tanks[0].has(FLAG_LED));
        assert_eq!(frame.tanks[0].sensors, 1);
    }

    #[test]
    fn test_tick_limit() {
        let config = GameConfig {
            max_ticks: 5,
            ..GameConfig::default()
        };
        let tanks = vec![
            placed(0, TankSetup::new("a", ""), Point::new(50.0, 50.0), 0.0),
            placed(1, TankSetup::new("b", ""), Point::new(250.0, 250.0), 0.0),
        ];
        let mut game = Game::with_layout(Arena::new(400.0, 400.0), tanks, config, 1).unwrap();
        let frames = game.run();
        assert_eq!(frames.len(), 5);
        assert_eq!(frames.last().map(|frame| frame.tick), Some(5));
    }

    #[test]
    fn test_craters_stay_put() {
        let mut game = duel("", "");
        game.tanks[0].kill(TankId(1), CauseOfDeath::Shot);
        game.tanks[0].set_speed(100.0, 100.0);
        game.tanks[0].next_position = Point::new(200.0, 200.0);
        game.tick();
        assert_eq!(game.tanks[0].position, Point::new(100.0, 100.0));
    }

    #[test]
    fn test_standings_report_everyone() {
        let mut game = duel("fire!", "nonsense");
        game.run();
        let standings: Vec<String> = game.standings().iter().map(ToString::to_string).collect();
        assert_eq!(standings[0], "0\ta\t(null)\t(nil)\t0\tNone");
        assert_eq!(
            standings[1],
            "1\tb\tshot\t0\t0\tNo such function 'nonsense' (instruction 0)"
        );
    }
}
