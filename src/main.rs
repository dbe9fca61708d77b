use clap::Parser;
use log::{LevelFilter, error, info};
use std::error::Error;
use std::fs;
use std::path::{Path, PathBuf};
use std::process;
use tankarena::config::{self, GameConfig};
use tankarena::game::Game;
use tankarena::logging;
use tankarena::presets;
use tankarena::snapshot::TickSnapshot;
use tankarena::tank::{SensorConfig, TankSetup};

// --- Command Line Arguments ---
#[derive(Parser, Debug)]
#[command(author, version, about = "Headless tank arena", long_about = None)]
struct Args {
    /// Tank program files, or tank directories holding `program`, an
    /// optional `name` and optional `sensor0` .. `sensor9` files.
    tanks: Vec<PathBuf>,

    /// Sensor ("range angle width turret") given to every loaded tank
    /// that brings none of its own. Repeat for more sensors.
    #[arg(long = "sensor")]
    sensors: Vec<String>,

    /// Number of Berzerkers to add.
    #[arg(long, default_value_t = 0)]
    berzerkers: usize,

    /// Add the four Tweedledums.
    #[arg(long)]
    tweedledums: bool,

    /// Number of pillars to raise.
    #[arg(long, default_value_t = 0)]
    pillars: usize,

    /// Maximum number of ticks to simulate.
    #[arg(long, default_value_t = config::MAX_TICKS)]
    ticks: u32,

    /// Seed for placement and the `random` word. Random when omitted.
    #[arg(long)]
    seed: Option<u64>,

    /// Rounds of ammunition per tank, negative for unlimited.
    #[arg(long, default_value_t = config::TANK_AMMO, allow_hyphen_values = true)]
    ammo: i32,

    /// Maximum program length in non-whitespace characters, 0 for no limit.
    #[arg(long, default_value_t = config::TANK_MAX_PROGRAM_LENGTH)]
    max_program_length: usize,

    /// Leave `teleport!` and `teleport-ready?` out of the language.
    #[arg(long)]
    no_teleport: bool,

    /// Print every tick's snapshot, one line per tank.
    #[arg(long)]
    frames: bool,

    /// Debug filter to specify log topics (e.g., "vm,drive,weapon")
    /// Available topics: vm, tank, drive, weapon, sensor, collision
    #[arg(long)]
    debug_filter: Option<String>,

    /// Log level (off, error, warn, info, debug, trace)
    #[arg(long, default_value = "info")]
    log_level: String,
}

/// Load one tank from a program file or a tank directory
fn load_tank(path: &Path, shared_sensors: &[SensorConfig]) -> Result<TankSetup, Box<dyn Error>> {
    let label = path.display().to_string();

    if !path.is_dir() {
        let program = fs::read_to_string(path)?;
        let name = path
            .file_stem()
            .map_or(label.clone(), |stem| stem.to_string_lossy().into_owned());
        let mut setup = TankSetup::new(name, program).with_path(label);
        setup.sensors = shared_sensors.to_vec();
        return Ok(setup);
    }

    let program = fs::read_to_string(path.join("program"))?;
    let name = match fs::read_to_string(path.join("name")) {
        Ok(name) => name.trim().to_string(),
        Err(_) => label.clone(),
    };

    let mut setup = TankSetup::new(name, program).with_path(label);
    for index in 0..config::TANK_MAX_SENSORS {
        let file = path.join(format!("sensor{}", index));
        if !file.exists() {
            continue;
        }
        // Slots keep their numbers: missing files become empty sensors
        while setup.sensors.len() < index {
            setup.sensors.push(SensorConfig::default());
        }
        setup.sensors.push(fs::read_to_string(file)?.parse()?);
    }
    if setup.sensors.is_empty() {
        setup.sensors = shared_sensors.to_vec();
    }
    Ok(setup)
}

fn print_frame(frame: &TickSnapshot) {
    for tank in &frame.tanks {
        println!(
            "{}\t{}\t{}\t{}\t{}\t{}\t{}\t{:#x}",
            frame.tick, tank.id, tank.x, tank.y, tank.angle, tank.turret, tank.flags, tank.sensors
        );
    }
}

fn run(args: Args) -> Result<(), Box<dyn Error>> {
    let shared_sensors = args
        .sensors
        .iter()
        .map(|sensor| sensor.parse::<SensorConfig>())
        .collect::<Result<Vec<_>, _>>()?;

    let mut setups = Vec::new();
    for path in &args.tanks {
        info!("Loading tank from {}", path.display());
        setups.push(load_tank(path, &shared_sensors)?);
    }
    for _ in 0..args.berzerkers {
        setups.push(presets::berzerker());
    }
    if args.tweedledums {
        setups.extend(presets::tweedledums());
    }

    let config = GameConfig {
        ammo: args.ammo,
        max_program_length: args.max_program_length,
        teleport_enabled: !args.no_teleport,
        max_ticks: args.ticks,
        ..GameConfig::default()
    };
    let seed = args.seed.unwrap_or_else(rand::random);
    info!("Seed {}", seed);

    let mut game = Game::new(setups, args.pillars, config, seed)?;
    let frames = game.run();
    if args.frames {
        frames.iter().for_each(print_frame);
    }

    for standing in game.standings() {
        println!("{}", standing);
    }
    Ok(())
}

fn main() {
    // Parse command line arguments
    let args = Args::parse();

    // Initialize the logger
    let log_level = match args.log_level.to_lowercase().as_str() {
        "off" => LevelFilter::Off,
        "error" => LevelFilter::Error,
        "warn" => LevelFilter::Warn,
        "info" => LevelFilter::Info,
        "debug" => LevelFilter::Debug,
        "trace" => LevelFilter::Trace,
        _ => LevelFilter::Info,
    };

    // Setup logger with debug filters if provided
    if let Err(e) = logging::init_logger(log_level, args.debug_filter.clone()) {
        eprintln!("Warning: Failed to initialize logger: {}", e);
    }

    if let Err(e) = run(args) {
        error!("{}", e);
        process::exit(1);
    }
}
