pub mod arena;
pub mod collision;
pub mod combat;
pub mod config;
pub mod error;
pub mod game;
pub mod logging;
pub mod movement;
pub mod presets;
pub mod sensor;
pub mod snapshot;
pub mod tank;
pub mod types;
pub mod utils;
pub mod vm;
