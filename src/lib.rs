pub mod camera;
pub mod config;
pub mod events;
pub mod grid;
pub mod io;
pub mod presenter;
pub mod rule_set;
