use std::str::FromStr;

use thiserror::Error;

use crate::grid::Grid;
use crate::grid::GridError;
use crate::presenter::Presenter;
use crate::presenter::PresenterError;

/// Rows of the board
pub const ROWS: usize = 100;

/// Columns of the board
pub const COLUMNS: usize = 100;

/// Chance of each cell starting out alive
pub const ALIVE_PROBABILITY: f64 = 0.15;

/// Ticks per second
pub const FPS: u32 = 2;

pub const ROWS_VAR: &str = "LIFE_ROWS";
pub const COLUMNS_VAR: &str = "LIFE_COLUMNS";
pub const PROBABILITY_VAR: &str = "LIFE_PROBABILITY";
pub const FPS_VAR: &str = "LIFE_FPS";
pub const SEED_VAR: &str = "LIFE_SEED";

#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error(transparent)]
    Grid(#[from] GridError),

    #[error(transparent)]
    Presenter(#[from] PresenterError),

    #[error("Invalid value \"{value}\" for {key}")]
    InvalidValue { key: &'static str, value: String },
}

/// Everything fixed once at startup
#[derive(Clone, Debug, PartialEq)]
pub struct Config {
    pub rows: usize,
    pub columns: usize,
    pub alive_probability: f64,
    pub fps: u32,

    /// Seed of the initial grid. Picked at startup when missing.
    pub seed: Option<u64>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            rows: ROWS,
            columns: COLUMNS,
            alive_probability: ALIVE_PROBABILITY,
            fps: FPS,
            seed: None,
        }
    }
}

impl Config {
    /// Defaults, overridden by the `LIFE_*` environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Defaults, overridden by whatever `lookup` finds for each `LIFE_*` key
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&'static str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(rows) = parse(&lookup, ROWS_VAR)? {
            config.rows = rows;
        }

        if let Some(columns) = parse(&lookup, COLUMNS_VAR)? {
            config.columns = columns;
        }

        if let Some(p) = parse(&lookup, PROBABILITY_VAR)? {
            config.alive_probability = p;
        }

        if let Some(fps) = parse(&lookup, FPS_VAR)? {
            config.fps = fps;
        }

        config.seed = parse(&lookup, SEED_VAR)?;

        config.validate()?;

        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        Grid::validate(self.rows, self.columns, self.alive_probability)?;

        Presenter::new(self.fps)?;

        Ok(())
    }
}

fn parse<F, T>(lookup: &F, key: &'static str) -> Result<Option<T>, ConfigError>
where
    F: Fn(&'static str) -> Option<String>,
    T: FromStr,
{
    let Some(value) = lookup(key) else {
        return Ok(None);
    };

    match value.trim().parse() {
        Ok(v) => Ok(Some(v)),
        Err(_) => Err(ConfigError::InvalidValue { key, value }),
    }
}
