//! Start-up configuration.

use std::fmt;
use std::time::Duration;

use pathviz_core::{DEFAULT_PIXEL_WIDTH, DEFAULT_ROWS, Grid, GridError};

pub const ENV_ROWS: &str = "PATHVIZ_ROWS";
pub const ENV_WIDTH: &str = "PATHVIZ_WIDTH";
pub const ENV_DELAY_MS: &str = "PATHVIZ_DELAY_MS";
pub const ENV_SEED: &str = "PATHVIZ_SEED";

/// Visualizer settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Config {
    /// Cells per side.
    pub rows: i32,
    /// Side length of the square drawing surface in pixels.
    pub pixel_width: i32,
    /// Pause after every search frame.
    pub delay_ms: u64,
    /// Maze seed; `None` picks one at random.
    pub seed: Option<u64>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            rows: DEFAULT_ROWS,
            pixel_width: DEFAULT_PIXEL_WIDTH,
            delay_ms: 0,
            seed: None,
        }
    }
}

/// A configuration value that could not be used.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// An environment variable did not parse.
    Invalid { var: &'static str, value: String },
    /// The grid dimensions are unusable.
    Grid(GridError),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Invalid { var, value } => write!(f, "config: invalid {var}={value:?}"),
            Self::Grid(e) => write!(f, "config: {e}"),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Grid(e) => Some(e),
            Self::Invalid { .. } => None,
        }
    }
}

impl From<GridError> for ConfigError {
    fn from(e: GridError) -> Self {
        Self::Grid(e)
    }
}

fn parse_var<T: std::str::FromStr>(
    var: &'static str,
    lookup: &impl Fn(&str) -> Option<String>,
) -> Result<Option<T>, ConfigError> {
    match lookup(var) {
        None => Ok(None),
        Some(value) => match value.trim().parse() {
            Ok(v) => Ok(Some(v)),
            Err(_) => Err(ConfigError::Invalid { var, value }),
        },
    }
}

impl Config {
    /// Read overrides from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Read overrides through `lookup`, starting from the defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let mut cfg = Self::default();
        if let Some(rows) = parse_var(ENV_ROWS, &lookup)? {
            cfg.rows = rows;
        }
        if let Some(width) = parse_var(ENV_WIDTH, &lookup)? {
            cfg.pixel_width = width;
        }
        if let Some(delay) = parse_var(ENV_DELAY_MS, &lookup)? {
            cfg.delay_ms = delay;
        }
        cfg.seed = parse_var(ENV_SEED, &lookup)?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Check that a grid can be built with these dimensions.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.rows <= 0 || self.pixel_width < self.rows {
            return Err(GridError::InvalidSize {
                rows: self.rows,
                pixel_width: self.pixel_width,
            }
            .into());
        }
        Ok(())
    }

    /// A fresh, empty grid.
    pub fn grid(&self) -> Result<Grid, ConfigError> {
        Ok(Grid::new(self.rows, self.pixel_width)?)
    }

    #[inline]
    pub fn frame_delay(&self) -> Duration {
        Duration::from_millis(self.delay_ms)
    }
}


#[cfg(all(test, feature = "serde"))]
mod serde_tests {
    use super::*;

    #[test]
    fn config_round_trips_through_json() {
        let cfg = Config {
            seed: Some(7),
            ..Config::default()
        };
        let json = serde_json::to_string(&cfg).unwrap();
        let back: Config = serde_json::from_str(&json).unwrap();
        assert_eq!(back, cfg);
    }
}
