//! pathviz: an interactive A* pathfinding visualizer for the terminal.
//!
//! The binary wires these pieces to a [`TerminalDriver`](pathviz_crossterm::TerminalDriver);
//! everything here is terminal-independent and tested on its own.

pub mod colors;
pub mod config;
pub mod model;
pub mod status;

pub use config::{Config, ConfigError};
pub use model::{Command, Model};
pub use status::{LogStyle, StatusLog};
