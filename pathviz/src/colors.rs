//! Colour palette for cell states and status messages.

use pathviz_core::{CellState, Color};

pub const WHITE: Color = Color::from_rgb(255, 255, 255);
pub const RED: Color = Color::from_rgb(255, 0, 0);
pub const GREEN: Color = Color::from_rgb(0, 255, 0);
// Color(0) is the terminal default, so black is nudged off zero.
pub const BLACK: Color = Color::from_rgb(0, 0, 1);
pub const ORANGE: Color = Color::from_rgb(255, 165, 0);
pub const TURQUOISE: Color = Color::from_rgb(64, 224, 208);
pub const PURPLE: Color = Color::from_rgb(128, 0, 128);

// -- Status line --

pub const STATUS_FG: Color = Color::DEFAULT;
pub const STATUS_GOOD: Color = Color::from_rgb(80, 200, 80);
pub const STATUS_WARN: Color = Color::from_rgb(220, 140, 50);
pub const STATUS_ERROR: Color = Color::from_rgb(255, 85, 85);

/// Fill colour of a cell.
pub fn cell_color(state: CellState) -> Color {
    match state {
        CellState::Empty => WHITE,
        CellState::Barrier => BLACK,
        CellState::Start => ORANGE,
        CellState::End => TURQUOISE,
        CellState::Open => GREEN,
        CellState::Closed => RED,
        CellState::Path => PURPLE,
    }
}
