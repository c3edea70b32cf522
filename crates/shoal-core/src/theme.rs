//! Fish colour themes and facing.

use ratatui::style::Color;

/// Two-colour theme of a fish, alternated by creation index.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum FishTheme {
    #[default]
    Cyan,
    Violet,
}

impl FishTheme {
    /// Theme for the fish created at `index`: even is cyan, odd is violet.
    pub fn for_index(index: usize) -> Self {
        if index % 2 == 0 {
            FishTheme::Cyan
        } else {
            FishTheme::Violet
        }
    }

    /// Body colour.
    pub fn body(self) -> Color {
        match self {
            FishTheme::Cyan => Color::Rgb(0x00, 0xff, 0xff),
            FishTheme::Violet => Color::Rgb(0xc7, 0x7d, 0xff),
        }
    }

    /// Tail colour.
    pub fn tail(self) -> Color {
        match self {
            FishTheme::Cyan => Color::Rgb(0x00, 0x40, 0x4d),
            FishTheme::Violet => Color::Rgb(0x44, 0x22, 0x44),
        }
    }

    /// Eye colour, shared by every theme.
    pub fn eye(self) -> Color {
        Color::Rgb(0xff, 0xff, 0xff)
    }
}

/// Horizontal facing of a fish.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Direction {
    /// Drawn as authored (`+1`).
    #[default]
    Forward,
    /// Flipped horizontally (`-1`).
    Mirrored,
}

impl Direction {
    pub fn sign(self) -> f64 {
        match self {
            Direction::Forward => 1.0,
            Direction::Mirrored => -1.0,
        }
    }

    pub fn is_mirrored(self) -> bool {
        self == Direction::Mirrored
    }
}
