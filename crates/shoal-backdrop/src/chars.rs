//! Character constants for the backdrop.

/// Grain specks, dimmest first.
pub const GRAIN_CHARS: &[char] = &['˙', '·', '•'];

/// Character of an unspeckled water cell.
pub const WATER_CHAR: char = ' ';
