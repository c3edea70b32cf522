//! ASCII art fish for the shoal aquarium.
//!
//! Each sprite is drawn facing left, as authored, with a mask row per art
//! row naming which part every cell belongs to: `B` body, `T` tail, `E`
//! eye. Spaces in the art are transparent.

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::Color,
    widgets::Widget,
};
use shoal_core::{Element, FishTheme, SpriteSize, Stage, Transform};

/// Small one-row fish (7 wide).
pub const SMALL_ART: [&str; 1] = ["<°)))><"];
pub const SMALL_MASK: [&str; 1] = ["BEBBBTT"];

/// Large three-row fish (10 wide).
pub const LARGE_ART: [&str; 3] = [" ,---.  /|", "<°  ))>< |", " `---'  \\|"];
pub const LARGE_MASK: [&str; 3] = [" BBBBB  TT", "BEBBBBTT T", " BBBBB  TT"];

/// Rotation, in degrees, past which the tail is drawn one row off.
const WAG_THRESHOLD_DEG: f64 = 4.0;

/// Which coloured part of the fish a cell belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Part {
    Body,
    Tail,
    Eye,
}

impl Part {
    fn from_mask(m: char) -> Option<Self> {
        match m {
            'B' => Some(Part::Body),
            'T' => Some(Part::Tail),
            'E' => Some(Part::Eye),
            _ => None,
        }
    }

    /// Colour of this part under `theme`.
    pub fn color(self, theme: FishTheme) -> Color {
        match self {
            Part::Body => theme.body(),
            Part::Tail => theme.tail(),
            Part::Eye => theme.eye(),
        }
    }
}

/// One visible character of a placed sprite, in container cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SpriteCell {
    pub col: i32,
    pub row: i32,
    pub ch: char,
    pub part: Part,
}

/// Art and mask rows for a sprite size.
pub fn art(size: SpriteSize) -> (&'static [&'static str], &'static [&'static str]) {
    match size {
        SpriteSize::Small => (&SMALL_ART, &SMALL_MASK),
        SpriteSize::Large => (&LARGE_ART, &LARGE_MASK),
    }
}

/// Swap glyphs that point one way for their mirror image.
fn mirror_char(ch: char) -> char {
    match ch {
        '<' => '>',
        '>' => '<',
        '(' => ')',
        ')' => '(',
        '/' => '\\',
        '\\' => '/',
        '`' => '\'',
        '\'' => '`',
        ',' => '.',
        '.' => ',',
        other => other,
    }
}

/// Cells of the sprite for `transform`, positioned and flipped.
pub fn layout(transform: &Transform) -> Vec<SpriteCell> {
    let size = transform.sprite_size();
    let (rows, masks) = art(size);
    let footprint = transform.footprint();
    let width = footprint.width as i32;
    let mirrored = transform.direction.is_mirrored();
    let wag = if transform.rotation_deg >= WAG_THRESHOLD_DEG {
        -1
    } else if transform.rotation_deg <= -WAG_THRESHOLD_DEG {
        1
    } else {
        0
    };

    let mut cells = Vec::new();
    for (dy, (row, mask)) in rows.iter().zip(masks.iter()).enumerate() {
        for (dx, (ch, m)) in row.chars().zip(mask.chars()).enumerate() {
            if ch == ' ' {
                continue;
            }
            let Some(part) = Part::from_mask(m) else {
                continue;
            };
            let dx = dx as i32;
            let (col_offset, ch) = if mirrored {
                (width - 1 - dx, mirror_char(ch))
            } else {
                (dx, ch)
            };
            let row_offset = dy as i32 + if part == Part::Tail { wag } else { 0 };
            cells.push(SpriteCell {
                col: footprint.left + col_offset,
                row: footprint.top + row_offset,
                ch,
                part,
            });
        }
    }
    cells
}

/// Draw one element into `buf`, clipped to `area`.
pub fn draw_element(element: &Element, area: Rect, buf: &mut Buffer) {
    for cell in layout(&element.transform) {
        if cell.col < 0
            || cell.row < 0
            || cell.col >= area.width as i32
            || cell.row >= area.height as i32
        {
            continue;
        }
        let x = area.x + cell.col as u16;
        let y = area.y + cell.row as u16;
        if let Some(target) = buf.cell_mut((x, y)) {
            target
                .set_char(cell.ch)
                .set_fg(cell.part.color(element.theme));
        }
    }
}

/// Widget painting every stage element in insertion order.
#[derive(Debug, Clone, Copy)]
pub struct StageWidget<'a> {
    stage: &'a Stage,
}

impl<'a> StageWidget<'a> {
    pub fn new(stage: &'a Stage) -> Self {
        Self { stage }
    }
}

impl Widget for StageWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        for element in self.stage.elements() {
            draw_element(element, area, buf);
        }
    }
}
