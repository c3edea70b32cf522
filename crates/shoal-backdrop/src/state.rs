//! Backdrop surface state.

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Paragraph, Widget},
};
use shoal_core::{RandomSource, Size, Surface};
use tracing::debug;

use crate::chars::{GRAIN_CHARS, WATER_CHAR};
use crate::color::{mix, rgb};
use crate::glow::radial_glow;

/// Deep-water colour the glow is composited over.
const BASE_WATER: (u8, u8, u8) = (2, 10, 22);
/// Grain speck count on large surfaces.
const MAX_GRAIN: usize = 200;
/// Small surfaces get at most one speck per this many cells.
const CELLS_PER_GRAIN: usize = 24;
/// Brightness range of a speck above the water under it.
const GRAIN_BRIGHTNESS: (f64, f64) = (0.15, 0.5);
const GRAIN_WHITE: (u8, u8, u8) = (255, 255, 255);

/// One painted cell.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BackdropCell {
    pub ch: char,
    pub fg: Color,
    pub bg: Color,
}

/// Glow-and-grain surface layered behind the fish.
#[derive(Debug)]
pub struct Backdrop {
    /// Row-major painted cells; empty until painted.
    cells: Vec<BackdropCell>,
    /// Last known surface width.
    width: u16,
    /// Last known surface height.
    height: u16,
    /// Number of paints so far.
    paints: u64,
    /// A disabled backdrop keeps tracking size but never paints.
    enabled: bool,
}

impl Default for Backdrop {
    fn default() -> Self {
        Self::new()
    }
}

impl Backdrop {
    pub fn new() -> Self {
        Self {
            cells: Vec::new(),
            width: 0,
            height: 0,
            paints: 0,
            enabled: true,
        }
    }

    /// A backdrop that never paints anything.
    pub fn disabled() -> Self {
        Self {
            enabled: false,
            ..Self::new()
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// How many times the surface has been painted.
    pub fn paints(&self) -> u64 {
        self.paints
    }

    /// Painted cell at `(x, y)`, if any.
    pub fn cell(&self, x: u16, y: u16) -> Option<&BackdropCell> {
        if x >= self.width || y >= self.height {
            return None;
        }
        self.cells
            .get(y as usize * self.width as usize + x as usize)
    }

    /// Number of grain specks a surface of this size receives.
    pub fn grain_count(width: u16, height: u16) -> usize {
        let cells = width as usize * height as usize;
        (cells / CELLS_PER_GRAIN).min(MAX_GRAIN)
    }

    fn paint_glow(&mut self) {
        let (width, height) = (self.width, self.height);
        self.cells = (0..height)
            .flat_map(|y| (0..width).map(move |x| (x, y)))
            .map(|(x, y)| BackdropCell {
                ch: WATER_CHAR,
                fg: Color::Reset,
                bg: radial_glow(x, y, width, height).over(BASE_WATER),
            })
            .collect();
    }

    fn paint_grain(&mut self, rng: &mut dyn RandomSource) {
        let (width, height) = (self.width as usize, self.height as usize);
        for _ in 0..Self::grain_count(self.width, self.height) {
            let x = ((rng.next_f64() * width as f64) as usize).min(width - 1);
            let y = ((rng.next_f64() * height as f64) as usize).min(height - 1);
            let brightness = rng.range(GRAIN_BRIGHTNESS.0, GRAIN_BRIGHTNESS.1);

            let cell = &mut self.cells[y * width + x];
            let tier = ((brightness - GRAIN_BRIGHTNESS.0) / (GRAIN_BRIGHTNESS.1 - GRAIN_BRIGHTNESS.0)
                * GRAIN_CHARS.len() as f64) as usize;
            let (r, g, b) = mix(rgb(cell.bg), GRAIN_WHITE, brightness as f32);
            cell.ch = GRAIN_CHARS[tier.min(GRAIN_CHARS.len() - 1)];
            cell.fg = Color::Rgb(r, g, b);
        }
    }

    fn lines(&self, max_width: u16, max_height: u16) -> Vec<Line<'static>> {
        let width = self.width.min(max_width);
        (0..self.height.min(max_height))
            .map(|y| {
                let spans: Vec<Span> = (0..width)
                    .filter_map(|x| self.cell(x, y))
                    .map(|cell| {
                        Span::styled(cell.ch.to_string(), Style::new().fg(cell.fg).bg(cell.bg))
                    })
                    .collect();
                Line::from(spans)
            })
            .collect()
    }
}

impl Surface for Backdrop {
    fn size(&self) -> Size {
        Size::from((self.width, self.height))
    }

    fn resize(&mut self, size: Size) {
        self.width = to_cells(size.width);
        self.height = to_cells(size.height);
        self.cells.clear();
    }

    fn repaint(&mut self, rng: &mut dyn RandomSource) {
        self.cells.clear();
        if !self.enabled || self.width == 0 || self.height == 0 {
            return;
        }
        self.paint_glow();
        self.paint_grain(rng);
        self.paints += 1;
        debug!(
            width = self.width,
            height = self.height,
            paints = self.paints,
            "backdrop painted"
        );
    }
}

impl Widget for &Backdrop {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if self.cells.is_empty() {
            return;
        }
        Paragraph::new(self.lines(area.width, area.height)).render(area, buf);
    }
}

fn to_cells(v: f64) -> u16 {
    v.clamp(0.0, u16::MAX as f64).round() as u16
}
