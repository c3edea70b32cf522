//! The render tree the fish are drawn from.
//!
//! Agents write transforms into the stage through their [`VisualHandle`];
//! hosts only read it back when drawing or hit-testing clicks.

use crate::geometry::Point;
use crate::theme::{Direction, FishTheme};

/// Scale at and above which the large sprite is used.
const LARGE_SPRITE_SCALE: f64 = 0.85;

/// Identifier of a stage element. Never reused, even across clears.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ElementId(u64);

impl ElementId {
    pub fn get(self) -> u64 {
        self.0
    }
}

/// Exclusive write access to one stage element.
///
/// Deliberately neither `Clone` nor `Copy`: exactly one agent owns it.
#[derive(Debug, PartialEq, Eq)]
pub struct VisualHandle {
    id: ElementId,
}

impl VisualHandle {
    pub fn id(&self) -> ElementId {
        self.id
    }
}

/// Which sprite variant an element is drawn with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpriteSize {
    Small,
    Large,
}

impl SpriteSize {
    pub fn from_scale(scale: f64) -> Self {
        if scale < LARGE_SPRITE_SCALE {
            SpriteSize::Small
        } else {
            SpriteSize::Large
        }
    }

    /// Width and height in cells.
    pub fn dimensions(self) -> (u16, u16) {
        match self {
            SpriteSize::Small => (7, 1),
            SpriteSize::Large => (10, 3),
        }
    }
}

/// Visual transform of one fish.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform {
    /// Where the sprite's centre sits.
    pub center: Point,
    pub direction: Direction,
    pub scale: f64,
    /// Cosmetic wobble in degrees.
    pub rotation_deg: f64,
}

impl Default for Transform {
    fn default() -> Self {
        Self {
            center: Point::default(),
            direction: Direction::Forward,
            scale: 1.0,
            rotation_deg: 0.0,
        }
    }
}

impl Transform {
    pub fn sprite_size(&self) -> SpriteSize {
        SpriteSize::from_scale(self.scale)
    }

    /// Cells covered by the sprite, centred on the transform position.
    pub fn footprint(&self) -> Footprint {
        let (width, height) = self.sprite_size().dimensions();
        let left = (self.center.x - width as f64 / 2.0).round() as i32;
        let top = (self.center.y - height as f64 / 2.0).round() as i32;
        Footprint {
            left,
            top,
            width,
            height,
        }
    }
}

/// Integer cell rectangle; may lie partly or wholly off screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Footprint {
    pub left: i32,
    pub top: i32,
    pub width: u16,
    pub height: u16,
}

impl Footprint {
    pub fn contains(&self, col: i32, row: i32) -> bool {
        col >= self.left
            && col < self.left + self.width as i32
            && row >= self.top
            && row < self.top + self.height as i32
    }
}

/// One fish on the stage.
#[derive(Debug, Clone, PartialEq)]
pub struct Element {
    pub id: ElementId,
    pub theme: FishTheme,
    pub transform: Transform,
}

/// Ordered list of fish elements, in insertion (and paint) order.
#[derive(Debug, Default)]
pub struct Stage {
    elements: Vec<Element>,
    /// Id of `elements[0]`.
    base_id: u64,
    next_id: u64,
}

impl Stage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an element and hand out the only handle to it.
    pub fn insert(&mut self, theme: FishTheme) -> VisualHandle {
        let id = ElementId(self.next_id);
        self.next_id += 1;
        self.elements.push(Element {
            id,
            theme,
            transform: Transform::default(),
        });
        VisualHandle { id }
    }

    /// Overwrite the transform behind `handle`. Stale handles are ignored.
    pub fn write(&mut self, handle: &VisualHandle, transform: Transform) {
        let Some(index) = handle.id.0.checked_sub(self.base_id) else {
            return;
        };
        if let Some(element) = self.elements.get_mut(index as usize) {
            element.transform = transform;
        }
    }

    /// Remove every element. Outstanding handles go stale.
    pub fn clear(&mut self) {
        self.elements.clear();
        self.base_id = self.next_id;
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    pub fn elements(&self) -> &[Element] {
        &self.elements
    }

    /// Topmost element covering the cell, if any.
    pub fn hit_test(&self, col: i32, row: i32) -> Option<&Element> {
        self.elements
            .iter()
            .rev()
            .find(|e| e.transform.footprint().contains(col, row))
    }
}
