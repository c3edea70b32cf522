//! Core types for the shoal terminal aquarium.
//!
//! The simulation here knows nothing about terminals: agents move in
//! container units, write their transforms into a [`Stage`] and the
//! [`Aquarium`] drives them one frame at a time. Hosts supply the drawing
//! surface, the navigation target and the clock.

mod agent;
mod aquarium;
mod geometry;
mod random;
mod stage;
mod theme;

pub use agent::{Agent, spawn_school};
pub use aquarium::{Aquarium, FrameToken, Navigator, Settings, Surface};
pub use geometry::{Point, Size};
pub use random::{ConstantRandom, RandomSource, SeededRandom};
pub use stage::{Element, ElementId, Footprint, SpriteSize, Stage, Transform, VisualHandle};
pub use theme::{Direction, FishTheme};

/// Link every fish navigates to when clicked.
pub const DEFAULT_LINK: &str = "blog/post1.html";

/// Number of fish in a school unless configured otherwise.
pub const DEFAULT_FISH_COUNT: usize = 8;
