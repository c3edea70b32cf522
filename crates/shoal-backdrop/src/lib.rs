//! Ambient backdrop for the shoal aquarium.
//!
//! A soft radial glow with a sprinkling of grain, painted once per surface
//! size and drawn unchanged behind the fish on every frame.

mod chars;
mod color;
mod glow;
mod state;

pub use color::Rgba;
pub use glow::radial_glow;
pub use state::{Backdrop, BackdropCell};
