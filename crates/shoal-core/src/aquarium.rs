//! The frame driver.
//!
//! [`Aquarium`] owns everything one running animation needs: the stage,
//! the agents, the backdrop surface and the random source. A host calls
//! [`Aquarium::start`] when the container becomes ready or is resized and
//! [`Aquarium::tick`] once per displayed frame.

use tracing::{debug, info};

use crate::agent::{Agent, spawn_school};
use crate::geometry::Size;
use crate::random::RandomSource;
use crate::stage::Stage;
use crate::{DEFAULT_FISH_COUNT, DEFAULT_LINK};

/// Drawing surface painted behind the fish.
pub trait Surface {
    /// Size the surface was last resized to.
    fn size(&self) -> Size;

    /// Resize the surface, discarding whatever was painted.
    fn resize(&mut self, size: Size);

    /// Paint the surface at its current size.
    fn repaint(&mut self, rng: &mut dyn RandomSource);
}

/// Where a click on a fish sends the user.
pub trait Navigator {
    fn navigate(&mut self, link: &str);
}

/// Static parameters of an aquarium.
#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    /// Number of fish spawned on every start.
    pub fish_count: usize,
    /// Destination shared by every fish.
    pub link: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            fish_count: DEFAULT_FISH_COUNT,
            link: DEFAULT_LINK.to_string(),
        }
    }
}

/// Permission to run the next frame of one generation.
///
/// Every [`Aquarium::start`] begins a new generation; tokens from older
/// generations are rejected by [`Aquarium::tick`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameToken {
    generation: u64,
}

impl FrameToken {
    pub fn generation(&self) -> u64 {
        self.generation
    }
}

/// One running school of fish and its backdrop.
#[derive(Debug)]
pub struct Aquarium<S, R> {
    settings: Settings,
    surface: S,
    rng: R,
    stage: Stage,
    agents: Vec<Agent>,
    container: Size,
    /// Timestamp of the previous frame in milliseconds.
    last_frame_ms: f64,
    generation: u64,
}

impl<S: Surface, R: RandomSource> Aquarium<S, R> {
    /// Create an idle aquarium; nothing is spawned until [`Aquarium::start`].
    pub fn new(settings: Settings, surface: S, rng: R) -> Self {
        Self {
            settings,
            surface,
            rng,
            stage: Stage::new(),
            agents: Vec::new(),
            container: Size::ZERO,
            last_frame_ms: 0.0,
            generation: 0,
        }
    }

    /// Tear down the current school and spawn a fresh one for `container`.
    pub fn start(&mut self, container: Size, now_ms: f64) -> FrameToken {
        self.generation += 1;
        self.stage.clear();
        self.agents.clear();
        self.container = container;

        self.surface.resize(container);
        self.surface.repaint(&mut self.rng);

        self.agents = spawn_school(
            self.settings.fish_count,
            container,
            &mut self.rng,
            &mut self.stage,
        );
        self.last_frame_ms = now_ms;

        info!(
            generation = self.generation,
            fish = self.agents.len(),
            width = container.width,
            height = container.height,
            "aquarium started"
        );
        FrameToken {
            generation: self.generation,
        }
    }

    /// Run one frame. Returns the token for the next frame, or `None` when
    /// `token` belongs to a generation that has since been restarted.
    pub fn tick(&mut self, token: FrameToken, now_ms: f64, measured: Size) -> Option<FrameToken> {
        if token.generation != self.generation {
            debug!(
                stale = token.generation,
                current = self.generation,
                "dropping frame from stale generation"
            );
            return None;
        }

        let dt = ((now_ms - self.last_frame_ms) / 1000.0).max(0.0);
        self.last_frame_ms = now_ms;

        if self.surface.size() != measured {
            self.surface.resize(measured);
            self.surface.repaint(&mut self.rng);
        }
        self.container = measured;

        for agent in &mut self.agents {
            agent.advance(dt, measured, &mut self.rng, &mut self.stage);
        }

        Some(token)
    }

    /// Route a click at the given cell. Navigates at most once and reports
    /// whether a fish was hit.
    pub fn handle_click(&self, col: i32, row: i32, navigator: &mut dyn Navigator) -> bool {
        match self.stage.hit_test(col, row) {
            Some(element) => {
                info!(element = element.id.get(), link = %self.settings.link, "fish clicked");
                navigator.navigate(&self.settings.link);
                true
            }
            None => false,
        }
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn stage(&self) -> &Stage {
        &self.stage
    }

    pub fn agents(&self) -> &[Agent] {
        &self.agents
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn container(&self) -> Size {
        self.container
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::random::{ConstantRandom, SeededRandom};

    /// Surface that only records what was asked of it.
    #[derive(Debug, Default)]
    struct RecordingSurface {
        size: Size,
        paints: usize,
    }

    impl Surface for RecordingSurface {
        fn size(&self) -> Size {
            self.size
        }

        fn resize(&mut self, size: Size) {
            self.size = size;
        }

        fn repaint(&mut self, _rng: &mut dyn RandomSource) {
            self.paints += 1;
        }
    }

    fn aquarium(seed: u64) -> Aquarium<RecordingSurface, SeededRandom> {
        Aquarium::new(
            Settings::default(),
            RecordingSurface::default(),
            SeededRandom::from_seed(seed),
        )
    }

    #[test]
    fn test_start_spawns_school_and_paints_once() {
        let mut aq = aquarium(1);
        aq.start(Size::new(80.0, 24.0), 0.0);

        assert_eq!(aq.agents().len(), DEFAULT_FISH_COUNT);
        assert_eq!(aq.stage().len(), DEFAULT_FISH_COUNT);
        assert_eq!(aq.surface().size(), Size::new(80.0, 24.0));
        assert_eq!(aq.surface().paints, 1);
    }

    #[test]
    fn test_repaint_only_on_size_change() {
        let mut aq = aquarium(2);
        let size = Size::new(80.0, 24.0);
        let mut token = aq.start(size, 0.0);
        for frame in 1..=30 {
            token = aq.tick(token, frame as f64 * 16.0, size).unwrap();
        }
        assert_eq!(aq.surface().paints, 1);

        let bigger = Size::new(100.0, 30.0);
        token = aq.tick(token, 600.0, bigger).unwrap();
        aq.tick(token, 616.0, bigger).unwrap();
        assert_eq!(aq.surface().paints, 2);
        assert_eq!(aq.surface().size(), bigger);
        assert_eq!(aq.container(), bigger);
    }

    #[test]
    fn test_restart_cancels_previous_generation() {
        let mut aq = aquarium(3);
        let size = Size::new(80.0, 24.0);
        let old = aq.start(size, 0.0);
        let new = aq.start(size, 10.0);

        assert_ne!(old, new);
        assert!(aq.tick(old, 20.0, size).is_none());
        assert_eq!(aq.tick(new, 20.0, size), Some(new));
    }

    #[test]
    fn test_stale_tick_leaves_state_untouched() {
        let mut aq = aquarium(4);
        let size = Size::new(80.0, 24.0);
        let old = aq.start(size, 0.0);
        aq.start(size, 0.0);
        let before: Vec<_> = aq.stage().elements().to_vec();

        assert!(aq.tick(old, 5000.0, Size::new(10.0, 10.0)).is_none());
        assert_eq!(aq.stage().elements(), before.as_slice());
        assert_eq!(aq.surface().size(), size);
    }

    #[test]
    fn test_dt_is_seconds_since_previous_frame() {
        let mut aq = Aquarium::new(
            Settings {
                fish_count: 1,
                ..Settings::default()
            },
            RecordingSurface::default(),
            ConstantRandom(0.9),
        );
        let size = Size::new(80.0, 24.0);
        let token = aq.start(size, 1000.0);
        aq.tick(token, 1250.0, size);
        assert!((aq.agents()[0].age() - 0.25).abs() < 1e-12);
        aq.tick(token, 1500.0, size);
        assert!((aq.agents()[0].age() - 0.5).abs() < 1e-12);
    }

    #[test]
    fn test_backwards_clock_does_not_rewind() {
        let mut aq = aquarium(5);
        let size = Size::new(80.0, 24.0);
        let token = aq.start(size, 1000.0);
        aq.tick(token, 500.0, size);
        assert!(aq.agents().iter().all(|a| a.age() == 0.0));
    }
}
