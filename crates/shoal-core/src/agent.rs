//! Fish agents: construction, retargeting and per-frame motion.

use tracing::debug;

use crate::geometry::{Point, Size};
use crate::random::RandomSource;
use crate::stage::{Stage, Transform, VisualHandle};
use crate::theme::{Direction, FishTheme};

/// Speed range drawn when a school is spawned.
const SPAWN_SPEED: (f64, f64) = (0.2, 0.8);
/// Speed range drawn on every retarget.
const RETARGET_SPEED: (f64, f64) = (0.1, 0.9);
const SCALE: (f64, f64) = (0.6, 1.1);
/// Seconds a fish pursues one target.
const SEGMENT_SECS: (f64, f64) = (2.0, 6.0);
/// Horizontal spawn/target band, as fractions of the container width.
const X_BAND: (f64, f64) = (-0.2, 1.2);
/// Vertical spawn/target band, as fractions of the container height.
const Y_BAND: (f64, f64) = (0.05, 0.95);
/// Screen-wrap margins, as fractions of the container width.
const WRAP_LEFT: f64 = -0.25;
const WRAP_RIGHT: f64 = 1.05;
const WOBBLE_DEG: f64 = 6.0;

/// One simulated fish.
#[derive(Debug)]
pub struct Agent {
    position: Point,
    target: Option<Point>,
    speed: f64,
    scale: f64,
    direction: Direction,
    /// Seconds spent in the current segment.
    age: f64,
    segment_duration: f64,
    theme: FishTheme,
    handle: VisualHandle,
}

/// Spawn `count` fish into `stage`, alternating themes by index.
pub fn spawn_school<R: RandomSource + ?Sized>(
    count: usize,
    container: Size,
    rng: &mut R,
    stage: &mut Stage,
) -> Vec<Agent> {
    (0..count)
        .map(|index| Agent::spawn(index, container, rng, stage))
        .collect()
}

impl Agent {
    fn spawn<R: RandomSource + ?Sized>(
        index: usize,
        container: Size,
        rng: &mut R,
        stage: &mut Stage,
    ) -> Self {
        let theme = FishTheme::for_index(index);
        let handle = stage.insert(theme);
        let agent = Self {
            position: random_point(container, rng),
            target: None,
            speed: rng.range(SPAWN_SPEED.0, SPAWN_SPEED.1),
            scale: rng.range(SCALE.0, SCALE.1),
            direction: rng.direction(),
            age: 0.0,
            segment_duration: rng.range(SEGMENT_SECS.0, SEGMENT_SECS.1),
            theme,
            handle,
        };
        stage.write(
            &agent.handle,
            Transform {
                center: agent.position,
                direction: agent.direction,
                scale: agent.scale,
                rotation_deg: 0.0,
            },
        );
        agent
    }

    /// Advance the fish by `dt` seconds and write its transform.
    pub fn advance<R: RandomSource + ?Sized>(
        &mut self,
        dt: f64,
        container: Size,
        rng: &mut R,
        stage: &mut Stage,
    ) {
        self.age += dt;
        if self.age >= self.segment_duration {
            self.retarget(container, rng);
        }

        match self.target {
            Some(target) => {
                let rate = 0.2 * self.speed * dt * 5.0;
                self.position.x += (target.x - self.position.x) * rate;
                self.position.y += (target.y - self.position.y) * rate;
            }
            None => {
                self.position.x += (0.5 - rng.next_f64()) * self.speed * 30.0 * dt;
            }
        }

        self.position.x = wrap_x(self.position.x, container.width);
        stage.write(&self.handle, self.transform());
    }

    /// Start a new segment with a fresh target, speed and facing.
    pub fn retarget<R: RandomSource + ?Sized>(&mut self, container: Size, rng: &mut R) {
        self.segment_duration = rng.range(SEGMENT_SECS.0, SEGMENT_SECS.1);
        self.age = 0.0;
        self.speed = rng.range(RETARGET_SPEED.0, RETARGET_SPEED.1);
        self.direction = rng.direction();
        let target = random_point(container, rng);
        debug!(
            element = self.handle.id().get(),
            tx = target.x,
            ty = target.y,
            speed = self.speed,
            "fish retargeted"
        );
        self.target = Some(target);
    }

    /// Transform for the current state.
    pub fn transform(&self) -> Transform {
        Transform {
            center: self.position,
            direction: self.direction,
            scale: self.scale,
            rotation_deg: (self.age * 2.0).sin() * WOBBLE_DEG,
        }
    }

    pub fn position(&self) -> Point {
        self.position
    }

    pub fn target(&self) -> Option<Point> {
        self.target
    }

    pub fn speed(&self) -> f64 {
        self.speed
    }

    pub fn scale(&self) -> f64 {
        self.scale
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn age(&self) -> f64 {
        self.age
    }

    pub fn segment_duration(&self) -> f64 {
        self.segment_duration
    }

    pub fn theme(&self) -> FishTheme {
        self.theme
    }

    pub fn handle(&self) -> &VisualHandle {
        &self.handle
    }
}

fn random_point<R: RandomSource + ?Sized>(container: Size, rng: &mut R) -> Point {
    let x = rng.range(X_BAND.0 * container.width, X_BAND.1 * container.width);
    let y = rng.range(Y_BAND.0 * container.height, Y_BAND.1 * container.height);
    Point::new(x, y)
}

/// Teleport to the opposite edge once past the wrap margin.
pub(crate) fn wrap_x(x: f64, width: f64) -> f64 {
    let left = WRAP_LEFT * width;
    let right = WRAP_RIGHT * width;
    let mut x = x;
    if x < left {
        x = right;
    }
    if x > right {
        x = left;
    }
    x
}
