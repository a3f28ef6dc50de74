use crate::intersect::Circle;
use crate::math::{wrap_angle, Vec2};
use std::time::Duration;

/// Fixed scene parameters, chosen once at startup
#[derive(Debug, Clone, PartialEq)]
pub struct SceneConfig {
    /// World width in scene units
    pub width: f64,
    /// World height in scene units
    pub height: f64,
    /// Blocker radius (used by the intersection math)
    pub blocker_radius: f64,
    /// Light radius (visual only)
    pub light_radius: f64,
    /// Distance of the orbiting light from the anchor
    pub orbit_radius: f64,
    /// Orbit advance per frame, in radians
    pub angular_speed: f64,
    /// Number of rays sampled around the light
    pub num_rays: usize,
    /// Length of rays that miss the blocker
    pub max_range: f64,
    /// Delay between frames
    pub frame_interval: Duration,
}

impl Default for SceneConfig {
    fn default() -> Self {
        SceneConfig {
            width: 800.0,
            height: 600.0,
            blocker_radius: 80.0,
            light_radius: 15.0,
            orbit_radius: 150.0,
            angular_speed: 0.01,
            num_rays: 360,
            max_range: 1000.0,
            frame_interval: Duration::from_millis(16),
        }
    }
}

impl SceneConfig {
    /// Centre of the world; the blocker sits here and the light orbits it
    pub fn anchor(&self) -> Vec2 {
        Vec2::new(self.width / 2.0, self.height / 2.0)
    }
}

/// Which interaction mode is active, without its payload
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModeKind {
    Automatic,
    Drag,
}

/// Interaction mode together with the data only that mode uses
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "gui", derive(druid::Data))]
pub enum Mode {
    /// Light orbits the anchor at `angle`
    Automatic { angle: f64 },
    /// Light follows the pointer while the button is held.
    /// `resume_angle` is where the orbit picks up again.
    Drag { pointer_down: bool, resume_angle: f64 },
}

impl Mode {
    pub fn kind(&self) -> ModeKind {
        match self {
            Mode::Automatic { .. } => ModeKind::Automatic,
            Mode::Drag { .. } => ModeKind::Drag,
        }
    }

    /// Orbit angle, whether running or parked
    pub fn orbit_angle(&self) -> f64 {
        match *self {
            Mode::Automatic { angle } => angle,
            Mode::Drag { resume_angle, .. } => resume_angle,
        }
    }
}

/// Scene state, mutated once per frame
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "gui", derive(druid::Data))]
pub struct SceneState {
    /// Current light position
    pub light_pos: Vec2,
    /// Blocker centre (constant after init)
    pub blocker_pos: Vec2,
    /// Blocker radius (constant after init)
    pub blocker_radius: f64,
    /// Active interaction mode
    pub mode: Mode,
}

impl SceneState {
    /// Initial scene: blocker at the anchor, light at the origin until the
    /// first step puts it on the orbit
    pub fn new(config: &SceneConfig) -> Self {
        SceneState {
            light_pos: Vec2::ZERO,
            blocker_pos: config.anchor(),
            blocker_radius: config.blocker_radius,
            mode: Mode::Automatic { angle: 0.0 },
        }
    }

    /// Initial scene starting in the given mode
    pub fn with_mode(config: &SceneConfig, kind: ModeKind) -> Self {
        let mut state = Self::new(config);
        state.select_mode(kind);
        state
    }

    pub fn blocker(&self) -> Circle {
        Circle::new(self.blocker_pos, self.blocker_radius)
    }

    /// Switches mode, carrying the orbit angle across.
    /// Selecting the active mode changes nothing.
    pub fn select_mode(&mut self, kind: ModeKind) {
        self.mode = match (self.mode, kind) {
            (Mode::Automatic { angle }, ModeKind::Drag) => Mode::Drag {
                pointer_down: false,
                resume_angle: angle,
            },
            (Mode::Drag { resume_angle, .. }, ModeKind::Automatic) => {
                Mode::Automatic { angle: resume_angle }
            }
            (mode, _) => mode,
        };
    }

    /// Per-frame animation step
    pub fn step(&mut self, config: &SceneConfig) {
        if let Mode::Automatic { angle } = &mut self.mode {
            *angle = wrap_angle(*angle + config.angular_speed);
            self.light_pos = config.anchor() + Vec2::from_angle(*angle) * config.orbit_radius;
        }
    }
}
