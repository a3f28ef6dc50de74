//! Shadowcast: a point light casting rays around an opaque disc
//!
//! Each frame the light either orbits the disc or follows the pointer, and a
//! fixed fan of rays is traced from it. Rays that strike the disc stop at the
//! boundary; the rest run out to a fixed range.

pub mod cli;
pub mod error;
pub mod graphics;
pub mod input;
pub mod intersect;
pub mod logger;
pub mod math;
pub mod render;
pub mod state;
pub mod terminal;
#[cfg(feature = "gui")]
pub mod widget;

pub use input::{Flow, InputEvent};
pub use intersect::{intersect, Circle, Ray, NO_HIT};
pub use math::{distance, Vec2};
pub use render::{effective_distance, render_frame, trace_rays, Canvas, RaySegment, Rgba};
pub use state::{Mode, ModeKind, SceneConfig, SceneState};
