//! Per-frame ray recomputation and draw-command emission.

use crate::intersect::{intersect, Ray};
use crate::math::Vec2;
use crate::state::{SceneConfig, SceneState};
use log::trace;
use std::f64::consts::TAU;

/// 8-bit RGBA colour
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Rgba { r, g, b, a: 255 }
    }

    pub const BACKGROUND: Rgba = Rgba::rgb(0, 0, 0);
    pub const LIGHT: Rgba = Rgba::rgb(255, 255, 0);
    pub const BLOCKER: Rgba = Rgba::rgb(0, 100, 255);
    pub const RAY: Rgba = Rgba::rgb(255, 255, 255);
}

/// Drawing surface the frame is emitted to
pub trait Canvas {
    fn clear(&mut self, color: Rgba);
    fn draw_line(&mut self, p0: Vec2, p1: Vec2, color: Rgba);
    fn fill_circle(&mut self, center: Vec2, radius: f64, color: Rgba);
    /// Flushes the finished frame
    fn present(&mut self);
}

/// One traced ray, from the light to where it stops
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RaySegment {
    pub start: Vec2,
    pub end: Vec2,
    /// Clamped length of the segment
    pub distance: f64,
    /// True if the blocker cut the ray short of `max_range`
    pub blocked: bool,
}

/// Hit distance if it lies in `(0, max_range)`, otherwise `max_range`
pub fn effective_distance(hit: f64, max_range: f64) -> f64 {
    if hit > 0.0 && hit < max_range {
        hit
    } else {
        max_range
    }
}

/// Direction of ray `i` out of `num_rays`, sampled uniformly in world space
pub fn ray_direction(i: usize, num_rays: usize) -> Vec2 {
    Vec2::from_angle(i as f64 * (TAU / num_rays as f64))
}

/// Traces the full fan of rays from the current light position
pub fn trace_rays(state: &SceneState, config: &SceneConfig) -> Vec<RaySegment> {
    (0..config.num_rays)
        .map(|i| {
            let ray = Ray::new(state.light_pos, ray_direction(i, config.num_rays));
            let hit = intersect(
                ray.origin,
                ray.direction,
                state.blocker_pos,
                state.blocker_radius,
            );
            let distance = effective_distance(hit, config.max_range);
            RaySegment {
                start: ray.origin,
                end: ray.at(distance),
                distance,
                blocked: distance < config.max_range,
            }
        })
        .collect()
}

/// Draws one complete frame: background, light, blocker, then the rays
pub fn render_frame<C: Canvas>(state: &SceneState, config: &SceneConfig, canvas: &mut C) {
    canvas.clear(Rgba::BACKGROUND);
    canvas.fill_circle(state.light_pos, config.light_radius, Rgba::LIGHT);
    canvas.fill_circle(state.blocker_pos, state.blocker_radius, Rgba::BLOCKER);

    let segments = trace_rays(state, config);
    for segment in &segments {
        canvas.draw_line(segment.start, segment.end, Rgba::RAY);
    }
    trace!(
        "frame: light=({:.1}, {:.1}) blocked={}/{}",
        state.light_pos.x,
        state.light_pos.y,
        segments.iter().filter(|s| s.blocked).count(),
        segments.len()
    );

    canvas.present();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, PartialEq)]
    enum Command {
        Clear,
        Line,
        Circle(f64),
        Present,
    }

    #[derive(Default)]
    struct Recorder(Vec<Command>);

    impl Canvas for Recorder {
        fn clear(&mut self, _color: Rgba) {
            self.0.push(Command::Clear);
        }
        fn draw_line(&mut self, _p0: Vec2, _p1: Vec2, _color: Rgba) {
            self.0.push(Command::Line);
        }
        fn fill_circle(&mut self, _center: Vec2, radius: f64, _color: Rgba) {
            self.0.push(Command::Circle(radius));
        }
        fn present(&mut self) {
            self.0.push(Command::Present);
        }
    }

    #[test]
    fn effective_distance_clamps() {
        assert_eq!(effective_distance(-1.0, 1000.0), 1000.0);
        assert_eq!(effective_distance(0.0, 1000.0), 1000.0);
        assert_eq!(effective_distance(250.0, 1000.0), 250.0);
        assert_eq!(effective_distance(1000.0, 1000.0), 1000.0);
        assert_eq!(effective_distance(5000.0, 1000.0), 1000.0);
    }

    #[test]
    fn frame_emits_discs_then_rays() {
        let config = SceneConfig::default();
        let mut state = SceneState::new(&config);
        state.step(&config);

        let mut canvas = Recorder::default();
        render_frame(&state, &config, &mut canvas);

        let commands = canvas.0;
        assert_eq!(commands.len(), 1 + 2 + config.num_rays + 1);
        assert_eq!(commands[0], Command::Clear);
        assert_eq!(commands[1], Command::Circle(config.light_radius));
        assert_eq!(commands[2], Command::Circle(config.blocker_radius));
        assert!(commands[3..3 + config.num_rays]
            .iter()
            .all(|c| *c == Command::Line));
        assert_eq!(commands.last(), Some(&Command::Present));
    }

    #[test]
    fn light_inside_blocker_blocks_every_ray() {
        let config = SceneConfig::default();
        let mut state = SceneState::new(&config);
        state.light_pos = state.blocker_pos;
        let segments = trace_rays(&state, &config);
        for segment in segments {
            assert!(segment.blocked);
            assert!((segment.distance - config.blocker_radius).abs() < 1e-9);
        }
    }

    #[test]
    fn segments_start_at_light() {
        let config = SceneConfig {
            num_rays: 12,
            ..SceneConfig::default()
        };
        let mut state = SceneState::new(&config);
        state.light_pos = Vec2::new(10.0, 20.0);
        let segments = trace_rays(&state, &config);
        assert_eq!(segments.len(), 12);
        assert!(segments.iter().all(|s| s.start == state.light_pos));
    }
}
