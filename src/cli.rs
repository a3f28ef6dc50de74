use crate::state::{ModeKind, SceneConfig};
use clap::{Parser, ValueEnum};
use log::LevelFilter;
use std::time::Duration;

/// Log levels selectable from the command line
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<LogLevel> for LevelFilter {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Error => LevelFilter::Error,
            LogLevel::Warn => LevelFilter::Warn,
            LogLevel::Info => LevelFilter::Info,
            LogLevel::Debug => LevelFilter::Debug,
            LogLevel::Trace => LevelFilter::Trace,
        }
    }
}

/// Where the scene is drawn
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Frontend {
    /// Character grid in the current terminal
    Terminal,
    /// Native window (needs the `gui` feature)
    Window,
}

/// Interaction mode at startup
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum StartMode {
    Automatic,
    Drag,
}

impl From<StartMode> for ModeKind {
    fn from(mode: StartMode) -> Self {
        match mode {
            StartMode::Automatic => ModeKind::Automatic,
            StartMode::Drag => ModeKind::Drag,
        }
    }
}

fn positive_f64(s: &str) -> Result<f64, String> {
    let value: f64 = s.parse().map_err(|e| format!("{e}"))?;
    if value.is_finite() && value > 0.0 {
        Ok(value)
    } else {
        Err(format!("{value} is not a positive number"))
    }
}

/// Command line arguments
#[derive(Debug, Parser)]
#[command(name = "shadowcast", version)]
#[command(about = "Point light casting rays around an opaque disc")]
pub struct Args {
    /// Drawing front-end
    #[arg(long, value_enum, default_value = "terminal")]
    pub frontend: Frontend,

    /// Interaction mode at startup ([a]utomatic / [d]rag switch it at runtime)
    #[arg(long, value_enum, default_value = "automatic")]
    pub mode: StartMode,

    /// Number of rays cast around the light
    #[arg(long, default_value_t = 360, value_parser = clap::value_parser!(u32).range(1..=100_000))]
    pub rays: u32,

    /// Length of rays that miss the blocker
    #[arg(long, default_value_t = 1000.0, value_parser = positive_f64)]
    pub max_range: f64,

    /// Radius of the blocking disc
    #[arg(long, default_value_t = 80.0, value_parser = positive_f64)]
    pub blocker_radius: f64,

    /// Distance of the orbiting light from the blocker centre
    #[arg(long, default_value_t = 150.0, value_parser = positive_f64)]
    pub orbit_radius: f64,

    /// Orbit advance per frame, in radians (the orbit always runs forward)
    #[arg(long, default_value_t = 0.01, value_parser = positive_f64)]
    pub angular_speed: f64,

    /// Delay between frames, in milliseconds
    #[arg(long, default_value_t = 16)]
    pub frame_ms: u64,

    /// Set the logging level
    #[arg(long, value_enum, default_value = "warn")]
    pub debug_level: LogLevel,
}

impl Args {
    /// Scene parameters with the command line overrides applied
    pub fn scene_config(&self) -> SceneConfig {
        SceneConfig {
            blocker_radius: self.blocker_radius,
            orbit_radius: self.orbit_radius,
            angular_speed: self.angular_speed,
            num_rays: self.rays as usize,
            max_range: self.max_range,
            frame_interval: Duration::from_millis(self.frame_ms),
            ..SceneConfig::default()
        }
    }
}
