use clap::Parser;
use log::info;
use shadowcast::cli::{Args, Frontend};
use shadowcast::error::AppError;
use shadowcast::logger::init_logger;
use shadowcast::state::{ModeKind, SceneConfig};
use std::process::ExitCode;

#[cfg(feature = "gui")]
fn run_window(config: &SceneConfig, mode: ModeKind) -> Result<(), AppError> {
    shadowcast::widget::run(config, mode)
}

#[cfg(not(feature = "gui"))]
fn run_window(_config: &SceneConfig, _mode: ModeKind) -> Result<(), AppError> {
    Err(AppError::Unsupported {
        frontend: "window",
        feature: "gui",
    })
}

/// Main function
fn main() -> ExitCode {
    let args = Args::parse();

    init_logger(args.debug_level.into());

    let config = args.scene_config();
    let mode = ModeKind::from(args.mode);
    info!(
        "{} {}: {} rays, range {}, blocker radius {}, start mode {:?}",
        env!("CARGO_PKG_NAME"),
        env!("CARGO_PKG_VERSION"),
        config.num_rays,
        config.max_range,
        config.blocker_radius,
        mode
    );

    let result = match args.frontend {
        Frontend::Terminal => shadowcast::terminal::run(&config, mode),
        Frontend::Window => run_window(&config, mode),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("{}: {err}", env!("CARGO_PKG_NAME"));
            ExitCode::FAILURE
        }
    }
}
