//! Application error types.

use std::io;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Terminal error: {0}")]
    Terminal(#[from] io::Error),

    #[error("Failed to open window: {0}")]
    Window(String),

    #[error("The {frontend} front-end is not part of this build (rebuild with `--features {feature}`)")]
    Unsupported {
        frontend: &'static str,
        feature: &'static str,
    },
}
