//! Binary-level errors.

use std::io;

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Terminal error: {0}")]
    Terminal(#[from] io::Error),

    #[error(transparent)]
    Admin(#[from] admin_lib::error::Error),

    #[error("Configuration error: {0}")]
    Config(String),
}
