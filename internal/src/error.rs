use model::error::{ConfigError, InputError};

#[derive(thiserror::Error, Debug)]
pub enum SweepError {
    #[error(transparent)]
    Input(#[from] InputError),
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("Failed to write output: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to write summary: {0}")]
    Json(#[from] serde_json::Error),
}
