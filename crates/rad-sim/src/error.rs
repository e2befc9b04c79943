use thiserror::Error;

use rad_core::RadError;
use rad_grid::GridError;

#[derive(Debug, Error)]
pub enum SimError {
    #[error(transparent)]
    Core(#[from] RadError),

    #[error("layout error: {0}")]
    Grid(#[from] GridError),
}

pub type SimResult<T> = Result<T, SimError>;
