use crate::source::SourceError;
use panelgeom_core::airfoil::AirfoilError;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("aircraft source file not found: {}", .0.display())]
    SourceNotFound(PathBuf),

    #[error("geometry kernel unavailable: {0}")]
    KernelUnavailable(String),

    #[error(transparent)]
    Source(#[from] SourceError),

    #[error("{0}")]
    Validation(String),

    #[error("airfoil '{name}': invalid coordinate value '{value}'")]
    InvalidCoordinate { name: String, value: String },

    #[error(transparent)]
    Airfoil(#[from] AirfoilError),
}
