//! Layout error type.

use thiserror::Error;

use rad_core::StructureId;

/// Errors produced by `rad-grid`.
#[derive(Debug, Error)]
pub enum GridError {
    #[error("structure {0} not found")]
    StructureNotFound(StructureId),

    #[error("structure {0} already exists")]
    DuplicateStructure(StructureId),

    #[error("cannot merge structure {0} into itself")]
    SelfMerge(StructureId),

    #[error("cannot merge {from} into {into}: origins are not tile-aligned")]
    Misaligned { from: StructureId, into: StructureId },
}

pub type GridResult<T> = Result<T, GridError>;
