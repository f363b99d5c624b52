//! Host error types.

use thiserror::Error;

use crate::world::{BlockPos, WorldId};

/// Host error type.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum HostError {
    /// No block is stored at the position.
    #[error("unknown block at {0}")]
    UnknownBlock(BlockPos),

    /// The world does not exist.
    #[error("unknown world: {0:?}")]
    UnknownWorld(WorldId),

    /// Charge value outside `0..=maximum`.
    #[error("invalid anchor charges {charges} (maximum {maximum})")]
    InvalidCharges { charges: u8, maximum: u8 },
}

/// Result type for host operations.
pub type HostResult<T> = Result<T, HostError>;
