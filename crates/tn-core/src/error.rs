//! Framework error type.
//!
//! Path queries never fail with an error; "no path" is `None`.  `NavError`
//! covers the things a caller can actually get wrong: inconsistent
//! configuration and geometry that references missing surfaces.

use thiserror::Error;

use crate::{ConnectionId, GridPos, SurfaceId};

/// The top-level error type for `tn-core` and a common base for sub-crates.
#[derive(Debug, Error, PartialEq)]
pub enum NavError {
    #[error("configuration error: {0}")]
    Config(String),

    #[error("stair landing {landing} is outside the tower interior")]
    StairOutsideInterior { landing: GridPos },

    #[error("cell {0} would carry more than one stair link")]
    StairConflict(GridPos),

    #[error("entrance cell {0} does not exist")]
    EntranceMissing(GridPos),

    #[error("connection {connection} references unknown surface {surface}")]
    UnknownSurface { connection: ConnectionId, surface: SurfaceId },
}

/// Shorthand result type for all `tn-*` crates.
pub type NavResult<T> = Result<T, NavError>;
