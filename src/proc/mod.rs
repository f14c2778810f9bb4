//! File-like endpoints addressed by slash-separated paths.
//!
//! A host resolves a path through [`ProcManager`] and forwards its read and
//! write requests to the [`ProcFile`] registered there.

mod manager;
mod tree;

pub use manager::ProcManager;
pub use tree::{ElementInfo, ProcTree, ProcTreeError};

use core::fmt::{Debug, Display, Formatter};

/// Read/write entry points of a pseudo-file.
///
/// Both calls return the number of bytes transferred. Zero means "nothing
/// available" for reads and "nothing accepted" for writes.
pub trait ProcFile: Send + Sync {
    fn read(&self, buf: &mut [u8]) -> Result<usize, ProcError>;

    fn write(&self, buf: &[u8]) -> Result<usize, ProcError>;
}

#[derive(Clone, Copy, PartialEq, Eq)]
pub enum ProcError {
    NotFound,
    AlreadyOccupied,
    InvalidPath,
    OutOfMemory,
    BufferTooSmall { required: usize, available: usize },
    /// The item was removed but only `copied` bytes of it reached the caller.
    Truncated { copied: usize, discarded: usize },
}

impl Debug for ProcError {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        match self {
            ProcError::NotFound => write!(f, "File not found"),
            ProcError::AlreadyOccupied => write!(f, "Already occupied"),
            ProcError::InvalidPath => write!(f, "Invalid path"),
            ProcError::OutOfMemory => write!(f, "Out of memory"),
            ProcError::BufferTooSmall {
                required,
                available,
            } => write!(
                f,
                "Buffer too small: {} bytes required, {} available",
                required, available
            ),
            ProcError::Truncated { copied, discarded } => write!(
                f,
                "Read truncated: {} bytes copied, {} discarded",
                copied, discarded
            ),
        }
    }
}

impl Display for ProcError {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        Debug::fmt(self, f)
    }
}

impl core::error::Error for ProcError {}
