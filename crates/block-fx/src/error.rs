//! Error types for block buffer construction and combination.

use std::fmt;

/// Errors raised by [`Block`](crate::Block) construction and by operators
/// that combine two buffers.
///
/// Operators never fail on degenerate strengths; they fall back to a no-op.
/// These errors signal a caller bug, such as mixing blocks of different
/// sizes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BlockError {
    /// Two buffers that must share dimensions do not
    ShapeMismatch {
        expected: (usize, usize),
        actual: (usize, usize),
    },
    /// Pixel vector length does not equal `width * height`
    BufferLength { expected: usize, actual: usize },
    /// A zero width or height was requested
    EmptyBlock,
}

impl fmt::Display for BlockError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BlockError::ShapeMismatch { expected, actual } => write!(
                f,
                "block shape mismatch: expected {}x{}, got {}x{}",
                expected.0, expected.1, actual.0, actual.1
            ),
            BlockError::BufferLength { expected, actual } => write!(
                f,
                "pixel buffer length {} does not match dimensions ({} pixels)",
                actual, expected
            ),
            BlockError::EmptyBlock => write!(f, "block dimensions must be non-zero"),
        }
    }
}

impl std::error::Error for BlockError {}
