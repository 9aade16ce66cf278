//! Rasterizer error types.

use std::collections::TryReserveError;

use thiserror::Error;

/// Failures reported by a single rasterization call.
///
/// None of these leave the [`Raster`](crate::raster::Raster) workspace in an
/// unusable state; the next call starts from a clean slate.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RasterError {
    /// Scratch storage for the edge table or active set could not grow.
    #[error("failed to allocate rasterizer scratch storage: {0}")]
    Alloc(#[from] TryReserveError),

    /// A polygon point lies outside the supported fixed-point range.
    #[error("point ({x}, {y}) is outside the supported coordinate range")]
    CoordinateRange { x: i32, y: i32 },
}
