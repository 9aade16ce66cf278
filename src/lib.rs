//! # polyscan
//!
//! Scanline polygon rasterizer for 2D rendering backends.
//!
//! Turns an arbitrary polygon outline (non-convex, self-intersecting, made
//! of several contours) into output a pixel or GPU backend can fill
//! directly:
//!
//! - Horizontal spans `[xb, xe)` per pixel row, honouring the non-zero or
//!   even-odd filling rule
//! - Whole contours, untouched, for polygons the caller flags convex
//! - Optionally, rectangles stacked from identical spans (`ConvexReducer`)
//!
//! All coordinates are 24.8 fixed-point integers; crossings are tracked
//! with an exact integer DDA, so results are deterministic and independent
//! of floating-point rounding.
//!
//! ## Architecture
//!
//! 1. **Polygon**: contours of fixed-point points plus a convex flag
//! 2. **Edge table**: directed non-horizontal edges sorted by start row
//! 3. **Active edges**: edges crossing the current row, kept in x order
//! 4. **Fill rule**: crossings reduced to inside intervals
//! 5. **Sink**: receives spans or contours as they are produced
//!
//! ```
//! use polyscan::{FillingRule, PointI, Polygon, Raster, RectI, SpanStorage};
//!
//! let square: Vec<PointI> = [(0, 0), (4, 0), (4, 4), (0, 4)]
//!     .iter()
//!     .map(|&(x, y)| PointI::from_pixels(x, y))
//!     .collect();
//! let polygon = Polygon::from_contours(&[square]);
//!
//! let mut raster = Raster::new();
//! let mut spans = SpanStorage::new();
//! raster
//!     .rasterize(&polygon, &RectI::new(0, 0, 100, 100), FillingRule::NonZero, &mut spans)
//!     .unwrap();
//! assert_eq!(spans.spans().len(), 4);
//! assert_eq!(spans.area(), 16);
//! ```

// Foundation
pub mod basics;
pub mod error;
pub mod polygon;

// Sweep
pub mod active_edges;
pub mod edge_table;
pub mod fill_rule;
pub mod raster;

// Output
pub mod convex_reducer;
pub mod sink;

pub use basics::{FillingRule, PointI, RectI};
pub use convex_reducer::ConvexReducer;
pub use error::RasterError;
pub use polygon::Polygon;
pub use raster::Raster;
pub use sink::{RasterSink, Span, SpanFn, SpanStorage};
