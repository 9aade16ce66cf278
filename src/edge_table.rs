//! Edge table construction.
//!
//! Converts polygon contours into directed, non-horizontal edges carrying an
//! exact fixed-point DDA. Edges are sampled at pixel centres: an edge from
//! `y0` down to `y1` (24.8) covers pixel row `r` iff
//! `y0 <= r * 256 + 128 < y1`. Rows are top-inclusive and bottom-exclusive,
//! so two edges meeting at a vertex never both claim the vertex row.

use core::cmp::Ordering;

use crate::basics::{PointI, POLY_SUBPIXEL_SCALE, POLY_SUBPIXEL_SHIFT};
use crate::error::RasterError;
use crate::polygon::Polygon;

const HALF_PIXEL: i64 = (POLY_SUBPIXEL_SCALE / 2) as i64;

/// First pixel row whose centre lies at or below the subpixel `y`.
#[inline]
fn row_at_or_below(y: i64) -> i64 {
    (y - HALF_PIXEL + (POLY_SUBPIXEL_SCALE as i64 - 1)) >> POLY_SUBPIXEL_SHIFT
}

// ============================================================================
// Edge: a directed polygon edge with an incremental x-intersection
// ============================================================================

/// A polygon edge walking down the scanlines.
///
/// The exact crossing with the current row centre is
/// `x + error / error_down` in subpixel units, with `0 <= error < error_down`.
/// Stepping one row adds `dx + error_up / error_down`; the carry keeps the
/// crossing exact, so ordering never drifts however tall the edge is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Edge {
    pub x: i64,
    pub error: i64,
    pub dx: i64,
    pub error_up: i64,
    /// Height of the edge in subpixels.
    pub error_down: i64,
    /// First pixel row sampled by this edge.
    pub start_y: i32,
    /// One past the last pixel row sampled by this edge.
    pub end_y: i32,
    /// +1 if the contour runs downward along this edge, -1 if upward.
    pub winding: i32,
    /// Position of the edge in contour traversal order.
    pub order: u32,
}

impl Edge {
    /// Set up the DDA for the directed segment `p0 -> p1`, positioned on row
    /// `max(start_y, first_row)`.
    ///
    /// Returns `None` if the segment does not cross any row centre.
    pub fn new(p0: PointI, p1: PointI, first_row: i32, order: u32) -> Option<Self> {
        let (top, bottom, winding) = match p0.y.cmp(&p1.y) {
            Ordering::Less => (p0, p1, 1),
            Ordering::Greater => (p1, p0, -1),
            Ordering::Equal => return None,
        };

        let (x0, y0) = (top.x as i64, top.y as i64);
        let (x1, y1) = (bottom.x as i64, bottom.y as i64);

        let start_y = row_at_or_below(y0);
        let end_y = row_at_or_below(y1);
        if end_y <= start_y {
            return None;
        }

        let dy = y1 - y0;
        let dxs = x1 - x0;
        let row = start_y.max(first_row as i64).min(end_y);

        let yc = (row << POLY_SUBPIXEL_SHIFT) + HALF_PIXEL;
        let num = (yc - y0) * dxs;
        let step = dxs << POLY_SUBPIXEL_SHIFT;

        Some(Self {
            x: x0 + num.div_euclid(dy),
            error: num.rem_euclid(dy),
            dx: step.div_euclid(dy),
            error_up: step.rem_euclid(dy),
            error_down: dy,
            start_y: row as i32,
            end_y: end_y as i32,
            winding,
            order,
        })
    }

    /// Advance the crossing to the next row.
    #[inline]
    pub fn step(&mut self) {
        self.x += self.dx;
        self.error += self.error_up;
        if self.error >= self.error_down {
            self.error -= self.error_down;
            self.x += 1;
        }
    }

    /// The first pixel column whose centre lies at or right of the crossing.
    #[inline]
    pub fn pixel_x(&self) -> i32 {
        let t = self.x - HALF_PIXEL;
        let px = if self.error == 0 {
            (t + (POLY_SUBPIXEL_SCALE as i64 - 1)) >> POLY_SUBPIXEL_SHIFT
        } else {
            (t >> POLY_SUBPIXEL_SHIFT) + 1
        };
        px as i32
    }

    /// Compare exact crossings of two edges on the same row.
    #[inline]
    pub fn cmp_x(&self, other: &Self) -> Ordering {
        self.x
            .cmp(&other.x)
            .then_with(|| (self.error * other.error_down).cmp(&(other.error * self.error_down)))
    }

    /// Total order used by the sweep: crossing, then traversal order.
    #[inline]
    pub fn cmp_sweep(&self, other: &Self) -> Ordering {
        self.cmp_x(other).then_with(|| self.order.cmp(&other.order))
    }
}

// ============================================================================
// EdgeTable: every edge of a polygon, sorted by start row
// ============================================================================

/// All edges of one polygon, sorted by `(start_y, x, order)`.
///
/// The buffer is reused across builds; a build never shrinks it.
#[derive(Debug)]
pub struct EdgeTable {
    edges: Vec<Edge>,
    min_y: i32,
    max_y: i32,
}

impl EdgeTable {
    pub fn new() -> Self {
        Self {
            edges: Vec::new(),
            min_y: i32::MAX,
            max_y: i32::MIN,
        }
    }

    /// Pre-allocate room for `capacity` edges.
    pub fn with_capacity(capacity: usize) -> Self {
        let mut table = Self::new();
        table.edges.reserve(capacity);
        table
    }

    /// Discard all edges, keeping the allocation.
    pub fn reset(&mut self) {
        self.edges.clear();
        self.min_y = i32::MAX;
        self.max_y = i32::MIN;
    }

    /// Release the allocation.
    pub fn release(&mut self) {
        self.reset();
        self.edges.shrink_to_fit();
    }

    /// Build the table for `polygon`, keeping only edges that touch rows
    /// `[clip_top, clip_bottom)`.
    ///
    /// Edges starting above `clip_top` are advanced to it. Contours with
    /// fewer than three points contribute nothing. On error the table is
    /// left empty.
    pub fn build(
        &mut self,
        polygon: &Polygon,
        clip_top: i32,
        clip_bottom: i32,
    ) -> Result<(), RasterError> {
        self.reset();

        if let Some(p) = polygon.points().iter().find(|p| !p.in_range()) {
            return Err(RasterError::CoordinateRange { x: p.x, y: p.y });
        }
        self.edges.try_reserve(polygon.total_points())?;

        let mut order = 0u32;
        for contour in polygon.contours() {
            let n = contour.len();
            if n < 3 {
                order += n as u32;
                continue;
            }
            for i in 0..n {
                let p0 = contour[i];
                let p1 = contour[(i + 1) % n];
                let this_order = order;
                order += 1;

                let Some(edge) = Edge::new(p0, p1, clip_top, this_order) else {
                    continue;
                };
                // Trivial vertical rejection.
                if edge.end_y <= clip_top || edge.start_y >= clip_bottom {
                    continue;
                }
                self.min_y = self.min_y.min(edge.start_y);
                self.max_y = self.max_y.max(edge.end_y);
                self.edges.push(edge);
            }
        }

        self.edges
            .sort_unstable_by(|a, b| a.start_y.cmp(&b.start_y).then_with(|| a.cmp_sweep(b)));
        Ok(())
    }

    #[inline]
    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.edges.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.edges.is_empty()
    }

    /// First row touched by any edge (`i32::MAX` when empty).
    #[inline]
    pub fn min_y(&self) -> i32 {
        self.min_y
    }

    /// One past the last row touched by any edge (`i32::MIN` when empty).
    #[inline]
    pub fn max_y(&self) -> i32 {
        self.max_y
    }
}

impl Default for EdgeTable {
    fn default() -> Self {
        Self::new()
    }
}

// ============================================================================
// Tests
// ============================================================================
