//! Output sinks for the rasterizer.
//!
//! A sink receives results one at a time as they are produced, so the
//! rasterizer never builds an intermediate list of spans.

use crate::basics::PointI;

// ============================================================================
// RasterSink trait
// ============================================================================

/// Receiver of rasterizer output.
///
/// Complex polygons arrive as spans, convex polygons as whole contours.
pub trait RasterSink {
    /// A filled run `[xb, xe)` covering pixel rows `yb..=ye`.
    ///
    /// The sweep itself always reports single rows (`yb == ye`); adapters
    /// such as [`ConvexReducer`](crate::convex_reducer::ConvexReducer) may
    /// merge rows.
    fn span(&mut self, xb: i32, xe: i32, yb: i32, ye: i32);

    /// One contour of a polygon flagged convex, in 24.8 fixed-point.
    fn contour(&mut self, points: &[PointI]);

    /// Called once at the end of every successful call, after the last span
    /// or contour.
    ///
    /// This is not an output callback: it also runs when nothing was
    /// emitted, for example for degenerate polygons. A failed call never
    /// reaches it.
    fn finish(&mut self) {}
}

impl<S: RasterSink + ?Sized> RasterSink for &mut S {
    fn span(&mut self, xb: i32, xe: i32, yb: i32, ye: i32) {
        (**self).span(xb, xe, yb, ye);
    }

    fn contour(&mut self, points: &[PointI]) {
        (**self).contour(points);
    }

    fn finish(&mut self) {
        (**self).finish();
    }
}

// ============================================================================
// Span
// ============================================================================

/// A filled run `[xb, xe)` over rows `yb..=ye`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Span {
    pub xb: i32,
    pub xe: i32,
    pub yb: i32,
    pub ye: i32,
}

impl Span {
    pub fn new(xb: i32, xe: i32, yb: i32, ye: i32) -> Self {
        Self { xb, xe, yb, ye }
    }

    /// Single-row span.
    pub fn row(xb: i32, xe: i32, y: i32) -> Self {
        Self::new(xb, xe, y, y)
    }

    /// Width in pixels.
    #[inline]
    pub fn len(&self) -> i32 {
        self.xe - self.xb
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.xe <= self.xb
    }

    /// Number of pixels covered.
    #[inline]
    pub fn area(&self) -> i64 {
        self.len() as i64 * (self.ye - self.yb + 1) as i64
    }
}

// ============================================================================
// SpanStorage: collects everything it receives
// ============================================================================

/// A sink that records spans and contours in arrival order.
///
/// Intended for tests, hit-testing and backends that batch their draws.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct SpanStorage {
    spans: Vec<Span>,
    contours: Vec<Vec<PointI>>,
    finished: usize,
}

impl SpanStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Forget recorded output, keeping the allocations.
    pub fn clear(&mut self) {
        self.spans.clear();
        self.contours.clear();
        self.finished = 0;
    }

    #[inline]
    pub fn spans(&self) -> &[Span] {
        &self.spans
    }

    #[inline]
    pub fn contours(&self) -> &[Vec<PointI>] {
        &self.contours
    }

    /// Number of times `finish` was called.
    #[inline]
    pub fn finished(&self) -> usize {
        self.finished
    }

    /// Spans covering row `y`.
    pub fn row(&self, y: i32) -> impl Iterator<Item = &Span> + '_ {
        self.spans.iter().filter(move |s| s.yb <= y && y <= s.ye)
    }

    /// Total number of pixels covered by the recorded spans.
    pub fn area(&self) -> i64 {
        self.spans.iter().map(Span::area).sum()
    }

    /// Returns `true` if pixel `(x, y)` lies in a recorded span.
    pub fn covers(&self, x: i32, y: i32) -> bool {
        self.row(y).any(|s| s.xb <= x && x < s.xe)
    }
}

impl RasterSink for SpanStorage {
    fn span(&mut self, xb: i32, xe: i32, yb: i32, ye: i32) {
        self.spans.push(Span::new(xb, xe, yb, ye));
    }

    fn contour(&mut self, points: &[PointI]) {
        self.contours.push(points.to_vec());
    }

    fn finish(&mut self) {
        self.finished += 1;
    }
}

// ============================================================================
// SpanFn: closure adapter
// ============================================================================

/// Adapts a closure `FnMut(xb, xe, yb, ye)` into a sink. Contours are
/// ignored, so use it only with polygons that are not flagged convex.
pub struct SpanFn<F>(pub F);

impl<F: FnMut(i32, i32, i32, i32)> RasterSink for SpanFn<F> {
    fn span(&mut self, xb: i32, xe: i32, yb: i32, ye: i32) {
        (self.0)(xb, xe, yb, ye);
    }

    fn contour(&mut self, _points: &[PointI]) {}
}

// ============================================================================
// Tests
// ============================================================================
