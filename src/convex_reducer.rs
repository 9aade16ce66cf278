//! Reduction of single-row spans to convex pieces.
//!
//! A GPU backend draws quads far more cheaply than one-pixel-tall runs.
//! `ConvexReducer` stacks identical runs on consecutive rows into
//! rectangles, each of them trivially convex, and hands those to the
//! wrapped sink.

use log::trace;

use crate::basics::PointI;
use crate::sink::{RasterSink, Span};

/// A [`RasterSink`] adapter merging vertically aligned spans.
///
/// Expects spans in sweep order: rows ascending, `xb` ascending within a
/// row. Spans that already cover several rows and contours are forwarded
/// unchanged.
pub struct ConvexReducer<S: RasterSink> {
    inner: S,
    /// Rectangles ending on the previous row, candidates for extension.
    prev: Vec<Span>,
    /// First entry of `prev` not yet consumed on the current row.
    cursor: usize,
    /// Rectangles ending on the current row.
    open: Vec<Span>,
    row: Option<i32>,
}

impl<S: RasterSink> ConvexReducer<S> {
    pub fn new(inner: S) -> Self {
        Self {
            inner,
            prev: Vec::new(),
            cursor: 0,
            open: Vec::new(),
            row: None,
        }
    }

    pub fn inner(&self) -> &S {
        &self.inner
    }

    pub fn inner_mut(&mut self) -> &mut S {
        &mut self.inner
    }

    /// Flush pending rectangles and return the wrapped sink.
    pub fn into_inner(mut self) -> S {
        self.flush_all();
        self.inner
    }

    fn emit(inner: &mut S, r: Span) {
        trace!("convex piece: xb: {}, xe: {}, yb: {}, ye: {}", r.xb, r.xe, r.yb, r.ye);
        inner.span(r.xb, r.xe, r.yb, r.ye);
    }

    fn flush_prev(&mut self) {
        for r in self.prev.drain(self.cursor..) {
            Self::emit(&mut self.inner, r);
        }
        self.prev.clear();
        self.cursor = 0;
    }

    fn flush_all(&mut self) {
        self.flush_prev();
        for r in self.open.drain(..) {
            Self::emit(&mut self.inner, r);
        }
        self.row = None;
    }

    fn start_row(&mut self, y: i32) {
        match self.row {
            Some(row) if row == y => return,
            Some(row) if row + 1 == y => {
                self.flush_prev();
                core::mem::swap(&mut self.prev, &mut self.open);
            }
            _ => self.flush_all(),
        }
        self.row = Some(y);
    }
}

impl<S: RasterSink> RasterSink for ConvexReducer<S> {
    fn span(&mut self, xb: i32, xe: i32, yb: i32, ye: i32) {
        if yb != ye {
            self.inner.span(xb, xe, yb, ye);
            return;
        }
        self.start_row(yb);

        while let Some(&candidate) = self.prev.get(self.cursor) {
            if candidate.xb > xb {
                break;
            }
            self.cursor += 1;
            if candidate.xb == xb && candidate.xe == xe {
                self.open.push(Span::new(xb, xe, candidate.yb, ye));
                return;
            }
            Self::emit(&mut self.inner, candidate);
        }
        self.open.push(Span::row(xb, xe, yb));
    }

    fn contour(&mut self, points: &[PointI]) {
        self.inner.contour(points);
    }

    fn finish(&mut self) {
        self.flush_all();
        self.inner.finish();
    }
}

// ============================================================================
// Tests
// ============================================================================
