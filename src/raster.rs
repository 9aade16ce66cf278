//! Polygon rasterizer workspace.
//!
//! `Raster` owns the scratch storage for one rasterization at a time: the
//! edge table and the active edge set. It is created once, reused for any
//! number of polygons and dropped when no longer needed; buffers grow to the
//! largest polygon seen and are never shared between calls.
//!
//! Usage:
//! 1. Build a [`Polygon`] (optionally flag it convex)
//! 2. Call [`Raster::rasterize`] with pixel bounds, a filling rule and a sink
//! 3. Convex polygons arrive as contours, everything else as spans

use log::{debug, trace, warn};

use crate::active_edges::ActiveEdges;
use crate::basics::{FillingRule, PointI, RectI};
use crate::edge_table::EdgeTable;
use crate::error::RasterError;
use crate::fill_rule::fill_intervals;
use crate::polygon::Polygon;
use crate::sink::RasterSink;

/// Reusable scanline polygon rasterizer.
///
/// A workspace is used by one caller at a time (`&mut self`); independent
/// workspaces can run on separate threads.
#[derive(Debug, Default)]
pub struct Raster {
    table: EdgeTable,
    active: ActiveEdges,
}

impl Raster {
    pub fn new() -> Self {
        Self {
            table: EdgeTable::new(),
            active: ActiveEdges::new(),
        }
    }

    /// Create a workspace with room for `edges` edges up front.
    pub fn with_capacity(edges: usize) -> Self {
        Self {
            table: EdgeTable::with_capacity(edges),
            active: ActiveEdges::new(),
        }
    }

    /// Free the scratch storage. The workspace stays usable and will
    /// allocate again on the next call.
    pub fn release(&mut self) {
        self.table.release();
        self.active.release();
    }

    /// Rasterize `polygon` inside `bounds` (pixels, `x2`/`y2` exclusive).
    ///
    /// A polygon flagged convex skips the sweep: each contour with at least
    /// three points is handed to [`RasterSink::contour`] in original order.
    /// Otherwise every filled run is reported through [`RasterSink::span`]
    /// with `yb == ye`, rows top to bottom, runs left to right, clipped to
    /// `bounds`. [`RasterSink::finish`] follows the last output of a
    /// successful call.
    ///
    /// On error nothing has been sent to the sink.
    pub fn rasterize<S: RasterSink + ?Sized>(
        &mut self,
        polygon: &Polygon,
        bounds: &RectI,
        rule: FillingRule,
        sink: &mut S,
    ) -> Result<(), RasterError> {
        if polygon.is_convex() {
            for contour in polygon.contours() {
                if contour.len() < 3 {
                    continue;
                }
                trace!("convex contour: {} points", contour.len());
                sink.contour(contour);
            }
        } else {
            self.sweep(polygon, bounds, rule, sink)?;
        }
        sink.finish();
        Ok(())
    }

    /// Returns `true` if pixel `(x, y)` is filled under `rule`.
    ///
    /// Always evaluates the outline, whatever the polygon's convex flag.
    pub fn hit_test(
        &mut self,
        polygon: &Polygon,
        rule: FillingRule,
        x: i32,
        y: i32,
    ) -> Result<bool, RasterError> {
        let (Some(x2), Some(y2)) = (x.checked_add(1), y.checked_add(1)) else {
            return Ok(false);
        };
        let mut hit = HitTest { hit: false };
        self.sweep(polygon, &RectI::new(x, y, x2, y2), rule, &mut hit)?;
        Ok(hit.hit)
    }

    /// Build the edge table and sweep it top to bottom.
    fn sweep<S: RasterSink + ?Sized>(
        &mut self,
        polygon: &Polygon,
        bounds: &RectI,
        rule: FillingRule,
        sink: &mut S,
    ) -> Result<(), RasterError> {
        self.active.reset();
        if bounds.is_empty() {
            self.table.reset();
            return Ok(());
        }

        if let Err(err) = self.table.build(polygon, bounds.y1, bounds.y2) {
            warn!("edge table build failed: {err}");
            return Err(err);
        }
        self.active.reserve(self.table.len())?;

        let visible = bounds.intersect(&RectI::new(
            bounds.x1,
            self.table.min_y(),
            bounds.x2,
            self.table.max_y(),
        ));
        debug!(
            "sweep: {} edges, rows {}..{}, {:?}, bounds {:?}",
            self.table.len(),
            visible.y1,
            visible.y2,
            rule,
            bounds
        );

        let edges = self.table.edges();
        let (x_min, x_max) = (visible.x1, visible.x2);
        let mut next = 0;

        for y in visible.y1..visible.y2 {
            self.active.remove_finished(y);

            let first = next;
            while next < edges.len() && edges[next].start_y <= y {
                next += 1;
            }
            self.active.insert(&edges[first..next]);
            debug_assert!(self.active.spans_row(y));
            debug_assert!(self.active.is_ordered());

            fill_intervals(rule, self.active.crossings(), |xb, xe| {
                let xb = xb.max(x_min);
                let xe = xe.min(x_max);
                if xb < xe {
                    trace!("span: xb: {xb}, xe: {xe}, y: {y}");
                    sink.span(xb, xe, y, y);
                }
            });

            self.active.advance();
        }

        self.active.reset();
        Ok(())
    }
}

/// Sink recording whether anything was filled.
struct HitTest {
    hit: bool,
}

impl RasterSink for HitTest {
    fn span(&mut self, _xb: i32, _xe: i32, _yb: i32, _ye: i32) {
        self.hit = true;
    }

    fn contour(&mut self, _points: &[PointI]) {}
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::basics::COORD_LIMIT;
    use crate::sink::{Span, SpanStorage};

    const WIDE: RectI = RectI {
        x1: -1000,
        y1: -1000,
        x2: 1000,
        y2: 1000,
    };

    fn poly(contours: &[&[(i32, i32)]]) -> Polygon {
        let mut p = Polygon::new();
        for c in contours {
            let pts: Vec<PointI> = c.iter().map(|&(x, y)| PointI::from_pixels(x, y)).collect();
            p.add_contour(&pts);
        }
        p
    }

    fn run(p: &Polygon, bounds: &RectI, rule: FillingRule) -> SpanStorage {
        let mut ras = Raster::new();
        let mut st = SpanStorage::new();
        ras.rasterize(p, bounds, rule, &mut st).unwrap();
        st
    }

    #[test]
    fn test_square_spans() {
        let p = poly(&[&[(0, 0), (10, 0), (10, 10), (0, 10)]]);
        let st = run(&p, &WIDE, FillingRule::NonZero);
        let expected: Vec<Span> = (0..10).map(|y| Span::row(0, 10, y)).collect();
        assert_eq!(st.spans(), &expected[..]);
        assert_eq!(st.finished(), 1);
    }

    #[test]
    fn test_triangle_spans() {
        // The diagonal passes through the centre of pixel (y, y), which is
        // the first pixel outside on row y.
        let p = poly(&[&[(0, 0), (8, 8), (0, 8)]]);
        let st = run(&p, &WIDE, FillingRule::NonZero);
        let expected: Vec<Span> = (1..8).map(|y| Span::row(0, y, y)).collect();
        assert_eq!(st.spans(), &expected[..]);
    }

    #[test]
    fn test_hole_with_opposite_winding() {
        let outer: &[(i32, i32)] = &[(0, 0), (10, 0), (10, 10), (0, 10)];
        let inner: &[(i32, i32)] = &[(3, 3), (3, 7), (7, 7), (7, 3)];
        let p = poly(&[outer, inner]);
        for rule in [FillingRule::NonZero, FillingRule::EvenOdd] {
            let st = run(&p, &WIDE, rule);
            let row5: Vec<Span> = st.row(5).copied().collect();
            assert_eq!(row5, vec![Span::row(0, 3, 5), Span::row(7, 10, 5)]);
            assert_eq!(st.area(), 100 - 16);
        }
    }

    #[test]
    fn test_hole_with_same_winding_depends_on_rule() {
        let outer: &[(i32, i32)] = &[(0, 0), (10, 0), (10, 10), (0, 10)];
        let inner: &[(i32, i32)] = &[(3, 3), (7, 3), (7, 7), (3, 7)];
        let p = poly(&[outer, inner]);
        assert_eq!(run(&p, &WIDE, FillingRule::NonZero).area(), 100);
        assert_eq!(run(&p, &WIDE, FillingRule::EvenOdd).area(), 84);
    }

    #[test]
    fn test_convex_fast_path() {
        let mut p = poly(&[
            &[(0, 0), (4, 0), (2, 3)],
            &[(1, 1), (2, 2)],
            &[(5, 5), (9, 5), (9, 9), (5, 9)],
        ]);
        p.set_convex(true);
        let st = run(&p, &WIDE, FillingRule::NonZero);
        assert!(st.spans().is_empty());
        assert_eq!(st.contours().len(), 2);
        assert_eq!(st.contours()[0].len(), 3);
        assert_eq!(st.contours()[1][0], PointI::from_pixels(5, 5));
        assert_eq!(st.finished(), 1);
    }

    #[test]
    fn test_bounds_clip() {
        let p = poly(&[&[(0, 0), (10, 0), (10, 10), (0, 10)]]);
        let st = run(&p, &RectI::new(2, 3, 6, 5), FillingRule::NonZero);
        assert_eq!(st.spans(), &[Span::row(2, 6, 3), Span::row(2, 6, 4)]);
    }

    #[test]
    fn test_empty_bounds() {
        let p = poly(&[&[(0, 0), (10, 0), (10, 10), (0, 10)]]);
        assert!(run(&p, &RectI::new(5, 5, 5, 9), FillingRule::NonZero)
            .spans()
            .is_empty());
        assert!(run(&p, &RectI::new(0, 20, 10, 30), FillingRule::NonZero)
            .spans()
            .is_empty());
    }

    #[test]
    fn test_degenerate_input() {
        let single = poly(&[&[(3, 3)]]);
        let pair = poly(&[&[(0, 0), (9, 9)]]);
        let flat = poly(&[&[(0, 4), (5, 4), (9, 4)]]);
        let empty = Polygon::new();
        for p in [&single, &pair, &flat, &empty] {
            let st = run(p, &WIDE, FillingRule::NonZero);
            assert!(st.spans().is_empty());
            assert!(st.contours().is_empty());
        }
    }

    #[test]
    fn test_error_emits_nothing_and_workspace_recovers() {
        let bad = Polygon::from_contours(&[vec![
            PointI::new(0, 0),
            PointI::new(0, COORD_LIMIT + 256),
            PointI::new(2560, 0),
        ]]);
        let good = poly(&[&[(0, 0), (10, 0), (10, 10), (0, 10)]]);

        let mut ras = Raster::new();
        let mut st = SpanStorage::new();
        let err = ras
            .rasterize(&bad, &WIDE, FillingRule::NonZero, &mut st)
            .unwrap_err();
        assert!(matches!(err, RasterError::CoordinateRange { .. }));
        assert!(st.spans().is_empty());
        assert_eq!(st.finished(), 0);

        ras.rasterize(&good, &WIDE, FillingRule::NonZero, &mut st)
            .unwrap();
        assert_eq!(st.area(), 100);
    }

    #[test]
    fn test_hit_test() {
        let p = poly(&[&[(0, 0), (10, 0), (10, 10), (0, 10)], &[(3, 3), (7, 3), (7, 7), (3, 7)]]);
        let mut ras = Raster::new();
        assert!(ras.hit_test(&p, FillingRule::NonZero, 5, 5).unwrap());
        assert!(!ras.hit_test(&p, FillingRule::EvenOdd, 5, 5).unwrap());
        assert!(ras.hit_test(&p, FillingRule::EvenOdd, 1, 1).unwrap());
        assert!(!ras.hit_test(&p, FillingRule::NonZero, 10, 5).unwrap());
        assert!(!ras.hit_test(&p, FillingRule::NonZero, -1, 5).unwrap());
        assert!(!ras.hit_test(&p, FillingRule::NonZero, i32::MAX, 5).unwrap());
    }

    #[test]
    fn test_release_keeps_workspace_usable() {
        let p = poly(&[&[(0, 0), (10, 0), (10, 10), (0, 10)]]);
        let mut ras = Raster::with_capacity(64);
        let mut st = SpanStorage::new();
        ras.rasterize(&p, &WIDE, FillingRule::NonZero, &mut st).unwrap();
        ras.release();
        ras.rasterize(&p, &WIDE, FillingRule::NonZero, &mut st).unwrap();
        assert_eq!(st.area(), 200);
    }
}
