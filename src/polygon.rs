//! Polygon storage: an ordered list of closed contours.
//!
//! Points are kept in one flat vector with a per-contour point count, the
//! same packing a GPU backend wants when it draws each contour as a fan.
//! Contours are implicitly closed; repeating the first point is allowed and
//! simply produces a zero-length closing edge.

use crate::basics::{PointI, RectI};

// ============================================================================
// Orientation
// ============================================================================

/// Winding orientation of a single contour in y-down device space.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Orientation {
    /// Clockwise on screen (positive signed area with y pointing down).
    Cw,
    /// Counter-clockwise on screen.
    Ccw,
    /// Zero area.
    Degenerate,
}

/// Twice the signed area of a closed contour, in subpixel units squared.
fn signed_area2(points: &[PointI]) -> i128 {
    let np = points.len();
    let mut area: i128 = 0;
    for i in 0..np {
        let v1 = points[i];
        let v2 = points[(i + 1) % np];
        area += v1.x as i128 * v2.y as i128 - v1.y as i128 * v2.x as i128;
    }
    area
}

/// Detect the orientation of a closed contour.
pub fn contour_orientation(points: &[PointI]) -> Orientation {
    match signed_area2(points) {
        a if a > 0 => Orientation::Cw,
        a if a < 0 => Orientation::Ccw,
        _ => Orientation::Degenerate,
    }
}

/// Number of sign changes around a cyclic sequence, ignoring zeros.
fn cyclic_sign_flips(values: impl Iterator<Item = i64>) -> usize {
    let signs: Vec<bool> = values.filter(|&v| v != 0).map(|v| v > 0).collect();
    let n = signs.len();
    (0..n).filter(|&i| signs[i] != signs[(i + 1) % n]).count()
}

/// Returns `true` if the closed contour is convex and has non-zero area.
///
/// Repeated points are skipped. A contour is accepted when every turn goes
/// the same way and the edge directions sweep around only once, which
/// rejects star-shaped loops whose turns all share a sign.
pub fn is_convex_contour(points: &[PointI]) -> bool {
    let mut pts: Vec<PointI> = Vec::with_capacity(points.len());
    for &p in points {
        if pts.last() != Some(&p) {
            pts.push(p);
        }
    }
    while pts.len() > 1 && pts.first() == pts.last() {
        pts.pop();
    }
    let n = pts.len();
    if n < 3 {
        return false;
    }

    let edges: Vec<(i64, i64)> = (0..n)
        .map(|i| {
            let a = pts[i];
            let b = pts[(i + 1) % n];
            (b.x as i64 - a.x as i64, b.y as i64 - a.y as i64)
        })
        .collect();

    let mut sign = 0i32;
    for i in 0..n {
        let (ax, ay) = edges[i];
        let (bx, by) = edges[(i + 1) % n];
        let cross = ax as i128 * by as i128 - ay as i128 * bx as i128;
        if cross != 0 {
            let s = if cross > 0 { 1 } else { -1 };
            if sign == 0 {
                sign = s;
            } else if sign != s {
                return false;
            }
        } else if (ax as i128 * bx as i128 + ay as i128 * by as i128) < 0 {
            // Doubling back on itself.
            return false;
        }
    }

    sign != 0
        && cyclic_sign_flips(edges.iter().map(|e| e.0)) <= 2
        && cyclic_sign_flips(edges.iter().map(|e| e.1)) <= 2
}

// ============================================================================
// Polygon
// ============================================================================

/// An ordered sequence of contours with a whole-shape convexity flag.
///
/// The `convex` flag is a promise made by the caller: when set, the
/// rasterizer forwards each contour untouched instead of sweeping it. Use
/// [`Polygon::detect_convex`] to derive it from the geometry.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Polygon {
    points: Vec<PointI>,
    counts: Vec<usize>,
    convex: bool,
}

impl Polygon {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a polygon from a list of contours.
    pub fn from_contours<C: AsRef<[PointI]>>(contours: &[C]) -> Self {
        let mut polygon = Self::new();
        for contour in contours {
            polygon.add_contour(contour.as_ref());
        }
        polygon
    }

    /// Append a complete contour. Empty slices are ignored.
    pub fn add_contour(&mut self, points: &[PointI]) {
        if points.is_empty() {
            return;
        }
        self.points.extend_from_slice(points);
        self.counts.push(points.len());
    }

    /// Start a new contour at a pixel-space position.
    pub fn move_to(&mut self, x: f64, y: f64) {
        self.points.push(PointI::from_f64(x, y));
        self.counts.push(1);
    }

    /// Extend the current contour. Starts a new one if there is none.
    pub fn line_to(&mut self, x: f64, y: f64) {
        match self.counts.last_mut() {
            Some(count) => {
                self.points.push(PointI::from_f64(x, y));
                *count += 1;
            }
            None => self.move_to(x, y),
        }
    }

    /// Set the convexity promise.
    pub fn set_convex(&mut self, convex: bool) {
        self.convex = convex;
    }

    /// Derive the convex flag from the geometry and store it.
    ///
    /// Only a single convex contour qualifies: two contours may overlap
    /// and then need winding resolution.
    pub fn detect_convex(&mut self) -> bool {
        self.convex = self.counts.len() == 1 && is_convex_contour(&self.points);
        self.convex
    }

    /// Remove all contours and reset the convex flag.
    pub fn clear(&mut self) {
        self.points.clear();
        self.counts.clear();
        self.convex = false;
    }

    #[inline]
    pub fn is_convex(&self) -> bool {
        self.convex
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    #[inline]
    pub fn num_contours(&self) -> usize {
        self.counts.len()
    }

    #[inline]
    pub fn total_points(&self) -> usize {
        self.points.len()
    }

    /// All points of all contours, in order.
    #[inline]
    pub fn points(&self) -> &[PointI] {
        &self.points
    }

    /// Iterate contours in their original order.
    pub fn contours(&self) -> Contours<'_> {
        Contours {
            points: &self.points,
            counts: self.counts.iter(),
        }
    }

    /// Axis-aligned bounds of every point in subpixel units (inclusive).
    pub fn bounding_rect(&self) -> Option<RectI> {
        let first = self.points.first()?;
        let mut r = RectI::new(first.x, first.y, first.x, first.y);
        for p in &self.points[1..] {
            r.x1 = r.x1.min(p.x);
            r.y1 = r.y1.min(p.y);
            r.x2 = r.x2.max(p.x);
            r.y2 = r.y2.max(p.y);
        }
        Some(r)
    }
}

/// Iterator over the contours of a [`Polygon`].
pub struct Contours<'a> {
    points: &'a [PointI],
    counts: std::slice::Iter<'a, usize>,
}

impl<'a> Iterator for Contours<'a> {
    type Item = &'a [PointI];

    fn next(&mut self) -> Option<Self::Item> {
        let &count = self.counts.next()?;
        let (contour, rest) = self.points.split_at(count);
        self.points = rest;
        Some(contour)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.counts.size_hint()
    }
}

impl ExactSizeIterator for Contours<'_> {}

// ============================================================================
// Tests
// ============================================================================
