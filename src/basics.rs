//! Foundation types and fixed-point constants.
//!
//! Every coordinate the rasterizer sees is a 24.8 fixed-point integer, so
//! edge ordering and crossing arithmetic never depend on floating point.

// ============================================================================
// Rounding and conversion functions
// ============================================================================

/// Round a double to the nearest integer (round half away from zero).
#[inline]
pub fn iround(v: f64) -> i32 {
    if v < 0.0 {
        (v - 0.5) as i32
    } else {
        (v + 0.5) as i32
    }
}

/// Convert a pixel-space double to 24.8 fixed-point.
#[inline]
pub fn poly_coord(v: f64) -> i32 {
    iround(v * POLY_SUBPIXEL_SCALE as f64)
}

/// Convert a whole-pixel coordinate to 24.8 fixed-point.
///
/// Saturates instead of wrapping, so a far-away pixel stays out of
/// `COORD_LIMIT` range and is rejected by the rasterizer.
#[inline]
pub fn subpixel(v: i32) -> i32 {
    v.saturating_mul(POLY_SUBPIXEL_SCALE as i32)
}

// ============================================================================
// Subpixel constants
// ============================================================================

/// Number of fractional bits in a coordinate.
pub const POLY_SUBPIXEL_SHIFT: u32 = 8;
pub const POLY_SUBPIXEL_SCALE: u32 = 1 << POLY_SUBPIXEL_SHIFT;

/// Largest accepted absolute subpixel coordinate.
///
/// Keeps every DDA product (`dy * dx`, rational x comparisons) inside `i64`.
pub const COORD_LIMIT: i32 = 1 << 28;

// ============================================================================
// Filling rule
// ============================================================================

/// Filling rule for polygon rasterization.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FillingRule {
    #[default]
    NonZero,
    EvenOdd,
}

impl FillingRule {
    /// Returns `true` if a point with the given accumulated winding number
    /// counts as filled under this rule.
    #[inline]
    pub fn is_inside(self, winding: i32) -> bool {
        match self {
            FillingRule::NonZero => winding != 0,
            FillingRule::EvenOdd => winding & 1 != 0,
        }
    }
}

// ============================================================================
// Rect
// ============================================================================

/// A rectangle defined by two corner points.
///
/// When used as rasterizer bounds, `x2` and `y2` are exclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rect<T: Copy> {
    pub x1: T,
    pub y1: T,
    pub x2: T,
    pub y2: T,
}

impl<T: Copy + PartialOrd> Rect<T> {
    pub fn new(x1: T, y1: T, x2: T, y2: T) -> Self {
        Self { x1, y1, x2, y2 }
    }

    /// Returns `true` if the half-open area `[x1, x2) x [y1, y2)` holds no
    /// pixel.
    #[inline]
    pub fn is_empty(&self) -> bool {
        !(self.x1 < self.x2 && self.y1 < self.y2)
    }

    /// Intersection of two half-open rectangles. May be empty.
    pub fn intersect(&self, other: &Self) -> Self {
        let max = |a: T, b: T| if a < b { b } else { a };
        let min = |a: T, b: T| if b < a { b } else { a };
        Self::new(
            max(self.x1, other.x1),
            max(self.y1, other.y1),
            min(self.x2, other.x2),
            min(self.y2, other.y2),
        )
    }
}

/// Rectangle with `i32` coordinates.
pub type RectI = Rect<i32>;

// ============================================================================
// Point
// ============================================================================

/// A 2D point.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
pub struct PointBase<T: Copy> {
    pub x: T,
    pub y: T,
}

impl<T: Copy> PointBase<T> {
    pub fn new(x: T, y: T) -> Self {
        Self { x, y }
    }
}

/// A point in 24.8 fixed-point coordinates.
pub type PointI = PointBase<i32>;

impl PointI {
    /// Point at whole-pixel coordinates.
    #[inline]
    pub fn from_pixels(x: i32, y: i32) -> Self {
        Self::new(subpixel(x), subpixel(y))
    }

    /// Point from pixel-space doubles, rounded to the nearest subpixel.
    #[inline]
    pub fn from_f64(x: f64, y: f64) -> Self {
        Self::new(poly_coord(x), poly_coord(y))
    }

    /// Returns `true` if both coordinates are within `COORD_LIMIT`.
    #[inline]
    pub fn in_range(&self) -> bool {
        self.x.unsigned_abs() <= COORD_LIMIT as u32 && self.y.unsigned_abs() <= COORD_LIMIT as u32
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_iround() {
        assert_eq!(iround(0.5), 1);
        assert_eq!(iround(0.49), 0);
        assert_eq!(iround(-0.5), -1);
        assert_eq!(iround(-0.49), 0);
        assert_eq!(iround(1.5), 2);
        assert_eq!(iround(-1.5), -2);
        assert_eq!(iround(0.0), 0);
    }

    #[test]
    fn test_poly_coord() {
        assert_eq!(poly_coord(1.0), 256);
        assert_eq!(poly_coord(0.5), 128);
        assert_eq!(poly_coord(-2.25), -576);
        assert_eq!(subpixel(3), 768);
        assert_eq!(subpixel(-1), -256);
        assert_eq!(subpixel(1 << 24), i32::MAX);
        assert_eq!(subpixel(-(1 << 24)), i32::MIN);
        assert!(!PointI::from_pixels(1 << 24, 5).in_range());
    }

    #[test]
    fn test_poly_subpixel_constants() {
        assert_eq!(POLY_SUBPIXEL_SHIFT, 8);
        assert_eq!(POLY_SUBPIXEL_SCALE, 256);
    }

    #[test]
    fn test_filling_rule_is_inside() {
        assert!(!FillingRule::NonZero.is_inside(0));
        assert!(FillingRule::NonZero.is_inside(2));
        assert!(FillingRule::NonZero.is_inside(-1));
        assert!(!FillingRule::EvenOdd.is_inside(2));
        assert!(FillingRule::EvenOdd.is_inside(-1));
        assert!(FillingRule::EvenOdd.is_inside(3));
        assert_eq!(FillingRule::default(), FillingRule::NonZero);
    }

    #[test]
    fn test_rect_is_empty() {
        assert!(!RectI::new(10, 20, 30, 40).is_empty());
        assert!(RectI::new(5, 0, 5, 10).is_empty());
        assert!(RectI::new(0, 9, 10, 3).is_empty());
    }

    #[test]
    fn test_rect_intersect() {
        let r = RectI::new(10, 20, 100, 200).intersect(&RectI::new(50, 0, 80, 80));
        assert_eq!(r, RectI::new(50, 20, 80, 80));
        let disjoint = RectI::new(0, 0, 10, 10).intersect(&RectI::new(20, 20, 30, 30));
        assert!(disjoint.is_empty());
    }

    #[test]
    fn test_point_conversions() {
        assert_eq!(PointI::from_pixels(2, 3), PointI::new(512, 768));
        assert_eq!(PointI::from_f64(0.5, -1.0), PointI::new(128, -256));
        assert!(PointI::new(COORD_LIMIT, -COORD_LIMIT).in_range());
        assert!(!PointI::new(COORD_LIMIT + 1, 0).in_range());
        assert!(!PointI::new(0, i32::MIN).in_range());
    }
}
