//! Fill-rule evaluation along one scanline.
//!
//! Reduces the ordered edge crossings of a row to the half-open intervals
//! `[xb, xe)` that the filling rule counts as inside.

use crate::basics::FillingRule;

/// One edge crossing a scanline at pixel column `x`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Crossing {
    pub x: i32,
    /// +1 or -1, the direction the contour runs through the row.
    pub winding: i32,
}

impl Crossing {
    pub fn new(x: i32, winding: i32) -> Self {
        Self { x, winding }
    }
}

/// Walk `crossings` left to right and call `emit(xb, xe)` for every maximal
/// inside interval.
///
/// Crossings must be sorted by `x`. All crossings sharing an `x` are applied
/// together before the inside test, so coincident edges never produce
/// zero-width or split intervals. The emitted intervals are sorted, disjoint,
/// non-empty and never touch each other. A row left "inside" after the last
/// crossing has no right boundary and emits nothing for that run.
pub fn fill_intervals<I, F>(rule: FillingRule, crossings: I, mut emit: F)
where
    I: IntoIterator<Item = Crossing>,
    F: FnMut(i32, i32),
{
    let mut crossings = crossings.into_iter().peekable();
    let mut acc = 0i32;
    let mut start = 0i32;

    while let Some(first) = crossings.next() {
        let x = first.x;
        let was_inside = rule.is_inside(acc);

        acc += contribution(rule, first.winding);
        while let Some(next) = crossings.next_if(|c| c.x == x) {
            acc += contribution(rule, next.winding);
        }
        debug_assert!(
            crossings.peek().map_or(true, |c| c.x > x),
            "crossings must be sorted by x"
        );

        match (was_inside, rule.is_inside(acc)) {
            (false, true) => start = x,
            (true, false) => emit(start, x),
            _ => {}
        }
    }
}

#[inline]
fn contribution(rule: FillingRule, winding: i32) -> i32 {
    match rule {
        FillingRule::NonZero => winding,
        // Only parity matters; counting keeps it independent of direction.
        FillingRule::EvenOdd => 1,
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn run(rule: FillingRule, crossings: &[(i32, i32)]) -> Vec<(i32, i32)> {
        let mut out = Vec::new();
        fill_intervals(
            rule,
            crossings.iter().map(|&(x, w)| Crossing::new(x, w)),
            |xb, xe| out.push((xb, xe)),
        );
        out
    }

    #[test]
    fn test_empty() {
        assert!(run(FillingRule::NonZero, &[]).is_empty());
        assert!(run(FillingRule::EvenOdd, &[]).is_empty());
    }

    #[test]
    fn test_simple_pair_agrees() {
        let c = [(2, -1), (9, 1)];
        assert_eq!(run(FillingRule::NonZero, &c), vec![(2, 9)]);
        assert_eq!(run(FillingRule::EvenOdd, &c), vec![(2, 9)]);
    }

    #[test]
    fn test_nested_same_direction() {
        // Two overlapping runs wound the same way.
        let c = [(0, 1), (3, 1), (6, -1), (10, -1)];
        assert_eq!(run(FillingRule::NonZero, &c), vec![(0, 10)]);
        assert_eq!(run(FillingRule::EvenOdd, &c), vec![(0, 3), (6, 10)]);
    }

    #[test]
    fn test_nested_opposite_direction_is_a_hole() {
        let c = [(0, 1), (3, -1), (6, 1), (10, -1)];
        assert_eq!(run(FillingRule::NonZero, &c), vec![(0, 3), (6, 10)]);
        assert_eq!(run(FillingRule::EvenOdd, &c), vec![(0, 3), (6, 10)]);
    }

    #[test]
    fn test_coincident_crossings_are_batched() {
        // Two squares touching at x = 5: the shared column must not split.
        let c = [(0, -1), (5, 1), (5, -1), (10, 1)];
        assert_eq!(run(FillingRule::NonZero, &c), vec![(0, 10)]);
        assert_eq!(run(FillingRule::EvenOdd, &c), vec![(0, 10)]);
    }

    #[test]
    fn test_zero_width_pair_emits_nothing() {
        let c = [(4, 1), (4, -1)];
        assert!(run(FillingRule::NonZero, &c).is_empty());
        assert!(run(FillingRule::EvenOdd, &c).is_empty());
    }

    #[test]
    fn test_batch_reaching_zero_and_back() {
        // At x = 5 the sum goes 1 -> 0 -> -1 within one batch.
        let c = [(0, 1), (5, -1), (5, -1), (8, 1)];
        assert_eq!(run(FillingRule::NonZero, &c), vec![(0, 8)]);
        // Even-odd: count 1 -> 3 at x = 5 stays odd.
        assert_eq!(run(FillingRule::EvenOdd, &c), vec![(0, 8)]);
    }

    #[test]
    fn test_unterminated_run_ignored() {
        assert_eq!(run(FillingRule::NonZero, &[(0, 1), (4, -1), (6, 1)]), vec![(0, 4)]);
    }

    #[test]
    fn test_intervals_never_touch() {
        let c = [(0, 1), (2, -1), (2, 1), (4, -1), (7, 1), (9, -1)];
        let out = run(FillingRule::NonZero, &c);
        assert_eq!(out, vec![(0, 4), (7, 9)]);
        for w in out.windows(2) {
            assert!(w[0].1 < w[1].0);
        }
    }
}
