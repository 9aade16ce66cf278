//! Active edge set for the scanline sweep.
//!
//! Holds the edges crossing the current row, ordered by their exact
//! crossing and then by contour traversal order. Per row the work is
//! proportional to the number of active edges, not to the polygon size.

use crate::edge_table::Edge;
use crate::error::RasterError;
use crate::fill_rule::Crossing;

/// Above this many out-of-order neighbours after a step, insertion sort is
/// abandoned for a full stable sort.
pub const SORT_FALLBACK_DESCENTS: usize = 8;

/// The edges intersecting the current scanline.
#[derive(Debug, Default)]
pub struct ActiveEdges {
    edges: Vec<Edge>,
}

impl ActiveEdges {
    pub fn new() -> Self {
        Self { edges: Vec::new() }
    }

    /// Drop all edges, keeping the allocation.
    pub fn reset(&mut self) {
        self.edges.clear();
    }

    /// Release the allocation.
    pub fn release(&mut self) {
        self.edges = Vec::new();
    }

    /// Make room for `count` simultaneously active edges so the sweep never
    /// allocates once it has started emitting.
    pub fn reserve(&mut self, count: usize) -> Result<(), RasterError> {
        self.edges.clear();
        self.edges.try_reserve(count)?;
        Ok(())
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.edges.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.edges.is_empty()
    }

    #[inline]
    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    /// Insert edges becoming active on this row at their sorted position.
    pub fn insert(&mut self, new_edges: &[Edge]) {
        for edge in new_edges {
            let at = self
                .edges
                .partition_point(|e| e.cmp_sweep(edge).is_lt());
            self.edges.insert(at, *edge);
        }
    }

    /// Remove edges whose last row lies above `y`.
    pub fn remove_finished(&mut self, y: i32) {
        self.edges.retain(|e| e.end_y > y);
    }

    /// Step every edge to the next row and restore the ordering.
    ///
    /// Neighbours only swap where edges cross, which is rare, so the
    /// ordering is repaired by insertion sort unless many edges crossed at
    /// once.
    pub fn advance(&mut self) {
        let mut descents = 0;
        let mut prev: Option<Edge> = None;
        for edge in &mut self.edges {
            edge.step();
            if let Some(p) = prev {
                if p.cmp_sweep(edge).is_gt() {
                    descents += 1;
                }
            }
            prev = Some(*edge);
        }

        if descents == 0 {
            return;
        }
        if descents <= SORT_FALLBACK_DESCENTS {
            insertion_sort(&mut self.edges);
        } else {
            self.edges.sort_by(|a, b| a.cmp_sweep(b));
        }
        debug_assert!(self.is_ordered());
    }

    /// Crossings of the active edges with the current row, left to right.
    pub fn crossings(&self) -> impl Iterator<Item = Crossing> + '_ {
        self.edges
            .iter()
            .map(|e| Crossing::new(e.pixel_x(), e.winding))
    }

    /// Returns `true` if the edges are in sweep order.
    pub fn is_ordered(&self) -> bool {
        self.edges
            .windows(2)
            .all(|w| w[0].cmp_sweep(&w[1]).is_le())
    }

    /// Returns `true` if every edge samples row `y`.
    pub fn spans_row(&self, y: i32) -> bool {
        self.edges.iter().all(|e| e.start_y <= y && y < e.end_y)
    }
}

fn insertion_sort(edges: &mut [Edge]) {
    for i in 1..edges.len() {
        let mut j = i;
        while j > 0 && edges[j - 1].cmp_sweep(&edges[j]).is_gt() {
            edges.swap(j - 1, j);
            j -= 1;
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
