// src/grid.rs

/// Square 2D finite-difference grid with periodic boundaries.
///
/// `dx` is the cell edge length in metres. All stencils wrap at the edges
/// via explicit modulo lookups (`idx_wrapped`).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Grid2D {
    pub n: usize,
    pub dx: f64,
}

impl Grid2D {
    pub fn new(n: usize, dx: f64) -> Self {
        Self { n, dx }
    }

    /// Total number of cells.
    pub fn n_cells(&self) -> usize {
        self.n * self.n
    }

    /// Convert (i, j) indices to a flat index into a 1D array.
    #[inline]
    pub fn idx(&self, i: usize, j: usize) -> usize {
        debug_assert!(i < self.n && j < self.n);
        j * self.n + i
    }

    /// Wrap a possibly-negative index onto the periodic grid.
    #[inline]
    pub fn wrap(&self, i: isize) -> usize {
        i.rem_euclid(self.n as isize) as usize
    }

    /// Flat index with periodic wrap in both directions.
    #[inline]
    pub fn idx_wrapped(&self, i: isize, j: isize) -> usize {
        self.wrap(j) * self.n + self.wrap(i)
    }

    /// Area of one cell (m^2).
    pub fn cell_area(&self) -> f64 {
        self.dx * self.dx
    }

    /// Total grid area (m^2).
    pub fn area(&self) -> f64 {
        let side = self.n as f64 * self.dx;
        side * side
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn grid_indexing_is_consistent() {
        let g = Grid2D::new(4, 1.0);
        assert_eq!(g.idx(0, 0), 0);
        assert_eq!(g.idx(1, 0), 1);
        assert_eq!(g.idx(0, 1), 4);
        assert_eq!(g.idx(3, 3), 15);
        assert_eq!(g.n_cells(), 16);
    }

    #[test]
    fn wrap_handles_negative_and_overflowing_indices() {
        let g = Grid2D::new(8, 1.0);
        assert_eq!(g.wrap(-1), 7);
        assert_eq!(g.wrap(8), 0);
        assert_eq!(g.wrap(17), 1);
        assert_eq!(g.idx_wrapped(-1, -1), g.idx(7, 7));
        assert_eq!(g.idx_wrapped(8, 3), g.idx(0, 3));
    }

    #[test]
    fn areas_scale_with_dx() {
        let g = Grid2D::new(10, 2e-9);
        assert!((g.cell_area() - 4e-18).abs() < 1e-30);
        assert!((g.area() - 4e-16).abs() < 1e-28);
    }
}
