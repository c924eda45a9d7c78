// src/effective_field/exchange.rs

use crate::grid::Grid2D;
use crate::params::{MicromagneticParams, MU0};
use crate::vector_field::VectorField2D;

/// Exchange field H_ex = A/(mu0 M_s) * lap(m), per component.
///
/// Discrete Laplacian: 5-point stencil (center -4, orthogonal neighbors +1)
/// divided by dx^2, with periodic wrap.
pub fn add_exchange_field(
    grid: &Grid2D,
    m: &VectorField2D,
    h_eff: &mut VectorField2D,
    params: &MicromagneticParams,
) {
    let factor = params.a_ex / (MU0 * params.m_s);
    if factor == 0.0 {
        return;
    }
    let inv_dx2 = 1.0 / (grid.dx * grid.dx);

    for j in 0..grid.n {
        for i in 0..grid.n {
            let idx = grid.idx(i, j);
            let left = grid.idx_wrapped(i as isize - 1, j as isize);
            let right = grid.idx_wrapped(i as isize + 1, j as isize);
            let down = grid.idx_wrapped(i as isize, j as isize - 1);
            let up = grid.idx_wrapped(i as isize, j as isize + 1);

            for c in 0..3 {
                let lap = (m.data[left][c]
                    + m.data[right][c]
                    + m.data[down][c]
                    + m.data[up][c]
                    - 4.0 * m.data[idx][c])
                    * inv_dx2;
                h_eff.data[idx][c] += factor * lap;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn uniform_state_has_zero_exchange_field() {
        let grid = Grid2D::new(8, 1e-9);
        let mut m = VectorField2D::new(grid);
        m.set_uniform(0.0, 0.0, 1.0);
        let mut h = VectorField2D::new(grid);
        h.set_uniform(0.0, 0.0, 0.0);

        add_exchange_field(&grid, &m, &mut h, &MicromagneticParams::default());
        for v in &h.data {
            assert!(v[0].abs() < 1e-20 && v[1].abs() < 1e-20 && v[2].abs() < 1e-20);
        }
    }

    #[test]
    fn single_cell_bump_spreads_with_laplacian_weights() {
        let grid = Grid2D::new(8, 1e-9);
        let mut m = VectorField2D::new(grid);
        m.set_uniform(0.0, 0.0, 0.0);
        m.data[grid.idx(4, 4)] = [1.0, 0.0, 0.0];

        let mut h = VectorField2D::new(grid);
        h.set_uniform(0.0, 0.0, 0.0);
        let params = MicromagneticParams::default();
        add_exchange_field(&grid, &m, &mut h, &params);

        let factor = params.a_ex / (MU0 * params.m_s) / (grid.dx * grid.dx);
        // Center gets -4, the four orthogonal neighbors +1.
        assert!((h.data[grid.idx(4, 4)][0] + 4.0 * factor).abs() < factor * 1e-10);
        assert!((h.data[grid.idx(5, 4)][0] - factor).abs() < factor * 1e-10);
        assert!((h.data[grid.idx(4, 3)][0] - factor).abs() < factor * 1e-10);
        // Diagonal neighbor is untouched by the 5-point stencil.
        assert!(h.data[grid.idx(5, 5)][0].abs() < factor * 1e-10);
    }
}
