// src/effective_field/dmi.rs
//
// Interfacial Dzyaloshinskii–Moriya interaction for a 2D thin film,
// coupling to the in-plane gradient of the out-of-plane component only:
//
//   H_x = -(D / mu0 M_s) * dm_z/dy
//   H_y = +(D / mu0 M_s) * dm_z/dx
//   H_z = 0
//
// The asymmetry of this coupling is what permits chiral (skyrmion)
// textures to form.

use crate::grid::Grid2D;
use crate::params::{MicromagneticParams, MU0};
use crate::vector_field::VectorField2D;

pub fn add_dmi_field(
    grid: &Grid2D,
    m: &VectorField2D,
    h_eff: &mut VectorField2D,
    params: &MicromagneticParams,
) {
    let factor = params.dmi / (MU0 * params.m_s);
    if factor == 0.0 {
        return;
    }
    let inv_2dx = 1.0 / (2.0 * grid.dx);

    for j in 0..grid.n {
        for i in 0..grid.n {
            let idx = grid.idx(i, j);
            let left = grid.idx_wrapped(i as isize - 1, j as isize);
            let right = grid.idx_wrapped(i as isize + 1, j as isize);
            let down = grid.idx_wrapped(i as isize, j as isize - 1);
            let up = grid.idx_wrapped(i as isize, j as isize + 1);

            let dmz_dx = (m.data[right][2] - m.data[left][2]) * inv_2dx;
            let dmz_dy = (m.data[up][2] - m.data[down][2]) * inv_2dx;

            h_eff.data[idx][0] += -factor * dmz_dy;
            h_eff.data[idx][1] += factor * dmz_dx;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mz_ramp_along_x(grid: Grid2D) -> VectorField2D {
        // Gentle m_z gradient in x on the interior; constant in y.
        let mut m = VectorField2D::new(grid);
        for j in 0..grid.n {
            for i in 0..grid.n {
                let mz = ((i as f64 - grid.n as f64 / 2.0) * 0.02).clamp(-0.2, 0.2);
                let mx = (1.0 - mz * mz).sqrt();
                m.data[grid.idx(i, j)] = [mx, 0.0, mz];
            }
        }
        m
    }

    #[test]
    fn x_gradient_of_mz_produces_y_field_only() {
        let grid = Grid2D::new(16, 1e-9);
        let m = mz_ramp_along_x(grid);
        let mut h = VectorField2D::new(grid);
        h.set_uniform(0.0, 0.0, 0.0);

        add_dmi_field(&grid, &m, &mut h, &MicromagneticParams::default());

        // Interior cell away from the clamp edges and the periodic seam.
        let idx = grid.idx(8, 8);
        assert!(h.data[idx][0].abs() < 1e-12, "H_x should vanish for a pure x-ramp");
        assert!(h.data[idx][1] > 0.0, "positive D and dmz/dx > 0 give H_y > 0");
        assert!(h.data[idx][2].abs() < 1e-30, "DMI has no z component");
    }

    #[test]
    fn field_flips_sign_with_d() {
        let grid = Grid2D::new(16, 1e-9);
        let m = mz_ramp_along_x(grid);

        let mut plus = MicromagneticParams::default();
        plus.dmi = 1e-4;
        let mut minus = plus.clone();
        minus.dmi = -1e-4;

        let mut h_plus = VectorField2D::new(grid);
        h_plus.set_uniform(0.0, 0.0, 0.0);
        add_dmi_field(&grid, &m, &mut h_plus, &plus);

        let mut h_minus = VectorField2D::new(grid);
        h_minus.set_uniform(0.0, 0.0, 0.0);
        add_dmi_field(&grid, &m, &mut h_minus, &minus);

        let idx = grid.idx(8, 8);
        let hy_plus = h_plus.data[idx][1];
        let hy_minus = h_minus.data[idx][1];
        assert!(hy_plus.abs() > 0.0);
        assert!(
            (hy_plus + hy_minus).abs() < 1e-10 * hy_plus.abs().max(1.0),
            "H_y should flip sign with D: {hy_plus} vs {hy_minus}"
        );
    }
}
