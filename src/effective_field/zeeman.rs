// src/effective_field/zeeman.rs

use crate::params::MU0;
use crate::vector_field::VectorField2D;

/// Uniform external field along z: H_z = B_z / mu0 at every cell.
pub fn add_zeeman_field(h_eff: &mut VectorField2D, b_z: f64) {
    if b_z == 0.0 {
        return;
    }
    let h_z = b_z / MU0;
    for cell in &mut h_eff.data {
        cell[2] += h_z;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::Grid2D;

    #[test]
    fn zeeman_field_is_uniform_along_z() {
        let grid = Grid2D::new(4, 1e-9);
        let mut h = VectorField2D::new(grid);
        h.set_uniform(0.0, 0.0, 0.0);
        add_zeeman_field(&mut h, 0.01);
        let expected = 0.01 / MU0;
        for cell in &h.data {
            assert_eq!(cell[0], 0.0);
            assert_eq!(cell[1], 0.0);
            assert!((cell[2] - expected).abs() < 1e-9);
        }
    }
}
