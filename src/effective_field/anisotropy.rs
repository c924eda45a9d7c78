// src/effective_field/anisotropy.rs

use crate::scalar_field::ScalarField2D;
use crate::vector_field::VectorField2D;

/// Perpendicular anisotropy field, purely along z:
///
///   H_z(x, y) = -2 K_z(x, y) / M_s * m_z(x, y)
///
/// Uses the precomputed spatially modulated map — this is the channel
/// through which the input data pattern steers the relaxed texture.
pub fn add_anisotropy_field(
    m: &VectorField2D,
    h_eff: &mut VectorField2D,
    kz_map: &ScalarField2D,
    m_s: f64,
) {
    let inv_ms = 1.0 / m_s;
    for ((m_cell, h_cell), k) in m
        .data
        .iter()
        .zip(h_eff.data.iter_mut())
        .zip(kz_map.data.iter())
    {
        h_cell[2] += -2.0 * k * inv_ms * m_cell[2];
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::Grid2D;

    #[test]
    fn modulated_map_scales_the_field_per_cell() {
        let grid = Grid2D::new(2, 1e-9);
        let mut m = VectorField2D::new(grid);
        m.set_uniform(0.0, 0.0, 1.0);
        let mut h = VectorField2D::new(grid);
        h.set_uniform(0.0, 0.0, 0.0);

        let mut kz = ScalarField2D::new(grid);
        kz.data = vec![1.0e6, 0.5e6, 0.0, 2.0e6];
        let m_s = 4e5;

        add_anisotropy_field(&m, &mut h, &kz, m_s);

        for (h_cell, k) in h.data.iter().zip(kz.data.iter()) {
            let expected = -2.0 * k / m_s;
            assert!((h_cell[2] - expected).abs() < 1e-12 * expected.abs().max(1.0));
            assert_eq!(h_cell[0], 0.0);
            assert_eq!(h_cell[1], 0.0);
        }
    }
}
