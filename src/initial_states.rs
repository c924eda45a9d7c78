// src/initial_states.rs
//
// Initial magnetization (seed) generators for 2D thin-film problems.
//
// Coordinate system: centered cell centers, (0, 0) at the grid center,
// positions in metres.

use crate::grid::Grid2D;
use crate::rng::XorShift64;
use crate::vec3::renormalize;
use crate::vector_field::VectorField2D;

/// Cell-center coordinates in centered metres.
#[inline]
fn cell_center_xy(grid: &Grid2D, i: usize, j: usize) -> (f64, f64) {
    let half = 0.5 * grid.n as f64 * grid.dx;
    let x = (i as f64 + 0.5) * grid.dx - half;
    let y = (j as f64 + 0.5) * grid.dx - half;
    (x, y)
}

/// Set a uniform direction (normalized).
pub fn init_uniform(m: &mut VectorField2D, dir: [f64; 3]) {
    let v = renormalize(dir);
    m.set_uniform(v[0], v[1], v[2]);
}

/// Noisy near-uniform out-of-plane seed: z biased by `bias`, all three
/// components perturbed by independent Gaussians of width `noise`.
///
/// The bias keeps the background aligned with the field while the noise
/// gives the DMI term enough gradient to nucleate reversed cores.
pub fn init_noisy_out_of_plane(m: &mut VectorField2D, bias: f64, noise: f64, seed: u64) {
    let mut rng = XorShift64::new(seed);
    for v in &mut m.data {
        *v = [
            noise * rng.next_gaussian(),
            noise * rng.next_gaussian(),
            bias + noise * rng.next_gaussian(),
        ];
    }
    m.renormalize_all();
}

/// Seed a single skyrmion profile:
///
///   θ(r) = 2 atan( exp( (r0 - r)/Δ ) )
///   m_z  = -p cosθ
///   m_xy = sinθ (cos φ, sin φ),  φ = atan2(y, x) + helicity
///
/// `core_polarity` p is the sign of m_z at the core; the far field carries
/// -p. `helicity` 0 gives a Néel (radial) texture, π/2 a Bloch
/// (tangential) one.
pub fn init_skyrmion(
    m: &mut VectorField2D,
    grid: &Grid2D,
    center: (f64, f64),
    r0: f64,
    delta: f64,
    helicity: f64,
    core_polarity: f64,
) {
    let (cx, cy) = center;
    let p = core_polarity.signum();
    let inv_delta = 1.0 / delta.max(1e-30);

    for j in 0..grid.n {
        for i in 0..grid.n {
            let id = grid.idx(i, j);
            let (x, y) = cell_center_xy(grid, i, j);
            let dx = x - cx;
            let dy = y - cy;
            let r = (dx * dx + dy * dy).sqrt();

            let theta = 2.0 * (((r0 - r) * inv_delta).exp()).atan();
            let ct = theta.cos();
            let st = theta.sin();

            let phi = dy.atan2(dx) + helicity;
            m.data[id] = renormalize([st * phi.cos(), st * phi.sin(), -p * ct]);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::vec3::dot;

    #[test]
    fn noisy_seed_is_unit_length_and_biased_up() {
        let grid = Grid2D::new(32, 1e-9);
        let mut m = VectorField2D::new(grid);
        init_noisy_out_of_plane(&mut m, 0.9, 0.18, 3);

        let mut mz_sum = 0.0;
        for v in &m.data {
            let norm = dot(*v, *v).sqrt();
            assert!((norm - 1.0).abs() < 1e-12, "norm {norm}");
            mz_sum += v[2];
        }
        let mz_avg = mz_sum / m.data.len() as f64;
        assert!(mz_avg > 0.7, "expected strong +z bias, got {mz_avg}");
    }

    #[test]
    fn noisy_seed_is_deterministic_in_the_seed() {
        let grid = Grid2D::new(8, 1e-9);
        let mut a = VectorField2D::new(grid);
        let mut b = VectorField2D::new(grid);
        init_noisy_out_of_plane(&mut a, 0.9, 0.18, 11);
        init_noisy_out_of_plane(&mut b, 0.9, 0.18, 11);
        assert_eq!(a.data, b.data);
    }

    #[test]
    fn skyrmion_seed_has_reversed_core() {
        let grid = Grid2D::new(64, 1e-9);
        let mut m = VectorField2D::new(grid);
        let r0 = 10.0 * grid.dx;
        init_skyrmion(&mut m, &grid, (0.0, 0.0), r0, 3.0 * grid.dx, 0.0, -1.0);

        // Core (r ~ 0): m_z ≈ -1. Far field: m_z ≈ +1.
        let core = m.data[m.idx(32, 32)];
        let edge = m.data[m.idx(0, 0)];
        assert!(core[2] < -0.9, "core m_z = {}", core[2]);
        assert!(edge[2] > 0.9, "edge m_z = {}", edge[2]);
    }
}
