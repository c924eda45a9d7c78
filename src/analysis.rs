// src/analysis.rs
//
// Post-hoc texture diagnostics: topological charge, reversed-core
// detection, data-encoding correlation, and orientation entropy. These
// read snapshots of the public state and never touch the dynamics.

use crate::scalar_field::ScalarField2D;
use crate::vec3::{cross, dot};
use crate::vector_field::VectorField2D;

/// Local topological charge density
///
///   q = m . (dm/dx x dm/dy) / 4 pi
///
/// with centered differences in index space under periodic wrap. One
/// skyrmion integrates to Q ~ +-1.
pub fn topological_charge_density(m: &VectorField2D) -> ScalarField2D {
    let grid = m.grid;
    let mut q = ScalarField2D::new(grid);
    let four_pi = 4.0 * std::f64::consts::PI;

    for j in 0..grid.n {
        for i in 0..grid.n {
            let idx = grid.idx(i, j);
            let left = grid.idx_wrapped(i as isize - 1, j as isize);
            let right = grid.idx_wrapped(i as isize + 1, j as isize);
            let down = grid.idx_wrapped(i as isize, j as isize - 1);
            let up = grid.idx_wrapped(i as isize, j as isize + 1);

            let mut dm_dx = [0.0; 3];
            let mut dm_dy = [0.0; 3];
            for c in 0..3 {
                dm_dx[c] = 0.5 * (m.data[right][c] - m.data[left][c]);
                dm_dy[c] = 0.5 * (m.data[up][c] - m.data[down][c]);
            }

            q.data[idx] = dot(m.data[idx], cross(dm_dx, dm_dy)) / four_pi;
        }
    }
    q
}

/// Total winding number of the texture.
pub fn total_topological_charge(m: &VectorField2D) -> f64 {
    topological_charge_density(m).data.iter().sum()
}

/// Statistics over connected reversed-core regions.
#[derive(Debug, Clone, Default)]
pub struct CoreStats {
    /// Number of connected components.
    pub component_count: usize,
    /// Total cells below the threshold.
    pub core_cells: usize,
    /// core_cells / total cells.
    pub density: f64,
    pub mean_size: f64,
    pub max_size: usize,
    pub min_size: usize,
    /// Center of mass of each component, in cell coordinates (i, j).
    pub centers: Vec<(f64, f64)>,
}

/// Detect skyrmion cores: connected components (4-connectivity) of cells
/// with m_z below `threshold` (reversed against a +z background).
///
/// Labeling does not wrap across the periodic seam; a core straddling the
/// boundary counts as two components, matching the reference tooling.
pub fn detect_cores(mz: &ScalarField2D, threshold: f64) -> CoreStats {
    let grid = mz.grid;
    let n = grid.n;
    let mask: Vec<bool> = mz.data.iter().map(|&v| v < threshold).collect();
    let core_cells = mask.iter().filter(|&&b| b).count();

    let mut visited = vec![false; mask.len()];
    let mut sizes: Vec<usize> = Vec::new();
    let mut centers: Vec<(f64, f64)> = Vec::new();
    let mut stack: Vec<(usize, usize)> = Vec::new();

    for j0 in 0..n {
        for i0 in 0..n {
            let start = grid.idx(i0, j0);
            if !mask[start] || visited[start] {
                continue;
            }

            let mut size = 0usize;
            let mut sum_i = 0.0;
            let mut sum_j = 0.0;
            visited[start] = true;
            stack.push((i0, j0));

            while let Some((i, j)) = stack.pop() {
                size += 1;
                sum_i += i as f64;
                sum_j += j as f64;

                if i > 0 {
                    let id = grid.idx(i - 1, j);
                    if mask[id] && !visited[id] {
                        visited[id] = true;
                        stack.push((i - 1, j));
                    }
                }
                if i + 1 < n {
                    let id = grid.idx(i + 1, j);
                    if mask[id] && !visited[id] {
                        visited[id] = true;
                        stack.push((i + 1, j));
                    }
                }
                if j > 0 {
                    let id = grid.idx(i, j - 1);
                    if mask[id] && !visited[id] {
                        visited[id] = true;
                        stack.push((i, j - 1));
                    }
                }
                if j + 1 < n {
                    let id = grid.idx(i, j + 1);
                    if mask[id] && !visited[id] {
                        visited[id] = true;
                        stack.push((i, j + 1));
                    }
                }
            }

            centers.push((sum_i / size as f64, sum_j / size as f64));
            sizes.push(size);
        }
    }

    let component_count = sizes.len();
    let (mean_size, max_size, min_size) = if component_count > 0 {
        let total: usize = sizes.iter().sum();
        (
            total as f64 / component_count as f64,
            *sizes.iter().max().unwrap(),
            *sizes.iter().min().unwrap(),
        )
    } else {
        (0.0, 0, 0)
    };

    CoreStats {
        component_count,
        core_cells,
        density: core_cells as f64 / grid.n_cells() as f64,
        mean_size,
        max_size,
        min_size,
        centers,
    }
}

/// Pearson correlation between two fields of equal shape. High correlation
/// between m_z and the input data field indicates successful encoding.
/// Returns 0 when either field has no variance.
pub fn manifold_correlation(a: &ScalarField2D, b: &ScalarField2D) -> f64 {
    assert_eq!(a.data.len(), b.data.len(), "field shapes must match");
    let n = a.data.len() as f64;
    if n == 0.0 {
        return 0.0;
    }

    let mean_a = a.mean();
    let mean_b = b.mean();
    let mut cov = 0.0;
    let mut var_a = 0.0;
    let mut var_b = 0.0;
    for (&x, &y) in a.data.iter().zip(b.data.iter()) {
        let da = x - mean_a;
        let db = y - mean_b;
        cov += da * db;
        var_a += da * da;
        var_b += db * db;
    }

    let denom = (var_a * var_b).sqrt();
    if denom < 1e-300 {
        return 0.0;
    }
    cov / denom
}

/// Shannon entropy (bits) of the spin orientation distribution: 16-bin
/// histograms of the polar and azimuthal angles, summed. Lower entropy
/// means a more ordered texture.
pub fn spin_texture_entropy(m: &VectorField2D) -> f64 {
    const N_BINS: usize = 16;
    let pi = std::f64::consts::PI;

    let mut hist_theta = [0usize; N_BINS];
    let mut hist_phi = [0usize; N_BINS];

    for v in &m.data {
        let in_plane = (v[0] * v[0] + v[1] * v[1]).sqrt();
        let theta = in_plane.atan2(v[2]);
        let phi = v[1].atan2(v[0]);

        let bin = |angle: f64| -> usize {
            let t = (angle + pi) / (2.0 * pi);
            ((t * N_BINS as f64) as usize).min(N_BINS - 1)
        };
        hist_theta[bin(theta)] += 1;
        hist_phi[bin(phi)] += 1;
    }

    let total = m.data.len() as f64;
    let entropy_of = |hist: &[usize; N_BINS]| -> f64 {
        hist.iter()
            .filter(|&&c| c > 0)
            .map(|&c| {
                let p = c as f64 / total;
                -p * p.log2()
            })
            .sum::<f64>()
    };

    entropy_of(&hist_theta) + entropy_of(&hist_phi)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::Grid2D;
    use crate::initial_states::{init_skyrmion, init_uniform};

    #[test]
    fn uniform_texture_carries_no_charge() {
        let grid = Grid2D::new(32, 1e-9);
        let mut m = VectorField2D::new(grid);
        init_uniform(&mut m, [0.0, 0.0, 1.0]);
        assert!(total_topological_charge(&m).abs() < 1e-12);
    }

    #[test]
    fn single_skyrmion_has_unit_winding_number() {
        let grid = Grid2D::new(64, 1e-9);
        let mut m = VectorField2D::new(grid);
        let r0 = 8.0 * grid.dx;
        init_skyrmion(&mut m, &grid, (0.0, 0.0), r0, 3.0 * grid.dx, 0.0, 1.0);

        let q = total_topological_charge(&m);
        assert!(
            (q.abs() - 1.0).abs() < 0.1,
            "expected |Q| ~ 1 for one skyrmion, got {q}"
        );
    }

    #[test]
    fn detect_cores_finds_separated_blocks() {
        let grid = Grid2D::new(16, 1e-9);
        let mut mz = ScalarField2D::new(grid);
        mz.data.fill(1.0);
        // Two disjoint 2x2 reversed blocks.
        for (i, j) in [(2, 2), (3, 2), (2, 3), (3, 3)] {
            mz.data[grid.idx(i, j)] = -1.0;
        }
        for (i, j) in [(10, 10), (11, 10), (10, 11), (11, 11)] {
            mz.data[grid.idx(i, j)] = -1.0;
        }

        let stats = detect_cores(&mz, -0.3);
        assert_eq!(stats.component_count, 2);
        assert_eq!(stats.core_cells, 8);
        assert_eq!(stats.max_size, 4);
        assert_eq!(stats.min_size, 4);
        assert!((stats.density - 8.0 / 256.0).abs() < 1e-12);
        assert!((stats.centers[0].0 - 2.5).abs() < 1e-12);
        assert!((stats.centers[0].1 - 2.5).abs() < 1e-12);
    }

    #[test]
    fn correlation_of_a_field_with_itself_is_one() {
        let grid = Grid2D::new(8, 1.0);
        let mut a = ScalarField2D::new(grid);
        for (k, v) in a.data.iter_mut().enumerate() {
            *v = (k as f64 * 0.7).sin();
        }
        assert!((manifold_correlation(&a, &a) - 1.0).abs() < 1e-12);

        let mut neg = a.clone();
        for v in &mut neg.data {
            *v = -*v;
        }
        assert!((manifold_correlation(&a, &neg) + 1.0).abs() < 1e-12);
    }

    #[test]
    fn constant_fields_have_zero_correlation() {
        let grid = Grid2D::new(4, 1.0);
        let a = ScalarField2D::new(grid);
        let b = ScalarField2D::new(grid);
        assert_eq!(manifold_correlation(&a, &b), 0.0);
    }

    #[test]
    fn ordered_texture_has_lower_entropy_than_disordered() {
        let grid = Grid2D::new(32, 1e-9);
        let mut uniform = VectorField2D::new(grid);
        init_uniform(&mut uniform, [0.0, 0.0, 1.0]);

        let mut noisy = VectorField2D::new(grid);
        crate::initial_states::init_noisy_out_of_plane(&mut noisy, 0.0, 1.0, 5);

        assert!(spin_texture_entropy(&uniform) < spin_texture_entropy(&noisy));
    }
}
