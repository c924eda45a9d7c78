// src/scalar_field.rs
//
// Scalar per-cell quantities: the input data field, the modulated
// anisotropy map, and m_z slices.

use crate::error::{SimError, SimResult};
use crate::grid::Grid2D;
use crate::rng::XorShift64;

#[derive(Debug, Clone)]
pub struct ScalarField2D {
    pub grid: Grid2D,
    pub data: Vec<f64>,
}

impl ScalarField2D {
    /// All-zero field.
    pub fn new(grid: Grid2D) -> Self {
        Self {
            grid,
            data: vec![0.0; grid.n_cells()],
        }
    }

    /// Build from caller-supplied values. Length and finiteness are checked
    /// here; shape errors are hard errors, never silently reshaped.
    pub fn from_slice(grid: Grid2D, values: &[f64]) -> SimResult<Self> {
        let expected = grid.n_cells();
        if values.len() != expected {
            return Err(SimError::DataFieldShape {
                got: values.len(),
                expected,
                n: grid.n,
            });
        }
        if let Some(index) = values.iter().position(|v| !v.is_finite()) {
            return Err(SimError::DataFieldNotFinite { index });
        }
        Ok(Self {
            grid,
            data: values.to_vec(),
        })
    }

    #[inline]
    pub fn idx(&self, i: usize, j: usize) -> usize {
        self.grid.idx(i, j)
    }

    pub fn min(&self) -> f64 {
        self.data.iter().copied().fold(f64::INFINITY, f64::min)
    }

    pub fn max(&self) -> f64 {
        self.data.iter().copied().fold(f64::NEG_INFINITY, f64::max)
    }

    pub fn mean(&self) -> f64 {
        if self.data.is_empty() {
            return 0.0;
        }
        self.data.iter().sum::<f64>() / self.data.len() as f64
    }

    pub fn std(&self) -> f64 {
        if self.data.is_empty() {
            return 0.0;
        }
        let mean = self.mean();
        let var = self
            .data
            .iter()
            .map(|v| (v - mean) * (v - mean))
            .sum::<f64>()
            / self.data.len() as f64;
        var.sqrt()
    }

    /// Affinely rescale so min maps to -1 and max to +1.
    /// A field with zero dynamic range is left as-is.
    pub fn rescale_to_unit_range(&mut self) {
        let lo = self.min();
        let hi = self.max();
        if hi > lo {
            let inv = 1.0 / (hi - lo);
            for v in &mut self.data {
                *v = 2.0 * (*v - lo) * inv - 1.0;
            }
        }
    }

    /// Default data field: superposition of three Gaussian bumps on a
    /// coordinate grid spanning [-2, 2] x [-2, 2], rescaled to [-1, 1].
    pub fn sample_bumps(grid: Grid2D) -> Self {
        let mut field = Self::new(grid);
        let n = grid.n;
        let denom = (n.saturating_sub(1)).max(1) as f64;
        for j in 0..n {
            let y = -2.0 + 4.0 * j as f64 / denom;
            for i in 0..n {
                let x = -2.0 + 4.0 * i as f64 / denom;
                let b1 = (-((x - 0.5).powi(2) + (y - 0.5).powi(2)) / 0.2).exp();
                let b2 = (-((x + 0.5).powi(2) + (y + 0.5).powi(2)) / 0.2).exp();
                let b3 = 0.5 * (-(x.powi(2) + (y - 1.0).powi(2)) / 0.3).exp();
                field.data[grid.idx(i, j)] = b1 + b2 + b3;
            }
        }
        field.rescale_to_unit_range();
        field
    }
}

/// Synthetic manifold patterns for data-encoding experiments.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DataPattern {
    GaussianBumps,
    Sinusoid,
    Checkerboard,
    Random,
}

impl DataPattern {
    pub fn from_arg(s: &str) -> Option<Self> {
        match s {
            "bumps" | "gaussian" | "gaussian-bumps" => Some(Self::GaussianBumps),
            "sinusoid" | "sine" => Some(Self::Sinusoid),
            "checkerboard" | "checker" => Some(Self::Checkerboard),
            "random" => Some(Self::Random),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::GaussianBumps => "bumps",
            Self::Sinusoid => "sinusoid",
            Self::Checkerboard => "checkerboard",
            Self::Random => "random",
        }
    }

    /// Synthesize an N x N pattern on a [-3, 3] x [-3, 3] coordinate grid,
    /// rescaled to [-1, 1].
    pub fn synthesize(&self, grid: Grid2D, seed: u64) -> ScalarField2D {
        let mut field = ScalarField2D::new(grid);
        let n = grid.n;
        let denom = (n.saturating_sub(1)).max(1) as f64;
        let mut rng = XorShift64::new(seed);
        let two_pi = 2.0 * std::f64::consts::PI;
        let three_pi = 3.0 * std::f64::consts::PI;

        for j in 0..n {
            let y = -3.0 + 6.0 * j as f64 / denom;
            for i in 0..n {
                let x = -3.0 + 6.0 * i as f64 / denom;
                let value = match self {
                    Self::GaussianBumps => {
                        1.5 * (-((x - 1.0).powi(2) + (y - 1.0).powi(2)) / 0.3).exp()
                            + (-((x + 1.0).powi(2) + (y + 1.0).powi(2)) / 0.3).exp()
                            + 0.8 * (-(x.powi(2) + (y - 1.5).powi(2)) / 0.2).exp()
                    }
                    Self::Sinusoid => (two_pi * x / 3.0).sin() * (two_pi * y / 3.0).cos(),
                    Self::Checkerboard => ((three_pi * x).sin() * (three_pi * y).sin()).signum(),
                    Self::Random => rng.next_gaussian(),
                };
                field.data[grid.idx(i, j)] = value;
            }
        }
        field.rescale_to_unit_range();
        field
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rescale_maps_extremes_to_unit_range() {
        let grid = Grid2D::new(4, 1.0);
        let values: Vec<f64> = (0..16).map(|v| v as f64).collect();
        let mut field = ScalarField2D::from_slice(grid, &values).unwrap();
        field.rescale_to_unit_range();
        assert!((field.min() + 1.0).abs() < 1e-12);
        assert!((field.max() - 1.0).abs() < 1e-12);
    }

    #[test]
    fn constant_field_bypasses_rescale() {
        let grid = Grid2D::new(4, 1.0);
        let values = vec![0.7; 16];
        let mut field = ScalarField2D::from_slice(grid, &values).unwrap();
        field.rescale_to_unit_range();
        assert!(field.data.iter().all(|&v| (v - 0.7).abs() < 1e-15));
    }

    #[test]
    fn from_slice_rejects_wrong_shape_and_non_finite() {
        let grid = Grid2D::new(4, 1.0);
        assert!(ScalarField2D::from_slice(grid, &[0.0; 15]).is_err());

        let mut values = vec![0.0; 16];
        values[5] = f64::NAN;
        assert!(ScalarField2D::from_slice(grid, &values).is_err());
    }

    #[test]
    fn synthesized_patterns_span_unit_range() {
        let grid = Grid2D::new(32, 1.0);
        for pattern in [
            DataPattern::GaussianBumps,
            DataPattern::Sinusoid,
            DataPattern::Checkerboard,
            DataPattern::Random,
        ] {
            let field = pattern.synthesize(grid, 9);
            assert!((field.min() + 1.0).abs() < 1e-9, "{:?}", pattern);
            assert!((field.max() - 1.0).abs() < 1e-9, "{:?}", pattern);
        }
    }

    #[test]
    fn sample_bumps_is_deterministic_and_bounded() {
        let grid = Grid2D::new(16, 1.0);
        let a = ScalarField2D::sample_bumps(grid);
        let b = ScalarField2D::sample_bumps(grid);
        assert_eq!(a.data, b.data);
        assert!(a.data.iter().all(|v| (-1.0..=1.0).contains(v)));
    }
}
