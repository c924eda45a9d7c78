// src/simulator.rs
//
// The simulation state and its driver: construction from a parameter
// bundle and an optional data field, single-step advance, and the bulk
// run loop with divergence control.

use crate::effective_field::build_h_eff;
use crate::energy;
use crate::energy::EnergyBreakdown;
use crate::error::SimResult;
use crate::grid::Grid2D;
use crate::initial_states::init_noisy_out_of_plane;
use crate::llg::{midpoint_estimate, step_with_field, step_with_midpoint_field, Scheme};
use crate::params::MicromagneticParams;
use crate::scalar_field::ScalarField2D;
use crate::stability::{StabilityAction, StabilityControl, StabilitySettings};
use crate::vec3::renormalize;
use crate::vector_field::VectorField2D;

/// Why a bulk run ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunStopReason {
    /// The full step budget was consumed.
    Completed,
    /// Non-finite energy persisted past the recovery bound.
    Diverged,
}

/// Outcome of a bulk run. Histories collected before an early stop remain
/// on the simulator and are never discarded.
#[derive(Debug, Clone)]
pub struct RunReport {
    pub steps_completed: usize,
    pub stop_reason: RunStopReason,
    pub final_energy: Option<f64>,
    pub final_dt: f64,
}

pub struct Simulator {
    params: MicromagneticParams,
    grid: Grid2D,
    m: VectorField2D,
    data_field: ScalarField2D,
    kz_map: ScalarField2D,
    energy_history: Vec<f64>,
    mz_history: Vec<ScalarField2D>,
    step_count: usize,
    /// Live time step. Starts at `params.dt`; only the stability policy
    /// shrinks it. The parameter bundle itself is never mutated.
    dt: f64,
    h_eff: VectorField2D,
    m_mid: VectorField2D,
    h_mid: VectorField2D,
}

impl Simulator {
    /// Build an initialized state: validated parameters, noisy
    /// out-of-plane magnetization, normalized data field, and the derived
    /// anisotropy map.
    ///
    /// `data_field` must hold exactly grid_size^2 finite values in row-major
    /// order; it is affinely rescaled so its extremes map to -1/+1 (constant
    /// input is copied as-is). When absent, a sample pattern of Gaussian
    /// bumps is synthesized.
    pub fn new(params: MicromagneticParams, data_field: Option<&[f64]>) -> SimResult<Self> {
        params.validate()?;

        let grid = Grid2D::new(params.grid_size, params.cell_size_m());

        let mut m = VectorField2D::new(grid);
        init_noisy_out_of_plane(&mut m, params.init_bias, params.init_noise, params.seed);

        let data_field = match data_field {
            Some(values) => {
                let mut field = ScalarField2D::from_slice(grid, values)?;
                field.rescale_to_unit_range();
                field
            }
            None => ScalarField2D::sample_bumps(grid),
        };

        // K_z(x, y) = K_z * (1 + eps_K * D(x, y)), built once.
        let mut kz_map = ScalarField2D::new(grid);
        for (k, d) in kz_map.data.iter_mut().zip(data_field.data.iter()) {
            *k = params.k_z * (1.0 + params.eps_k * d);
        }

        let dt = params.dt;
        Ok(Self {
            params,
            grid,
            m,
            data_field,
            kz_map,
            energy_history: Vec::new(),
            mz_history: Vec::new(),
            step_count: 0,
            dt,
            h_eff: VectorField2D::new(grid),
            m_mid: VectorField2D::new(grid),
            h_mid: VectorField2D::new(grid),
        })
    }

    /// Replace the magnetization with a uniform (normalized) direction.
    /// Narrow re-initialization hook; intended before stepping begins.
    pub fn set_uniform_magnetization(&mut self, dir: [f64; 3]) {
        let v = renormalize(dir);
        self.m.set_uniform(v[0], v[1], v[2]);
    }

    /// Advance by one time step and maintain the invariants: renormalized
    /// magnetization, history samples every `save_interval` steps
    /// (including step 0), monotone step counter.
    pub fn step(&mut self, scheme: Scheme) {
        build_h_eff(&self.grid, &self.m, &mut self.h_eff, &self.params, &self.kz_map);

        match scheme {
            Scheme::Euler => {
                step_with_field(&mut self.m, &self.h_eff, self.dt, self.params.alpha);
            }
            Scheme::Midpoint => {
                midpoint_estimate(
                    &mut self.m_mid,
                    &self.m,
                    &self.h_eff,
                    self.dt,
                    self.params.alpha,
                );
                // The corrector needs the field at the midpoint state, not
                // the original one: second field build per step.
                build_h_eff(
                    &self.grid,
                    &self.m_mid,
                    &mut self.h_mid,
                    &self.params,
                    &self.kz_map,
                );
                step_with_midpoint_field(
                    &mut self.m,
                    &self.m_mid,
                    &self.h_mid,
                    self.dt,
                    self.params.alpha,
                );
            }
        }

        if self.step_count % self.params.save_interval == 0 {
            self.energy_history.push(self.energy_density());
            self.mz_history.push(self.m_z());
        }
        self.step_count += 1;
    }

    /// Repeat Euler steps with the divergence-control policy, reporting
    /// progress at a coarse cadence (about 20 lines over the run).
    ///
    /// A run that diverges beyond recovery stops early with a reported
    /// reason; everything recorded so far stays readable on the simulator.
    pub fn run(&mut self, num_steps: usize, verbose: bool) -> RunReport {
        let mut control = StabilityControl::new(StabilitySettings::default());
        let print_every = (num_steps / 20).max(1);
        let mut completed = 0usize;

        for step_idx in 0..num_steps {
            self.step(Scheme::Euler);
            completed += 1;

            let current = self.energy_history.last().copied().unwrap_or(0.0);
            match control.assess(current) {
                StabilityAction::Fatal => {
                    self.dt *= control.settings().halve_factor;
                    eprintln!(
                        "simulation diverged beyond recovery at step {}; stopping",
                        step_idx
                    );
                    return RunReport {
                        steps_completed: completed,
                        stop_reason: RunStopReason::Diverged,
                        final_energy: self.energy_history.last().copied(),
                        final_dt: self.dt,
                    };
                }
                StabilityAction::Halve => {
                    self.dt *= control.settings().halve_factor;
                    eprintln!(
                        "warning: non-finite energy at step {}; reducing dt to {:.3e}",
                        step_idx, self.dt
                    );
                    continue;
                }
                StabilityAction::Shrink => {
                    self.dt *= control.settings().shrink_factor;
                }
                StabilityAction::Stable => {}
            }

            if verbose && (step_idx + 1) % print_every == 0 {
                println!(
                    "step {:6}/{}, energy {:.6e} J/m^2 (dt = {:.3e})",
                    step_idx + 1,
                    num_steps,
                    current,
                    self.dt
                );
            }
        }

        RunReport {
            steps_completed: completed,
            stop_reason: RunStopReason::Completed,
            final_energy: self.energy_history.last().copied(),
            final_dt: self.dt,
        }
    }

    /// Current energy terms (J). Pure function of the state.
    pub fn energy_breakdown(&self) -> EnergyBreakdown {
        energy::compute_energy(&self.grid, &self.m, &self.kz_map, &self.params)
    }

    /// Current scalar energy density (J/m^2). Pure function of the state.
    pub fn energy_density(&self) -> f64 {
        energy::energy_density(&self.grid, &self.m, &self.kz_map, &self.params)
    }

    // ---- read accessors (copies where callers could otherwise alias the
    // live arrays) ----

    /// Copy of the full magnetization field.
    pub fn magnetization(&self) -> VectorField2D {
        self.m.clone()
    }

    /// Copy of the out-of-plane component.
    pub fn m_z(&self) -> ScalarField2D {
        ScalarField2D {
            grid: self.grid,
            data: self.m.data.iter().map(|v| v[2]).collect(),
        }
    }

    pub fn energy_history(&self) -> &[f64] {
        &self.energy_history
    }

    pub fn mz_history(&self) -> &[ScalarField2D] {
        &self.mz_history
    }

    pub fn data_field(&self) -> &ScalarField2D {
        &self.data_field
    }

    pub fn kz_map(&self) -> &ScalarField2D {
        &self.kz_map
    }

    pub fn params(&self) -> &MicromagneticParams {
        &self.params
    }

    pub fn grid(&self) -> Grid2D {
        self.grid
    }

    pub fn step_count(&self) -> usize {
        self.step_count
    }

    pub fn current_dt(&self) -> f64 {
        self.dt
    }
}
