// src/params.rs
//
// Physical and numerical parameters for the chiral thin-film solver.
//
// Unit conventions:
// - a_ex (A)   : J/m      (exchange stiffness)
// - dmi (D)    : J/m^2    (interfacial DMI constant, signed)
// - k_z        : J/m^3    (perpendicular anisotropy)
// - b_z        : Tesla    (external out-of-plane field, signed)
// - m_s        : A/m      (saturation magnetization)
// - cell_size, thickness : nm (converted to metres at construction)
// - dt         : seconds

use serde::{Deserialize, Serialize};

use crate::error::{SimError, SimResult};

/// Vacuum permeability (SI). Field and energy code must share this constant.
pub const MU0: f64 = 4.0e-7 * std::f64::consts::PI;

/// Gyromagnetic prefactor of the LLG right-hand side.
///
/// NOT the physical electron gyromagnetic ratio (1.76e11 rad/(s*T)): the
/// dynamics are non-dimensionalised for numerical stability, and this
/// constant sets the integration rate of the scaled equation.
pub const GAMMA_LLG: f64 = 1.0e4;

/// Immutable parameter bundle. Construct, validate, hand to `Simulator::new`.
/// "Updating" a parameter means building a new bundle and a new simulator.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MicromagneticParams {
    /// Exchange stiffness A (J/m).
    pub a_ex: f64,
    /// DMI constant D (J/m^2). Sign selects the chirality.
    pub dmi: f64,
    /// Perpendicular anisotropy K_z (J/m^3), base value before modulation.
    pub k_z: f64,
    /// Anisotropy modulation strength (dimensionless, typically 0..0.5).
    pub eps_k: f64,
    /// External field B_z (Tesla).
    pub b_z: f64,
    /// Gilbert damping.
    pub alpha: f64,
    /// Saturation magnetization M_s (A/m).
    pub m_s: f64,

    /// Cells per side of the square grid.
    pub grid_size: usize,
    /// Cell edge length (nm).
    pub cell_size: f64,
    /// Film thickness (nm).
    pub thickness: f64,

    /// Time step (s). Too large a value diverges at run time; that is
    /// handled by the stability policy, not by validation.
    pub dt: f64,
    /// Default step budget for bulk runs.
    pub num_steps: usize,
    /// History recording cadence (steps per sample).
    pub save_interval: usize,

    /// Out-of-plane bias of the initial state.
    pub init_bias: f64,
    /// Standard deviation of the per-cell Gaussian seed noise.
    pub init_noise: f64,
    /// Seed for the deterministic RNG used at initialization.
    pub seed: u64,
}

impl Default for MicromagneticParams {
    fn default() -> Self {
        Self {
            a_ex: 15e-12,
            dmi: 4e-3,
            k_z: 0.8e6,
            eps_k: 0.2,
            b_z: 0.010,
            alpha: 0.3,
            m_s: 4e5,
            grid_size: 256,
            cell_size: 1.0,
            thickness: 10.0,
            dt: 1e-12,
            num_steps: 50_000,
            save_interval: 1000,
            init_bias: 0.9,
            init_noise: 0.18,
            seed: 1,
        }
    }
}

impl MicromagneticParams {
    /// Cell edge length in metres.
    pub fn cell_size_m(&self) -> f64 {
        self.cell_size * 1e-9
    }

    /// Film thickness in metres.
    pub fn thickness_m(&self) -> f64 {
        self.thickness * 1e-9
    }

    /// Fail fast on nonsensical geometry or material constants.
    pub fn validate(&self) -> SimResult<()> {
        if self.grid_size == 0 {
            return Err(SimError::Config("grid_size must be positive".into()));
        }
        if !(self.m_s > 0.0) {
            return Err(SimError::Config(format!(
                "saturation magnetization must be positive, got {}",
                self.m_s
            )));
        }
        if !(self.cell_size > 0.0) {
            return Err(SimError::Config(format!(
                "cell_size must be positive, got {} nm",
                self.cell_size
            )));
        }
        if !(self.thickness > 0.0) {
            return Err(SimError::Config(format!(
                "thickness must be positive, got {} nm",
                self.thickness
            )));
        }
        if !(self.dt > 0.0) {
            return Err(SimError::Config(format!(
                "dt must be positive, got {}",
                self.dt
            )));
        }
        if self.save_interval == 0 {
            return Err(SimError::Config("save_interval must be positive".into()));
        }
        let finite = [
            ("a_ex", self.a_ex),
            ("dmi", self.dmi),
            ("k_z", self.k_z),
            ("eps_k", self.eps_k),
            ("b_z", self.b_z),
            ("alpha", self.alpha),
            ("m_s", self.m_s),
            ("dt", self.dt),
            ("init_bias", self.init_bias),
            ("init_noise", self.init_noise),
        ];
        for (name, value) in finite {
            if !value.is_finite() {
                return Err(SimError::Config(format!("{name} must be finite, got {value}")));
            }
        }
        Ok(())
    }
}

/// Pre-configured parameter sets for common scenarios.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Preset {
    /// 64^2, short run; rapid parameter exploration.
    QuickTest,
    /// 128^2; balanced for skyrmion formation.
    Standard,
    /// 256^2; detailed data encoding.
    HighResolution,
    /// 512^2; research-grade resolution.
    UltraHighRes,
    /// Stronger DMI/anisotropy, more negative field, no modulation.
    SkyrmionCreation,
    /// Moderate modulation, tuned for manifold encoding.
    DataEncoding,
    /// High damping for quick convergence.
    FastRelaxation,
    /// Weak field, stronger anisotropy; stable skyrmion phases.
    StableLowField,
    /// Strong DMI for robust nucleation.
    StrongDmi,
}

impl Preset {
    pub fn from_arg(s: &str) -> Option<Self> {
        match s {
            "quick" | "quicktest" => Some(Self::QuickTest),
            "standard" => Some(Self::Standard),
            "highres" | "high-resolution" => Some(Self::HighResolution),
            "ultra" | "ultrahighres" => Some(Self::UltraHighRes),
            "creation" | "skyrmion-creation" => Some(Self::SkyrmionCreation),
            "encoding" | "data-encoding" => Some(Self::DataEncoding),
            "fast" | "fast-relaxation" => Some(Self::FastRelaxation),
            "lowfield" | "stable-low-field" => Some(Self::StableLowField),
            "strongdmi" | "strong-dmi" => Some(Self::StrongDmi),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::QuickTest => "quick",
            Self::Standard => "standard",
            Self::HighResolution => "highres",
            Self::UltraHighRes => "ultra",
            Self::SkyrmionCreation => "creation",
            Self::DataEncoding => "encoding",
            Self::FastRelaxation => "fast",
            Self::StableLowField => "lowfield",
            Self::StrongDmi => "strongdmi",
        }
    }

    /// Materialize the preset as a full parameter bundle.
    pub fn params(&self) -> MicromagneticParams {
        let base = MicromagneticParams::default();
        match self {
            Self::QuickTest => MicromagneticParams {
                grid_size: 64,
                dt: 1e-12,
                num_steps: 5_000,
                save_interval: 100,
                b_z: -0.01,
                ..base
            },
            Self::Standard => MicromagneticParams {
                grid_size: 128,
                dt: 1e-12,
                num_steps: 15_000,
                save_interval: 250,
                b_z: -0.01,
                ..base
            },
            Self::HighResolution => MicromagneticParams {
                grid_size: 256,
                dt: 5e-13,
                num_steps: 30_000,
                save_interval: 500,
                b_z: -0.01,
                ..base
            },
            Self::UltraHighRes => MicromagneticParams {
                grid_size: 512,
                dt: 2e-13,
                num_steps: 50_000,
                save_interval: 1000,
                b_z: -0.01,
                ..base
            },
            Self::SkyrmionCreation => MicromagneticParams {
                grid_size: 128,
                dt: 1e-12,
                num_steps: 20_000,
                save_interval: 200,
                dmi: 5e-3,
                k_z: 1.0e6,
                b_z: -0.02,
                alpha: 0.4,
                eps_k: 0.0,
                ..base
            },
            Self::DataEncoding => MicromagneticParams {
                grid_size: 256,
                dt: 5e-13,
                num_steps: 25_000,
                save_interval: 250,
                b_z: -0.015,
                eps_k: 0.25,
                ..base
            },
            Self::FastRelaxation => MicromagneticParams {
                grid_size: 64,
                dt: 2e-12,
                num_steps: 10_000,
                save_interval: 200,
                b_z: -0.01,
                alpha: 0.6,
                ..base
            },
            Self::StableLowField => MicromagneticParams {
                grid_size: 128,
                dt: 5e-13,
                num_steps: 40_000,
                save_interval: 400,
                dmi: 3e-3,
                k_z: 1.2e6,
                b_z: -0.005,
                alpha: 0.25,
                ..base
            },
            Self::StrongDmi => MicromagneticParams {
                grid_size: 128,
                dt: 1e-12,
                num_steps: 15_000,
                save_interval: 250,
                dmi: 6e-3,
                b_z: -0.01,
                ..base
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_params_are_valid() {
        assert!(MicromagneticParams::default().validate().is_ok());
    }

    #[test]
    fn validation_rejects_bad_geometry_and_material() {
        let mut p = MicromagneticParams::default();
        p.grid_size = 0;
        assert!(p.validate().is_err());

        let mut p = MicromagneticParams::default();
        p.m_s = -1.0;
        assert!(p.validate().is_err());

        let mut p = MicromagneticParams::default();
        p.dt = 0.0;
        assert!(p.validate().is_err());

        let mut p = MicromagneticParams::default();
        p.a_ex = f64::NAN;
        assert!(p.validate().is_err());
    }

    #[test]
    fn huge_dt_is_not_a_construction_error() {
        // Stability is a runtime concern; validation only rejects nonsense.
        let mut p = MicromagneticParams::default();
        p.dt = 1e300;
        assert!(p.validate().is_ok());
    }

    #[test]
    fn preset_args_round_trip() {
        for preset in [
            Preset::QuickTest,
            Preset::Standard,
            Preset::HighResolution,
            Preset::UltraHighRes,
            Preset::SkyrmionCreation,
            Preset::DataEncoding,
            Preset::FastRelaxation,
            Preset::StableLowField,
            Preset::StrongDmi,
        ] {
            assert_eq!(Preset::from_arg(preset.as_str()), Some(preset));
            assert!(preset.params().validate().is_ok());
        }
    }

    #[test]
    fn unit_conversions_are_nm_to_m() {
        let p = MicromagneticParams::default();
        assert!((p.cell_size_m() - 1e-9).abs() < 1e-24);
        assert!((p.thickness_m() - 10e-9).abs() < 1e-23);
    }
}
