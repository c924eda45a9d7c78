// src/effective_field/mod.rs
//
// Assembly of the total effective field H_eff (A/m) driving the LLG
// dynamics: exchange + DMI + modulated anisotropy + Zeeman, all under
// periodic boundary conditions.

pub mod anisotropy;
pub mod dmi;
pub mod exchange;
pub mod zeeman;

use crate::grid::Grid2D;
use crate::params::MicromagneticParams;
use crate::scalar_field::ScalarField2D;
use crate::vector_field::VectorField2D;

/// Build the total effective field into a caller-provided scratch buffer.
pub fn build_h_eff(
    grid: &Grid2D,
    m: &VectorField2D,
    h_eff: &mut VectorField2D,
    params: &MicromagneticParams,
    kz_map: &ScalarField2D,
) {
    h_eff.set_uniform(0.0, 0.0, 0.0);

    exchange::add_exchange_field(grid, m, h_eff, params);
    dmi::add_dmi_field(grid, m, h_eff, params);
    anisotropy::add_anisotropy_field(m, h_eff, kz_map, params.m_s);
    zeeman::add_zeeman_field(h_eff, params.b_z);
}
