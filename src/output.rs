// src/output.rs
//
// Persisted run artifacts, consumed by external tooling: grid CSVs for the
// magnetization and scalar maps, the energy time series, and the parameter
// bundle as a flat JSON object.

use std::fs::{create_dir_all, File};
use std::io::{BufWriter, Write};
use std::path::Path;

use crate::scalar_field::ScalarField2D;
use crate::simulator::Simulator;
use crate::vector_field::VectorField2D;

/// Write a scalar grid as CSV, one grid row per line.
pub fn write_scalar_csv(path: &Path, field: &ScalarField2D) -> std::io::Result<()> {
    let file = File::create(path)?;
    let mut w = BufWriter::new(file);
    let n = field.grid.n;
    for j in 0..n {
        for i in 0..n {
            if i > 0 {
                write!(w, ",")?;
            }
            write!(w, "{:.16e}", field.data[field.idx(i, j)])?;
        }
        writeln!(w)?;
    }
    Ok(())
}

/// Write the full magnetization as long-form CSV: i,j,mx,my,mz.
pub fn write_magnetization_csv(path: &Path, m: &VectorField2D) -> std::io::Result<()> {
    let file = File::create(path)?;
    let mut w = BufWriter::new(file);
    writeln!(w, "i,j,mx,my,mz")?;
    let n = m.grid.n;
    for j in 0..n {
        for i in 0..n {
            let v = m.data[m.idx(i, j)];
            writeln!(w, "{},{},{:.16e},{:.16e},{:.16e}", i, j, v[0], v[1], v[2])?;
        }
    }
    Ok(())
}

/// Write the recorded energy samples: step,energy.
pub fn write_energy_history_csv(
    path: &Path,
    energies: &[f64],
    save_interval: usize,
) -> std::io::Result<()> {
    let file = File::create(path)?;
    let mut w = BufWriter::new(file);
    writeln!(w, "step,energy_density")?;
    for (k, e) in energies.iter().enumerate() {
        writeln!(w, "{},{:.16e}", k * save_interval, e)?;
    }
    Ok(())
}

/// Save the complete result set for a simulator into `out_dir`:
///
///   magnetization.csv   full field (i,j,mx,my,mz)
///   m_z.csv             out-of-plane slice, grid layout
///   data_field.csv      normalized input pattern
///   kz_map.csv          modulated anisotropy map
///   energy_history.csv  recorded samples
///   parameters.json     flat parameter bundle
pub fn save_results(sim: &Simulator, out_dir: &Path) -> std::io::Result<()> {
    create_dir_all(out_dir)?;

    write_magnetization_csv(&out_dir.join("magnetization.csv"), &sim.magnetization())?;
    write_scalar_csv(&out_dir.join("m_z.csv"), &sim.m_z())?;
    write_scalar_csv(&out_dir.join("data_field.csv"), sim.data_field())?;
    write_scalar_csv(&out_dir.join("kz_map.csv"), sim.kz_map())?;
    write_energy_history_csv(
        &out_dir.join("energy_history.csv"),
        sim.energy_history(),
        sim.params().save_interval,
    )?;

    let file = File::create(out_dir.join("parameters.json"))?;
    serde_json::to_writer_pretty(file, sim.params())?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::params::MicromagneticParams;

    #[test]
    fn save_results_writes_all_artifacts() {
        let params = MicromagneticParams {
            grid_size: 8,
            save_interval: 1,
            ..MicromagneticParams::default()
        };
        let mut sim = Simulator::new(params, None).unwrap();
        for _ in 0..3 {
            sim.step(crate::llg::Scheme::Euler);
        }

        let dir = std::env::temp_dir().join("skyrmion_sim_output_test");
        save_results(&sim, &dir).unwrap();

        for name in [
            "magnetization.csv",
            "m_z.csv",
            "data_field.csv",
            "kz_map.csv",
            "energy_history.csv",
            "parameters.json",
        ] {
            assert!(dir.join(name).exists(), "missing artifact {name}");
        }

        let json = std::fs::read_to_string(dir.join("parameters.json")).unwrap();
        let parsed: MicromagneticParams = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.grid_size, 8);

        std::fs::remove_dir_all(&dir).ok();
    }
}
