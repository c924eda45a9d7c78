// src/main.rs
//
// Exploratory CLI driver for the skyrmion thin-film solver: pick a preset
// and a data pattern, run the relaxation with divergence control, then
// write analysis numbers, CSV/JSON artifacts and PNG plots to a run
// directory.
//
// Examples:
//
//   cargo run --release -- preset=quick pattern=bumps
//       -> fast 64x64 exploration run with the default Gaussian manifold.
//
//   cargo run --release -- preset=encoding pattern=checkerboard steps=10000
//       -> data-encoding parameters against a checkerboard pattern,
//          overriding the step budget.
//
// Typical outputs (per run directory):
//   runs/<run_id>/
//     ├── parameters.json
//     ├── magnetization.csv
//     ├── m_z.csv
//     ├── data_field.csv
//     ├── kz_map.csv
//     ├── energy_history.csv
//     ├── m_z.png
//     ├── data_field.png
//     └── energy.png

use std::env;
use std::fs::create_dir_all;
use std::path::PathBuf;
use std::time::{SystemTime, UNIX_EPOCH};

use skyrmion_sim::analysis::{
    detect_cores, manifold_correlation, spin_texture_entropy, total_topological_charge,
};
use skyrmion_sim::output::save_results;
use skyrmion_sim::params::Preset;
use skyrmion_sim::scalar_field::DataPattern;
use skyrmion_sim::simulator::{RunStopReason, Simulator};
use skyrmion_sim::visualisation::{save_energy_plot, save_scalar_heatmap};

fn print_usage() {
    eprintln!(
        r#"Usage:
  cargo run -- [preset=quick|standard|highres|ultra|creation|encoding|fast|lowfield|strongdmi]
             [pattern=bumps|sinusoid|checkerboard|random]
             [steps=N] [save=N] [dt=VAL] [eps=VAL] [bz=VAL] [seed=N]
             [out=DIR] [run=RUN_ID]

Notes:
  - The run uses explicit Euler steps with the divergence-control policy;
    progress is reported about 20 times over the run.
  - All artifacts land in <out>/<run_id>/ (default out=runs).
"#
    );
}

fn sanitize_run_id(s: &str) -> String {
    s.chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '_' || c == '-' || c == '.' {
                c
            } else {
                '_'
            }
        })
        .collect()
}

fn default_run_id(preset: Preset, pattern: DataPattern) -> String {
    let now = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_else(|_| std::time::Duration::from_secs(0));
    let ts = format!("{}{:03}", now.as_secs(), now.subsec_millis());
    format!("{}_{}_{}", ts, preset.as_str(), pattern.as_str())
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let argv: Vec<String> = env::args().collect();

    let mut preset = Preset::QuickTest;
    let mut pattern = DataPattern::GaussianBumps;

    let mut steps_override: Option<usize> = None;
    let mut save_override: Option<usize> = None;
    let mut dt_override: Option<f64> = None;
    let mut eps_override: Option<f64> = None;
    let mut bz_override: Option<f64> = None;
    let mut seed_override: Option<u64> = None;

    let mut out_root_override: Option<String> = None;
    let mut run_id_override: Option<String> = None;

    for arg in argv.iter().skip(1) {
        if arg == "-h" || arg == "--help" || arg == "help" {
            print_usage();
            return Ok(());
        }

        if let Some(v) = arg.strip_prefix("preset=") {
            match Preset::from_arg(v) {
                Some(p) => preset = p,
                None => eprintln!("Warning: unknown preset '{v}', using quick"),
            }
            continue;
        }
        if let Some(v) = arg.strip_prefix("pattern=") {
            match DataPattern::from_arg(v) {
                Some(p) => pattern = p,
                None => eprintln!("Warning: unknown pattern '{v}', using bumps"),
            }
            continue;
        }
        if let Some(v) = arg.strip_prefix("steps=") {
            steps_override = v.parse::<usize>().ok();
            continue;
        }
        if let Some(v) = arg.strip_prefix("save=") {
            save_override = v.parse::<usize>().ok();
            continue;
        }
        if let Some(v) = arg.strip_prefix("dt=") {
            dt_override = v.parse::<f64>().ok();
            continue;
        }
        if let Some(v) = arg.strip_prefix("eps=") {
            eps_override = v.parse::<f64>().ok();
            continue;
        }
        if let Some(v) = arg.strip_prefix("bz=") {
            bz_override = v.parse::<f64>().ok();
            continue;
        }
        if let Some(v) = arg.strip_prefix("seed=") {
            seed_override = v.parse::<u64>().ok();
            continue;
        }
        if let Some(v) = arg.strip_prefix("out=") {
            out_root_override = Some(v.to_string());
            continue;
        }
        if let Some(v) = arg.strip_prefix("run=") {
            run_id_override = Some(v.to_string());
            continue;
        }

        eprintln!("Warning: ignoring unknown argument '{arg}'");
    }

    let mut params = preset.params();
    if let Some(n) = steps_override {
        params.num_steps = n;
    }
    if let Some(s) = save_override {
        params.save_interval = s.max(1);
    }
    if let Some(dt) = dt_override {
        params.dt = dt;
    }
    if let Some(e) = eps_override {
        params.eps_k = e;
    }
    if let Some(b) = bz_override {
        params.b_z = b;
    }
    if let Some(s) = seed_override {
        params.seed = s;
    }

    // -------- output directory setup --------
    let out_root = out_root_override.unwrap_or_else(|| "runs".to_string());
    create_dir_all(&out_root)?;
    let run_id = sanitize_run_id(
        &run_id_override.unwrap_or_else(|| default_run_id(preset, pattern)),
    );
    let run_dir = PathBuf::from(&out_root).join(&run_id);

    println!("--- skyrmion-sim run config ---");
    println!("run_dir: {}", run_dir.to_string_lossy());
    println!("preset:  {}", preset.as_str());
    println!("pattern: {}", pattern.as_str());
    println!(
        "grid:    {}x{} cells, cell = {} nm, thickness = {} nm",
        params.grid_size, params.grid_size, params.cell_size, params.thickness
    );
    println!(
        "physics: A={:.3e} J/m  D={:.3e} J/m^2  K_z={:.3e} J/m^3  eps_K={:.2}",
        params.a_ex, params.dmi, params.k_z, params.eps_k
    );
    println!(
        "         B_z={:.3e} T  alpha={:.2}  M_s={:.3e} A/m",
        params.b_z, params.alpha, params.m_s
    );
    println!(
        "run:     dt={:.3e} s  steps={}  save_interval={}  seed={}",
        params.dt, params.num_steps, params.save_interval, params.seed
    );
    println!("-------------------------------");

    let grid = skyrmion_sim::grid::Grid2D::new(params.grid_size, params.cell_size_m());
    let data = pattern.synthesize(grid, params.seed);

    let mut sim = Simulator::new(params.clone(), Some(&data.data))?;

    let report = sim.run(params.num_steps, true);
    match report.stop_reason {
        RunStopReason::Completed => {
            println!("Run completed: {} steps.", report.steps_completed)
        }
        RunStopReason::Diverged => println!(
            "Run stopped early after {} steps (diverged); partial history kept.",
            report.steps_completed
        ),
    }

    // -------- analysis summary --------
    let m = sim.magnetization();
    let mz = sim.m_z();
    let cores = detect_cores(&mz, -0.3);
    let correlation = manifold_correlation(sim.data_field(), &mz);
    let charge = total_topological_charge(&m);
    let entropy = spin_texture_entropy(&m);

    let avg = m.mean();
    let breakdown = sim.energy_breakdown();

    println!("--- analysis summary ---");
    println!("m_z range: [{:.3}, {:.3}], mean {:.3}", mz.min(), mz.max(), mz.mean());
    println!(
        "mean magnetization: [{:.3}, {:.3}, {:.3}]",
        avg[0], avg[1], avg[2]
    );
    println!(
        "energy terms (J): exchange {:.3e}, anisotropy {:.3e}, zeeman {:.3e}",
        breakdown.exchange, breakdown.anisotropy, breakdown.zeeman
    );
    println!(
        "reversed cores: {} components, density {:.4}, mean size {:.1} cells",
        cores.component_count, cores.density, cores.mean_size
    );
    println!("total topological charge: {:.3}", charge);
    println!("data-magnetization correlation: {:.4}", correlation);
    println!("spin texture entropy: {:.3} bits", entropy);
    if let Some(e) = report.final_energy {
        println!("final energy density: {:.6e} J/m^2 (dt = {:.3e})", e, report.final_dt);
    }

    // -------- artifacts --------
    save_results(&sim, &run_dir)?;
    save_scalar_heatmap(
        &mz,
        "m_z (blue = min, white = mid, red = max)",
        run_dir.join("m_z.png").to_str().unwrap(),
    )?;
    save_scalar_heatmap(
        sim.data_field(),
        "data field D(x,y)",
        run_dir.join("data_field.png").to_str().unwrap(),
    )?;
    save_energy_plot(
        sim.energy_history(),
        sim.params().save_interval,
        run_dir.join("energy.png").to_str().unwrap(),
    )?;

    println!("Done. Outputs in {}", run_dir.to_string_lossy());
    Ok(())
}
