// src/visualisation.rs

use plotters::prelude::*;

use crate::scalar_field::ScalarField2D;

/// Map a scalar to a blue–white–red colour using a *local* min/max,
/// so small variations are still visible.
///
/// min maps to blue, max to red, midpoint to white.
fn value_to_color(v: f64, min_v: f64, max_v: f64) -> RGBColor {
    // Protect against min ≈ max (e.g. perfectly uniform field)
    let mut lo = min_v;
    let mut hi = max_v;
    if !lo.is_finite() || !hi.is_finite() || (hi - lo).abs() < 1e-9 {
        lo = -1.0;
        hi = 1.0;
    }

    let x = ((v - lo) / (hi - lo)).clamp(0.0, 1.0);

    let r = (255.0 * x) as u8;
    let b = (255.0 * (1.0 - x)) as u8;
    let g = (255.0 * (1.0 - (2.0 * (x - 0.5).abs()))).clamp(0.0, 255.0) as u8;

    RGBColor(r, g, b)
}

/// Save a scalar grid (m_z slice, data field, anisotropy map) as a PNG
/// heatmap with axes in cell indices.
pub fn save_scalar_heatmap(
    field: &ScalarField2D,
    caption: &str,
    filename: &str,
) -> Result<(), Box<dyn std::error::Error>> {
    let n = field.grid.n as i32;

    let mut min_v = f64::INFINITY;
    let mut max_v = f64::NEG_INFINITY;
    for &v in &field.data {
        if v.is_finite() {
            if v < min_v {
                min_v = v;
            }
            if v > max_v {
                max_v = v;
            }
        }
    }
    if !min_v.is_finite() || !max_v.is_finite() {
        min_v = -1.0;
        max_v = 1.0;
    }

    let root = BitMapBackend::new(filename, (800, 800)).into_drawing_area();
    root.fill(&WHITE)?;

    let mut chart = ChartBuilder::on(&root)
        .margin(40)
        .caption(caption, ("sans-serif", 20))
        .x_label_area_size(40)
        .y_label_area_size(40)
        .build_cartesian_2d(0..n, 0..n)?;

    chart
        .configure_mesh()
        .x_desc("x (cell index)")
        .y_desc("y (cell index)")
        .axis_desc_style(("sans-serif", 15))
        .draw()?;

    chart.draw_series((0..n).flat_map(|i| {
        (0..n).map(move |j| {
            let v = field.data[field.idx(i as usize, j as usize)];
            let color = value_to_color(v, min_v, max_v);
            Rectangle::new([(i, j), (i + 1, j + 1)], color.filled())
        })
    }))?;

    root.present()?;
    Ok(())
}

/// Plot the recorded energy-density samples against the simulation step.
pub fn save_energy_plot(
    energies: &[f64],
    save_interval: usize,
    filename: &str,
) -> Result<(), Box<dyn std::error::Error>> {
    if energies.is_empty() {
        return Ok(()); // nothing to plot
    }

    let root = BitMapBackend::new(filename, (1024, 768)).into_drawing_area();
    root.fill(&WHITE)?;

    let x_max = ((energies.len() - 1) * save_interval) as f64;

    let mut y_min = f64::INFINITY;
    let mut y_max = f64::NEG_INFINITY;
    for &e in energies {
        if e.is_finite() {
            if e < y_min {
                y_min = e;
            }
            if e > y_max {
                y_max = e;
            }
        }
    }

    // Handle pathological case (all NaN or identical)
    if !y_min.is_finite() || !y_max.is_finite() {
        y_min = -1.0;
        y_max = 1.0;
    } else if (y_max - y_min).abs() < 1e-30 {
        let delta = if y_max.abs() < 1e-30 {
            1.0
        } else {
            0.1 * y_max.abs()
        };
        y_min -= delta;
        y_max += delta;
    } else {
        let margin = 0.1 * (y_max - y_min);
        y_min -= margin;
        y_max += margin;
    }

    let mut chart = ChartBuilder::on(&root)
        .margin(20)
        .caption("Energy density vs step", ("sans-serif", 30))
        .set_left_and_bottom_label_area_size(60)
        .build_cartesian_2d(0.0..x_max.max(1.0), y_min..y_max)?;

    chart
        .configure_mesh()
        .x_desc("step")
        .y_desc("energy density (J/m^2)")
        .x_labels(10)
        .y_labels(10)
        .label_style(("sans-serif", 16))
        .axis_desc_style(("sans-serif", 18))
        .draw()?;

    chart
        .draw_series(LineSeries::new(
            energies
                .iter()
                .enumerate()
                .map(|(k, &e)| ((k * save_interval) as f64, e)),
            &BLUE,
        ))?
        .label("E_total")
        .legend(|(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], &BLUE));

    chart
        .configure_series_labels()
        .border_style(&BLACK)
        .background_style(&WHITE.mix(0.8))
        .draw()?;

    root.present()?;
    Ok(())
}
