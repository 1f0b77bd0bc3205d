//! Horizontal stacked bars of present and missing proteins per sample

use std::path::Path;

use plotters::prelude::*;

use crate::data::Group;
use crate::error::Result;
use crate::summary::SampleCounts;

use super::{finish, DrawResult, FIGURE_SIZE, PRIMARY, PRIMARY_LIGHT};

/// Bar half-height in row units
const BAR_HALF_HEIGHT: f64 = 0.4;

/// Row index of every sample, groups in order with a one-row gap between them
fn row_positions(counts: &[SampleCounts]) -> Vec<f64> {
    let mut positions = Vec::with_capacity(counts.len());
    let mut row = 0.0;
    for group in Group::ALL {
        for (i, c) in counts.iter().enumerate() {
            if c.group == group {
                positions.push((i, row));
                row += 1.0;
            }
        }
        row += 1.0;
    }
    positions.sort_by_key(|&(i, _)| i);
    positions.into_iter().map(|(_, y)| y).collect()
}

/// Render per-sample present/missing counts
pub fn render_sample_counts<P: AsRef<Path>>(path: P, counts: &[SampleCounts]) -> Result<()> {
    let path = path.as_ref();
    finish(&path.display().to_string(), draw_counts(path, counts))
}

fn draw_counts(path: &Path, counts: &[SampleCounts]) -> DrawResult {
    let root = SVGBackend::new(path, FIGURE_SIZE).into_drawing_area();
    root.fill(&WHITE)?;

    // rows run top-down, so they are drawn at negative y
    let rows: Vec<f64> = row_positions(counts).into_iter().map(|r| -r).collect();
    let y_bottom = rows.iter().copied().fold(0.0, f64::min) - 1.0;
    let x_max = counts
        .iter()
        .map(|c| (c.present + c.missing) as f64)
        .fold(1.0, f64::max)
        * 1.05;

    let mut chart = ChartBuilder::on(&root)
        .caption("Proteins per sample", ("sans-serif", 24))
        .margin(30)
        .x_label_area_size(40)
        .y_label_area_size(20)
        .build_cartesian_2d(0.0..x_max, y_bottom..1.0)?;

    chart
        .configure_mesh()
        .disable_mesh()
        .disable_y_axis()
        .x_desc("Number of proteins")
        .draw()?;

    chart
        .draw_series(counts.iter().zip(rows.iter()).map(|(c, &y)| {
            Rectangle::new(
                [(0.0, y - BAR_HALF_HEIGHT), (c.present as f64, y + BAR_HALF_HEIGHT)],
                PRIMARY.filled(),
            )
        }))?
        .label("Present")
        .legend(|(x, y)| Rectangle::new([(x, y - 5), (x + 10, y + 5)], PRIMARY.filled()));

    chart
        .draw_series(counts.iter().zip(rows.iter()).map(|(c, &y)| {
            let start = c.present as f64;
            Rectangle::new(
                [(start, y - BAR_HALF_HEIGHT), (start + c.missing as f64, y + BAR_HALF_HEIGHT)],
                PRIMARY_LIGHT.filled(),
            )
        }))?
        .label("Missing")
        .legend(|(x, y)| Rectangle::new([(x, y - 5), (x + 10, y + 5)], PRIMARY_LIGHT.filled()));

    chart.draw_series(counts.iter().zip(rows.iter()).map(|(c, &y)| {
        Text::new(
            format!("{} ({})", c.sample_id, c.group.label()),
            (x_max * 0.01, y),
            ("sans-serif", 10).into_font().color(&WHITE),
        )
    }))?;

    chart
        .configure_series_labels()
        .position(SeriesLabelPosition::LowerRight)
        .background_style(WHITE.mix(0.8))
        .border_style(BLACK)
        .draw()?;

    root.present()?;
    Ok(())
}
