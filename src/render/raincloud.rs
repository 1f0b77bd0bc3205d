//! Raincloud chart of one group: half violin, box plot and jittered points
//! per sample

use std::path::Path;

use plotters::coord::types::RangedCoordf64;
use plotters::prelude::*;

use crate::error::Result;
use crate::summary::{GroupDistribution, SampleDistribution};

use super::{finish, DrawResult, FIGURE_SIZE, POINT_GREY, PRIMARY, PRIMARY_LIGHT};

/// Height of the tallest violin above its sample line
const VIOLIN_HEIGHT: f64 = 0.45;
const BOX_HALF_HEIGHT: f64 = 0.1;
/// Offset of the point strip below the sample line
const STRIP_OFFSET: f64 = 0.2;
/// Default log10 intensity axis
const X_RANGE: (f64, f64) = (-0.5, 10.0);

/// Render one raincloud SVG for a group
pub fn render_raincloud<P: AsRef<Path>>(path: P, cloud: &GroupDistribution) -> Result<()> {
    let path = path.as_ref();
    finish(&path.display().to_string(), draw_raincloud(path, cloud))
}

fn draw_raincloud(path: &Path, cloud: &GroupDistribution) -> DrawResult {
    let root = SVGBackend::new(path, FIGURE_SIZE).into_drawing_area();
    root.fill(&WHITE)?;

    let (x_min, x_max) = cloud
        .samples
        .iter()
        .flat_map(|s| s.box_stats.map(|b| (b.min, b.max)))
        .fold(X_RANGE, |(lo, hi), (min, max)| (lo.min(min - 0.5), hi.max(max + 0.5)));
    let n = cloud.samples.len() as f64;

    let mut chart = ChartBuilder::on(&root)
        .caption(cloud.group.label(), ("sans-serif", 24))
        .margin(30)
        .x_label_area_size(40)
        .y_label_area_size(20)
        .build_cartesian_2d(x_min..x_max, 0.0..n + 1.0)?;

    chart
        .configure_mesh()
        .disable_mesh()
        .disable_y_axis()
        .x_desc("log10(intensity)")
        .draw()?;

    for (k, sample) in cloud.samples.iter().enumerate() {
        draw_sample(&mut chart, sample, (k + 1) as f64, x_min)?;
    }

    root.present()?;
    Ok(())
}

fn draw_sample(
    chart: &mut ChartContext<SVGBackend, Cartesian2d<RangedCoordf64, RangedCoordf64>>,
    sample: &SampleDistribution,
    y: f64,
    x_min: f64,
) -> DrawResult {
    chart.draw_series(std::iter::once(Text::new(
        sample.sample_id.clone(),
        (x_min, y + 0.3),
        ("sans-serif", 11).into_font(),
    )))?;

    if let Some(density) = &sample.density {
        let peak = density.peak();
        if peak > 0.0 {
            let mut outline: Vec<(f64, f64)> = density
                .grid
                .iter()
                .zip(density.values.iter())
                .map(|(&x, &d)| (x, y + VIOLIN_HEIGHT * d / peak))
                .collect();
            outline.extend(density.grid.iter().rev().map(|&x| (x, y)));
            chart.draw_series(std::iter::once(Polygon::new(outline, PRIMARY_LIGHT.filled())))?;
        }
    }

    if let Some(b) = sample.box_stats {
        let line = BLACK.stroke_width(1);
        chart.draw_series(std::iter::once(Rectangle::new(
            [(b.q1, y - BOX_HALF_HEIGHT), (b.q3, y + BOX_HALF_HEIGHT)],
            PRIMARY.filled(),
        )))?;
        chart.draw_series(std::iter::once(Rectangle::new(
            [(b.q1, y - BOX_HALF_HEIGHT), (b.q3, y + BOX_HALF_HEIGHT)],
            line,
        )))?;
        chart.draw_series(
            [
                vec![(b.median, y - BOX_HALF_HEIGHT), (b.median, y + BOX_HALF_HEIGHT)],
                vec![(b.whisker_low, y), (b.q1, y)],
                vec![(b.q3, y), (b.whisker_high, y)],
                vec![(b.whisker_low, y - BOX_HALF_HEIGHT / 2.0), (b.whisker_low, y + BOX_HALF_HEIGHT / 2.0)],
                vec![(b.whisker_high, y - BOX_HALF_HEIGHT / 2.0), (b.whisker_high, y + BOX_HALF_HEIGHT / 2.0)],
            ]
            .into_iter()
            .map(|points| PathElement::new(points, line)),
        )?;
    }

    chart.draw_series(
        sample
            .log10_values
            .iter()
            .zip(sample.jitter.iter())
            .map(|(&x, &j)| Circle::new((x, y - STRIP_OFFSET + j), 1, POINT_GREY.filled())),
    )?;

    Ok(())
}
