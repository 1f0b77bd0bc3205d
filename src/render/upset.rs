//! UpSet chart: exclusive intersection sizes over a group membership matrix

use std::path::Path;

use plotters::prelude::*;

use crate::data::Group;
use crate::error::Result;
use crate::summary::UpSetData;

use super::{finish, DrawResult, FIGURE_SIZE, PRIMARY, PRIMARY_LIGHT};

const BAR_HALF_WIDTH: f64 = 0.4;
const DOT_RADIUS: u32 = 7;
/// Left edge of both panels; the group labels sit between it and the first column
const LABEL_X: f64 = -4.0;

/// Render the UpSet diagram
pub fn render_upset<P: AsRef<Path>>(path: P, upset: &UpSetData) -> Result<()> {
    let path = path.as_ref();
    finish(&path.display().to_string(), draw_upset(path, upset))
}

fn draw_upset(path: &Path, upset: &UpSetData) -> DrawResult {
    let root = SVGBackend::new(path, FIGURE_SIZE).into_drawing_area();
    root.fill(&WHITE)?;
    let root = root.margin(30, 30, 30, 30);

    let (_, height) = root.dim_in_pixel();
    let (bars_area, matrix_area) = root.split_vertically(height * 3 / 5);

    let n = upset.intersections.len() as f64;
    let y_max = upset
        .intersections
        .iter()
        .map(|i| i.exclusive as f64)
        .fold(1.0, f64::max)
        * 1.1;

    let mut bars = ChartBuilder::on(&bars_area)
        .caption("Proteins detected per group combination", ("sans-serif", 22))
        .margin(10)
        .x_label_area_size(10)
        .y_label_area_size(60)
        .build_cartesian_2d(LABEL_X..n, 0.0..y_max)?;

    bars.configure_mesh()
        .disable_mesh()
        .disable_x_axis()
        .y_desc("Intersection size")
        .draw()?;

    bars.draw_series(upset.intersections.iter().enumerate().map(|(k, row)| {
        let x = k as f64;
        Rectangle::new(
            [(x - BAR_HALF_WIDTH, 0.0), (x + BAR_HALF_WIDTH, row.exclusive as f64)],
            PRIMARY.filled(),
        )
    }))?;

    bars.draw_series(upset.intersections.iter().enumerate().map(|(k, row)| {
        Text::new(
            row.exclusive.to_string(),
            (k as f64 - 0.2, row.exclusive as f64 + y_max * 0.03),
            ("sans-serif", 10).into_font(),
        )
    }))?;

    let mut matrix = ChartBuilder::on(&matrix_area)
        .margin(10)
        .x_label_area_size(10)
        .y_label_area_size(60)
        .build_cartesian_2d(LABEL_X..n, -0.5..Group::ALL.len() as f64 - 0.5)?;

    matrix.configure_mesh().disable_mesh().disable_x_axis().disable_y_axis().draw()?;

    for (gi, group) in Group::ALL.iter().enumerate() {
        let y = gi as f64;
        let size = upset
            .set_sizes
            .iter()
            .find(|(g, _)| g == group)
            .map_or(0, |(_, s)| *s);
        matrix.draw_series(std::iter::once(Text::new(
            format!("{} ({})", group.label(), size),
            (LABEL_X, y),
            ("sans-serif", 12).into_font(),
        )))?;

        matrix.draw_series(upset.intersections.iter().enumerate().map(|(k, row)| {
            let color = if row.groups.contains(group) { PRIMARY } else { PRIMARY_LIGHT };
            Circle::new((k as f64, y), DOT_RADIUS, color.filled())
        }))?;
    }

    matrix.draw_series(upset.intersections.iter().enumerate().filter_map(|(k, row)| {
        let rows: Vec<f64> = Group::ALL
            .iter()
            .enumerate()
            .filter(|(_, g)| row.groups.contains(*g))
            .map(|(gi, _)| gi as f64)
            .collect();
        let lo = rows.iter().copied().reduce(f64::min)?;
        let hi = rows.iter().copied().reduce(f64::max)?;
        (hi > lo).then(|| PathElement::new(vec![(k as f64, lo), (k as f64, hi)], PRIMARY.stroke_width(3)))
    }))?;

    root.present()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::{GroupLayout, IntensityMatrix};
    use crate::filter::detect_presence;
    use crate::summary::upset_intersections;
    use ndarray::array;
    use tempfile::tempdir;

    #[test]
    fn test_render_upset_writes_svg() {
        // one sample per group: BMIF Dx, BMIF D29, PB Dx, PB D29
        let matrix = IntensityMatrix::new(
            array![
                [Some(1.0), Some(2.0), Some(3.0), Some(4.0)],
                [Some(1.0), None, Some(3.0), None],
                [None, None, None, Some(4.0)],
            ],
            vec!["A".into(), "B".into(), "C".into()],
            (0..4).map(|j| format!("s{}", j)).collect(),
        )
        .unwrap();
        let groups = GroupLayout { first_tissue_columns: 2 }.split(4).unwrap();
        let upset = upset_intersections(&detect_presence(&matrix, &groups, 1));

        let dir = tempdir().unwrap();
        let path = dir.path().join("upset.svg");
        render_upset(&path, &upset).unwrap();

        let svg = std::fs::read_to_string(&path).unwrap();
        assert!(svg.contains("PB, D29 (2)"));
        assert!(svg.contains("Intersection size"));
    }
}
