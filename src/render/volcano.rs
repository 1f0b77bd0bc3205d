//! Four-panel volcano chart

use std::path::Path;

use plotters::coord::Shift;
use plotters::element::DashedPathElement;
use plotters::prelude::*;

use crate::classify::{Category, Thresholds};
use crate::error::Result;
use crate::io::{ContrastResults, VolcanoResults};

use super::{category_color, finish, DrawResult, FIGURE_SIZE};

/// Minimum half-width of the log2 ratio axis
const X_LIMIT: f64 = 8.0;
/// Minimum height of the -log10 p axis
const Y_LIMIT: f64 = 6.5;
/// Dash length and gap of the threshold guides, in pixels
const DASH: (u32, u32) = (6, 4);

/// A plotted protein: log2 ratio, -log10 adjusted p, category, name
type Point<'a> = (f64, f64, Category, &'a str);

fn legend_text(category: Category, thresholds: &Thresholds) -> String {
    let (t_p, t_r) = (thresholds.significance, thresholds.effect);
    match category {
        Category::UpSignificant => format!("log2(ratio) > {} & -log10(p) > {}", t_r, t_p),
        Category::DownSignificant => format!("log2(ratio) < -{} & -log10(p) > {}", t_r, t_p),
        Category::UpNonsignificant => format!("log2(ratio) > {} & -log10(p) <= {}", t_r, t_p),
        Category::DownNonsignificant => format!("log2(ratio) < -{} & -log10(p) <= {}", t_r, t_p),
        Category::Inconclusive => format!("-{} <= log2(ratio) <= {}", t_r, t_r),
    }
}

/// Render the volcano panels of all contrasts into one SVG
///
/// Proteins without an adjusted p-value or a log2 ratio have no coordinates
/// and are left out of the chart. An adjusted p-value of 0 is drawn on the top
/// edge of its panel.
pub fn render_volcano<P: AsRef<Path>>(path: P, results: &VolcanoResults, thresholds: &Thresholds) -> Result<()> {
    let path = path.as_ref();
    finish(&path.display().to_string(), draw_volcano(path, results, thresholds))
}

fn draw_volcano(path: &Path, results: &VolcanoResults, thresholds: &Thresholds) -> DrawResult {
    let root = SVGBackend::new(path, FIGURE_SIZE).into_drawing_area();
    root.fill(&WHITE)?;
    let root = root.margin(20, 20, 20, 20);

    let panels = root.split_evenly((2, 2));
    for (area, contrast) in panels.iter().zip(results.contrasts.iter()) {
        draw_panel(area, contrast, thresholds)?;
    }

    root.present()?;
    Ok(())
}

fn draw_panel(
    area: &DrawingArea<SVGBackend, Shift>,
    results: &ContrastResults,
    thresholds: &Thresholds,
) -> DrawResult {
    let (points, y_max) = panel_points(results);
    let x_max = points.iter().map(|p| p.0.abs() * 1.05).fold(X_LIMIT, f64::max);

    let mut chart = ChartBuilder::on(area)
        .caption(results.contrast.title(), ("sans-serif", 20))
        .margin(10)
        .x_label_area_size(35)
        .y_label_area_size(45)
        .build_cartesian_2d(-x_max..x_max, 0.0..y_max)?;

    chart
        .configure_mesh()
        .disable_mesh()
        .x_desc("log2(ratio of means)")
        .y_desc("-log10(adjusted p-value)")
        .draw()?;

    for category in Category::ALL {
        let color = category_color(category);
        let n = points.iter().filter(|p| p.2 == category).count();
        chart
            .draw_series(
                points
                    .iter()
                    .filter(|p| p.2 == category)
                    .map(|&(x, y, _, _)| Circle::new((x, y), 3, color.filled())),
            )?
            .label(format!("{} (n={})", legend_text(category, thresholds), n))
            .legend(move |(x, y)| Circle::new((x, y), 4, color.filled()));
    }

    let line_style = BLACK.mix(0.6).stroke_width(1);
    let guides = [
        [(-thresholds.effect, 0.0), (-thresholds.effect, y_max)],
        [(thresholds.effect, 0.0), (thresholds.effect, y_max)],
        [(-x_max, thresholds.significance), (x_max, thresholds.significance)],
    ];
    chart.draw_series(
        guides
            .iter()
            .map(|line| DashedPathElement::new(line.to_vec(), DASH.0, DASH.1, line_style)),
    )?;

    chart.draw_series(
        points
            .iter()
            .filter(|p| p.2.is_significant())
            .map(|&(x, y, _, name)| Text::new(name.to_string(), (x, y), ("sans-serif", 10).into_font())),
    )?;

    chart
        .configure_series_labels()
        .position(SeriesLabelPosition::UpperLeft)
        .label_font(("sans-serif", 9))
        .background_style(WHITE.mix(0.8))
        .border_style(BLACK)
        .draw()?;

    Ok(())
}

/// Plottable points of one panel and the height of its y axis
///
/// Points with an infinite -log10 p (adjusted p of 0) are placed on the top
/// edge, just above every finite point.
fn panel_points(results: &ContrastResults) -> (Vec<Point<'_>>, f64) {
    let raw: Vec<Point<'_>> = results
        .proteins
        .iter()
        .filter_map(|p| Some((p.log2_ratio?, p.neg_log10_padj()?, p.category, p.protein.as_str())))
        .filter(|(x, y, _, _)| x.is_finite() && !y.is_nan())
        .collect();

    let finite_top = raw
        .iter()
        .filter(|p| p.1.is_finite())
        .map(|p| p.1 * 1.05)
        .fold(Y_LIMIT, f64::max);

    let n_capped = raw.iter().filter(|p| p.1.is_infinite()).count();
    if n_capped == 0 {
        return (raw, finite_top);
    }

    log::debug!(
        "{}: {} proteins with adjusted p = 0 drawn at the top of the panel",
        results.contrast,
        n_capped
    );
    let points = raw
        .into_iter()
        .map(|(x, y, c, name)| (x, if y.is_finite() { y } else { finite_top }, c, name))
        .collect();
    (points, finite_top * 1.05)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::Contrast;
    use crate::io::ProteinResult;
    use tempfile::tempdir;

    fn entry(name: &str, padj: f64, log2_ratio: f64, category: Category) -> ProteinResult {
        ProteinResult {
            protein: name.to_string(),
            statistic: Some(3.0),
            df: Some(6.0),
            pvalue: Some(padj / 2.0),
            padj: Some(padj),
            rejected: padj < 0.05,
            numerator_mean: 4.0,
            denominator_mean: 1.0,
            ratio: Some(log2_ratio.exp2()),
            log2_ratio: Some(log2_ratio),
            category,
            test_issue: None,
            ratio_issue: None,
        }
    }

    #[test]
    fn test_render_volcano_writes_svg() {
        let contrasts = Contrast::ALL
            .iter()
            .map(|&contrast| ContrastResults {
                contrast,
                alpha: 0.05,
                proteins: vec![
                    entry("ALB", 1e-4, 2.0, Category::UpSignificant),
                    entry("APOA1", 0.5, -1.5, Category::DownNonsignificant),
                    entry("HBB", 1e-9, 12.0, Category::UpSignificant),
                ],
                correction_error: None,
            })
            .collect();
        let results = VolcanoResults {
            n_input_proteins: 3,
            n_complete_proteins: 3,
            sample_medians: vec![0.0; 8],
            contrasts,
        };

        let dir = tempdir().unwrap();
        let path = dir.path().join("volcano.svg");
        render_volcano(&path, &results, &Thresholds::default()).unwrap();

        let svg = std::fs::read_to_string(&path).unwrap();
        assert!(svg.contains("<svg"));
        assert!(svg.contains("BMIF: Dx/D29"));
        assert!(svg.contains("ALB"));
        assert!(!svg.contains("APOA1"), "only significant proteins are labelled");
    }

    #[test]
    fn test_zero_padj_is_capped_at_panel_top() {
        let results = ContrastResults {
            contrast: Contrast::BmifTime,
            alpha: 0.05,
            proteins: vec![
                entry("ALB", 1e-4, 2.0, Category::UpSignificant),
                entry("CRP", 0.0, 3.0, Category::UpSignificant),
            ],
            correction_error: None,
        };

        let (points, y_max) = panel_points(&results);
        assert_eq!(points.len(), 2);
        let crp = points.iter().find(|p| p.3 == "CRP").unwrap();
        assert!(crp.1.is_finite());
        assert!(crp.1 >= Y_LIMIT);
        assert!(crp.1 < y_max);
        assert!(points.iter().all(|p| p.1 <= crp.1));

        let finite_only = ContrastResults {
            proteins: vec![entry("ALB", 1e-4, 2.0, Category::UpSignificant)],
            ..results.clone()
        };
        assert_eq!(panel_points(&finite_only).1, Y_LIMIT);
    }
}
