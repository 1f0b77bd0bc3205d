//! SVG charts built from the structured analysis outputs
//!
//! Renderers never recompute statistics; they only draw what the analysis
//! and summary modules produced. All colours and layout constants live here.

mod counts;
mod raincloud;
mod upset;
mod volcano;

pub use counts::render_sample_counts;
pub use raincloud::render_raincloud;
pub use upset::render_upset;
pub use volcano::render_volcano;

use plotters::style::RGBColor;

use crate::classify::Category;
use crate::error::{ProteoError, Result};

/// Error type of the plotters drawing calls
pub(crate) type DrawResult = std::result::Result<(), Box<dyn std::error::Error + Send + Sync>>;

/// Default figure size (letter portrait at 100 dpi)
pub const FIGURE_SIZE: (u32, u32) = (850, 1100);

pub(crate) const PRIMARY: RGBColor = RGBColor(31, 119, 180);
pub(crate) const PRIMARY_LIGHT: RGBColor = RGBColor(174, 199, 232);
pub(crate) const POINT_GREY: RGBColor = RGBColor(77, 77, 77);

const UP_SIGNIFICANT: RGBColor = RGBColor(44, 160, 44);
const UP_NONSIGNIFICANT: RGBColor = RGBColor(152, 223, 138);
const INCONCLUSIVE: RGBColor = RGBColor(255, 187, 120);

/// Point colour of a volcano category
pub fn category_color(category: Category) -> RGBColor {
    match category {
        Category::UpSignificant => UP_SIGNIFICANT,
        Category::DownSignificant => PRIMARY,
        Category::UpNonsignificant => UP_NONSIGNIFICANT,
        Category::DownNonsignificant => PRIMARY_LIGHT,
        Category::Inconclusive => INCONCLUSIVE,
    }
}

/// Map a drawing failure to a crate error
pub(crate) fn finish(chart: &str, result: DrawResult) -> Result<()> {
    match result {
        Ok(()) => {
            log::info!("Wrote {}", chart);
            Ok(())
        }
        Err(e) => Err(ProteoError::Render {
            chart: chart.to_string(),
            reason: e.to_string(),
        }),
    }
}
