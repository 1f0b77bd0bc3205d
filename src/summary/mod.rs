//! Exploratory summaries of the raw intensity matrix

mod counts;
mod raincloud;
mod upset;

pub use counts::{sample_presence_counts, SampleCounts};
pub use raincloud::{
    raincloud_distributions, BoxStats, Density, GroupDistribution, SampleDistribution,
    DENSITY_POINTS, JITTER_HALF_WIDTH,
};
pub use upset::{upset_intersections, Intersection, UpSetData, COMBINATIONS};
