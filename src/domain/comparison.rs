//! Side-by-side view of a few assets.

use serde::Serialize;

use super::asset::Asset;
use super::chart::{ChartSeries, ChartSpan};

/// Most assets a single comparison may hold.
pub const MAX_COMPARED_ASSETS: usize = 3;

/// Listing snapshot and chart of one compared asset.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ComparedAsset {
    pub asset: Asset,
    pub chart: ChartSeries,
}

/// Assets compared over a common chart span, in the order requested.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Comparison {
    pub span: ChartSpan,
    pub assets: Vec<ComparedAsset>,
}

impl Comparison {
    /// The asset whose price rose the most over the span.
    #[must_use]
    pub fn leader(&self) -> Option<&ComparedAsset> {
        self.assets
            .iter()
            .filter_map(|entry| entry.chart.change_percent().map(|change| (entry, change)))
            .max_by(|a, b| a.1.total_cmp(&b.1))
            .map(|(entry, _)| entry)
    }
}
