use crate::{
    error::{Result, RetrieveError},
    model::RecordSet,
};
use seqsnap_render::{ChartText, LengthPoint, length_chart_svg, rasterize_png};
use std::path::Path;
use tracing::info;

/// Sequence lengths, longest first, as chart points.
pub fn length_points(records: &RecordSet) -> Vec<LengthPoint> {
    records
        .sorted_by_length_desc()
        .into_iter()
        .map(|record| LengthPoint::new(record.accession, record.length))
        .collect()
}

/// Renders the length chart to a PNG at `path`. Returns `false` without
/// touching the filesystem when there is nothing to plot.
pub fn render_length_chart(records: &RecordSet, path: &Path) -> Result<bool> {
    if records.is_empty() {
        info!("No data to chart");
        return Ok(false);
    }
    let svg = length_chart_svg(&length_points(records), &ChartText::default());
    rasterize_png(&svg, path).map_err(RetrieveError::Render)?;
    info!(path = %path.display(), "Chart saved");
    Ok(true)
}
