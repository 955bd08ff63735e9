use crate::geometry::PageGeometry;
use crate::options::MarginOptions;
use crate::process::SourceDocument;
use crate::range::PageSelection;
use crate::types::*;

/// Calculate what a margin run would do to a document, without producing it
pub fn calculate_statistics(
    source: &SourceDocument,
    options: &MarginOptions,
) -> Result<MarginStatistics> {
    options.validate()?;

    let total_pages = source.page_count();
    let selection = PageSelection::resolve(&options.pages, total_pages);

    let mut output_width_range: Option<(f32, f32)> = None;
    let mut added_width_total = 0.0;

    for index in 0..total_pages {
        let Some((width, height)) = source.page_size(index) else {
            continue;
        };
        let geometry =
            PageGeometry::for_margin(width, height, &options.margin, selection.contains(index));

        added_width_total += geometry.width - width;
        output_width_range = Some(match output_width_range {
            Some((min, max)) => (min.min(geometry.width), max.max(geometry.width)),
            None => (geometry.width, geometry.width),
        });
    }

    Ok(MarginStatistics {
        total_pages,
        pages_with_margin: selection.len(),
        output_width_range,
        added_width_total,
    })
}
