use alloc::vec::Vec;

use crate::{BalancedLayout, PlacedItem, Viewport, WindowedColumn, WindowedLayout};

/// Whether `item` intersects the viewport expanded by `threshold` on both edges.
pub fn is_visible(item: &PlacedItem, viewport: Viewport, threshold: f64) -> bool {
    item.top + item.height - viewport.scroll_offset > -threshold
        && viewport.height - (item.top - viewport.scroll_offset) > -threshold
}

/// Splits every column into a visible run plus top/bottom fillers.
///
/// Without a viewport every item is visible and both fillers are zero. Otherwise the leading
/// hidden items of a column collapse into `top_filler` and every hidden item after the first
/// visible one collapses into `bottom_filler`; `top_hidden`/`bottom_hidden` count them. A column
/// with no visible item is entirely top filler.
pub fn window(
    layout: &BalancedLayout,
    viewport: Option<Viewport>,
    threshold: f64,
) -> WindowedLayout {
    let row_gap = layout.row_gap;
    let Some(viewport) = viewport else {
        return WindowedLayout {
            columns: layout
                .columns
                .iter()
                .map(|c| WindowedColumn {
                    items: c.items.clone(),
                    top_filler: 0.0,
                    bottom_filler: 0.0,
                    top_hidden: 0,
                    bottom_hidden: 0,
                })
                .collect(),
        };
    };

    let columns = layout
        .columns
        .iter()
        .map(|column| {
            let mut items = Vec::new();
            let mut top_run = 0.0f64;
            let mut bottom_run = 0.0f64;
            let mut top_hidden = 0;
            let mut bottom_hidden = 0;
            let mut seen_visible = false;

            for item in &column.items {
                if is_visible(item, viewport, threshold) {
                    seen_visible = true;
                    items.push(*item);
                } else if seen_visible {
                    bottom_run += item.height + row_gap;
                    bottom_hidden += 1;
                } else {
                    top_run += item.height + row_gap;
                    top_hidden += 1;
                }
            }

            mtrace!(visible = items.len(), top_run, bottom_run, "window column");

            WindowedColumn {
                items,
                top_filler: (top_run - row_gap).max(0.0),
                bottom_filler: (bottom_run - row_gap).max(0.0),
                top_hidden,
                bottom_hidden,
            }
        })
        .collect();

    WindowedLayout { columns }
}
