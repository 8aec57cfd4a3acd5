use alloc::vec::Vec;

use crate::{BalancedLayout, Column, LayoutError, PlacedItem};

/// Assigns items to columns, shortest column first.
///
/// Each item, in input order, goes to the column with the smallest accumulated height (ties go
/// to the lowest column index). Within a column items keep their input order and stack from
/// `origin_top` downwards, separated by `row_gap`. Runs in O(N·columns).
///
/// Returns [`LayoutError::InvalidColumns`] when `columns` is zero.
pub fn balance(
    heights: &[f64],
    columns: usize,
    row_gap: f64,
    origin_top: f64,
) -> Result<BalancedLayout, LayoutError> {
    if columns == 0 {
        return Err(LayoutError::InvalidColumns);
    }

    let mut out: Vec<Column> = (0..columns).map(|_| Column::default()).collect();
    let mut accumulated = alloc::vec![0.0f64; columns];

    for (index, &height) in heights.iter().enumerate() {
        let col = shortest_column(&accumulated);
        let column = &mut out[col];
        let top = match column.items.last() {
            Some(prev) => prev.top + prev.height + row_gap,
            None => origin_top,
        };
        column.items.push(PlacedItem { index, height, top });
        accumulated[col] += height + row_gap;
    }

    for (column, height) in out.iter_mut().zip(accumulated) {
        column.height = height;
    }

    mtrace!(
        items = heights.len(),
        columns,
        row_gap,
        "balance"
    );

    Ok(BalancedLayout {
        columns: out,
        row_gap,
    })
}

/// Index of the smallest accumulated height; the first match wins on ties.
pub fn shortest_column(accumulated: &[f64]) -> usize {
    let mut index = 0;
    let mut best = accumulated.first().copied().unwrap_or(0.0);
    for (i, &h) in accumulated.iter().enumerate().skip(1) {
        if h < best {
            best = h;
            index = i;
        }
    }
    index
}
