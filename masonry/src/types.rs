use alloc::vec::Vec;

/// The scroll state of the external container the grid is virtualized against.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Viewport {
    /// Scroll offset of the container (same coordinate space as item tops).
    pub scroll_offset: f64,
    /// Visible height of the container.
    pub height: f64,
}

impl Viewport {
    pub fn new(scroll_offset: f64, height: f64) -> Self {
        Self {
            scroll_offset,
            height,
        }
    }
}

/// An item placed by the balancer.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PlacedItem {
    /// Index in the input order.
    pub index: usize,
    pub height: f64,
    /// Absolute top offset (includes the layout origin).
    pub top: f64,
}

impl PlacedItem {
    pub fn bottom(&self) -> f64 {
        self.top + self.height
    }
}

/// A placed item together with its identity key.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PlacedItemKeyed<K> {
    pub key: K,
    pub column: usize,
    pub index: usize,
    pub height: f64,
    pub top: f64,
}

/// One column of a [`BalancedLayout`].
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Column {
    pub items: Vec<PlacedItem>,
    /// Accumulated height: `sum(height + row_gap)` over the column's items.
    pub height: f64,
}

impl Column {
    /// Rendered extent of the column (the accumulated height without the trailing gap).
    pub fn extent(&self, row_gap: f64) -> f64 {
        if self.items.is_empty() {
            return 0.0;
        }
        (self.height - row_gap).max(0.0)
    }
}

/// The column assignment produced by [`crate::balance`].
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BalancedLayout {
    pub columns: Vec<Column>,
    pub row_gap: f64,
}

impl BalancedLayout {
    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    pub fn column(&self, index: usize) -> Option<&Column> {
        self.columns.get(index)
    }

    pub fn item_count(&self) -> usize {
        self.columns.iter().map(|c| c.items.len()).sum()
    }

    /// Sum of all column accumulators.
    pub fn total_height(&self) -> f64 {
        self.columns.iter().map(|c| c.height).sum()
    }

    /// Extent of the tallest column, i.e. the height the grid occupies.
    pub fn height(&self) -> f64 {
        self.columns
            .iter()
            .map(|c| c.extent(self.row_gap))
            .fold(0.0, f64::max)
    }
}

/// One column after windowing.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct WindowedColumn {
    /// The visible run, in top-to-bottom order.
    pub items: Vec<PlacedItem>,
    pub top_filler: f64,
    pub bottom_filler: f64,
    /// Number of hidden items above the visible run.
    ///
    /// Render the top filler whenever this is non-zero, even if `top_filler` is `0.0` (a run
    /// of zero-height items still occupies its gap).
    pub top_hidden: usize,
    /// Number of hidden items below the visible run.
    pub bottom_hidden: usize,
}

impl WindowedColumn {
    /// Rendered extent of the column: fillers, visible items and the gaps between them.
    ///
    /// A filler is rendered as one block when its run holds at least one item.
    pub fn extent(&self, row_gap: f64) -> f64 {
        let mut blocks = self.items.len();
        let mut sum: f64 = self.items.iter().map(|it| it.height).sum();
        if self.top_hidden > 0 {
            blocks += 1;
            sum += self.top_filler;
        }
        if self.bottom_hidden > 0 {
            blocks += 1;
            sum += self.bottom_filler;
        }
        if blocks > 1 {
            sum += row_gap * (blocks - 1) as f64;
        }
        sum
    }
}

/// The per-column visible items and filler heights handed to the renderer.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct WindowedLayout {
    pub columns: Vec<WindowedColumn>,
}

impl WindowedLayout {
    pub fn visible_count(&self) -> usize {
        self.columns.iter().map(|c| c.items.len()).sum()
    }
}

/// Where a layout instance is in the re-layout protocol.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum LayoutPhase {
    /// Nothing has been measured yet.
    #[default]
    Uninitialized,
    /// A measurement pass is requested and waits for the adapter's layout commit.
    Measuring,
    /// A balanced, windowed layout has been published.
    LaidOut,
}
