use alloc::vec::Vec;

use crate::{GridCell, GridOptions, LayoutError, Placement, Viewport, VisibleRange};

/// A headless windowed grid: two independent per-axis window computations
/// composed into a 2-D cell enumeration.
///
/// The collection stays flat (`0..count`); cells wrap into rows of
/// `columns_per_row = max(1, viewport.width / item_width)`. The vertical
/// window runs over rows, the horizontal window over columns, and the cross
/// product of the two ranges is mapped back to flat indices. Indices past the
/// end of the collection (the unfilled tail of the last row) are discarded
/// during enumeration; without that step a partially filled last row would
/// realize cells that do not exist.
#[derive(Clone, Debug)]
pub struct WindowedGrid {
    options: GridOptions,
    viewport: Viewport,
    scroll_x: u64,
    scroll_y: u64,
}

impl WindowedGrid {
    /// Creates a new windowed grid from options.
    ///
    /// Fails with [`LayoutError::InvalidGeometry`] when either cell extent
    /// is zero.
    pub fn new(options: GridOptions) -> Result<Self, LayoutError> {
        options.row_axis().validate()?;
        options.col_axis().validate()?;
        wdebug!(
            count = options.count,
            item_width = options.item_width,
            item_height = options.item_height,
            "WindowedGrid::new"
        );
        Ok(Self {
            options,
            viewport: Viewport::default(),
            scroll_x: 0,
            scroll_y: 0,
        })
    }

    pub fn options(&self) -> &GridOptions {
        &self.options
    }

    pub fn count(&self) -> usize {
        self.options.count
    }

    /// Updates the collection size. The scroll offsets are preserved but
    /// clamped against the new extents.
    pub fn set_count(&mut self, count: usize) {
        if self.options.count == count {
            return;
        }
        self.options.count = count;
        self.reclamp_scroll();
    }

    pub fn set_overscan(&mut self, overscan: usize) {
        self.options.overscan = overscan;
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    /// Applies a viewport resize. Resizing the width re-derives
    /// `columns_per_row` (and with it the row count), so both offsets are
    /// re-clamped.
    pub fn set_viewport(&mut self, width: u32, height: u32) {
        self.viewport = Viewport { width, height };
        self.reclamp_scroll();
    }

    pub fn scroll_x(&self) -> u64 {
        self.scroll_x
    }

    pub fn scroll_y(&self) -> u64 {
        self.scroll_y
    }

    /// Stores a scroll position from the host. Out-of-range offsets are
    /// tolerated; range math clamps internally.
    pub fn set_scroll(&mut self, scroll_x: u64, scroll_y: u64) {
        wtrace!(scroll_x, scroll_y, "WindowedGrid::set_scroll");
        self.scroll_x = scroll_x;
        self.scroll_y = scroll_y;
    }

    pub fn set_scroll_clamped(&mut self, scroll_x: u64, scroll_y: u64) {
        self.scroll_x = scroll_x.min(self.max_scroll_x());
        self.scroll_y = scroll_y.min(self.max_scroll_y());
    }

    fn reclamp_scroll(&mut self) {
        let x = self.scroll_x.min(self.max_scroll_x());
        let y = self.scroll_y.min(self.max_scroll_y());
        self.scroll_x = x;
        self.scroll_y = y;
    }

    /// How many cells fit in one row at the current viewport width.
    ///
    /// Never zero: a viewport narrower than one cell still lays out a single
    /// (clipped) column, which also keeps the row arithmetic divide-safe.
    pub fn columns_per_row(&self) -> usize {
        ((self.viewport.width / self.options.item_width) as usize).max(1)
    }

    /// Number of rows needed for the collection at the current width.
    pub fn row_count(&self) -> usize {
        self.options.count.div_ceil(self.columns_per_row())
    }

    pub fn vertical_extent(&self) -> u64 {
        self.options.row_axis().total_extent(self.row_count())
    }

    pub fn horizontal_extent(&self) -> u64 {
        self.options.col_axis().total_extent(self.columns_per_row())
    }

    pub fn max_scroll_y(&self) -> u64 {
        self.options
            .row_axis()
            .max_scroll_offset(self.viewport.height, self.row_count())
    }

    pub fn max_scroll_x(&self) -> u64 {
        self.options
            .col_axis()
            .max_scroll_offset(self.viewport.width, self.columns_per_row())
    }

    /// The windowed row interval for the current state.
    pub fn row_range(&self) -> VisibleRange {
        self.options
            .row_axis()
            .windowed_range(
                self.scroll_y,
                self.viewport.height,
                self.row_count(),
                self.options.overscan,
            )
            .unwrap_or(VisibleRange::EMPTY)
    }

    /// The windowed column interval for the current state.
    pub fn col_range(&self) -> VisibleRange {
        self.options
            .col_axis()
            .windowed_range(
                self.scroll_x,
                self.viewport.width,
                self.columns_per_row(),
                self.options.overscan,
            )
            .unwrap_or(VisibleRange::EMPTY)
    }

    /// Spacer extent and window translation for the vertical axis.
    pub fn vertical_placement(&self) -> Placement {
        self.options
            .row_axis()
            .placement(self.row_count(), self.row_range())
    }

    /// Spacer extent and window translation for the horizontal axis.
    pub fn horizontal_placement(&self) -> Placement {
        self.options
            .col_axis()
            .placement(self.columns_per_row(), self.col_range())
    }

    /// Locates a flat index in the current column layout.
    pub fn cell(&self, index: usize) -> Option<GridCell> {
        if index >= self.options.count {
            return None;
        }
        let columns = self.columns_per_row();
        Some(GridCell {
            index,
            row: index / columns,
            col: index % columns,
        })
    }

    /// Enumerates the realized cells for the current state, in row-major
    /// order.
    ///
    /// Every `(row, col)` pair inside both windowed ranges maps to
    /// `index = row * columns_per_row + col`; pairs whose index lands past
    /// the end of the collection are discarded, so the unfilled tail of the
    /// last row is never realized.
    pub fn for_each_cell(&self, mut f: impl FnMut(GridCell)) {
        let rows = self.row_range();
        let cols = self.col_range();
        if rows.is_empty() || cols.is_empty() {
            return;
        }

        let columns = self.columns_per_row();
        let count = self.options.count;
        for row in rows.start_index..rows.end_index {
            for col in cols.start_index..cols.end_index {
                let index = row * columns + col;
                if index >= count {
                    continue;
                }
                f(GridCell { index, row, col });
            }
        }
    }

    /// Collects realized cells into `out` (clears `out` first).
    pub fn collect_cells(&self, out: &mut Vec<GridCell>) {
        out.clear();
        self.for_each_cell(|cell| out.push(cell));
    }
}
