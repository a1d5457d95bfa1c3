use alloc::sync::Arc;

use crate::AxisLayout;
use crate::list::WindowedList;

/// A callback fired when a windowed list's state changes.
///
/// The second argument is `is_scrolling`. This is the seam a host UI uses to
/// learn that the set of realized items may have changed; notifications are
/// coalesced by [`WindowedList::batch_update`] so one scroll frame produces
/// one callback.
pub type OnChangeCallback = Arc<dyn Fn(&WindowedList, bool) + Send + Sync>;

/// Configuration for [`WindowedList`].
///
/// Cheap to clone: the callback is stored in an `Arc` so hosts can tweak a
/// few fields and call `WindowedList::set_options` without reallocating
/// closures.
#[derive(Clone)]
pub struct ListOptions {
    /// Number of items in the collection.
    pub count: usize,
    /// Uniform item size in the scroll axis. Must be non-zero.
    pub item_size: u32,
    /// Space between items.
    pub gap: u32,
    /// Padding before the first item.
    pub padding_start: u32,
    /// Padding after the last item.
    pub padding_end: u32,
    /// Extra items realized beyond the strictly-visible window on each side,
    /// to avoid blank flashes during fast scrolling.
    pub overscan: usize,
    /// Initial scroll offset.
    pub initial_offset: u64,
    /// Initial viewport size in the scroll axis.
    pub initial_viewport: u32,
    /// Optional callback fired when the list's state changes.
    pub on_change: Option<OnChangeCallback>,
    /// Debounced fallback duration for resetting `is_scrolling`.
    pub is_scrolling_reset_delay_ms: u64,
}

impl ListOptions {
    pub fn new(count: usize, item_size: u32) -> Self {
        Self {
            count,
            item_size,
            gap: 0,
            padding_start: 0,
            padding_end: 0,
            overscan: 4,
            initial_offset: 0,
            initial_viewport: 0,
            on_change: None,
            is_scrolling_reset_delay_ms: 150,
        }
    }

    pub(crate) fn axis(&self) -> AxisLayout {
        AxisLayout::new(self.item_size)
            .with_gap(self.gap)
            .with_padding(self.padding_start, self.padding_end)
    }

    pub fn with_gap(mut self, gap: u32) -> Self {
        self.gap = gap;
        self
    }

    pub fn with_padding(mut self, padding_start: u32, padding_end: u32) -> Self {
        self.padding_start = padding_start;
        self.padding_end = padding_end;
        self
    }

    pub fn with_overscan(mut self, overscan: usize) -> Self {
        self.overscan = overscan;
        self
    }

    pub fn with_initial_offset(mut self, initial_offset: u64) -> Self {
        self.initial_offset = initial_offset;
        self
    }

    pub fn with_initial_viewport(mut self, initial_viewport: u32) -> Self {
        self.initial_viewport = initial_viewport;
        self
    }

    pub fn with_on_change(
        mut self,
        on_change: Option<impl Fn(&WindowedList, bool) + Send + Sync + 'static>,
    ) -> Self {
        self.on_change = on_change.map(|f| Arc::new(f) as _);
        self
    }

    pub fn with_is_scrolling_reset_delay_ms(mut self, delay_ms: u64) -> Self {
        self.is_scrolling_reset_delay_ms = delay_ms;
        self
    }
}

impl core::fmt::Debug for ListOptions {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("ListOptions")
            .field("count", &self.count)
            .field("item_size", &self.item_size)
            .field("gap", &self.gap)
            .field("padding_start", &self.padding_start)
            .field("padding_end", &self.padding_end)
            .field("overscan", &self.overscan)
            .field("initial_offset", &self.initial_offset)
            .field("initial_viewport", &self.initial_viewport)
            .field(
                "is_scrolling_reset_delay_ms",
                &self.is_scrolling_reset_delay_ms,
            )
            .finish_non_exhaustive()
    }
}

/// Configuration for [`crate::WindowedGrid`].
#[derive(Clone, Copy, Debug)]
pub struct GridOptions {
    /// Number of cells in the collection.
    pub count: usize,
    /// Uniform cell width. Must be non-zero.
    pub item_width: u32,
    /// Uniform cell height. Must be non-zero.
    pub item_height: u32,
    /// Extra rows/columns realized beyond the strictly-visible window on
    /// each side.
    pub overscan: usize,
}

impl GridOptions {
    pub fn new(count: usize, item_width: u32, item_height: u32) -> Self {
        Self {
            count,
            item_width,
            item_height,
            overscan: 1,
        }
    }

    pub fn with_overscan(mut self, overscan: usize) -> Self {
        self.overscan = overscan;
        self
    }

    pub(crate) fn row_axis(&self) -> AxisLayout {
        AxisLayout::new(self.item_height)
    }

    pub(crate) fn col_axis(&self) -> AxisLayout {
        AxisLayout::new(self.item_width)
    }
}
