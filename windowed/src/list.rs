use alloc::sync::Arc;
use alloc::vec::Vec;
use core::cell::Cell;
use core::cmp;

use crate::{
    Align, AxisLayout, LayoutError, ListOptions, Placement, ScrollDirection, VisibleRange,
    WindowItem,
};

/// A headless windowed list for one scrollable axis.
///
/// The list holds no UI objects and not even the items themselves; it tracks
/// only the collection's `count` and uniform geometry. A host drives it by reporting
/// viewport sizes and scroll offsets, then consumes the realized window via
/// zero-allocation iteration (`for_each_window_item`): the list decides
/// *which* indices are realized and *where* they sit; producing visuals is
/// the host's job.
///
/// Every recomputation is O(1) in the collection size (O(window) when
/// enumerating items), so it is safe to call on every native scroll event
/// without debouncing.
#[derive(Clone, Debug)]
pub struct WindowedList {
    options: ListOptions,
    viewport_size: u32,
    scroll_offset: u64,
    is_scrolling: bool,
    scroll_direction: Option<ScrollDirection>,
    last_scroll_event_ms: Option<u64>,

    notify_depth: Cell<usize>,
    notify_pending: Cell<bool>,
}

impl WindowedList {
    /// Creates a new windowed list from options.
    ///
    /// Fails with [`LayoutError::InvalidGeometry`] when `options.item_size`
    /// is zero; every later geometry mutation re-validates, so a constructed
    /// list never divides by a zero stride.
    pub fn new(options: ListOptions) -> Result<Self, LayoutError> {
        options.axis().validate()?;
        wdebug!(
            count = options.count,
            item_size = options.item_size,
            overscan = options.overscan,
            "WindowedList::new"
        );
        Ok(Self {
            viewport_size: options.initial_viewport,
            scroll_offset: options.initial_offset,
            is_scrolling: false,
            scroll_direction: None,
            last_scroll_event_ms: None,
            options,
            notify_depth: Cell::new(0),
            notify_pending: Cell::new(false),
        })
    }

    pub fn options(&self) -> &ListOptions {
        &self.options
    }

    /// Replaces the options wholesale.
    ///
    /// The scroll offset is preserved but re-clamped against the new extent,
    /// so shrinking the collection (or its geometry) cannot leave the view
    /// scrolled into space that no longer exists.
    pub fn set_options(&mut self, options: ListOptions) -> Result<(), LayoutError> {
        options.axis().validate()?;
        self.options = options;
        wtrace!(
            count = self.options.count,
            item_size = self.options.item_size,
            overscan = self.options.overscan,
            "WindowedList::set_options"
        );
        self.reclamp_scroll_offset();
        self.notify();
        Ok(())
    }

    /// Clones the current options, applies `f`, then delegates to
    /// [`Self::set_options`].
    pub fn update_options(
        &mut self,
        f: impl FnOnce(&mut ListOptions),
    ) -> Result<(), LayoutError> {
        let mut next = self.options.clone();
        f(&mut next);
        self.set_options(next)
    }

    pub fn set_on_change(
        &mut self,
        on_change: Option<impl Fn(&WindowedList, bool) + Send + Sync + 'static>,
    ) {
        self.options.on_change = on_change.map(|f| Arc::new(f) as _);
        self.notify();
    }

    fn notify_now(&self) {
        if let Some(cb) = &self.options.on_change {
            cb(self, self.is_scrolling);
        }
    }

    fn notify(&self) {
        if self.notify_depth.get() > 0 {
            self.notify_pending.set(true);
            return;
        }
        self.notify_now();
    }

    /// Coalesces the updates made inside `f` into one `on_change` call.
    ///
    /// Recommended for hosts: a typical frame updates the viewport size and
    /// the scroll offset together, and the callback usually drives rendering.
    pub fn batch_update(&mut self, f: impl FnOnce(&mut Self)) {
        let depth = self.notify_depth.get();
        self.notify_depth.set(depth.saturating_add(1));

        f(self);

        let depth = self.notify_depth.get();
        debug_assert!(depth > 0, "notify_depth underflow");
        let next = depth.saturating_sub(1);
        self.notify_depth.set(next);

        if next == 0 && self.notify_pending.replace(false) {
            self.notify_now();
        }
    }

    fn axis(&self) -> AxisLayout {
        self.options.axis()
    }

    pub fn count(&self) -> usize {
        self.options.count
    }

    /// Updates the collection size (items appended, removed, or refiltered).
    ///
    /// No other reset is needed: the next range query re-derives everything
    /// from the new count. The scroll offset is preserved but clamped to the
    /// new maximum, so shrinking below the current offset does not strand the
    /// view past the end (growing never moves it).
    pub fn set_count(&mut self, count: usize) {
        if self.options.count == count {
            return;
        }
        wdebug!(prev = self.options.count, count, "WindowedList::set_count");
        self.options.count = count;
        self.reclamp_scroll_offset();
        self.notify();
    }

    pub fn item_size(&self) -> u32 {
        self.options.item_size
    }

    pub fn set_item_size(&mut self, item_size: u32) -> Result<(), LayoutError> {
        if self.options.item_size == item_size {
            return Ok(());
        }
        AxisLayout::new(item_size).validate()?;
        self.options.item_size = item_size;
        self.reclamp_scroll_offset();
        self.notify();
        Ok(())
    }

    pub fn overscan(&self) -> usize {
        self.options.overscan
    }

    pub fn set_overscan(&mut self, overscan: usize) {
        if self.options.overscan == overscan {
            return;
        }
        self.options.overscan = overscan;
        self.notify();
    }

    pub fn set_gap(&mut self, gap: u32) {
        if self.options.gap == gap {
            return;
        }
        self.options.gap = gap;
        self.reclamp_scroll_offset();
        self.notify();
    }

    pub fn set_padding(&mut self, padding_start: u32, padding_end: u32) {
        if self.options.padding_start == padding_start && self.options.padding_end == padding_end {
            return;
        }
        self.options.padding_start = padding_start;
        self.options.padding_end = padding_end;
        self.reclamp_scroll_offset();
        self.notify();
    }

    pub fn viewport_size(&self) -> u32 {
        self.viewport_size
    }

    /// Applies a viewport resize from the host.
    ///
    /// The stored scroll offset is deliberately left alone: it may be
    /// momentarily out of range mid-resize, and all range math clamps
    /// internally, so no invalid window can be produced.
    pub fn set_viewport_size(&mut self, size: u32) {
        if self.viewport_size == size {
            return;
        }
        self.viewport_size = size;
        self.notify();
    }

    pub fn scroll_offset(&self) -> u64 {
        self.scroll_offset
    }

    pub fn set_scroll_offset(&mut self, offset: u64) {
        if self.scroll_offset == offset {
            return;
        }
        let prev = self.scroll_offset;
        self.scroll_offset = offset;
        self.scroll_direction = match offset.cmp(&prev) {
            cmp::Ordering::Greater => Some(ScrollDirection::Forward),
            cmp::Ordering::Less => Some(ScrollDirection::Backward),
            cmp::Ordering::Equal => self.scroll_direction,
        };
        self.notify();
    }

    pub fn set_scroll_offset_clamped(&mut self, offset: u64) {
        let clamped = self.clamp_scroll_offset(offset);
        self.set_scroll_offset(clamped);
    }

    /// Applies a scroll offset update from the host (wheel/drag/native scroll
    /// event), and marks the list as scrolling.
    pub fn apply_scroll_offset_event(&mut self, offset: u64, now_ms: u64) {
        wtrace!(offset, now_ms, "apply_scroll_offset_event");
        self.batch_update(|v| {
            v.set_scroll_offset(offset);
            v.notify_scroll_event(now_ms);
        });
    }

    /// Same as [`Self::apply_scroll_offset_event`], but clamps the offset.
    pub fn apply_scroll_offset_event_clamped(&mut self, offset: u64, now_ms: u64) {
        wtrace!(offset, now_ms, "apply_scroll_offset_event_clamped");
        self.batch_update(|v| {
            v.set_scroll_offset_clamped(offset);
            v.notify_scroll_event(now_ms);
        });
    }

    pub fn set_viewport_and_scroll(&mut self, viewport_size: u32, scroll_offset: u64) {
        self.batch_update(|v| {
            v.set_viewport_size(viewport_size);
            v.set_scroll_offset(scroll_offset);
        });
    }

    pub fn set_viewport_and_scroll_clamped(&mut self, viewport_size: u32, scroll_offset: u64) {
        self.batch_update(|v| {
            v.set_viewport_size(viewport_size);
            v.set_scroll_offset_clamped(scroll_offset);
        });
    }

    pub fn is_scrolling(&self) -> bool {
        self.is_scrolling
    }

    pub fn scroll_direction(&self) -> Option<ScrollDirection> {
        self.scroll_direction
    }

    pub fn set_is_scrolling(&mut self, is_scrolling: bool) {
        if self.is_scrolling == is_scrolling {
            return;
        }
        self.is_scrolling = is_scrolling;
        if !is_scrolling {
            self.scroll_direction = None;
            self.last_scroll_event_ms = None;
        }
        self.notify();
    }

    pub fn notify_scroll_event(&mut self, now_ms: u64) {
        self.last_scroll_event_ms = Some(now_ms);
        self.set_is_scrolling(true);
    }

    /// Debounced `is_scrolling` reset; call once per frame/timer tick.
    pub fn update_scrolling(&mut self, now_ms: u64) {
        if !self.is_scrolling {
            return;
        }
        let Some(last) = self.last_scroll_event_ms else {
            return;
        };
        if now_ms.saturating_sub(last) >= self.options.is_scrolling_reset_delay_ms {
            self.set_is_scrolling(false);
        }
    }

    pub fn total_extent(&self) -> u64 {
        self.axis().total_extent(self.options.count)
    }

    pub fn max_scroll_offset(&self) -> u64 {
        self.axis()
            .max_scroll_offset(self.viewport_size, self.options.count)
    }

    pub fn clamp_scroll_offset(&self, offset: u64) -> u64 {
        offset.min(self.max_scroll_offset())
    }

    fn reclamp_scroll_offset(&mut self) {
        let max = self.max_scroll_offset();
        if self.scroll_offset > max {
            self.scroll_offset = max;
        }
    }

    /// The strict visible range (no overscan) for the current state.
    pub fn visible_range(&self) -> VisibleRange {
        self.visible_range_for(self.scroll_offset, self.viewport_size)
    }

    pub fn visible_range_for(&self, scroll_offset: u64, viewport_size: u32) -> VisibleRange {
        // Geometry is validated on every mutation path, so the axis math
        // cannot fail here; an empty range is the only sensible fallback.
        self.axis()
            .visible_range(scroll_offset, viewport_size, self.options.count)
            .unwrap_or(VisibleRange::EMPTY)
    }

    /// The windowed (overscanned) range to realize for the current state.
    pub fn windowed_range(&self) -> VisibleRange {
        self.windowed_range_for(self.scroll_offset, self.viewport_size)
    }

    pub fn windowed_range_for(&self, scroll_offset: u64, viewport_size: u32) -> VisibleRange {
        self.axis()
            .windowed_range(
                scroll_offset,
                viewport_size,
                self.options.count,
                self.options.overscan,
            )
            .unwrap_or(VisibleRange::EMPTY)
    }

    /// Spacer extent and window translation for the current windowed range.
    pub fn placement(&self) -> Placement {
        self.placement_for(self.scroll_offset, self.viewport_size)
    }

    pub fn placement_for(&self, scroll_offset: u64, viewport_size: u32) -> Placement {
        let range = self.windowed_range_for(scroll_offset, viewport_size);
        self.axis().placement(self.options.count, range)
    }

    pub fn item_start(&self, index: usize) -> Option<u64> {
        (index < self.options.count).then(|| self.axis().item_start(index))
    }

    pub fn item_end(&self, index: usize) -> Option<u64> {
        (index < self.options.count).then(|| self.axis().item_end(index))
    }

    pub fn index_at_offset(&self, offset: u64) -> Option<usize> {
        self.axis().index_at_offset(offset, self.options.count)
    }

    /// Enumerates the realized items for the current state.
    pub fn for_each_window_item(&self, f: impl FnMut(WindowItem)) {
        self.for_each_window_item_for(self.scroll_offset, self.viewport_size, f);
    }

    pub fn for_each_window_item_for(
        &self,
        scroll_offset: u64,
        viewport_size: u32,
        mut f: impl FnMut(WindowItem),
    ) {
        let range = self.windowed_range_for(scroll_offset, viewport_size);
        if range.is_empty() {
            return;
        }

        let axis = self.axis();
        let size = self.options.item_size;
        for index in range.start_index..range.end_index {
            f(WindowItem {
                index,
                start: axis.item_start(index),
                size,
            });
        }
    }

    /// Collects realized items into `out` (clears `out` first).
    ///
    /// Convenience wrapper around [`Self::for_each_window_item`]; hosts on a
    /// hot path should prefer the iteration API and reuse a scratch buffer.
    pub fn collect_window_items(&self, out: &mut Vec<WindowItem>) {
        out.clear();
        self.for_each_window_item(|it| out.push(it));
    }

    /// Jumps the scroll offset so that `index` is brought into view.
    ///
    /// This sets the internal `scroll_offset` to the computed (clamped)
    /// target and fires `on_change`. It does **not** mark the list as
    /// "scrolling"; use `apply_scroll_offset_event_clamped` for user-scroll
    /// semantics.
    ///
    /// Returns the applied (clamped) offset.
    pub fn scroll_to_index(&mut self, index: usize, align: Align) -> u64 {
        let offset = self.scroll_to_index_offset(index, align);
        self.set_scroll_offset(offset);
        offset
    }

    pub fn scroll_to_index_offset(&self, index: usize, align: Align) -> u64 {
        if self.options.count == 0 {
            return 0;
        }
        let index = index.min(self.options.count - 1);
        let axis = self.axis();
        let start = axis.item_start(index);
        let end = axis.item_end(index);
        let view = self.viewport_size as u64;

        let target = match align {
            Align::Start => start,
            Align::End => end.saturating_sub(view),
            Align::Center => {
                let center = start.saturating_add(self.options.item_size as u64 / 2);
                center.saturating_sub(view / 2)
            }
            Align::Auto => {
                let cur = self.scroll_offset;
                let cur_end = cur.saturating_add(view);
                if start >= cur && end <= cur_end {
                    cur
                } else if start < cur {
                    start
                } else {
                    end.saturating_sub(view)
                }
            }
        };

        self.clamp_scroll_offset(target)
    }
}
