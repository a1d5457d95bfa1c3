use core::cmp;

use crate::{LayoutError, Placement, VisibleRange};

/// Uniform per-axis layout: the pure range/offset arithmetic the rest of the
/// engine is built on.
///
/// Every item occupies `item_size` units in the scroll axis, separated by
/// `gap`, with optional padding before the first and after the last item.
/// Because sizes are uniform, every query here is closed-form O(1): there is
/// no per-item bookkeeping, which is what keeps scroll handling constant-time
/// for collections of any size.
///
/// All methods are pure; `WindowedList`/`WindowedGrid` hold a validated
/// `AxisLayout` and call into it on every scroll/resize event.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AxisLayout {
    /// Size of every item in the scroll axis. Must be non-zero.
    pub item_size: u32,
    /// Space between adjacent items (not applied after the last item).
    pub gap: u32,
    /// Padding before the first item.
    pub padding_start: u32,
    /// Padding after the last item.
    pub padding_end: u32,
}

impl AxisLayout {
    pub fn new(item_size: u32) -> Self {
        Self {
            item_size,
            gap: 0,
            padding_start: 0,
            padding_end: 0,
        }
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

    /// Rejects geometry the range math cannot divide by.
    pub fn validate(&self) -> Result<(), LayoutError> {
        if self.item_size == 0 {
            return Err(LayoutError::InvalidGeometry {
                item_size: self.item_size,
            });
        }
        Ok(())
    }

    /// Distance from one item's start to the next item's start.
    pub fn stride(&self) -> u64 {
        self.item_size as u64 + self.gap as u64
    }

    /// Full scrollable extent for `count` items.
    ///
    /// This sizes the spacer element so native scrollbars behave correctly
    /// for the whole collection even though only a window is realized.
    pub fn total_extent(&self, count: usize) -> u64 {
        let padding = self.padding_start as u64 + self.padding_end as u64;
        if count == 0 {
            return padding;
        }
        let items = (count as u64).saturating_mul(self.item_size as u64);
        let gaps = (count as u64 - 1).saturating_mul(self.gap as u64);
        padding.saturating_add(items).saturating_add(gaps)
    }

    /// Start offset of the item at `index`.
    pub fn item_start(&self, index: usize) -> u64 {
        (self.padding_start as u64).saturating_add(self.stride().saturating_mul(index as u64))
    }

    /// End offset (exclusive of any trailing gap) of the item at `index`.
    pub fn item_end(&self, index: usize) -> u64 {
        self.item_start(index).saturating_add(self.item_size as u64)
    }

    /// Maps an offset to the item occupying it.
    ///
    /// Offsets before `padding_start` map to the first item and offsets inside
    /// a trailing gap map to the item preceding the gap; the result is clamped
    /// to `count - 1`. Returns `None` only for an empty collection.
    pub fn index_at_offset(&self, offset: u64, count: usize) -> Option<usize> {
        if count == 0 {
            return None;
        }
        let ps = self.padding_start as u64;
        if offset < ps {
            return Some(0);
        }
        let raw = (offset - ps) / self.stride();
        Some(cmp::min(raw, count as u64 - 1) as usize)
    }

    /// Largest scroll offset that still fills the viewport.
    pub fn max_scroll_offset(&self, viewport_size: u32, count: usize) -> u64 {
        self.total_extent(count).saturating_sub(viewport_size as u64)
    }

    /// The strict visible range: exactly the items intersecting
    /// `[scroll_offset, scroll_offset + viewport_size)`, with no overscan.
    ///
    /// Out-of-range offsets are tolerated (clamped to the maximum scroll
    /// offset), so this is safe to call mid-resize.
    pub fn visible_range(
        &self,
        scroll_offset: u64,
        viewport_size: u32,
        count: usize,
    ) -> Result<VisibleRange, LayoutError> {
        self.validate()?;
        if count == 0 || viewport_size == 0 {
            return Ok(VisibleRange::EMPTY);
        }

        let view = viewport_size as u64;
        let offset = cmp::min(scroll_offset, self.max_scroll_offset(viewport_size, count));
        let last = offset.saturating_add(view) - 1;

        // count > 0, so both lookups resolve; the fallback only keeps the
        // clamping in one place.
        let start = self.index_at_offset(offset, count).unwrap_or(count);
        let end = self
            .index_at_offset(last, count)
            .map(|i| i + 1)
            .unwrap_or(count);

        Ok(VisibleRange {
            start_index: cmp::min(start, count),
            end_index: cmp::min(end, count),
        })
    }

    /// The windowed (overscanned) range: the index interval to realize.
    ///
    /// ```text
    /// raw_start = floor((offset - padding_start) / stride)
    /// raw_end   = raw_start + ceil(viewport / stride) + overscan   (inclusive)
    /// start     = raw_start - overscan                             (>= 0)
    /// end       = min(count, raw_end + 1)                          (exclusive)
    /// ```
    ///
    /// Invariant: the strict visible range is always contained in the
    /// result, for any `overscan` (including 0). The extra realized items on
    /// both sides keep fast scrolling from revealing blank space before the
    /// next recomputation lands.
    pub fn windowed_range(
        &self,
        scroll_offset: u64,
        viewport_size: u32,
        count: usize,
        overscan: usize,
    ) -> Result<VisibleRange, LayoutError> {
        self.validate()?;
        if count == 0 || viewport_size == 0 {
            return Ok(VisibleRange::EMPTY);
        }

        let stride = self.stride();
        let offset = cmp::min(scroll_offset, self.max_scroll_offset(viewport_size, count));
        let offset_in_items = offset.saturating_sub(self.padding_start as u64);

        let raw_start = cmp::min(offset_in_items / stride, count as u64 - 1) as usize;
        let per_view = (viewport_size as u64).div_ceil(stride) as usize;
        let raw_end = raw_start
            .saturating_add(per_view)
            .saturating_add(overscan);

        Ok(VisibleRange {
            start_index: raw_start.saturating_sub(overscan),
            end_index: cmp::min(count, raw_end.saturating_add(1)),
        })
    }

    /// Where a realized `range` sits inside the full extent.
    ///
    /// `render_offset` is the start offset of the range's first item; an
    /// empty range renders nothing and places the (empty) window at zero.
    pub fn placement(&self, count: usize, range: VisibleRange) -> Placement {
        let render_offset = if range.is_empty() {
            0
        } else {
            self.item_start(range.start_index)
        };
        Placement {
            total_extent: self.total_extent(count),
            render_offset,
        }
    }
}
