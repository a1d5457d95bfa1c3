use alloc::sync::Arc;
use core::fmt;

use windowed::WindowedList;

/// The flags gating an incremental-load request.
///
/// A request is issued only when `has_more && !is_loading`; `is_loading` is
/// cleared exclusively by the collaborator reporting back through
/// [`InfiniteLoader::finish_load`] or [`InfiniteLoader::fail_load`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LoadState {
    pub has_more: bool,
    pub is_loading: bool,
}

/// The external "fetch more" collaborator, invoked fire-and-forget.
pub type LoadMoreCallback = Arc<dyn Fn() + Send + Sync>;

/// Wraps a [`WindowedList`] with a near-end-of-scroll detector that asks an
/// external collaborator for more items.
///
/// On every scroll event the loader checks whether the viewport bottom has
/// crossed `total_extent - viewport * load_factor`; crossing it while
/// `has_more && !is_loading` invokes the callback exactly once. The loader
/// never guesses at completion: the collaborator reports back via
/// [`Self::finish_load`] / [`Self::fail_load`], and carries any retry policy
/// of its own.
#[derive(Clone)]
pub struct InfiniteLoader {
    list: WindowedList,
    load_factor: u32,
    state: LoadState,
    load_more: LoadMoreCallback,
}

impl InfiniteLoader {
    pub fn new(list: WindowedList, load_more: impl Fn() + Send + Sync + 'static) -> Self {
        Self {
            list,
            load_factor: 2,
            state: LoadState {
                has_more: true,
                is_loading: false,
            },
            load_more: Arc::new(load_more),
        }
    }

    /// Sets how far ahead of the end the request fires, in viewports.
    pub fn with_load_factor(mut self, load_factor: u32) -> Self {
        self.load_factor = load_factor;
        self
    }

    pub fn list(&self) -> &WindowedList {
        &self.list
    }

    pub fn list_mut(&mut self) -> &mut WindowedList {
        &mut self.list
    }

    pub fn into_list(self) -> WindowedList {
        self.list
    }

    pub fn load_state(&self) -> LoadState {
        self.state
    }

    pub fn has_more(&self) -> bool {
        self.state.has_more
    }

    pub fn is_loading(&self) -> bool {
        self.state.is_loading
    }

    /// Overrides the `has_more` flag, e.g. when the collaborator learns the
    /// end of the data set out of band.
    pub fn set_has_more(&mut self, has_more: bool) {
        self.state.has_more = has_more;
    }

    pub fn on_viewport_size(&mut self, viewport_size: u32) {
        self.list.set_viewport_size(viewport_size);
    }

    /// Applies a scroll event and evaluates the load threshold.
    pub fn on_scroll(&mut self, scroll_offset: u64, now_ms: u64) {
        self.list.apply_scroll_offset_event(scroll_offset, now_ms);
        self.maybe_request_more();
    }

    /// Evaluates the threshold and fires the callback when it is crossed.
    ///
    /// `is_loading` is set before the callback runs: re-entrant scroll events
    /// (and anything else that happens before the fetch settles) must observe
    /// the in-flight request, or a burst of events past the threshold would
    /// fan out into duplicate fetches. Returns `true` when a request was
    /// issued.
    ///
    /// Public so hosts can re-evaluate outside scroll events, e.g. right
    /// after [`Self::finish_load`] when the user is parked at the bottom.
    pub fn maybe_request_more(&mut self) -> bool {
        if !self.state.has_more || self.state.is_loading {
            return false;
        }

        let viewport = self.list.viewport_size() as u64;
        let scroll_bottom = self.list.scroll_offset().saturating_add(viewport);
        let threshold = self
            .list
            .total_extent()
            .saturating_sub(viewport.saturating_mul(self.load_factor as u64));
        if scroll_bottom < threshold {
            return false;
        }

        self.state.is_loading = true;
        (self.load_more)();
        true
    }

    /// Reports a completed fetch: the collection now holds `total_count`
    /// items and `has_more` says whether another page exists.
    pub fn finish_load(&mut self, total_count: usize, has_more: bool) {
        self.state.is_loading = false;
        self.state.has_more = has_more;
        self.list.set_count(total_count);
    }

    /// Reports a failed fetch. `has_more` is left untouched so a later
    /// scroll event can retry; the loader itself never re-issues a request.
    pub fn fail_load(&mut self) {
        self.state.is_loading = false;
    }
}

impl fmt::Debug for InfiniteLoader {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("InfiniteLoader")
            .field("list", &self.list)
            .field("load_factor", &self.load_factor)
            .field("state", &self.state)
            .finish_non_exhaustive()
    }
}
