use alloc::string::String;
use alloc::sync::Arc;
use alloc::vec::Vec;
use core::fmt;

use windowed::{LayoutError, ListOptions, WindowItem, WindowedList};

/// The external search-predicate collaborator.
pub type MatchPredicate<T> = Arc<dyn Fn(&T, &str) -> bool + Send + Sync>;

/// Composes a search predicate with a [`WindowedList`] by re-deriving the
/// backing collection before windowing.
///
/// The filtered collection is represented as `matched`: the source indices
/// that satisfy the predicate for the current query, in source order. The
/// inner list windows over `matched.len()`, so item identity is the index
/// within the *current* filtered collection; changing the query produces a
/// new index space, and no stale index can escape: the windowed range is
/// always derived from the filtered length.
///
/// Re-filtering is O(items) by nature; every scroll event afterwards stays
/// O(window).
pub struct FilteredWindow<T> {
    items: Vec<T>,
    query: String,
    matches: MatchPredicate<T>,
    matched: Vec<usize>,
    list: WindowedList,
}

impl<T> FilteredWindow<T> {
    /// Creates a filtered window over `items`.
    ///
    /// `options.count` is derived from the initial filter pass (with an empty
    /// query) and need not be set by the caller.
    pub fn new(
        items: Vec<T>,
        options: ListOptions,
        matches: impl Fn(&T, &str) -> bool + Send + Sync + 'static,
    ) -> Result<Self, LayoutError> {
        let list = WindowedList::new(options)?;
        let mut window = Self {
            items,
            query: String::new(),
            matches: Arc::new(matches),
            matched: Vec::new(),
            list,
        };
        window.refresh();
        Ok(window)
    }

    pub fn list(&self) -> &WindowedList {
        &self.list
    }

    pub fn list_mut(&mut self) -> &mut WindowedList {
        &mut self.list
    }

    pub fn items(&self) -> &[T] {
        &self.items
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    /// Number of items in the current filtered collection.
    pub fn len(&self) -> usize {
        self.matched.len()
    }

    pub fn is_empty(&self) -> bool {
        self.matched.is_empty()
    }

    /// Number of items in the unfiltered source collection.
    pub fn source_len(&self) -> usize {
        self.items.len()
    }

    /// Changes the query and re-derives the filtered collection.
    ///
    /// The scroll offset is not reset to the top; it is preserved and, when
    /// the filtered collection shrinks below it, clamped to the new extent by
    /// the list's count-change handling.
    pub fn set_query(&mut self, query: &str) {
        if self.query == query {
            return;
        }
        self.query = String::from(query);
        self.refresh();
    }

    /// Re-runs the predicate over all source items.
    pub fn refresh(&mut self) {
        self.matched.clear();
        for (index, item) in self.items.iter().enumerate() {
            if (self.matches)(item, &self.query) {
                self.matched.push(index);
            }
        }
        self.list.set_count(self.matched.len());
    }

    /// Replaces the source collection and re-filters.
    pub fn set_items(&mut self, items: Vec<T>) {
        self.items = items;
        self.refresh();
    }

    /// Appends one item, filtering it incrementally against the current
    /// query.
    pub fn push_item(&mut self, item: T) {
        let index = self.items.len();
        let hit = (self.matches)(&item, &self.query);
        self.items.push(item);
        if hit {
            self.matched.push(index);
            self.list.set_count(self.matched.len());
        }
    }

    /// Appends a batch of items (e.g. a freshly loaded page), filtering each
    /// against the current query.
    pub fn extend_items(&mut self, items: impl IntoIterator<Item = T>) {
        for item in items {
            let index = self.items.len();
            if (self.matches)(&item, &self.query) {
                self.matched.push(index);
            }
            self.items.push(item);
        }
        self.list.set_count(self.matched.len());
    }

    /// Looks up an item by its index in the filtered collection.
    pub fn get(&self, filtered_index: usize) -> Option<&T> {
        self.matched
            .get(filtered_index)
            .and_then(|&source| self.items.get(source))
    }

    /// Maps a filtered index back to its index in the source collection.
    pub fn source_index(&self, filtered_index: usize) -> Option<usize> {
        self.matched.get(filtered_index).copied()
    }

    pub fn on_viewport_size(&mut self, viewport_size: u32) {
        self.list.set_viewport_size(viewport_size);
    }

    pub fn on_scroll(&mut self, scroll_offset: u64, now_ms: u64) {
        self.list.apply_scroll_offset_event(scroll_offset, now_ms);
    }

    /// Enumerates the realized items of the filtered collection.
    ///
    /// `WindowItem::index` is the index within the filtered collection; the
    /// paired reference is the matching source item.
    pub fn for_each_visible(&self, mut f: impl FnMut(WindowItem, &T)) {
        self.list.for_each_window_item(|window_item| {
            if let Some(item) = self.get(window_item.index) {
                f(window_item, item);
            }
        });
    }
}

impl<T: fmt::Debug> fmt::Debug for FilteredWindow<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FilteredWindow")
            .field("query", &self.query)
            .field("source_len", &self.items.len())
            .field("matched_len", &self.matched.len())
            .field("list", &self.list)
            .finish_non_exhaustive()
    }
}
