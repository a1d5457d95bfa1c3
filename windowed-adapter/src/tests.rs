use crate::*;

use alloc::sync::Arc;
use alloc::vec::Vec;
use core::sync::atomic::{AtomicUsize, Ordering};

use windowed::{ListOptions, WindowedList};

fn counting_loader(count: usize, item_size: u32, viewport: u32) -> (InfiniteLoader, Arc<AtomicUsize>) {
    let calls: Arc<AtomicUsize> = Arc::new(AtomicUsize::new(0));
    let options = ListOptions::new(count, item_size).with_initial_viewport(viewport);
    let list = WindowedList::new(options).unwrap();
    let loader = InfiniteLoader::new(list, {
        let calls = Arc::clone(&calls);
        move || {
            calls.fetch_add(1, Ordering::Relaxed);
        }
    });
    (loader, calls)
}

// Divisibility predicate: the query names a divisor; anything unparsable
// (including the empty query) matches everything.
fn divisor_window(source: u32) -> FilteredWindow<u32> {
    let items: Vec<u32> = (0..source).collect();
    let options = ListOptions::new(0, 1).with_overscan(2).with_initial_viewport(10);
    FilteredWindow::new(items, options, |item: &u32, query: &str| {
        query
            .parse::<u32>()
            .map(|divisor| divisor != 0 && item % divisor == 0)
            .unwrap_or(true)
    })
    .unwrap()
}

#[test]
fn load_more_fires_once_per_threshold_crossing() {
    // 100 items of size 1 in a 10-unit viewport, load factor 2:
    // threshold = 100 - 20 = 80.
    let (mut loader, calls) = counting_loader(100, 1, 10);

    loader.on_scroll(0, 0);
    assert_eq!(calls.load(Ordering::Relaxed), 0);
    assert!(!loader.is_loading());

    loader.on_scroll(75, 16); // bottom = 85, past threshold
    assert_eq!(calls.load(Ordering::Relaxed), 1);
    assert!(loader.is_loading());

    // Further scroll events while the fetch is in flight stay gated, even
    // though the threshold condition still holds.
    loader.on_scroll(76, 32);
    loader.on_scroll(77, 48);
    assert_eq!(calls.load(Ordering::Relaxed), 1);

    // The collaborator settles: 50 more items arrived, more exist.
    loader.finish_load(150, true);
    assert!(!loader.is_loading());
    assert_eq!(loader.list().count(), 150);

    // New threshold = 150 - 20 = 130; below it nothing fires.
    loader.on_scroll(76, 64);
    assert_eq!(calls.load(Ordering::Relaxed), 1);

    loader.on_scroll(125, 80); // bottom = 135
    assert_eq!(calls.load(Ordering::Relaxed), 2);
}

#[test]
fn exhausted_source_never_triggers() {
    let (mut loader, calls) = counting_loader(100, 1, 10);
    loader.set_has_more(false);

    loader.on_scroll(90, 0);
    loader.on_scroll(95, 16);
    assert_eq!(calls.load(Ordering::Relaxed), 0);
    assert!(!loader.is_loading());
}

#[test]
fn failed_load_rearms_without_retrying_itself() {
    let (mut loader, calls) = counting_loader(100, 1, 10);

    loader.on_scroll(85, 0);
    assert_eq!(calls.load(Ordering::Relaxed), 1);

    loader.fail_load();
    assert!(!loader.is_loading());
    assert!(loader.has_more());
    assert_eq!(calls.load(Ordering::Relaxed), 1);

    // The next scroll event re-issues the request; the loader itself did not.
    loader.on_scroll(86, 16);
    assert_eq!(calls.load(Ordering::Relaxed), 2);
}

#[test]
fn short_collection_requests_fill_immediately() {
    // 5 items cannot fill viewport * load_factor, so the threshold is zero
    // and the first scroll event asks for more.
    let (mut loader, calls) = counting_loader(5, 1, 10);

    loader.on_scroll(0, 0);
    assert_eq!(calls.load(Ordering::Relaxed), 1);
}

#[test]
fn maybe_request_more_reevaluates_after_completion() {
    let (mut loader, calls) = counting_loader(100, 1, 10);

    loader.on_scroll(85, 0);
    assert_eq!(calls.load(Ordering::Relaxed), 1);

    // Page settles without growing the collection; the viewport is still
    // parked past the threshold, and the host re-evaluates explicitly.
    loader.finish_load(100, true);
    assert!(loader.maybe_request_more());
    assert_eq!(calls.load(Ordering::Relaxed), 2);
    assert!(loader.is_loading());
}

#[test]
fn load_factor_moves_the_threshold() {
    let (loader, calls) = counting_loader(100, 1, 10);
    let mut loader = loader.with_load_factor(5);
    // threshold = 100 - 50 = 50.
    loader.on_scroll(35, 0); // bottom = 45
    assert_eq!(calls.load(Ordering::Relaxed), 0);
    loader.on_scroll(40, 16); // bottom = 50
    assert_eq!(calls.load(Ordering::Relaxed), 1);
}

#[test]
fn filtering_narrows_the_index_space() {
    let mut window = divisor_window(1_000);
    assert_eq!(window.len(), 1_000);
    assert_eq!(window.list().count(), 1_000);

    window.set_query("100");
    assert_eq!(window.len(), 10);
    assert_eq!(window.source_len(), 1_000);
    assert_eq!(window.list().count(), 10);

    // Scrolling the filtered view never yields an index past the filtered
    // length, no matter the stored offset.
    window.on_scroll(5, 0);
    let range = window.list().windowed_range();
    assert!(range.end_index <= 10);

    let mut seen = Vec::new();
    window.for_each_visible(|window_item, item| {
        assert!(window_item.index < 10);
        assert_eq!(*item, window_item.index as u32 * 100);
        assert_eq!(
            window.source_index(window_item.index),
            Some(window_item.index * 100)
        );
        seen.push(window_item.index);
    });
    assert_eq!(seen.len(), 10);
}

#[test]
fn narrowing_clamps_the_preserved_offset() {
    let mut window = divisor_window(1_000);
    window.list_mut().set_scroll_offset(500);
    assert_eq!(window.list().scroll_offset(), 500);

    // 1000 -> 10 items: the old offset points past the new extent and is
    // clamped rather than reset to the top.
    window.set_query("100");
    assert_eq!(window.list().scroll_offset(), 0);
    assert_eq!(window.list().max_scroll_offset(), 0);
}

#[test]
fn query_change_rebuilds_the_collection_both_ways() {
    let mut window = divisor_window(1_000);
    window.set_query("100");
    assert_eq!(window.len(), 10);

    window.set_query("");
    assert_eq!(window.len(), 1_000);

    window.set_query("250");
    assert_eq!(window.len(), 4);
    assert_eq!(window.get(0), Some(&0));
    assert_eq!(window.get(3), Some(&750));
    assert_eq!(window.get(4), None);
}

#[test]
fn appended_items_respect_the_active_query() {
    let mut window = divisor_window(1_000);
    window.set_query("100");
    assert_eq!(window.len(), 10);

    window.push_item(1_100);
    assert_eq!(window.len(), 11);
    assert_eq!(window.get(10), Some(&1_100));

    window.push_item(1_101);
    assert_eq!(window.len(), 11);
    assert_eq!(window.source_len(), 1_002);

    // A loaded page lands the same way: only its matches join the filtered
    // collection, the rest wait for a broader query.
    window.extend_items([1_200, 1_201, 1_300]);
    assert_eq!(window.len(), 13);
    assert_eq!(window.source_len(), 1_005);
    assert_eq!(window.get(12), Some(&1_300));

    window.set_query("");
    assert_eq!(window.len(), 1_005);
}

#[test]
fn replacing_items_refilters_in_place() {
    let mut window = divisor_window(10);
    window.set_query("100");
    assert_eq!(window.len(), 1); // only 0 divides

    window.set_items(alloc::vec![1, 2, 100, 200]);
    assert_eq!(window.len(), 2);
    assert_eq!(window.get(0), Some(&100));
    assert_eq!(window.get(1), Some(&200));
    assert_eq!(window.source_index(1), Some(3));
}

#[test]
fn empty_filter_result_renders_nothing() {
    let mut window = divisor_window(10);
    // Nothing in 1..10 divides by 1000 except 0; narrow further with a
    // divisor larger than every item, matched only by 0.
    window.set_query("1000");
    assert_eq!(window.len(), 1);

    window.set_items(alloc::vec![3, 7, 11]);
    assert_eq!(window.len(), 0);
    assert!(window.is_empty());
    assert!(window.list().windowed_range().is_empty());

    let mut called = false;
    window.for_each_visible(|_, _| called = true);
    assert!(!called);
}

#[test]
fn options_count_is_derived_from_the_source() {
    let options = ListOptions::new(42, 1);
    let window = FilteredWindow::new(alloc::vec![1u32, 2, 3], options, |_, _| true).unwrap();
    assert_eq!(window.len(), 3);
    assert_eq!(window.list().count(), 3);
}
