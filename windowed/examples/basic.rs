// Example: minimal usage and scroll-to helper.
use windowed::{Align, ListOptions, WindowedList};

fn main() {
    let mut list = WindowedList::new(ListOptions::new(1_000_000, 1)).expect("valid geometry");
    list.set_viewport_and_scroll(10, 123_456);

    let mut items = Vec::new();
    list.collect_window_items(&mut items);
    println!("total_extent={}", list.total_extent());
    println!("windowed_range={:?}", list.windowed_range());
    println!("placement={:?}", list.placement());
    println!("first_realized={:?}", items.first());

    let off = list.scroll_to_index_offset(999_999, Align::End);
    list.set_scroll_offset_clamped(off);
    println!("after scroll_to_index: offset={}", list.scroll_offset());
}
