// Example: paged loading driven by scroll position.
//
// The "backend" here is a counter; a real host would kick off an async fetch
// in the callback and call `finish_load`/`fail_load` when it settles.
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use windowed::{ListOptions, WindowedList};
use windowed_adapter::InfiniteLoader;

const PAGE: usize = 50;

fn main() {
    let requests: Arc<AtomicUsize> = Arc::new(AtomicUsize::new(0));
    let list = WindowedList::new(ListOptions::new(PAGE, 20).with_initial_viewport(400))
        .expect("valid geometry");
    let mut loader = InfiniteLoader::new(list, {
        let requests = Arc::clone(&requests);
        move || {
            requests.fetch_add(1, Ordering::Relaxed);
            println!("-> fetch requested");
        }
    });

    let mut now_ms = 0u64;
    let mut count = PAGE;
    loop {
        let target = loader.list().max_scroll_offset();
        loader.on_scroll(target, now_ms);
        now_ms += 16;

        if loader.is_loading() {
            // Simulate the page arriving; stop after five pages.
            count += PAGE;
            let has_more = count < 5 * PAGE;
            loader.finish_load(count, has_more);
            println!(
                "loaded page: count={} has_more={} requests={}",
                count,
                has_more,
                requests.load(Ordering::Relaxed)
            );
        }

        if !loader.has_more() {
            break;
        }
    }

    println!(
        "done: count={} requests={}",
        loader.list().count(),
        requests.load(Ordering::Relaxed)
    );
}
