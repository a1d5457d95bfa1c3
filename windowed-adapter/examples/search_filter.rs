// Example: windowing a search-filtered catalog.
use windowed::ListOptions;
use windowed_adapter::FilteredWindow;

fn main() {
    let products: Vec<String> = (0..10_000)
        .map(|i| {
            let family = ["lamp", "chair", "table", "shelf"][i % 4];
            format!("{family} #{i}")
        })
        .collect();

    let options = ListOptions::new(0, 24).with_overscan(3).with_initial_viewport(240);
    let mut window = FilteredWindow::new(products, options, |item: &String, query: &str| {
        query.is_empty() || item.contains(query)
    })
    .expect("valid geometry");

    println!("unfiltered: {} items", window.len());

    window.set_query("chair");
    println!("query=\"chair\": {} items", window.len());

    window.on_scroll(480, 0);
    window.for_each_visible(|window_item, item| {
        println!(
            "filtered#{} (source#{}) at {}: {item}",
            window_item.index,
            window.source_index(window_item.index).unwrap_or_default(),
            window_item.start,
        );
    });
}
