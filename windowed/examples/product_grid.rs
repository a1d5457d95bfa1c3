// Example: a two-axis grid window over a flat collection.
//
// 23 cells wrap into 5 columns at the current viewport width; the last row
// is only partially filled and the out-of-range tail is never realized.
use windowed::{GridOptions, WindowedGrid};

fn main() {
    let mut grid =
        WindowedGrid::new(GridOptions::new(23, 120, 160).with_overscan(1)).expect("valid geometry");
    grid.set_viewport(620, 480);
    grid.set_scroll(0, 200);

    println!("columns_per_row={}", grid.columns_per_row());
    println!("rows={} row_range={:?}", grid.row_count(), grid.row_range());
    println!("vertical_placement={:?}", grid.vertical_placement());

    grid.for_each_cell(|cell| {
        println!("cell index={} row={} col={}", cell.index, cell.row, cell.col);
    });
}
