// Example: splicing rows into the middle of a list.
use virtual_scroll::{HeadlessSurface, PassKind, VirtualScroll, VirtualScrollConfig};

fn main() {
    let mut data: Vec<u32> = (0..10).collect();
    let surface = HeadlessSurface::new(250, 50);
    let config = VirtualScrollConfig::default().with_buffer_scale(0.0);
    let mut list = VirtualScroll::new(Some(surface), data.clone(), |n: &u32| *n, config);
    println!("before: len={} total={}", list.len(), list.total_height());

    // Insert five rows after row 3.
    data.splice(4..4, 100..105);
    if let Some(pass) = list.load_more(data.clone(), 4) {
        println!("after: len={} total={} window={:?}", list.len(), pass.total_height, pass.window);
    }

    // Appending far below the viewport only refreshes the scrollbar.
    data.extend(1_000..1_100);
    let insertion = list.len();
    if let Some(pass) = list.load_more(data, insertion) {
        assert_eq!(pass.kind, PassKind::ChromeOnly);
        println!("appended: total={} thumb={:?}", pass.total_height, pass.thumb);
    }
}
