// Example: fixed-height list driven by scroll offsets.
use virtual_scroll::{HeadlessSurface, VirtualScroll, VirtualScrollConfig};

fn main() {
    let data: Vec<String> = (0..1_000_000).map(|i| format!("row #{i}")).collect();
    let surface = HeadlessSurface::new(600, 30);
    let config = VirtualScrollConfig::default().with_item_height(30);
    let mut list = VirtualScroll::new(Some(surface), data, |row: &String| row.clone(), config);

    println!("total_height={}", list.total_height());
    println!("capacity={}", list.client_capacity());

    if let Some(pass) = list.handle_scroll(123_456) {
        println!("visible={:?} window={:?}", pass.visible, pass.window);
        println!("visible_offset={} thumb={:?}", pass.visible_offset, pass.thumb);
    }
    if let Some(surface) = list.surface() {
        println!("first_rendered={:?}", surface.nodes().next());
    }
}
