// Example: dynamic heights are estimated first and corrected after each render.
use virtual_scroll::{HeadlessSurface, VirtualScroll, VirtualScrollConfig};

#[derive(Clone, Debug)]
struct Message {
    id: usize,
    lines: u32,
}

fn main() {
    let data: Vec<Message> = (0..500)
        .map(|id| Message {
            id,
            lines: 1 + (id % 5) as u32,
        })
        .collect();

    // Each line of text is 18px tall once laid out.
    let surface = HeadlessSurface::with_measure(400, |m: &Message| m.lines * 18);
    let config = VirtualScrollConfig::default()
        .with_dynamic_height(true)
        .with_item_height(40)
        .with_buffer_scale(0.2);
    let mut list = VirtualScroll::new(Some(surface), data, Message::clone, config);

    println!("after first frame: total={}", list.total_height());

    for offset in [0u64, 800, 1_600, 3_200] {
        if let Some(pass) = list.handle_scroll(offset) {
            println!(
                "offset={offset} window={:?} visible_offset={} total={}",
                pass.window, pass.visible_offset, pass.total_height
            );
        }
    }

    if let Some(table) = list.position_table() {
        let measured = table.entries().iter().take(5).collect::<Vec<_>>();
        println!("first entries: {measured:?}");
    }
    if let Some(surface) = list.surface() {
        let ids: Vec<usize> = surface.nodes().map(|m| m.id).collect();
        println!("rendered ids: {ids:?}");
    }
}
