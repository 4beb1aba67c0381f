// Example: dragging the custom scrollbar thumb.
use virtual_scroll::{HeadlessSurface, VirtualScroll, VirtualScrollConfig};
use virtual_scroll_adapter::Controller;

fn main() {
    let data: Vec<usize> = (0..2_000).collect();
    let config = VirtualScrollConfig::default().with_frame_optimize(true);
    let surface = HeadlessSurface::new(600, 50);
    let list = VirtualScroll::new(Some(surface), data, |n: &usize| *n, config);
    let mut c = Controller::new(list);

    let Some(thumb) = c.list().scrollbar_thumb() else {
        println!("content fits, no thumb");
        return;
    };
    println!("thumb={thumb:?}");

    c.on_thumb_press(i64::from(thumb.top) + 10);
    let mut now_ms = 0;
    for pointer_y in (10..=600).step_by(90) {
        now_ms += 16;
        let offset = c.on_thumb_move(pointer_y, now_ms);
        if let Some(pass) = c.tick(now_ms) {
            println!(
                "pointer={pointer_y} offset={offset:?} thumb_top={:?} first={}",
                pass.thumb.map(|t| t.top),
                pass.visible.start_index
            );
        }
    }
    c.on_thumb_release();
}
