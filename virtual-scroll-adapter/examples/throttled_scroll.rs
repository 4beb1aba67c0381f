// Example: a burst of scroll events collapses into one render.
use virtual_scroll::{HeadlessSurface, ThrottleMode, VirtualScroll, VirtualScrollConfig};
use virtual_scroll_adapter::Controller;

fn main() {
    let data: Vec<usize> = (0..10_000).collect();
    let config = VirtualScrollConfig::default()
        .with_item_height(24)
        .with_throttle(ThrottleMode::Delay { delay_ms: 10 });
    let surface = HeadlessSurface::new(480, 24);
    let list = VirtualScroll::new(Some(surface), data, |n: &usize| *n, config);
    let mut c = Controller::new(list);

    // Wheel events every 4ms, then a timer tick every millisecond.
    for (i, now_ms) in (0..40).step_by(4).enumerate() {
        c.on_scroll(i as u64 * 120, now_ms);
    }
    for now_ms in 36..60 {
        if let Some(pass) = c.tick(now_ms) {
            println!("t={now_ms}ms rendered window={:?}", pass.window);
        }
    }
    let commits = c.list().surface().map(|s| s.commits()).unwrap_or_default();
    println!("commits={commits}");
}
