use crate::*;

use alloc::vec::Vec;

#[derive(Clone, Copy, Debug)]
struct Lcg(u64);

impl Lcg {
    fn new(seed: u64) -> Self {
        Self(seed)
    }

    fn next_u64(&mut self) -> u64 {
        // Deterministic, dependency-free PRNG for tests.
        self.0 = self
            .0
            .wrapping_mul(6364136223846793005)
            .wrapping_add(1442695040888963407);
        self.0
    }

    fn gen_range_u64(&mut self, start: u64, end_exclusive: u64) -> u64 {
        debug_assert!(start < end_exclusive);
        let span = end_exclusive - start;
        start + (self.next_u64() % span)
    }

    fn gen_range_usize(&mut self, start: usize, end_exclusive: usize) -> usize {
        self.gen_range_u64(start as u64, end_exclusive as u64) as usize
    }

    fn gen_range_u32(&mut self, start: u32, end_exclusive: u32) -> u32 {
        self.gen_range_u64(start as u64, end_exclusive as u64) as u32
    }
}

#[derive(Clone, Debug, PartialEq)]
struct Row {
    id: usize,
    height: u32,
}

fn rows(n: usize, height: impl Fn(usize) -> u32) -> Vec<Row> {
    (0..n)
        .map(|id| Row {
            id,
            height: height(id),
        })
        .collect()
}

type RowList = VirtualScroll<Row, HeadlessSurface<Row>>;

/// A list whose surface measures each row at `row.height`.
fn row_list(data: Vec<Row>, viewport: u32, config: VirtualScrollConfig) -> RowList {
    let surface = HeadlessSurface::with_measure(viewport, |row: &Row| row.height);
    VirtualScroll::new(Some(surface), data, Row::clone, config)
}

fn fixed(item_height: u32) -> VirtualScrollConfig {
    VirtualScrollConfig::default()
        .with_item_height(item_height)
        .with_buffer_scale(0.0)
}

fn dynamic(estimate: u32) -> VirtualScrollConfig {
    fixed(estimate).with_dynamic_height(true)
}

fn committed_ids(list: &RowList) -> Vec<usize> {
    list.surface()
        .map(|s| s.nodes().map(|row| row.id).collect())
        .unwrap_or_default()
}

fn expected_first_visible(entries: &[PositionEntry], offset: u64) -> Option<usize> {
    if entries.is_empty() {
        return None;
    }
    let index = entries
        .iter()
        .position(|e| e.bottom > offset)
        .unwrap_or(entries.len());
    Some(index.min(entries.len() - 1))
}

fn assert_contiguous(table: &PositionTable) {
    let mut top = 0u64;
    for (i, e) in table.entries().iter().enumerate() {
        assert_eq!(e.index, i);
        assert_eq!(e.top, top, "entry {i} must start where {} ends", i.wrapping_sub(1));
        assert_eq!(e.bottom - e.top, e.height as u64);
        top = e.bottom;
    }
    assert_eq!(table.total_height(), top);
}

#[test]
fn fixed_height_window_matches_offset() {
    // 10 rows of 50px, 250px viewport => capacity 5.
    let mut list = row_list(rows(10, |_| 50), 250, fixed(50));
    assert_eq!(list.client_capacity(), 5);

    let pass = list.handle_scroll(150).unwrap();
    assert_eq!(pass.kind, PassKind::Full);
    assert_eq!(pass.window, RenderWindow::new(3, 8));
    assert_eq!(pass.visible, pass.window);
    assert_eq!(pass.total_height, 500);
    assert_eq!(pass.visible_offset, 150);
    assert_eq!(committed_ids(&list), [3, 4, 5, 6, 7]);

    let surface = list.surface().unwrap();
    assert!(surface.items().iter().all(|it| it.forced_height == Some(50)));
    assert_eq!(surface.total_extent(), 500);
    assert_eq!(surface.visible_offset(), 150);
}

#[test]
fn fixed_height_first_visible_is_floor_division() {
    let list = row_list(rows(10, |_| 50), 250, fixed(50));
    for offset in 0..500u64 {
        assert_eq!(list.first_visible_index(offset), Some((offset / 50) as usize));
    }
}

#[test]
fn buffer_expands_each_side_by_capacity_fraction() {
    // capacity 5, scale 0.4 => ceil(2.0) = 2 extra rows each side.
    let mut list = row_list(rows(20, |_| 50), 250, fixed(50).with_buffer_scale(0.4));
    let pass = list.handle_scroll(500).unwrap();
    assert_eq!(pass.visible, RenderWindow::new(10, 15));
    assert_eq!(pass.window, RenderWindow::new(8, 17));
    assert_eq!(pass.visible_offset, 8 * 50);
    assert_eq!(committed_ids(&list).len(), 9);

    // Clamped at the top edge.
    let pass = list.handle_scroll(0).unwrap();
    assert_eq!(pass.window, RenderWindow::new(0, 7));
}

#[test]
fn invalid_buffer_scale_disables_buffering_without_failing() {
    let mut list = row_list(rows(20, |_| 50), 250, fixed(50).with_buffer_scale(f32::NAN));
    assert!(matches!(
        list.config_error(),
        Some(ConfigError::InvalidBufferScale(_))
    ));

    let pass = list.handle_scroll(500).unwrap();
    assert_eq!(pass.window, pass.visible);
    assert_eq!(pass.window, RenderWindow::new(10, 15));
    assert!(matches!(
        pass.buffer_error,
        Some(ConfigError::InvalidBufferScale(_))
    ));
}

#[test]
fn boundary_offsets_reach_both_ends() {
    let mut list = row_list(rows(37, |_| 20), 100, fixed(20));
    let total = list.total_height();
    assert_eq!(total, 740);

    let pass = list.handle_scroll(0).unwrap();
    assert_eq!(pass.window.start_index, 0);

    let pass = list.handle_scroll(total - 1).unwrap();
    assert_eq!(pass.window.end_index, 37);

    // Past the end clamps instead of producing an out-of-range window.
    let pass = list.handle_scroll(total * 3).unwrap();
    assert_eq!(pass.window, RenderWindow::new(36, 37));
}

#[test]
fn render_is_idempotent_for_unchanged_offset() {
    let mut list = row_list(rows(200, |i| 20 + (i % 7) as u32 * 9), 300, dynamic(40));
    list.set_scroll_offset(1234);
    let first = list.render().unwrap();
    let second = list.render().unwrap();
    assert_eq!(first, second);
    assert_contiguous(list.position_table().unwrap());
}

#[test]
fn buffered_dynamic_render_is_idempotent() {
    // Rows are 10px but estimated at 50px: measuring the buffered rows above the viewport
    // pulls later rows up, so the first pass has to settle before it commits.
    let config = dynamic(50).with_buffer_scale(0.4);
    let mut list = row_list(rows(200, |_| 10), 250, config);
    list.set_scroll_offset(1000);

    let first = list.render().unwrap();
    let second = list.render().unwrap();
    assert_eq!(first.window, second.window);
    assert_eq!(first.total_height, second.total_height);
    assert_eq!(first.visible_offset, second.visible_offset);
    assert_eq!(first.visible, RenderWindow::new(36, 41));
    assert_eq!(first.window, RenderWindow::new(34, 43));

    let table = list.position_table().unwrap();
    let entry = table.get(first.visible.start_index).unwrap();
    assert!(entry.top <= 1000 && 1000 < entry.bottom);
    assert_contiguous(table);

    let ids = committed_ids(&list);
    assert_eq!(ids.first(), Some(&34));
    assert_eq!(ids.last(), Some(&42));
}

#[test]
fn dynamic_boundary_offsets_reach_the_end() {
    let mut list = row_list(rows(30, |i| 15 + (i % 4) as u32 * 10), 200, dynamic(40));
    let len = list.len();

    // Jump to the end so the tail rows get measured.
    let pass = list.handle_scroll(u64::MAX).unwrap();
    assert_eq!(pass.visible, RenderWindow::new(len - 1, len));

    let total = list.total_height();
    let pass = list.handle_scroll(total - 1).unwrap();
    assert_eq!(pass.visible, RenderWindow::new(len - 1, len));
    assert_eq!(pass.window.end_index, len);
    assert_eq!(pass.total_height, total);

    let last_top = list.position_table().unwrap().get(len - 1).unwrap().top;
    let pass = list.handle_scroll(last_top - 1).unwrap();
    assert_eq!(pass.visible.end_index, len);
    assert_eq!(pass.window.end_index, len);
    assert_contiguous(list.position_table().unwrap());
}

#[test]
fn empty_list_renders_an_empty_frame() {
    let mut list = row_list(Vec::new(), 300, dynamic(40));
    assert_eq!(list.first_visible_index(0), None);

    let pass = list.handle_scroll(100).unwrap();
    assert!(pass.window.is_empty());
    assert_eq!(pass.total_height, 0);
    assert_eq!(pass.thumb, None);
    assert!(committed_ids(&list).is_empty());
}

#[test]
fn missing_surface_makes_rendering_a_no_op() {
    let mut list: RowList = VirtualScroll::new(None, rows(10, |_| 50), Row::clone, fixed(50));
    assert!(!list.is_mounted());
    assert_eq!(list.render(), None);
    assert_eq!(list.handle_scroll(100), None);
    assert_eq!(list.render_window(), None);

    // Loading still works while detached.
    assert_eq!(list.load_more(rows(12, |_| 50), 10), None);
    assert_eq!(list.total_height(), 600);

    let pass = list
        .mount(HeadlessSurface::with_measure(250, |row: &Row| row.height))
        .unwrap();
    assert_eq!(list.client_capacity(), 5);
    assert_eq!(pass.window, RenderWindow::new(2, 7));

    assert!(list.unmount().is_some());
    assert_eq!(list.render(), None);
}

#[test]
fn zero_item_height_is_reported_and_clamped() {
    let list = row_list(rows(10, |_| 1), 5, fixed(0));
    assert_eq!(list.config_error(), Some(ConfigError::ZeroItemHeight));
    assert_eq!(list.total_height(), 10);
    assert_eq!(list.client_capacity(), 5);
}

#[test]
fn position_table_starts_from_estimates() {
    let table = PositionTable::with_len(4, 50);
    assert_eq!(
        table.get(2),
        Some(&PositionEntry {
            index: 2,
            height: 50,
            top: 100,
            bottom: 150,
        })
    );
    assert_eq!(table.total_height(), 200);
    assert_contiguous(&table);
}

#[test]
fn reconcile_shifts_every_later_entry() {
    let mut table = PositionTable::with_len(10, 50);
    let delta = table.reconcile(2, &[80]);
    assert_eq!(delta, 30);

    let e2 = table.get(2).unwrap();
    assert_eq!((e2.top, e2.height, e2.bottom), (100, 80, 180));
    for i in 3..10 {
        let e = table.get(i).unwrap();
        assert_eq!(e.top, i as u64 * 50 + 30);
        assert_eq!(e.bottom, (i as u64 + 1) * 50 + 30);
    }
    assert_eq!(table.total_height(), 530);
    assert_contiguous(&table);

    // Shrinking moves everything back up.
    assert_eq!(table.reconcile(2, &[20]), -60);
    assert_eq!(table.total_height(), 470);
    assert_contiguous(&table);
}

#[test]
fn reconcile_with_unchanged_heights_is_a_no_op() {
    let mut table = PositionTable::with_len(50, 30);
    table.reconcile(5, &[10, 60, 45, 30, 12]);
    let before = table.clone();

    let same: Vec<u32> = table.entries()[5..10].iter().map(|e| e.height).collect();
    assert_eq!(table.reconcile(5, &same), 0);
    assert_eq!(table, before);
}

#[test]
fn reconcile_clips_measurements_past_the_end() {
    let mut table = PositionTable::with_len(3, 10);
    assert_eq!(table.reconcile(2, &[25, 99, 99]), 15);
    assert_eq!(table.total_height(), 45);
    assert_eq!(table.reconcile(3, &[1]), 0);
    assert_contiguous(&table);
}

#[test]
fn rebuild_from_keeps_the_measured_prefix() {
    let mut table = PositionTable::with_len(6, 50);
    table.reconcile(0, &[10, 20, 30, 40]);
    let prefix: Vec<PositionEntry> = table.entries()[..3].to_vec();
    let anchor = *table.get(2).unwrap();

    table.rebuild_from(9, 3, Some(anchor));
    assert_eq!(table.len(), 9);
    assert_eq!(&table.entries()[..3], &prefix[..]);
    assert_eq!(table.get(3).unwrap().top, 60);
    assert_eq!(table.get(3).unwrap().height, 50);
    assert_eq!(table.total_height(), 60 + 6 * 50);
    assert_contiguous(&table);

    // No anchor: plain rebuild.
    table.rebuild_from(4, 2, None);
    assert_eq!(table.total_height(), 200);
    assert_contiguous(&table);
}

#[test]
fn first_exceeding_returns_leftmost_match_or_none() {
    let bottoms = [10u64, 20, 20, 30];
    assert_eq!(first_exceeding(&bottoms, 0, |b| *b), Some(0));
    assert_eq!(first_exceeding(&bottoms, 10, |b| *b), Some(1));
    assert_eq!(first_exceeding(&bottoms, 19, |b| *b), Some(1));
    assert_eq!(first_exceeding(&bottoms, 20, |b| *b), Some(3));
    assert_eq!(first_exceeding(&bottoms, 30, |b| *b), None);
    assert_eq!(first_exceeding(&[] as &[u64], 0, |b| *b), None);
}

#[test]
fn dynamic_first_visible_matches_linear_scan() {
    let mut rng = Lcg::new(0x5eed);
    for _ in 0..20 {
        let len = rng.gen_range_usize(1, 120);
        let mut table = PositionTable::with_len(len, 40);
        let heights: Vec<u32> = (0..len).map(|_| rng.gen_range_u32(1, 200)).collect();
        table.reconcile(0, &heights);
        assert_contiguous(&table);

        let locator = IndexLocator::Dynamic(&table);
        let total = table.total_height();
        for _ in 0..200 {
            let offset = rng.gen_range_u64(0, total);
            let i = locator.first_visible_index(offset).unwrap();
            let e = table.get(i).unwrap();
            assert!(e.top <= offset && offset < e.bottom);
            assert_eq!(Some(i), expected_first_visible(table.entries(), offset));
        }
        assert_eq!(locator.first_visible_index(total), Some(len - 1));
    }
}

#[test]
fn expansion_never_leaves_data_bounds() {
    let mut rng = Lcg::new(42);
    for _ in 0..500 {
        let len = rng.gen_range_usize(0, 64);
        let start = rng.gen_range_usize(0, 80);
        let end = start + rng.gen_range_usize(0, 20);
        let capacity = rng.gen_range_usize(0, 40);
        let scale = rng.gen_range_u32(0, 10_000) as f32 / 7.0;

        let w = expand(RenderWindow::new(start, end), capacity, scale, len).unwrap();
        assert!(w.start_index <= w.end_index);
        assert!(w.end_index <= len);
    }
}

#[test]
fn dynamic_render_reconciles_measured_rows() {
    // Rows alternate between 30px and 70px; the estimate is 50px.
    let data = rows(40, |i| if i % 2 == 0 { 30 } else { 70 });
    let list = row_list(data, 200, dynamic(50));
    assert_eq!(list.client_capacity(), 4);

    // First frame rendered rows 0..4, measured at 30+70+30+70 = 200.
    let table = list.position_table().unwrap();
    assert_eq!(table.get(3).unwrap().bottom, 200);
    assert_eq!(table.get(4).unwrap().top, 200);
    assert_eq!(table.get(4).unwrap().height, 50);
    assert_eq!(list.total_height(), 200 + 36 * 50);
    assert_eq!(
        list.surface().unwrap().total_extent(),
        list.total_height()
    );
    assert!(
        list.surface()
            .unwrap()
            .items()
            .iter()
            .all(|it| it.forced_height.is_none())
    );
    assert_contiguous(table);
}

#[test]
fn dynamic_visible_offset_is_the_top_of_the_first_rendered_row() {
    let data = rows(40, |i| 20 + i as u32);
    let mut list = row_list(data, 100, dynamic(50));
    let pass = list.handle_scroll(400).unwrap();
    let table = list.position_table().unwrap();
    assert_eq!(pass.visible_offset, table.get(pass.window.start_index).unwrap().top);
    assert_eq!(list.surface().unwrap().visible_offset(), pass.visible_offset);
    let first = table.get(pass.visible.start_index).unwrap();
    assert!(first.top <= 400 && 400 < first.bottom);
}

#[test]
fn load_more_fixed_recomputes_total_height() {
    let mut list = row_list(rows(10, |_| 50), 250, fixed(50));
    let mut data = list.data().to_vec();
    let inserted = rows(5, |_| 50).into_iter().map(|mut r| {
        r.id += 100;
        r
    });
    data.splice(4..4, inserted);

    let pass = list.load_more(data, 4).unwrap();
    assert_eq!(list.len(), 15);
    assert_eq!(list.total_height(), 750);
    assert_eq!(pass.total_height, 750);
    assert_eq!(committed_ids(&list), [0, 1, 2, 3, 100]);
}

#[test]
fn load_more_dynamic_anchors_on_the_previous_row() {
    let mut list = row_list(rows(10, |_| 20), 100, dynamic(50));
    // capacity 2 => rows 0..2 measured at 20 each.
    let before: Vec<PositionEntry> = list.position_table().unwrap().entries()[..2].to_vec();
    assert_eq!(before[1].bottom, 40);

    let mut data = list.data().to_vec();
    data.splice(2..2, rows(3, |_| 20));
    list.load_more(data, 2).unwrap();

    let table = list.position_table().unwrap();
    assert_eq!(table.len(), 13);
    assert_eq!(&table.entries()[..2], &before[..]);
    assert_eq!(table.get(2).unwrap().top, 40);
    assert_contiguous(table);
    assert_eq!(list.total_height(), table.total_height());
}

#[test]
fn load_more_past_the_rendered_window_only_refreshes_chrome() {
    let mut list = row_list(rows(100, |_| 10), 50, fixed(10));
    let commits = list.surface().unwrap().commits();
    assert_eq!(list.render_window(), Some(RenderWindow::new(0, 5)));

    let mut data = list.data().to_vec();
    data.extend(rows(50, |_| 10));
    let pass = list.load_more(data, 100).unwrap();
    assert_eq!(pass.kind, PassKind::ChromeOnly);
    assert_eq!(pass.window, RenderWindow::new(0, 5));
    assert_eq!(pass.total_height, 1500);
    assert_eq!(list.surface().unwrap().commits(), commits);
    assert_eq!(list.surface().unwrap().total_extent(), 1500);
    assert_eq!(list.scrollbar_thumb(), pass.thumb);
}

#[test]
fn load_more_at_a_visible_tail_renders_the_new_rows() {
    // Everything fits: the window reaches the end of the data.
    let mut list = row_list(rows(3, |_| 10), 100, fixed(10));
    let mut data = list.data().to_vec();
    data.extend(rows(2, |i| 10 + i as u32));
    let pass = list.load_more(data, 3).unwrap();
    assert_eq!(pass.kind, PassKind::Full);
    assert_eq!(pass.window, RenderWindow::new(0, 5));
}

#[test]
fn scrollbar_thumb_follows_content_size() {
    // 5 rows fit exactly: no thumb.
    let mut list = row_list(rows(5, |_| 50), 250, fixed(50));
    assert_eq!(list.scrollbar_thumb(), None);
    assert_eq!(list.surface().unwrap().thumb(), None);

    let mut data = list.data().to_vec();
    data.extend(rows(95, |_| 50));
    let pass = list.load_more(data, 5).unwrap();
    let thumb = pass.thumb.unwrap();
    assert_eq!(thumb.track, 250);
    // natural length 250*250/5000 = 12, raised to the 150px minimum.
    assert_eq!(thumb.length, 150);
    assert_eq!(thumb.top, 0);

    let pass = list.handle_scroll(5000 - 250).unwrap();
    assert_eq!(pass.thumb.unwrap().top, 100);
    assert_eq!(list.surface().unwrap().thumb(), pass.thumb);
}

#[test]
fn scrollbar_is_left_alone_without_custom_scrollbar() {
    let list = row_list(
        rows(100, |_| 50),
        250,
        fixed(50).with_custom_scrollbar(false),
    );
    assert_eq!(list.scrollbar_thumb(), None);
    assert_eq!(list.surface().unwrap().thumb(), None);
}

#[test]
fn resize_recomputes_capacity() {
    let mut list = row_list(rows(100, |_| 50), 250, fixed(50));
    assert_eq!(list.render_window(), Some(RenderWindow::new(0, 5)));

    list.surface_mut().unwrap().set_viewport_height(420);
    let pass = list.handle_resize().unwrap();
    assert_eq!(list.client_capacity(), 9);
    assert_eq!(pass.window, RenderWindow::new(0, 9));
    assert_eq!(list.phase(), RenderPhase::Idle);
}

#[test]
fn config_builders_and_defaults() {
    let c = VirtualScrollConfig::default();
    assert_eq!(c.item_height, 50);
    assert!(!c.dynamic_height);
    assert_eq!(c.throttle, ThrottleMode::Delay { delay_ms: 10 });
    assert!(c.custom_scrollbar);
    assert_eq!(c.scrollbar.min_thumb_length, 150);
    assert_eq!(c.validate(), Ok(()));

    let c = c.with_frame_optimize(true);
    assert_eq!(c.throttle, ThrottleMode::Frame);
    let c = c.with_frame_optimize(false);
    assert_eq!(c.throttle, ThrottleMode::default());

    assert_eq!(
        VirtualScrollConfig::new().with_buffer_scale(-1.0).validate(),
        Err(ConfigError::InvalidBufferScale(-1.0))
    );
}

#[test]
fn load_more_renders_when_offset_moved_since_last_pass() {
    let mut list = row_list(rows(100, |_| 10), 50, fixed(10));
    assert_eq!(list.render_window(), Some(RenderWindow::new(0, 5)));

    // Offset recorded without a render: the committed rows are stale.
    list.set_scroll_offset(900);
    let mut data = list.data().to_vec();
    data.splice(90..90, (0..5).map(|i| Row { id: 1000 + i, height: 10 }));

    let pass = list.load_more(data, 90).unwrap();
    assert_eq!(pass.kind, PassKind::Full);
    assert_eq!(pass.window, RenderWindow::new(90, 95));
    assert_eq!(committed_ids(&list), [1000, 1001, 1002, 1003, 1004]);
}

#[test]
fn load_more_renders_when_capacity_changed_since_last_pass() {
    let mut list = row_list(rows(100, |_| 10), 50, fixed(10));
    list.surface_mut().unwrap().set_viewport_height(100);
    list.refresh_viewport();
    assert_eq!(list.client_capacity(), 10);

    let mut data = list.data().to_vec();
    data.extend(rows(10, |_| 10));
    let pass = list.load_more(data, 100).unwrap();
    assert_eq!(pass.kind, PassKind::Full);
    assert_eq!(pass.window, RenderWindow::new(0, 10));
    assert_eq!(committed_ids(&list).len(), 10);
}
