use crate::*;

use std::cell::RefCell;
use std::rc::Rc;
use std::vec::Vec;

use virtual_viewport::{
    Axis, ContentTransform, DataSource, LengthChannel, ListRange, Orientation, Settle,
    Subscription, Viewport, ViewportGeometry, ViewportOptions,
};

#[derive(Debug, Default)]
struct Surface {
    viewport_size: f64,
    scroll_offset: f64,
    transforms: Vec<ContentTransform>,
    total_sizes: Vec<f64>,
}

#[derive(Clone, Default)]
struct Geometry(Rc<RefCell<Surface>>);

impl Geometry {
    fn new(viewport_size: f64) -> Self {
        let g = Self::default();
        g.0.borrow_mut().viewport_size = viewport_size;
        g
    }

    fn scroll_to(&self, offset: f64) {
        self.0.borrow_mut().scroll_offset = offset;
    }
}

impl ViewportGeometry for Geometry {
    fn viewport_size(&self, _axis: Axis) -> f64 {
        self.0.borrow().viewport_size
    }

    fn scroll_offset(&self, _axis: Axis) -> f64 {
        self.0.borrow().scroll_offset
    }

    fn rendered_content_size(&self, _axis: Axis) -> f64 {
        0.0
    }

    fn viewport_start(&self, _axis: Axis) -> f64 {
        0.0
    }

    fn content_start(&self, _axis: Axis) -> f64 {
        0.0
    }

    fn write_scroll_offset(&mut self, _axis: Axis, offset: f64) {
        self.0.borrow_mut().scroll_offset = offset;
    }

    fn write_content_transform(&mut self, transform: &ContentTransform) {
        self.0.borrow_mut().transforms.push(*transform);
    }

    fn write_total_content_size(&mut self, _axis: Axis, size: f64) {
        self.0.borrow_mut().total_sizes.push(size);
    }
}

struct Items {
    lengths: LengthChannel,
    item_size: f64,
}

impl DataSource for Items {
    fn length_changes(&self) -> Subscription<usize> {
        self.lengths.subscribe()
    }

    fn measure_range_size(&self, range: ListRange, _orientation: Orientation) -> f64 {
        range.len() as f64 * self.item_size
    }
}

struct Harness {
    geometry: Geometry,
    items: Rc<Items>,
    viewport: Viewport,
    indexes: Subscription<usize>,
}

/// 50px items, 100/200px buffers, a 500px viewport over 200 items.
fn harness() -> Harness {
    let geometry = Geometry::new(500.0);
    let strategy = FixedSizeStrategy::new(50.0, 100.0, 200.0).unwrap();
    let indexes = strategy.scrolled_index_changes();
    let mut viewport = Viewport::new(ViewportOptions::vertical(), geometry.clone(), strategy);
    let items = Rc::new(Items {
        lengths: LengthChannel::with_length(200),
        item_size: 50.0,
    });
    viewport.attach(items.clone()).unwrap();
    viewport.run_cycle();
    Harness {
        geometry,
        items,
        viewport,
        indexes,
    }
}

fn scroll(h: &mut Harness, offset: f64) {
    h.geometry.scroll_to(offset);
    h.viewport.handle_scroll_event();
    h.viewport.run_cycle();
}

#[test]
fn rejects_invalid_configuration() {
    assert_eq!(
        FixedSizeStrategy::new(50.0, 200.0, 100.0).unwrap_err(),
        FixedSizeError::BufferOrder {
            min: 200.0,
            max: 100.0
        }
    );
    assert_eq!(
        FixedSizeStrategy::new(0.0, 0.0, 0.0).unwrap_err(),
        FixedSizeError::InvalidItemSize(0.0)
    );
    assert_eq!(
        FixedSizeStrategy::new(10.0, -1.0, 5.0).unwrap_err(),
        FixedSizeError::InvalidBuffer(-1.0)
    );
    assert!(FixedSizeStrategy::new(10.0, 5.0, 5.0).is_ok());
}

#[test]
fn initial_range_fills_viewport_plus_buffer() {
    let h = harness();
    assert_eq!(h.viewport.rendered_range(), ListRange::new(0, 14));
    assert_eq!(h.viewport.materialized_range(), ListRange::new(0, 14));
    assert_eq!(h.viewport.total_content_size(), 10_000.0);
    assert_eq!(h.geometry.0.borrow().total_sizes, [10_000.0]);
    assert_eq!(h.indexes.drain(), [0]);
}

#[test]
fn scrolling_past_the_buffer_moves_the_window() {
    let mut h = harness();
    h.indexes.drain();

    scroll(&mut h, 2400.0);
    assert_eq!(h.viewport.rendered_range(), ListRange::new(46, 62));
    assert_eq!(h.viewport.offset_to_rendered_content_start(), Some(2300.0));
    assert_eq!(
        h.geometry.0.borrow().transforms.last().map(|t| t.offset()),
        Some(2300.0)
    );
    assert_eq!(h.indexes.drain(), [48]);
    assert_eq!(
        h.viewport.measure_range_size(ListRange::new(46, 62)),
        Ok(800.0)
    );
}

#[test]
fn small_scrolls_inside_the_buffer_keep_the_range() {
    let mut h = harness();
    let changes = h.viewport.rendered_range_changes();

    // 0..14 covers 700px; 60px of scrolling still leaves 140px below a 500px viewport.
    scroll(&mut h, 60.0);
    assert_eq!(h.viewport.rendered_range(), ListRange::new(0, 14));
    assert!(changes.drain().is_empty());
    assert_eq!(h.indexes.drain(), [0, 1]);
}

#[test]
fn scrolling_back_expands_the_start() {
    let mut h = harness();
    scroll(&mut h, 2400.0);

    // 46..62 starts at 2300px; at 2350px only 50px remain above the viewport.
    scroll(&mut h, 2350.0);
    assert_eq!(h.viewport.rendered_range(), ListRange::new(43, 59));
    assert_eq!(h.viewport.offset_to_rendered_content_start(), Some(2150.0));
}

#[test]
fn shrinking_data_pulls_the_window_back() {
    let mut h = harness();
    scroll(&mut h, 2400.0);
    h.indexes.drain();

    h.items.lengths.publish(50);
    h.viewport.run_cycle();
    assert_eq!(h.viewport.total_content_size(), 2500.0);
    assert_eq!(h.viewport.rendered_range(), ListRange::new(36, 50));
    assert_eq!(h.viewport.offset_to_rendered_content_start(), Some(1800.0));
    assert_eq!(h.indexes.drain(), [40]);
}

#[test]
fn resize_recomputes_the_range() {
    let mut h = harness();
    h.geometry.0.borrow_mut().viewport_size = 1000.0;
    h.viewport.check_viewport_size();
    assert_eq!(h.viewport.rendered_range(), ListRange::new(0, 24));
}

#[test]
fn scroll_to_index_writes_the_item_offset() {
    let mut h = harness();
    h.viewport.scroll_to_index(30);
    assert_eq!(h.viewport.pending_scroll_offset(), Some(1500.0));

    let report = h.viewport.check();
    assert_eq!(report.scroll_offset_written, Some(1500.0));
    assert_eq!(h.viewport.settle(), Settle::Quiet);

    // The container reports the programmatic scroll like any other.
    h.viewport.handle_scroll_event();
    h.viewport.run_cycle();
    assert_eq!(h.viewport.rendered_range(), ListRange::new(28, 44));
    assert_eq!(h.indexes.drain(), [0, 30]);
}

#[test]
fn destroying_the_viewport_completes_the_index_stream() {
    let mut h = harness();
    h.viewport.destroy();
    assert_eq!(h.indexes.drain(), [0]);
    assert!(h.indexes.is_terminated());
}

#[test]
fn extreme_item_sizes_keep_a_finite_content_offset() {
    let item = 8e307;
    let geometry = Geometry::new(500.0);
    let strategy = FixedSizeStrategy::new(item, 0.0, 0.0).unwrap();
    let mut viewport = Viewport::new(ViewportOptions::vertical(), geometry.clone(), strategy);
    viewport
        .attach(Rc::new(Items {
            lengths: LengthChannel::with_length(10),
            item_size: item,
        }))
        .unwrap();
    viewport.run_cycle();
    // 10 items overflow the total size, which the viewport refuses.
    assert_eq!(viewport.total_content_size(), 0.0);
    assert_eq!(viewport.rendered_range(), ListRange::new(0, 1));

    geometry.scroll_to(1.7e308);
    viewport.handle_scroll_event();
    viewport.run_cycle();
    assert_eq!(viewport.rendered_range(), ListRange::new(2, 3));
    assert_eq!(viewport.offset_to_rendered_content_start(), Some(item * 2.0));
    assert!(viewport.content_transform().offset().is_finite());
}
