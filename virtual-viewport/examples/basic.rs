// Example: a simulated host driving a viewport with a minimal windowing strategy.
use std::cell::RefCell;
use std::rc::Rc;

use virtual_viewport::{
    Axis, ContentEdge, ContentTransform, DataSource, LengthChannel, ListRange, Orientation,
    ScrollStrategy, Subscription, Viewport, ViewportGeometry, ViewportOptions,
};

const ROW: f64 = 20.0;

#[derive(Default)]
struct Surface {
    height: f64,
    scroll_top: f64,
}

#[derive(Clone, Default)]
struct Host(Rc<RefCell<Surface>>);

impl ViewportGeometry for Host {
    fn viewport_size(&self, _axis: Axis) -> f64 {
        self.0.borrow().height
    }

    fn scroll_offset(&self, _axis: Axis) -> f64 {
        self.0.borrow().scroll_top
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
        self.0.borrow_mut().scroll_top = offset;
    }

    fn write_content_transform(&mut self, transform: &ContentTransform) {
        println!("  content: transform: {transform}");
    }

    fn write_total_content_size(&mut self, _axis: Axis, size: f64) {
        println!("  spacer: height: {size}px");
    }
}

struct Rows(LengthChannel);

impl DataSource for Rows {
    fn length_changes(&self) -> Subscription<usize> {
        self.0.subscribe()
    }

    fn measure_range_size(&self, range: ListRange, _orientation: Orientation) -> f64 {
        range.len() as f64 * ROW
    }
}

/// Renders exactly the visible rows.
struct Visible;

impl Visible {
    fn update(viewport: &mut Viewport) {
        let len = viewport.data_length();
        let first = ((viewport.measure_scroll_offset() / ROW) as usize).min(len);
        let count = (viewport.viewport_size() / ROW).ceil() as usize;
        viewport.set_total_content_size(len as f64 * ROW);
        viewport.set_rendered_range(ListRange::new(first, (first + count).min(len)));
        let _ = viewport.set_rendered_content_offset(first as f64 * ROW, ContentEdge::ToStart);
    }
}

impl ScrollStrategy for Visible {
    fn attach(&mut self, viewport: &mut Viewport) {
        Self::update(viewport);
    }

    fn detach(&mut self) {}

    fn on_content_scrolled(&mut self, viewport: &mut Viewport) {
        Self::update(viewport);
    }

    fn on_data_length_changed(&mut self, viewport: &mut Viewport) {
        Self::update(viewport);
    }

    fn on_content_rendered(&mut self, viewport: &mut Viewport) {
        println!("  rendered {:?}", viewport.rendered_range().as_range());
    }

    fn scroll_to_index(&mut self, viewport: &mut Viewport, index: usize) {
        viewport.scroll_to_offset(index as f64 * ROW);
    }
}

fn main() {
    let host = Host::default();
    host.0.borrow_mut().height = 200.0;

    let mut viewport = Viewport::new(ViewportOptions::vertical(), host.clone(), Visible);
    let rows = Rc::new(Rows(LengthChannel::with_length(1_000)));
    if let Err(err) = viewport.attach(rows.clone()) {
        eprintln!("attach failed: {err}");
        return;
    }

    println!("frame 1");
    viewport.run_cycle();

    println!("frame 2: user scrolls to 4321px (three raw events)");
    host.0.borrow_mut().scroll_top = 4321.0;
    for _ in 0..3 {
        viewport.handle_scroll_event();
    }
    viewport.run_cycle();

    println!("frame 3: scroll_to_index(900)");
    viewport.scroll_to_index(900);
    viewport.run_cycle();
    viewport.handle_scroll_event();
    viewport.run_cycle();

    println!("frame 4: data grows to 2000 rows");
    rows.0.publish(2_000);
    viewport.run_cycle();

    println!("{:#?}", viewport.snapshot());
}
