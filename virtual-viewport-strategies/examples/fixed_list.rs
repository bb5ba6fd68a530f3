// Example: a fixed-size strategy over a million rows, with scrolled-index tracking.
use std::cell::Cell;
use std::rc::Rc;

use virtual_viewport::{
    Axis, ContentTransform, DataSource, LengthChannel, ListRange, Orientation, Subscription,
    Viewport, ViewportGeometry, ViewportOptions,
};
use virtual_viewport_strategies::FixedSizeStrategy;

#[derive(Clone, Default)]
struct Container {
    scroll_top: Rc<Cell<f64>>,
}

impl ViewportGeometry for Container {
    fn viewport_size(&self, _axis: Axis) -> f64 {
        600.0
    }

    fn scroll_offset(&self, _axis: Axis) -> f64 {
        self.scroll_top.get()
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
        self.scroll_top.set(offset);
    }

    fn write_content_transform(&mut self, transform: &ContentTransform) {
        println!("transform={transform}");
    }

    fn write_total_content_size(&mut self, _axis: Axis, size: f64) {
        println!("total_size={size}");
    }
}

struct Rows(LengthChannel);

impl DataSource for Rows {
    fn length_changes(&self) -> Subscription<usize> {
        self.0.subscribe()
    }

    fn measure_range_size(&self, range: ListRange, _orientation: Orientation) -> f64 {
        range.len() as f64 * 24.0
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let strategy = FixedSizeStrategy::new(24.0, 120.0, 480.0)?;
    let indexes = strategy.scrolled_index_changes();

    let container = Container::default();
    let mut viewport = Viewport::new(ViewportOptions::vertical(), container.clone(), strategy);
    viewport.attach(Rc::new(Rows(LengthChannel::with_length(1_000_000))))?;
    viewport.run_cycle();
    println!("range={:?}", viewport.rendered_range().as_range());

    for target in [500.0, 12_000.0, 11_900.0] {
        container.scroll_top.set(target);
        viewport.handle_scroll_event();
        let report = viewport.run_cycle();
        println!(
            "scroll_top={target} range={:?} changed={}",
            report.check.range.as_range(),
            report.check.range_changed
        );
    }

    viewport.scroll_to_index(999_990);
    viewport.run_cycle();
    viewport.handle_scroll_event();
    viewport.run_cycle();
    println!("range={:?}", viewport.rendered_range().as_range());

    let seen: Vec<usize> = indexes.drain();
    println!("scrolled indexes: {seen:?}");
    Ok(())
}
