use suggester_core::{Element, Mount};

pub const RESULTS_CLASS: &str = "results";

/// The host page: the results area followed by the animation canvas.
pub fn page(results: &Mount, canvas: Element) -> Element {
    let results_area = Element::new("div")
        .with_class(RESULTS_CLASS)
        .with_children(results.current().cloned());
    Element::new("body").with_child(results_area).with_child(canvas)
}
