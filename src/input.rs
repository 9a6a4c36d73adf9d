use web_sys::{DomRect, Element, HtmlElement, MouseEvent, PointerEvent, WheelEvent};

use folio_core::chrome::{is_compact, wheel_to_horizontal};
use folio_core::{Point, Rect, Size};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum PointerKind {
    Mouse,
    Touch,
    Pen,
    Unknown,
}

impl PointerKind {
    pub(crate) fn from_pointer_type(value: &str) -> Self {
        match value {
            "mouse" => PointerKind::Mouse,
            "touch" => PointerKind::Touch,
            "pen" => PointerKind::Pen,
            _ => PointerKind::Unknown,
        }
    }

    pub(crate) fn of(event: &PointerEvent) -> Self {
        Self::from_pointer_type(&event.pointer_type())
    }
}

pub(crate) trait HasClientRect {
    fn client_rect(&self) -> DomRect;
}

impl HasClientRect for Element {
    fn client_rect(&self) -> DomRect {
        self.get_bounding_client_rect()
    }
}

impl HasClientRect for HtmlElement {
    fn client_rect(&self) -> DomRect {
        self.get_bounding_client_rect()
    }
}

pub(crate) fn element_rect(element: &impl HasClientRect) -> Rect {
    let rect = element.client_rect();
    Rect::new(rect.left(), rect.top(), rect.width(), rect.height())
}

pub(crate) fn client_point(event: &MouseEvent) -> Point {
    Point::new(f64::from(event.client_x()), f64::from(event.client_y()))
}

pub(crate) fn scroll_point(element: &Element) -> Point {
    Point::new(f64::from(element.scroll_left()), f64::from(element.scroll_top()))
}

pub(crate) fn scroll_size(element: &Element) -> Size {
    Size::new(
        f64::from(element.scroll_width()),
        f64::from(element.scroll_height()),
    )
}

pub(crate) fn client_size(element: &Element) -> Size {
    Size::new(
        f64::from(element.client_width()),
        f64::from(element.client_height()),
    )
}

pub(crate) fn scroll_to(element: &Element, scroll: Point) {
    element.scroll_to_with_x_and_y(scroll.x, scroll.y);
}

pub(crate) fn viewport_size() -> Size {
    let Some(window) = web_sys::window() else {
        return Size::default();
    };
    let width = window
        .inner_width()
        .ok()
        .and_then(|value| value.as_f64())
        .unwrap_or(0.0);
    let height = window
        .inner_height()
        .ok()
        .and_then(|value| value.as_f64())
        .unwrap_or(0.0);
    Size::new(width, height)
}

pub(crate) fn is_compact_viewport() -> bool {
    let width = viewport_size().width;
    width > 0.0 && is_compact(width)
}

/// Turns a vertical wheel gesture into horizontal scrolling of `element`.
pub(crate) fn redirect_wheel(event: &WheelEvent, element: &Element) {
    if let Some(delta) = wheel_to_horizontal(event.delta_x(), event.delta_y()) {
        event.prevent_default();
        element.scroll_by_with_x_and_y(delta, 0.0);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wasm_bindgen::JsCast;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    #[wasm_bindgen_test]
    fn pointer_kind_from_type() {
        assert_eq!(PointerKind::from_pointer_type("touch"), PointerKind::Touch);
        assert_eq!(PointerKind::from_pointer_type("pen"), PointerKind::Pen);
        assert_eq!(PointerKind::from_pointer_type(""), PointerKind::Unknown);
    }

    #[wasm_bindgen_test]
    fn element_rect_matches_layout() {
        let document = web_sys::window()
            .and_then(|window| window.document())
            .expect("document available");
        let element: HtmlElement = document
            .create_element("div")
            .expect("create div")
            .dyn_into()
            .expect("html element");
        element
            .set_attribute(
                "style",
                "position:fixed;left:10px;top:20px;width:300px;height:150px",
            )
            .expect("style");
        document
            .body()
            .expect("body available")
            .append_child(&element)
            .expect("append");
        let rect = element_rect(&element);
        assert_eq!(rect, Rect::new(10.0, 20.0, 300.0, 150.0));
        element.remove();
    }
}
