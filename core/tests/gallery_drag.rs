use folio_core::content::{placeholder_records, ContentKind, PositionHint};
use folio_core::drag::{items_from_records, CLICK_DISTANCE_THRESHOLD};
use folio_core::{CanvasPan, FreePlacement, Point, Rect, Size};

fn wall() -> FreePlacement {
    FreePlacement::new(items_from_records(&placeholder_records(ContentKind::Graphic)))
}

#[test]
fn press_and_release_activates() {
    let mut wall = wall();
    assert!(wall.pointer_down("g3", Point::new(40.0, 40.0), Rect::new(30.0, 30.0, 140.0, 180.0)));
    wall.pointer_up();
    assert!(wall.activate("g3"));
    assert!(wall.session().is_none());
}

#[test]
fn any_movement_suppresses_activation() {
    let mut wall = wall();
    let surface = Rect::new(0.0, 0.0, 1200.0, 800.0);
    wall.pointer_down("g3", Point::new(40.0, 40.0), Rect::new(30.0, 30.0, 140.0, 180.0));
    wall.pointer_move(Point::new(41.0, 40.0), surface);
    wall.pointer_up();
    assert!(!wall.activate("g3"));

    // the latch resets on the next press
    wall.pointer_down("g3", Point::new(40.0, 40.0), Rect::new(30.0, 30.0, 140.0, 180.0));
    wall.pointer_up();
    assert!(wall.activate("g3"));
}

#[test]
fn dragged_item_is_reported_while_held() {
    let mut wall = wall();
    wall.pointer_down("g5", Point::new(10.0, 10.0), Rect::new(0.0, 0.0, 140.0, 180.0));
    assert_eq!(wall.dragging_id(), Some("g5"));
    wall.pointer_up();
    assert_eq!(wall.dragging_id(), None);
}

#[test]
fn unknown_item_never_activates() {
    let mut wall = wall();
    assert!(!wall.pointer_down("x9", Point::default(), Rect::default()));
    assert!(!wall.activate("x9"));
}

#[test]
fn position_hints_seed_items() {
    let mut records = placeholder_records(ContentKind::Graphic);
    records[0].position = Some(PositionHint {
        x: 12.0,
        y: 34.0,
        width: 200.0,
        height: 150.0,
    });
    let items = items_from_records(&records);
    assert_eq!(items[0].position, Point::new(12.0, 34.0));
    assert_eq!(items[0].size, Size::new(200.0, 150.0));
    assert_eq!(items[0].display_size(true), Size::new(120.0, 90.0));
    assert_eq!(items.len(), records.len());
    let scattered = items_from_records(&records);
    assert_eq!(items, scattered);
}

#[test]
fn short_pan_still_activates() {
    let mut pan = CanvasPan::new();
    pan.pointer_down(Point::new(500.0, 500.0), Point::new(1000.0, 800.0));
    pan.pointer_move(Point::new(502.0, 500.0));
    pan.pointer_move(Point::new(502.0, 502.0));
    pan.pointer_up();
    assert_eq!(pan.drag_distance(), 4.0);
    assert!(pan.allows_activation());
}

#[test]
fn pan_at_threshold_suppresses_activation() {
    let mut pan = CanvasPan::new();
    pan.pointer_down(Point::new(0.0, 0.0), Point::default());
    pan.pointer_move(Point::new(3.0, 4.0));
    pan.pointer_up();
    assert_eq!(pan.drag_distance(), CLICK_DISTANCE_THRESHOLD);
    assert!(!pan.allows_activation());

    pan.pointer_down(Point::new(0.0, 0.0), Point::default());
    pan.pointer_up();
    assert!(pan.allows_activation());
}

#[test]
fn pan_distance_sums_path_not_displacement() {
    let mut pan = CanvasPan::new();
    pan.pointer_down(Point::new(0.0, 0.0), Point::default());
    pan.pointer_move(Point::new(3.0, 0.0));
    pan.pointer_move(Point::new(0.0, 0.0));
    pan.pointer_up();
    assert_eq!(pan.drag_distance(), 6.0);
    assert!(!pan.allows_activation());
}
