//! Pointer-driven movement for the graphic gallery.
//!
//! Two interaction models share the click-vs-drag question but answer it
//! differently: the free-placement wall latches "has moved" on the first
//! pointer move, the panning canvas measures how far the pointer travelled.

use crate::content::ContentRecord;

pub const CLICK_DISTANCE_THRESHOLD: f64 = 5.0;
pub const PAN_SPEED: f64 = 1.5;
pub const CANVAS_SCALE: f64 = 3.0;
pub const CANVAS_CENTER_DELAY_MS: u32 = 100;
pub const COMPACT_SIZE_SCALE: f64 = 0.6;
pub const DEFAULT_ITEM_WIDTH: f64 = 140.0;
pub const DEFAULT_ITEM_HEIGHT: f64 = 180.0;

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn distance_to(self, other: Point) -> f64 {
        (other.x - self.x).hypot(other.y - self.y)
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

impl Size {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    pub fn scaled(self, factor: f64) -> Self {
        Self::new(self.width * factor, self.height * factor)
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Rect {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub fn new(left: f64, top: f64, width: f64, height: f64) -> Self {
        Self {
            left,
            top,
            width,
            height,
        }
    }

    /// Point relative to this rect, in percent of its size.
    pub fn percent_of(&self, point: Point) -> Option<Point> {
        if self.width <= 0.0 || self.height <= 0.0 {
            return None;
        }
        Some(Point::new(
            (point.x - self.left) / self.width * 100.0,
            (point.y - self.top) / self.height * 100.0,
        ))
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ClickStrategy {
    /// Any pointer move during the press suppresses activation.
    MovedLatch,
    /// Activation allowed while travelled distance stays below the limit.
    DistanceThreshold(f64),
}

impl ClickStrategy {
    pub fn allows_activation(self, moved: bool, distance: f64) -> bool {
        match self {
            ClickStrategy::MovedLatch => !moved,
            ClickStrategy::DistanceThreshold(limit) => distance < limit,
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum GalleryMode {
    #[default]
    FreePlacement,
    CanvasPan,
}

impl GalleryMode {
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "free" | "free-placement" | "wall" => Some(GalleryMode::FreePlacement),
            "canvas" | "canvas-pan" | "pan" => Some(GalleryMode::CanvasPan),
            _ => None,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct DraggableItem {
    pub id: String,
    /// Top-left corner in percent of the containing surface.
    pub position: Point,
    pub size: Size,
}

impl DraggableItem {
    pub fn display_size(&self, compact: bool) -> Size {
        if compact {
            self.size.scaled(COMPACT_SIZE_SCALE)
        } else {
            self.size
        }
    }

    /// Rounded position shown beside the item number in the detail overlay.
    pub fn position_label(&self) -> String {
        format!(
            "X:{} Y:{}",
            self.position.x.round() as i64,
            self.position.y.round() as i64
        )
    }
}

/// Deterministic scatter for records that carry no position hint.
pub fn scatter_position(index: usize) -> Point {
    let col = (index % 4) as f64;
    let row = (index / 4) as f64;
    let jitter_x = ((index * 37) % 7) as f64;
    let jitter_y = ((index * 53) % 5) as f64;
    Point::new(8.0 + col * 22.0 + jitter_x, 10.0 + row * 20.0 + jitter_y)
}

pub fn items_from_records(records: &[ContentRecord]) -> Vec<DraggableItem> {
    records
        .iter()
        .enumerate()
        .map(|(index, record)| match record.position {
            Some(hint) => DraggableItem {
                id: record.id.clone(),
                position: Point::new(hint.x, hint.y),
                size: Size::new(hint.width, hint.height),
            },
            None => DraggableItem {
                id: record.id.clone(),
                position: scatter_position(index),
                size: Size::new(DEFAULT_ITEM_WIDTH, DEFAULT_ITEM_HEIGHT),
            },
        })
        .collect()
}

#[derive(Clone, Debug, PartialEq)]
pub struct DragSession {
    pub target_id: String,
    pub pointer_offset: Point,
    pub start_pointer: Point,
    pub cumulative_distance: f64,
    last_pointer: Point,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PointerReadout {
    pub client: Point,
    pub percent: Point,
}

impl PointerReadout {
    pub fn label(&self) -> String {
        format!(
            "X:{}% Y:{}%",
            self.percent.x.round() as i64,
            self.percent.y.round() as i64
        )
    }
}

/// Free-placement wall: every item can be picked up and dropped anywhere.
#[derive(Clone, Debug)]
pub struct FreePlacement {
    items: Vec<DraggableItem>,
    session: Option<DragSession>,
    moved: bool,
    distance: f64,
    touch_only: bool,
    hovered: Option<String>,
    readout: Option<PointerReadout>,
    strategy: ClickStrategy,
}

impl FreePlacement {
    pub fn new(items: Vec<DraggableItem>) -> Self {
        Self {
            items,
            session: None,
            moved: false,
            distance: 0.0,
            touch_only: false,
            hovered: None,
            readout: None,
            strategy: ClickStrategy::MovedLatch,
        }
    }

    pub fn items(&self) -> &[DraggableItem] {
        &self.items
    }

    pub fn item(&self, id: &str) -> Option<&DraggableItem> {
        self.items.iter().find(|item| item.id == id)
    }

    pub fn set_touch_only(&mut self, touch_only: bool) {
        self.touch_only = touch_only;
        if touch_only {
            self.session = None;
            self.hovered = None;
        }
    }

    pub fn touch_only(&self) -> bool {
        self.touch_only
    }

    pub fn session(&self) -> Option<&DragSession> {
        self.session.as_ref()
    }

    pub fn dragging_id(&self) -> Option<&str> {
        self.session.as_ref().map(|session| session.target_id.as_str())
    }

    pub fn has_moved(&self) -> bool {
        self.moved
    }

    /// Starts a drag on `id`. Returns `false` when dragging is disabled or
    /// the id is unknown; the moved latch is reset either way.
    pub fn pointer_down(&mut self, id: &str, pointer: Point, item_rect: Rect) -> bool {
        self.moved = false;
        self.distance = 0.0;
        if self.touch_only || self.item(id).is_none() {
            return false;
        }
        self.session = Some(DragSession {
            target_id: id.to_string(),
            pointer_offset: Point::new(pointer.x - item_rect.left, pointer.y - item_rect.top),
            start_pointer: pointer,
            cumulative_distance: 0.0,
            last_pointer: pointer,
        });
        true
    }

    /// Moves the dragged item under the pointer. Positions are not clamped
    /// to the surface.
    pub fn pointer_move(&mut self, pointer: Point, surface: Rect) -> bool {
        let Some(session) = self.session.as_mut() else {
            return false;
        };
        self.moved = true;
        session.cumulative_distance += session.last_pointer.distance_to(pointer);
        session.last_pointer = pointer;
        self.distance = session.cumulative_distance;
        if surface.width <= 0.0 || surface.height <= 0.0 {
            return false;
        }
        let x = (pointer.x - surface.left - session.pointer_offset.x) / surface.width * 100.0;
        let y = (pointer.y - surface.top - session.pointer_offset.y) / surface.height * 100.0;
        let target = session.target_id.clone();
        match self.items.iter_mut().find(|item| item.id == target) {
            Some(item) => {
                item.position = Point::new(x, y);
                true
            }
            None => false,
        }
    }

    pub fn pointer_up(&mut self) {
        self.session = None;
    }

    /// Whether a click/tap that follows the last press should open `id`.
    pub fn activate(&self, id: &str) -> bool {
        if self.item(id).is_none() {
            return false;
        }
        self.strategy.allows_activation(self.moved, self.distance)
    }

    pub fn hover_enter(&mut self, id: &str) {
        if self.touch_only {
            return;
        }
        self.hovered = Some(id.to_string());
    }

    pub fn hover_leave(&mut self) {
        if self.touch_only || self.session.is_some() {
            return;
        }
        self.hovered = None;
    }

    pub fn hovered(&self) -> Option<&DraggableItem> {
        let id = self.hovered.as_deref()?;
        self.item(id)
    }

    pub fn track_pointer(&mut self, client: Point, surface: Rect) {
        if let Some(percent) = surface.percent_of(client) {
            self.readout = Some(PointerReadout { client, percent });
        }
    }

    pub fn readout(&self) -> Option<PointerReadout> {
        self.readout
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CursorAffordance {
    Grab,
    Grabbing,
}

impl CursorAffordance {
    pub fn css(self) -> &'static str {
        match self {
            CursorAffordance::Grab => "grab",
            CursorAffordance::Grabbing => "grabbing",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
struct PanSession {
    start_pointer: Point,
    start_scroll: Point,
    last_pointer: Point,
}

/// Whole-canvas panning: pointer travel scrolls an oversized canvas.
#[derive(Clone, Debug)]
pub struct CanvasPan {
    session: Option<PanSession>,
    distance: f64,
    strategy: ClickStrategy,
}

impl CanvasPan {
    pub fn new() -> Self {
        Self {
            session: None,
            distance: 0.0,
            strategy: ClickStrategy::DistanceThreshold(CLICK_DISTANCE_THRESHOLD),
        }
    }

    pub fn pointer_down(&mut self, pointer: Point, scroll: Point) {
        self.distance = 0.0;
        self.session = Some(PanSession {
            start_pointer: pointer,
            start_scroll: scroll,
            last_pointer: pointer,
        });
    }

    /// Returns the scroll offset the canvas should move to.
    pub fn pointer_move(&mut self, pointer: Point) -> Option<Point> {
        let session = self.session.as_mut()?;
        self.distance += session.last_pointer.distance_to(pointer);
        session.last_pointer = pointer;
        let walk_x = (pointer.x - session.start_pointer.x) * PAN_SPEED;
        let walk_y = (pointer.y - session.start_pointer.y) * PAN_SPEED;
        Some(Point::new(
            session.start_scroll.x - walk_x,
            session.start_scroll.y - walk_y,
        ))
    }

    /// Pointer up, cancel and leave all end the pan.
    pub fn pointer_up(&mut self) {
        self.session = None;
    }

    pub fn is_panning(&self) -> bool {
        self.session.is_some()
    }

    pub fn cursor(&self) -> CursorAffordance {
        if self.session.is_some() {
            CursorAffordance::Grabbing
        } else {
            CursorAffordance::Grab
        }
    }

    pub fn drag_distance(&self) -> f64 {
        self.distance
    }

    pub fn allows_activation(&self) -> bool {
        self.strategy.allows_activation(self.distance > 0.0, self.distance)
    }
}

impl Default for CanvasPan {
    fn default() -> Self {
        Self::new()
    }
}

/// Scroll offset that puts the viewport at the middle of the canvas.
pub fn centered_scroll(scroll_size: Size, client_size: Size) -> Point {
    Point::new(
        ((scroll_size.width - client_size.width) / 2.0).max(0.0),
        ((scroll_size.height - client_size.height) / 2.0).max(0.0),
    )
}
