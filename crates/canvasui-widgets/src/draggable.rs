//! Pointer dragging for any element.
//!
//! Pointer-down on the element arms the drag (the `drag` attribute goes
//! true), pointer-move anywhere on the stage moves it, and pointer-up
//! anywhere disarms it. Moves are snapped to a grid, limited to one or both
//! axes, and then gated by either a distance threshold or a containment box.

use crate::error::UiResult;
use canvasui_core::{ElementId, EventKind, ListenerId, MouseButton, Scene, UiEvent};
use kurbo::{Point, Rect, Size, Vec2};
use serde::Deserialize;
use std::cell::RefCell;
use std::rc::Rc;

/// Attribute set while an element is being dragged.
pub const DRAG_ATTR: &str = "drag";

/// Grid step per axis. Steps that are zero or negative fall back to 1.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(from = "GridRepr")]
pub struct Grid {
    pub x: f64,
    pub y: f64,
}

impl Grid {
    pub fn new(x: f64, y: f64) -> Self {
        let step = |v: f64| if v > 0.0 && v.is_finite() { v } else { 1.0 };
        Self {
            x: step(x),
            y: step(y),
        }
    }

    /// Truncate a coordinate onto the grid (towards zero).
    pub fn snap(&self, p: Point) -> Point {
        Point::new((p.x / self.x).trunc() * self.x, (p.y / self.y).trunc() * self.y)
    }
}

impl Default for Grid {
    fn default() -> Self {
        Self::new(1.0, 1.0)
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum GridRepr {
    Step([f64; 2]),
    Cells {
        cell_width: Option<f64>,
        cell_height: Option<f64>,
    },
}

impl From<GridRepr> for Grid {
    fn from(repr: GridRepr) -> Self {
        match repr {
            GridRepr::Step([x, y]) => Grid::new(x, y),
            GridRepr::Cells {
                cell_width,
                cell_height,
            } => Grid::new(cell_width.unwrap_or(1.0), cell_height.unwrap_or(1.0)),
        }
    }
}

/// Axes along which the element may move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
pub enum Axis {
    #[serde(rename = "x")]
    X,
    #[serde(rename = "y")]
    Y,
    #[default]
    #[serde(rename = "xy", alias = "yx")]
    Both,
}

impl Axis {
    pub fn moves_x(self) -> bool {
        matches!(self, Axis::X | Axis::Both)
    }

    pub fn moves_y(self) -> bool {
        matches!(self, Axis::Y | Axis::Both)
    }
}

/// Region the element must stay inside.
#[derive(Debug, Clone, Copy, PartialEq, Default, Deserialize)]
#[serde(from = "ContainmentRepr")]
pub enum Containment {
    /// Unconstrained within the canvas.
    #[default]
    Canvas,
    /// The parent's bounds at setup time.
    Parent,
    /// An absolute box `[x1, y1, x2, y2]`.
    Region(Rect),
}

#[derive(Deserialize)]
#[serde(rename_all = "lowercase")]
enum ContainmentTarget {
    Canvas,
    Parent,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum ContainmentRepr {
    Region([f64; 4]),
    Target(ContainmentTarget),
    Unset,
}

impl From<ContainmentRepr> for Containment {
    fn from(repr: ContainmentRepr) -> Self {
        match repr {
            ContainmentRepr::Region([x1, y1, x2, y2]) => Containment::Region(Rect::new(x1, y1, x2, y2)),
            ContainmentRepr::Target(ContainmentTarget::Parent) => Containment::Parent,
            ContainmentRepr::Target(ContainmentTarget::Canvas) | ContainmentRepr::Unset => {
                Containment::Canvas
            }
        }
    }
}

/// Options for [`draggable`].
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(default)]
pub struct DragOptions {
    pub grid: Grid,
    pub axis: Axis,
    /// Maximum displacement from the drag start, per axis. Zero, negative
    /// or non-finite values leave it unset.
    pub distance: Option<f64>,
    pub containment: Containment,
}

/// Called with the event and pointer position.
pub type DragCallback = Box<dyn FnMut(&mut Scene, &UiEvent, Point)>;
/// Called when dragging stops.
pub type StopCallback = Box<dyn FnMut(&mut Scene, &UiEvent)>;

/// Optional hooks for each drag phase.
#[derive(Default)]
pub struct DragCallbacks {
    pub start: Option<DragCallback>,
    pub drag: Option<DragCallback>,
    pub stop: Option<StopCallback>,
}

impl DragCallbacks {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn on_start(mut self, f: impl FnMut(&mut Scene, &UiEvent, Point) + 'static) -> Self {
        self.start = Some(Box::new(f));
        self
    }

    pub fn on_drag(mut self, f: impl FnMut(&mut Scene, &UiEvent, Point) + 'static) -> Self {
        self.drag = Some(Box::new(f));
        self
    }

    pub fn on_stop(mut self, f: impl FnMut(&mut Scene, &UiEvent) + 'static) -> Self {
        self.stop = Some(Box::new(f));
        self
    }
}

/// Drag options with containment resolved against the scene.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DragRules {
    pub grid: Grid,
    pub axis: Axis,
    pub distance: Option<f64>,
    /// Absolute box the element must stay inside, if any.
    pub bounds: Option<Rect>,
}

impl DragRules {
    /// Resolve containment once, at setup time.
    ///
    /// `Parent` without a parent silently disables containment.
    pub fn resolve(scene: &Scene, el: ElementId, options: &DragOptions) -> UiResult<Self> {
        let bounds = match options.containment {
            Containment::Canvas => None,
            Containment::Region(rect) => Some(rect),
            Containment::Parent => match scene.parent(el) {
                Some(parent) => Some(scene.bounds(parent)?),
                None => {
                    log::debug!("Element {} has no parent; containment disabled", el);
                    None
                }
            },
        };
        Ok(Self {
            grid: options.grid,
            axis: options.axis,
            distance: options.distance.filter(|d| d.is_finite() && *d > 0.0),
            bounds,
        })
    }

    /// Absolute coordinates to apply for a pointer at `pointer`, per axis.
    ///
    /// `None` leaves that axis where it is.
    pub fn step(
        &self,
        pointer: Point,
        margin: Vec2,
        start: Point,
        size: Size,
    ) -> (Option<f64>, Option<f64>) {
        let candidate = self.grid.snap(pointer + margin);
        let x = self.axis.moves_x().then(|| {
            let range = self.bounds.map(|b| (b.x0, b.x1 - size.width));
            self.gate(candidate.x, start.x, range)
        });
        let y = self.axis.moves_y().then(|| {
            let range = self.bounds.map(|b| (b.y0, b.y1 - size.height));
            self.gate(candidate.y, start.y, range)
        });
        (x.flatten(), y.flatten())
    }

    fn gate(&self, candidate: f64, start: f64, range: Option<(f64, f64)>) -> Option<f64> {
        if let Some(distance) = self.distance {
            return ((candidate - start).abs() <= distance).then_some(candidate);
        }
        match range {
            Some((lo, hi)) => Some(candidate.clamp(lo, hi.max(lo))),
            None => Some(candidate),
        }
    }
}

/// Listeners installed by [`draggable`].
#[derive(Debug, Clone)]
pub struct DragHandle {
    pub element: ElementId,
    pub rules: DragRules,
    listeners: [ListenerId; 3],
}

impl DragHandle {
    /// Remove the drag listeners and disarm the element.
    pub fn detach(&self, scene: &mut Scene) {
        for listener in self.listeners {
            scene.off(listener);
        }
        if scene.attr_flag(self.element, DRAG_ATTR) {
            let _ = scene.set_attr(self.element, DRAG_ATTR, false);
        }
    }

    pub fn is_dragging(&self, scene: &Scene) -> bool {
        scene.attr_flag(self.element, DRAG_ATTR)
    }
}

#[derive(Debug, Default)]
struct DragState {
    /// Element position minus pointer position at pointer-down.
    margin: Vec2,
    /// Absolute element position at pointer-down.
    start: Point,
}

/// Make `el` draggable with the pointer.
pub fn draggable(
    scene: &mut Scene,
    el: ElementId,
    options: &DragOptions,
    callbacks: DragCallbacks,
) -> UiResult<DragHandle> {
    let rules = DragRules::resolve(scene, el, options)?;
    let state = Rc::new(RefCell::new(DragState::default()));
    let DragCallbacks {
        start: mut on_start,
        drag: mut on_drag,
        stop: mut on_stop,
    } = callbacks;

    let down_state = Rc::clone(&state);
    let down = scene.on(el, EventKind::MouseDown, move |scene, event| {
        if event.button != Some(MouseButton::Left) {
            return;
        }
        let Ok(pos) = scene.position(el) else {
            return;
        };
        {
            let mut s = down_state.borrow_mut();
            s.margin = pos - event.pointer;
            s.start = pos;
        }
        let _ = scene.set_attr(el, DRAG_ATTR, true);
        if let Some(f) = on_start.as_mut() {
            f(scene, event, event.pointer);
        }
    })?;

    let stage = scene.stage();
    let move_state = Rc::clone(&state);
    let moved = scene.on(stage, EventKind::MouseMove, move |scene, event| {
        if !scene.attr_flag(el, DRAG_ATTR) {
            return;
        }
        let Some(size) = scene.element(el).map(|e| e.size()) else {
            return;
        };
        let origin = scene
            .parent(el)
            .and_then(|p| scene.position(p).ok())
            .unwrap_or(Point::ZERO);
        let (margin, start) = {
            let s = move_state.borrow();
            (s.margin, s.start)
        };

        let (x, y) = rules.step(event.pointer, margin, start, size);
        if let Some(element) = scene.element_mut(el) {
            if let Some(x) = x {
                element.x = x - origin.x;
            }
            if let Some(y) = y {
                element.y = y - origin.y;
            }
        }
        if let Some(f) = on_drag.as_mut() {
            f(scene, event, event.pointer);
        }
    })?;

    let up = scene.on(stage, EventKind::MouseUp, move |scene, event| {
        if !scene.attr_flag(el, DRAG_ATTR) {
            return;
        }
        let _ = scene.set_attr(el, DRAG_ATTR, false);
        if let Some(f) = on_stop.as_mut() {
            f(scene, event);
        }
    })?;

    Ok(DragHandle {
        element: el,
        rules,
        listeners: [down, moved, up],
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use canvasui_core::PointerEvent;
    use serde_json::json;

    fn options(value: serde_json::Value) -> DragOptions {
        serde_json::from_value(value).unwrap()
    }

    fn setup(size: f64) -> (Scene, ElementId) {
        let mut scene = Scene::new("drag", Size::new(800.0, 600.0));
        let el = scene.create_element(Some(Size::new(size, size)));
        let stage = scene.stage();
        scene.append(stage, el).unwrap();
        (scene, el)
    }

    fn press(scene: &mut Scene, x: f64, y: f64) {
        scene.dispatch_pointer(PointerEvent::Down {
            position: Point::new(x, y),
            button: MouseButton::Left,
        });
    }

    fn move_to(scene: &mut Scene, x: f64, y: f64) {
        scene.dispatch_pointer(PointerEvent::Move {
            position: Point::new(x, y),
        });
    }

    fn release(scene: &mut Scene, x: f64, y: f64) {
        scene.dispatch_pointer(PointerEvent::Up {
            position: Point::new(x, y),
            button: MouseButton::Left,
        });
    }

    fn offset(scene: &Scene, el: ElementId) -> Point {
        scene.element(el).unwrap().offset()
    }

    #[test]
    fn test_defaults_merge() {
        let opts = options(json!({ "axis": "y" }));
        assert_eq!(opts.axis, Axis::Y);
        assert_eq!(opts.grid, Grid::new(1.0, 1.0));
        assert_eq!(opts.distance, None);
        assert_eq!(opts.containment, Containment::Canvas);
    }

    #[test]
    fn test_option_shapes() {
        let opts = options(json!({
            "grid": { "cell_width": 32, "cell_height": 0 },
            "containment": [0, 0, 200, 100],
            "distance": 15
        }));
        assert_eq!(opts.grid, Grid::new(32.0, 1.0));
        assert_eq!(opts.containment, Containment::Region(Rect::new(0.0, 0.0, 200.0, 100.0)));
        assert_eq!(opts.distance, Some(15.0));

        assert_eq!(options(json!({ "containment": "parent" })).containment, Containment::Parent);
        assert_eq!(options(json!({ "containment": null })).containment, Containment::Canvas);
        assert_eq!(options(json!({ "axis": "yx" })).axis, Axis::Both);
        assert!(serde_json::from_value::<DragOptions>(json!({ "axis": "z" })).is_err());
    }

    #[test]
    fn test_grid_snap_truncates() {
        let grid = Grid::new(10.0, 5.0);
        assert_eq!(grid.snap(Point::new(27.0, 14.0)), Point::new(20.0, 10.0));
        assert_eq!(grid.snap(Point::new(-27.0, -1.0)), Point::new(-20.0, 0.0));
    }

    #[test]
    fn test_drag_moves_element() {
        let (mut scene, el) = setup(50.0);
        draggable(&mut scene, el, &DragOptions::default(), DragCallbacks::new()).unwrap();

        press(&mut scene, 10.0, 10.0);
        assert!(scene.attr_flag(el, DRAG_ATTR));
        move_to(&mut scene, 110.0, 60.0);
        assert_eq!(offset(&scene, el), Point::new(100.0, 50.0));

        release(&mut scene, 110.0, 60.0);
        assert!(!scene.attr_flag(el, DRAG_ATTR));
        move_to(&mut scene, 300.0, 300.0);
        assert_eq!(offset(&scene, el), Point::new(100.0, 50.0));
    }

    #[test]
    fn test_move_without_press_is_ignored() {
        let (mut scene, el) = setup(50.0);
        draggable(&mut scene, el, &DragOptions::default(), DragCallbacks::new()).unwrap();

        move_to(&mut scene, 200.0, 200.0);
        assert_eq!(offset(&scene, el), Point::ZERO);
    }

    #[test]
    fn test_axis_x_keeps_y() {
        let (mut scene, el) = setup(50.0);
        let opts = options(json!({ "axis": "x" }));
        draggable(&mut scene, el, &opts, DragCallbacks::new()).unwrap();

        press(&mut scene, 10.0, 10.0);
        move_to(&mut scene, 80.0, 90.0);
        let pos = offset(&scene, el);
        assert!((pos.x - 70.0).abs() < f64::EPSILON);
        assert!(pos.y.abs() < f64::EPSILON);
    }

    #[test]
    fn test_containment_clamps() {
        let (mut scene, el) = setup(50.0);
        let opts = options(json!({ "containment": [0, 0, 200, 200] }));
        draggable(&mut scene, el, &opts, DragCallbacks::new()).unwrap();

        press(&mut scene, 0.0, 0.0);
        move_to(&mut scene, 190.0, 20.0);
        let pos = offset(&scene, el);
        assert!(pos.x <= 150.0);
        assert!((pos.x - 150.0).abs() < f64::EPSILON);
        assert!((pos.y - 20.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_grid_applies_while_dragging() {
        let (mut scene, el) = setup(20.0);
        let opts = options(json!({ "grid": [16, 16] }));
        draggable(&mut scene, el, &opts, DragCallbacks::new()).unwrap();

        press(&mut scene, 5.0, 5.0);
        move_to(&mut scene, 40.0, 70.0);
        assert_eq!(offset(&scene, el), Point::new(32.0, 64.0));
    }

    #[test]
    fn test_distance_threshold() {
        let (mut scene, el) = setup(50.0);
        let opts = options(json!({ "distance": 30 }));
        draggable(&mut scene, el, &opts, DragCallbacks::new()).unwrap();

        press(&mut scene, 10.0, 10.0);
        move_to(&mut scene, 30.0, 10.0);
        assert_eq!(offset(&scene, el), Point::new(20.0, 0.0));

        // Beyond the threshold on x: x stays, y still follows
        move_to(&mut scene, 60.0, 25.0);
        assert_eq!(offset(&scene, el), Point::new(20.0, 15.0));
    }

    #[test]
    fn test_zero_distance_is_unset() {
        let (mut scene, el) = setup(50.0);
        let opts = options(json!({ "distance": 0 }));
        let handle = draggable(&mut scene, el, &opts, DragCallbacks::new()).unwrap();
        assert_eq!(handle.rules.distance, None);

        press(&mut scene, 10.0, 10.0);
        move_to(&mut scene, 60.0, 60.0);
        assert_eq!(offset(&scene, el), Point::new(50.0, 50.0));
    }

    #[test]
    fn test_only_left_button_starts_drag() {
        let (mut scene, el) = setup(50.0);
        draggable(&mut scene, el, &DragOptions::default(), DragCallbacks::new()).unwrap();

        scene.dispatch_pointer(PointerEvent::Down {
            position: Point::new(10.0, 10.0),
            button: MouseButton::Right,
        });
        assert!(!scene.attr_flag(el, DRAG_ATTR));
        move_to(&mut scene, 60.0, 60.0);
        assert_eq!(offset(&scene, el), Point::ZERO);
        release(&mut scene, 60.0, 60.0);

        press(&mut scene, 10.0, 10.0);
        move_to(&mut scene, 60.0, 60.0);
        assert_eq!(offset(&scene, el), Point::new(50.0, 50.0));
    }

    #[test]
    fn test_parent_containment() {
        let mut scene = Scene::new("drag", Size::new(800.0, 600.0));
        let stage = scene.stage();
        let parent = scene.create_element(Some(Size::new(100.0, 100.0)));
        scene.element_mut(parent).unwrap().set_offset(Point::new(100.0, 100.0));
        scene.append(stage, parent).unwrap();
        let child = scene.create_element(Some(Size::new(10.0, 10.0)));
        scene.append(parent, child).unwrap();

        let opts = options(json!({ "containment": "parent" }));
        let handle = draggable(&mut scene, child, &opts, DragCallbacks::new()).unwrap();
        assert_eq!(handle.rules.bounds, Some(Rect::new(100.0, 100.0, 200.0, 200.0)));

        press(&mut scene, 105.0, 105.0);
        move_to(&mut scene, 400.0, 150.0);
        // Relative to the parent, clamped at its right edge
        assert_eq!(offset(&scene, child), Point::new(90.0, 45.0));
    }

    #[test]
    fn test_parent_containment_without_parent() {
        let mut scene = Scene::new("drag", Size::new(800.0, 600.0));
        let el = scene.create_element(Some(Size::new(10.0, 10.0)));
        let opts = options(json!({ "containment": "parent" }));
        let handle = draggable(&mut scene, el, &opts, DragCallbacks::new()).unwrap();
        assert_eq!(handle.rules.bounds, None);
    }

    #[test]
    fn test_callbacks_fire_in_order() {
        let (mut scene, el) = setup(50.0);
        let log = Rc::new(RefCell::new(Vec::new()));
        let (a, b, c) = (Rc::clone(&log), Rc::clone(&log), Rc::clone(&log));
        let callbacks = DragCallbacks::new()
            .on_start(move |_, _, p| a.borrow_mut().push(format!("start {}", p.x)))
            .on_drag(move |_, _, p| b.borrow_mut().push(format!("drag {}", p.x)))
            .on_stop(move |_, _| c.borrow_mut().push("stop".to_string()));
        draggable(&mut scene, el, &DragOptions::default(), callbacks).unwrap();

        move_to(&mut scene, 5.0, 5.0);
        press(&mut scene, 5.0, 5.0);
        move_to(&mut scene, 20.0, 5.0);
        release(&mut scene, 20.0, 5.0);
        release(&mut scene, 20.0, 5.0);

        assert_eq!(
            log.borrow().as_slice(),
            &["start 5", "drag 20", "stop"]
        );
    }

    #[test]
    fn test_release_off_element_stops() {
        let (mut scene, el) = setup(50.0);
        draggable(&mut scene, el, &DragOptions::default(), DragCallbacks::new()).unwrap();

        press(&mut scene, 10.0, 10.0);
        release(&mut scene, 700.0, 500.0);
        assert!(!scene.attr_flag(el, DRAG_ATTR));
    }

    #[test]
    fn test_detach() {
        let (mut scene, el) = setup(50.0);
        let handle =
            draggable(&mut scene, el, &DragOptions::default(), DragCallbacks::new()).unwrap();
        assert_eq!(scene.listener_count(el), 1);

        handle.detach(&mut scene);
        assert_eq!(scene.listener_count(el), 0);
        assert_eq!(scene.listener_count(scene.stage()), 0);

        press(&mut scene, 10.0, 10.0);
        assert!(!handle.is_dragging(&scene));
    }
}
