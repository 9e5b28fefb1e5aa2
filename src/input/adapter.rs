//! Normalizes the two browser contact models (pointer events and legacy touch
//! events) into calls on one [`GestureClassifier`].
//!
//! Nothing in here touches the DOM; `input::web` converts real events into
//! [`InputEvent`]s and applies the returned [`SuppressDecision`].

use crate::state::gesture::{ContactId, GestureClassifier};
use crate::state::suppression::SuppressDecision;

/// Which family of events a binding listens to. Never both on one element.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum InputModel {
    Pointer,
    Touch,
}

impl InputModel {
    pub fn from_capability(has_pointer_events: bool) -> Self {
        if has_pointer_events {
            InputModel::Pointer
        } else {
            InputModel::Touch
        }
    }

    pub fn event_kinds(self) -> &'static [EventKind] {
        match self {
            InputModel::Pointer => &[
                EventKind::PointerDown,
                EventKind::PointerMove,
                EventKind::PointerUp,
                EventKind::PointerCancel,
                EventKind::PointerLeave,
            ],
            InputModel::Touch => &[
                EventKind::TouchStart,
                EventKind::TouchMove,
                EventKind::TouchEnd,
                EventKind::TouchCancel,
            ],
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum EventKind {
    PointerDown,
    PointerMove,
    PointerUp,
    PointerCancel,
    PointerLeave,
    TouchStart,
    TouchMove,
    TouchEnd,
    TouchCancel,
}

impl EventKind {
    pub fn name(self) -> &'static str {
        match self {
            EventKind::PointerDown => "pointerdown",
            EventKind::PointerMove => "pointermove",
            EventKind::PointerUp => "pointerup",
            EventKind::PointerCancel => "pointercancel",
            EventKind::PointerLeave => "pointerleave",
            EventKind::TouchStart => "touchstart",
            EventKind::TouchMove => "touchmove",
            EventKind::TouchEnd => "touchend",
            EventKind::TouchCancel => "touchcancel",
        }
    }

    /// `Some(false)` for move listeners, which must be able to cancel the
    /// browser's scroll synchronously. `None` leaves the browser default.
    pub fn passive(self) -> Option<bool> {
        match self {
            EventKind::PointerMove | EventKind::TouchMove => Some(false),
            EventKind::TouchStart => Some(true),
            _ => None,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DeviceClass {
    Mouse,
    Pen,
    Touch,
    Unknown,
}

impl From<&str> for DeviceClass {
    fn from(pointer_type: &str) -> Self {
        match pointer_type {
            "mouse" => DeviceClass::Mouse,
            "pen" => DeviceClass::Pen,
            "touch" => DeviceClass::Touch,
            _ => DeviceClass::Unknown,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PointerSample {
    pub x: f64,
    pub y: f64,
    pub id: ContactId,
    pub device: DeviceClass,
    pub primary: bool,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TouchPoint {
    pub x: f64,
    pub y: f64,
    pub id: ContactId,
}

#[derive(Clone, Debug, PartialEq)]
pub enum InputEvent {
    PointerDown(PointerSample),
    PointerMove(PointerSample),
    /// pointerup, pointercancel and pointerleave all end the gesture.
    PointerEnd { id: ContactId },
    TouchStart { touches: Vec<TouchPoint> },
    TouchMove { touches: Vec<TouchPoint> },
    /// touchend and touchcancel; `changed` holds the lifted contacts.
    TouchEnd { changed: Vec<TouchPoint> },
}

fn find_touch(touches: &[TouchPoint], id: ContactId) -> Option<&TouchPoint> {
    touches.iter().find(|t| t.id == id)
}

/// Gesture state for one bound element.
#[derive(Debug, Clone, Default)]
pub struct GestureLock {
    classifier: GestureClassifier,
}

impl GestureLock {
    pub fn new(threshold: f64) -> Self {
        Self {
            classifier: GestureClassifier::new(threshold),
        }
    }

    #[cfg(test)]
    pub fn classifier(&self) -> &GestureClassifier {
        &self.classifier
    }

    pub fn handle(&mut self, event: &InputEvent) -> SuppressDecision {
        match event {
            InputEvent::PointerDown(s) => {
                self.pointer_down(s);
                SuppressDecision::Allow
            }
            InputEvent::PointerMove(s) => self.classifier.on_move(s.x, s.y, s.id),
            InputEvent::PointerEnd { id } => {
                self.classifier.on_end(*id);
                SuppressDecision::Allow
            }
            InputEvent::TouchStart { touches } => {
                self.touch_start(touches);
                SuppressDecision::Allow
            }
            InputEvent::TouchMove { touches } => self.touch_move(touches),
            InputEvent::TouchEnd { changed } => {
                self.touch_end(changed);
                SuppressDecision::Allow
            }
        }
    }

    fn pointer_down(&mut self, s: &PointerSample) {
        if s.device == DeviceClass::Mouse || !s.primary {
            return;
        }
        // a second primary contact cannot take over a gesture already in flight
        if self.classifier.is_tracking() && !self.classifier.is_tracking_id(s.id) {
            return;
        }
        self.classifier.on_start(s.x, s.y, s.id);
    }

    fn touch_start(&mut self, touches: &[TouchPoint]) {
        match touches {
            [only] => self.classifier.on_start(only.x, only.y, only.id),
            _ => self.classifier.abort(),
        }
    }

    fn touch_move(&mut self, touches: &[TouchPoint]) -> SuppressDecision {
        let Some(id) = self.classifier.state().active_id else {
            return SuppressDecision::Allow;
        };
        match find_touch(touches, id) {
            Some(t) => self.classifier.on_move(t.x, t.y, t.id),
            None => SuppressDecision::Allow,
        }
    }

    fn touch_end(&mut self, changed: &[TouchPoint]) {
        let Some(id) = self.classifier.state().active_id else {
            return;
        };
        if find_touch(changed, id).is_some() {
            self.classifier.on_cancel(id);
        }
    }
}
