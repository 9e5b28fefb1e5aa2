use super::gesture::Orientation;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SuppressDecision {
    Allow,
    Suppress,
}

/// The slice of a DOM event the suppression policy touches.
pub trait Suppressible {
    fn cancelable(&self) -> bool;
    fn prevent_default(&self);
    fn stop_propagation(&self);
}

impl Suppressible for web_sys::Event {
    fn cancelable(&self) -> bool {
        web_sys::Event::cancelable(self)
    }
    fn prevent_default(&self) {
        web_sys::Event::prevent_default(self)
    }
    fn stop_propagation(&self) {
        web_sys::Event::stop_propagation(self)
    }
}

pub fn decide(orientation: Orientation) -> SuppressDecision {
    match orientation {
        Orientation::Horizontal => SuppressDecision::Suppress,
        Orientation::Vertical | Orientation::Undecided => SuppressDecision::Allow,
    }
}

/// Must run inside the move dispatch; cancelling afterwards has no effect on scrolling.
pub fn apply(decision: SuppressDecision, event: &dyn Suppressible) {
    if decision != SuppressDecision::Suppress {
        return;
    }
    if event.cancelable() {
        event.prevent_default();
    }
    // nested carousels: keep outer listeners from handling the same move
    event.stop_propagation();
}
