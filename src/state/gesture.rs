// Directional gesture lock: decides whether a contact is a carousel swipe or a page scroll.
use super::suppression::{self, SuppressDecision};

/// Distance (CSS px, Manhattan) a contact must travel before its axis is locked.
pub const DEFAULT_LOCK_THRESHOLD: f64 = 10.0;

/// Pointer id or touch identifier, as reported by the browser.
pub type ContactId = i32;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Orientation {
    #[default]
    Undecided,
    Horizontal,
    Vertical,
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct GestureState {
    pub start_x: f64,
    pub start_y: f64,
    pub orientation: Orientation,
    pub active_id: Option<ContactId>,
    pub tracking: bool,
}

#[derive(Debug, Clone)]
pub struct GestureClassifier {
    threshold: f64,
    state: GestureState,
}

impl Default for GestureClassifier {
    fn default() -> Self {
        Self::new(DEFAULT_LOCK_THRESHOLD)
    }
}

impl GestureClassifier {
    pub fn new(threshold: f64) -> Self {
        Self {
            threshold: threshold.max(0.0),
            state: GestureState::default(),
        }
    }

    pub fn state(&self) -> &GestureState {
        &self.state
    }

    pub fn is_tracking(&self) -> bool {
        self.state.tracking
    }

    pub fn is_tracking_id(&self, id: ContactId) -> bool {
        self.state.tracking && self.state.active_id == Some(id)
    }

    /// Opens a new gesture. Any previous gesture is replaced.
    pub fn on_start(&mut self, x: f64, y: f64, id: ContactId) {
        self.state = GestureState {
            start_x: x,
            start_y: y,
            orientation: Orientation::Undecided,
            active_id: Some(id),
            tracking: true,
        };
    }

    pub fn on_move(&mut self, x: f64, y: f64, id: ContactId) -> SuppressDecision {
        if !self.is_tracking_id(id) {
            return SuppressDecision::Allow;
        }
        let dx = x - self.state.start_x;
        let dy = y - self.state.start_y;
        if self.state.orientation == Orientation::Undecided {
            let distance = dx.abs() + dy.abs();
            // NaN compares false against the threshold and never locks.
            if !(distance >= self.threshold) || distance == 0.0 {
                return SuppressDecision::Allow;
            }
            self.state.orientation = if dx.abs() > dy.abs() {
                Orientation::Horizontal
            } else {
                Orientation::Vertical
            };
        }
        suppression::decide(self.state.orientation)
    }

    pub fn on_end(&mut self, id: ContactId) {
        if self.state.active_id == Some(id) {
            self.reset();
        }
    }

    pub fn on_cancel(&mut self, id: ContactId) {
        self.on_end(id);
    }

    /// Drops the in-flight gesture regardless of which contact owns it.
    pub fn abort(&mut self) {
        self.reset();
    }

    fn reset(&mut self) {
        self.state = GestureState::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn classifier() -> GestureClassifier {
        GestureClassifier::new(10.0)
    }

    #[test]
    fn horizontal_swipe_locks_and_suppresses() {
        let mut c = classifier();
        c.on_start(10.0, 10.0, 1);
        assert_eq!(c.on_move(70.0, 18.0, 1), SuppressDecision::Suppress);
        assert_eq!(c.state().orientation, Orientation::Horizontal);
    }

    #[test]
    fn vertical_swipe_locks_without_suppression() {
        let mut c = classifier();
        c.on_start(10.0, 10.0, 2);
        assert_eq!(c.on_move(22.0, 90.0, 2), SuppressDecision::Allow);
        assert_eq!(c.state().orientation, Orientation::Vertical);
    }

    #[test]
    fn below_threshold_stays_undecided() {
        let mut c = classifier();
        c.on_start(0.0, 0.0, 1);
        assert_eq!(c.on_move(5.0, 4.0, 1), SuppressDecision::Allow);
        assert_eq!(c.state().orientation, Orientation::Undecided);
        // 9.99 is still short of the threshold
        assert_eq!(c.on_move(-6.0, 3.99, 1), SuppressDecision::Allow);
        assert_eq!(c.state().orientation, Orientation::Undecided);
    }

    #[test]
    fn exactly_threshold_locks() {
        let mut c = classifier();
        c.on_start(0.0, 0.0, 1);
        assert_eq!(c.on_move(7.0, 3.0, 1), SuppressDecision::Suppress);
    }

    #[test]
    fn diagonal_tie_resolves_vertical() {
        let mut c = GestureClassifier::new(8.0);
        c.on_start(0.0, 0.0, 1);
        assert_eq!(c.on_move(10.0, 10.0, 1), SuppressDecision::Allow);
        assert_eq!(c.state().orientation, Orientation::Vertical);
    }

    #[test]
    fn zero_delta_never_locks() {
        let mut c = GestureClassifier::new(0.0);
        c.on_start(3.0, 3.0, 1);
        assert_eq!(c.on_move(3.0, 3.0, 1), SuppressDecision::Allow);
        assert_eq!(c.state().orientation, Orientation::Undecided);
    }

    #[test]
    fn lock_is_final_for_the_gesture() {
        let mut c = classifier();
        c.on_start(0.0, 0.0, 1);
        assert_eq!(c.on_move(40.0, 2.0, 1), SuppressDecision::Suppress);
        // drifting back and going mostly vertical keeps the horizontal lock
        assert_eq!(c.on_move(0.0, 0.0, 1), SuppressDecision::Suppress);
        assert_eq!(c.on_move(5.0, 300.0, 1), SuppressDecision::Suppress);

        c.on_end(1);
        c.on_start(0.0, 0.0, 1);
        assert_eq!(c.on_move(1.0, 40.0, 1), SuppressDecision::Allow);
        assert_eq!(c.on_move(400.0, 40.0, 1), SuppressDecision::Allow);
        assert_eq!(c.state().orientation, Orientation::Vertical);
    }

    #[test]
    fn foreign_contact_is_ignored() {
        let mut c = classifier();
        c.on_start(0.0, 0.0, 1);
        assert_eq!(c.on_move(80.0, 0.0, 2), SuppressDecision::Allow);
        assert_eq!(c.state().orientation, Orientation::Undecided);
        c.on_end(2);
        assert!(c.is_tracking());
    }

    #[test]
    fn end_and_cancel_reset_state() {
        let mut c = classifier();
        c.on_start(4.0, 4.0, 7);
        c.on_move(60.0, 4.0, 7);
        c.on_cancel(7);
        assert_eq!(*c.state(), GestureState::default());
        assert_eq!(c.on_move(90.0, 4.0, 7), SuppressDecision::Allow);

        c.on_start(4.0, 4.0, 8);
        c.on_end(8);
        assert!(!c.is_tracking());
        assert_eq!(c.state().active_id, None);
    }

    #[test]
    fn move_without_start_is_noop() {
        let mut c = classifier();
        assert_eq!(c.on_move(100.0, 0.0, 1), SuppressDecision::Allow);
        assert_eq!(*c.state(), GestureState::default());
    }

    #[test]
    fn abort_clears_tracking() {
        let mut c = classifier();
        c.on_start(0.0, 0.0, 3);
        c.abort();
        assert!(!c.is_tracking());
        assert_eq!(c.on_move(50.0, 0.0, 3), SuppressDecision::Allow);
    }

    #[test]
    fn never_suppresses_below_threshold_on_any_trace() {
        let mut c = GestureClassifier::new(12.0);
        c.on_start(100.0, 100.0, 1);
        let trace = [(101.0, 99.0), (104.0, 97.0), (95.0, 104.0), (105.5, 105.5), (94.0, 100.0)];
        for (x, y) in trace {
            assert_eq!(c.on_move(x, y, 1), SuppressDecision::Allow);
        }
    }
}
