use std::cell::RefCell;
use std::rc::Rc;

use super::adapter::{EventKind, GestureLock, InputModel};
use crate::util::clog;

/// Something listeners can be attached to (a DOM element in the app).
pub trait EventHost: Clone + PartialEq {
    type Listener;

    /// Capability check, evaluated at every attach.
    fn input_model(&self) -> InputModel;

    /// Registers one listener feeding `lock`. `None` when the host refused it.
    fn listen(&self, kind: EventKind, lock: Rc<RefCell<GestureLock>>) -> Option<Self::Listener>;

    fn unlisten(&self, listener: Self::Listener);
}

/// One attached listener set. Owns the gesture state for its element.
pub struct Binding<H: EventHost> {
    host: H,
    model: InputModel,
    #[cfg(test)]
    lock: Rc<RefCell<GestureLock>>,
    listeners: Vec<H::Listener>,
}

impl<H: EventHost> Binding<H> {
    pub fn attach(host: H, threshold: f64) -> Self {
        let model = host.input_model();
        let lock = Rc::new(RefCell::new(GestureLock::new(threshold)));
        let listeners = model
            .event_kinds()
            .iter()
            .filter_map(|kind| host.listen(*kind, lock.clone()))
            .collect();
        clog(&format!("[scroll-lock] attached {:?} listeners", model));
        Self {
            host,
            model,
            #[cfg(test)]
            lock,
            listeners,
        }
    }

    #[cfg(test)]
    pub fn model(&self) -> InputModel {
        self.model
    }

    #[cfg(test)]
    pub fn lock(&self) -> &Rc<RefCell<GestureLock>> {
        &self.lock
    }

    pub fn detach(mut self) {
        for listener in self.listeners.drain(..) {
            self.host.unlisten(listener);
        }
        clog(&format!("[scroll-lock] detached {:?} listeners", self.model));
    }
}

/// Keeps at most one [`Binding`] consistent with the latest `(target, enabled)` pair.
pub struct ScrollLockBinder<H: EventHost> {
    threshold: f64,
    observed: Option<(Option<H>, bool)>,
    binding: Option<Binding<H>>,
}

impl<H: EventHost> ScrollLockBinder<H> {
    pub fn new(threshold: f64) -> Self {
        Self {
            threshold,
            observed: None,
            binding: None,
        }
    }

    #[cfg(test)]
    pub fn binding(&self) -> Option<&Binding<H>> {
        self.binding.as_ref()
    }

    #[cfg(test)]
    pub fn is_bound(&self) -> bool {
        self.binding.is_some()
    }

    /// Returns true when the pair changed and the listeners were rebuilt.
    pub fn rebind(&mut self, target: Option<H>, enabled: bool) -> bool {
        let next = (target, enabled);
        if self.observed.as_ref() == Some(&next) {
            return false;
        }
        self.detach();
        if let (Some(host), true) = (&next.0, next.1) {
            self.binding = Some(Binding::attach(host.clone(), self.threshold));
        }
        self.observed = Some(next);
        true
    }

    pub fn teardown(&mut self) {
        self.detach();
        self.observed = None;
    }

    fn detach(&mut self) {
        if let Some(binding) = self.binding.take() {
            binding.detach();
        }
    }
}

impl<H: EventHost> Drop for ScrollLockBinder<H> {
    fn drop(&mut self) {
        self.detach();
    }
}

#[cfg(test)]
pub(crate) mod testing {
    use super::*;
    use crate::input::adapter::InputEvent;
    use crate::state::suppression::{self, testing::SpyEvent};
    use std::cell::Cell;

    #[derive(Default)]
    pub struct Registry {
        pub listeners: RefCell<Vec<(u32, EventKind, Rc<RefCell<GestureLock>>)>>,
        pub added: Cell<u32>,
        pub removed: Cell<u32>,
        pub pointer_supported: Cell<bool>,
    }

    /// Element stand-in that records registrations.
    #[derive(Clone)]
    pub struct FakeElement {
        pub name: &'static str,
        pub registry: Rc<Registry>,
    }

    impl PartialEq for FakeElement {
        fn eq(&self, other: &Self) -> bool {
            self.name == other.name && Rc::ptr_eq(&self.registry, &other.registry)
        }
    }

    impl FakeElement {
        pub fn new(name: &'static str, pointer_supported: bool) -> Self {
            let registry = Rc::new(Registry::default());
            registry.pointer_supported.set(pointer_supported);
            Self { name, registry }
        }

        pub fn listener_count(&self) -> usize {
            self.registry.listeners.borrow().len()
        }

        pub fn kinds(&self) -> Vec<EventKind> {
            self.registry.listeners.borrow().iter().map(|(_, k, _)| *k).collect()
        }

        /// Delivers `event` to every listener of `kind`, like a DOM dispatch.
        pub fn dispatch(&self, kind: EventKind, event: InputEvent) -> SpyEvent {
            let spy = SpyEvent::default();
            let targets: Vec<_> = self
                .registry
                .listeners
                .borrow()
                .iter()
                .filter(|(_, k, _)| *k == kind)
                .map(|(_, _, lock)| lock.clone())
                .collect();
            for lock in targets {
                let decision = lock.borrow_mut().handle(&event);
                suppression::apply(decision, &spy);
            }
            spy
        }
    }

    impl EventHost for FakeElement {
        type Listener = u32;

        fn input_model(&self) -> InputModel {
            InputModel::from_capability(self.registry.pointer_supported.get())
        }

        fn listen(&self, kind: EventKind, lock: Rc<RefCell<GestureLock>>) -> Option<u32> {
            let handle = self.registry.added.get() + 1;
            self.registry.added.set(handle);
            self.registry.listeners.borrow_mut().push((handle, kind, lock));
            Some(handle)
        }

        fn unlisten(&self, listener: u32) {
            let mut listeners = self.registry.listeners.borrow_mut();
            let before = listeners.len();
            listeners.retain(|(h, _, _)| *h != listener);
            if listeners.len() < before {
                self.registry.removed.set(self.registry.removed.get() + 1);
            }
        }
    }
}
