use web_sys::HtmlElement;
use yew::prelude::*;

use crate::input::{ElementHost, ScrollLockBinder};
use crate::state::DEFAULT_LOCK_THRESHOLD;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScrollLockOptions {
    /// Turn off when the carousel is hidden or has nothing to swipe.
    pub enabled: bool,
    /// Read once, when the hook first runs.
    pub lock_threshold: f64,
}

impl Default for ScrollLockOptions {
    fn default() -> Self {
        Self {
            enabled: true,
            lock_threshold: DEFAULT_LOCK_THRESHOLD,
        }
    }
}

/// Blocks page scroll while a horizontal swipe is in progress on the returned ref's element.
#[hook]
pub fn use_scroll_lock(options: ScrollLockOptions) -> NodeRef {
    let node_ref = use_node_ref();
    let binder = use_mut_ref(|| ScrollLockBinder::<ElementHost>::new(options.lock_threshold));

    // Runs after every render: the element behind the ref can change without a prop change.
    {
        let node_ref = node_ref.clone();
        let binder = binder.clone();
        let enabled = options.enabled;
        use_effect(move || {
            let target = node_ref.cast::<HtmlElement>().map(ElementHost::new);
            binder.borrow_mut().rebind(target, enabled);
            || ()
        });
    }
    {
        let binder = binder.clone();
        use_effect_with((), move |_| move || binder.borrow_mut().teardown());
    }

    node_ref
}
