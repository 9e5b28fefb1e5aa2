use std::cell::RefCell;
use std::rc::Rc;

use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{AddEventListenerOptions, Event, HtmlElement, PointerEvent, TouchEvent, TouchList};

use super::adapter::{EventKind, GestureLock, InputEvent, InputModel, PointerSample, TouchPoint};
use super::binder::EventHost;
use crate::state::suppression;
use crate::util::cwarn;

/// True when the page exposes the unified pointer event constructor.
pub fn supports_pointer_events() -> bool {
    web_sys::window()
        .and_then(|win| js_sys::Reflect::get(&win, &JsValue::from_str("PointerEvent")).ok())
        .map(|ctor| ctor.is_function())
        .unwrap_or(false)
}

#[derive(Clone, PartialEq)]
pub struct ElementHost {
    element: HtmlElement,
}

impl ElementHost {
    pub fn new(element: HtmlElement) -> Self {
        Self { element }
    }
}

pub struct WebListener {
    kind: EventKind,
    callback: Closure<dyn FnMut(Event)>,
}

impl EventHost for ElementHost {
    type Listener = WebListener;

    fn input_model(&self) -> InputModel {
        InputModel::from_capability(supports_pointer_events())
    }

    fn listen(&self, kind: EventKind, lock: Rc<RefCell<GestureLock>>) -> Option<WebListener> {
        let callback = Closure::wrap(Box::new(move |e: Event| {
            let Some(input) = normalize(kind, &e) else {
                return;
            };
            let decision = lock.borrow_mut().handle(&input);
            suppression::apply(decision, &e);
        }) as Box<dyn FnMut(_)>);

        let options = AddEventListenerOptions::new();
        if let Some(passive) = kind.passive() {
            options.set_passive(passive);
        }
        match self.element.add_event_listener_with_callback_and_add_event_listener_options(
            kind.name(),
            callback.as_ref().unchecked_ref(),
            &options,
        ) {
            Ok(()) => Some(WebListener { kind, callback }),
            Err(err) => {
                cwarn(&format!("[scroll-lock] failed to add {} listener: {:?}", kind.name(), err));
                None
            }
        }
    }

    fn unlisten(&self, listener: WebListener) {
        let _ = self.element.remove_event_listener_with_callback(
            listener.kind.name(),
            listener.callback.as_ref().unchecked_ref(),
        );
        // dropping the closure releases the captured gesture state
        drop(listener);
    }
}

fn normalize(kind: EventKind, e: &Event) -> Option<InputEvent> {
    match kind {
        EventKind::PointerDown | EventKind::PointerMove => {
            let pe = e.dyn_ref::<PointerEvent>()?;
            let sample = PointerSample {
                x: pe.client_x() as f64,
                y: pe.client_y() as f64,
                id: pe.pointer_id(),
                device: pe.pointer_type().as_str().into(),
                primary: pe.is_primary(),
            };
            Some(if kind == EventKind::PointerDown {
                InputEvent::PointerDown(sample)
            } else {
                InputEvent::PointerMove(sample)
            })
        }
        EventKind::PointerUp | EventKind::PointerCancel | EventKind::PointerLeave => {
            let pe = e.dyn_ref::<PointerEvent>()?;
            Some(InputEvent::PointerEnd { id: pe.pointer_id() })
        }
        EventKind::TouchStart => {
            let te = e.dyn_ref::<TouchEvent>()?;
            Some(InputEvent::TouchStart { touches: touch_points(&te.touches()) })
        }
        EventKind::TouchMove => {
            let te = e.dyn_ref::<TouchEvent>()?;
            Some(InputEvent::TouchMove { touches: touch_points(&te.touches()) })
        }
        EventKind::TouchEnd | EventKind::TouchCancel => {
            let te = e.dyn_ref::<TouchEvent>()?;
            Some(InputEvent::TouchEnd { changed: touch_points(&te.changed_touches()) })
        }
    }
}

fn touch_points(list: &TouchList) -> Vec<TouchPoint> {
    (0..list.length())
        .filter_map(|i| list.item(i))
        .map(|t| TouchPoint {
            x: t.client_x() as f64,
            y: t.client_y() as f64,
            id: t.identifier(),
        })
        .collect()
}
