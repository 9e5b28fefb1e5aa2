//! Light/dark color scheme preference.
//!
//! [`ThemeConfig`] is the pure state: user preference, system preference and
//! the store that persists the choice. The page holds one process-wide
//! instance behind [`init`] / [`reset`]; a `(prefers-color-scheme: dark)`
//! media listener keeps the system half current and the resolved scheme is
//! mirrored as a `dark` class on `<html>`.

use std::cell::RefCell;

use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::MediaQueryList;
use yew::Callback;

use crate::util::{clog, cwarn};

pub const COLOR_SCHEME_KEY: &str = "color-scheme-preference";
const DARK_QUERY: &str = "(prefers-color-scheme: dark)";

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ColorSchemePreference {
    Light,
    Dark,
    #[default]
    System,
}

impl ColorSchemePreference {
    pub fn parse(raw: &str) -> Option<Self> {
        match raw {
            "light" => Some(Self::Light),
            "dark" => Some(Self::Dark),
            "system" => Some(Self::System),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Light => "light",
            Self::Dark => "dark",
            Self::System => "system",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ResolvedScheme {
    Light,
    Dark,
}

impl ResolvedScheme {
    pub fn opposite(self) -> Self {
        match self {
            Self::Light => Self::Dark,
            Self::Dark => Self::Light,
        }
    }
}

pub fn resolve(pref: ColorSchemePreference, system_prefers_dark: bool) -> ResolvedScheme {
    match pref {
        ColorSchemePreference::Light => ResolvedScheme::Light,
        ColorSchemePreference::Dark => ResolvedScheme::Dark,
        ColorSchemePreference::System if system_prefers_dark => ResolvedScheme::Dark,
        ColorSchemePreference::System => ResolvedScheme::Light,
    }
}

/// Key/value persistence for preferences. Failures are reported, not raised.
pub trait PreferenceStore {
    fn read(&self, key: &str) -> Option<String>;
    fn write(&self, key: &str, value: &str) -> bool;
    fn remove(&self, key: &str) -> bool;
}

impl PreferenceStore for web_sys::Storage {
    fn read(&self, key: &str) -> Option<String> {
        match self.get_item(key) {
            Ok(v) => v,
            Err(err) => {
                cwarn(&format!("[theme] Failed to read {}: {:?}", key, err));
                None
            }
        }
    }

    fn write(&self, key: &str, value: &str) -> bool {
        let ok = self.set_item(key, value).is_ok();
        if !ok {
            cwarn(&format!("[theme] Failed to persist {}", key));
        }
        ok
    }

    fn remove(&self, key: &str) -> bool {
        let ok = self.remove_item(key).is_ok();
        if !ok {
            cwarn(&format!("[theme] Failed to clear {}", key));
        }
        ok
    }
}

pub struct ThemeConfig {
    preference: ColorSchemePreference,
    system_prefers_dark: bool,
    store: Option<Box<dyn PreferenceStore>>,
}

impl ThemeConfig {
    /// Reads the stored preference; missing or unrecognized values mean `System`.
    pub fn load(store: Option<Box<dyn PreferenceStore>>, system_prefers_dark: bool) -> Self {
        let preference = store
            .as_ref()
            .and_then(|s| s.read(COLOR_SCHEME_KEY))
            .and_then(|raw| ColorSchemePreference::parse(&raw))
            .unwrap_or_default();
        Self {
            preference,
            system_prefers_dark,
            store,
        }
    }

    pub fn preference(&self) -> ColorSchemePreference {
        self.preference
    }

    pub fn resolved(&self) -> ResolvedScheme {
        resolve(self.preference, self.system_prefers_dark)
    }

    pub fn is_dark(&self) -> bool {
        self.resolved() == ResolvedScheme::Dark
    }

    pub fn set_preference(&mut self, preference: ColorSchemePreference) {
        self.preference = preference;
        if let Some(store) = &self.store {
            match preference {
                ColorSchemePreference::System => store.remove(COLOR_SCHEME_KEY),
                other => store.write(COLOR_SCHEME_KEY, other.as_str()),
            };
        }
    }

    /// Pins the opposite of what is currently shown.
    pub fn toggle(&mut self) -> ResolvedScheme {
        let next = match self.resolved().opposite() {
            ResolvedScheme::Light => ColorSchemePreference::Light,
            ResolvedScheme::Dark => ColorSchemePreference::Dark,
        };
        self.set_preference(next);
        self.resolved()
    }

    pub fn set_system_prefers_dark(&mut self, dark: bool) {
        self.system_prefers_dark = dark;
    }
}

/// `change` subscription on the media query, removed on drop.
struct MediaWatch {
    media: MediaQueryList,
    callback: Closure<dyn FnMut(JsValue)>,
    legacy: bool,
}

impl MediaWatch {
    fn start(media: MediaQueryList) -> Option<Self> {
        let callback = Closure::wrap(Box::new(move |e: JsValue| {
            // MediaQueryListEvent and the legacy MediaQueryList argument both carry `matches`
            let matches = js_sys::Reflect::get(&e, &JsValue::from_str("matches"))
                .ok()
                .and_then(|v| v.as_bool())
                .unwrap_or(false);
            on_system_change(matches);
        }) as Box<dyn FnMut(_)>);

        let has_add_event_listener =
            js_sys::Reflect::get(&media, &JsValue::from_str("addEventListener"))
                .map(|f| f.is_function())
                .unwrap_or(false);
        let registered = if has_add_event_listener {
            media
                .add_event_listener_with_callback("change", callback.as_ref().unchecked_ref())
                .is_ok()
        } else {
            media
                .add_listener_with_opt_callback(Some(callback.as_ref().unchecked_ref()))
                .is_ok()
        };
        if !registered {
            cwarn("[theme] Failed to watch system color scheme");
            return None;
        }
        Some(Self {
            media,
            callback,
            legacy: !has_add_event_listener,
        })
    }
}

impl Drop for MediaWatch {
    fn drop(&mut self) {
        let cb = self.callback.as_ref().unchecked_ref();
        if self.legacy {
            let _ = self.media.remove_listener_with_opt_callback(Some(cb));
        } else {
            let _ = self.media.remove_event_listener_with_callback("change", cb);
        }
    }
}

struct ActiveTheme {
    config: ThemeConfig,
    _media: Option<MediaWatch>,
    sync_document: bool,
    on_change: Option<Callback<ResolvedScheme>>,
}

thread_local! {
    static ACTIVE: RefCell<Option<ActiveTheme>> = const { RefCell::new(None) };
}

/// Installs the page-wide theme once; later calls are no-ops until [`reset`].
pub fn init() {
    if is_initialized() {
        return;
    }
    let Some(win) = web_sys::window() else {
        init_with(ThemeConfig::load(None, false));
        return;
    };
    let store: Option<Box<dyn PreferenceStore>> = match win.local_storage() {
        Ok(Some(storage)) => Some(Box::new(storage)),
        _ => None,
    };
    let media = win.match_media(DARK_QUERY).ok().flatten();
    let system_dark = media.as_ref().map(|m| m.matches()).unwrap_or(false);
    let config = ThemeConfig::load(store, system_dark);
    clog(&format!("[theme] preference {}", config.preference().as_str()));
    let watch = media.and_then(MediaWatch::start);
    ACTIVE.with(|cell| {
        *cell.borrow_mut() = Some(ActiveTheme {
            config,
            _media: watch,
            sync_document: true,
            on_change: None,
        });
    });
    sync_document_class();
}

/// Installs an already-built config without touching the document.
pub fn init_with(config: ThemeConfig) {
    ACTIVE.with(|cell| {
        let mut active = cell.borrow_mut();
        if active.is_none() {
            *active = Some(ActiveTheme {
                config,
                _media: None,
                sync_document: false,
                on_change: None,
            });
        }
    });
}

/// Drops the media listener and forgets the installed config.
pub fn reset() {
    let previous = ACTIVE.with(|cell| cell.borrow_mut().take());
    drop(previous);
}

pub fn is_initialized() -> bool {
    ACTIVE.with(|cell| cell.borrow().is_some())
}

pub fn resolved() -> ResolvedScheme {
    init();
    ACTIVE.with(|cell| {
        cell.borrow()
            .as_ref()
            .map(|a| a.config.resolved())
            .unwrap_or(ResolvedScheme::Light)
    })
}

pub fn preference() -> ColorSchemePreference {
    init();
    ACTIVE.with(|cell| {
        cell.borrow()
            .as_ref()
            .map(|a| a.config.preference())
            .unwrap_or_default()
    })
}

pub fn set_scheme(preference: ColorSchemePreference) {
    init();
    ACTIVE.with(|cell| {
        if let Some(a) = cell.borrow_mut().as_mut() {
            a.config.set_preference(preference);
        }
    });
    sync_document_class();
}

pub fn toggle_scheme() -> ResolvedScheme {
    init();
    let next = ACTIVE.with(|cell| {
        cell.borrow_mut()
            .as_mut()
            .map(|a| a.config.toggle())
            .unwrap_or(ResolvedScheme::Light)
    });
    sync_document_class();
    next
}

/// Called with the resolved scheme whenever the system preference changes.
/// Replaces any earlier subscriber.
pub fn subscribe(on_change: Callback<ResolvedScheme>) {
    init();
    ACTIVE.with(|cell| {
        if let Some(a) = cell.borrow_mut().as_mut() {
            a.on_change = Some(on_change);
        }
    });
}

fn on_system_change(dark: bool) {
    let notify = ACTIVE.with(|cell| {
        let mut active = cell.borrow_mut();
        let a = active.as_mut()?;
        a.config.set_system_prefers_dark(dark);
        Some((a.on_change.clone()?, a.config.resolved()))
    });
    sync_document_class();
    // emitted outside the borrow: subscribers may read the theme again
    if let Some((cb, scheme)) = notify {
        cb.emit(scheme);
    }
}

fn sync_document_class() {
    let target = ACTIVE.with(|cell| {
        cell.borrow()
            .as_ref()
            .filter(|a| a.sync_document)
            .map(|a| a.config.is_dark())
    });
    let Some(dark) = target else {
        return;
    };
    if let Some(root) = web_sys::window()
        .and_then(|w| w.document())
        .and_then(|d| d.document_element())
    {
        let _ = root.class_list().toggle_with_force("dark", dark);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::rc::Rc;

    #[derive(Clone, Default)]
    struct MemoryStore {
        items: Rc<RefCell<HashMap<String, String>>>,
    }

    impl MemoryStore {
        fn with(key: &str, value: &str) -> Self {
            let s = Self::default();
            s.items.borrow_mut().insert(key.to_string(), value.to_string());
            s
        }
        fn get(&self, key: &str) -> Option<String> {
            self.items.borrow().get(key).cloned()
        }
    }

    impl PreferenceStore for MemoryStore {
        fn read(&self, key: &str) -> Option<String> {
            self.get(key)
        }
        fn write(&self, key: &str, value: &str) -> bool {
            self.items.borrow_mut().insert(key.to_string(), value.to_string());
            true
        }
        fn remove(&self, key: &str) -> bool {
            self.items.borrow_mut().remove(key);
            true
        }
    }

    #[test]
    fn system_follows_media_preference() {
        assert_eq!(resolve(ColorSchemePreference::System, true), ResolvedScheme::Dark);
        assert_eq!(resolve(ColorSchemePreference::System, false), ResolvedScheme::Light);
        assert_eq!(resolve(ColorSchemePreference::Light, true), ResolvedScheme::Light);
    }

    #[test]
    fn stored_preference_is_loaded() {
        let store = MemoryStore::with(COLOR_SCHEME_KEY, "dark");
        let config = ThemeConfig::load(Some(Box::new(store)), false);
        assert_eq!(config.preference(), ColorSchemePreference::Dark);
        assert!(config.is_dark());
    }

    #[test]
    fn unknown_stored_value_falls_back_to_system() {
        let store = MemoryStore::with(COLOR_SCHEME_KEY, "sepia");
        let config = ThemeConfig::load(Some(Box::new(store)), true);
        assert_eq!(config.preference(), ColorSchemePreference::System);
        assert_eq!(config.resolved(), ResolvedScheme::Dark);
    }

    #[test]
    fn system_preference_clears_storage() {
        let store = MemoryStore::default();
        let mut config = ThemeConfig::load(Some(Box::new(store.clone())), false);
        config.set_preference(ColorSchemePreference::Light);
        assert_eq!(store.get(COLOR_SCHEME_KEY).as_deref(), Some("light"));
        config.set_preference(ColorSchemePreference::System);
        assert_eq!(store.get(COLOR_SCHEME_KEY), None);
    }

    #[test]
    fn toggle_pins_opposite_of_resolved() {
        let store = MemoryStore::default();
        let mut config = ThemeConfig::load(Some(Box::new(store.clone())), true);
        assert_eq!(config.toggle(), ResolvedScheme::Light);
        assert_eq!(config.preference(), ColorSchemePreference::Light);
        assert_eq!(store.get(COLOR_SCHEME_KEY).as_deref(), Some("light"));
        assert_eq!(config.toggle(), ResolvedScheme::Dark);
    }

    #[test]
    fn system_change_only_matters_for_system_preference() {
        let mut config = ThemeConfig::load(None, false);
        config.set_system_prefers_dark(true);
        assert!(config.is_dark());
        config.set_preference(ColorSchemePreference::Light);
        config.set_system_prefers_dark(false);
        config.set_system_prefers_dark(true);
        assert!(!config.is_dark());
    }

    #[test]
    fn init_and_reset_are_explicit() {
        reset();
        assert!(!is_initialized());
        init_with(ThemeConfig::load(Some(Box::new(MemoryStore::with(COLOR_SCHEME_KEY, "dark"))), false));
        assert!(is_initialized());
        // a second install does not replace the first
        init_with(ThemeConfig::load(None, false));
        assert_eq!(resolved(), ResolvedScheme::Dark);
        assert_eq!(toggle_scheme(), ResolvedScheme::Light);
        assert_eq!(preference(), ColorSchemePreference::Light);
        reset();
        assert!(!is_initialized());
    }

    #[test]
    fn system_change_notifies_subscriber() {
        reset();
        init_with(ThemeConfig::load(None, false));
        let seen = Rc::new(RefCell::new(Vec::new()));
        {
            let seen = seen.clone();
            subscribe(Callback::from(move |s: ResolvedScheme| seen.borrow_mut().push(s)));
        }
        on_system_change(true);
        on_system_change(false);
        assert_eq!(*seen.borrow(), vec![ResolvedScheme::Dark, ResolvedScheme::Light]);

        // a pinned preference still reports, but the scheme does not follow the system
        set_scheme(ColorSchemePreference::Dark);
        on_system_change(false);
        assert_eq!(seen.borrow().last(), Some(&ResolvedScheme::Dark));
        reset();
    }
}
