//! Display language preference.
//!
//! Resolution order: stored choice, then the browser language, then English.
//! One page-wide [`LocaleConfig`] is installed with [`init`] and dropped with [`reset`].

use std::cell::RefCell;

use super::theme::PreferenceStore;
use crate::util::clog;

pub const LOCALE_KEY: &str = "preferred-locale";

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Locale {
    #[default]
    En,
    Ru,
}

impl Locale {
    pub const SUPPORTED: [Locale; 2] = [Locale::En, Locale::Ru];

    pub fn parse(raw: &str) -> Option<Self> {
        Self::SUPPORTED.into_iter().find(|l| l.as_str() == raw)
    }

    /// `ru-RU` and `ru` both map to Russian; only the primary subtag counts.
    pub fn from_language_tag(tag: &str) -> Option<Self> {
        tag.split('-').next().and_then(Self::parse)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Locale::En => "en",
            Locale::Ru => "ru",
        }
    }

    pub fn next(self) -> Self {
        match self {
            Locale::En => Locale::Ru,
            Locale::Ru => Locale::En,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Message {
    Popular,
    Categories,
    Search,
    ClearFilters,
    NoResults,
    Dishes,
}

pub fn text(locale: Locale, msg: Message) -> &'static str {
    match (locale, msg) {
        (Locale::En, Message::Popular) => "Popular",
        (Locale::En, Message::Categories) => "Categories",
        (Locale::En, Message::Search) => "Search dishes",
        (Locale::En, Message::ClearFilters) => "Clear",
        (Locale::En, Message::NoResults) => "Nothing matches your filters.",
        (Locale::En, Message::Dishes) => "dishes",
        (Locale::Ru, Message::Popular) => "Популярное",
        (Locale::Ru, Message::Categories) => "Категории",
        (Locale::Ru, Message::Search) => "Поиск блюд",
        (Locale::Ru, Message::ClearFilters) => "Сбросить",
        (Locale::Ru, Message::NoResults) => "Ничего не найдено.",
        (Locale::Ru, Message::Dishes) => "блюд",
    }
}

pub struct LocaleConfig {
    locale: Locale,
    store: Option<Box<dyn PreferenceStore>>,
}

impl LocaleConfig {
    pub fn load(store: Option<Box<dyn PreferenceStore>>, browser_language: Option<&str>) -> Self {
        let stored = store
            .as_ref()
            .and_then(|s| s.read(LOCALE_KEY))
            .and_then(|raw| Locale::parse(&raw));
        let locale = stored
            .or_else(|| browser_language.and_then(Locale::from_language_tag))
            .unwrap_or_default();
        Self { locale, store }
    }

    pub fn locale(&self) -> Locale {
        self.locale
    }

    /// Persists only actual changes.
    pub fn set_locale(&mut self, locale: Locale) {
        if locale == self.locale {
            return;
        }
        self.locale = locale;
        if let Some(store) = &self.store {
            store.write(LOCALE_KEY, locale.as_str());
        }
    }
}

thread_local! {
    static ACTIVE: RefCell<Option<LocaleConfig>> = const { RefCell::new(None) };
}

pub fn init() {
    if is_initialized() {
        return;
    }
    let Some(win) = web_sys::window() else {
        init_with(LocaleConfig::load(None, None));
        return;
    };
    let store: Option<Box<dyn PreferenceStore>> = match win.local_storage() {
        Ok(Some(storage)) => Some(Box::new(storage)),
        _ => None,
    };
    let language = win.navigator().language();
    let config = LocaleConfig::load(store, language.as_deref());
    clog(&format!("[i18n] locale {}", config.locale().as_str()));
    init_with(config);
}

pub fn init_with(config: LocaleConfig) {
    ACTIVE.with(|cell| {
        let mut active = cell.borrow_mut();
        if active.is_none() {
            *active = Some(config);
        }
    });
}

pub fn reset() {
    let previous = ACTIVE.with(|cell| cell.borrow_mut().take());
    drop(previous);
}

pub fn is_initialized() -> bool {
    ACTIVE.with(|cell| cell.borrow().is_some())
}

pub fn current() -> Locale {
    init();
    ACTIVE.with(|cell| cell.borrow().as_ref().map(|c| c.locale()).unwrap_or_default())
}

pub fn set_locale(locale: Locale) {
    init();
    ACTIVE.with(|cell| {
        if let Some(c) = cell.borrow_mut().as_mut() {
            c.set_locale(locale);
        }
    });
}
