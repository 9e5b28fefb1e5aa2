pub mod app;
pub mod popular_carousel;
pub mod theme_toggle;
pub mod use_scroll_lock;
