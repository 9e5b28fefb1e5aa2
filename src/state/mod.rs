pub mod gesture;
pub mod locale;
pub mod suppression;
pub mod theme;

pub use gesture::DEFAULT_LOCK_THRESHOLD;
