pub mod adapter;
pub mod binder;
pub mod web;

pub use binder::ScrollLockBinder;
pub use web::ElementHost;
