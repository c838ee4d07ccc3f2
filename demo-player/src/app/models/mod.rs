//! Data models for the application

mod app;
mod view;

pub use app::*;
pub use view::*;
