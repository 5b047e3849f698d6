pub mod api;
pub mod content;
pub mod element;
pub mod slide;
