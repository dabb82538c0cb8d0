pub mod app;
pub mod dialog;
pub mod palette;
pub mod render;
pub mod terminal;
