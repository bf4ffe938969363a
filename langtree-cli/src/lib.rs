//! CLI library for testing purposes

pub mod config;
pub mod view;

pub use config::load_options;
pub use view::{render_detection, render_tree};
