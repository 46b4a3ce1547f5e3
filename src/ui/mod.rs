//! UI components module.
//!
//! Contains ratatui widgets for displaying the application interface.

pub mod counters;
pub mod list;
pub mod search;
pub mod sections;
pub mod tabs;

pub use counters::render_counters;
pub use list::{render_list, render_message};
pub use search::render_search;
pub use sections::render_sections;
pub use tabs::render_tabs;
