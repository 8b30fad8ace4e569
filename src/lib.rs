//! Terminal catalog browser whose category and subcategory bars follow the
//! content as it scrolls, and scroll the content when an entry is picked.
//!
//! * [`core`] holds the catalog model and the scroll-sync engine.  It has no
//!   rendering dependencies.
//! * [`app`] owns the application state and maps input onto the engine.
//! * [`ui`] draws the state with Ratatui.

pub mod app;
pub mod config;
pub mod core;
pub mod ui;
