//! Core algorithms – catalog model, anchors, selection, and scroll sync.
//!
//! Nothing in this module depends on any TUI or rendering crate.  Positions
//! are plain integers (rows for content, columns for nav bars) and time is
//! always passed in, so every piece can be driven from tests.

pub mod anchors;
pub mod animation;
pub mod catalog;
pub mod nav_bar;
pub mod observer;
pub mod pane;
pub mod provider;
pub mod sections;
pub mod selection;
pub mod sync;
pub mod throttle;
