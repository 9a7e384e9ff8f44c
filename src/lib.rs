//! texttree: build nested trees of titled nodes and render them as
//! Unix `tree`-style text.
//!
//! Layers, innermost first:
//! - [`domain`]: arena-backed tree, builder cursor, values and styles
//! - [`render`]: line-oriented renderer
//! - [`application`]: document loading and the tree service
//! - [`infrastructure`]: filesystem and service wiring
//! - [`cli`]: argument parsing and command dispatch

pub mod application;
pub mod cli;
pub mod config;
pub mod domain;
pub mod exitcode;
pub mod infrastructure;
pub mod render;
pub mod util;
