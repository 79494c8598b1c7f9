//! scrollnav: a single scrolling page presenter for markdown documents.
//!
//! Each top-level heading becomes a section of one long page. A rail of dots tracks which section
//! is centred in the viewport, and jumping to a section smooth-scrolls to it. Images, cards and
//! decoration get small visibility-driven effects along the way.

pub mod config;
pub mod ease;
pub mod effects;
pub mod error;
pub mod formats;
pub mod input;
pub mod layout;
pub mod navigator;
pub mod page_state;
pub mod section;
pub mod ui;
pub mod viewport;
