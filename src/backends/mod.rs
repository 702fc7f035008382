// src/backends/mod.rs
//! Output backends.
//!
//! Both consume the same composed `Document`, but they do not share a
//! layout engine: the HTML backend delegates pagination to CSS while the
//! PDF backend owns its own measurement and page-breaking model.

pub mod html;
pub mod pdf;
pub mod typeface;
