// src/sections/mod.rs
//! Section renderers.
//!
//! One pure function per resume section, shared by every template:
//! `(data, direction, style) -> Option<Node>`. Renderers return `None` for
//! empty sections so no template ever emits an empty container, and they
//! never know which composer invoked them.

pub mod certifications;
pub mod demographics;
pub mod education;
pub mod experience;
pub mod header;
pub mod languages;
pub mod projects;
pub mod skills;
pub mod summary;

pub use certifications::certifications;
pub use demographics::demographics;
pub use education::education;
pub use experience::experience;
pub use header::{contact_section, header};
pub use languages::languages;
pub use projects::projects;
pub use skills::skills;
pub use summary::summary;
