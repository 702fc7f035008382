// src/templates/mod.rs
//! Template composers and the template registry.
//!
//! Each template is a static definition: an id, a style table and a
//! composer function that arranges the shared section renderers into the
//! template's page geometry. The registry is total: unknown ids resolve to
//! the default definition instead of erroring, so a stale or renamed
//! template id can never produce a blank export.

use tracing::debug;

use crate::direction::{detect_direction, Direction};
use crate::layout::{Document, Node};
use crate::style::StyleTable;
use crate::types::ResumeData;
use crate::RenderOptions;

pub mod aurora;
pub mod classic;
pub mod horizon;
pub mod meridian;
pub mod onyx;
pub mod slate;

pub type ComposeFn = fn(&ResumeData, Direction, &StyleTable) -> Document;

#[derive(Clone, Copy)]
pub struct TemplateDefinition {
    pub id: &'static str,
    pub display_name: &'static str,
    pub style: StyleTable,
    pub compose: ComposeFn,
}

/// All registered templates; the first entry is the designated default.
pub static TEMPLATES: &[TemplateDefinition] = &[
    TemplateDefinition {
        id: "classic",
        display_name: "Classic",
        style: classic::STYLE,
        compose: classic::compose,
    },
    TemplateDefinition {
        id: "onyx",
        display_name: "Onyx",
        style: onyx::STYLE,
        compose: onyx::compose,
    },
    TemplateDefinition {
        id: "horizon",
        display_name: "Horizon",
        style: horizon::STYLE,
        compose: horizon::compose,
    },
    TemplateDefinition {
        id: "meridian",
        display_name: "Meridian",
        style: meridian::STYLE,
        compose: meridian::compose,
    },
    TemplateDefinition {
        id: "slate",
        display_name: "Slate",
        style: slate::STYLE,
        compose: slate::compose,
    },
    TemplateDefinition {
        id: "aurora",
        display_name: "Aurora",
        style: aurora::STYLE,
        compose: aurora::compose,
    },
];

/// Resolves a template id, falling back to the default for unknown ids.
/// Lookup never fails: render availability wins over strict validation.
pub fn resolve(template_id: &str) -> &'static TemplateDefinition {
    let requested = template_id.trim().to_lowercase();
    if let Some(definition) = TEMPLATES.iter().find(|t| t.id == requested) {
        return definition;
    }
    debug!(
        "Unknown template '{}', falling back to '{}'",
        template_id, TEMPLATES[0].id
    );
    &TEMPLATES[0]
}

pub fn template_ids() -> Vec<&'static str> {
    TEMPLATES.iter().map(|t| t.id).collect()
}

/// Composes a document for the given template, detecting direction once
/// and applying the watermark decision from the render options.
pub fn compose_document(
    template_id: &str,
    data: &ResumeData,
    options: &RenderOptions,
) -> Document {
    let definition = resolve(template_id);
    let direction = detect_direction(data);
    let mut document = (definition.compose)(data, direction, &definition.style);
    document.watermark = options.watermark;
    document
}

pub(crate) fn push_some(nodes: &mut Vec<Node>, node: Option<Node>) {
    if let Some(node) = node {
        nodes.push(node);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_known_ids() {
        for id in template_ids() {
            assert_eq!(resolve(id).id, id);
        }
    }

    #[test]
    fn test_resolve_is_case_insensitive() {
        assert_eq!(resolve("Onyx").id, "onyx");
        assert_eq!(resolve("  SLATE ").id, "slate");
    }

    #[test]
    fn test_unknown_id_falls_back_to_default() {
        assert_eq!(resolve("nonexistent-template").id, "classic");
        assert_eq!(resolve("").id, "classic");
    }

    #[test]
    fn test_ids_are_unique() {
        let mut ids = template_ids();
        ids.sort();
        ids.dedup();
        assert_eq!(ids.len(), TEMPLATES.len());
    }

    #[test]
    fn test_watermark_flag_comes_from_options() {
        let data = ResumeData::default();
        let on = compose_document("classic", &data, &RenderOptions { watermark: true });
        let off = compose_document("classic", &data, &RenderOptions { watermark: false });
        assert!(on.watermark);
        assert!(!off.watermark);
    }
}
