// src/layout.rs
//! Intermediate layout tree.
//!
//! Composers arrange section-renderer output into this tree; the HTML and
//! PDF backends serialize it independently. The tree is deliberately
//! backend-neutral: it carries structure and content, never pixel
//! positions, because the two backends own separate measurement models.

use crate::direction::Direction;
use crate::richtext::Block;
use crate::style::StyleTable;

/// A fully composed document, ready for either backend.
#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    pub direction: Direction,
    pub geometry: Geometry,
    /// Style table of the template that composed this document.
    pub style: StyleTable,
    pub header: Header,
    /// Nodes assigned to the sidebar region; empty for single-column
    /// geometries.
    pub sidebar: Vec<Node>,
    pub main: Vec<Node>,
    pub watermark: bool,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Geometry {
    SingleColumn,
    /// Sidebar on the start side of the resolved direction, with its width
    /// as a fraction of the page width.
    Sidebar { width_frac: f32 },
}

impl Geometry {
    pub fn sidebar_frac(self) -> Option<f32> {
        match self {
            Geometry::SingleColumn => None,
            Geometry::Sidebar { width_frac } => Some(width_frac),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Header {
    pub name: String,
    pub title: Option<String>,
    pub contact: Vec<ContactItem>,
    pub photo: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContactKind {
    Email,
    Phone,
    Address,
    Website,
    LinkedIn,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ContactItem {
    pub kind: ContactKind,
    pub value: String,
}

/// One node of the composed tree.
#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    Section {
        title: String,
        /// Decorative glyph some templates prefix section titles with.
        glyph: Option<char>,
        children: Vec<Node>,
    },
    Entry {
        title: String,
        subtitle: Option<String>,
        /// Pre-formatted date/location line.
        meta: Option<String>,
        body: Vec<Block>,
        tags: Vec<String>,
        /// First entry under its section title; the PDF backend lets this
        /// one break across pages so a section title is never orphaned.
        first_in_section: bool,
    },
    RichText(Vec<Block>),
    Meters(Vec<Meter>),
    Tags(Vec<String>),
    Facts(Vec<Fact>),
    ContactList(Vec<ContactItem>),
}

/// Labelled progress indicator (skills, languages).
#[derive(Debug, Clone, PartialEq)]
pub struct Meter {
    pub label: String,
    pub percent: u8,
}

/// Label/value pair (demographics).
#[derive(Debug, Clone, PartialEq)]
pub struct Fact {
    pub label: String,
    pub value: String,
}

impl Node {
    /// Wraps children in a section, or nothing when there are none; a
    /// section never renders an empty container.
    pub fn section(title: impl Into<String>, glyph: Option<char>, children: Vec<Node>) -> Option<Node> {
        if children.is_empty() {
            None
        } else {
            Some(Node::Section {
                title: title.into(),
                glyph,
                children,
            })
        }
    }
}
