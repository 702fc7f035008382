// src/sections/header.rs
//! Header/contact assembly.

use crate::direction::Direction;
use crate::layout::{ContactItem, ContactKind, Header, Node};
use crate::style::{PhotoShape, StyleTable};
use crate::types::ResumeData;

fn non_empty(value: &Option<String>) -> Option<String> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

pub fn contact_items(data: &ResumeData, direction: Direction) -> Vec<ContactItem> {
    let personal = &data.personal;
    let mut items = Vec::new();

    let mut push = |kind: ContactKind, value: &Option<String>| {
        if let Some(value) = non_empty(value) {
            items.push(ContactItem { kind, value });
        }
    };
    push(ContactKind::Email, &personal.email);
    push(ContactKind::Phone, &personal.phone);
    push(ContactKind::Address, &personal.address);
    push(ContactKind::Website, &personal.website);
    push(ContactKind::LinkedIn, &personal.linkedin);

    // Token lists follow reading order.
    if direction.is_rtl() {
        items.reverse();
    }
    items
}

pub fn header(data: &ResumeData, direction: Direction, style: &StyleTable) -> Header {
    let photo = if style.photo_shape == PhotoShape::Hidden {
        None
    } else {
        non_empty(&data.personal.photo)
    };

    Header {
        name: data.personal.full_name.trim().to_string(),
        title: non_empty(&data.personal.title),
        contact: contact_items(data, direction),
        photo,
    }
}

/// Contact block for templates that keep contact details in the sidebar
/// instead of under the name.
pub fn contact_section(
    data: &ResumeData,
    direction: Direction,
    style: &StyleTable,
) -> Option<Node> {
    let items = contact_items(data, direction);
    if items.is_empty() {
        return None;
    }
    let title = match direction {
        Direction::Ltr => "Contact",
        Direction::Rtl => "التواصل",
    };
    Node::section(title, style.heading_glyph, vec![Node::ContactList(items)])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::templates;

    fn style() -> StyleTable {
        templates::resolve("classic").style
    }

    #[test]
    fn test_blank_fields_are_dropped() {
        let mut data = ResumeData::default();
        data.personal.full_name = "Jane Doe".to_string();
        data.personal.email = Some("jane@example.com".to_string());
        data.personal.phone = Some("   ".to_string());

        let header = header(&data, Direction::Ltr, &style());
        assert_eq!(header.contact.len(), 1);
        assert_eq!(header.contact[0].kind, ContactKind::Email);
        assert!(header.photo.is_none());
    }

    #[test]
    fn test_rtl_reverses_contact_reading_order() {
        let mut data = ResumeData::default();
        data.personal.email = Some("a@b.c".to_string());
        data.personal.phone = Some("123".to_string());

        let ltr = contact_items(&data, Direction::Ltr);
        let rtl = contact_items(&data, Direction::Rtl);
        assert_eq!(ltr[0].kind, ContactKind::Email);
        assert_eq!(rtl[0].kind, ContactKind::Phone);
    }

    #[test]
    fn test_contact_section_empty_when_no_data() {
        let data = ResumeData::default();
        assert!(contact_section(&data, Direction::Ltr, &style()).is_none());
    }
}
