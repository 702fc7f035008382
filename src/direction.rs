// src/direction.rs
//! Document-level reading-direction detection.
//!
//! The decision is made once per render from a heuristic scan of the resume
//! text and threaded through every renderer; no per-run bidi is attempted.
//! Mixing detection strategies between preview and export would produce
//! partially mirrored documents, so this module is the only place that
//! decides direction.

use crate::types::ResumeData;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Ltr,
    Rtl,
}

/// Unicode blocks covering Arabic and Kurdish scripts.
const RTL_BLOCKS: [(u32, u32); 4] = [
    (0x0600, 0x06FF), // Arabic
    (0x0750, 0x077F), // Arabic Supplement
    (0xFB50, 0xFDFF), // Arabic Presentation Forms-A
    (0xFE70, 0xFEFF), // Arabic Presentation Forms-B
];

/// True if any code point falls inside an RTL script block.
pub fn contains_rtl(text: &str) -> bool {
    text.chars().any(|c| {
        let cp = c as u32;
        RTL_BLOCKS.iter().any(|(lo, hi)| cp >= *lo && cp <= *hi)
    })
}

/// Single-field first-match heuristic: the first non-empty field among
/// name, title, summary and the first job title decides the direction for
/// the whole document.
pub fn detect_direction(data: &ResumeData) -> Direction {
    let candidates = [
        Some(data.personal.full_name.as_str()),
        data.personal.title.as_deref(),
        data.summary.as_deref(),
        data.experience.first().map(|exp| exp.title.as_str()),
    ];

    for field in candidates.into_iter().flatten() {
        if field.trim().is_empty() {
            continue;
        }
        return if contains_rtl(field) {
            Direction::Rtl
        } else {
            Direction::Ltr
        };
    }

    Direction::Ltr
}

impl Direction {
    pub fn is_rtl(self) -> bool {
        matches!(self, Direction::Rtl)
    }

    /// Value for the HTML `dir` attribute.
    pub fn dir_attr(self) -> &'static str {
        match self {
            Direction::Ltr => "ltr",
            Direction::Rtl => "rtl",
        }
    }

    pub fn text_align(self) -> &'static str {
        match self {
            Direction::Ltr => "left",
            Direction::Rtl => "right",
        }
    }

    /// Physical side where reading starts; sidebars and accent borders sit
    /// on this side.
    pub fn start_side(self) -> &'static str {
        match self {
            Direction::Ltr => "left",
            Direction::Rtl => "right",
        }
    }

    pub fn end_side(self) -> &'static str {
        match self {
            Direction::Ltr => "right",
            Direction::Rtl => "left",
        }
    }

    /// Arabic script needs taller lines to stay readable.
    pub fn line_height(self) -> f32 {
        match self {
            Direction::Ltr => 1.5,
            Direction::Rtl => 1.8,
        }
    }

    pub fn locale(self) -> &'static str {
        match self {
            Direction::Ltr => "en",
            Direction::Rtl => "ar",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Experience, ResumeData};

    fn resume_with_name(name: &str) -> ResumeData {
        let mut data = ResumeData::default();
        data.personal.full_name = name.to_string();
        data
    }

    #[test]
    fn test_arabic_name_is_rtl() {
        let data = resume_with_name("أحمد محمد");
        assert_eq!(detect_direction(&data), Direction::Rtl);
    }

    #[test]
    fn test_latin_name_is_ltr() {
        let data = resume_with_name("Jane Doe");
        assert_eq!(detect_direction(&data), Direction::Ltr);
    }

    #[test]
    fn test_empty_resume_defaults_ltr() {
        assert_eq!(detect_direction(&ResumeData::default()), Direction::Ltr);
    }

    #[test]
    fn test_first_non_empty_field_wins() {
        // Latin name decides even though the summary is Arabic.
        let mut data = resume_with_name("Jane Doe");
        data.summary = Some("ملخص مهني".to_string());
        assert_eq!(detect_direction(&data), Direction::Ltr);

        // With no name or title, the summary decides.
        let mut data = ResumeData::default();
        data.summary = Some("ملخص مهني".to_string());
        assert_eq!(detect_direction(&data), Direction::Rtl);
    }

    #[test]
    fn test_falls_back_to_first_job_title() {
        let mut data = ResumeData::default();
        data.experience.push(Experience {
            id: "exp-1".to_string(),
            title: "مهندس برمجيات".to_string(),
            ..Default::default()
        });
        assert_eq!(detect_direction(&data), Direction::Rtl);
    }

    #[test]
    fn test_presentation_forms_count_as_rtl() {
        assert!(contains_rtl("\u{FB50}"));
        assert!(contains_rtl("\u{FE70}"));
        assert!(!contains_rtl("plain ascii"));
    }
}
