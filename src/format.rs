// src/format.rs
//! Locale-aware formatting utilities shared by all section renderers.
//!
//! Malformed input never errors here: unparseable date strings pass through
//! unchanged and unrecognized proficiency labels map to a documented
//! mid-range default, so bad user data degrades instead of crashing a
//! render.

use chrono::{Datelike, NaiveDate};

use crate::direction::Direction;

const MONTHS_SHORT_EN: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

const MONTHS_LONG_EN: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

const MONTHS_AR: [&str; 12] = [
    "يناير",
    "فبراير",
    "مارس",
    "أبريل",
    "مايو",
    "يونيو",
    "يوليو",
    "أغسطس",
    "سبتمبر",
    "أكتوبر",
    "نوفمبر",
    "ديسمبر",
];

/// Default for unrecognized skill labels; an unset skill should never render
/// as "no skill".
pub const DEFAULT_SKILL_PERCENT: u8 = 72;

/// Default for unrecognized language proficiency text.
pub const DEFAULT_LANGUAGE_PERCENT: u8 = 50;

/// Localized token replacing the end bound of an ongoing date range.
pub fn present_token(direction: Direction) -> &'static str {
    match direction {
        Direction::Ltr => "Present",
        Direction::Rtl => "الحاضر",
    }
}

/// Best-effort date parsing; accepts full dates, year-month and bare years.
fn parse_flexible(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    for fmt in ["%Y-%m-%d", "%Y/%m/%d", "%d/%m/%Y", "%d-%m-%Y"] {
        if let Ok(date) = NaiveDate::parse_from_str(raw, fmt) {
            return Some(date);
        }
    }
    // "2021-03" style year-month inputs
    if let Ok(date) = NaiveDate::parse_from_str(&format!("{}-01", raw), "%Y-%m-%d") {
        return Some(date);
    }
    // Bare year
    if let Ok(year) = raw.parse::<i32>() {
        if (1900..=2100).contains(&year) {
            return NaiveDate::from_ymd_opt(year, 1, 1);
        }
    }
    None
}

/// "Mon YYYY" in the locale implied by the direction.
fn format_month_year(date: NaiveDate, direction: Direction) -> String {
    let month = date.month0() as usize;
    match direction {
        Direction::Ltr => format!("{} {}", MONTHS_SHORT_EN[month], date.year()),
        Direction::Rtl => format!("{} {}", MONTHS_AR[month], date.year()),
    }
}

fn format_bound(raw: &str, direction: Direction) -> String {
    match parse_flexible(raw) {
        Some(date) => format_month_year(date, direction),
        // Pass-through fallback: malformed user data must not break a render.
        None => raw.trim().to_string(),
    }
}

/// Formats a date range like "Jan 2020 – Mar 2022".
///
/// With `current` the end bound becomes the localized Present token. RTL
/// reverses the visual token order so the end bound reads first.
pub fn format_date_range(
    start: &str,
    end: Option<&str>,
    current: bool,
    direction: Direction,
) -> String {
    let start_token = format_bound(start, direction);

    let end_token = if current {
        Some(present_token(direction).to_string())
    } else {
        end.map(|raw| format_bound(raw, direction))
            .filter(|token| !token.is_empty())
    };

    match end_token {
        Some(end_token) if !start_token.is_empty() => match direction {
            Direction::Ltr => format!("{} – {}", start_token, end_token),
            Direction::Rtl => format!("{} – {}", end_token, start_token),
        },
        Some(end_token) => end_token,
        None => start_token,
    }
}

/// Long-form single date, e.g. "March 5, 2021" / "5 مارس 2021".
pub fn format_full_date(raw: &str, direction: Direction) -> String {
    match parse_flexible(raw) {
        Some(date) => {
            let month = date.month0() as usize;
            match direction {
                Direction::Ltr => {
                    format!("{} {}, {}", MONTHS_LONG_EN[month], date.day(), date.year())
                }
                Direction::Rtl => format!("{} {} {}", date.day(), MONTHS_AR[month], date.year()),
            }
        }
        None => raw.trim().to_string(),
    }
}

fn numeric_percent(text: &str) -> Option<u8> {
    text.trim_end_matches('%')
        .trim()
        .parse::<i64>()
        .ok()
        .map(|n| n.clamp(0, 100) as u8)
}

/// Maps a free-text skill proficiency label to a 0–100 intensity used to
/// size progress indicators.
pub fn skill_level_to_percent(level: &str) -> u8 {
    if let Some(n) = numeric_percent(level) {
        return n;
    }
    match level.trim().to_lowercase().as_str() {
        "beginner" | "novice" => 25,
        "basic" | "elementary" => 35,
        "intermediate" => 50,
        "competent" => 60,
        "proficient" => 80,
        "advanced" => 85,
        "expert" => 90,
        "master" => 95,
        "fluent" => 90,
        "native" => 100,
        _ => DEFAULT_SKILL_PERCENT,
    }
}

/// Maps CEFR-like tokens (A1–C2) and free text to a 0–100 intensity.
pub fn language_proficiency_to_percent(text: &str) -> u8 {
    if let Some(n) = numeric_percent(text) {
        return n;
    }
    match text.trim().to_uppercase().as_str() {
        "A1" => 20,
        "A2" => 35,
        "B1" => 50,
        "B2" => 65,
        "C1" => 80,
        "C2" => 95,
        _ => match text.trim().to_lowercase().as_str() {
            "native" | "mother tongue" => 100,
            "fluent" => 90,
            "advanced" => 80,
            "intermediate" | "conversational" => 55,
            "basic" | "beginner" | "elementary" => 30,
            _ => DEFAULT_LANGUAGE_PERCENT,
        },
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DemographicField {
    DateOfBirth,
    Nationality,
    MaritalStatus,
    Gender,
    MilitaryStatus,
}

/// Localized label for a demographic field.
pub fn demographic_label(field: DemographicField, direction: Direction) -> &'static str {
    match direction {
        Direction::Ltr => match field {
            DemographicField::DateOfBirth => "Date of Birth",
            DemographicField::Nationality => "Nationality",
            DemographicField::MaritalStatus => "Marital Status",
            DemographicField::Gender => "Gender",
            DemographicField::MilitaryStatus => "Military Status",
        },
        Direction::Rtl => match field {
            DemographicField::DateOfBirth => "تاريخ الميلاد",
            DemographicField::Nationality => "الجنسية",
            DemographicField::MaritalStatus => "الحالة الاجتماعية",
            DemographicField::Gender => "الجنس",
            DemographicField::MilitaryStatus => "الخدمة العسكرية",
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_date_range_with_end() {
        let formatted =
            format_date_range("2020-01-01", Some("2022-03-15"), false, Direction::Ltr);
        assert_eq!(formatted, "Jan 2020 – Mar 2022");
    }

    #[test]
    fn test_date_range_current_ends_with_present() {
        let formatted = format_date_range("2020-01-01", None, true, Direction::Ltr);
        assert!(formatted.ends_with("Present"));
        assert!(formatted.starts_with("Jan 2020"));
    }

    #[test]
    fn test_date_range_rtl_reverses_token_order() {
        let formatted = format_date_range("2020-01-01", None, true, Direction::Rtl);
        assert!(formatted.starts_with(present_token(Direction::Rtl)));
        assert!(formatted.ends_with("2020"));
    }

    #[test]
    fn test_malformed_date_passes_through() {
        let formatted = format_date_range("sometime", Some("later"), false, Direction::Ltr);
        assert_eq!(formatted, "sometime – later");
        assert_eq!(format_full_date("not a date", Direction::Ltr), "not a date");
    }

    #[test]
    fn test_year_month_and_bare_year_inputs() {
        assert_eq!(
            format_date_range("2019-06", Some("2021"), false, Direction::Ltr),
            "Jun 2019 – Jan 2021"
        );
    }

    #[test]
    fn test_full_date_long_form() {
        assert_eq!(
            format_full_date("2021-03-05", Direction::Ltr),
            "March 5, 2021"
        );
    }

    #[test]
    fn test_skill_levels_in_range() {
        for label in [
            "beginner",
            "intermediate",
            "advanced",
            "expert",
            "native",
            "fluent",
            "proficient",
            "85",
            "120",
            "-3",
            "garbage",
            "",
        ] {
            let percent = skill_level_to_percent(label);
            assert!(percent <= 100, "{} -> {}", label, percent);
        }
        assert_eq!(skill_level_to_percent("expert"), 90);
        assert_eq!(skill_level_to_percent("85"), 85);
        assert_eq!(skill_level_to_percent("120"), 100);
        assert_eq!(skill_level_to_percent("unheard-of"), DEFAULT_SKILL_PERCENT);
    }

    #[test]
    fn test_language_proficiency_mapping() {
        assert_eq!(language_proficiency_to_percent("C2"), 95);
        assert_eq!(language_proficiency_to_percent("b1"), 50);
        assert_eq!(language_proficiency_to_percent("native"), 100);
        assert_eq!(
            language_proficiency_to_percent("???"),
            DEFAULT_LANGUAGE_PERCENT
        );
    }

    #[test]
    fn test_demographic_labels_localized() {
        assert_eq!(
            demographic_label(DemographicField::Nationality, Direction::Ltr),
            "Nationality"
        );
        assert_eq!(
            demographic_label(DemographicField::Nationality, Direction::Rtl),
            "الجنسية"
        );
    }
}
