//! Tolerant date normalization for display.
//!
//! Resume dates arrive as free text. The normalizer accepts the formats the
//! editor has historically produced — `MM/YYYY`, `MM/DD/YYYY`,
//! `YYYY-MM[-DD]`, full or abbreviated month name + year, a bare year, and
//! the tokens `present`/`current`/`now` — and renders them as a uniform
//! label ("Jan 2023", "2023", "Present"). Anything unrecognized passes
//! through unchanged; a date is never a render failure.

use chrono::Datelike;

const MIN_YEAR: i32 = 1900;

const MONTH_LABELS: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

const MONTH_NAMES: [&str; 12] = [
    "january",
    "february",
    "march",
    "april",
    "may",
    "june",
    "july",
    "august",
    "september",
    "october",
    "november",
    "december",
];

/// Normalizes a raw date string to its display label. Empty input renders
/// empty; unparsable input passes through as-is.
pub fn format_date(raw: &str) -> String {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return String::new();
    }

    let lower = trimmed.to_lowercase();
    if matches!(lower.as_str(), "present" | "current" | "now") {
        return "Present".to_string();
    }

    parse(&lower)
        .map(|parsed| parsed.label())
        .unwrap_or_else(|| raw.to_string())
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum Parsed {
    /// Month (1-12) and year. Day-of-month inputs collapse here — the
    /// display label never shows a day.
    MonthYear { month: u32, year: i32 },
    Year(i32),
}

impl Parsed {
    fn label(self) -> String {
        match self {
            Parsed::MonthYear { month, year } => {
                format!("{} {year}", MONTH_LABELS[(month - 1) as usize])
            }
            Parsed::Year(year) => year.to_string(),
        }
    }
}

fn parse(input: &str) -> Option<Parsed> {
    parse_slashed(input)
        .or_else(|| parse_iso(input))
        .or_else(|| parse_month_name(input))
        .or_else(|| parse_bare_year(input))
}

fn year_in_range(year: i32) -> bool {
    // Ten years of headroom for expected end dates, same bound the editor
    // has always applied.
    let max = chrono::Utc::now().year() + 10;
    (MIN_YEAR..=max).contains(&year)
}

/// `MM/YYYY`, `MM-YYYY`, `MM/DD/YYYY`, `MM-DD-YYYY`.
fn parse_slashed(input: &str) -> Option<Parsed> {
    let parts: Vec<&str> = input.split(['/', '-']).collect();
    match parts.as_slice() {
        [month, year] if year.len() == 4 => {
            let month: u32 = month.parse().ok()?;
            let year: i32 = year.parse().ok()?;
            ((1..=12).contains(&month) && year_in_range(year))
                .then_some(Parsed::MonthYear { month, year })
        }
        [month, day, year] if year.len() == 4 => {
            let month: u32 = month.parse().ok()?;
            let day: u32 = day.parse().ok()?;
            let year: i32 = year.parse().ok()?;
            ((1..=12).contains(&month) && (1..=31).contains(&day) && year_in_range(year))
                .then_some(Parsed::MonthYear { month, year })
        }
        _ => None,
    }
}

/// `YYYY-MM` or `YYYY-MM-DD`.
fn parse_iso(input: &str) -> Option<Parsed> {
    let parts: Vec<&str> = input.split('-').collect();
    let (year, month, day) = match parts.as_slice() {
        [year, month] if year.len() == 4 => (year, month, None),
        [year, month, day] if year.len() == 4 => (year, month, Some(day)),
        _ => return None,
    };
    let year: i32 = year.parse().ok()?;
    let month: u32 = month.parse().ok()?;
    if let Some(day) = day {
        let day: u32 = day.parse().ok()?;
        if !(1..=31).contains(&day) {
            return None;
        }
    }
    ((1..=12).contains(&month) && year_in_range(year)).then_some(Parsed::MonthYear { month, year })
}

/// "january 2023", "jan 2023".
fn parse_month_name(input: &str) -> Option<Parsed> {
    let mut words = input.split_whitespace();
    let name = words.next()?;
    let year = words.next()?;
    if words.next().is_some() {
        return None;
    }
    let month = MONTH_NAMES
        .iter()
        .position(|full| *full == name)
        .or_else(|| MONTH_NAMES.iter().position(|full| full[..3] == *name))?;
    let year: i32 = year.parse().ok()?;
    year_in_range(year).then_some(Parsed::MonthYear {
        month: (month + 1) as u32,
        year,
    })
}

fn parse_bare_year(input: &str) -> Option<Parsed> {
    if input.len() != 4 {
        return None;
    }
    let year: i32 = input.parse().ok()?;
    year_in_range(year).then_some(Parsed::Year(year))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_equivalent_forms_share_one_label() {
        let expected = "Jan 2023";
        assert_eq!(format_date("01/2023"), expected);
        assert_eq!(format_date("1/2023"), expected);
        assert_eq!(format_date("01-2023"), expected);
        assert_eq!(format_date("January 2023"), expected);
        assert_eq!(format_date("Jan 2023"), expected);
        assert_eq!(format_date("2023-01"), expected);
        assert_eq!(format_date("2023-01-15"), expected);
        assert_eq!(format_date("01/15/2023"), expected);
    }

    #[test]
    fn test_present_tokens_case_insensitive() {
        assert_eq!(format_date("present"), "Present");
        assert_eq!(format_date("Current"), "Present");
        assert_eq!(format_date("NOW"), "Present");
        assert_eq!(format_date("Present"), "Present");
    }

    #[test]
    fn test_bare_year() {
        assert_eq!(format_date("2023"), "2023");
    }

    #[test]
    fn test_unparsable_passes_through_unchanged() {
        assert_eq!(format_date("not a date"), "not a date");
        assert_eq!(format_date("13/2023"), "13/2023"); // month out of range
        assert_eq!(format_date("02/40/2023"), "02/40/2023"); // day out of range
        assert_eq!(format_date("01/1492"), "01/1492"); // year below floor
        assert_eq!(format_date("Jannuary 2023"), "Jannuary 2023");
    }

    #[test]
    fn test_empty_and_whitespace_render_empty() {
        assert_eq!(format_date(""), "");
        assert_eq!(format_date("   "), "");
    }

    #[test]
    fn test_all_month_abbreviations() {
        for label in MONTH_LABELS {
            let input = format!("{} 2020", label.to_lowercase());
            assert_eq!(format_date(&input), format!("{label} 2020"));
        }
        assert_eq!(format_date("december 2020"), "Dec 2020");
    }

    #[test]
    fn test_future_year_within_headroom_accepted() {
        let next_year = chrono::Utc::now().year() + 1;
        assert_eq!(format_date(&next_year.to_string()), next_year.to_string());
        let too_far = chrono::Utc::now().year() + 50;
        let raw = too_far.to_string();
        assert_eq!(format_date(&raw), raw); // passes through, not rejected
    }
}
