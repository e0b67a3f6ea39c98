//! Age and gender heuristics behind the dashboard demographics.
//!
//! Gender is not a stored field anywhere in the data model. A person counts
//! as a woman when their first name (case-insensitive) appears in the
//! configured allow-list, or ends in "a" or "e"; everyone else counts as a
//! man. This is a known approximation with false positives and negatives —
//! the allow-list exists precisely because names like "Vigdis" miss the
//! suffix rule. Keep it an approximation: inventing a stored gender field
//! would claim data the source never had.

use chrono::{Datelike, NaiveDate};

use crate::types::Person;
use crate::util::normalize_first_name;

/// Age on `today`, or None when no birth information is known.
///
/// A full birth date gives a calendar-accurate age (one less before the
/// birthday each year). A bare birth year gives `today.year - birth_year`
/// with no month/day correction.
pub fn age_on(person: &Person, today: NaiveDate) -> Option<i32> {
    if let Some(birth) = person.birth_date {
        let mut age = today.year() - birth.year();
        if (today.month(), today.day()) < (birth.month(), birth.day()) {
            age -= 1;
        }
        return Some(age);
    }
    person.birth_year.map(|year| today.year() - year)
}

/// First-name gender heuristic. See the module docs for the caveats.
pub fn is_woman(person: &Person, female_first_names: &[String]) -> bool {
    let first = normalize_first_name(&person.first_name);
    first.ends_with('a')
        || first.ends_with('e')
        || female_first_names.iter().any(|name| name == &first)
}
