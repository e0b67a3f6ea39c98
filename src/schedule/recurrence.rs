//! Projection of a group's gathering pattern onto the calendar.

use chrono::{Datelike, Days, Months, NaiveDate};
use uuid::Uuid;

use crate::error::PatternError;
use crate::types::{EventOccurrence, FrequencyType, GatheringPattern, OccurrenceStatus};

/// Check the pattern invariants before any looping happens. An interval of
/// zero would never advance the cursor; a weekday outside 0-6 would never
/// match a real date.
pub fn validate_pattern(pattern: &GatheringPattern) -> Result<(), PatternError> {
    if pattern.interval < 1 {
        return Err(PatternError::IntervalTooSmall(pattern.interval));
    }
    if pattern.day_of_week > 6 {
        return Err(PatternError::DayOfWeekOutOfRange(pattern.day_of_week));
    }
    Ok(())
}

/// Project `count` upcoming occurrences from a gathering pattern.
///
/// The cursor starts at `start_date` and walks forward day by day until it
/// lands on the pattern's weekday (0 = Sunday), staying put if it already
/// does. Each step emits a draft occurrence titled `title` unless one with
/// the same (date, title_override) pair already exists — duplicates are
/// skipped silently, not reported as conflicts. Steps advance by whole weeks
/// or by calendar months; month addition clamps at month end (Jan 31 + 1
/// month = Feb 28/29), so day-of-month drift follows chrono's semantics.
///
/// Returns only the occurrences actually added.
pub fn project_occurrences(
    pattern: &GatheringPattern,
    count: usize,
    existing: &[EventOccurrence],
    title: Option<&str>,
) -> Result<Vec<EventOccurrence>, PatternError> {
    validate_pattern(pattern)?;

    let mut cursor = pattern.start_date;
    while cursor.weekday().num_days_from_sunday() != pattern.day_of_week as u32 {
        cursor = cursor
            .checked_add_days(Days::new(1))
            .ok_or(PatternError::DateOverflow)?;
    }

    let mut added = Vec::new();
    for _ in 0..count {
        let exists = existing
            .iter()
            .any(|o| o.date == cursor && o.title_override.as_deref() == title);
        if !exists {
            added.push(EventOccurrence {
                id: Uuid::new_v4(),
                template_id: None,
                date: cursor,
                title_override: title.map(|t| t.to_string()),
                status: OccurrenceStatus::Draft,
            });
        }

        cursor = match pattern.frequency_type {
            FrequencyType::Weeks => cursor
                .checked_add_days(Days::new(7 * pattern.interval as u64))
                .ok_or(PatternError::DateOverflow)?,
            FrequencyType::Months => cursor
                .checked_add_months(Months::new(pattern.interval))
                .ok_or(PatternError::DateOverflow)?,
        };
    }

    Ok(added)
}
