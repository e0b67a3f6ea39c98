//! Clock-time layout of an occurrence's run-of-show program.

use chrono::{NaiveTime, Timelike};

use crate::types::ProgramItem;

/// Default program base time: the 11:00 service.
pub fn default_base_time() -> NaiveTime {
    NaiveTime::from_hms_opt(11, 0, 0).expect("11:00 is a valid time")
}

/// A program item with its computed wall-clock start time.
#[derive(Debug, Clone, PartialEq)]
pub struct ScheduledProgramItem {
    pub item: ProgramItem,
    /// Minutes relative to the base time. Negative for a pre-service slot.
    pub offset_minutes: i64,
    /// "HH.MM", the Norwegian clock convention used throughout the app.
    pub formatted_time: String,
}

/// Lay out the items of one occurrence on the clock.
///
/// Items run back to back from `base`: each starts at the running offset and
/// the next begins when it ends. One quirk carried from how programs are
/// entered: a first item with `order == 0` is a pre-service slot (soundcheck,
/// prayer) — it starts its own duration *before* base time and does not push
/// the running offset, so the service proper still starts at `base`.
pub fn schedule_program(items: &[ProgramItem], base: NaiveTime) -> Vec<ScheduledProgramItem> {
    let mut sorted: Vec<&ProgramItem> = items.iter().collect();
    sorted.sort_by_key(|item| item.order);

    let mut offset: i64 = 0;
    let mut scheduled = Vec::with_capacity(sorted.len());
    for (idx, item) in sorted.iter().enumerate() {
        let pre_service = idx == 0 && item.order == 0;
        let start = if pre_service {
            -(item.duration_minutes as i64)
        } else {
            offset
        };
        if !pre_service {
            offset += item.duration_minutes as i64;
        }

        scheduled.push(ScheduledProgramItem {
            item: (*item).clone(),
            offset_minutes: start,
            formatted_time: format_offset(base, start),
        });
    }
    scheduled
}

/// Format base + offset as "HH.MM", wrapping on the 24-hour clock.
fn format_offset(base: NaiveTime, offset_minutes: i64) -> String {
    let total = base.hour() as i64 * 60 + base.minute() as i64 + offset_minutes;
    let hours = total.div_euclid(60).rem_euclid(24);
    let minutes = total.rem_euclid(60);
    format!("{:02}.{:02}", hours, minutes)
}
