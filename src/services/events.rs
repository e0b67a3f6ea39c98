//! Event occurrences, assignments, run-of-show items, and tasks.

use chrono::{NaiveDate, NaiveTime};
use uuid::Uuid;

use crate::error::StoreError;
use crate::schedule::{self, ScheduledProgramItem};
use crate::state::AppState;
use crate::store::Mutation;
use crate::types::{
    Assignment, EventOccurrence, EventTemplate, OccurrenceStatus, ProgramItem, Task,
};

pub fn create_template(
    state: &AppState,
    title: &str,
    description: Option<&str>,
) -> Result<EventTemplate, StoreError> {
    let title = title.trim();
    if title.is_empty() {
        return Err(StoreError::InvalidInput("template title is required".to_string()));
    }
    let template = EventTemplate {
        id: Uuid::new_v4(),
        title: title.to_string(),
        description: description.map(|d| d.to_string()),
    };
    state
        .store
        .write()
        .apply(Mutation::AddEventTemplate(template.clone()));
    state.save()?;
    Ok(template)
}

/// Put one occurrence on the calendar. Insertion dedupes on the
/// (date, title_override) pair — an identical entry already present means
/// nothing is added and `None` comes back, the same silent-skip the
/// recurrence projector uses.
pub fn create_occurrence(
    state: &AppState,
    template_id: Option<Uuid>,
    date: NaiveDate,
    title_override: Option<&str>,
) -> Result<Option<EventOccurrence>, StoreError> {
    if let Some(template_id) = template_id {
        let known = state
            .store
            .read()
            .data()
            .event_templates
            .iter()
            .any(|t| t.id == template_id);
        if !known {
            return Err(StoreError::NotFound(format!("Event template {template_id}")));
        }
    }

    let duplicate = state
        .store
        .read()
        .data()
        .event_occurrences
        .iter()
        .any(|o| o.date == date && o.title_override.as_deref() == title_override);
    if duplicate {
        return Ok(None);
    }

    let occurrence = EventOccurrence {
        id: Uuid::new_v4(),
        template_id,
        date,
        title_override: title_override.map(|t| t.to_string()),
        status: OccurrenceStatus::Draft,
    };
    state
        .store
        .write()
        .apply(Mutation::AddOccurrences(vec![occurrence.clone()]));
    state.save()?;
    Ok(Some(occurrence))
}

pub fn set_occurrence_status(
    state: &AppState,
    occurrence_id: Uuid,
    status: OccurrenceStatus,
) -> Result<(), StoreError> {
    let mut occurrence = require_occurrence(state, occurrence_id)?;
    occurrence.status = status;
    state
        .store
        .write()
        .apply(Mutation::UpdateOccurrence(occurrence));
    state.save()
}

pub fn delete_occurrence(state: &AppState, occurrence_id: Uuid) -> Result<(), StoreError> {
    require_occurrence(state, occurrence_id)?;
    state
        .store
        .write()
        .apply(Mutation::RemoveOccurrence(occurrence_id));
    state.save()
}

/// Display title: the override if set, else the template's title.
pub fn occurrence_title(state: &AppState, occurrence: &EventOccurrence) -> String {
    if let Some(ref title) = occurrence.title_override {
        return title.clone();
    }
    occurrence
        .template_id
        .and_then(|tid| {
            state
                .store
                .read()
                .data()
                .event_templates
                .iter()
                .find(|t| t.id == tid)
                .map(|t| t.title.clone())
        })
        .unwrap_or_default()
}

// =============================================================================
// Assignments
// =============================================================================

/// Staff (or pre-create an open) shift on an occurrence.
pub fn add_assignment(
    state: &AppState,
    occurrence_id: Uuid,
    person_id: Option<Uuid>,
    service_role_id: Option<Uuid>,
) -> Result<Assignment, StoreError> {
    require_occurrence(state, occurrence_id)?;
    let assignment = Assignment {
        id: Uuid::new_v4(),
        occurrence_id,
        person_id,
        service_role_id,
    };
    state
        .store
        .write()
        .apply(Mutation::AddAssignment(assignment.clone()));
    state.save()?;
    Ok(assignment)
}

pub fn update_assignment(state: &AppState, assignment: Assignment) -> Result<(), StoreError> {
    state
        .store
        .write()
        .apply(Mutation::UpdateAssignment(assignment));
    state.save()
}

pub fn remove_assignment(state: &AppState, assignment_id: Uuid) -> Result<(), StoreError> {
    state
        .store
        .write()
        .apply(Mutation::RemoveAssignment(assignment_id));
    state.save()
}

// =============================================================================
// Run-of-show program
// =============================================================================

/// Append a program item. `order` defaults to one past the occurrence's
/// current highest; order 0 is the pre-service slot (see schedule::program).
#[allow(clippy::too_many_arguments)]
pub fn add_program_item(
    state: &AppState,
    occurrence_id: Uuid,
    title: &str,
    duration_minutes: u32,
    order: Option<u32>,
    person_id: Option<Uuid>,
    service_role_id: Option<Uuid>,
    group_id: Option<Uuid>,
) -> Result<ProgramItem, StoreError> {
    require_occurrence(state, occurrence_id)?;
    let title = title.trim();
    if title.is_empty() {
        return Err(StoreError::InvalidInput("program item title is required".to_string()));
    }

    let order = order.unwrap_or_else(|| {
        state
            .store
            .read()
            .data()
            .program_items
            .iter()
            .filter(|p| p.occurrence_id == occurrence_id)
            .map(|p| p.order)
            .max()
            .map(|max| max + 1)
            .unwrap_or(1)
    });

    let item = ProgramItem {
        id: Uuid::new_v4(),
        occurrence_id,
        order,
        title: title.to_string(),
        duration_minutes,
        person_id,
        service_role_id,
        group_id,
    };
    state
        .store
        .write()
        .apply(Mutation::AddProgramItem(item.clone()));
    state.save()?;
    Ok(item)
}

pub fn update_program_item(state: &AppState, item: ProgramItem) -> Result<(), StoreError> {
    state.store.write().apply(Mutation::UpdateProgramItem(item));
    state.save()
}

pub fn remove_program_item(state: &AppState, item_id: Uuid) -> Result<(), StoreError> {
    state
        .store
        .write()
        .apply(Mutation::RemoveProgramItem(item_id));
    state.save()
}

/// The occurrence's program laid out on the clock.
pub fn program_for(
    state: &AppState,
    occurrence_id: Uuid,
    base: Option<NaiveTime>,
) -> Vec<ScheduledProgramItem> {
    let items: Vec<ProgramItem> = state
        .store
        .read()
        .data()
        .program_items
        .iter()
        .filter(|p| p.occurrence_id == occurrence_id)
        .cloned()
        .collect();
    schedule::schedule_program(&items, base.unwrap_or_else(schedule::default_base_time))
}

// =============================================================================
// Tasks
// =============================================================================

pub fn add_task(
    state: &AppState,
    title: &str,
    deadline: NaiveDate,
    responsible_id: Option<Uuid>,
    occurrence_id: Option<Uuid>,
) -> Result<Task, StoreError> {
    let title = title.trim();
    if title.is_empty() {
        return Err(StoreError::InvalidInput("task title is required".to_string()));
    }
    let task = Task {
        id: Uuid::new_v4(),
        title: title.to_string(),
        deadline,
        responsible_id,
        occurrence_id,
    };
    state.store.write().apply(Mutation::AddTask(task.clone()));
    state.save()?;
    Ok(task)
}

pub fn remove_task(state: &AppState, task_id: Uuid) -> Result<(), StoreError> {
    state.store.write().apply(Mutation::RemoveTask(task_id));
    state.save()
}

/// Tasks a person is responsible for, soonest deadline first.
pub fn tasks_for(state: &AppState, person_id: Uuid) -> Vec<Task> {
    let mut tasks: Vec<Task> = state
        .store
        .read()
        .data()
        .tasks
        .iter()
        .filter(|t| t.responsible_id == Some(person_id))
        .cloned()
        .collect();
    tasks.sort_by_key(|t| t.deadline);
    tasks
}

// =============================================================================
// Per-person upcoming duties
// =============================================================================

/// What a duty is: a staffed shift or a program post.
#[derive(Debug, Clone, PartialEq)]
pub enum DutyKind {
    Shift { role_name: Option<String> },
    ProgramPost { title: String },
}

/// One upcoming responsibility, joined to its occurrence.
#[derive(Debug, Clone)]
pub struct UpcomingDuty {
    pub occurrence: EventOccurrence,
    pub kind: DutyKind,
}

/// Everything a person is on the hook for from `today` onward, assignments
/// and program posts together, date-ascending.
pub fn upcoming_duties(state: &AppState, person_id: Uuid, today: NaiveDate) -> Vec<UpcomingDuty> {
    let guard = state.store.read();
    let db = guard.data();

    let mut duties: Vec<UpcomingDuty> = Vec::new();

    for assignment in db.assignments.iter().filter(|a| a.person_id == Some(person_id)) {
        let Some(occurrence) = db
            .event_occurrences
            .iter()
            .find(|o| o.id == assignment.occurrence_id)
        else {
            continue;
        };
        if occurrence.date < today {
            continue;
        }
        let role_name = assignment.service_role_id.and_then(|rid| {
            db.service_roles
                .iter()
                .find(|r| r.id == rid)
                .map(|r| r.name.clone())
        });
        duties.push(UpcomingDuty {
            occurrence: occurrence.clone(),
            kind: DutyKind::Shift { role_name },
        });
    }

    for item in db.program_items.iter().filter(|p| p.person_id == Some(person_id)) {
        let Some(occurrence) = db
            .event_occurrences
            .iter()
            .find(|o| o.id == item.occurrence_id)
        else {
            continue;
        };
        if occurrence.date < today {
            continue;
        }
        duties.push(UpcomingDuty {
            occurrence: occurrence.clone(),
            kind: DutyKind::ProgramPost {
                title: item.title.clone(),
            },
        });
    }

    duties.sort_by_key(|d| d.occurrence.date);
    duties
}

fn require_occurrence(
    state: &AppState,
    occurrence_id: Uuid,
) -> Result<EventOccurrence, StoreError> {
    state
        .store
        .read()
        .data()
        .event_occurrences
        .iter()
        .find(|o| o.id == occurrence_id)
        .cloned()
        .ok_or_else(|| StoreError::NotFound(format!("Occurrence {occurrence_id}")))
}
