//! In-memory snapshot and its reducer.
//!
//! All entity collections live in one `Congregation` tree. Mutation goes
//! through `Store::apply` with one `Mutation` variant per operation, so every
//! state change is an explicit, auditable action and the derivation code in
//! `stats`/`schedule` can stay pure. The reducer is deliberately forgiving:
//! an update or removal targeting a missing id is a no-op, the same way the
//! UI handlers it replaced treated stale ids. Existence checks that should
//! produce errors belong in the service layer.

pub mod local;
pub mod remote;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::types::{
    Assignment, CoreRole, EventOccurrence, EventTemplate, Family, GatheringPattern, Group,
    GroupMember, GroupRole, Person, ProgramItem, ServiceRole, Task,
};

/// The whole working set. Serializes to one camelCase JSON document; every
/// collection defaults to empty so older snapshots keep loading as fields
/// are added.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Congregation {
    #[serde(default)]
    pub persons: Vec<Person>,
    #[serde(default)]
    pub families: Vec<Family>,
    #[serde(default)]
    pub groups: Vec<Group>,
    #[serde(default)]
    pub group_members: Vec<GroupMember>,
    #[serde(default)]
    pub service_roles: Vec<ServiceRole>,
    #[serde(default)]
    pub event_templates: Vec<EventTemplate>,
    #[serde(default)]
    pub event_occurrences: Vec<EventOccurrence>,
    #[serde(default)]
    pub assignments: Vec<Assignment>,
    #[serde(default)]
    pub program_items: Vec<ProgramItem>,
    #[serde(default)]
    pub tasks: Vec<Task>,
}

/// One discrete state change. Everything that mutates the snapshot is a
/// variant here.
#[derive(Debug, Clone)]
pub enum Mutation {
    AddPerson(Person),
    UpdatePerson(Person),
    RemovePerson(Uuid),

    AddFamily(Family),
    UpdateFamily(Family),
    RemoveFamily(Uuid),

    AddGroup(Group),
    UpdateGroup(Group),
    RemoveGroup(Uuid),
    SetGatheringPattern {
        group_id: Uuid,
        pattern: Option<GatheringPattern>,
    },

    AddGroupMember(GroupMember),
    RemoveGroupMember(Uuid),
    SetMemberServiceRole {
        member_id: Uuid,
        service_role_id: Option<Uuid>,
    },
    ToggleLeader {
        member_id: Uuid,
    },

    AddServiceRole(ServiceRole),
    UpdateServiceRole(ServiceRole),
    RemoveServiceRole(Uuid),

    AddEventTemplate(EventTemplate),
    RemoveEventTemplate(Uuid),

    AddOccurrences(Vec<EventOccurrence>),
    UpdateOccurrence(EventOccurrence),
    RemoveOccurrence(Uuid),

    AddAssignment(Assignment),
    UpdateAssignment(Assignment),
    RemoveAssignment(Uuid),

    AddProgramItem(ProgramItem),
    UpdateProgramItem(ProgramItem),
    RemoveProgramItem(Uuid),

    AddTask(Task),
    UpdateTask(Task),
    RemoveTask(Uuid),
}

/// Owns the snapshot and applies mutations to it.
#[derive(Debug, Default)]
pub struct Store {
    data: Congregation,
}

impl Store {
    pub fn new(data: Congregation) -> Self {
        Self { data }
    }

    pub fn data(&self) -> &Congregation {
        &self.data
    }

    pub fn apply(&mut self, mutation: Mutation) {
        let db = &mut self.data;
        match mutation {
            Mutation::AddPerson(person) => db.persons.push(enforce_admin_flag(person)),
            Mutation::UpdatePerson(person) => {
                let person = enforce_admin_flag(person);
                if let Some(slot) = db.persons.iter_mut().find(|p| p.id == person.id) {
                    *slot = person;
                }
            }
            Mutation::RemovePerson(id) => remove_person(db, id),

            Mutation::AddFamily(family) => db.families.push(family),
            Mutation::UpdateFamily(family) => {
                if let Some(slot) = db.families.iter_mut().find(|f| f.id == family.id) {
                    *slot = family;
                }
            }
            Mutation::RemoveFamily(id) => db.families.retain(|f| f.id != id),

            Mutation::AddGroup(group) => db.groups.push(group),
            Mutation::UpdateGroup(group) => {
                if let Some(slot) = db.groups.iter_mut().find(|g| g.id == group.id) {
                    *slot = group;
                }
            }
            Mutation::RemoveGroup(id) => remove_group(db, id),
            Mutation::SetGatheringPattern { group_id, pattern } => {
                if let Some(group) = db.groups.iter_mut().find(|g| g.id == group_id) {
                    group.gathering_pattern = pattern;
                }
            }

            Mutation::AddGroupMember(member) => {
                let duplicate = db
                    .group_members
                    .iter()
                    .any(|m| m.group_id == member.group_id && m.person_id == member.person_id);
                if !duplicate {
                    db.group_members.push(member);
                }
            }
            Mutation::RemoveGroupMember(id) => {
                let person_id = db
                    .group_members
                    .iter()
                    .find(|m| m.id == id)
                    .map(|m| m.person_id);
                db.group_members.retain(|m| m.id != id);
                // Losing a leadership row can demote the person's core role
                if let Some(person_id) = person_id {
                    reconcile_core_role(db, person_id);
                }
            }
            Mutation::SetMemberServiceRole {
                member_id,
                service_role_id,
            } => {
                if let Some(member) = db.group_members.iter_mut().find(|m| m.id == member_id) {
                    member.service_role_id = service_role_id;
                }
            }
            Mutation::ToggleLeader { member_id } => toggle_leader(db, member_id),

            Mutation::AddServiceRole(role) => db.service_roles.push(role),
            Mutation::UpdateServiceRole(role) => {
                if let Some(slot) = db.service_roles.iter_mut().find(|r| r.id == role.id) {
                    *slot = role;
                }
            }
            Mutation::RemoveServiceRole(id) => {
                db.service_roles.retain(|r| r.id != id);
                for member in db.group_members.iter_mut() {
                    if member.service_role_id == Some(id) {
                        member.service_role_id = None;
                    }
                }
                for assignment in db.assignments.iter_mut() {
                    if assignment.service_role_id == Some(id) {
                        assignment.service_role_id = None;
                    }
                }
                for item in db.program_items.iter_mut() {
                    if item.service_role_id == Some(id) {
                        item.service_role_id = None;
                    }
                }
            }

            Mutation::AddEventTemplate(template) => db.event_templates.push(template),
            Mutation::RemoveEventTemplate(id) => {
                db.event_templates.retain(|t| t.id != id);
                for occurrence in db.event_occurrences.iter_mut() {
                    if occurrence.template_id == Some(id) {
                        occurrence.template_id = None;
                    }
                }
            }

            Mutation::AddOccurrences(occurrences) => db.event_occurrences.extend(occurrences),
            Mutation::UpdateOccurrence(occurrence) => {
                if let Some(slot) = db
                    .event_occurrences
                    .iter_mut()
                    .find(|o| o.id == occurrence.id)
                {
                    *slot = occurrence;
                }
            }
            Mutation::RemoveOccurrence(id) => remove_occurrence(db, id),

            Mutation::AddAssignment(assignment) => db.assignments.push(assignment),
            Mutation::UpdateAssignment(assignment) => {
                if let Some(slot) = db.assignments.iter_mut().find(|a| a.id == assignment.id) {
                    *slot = assignment;
                }
            }
            Mutation::RemoveAssignment(id) => db.assignments.retain(|a| a.id != id),

            Mutation::AddProgramItem(item) => db.program_items.push(item),
            Mutation::UpdateProgramItem(item) => {
                if let Some(slot) = db.program_items.iter_mut().find(|p| p.id == item.id) {
                    *slot = item;
                }
            }
            Mutation::RemoveProgramItem(id) => db.program_items.retain(|p| p.id != id),

            Mutation::AddTask(task) => db.tasks.push(task),
            Mutation::UpdateTask(task) => {
                if let Some(slot) = db.tasks.iter_mut().find(|t| t.id == task.id) {
                    *slot = task;
                }
            }
            Mutation::RemoveTask(id) => db.tasks.retain(|t| t.id != id),
        }
    }
}

/// Admins and pastors always carry the admin flag, whatever the form said.
fn enforce_admin_flag(mut person: Person) -> Person {
    if matches!(person.core_role, CoreRole::Admin | CoreRole::Pastor) {
        person.is_admin = true;
    }
    person
}

/// Removing a person drops their membership rows but keeps their shifts and
/// program slots as open (person-less) entries; their tasks go away with
/// them.
fn remove_person(db: &mut Congregation, id: Uuid) {
    db.persons.retain(|p| p.id != id);
    db.group_members.retain(|m| m.person_id != id);
    for family in db.families.iter_mut() {
        family.member_ids.retain(|member| *member != id);
    }
    for assignment in db.assignments.iter_mut() {
        if assignment.person_id == Some(id) {
            assignment.person_id = None;
        }
    }
    for item in db.program_items.iter_mut() {
        if item.person_id == Some(id) {
            item.person_id = None;
        }
    }
    db.tasks.retain(|t| t.responsible_id != Some(id));
}

fn remove_group(db: &mut Congregation, id: Uuid) {
    db.groups.retain(|g| g.id != id);
    let orphaned: Vec<Uuid> = db
        .group_members
        .iter()
        .filter(|m| m.group_id == id)
        .map(|m| m.person_id)
        .collect();
    db.group_members.retain(|m| m.group_id != id);
    for item in db.program_items.iter_mut() {
        if item.group_id == Some(id) {
            item.group_id = None;
        }
    }
    for person_id in orphaned {
        reconcile_core_role(db, person_id);
    }
}

fn remove_occurrence(db: &mut Congregation, id: Uuid) {
    db.event_occurrences.retain(|o| o.id != id);
    db.assignments.retain(|a| a.occurrence_id != id);
    db.program_items.retain(|p| p.occurrence_id != id);
    for task in db.tasks.iter_mut() {
        if task.occurrence_id == Some(id) {
            task.occurrence_id = None;
        }
    }
}

/// Flip a membership row between leader and member, then reconcile the
/// person's core role with their remaining leaderships.
fn toggle_leader(db: &mut Congregation, member_id: Uuid) {
    let Some(member) = db.group_members.iter_mut().find(|m| m.id == member_id) else {
        return;
    };
    member.role = match member.role {
        GroupRole::Leader => GroupRole::Member,
        GroupRole::Member => GroupRole::Leader,
    };
    let person_id = member.person_id;
    reconcile_core_role(db, person_id);
}

/// Team leadership is reflected in `core_role`: leading at least one group
/// makes a person a team leader, leading none makes them a plain member.
/// Admin and pastor roles outrank that and are never touched here.
fn reconcile_core_role(db: &mut Congregation, person_id: Uuid) {
    let leads_any = db
        .group_members
        .iter()
        .any(|m| m.person_id == person_id && m.role == GroupRole::Leader);
    if let Some(person) = db.persons.iter_mut().find(|p| p.id == person_id) {
        if matches!(person.core_role, CoreRole::Admin | CoreRole::Pastor) {
            return;
        }
        if leads_any {
            person.core_role = CoreRole::TeamLeader;
        } else if person.core_role == CoreRole::TeamLeader {
            person.core_role = CoreRole::Member;
        }
    }
}
