//! Group administration: membership, leadership, service roles, and the
//! gathering calendar.

use uuid::Uuid;

use crate::error::StoreError;
use crate::schedule;
use crate::state::AppState;
use crate::store::Mutation;
use crate::types::{
    GatheringPattern, Group, GroupCategory, GroupMember, GroupRole, ServiceRole,
};

pub fn create_group(
    state: &AppState,
    name: &str,
    category: GroupCategory,
) -> Result<Group, StoreError> {
    let name = name.trim();
    if name.is_empty() {
        return Err(StoreError::InvalidInput("group name is required".to_string()));
    }
    let group = Group {
        id: Uuid::new_v4(),
        name: name.to_string(),
        category,
        description: String::new(),
        gathering_pattern: None,
    };
    state.store.write().apply(Mutation::AddGroup(group.clone()));
    state.save()?;
    Ok(group)
}

pub fn update_group(state: &AppState, group: Group) -> Result<(), StoreError> {
    require_group(state, group.id)?;
    state.store.write().apply(Mutation::UpdateGroup(group));
    state.save()
}

pub fn delete_group(state: &AppState, group_id: Uuid) -> Result<(), StoreError> {
    require_group(state, group_id)?;
    state.store.write().apply(Mutation::RemoveGroup(group_id));
    state.save()
}

/// Add a person to a group. Adding someone who is already a member returns
/// the existing row — the operation is idempotent, matching how the
/// membership form behaves.
pub fn add_member(
    state: &AppState,
    group_id: Uuid,
    person_id: Uuid,
) -> Result<GroupMember, StoreError> {
    require_group(state, group_id)?;
    let person_exists = state
        .store
        .read()
        .data()
        .persons
        .iter()
        .any(|p| p.id == person_id);
    if !person_exists {
        return Err(StoreError::NotFound(format!("Person {person_id}")));
    }

    let member = GroupMember {
        id: Uuid::new_v4(),
        group_id,
        person_id,
        role: GroupRole::Member,
        service_role_id: None,
    };
    state
        .store
        .write()
        .apply(Mutation::AddGroupMember(member.clone()));
    state.save()?;

    // The reducer drops duplicates; report whichever row is actually there
    let row = state
        .store
        .read()
        .data()
        .group_members
        .iter()
        .find(|m| m.group_id == group_id && m.person_id == person_id)
        .cloned()
        .unwrap_or(member);
    Ok(row)
}

pub fn remove_member(state: &AppState, member_id: Uuid) -> Result<(), StoreError> {
    state
        .store
        .write()
        .apply(Mutation::RemoveGroupMember(member_id));
    state.save()
}

pub fn set_member_service_role(
    state: &AppState,
    member_id: Uuid,
    service_role_id: Option<Uuid>,
) -> Result<(), StoreError> {
    state.store.write().apply(Mutation::SetMemberServiceRole {
        member_id,
        service_role_id,
    });
    state.save()
}

pub fn toggle_leader(state: &AppState, member_id: Uuid) -> Result<(), StoreError> {
    let exists = state
        .store
        .read()
        .data()
        .group_members
        .iter()
        .any(|m| m.id == member_id);
    if !exists {
        return Err(StoreError::NotFound(format!("Membership {member_id}")));
    }
    state
        .store
        .write()
        .apply(Mutation::ToggleLeader { member_id });
    state.save()
}

/// Create a service role from form input. Instructions arrive as one text
/// block and are split on newlines, blank lines dropped.
pub fn create_service_role(
    state: &AppState,
    name: &str,
    instructions: &str,
) -> Result<ServiceRole, StoreError> {
    let name = name.trim();
    if name.is_empty() {
        return Err(StoreError::InvalidInput("role name is required".to_string()));
    }
    let role = ServiceRole {
        id: Uuid::new_v4(),
        name: name.to_string(),
        description: String::new(),
        default_instructions: split_instructions(instructions),
        is_active: true,
    };
    state
        .store
        .write()
        .apply(Mutation::AddServiceRole(role.clone()));
    state.save()?;
    Ok(role)
}

pub fn update_service_role(
    state: &AppState,
    role_id: Uuid,
    name: &str,
    instructions: &str,
) -> Result<(), StoreError> {
    let existing = state
        .store
        .read()
        .data()
        .service_roles
        .iter()
        .find(|r| r.id == role_id)
        .cloned()
        .ok_or_else(|| StoreError::NotFound(format!("Service role {role_id}")))?;

    state
        .store
        .write()
        .apply(Mutation::UpdateServiceRole(ServiceRole {
            name: name.trim().to_string(),
            default_instructions: split_instructions(instructions),
            ..existing
        }));
    state.save()
}

fn split_instructions(text: &str) -> Vec<String> {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect()
}

/// Store (or clear) a group's gathering pattern. The pattern invariants are
/// checked here, before anything is persisted.
pub fn set_gathering_pattern(
    state: &AppState,
    group_id: Uuid,
    pattern: Option<GatheringPattern>,
) -> Result<(), StoreError> {
    require_group(state, group_id)?;
    if let Some(ref pattern) = pattern {
        schedule::validate_pattern(pattern)
            .map_err(|e| StoreError::InvalidInput(e.to_string()))?;
    }
    state
        .store
        .write()
        .apply(Mutation::SetGatheringPattern { group_id, pattern });
    state.save()
}

/// Project the group's gathering pattern onto the calendar: up to `count`
/// draft occurrences titled with the group name, skipping dates already
/// there. Returns how many were actually added.
pub fn sync_to_calendar(
    state: &AppState,
    group_id: Uuid,
    count: usize,
) -> Result<usize, StoreError> {
    let group = require_group(state, group_id)?;
    let pattern = group.gathering_pattern.clone().ok_or_else(|| {
        StoreError::InvalidInput(format!("Group {} has no gathering pattern", group.name))
    })?;

    let new_occurrences = {
        let guard = state.store.read();
        schedule::project_occurrences(
            &pattern,
            count,
            &guard.data().event_occurrences,
            Some(&group.name),
        )
        .map_err(|e| StoreError::InvalidInput(e.to_string()))?
    };

    let added = new_occurrences.len();
    if added > 0 {
        state
            .store
            .write()
            .apply(Mutation::AddOccurrences(new_occurrences));
        state.save()?;
        log::info!("Added {added} gatherings for {}", group.name);
    }
    Ok(added)
}

fn require_group(state: &AppState, group_id: Uuid) -> Result<Group, StoreError> {
    state
        .store
        .read()
        .data()
        .groups
        .iter()
        .find(|g| g.id == group_id)
        .cloned()
        .ok_or_else(|| StoreError::NotFound(format!("Group {group_id}")))
}
