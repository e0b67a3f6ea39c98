//! People and family service — registration, updates, deletion.
//!
//! Saves follow the remote-or-degrade policy: the local snapshot is written
//! first (that is the "never lose the user's input" guarantee), then the
//! remote push happens if one is configured. Callers always get the explicit
//! three-way outcome.

use uuid::Uuid;

use crate::error::{StoreError, SyncError};
use crate::state::AppState;
use crate::store::remote::{RemoteApi, WriteOutcome};
use crate::store::Mutation;
use crate::types::{CoreRole, Family, Person};

/// Form input for creating or editing a person.
#[derive(Debug, Clone, Default, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PersonInput {
    pub first_name: String,
    pub last_name: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub social_security_number: Option<String>,
    #[serde(default)]
    pub birth_year: Option<i32>,
    #[serde(default)]
    pub birth_date: Option<chrono::NaiveDate>,
    #[serde(default)]
    pub street_address: Option<String>,
    #[serde(default)]
    pub postal_code: Option<String>,
    #[serde(default)]
    pub city: Option<String>,
    #[serde(default)]
    pub is_admin: bool,
    #[serde(default)]
    pub core_role: CoreRole,
}

impl PersonInput {
    fn into_person(self, id: Uuid, is_active: bool) -> Person {
        Person {
            id,
            first_name: self.first_name,
            last_name: self.last_name,
            email: self.email,
            phone: self.phone,
            social_security_number: self.social_security_number,
            birth_year: self.birth_year,
            birth_date: self.birth_date,
            street_address: self.street_address,
            postal_code: self.postal_code,
            city: self.city,
            is_admin: self.is_admin,
            is_active,
            core_role: self.core_role,
        }
    }
}

/// Register a new person. New registrations start active.
pub fn create_person(state: &AppState, input: PersonInput) -> WriteOutcome<Person> {
    if input.first_name.trim().is_empty() {
        return WriteOutcome::Failed(SyncError::Local(StoreError::InvalidInput(
            "first name is required".to_string(),
        )));
    }
    let person = input.into_person(Uuid::new_v4(), true);
    state
        .store
        .write()
        .apply(Mutation::AddPerson(person.clone()));
    // The store may have forced the admin flag; return what it kept
    let person = get_person(state, person.id).unwrap_or(person);
    persist_with_remote(state, person, |api, p| api.push_person(p))
}

/// Update an existing person in place.
pub fn update_person(state: &AppState, person: Person) -> WriteOutcome<Person> {
    if get_person(state, person.id).is_none() {
        return WriteOutcome::Failed(SyncError::Local(StoreError::NotFound(format!(
            "Person {}",
            person.id
        ))));
    }
    state
        .store
        .write()
        .apply(Mutation::UpdatePerson(person.clone()));
    let person = get_person(state, person.id).unwrap_or(person);
    persist_with_remote(state, person, |api, p| api.push_person(p))
}

/// Delete a person. Their membership rows go away; assignments and program
/// slots stay behind unstaffed. The remote delete is best-effort.
pub fn delete_person(state: &AppState, person_id: Uuid) -> Result<(), StoreError> {
    let person = get_person(state, person_id)
        .ok_or_else(|| StoreError::NotFound(format!("Person {person_id}")))?;

    state.store.write().apply(Mutation::RemovePerson(person_id));
    state.save()?;

    if let Some(api) = state.remote_api() {
        if let Err(e) = api.delete_person(person_id) {
            log::warn!(
                "Remote delete for {} failed ({}); local delete stands",
                person.full_name(),
                e
            );
        }
    }
    Ok(())
}

pub fn get_person(state: &AppState, person_id: Uuid) -> Option<Person> {
    state
        .store
        .read()
        .data()
        .persons
        .iter()
        .find(|p| p.id == person_id)
        .cloned()
}

/// All persons, alphabetical by full name (case-insensitive).
pub fn list_persons(state: &AppState) -> Vec<Person> {
    let mut persons = state.store.read().data().persons.clone();
    persons.sort_by_key(|p| p.full_name().to_lowercase());
    persons
}

/// Case-insensitive substring search on the full name.
pub fn search_persons(state: &AppState, query: &str) -> Vec<Person> {
    let needle = query.to_lowercase();
    list_persons(state)
        .into_iter()
        .filter(|p| p.full_name().to_lowercase().contains(&needle))
        .collect()
}

/// Register a family.
pub fn create_family(state: &AppState, family: Family) -> WriteOutcome<Family> {
    if family.name.trim().is_empty() {
        return WriteOutcome::Failed(SyncError::Local(StoreError::InvalidInput(
            "family name is required".to_string(),
        )));
    }
    state
        .store
        .write()
        .apply(Mutation::AddFamily(family.clone()));
    persist_with_remote(state, family, |api, f| api.push_family(f))
}

pub fn update_family(state: &AppState, family: Family) -> WriteOutcome<Family> {
    let exists = state
        .store
        .read()
        .data()
        .families
        .iter()
        .any(|f| f.id == family.id);
    if !exists {
        return WriteOutcome::Failed(SyncError::Local(StoreError::NotFound(format!(
            "Family {}",
            family.id
        ))));
    }
    state
        .store
        .write()
        .apply(Mutation::UpdateFamily(family.clone()));
    persist_with_remote(state, family, |api, f| api.push_family(f))
}

pub fn delete_family(state: &AppState, family_id: Uuid) -> Result<(), StoreError> {
    state.store.write().apply(Mutation::RemoveFamily(family_id));
    state.save()
}

/// Local save, then optional remote push. Local failure is the only path to
/// `Failed`; a dead remote degrades instead.
fn persist_with_remote<T>(
    state: &AppState,
    record: T,
    push: impl FnOnce(&RemoteApi, &T) -> Result<(), SyncError>,
) -> WriteOutcome<T> {
    if let Err(e) = state.save() {
        log::error!("Local save failed: {e}");
        return WriteOutcome::Failed(e.into());
    }

    match state.remote_api() {
        None => WriteOutcome::Saved(record),
        Some(api) => match push(&api, &record) {
            Ok(()) => WriteOutcome::Saved(record),
            Err(e) => {
                log::warn!("Remote write failed ({e}); record kept locally");
                WriteOutcome::Degraded {
                    record,
                    reason: e.to_string(),
                }
            }
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Config;

    fn state_with_dir(dir: &std::path::Path) -> AppState {
        AppState::in_memory(Some(Config {
            data_dir: Some(dir.to_string_lossy().to_string()),
            ..Default::default()
        }))
    }

    fn input(first: &str, last: &str) -> PersonInput {
        PersonInput {
            first_name: first.to_string(),
            last_name: last.to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn create_without_remote_is_saved_not_degraded() {
        let dir = tempfile::tempdir().unwrap();
        let state = state_with_dir(dir.path());

        let outcome = create_person(&state, input("Kari", "Testesen"));
        let WriteOutcome::Saved(person) = outcome else {
            panic!("expected Saved, got {outcome:?}");
        };
        assert!(person.is_active);
        assert_eq!(state.store.read().data().persons.len(), 1);
        // And it hit the disk
        let loaded = crate::store::local::load_snapshot(dir.path()).unwrap();
        assert_eq!(loaded.persons.len(), 1);
    }

    #[test]
    fn unreachable_remote_degrades_but_keeps_the_record() {
        let dir = tempfile::tempdir().unwrap();
        let state = AppState::in_memory(Some(Config {
            data_dir: Some(dir.path().to_string_lossy().to_string()),
            remote: crate::types::RemoteConfig {
                // Reserved-for-documentation range; nothing listens here
                base_url: Some("http://192.0.2.1:9/".to_string()),
                timeout_secs: 1,
            },
            ..Default::default()
        }));

        let outcome = create_person(&state, input("Kari", "Testesen"));
        let WriteOutcome::Degraded { record, reason } = outcome else {
            panic!("expected Degraded, got {outcome:?}");
        };
        assert!(!reason.is_empty());
        // The record is still in the local snapshot
        let loaded = crate::store::local::load_snapshot(dir.path()).unwrap();
        assert_eq!(loaded.persons[0].id, record.id);
    }

    #[test]
    fn pastor_registration_forces_the_admin_flag() {
        let dir = tempfile::tempdir().unwrap();
        let state = state_with_dir(dir.path());

        let mut form = input("Vigdis", "Prest");
        form.core_role = CoreRole::Pastor;
        form.is_admin = false;
        let WriteOutcome::Saved(person) = create_person(&state, form) else {
            panic!("expected Saved");
        };
        assert!(person.is_admin);
    }

    #[test]
    fn blank_first_name_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let state = state_with_dir(dir.path());
        assert!(create_person(&state, input("  ", "Testesen")).is_failed());
        assert!(state.store.read().data().persons.is_empty());
    }

    #[test]
    fn update_of_missing_person_fails() {
        let dir = tempfile::tempdir().unwrap();
        let state = state_with_dir(dir.path());
        let ghost = input("Kari", "Testesen").into_person(Uuid::new_v4(), true);
        assert!(update_person(&state, ghost).is_failed());
    }

    #[test]
    fn listing_sorts_by_full_name() {
        let dir = tempfile::tempdir().unwrap();
        let state = state_with_dir(dir.path());
        create_person(&state, input("Øyvind", "Ås"));
        create_person(&state, input("Anne", "Berg"));
        create_person(&state, input("anne", "aas"));

        let names: Vec<String> = list_persons(&state)
            .iter()
            .map(|p| p.full_name())
            .collect();
        assert_eq!(names[0], "anne aas");
        assert_eq!(names[1], "Anne Berg");
    }

    #[test]
    fn search_is_case_insensitive() {
        let dir = tempfile::tempdir().unwrap();
        let state = state_with_dir(dir.path());
        create_person(&state, input("Kari", "Nordmann"));
        create_person(&state, input("Ola", "Nordmann"));
        create_person(&state, input("Anne", "Berg"));

        assert_eq!(search_persons(&state, "nordmann").len(), 2);
        assert_eq!(search_persons(&state, "KARI").len(), 1);
    }
}
