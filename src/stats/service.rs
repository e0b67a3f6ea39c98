//! Service-team participation counting.

use std::collections::HashSet;

use uuid::Uuid;

use crate::types::{Group, GroupCategory, GroupMember, Person};

/// Number of distinct filtered persons holding at least one membership in a
/// service-category group. Set semantics on person id: two service-team
/// memberships still count one person.
pub fn count_in_service(
    filtered: &[&Person],
    group_members: &[GroupMember],
    groups: &[Group],
) -> usize {
    let filtered_ids: HashSet<Uuid> = filtered.iter().map(|p| p.id).collect();
    let service_groups: HashSet<Uuid> = groups
        .iter()
        .filter(|g| g.category == GroupCategory::Service)
        .map(|g| g.id)
        .collect();

    let mut in_service: HashSet<Uuid> = HashSet::new();
    for member in group_members {
        if filtered_ids.contains(&member.person_id) && service_groups.contains(&member.group_id) {
            in_service.insert(member.person_id);
        }
    }
    in_service.len()
}

/// Share of the filtered set that serves, as a rounded whole percent.
/// Zero when the filtered set is empty — never a division error.
pub fn percent_in_service(in_service: usize, total_filtered: usize) -> u32 {
    if total_filtered == 0 {
        return 0;
    }
    ((in_service as f64 / total_filtered as f64) * 100.0).round() as u32
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{CoreRole, GroupRole};

    fn person(first: &str) -> Person {
        Person {
            id: Uuid::new_v4(),
            first_name: first.to_string(),
            last_name: "Testesen".to_string(),
            email: None,
            phone: None,
            social_security_number: None,
            birth_year: None,
            birth_date: None,
            street_address: None,
            postal_code: None,
            city: None,
            is_admin: false,
            is_active: true,
            core_role: CoreRole::Member,
        }
    }

    fn group(name: &str, category: GroupCategory) -> Group {
        Group {
            id: Uuid::new_v4(),
            name: name.to_string(),
            category,
            description: String::new(),
            gathering_pattern: None,
        }
    }

    fn membership(group: &Group, person: &Person) -> GroupMember {
        GroupMember {
            id: Uuid::new_v4(),
            group_id: group.id,
            person_id: person.id,
            role: GroupRole::Member,
            service_role_id: None,
        }
    }

    #[test]
    fn multiple_service_memberships_count_once() {
        let p = person("Kari");
        let sound = group("Lyd", GroupCategory::Service);
        let hosting = group("Vertskap", GroupCategory::Service);
        let members = vec![membership(&sound, &p), membership(&hosting, &p)];

        let filtered = vec![&p];
        assert_eq!(
            count_in_service(&filtered, &members, &[sound, hosting]),
            1
        );
    }

    #[test]
    fn fellowship_membership_does_not_count() {
        let p = person("Kari");
        let home_group = group("Husgruppe Øst", GroupCategory::Fellowship);
        let members = vec![membership(&home_group, &p)];

        let filtered = vec![&p];
        assert_eq!(count_in_service(&filtered, &members, &[home_group]), 0);
    }

    #[test]
    fn persons_outside_the_filtered_set_are_ignored() {
        let in_set = person("Kari");
        let out_of_set = person("Bjørn");
        let sound = group("Lyd", GroupCategory::Service);
        let members = vec![membership(&sound, &in_set), membership(&sound, &out_of_set)];

        let filtered = vec![&in_set];
        let count = count_in_service(&filtered, &members, &[sound]);
        assert_eq!(count, 1);
        assert!(count <= filtered.len());
    }

    #[test]
    fn percent_is_zero_for_empty_set_and_bounded_otherwise() {
        assert_eq!(percent_in_service(0, 0), 0);
        assert_eq!(percent_in_service(1, 3), 33);
        assert_eq!(percent_in_service(2, 3), 67);
        assert_eq!(percent_in_service(3, 3), 100);
    }
}
