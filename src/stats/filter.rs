//! Predicate filtering of the person list for the dashboard.
//!
//! Pure function of its inputs; filtering an already-filtered list with the
//! same filters returns the same list.

use chrono::NaiveDate;

use super::heuristics::{age_on, is_woman};
use crate::types::{DashboardFilters, FilterAgeGroup, FilterGender, FilterStatus, Person};

/// Whether a person falls in the selected age bracket. A person with no
/// derivable age never matches a non-"all" bracket — unknown is not zero.
fn matches_age_group(person: &Person, age_group: FilterAgeGroup, today: NaiveDate) -> bool {
    if age_group == FilterAgeGroup::All {
        return true;
    }
    let Some(age) = age_on(person, today) else {
        return false;
    };
    match age_group {
        FilterAgeGroup::All => true,
        FilterAgeGroup::Minor => (0..=18).contains(&age),
        FilterAgeGroup::Adult => (19..=64).contains(&age),
        FilterAgeGroup::Senior => age >= 65,
    }
}

/// Apply the dashboard filters to a person list.
pub fn filter_persons<'a>(
    persons: &'a [Person],
    filters: &DashboardFilters,
    female_first_names: &[String],
    today: NaiveDate,
) -> Vec<&'a Person> {
    persons
        .iter()
        .filter(|person| {
            match filters.status {
                FilterStatus::All => {}
                FilterStatus::Active => {
                    if !person.is_active {
                        return false;
                    }
                }
                FilterStatus::Inactive => {
                    if person.is_active {
                        return false;
                    }
                }
            }

            match filters.gender {
                FilterGender::All => {}
                FilterGender::Male => {
                    if is_woman(person, female_first_names) {
                        return false;
                    }
                }
                FilterGender::Female => {
                    if !is_woman(person, female_first_names) {
                        return false;
                    }
                }
            }

            matches_age_group(person, filters.age_group, today)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::CoreRole;
    use uuid::Uuid;

    fn person(first: &str, active: bool, birth_year: Option<i32>) -> Person {
        Person {
            id: Uuid::new_v4(),
            first_name: first.to_string(),
            last_name: "Testesen".to_string(),
            email: None,
            phone: None,
            social_security_number: None,
            birth_year,
            birth_date: None,
            street_address: None,
            postal_code: None,
            city: None,
            is_admin: false,
            is_active: active,
            core_role: CoreRole::Member,
        }
    }

    fn names() -> Vec<String> {
        crate::locale::default_female_first_names()
    }

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 8, 1).unwrap()
    }

    #[test]
    fn all_filters_pass_everyone() {
        let persons = vec![
            person("Kari", true, Some(1990)),
            person("Bjørn", false, None),
        ];
        let out = filter_persons(&persons, &DashboardFilters::default(), &names(), today());
        assert_eq!(out.len(), 2);
    }

    #[test]
    fn status_filter_splits_on_active_flag() {
        let persons = vec![
            person("Kari", true, None),
            person("Bjørn", false, None),
        ];
        let active = DashboardFilters {
            status: FilterStatus::Active,
            ..Default::default()
        };
        let inactive = DashboardFilters {
            status: FilterStatus::Inactive,
            ..Default::default()
        };
        assert_eq!(filter_persons(&persons, &active, &names(), today()).len(), 1);
        assert_eq!(
            filter_persons(&persons, &inactive, &names(), today())[0].first_name,
            "Bjørn"
        );
    }

    #[test]
    fn gender_filter_uses_the_heuristic() {
        let persons = vec![
            person("Kari", true, None),
            person("Vigdis", true, None),
            person("Bjørn", true, None),
        ];
        let women = DashboardFilters {
            gender: FilterGender::Female,
            ..Default::default()
        };
        let men = DashboardFilters {
            gender: FilterGender::Male,
            ..Default::default()
        };
        assert_eq!(filter_persons(&persons, &women, &names(), today()).len(), 2);
        assert_eq!(filter_persons(&persons, &men, &names(), today()).len(), 1);
    }

    #[test]
    fn unknown_age_never_matches_a_bracket() {
        let persons = vec![person("Kari", true, None)];
        for bracket in [
            FilterAgeGroup::Minor,
            FilterAgeGroup::Adult,
            FilterAgeGroup::Senior,
        ] {
            let filters = DashboardFilters {
                age_group: bracket,
                ..Default::default()
            };
            assert!(filter_persons(&persons, &filters, &names(), today()).is_empty());
        }
    }

    #[test]
    fn age_brackets_are_inclusive() {
        // 18, 19, 64 and 65 years old in 2026 (birth-year arithmetic)
        let persons = vec![
            person("A18", true, Some(2008)),
            person("A19", true, Some(2007)),
            person("A64", true, Some(1962)),
            person("A65", true, Some(1961)),
        ];
        let minors = DashboardFilters {
            age_group: FilterAgeGroup::Minor,
            ..Default::default()
        };
        let adults = DashboardFilters {
            age_group: FilterAgeGroup::Adult,
            ..Default::default()
        };
        let seniors = DashboardFilters {
            age_group: FilterAgeGroup::Senior,
            ..Default::default()
        };
        assert_eq!(filter_persons(&persons, &minors, &names(), today()).len(), 1);
        assert_eq!(filter_persons(&persons, &adults, &names(), today()).len(), 2);
        assert_eq!(filter_persons(&persons, &seniors, &names(), today()).len(), 1);
    }

    #[test]
    fn filtering_is_idempotent() {
        let persons = vec![
            person("Kari", true, Some(1990)),
            person("Bjørn", false, Some(1950)),
            person("Thea", true, None),
        ];
        let filters = DashboardFilters {
            status: FilterStatus::Active,
            gender: FilterGender::Female,
            age_group: FilterAgeGroup::Adult,
        };
        let once: Vec<Person> = filter_persons(&persons, &filters, &names(), today())
            .into_iter()
            .cloned()
            .collect();
        let twice: Vec<Person> = filter_persons(&once, &filters, &names(), today())
            .into_iter()
            .cloned()
            .collect();
        assert_eq!(once, twice);
    }
}
