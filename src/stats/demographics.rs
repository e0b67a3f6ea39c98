//! Age/gender bucketing for the demographics chart.

use chrono::NaiveDate;

use super::heuristics::{age_on, is_woman};
use crate::types::{AgeGroupDef, DemographicGroup, Person};

/// Bucket the filtered persons into the configured age ranges, split by the
/// gender heuristic. Persons with no derivable age land in no bucket at all.
///
/// Also returns the largest single bucket-gender count, floored at 1 so chart
/// scaling downstream never divides by zero.
pub fn aggregate(
    filtered: &[&Person],
    age_groups: &[AgeGroupDef],
    female_first_names: &[String],
    today: NaiveDate,
) -> (Vec<DemographicGroup>, usize) {
    let data: Vec<DemographicGroup> = age_groups
        .iter()
        .map(|group| {
            let mut women = 0;
            let mut men = 0;
            for person in filtered {
                let Some(age) = age_on(person, today) else {
                    continue;
                };
                if age < 0 || (age as u32) < group.min || (age as u32) > group.max {
                    continue;
                }
                if is_woman(person, female_first_names) {
                    women += 1;
                } else {
                    men += 1;
                }
            }
            DemographicGroup {
                label: group.label.clone(),
                min: group.min,
                max: group.max,
                women,
                men,
                total: women + men,
            }
        })
        .collect();

    let max_count = data
        .iter()
        .map(|d| d.women.max(d.men))
        .max()
        .unwrap_or(0)
        .max(1);

    (data, max_count)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::CoreRole;
    use uuid::Uuid;

    fn person(first: &str, birth_year: i32) -> Person {
        Person {
            id: Uuid::new_v4(),
            first_name: first.to_string(),
            last_name: "Testesen".to_string(),
            email: None,
            phone: None,
            social_security_number: None,
            birth_year: Some(birth_year),
            birth_date: None,
            street_address: None,
            postal_code: None,
            city: None,
            is_admin: false,
            is_active: true,
            core_role: CoreRole::Member,
        }
    }

    fn names() -> Vec<String> {
        crate::locale::default_female_first_names()
    }

    fn groups() -> Vec<AgeGroupDef> {
        crate::locale::default_age_groups()
    }

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 8, 1).unwrap()
    }

    #[test]
    fn buckets_split_by_heuristic_gender() {
        // Ages 17 (F), 45 (M), 45 (F)
        let p1 = person("Thea", 2009);
        let p2 = person("Bjørn", 1981);
        let p3 = person("Kari", 1981);
        let filtered: Vec<&Person> = vec![&p1, &p2, &p3];

        let (data, max_count) = aggregate(&filtered, &groups(), &names(), today());

        let youngest = data.iter().find(|d| d.label == "0-20").unwrap();
        assert_eq!((youngest.women, youngest.men), (1, 0));
        let mid = data.iter().find(|d| d.label == "40-60").unwrap();
        assert_eq!((mid.women, mid.men), (1, 1));
        assert_eq!(mid.total, 2);
        assert_eq!(max_count, 1);
    }

    #[test]
    fn ranges_are_disjoint_and_cover_every_defined_age() {
        let persons: Vec<Person> = (0..90).map(|i| person("Bjørn", 2026 - i)).collect();
        let filtered: Vec<&Person> = persons.iter().collect();

        let (data, _) = aggregate(&filtered, &groups(), &names(), today());

        // Every person with a defined age lands in exactly one bucket
        let total: usize = data.iter().map(|d| d.total).sum();
        assert_eq!(total, persons.len());
    }

    #[test]
    fn gender_split_sums_to_defined_age_count() {
        let with_age = person("Kari", 1990);
        let without_age = Person {
            birth_year: None,
            ..person("Mille", 1990)
        };
        let filtered: Vec<&Person> = vec![&with_age, &without_age];

        let (data, _) = aggregate(&filtered, &groups(), &names(), today());
        let women: usize = data.iter().map(|d| d.women).sum();
        let men: usize = data.iter().map(|d| d.men).sum();
        assert_eq!(women + men, 1);
    }

    #[test]
    fn max_count_floors_at_one() {
        let (_, max_count) = aggregate(&[], &groups(), &names(), today());
        assert_eq!(max_count, 1);
    }
}
