//! Postal-code aggregation for the congregation map.

use std::collections::BTreeMap;

use crate::types::{GeoConfig, MapPoint, Person};

/// Count filtered persons per trimmed postal code. Empty and missing codes
/// are excluded.
pub fn postal_code_counts(filtered: &[&Person]) -> BTreeMap<String, usize> {
    let mut counts = BTreeMap::new();
    for person in filtered {
        let Some(code) = person.postal_code.as_deref() else {
            continue;
        };
        let code = code.trim();
        if code.is_empty() {
            continue;
        }
        *counts.entry(code.to_string()).or_insert(0) += 1;
    }
    counts
}

/// Turn postal-code counts into weighted map markers.
///
/// Codes absent from the coordinate table are dropped without error — the map
/// is knowingly lossy for people living outside the plotted area, and callers
/// surface that as a coverage note, not a failure.
pub fn map_points(counts: &BTreeMap<String, usize>, geo: &GeoConfig) -> Vec<MapPoint> {
    counts
        .iter()
        .filter(|&(_, &count)| count > 0)
        .filter_map(|(code, &count)| {
            geo.coords.get(code).map(|coord| MapPoint {
                postal_code: code.clone(),
                count,
                x: coord.x,
                y: coord.y,
            })
        })
        .collect()
}

/// Largest single postal-code count across all counted codes (known or not),
/// floored at 1 for marker scaling.
pub fn max_postal_code_count(counts: &BTreeMap<String, usize>) -> usize {
    counts.values().copied().max().unwrap_or(0).max(1)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::CoreRole;
    use uuid::Uuid;

    fn person(postal_code: Option<&str>) -> Person {
        Person {
            id: Uuid::new_v4(),
            first_name: "Kari".to_string(),
            last_name: "Testesen".to_string(),
            email: None,
            phone: None,
            social_security_number: None,
            birth_year: None,
            birth_date: None,
            street_address: None,
            postal_code: postal_code.map(|s| s.to_string()),
            city: None,
            is_admin: false,
            is_active: true,
            core_role: CoreRole::Member,
        }
    }

    fn geo() -> GeoConfig {
        GeoConfig::default()
    }

    #[test]
    fn unknown_codes_are_counted_but_never_plotted() {
        let persons: Vec<Person> = vec![
            person(Some("4600")),
            person(Some("4600")),
            person(Some("4600")),
            person(Some("9999")),
            person(Some("9999")),
        ];
        let filtered: Vec<&Person> = persons.iter().collect();

        let counts = postal_code_counts(&filtered);
        let points = map_points(&counts, &geo());

        assert_eq!(points.len(), 1);
        assert_eq!(points[0].postal_code, "4600");
        assert_eq!(points[0].count, 3);
        assert_eq!((points[0].x, points[0].y), (45.0, 40.0));
        assert_eq!(max_postal_code_count(&counts), 3);
    }

    #[test]
    fn codes_are_trimmed_and_empties_excluded() {
        let persons: Vec<Person> = vec![
            person(Some(" 4610 ")),
            person(Some("4610")),
            person(Some("   ")),
            person(None),
        ];
        let filtered: Vec<&Person> = persons.iter().collect();

        let counts = postal_code_counts(&filtered);
        assert_eq!(counts.len(), 1);
        assert_eq!(counts["4610"], 2);
    }

    #[test]
    fn point_counts_sum_to_known_code_persons() {
        let persons: Vec<Person> = vec![
            person(Some("4600")),
            person(Some("4610")),
            person(Some("4610")),
            person(Some("0001")),
            person(None),
        ];
        let filtered: Vec<&Person> = persons.iter().collect();

        let counts = postal_code_counts(&filtered);
        let points = map_points(&counts, &geo());
        let plotted: usize = points.iter().map(|p| p.count).sum();

        let known = persons
            .iter()
            .filter(|p| {
                p.postal_code
                    .as_deref()
                    .map(str::trim)
                    .is_some_and(|c| geo().coords.contains_key(c))
            })
            .count();
        assert_eq!(plotted, known);
    }

    #[test]
    fn max_count_floors_at_one_when_nobody_has_a_code() {
        let counts = postal_code_counts(&[]);
        assert_eq!(max_postal_code_count(&counts), 1);
    }
}
