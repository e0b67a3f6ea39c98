//! Derived dashboard statistics.
//!
//! Everything in this module is a pure function over the current snapshot:
//! no caching, no shared state, recomputed on every call. Recomputation is
//! linear in the person count and safe to repeat on any input change.

pub mod demographics;
pub mod filter;
pub mod geo;
pub mod heuristics;
pub mod service;

use chrono::NaiveDate;

use crate::types::{
    DashboardFilters, DashboardStats, DemographicsConfig, GeoConfig, Group, GroupMember, Person,
};

/// Compose the full dashboard stat block: filter → activity count → service
/// participation → map points → demographics.
pub fn compute_dashboard_stats(
    persons: &[Person],
    group_members: &[GroupMember],
    groups: &[Group],
    filters: &DashboardFilters,
    demographics_cfg: &DemographicsConfig,
    geo_cfg: &GeoConfig,
    today: NaiveDate,
) -> DashboardStats {
    let filtered = filter::filter_persons(
        persons,
        filters,
        &demographics_cfg.female_first_names,
        today,
    );

    let total_persons = filtered.len();
    let active_persons = filtered.iter().filter(|p| p.is_active).count();

    let persons_in_service = service::count_in_service(&filtered, group_members, groups);
    let percent_in_service = service::percent_in_service(persons_in_service, total_persons);

    let postal_code_counts = geo::postal_code_counts(&filtered);
    let map_points = geo::map_points(&postal_code_counts, geo_cfg);
    let max_postal_code_count = geo::max_postal_code_count(&postal_code_counts);

    let (demographic_data, max_count) = demographics::aggregate(
        &filtered,
        &demographics_cfg.age_groups,
        &demographics_cfg.female_first_names,
        today,
    );

    DashboardStats {
        total_persons,
        active_persons,
        persons_in_service,
        percent_in_service,
        postal_code_counts,
        map_points,
        demographic_data,
        max_count,
        max_postal_code_count,
        is_empty: total_persons == 0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{CoreRole, FilterStatus, GroupCategory, GroupRole};
    use uuid::Uuid;

    fn person(first: &str, active: bool, birth_year: Option<i32>, postal: Option<&str>) -> Person {
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
            postal_code: postal.map(|s| s.to_string()),
            city: None,
            is_admin: false,
            is_active: active,
            core_role: CoreRole::Member,
        }
    }

    #[test]
    fn facade_composes_all_panels() {
        let today = NaiveDate::from_ymd_opt(2026, 8, 1).unwrap();
        let kari = person("Kari", true, Some(1981), Some("4600"));
        let bjorn = person("Bjørn", true, Some(1981), Some("4600"));
        let thea = person("Thea", false, Some(2009), Some("9999"));
        let persons = vec![kari.clone(), bjorn, thea];

        let sound = Group {
            id: Uuid::new_v4(),
            name: "Lyd".to_string(),
            category: GroupCategory::Service,
            description: String::new(),
            gathering_pattern: None,
        };
        let members = vec![GroupMember {
            id: Uuid::new_v4(),
            group_id: sound.id,
            person_id: kari.id,
            role: GroupRole::Member,
            service_role_id: None,
        }];

        let stats = compute_dashboard_stats(
            &persons,
            &members,
            &[sound],
            &DashboardFilters::default(),
            &DemographicsConfig::default(),
            &GeoConfig::default(),
            today,
        );

        assert_eq!(stats.total_persons, 3);
        assert_eq!(stats.active_persons, 2);
        assert_eq!(stats.persons_in_service, 1);
        assert_eq!(stats.percent_in_service, 33);
        assert_eq!(stats.map_points.len(), 1);
        assert_eq!(stats.max_postal_code_count, 2);
        assert!(!stats.is_empty);

        let mid = stats
            .demographic_data
            .iter()
            .find(|d| d.label == "40-60")
            .unwrap();
        assert_eq!((mid.women, mid.men), (1, 1));
    }

    #[test]
    fn active_count_respects_the_status_filter() {
        let today = NaiveDate::from_ymd_opt(2026, 8, 1).unwrap();
        let persons = vec![person("Kari", false, None, None)];
        let filters = DashboardFilters {
            status: FilterStatus::Inactive,
            ..Default::default()
        };
        let stats = compute_dashboard_stats(
            &persons,
            &[],
            &[],
            &filters,
            &DemographicsConfig::default(),
            &GeoConfig::default(),
            today,
        );
        assert_eq!(stats.total_persons, 1);
        assert_eq!(stats.active_persons, 0);
    }

    #[test]
    fn empty_input_yields_floored_scaling_values() {
        let today = NaiveDate::from_ymd_opt(2026, 8, 1).unwrap();
        let stats = compute_dashboard_stats(
            &[],
            &[],
            &[],
            &DashboardFilters::default(),
            &DemographicsConfig::default(),
            &GeoConfig::default(),
            today,
        );
        assert!(stats.is_empty);
        assert_eq!(stats.percent_in_service, 0);
        assert_eq!(stats.max_count, 1);
        assert_eq!(stats.max_postal_code_count, 1);
    }
}
