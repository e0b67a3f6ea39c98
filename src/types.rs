use std::collections::HashMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::locale;

/// Configuration stored in ~/.flokk/config.json
///
/// Every field has a serde default so a minimal (or absent) config file is
/// valid. The locale tables live here rather than in code paths: they are
/// data for one specific congregation's geography, not general algorithms.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    /// Override for the data directory. Defaults to ~/.flokk when unset.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data_dir: Option<String>,
    #[serde(default)]
    pub remote: RemoteConfig,
    #[serde(default)]
    pub demographics: DemographicsConfig,
    #[serde(default)]
    pub geo: GeoConfig,
}

/// Remote people/family API. Absent base URL means local-only mode.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RemoteConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,
    #[serde(default = "default_remote_timeout")]
    pub timeout_secs: u64,
}

fn default_remote_timeout() -> u64 {
    5
}

impl Default for RemoteConfig {
    fn default() -> Self {
        Self {
            base_url: None,
            timeout_secs: default_remote_timeout(),
        }
    }
}

/// Demographic heuristic tables (see stats::heuristics for the caveats).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DemographicsConfig {
    /// Known female first names, lowercase. The suffix rule in
    /// stats::heuristics handles everything not in this list.
    #[serde(default = "locale::default_female_first_names")]
    pub female_first_names: Vec<String>,
    /// Chart buckets for the demographics panel, top range first.
    #[serde(default = "locale::default_age_groups")]
    pub age_groups: Vec<AgeGroupDef>,
}

impl Default for DemographicsConfig {
    fn default() -> Self {
        Self {
            female_first_names: locale::default_female_first_names(),
            age_groups: locale::default_age_groups(),
        }
    }
}

/// One demographic chart bucket. Ranges are inclusive on both ends.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct AgeGroupDef {
    pub label: String,
    pub min: u32,
    pub max: u32,
}

/// Postal-code plot coordinates for the congregation's map panel.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeoConfig {
    /// Postal code → percentage-based plot position. Codes missing from this
    /// table are silently dropped from the map (a documented gap, not a bug).
    #[serde(default = "locale::default_geo_coords")]
    pub coords: HashMap<String, MapCoord>,
}

impl Default for GeoConfig {
    fn default() -> Self {
        Self {
            coords: locale::default_geo_coords(),
        }
    }
}

/// Percentage-based plot position on the map panel (0-100 on both axes).
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct MapCoord {
    pub x: f32,
    pub y: f32,
}

// =============================================================================
// Core entities
// =============================================================================

/// A registered person. Age is always derived (never stored); gender is not a
/// field at all — it is heuristically inferred from the first name where the
/// dashboard needs it.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Person {
    pub id: Uuid,
    pub first_name: String,
    pub last_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub social_security_number: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub birth_year: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub birth_date: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub street_address: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub postal_code: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    #[serde(default)]
    pub is_admin: bool,
    #[serde(default = "default_true")]
    pub is_active: bool,
    #[serde(default)]
    pub core_role: CoreRole,
}

fn default_true() -> bool {
    true
}

impl Person {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

/// Organization-wide role, independent of any group membership.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum CoreRole {
    Admin,
    Pastor,
    TeamLeader,
    #[default]
    Member,
    Guest,
}

/// A household. Families share the remote-write-or-degrade policy with Person.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Family {
    pub id: Uuid,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub street_address: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub postal_code: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    #[serde(default)]
    pub member_ids: Vec<Uuid>,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum GroupCategory {
    /// Volunteer/operational team (sound, hosting, kids, ...).
    Service,
    /// Home group / small group.
    Fellowship,
    /// Board and leadership.
    Strategy,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Group {
    pub id: Uuid,
    pub name: String,
    pub category: GroupCategory,
    #[serde(default)]
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gathering_pattern: Option<GatheringPattern>,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum GroupRole {
    Leader,
    Member,
}

/// Membership row linking a person to a group, optionally with the service
/// role they usually fill on that team.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct GroupMember {
    pub id: Uuid,
    pub group_id: Uuid,
    pub person_id: Uuid,
    pub role: GroupRole,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub service_role_id: Option<Uuid>,
}

/// A named duty (sound tech, host, ...) with its standing instructions.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ServiceRole {
    pub id: Uuid,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub default_instructions: Vec<String>,
    #[serde(default = "default_true")]
    pub is_active: bool,
}

/// Recurrence rule for a group's regular gatherings.
///
/// `day_of_week` is Sunday-first: 0 = Sunday .. 6 = Saturday, matching the
/// stored data. Invariants (`interval >= 1`, `day_of_week <= 6`) are enforced
/// at the projection boundary, not here.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct GatheringPattern {
    pub frequency_type: FrequencyType,
    pub interval: u32,
    pub day_of_week: u8,
    pub start_date: NaiveDate,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum FrequencyType {
    Weeks,
    Months,
}

/// Reusable event definition ("Sunday service", "Youth night").
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct EventTemplate {
    pub id: Uuid,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum OccurrenceStatus {
    #[default]
    Draft,
    Published,
    Cancelled,
}

/// One concrete calendar instance of an event. There is no strict identity
/// beyond the id; insertion paths only dedupe on (date, title_override).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct EventOccurrence {
    pub id: Uuid,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub template_id: Option<Uuid>,
    pub date: NaiveDate,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title_override: Option<String>,
    #[serde(default)]
    pub status: OccurrenceStatus,
}

/// A staffed slot on an occurrence. `person_id` is nullable so deleting a
/// person leaves the shift open instead of deleting it.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Assignment {
    pub id: Uuid,
    pub occurrence_id: Uuid,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub person_id: Option<Uuid>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub service_role_id: Option<Uuid>,
}

/// One line of an occurrence's run-of-show program.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ProgramItem {
    pub id: Uuid,
    pub occurrence_id: Uuid,
    pub order: u32,
    pub title: String,
    pub duration_minutes: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub person_id: Option<Uuid>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub service_role_id: Option<Uuid>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub group_id: Option<Uuid>,
}

/// A deadline-bearing todo, optionally tied to an occurrence.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub id: Uuid,
    pub title: String,
    pub deadline: NaiveDate,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub responsible_id: Option<Uuid>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub occurrence_id: Option<Uuid>,
}

// =============================================================================
// Dashboard filters + derived records
// =============================================================================

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum FilterStatus {
    #[default]
    All,
    Active,
    Inactive,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum FilterGender {
    #[default]
    All,
    Male,
    Female,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
pub enum FilterAgeGroup {
    #[default]
    #[serde(rename = "all")]
    All,
    #[serde(rename = "0-18")]
    Minor,
    #[serde(rename = "19-64")]
    Adult,
    #[serde(rename = "65+")]
    Senior,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct DashboardFilters {
    #[serde(default)]
    pub status: FilterStatus,
    #[serde(default)]
    pub gender: FilterGender,
    #[serde(default)]
    pub age_group: FilterAgeGroup,
}

/// One demographics chart bucket with its counts. Ephemeral — recomputed from
/// the current person set, never persisted.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct DemographicGroup {
    pub label: String,
    pub min: u32,
    pub max: u32,
    pub women: usize,
    pub men: usize,
    pub total: usize,
}

/// One weighted map marker. Ephemeral.
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct MapPoint {
    pub postal_code: String,
    pub count: usize,
    pub x: f32,
    pub y: f32,
}

/// Everything the dashboard panels need, computed in one pass.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardStats {
    pub total_persons: usize,
    pub active_persons: usize,
    pub persons_in_service: usize,
    pub percent_in_service: u32,
    pub postal_code_counts: std::collections::BTreeMap<String, usize>,
    pub map_points: Vec<MapPoint>,
    pub demographic_data: Vec<DemographicGroup>,
    /// Largest single bucket-gender count, floored at 1 for chart scaling.
    pub max_count: usize,
    /// Largest single postal-code count, floored at 1 for marker scaling.
    pub max_postal_code_count: usize,
    pub is_empty: bool,
}
