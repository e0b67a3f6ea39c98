//! Built-in locale data for the Kristiansand-area congregation this app was
//! first deployed for.
//!
//! These tables are serde defaults on the config types, not hard-wired into
//! the algorithms: another congregation swaps them out in config.json without
//! touching code. None of this is general-purpose geography or demographics.

use std::collections::HashMap;

use crate::types::{AgeGroupDef, MapCoord};

/// Percentage-based plot positions for postal codes in the Kristiansand area.
/// Codes not listed here never produce a map marker.
const GEO_COORDS: &[(&str, f32, f32)] = &[
    ("4600", 45.0, 40.0),
    ("4601", 46.0, 41.0),
    ("4602", 44.0, 39.0),
    ("4603", 47.0, 42.0),
    ("4604", 43.0, 38.0),
    ("4605", 48.0, 43.0),
    ("4608", 42.0, 45.0),
    ("4609", 41.0, 46.0),
    ("4610", 50.0, 50.0),
    ("4611", 49.0, 49.0),
    ("4612", 51.0, 51.0),
    ("4613", 48.0, 48.0),
    ("4614", 52.0, 52.0),
    ("4615", 47.0, 47.0),
    ("4616", 53.0, 53.0),
    ("4617", 46.0, 46.0),
    ("4618", 54.0, 54.0),
    ("4619", 45.0, 45.0),
    ("4620", 50.0, 50.0),
    ("4621", 45.0, 55.0),
    ("4622", 40.0, 50.0),
    ("4623", 55.0, 45.0),
    ("4624", 50.0, 40.0),
    ("4625", 50.0, 60.0),
    ("4626", 35.0, 50.0),
    ("4627", 60.0, 50.0),
    ("4628", 50.0, 35.0),
    ("4629", 50.0, 65.0),
    ("4630", 48.0, 52.0),
    ("4631", 49.0, 53.0),
    ("4632", 47.0, 51.0),
    ("4633", 50.0, 54.0),
    ("4634", 46.0, 50.0),
    ("4635", 51.0, 55.0),
    ("4636", 45.0, 49.0),
    ("4637", 52.0, 56.0),
    ("4638", 44.0, 48.0),
    ("4639", 53.0, 57.0),
    ("4640", 43.0, 47.0),
    ("4641", 42.0, 46.0),
    ("4642", 41.0, 45.0),
    ("4643", 40.0, 44.0),
    ("4644", 39.0, 43.0),
    ("4645", 38.0, 42.0),
    ("4660", 35.0, 60.0),
    ("4661", 36.0, 61.0),
    ("4662", 34.0, 59.0),
    ("4663", 37.0, 62.0),
    ("4664", 33.0, 58.0),
    ("4665", 38.0, 63.0),
    ("4670", 30.0, 65.0),
    ("4671", 31.0, 66.0),
    ("4672", 29.0, 64.0),
    ("4680", 25.0, 70.0),
    ("4681", 26.0, 71.0),
    ("4682", 24.0, 69.0),
    ("4683", 27.0, 72.0),
    ("4684", 23.0, 68.0),
    ("4685", 28.0, 73.0),
    ("4686", 22.0, 67.0),
    ("4687", 29.0, 74.0),
    ("4690", 20.0, 75.0),
    ("4691", 21.0, 76.0),
    ("4692", 19.0, 74.0),
    ("4693", 22.0, 77.0),
    ("4694", 18.0, 73.0),
    ("4695", 23.0, 78.0),
    ("4696", 17.0, 72.0),
    ("4697", 24.0, 79.0),
    ("4698", 16.0, 71.0),
    ("4699", 25.0, 80.0),
];

/// Female first names the suffix rule gets wrong (see stats::heuristics).
const FEMALE_FIRST_NAMES: &[&str] = &[
    "lise", "vigdis", "beate", "frida", "mille", "thea", "tiril",
];

pub fn default_geo_coords() -> HashMap<String, MapCoord> {
    GEO_COORDS
        .iter()
        .map(|&(code, x, y)| (code.to_string(), MapCoord { x, y }))
        .collect()
}

pub fn default_female_first_names() -> Vec<String> {
    FEMALE_FIRST_NAMES.iter().map(|s| s.to_string()).collect()
}

/// Demographics chart buckets, top range first. Disjoint, and together they
/// cover every non-negative age.
pub fn default_age_groups() -> Vec<AgeGroupDef> {
    [
        ("60+", 60, u32::MAX),
        ("40-60", 40, 59),
        ("20-40", 20, 39),
        ("0-20", 0, 19),
    ]
    .into_iter()
    .map(|(label, min, max)| AgeGroupDef {
        label: label.to_string(),
        min,
        max,
    })
    .collect()
}
