//! Built-in tables for the 2024 US presidential contest.
//!
//! These are defaults, not constants baked into the model: the configuration
//! can replace any of them, and tests substitute toy maps.

use electcast_core::ElectoralMap;
use electcast_model::AssumptionOverlay;
use std::collections::BTreeMap;

/// Electoral-vote allocations, split-vote district seats included. Sums to
/// 538; the total is still validated at startup like any configured table.
#[must_use]
pub fn electoral_map() -> ElectoralMap {
    ElectoralMap::from_iter([
        ("Alabama", 9u32),
        ("Alaska", 3),
        ("Arizona", 11),
        ("Arkansas", 6),
        ("California", 54),
        ("Colorado", 10),
        ("Connecticut", 7),
        ("Delaware", 3),
        ("District of Columbia", 3),
        ("Florida", 30),
        ("Georgia", 16),
        ("Hawaii", 4),
        ("Idaho", 4),
        ("Illinois", 19),
        ("Indiana", 11),
        ("Iowa", 6),
        ("Kansas", 6),
        ("Kentucky", 8),
        ("Louisiana", 8),
        ("Maine", 2),
        ("Maine CD-1", 1),
        ("Maine CD-2", 1),
        ("Maryland", 10),
        ("Massachusetts", 11),
        ("Michigan", 15),
        ("Minnesota", 10),
        ("Mississippi", 6),
        ("Missouri", 10),
        ("Montana", 4),
        ("Nebraska", 2),
        ("Nebraska CD-1", 1),
        ("Nebraska CD-2", 1),
        ("Nebraska CD-3", 1),
        ("Nevada", 6),
        ("New Hampshire", 4),
        ("New Jersey", 14),
        ("New Mexico", 5),
        ("New York", 28),
        ("North Carolina", 16),
        ("North Dakota", 3),
        ("Ohio", 17),
        ("Oklahoma", 7),
        ("Oregon", 8),
        ("Pennsylvania", 19),
        ("Rhode Island", 4),
        ("South Carolina", 9),
        ("South Dakota", 3),
        ("Tennessee", 11),
        ("Texas", 40),
        ("Utah", 6),
        ("Vermont", 3),
        ("Virginia", 13),
        ("Washington", 12),
        ("West Virginia", 4),
        ("Wisconsin", 10),
        ("Wyoming", 3),
    ])
}

/// Fixed support pairs for regions whose polling is too thin to aggregate.
#[must_use]
pub fn assumption_overlay() -> AssumptionOverlay {
    let mut overlay = AssumptionOverlay::new();
    overlay.insert("District of Columbia", 6.7, 90.0);
    overlay.insert("Hawaii", 30.7, 63.4);
    overlay.insert("Delaware", 39.77, 58.74);
    overlay.insert("Nebraska CD-2", 45.6, 52.4);
    overlay.insert("Nebraska CD-1", 56.4, 41.3);
    overlay.insert("Nebraska CD-3", 75.6, 22.4);
    overlay
}

/// Postal codes for statewide units; district seats have no code and render
/// with a blank column.
#[must_use]
pub fn region_codes() -> BTreeMap<&'static str, &'static str> {
    BTreeMap::from([
        ("Alabama", "AL"),
        ("Alaska", "AK"),
        ("Arizona", "AZ"),
        ("Arkansas", "AR"),
        ("California", "CA"),
        ("Colorado", "CO"),
        ("Connecticut", "CT"),
        ("Delaware", "DE"),
        ("District of Columbia", "DC"),
        ("Florida", "FL"),
        ("Georgia", "GA"),
        ("Hawaii", "HI"),
        ("Idaho", "ID"),
        ("Illinois", "IL"),
        ("Indiana", "IN"),
        ("Iowa", "IA"),
        ("Kansas", "KS"),
        ("Kentucky", "KY"),
        ("Louisiana", "LA"),
        ("Maine", "ME"),
        ("Maryland", "MD"),
        ("Massachusetts", "MA"),
        ("Michigan", "MI"),
        ("Minnesota", "MN"),
        ("Mississippi", "MS"),
        ("Missouri", "MO"),
        ("Montana", "MT"),
        ("Nebraska", "NE"),
        ("Nevada", "NV"),
        ("New Hampshire", "NH"),
        ("New Jersey", "NJ"),
        ("New Mexico", "NM"),
        ("New York", "NY"),
        ("North Carolina", "NC"),
        ("North Dakota", "ND"),
        ("Ohio", "OH"),
        ("Oklahoma", "OK"),
        ("Oregon", "OR"),
        ("Pennsylvania", "PA"),
        ("Rhode Island", "RI"),
        ("South Carolina", "SC"),
        ("South Dakota", "SD"),
        ("Tennessee", "TN"),
        ("Texas", "TX"),
        ("Utah", "UT"),
        ("Vermont", "VT"),
        ("Virginia", "VA"),
        ("Washington", "WA"),
        ("West Virginia", "WV"),
        ("Wisconsin", "WI"),
        ("Wyoming", "WY"),
    ])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn preset_map_sums_to_538() {
        let map = electoral_map();

        assert_eq!(map.total(), 538);
        assert!(map.validate_total(538).is_ok());
        assert_eq!(map.majority_threshold(), 270);
    }

    #[test]
    fn split_vote_states_carry_statewide_and_district_seats() {
        let map = electoral_map();

        assert_eq!(map.votes("Maine"), Some(2));
        assert_eq!(map.votes("Maine CD-1"), Some(1));
        assert_eq!(map.votes("Maine CD-2"), Some(1));
        assert_eq!(map.votes("Nebraska"), Some(2));
        assert_eq!(map.votes("Nebraska CD-3"), Some(1));
    }

    #[test]
    fn overlay_regions_all_have_vote_allocations() {
        let map = electoral_map();
        let overlay = assumption_overlay();

        for region in overlay.regions() {
            assert!(map.contains(region), "overlay region {region} not in map");
        }
    }
}
