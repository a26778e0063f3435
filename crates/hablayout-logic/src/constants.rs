//! Layout constants: zone names, the minimum-area rule table, fixed
//! geometric assumptions.
//!
//! The rule table is in-process configuration, not user data. Its order is
//! the order of the evaluation report.

use crate::rules::{Requirement, RuleSpec};

/// Assumed interior ceiling height for `box` habitats, in meters.
pub const CEILING_HEIGHT_M: f64 = 2.5;

/// Length of one resupply period for `PerCrewPer30Days` rules.
pub const DAYS_PER_PERIOD: f64 = 30.0;

pub mod zone_names {
    pub const SLEEP: &str = "Sleep";
    pub const GALLEY: &str = "Galley";
    pub const HYGIENE: &str = "Hygiene";
    pub const EXERCISE: &str = "Exercise";
    pub const MEDICAL: &str = "Medical";
    pub const STORAGE: &str = "Storage";
    pub const ECLSS: &str = "ECLSS";
}

/// Minimum-area rules, in report order.
pub const RULES: &[RuleSpec] = &[
    // 4 m² private sleep quarters per crew member
    RuleSpec {
        zone: zone_names::SLEEP,
        requirement: Requirement::PerCrew(4.0),
    },
    RuleSpec {
        zone: zone_names::GALLEY,
        requirement: Requirement::PerCrew(1.5),
    },
    RuleSpec {
        zone: zone_names::HYGIENE,
        requirement: Requirement::PerCrew(1.0),
    },
    RuleSpec {
        zone: zone_names::EXERCISE,
        requirement: Requirement::FixedMinimum(5.0),
    },
    RuleSpec {
        zone: zone_names::MEDICAL,
        requirement: Requirement::FixedMinimum(3.0),
    },
    // consumables scale with crew and mission length
    RuleSpec {
        zone: zone_names::STORAGE,
        requirement: Requirement::PerCrewPer30Days(0.25),
    },
    RuleSpec {
        zone: zone_names::ECLSS,
        requirement: Requirement::FixedMinimum(4.0),
    },
];

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn rule_zone_names_are_unique() {
        let names: HashSet<&str> = RULES.iter().map(|r| r.zone).collect();
        assert_eq!(names.len(), RULES.len());
    }

    #[test]
    fn rule_rates_are_positive() {
        for rule in RULES {
            let rate = match rule.requirement {
                Requirement::PerCrew(r)
                | Requirement::PerCrewPer30Days(r)
                | Requirement::FixedMinimum(r) => r,
            };
            assert!(rate > 0.0, "{} has non-positive rate", rule.zone);
        }
    }

    #[test]
    fn table_covers_every_requirement_form() {
        assert!(RULES
            .iter()
            .any(|r| matches!(r.requirement, Requirement::PerCrew(_))));
        assert!(RULES
            .iter()
            .any(|r| matches!(r.requirement, Requirement::PerCrewPer30Days(_))));
        assert!(RULES
            .iter()
            .any(|r| matches!(r.requirement, Requirement::FixedMinimum(_))));
    }
}
