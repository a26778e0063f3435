//! Zone rule evaluation: minimum-area checks against crew and mission.
//!
//! Takes the ordered zone list, the mission context and the habitat floor
//! area, and produces one [`CheckResult`] per rule in table order, followed
//! by a single aggregate check of total zone area against floor area.
//!
//! Zones are matched to rules by name. Duplicate names shadow each other:
//! the last zone with a given name is the one a rule sees. The aggregate
//! check still sums every zone.
//!
//! ```
//! use hablayout_logic::rules::{evaluate, MissionContext, Zone};
//!
//! let zones = vec![Zone::new(1, "Sleep", 6.0), Zone::new(2, "ECLSS", 4.0)];
//! let checks = evaluate(&zones, &MissionContext::new(4, 180).unwrap(), 28.27).unwrap();
//! assert!(!checks[0].ok); // Sleep needs 16 m² for four crew
//! assert!(checks.last().unwrap().ok);
//! ```

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::constants::{DAYS_PER_PERIOD, RULES};
use crate::error::{LayoutError, Result};

/// A named functional area with an assigned floor area.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Zone {
    /// Stable identity, survives renames and resizes.
    pub id: u32,
    pub name: String,
    /// Floor area in m².
    #[serde(rename = "area", alias = "areaM2")]
    pub area_m2: f64,
}

impl Zone {
    pub fn new(id: u32, name: impl Into<String>, area_m2: f64) -> Self {
        Self {
            id,
            name: name.into(),
            area_m2,
        }
    }
}

/// Crew size and mission length in days. Both must be at least 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MissionContext {
    pub crew_size: u32,
    pub mission_days: u32,
}

impl MissionContext {
    pub fn new(crew_size: u32, mission_days: u32) -> Result<Self> {
        let mission = Self {
            crew_size,
            mission_days,
        };
        mission.validate()?;
        Ok(mission)
    }

    pub fn validate(&self) -> Result<()> {
        if self.crew_size == 0 || self.mission_days == 0 {
            return Err(LayoutError::InvalidMissionContext {
                crew_size: self.crew_size,
                mission_days: self.mission_days,
            });
        }
        Ok(())
    }
}

/// How a rule's minimum area is derived.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Requirement {
    /// `rate` m² per crew member.
    PerCrew(f64),
    /// `rate` m² per crew member per 30 mission days.
    PerCrewPer30Days(f64),
    /// Flat minimum regardless of crew or mission.
    FixedMinimum(f64),
}

impl Requirement {
    /// Minimum area in m² for the given mission.
    pub fn required_area(&self, mission: &MissionContext) -> f64 {
        let crew = mission.crew_size as f64;
        match *self {
            Self::PerCrew(rate) => rate * crew,
            Self::PerCrewPer30Days(rate) => {
                let days = mission.mission_days.max(1) as f64;
                rate * crew * days / DAYS_PER_PERIOD
            }
            Self::FixedMinimum(value) => value,
        }
    }
}

/// One entry of the rule table.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RuleSpec {
    /// Zone name the rule applies to.
    pub zone: &'static str,
    pub requirement: Requirement,
}

/// A pass/fail verdict with a human-readable explanation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckResult {
    pub ok: bool,
    pub message: String,
}

/// Pass/fail counts over a report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportSummary {
    pub passed: usize,
    pub failed: usize,
}

impl ReportSummary {
    pub fn all_ok(&self) -> bool {
        self.failed == 0
    }
}

/// Evaluate zones against the built-in rule table.
pub fn evaluate(
    zones: &[Zone],
    mission: &MissionContext,
    floor_area: f64,
) -> Result<Vec<CheckResult>> {
    evaluate_rules(RULES, zones, mission, floor_area)
}

/// Evaluate zones against an explicit rule table.
///
/// Output holds `rules.len() + 1` results: the rule checks in table order,
/// then the floor-area check.
pub fn evaluate_rules(
    rules: &[RuleSpec],
    zones: &[Zone],
    mission: &MissionContext,
    floor_area: f64,
) -> Result<Vec<CheckResult>> {
    if let Err(e) = check_inputs(zones, mission, floor_area) {
        log::warn!("Rejected rule evaluation: {}", e);
        return Err(e);
    }

    // Later zones overwrite earlier ones with the same name.
    let mut by_name: HashMap<&str, &Zone> = HashMap::with_capacity(zones.len());
    for z in zones {
        by_name.insert(z.name.as_str(), z);
    }

    let mut results = Vec::with_capacity(rules.len() + 1);
    for rule in rules {
        let Some(zone) = by_name.get(rule.zone) else {
            results.push(CheckResult {
                ok: false,
                message: format!("Missing zone: {}", rule.zone),
            });
            continue;
        };

        let required = rule.requirement.required_area(mission);
        let actual = zone.area_m2;
        results.push(if actual < required {
            CheckResult {
                ok: false,
                message: format!(
                    "{}: {:.1} m² is below required {:.1} m²",
                    rule.zone, actual, required
                ),
            }
        } else {
            CheckResult {
                ok: true,
                message: format!(
                    "{}: {:.1} m² meets required {:.1} m²",
                    rule.zone, actual, required
                ),
            }
        });
    }

    let total = total_zone_area(zones);
    results.push(if total > floor_area {
        CheckResult {
            ok: false,
            message: format!(
                "Total zone area {:.1} m² exceeds floor area {:.1} m²",
                total, floor_area
            ),
        }
    } else {
        CheckResult {
            ok: true,
            message: format!(
                "Total zone area {:.1} m² fits within floor area {:.1} m²",
                total, floor_area
            ),
        }
    });

    log::debug!(
        "Evaluated {} zones against {} rules: crew={}, days={}, floor={:.1}",
        zones.len(),
        rules.len(),
        mission.crew_size,
        mission.mission_days,
        floor_area
    );

    Ok(results)
}

fn check_inputs(zones: &[Zone], mission: &MissionContext, floor_area: f64) -> Result<()> {
    mission.validate()?;
    if !floor_area.is_finite() || floor_area < 0.0 {
        return Err(LayoutError::InvalidFloorArea(floor_area));
    }
    for z in zones {
        if let Err(LayoutError::InvalidZone(msg)) = check_zone_area(z.area_m2) {
            return Err(LayoutError::InvalidZone(format!("zone #{}: {msg}", z.id)));
        }
    }
    Ok(())
}

/// Zone areas must be finite and non-negative.
pub(crate) fn check_zone_area(area_m2: f64) -> Result<()> {
    if !area_m2.is_finite() || area_m2 < 0.0 {
        return Err(LayoutError::InvalidZone(format!("area {area_m2} m²")));
    }
    Ok(())
}

/// Sum of every zone's area, matched to a rule or not.
pub fn total_zone_area(zones: &[Zone]) -> f64 {
    zones.iter().map(|z| z.area_m2).sum()
}

pub fn summarize(results: &[CheckResult]) -> ReportSummary {
    let passed = results.iter().filter(|r| r.ok).count();
    ReportSummary {
        passed,
        failed: results.len() - passed,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::zone_names;

    fn mission(crew: u32, days: u32) -> MissionContext {
        MissionContext::new(crew, days).unwrap()
    }

    fn result_for<'a>(results: &'a [CheckResult], zone: &str) -> &'a CheckResult {
        let idx = RULES.iter().position(|r| r.zone == zone).unwrap();
        &results[idx]
    }

    #[test]
    fn one_result_per_rule_plus_aggregate() {
        let results = evaluate(&[], &mission(4, 180), 28.27).unwrap();
        assert_eq!(results.len(), RULES.len() + 1);
        for (rule, r) in RULES.iter().zip(&results) {
            assert!(!r.ok);
            assert_eq!(r.message, format!("Missing zone: {}", rule.zone));
        }
        // empty layout trivially fits
        assert!(results.last().unwrap().ok);
    }

    #[test]
    fn sleep_and_eclss_reference_case() {
        let zones = vec![Zone::new(1, "Sleep", 6.0), Zone::new(2, "ECLSS", 4.0)];
        let results = evaluate(&zones, &mission(4, 180), 28.27).unwrap();

        let sleep = result_for(&results, zone_names::SLEEP);
        assert!(!sleep.ok);
        assert!(sleep.message.contains("6.0"));
        assert!(sleep.message.contains("16.0"));

        let eclss = result_for(&results, zone_names::ECLSS);
        assert!(eclss.ok, "{}", eclss.message);
        assert_eq!(eclss.message, "ECLSS: 4.0 m² meets required 4.0 m²");
    }

    #[test]
    fn missing_zone_reported_once_and_evaluation_continues() {
        let zones = vec![Zone::new(1, "Sleep", 20.0)];
        let results = evaluate(&zones, &mission(4, 30), 100.0).unwrap();
        let missing_galley = results
            .iter()
            .filter(|r| r.message == "Missing zone: Galley")
            .count();
        assert_eq!(missing_galley, 1);
        assert!(result_for(&results, zone_names::SLEEP).ok);
        assert!(results.last().unwrap().message.starts_with("Total zone area"));
    }

    #[test]
    fn aggregate_fails_when_zones_exceed_floor() {
        let zones = vec![
            Zone::new(1, "Sleep", 16.0),
            Zone::new(2, "ECLSS", 4.0),
            Zone::new(3, "Lab", 10.0),
        ];
        let results = evaluate(&zones, &mission(4, 180), 28.27).unwrap();
        let aggregate = results.last().unwrap();
        assert!(!aggregate.ok);
        assert_eq!(
            aggregate.message,
            "Total zone area 30.0 m² exceeds floor area 28.3 m²"
        );
    }

    #[test]
    fn aggregate_passes_at_exact_capacity() {
        let zones = vec![Zone::new(1, "Sleep", 24.0)];
        let results = evaluate(&zones, &mission(1, 1), 24.0).unwrap();
        assert!(results.last().unwrap().ok);
    }

    #[test]
    fn storage_scales_with_mission_length() {
        // 0.25 × 4 crew × 180 / 30 = 6.0
        let m = mission(4, 180);
        assert_eq!(Requirement::PerCrewPer30Days(0.25).required_area(&m), 6.0);

        let zones = vec![Zone::new(1, "Storage", 5.9)];
        let results = evaluate(&zones, &m, 100.0).unwrap();
        let storage = result_for(&results, zone_names::STORAGE);
        assert!(!storage.ok);
        assert!(storage.message.contains("required 6.0"));
    }

    #[test]
    fn requirement_forms() {
        let m = mission(3, 60);
        assert_eq!(Requirement::PerCrew(2.0).required_area(&m), 6.0);
        assert_eq!(Requirement::PerCrewPer30Days(1.0).required_area(&m), 6.0);
        assert_eq!(Requirement::FixedMinimum(7.5).required_area(&m), 7.5);
    }

    #[test]
    fn duplicate_names_last_one_wins() {
        let zones = vec![
            Zone::new(1, "Sleep", 20.0),
            Zone::new(2, "Sleep", 2.0),
        ];
        let results = evaluate(&zones, &mission(4, 30), 100.0).unwrap();
        let sleep = result_for(&results, zone_names::SLEEP);
        assert!(!sleep.ok);
        assert!(sleep.message.contains("2.0 m²"));
        // both zones still count toward the total
        assert!(results.last().unwrap().message.contains("22.0"));

        let reversed: Vec<Zone> = zones.into_iter().rev().collect();
        let results = evaluate(&reversed, &mission(4, 30), 100.0).unwrap();
        assert!(result_for(&results, zone_names::SLEEP).ok);
    }

    #[test]
    fn custom_rule_table_order_is_output_order() {
        let rules = [
            RuleSpec {
                zone: "B",
                requirement: Requirement::FixedMinimum(1.0),
            },
            RuleSpec {
                zone: "A",
                requirement: Requirement::FixedMinimum(1.0),
            },
        ];
        let zones = vec![Zone::new(1, "A", 1.0)];
        let results = evaluate_rules(&rules, &zones, &mission(1, 1), 10.0).unwrap();
        assert_eq!(results.len(), 3);
        assert_eq!(results[0].message, "Missing zone: B");
        assert!(results[1].ok);
    }

    #[test]
    fn evaluation_is_idempotent() {
        let zones = vec![
            Zone::new(1, "Sleep", 6.0),
            Zone::new(2, "Galley", 6.5),
            Zone::new(3, "ECLSS", 4.0),
        ];
        let m = mission(4, 180);
        let a = evaluate(&zones, &m, 28.27).unwrap();
        let b = evaluate(&zones, &m, 28.27).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn zero_crew_or_days_is_rejected() {
        let bad = MissionContext {
            crew_size: 0,
            mission_days: 180,
        };
        let err = evaluate(&[], &bad, 10.0).unwrap_err();
        assert!(matches!(
            err,
            LayoutError::InvalidMissionContext { crew_size: 0, .. }
        ));
        assert!(MissionContext::new(4, 0).is_err());
    }

    #[test]
    fn non_finite_or_negative_zone_area_is_rejected() {
        let m = mission(4, 180);
        for bad in [f64::NAN, f64::INFINITY, -1.0] {
            let zones = vec![Zone::new(1, "ECLSS", 4.0), Zone::new(2, "Sleep", bad)];
            let err = evaluate(&zones, &m, 28.27).unwrap_err();
            assert!(
                matches!(err, LayoutError::InvalidZone(ref msg) if msg.starts_with("zone #2")),
                "{bad}: {err}"
            );
        }
        // unmatched zones are checked too, since they count toward the total
        let zones = vec![Zone::new(3, "Lab", f64::NAN)];
        assert!(evaluate(&zones, &m, 28.27).is_err());
    }

    #[test]
    fn non_finite_floor_area_is_rejected() {
        let zones = vec![Zone::new(1, "Sleep", 16.0)];
        for bad in [f64::NAN, f64::INFINITY, -5.0] {
            assert!(matches!(
                evaluate(&zones, &mission(4, 180), bad),
                Err(LayoutError::InvalidFloorArea(_))
            ));
        }
    }

    #[test]
    fn summary_counts() {
        let zones = vec![Zone::new(1, "Sleep", 6.0), Zone::new(2, "ECLSS", 4.0)];
        let results = evaluate(&zones, &mission(4, 180), 28.27).unwrap();
        let summary = summarize(&results);
        // ECLSS and the aggregate pass; Sleep fails, five rules are missing
        assert_eq!(summary.passed, 2);
        assert_eq!(summary.failed, RULES.len() - 1);
        assert!(!summary.all_ok());
    }

    #[test]
    fn zone_area_serializes_as_area() {
        let json = serde_json::to_string(&Zone::new(7, "Lab", 3.5)).unwrap();
        assert_eq!(json, r#"{"id":7,"name":"Lab","area":3.5}"#);
        let z: Zone = serde_json::from_str(r#"{"id":1,"name":"Lab","areaM2":2.0}"#).unwrap();
        assert_eq!(z.area_m2, 2.0);
    }
}
