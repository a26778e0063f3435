//! Editable habitat layout: the model a layout editor holds between edits.
//!
//! The user configures a shell, crew and mission length, and a list of
//! zones; after every edit the editor calls [`HabitatLayout::evaluate`] to
//! recompute geometry and the rule report. This module provides the data
//! model, edit operations and validation, independent of any UI framework.
//!
//! Shape and mission are replaced wholesale. A rejected replacement leaves
//! the previous value in place, so the last-known-good figures stay valid.
//!
//! ```
//! use hablayout_logic::layout::{validate_layout, HabitatLayout};
//!
//! let mut layout = HabitatLayout::default();
//! let id = layout.add_zone("Lab", 2.0).unwrap();
//! layout.resize_zone(id, 3.0).unwrap();
//! assert!(validate_layout(&layout).is_empty());
//! let report = layout.evaluate().unwrap();
//! assert_eq!(report.checks.len(), hablayout_logic::constants::RULES.len() + 1);
//! ```

use serde::{Deserialize, Serialize};

use crate::constants::zone_names;
use crate::error::{LayoutError, Result};
use crate::rules::{
    check_zone_area, evaluate, summarize, CheckResult, MissionContext, ReportSummary, Zone,
};
use crate::shape::{compute_geometry, Geometry, ShapeDescriptor, ShapeKind};

/// User-editable habitat layout.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct HabitatLayout {
    pub shape: ShapeDescriptor,
    pub mission: MissionContext,
    /// Zones in display order.
    pub zones: Vec<Zone>,
    /// Next id handed out by `add_zone`. Ids are never reused.
    pub next_zone_id: u32,
}

impl Default for HabitatLayout {
    fn default() -> Self {
        let zones = vec![
            Zone::new(1, zone_names::SLEEP, 8.0),
            Zone::new(2, zone_names::GALLEY, 4.0),
            Zone::new(3, zone_names::HYGIENE, 3.0),
            Zone::new(4, zone_names::EXERCISE, 5.0),
            Zone::new(5, zone_names::ECLSS, 4.0),
        ];
        Self {
            shape: ShapeKind::Cylinder.preset(),
            mission: MissionContext {
                crew_size: 4,
                mission_days: 180,
            },
            next_zone_id: zones.len() as u32 + 1,
            zones,
        }
    }
}

/// Geometry plus rule checks for one layout state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LayoutReport {
    pub geometry: Geometry,
    pub checks: Vec<CheckResult>,
    pub summary: ReportSummary,
}

impl HabitatLayout {
    pub fn zone(&self, id: u32) -> Option<&Zone> {
        self.zones.iter().find(|z| z.id == id)
    }

    /// Append a zone and return its new id.
    pub fn add_zone(&mut self, name: impl Into<String>, area_m2: f64) -> Result<u32> {
        let name = name.into();
        check_zone_name(&name)?;
        check_zone_area(area_m2)?;

        // Loaded layouts may carry a stale counter.
        let max_id = self.zones.iter().map(|z| z.id).max().unwrap_or(0);
        let exhausted = || LayoutError::InvalidZone("zone id space exhausted".into());
        let id = self.next_zone_id.max(max_id.checked_add(1).ok_or_else(exhausted)?);
        self.next_zone_id = id.checked_add(1).ok_or_else(exhausted)?;

        log::debug!("Added zone #{} {:?} ({:.1} m²)", id, name, area_m2);
        self.zones.push(Zone::new(id, name, area_m2));
        Ok(id)
    }

    pub fn rename_zone(&mut self, id: u32, name: impl Into<String>) -> Result<()> {
        let name = name.into();
        check_zone_name(&name)?;
        let zone = self.zone_mut(id)?;
        zone.name = name;
        Ok(())
    }

    pub fn resize_zone(&mut self, id: u32, area_m2: f64) -> Result<()> {
        check_zone_area(area_m2)?;
        self.zone_mut(id)?.area_m2 = area_m2;
        Ok(())
    }

    /// Remove a zone, keeping the order of the rest.
    pub fn remove_zone(&mut self, id: u32) -> Result<Zone> {
        let idx = self
            .zones
            .iter()
            .position(|z| z.id == id)
            .ok_or(LayoutError::UnknownZone(id))?;
        let zone = self.zones.remove(idx);
        log::debug!("Removed zone #{} {:?}", zone.id, zone.name);
        Ok(zone)
    }

    pub fn set_shape(&mut self, shape: ShapeDescriptor) -> Result<()> {
        if let Err(e) = shape.validate() {
            log::warn!("Kept previous shape: {}", e);
            return Err(e);
        }
        self.shape = shape;
        Ok(())
    }

    pub fn set_mission(&mut self, mission: MissionContext) -> Result<()> {
        if let Err(e) = mission.validate() {
            log::warn!("Kept previous mission: {}", e);
            return Err(e);
        }
        self.mission = mission;
        Ok(())
    }

    /// Recompute geometry, then evaluate zones against the floor area.
    pub fn evaluate(&self) -> Result<LayoutReport> {
        let geometry = compute_geometry(&self.shape)?;
        let checks = evaluate(&self.zones, &self.mission, geometry.floor_area)?;
        let summary = summarize(&checks);
        Ok(LayoutReport {
            geometry,
            checks,
            summary,
        })
    }

    fn zone_mut(&mut self, id: u32) -> Result<&mut Zone> {
        self.zones
            .iter_mut()
            .find(|z| z.id == id)
            .ok_or(LayoutError::UnknownZone(id))
    }
}

fn check_zone_name(name: &str) -> Result<()> {
    if name.trim().is_empty() {
        return Err(LayoutError::InvalidZone("name is empty".into()));
    }
    Ok(())
}

/// Validate a whole layout, returning every problem found.
pub fn validate_layout(layout: &HabitatLayout) -> Vec<LayoutError> {
    let mut errors = Vec::new();

    if let Err(e) = layout.shape.validate() {
        errors.push(e);
    }
    if let Err(e) = layout.mission.validate() {
        errors.push(e);
    }

    let mut seen = std::collections::HashSet::new();
    for z in &layout.zones {
        if !seen.insert(z.id) {
            errors.push(LayoutError::InvalidZone(format!("duplicate id {}", z.id)));
        }
        if let Err(LayoutError::InvalidZone(msg)) = check_zone_name(&z.name) {
            errors.push(LayoutError::InvalidZone(format!("zone #{}: {msg}", z.id)));
        }
        if let Err(LayoutError::InvalidZone(msg)) = check_zone_area(z.area_m2) {
            errors.push(LayoutError::InvalidZone(format!("zone #{}: {msg}", z.id)));
        }
    }

    errors
}
