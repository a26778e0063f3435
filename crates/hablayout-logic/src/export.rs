//! One-shot JSON export of a layout and its derived figures.
//!
//! ```json
//! {
//!   "shape": "cylinder",
//!   "dimensions": { "w": 6.0, "h": 8.0 },
//!   "crew": 4,
//!   "missionDays": 180,
//!   "zones": [{ "id": 1, "name": "Sleep", "area": 8.0 }],
//!   "totalArea": 28.274333882308138,
//!   "volume": 226.1946710584651
//! }
//! ```
//!
//! `totalArea` is the habitat's usable floor area, not the sum of zones.

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::layout::HabitatLayout;
use crate::rules::Zone;
use crate::shape::{compute_geometry, ShapeKind};

/// Primary and secondary shape dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Dimensions {
    pub w: f64,
    pub h: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportDocument {
    pub shape: ShapeKind,
    pub dimensions: Dimensions,
    pub crew: u32,
    pub mission_days: u32,
    pub zones: Vec<Zone>,
    pub total_area: f64,
    pub volume: f64,
}

impl ExportDocument {
    /// Snapshot a layout. Fails if its shape or mission is invalid; never
    /// exports figures that evaluation would refuse.
    pub fn from_layout(layout: &HabitatLayout) -> Result<Self> {
        layout.mission.validate()?;
        let geometry = compute_geometry(&layout.shape)?;
        Ok(Self {
            shape: layout.shape.kind,
            dimensions: Dimensions {
                w: layout.shape.primary_dimension,
                h: layout.shape.secondary_dimension,
            },
            crew: layout.mission.crew_size,
            mission_days: layout.mission.mission_days,
            zones: layout.zones.clone(),
            total_area: geometry.floor_area,
            volume: geometry.volume,
        })
    }

    pub fn to_json_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
