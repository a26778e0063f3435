//! Habitat shell geometry: volume and usable floor area per shape preset.
//!
//! A habitat shell is one of four presets, each sized by two length
//! parameters. What the parameters mean depends on the preset:
//!
//! | Kind | primary | secondary |
//! |------|---------|-----------|
//! | cylinder | diameter | length |
//! | sphere | diameter | (unused) |
//! | ellipsoid | equatorial diameter | polar diameter |
//! | box | width | depth |
//!
//! Floor areas for `sphere` and `ellipsoid` are design approximations, not
//! physical floors: the sphere uses its great circle, the ellipsoid the
//! ellipse spanned by one equatorial and the polar semi-axis. Downstream
//! rule thresholds are calibrated against exactly these formulas.
//!
//! ```
//! use hablayout_logic::shape::{compute_geometry, ShapeDescriptor, ShapeKind};
//!
//! let shape = ShapeDescriptor::new(ShapeKind::Box, 4.0, 6.0).unwrap();
//! let g = compute_geometry(&shape).unwrap();
//! assert_eq!(g.floor_area, 24.0);
//! assert_eq!(g.volume, 60.0);
//! ```

use std::f64::consts::PI;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::constants::CEILING_HEIGHT_M;
use crate::error::{Dimension, LayoutError, Result};

/// Habitat shell preset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum ShapeKind {
    Cylinder,
    Sphere,
    Ellipsoid,
    Box,
}

impl ShapeKind {
    /// All presets, in the order a shape picker lists them.
    pub fn all() -> &'static [ShapeKind] {
        &[Self::Cylinder, Self::Sphere, Self::Ellipsoid, Self::Box]
    }

    /// Lowercase wire tag, as used in layout files and exports.
    pub fn tag(&self) -> &'static str {
        match self {
            Self::Cylinder => "cylinder",
            Self::Sphere => "sphere",
            Self::Ellipsoid => "ellipsoid",
            Self::Box => "box",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Cylinder => "Cylinder",
            Self::Sphere => "Sphere",
            Self::Ellipsoid => "Ellipsoid",
            Self::Box => "Box",
        }
    }

    /// What the primary and secondary dimensions measure for this preset.
    pub fn dimension_labels(&self) -> (&'static str, &'static str) {
        match self {
            Self::Cylinder => ("diameter", "length"),
            Self::Sphere => ("diameter", "unused"),
            Self::Ellipsoid => ("equatorial diameter", "polar diameter"),
            Self::Box => ("width", "depth"),
        }
    }

    /// Starting dimensions offered when the preset is picked.
    pub fn preset(&self) -> ShapeDescriptor {
        let (primary_dimension, secondary_dimension) = match self {
            Self::Cylinder => (6.0, 8.0),
            Self::Sphere => (8.0, 8.0),
            Self::Ellipsoid => (8.0, 12.0),
            Self::Box => (4.0, 6.0),
        };
        ShapeDescriptor {
            kind: *self,
            primary_dimension,
            secondary_dimension,
        }
    }
}

impl fmt::Display for ShapeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

impl FromStr for ShapeKind {
    type Err = LayoutError;

    fn from_str(s: &str) -> Result<Self> {
        Self::all()
            .iter()
            .copied()
            .find(|k| k.tag() == s)
            .ok_or_else(|| LayoutError::InvalidShapeKind(s.to_string()))
    }
}

impl TryFrom<String> for ShapeKind {
    type Error = LayoutError;

    fn try_from(s: String) -> Result<Self> {
        s.parse()
    }
}

impl From<ShapeKind> for String {
    fn from(kind: ShapeKind) -> Self {
        kind.tag().to_string()
    }
}

/// A habitat shell: preset kind plus its two length parameters (meters).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShapeDescriptor {
    pub kind: ShapeKind,
    pub primary_dimension: f64,
    pub secondary_dimension: f64,
}

impl ShapeDescriptor {
    /// Build a descriptor, rejecting non-positive dimensions.
    pub fn new(kind: ShapeKind, primary_dimension: f64, secondary_dimension: f64) -> Result<Self> {
        let shape = Self {
            kind,
            primary_dimension,
            secondary_dimension,
        };
        shape.validate()?;
        Ok(shape)
    }

    /// Build a descriptor from a wire tag such as `"cylinder"`.
    pub fn from_tag(tag: &str, primary_dimension: f64, secondary_dimension: f64) -> Result<Self> {
        Self::new(tag.parse()?, primary_dimension, secondary_dimension)
    }

    /// Both dimensions must be finite and strictly positive.
    pub fn validate(&self) -> Result<()> {
        check_dimension(Dimension::Primary, self.primary_dimension)?;
        check_dimension(Dimension::Secondary, self.secondary_dimension)
    }
}

fn check_dimension(dimension: Dimension, value: f64) -> Result<()> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(LayoutError::InvalidDimension { dimension, value })
    }
}

/// Derived shell figures.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Geometry {
    /// Enclosed volume in m³.
    pub volume: f64,
    /// Usable floor area in m², the capacity ceiling for zones.
    pub floor_area: f64,
}

pub fn compute_volume(shape: &ShapeDescriptor) -> Result<f64> {
    shape.validate()?;
    let p = shape.primary_dimension;
    let s = shape.secondary_dimension;
    let volume = match shape.kind {
        ShapeKind::Cylinder => {
            let r = p / 2.0;
            PI * r * r * s
        }
        ShapeKind::Sphere => {
            let r = p / 2.0;
            4.0 / 3.0 * PI * r * r * r
        }
        ShapeKind::Ellipsoid => {
            let a = p / 2.0;
            let c = s / 2.0;
            4.0 / 3.0 * PI * a * a * c
        }
        ShapeKind::Box => p * s * CEILING_HEIGHT_M,
    };
    Ok(volume)
}

pub fn compute_floor_area(shape: &ShapeDescriptor) -> Result<f64> {
    shape.validate()?;
    let p = shape.primary_dimension;
    let s = shape.secondary_dimension;
    let area = match shape.kind {
        // Cylinder floor is its circular cross-section; sphere uses the
        // great circle.
        ShapeKind::Cylinder | ShapeKind::Sphere => {
            let r = p / 2.0;
            PI * r * r
        }
        // Mixes one equatorial with the polar semi-axis; keep as is.
        ShapeKind::Ellipsoid => PI * (p / 2.0) * (s / 2.0),
        ShapeKind::Box => p * s,
    };
    Ok(area)
}

/// Volume and floor area in one call.
pub fn compute_geometry(shape: &ShapeDescriptor) -> Result<Geometry> {
    Ok(Geometry {
        volume: compute_volume(shape)?,
        floor_area: compute_floor_area(shape)?,
    })
}
