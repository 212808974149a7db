//! Refraction inputs as entered in the form.
//!
//! Sphere and cylinder are kept as the raw text the user typed: parsing only
//! happens when an estimate is requested, and the share link must carry the
//! original strings untouched.

use std::fmt;
use std::ops::RangeInclusive;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Suggested sphere range in dioptres. Values outside it are still accepted.
pub const SPHERE_RANGE: RangeInclusive<f64> = -20.0..=10.0;

/// Suggested cylinder range in dioptres (minus-cylinder convention).
pub const CYLINDER_RANGE: RangeInclusive<f64> = -6.0..=0.0;

/// Step between suggested option values.
pub const DIOPTER_STEP: f64 = 0.25;

/// Which eye a set of fields belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Eye {
    Right,
    Left,
}

impl Eye {
    /// Report order: right eye first.
    pub const BOTH: [Eye; 2] = [Eye::Right, Eye::Left];

    /// Heading used in the report and on the page.
    pub fn label(self) -> &'static str {
        match self {
            Eye::Right => "右目",
            Eye::Left => "左目",
        }
    }
}

/// Astigmatism axis in degrees.
///
/// Collected for reference only; no estimate depends on it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "u16", into = "u16")]
pub enum Axis {
    Deg0,
    Deg45,
    Deg90,
    Deg135,
    #[default]
    Deg180,
}

impl Axis {
    pub const ALL: [Axis; 5] = [
        Axis::Deg0,
        Axis::Deg45,
        Axis::Deg90,
        Axis::Deg135,
        Axis::Deg180,
    ];

    pub fn degrees(self) -> u16 {
        match self {
            Axis::Deg0 => 0,
            Axis::Deg45 => 45,
            Axis::Deg90 => 90,
            Axis::Deg135 => 135,
            Axis::Deg180 => 180,
        }
    }
}

/// Axis value outside the supported set.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("axis must be one of 0, 45, 90, 135 or 180 (got '{0}')")]
pub struct InvalidAxis(pub String);

impl TryFrom<u16> for Axis {
    type Error = InvalidAxis;

    fn try_from(degrees: u16) -> Result<Self, Self::Error> {
        Axis::ALL
            .into_iter()
            .find(|axis| axis.degrees() == degrees)
            .ok_or_else(|| InvalidAxis(degrees.to_string()))
    }
}

impl From<Axis> for u16 {
    fn from(axis: Axis) -> Self {
        axis.degrees()
    }
}

impl FromStr for Axis {
    type Err = InvalidAxis;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let degrees: u16 = s.trim().parse().map_err(|_| InvalidAxis(s.to_string()))?;
        Axis::try_from(degrees)
    }
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.degrees())
    }
}

/// One of the four fields that feed the estimate, in report order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    RightSphere,
    RightCylinder,
    LeftSphere,
    LeftCylinder,
}

impl Field {
    pub const ALL: [Field; 4] = [
        Field::RightSphere,
        Field::RightCylinder,
        Field::LeftSphere,
        Field::LeftCylinder,
    ];

    /// Query-string key used by share links.
    pub fn query_key(self) -> &'static str {
        match self {
            Field::RightSphere => "rs",
            Field::RightCylinder => "rc",
            Field::LeftSphere => "ls",
            Field::LeftCylinder => "lc",
        }
    }

    pub fn eye(self) -> Eye {
        match self {
            Field::RightSphere | Field::RightCylinder => Eye::Right,
            Field::LeftSphere | Field::LeftCylinder => Eye::Left,
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.query_key())
    }
}

/// Raw field text for one eye.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RefractionInput {
    pub sphere: String,
    pub cylinder: String,
    #[serde(default)]
    pub axis: Axis,
}

impl RefractionInput {
    pub fn new(sphere: impl Into<String>, cylinder: impl Into<String>) -> Self {
        Self {
            sphere: sphere.into(),
            cylinder: cylinder.into(),
            axis: Axis::default(),
        }
    }

    pub fn with_axis(mut self, axis: Axis) -> Self {
        self.axis = axis;
        self
    }
}
