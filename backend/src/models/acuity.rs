//! Equivalent sphere and the acuity band table.

use serde::{Deserialize, Serialize};

/// Equivalent sphere in dioptres: `sphere + cylinder / 2`.
#[inline]
pub fn equivalent_sphere(sphere: f64, cylinder: f64) -> f64 {
    sphere + cylinder / 2.0
}

/// Coarse uncorrected visual acuity range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AcuityBand {
    From10To15Plus,
    From08To10,
    From06To08,
    From05To07,
    From03To05,
    From02To03,
    From01To02,
    Below01,
}

/// Inclusive lower SE bounds, checked top to bottom. Anything below the last
/// bound falls through to [`AcuityBand::Below01`].
pub const BAND_THRESHOLDS: [(f64, AcuityBand); 7] = [
    (-0.25, AcuityBand::From10To15Plus),
    (-0.50, AcuityBand::From08To10),
    (-0.75, AcuityBand::From06To08),
    (-1.00, AcuityBand::From05To07),
    (-1.50, AcuityBand::From03To05),
    (-2.00, AcuityBand::From02To03),
    (-3.00, AcuityBand::From01To02),
];

impl AcuityBand {
    /// First band whose lower bound the SE reaches.
    pub fn classify(se: f64) -> Self {
        BAND_THRESHOLDS
            .iter()
            .find(|(lower, _)| se >= *lower)
            .map(|(_, band)| *band)
            .unwrap_or(AcuityBand::Below01)
    }

    pub fn label(self) -> &'static str {
        match self {
            AcuityBand::From10To15Plus => "1.0〜1.5以上",
            AcuityBand::From08To10 => "0.8〜1.0",
            AcuityBand::From06To08 => "0.6〜0.8",
            AcuityBand::From05To07 => "0.5〜0.7",
            AcuityBand::From03To05 => "0.3〜0.5",
            AcuityBand::From02To03 => "0.2〜0.3",
            AcuityBand::From01To02 => "0.1〜0.2",
            AcuityBand::Below01 => "0.1未満",
        }
    }
}
