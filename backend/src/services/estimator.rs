//! Acuity estimation from refraction inputs.
//!
//! The estimate is all-or-nothing: either every field parses and both eyes
//! are reported, or the caller gets [`EstimateError`] whose message is the
//! fixed instruction shown in place of the result.

use std::fmt;

use log::{debug, warn};

use crate::models::{equivalent_sphere, AcuityBand, Eye, Field, RefractionInput};

/// Shown instead of a report when any field fails to parse.
pub const INPUT_ERROR_MESSAGE: &str = "すべての数値を正しく入力してください。\n\
（例: -0.75 や -1.75）\n\
入力範囲の目安: 球面度数 -20.00 〜 +10.00、乱視度数 0.00 〜 -6.00";

/// Trailing line of every report.
pub const DISCLAIMER: &str =
    "※ この結果は等価球面度数からの目安です。正確な視力は眼科で測定してください。";

/// Estimation failure. Every variant displays as the same instruction.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EstimateError {
    /// A field is not a finite decimal number. Displays as the user-facing
    /// instruction; `field` and `value` are kept for logs and API details.
    #[error("{msg}", msg = INPUT_ERROR_MESSAGE)]
    InvalidNumber { field: Field, value: String },
    /// Both fields parse but their equivalent sphere overflows `f64`.
    #[error("{msg}", msg = INPUT_ERROR_MESSAGE)]
    Overflow { eye: Eye },
}

/// Parse a dioptre field.
///
/// Surrounding whitespace is ignored. Empty text, trailing garbage and
/// non-finite values (`NaN`, `inf`) are rejected.
pub fn parse_diopters(raw: &str) -> Option<f64> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    trimmed.parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Render a dioptre value with exactly two decimals.
///
/// Rounds half away from zero and never prints `-0.00`. Magnitudes too large
/// to scale by 100 are already whole and print as-is.
pub fn format_diopters(value: f64) -> String {
    let scaled = value * 100.0;
    let rounded = if scaled.is_finite() {
        scaled.round() / 100.0
    } else {
        value
    };
    let rounded = if rounded == 0.0 { 0.0 } else { rounded };
    format!("{rounded:.2}")
}

/// Estimate for one eye.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EyeEstimate {
    pub eye: Eye,
    pub equivalent_sphere: f64,
    pub band: AcuityBand,
}

impl EyeEstimate {
    /// Fails when the equivalent sphere is not finite.
    pub fn new(eye: Eye, sphere: f64, cylinder: f64) -> Result<Self, EstimateError> {
        let se = equivalent_sphere(sphere, cylinder);
        if !se.is_finite() {
            warn!("{} equivalent sphere overflows: {} + {} / 2", eye.label(), sphere, cylinder);
            return Err(EstimateError::Overflow { eye });
        }
        Ok(Self {
            eye,
            equivalent_sphere: se,
            band: AcuityBand::classify(se),
        })
    }

    /// SE as printed in the report.
    pub fn se_display(&self) -> String {
        format_diopters(self.equivalent_sphere)
    }
}

impl fmt::Display for EyeEstimate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.eye.label())?;
        writeln!(f, "等価球面度数（SE）: {}D", self.se_display())?;
        write!(f, "推定裸眼視力: {}", self.band.label())
    }
}

/// Both-eye report. `Display` produces the exact result text.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Report {
    pub right: EyeEstimate,
    pub left: EyeEstimate,
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}\n\n{}\n\n{}", self.right, self.left, DISCLAIMER)
    }
}

/// Estimate both eyes from the four raw field strings.
pub fn estimate(
    right_sphere: &str,
    right_cylinder: &str,
    left_sphere: &str,
    left_cylinder: &str,
) -> Result<Report, EstimateError> {
    let raw = [right_sphere, right_cylinder, left_sphere, left_cylinder];
    let mut values = [0.0_f64; 4];
    for ((field, text), slot) in Field::ALL.into_iter().zip(raw).zip(values.iter_mut()) {
        *slot = parse_diopters(text).ok_or_else(|| {
            warn!("field {} is not a number: {:?}", field, text);
            EstimateError::InvalidNumber {
                field,
                value: text.to_string(),
            }
        })?;
    }

    let [sr, cr, sl, cl] = values;
    let report = Report {
        right: EyeEstimate::new(Eye::Right, sr, cr)?,
        left: EyeEstimate::new(Eye::Left, sl, cl)?,
    };
    debug!(
        "estimate: right SE {} -> {:?}, left SE {} -> {:?}",
        report.right.equivalent_sphere,
        report.right.band,
        report.left.equivalent_sphere,
        report.left.band
    );
    Ok(report)
}

/// Same as [`estimate`], reading the fields of both eyes. Axis is ignored.
pub fn estimate_inputs(
    right: &RefractionInput,
    left: &RefractionInput,
) -> Result<Report, EstimateError> {
    estimate(&right.sphere, &right.cylinder, &left.sphere, &left.cylinder)
}

/// Text shown in the result area for an outcome.
pub fn result_text(outcome: &Result<Report, EstimateError>) -> String {
    match outcome {
        Ok(report) => report.to_string(),
        Err(e) => e.to_string(),
    }
}
