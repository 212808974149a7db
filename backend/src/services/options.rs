//! Suggested values for the input fields, in 0.25 D steps.

use crate::models::{CYLINDER_RANGE, DIOPTER_STEP, SPHERE_RANGE};
use crate::services::estimator::format_diopters;

/// Option text: two decimals, explicit `+` on positive values.
pub fn format_option(value: f64) -> String {
    if value > 0.0 {
        format!("+{}", format_diopters(value))
    } else {
        format_diopters(value)
    }
}

/// Every step from `high` down to `low`. Works in whole steps so values
/// never accumulate float error.
fn descending_steps(low: f64, high: f64) -> Vec<String> {
    let top = (high / DIOPTER_STEP).round() as i32;
    let bottom = (low / DIOPTER_STEP).round() as i32;
    (bottom..=top)
        .rev()
        .map(|i| format_option(f64::from(i) * DIOPTER_STEP))
        .collect()
}

/// `+10.00` down to `-20.00`.
pub fn sphere_options() -> Vec<String> {
    descending_steps(*SPHERE_RANGE.start(), *SPHERE_RANGE.end())
}

/// `0.00` down to `-6.00`.
pub fn cylinder_options() -> Vec<String> {
    descending_steps(*CYLINDER_RANGE.start(), *CYLINDER_RANGE.end())
}
