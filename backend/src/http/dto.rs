//! Data Transfer Objects for the HTTP API and the form page.

use serde::{Deserialize, Serialize};

use crate::models::{AcuityBand, Axis, RefractionInput};
use crate::services::estimator::EyeEstimate;
use crate::services::share_link::{ShareQuery, SharedInputs};

/// Health check response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Status of the service
    pub status: String,
    /// Version of the API
    pub version: String,
}

/// Query parameters of the form page.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PageQuery {
    pub share: ShareQuery,
    /// Overlay topic to open (optional)
    pub info: Option<String>,
}

impl PageQuery {
    /// Parse a raw query string. Unknown keys are ignored and on repeated
    /// keys the last one wins.
    pub fn parse(raw: &str) -> Self {
        let info = form_urlencoded::parse(raw.as_bytes())
            .filter(|(key, _)| key == "info")
            .last()
            .map(|(_, value)| value.into_owned());
        Self {
            share: ShareQuery::from_query_str(raw),
            info,
        }
    }
}

/// Form-encoded body posted by any of the page's submit buttons.
///
/// The `?` buttons and the close button post the same six fields plus
/// `info` or `action=close`, so unsubmitted text and axes survive overlay
/// navigation. `prev_*` carry the fields of the last submit so the result
/// shown next to an overlay stays the one that was computed.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct FormSubmission {
    #[serde(default)]
    pub rs: String,
    #[serde(default)]
    pub rc: String,
    /// Right axis in degrees (optional, informational)
    #[serde(default)]
    pub ra: Option<String>,
    #[serde(default)]
    pub ls: String,
    #[serde(default)]
    pub lc: String,
    /// Left axis in degrees (optional, informational)
    #[serde(default)]
    pub la: Option<String>,
    /// Overlay topic to open instead of computing
    #[serde(default)]
    pub info: Option<String>,
    /// `submit` (default) or `close`
    #[serde(default)]
    pub action: Option<String>,
    #[serde(default)]
    pub prev_rs: Option<String>,
    #[serde(default)]
    pub prev_rc: Option<String>,
    #[serde(default)]
    pub prev_ls: Option<String>,
    #[serde(default)]
    pub prev_lc: Option<String>,
}

impl FormSubmission {
    /// True when the post came from an overlay button rather than a submit.
    pub fn is_navigation(&self) -> bool {
        self.info.is_some() || self.action.as_deref() == Some("close")
    }

    /// Fields of the previous submit, when all four were posted back.
    pub fn previous(&self) -> Option<SharedInputs> {
        Some(SharedInputs {
            rs: self.prev_rs.clone()?,
            rc: self.prev_rc.clone()?,
            ls: self.prev_ls.clone()?,
            lc: self.prev_lc.clone()?,
        })
    }
}

/// Request body for `POST /v1/estimate`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EstimateRequest {
    pub right: RefractionInput,
    pub left: RefractionInput,
}

/// Per-eye part of an estimate response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EyeEstimateDto {
    /// Unrounded equivalent sphere
    pub se: f64,
    /// Equivalent sphere as shown in the report
    pub se_display: String,
    pub band: AcuityBand,
    pub band_label: String,
}

impl From<&EyeEstimate> for EyeEstimateDto {
    fn from(estimate: &EyeEstimate) -> Self {
        Self {
            se: estimate.equivalent_sphere,
            se_display: estimate.se_display(),
            band: estimate.band,
            band_label: estimate.band.label().to_string(),
        }
    }
}

/// Response for `POST /v1/estimate`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EstimateResponse {
    /// Full report text
    pub report: String,
    pub right: EyeEstimateDto,
    pub left: EyeEstimateDto,
    /// Link reopening the form with the same inputs
    pub share_link: String,
}

/// Suggested values for every input.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OptionsResponse {
    pub sphere: Vec<String>,
    pub cylinder: Vec<String>,
    pub axis: Vec<Axis>,
}
