//! HTTP handlers for the form page and the JSON API.
//!
//! Each handler corresponds to an endpoint and delegates to the service layer.

use axum::{
    extract::{Path, RawQuery, State},
    http::{HeaderMap, Uri},
    response::Html,
    Form, Json,
};
use tracing::debug;

use super::dto::{
    EstimateRequest, EstimateResponse, EyeEstimateDto, FormSubmission, HealthResponse,
    OptionsResponse, PageQuery,
};
use super::error::AppError;
use super::page::render_page;
use super::state::AppState;
use crate::models::{Axis, Eye};
use crate::services::estimator::estimate_inputs;
use crate::services::form::{FormAction, FormState};
use crate::services::options::{cylinder_options, sphere_options};
use crate::services::overlay::{self, OverlayContent, OverlayTopic};
use crate::services::share_link::{share_link, Origin, SharedInputs};

/// Result type for handlers.
pub type HandlerResult<T> = Result<Json<T>, AppError>;

fn page_origin(state: &AppState, headers: &HeaderMap, uri: &Uri) -> Result<Origin, AppError> {
    state.page_origin(headers, uri).map_err(AppError::BadRequest)
}

fn open_overlay(form: FormState, info: Option<&str>) -> FormState {
    match info.map(str::parse::<OverlayTopic>) {
        Some(Ok(topic)) => form.apply(FormAction::OpenOverlay(topic)),
        Some(Err(e)) => {
            debug!("{}", e);
            form
        }
        None => form,
    }
}

/// Axis from an optional form value. Axis is informational, so anything that
/// is not a supported angle falls back to the default.
fn submitted_axis(raw: Option<&str>) -> Axis {
    match raw.map(str::parse::<Axis>) {
        Some(Ok(axis)) => axis,
        Some(Err(e)) => {
            debug!("ignoring axis value: {}", e);
            Axis::default()
        }
        None => Axis::default(),
    }
}

// =============================================================================
// Health Check
// =============================================================================

/// GET /health
pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: "v1".to_string(),
    })
}

// =============================================================================
// Form Page
// =============================================================================

/// GET /
///
/// Render the form. A query carrying `rs`, `rc`, `ls` and `lc` pre-fills the
/// fields and shows the computed result; `info` opens one overlay.
/// Repeated keys are accepted and the last value wins.
pub async fn show_form(
    State(state): State<AppState>,
    headers: HeaderMap,
    uri: Uri,
    RawQuery(raw): RawQuery,
) -> Result<Html<String>, AppError> {
    let origin = page_origin(&state, &headers, &uri)?;
    let query = PageQuery::parse(raw.as_deref().unwrap_or_default());
    let form = FormState::load(&origin, &query.share);
    let form = open_overlay(form, query.info.as_deref());

    Ok(Html(render_page(&form)))
}

/// POST /
///
/// Every button on the page posts all six fields here.
///
/// A plain submit computes the result and share link. An `info` button opens
/// that overlay and `action=close` closes it; both keep the posted fields
/// as typed and rebuild the previous result from `prev_*` without computing.
pub async fn submit_form(
    State(state): State<AppState>,
    headers: HeaderMap,
    uri: Uri,
    Form(submission): Form<FormSubmission>,
) -> Result<Html<String>, AppError> {
    let origin = page_origin(&state, &headers, &uri)?;
    let navigating = submission.is_navigation();
    let right_axis = submitted_axis(submission.ra.as_deref());
    let left_axis = submitted_axis(submission.la.as_deref());

    let mut form = FormState::new();
    if navigating {
        if let Some(previous) = submission.previous() {
            form = form
                .with_inputs(previous)
                .apply(FormAction::Submit(origin.clone()));
        }
    }

    form = form
        .apply(FormAction::SetSphere(Eye::Right, submission.rs))
        .apply(FormAction::SetCylinder(Eye::Right, submission.rc))
        .apply(FormAction::SetAxis(Eye::Right, right_axis))
        .apply(FormAction::SetSphere(Eye::Left, submission.ls))
        .apply(FormAction::SetCylinder(Eye::Left, submission.lc))
        .apply(FormAction::SetAxis(Eye::Left, left_axis));

    if !navigating {
        form = form.apply(FormAction::Submit(origin));
    }
    let form = open_overlay(form, submission.info.as_deref());

    Ok(Html(render_page(&form)))
}

// =============================================================================
// JSON API
// =============================================================================

/// POST /v1/estimate
///
/// Estimate both eyes. A field that fails to parse yields 400 `INVALID_INPUT`
/// carrying the same instruction the page shows.
pub async fn estimate(
    State(state): State<AppState>,
    headers: HeaderMap,
    uri: Uri,
    Json(request): Json<EstimateRequest>,
) -> HandlerResult<EstimateResponse> {
    let origin = page_origin(&state, &headers, &uri)?;
    let report = estimate_inputs(&request.right, &request.left)?;
    let link = share_link(&origin, &SharedInputs::from_eyes(&request.right, &request.left));

    Ok(Json(EstimateResponse {
        report: report.to_string(),
        right: EyeEstimateDto::from(&report.right),
        left: EyeEstimateDto::from(&report.left),
        share_link: link.to_string(),
    }))
}

/// GET /v1/overlays/{topic}
pub async fn get_overlay(Path(topic): Path<String>) -> HandlerResult<OverlayContent> {
    let topic = topic
        .parse::<OverlayTopic>()
        .map_err(|e| AppError::NotFound(e.to_string()))?;
    Ok(Json(overlay::content(topic)))
}

/// GET /v1/options
pub async fn get_options() -> Json<OptionsResponse> {
    Json(OptionsResponse {
        sphere: sphere_options(),
        cylinder: cylinder_options(),
        axis: Axis::ALL.to_vec(),
    })
}
