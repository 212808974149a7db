//! Form state as an immutable snapshot driven by named actions.
//!
//! Every change goes through [`FormState::apply`], which consumes the current
//! snapshot and returns the next one. Rendering only ever reads a snapshot.

use crate::models::{Axis, Eye, RefractionInput};
use crate::services::estimator::{estimate_inputs, result_text, EstimateError, Report};
use crate::services::overlay::OverlayTopic;
use crate::services::share_link::{share_link, Origin, ShareLink, ShareQuery, SharedInputs};

/// A discrete change to the form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormAction {
    SetSphere(Eye, String),
    SetCylinder(Eye, String),
    SetAxis(Eye, Axis),
    /// Compute the estimate and derive the share link against this origin.
    Submit(Origin),
    OpenOverlay(OverlayTopic),
    CloseOverlay,
}

/// Everything the page shows.
#[derive(Debug, Clone, PartialEq)]
pub struct FormState {
    right: RefractionInput,
    left: RefractionInput,
    outcome: Option<Result<Report, EstimateError>>,
    /// Fields as they were at the last submit.
    submitted: Option<SharedInputs>,
    share_link: Option<ShareLink>,
    overlay: Option<OverlayTopic>,
}

impl Default for FormState {
    fn default() -> Self {
        Self {
            right: RefractionInput::new("-0.50", "-2.00"),
            left: RefractionInput::new("-0.75", "-1.75"),
            outcome: None,
            submitted: None,
            share_link: None,
            overlay: None,
        }
    }
}

impl FormState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Initial state for a page load. When the query carries all four share
    /// parameters the fields are filled from it and submitted right away;
    /// otherwise the defaults are shown uncomputed. Axis keeps its default.
    pub fn load(origin: &Origin, query: &ShareQuery) -> Self {
        let state = Self::default();
        let Some(shared) = query.complete() else {
            return state;
        };
        log::debug!("loading form from share link parameters");
        state
            .with_inputs(shared)
            .apply(FormAction::Submit(origin.clone()))
    }

    /// Set the four estimate fields at once.
    pub fn with_inputs(self, inputs: SharedInputs) -> Self {
        self.apply(FormAction::SetSphere(Eye::Right, inputs.rs))
            .apply(FormAction::SetCylinder(Eye::Right, inputs.rc))
            .apply(FormAction::SetSphere(Eye::Left, inputs.ls))
            .apply(FormAction::SetCylinder(Eye::Left, inputs.lc))
    }

    /// Next snapshot after `action`.
    pub fn apply(mut self, action: FormAction) -> Self {
        match action {
            FormAction::SetSphere(eye, text) => self.input_mut(eye).sphere = text,
            FormAction::SetCylinder(eye, text) => self.input_mut(eye).cylinder = text,
            FormAction::SetAxis(eye, axis) => self.input_mut(eye).axis = axis,
            FormAction::Submit(origin) => {
                let inputs = self.shared_inputs();
                self.outcome = Some(estimate_inputs(&self.right, &self.left));
                self.share_link = Some(share_link(&origin, &inputs));
                self.submitted = Some(inputs);
            }
            FormAction::OpenOverlay(topic) => self.overlay = Some(topic),
            FormAction::CloseOverlay => self.overlay = None,
        }
        self
    }

    fn input_mut(&mut self, eye: Eye) -> &mut RefractionInput {
        match eye {
            Eye::Right => &mut self.right,
            Eye::Left => &mut self.left,
        }
    }

    pub fn input(&self, eye: Eye) -> &RefractionInput {
        match eye {
            Eye::Right => &self.right,
            Eye::Left => &self.left,
        }
    }

    /// The four fields a share link would carry right now.
    pub fn shared_inputs(&self) -> SharedInputs {
        SharedInputs::from_eyes(&self.right, &self.left)
    }

    /// Outcome of the last submit, if any.
    pub fn outcome(&self) -> Option<&Result<Report, EstimateError>> {
        self.outcome.as_ref()
    }

    /// Result area text: the report or the input instruction.
    pub fn result_text(&self) -> Option<String> {
        self.outcome.as_ref().map(result_text)
    }

    /// Fields the current outcome was computed from.
    pub fn submitted_inputs(&self) -> Option<&SharedInputs> {
        self.submitted.as_ref()
    }

    pub fn share_link(&self) -> Option<&ShareLink> {
        self.share_link.as_ref()
    }

    pub fn overlay(&self) -> Option<OverlayTopic> {
        self.overlay
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::estimator::INPUT_ERROR_MESSAGE;

    fn origin() -> Origin {
        Origin::parse("https://example.com").unwrap()
    }

    #[test]
    fn test_default_state_is_uncomputed() {
        let state = FormState::new();
        assert_eq!(state.input(Eye::Right).sphere, "-0.50");
        assert_eq!(state.input(Eye::Left).cylinder, "-1.75");
        assert!(state.outcome().is_none());
        assert!(state.share_link().is_none());
        assert!(state.overlay().is_none());
    }

    #[test]
    fn test_submit_computes_and_links() {
        let state = FormState::new()
            .apply(FormAction::SetSphere(Eye::Right, "0.00".into()))
            .apply(FormAction::SetCylinder(Eye::Right, "0.00".into()))
            .apply(FormAction::Submit(origin()));
        let report = state.outcome().unwrap().as_ref().unwrap();
        assert_eq!(report.right.se_display(), "0.00");
        assert_eq!(
            state.share_link().unwrap().as_str(),
            "https://example.com/?rs=0.00&rc=0.00&ls=-0.75&lc=-1.75"
        );
    }

    #[test]
    fn test_submit_with_bad_input_still_links_raw_text() {
        let state = FormState::new()
            .apply(FormAction::SetCylinder(Eye::Left, "abc".into()))
            .apply(FormAction::Submit(origin()));
        assert_eq!(state.result_text().unwrap(), INPUT_ERROR_MESSAGE);
        assert!(state.share_link().unwrap().as_str().ends_with("lc=abc"));
    }

    #[test]
    fn test_axis_does_not_change_result_or_link() {
        let base = FormState::new().apply(FormAction::Submit(origin()));
        let with_axis = FormState::new()
            .apply(FormAction::SetAxis(Eye::Right, Axis::Deg45))
            .apply(FormAction::SetAxis(Eye::Left, Axis::Deg90))
            .apply(FormAction::Submit(origin()));
        assert_eq!(base.result_text(), with_axis.result_text());
        assert_eq!(base.share_link(), with_axis.share_link());
        assert_eq!(with_axis.input(Eye::Left).axis, Axis::Deg90);
    }

    #[test]
    fn test_editing_keeps_previous_result_until_resubmit() {
        let submitted = FormState::new().apply(FormAction::Submit(origin()));
        let edited = submitted
            .clone()
            .apply(FormAction::SetSphere(Eye::Right, "-3.00".into()));
        assert_eq!(edited.outcome(), submitted.outcome());
        assert_eq!(edited.input(Eye::Right).sphere, "-3.00");
    }

    #[test]
    fn test_submitted_inputs_survive_later_edits() {
        let state = FormState::new()
            .apply(FormAction::Submit(origin()))
            .apply(FormAction::SetSphere(Eye::Right, "-4.00".into()));
        let submitted = state.submitted_inputs().unwrap();
        assert_eq!(submitted.rs, "-0.50");
        assert_eq!(state.shared_inputs().rs, "-4.00");
    }

    #[test]
    fn test_overlay_open_close_keeps_form() {
        let submitted = FormState::new().apply(FormAction::Submit(origin()));
        let opened = submitted
            .clone()
            .apply(FormAction::OpenOverlay(OverlayTopic::Sphere))
            .apply(FormAction::OpenOverlay(OverlayTopic::Result));
        assert_eq!(opened.overlay(), Some(OverlayTopic::Result));
        let closed = opened.apply(FormAction::CloseOverlay);
        assert_eq!(closed, submitted);
    }

    #[test]
    fn test_load_requires_all_four_params() {
        let partial = ShareQuery::from_query_str("rs=-1.00&rc=-1.00&ls=-1.00");
        assert_eq!(FormState::load(&origin(), &partial), FormState::new());

        let full = ShareQuery::from_query_str("rs=-1.00&rc=-1.75&ls=0&lc=0");
        let loaded = FormState::load(&origin(), &full);
        assert_eq!(loaded.input(Eye::Right).cylinder, "-1.75");
        assert!(loaded.outcome().unwrap().is_ok());
    }

    #[test]
    fn test_share_link_reload_is_idempotent() {
        let first = FormState::new()
            .apply(FormAction::SetSphere(Eye::Left, "+1.25".into()))
            .apply(FormAction::Submit(origin()));
        let link = first.share_link().unwrap().as_str().to_string();
        let query = link.split_once('?').unwrap().1;
        let reloaded = FormState::load(&origin(), &ShareQuery::from_query_str(query));
        assert_eq!(reloaded.result_text(), first.result_text());
        assert_eq!(reloaded.share_link().unwrap().as_str(), link);
    }
}
