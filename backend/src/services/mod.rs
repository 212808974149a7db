//! Service layer: the estimator and everything the form page needs around it.
//!
//! Nothing here does I/O. The HTTP layer turns requests into calls on these
//! functions and renders what they return.

pub mod estimator;

pub mod form;

pub mod options;

pub mod overlay;

pub mod share_link;

pub use estimator::{estimate, estimate_inputs, EstimateError, EyeEstimate, Report};
pub use form::{FormAction, FormState};
pub use overlay::{OverlayContent, OverlayTopic};
pub use share_link::{share_link, Origin, ShareLink, ShareQuery, SharedInputs};
