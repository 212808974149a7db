//! HTTP server module.
//!
//! An axum server that renders the estimator form and exposes the same
//! logic as a small JSON API. Handlers only translate between HTTP and the
//! service layer; all computation lives in [`crate::services`].
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────┐
//! │  HTTP Layer (axum handlers, page rendering)               │
//! │  - Query/form/JSON extraction                             │
//! │  - Escaped HTML output, JSON errors                       │
//! └───────────────────┬──────────────────────────────────────┘
//!                     │
//! ┌───────────────────▼──────────────────────────────────────┐
//! │  Service Layer (services/)                                │
//! │  - Estimator, share links, form state, overlays           │
//! └──────────────────────────────────────────────────────────┘
//! ```

pub mod dto;
pub mod error;
pub mod handlers;
pub mod page;
pub mod router;
pub mod state;

pub use router::create_router;
pub use state::AppState;
