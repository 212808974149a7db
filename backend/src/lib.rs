//! # Refraction Estimator
//!
//! Estimates uncorrected visual acuity from a spectacle prescription.
//!
//! For each eye the sphere and cylinder powers are combined into the
//! equivalent sphere (`S + C/2`), which is then classified against a fixed
//! table of acuity bands. The inputs can be encoded into a share link that
//! reopens the form with the same values and the result already computed.
//!
//! ## Architecture
//!
//! - [`models`]: refraction inputs, equivalent sphere and the band table
//! - [`services`]: the estimator, share links, form state and overlays
//! - [`config`]: server configuration from the environment
//! - [`http`]: axum server rendering the form page and a JSON API
//!   (feature `http-server`)

pub mod config;

pub mod models;

pub mod services;

#[cfg(feature = "http-server")]
pub mod http;
