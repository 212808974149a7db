pub mod acuity;
pub mod refraction;

pub use acuity::*;
pub use refraction::*;
