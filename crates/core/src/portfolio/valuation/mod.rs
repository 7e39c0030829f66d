//! Portfolio valuation.
//!
//! Prices every holding from one batch snapshot pass and reports either the
//! per-holding entries or a single aggregate row.

mod valuation_calculator;
mod valuation_model;
mod valuation_service;
mod valuation_traits;

pub use valuation_calculator::*;
pub use valuation_model::*;
pub use valuation_service::*;
pub use valuation_traits::*;
