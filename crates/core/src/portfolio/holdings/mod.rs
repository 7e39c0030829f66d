//! Portfolio holdings and the portfolio file loader.

mod holdings_loader;
mod holdings_model;

pub use holdings_loader::*;
pub use holdings_model::*;
