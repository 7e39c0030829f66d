pub mod holdings;
pub mod valuation;

pub use holdings::*;
pub use valuation::*;
