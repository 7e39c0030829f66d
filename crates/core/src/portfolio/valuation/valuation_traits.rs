//! Service trait for portfolio valuation.

use async_trait::async_trait;

use super::{ValuationMode, ValuationReport};
use crate::errors::Result;
use crate::portfolio::holdings::Holding;

#[async_trait]
pub trait ValuationServiceTrait: Send + Sync {
    /// Value `holdings` against current snapshots.
    ///
    /// Holdings whose ticker has no data are skipped and listed in the report.
    /// Invalid input fails before any market data is requested.
    async fn valuate(&self, holdings: &[Holding], mode: ValuationMode) -> Result<ValuationReport>;
}
