//! Read-only benchmark, weight, zone and rule configuration.
//!
//! A `ThresholdTable` is built once (the `Default` is the Indian-SME set) and
//! passed by reference into the scorer and the recommender.

pub mod alerts;
pub mod benchmarks;
pub mod zones;

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

pub use alerts::{AlertThresholds, ComplianceRules};
pub use benchmarks::{Benchmark, Benchmarks, Direction, LiquidityBands, RatioUnit};
pub use zones::{HealthZone, ZoneBand, ZoneColor};

use crate::types::Score;
use crate::{SmeHealthError, SmeHealthResult};

/// Category weights for the overall score, in percent. Must sum to 100.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryWeights {
    pub liquidity: Decimal,
    pub profitability: Decimal,
    pub leverage: Decimal,
    pub efficiency: Decimal,
    pub cash_flow: Decimal,
    pub compliance: Decimal,
}

impl Default for CategoryWeights {
    fn default() -> Self {
        Self {
            liquidity: dec!(20),
            profitability: dec!(25),
            leverage: dec!(20),
            efficiency: dec!(15),
            cash_flow: dec!(10),
            compliance: dec!(10),
        }
    }
}

impl CategoryWeights {
    pub fn total(&self) -> Decimal {
        self.liquidity
            + self.profitability
            + self.leverage
            + self.efficiency
            + self.cash_flow
            + self.compliance
    }

    pub fn validate(&self) -> SmeHealthResult<()> {
        let all = [
            self.liquidity,
            self.profitability,
            self.leverage,
            self.efficiency,
            self.cash_flow,
            self.compliance,
        ];
        if all.iter().any(|w| *w < Decimal::ZERO) {
            return Err(SmeHealthError::InvalidThresholds(
                "category weights cannot be negative".into(),
            ));
        }
        if self.total() != dec!(100) {
            return Err(SmeHealthError::InvalidThresholds(format!(
                "category weights must sum to 100, got {}",
                self.total()
            )));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ThresholdTable {
    pub benchmarks: Benchmarks,
    pub liquidity: LiquidityBands,
    pub weights: CategoryWeights,
    pub zones: Vec<ZoneBand>,
    pub compliance: ComplianceRules,
    pub alerts: AlertThresholds,
}

impl Default for ThresholdTable {
    fn default() -> Self {
        Self {
            benchmarks: Benchmarks::default(),
            liquidity: LiquidityBands::default(),
            weights: CategoryWeights::default(),
            zones: zones::default_zones(),
            compliance: ComplianceRules::default(),
            alerts: AlertThresholds::default(),
        }
    }
}

impl ThresholdTable {
    /// Check every table invariant. Tables loaded from files must pass this
    /// before use; the default table always does.
    pub fn validate(&self) -> SmeHealthResult<()> {
        self.benchmarks.validate()?;
        self.liquidity.validate()?;
        self.weights.validate()?;
        zones::validate_zones(&self.zones)?;
        self.compliance.validate()?;

        let a = &self.alerts;
        if !(a.dscr_npa < a.dscr_rbi_minimum && a.dscr_rbi_minimum <= a.dscr_comfortable) {
            return Err(SmeHealthError::InvalidThresholds(
                "DSCR alert bands must satisfy npa < rbi_minimum <= comfortable".into(),
            ));
        }
        if a.dso_ideal >= a.dso_critical {
            return Err(SmeHealthError::InvalidThresholds(
                "dso_ideal must be below dso_critical".into(),
            ));
        }
        if a.interest_coverage_thin_low >= a.interest_coverage_thin_high {
            return Err(SmeHealthError::InvalidThresholds(
                "interest coverage thin band is empty".into(),
            ));
        }
        if a.current_ratio_healthy_low > a.current_ratio_healthy_high {
            return Err(SmeHealthError::InvalidThresholds(
                "current ratio healthy band is inverted".into(),
            ));
        }
        Ok(())
    }

    /// Zone band for an overall score.
    pub fn zone_for(&self, score: Score) -> Option<&ZoneBand> {
        zones::zone_for(&self.zones, score)
    }
}
