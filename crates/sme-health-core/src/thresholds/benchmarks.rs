use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::{SmeHealthError, SmeHealthResult};

/// Which way a ratio improves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    HigherIsBetter,
    LowerIsBetter,
}

/// Display unit of a ratio. Values never carry the unit themselves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RatioUnit {
    Percent,
    Multiple,
    Days,
    Ratio,
}

/// Benchmark cut points for one ratio.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Benchmark {
    pub excellent: Decimal,
    pub good: Decimal,
    pub caution: Decimal,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub critical: Option<Decimal>,
    pub direction: Direction,
    pub unit: RatioUnit,
}

impl Benchmark {
    fn higher(excellent: Decimal, good: Decimal, caution: Decimal, unit: RatioUnit) -> Self {
        Self {
            excellent,
            good,
            caution,
            critical: None,
            direction: Direction::HigherIsBetter,
            unit,
        }
    }

    fn lower(excellent: Decimal, good: Decimal, caution: Decimal, unit: RatioUnit) -> Self {
        Self {
            excellent,
            good,
            caution,
            critical: None,
            direction: Direction::LowerIsBetter,
            unit,
        }
    }

    fn with_critical(mut self, critical: Decimal) -> Self {
        self.critical = Some(critical);
        self
    }

    /// Cut points must be strictly ordered in the direction of "better".
    pub fn validate(&self, name: &str) -> SmeHealthResult<()> {
        let ordered = match self.direction {
            Direction::HigherIsBetter => self.excellent > self.good && self.good > self.caution,
            Direction::LowerIsBetter => self.excellent < self.good && self.good < self.caution,
        };
        if !ordered {
            return Err(SmeHealthError::InvalidThresholds(format!(
                "benchmark '{name}' cut points are not strictly ordered for {:?}",
                self.direction
            )));
        }
        Ok(())
    }
}

/// Benchmark bands for every ratio scored with the standard four-band curve.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Benchmarks {
    // Profitability
    pub gross_margin: Benchmark,
    pub net_margin: Benchmark,
    pub ebitda_margin: Benchmark,
    pub roe: Benchmark,
    pub roa: Benchmark,
    pub roce: Benchmark,
    // Leverage
    pub debt_to_equity: Benchmark,
    pub interest_coverage: Benchmark,
    pub dscr: Benchmark,
    pub net_debt_to_ebitda: Benchmark,
    pub debt_ratio: Benchmark,
    // Efficiency
    pub dso: Benchmark,
    pub dio: Benchmark,
    pub ccc: Benchmark,
    pub asset_turnover: Benchmark,
    pub inventory_turnover: Benchmark,
    // Cash flow
    pub ocf_margin: Benchmark,
    pub cf_to_debt: Benchmark,
}

impl Default for Benchmarks {
    fn default() -> Self {
        use RatioUnit::*;
        Self {
            gross_margin: Benchmark::higher(dec!(40), dec!(25), dec!(15), Percent),
            net_margin: Benchmark::higher(dec!(15), dec!(8), dec!(3), Percent),
            ebitda_margin: Benchmark::higher(dec!(20), dec!(12), dec!(6), Percent),
            roe: Benchmark::higher(dec!(20), dec!(12), dec!(6), Percent),
            roa: Benchmark::higher(dec!(10), dec!(5), dec!(2), Percent),
            roce: Benchmark::higher(dec!(18), dec!(10), dec!(5), Percent),

            debt_to_equity: Benchmark::lower(dec!(0.5), dec!(1.0), dec!(2.0), Multiple)
                .with_critical(dec!(3.0)),
            interest_coverage: Benchmark::higher(dec!(5.0), dec!(3.0), dec!(2.0), Multiple)
                .with_critical(dec!(1.5)),
            dscr: Benchmark::higher(dec!(2.0), dec!(1.5), dec!(1.25), Multiple)
                .with_critical(dec!(1.0)),
            net_debt_to_ebitda: Benchmark::lower(dec!(1.0), dec!(2.0), dec!(3.0), Multiple)
                .with_critical(dec!(5.0)),
            debt_ratio: Benchmark::lower(dec!(0.3), dec!(0.5), dec!(0.65), Ratio),

            dso: Benchmark::lower(dec!(45), dec!(60), dec!(90), Days).with_critical(dec!(120)),
            dio: Benchmark::lower(dec!(30), dec!(60), dec!(90), Days),
            ccc: Benchmark::lower(dec!(45), dec!(75), dec!(100), Days),
            asset_turnover: Benchmark::higher(dec!(1.5), dec!(1.0), dec!(0.5), Multiple),
            inventory_turnover: Benchmark::higher(dec!(12), dec!(8), dec!(4), Multiple),

            ocf_margin: Benchmark::higher(dec!(15), dec!(8), dec!(3), Percent),
            cf_to_debt: Benchmark::higher(dec!(0.3), dec!(0.2), dec!(0.1), Ratio),
        }
    }
}

impl Benchmarks {
    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &Benchmark)> {
        [
            ("gross_margin", &self.gross_margin),
            ("net_margin", &self.net_margin),
            ("ebitda_margin", &self.ebitda_margin),
            ("roe", &self.roe),
            ("roa", &self.roa),
            ("roce", &self.roce),
            ("debt_to_equity", &self.debt_to_equity),
            ("interest_coverage", &self.interest_coverage),
            ("dscr", &self.dscr),
            ("net_debt_to_ebitda", &self.net_debt_to_ebitda),
            ("debt_ratio", &self.debt_ratio),
            ("dso", &self.dso),
            ("dio", &self.dio),
            ("ccc", &self.ccc),
            ("asset_turnover", &self.asset_turnover),
            ("inventory_turnover", &self.inventory_turnover),
            ("ocf_margin", &self.ocf_margin),
            ("cf_to_debt", &self.cf_to_debt),
        ]
        .into_iter()
    }

    pub fn validate(&self) -> SmeHealthResult<()> {
        self.iter().try_for_each(|(name, b)| b.validate(name))
    }
}

/// Cut points for the liquidity and cash-conversion curves, which penalise
/// both too little and (for the current ratio) too much.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LiquidityBands {
    pub current_ratio_critical_low: Decimal,
    pub current_ratio_min_healthy: Decimal,
    pub current_ratio_max_healthy: Decimal,
    pub quick_ratio_min_healthy: Decimal,
    pub cash_ratio_min_healthy: Decimal,
    pub cash_ratio_target: Decimal,
    pub cash_conversion_min_healthy: Decimal,
    pub cash_conversion_target: Decimal,
}

impl Default for LiquidityBands {
    fn default() -> Self {
        Self {
            current_ratio_critical_low: dec!(1.0),
            current_ratio_min_healthy: dec!(1.5),
            current_ratio_max_healthy: dec!(2.5),
            quick_ratio_min_healthy: dec!(1.0),
            cash_ratio_min_healthy: dec!(0.2),
            cash_ratio_target: dec!(0.5),
            cash_conversion_min_healthy: dec!(0.5),
            cash_conversion_target: dec!(0.8),
        }
    }
}

impl LiquidityBands {
    pub fn validate(&self) -> SmeHealthResult<()> {
        let checks = [
            (
                "current ratio bands",
                Decimal::ZERO < self.current_ratio_critical_low
                    && self.current_ratio_critical_low < self.current_ratio_min_healthy
                    && self.current_ratio_min_healthy <= self.current_ratio_max_healthy,
            ),
            ("quick ratio floor", self.quick_ratio_min_healthy > Decimal::ZERO),
            (
                "cash ratio bands",
                Decimal::ZERO < self.cash_ratio_min_healthy
                    && self.cash_ratio_min_healthy < self.cash_ratio_target,
            ),
            (
                "cash conversion bands",
                Decimal::ZERO < self.cash_conversion_min_healthy
                    && self.cash_conversion_min_healthy < self.cash_conversion_target,
            ),
        ];
        match checks.iter().find(|(_, ok)| !ok) {
            Some((name, _)) => Err(SmeHealthError::InvalidThresholds(format!(
                "{name} must be positive and strictly increasing"
            ))),
            None => Ok(()),
        }
    }
}
