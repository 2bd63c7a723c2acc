use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use super::curves::{
    cash_conversion_score, cash_ratio_score, current_ratio_score, quick_ratio_score, score_metric,
};
use crate::ratios::RatioSet;
use crate::thresholds::ThresholdTable;
use crate::types::Score;

/// Unweighted mean, clamped to [0, 100].
fn mean(scores: &[Score]) -> Score {
    if scores.is_empty() {
        return dec!(50);
    }
    let total: Decimal = scores.iter().copied().sum();
    (total / Decimal::from(scores.len())).clamp(Decimal::ZERO, dec!(100))
}

pub fn liquidity_score(ratios: &RatioSet, table: &ThresholdTable) -> Score {
    let bands = &table.liquidity;
    mean(&[
        current_ratio_score(ratios.current_ratio, bands),
        quick_ratio_score(ratios.quick_ratio, bands),
        cash_ratio_score(ratios.cash_ratio, bands),
    ])
}

pub fn profitability_score(ratios: &RatioSet, table: &ThresholdTable) -> Score {
    let b = &table.benchmarks;
    mean(&[
        score_metric(ratios.net_margin, &b.net_margin),
        score_metric(ratios.ebitda_margin, &b.ebitda_margin),
        score_metric(ratios.gross_margin, &b.gross_margin),
        score_metric(ratios.roe, &b.roe),
        score_metric(ratios.roa, &b.roa),
    ])
}

pub fn leverage_score(ratios: &RatioSet, table: &ThresholdTable) -> Score {
    let b = &table.benchmarks;
    mean(&[
        score_metric(ratios.debt_to_equity, &b.debt_to_equity),
        score_metric(ratios.interest_coverage, &b.interest_coverage),
        score_metric(ratios.dscr, &b.dscr),
        score_metric(ratios.net_debt_to_ebitda, &b.net_debt_to_ebitda),
        score_metric(ratios.debt_ratio, &b.debt_ratio),
    ])
}

pub fn efficiency_score(ratios: &RatioSet, table: &ThresholdTable) -> Score {
    let b = &table.benchmarks;
    mean(&[
        score_metric(ratios.dso, &b.dso),
        score_metric(ratios.dio, &b.dio),
        score_metric(ratios.ccc, &b.ccc),
        score_metric(ratios.asset_turnover, &b.asset_turnover),
        score_metric(ratios.inventory_turnover, &b.inventory_turnover),
    ])
}

pub fn cash_flow_score(ratios: &RatioSet, table: &ThresholdTable) -> Score {
    let b = &table.benchmarks;
    mean(&[
        score_metric(ratios.ocf_margin, &b.ocf_margin),
        score_metric(ratios.cf_to_debt, &b.cf_to_debt),
        cash_conversion_score(ratios.cash_conversion_ratio, &table.liquidity),
    ])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_ratios_score_neutral_everywhere() {
        let table = ThresholdTable::default();
        let r = RatioSet::default();
        assert_eq!(liquidity_score(&r, &table), dec!(50));
        assert_eq!(profitability_score(&r, &table), dec!(50));
        assert_eq!(leverage_score(&r, &table), dec!(50));
        assert_eq!(efficiency_score(&r, &table), dec!(50));
        assert_eq!(cash_flow_score(&r, &table), dec!(50));
    }

    #[test]
    fn test_liquidity_is_unweighted_mean() {
        let table = ThresholdTable::default();
        let r = RatioSet {
            current_ratio: Some(dec!(2.0)), // 100
            quick_ratio: Some(dec!(1.0)),   // 80
            cash_ratio: Some(dec!(0.1)),    // 30
            ..Default::default()
        };
        assert_eq!(liquidity_score(&r, &table), dec!(70));
    }

    #[test]
    fn test_cash_flow_mixes_standard_and_bespoke_curves() {
        let table = ThresholdTable::default();
        let r = RatioSet {
            ocf_margin: Some(dec!(15)),            // 100
            cf_to_debt: Some(dec!(0.2)),           // 60
            cash_conversion_ratio: Some(dec!(0.65)), // 80
            ..Default::default()
        };
        assert_eq!(cash_flow_score(&r, &table), dec!(80));
    }
}
