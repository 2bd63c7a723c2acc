//! Health scorer: six category scores, a weighted overall score and a zone.

pub mod categories;
pub mod curves;

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::compliance::{compliance_score, ComplianceFlags};
use crate::ratios::RatioSet;
use crate::thresholds::{HealthZone, ThresholdTable, ZoneColor};
use crate::types::Score;

pub use curves::{score_metric, NEUTRAL_SCORE};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreBreakdown {
    pub overall: Score,
    pub liquidity: Score,
    pub profitability: Score,
    pub leverage: Score,
    pub efficiency: Score,
    pub cash_flow: Score,
    pub compliance: Score,
    pub zone: HealthZone,
    pub zone_color: ZoneColor,
}

/// Score a ratio set.
///
/// Every field is rounded to 1 dp. The zone is looked up from the rounded
/// overall score, so the displayed number and its zone always agree.
pub fn compute_score(
    ratios: &RatioSet,
    flags: &ComplianceFlags,
    table: &ThresholdTable,
) -> ScoreBreakdown {
    let liquidity = categories::liquidity_score(ratios, table);
    let profitability = categories::profitability_score(ratios, table);
    let leverage = categories::leverage_score(ratios, table);
    let efficiency = categories::efficiency_score(ratios, table);
    let cash_flow = categories::cash_flow_score(ratios, table);
    let compliance = compliance_score(flags, &table.compliance);

    let w = &table.weights;
    let weighted = liquidity * w.liquidity
        + profitability * w.profitability
        + leverage * w.leverage
        + efficiency * w.efficiency
        + cash_flow * w.cash_flow
        + compliance * w.compliance;
    let overall = (weighted / dec!(100))
        .clamp(Decimal::ZERO, dec!(100))
        .round_dp(1);

    let (zone, zone_color) = table
        .zone_for(overall)
        .map(|band| (band.zone, band.color))
        .unwrap_or((HealthZone::Critical, ZoneColor::Red));

    tracing::debug!(%overall, %zone, "health score computed");

    ScoreBreakdown {
        overall,
        liquidity: liquidity.round_dp(1),
        profitability: profitability.round_dp(1),
        leverage: leverage.round_dp(1),
        efficiency: efficiency.round_dp(1),
        cash_flow: cash_flow.round_dp(1),
        compliance: compliance.round_dp(1),
        zone,
        zone_color,
    }
}

/// Zone label for an overall score under the given table.
pub fn score_to_zone(score: Score, table: &ThresholdTable) -> HealthZone {
    table
        .zone_for(score)
        .map(|band| band.zone)
        .unwrap_or(HealthZone::Critical)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_data_clean_compliance() {
        let table = ThresholdTable::default();
        let score = compute_score(&RatioSet::default(), &ComplianceFlags::default(), &table);
        // 50 * 90% + 100 * 10%
        assert_eq!(score.overall, dec!(55));
        assert_eq!(score.compliance, dec!(100));
        assert_eq!(score.zone, HealthZone::Caution);
        assert_eq!(score.zone_color, ZoneColor::Orange);
    }

    #[test]
    fn test_score_to_zone_boundaries() {
        let table = ThresholdTable::default();
        assert_eq!(score_to_zone(dec!(79.99), &table), HealthZone::Good);
        assert_eq!(score_to_zone(dec!(80.0), &table), HealthZone::Excellent);
        assert_eq!(score_to_zone(dec!(39.99), &table), HealthZone::Critical);
        assert_eq!(score_to_zone(dec!(40), &table), HealthZone::Caution);
    }

    #[test]
    fn test_all_compliance_flags_drag_score() {
        let table = ThresholdTable::default();
        let flags = ComplianceFlags {
            tds_overdue: true,
            gst_itc_large: true,
            pf_esi_overdue: true,
            msme_overdue: true,
        };
        let score = compute_score(&RatioSet::default(), &flags, &table);
        assert_eq!(score.compliance, dec!(10));
        // 45 + 1
        assert_eq!(score.overall, dec!(46));
    }

    #[test]
    fn test_strong_company_lands_excellent() {
        let table = ThresholdTable::default();
        let r = RatioSet {
            gross_margin: Some(dec!(45)),
            net_margin: Some(dec!(16)),
            ebitda_margin: Some(dec!(22)),
            roe: Some(dec!(24)),
            roa: Some(dec!(12)),
            current_ratio: Some(dec!(2.0)),
            quick_ratio: Some(dec!(3.0)),
            cash_ratio: Some(dec!(0.6)),
            debt_to_equity: Some(dec!(0.3)),
            interest_coverage: Some(dec!(8)),
            dscr: Some(dec!(2.5)),
            net_debt_to_ebitda: Some(dec!(0.5)),
            debt_ratio: Some(dec!(0.2)),
            dso: Some(dec!(40)),
            dio: Some(dec!(25)),
            ccc: Some(dec!(30)),
            asset_turnover: Some(dec!(1.8)),
            inventory_turnover: Some(dec!(14)),
            ocf_margin: Some(dec!(18)),
            cf_to_debt: Some(dec!(0.5)),
            cash_conversion_ratio: Some(dec!(0.9)),
            ..Default::default()
        };
        let score = compute_score(&r, &ComplianceFlags::default(), &table);
        assert_eq!(score.overall, dec!(100));
        assert_eq!(score.zone, HealthZone::Excellent);
    }

    #[test]
    fn test_category_scores_within_bounds() {
        let table = ThresholdTable::default();
        let r = RatioSet {
            current_ratio: Some(dec!(-3)),
            quick_ratio: Some(dec!(-8)),
            dso: Some(dec!(9999)),
            net_margin: Some(dec!(-250)),
            debt_to_equity: Some(dec!(-4)),
            ..Default::default()
        };
        let s = compute_score(&r, &ComplianceFlags::default(), &table);
        for v in [
            s.overall,
            s.liquidity,
            s.profitability,
            s.leverage,
            s.efficiency,
            s.cash_flow,
            s.compliance,
        ] {
            assert!(v >= Decimal::ZERO && v <= dec!(100));
        }
    }
}
