use pretty_assertions::assert_eq;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use sme_health_core::compliance::compliance_score;
use sme_health_core::ratios::safe_div;
use sme_health_core::recommendations::Category;
use sme_health_core::{
    analyze, compute_ratios, generate_recommendations, score_to_zone, AnalysisInput,
    ComplianceFlags, FinancialSnapshot, HealthZone, Priority, RatioSet, ThresholdTable,
};

// ===========================================================================
// Fixtures
// ===========================================================================

fn manufacturer() -> FinancialSnapshot {
    // revenue 1000, COGS 600, employee 150, finance 40, dep 50, other 60, tax 20
    let mut s = FinancialSnapshot {
        company_name: "Shakti Components Pvt Ltd".into(),
        financial_year: "2024-25".into(),
        ..Default::default()
    };
    let pl = &mut s.profit_loss;
    pl.revenue_from_operations = dec!(1000);
    pl.cogs = dec!(600);
    pl.employee_expenses = dec!(150);
    pl.finance_costs = dec!(40);
    pl.depreciation = dec!(50);
    pl.other_expenses = dec!(60);
    pl.tax_expense = dec!(20);
    s
}

fn titles(recs: &[sme_health_core::Recommendation]) -> Vec<&str> {
    recs.iter().map(|r| r.title.as_str()).collect()
}

// ===========================================================================
// P&L scenario
// ===========================================================================

#[test]
fn test_income_statement_chain() {
    let snap = manufacturer();
    let pl = &snap.profit_loss;
    assert_eq!(pl.gross_profit(), dec!(400));
    assert_eq!(pl.ebitda(), dec!(190));
    assert_eq!(pl.ebit(), dec!(140));
    assert_eq!(pl.pbt(), dec!(100));
    assert_eq!(pl.pat(), dec!(80));

    let ratios = compute_ratios(&snap, None);
    assert_eq!(ratios.net_margin, Some(dec!(8)));
    assert_eq!(ratios.gross_margin, Some(dec!(40)));
    assert_eq!(ratios.ebitda_margin, Some(dec!(19)));
    assert_eq!(ratios.ebit_margin, Some(dec!(14)));
    assert_eq!(ratios.interest_coverage, Some(dec!(3.5)));
    assert!(!ratios.cogs_estimated);
}

// ===========================================================================
// Liquidity crunch scenario
// ===========================================================================

#[test]
fn test_negative_working_capital_fires_both_liquidity_rules() {
    let mut snap = FinancialSnapshot::default();
    snap.balance_sheet.inventories = dec!(200);
    snap.balance_sheet.trade_receivables = dec!(200);
    snap.balance_sheet.cash_and_equivalents = dec!(100);
    snap.balance_sheet.trade_payables = dec!(600);

    let ratios = compute_ratios(&snap, None);
    assert_eq!(ratios.current_ratio, Some(dec!(0.83)));
    assert_eq!(ratios.working_capital, Some(dec!(-100)));

    let recs = generate_recommendations(&ratios, &snap, None, &ThresholdTable::default());
    let high: Vec<&str> = recs
        .iter()
        .filter(|r| r.priority == Priority::High)
        .map(|r| r.title.as_str())
        .collect();
    assert_eq!(
        high,
        vec!["Negative Working Capital", "Critical Current Ratio — Below 1.0x"]
    );
    assert!(recs[0].description.contains("₹100.0L shortfall"));
    assert_eq!(recs[0].category, Category::Liquidity);
}

// ===========================================================================
// DSCR boundaries
// ===========================================================================

#[test]
fn test_dscr_exactly_rbi_minimum_is_silent() {
    let mut snap = FinancialSnapshot::default();
    snap.profit_loss.revenue_from_operations = dec!(1000);
    snap.profit_loss.cogs = dec!(600);
    snap.profit_loss.other_expenses = dec!(250);
    snap.annual_loan_repayment = dec!(120);

    let ratios = compute_ratios(&snap, None);
    assert_eq!(ratios.dscr, Some(dec!(1.25)));
    assert!(!ratios.repayment_estimated);

    let recs = generate_recommendations(&ratios, &snap, None, &ThresholdTable::default());
    assert!(
        recs.iter().all(|r| !r.title.contains("DSCR")),
        "no DSCR finding expected at 1.25, got {:?}",
        titles(&recs)
    );
}

#[test]
fn test_dscr_at_npa_line_is_sub_standard_only() {
    let ratios = RatioSet {
        dscr: Some(dec!(1.0)),
        ..Default::default()
    };
    let recs = generate_recommendations(
        &ratios,
        &FinancialSnapshot::default(),
        None,
        &ThresholdTable::default(),
    );
    assert_eq!(titles(&recs), vec!["DSCR Below RBI Minimum (1.25x)"]);
}

#[test]
fn test_repayment_fallback_when_not_reported() {
    let mut snap = manufacturer();
    snap.balance_sheet.long_term_borrowings = dec!(400);
    let ratios = compute_ratios(&snap, None);
    // (80 + 50) / (400 * 0.15 + 40) = 130 / 100
    assert_eq!(ratios.dscr, Some(dec!(1.3)));
    assert!(ratios.repayment_estimated);
}

// ===========================================================================
// Ordering
// ===========================================================================

#[test]
fn test_output_order_high_medium_positive() {
    let mut snap = FinancialSnapshot::default();
    snap.balance_sheet.share_capital = dec!(100);
    snap.balance_sheet.cash_and_equivalents = dec!(10);
    snap.balance_sheet.tds_payable = dec!(3);
    snap.msme_payables = dec!(12);

    let ratios = compute_ratios(&snap, None);
    let recs = generate_recommendations(&ratios, &snap, None, &ThresholdTable::default());

    let priorities: Vec<Priority> = recs.iter().map(|r| r.priority).collect();
    assert_eq!(
        priorities,
        vec![Priority::High, Priority::Medium, Priority::Positive]
    );
    assert_eq!(
        titles(&recs),
        vec![
            "TDS Payable Overdue",
            "MSME Payables — 45-Day Compliance",
            "Excellent Leverage Position",
        ]
    );
}

#[test]
fn test_year_over_year_rules() {
    let mut previous = manufacturer();
    previous.financial_year = "2023-24".into();
    previous.profit_loss.revenue_from_operations = dec!(800);
    previous.profit_loss.cogs = dec!(400);
    previous.balance_sheet.share_capital = dec!(100);
    previous.balance_sheet.long_term_borrowings = dec!(150);

    let mut current = manufacturer();
    current.balance_sheet.share_capital = dec!(100);
    current.balance_sheet.long_term_borrowings = dec!(100);
    current.annual_loan_repayment = dec!(50);

    let input = AnalysisInput {
        current,
        previous: Some(previous),
        compliance_flags: None,
    };
    let out = analyze(&input, &ThresholdTable::default()).unwrap();
    let recs = &out.result.recommendations;

    // previous margin: (800-400-150-60-50-40-20)/800 = 10%, now 8%
    assert!(titles(recs).contains(&"Net Margin Declining (2.0pp Drop)"));
    // D/E 1.5 -> 1.0
    assert!(titles(recs).contains(&"Deleveraging on Track"));
    // 800 -> 1000
    assert!(titles(recs).contains(&"Strong Revenue Growth (25.0%)"));
    assert_eq!(out.result.ratios.revenue_growth, Some(dec!(25)));
}

// ===========================================================================
// Score properties
// ===========================================================================

#[test]
fn test_zone_boundaries_have_no_gap() {
    let table = ThresholdTable::default();
    assert_eq!(score_to_zone(dec!(79.99), &table), HealthZone::Good);
    assert_eq!(score_to_zone(dec!(80.0), &table), HealthZone::Excellent);
    assert_eq!(score_to_zone(dec!(100), &table), HealthZone::Excellent);
    assert_eq!(score_to_zone(dec!(59.99), &table), HealthZone::Caution);
    assert_eq!(score_to_zone(dec!(40), &table), HealthZone::Caution);
    assert_eq!(score_to_zone(dec!(39.99), &table), HealthZone::Critical);
    assert_eq!(score_to_zone(Decimal::ZERO, &table), HealthZone::Critical);
}

#[test]
fn test_compliance_score_extremes() {
    let rules = ThresholdTable::default().compliance;
    assert_eq!(compliance_score(&ComplianceFlags::default(), &rules), dec!(100));
    let all = ComplianceFlags {
        tds_overdue: true,
        gst_itc_large: true,
        pf_esi_overdue: true,
        msme_overdue: true,
    };
    assert_eq!(compliance_score(&all, &rules), dec!(10));
}

#[test]
fn test_safe_div_zero_denominator_is_absent() {
    for n in [Decimal::ZERO, dec!(1), dec!(-42.5), Decimal::MAX] {
        assert_eq!(safe_div(n, Decimal::ZERO), None);
    }
}
