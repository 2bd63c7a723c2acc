use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use super::{Category, Priority, Recommendation};
use crate::ratios::{safe_div, RatioSet};
use crate::snapshot::FinancialSnapshot;
use crate::thresholds::ThresholdTable;

/// Everything a rule may look at.
pub struct RuleContext<'a> {
    pub ratios: &'a RatioSet,
    pub snapshot: &'a FinancialSnapshot,
    pub previous: Option<&'a RatioSet>,
    pub table: &'a ThresholdTable,
}

/// A named predicate-and-template pair.
pub struct Rule {
    pub id: &'static str,
    pub evaluate: fn(&RuleContext<'_>) -> Option<Recommendation>,
}

/// The battery, in authored order. Order within a priority tier is the
/// order users see.
pub const RULES: &[Rule] = &[
    // HIGH
    Rule { id: "pf_esi_outstanding", evaluate: pf_esi_outstanding },
    Rule { id: "tds_outstanding", evaluate: tds_outstanding },
    Rule { id: "dscr_npa_risk", evaluate: dscr_npa_risk },
    Rule { id: "dscr_sub_standard", evaluate: dscr_sub_standard },
    Rule { id: "negative_working_capital", evaluate: negative_working_capital },
    Rule { id: "critical_current_ratio", evaluate: critical_current_ratio },
    Rule { id: "ibc_leverage", evaluate: ibc_leverage },
    Rule { id: "very_high_dso", evaluate: very_high_dso },
    Rule { id: "high_finance_costs", evaluate: high_finance_costs },
    // MEDIUM
    Rule { id: "elevated_dso", evaluate: elevated_dso },
    Rule { id: "long_cash_cycle", evaluate: long_cash_cycle },
    Rule { id: "high_inventory_days", evaluate: high_inventory_days },
    Rule { id: "high_employee_costs", evaluate: high_employee_costs },
    Rule { id: "gst_itc_blocked", evaluate: gst_itc_blocked },
    Rule { id: "net_margin_decline", evaluate: net_margin_decline },
    Rule { id: "thin_interest_coverage", evaluate: thin_interest_coverage },
    Rule { id: "msme_payables", evaluate: msme_payables },
    Rule { id: "promoter_loans", evaluate: promoter_loans },
    // POSITIVE
    Rule { id: "low_leverage", evaluate: low_leverage },
    Rule { id: "deleveraging", evaluate: deleveraging },
    Rule { id: "healthy_current_ratio", evaluate: healthy_current_ratio },
    Rule { id: "comfortable_dscr", evaluate: comfortable_dscr },
    Rule { id: "revenue_growth", evaluate: revenue_growth },
];

/// Round then print with exactly `places` decimals.
fn dp(value: Decimal, places: u32) -> String {
    format!("{:.*}", places as usize, value.round_dp(places))
}

fn share_of_revenue_pct(amount: Decimal, revenue: Decimal) -> Option<Decimal> {
    if revenue <= Decimal::ZERO {
        return None;
    }
    safe_div(amount, revenue)?.checked_mul(dec!(100))
}

// ---------------------------------------------------------------------------
// HIGH
// ---------------------------------------------------------------------------

fn pf_esi_outstanding(ctx: &RuleContext<'_>) -> Option<Recommendation> {
    let payable = ctx.snapshot.balance_sheet.pf_esi_payable;
    (payable > Decimal::ZERO).then(|| {
        Recommendation::new(
            Priority::High,
            Category::Compliance,
            "PF/ESI Payable Outstanding",
            format!(
                "PF/ESI payable of ₹{}L is outstanding. Directors face personal criminal \
                 liability under the EPF Act for defaults. Deposit immediately.",
                dp(payable, 1)
            ),
        )
        .with_impact("Avoid criminal prosecution and penalty interest")
        .with_action("Deposit immediately via EPFO/ESIC portal")
    })
}

fn tds_outstanding(ctx: &RuleContext<'_>) -> Option<Recommendation> {
    let payable = ctx.snapshot.balance_sheet.tds_payable;
    let due_day = ctx.table.compliance.tds_deposit_day;
    (payable > Decimal::ZERO).then(|| {
        Recommendation::new(
            Priority::High,
            Category::Compliance,
            "TDS Payable Overdue",
            format!(
                "TDS payable of ₹{}L outstanding. Interest @1.5% per month under Section 201 \
                 of the IT Act plus potential prosecution of TAN holders.",
                dp(payable, 1)
            ),
        )
        .with_impact("Stop accumulating 1.5%/month interest")
        .with_action(format!("Deposit via NSDL before the {due_day}th of next month"))
    })
}

fn dscr_npa_risk(ctx: &RuleContext<'_>) -> Option<Recommendation> {
    let a = &ctx.table.alerts;
    let dscr = ctx.ratios.dscr.filter(|d| *d < a.dscr_npa)?;
    Some(
        Recommendation::new(
            Priority::High,
            Category::Debt,
            format!("DSCR Below {}x — NPA Risk", dp(a.dscr_npa, 1)),
            format!(
                "DSCR of {}x is below the RBI minimum of {}x. Loan may be classified as NPA. \
                 Operating cash flow cannot cover debt obligations.",
                dp(dscr, 2),
                dp(a.dscr_rbi_minimum, 2)
            ),
        )
        .with_impact("Prevent NPA classification and bank facility withdrawal")
        .with_action("Negotiate loan restructuring or moratorium immediately"),
    )
}

fn dscr_sub_standard(ctx: &RuleContext<'_>) -> Option<Recommendation> {
    let a = &ctx.table.alerts;
    let dscr = ctx
        .ratios
        .dscr
        .filter(|d| *d >= a.dscr_npa && *d < a.dscr_rbi_minimum)?;
    Some(
        Recommendation::new(
            Priority::High,
            Category::Debt,
            format!("DSCR Below RBI Minimum ({}x)", dp(a.dscr_rbi_minimum, 2)),
            format!(
                "DSCR of {}x is in the Sub-Standard zone (RBI norm: >{}x). Risk of NPA \
                 classification within 90 days.",
                dp(dscr, 2),
                dp(a.dscr_rbi_minimum, 2)
            ),
        )
        .with_impact("Protect credit rating and bank relationships")
        .with_action("Accelerate collections, defer non-critical capex"),
    )
}

fn negative_working_capital(ctx: &RuleContext<'_>) -> Option<Recommendation> {
    let wc = ctx.ratios.working_capital.filter(|w| *w < Decimal::ZERO)?;
    Some(
        Recommendation::new(
            Priority::High,
            Category::Liquidity,
            "Negative Working Capital",
            format!(
                "Working capital is negative (₹{}L shortfall). Current liabilities exceed \
                 current assets — short-term solvency crisis.",
                dp(wc.abs(), 1)
            ),
        )
        .with_impact("Prevent payment defaults to vendors and banks")
        .with_action("Accelerate debtor collections, negotiate extended credit from suppliers"),
    )
}

fn critical_current_ratio(ctx: &RuleContext<'_>) -> Option<Recommendation> {
    let a = &ctx.table.alerts;
    let cr = ctx
        .ratios
        .current_ratio
        .filter(|c| *c < a.current_ratio_critical)?;
    Some(
        Recommendation::new(
            Priority::High,
            Category::Liquidity,
            format!("Critical Current Ratio — Below {}x", dp(a.current_ratio_critical, 1)),
            format!(
                "Current ratio of {}x indicates inability to meet short-term obligations \
                 from current assets.",
                dp(cr, 2)
            ),
        )
        .with_impact("Prevent payment defaults and creditor escalations")
        .with_action("Convert short-term debt to long-term, accelerate receivables"),
    )
}

fn ibc_leverage(ctx: &RuleContext<'_>) -> Option<Recommendation> {
    let a = &ctx.table.alerts;
    let de = ctx
        .ratios
        .debt_to_equity
        .filter(|d| *d > a.debt_to_equity_ibc)?;
    Some(
        Recommendation::new(
            Priority::High,
            Category::Debt,
            format!("IBC Risk — D/E Exceeds {}x", dp(a.debt_to_equity_ibc, 0)),
            format!(
                "Debt-to-Equity of {}x. If a creditor default exceeds ₹{} Cr, they can \
                 initiate CIRP under IBC. Seek equity infusion urgently.",
                dp(de, 2),
                ctx.table.compliance.ibc_trigger_crores.normalize()
            ),
        )
        .with_impact("Prevent insolvency proceedings")
        .with_action("Raise equity capital or convert promoter loans to equity"),
    )
}

fn very_high_dso(ctx: &RuleContext<'_>) -> Option<Recommendation> {
    let a = &ctx.table.alerts;
    let dso = ctx.ratios.dso.filter(|d| *d > a.dso_critical)?;
    let bs = &ctx.snapshot.balance_sheet;
    let receivables_pct =
        share_of_revenue_pct(bs.trade_receivables, ctx.snapshot.revenue()).unwrap_or(Decimal::ZERO);
    Some(
        Recommendation::new(
            Priority::High,
            Category::Receivables,
            format!("Very High DSO — {} Days", dp(dso, 0)),
            format!(
                "DSO of {} days with receivables at {}% of revenue indicates serious \
                 collection issues. Risk of bad debt write-offs.",
                dp(dso, 0),
                dp(receivables_pct, 1)
            ),
        )
        .with_impact("Free up working capital, reduce bad debt risk")
        .with_action("Issue demand notices to 90+ day overdue customers; consider factoring"),
    )
}

fn high_finance_costs(ctx: &RuleContext<'_>) -> Option<Recommendation> {
    let limit = ctx.table.alerts.finance_cost_pct;
    let pct = share_of_revenue_pct(
        ctx.snapshot.profit_loss.finance_costs,
        ctx.snapshot.revenue(),
    )
    .filter(|p| *p > limit)?;
    Some(
        Recommendation::new(
            Priority::High,
            Category::Debt,
            format!("Finance Costs Very High ({}% of Revenue)", dp(pct, 1)),
            format!(
                "Finance costs consuming {}% of revenue (threshold: {}%). Severely \
                 compressing net margins.",
                dp(pct, 1),
                limit.normalize()
            ),
        )
        .with_impact("Improve net margin by reducing debt servicing burden")
        .with_action("Refinance at lower rates, prepay high-cost loans with surplus cash"),
    )
}

// ---------------------------------------------------------------------------
// MEDIUM
// ---------------------------------------------------------------------------

fn elevated_dso(ctx: &RuleContext<'_>) -> Option<Recommendation> {
    let a = &ctx.table.alerts;
    let dso = ctx
        .ratios
        .dso
        .filter(|d| *d > a.dso_ideal && *d <= a.dso_critical)?;
    Some(
        Recommendation::new(
            Priority::Medium,
            Category::Receivables,
            format!("DSO at {} Days — Above Ideal", dp(dso, 0)),
            format!(
                "Industry ideal for Indian SMEs is <{} days. DSO of {} days indicates \
                 collections need improvement. Introduce early payment discounts.",
                a.dso_ideal.normalize(),
                dp(dso, 0)
            ),
        )
        .with_impact("Release working capital, reduce CC/OD utilisation")
        .with_action("Offer 1–2% discount for payment within 15 days (2/15, net 45)"),
    )
}

fn long_cash_cycle(ctx: &RuleContext<'_>) -> Option<Recommendation> {
    let ccc = ctx.ratios.ccc.filter(|c| *c > ctx.table.alerts.ccc_max)?;
    Some(
        Recommendation::new(
            Priority::Medium,
            Category::Efficiency,
            format!("Cash Conversion Cycle Too Long ({} Days)", dp(ccc, 0)),
            format!(
                "CCC of {} days means it takes over {} months to convert inventory \
                 investment back to cash. High working capital requirement.",
                dp(ccc, 0),
                dp(ccc / dec!(30), 1)
            ),
        )
        .with_impact("Reduce working capital borrowing needs")
        .with_action("Reduce inventory holding; negotiate better supplier terms"),
    )
}

fn high_inventory_days(ctx: &RuleContext<'_>) -> Option<Recommendation> {
    let dio = ctx.ratios.dio.filter(|d| *d > ctx.table.alerts.dio_max)?;
    Some(
        Recommendation::new(
            Priority::Medium,
            Category::Efficiency,
            format!("High Inventory Days ({} Days)", dp(dio, 0)),
            format!(
                "Inventory held for {} days before sale. Excess stock increases storage \
                 costs and obsolescence risk.",
                dp(dio, 0)
            ),
        )
        .with_impact("Release cash locked in inventory")
        .with_action("Implement JIT ordering, identify slow-moving SKUs for liquidation"),
    )
}

fn high_employee_costs(ctx: &RuleContext<'_>) -> Option<Recommendation> {
    let limit = ctx.table.alerts.employee_cost_pct;
    let pct = share_of_revenue_pct(
        ctx.snapshot.profit_loss.employee_expenses,
        ctx.snapshot.revenue(),
    )
    .filter(|p| *p > limit)?;
    Some(
        Recommendation::new(
            Priority::Medium,
            Category::Expenses,
            format!("Employee Costs High ({}% of Revenue)", dp(pct, 1)),
            format!(
                "Labour costs at {}% of revenue (threshold: {}%). Review staffing \
                 efficiency or automate repetitive tasks.",
                dp(pct, 1),
                limit.normalize()
            ),
        )
        .with_impact("Improve EBITDA margin by 3–5 percentage points")
        .with_action("Conduct productivity analysis; explore automation ROI"),
    )
}

fn gst_itc_blocked(ctx: &RuleContext<'_>) -> Option<Recommendation> {
    let itc = ctx.snapshot.balance_sheet.gst_itc_receivable;
    let revenue = ctx.snapshot.revenue();
    if itc <= Decimal::ZERO || revenue <= Decimal::ZERO {
        return None;
    }
    let limit = ctx.table.compliance.gst_itc_months;
    let months = safe_div(itc, revenue / dec!(12)).filter(|m| *m > limit)?;
    Some(
        Recommendation::new(
            Priority::Medium,
            Category::Compliance,
            format!("GST ITC Blocked — {} Months of Purchases", dp(months, 1)),
            format!(
                "₹{}L of GST Input Tax Credit is blocked. More than {} months of ITC not \
                 utilised. This is locked working capital.",
                dp(itc, 1),
                limit.normalize()
            ),
        )
        .with_impact(format!("Release ₹{}L of cash blocked with government", dp(itc, 1)))
        .with_action("Reconcile GSTR-2B vs books; utilise ITC against GST liability"),
    )
}

fn net_margin_decline(ctx: &RuleContext<'_>) -> Option<Recommendation> {
    let current = ctx.ratios.net_margin?;
    let previous = ctx.previous?.net_margin?;
    let decline = previous.checked_sub(current)?;
    if decline <= ctx.table.alerts.net_margin_decline_pp {
        return None;
    }
    Some(
        Recommendation::new(
            Priority::Medium,
            Category::Profitability,
            format!("Net Margin Declining ({}pp Drop)", dp(decline, 1)),
            format!(
                "Net margin fell from {}% to {}%. Review cost structure — identify if it's \
                 input cost pressure, labour, or finance costs.",
                dp(previous, 1),
                dp(current, 1)
            ),
        )
        .with_impact("Restore profitability to prior year levels")
        .with_action("Cost reduction task force; price revision for key products"),
    )
}

fn thin_interest_coverage(ctx: &RuleContext<'_>) -> Option<Recommendation> {
    let a = &ctx.table.alerts;
    let icr = ctx.ratios.interest_coverage.filter(|i| {
        *i > a.interest_coverage_thin_low && *i < a.interest_coverage_thin_high
    })?;
    Some(
        Recommendation::new(
            Priority::Medium,
            Category::Debt,
            format!("Interest Coverage Ratio Thin ({}x)", dp(icr, 2)),
            format!(
                "ICR of {}x is above minimum but thin. A revenue dip of >25% would make \
                 interest coverage dangerous.",
                dp(icr, 2)
            ),
        )
        .with_impact("Build buffer against revenue volatility")
        .with_action("Consider fixed-rate refinancing to reduce rate risk"),
    )
}

fn msme_payables(ctx: &RuleContext<'_>) -> Option<Recommendation> {
    let payables = ctx.snapshot.msme_payables;
    if payables <= Decimal::ZERO {
        return None;
    }
    let days = ctx.table.compliance.msme_payment_days;
    Some(
        Recommendation::new(
            Priority::Medium,
            Category::Compliance,
            format!("MSME Payables — {days}-Day Compliance"),
            format!(
                "₹{}L due to MSME suppliers. Under MSME Act Section 15, payment must be made \
                 within {days} days. Overdue attracts compound interest @3× bank rate.",
                dp(payables, 1)
            ),
        )
        .with_impact("Avoid mandatory interest payment to MSME suppliers")
        .with_action("Prioritise MSME supplier payments; file Form MSME-1 if overdue"),
    )
}

fn promoter_loans(ctx: &RuleContext<'_>) -> Option<Recommendation> {
    let loans = ctx.snapshot.promoter_loans;
    let total_debt = ctx.snapshot.balance_sheet.total_debt();
    let share = ctx.table.alerts.promoter_loan_share;
    if loans <= Decimal::ZERO || loans <= total_debt.checked_mul(share)? {
        return None;
    }
    Some(
        Recommendation::new(
            Priority::Medium,
            Category::Debt,
            format!("High Promoter Loans — ₹{}L", dp(loans, 1)),
            format!(
                "Promoter/director loans exceeding {}% of total debt are scrutinised by banks \
                 and investors. Ensure proper documentation, board resolution, and RBI \
                 compliance for unsecured loans.",
                share.saturating_mul(dec!(100)).normalize()
            ),
        )
        .with_impact("Improve creditworthiness and governance")
        .with_action(
            "Convert promoter loans to equity; ensure documentation under Companies Act Sec 185/186",
        ),
    )
}

// ---------------------------------------------------------------------------
// POSITIVE
// ---------------------------------------------------------------------------

fn low_leverage(ctx: &RuleContext<'_>) -> Option<Recommendation> {
    let de = ctx
        .ratios
        .debt_to_equity
        .filter(|d| *d < ctx.table.alerts.debt_to_equity_low)?;
    Some(
        Recommendation::new(
            Priority::Positive,
            Category::Debt,
            "Excellent Leverage Position",
            format!(
                "D/E of {}x is well below 1x. Company has strong capacity to raise debt for \
                 growth if needed.",
                dp(de, 2)
            ),
        )
        .with_action("Consider leveraged growth — take on project-linked debt with clear ROI"),
    )
}

fn deleveraging(ctx: &RuleContext<'_>) -> Option<Recommendation> {
    let current = ctx.ratios.debt_to_equity?;
    let previous = ctx.previous?.debt_to_equity?;
    if previous.checked_sub(current)? <= ctx.table.alerts.deleveraging_step {
        return None;
    }
    Some(
        Recommendation::new(
            Priority::Positive,
            Category::Debt,
            "Deleveraging on Track",
            format!(
                "D/E improved from {}x to {}x. Debt reduction strategy is working.",
                dp(previous, 2),
                dp(current, 2)
            ),
        )
        .with_action("Continue debt repayment from operating cash flow"),
    )
}

fn healthy_current_ratio(ctx: &RuleContext<'_>) -> Option<Recommendation> {
    let a = &ctx.table.alerts;
    let cr = ctx.ratios.current_ratio.filter(|c| {
        *c >= a.current_ratio_healthy_low && *c <= a.current_ratio_healthy_high
    })?;
    Some(
        Recommendation::new(
            Priority::Positive,
            Category::Liquidity,
            "Healthy Liquidity Position",
            format!(
                "Current ratio of {}x is in the ideal range ({}–{}x). Short-term solvency \
                 is strong.",
                dp(cr, 2),
                a.current_ratio_healthy_low.normalize(),
                a.current_ratio_healthy_high.normalize()
            ),
        )
        .with_action("Maintain working capital discipline; avoid over-stocking"),
    )
}

fn comfortable_dscr(ctx: &RuleContext<'_>) -> Option<Recommendation> {
    let a = &ctx.table.alerts;
    let dscr = ctx.ratios.dscr.filter(|d| *d >= a.dscr_comfortable)?;
    Some(
        Recommendation::new(
            Priority::Positive,
            Category::Debt,
            format!("Comfortable Debt Coverage (DSCR {}x)", dp(dscr, 2)),
            format!(
                "DSCR of {}x comfortably exceeds the RBI minimum of {}x. Loan accounts are \
                 in Standard category.",
                dp(dscr, 2),
                dp(a.dscr_rbi_minimum, 2)
            ),
        )
        .with_action("Maintain by protecting EBITDA margins"),
    )
}

fn revenue_growth(ctx: &RuleContext<'_>) -> Option<Recommendation> {
    let growth = ctx
        .ratios
        .revenue_growth
        .filter(|g| *g > ctx.table.alerts.revenue_growth_pct)?;
    Some(
        Recommendation::new(
            Priority::Positive,
            Category::Growth,
            format!("Strong Revenue Growth ({}%)", dp(growth, 1)),
            format!(
                "Revenue grew {}% year-over-year. Make sure working capital limits and \
                 capacity keep pace with the top line.",
                dp(growth, 1)
            ),
        )
        .with_action("Review CC/OD limits with the bank ahead of the next growth phase"),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fired(ratios: &RatioSet, snapshot: &FinancialSnapshot, previous: Option<&RatioSet>) -> Vec<&'static str> {
        let table = ThresholdTable::default();
        let ctx = RuleContext {
            ratios,
            snapshot,
            previous,
            table: &table,
        };
        RULES
            .iter()
            .filter(|rule| (rule.evaluate)(&ctx).is_some())
            .map(|rule| rule.id)
            .collect()
    }

    fn with_dscr(dscr: Decimal) -> RatioSet {
        RatioSet {
            dscr: Some(dscr),
            ..Default::default()
        }
    }

    #[test]
    fn test_rule_ids_unique() {
        let mut ids: Vec<&str> = RULES.iter().map(|r| r.id).collect();
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), RULES.len());
    }

    #[test]
    fn test_dscr_bands() {
        let snap = FinancialSnapshot::default();
        assert_eq!(fired(&with_dscr(dec!(0.99)), &snap, None), vec!["dscr_npa_risk"]);
        assert_eq!(fired(&with_dscr(dec!(1.0)), &snap, None), vec!["dscr_sub_standard"]);
        assert_eq!(fired(&with_dscr(dec!(1.24)), &snap, None), vec!["dscr_sub_standard"]);
        assert!(fired(&with_dscr(dec!(1.25)), &snap, None).is_empty());
        assert!(fired(&with_dscr(dec!(1.49)), &snap, None).is_empty());
        assert_eq!(fired(&with_dscr(dec!(1.5)), &snap, None), vec!["comfortable_dscr"]);
    }

    #[test]
    fn test_dso_bands() {
        let snap = FinancialSnapshot::default();
        let at = |d: Decimal| RatioSet {
            dso: Some(d),
            ..Default::default()
        };
        assert!(fired(&at(dec!(60)), &snap, None).is_empty());
        assert_eq!(fired(&at(dec!(60.1)), &snap, None), vec!["elevated_dso"]);
        assert_eq!(fired(&at(dec!(120)), &snap, None), vec!["elevated_dso"]);
        assert_eq!(fired(&at(dec!(120.1)), &snap, None), vec!["very_high_dso"]);
    }

    #[test]
    fn test_current_ratio_bands() {
        let snap = FinancialSnapshot::default();
        let at = |c: Decimal| RatioSet {
            current_ratio: Some(c),
            ..Default::default()
        };
        assert_eq!(fired(&at(dec!(0.99)), &snap, None), vec!["critical_current_ratio"]);
        assert!(fired(&at(dec!(1.0)), &snap, None).is_empty());
        assert_eq!(fired(&at(dec!(1.5)), &snap, None), vec!["healthy_current_ratio"]);
        assert_eq!(fired(&at(dec!(2.5)), &snap, None), vec!["healthy_current_ratio"]);
        assert!(fired(&at(dec!(2.51)), &snap, None).is_empty());
    }

    #[test]
    fn test_leverage_bands() {
        let snap = FinancialSnapshot::default();
        let at = |d: Decimal| RatioSet {
            debt_to_equity: Some(d),
            ..Default::default()
        };
        assert_eq!(fired(&at(dec!(3.01)), &snap, None), vec!["ibc_leverage"]);
        assert!(fired(&at(dec!(3.0)), &snap, None).is_empty());
        assert!(fired(&at(dec!(0.5)), &snap, None).is_empty());
        assert_eq!(fired(&at(dec!(0.49)), &snap, None), vec!["low_leverage"]);
    }

    #[test]
    fn test_interest_coverage_thin_band_is_open() {
        let snap = FinancialSnapshot::default();
        let at = |i: Decimal| RatioSet {
            interest_coverage: Some(i),
            ..Default::default()
        };
        assert!(fired(&at(dec!(1.5)), &snap, None).is_empty());
        assert_eq!(fired(&at(dec!(2.0)), &snap, None), vec!["thin_interest_coverage"]);
        assert!(fired(&at(dec!(3.0)), &snap, None).is_empty());
    }

    #[test]
    fn test_expense_share_rules() {
        let mut snap = FinancialSnapshot::default();
        snap.profit_loss.revenue_from_operations = dec!(1000);
        snap.profit_loss.finance_costs = dec!(80);
        snap.profit_loss.employee_expenses = dec!(300);
        // exactly at both limits: silent
        assert!(fired(&RatioSet::default(), &snap, None).is_empty());

        snap.profit_loss.finance_costs = dec!(81);
        snap.profit_loss.employee_expenses = dec!(301);
        assert_eq!(
            fired(&RatioSet::default(), &snap, None),
            vec!["high_finance_costs", "high_employee_costs"]
        );
    }

    #[test]
    fn test_gst_itc_months() {
        let mut snap = FinancialSnapshot::default();
        snap.profit_loss.revenue_from_operations = dec!(1200);
        snap.balance_sheet.gst_itc_receivable = dec!(300);
        assert!(fired(&RatioSet::default(), &snap, None).is_empty());
        snap.balance_sheet.gst_itc_receivable = dec!(310);
        assert_eq!(fired(&RatioSet::default(), &snap, None), vec!["gst_itc_blocked"]);
    }

    #[test]
    fn test_year_over_year_rules_need_previous() {
        let snap = FinancialSnapshot::default();
        let current = RatioSet {
            net_margin: Some(dec!(5)),
            debt_to_equity: Some(dec!(1.2)),
            ..Default::default()
        };
        let previous = RatioSet {
            net_margin: Some(dec!(7)),
            debt_to_equity: Some(dec!(1.5)),
            ..Default::default()
        };
        assert!(fired(&current, &snap, None).is_empty());
        assert_eq!(
            fired(&current, &snap, Some(&previous)),
            vec!["net_margin_decline", "deleveraging"]
        );

        // 1.5pp exactly and 0.2x exactly do not fire
        let previous = RatioSet {
            net_margin: Some(dec!(6.5)),
            debt_to_equity: Some(dec!(1.4)),
            ..Default::default()
        };
        assert!(fired(&current, &snap, Some(&previous)).is_empty());
    }

    #[test]
    fn test_year_over_year_rules_skip_out_of_range_deltas() {
        let snap = FinancialSnapshot::default();
        let huge = dec!(50_000_000_000_000_000_000_000_000_000);
        let current = RatioSet {
            net_margin: Some(-huge),
            debt_to_equity: Some(-huge),
            ..Default::default()
        };
        let previous = RatioSet {
            net_margin: Some(huge),
            debt_to_equity: Some(huge),
            ..Default::default()
        };
        // The difference does not fit in a Decimal, so neither trend rule fires.
        assert_eq!(fired(&current, &snap, Some(&previous)), vec!["low_leverage"]);
    }

    #[test]
    fn test_share_of_revenue_out_of_range_is_absent() {
        assert_eq!(share_of_revenue_pct(Decimal::MAX, dec!(0.5)), None);
        assert_eq!(share_of_revenue_pct(dec!(10), Decimal::ZERO), None);
        assert_eq!(share_of_revenue_pct(dec!(10), dec!(200)), Some(dec!(5)));

        let mut snap = FinancialSnapshot::default();
        snap.profit_loss.revenue_from_operations = dec!(0.5);
        snap.profit_loss.finance_costs = Decimal::MAX;
        snap.profit_loss.employee_expenses = Decimal::MAX;
        assert!(fired(&RatioSet::default(), &snap, None).is_empty());
    }

    #[test]
    fn test_promoter_loans_skip_when_threshold_overflows() {
        let mut table = ThresholdTable::default();
        table.alerts.promoter_loan_share = dec!(5);
        let mut snap = FinancialSnapshot::default();
        snap.balance_sheet.long_term_borrowings = Decimal::MAX;
        snap.promoter_loans = dec!(25);
        let ratios = RatioSet::default();
        let ctx = RuleContext {
            ratios: &ratios,
            snapshot: &snap,
            previous: None,
            table: &table,
        };
        assert!(promoter_loans(&ctx).is_none());
    }

    #[test]
    fn test_promoter_loans_share_of_debt() {
        let mut snap = FinancialSnapshot::default();
        snap.balance_sheet.long_term_borrowings = dec!(100);
        snap.promoter_loans = dec!(20);
        assert!(fired(&RatioSet::default(), &snap, None).is_empty());
        snap.promoter_loans = dec!(25);
        assert_eq!(fired(&RatioSet::default(), &snap, None), vec!["promoter_loans"]);
    }

    #[test]
    fn test_templates_interpolate_values() {
        let table = ThresholdTable::default();
        let snap = FinancialSnapshot::default();
        let ratios = with_dscr(dec!(0.8));
        let ctx = RuleContext {
            ratios: &ratios,
            snapshot: &snap,
            previous: None,
            table: &table,
        };
        let rec = dscr_npa_risk(&ctx).unwrap();
        assert_eq!(rec.title, "DSCR Below 1.0x — NPA Risk");
        assert!(rec.description.starts_with("DSCR of 0.80x is below the RBI minimum of 1.25x."));
    }

    #[test]
    fn test_dp_pads_and_rounds() {
        assert_eq!(dp(dec!(1.5), 2), "1.50");
        assert_eq!(dp(dec!(91.25), 1), "91.2");
        assert_eq!(dp(dec!(73), 0), "73");
    }
}
