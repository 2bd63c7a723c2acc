use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use super::RatioSet;
use crate::snapshot::FinancialSnapshot;
use crate::types::Money;

/// Share of revenue assumed as COGS when none is reported.
pub const COGS_FALLBACK_SHARE: Decimal = dec!(0.6);

/// Share of total debt assumed repaid each year when no schedule is reported.
pub const REPAYMENT_FALLBACK_SHARE: Decimal = dec!(0.15);

/// Face value per share used to turn share capital into a share count.
pub const FACE_VALUE_PER_SHARE: Decimal = dec!(10);

const DAYS_IN_YEAR: Decimal = dec!(365);
const HUNDRED: Decimal = dec!(100);

// ---------------------------------------------------------------------------
// Guarded arithmetic
// ---------------------------------------------------------------------------

/// Divide, or `None` when the denominator is zero or the quotient overflows.
pub fn safe_div(numerator: Decimal, denominator: Decimal) -> Option<Decimal> {
    if denominator.is_zero() {
        return None;
    }
    numerator.checked_div(denominator)
}

fn percent(numerator: Decimal, denominator: Decimal) -> Option<Decimal> {
    safe_div(numerator, denominator)?.checked_mul(HUNDRED)
}

fn days(numerator: Decimal, denominator: Decimal) -> Option<Decimal> {
    safe_div(numerator, denominator)?.checked_mul(DAYS_IN_YEAR)
}

/// Two-point average when a prior balance exists, else the current balance.
fn average(current: Money, previous: Option<Money>) -> Money {
    match previous {
        Some(prev) => current.saturating_add(prev) / dec!(2),
        None => current,
    }
}

fn dp2(value: Option<Decimal>) -> Option<Decimal> {
    value.map(|v| v.round_dp(2))
}

fn dp1(value: Option<Decimal>) -> Option<Decimal> {
    value.map(|v| v.round_dp(1))
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Derive every ratio for `current`, averaging balance-sheet items with
/// `previous` where the ratio conventionally uses an average balance.
///
/// Without a previous snapshot the closing balance stands in for the
/// average. That is an approximation: it overstates turnover for a growing
/// company and understates it for a shrinking one.
///
/// Total over any input: degenerate snapshots produce `None` ratios, never a
/// panic.
pub fn compute_ratios(
    current: &FinancialSnapshot,
    previous: Option<&FinancialSnapshot>,
) -> RatioSet {
    let bs = &current.balance_sheet;
    let pl = &current.profit_loss;
    let cf = &current.cash_flow;
    let prev_bs = previous.map(|p| &p.balance_sheet);

    let revenue = pl.revenue_from_operations;
    let ebitda = pl.ebitda();
    let ebit = pl.ebit();
    let pat = pl.pat();

    let total_assets = bs.total_assets();
    let total_equity = bs.total_equity();
    let current_assets = bs.total_current_assets();
    let current_liabilities = bs.total_current_liabilities();
    let total_debt = bs.total_debt();
    let capital_employed = bs.capital_employed();

    // -- Average balances -----------------------------------------------------
    let avg_assets = average(total_assets, prev_bs.map(|p| p.total_assets()));
    let avg_equity = average(total_equity, prev_bs.map(|p| p.total_equity()));
    let avg_inventory = average(bs.inventories, prev_bs.map(|p| p.inventories));
    let avg_receivables = average(bs.trade_receivables, prev_bs.map(|p| p.trade_receivables));
    let avg_payables = average(bs.trade_payables, prev_bs.map(|p| p.trade_payables));

    // -- Profitability --------------------------------------------------------
    let gross_margin = percent(pl.gross_profit(), revenue);
    let net_margin = percent(pat, revenue);
    let ebitda_margin = percent(ebitda, revenue);
    let ebit_margin = percent(ebit, revenue);
    let roe = percent(pat, avg_equity);
    let roa = percent(pat, avg_assets);
    let roce = percent(ebit, capital_employed);
    let eps = safe_div(bs.share_capital, FACE_VALUE_PER_SHARE).and_then(|shares| safe_div(pat, shares));

    // -- Liquidity ------------------------------------------------------------
    let current_ratio = safe_div(current_assets, current_liabilities);
    let quick_ratio = safe_div(current_assets.saturating_sub(bs.inventories), current_liabilities);
    let cash_ratio = safe_div(bs.cash_and_equivalents, current_liabilities);
    let working_capital = current_assets.saturating_sub(current_liabilities);

    // -- Leverage -------------------------------------------------------------
    let debt_to_equity = safe_div(total_debt, total_equity);
    let debt_ratio = safe_div(total_debt, total_assets);
    let interest_coverage = safe_div(ebit, pl.finance_costs);

    // DSCR: (PAT + depreciation) / (principal repaid + interest)
    let repayment_estimated = current.annual_loan_repayment.is_zero() && !total_debt.is_zero();
    let annual_repayment = if current.annual_loan_repayment.is_zero() {
        total_debt.saturating_mul(REPAYMENT_FALLBACK_SHARE)
    } else {
        current.annual_loan_repayment
    };
    let dscr = safe_div(
        pat.saturating_add(pl.depreciation),
        annual_repayment.saturating_add(pl.finance_costs),
    );

    let net_debt = total_debt.saturating_sub(bs.cash_and_equivalents);
    let net_debt_to_ebitda = safe_div(net_debt, ebitda);

    // -- Efficiency -----------------------------------------------------------
    let cogs_estimated = pl.cogs.is_zero() && !revenue.is_zero();
    let cogs = if pl.cogs.is_zero() {
        revenue.saturating_mul(COGS_FALLBACK_SHARE)
    } else {
        pl.cogs
    };

    let dso = days(avg_receivables, revenue);
    let dpo = days(avg_payables, cogs);
    let inventory_turnover = safe_div(cogs, avg_inventory);
    let dio = inventory_turnover.and_then(|turns| safe_div(DAYS_IN_YEAR, turns));
    // Absent when any leg is missing or the sum leaves the Decimal range.
    let ccc = match (dso, dio, dpo) {
        (Some(s), Some(i), Some(p)) => s.checked_add(i).and_then(|v| v.checked_sub(p)),
        _ => None,
    };
    let asset_turnover = safe_div(revenue, avg_assets);
    let fixed_asset_turnover = safe_div(revenue, bs.fixed_assets);
    let capital_productivity = safe_div(revenue, capital_employed);

    // -- Cash flow ------------------------------------------------------------
    let ocf_margin = percent(cf.operating_cf, revenue);
    let fcf = cf.free_cash_flow();
    let cf_to_debt = safe_div(cf.operating_cf, total_debt);
    let cash_conversion_ratio = safe_div(cf.operating_cf, ebitda);
    let capex_intensity = percent(cf.capex, revenue);

    // -- Growth ---------------------------------------------------------------
    let revenue_growth = previous.and_then(|p| {
        let prev_revenue = p.profit_loss.revenue_from_operations;
        percent(revenue.saturating_sub(prev_revenue), prev_revenue)
    });

    tracing::debug!(
        company = %current.company_name,
        year = %current.financial_year,
        averaged = previous.is_some(),
        cogs_estimated,
        repayment_estimated,
        "ratios computed"
    );

    RatioSet {
        gross_margin: dp2(gross_margin),
        net_margin: dp2(net_margin),
        ebitda_margin: dp2(ebitda_margin),
        ebit_margin: dp2(ebit_margin),
        roe: dp2(roe),
        roa: dp2(roa),
        roce: dp2(roce),
        eps: dp2(eps),

        current_ratio: dp2(current_ratio),
        quick_ratio: dp2(quick_ratio),
        cash_ratio: dp2(cash_ratio),
        working_capital: dp2(Some(working_capital)),

        debt_to_equity: dp2(debt_to_equity),
        debt_ratio: dp2(debt_ratio),
        interest_coverage: dp2(interest_coverage),
        dscr: dp2(dscr),
        net_debt: dp2(Some(net_debt)),
        net_debt_to_ebitda: dp2(net_debt_to_ebitda),
        total_debt: dp2(Some(total_debt)),

        dso: dp1(dso),
        dpo: dp1(dpo),
        dio: dp1(dio),
        ccc: dp1(ccc),
        asset_turnover: dp2(asset_turnover),
        inventory_turnover: dp2(inventory_turnover),
        fixed_asset_turnover: dp2(fixed_asset_turnover),
        capital_productivity: dp2(capital_productivity),

        ocf_margin: dp2(ocf_margin),
        fcf: dp2(Some(fcf)),
        cf_to_debt: dp2(cf_to_debt),
        cash_conversion_ratio: dp2(cash_conversion_ratio),
        capex_intensity: dp2(capex_intensity),

        revenue_growth: dp2(revenue_growth),

        cogs_estimated,
        repayment_estimated,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::snapshot::{BalanceSheet, CashFlow, ProfitLoss};

    fn sample_snapshot() -> FinancialSnapshot {
        FinancialSnapshot {
            company_name: "Shree Ganesh Fabricators Pvt Ltd".into(),
            financial_year: "2024-25".into(),
            balance_sheet: BalanceSheet {
                fixed_assets: dec!(400),
                inventories: dec!(150),
                trade_receivables: dec!(200),
                cash_and_equivalents: dec!(50),
                share_capital: dec!(100),
                reserves_surplus: dec!(300),
                long_term_borrowings: dec!(200),
                short_term_borrowings: dec!(100),
                trade_payables: dec!(120),
                other_current_liabilities: dec!(30),
                ..Default::default()
            },
            profit_loss: ProfitLoss {
                revenue_from_operations: dec!(1000),
                other_income: Decimal::ZERO,
                cogs: dec!(600),
                employee_expenses: dec!(150),
                finance_costs: dec!(40),
                depreciation: dec!(50),
                other_expenses: dec!(60),
                tax_expense: dec!(20),
            },
            cash_flow: CashFlow {
                operating_cf: dec!(120),
                investing_cf: dec!(-80),
                financing_cf: dec!(-20),
                capex: dec!(80),
            },
            ..Default::default()
        }
    }

    #[test]
    fn test_safe_div_zero_denominator_is_absent() {
        assert_eq!(safe_div(dec!(5), Decimal::ZERO), None);
        assert_eq!(safe_div(Decimal::ZERO, Decimal::ZERO), None);
        assert_eq!(safe_div(dec!(-7), Decimal::ZERO), None);
        assert_eq!(safe_div(dec!(6), dec!(3)), Some(dec!(2)));
    }

    #[test]
    fn test_safe_div_overflow_is_absent() {
        assert_eq!(safe_div(Decimal::MAX, dec!(0.0001)), None);
    }

    #[test]
    fn test_profitability_scenario() {
        let r = compute_ratios(&sample_snapshot(), None);
        assert_eq!(r.net_margin, Some(dec!(8)));
        assert_eq!(r.gross_margin, Some(dec!(40)));
        assert_eq!(r.ebitda_margin, Some(dec!(19)));
        assert_eq!(r.ebit_margin, Some(dec!(14)));
        // ROE = 80 / 400
        assert_eq!(r.roe, Some(dec!(20)));
        // ROA = 80 / 800
        assert_eq!(r.roa, Some(dec!(10)));
        // Capital employed = 800 - 250 = 550; ROCE = 140 / 550
        assert_eq!(r.roce, Some(dec!(25.45)));
        // 10 lakh shares at ₹10 face value
        assert_eq!(r.eps, Some(dec!(8)));
    }

    #[test]
    fn test_liquidity_and_leverage() {
        let r = compute_ratios(&sample_snapshot(), None);
        // CA = 400, CL = 250
        assert_eq!(r.current_ratio, Some(dec!(1.6)));
        assert_eq!(r.quick_ratio, Some(dec!(1.0)));
        assert_eq!(r.cash_ratio, Some(dec!(0.2)));
        assert_eq!(r.working_capital, Some(dec!(150)));
        assert_eq!(r.debt_to_equity, Some(dec!(0.75)));
        assert_eq!(r.debt_ratio, Some(dec!(0.38)));
        assert_eq!(r.interest_coverage, Some(dec!(3.5)));
        assert_eq!(r.net_debt, Some(dec!(250)));
        assert_eq!(r.total_debt, Some(dec!(300)));
    }

    #[test]
    fn test_dscr_with_estimated_repayment() {
        let r = compute_ratios(&sample_snapshot(), None);
        // (80 + 50) / (0.15 * 300 + 40) = 130 / 85
        assert_eq!(r.dscr, Some(dec!(1.53)));
        assert!(r.repayment_estimated);
    }

    #[test]
    fn test_dscr_with_reported_repayment() {
        let mut snap = sample_snapshot();
        snap.annual_loan_repayment = dec!(60);
        let r = compute_ratios(&snap, None);
        // 130 / 100
        assert_eq!(r.dscr, Some(dec!(1.3)));
        assert!(!r.repayment_estimated);
    }

    #[test]
    fn test_efficiency_days() {
        let r = compute_ratios(&sample_snapshot(), None);
        // 200 / 1000 * 365
        assert_eq!(r.dso, Some(dec!(73)));
        // 120 / 600 * 365
        assert_eq!(r.dpo, Some(dec!(73)));
        // turnover 600 / 150 = 4, DIO = 91.25 -> 91.2 (half-even)
        assert_eq!(r.inventory_turnover, Some(dec!(4)));
        assert_eq!(r.dio, Some(dec!(91.2)));
        // CCC from unrounded parts: 73 + 91.25 - 73
        assert_eq!(r.ccc, Some(dec!(91.2)));
    }

    #[test]
    fn test_cogs_fallback_flagged() {
        let mut snap = sample_snapshot();
        snap.profit_loss.cogs = Decimal::ZERO;
        let r = compute_ratios(&snap, None);
        assert!(r.cogs_estimated);
        // COGS estimate 600 -> same turnover as the reported case
        assert_eq!(r.inventory_turnover, Some(dec!(4)));
        // Gross margin still uses the reported (zero) COGS
        assert_eq!(r.gross_margin, Some(dec!(100)));
    }

    #[test]
    fn test_averages_use_previous_year() {
        let current = sample_snapshot();
        let mut prev = sample_snapshot();
        prev.financial_year = "2023-24".into();
        prev.balance_sheet.trade_receivables = dec!(100);
        prev.profit_loss.revenue_from_operations = dec!(800);
        let r = compute_ratios(&current, Some(&prev));
        // avg receivables 150 -> 150 / 1000 * 365
        assert_eq!(r.dso, Some(dec!(54.8)));
        assert_eq!(r.revenue_growth, Some(dec!(25)));
    }

    #[test]
    fn test_empty_snapshot_is_all_absent_not_panicking() {
        let r = compute_ratios(&FinancialSnapshot::default(), None);
        assert_eq!(r.net_margin, None);
        assert_eq!(r.current_ratio, None);
        assert_eq!(r.dscr, None);
        assert_eq!(r.dso, None);
        assert_eq!(r.ccc, None);
        assert_eq!(r.eps, None);
        assert_eq!(r.working_capital, Some(Decimal::ZERO));
        assert!(!r.cogs_estimated);
        assert!(!r.repayment_estimated);
    }

    #[test]
    fn test_negative_equity_passes_through() {
        let mut snap = sample_snapshot();
        snap.balance_sheet.reserves_surplus = dec!(-700);
        let r = compute_ratios(&snap, None);
        // equity = -600 -> D/E = 300 / -600
        assert_eq!(r.debt_to_equity, Some(dec!(-0.5)));
    }

    #[test]
    fn test_ccc_absent_without_inventory() {
        let mut snap = sample_snapshot();
        snap.balance_sheet.inventories = Decimal::ZERO;
        let r = compute_ratios(&snap, None);
        assert_eq!(r.dio, None);
        assert_eq!(r.ccc, None);
        assert!(r.dso.is_some() && r.dpo.is_some());
    }

    #[test]
    fn test_ccc_absent_when_legs_overflow() {
        // DSO and DIO each land near 4.56e28 days; their sum leaves the range.
        let snap = FinancialSnapshot {
            balance_sheet: BalanceSheet {
                trade_receivables: dec!(1_000_000_000_000_000),
                inventories: dec!(1_000_000_000_000_000),
                ..Default::default()
            },
            profit_loss: ProfitLoss {
                revenue_from_operations: dec!(0.000000000008),
                cogs: dec!(0.000000000008),
                ..Default::default()
            },
            ..Default::default()
        };
        let r = compute_ratios(&snap, None);
        assert!(r.dso.is_some());
        assert!(r.dio.is_some());
        assert_eq!(r.dpo, Some(Decimal::ZERO));
        assert_eq!(r.ccc, None);
    }

    #[test]
    fn test_average_saturates() {
        assert_eq!(average(Decimal::MAX, Some(Decimal::MAX)), Decimal::MAX / dec!(2));
        assert_eq!(average(dec!(10), Some(dec!(20))), dec!(15));
        assert_eq!(average(dec!(10), None), dec!(10));
    }
}
