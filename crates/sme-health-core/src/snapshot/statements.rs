use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::types::Money;

// ---------------------------------------------------------------------------
// Balance sheet
// ---------------------------------------------------------------------------

/// Schedule III balance sheet line items, in Lakhs.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BalanceSheet {
    // Non-current assets
    pub fixed_assets: Money,
    pub capital_wip: Money,
    pub long_term_investments: Money,
    pub deferred_tax_asset: Money,
    pub long_term_loans_advances: Money,
    pub other_non_current_assets: Money,

    // Current assets
    pub inventories: Money,
    pub trade_receivables: Money,
    pub cash_and_equivalents: Money,
    pub short_term_loans_advances: Money,
    pub gst_itc_receivable: Money,
    pub tds_advance_tax_receivable: Money,
    pub other_current_assets: Money,

    // Equity
    pub share_capital: Money,
    pub reserves_surplus: Money,
    pub money_received_share_warrants: Money,

    // Non-current liabilities
    pub long_term_borrowings: Money,
    pub deferred_tax_liability: Money,
    pub long_term_provisions: Money,

    // Current liabilities
    pub short_term_borrowings: Money,
    pub trade_payables: Money,
    pub gst_payable: Money,
    pub tds_payable: Money,
    pub pf_esi_payable: Money,
    pub advance_from_customers: Money,
    pub other_current_liabilities: Money,
}

impl BalanceSheet {
    pub fn total_non_current_assets(&self) -> Money {
        sum(&[
            self.fixed_assets,
            self.capital_wip,
            self.long_term_investments,
            self.deferred_tax_asset,
            self.long_term_loans_advances,
            self.other_non_current_assets,
        ])
    }

    pub fn total_current_assets(&self) -> Money {
        sum(&[
            self.inventories,
            self.trade_receivables,
            self.cash_and_equivalents,
            self.short_term_loans_advances,
            self.gst_itc_receivable,
            self.tds_advance_tax_receivable,
            self.other_current_assets,
        ])
    }

    pub fn total_assets(&self) -> Money {
        self.total_non_current_assets()
            .saturating_add(self.total_current_assets())
    }

    pub fn total_equity(&self) -> Money {
        sum(&[
            self.share_capital,
            self.reserves_surplus,
            self.money_received_share_warrants,
        ])
    }

    pub fn total_non_current_liabilities(&self) -> Money {
        sum(&[
            self.long_term_borrowings,
            self.deferred_tax_liability,
            self.long_term_provisions,
        ])
    }

    pub fn total_current_liabilities(&self) -> Money {
        sum(&[
            self.short_term_borrowings,
            self.trade_payables,
            self.gst_payable,
            self.tds_payable,
            self.pf_esi_payable,
            self.advance_from_customers,
            self.other_current_liabilities,
        ])
    }

    pub fn total_liabilities_equity(&self) -> Money {
        sum(&[
            self.total_equity(),
            self.total_non_current_liabilities(),
            self.total_current_liabilities(),
        ])
    }

    /// Interest-bearing debt: long-term plus short-term borrowings.
    pub fn total_debt(&self) -> Money {
        self.long_term_borrowings
            .saturating_add(self.short_term_borrowings)
    }

    /// Total assets less current liabilities.
    pub fn capital_employed(&self) -> Money {
        self.total_assets()
            .saturating_sub(self.total_current_liabilities())
    }

    pub fn working_capital(&self) -> Money {
        self.total_current_assets()
            .saturating_sub(self.total_current_liabilities())
    }

    pub(crate) fn amounts(&self) -> [(&'static str, Money); 26] {
        [
            ("fixed_assets", self.fixed_assets),
            ("capital_wip", self.capital_wip),
            ("long_term_investments", self.long_term_investments),
            ("deferred_tax_asset", self.deferred_tax_asset),
            ("long_term_loans_advances", self.long_term_loans_advances),
            ("other_non_current_assets", self.other_non_current_assets),
            ("inventories", self.inventories),
            ("trade_receivables", self.trade_receivables),
            ("cash_and_equivalents", self.cash_and_equivalents),
            ("short_term_loans_advances", self.short_term_loans_advances),
            ("gst_itc_receivable", self.gst_itc_receivable),
            ("tds_advance_tax_receivable", self.tds_advance_tax_receivable),
            ("other_current_assets", self.other_current_assets),
            ("share_capital", self.share_capital),
            ("reserves_surplus", self.reserves_surplus),
            ("money_received_share_warrants", self.money_received_share_warrants),
            ("long_term_borrowings", self.long_term_borrowings),
            ("deferred_tax_liability", self.deferred_tax_liability),
            ("long_term_provisions", self.long_term_provisions),
            ("short_term_borrowings", self.short_term_borrowings),
            ("trade_payables", self.trade_payables),
            ("gst_payable", self.gst_payable),
            ("tds_payable", self.tds_payable),
            ("pf_esi_payable", self.pf_esi_payable),
            ("advance_from_customers", self.advance_from_customers),
            ("other_current_liabilities", self.other_current_liabilities),
        ]
    }
}

// ---------------------------------------------------------------------------
// Profit & loss
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProfitLoss {
    pub revenue_from_operations: Money,
    pub other_income: Money,
    pub cogs: Money,
    pub employee_expenses: Money,
    pub finance_costs: Money,
    pub depreciation: Money,
    pub other_expenses: Money,
    pub tax_expense: Money,
}

impl ProfitLoss {
    pub fn total_revenue(&self) -> Money {
        self.revenue_from_operations.saturating_add(self.other_income)
    }

    pub fn gross_profit(&self) -> Money {
        self.revenue_from_operations.saturating_sub(self.cogs)
    }

    pub fn ebitda(&self) -> Money {
        self.gross_profit()
            .saturating_sub(self.employee_expenses)
            .saturating_sub(self.other_expenses)
    }

    pub fn ebit(&self) -> Money {
        self.ebitda().saturating_sub(self.depreciation)
    }

    /// EBIT less finance costs, plus other income.
    pub fn pbt(&self) -> Money {
        self.ebit()
            .saturating_sub(self.finance_costs)
            .saturating_add(self.other_income)
    }

    pub fn pat(&self) -> Money {
        self.pbt().saturating_sub(self.tax_expense)
    }

    pub(crate) fn amounts(&self) -> [(&'static str, Money); 8] {
        [
            ("revenue_from_operations", self.revenue_from_operations),
            ("other_income", self.other_income),
            ("cogs", self.cogs),
            ("employee_expenses", self.employee_expenses),
            ("finance_costs", self.finance_costs),
            ("depreciation", self.depreciation),
            ("other_expenses", self.other_expenses),
            ("tax_expense", self.tax_expense),
        ]
    }
}

// ---------------------------------------------------------------------------
// Cash flow
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CashFlow {
    pub operating_cf: Money,
    pub investing_cf: Money,
    pub financing_cf: Money,
    /// Capital expenditure as a positive outflow.
    pub capex: Money,
}

impl CashFlow {
    pub fn net_cash_change(&self) -> Money {
        sum(&[self.operating_cf, self.investing_cf, self.financing_cf])
    }

    pub fn free_cash_flow(&self) -> Money {
        self.operating_cf.saturating_sub(self.capex)
    }

    pub(crate) fn amounts(&self) -> [(&'static str, Money); 4] {
        [
            ("operating_cf", self.operating_cf),
            ("investing_cf", self.investing_cf),
            ("financing_cf", self.financing_cf),
            ("capex", self.capex),
        ]
    }
}

// ---------------------------------------------------------------------------
// Debtor ageing
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DebtorAgeing {
    pub zero_to_30: Money,
    pub thirty_to_60: Money,
    pub sixty_to_90: Money,
    pub ninety_to_180: Money,
    pub above_180: Money,
}

impl DebtorAgeing {
    pub fn total(&self) -> Money {
        sum(&[
            self.zero_to_30,
            self.thirty_to_60,
            self.sixty_to_90,
            self.ninety_to_180,
            self.above_180,
        ])
    }

    /// Receivables older than 90 days.
    pub fn overdue_beyond_90(&self) -> Money {
        self.ninety_to_180.saturating_add(self.above_180)
    }

    pub(crate) fn amounts(&self) -> [(&'static str, Money); 5] {
        [
            ("debtor_ageing.zero_to_30", self.zero_to_30),
            ("debtor_ageing.thirty_to_60", self.thirty_to_60),
            ("debtor_ageing.sixty_to_90", self.sixty_to_90),
            ("debtor_ageing.ninety_to_180", self.ninety_to_180),
            ("debtor_ageing.above_180", self.above_180),
        ]
    }
}

/// Sums line items, saturating at the `Decimal` bounds.
fn sum(parts: &[Money]) -> Money {
    parts
        .iter()
        .fold(Decimal::ZERO, |acc, v| acc.saturating_add(*v))
}
