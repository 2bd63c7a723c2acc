//! Single-company financial snapshot: the immutable input to every stage.
//!
//! All amounts share one unit, Lakhs of INR. Aggregates (total assets,
//! EBITDA, ...) are methods over the leaf fields and are never stored.

pub mod fiscal_year;
pub mod statements;

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

pub use fiscal_year::{FiscalPeriod, FiscalYear};
pub use statements::{BalanceSheet, CashFlow, DebtorAgeing, ProfitLoss};

use crate::types::Money;
use crate::{SmeHealthError, SmeHealthResult};

/// Largest absolute amount (in Lakhs) accepted by `validate`.
///
/// Keeps every derived product (×365, ×100) well inside Decimal's range.
pub const MAX_ABS_AMOUNT: Decimal = dec!(1_000_000_000_000_000);

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FinancialSnapshot {
    pub company_name: String,
    pub financial_year: String,
    pub balance_sheet: BalanceSheet,
    pub profit_loss: ProfitLoss,
    pub cash_flow: CashFlow,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub headcount: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub debtor_ageing: Option<DebtorAgeing>,
    pub promoter_loans: Money,
    pub msme_payables: Money,
    pub msme_receivables: Money,
    /// Principal repaid on term loans during the year. Zero means not reported.
    pub annual_loan_repayment: Money,
}

impl Default for FinancialSnapshot {
    fn default() -> Self {
        Self {
            company_name: "Company".into(),
            financial_year: "2024-25".into(),
            balance_sheet: BalanceSheet::default(),
            profit_loss: ProfitLoss::default(),
            cash_flow: CashFlow::default(),
            headcount: None,
            debtor_ageing: None,
            promoter_loans: Decimal::ZERO,
            msme_payables: Decimal::ZERO,
            msme_receivables: Decimal::ZERO,
            annual_loan_repayment: Decimal::ZERO,
        }
    }
}

impl FinancialSnapshot {
    pub fn revenue(&self) -> Money {
        self.profit_loss.revenue_from_operations
    }

    pub fn fiscal_year(&self) -> Option<FiscalYear> {
        FiscalYear::parse(&self.financial_year)
    }

    /// Reject input-shape problems only.
    ///
    /// Negative assets, negative equity and losses are accepted unchanged:
    /// they are legitimate (if alarming) balance sheets and must flow through
    /// to the ratios and the score as-is.
    pub fn validate(&self) -> SmeHealthResult<()> {
        let amounts = self
            .balance_sheet
            .amounts()
            .into_iter()
            .chain(self.profit_loss.amounts())
            .chain(self.cash_flow.amounts())
            .chain([
                ("promoter_loans", self.promoter_loans),
                ("msme_payables", self.msme_payables),
                ("msme_receivables", self.msme_receivables),
                ("annual_loan_repayment", self.annual_loan_repayment),
            ])
            .chain(self.debtor_ageing.iter().flat_map(|a| a.amounts()));

        for (field, value) in amounts {
            if value.abs() > MAX_ABS_AMOUNT {
                return Err(SmeHealthError::InvalidInput {
                    field: field.into(),
                    reason: format!("Amount exceeds {MAX_ABS_AMOUNT} Lakhs."),
                });
            }
        }

        if self.balance_sheet.share_capital < Decimal::ZERO {
            return Err(SmeHealthError::InvalidInput {
                field: "share_capital".into(),
                reason: "Share capital cannot be negative (implies a negative share count).".into(),
            });
        }
        if self.annual_loan_repayment < Decimal::ZERO {
            return Err(SmeHealthError::InvalidInput {
                field: "annual_loan_repayment".into(),
                reason: "Loan repayment cannot be negative.".into(),
            });
        }
        if let Some(ageing) = &self.debtor_ageing {
            for (field, value) in ageing.amounts() {
                if value < Decimal::ZERO {
                    return Err(SmeHealthError::InvalidInput {
                        field: field.into(),
                        reason: "Ageing buckets cannot be negative.".into(),
                    });
                }
            }
        }
        Ok(())
    }
}
