//! Ratio engine: ~30 standard ratios from a current (and optional prior)
//! snapshot.
//!
//! A ratio is `None` whenever its denominator is zero or the quotient cannot
//! be represented; it is never zero-filled.

pub mod calculator;

use serde::{Deserialize, Serialize};

use crate::types::{Days, Money, Multiple, Rate};

pub use calculator::{compute_ratios, safe_div};

/// All derived ratios for one fiscal year.
///
/// `%` ratios are in percentage points. Day counts are rounded to 1 dp,
/// everything else to 2 dp.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RatioSet {
    // Profitability
    pub gross_margin: Option<Rate>,
    pub net_margin: Option<Rate>,
    pub ebitda_margin: Option<Rate>,
    pub ebit_margin: Option<Rate>,
    pub roe: Option<Rate>,
    pub roa: Option<Rate>,
    pub roce: Option<Rate>,
    /// Per share, assuming ₹10 face value.
    pub eps: Option<Money>,

    // Liquidity
    pub current_ratio: Option<Multiple>,
    pub quick_ratio: Option<Multiple>,
    pub cash_ratio: Option<Multiple>,
    pub working_capital: Option<Money>,

    // Leverage
    pub debt_to_equity: Option<Multiple>,
    pub debt_ratio: Option<Multiple>,
    pub interest_coverage: Option<Multiple>,
    pub dscr: Option<Multiple>,
    pub net_debt: Option<Money>,
    pub net_debt_to_ebitda: Option<Multiple>,
    pub total_debt: Option<Money>,

    // Efficiency
    pub dso: Option<Days>,
    pub dpo: Option<Days>,
    pub dio: Option<Days>,
    pub ccc: Option<Days>,
    pub asset_turnover: Option<Multiple>,
    pub inventory_turnover: Option<Multiple>,
    pub fixed_asset_turnover: Option<Multiple>,
    pub capital_productivity: Option<Multiple>,

    // Cash flow
    pub ocf_margin: Option<Rate>,
    pub fcf: Option<Money>,
    pub cf_to_debt: Option<Multiple>,
    pub cash_conversion_ratio: Option<Multiple>,
    pub capex_intensity: Option<Rate>,

    // Growth (needs a previous snapshot)
    pub revenue_growth: Option<Rate>,

    /// COGS was reported as zero and 60% of revenue was used instead.
    pub cogs_estimated: bool,
    /// Annual repayment was not reported and 15% of total debt was used.
    pub repayment_estimated: bool,
}
