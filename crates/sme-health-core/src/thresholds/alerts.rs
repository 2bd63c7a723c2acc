use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::types::{Days, Multiple, Rate, Score};
use crate::{SmeHealthError, SmeHealthResult};

/// Indian statutory constants used to derive compliance flags and penalties.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComplianceRules {
    /// GST ITC above this many months of revenue counts as blocked credit.
    pub gst_itc_months: Decimal,
    /// TDS must be deposited by this day of the following month.
    pub tds_deposit_day: u32,
    /// MSME Act Section 15 payment window.
    pub msme_payment_days: u32,
    /// IBC Section 7/9 default threshold, in Crores.
    pub ibc_trigger_crores: Decimal,
    pub tds_penalty: Score,
    pub pf_esi_penalty: Score,
    pub gst_itc_penalty: Score,
    pub msme_penalty: Score,
}

impl Default for ComplianceRules {
    fn default() -> Self {
        Self {
            gst_itc_months: dec!(3),
            tds_deposit_day: 7,
            msme_payment_days: 45,
            ibc_trigger_crores: dec!(1.0),
            tds_penalty: dec!(30),
            pf_esi_penalty: dec!(30),
            gst_itc_penalty: dec!(15),
            msme_penalty: dec!(15),
        }
    }
}

impl ComplianceRules {
    /// Penalties are deductions; a negative one would lift the score.
    pub fn validate(&self) -> SmeHealthResult<()> {
        let penalties = [
            ("tds_penalty", self.tds_penalty),
            ("pf_esi_penalty", self.pf_esi_penalty),
            ("gst_itc_penalty", self.gst_itc_penalty),
            ("msme_penalty", self.msme_penalty),
        ];
        if let Some((name, value)) = penalties.iter().find(|(_, v)| *v < Decimal::ZERO) {
            return Err(SmeHealthError::InvalidThresholds(format!(
                "compliance {name} must not be negative, got {value}"
            )));
        }
        if self.gst_itc_months <= Decimal::ZERO {
            return Err(SmeHealthError::InvalidThresholds(
                "gst_itc_months must be positive".into(),
            ));
        }
        Ok(())
    }
}

/// Numeric boundaries of the recommendation rules.
///
/// Comparisons are fixed per rule (strict vs inclusive); only the cut
/// points live here.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AlertThresholds {
    /// DSCR below this: NPA risk.
    pub dscr_npa: Multiple,
    /// RBI minimum for a Standard asset.
    pub dscr_rbi_minimum: Multiple,
    /// DSCR at or above this: comfortable.
    pub dscr_comfortable: Multiple,
    pub current_ratio_critical: Multiple,
    pub current_ratio_healthy_low: Multiple,
    pub current_ratio_healthy_high: Multiple,
    /// D/E above this exposes the company to IBC proceedings.
    pub debt_to_equity_ibc: Multiple,
    pub debt_to_equity_low: Multiple,
    /// Year-over-year D/E reduction worth calling out.
    pub deleveraging_step: Multiple,
    pub dso_critical: Days,
    pub dso_ideal: Days,
    pub ccc_max: Days,
    pub dio_max: Days,
    pub finance_cost_pct: Rate,
    pub employee_cost_pct: Rate,
    pub net_margin_decline_pp: Rate,
    pub interest_coverage_thin_low: Multiple,
    pub interest_coverage_thin_high: Multiple,
    /// Promoter loans above this share of total debt draw lender scrutiny.
    pub promoter_loan_share: Decimal,
    pub revenue_growth_pct: Rate,
}

impl Default for AlertThresholds {
    fn default() -> Self {
        Self {
            dscr_npa: dec!(1.0),
            dscr_rbi_minimum: dec!(1.25),
            dscr_comfortable: dec!(1.5),
            current_ratio_critical: dec!(1.0),
            current_ratio_healthy_low: dec!(1.5),
            current_ratio_healthy_high: dec!(2.5),
            debt_to_equity_ibc: dec!(3.0),
            debt_to_equity_low: dec!(0.5),
            deleveraging_step: dec!(0.2),
            dso_critical: dec!(120),
            dso_ideal: dec!(60),
            ccc_max: dec!(90),
            dio_max: dec!(90),
            finance_cost_pct: dec!(8),
            employee_cost_pct: dec!(30),
            net_margin_decline_pp: dec!(1.5),
            interest_coverage_thin_low: dec!(1.5),
            interest_coverage_thin_high: dec!(3.0),
            promoter_loan_share: dec!(0.2),
            revenue_growth_pct: dec!(10),
        }
    }
}
