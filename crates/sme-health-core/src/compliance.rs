//! Indian statutory compliance: flag derivation, the deduction-model score
//! and the per-area status report.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::snapshot::FinancialSnapshot;
use crate::thresholds::ComplianceRules;
use crate::types::Score;

const MONTHS_IN_YEAR: Decimal = dec!(12);

/// The four compliance events the score penalises.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ComplianceFlags {
    pub tds_overdue: bool,
    pub gst_itc_large: bool,
    pub pf_esi_overdue: bool,
    pub msme_overdue: bool,
}

impl ComplianceFlags {
    /// Derive flags from balance-sheet outstanding amounts.
    ///
    /// Day-ageing is not visible in a year-end snapshot, so any outstanding
    /// statutory dues count as overdue.
    pub fn from_snapshot(snapshot: &FinancialSnapshot, rules: &ComplianceRules) -> Self {
        let bs = &snapshot.balance_sheet;
        let revenue = snapshot.revenue();
        Self {
            tds_overdue: bs.tds_payable > Decimal::ZERO,
            pf_esi_overdue: bs.pf_esi_payable > Decimal::ZERO,
            gst_itc_large: revenue > Decimal::ZERO
                && (revenue / MONTHS_IN_YEAR)
                    .checked_mul(rules.gst_itc_months)
                    .is_some_and(|limit| bs.gst_itc_receivable > limit),
            msme_overdue: snapshot.msme_payables > Decimal::ZERO,
        }
    }

    pub fn any(&self) -> bool {
        self.tds_overdue || self.gst_itc_large || self.pf_esi_overdue || self.msme_overdue
    }
}

/// Start from 100 and deduct a fixed penalty per violation, kept within
/// 0..=100.
pub fn compliance_score(flags: &ComplianceFlags, rules: &ComplianceRules) -> Score {
    let deductions = [
        (flags.tds_overdue, rules.tds_penalty),
        (flags.pf_esi_overdue, rules.pf_esi_penalty),
        (flags.gst_itc_large, rules.gst_itc_penalty),
        (flags.msme_overdue, rules.msme_penalty),
    ];
    deductions
        .iter()
        .filter(|(raised, _)| *raised)
        .fold(dec!(100), |score, (_, penalty)| score.saturating_sub(*penalty))
        .clamp(Decimal::ZERO, dec!(100))
}

// ---------------------------------------------------------------------------
// Status report
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ComplianceLevel {
    Ok,
    Warning,
    Critical,
    Unknown,
}

impl ComplianceLevel {
    fn flagged(flag: bool, severity: ComplianceLevel) -> Self {
        if flag {
            severity
        } else {
            Self::Ok
        }
    }
}

/// Per-area compliance status. Areas a financial snapshot cannot evidence
/// (return filings, advance tax instalments) stay `UNKNOWN`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComplianceStatus {
    pub gst_filing: ComplianceLevel,
    pub gst_itc_blocked: ComplianceLevel,
    pub tds_deposited: ComplianceLevel,
    pub advance_tax: ComplianceLevel,
    pub pf_esi: ComplianceLevel,
    pub roc_filing: ComplianceLevel,
    pub msme_payments: ComplianceLevel,
    pub related_party: ComplianceLevel,
    #[serde(flatten)]
    pub flags: ComplianceFlags,
}

pub fn compliance_status(snapshot: &FinancialSnapshot, flags: &ComplianceFlags) -> ComplianceStatus {
    use ComplianceLevel::{Critical, Unknown, Warning};
    ComplianceStatus {
        gst_filing: Unknown,
        gst_itc_blocked: ComplianceLevel::flagged(flags.gst_itc_large, Warning),
        tds_deposited: ComplianceLevel::flagged(flags.tds_overdue, Critical),
        advance_tax: Unknown,
        pf_esi: ComplianceLevel::flagged(flags.pf_esi_overdue, Critical),
        roc_filing: Unknown,
        msme_payments: ComplianceLevel::flagged(flags.msme_overdue, Warning),
        related_party: ComplianceLevel::flagged(snapshot.promoter_loans > Decimal::ZERO, Warning),
        flags: *flags,
    }
}
