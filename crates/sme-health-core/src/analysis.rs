//! End-to-end pipeline: snapshot(s) → ratios → score + recommendations.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::time::Instant;

use crate::compliance::{compliance_status, ComplianceFlags, ComplianceStatus};
use crate::formatting::format_inr;
use crate::ratios::{compute_ratios, safe_div, RatioSet};
use crate::recommendations::{generate_recommendations, Recommendation};
use crate::scoring::{compute_score, ScoreBreakdown};
use crate::snapshot::{FinancialSnapshot, FiscalPeriod};
use crate::thresholds::ThresholdTable;
use crate::types::{with_metadata, ComputationOutput};
use crate::SmeHealthResult;

// ---------------------------------------------------------------------------
// Input / Output types
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisInput {
    pub current: FinancialSnapshot,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub previous: Option<FinancialSnapshot>,
    /// Explicit flags override the ones derived from the balance sheet.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub compliance_flags: Option<ComplianceFlags>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthAnalysis {
    pub company_name: String,
    pub financial_year: String,
    pub period: Option<FiscalPeriod>,
    pub ratios: RatioSet,
    pub previous_ratios: Option<RatioSet>,
    pub score: ScoreBreakdown,
    pub recommendations: Vec<Recommendation>,
    pub compliance: ComplianceStatus,
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Run the full health analysis for one company-year.
#[tracing::instrument(skip_all, fields(company = %input.current.company_name))]
pub fn analyze(
    input: &AnalysisInput,
    table: &ThresholdTable,
) -> SmeHealthResult<ComputationOutput<HealthAnalysis>> {
    let start = Instant::now();

    // -- Validation ----------------------------------------------------------
    table.validate()?;
    input.current.validate()?;
    if let Some(previous) = &input.previous {
        previous.validate()?;
    }

    let current = &input.current;
    let previous = input.previous.as_ref();
    let mut warnings = period_warnings(current, previous);

    // -- Ratios --------------------------------------------------------------
    let ratios = compute_ratios(current, previous);
    let previous_ratios = previous.map(|p| compute_ratios(p, None));

    if ratios.cogs_estimated {
        warnings.push(
            "COGS not reported; estimated at 60% of revenue for gross margin and DIO.".into(),
        );
    }
    if ratios.repayment_estimated {
        warnings.push(
            "Annual loan repayment not reported; DSCR assumes 15% of total debt.".into(),
        );
    }
    if previous.is_none() {
        warnings.push(
            "No previous-year snapshot; turnover and days ratios use closing balances.".into(),
        );
    }
    warnings.extend(ageing_warning(current));

    // -- Score and recommendations -------------------------------------------
    let flags = input
        .compliance_flags
        .unwrap_or_else(|| ComplianceFlags::from_snapshot(current, &table.compliance));
    let score = compute_score(&ratios, &flags, table);
    let recommendations =
        generate_recommendations(&ratios, current, previous_ratios.as_ref(), table);
    let compliance = compliance_status(current, &flags);

    tracing::info!(
        overall = %score.overall,
        zone = %score.zone,
        recommendations = recommendations.len(),
        "analysis complete"
    );

    let output = HealthAnalysis {
        company_name: current.company_name.clone(),
        financial_year: current.financial_year.clone(),
        period: current.fiscal_year().and_then(|fy| fy.period()),
        ratios,
        previous_ratios,
        score,
        recommendations,
        compliance,
    };

    let elapsed = start.elapsed().as_micros() as u64;
    let assumptions = serde_json::json!({
        "amounts_in": "INR Lakhs",
        "fiscal_year": "1 April – 31 March",
        "cogs_fallback": "60% of revenue when COGS is zero",
        "repayment_fallback": "15% of total debt when annual repayment is not reported",
        "weights": &table.weights,
    });

    Ok(with_metadata(
        "SME financial health (ratio benchmarks, weighted category score, rule-based recommendations)",
        &assumptions,
        warnings,
        elapsed,
        output,
    ))
}

// ---------------------------------------------------------------------------
// Internal helpers
// ---------------------------------------------------------------------------

fn period_warnings(
    current: &FinancialSnapshot,
    previous: Option<&FinancialSnapshot>,
) -> Vec<String> {
    let mut warnings = Vec::new();
    let current_fy = current.fiscal_year();
    if current_fy.is_none() {
        warnings.push(format!(
            "Financial year '{}' is not a recognised label (expected e.g. 2024-25).",
            current.financial_year
        ));
    }
    let Some(previous) = previous else {
        return warnings;
    };
    match (current_fy, previous.fiscal_year()) {
        (Some(cur), Some(prev)) if prev != cur.previous() => warnings.push(format!(
            "Previous snapshot is {} but the year before {} is {}; year-over-year figures may not be comparable.",
            prev.label(),
            cur.label(),
            cur.previous().label()
        )),
        (_, None) => warnings.push(format!(
            "Previous financial year '{}' is not a recognised label.",
            previous.financial_year
        )),
        _ => {}
    }
    warnings
}

/// Receivables more than 90 days past invoice, when an ageing schedule is given.
fn ageing_warning(current: &FinancialSnapshot) -> Option<String> {
    let ageing = current.debtor_ageing.as_ref()?;
    let overdue = ageing.overdue_beyond_90();
    if overdue <= Decimal::ZERO {
        return None;
    }
    let share = safe_div(overdue, ageing.total())
        .and_then(|s| s.checked_mul(dec!(100)))
        .map(|pct| format!(" ({:.1}% of aged receivables)", pct.round_dp(1)))
        .unwrap_or_default();
    Some(format!(
        "{} of receivables is outstanding beyond 90 days{share}; DSO may understate collection risk.",
        format_inr(overdue)
    ))
}
