use napi::Result as NapiResult;
use napi_derive::napi;
use rust_decimal::Decimal;
use serde::Deserialize;

use sme_health_core::compliance::{compliance_status, ComplianceFlags};
use sme_health_core::{FinancialSnapshot, RatioSet, ThresholdTable};

/// Convert any Display error into a napi::Error.
fn to_napi_error(e: impl std::fmt::Display) -> napi::Error {
    napi::Error::from_reason(e.to_string())
}

/// Parse an optional threshold table, falling back to the built-in one.
fn thresholds(thresholds_json: Option<String>) -> NapiResult<ThresholdTable> {
    let table = match thresholds_json {
        Some(json) => serde_json::from_str(&json).map_err(to_napi_error)?,
        None => ThresholdTable::default(),
    };
    table.validate().map_err(to_napi_error)?;
    Ok(table)
}

// ---------------------------------------------------------------------------
// Pipeline
// ---------------------------------------------------------------------------

#[napi]
pub fn analyze_health(input_json: String, thresholds_json: Option<String>) -> NapiResult<String> {
    let input: sme_health_core::AnalysisInput =
        serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let table = thresholds(thresholds_json)?;
    let output = sme_health_core::analyze(&input, &table).map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}

// ---------------------------------------------------------------------------
// Individual stages
// ---------------------------------------------------------------------------

#[napi]
pub fn compute_ratios(current_json: String, previous_json: Option<String>) -> NapiResult<String> {
    let current: FinancialSnapshot = serde_json::from_str(&current_json).map_err(to_napi_error)?;
    current.validate().map_err(to_napi_error)?;
    let previous: Option<FinancialSnapshot> = previous_json
        .map(|json| serde_json::from_str(&json))
        .transpose()
        .map_err(to_napi_error)?;
    if let Some(ref p) = previous {
        p.validate().map_err(to_napi_error)?;
    }
    let ratios = sme_health_core::compute_ratios(&current, previous.as_ref());
    serde_json::to_string(&ratios).map_err(to_napi_error)
}

#[napi]
pub fn compute_health_score(
    ratios_json: String,
    flags_json: Option<String>,
    thresholds_json: Option<String>,
) -> NapiResult<String> {
    let ratios: RatioSet = serde_json::from_str(&ratios_json).map_err(to_napi_error)?;
    let flags: ComplianceFlags = match flags_json {
        Some(json) => serde_json::from_str(&json).map_err(to_napi_error)?,
        None => ComplianceFlags::default(),
    };
    let table = thresholds(thresholds_json)?;
    let score = sme_health_core::compute_score(&ratios, &flags, &table);
    serde_json::to_string(&score).map_err(to_napi_error)
}

#[derive(Deserialize)]
struct RecommendInput {
    ratios: RatioSet,
    snapshot: FinancialSnapshot,
    #[serde(default)]
    previous_ratios: Option<RatioSet>,
}

#[napi]
pub fn generate_recommendations(
    input_json: String,
    thresholds_json: Option<String>,
) -> NapiResult<String> {
    let input: RecommendInput = serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let table = thresholds(thresholds_json)?;
    let recommendations = sme_health_core::generate_recommendations(
        &input.ratios,
        &input.snapshot,
        input.previous_ratios.as_ref(),
        &table,
    );
    serde_json::to_string(&recommendations).map_err(to_napi_error)
}

#[napi]
pub fn compliance_report(snapshot_json: String) -> NapiResult<String> {
    let snapshot: FinancialSnapshot =
        serde_json::from_str(&snapshot_json).map_err(to_napi_error)?;
    let table = ThresholdTable::default();
    let flags = ComplianceFlags::from_snapshot(&snapshot, &table.compliance);
    let status = compliance_status(&snapshot, &flags);
    serde_json::to_string(&status).map_err(to_napi_error)
}

// ---------------------------------------------------------------------------
// Configuration & formatting
// ---------------------------------------------------------------------------

#[napi]
pub fn default_thresholds() -> NapiResult<String> {
    serde_json::to_string(&ThresholdTable::default()).map_err(to_napi_error)
}

/// Compact INR display of an amount in Lakhs, passed as a decimal string.
#[napi]
pub fn format_inr(lakhs: String) -> NapiResult<String> {
    let value: Decimal = lakhs.trim().parse().map_err(to_napi_error)?;
    Ok(sme_health_core::formatting::format_inr(value))
}
