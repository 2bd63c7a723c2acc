pub mod analysis;
pub mod compliance;
pub mod error;
pub mod formatting;
pub mod ratios;
pub mod recommendations;
pub mod scoring;
pub mod snapshot;
pub mod thresholds;
pub mod types;

pub use analysis::{analyze, AnalysisInput, HealthAnalysis};
pub use compliance::{ComplianceFlags, ComplianceStatus};
pub use error::SmeHealthError;
pub use ratios::{compute_ratios, RatioSet};
pub use recommendations::{generate_recommendations, Priority, Recommendation};
pub use scoring::{compute_score, score_to_zone, ScoreBreakdown};
pub use snapshot::FinancialSnapshot;
pub use thresholds::{HealthZone, ThresholdTable};
pub use types::*;

/// Standard result type for all sme-health operations
pub type SmeHealthResult<T> = Result<T, SmeHealthError>;
