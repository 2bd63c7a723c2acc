//! Recommendation engine: a fixed, ordered battery of threshold rules.
//!
//! Every rule is evaluated independently; each one that fires contributes
//! exactly one finding. The result is stably sorted by priority so findings
//! of the same tier keep their authored order.

pub mod rules;

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::ratios::RatioSet;
use crate::snapshot::FinancialSnapshot;
use crate::thresholds::ThresholdTable;

pub use rules::{Rule, RuleContext, RULES};

/// Tier of a finding. Declaration order is the output order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Priority {
    High,
    Medium,
    Positive,
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::High => "HIGH",
            Self::Medium => "MEDIUM",
            Self::Positive => "POSITIVE",
        };
        write!(f, "{s}")
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    Compliance,
    Debt,
    Liquidity,
    Receivables,
    Efficiency,
    Expenses,
    Profitability,
    Growth,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Recommendation {
    pub priority: Priority,
    pub category: Category,
    pub title: String,
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub impact: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub action: Option<String>,
}

impl Recommendation {
    pub fn new(
        priority: Priority,
        category: Category,
        title: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            priority,
            category,
            title: title.into(),
            description: description.into(),
            impact: None,
            action: None,
        }
    }

    pub fn with_impact(mut self, impact: impl Into<String>) -> Self {
        self.impact = Some(impact.into());
        self
    }

    pub fn with_action(mut self, action: impl Into<String>) -> Self {
        self.action = Some(action.into());
        self
    }
}

/// Stable sort: HIGH, then MEDIUM, then POSITIVE, authored order within a tier.
pub fn sort_by_priority(recommendations: &mut [Recommendation]) {
    recommendations.sort_by_key(|r| r.priority);
}

/// Run every rule against the ratios and raw snapshot.
///
/// `previous_ratios` enables the year-over-year rules (margin decline,
/// deleveraging); without it those rules stay silent.
pub fn generate_recommendations(
    ratios: &RatioSet,
    snapshot: &FinancialSnapshot,
    previous_ratios: Option<&RatioSet>,
    table: &ThresholdTable,
) -> Vec<Recommendation> {
    let ctx = RuleContext {
        ratios,
        snapshot,
        previous: previous_ratios,
        table,
    };

    let mut recommendations: Vec<Recommendation> =
        RULES.iter().filter_map(|rule| (rule.evaluate)(&ctx)).collect();

    sort_by_priority(&mut recommendations);

    tracing::debug!(
        fired = recommendations.len(),
        evaluated = RULES.len(),
        "recommendations generated"
    );
    recommendations
}
