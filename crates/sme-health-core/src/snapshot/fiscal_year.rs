//! Indian fiscal-year labels ("2024-25" = 1 April 2024 to 31 March 2025).

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A parsed Indian fiscal year, identified by the calendar year it starts in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct FiscalYear {
    pub start_year: i32,
}

/// Calendar bounds of a fiscal year.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FiscalPeriod {
    pub label: String,
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl FiscalYear {
    /// Parse labels of the form `2024-25`, `2024-2025`, `FY2024-25` or `FY 24-25`.
    ///
    /// The second year must immediately follow the first; anything else
    /// returns `None`.
    pub fn parse(label: &str) -> Option<Self> {
        let trimmed = label.trim();
        let body = trimmed
            .strip_prefix("FY")
            .or_else(|| trimmed.strip_prefix("fy"))
            .unwrap_or(trimmed)
            .trim();

        let (first, second) = body.split_once(['-', '/', '–'])?;
        let start_year = expand_year(first.trim(), None)?;
        let end_year = expand_year(second.trim(), Some(start_year))?;

        if end_year != start_year + 1 {
            return None;
        }
        Some(Self { start_year })
    }

    pub fn label(&self) -> String {
        format!("{}-{:02}", self.start_year, (self.start_year + 1).rem_euclid(100))
    }

    pub fn previous(&self) -> Self {
        Self {
            start_year: self.start_year - 1,
        }
    }

    /// 1 April of the starting year.
    pub fn start_date(&self) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(self.start_year, 4, 1)
    }

    /// 31 March of the following year.
    pub fn end_date(&self) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(self.start_year + 1, 3, 31)
    }

    pub fn period(&self) -> Option<FiscalPeriod> {
        Some(FiscalPeriod {
            label: self.label(),
            start: self.start_date()?,
            end: self.end_date()?,
        })
    }
}

fn expand_year(text: &str, century_hint: Option<i32>) -> Option<i32> {
    if text.is_empty() || !text.chars().all(|c| c.is_ascii_digit()) {
        return None;
    }
    let value: i32 = text.parse().ok()?;
    match text.len() {
        4 => Some(value),
        2 => match century_hint {
            Some(start) => {
                let century = start - start.rem_euclid(100);
                let candidate = century + value;
                // "1999-00" rolls into the next century
                if candidate < start {
                    Some(candidate + 100)
                } else {
                    Some(candidate)
                }
            }
            None => Some(2000 + value),
        },
        _ => None,
    }
}
