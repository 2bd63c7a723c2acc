use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::types::Score;
use crate::{SmeHealthError, SmeHealthResult};

const SCORE_FLOOR: Decimal = Decimal::ZERO;
const SCORE_CEILING: Decimal = dec!(100);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum HealthZone {
    Excellent,
    Good,
    Caution,
    Critical,
}

impl fmt::Display for HealthZone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Excellent => "Excellent",
            Self::Good => "Good",
            Self::Caution => "Caution",
            Self::Critical => "Critical",
        };
        write!(f, "{s}")
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ZoneColor {
    Green,
    Yellow,
    Orange,
    Red,
}

impl fmt::Display for ZoneColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Green => "green",
            Self::Yellow => "yellow",
            Self::Orange => "orange",
            Self::Red => "red",
        };
        write!(f, "{s}")
    }
}

/// One band of the overall score: `[low, high)`, except the band ending at
/// 100 which is closed on both sides.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ZoneBand {
    pub low: Score,
    pub high: Score,
    pub zone: HealthZone,
    pub color: ZoneColor,
}

impl ZoneBand {
    pub fn contains(&self, score: Score) -> bool {
        score >= self.low && (score < self.high || (self.high == SCORE_CEILING && score == self.high))
    }
}

pub fn default_zones() -> Vec<ZoneBand> {
    vec![
        ZoneBand {
            low: dec!(80),
            high: dec!(100),
            zone: HealthZone::Excellent,
            color: ZoneColor::Green,
        },
        ZoneBand {
            low: dec!(60),
            high: dec!(80),
            zone: HealthZone::Good,
            color: ZoneColor::Yellow,
        },
        ZoneBand {
            low: dec!(40),
            high: dec!(60),
            zone: HealthZone::Caution,
            color: ZoneColor::Orange,
        },
        ZoneBand {
            low: dec!(0),
            high: dec!(40),
            zone: HealthZone::Critical,
            color: ZoneColor::Red,
        },
    ]
}

/// Bands must tile [0, 100] exactly: no gap, no overlap.
pub fn validate_zones(zones: &[ZoneBand]) -> SmeHealthResult<()> {
    if zones.is_empty() {
        return Err(SmeHealthError::InvalidThresholds(
            "at least one zone band is required".into(),
        ));
    }
    let mut sorted: Vec<&ZoneBand> = zones.iter().collect();
    sorted.sort_by(|a, b| a.low.cmp(&b.low));

    if let Some(band) = sorted.iter().find(|b| b.low >= b.high) {
        return Err(SmeHealthError::InvalidThresholds(format!(
            "zone {} has low {} not below high {}",
            band.zone, band.low, band.high
        )));
    }
    if sorted[0].low != SCORE_FLOOR {
        return Err(SmeHealthError::InvalidThresholds(format!(
            "zones must start at 0, lowest band starts at {}",
            sorted[0].low
        )));
    }
    if sorted[sorted.len() - 1].high != SCORE_CEILING {
        return Err(SmeHealthError::InvalidThresholds(format!(
            "zones must end at 100, highest band ends at {}",
            sorted[sorted.len() - 1].high
        )));
    }
    for pair in sorted.windows(2) {
        if pair[0].high != pair[1].low {
            return Err(SmeHealthError::InvalidThresholds(format!(
                "zones {} and {} do not meet: {} vs {}",
                pair[0].zone, pair[1].zone, pair[0].high, pair[1].low
            )));
        }
    }
    Ok(())
}

/// First band, in table order, containing the score.
///
/// Scores outside [0, 100] are clamped first so the lookup is total.
pub fn zone_for(zones: &[ZoneBand], score: Score) -> Option<&ZoneBand> {
    let clamped = score.clamp(SCORE_FLOOR, SCORE_CEILING);
    zones.iter().find(|band| band.contains(clamped))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn zone(score: Decimal) -> HealthZone {
        zone_for(&default_zones(), score).unwrap().zone
    }

    #[test]
    fn test_boundaries_route_consistently() {
        assert_eq!(zone(dec!(100)), HealthZone::Excellent);
        assert_eq!(zone(dec!(80.0)), HealthZone::Excellent);
        assert_eq!(zone(dec!(79.99)), HealthZone::Good);
        assert_eq!(zone(dec!(60)), HealthZone::Good);
        assert_eq!(zone(dec!(59.999)), HealthZone::Caution);
        assert_eq!(zone(dec!(40)), HealthZone::Caution);
        assert_eq!(zone(dec!(39.99)), HealthZone::Critical);
        assert_eq!(zone(dec!(0)), HealthZone::Critical);
    }

    #[test]
    fn test_out_of_range_scores_clamped() {
        assert_eq!(zone(dec!(-5)), HealthZone::Critical);
        assert_eq!(zone(dec!(150)), HealthZone::Excellent);
    }

    #[test]
    fn test_every_tenth_in_range_has_exactly_one_zone() {
        let zones = default_zones();
        let mut s = Decimal::ZERO;
        while s <= dec!(100) {
            let hits = zones.iter().filter(|b| b.contains(s)).count();
            assert_eq!(hits, 1, "score {s} matched {hits} bands");
            s += dec!(0.1);
        }
    }

    #[test]
    fn test_validate_detects_gap() {
        let mut zones = default_zones();
        zones[1].high = dec!(79);
        let err = validate_zones(&zones).unwrap_err();
        assert!(err.to_string().contains("do not meet"));
    }

    #[test]
    fn test_validate_detects_short_coverage() {
        let mut zones = default_zones();
        zones[0].high = dec!(95);
        assert!(validate_zones(&zones).is_err());
        assert!(validate_zones(&default_zones()).is_ok());
        assert!(validate_zones(&[]).is_err());
    }
}
