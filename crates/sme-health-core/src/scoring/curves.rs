//! Piecewise-linear curves mapping a ratio onto a 0–100 score.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use crate::thresholds::{Benchmark, Direction, LiquidityBands};
use crate::types::Score;

/// Score given to a ratio that could not be computed.
pub const NEUTRAL_SCORE: Decimal = dec!(50);

const MAX_SCORE: Decimal = dec!(100);

/// Beyond this magnitude every curve is already saturated.
const VALUE_LIMIT: Decimal = dec!(100_000_000_000_000_000_000);

fn clamp_value(value: Decimal) -> Decimal {
    value.clamp(-VALUE_LIMIT, VALUE_LIMIT)
}

/// `numerator / denominator`, saturating instead of panicking.
fn fraction(numerator: Decimal, denominator: Decimal) -> Decimal {
    if denominator.is_zero() {
        return Decimal::ZERO;
    }
    numerator.checked_div(denominator).unwrap_or_else(|| {
        if numerator.is_sign_negative() == denominator.is_sign_negative() {
            Decimal::MAX
        } else {
            Decimal::MIN
        }
    })
}

fn unit(x: Decimal) -> Decimal {
    x.clamp(Decimal::ZERO, Decimal::ONE)
}

/// Interpolate `from + t * span` for `t` clamped to [0, 1].
fn lerp(from: Decimal, span: Decimal, t: Decimal) -> Score {
    from + unit(t) * span
}

// ---------------------------------------------------------------------------
// Standard four-band curve
// ---------------------------------------------------------------------------

/// Four bands around the excellent / good / caution cut points:
/// 100 at or beyond excellent, 60–100 up to excellent, 30–60 up to good,
/// 0–30 past caution. Missing values score a neutral 50.
pub fn score_metric(value: Option<Decimal>, benchmark: &Benchmark) -> Score {
    match value {
        None => NEUTRAL_SCORE,
        Some(v) => score_value(
            clamp_value(v),
            benchmark.excellent,
            benchmark.good,
            benchmark.caution,
            benchmark.direction,
        ),
    }
}

fn score_value(
    value: Decimal,
    excellent: Decimal,
    good: Decimal,
    caution: Decimal,
    direction: Direction,
) -> Score {
    match direction {
        Direction::HigherIsBetter => {
            if value >= excellent {
                MAX_SCORE
            } else if value >= good {
                lerp(dec!(60), dec!(40), fraction(value - good, excellent - good))
            } else if value >= caution {
                lerp(dec!(30), dec!(30), fraction(value - caution, good - caution))
            } else if caution > Decimal::ZERO {
                lerp(Decimal::ZERO, dec!(30), fraction(value, caution))
            } else {
                Decimal::ZERO
            }
        }
        Direction::LowerIsBetter => {
            if value <= excellent {
                MAX_SCORE
            } else if value <= good {
                lerp(dec!(60), dec!(40), fraction(good - value, good - excellent))
            } else if value <= caution {
                lerp(dec!(30), dec!(30), fraction(caution - value, caution - good))
            } else {
                let overshoot = fraction(value - caution, caution);
                lerp(Decimal::ZERO, dec!(30), Decimal::ONE - unit(overshoot))
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Bespoke liquidity curves
// ---------------------------------------------------------------------------

/// Current ratio: full marks inside the healthy range, a gentle penalty
/// (never below 70) for idle current assets above it.
pub fn current_ratio_score(value: Option<Decimal>, bands: &LiquidityBands) -> Score {
    let Some(cr) = value.map(clamp_value) else {
        return NEUTRAL_SCORE;
    };
    let low = bands.current_ratio_critical_low;
    let min = bands.current_ratio_min_healthy;
    let max = bands.current_ratio_max_healthy;

    if cr >= min && cr <= max {
        MAX_SCORE
    } else if cr >= low && cr < min {
        lerp(dec!(60), dec!(40), fraction(cr - low, min - low))
    } else if cr < low {
        lerp(Decimal::ZERO, dec!(30), fraction(cr, low))
    } else {
        (MAX_SCORE - (cr - max) * dec!(10)).max(dec!(70))
    }
}

/// Quick ratio: one-sided floor. 70 + 10 per turn above the floor, capped.
pub fn quick_ratio_score(value: Option<Decimal>, bands: &LiquidityBands) -> Score {
    let Some(qr) = value.map(clamp_value) else {
        return NEUTRAL_SCORE;
    };
    let floor = bands.quick_ratio_min_healthy;
    if qr >= floor {
        (dec!(70) + qr * dec!(10)).min(MAX_SCORE)
    } else {
        lerp(Decimal::ZERO, dec!(70), fraction(qr, floor))
    }
}

/// Floor-type curve shared by the cash ratio and cash conversion: 100 at the
/// target, 60–100 between floor and target, 0–60 below the floor.
fn floor_target_score(value: Decimal, floor: Decimal, target: Decimal) -> Score {
    if value >= target {
        MAX_SCORE
    } else if value >= floor {
        lerp(dec!(60), dec!(40), fraction(value - floor, target - floor))
    } else {
        lerp(Decimal::ZERO, dec!(60), fraction(value, floor))
    }
}

pub fn cash_ratio_score(value: Option<Decimal>, bands: &LiquidityBands) -> Score {
    match value {
        None => NEUTRAL_SCORE,
        Some(v) => floor_target_score(
            clamp_value(v),
            bands.cash_ratio_min_healthy,
            bands.cash_ratio_target,
        ),
    }
}

pub fn cash_conversion_score(value: Option<Decimal>, bands: &LiquidityBands) -> Score {
    match value {
        None => NEUTRAL_SCORE,
        Some(v) => floor_target_score(
            clamp_value(v),
            bands.cash_conversion_min_healthy,
            bands.cash_conversion_target,
        ),
    }
}
