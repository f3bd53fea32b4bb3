//! Position Risk Classifier
//!
//! Pure functions from a [`PositionQuery`] to a [`PositionAnalysis`].

use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use crate::error::{AdvisorError, Result};
use crate::model::{PositionAnalysis, PositionQuery, PositionType, RiskLevel};

/// Distance (in %) below which a position is HIGH risk
pub const HIGH_RISK_THRESHOLD_PCT: Decimal = dec!(10);

/// Distance (in %) below which a position is MEDIUM risk
pub const MEDIUM_RISK_THRESHOLD_PCT: Decimal = dec!(25);

/// Classify a validated position
///
/// Fails with [`AdvisorError::InvalidField`] when the prices are so far
/// apart that the distance does not fit in a `Decimal`.
pub fn classify(query: &PositionQuery) -> Result<PositionAnalysis> {
    let distance = distance_to_liquidation_pct(query.current_price, query.liquidation_price)
        .ok_or(AdvisorError::InvalidField {
            field: "liquidationPrice",
            reason: "out of range",
        })?;

    Ok(PositionAnalysis {
        distance_to_liquidation_pct: distance,
        position_type: infer_position_type(query.current_price, query.entry_price, query.pnl_size),
        risk_level: risk_level(distance),
    })
}

/// `|current - liquidation| / current * 100`, or `None` on overflow
///
/// `current_price` must be positive (guaranteed by validation).
pub fn distance_to_liquidation_pct(
    current_price: Decimal,
    liquidation_price: Decimal,
) -> Option<Decimal> {
    current_price
        .checked_sub(liquidation_price)?
        .abs()
        .checked_div(current_price)?
        .checked_mul(dec!(100))
}

/// Infer the side of a position from price movement versus reported PnL.
///
/// SHORT only when the price move and the PnL are both non-zero and point in
/// opposite directions. A flat price or flat PnL carries no directional
/// signal and reads as LONG.
pub fn infer_position_type(
    current_price: Decimal,
    entry_price: Decimal,
    pnl_size: Decimal,
) -> PositionType {
    let price_move = current_price - entry_price;

    if price_move.is_zero() || pnl_size.is_zero() {
        return PositionType::Long;
    }

    if price_move.is_sign_positive() == pnl_size.is_sign_positive() {
        PositionType::Long
    } else {
        PositionType::Short
    }
}

/// Band a distance-to-liquidation percentage
pub fn risk_level(distance_pct: Decimal) -> RiskLevel {
    if distance_pct < HIGH_RISK_THRESHOLD_PCT {
        RiskLevel::High
    } else if distance_pct < MEDIUM_RISK_THRESHOLD_PCT {
        RiskLevel::Medium
    } else {
        RiskLevel::Low
    }
}
