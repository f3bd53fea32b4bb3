//! Domain Models
//!
//! Request-scoped value types for position analysis and vibe suggestions.
//! Uses `rust_decimal` for all prices and sizes - never use f64 for money!

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{AdvisorError, Result};

/// Client-facing message for any missing analysis field
pub const MISSING_FIELDS_MESSAGE: &str =
    "Missing required fields: positionSize, entryPrice, liquidationPrice, currentPrice, pnlSize";

/// Raw `/analyze` body before validation
///
/// Every field is optional here so that absence can be reported as a
/// validation failure instead of a deserialization error.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyzeRequest {
    pub position_size: Option<Decimal>,
    pub entry_price: Option<Decimal>,
    pub liquidation_price: Option<Decimal>,
    pub current_price: Option<Decimal>,
    pub pnl_size: Option<Decimal>,
}

impl AnalyzeRequest {
    /// Validate into a [`PositionQuery`]
    ///
    /// Size and price fields must be present and strictly positive; zero is
    /// treated as missing. `pnlSize` only has to be present: zero is a real
    /// value.
    pub fn validate(&self) -> Result<PositionQuery> {
        Ok(PositionQuery {
            position_size: require_positive("positionSize", self.position_size)?,
            entry_price: require_positive("entryPrice", self.entry_price)?,
            liquidation_price: require_positive("liquidationPrice", self.liquidation_price)?,
            current_price: require_positive("currentPrice", self.current_price)?,
            pnl_size: self.pnl_size.ok_or(AdvisorError::MissingField("pnlSize"))?,
        })
    }
}

fn require_positive(field: &'static str, value: Option<Decimal>) -> Result<Decimal> {
    match value {
        None => Err(AdvisorError::MissingField(field)),
        Some(v) if v.is_zero() => Err(AdvisorError::MissingField(field)),
        Some(v) if v.is_sign_negative() => Err(AdvisorError::InvalidField {
            field,
            reason: "must be greater than zero",
        }),
        Some(v) => Ok(v),
    }
}

/// A validated leveraged position described by the client
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PositionQuery {
    pub position_size: Decimal,
    pub entry_price: Decimal,
    pub liquidation_price: Decimal,
    pub current_price: Decimal,
    /// Signed profit or loss
    pub pnl_size: Decimal,
}

/// Inferred side of a position
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum PositionType {
    Long,
    Short,
}

impl PositionType {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Long => "LONG",
            Self::Short => "SHORT",
        }
    }
}

impl std::fmt::Display for PositionType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Coarse proximity-to-liquidation band
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum RiskLevel {
    High,
    Medium,
    Low,
}

impl RiskLevel {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::High => "HIGH",
            Self::Medium => "MEDIUM",
            Self::Low => "LOW",
        }
    }
}

impl std::fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Derived analysis of a [`PositionQuery`]
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PositionAnalysis {
    /// `|current - liquidation| / current * 100`, always >= 0
    #[serde(rename = "distanceToLiquidation", with = "rust_decimal::serde::float")]
    pub distance_to_liquidation_pct: Decimal,

    pub position_type: PositionType,

    pub risk_level: RiskLevel,
}

/// Output of the free-form suggestion mode
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VibeSuggestion {
    pub leverage: u32,

    /// Raw generated text
    pub position: String,

    #[serde(with = "rust_decimal::serde::float_option")]
    pub doge_price: Option<Decimal>,
}

/// Output of the analysis mode
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdviceReport {
    pub ai_advice: String,

    pub timestamp: DateTime<Utc>,

    #[serde(flatten)]
    pub analysis: PositionAnalysis,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn full_request() -> AnalyzeRequest {
        serde_json::from_str(
            r#"{"positionSize": 1000, "entryPrice": 0.10, "liquidationPrice": 0.08,
                "currentPrice": 0.095, "pnlSize": -5}"#,
        )
        .unwrap()
    }

    #[test]
    fn test_validate_full_request() {
        let query = full_request().validate().unwrap();
        assert_eq!(query.position_size, dec!(1000));
        assert_eq!(query.entry_price, dec!(0.10));
        assert_eq!(query.current_price, dec!(0.095));
        assert_eq!(query.pnl_size, dec!(-5));
    }

    #[test]
    fn test_each_missing_field_is_reported() {
        let cases: [(&str, fn(&mut AnalyzeRequest)); 5] = [
            ("positionSize", |r| r.position_size = None),
            ("entryPrice", |r| r.entry_price = None),
            ("liquidationPrice", |r| r.liquidation_price = None),
            ("currentPrice", |r| r.current_price = None),
            ("pnlSize", |r| r.pnl_size = None),
        ];

        for (field, clear) in cases {
            let mut request = full_request();
            clear(&mut request);
            match request.validate() {
                Err(AdvisorError::MissingField(f)) => assert_eq!(f, field),
                other => panic!("expected missing {field}, got {other:?}"),
            }
        }
    }

    #[test]
    fn test_zero_pnl_is_not_missing() {
        let mut request = full_request();
        request.pnl_size = Some(Decimal::ZERO);
        assert_eq!(request.validate().unwrap().pnl_size, Decimal::ZERO);
    }

    #[test]
    fn test_zero_price_counts_as_missing() {
        let mut request = full_request();
        request.current_price = Some(Decimal::ZERO);
        assert!(matches!(
            request.validate(),
            Err(AdvisorError::MissingField("currentPrice"))
        ));
    }

    #[test]
    fn test_negative_size_is_invalid() {
        let mut request = full_request();
        request.position_size = Some(dec!(-1));
        let err = request.validate().unwrap_err();
        assert!(err.is_validation());
        assert!(matches!(err, AdvisorError::InvalidField { field: "positionSize", .. }));
    }

    #[test]
    fn test_null_counts_as_missing() {
        let request: AnalyzeRequest = serde_json::from_str(
            r#"{"positionSize": 1, "entryPrice": 1, "liquidationPrice": 1,
                "currentPrice": 1, "pnlSize": null}"#,
        )
        .unwrap();
        assert!(matches!(request.validate(), Err(AdvisorError::MissingField("pnlSize"))));
    }

    #[test]
    fn test_suggestion_serializes_null_price() {
        let suggestion = VibeSuggestion {
            leverage: 50,
            position: "ape in".into(),
            doge_price: None,
        };
        let json = serde_json::to_value(&suggestion).unwrap();
        assert_eq!(json["leverage"], 50);
        assert!(json["dogePrice"].is_null());
    }

    #[test]
    fn test_analysis_wire_names() {
        let analysis = PositionAnalysis {
            distance_to_liquidation_pct: dec!(12.5),
            position_type: PositionType::Short,
            risk_level: RiskLevel::Medium,
        };
        let json = serde_json::to_value(&analysis).unwrap();
        assert_eq!(json["distanceToLiquidation"], 12.5);
        assert_eq!(json["positionType"], "SHORT");
        assert_eq!(json["riskLevel"], "MEDIUM");
    }
}
