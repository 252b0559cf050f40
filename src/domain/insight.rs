//! AI-generated asset summaries.

use serde::Serialize;

/// Market read-out for a single asset.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AssetInsight {
    pub sentiment: String,
    pub support_level: f64,
    pub resistance_level: f64,
    pub buying_advice: String,
    pub key_factors: Vec<String>,
}

impl AssetInsight {
    /// Payload used when the model answered but the answer could not be used.
    #[must_use]
    pub fn unavailable(current_price: f64) -> Self {
        Self::fallback(
            current_price,
            "Unable to analyze at this time",
            "Please try again later",
            "Data unavailable",
        )
    }

    /// Payload used when the model could not be reached at all.
    #[must_use]
    pub fn service_error(current_price: f64) -> Self {
        Self::fallback(
            current_price,
            "Service temporarily unavailable",
            "Unable to provide advice at this time",
            "Service error",
        )
    }

    fn fallback(current_price: f64, sentiment: &str, advice: &str, factor: &str) -> Self {
        Self {
            sentiment: sentiment.into(),
            support_level: current_price * 0.9,
            resistance_level: current_price * 1.1,
            buying_advice: advice.into(),
            key_factors: vec![factor.into()],
        }
    }
}
