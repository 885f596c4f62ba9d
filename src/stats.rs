use serde::Serialize;

/// Average and count derived from a movie's ratings at read time.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct RatingSummary {
    pub average: Option<f64>,
    pub count: u64,
}

impl RatingSummary {
    pub fn from_scores(scores: &[f64]) -> Self {
        Self { average: average(scores), count: scores.len() as u64 }
    }
}

/// Arithmetic mean, or `None` for an empty slice.
pub fn average(scores: &[f64]) -> Option<f64> {
    if scores.is_empty() {
        return None;
    }
    Some(scores.iter().sum::<f64>() / scores.len() as f64)
}

/// Display rounding used by the HTTP layer.
pub fn round_one_decimal(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}
