use serde::{Deserialize, Serialize};

pub const MIN_SCORE_FLOOR: u8 = 0;
pub const MIN_SCORE_CEILING: u8 = 10;

/// User-configured culling policy. Only configured here, never applied to results.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FilterConfig {
    pub eyes: bool,
    pub smile: bool,
    pub duplicates: bool,
    pub min_score: u8,
}

impl Default for FilterConfig {
    fn default() -> Self {
        Self {
            eyes: true,
            smile: true,
            duplicates: true,
            min_score: 5,
        }
    }
}

/// Partial update; absent fields keep their current value.
#[derive(Debug, Clone, Copy, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FilterPatch {
    pub eyes: Option<bool>,
    pub smile: Option<bool>,
    pub duplicates: Option<bool>,
    pub min_score: Option<f64>,
}

impl FilterPatch {
    pub fn min_score(value: f64) -> Self {
        Self {
            min_score: Some(value),
            ..Self::default()
        }
    }
}

/// Clamps to the slider range and rounds half away from zero. `None` for NaN.
pub fn clamp_min_score(raw: f64) -> Option<u8> {
    if raw.is_nan() {
        return None;
    }
    let clamped = raw.clamp(MIN_SCORE_FLOOR as f64, MIN_SCORE_CEILING as f64);
    Some(clamped.round() as u8)
}
