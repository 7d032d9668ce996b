use crate::models::asset_types::ImageAsset;
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ExposureQuality {
    Good,
    Underexposed,
    Overexposed,
    Other(String),
}

impl ExposureQuality {
    pub fn as_str(&self) -> &str {
        match self {
            ExposureQuality::Good => "good",
            ExposureQuality::Underexposed => "underexposed",
            ExposureQuality::Overexposed => "overexposed",
            ExposureQuality::Other(label) => label,
        }
    }
}

impl From<String> for ExposureQuality {
    fn from(label: String) -> Self {
        match label.as_str() {
            "good" => ExposureQuality::Good,
            "underexposed" => ExposureQuality::Underexposed,
            "overexposed" => ExposureQuality::Overexposed,
            _ => ExposureQuality::Other(label),
        }
    }
}

impl From<ExposureQuality> for String {
    fn from(quality: ExposureQuality) -> Self {
        match quality {
            ExposureQuality::Other(label) => label,
            known => known.as_str().to_string(),
        }
    }
}

impl fmt::Display for ExposureQuality {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Quality metrics returned by the analysis server for one image.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisResult {
    pub total_score: f64,
    pub blur_score: f64,
    pub eyes_open: bool,
    pub smiling: bool,
    pub exposure_quality: ExposureQuality,
}

#[derive(Debug, Clone, Serialize)]
pub struct ProcessedItem {
    pub asset: ImageAsset,
    pub result: AnalysisResult,
}
