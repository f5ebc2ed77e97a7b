use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumString};

pub const DEFAULT_STYLE: &str = "realistic";

#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumString, Display)]
#[strum(serialize_all = "lowercase")]
pub enum Action {
    Swap,
    Styles,
    Status,
}

/// Body posted to the upstream face-swap service.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct UpstreamSwapBody {
    pub image_url: String,
    pub style: String,
    pub enhance_quality: bool,
    pub maintain_original: bool,
}

impl UpstreamSwapBody {
    pub fn new(image_url: &str, style: &str) -> Self {
        Self {
            image_url: image_url.to_string(),
            style: style.to_string(),
            enhance_quality: true,
            maintain_original: false,
        }
    }
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct FeaturesDetected {
    pub faces: u32,
    pub landmarks: u32,
    pub quality: String,
    pub orientation: String,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct Enhancements {
    pub lighting_adjusted: bool,
    pub skin_smoothing: bool,
    pub color_correction: bool,
    pub resolution_enhanced: bool,
}

/// Locally synthesized swap result, used when the upstream call fails.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct SwapResult {
    pub id: String,
    pub status: String,
    pub original_image: String,
    pub processed_image: String,
    pub style: String,
    pub confidence_score: String,
    pub processing_time: String,
    pub features_detected: FeaturesDetected,
    pub enhancements: Enhancements,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct SizeLinks {
    pub small: String,
    pub medium: String,
    pub large: String,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct SocialLinks {
    pub instagram: String,
    pub facebook: String,
    pub twitter: String,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct DownloadLinks {
    // Passed through from the result as-is, may be null
    pub original_result: serde_json::Value,
    pub high_quality: String,
    pub compressed: String,
    pub different_sizes: SizeLinks,
    pub social_media: SocialLinks,
}
