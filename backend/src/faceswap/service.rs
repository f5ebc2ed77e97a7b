use log::{info, warn};
use serde::Serialize;
use serde_json::{json, Value};
use shared::{
    DownloadLinks, Enhancements, FeaturesDetected, SizeLinks, SocialLinks, SwapResult,
    UpstreamSwapBody, DEFAULT_STYLE,
};
use std::sync::Arc;
use url::Url;

use super::client::{FaceSwapUpstream, UpstreamFailure, UpstreamOutcome, UpstreamPayload};
use super::random::RandomSource;
use crate::catalog::{AdditionalInfo, ADDITIONAL_INFO, ADVERTISED_FORMATS};
use crate::envelope::{local_timestamp, EnvelopeStatus};
use crate::error::GatewayError;

const VALID_EXTENSIONS: [&str; 5] = [".jpg", ".jpeg", ".png", ".webp", ".gif"];

const COMPLETED_MESSAGE: &str = "Face swap completed successfully";
const DEMO_MESSAGE: &str = "Face swap completed (using demo system)";
const DEMO_NOTE: &str = "Demo result - API temporarily unavailable";
const UNKNOWN_ID: &str = "unknown";

pub fn is_valid_image_url(raw: &str) -> bool {
    match Url::parse(raw) {
        Ok(url) => {
            let path = url.path().to_lowercase();
            VALID_EXTENSIONS.iter().any(|ext| path.ends_with(ext))
        }
        Err(_) => false,
    }
}

#[derive(Debug, Serialize)]
pub struct RequestEcho {
    pub original_image: String,
    pub style: String,
    pub timestamp: String,
}

#[derive(Debug, Serialize)]
pub struct SwapEnvelope {
    pub status: EnvelopeStatus,
    pub message: &'static str,
    pub request: RequestEcho,
    pub result: Value,
    pub download_links: DownloadLinks,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub additional_info: Option<&'static AdditionalInfo>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<&'static str>,
    pub channel: String,
}

#[derive(Debug, Serialize)]
pub struct InvalidImageEnvelope {
    pub status: EnvelopeStatus,
    pub message: &'static str,
    pub valid_formats: &'static [&'static str],
    pub channel: String,
}

/// Either shape is answered with HTTP 200.
#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum SwapReply {
    Invalid(InvalidImageEnvelope),
    Completed(SwapEnvelope),
}

#[derive(Clone)]
pub struct SwapService {
    upstream: Arc<dyn FaceSwapUpstream>,
    random: Arc<dyn RandomSource>,
    cdn_base: String,
    channel: String,
}

impl SwapService {
    pub fn new(
        upstream: Arc<dyn FaceSwapUpstream>,
        random: Arc<dyn RandomSource>,
        cdn_base: String,
        channel: String,
    ) -> Self {
        Self {
            upstream,
            random,
            cdn_base,
            channel,
        }
    }

    pub async fn perform(&self, image_url: &str, style: &str) -> Result<SwapReply, GatewayError> {
        if !is_valid_image_url(image_url) {
            info!("Rejected image URL without a supported extension: {}", image_url);
            return Ok(SwapReply::Invalid(InvalidImageEnvelope {
                status: EnvelopeStatus::Error,
                message: "Invalid image URL",
                valid_formats: &ADVERTISED_FORMATS,
                channel: self.channel.clone(),
            }));
        }

        let body = UpstreamSwapBody::new(image_url, style);
        let outcome = self.upstream.swap(&body).await;
        self.envelope_for(outcome, image_url, style)
            .map(SwapReply::Completed)
    }

    /// Maps any upstream outcome to a success envelope. Upstream failures are
    /// replaced by a synthesized result and never reach the caller as errors.
    pub fn envelope_for(
        &self,
        outcome: UpstreamOutcome,
        image_url: &str,
        style: &str,
    ) -> Result<SwapEnvelope, GatewayError> {
        let (result, message, additional_info, note) = match outcome {
            // A null body carries no result to build links from.
            UpstreamOutcome::Success(UpstreamPayload::Json(Value::Null)) => {
                warn!("Upstream returned a null body, substituting a demo result");
                (
                    serde_json::to_value(self.mock_result(image_url, style))?,
                    DEMO_MESSAGE,
                    None,
                    Some(DEMO_NOTE),
                )
            }
            UpstreamOutcome::Success(UpstreamPayload::Json(value)) => {
                (value, COMPLETED_MESSAGE, Some(&ADDITIONAL_INFO), None)
            }
            UpstreamOutcome::Success(UpstreamPayload::Raw(text)) => (
                json!({ "raw_response": text, "parsed_successfully": false }),
                COMPLETED_MESSAGE,
                Some(&ADDITIONAL_INFO),
                None,
            ),
            UpstreamOutcome::Failure(UpstreamFailure::Status(code)) => {
                warn!("Upstream answered {}, substituting a synthesized result", code);
                (
                    serde_json::to_value(self.mock_result(image_url, style))?,
                    COMPLETED_MESSAGE,
                    Some(&ADDITIONAL_INFO),
                    None,
                )
            }
            UpstreamOutcome::Failure(UpstreamFailure::Transport(reason)) => {
                warn!("Upstream unavailable ({}), substituting a demo result", reason);
                (
                    serde_json::to_value(self.mock_result(image_url, style))?,
                    DEMO_MESSAGE,
                    None,
                    Some(DEMO_NOTE),
                )
            }
        };

        let download_links = download_links(&result, &self.cdn_base);

        Ok(SwapEnvelope {
            status: EnvelopeStatus::Success,
            message,
            request: RequestEcho {
                original_image: image_url.to_string(),
                style: style.to_string(),
                timestamp: local_timestamp(),
            },
            result,
            download_links,
            additional_info,
            note,
            channel: self.channel.clone(),
        })
    }

    pub fn mock_result(&self, image_url: &str, style: &str) -> SwapResult {
        let id = self.random.result_id();
        SwapResult {
            processed_image: format!("{}/results/{}.png", self.cdn_base, id),
            id,
            status: "completed".to_string(),
            original_image: image_url.to_string(),
            style: style.to_string(),
            confidence_score: format!("{:.2}", self.random.confidence_score()),
            processing_time: format!("{:.2}s", self.random.processing_seconds()),
            features_detected: FeaturesDetected {
                faces: 1,
                landmarks: 68,
                quality: "good".to_string(),
                orientation: "frontal".to_string(),
            },
            enhancements: Enhancements {
                lighting_adjusted: true,
                skin_smoothing: style == DEFAULT_STYLE,
                color_correction: true,
                resolution_enhanced: true,
            },
        }
    }
}

/// Builds the download link family for a result. Pure string construction;
/// the links are never checked.
pub fn download_links(result: &Value, cdn_base: &str) -> DownloadLinks {
    let id = match result.get("id") {
        Some(Value::String(id)) => id.clone(),
        Some(Value::Null) | None => UNKNOWN_ID.to_string(),
        Some(other) => other.to_string(),
    };
    let base = format!("{}/download/{}", cdn_base, id);

    DownloadLinks {
        original_result: result.get("processed_image").cloned().unwrap_or(Value::Null),
        high_quality: format!("{}/hd.png", base),
        compressed: format!("{}/compressed.jpg", base),
        different_sizes: SizeLinks {
            small: format!("{}/256x256.png", base),
            medium: format!("{}/512x512.png", base),
            large: format!("{}/1024x1024.png", base),
        },
        social_media: SocialLinks {
            instagram: format!("{}/instagram.jpg", base),
            facebook: format!("{}/facebook.jpg", base),
            twitter: format!("{}/twitter.png", base),
        },
    }
}
