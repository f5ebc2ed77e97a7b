use serde::Serialize;
use std::sync::Arc;

use crate::catalog::{Limitations, LIMITATIONS};
use crate::envelope::{local_timestamp, EnvelopeStatus};
use crate::faceswap::client::FaceSwapUpstream;
use crate::faceswap::random::RandomSource;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ServiceState {
    Online,
    Offline,
}

#[derive(Debug, Serialize)]
pub struct ApiStatus {
    pub face_swap_service: ServiceState,
    pub image_processing: &'static str,
    pub style_transfer: &'static str,
}

/// Advertised counters, drawn fresh on every call.
#[derive(Debug, Serialize)]
pub struct UsageStats {
    pub processed_today: u32,
    pub successful_swaps: u32,
    pub average_processing_time: &'static str,
    pub success_rate: &'static str,
}

#[derive(Debug, Serialize)]
pub struct StatusEnvelope {
    pub status: EnvelopeStatus,
    pub system: &'static str,
    pub timestamp: String,
    pub api_status: ApiStatus,
    pub usage_stats: UsageStats,
    pub limitations: &'static Limitations,
    pub channel: String,
}

#[derive(Clone)]
pub struct StatusService {
    upstream: Arc<dyn FaceSwapUpstream>,
    random: Arc<dyn RandomSource>,
    channel: String,
}

impl StatusService {
    pub fn new(
        upstream: Arc<dyn FaceSwapUpstream>,
        random: Arc<dyn RandomSource>,
        channel: String,
    ) -> Self {
        Self {
            upstream,
            random,
            channel,
        }
    }

    pub async fn report(&self) -> StatusEnvelope {
        let face_swap_service = if self.upstream.probe().await {
            ServiceState::Online
        } else {
            ServiceState::Offline
        };
        log::info!("Face swap upstream probe: {:?}", face_swap_service);

        StatusEnvelope {
            status: EnvelopeStatus::Success,
            system: "AI Face Swap API",
            timestamp: local_timestamp(),
            api_status: ApiStatus {
                face_swap_service,
                image_processing: "active",
                style_transfer: "active",
            },
            usage_stats: UsageStats {
                processed_today: self.random.processed_today(),
                successful_swaps: self.random.successful_swaps(),
                average_processing_time: "15 seconds",
                success_rate: "92%",
            },
            limitations: &LIMITATIONS,
            channel: self.channel.clone(),
        }
    }
}
