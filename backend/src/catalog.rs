//! Constant tables served by the gateway: the style presets, the static
//! limitation texts and the discovery document.

use serde::ser::{SerializeMap, Serializer};
use serde::Serialize;

use crate::config::GatewayConfig;
use crate::envelope::EnvelopeStatus;

/// Formats advertised to callers. `gif` is accepted by validation but not listed.
pub const ADVERTISED_FORMATS: [&str; 4] = ["jpg", "jpeg", "png", "webp"];

#[derive(Debug, Serialize)]
pub struct StyleInfo {
    #[serde(skip)]
    pub key: &'static str,
    pub name: &'static str,
    pub description: &'static str,
    pub best_for: &'static str,
    pub output_quality: &'static str,
}

pub static STYLES: [StyleInfo; 5] = [
    StyleInfo {
        key: "realistic",
        name: "Realistic Face Swap",
        description: "Natural-looking face replacement with realistic lighting and skin tones",
        best_for: "Portraits, professional photos",
        output_quality: "High",
    },
    StyleInfo {
        key: "artistic",
        name: "Artistic Style",
        description: "Creative face swap with artistic filters and effects",
        best_for: "Creative projects, social media",
        output_quality: "Medium-High",
    },
    StyleInfo {
        key: "cartoon",
        name: "Cartoon/Anime",
        description: "Transform face into cartoon or anime style",
        best_for: "Fun photos, animations",
        output_quality: "Medium",
    },
    StyleInfo {
        key: "celebrity",
        name: "Celebrity Lookalike",
        description: "Swap face with celebrity features",
        best_for: "Entertainment, comparisons",
        output_quality: "High",
    },
    StyleInfo {
        key: "vintage",
        name: "Vintage Style",
        description: "Retro and vintage photo effects",
        best_for: "Old-style photos, nostalgia",
        output_quality: "Medium",
    },
];

/// Serializes a style table as an object keyed by style key, in table order.
pub struct StyleTable(pub &'static [StyleInfo]);

impl Serialize for StyleTable {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for style in self.0 {
            map.serialize_entry(style.key, style)?;
        }
        map.end()
    }
}

#[derive(Debug, Serialize)]
pub struct RecommendedSettings {
    pub image_size: &'static str,
    pub format: &'static str,
    pub face_visibility: &'static str,
    pub background: &'static str,
}

pub static RECOMMENDED_SETTINGS: RecommendedSettings = RecommendedSettings {
    image_size: "Minimum 512x512 pixels",
    format: "JPG, PNG, WebP",
    face_visibility: "Clear, well-lit face required",
    background: "Simple backgrounds work best",
};

#[derive(Serialize)]
pub struct StylesEnvelope<'a> {
    pub status: EnvelopeStatus,
    pub available_styles: StyleTable,
    pub recommended_settings: &'static RecommendedSettings,
    pub channel: &'a str,
}

pub fn styles(channel: &str) -> StylesEnvelope<'_> {
    StylesEnvelope {
        status: EnvelopeStatus::Success,
        available_styles: StyleTable(&STYLES),
        recommended_settings: &RECOMMENDED_SETTINGS,
        channel,
    }
}

/// Descriptive text attached to completed swaps; not derived from the result.
#[derive(Debug, Serialize)]
pub struct AdditionalInfo {
    pub processing_time: &'static str,
    pub image_quality: &'static str,
    pub format: &'static str,
    pub watermarked: bool,
}

pub static ADDITIONAL_INFO: AdditionalInfo = AdditionalInfo {
    processing_time: "10-30 seconds",
    image_quality: "HD (1024x1024)",
    format: "PNG",
    watermarked: false,
};

#[derive(Debug, Serialize)]
pub struct Limitations {
    pub max_image_size: &'static str,
    pub supported_formats: &'static [&'static str],
    pub rate_limit: &'static str,
    pub processing_timeout: &'static str,
}

pub static LIMITATIONS: Limitations = Limitations {
    max_image_size: "5MB",
    supported_formats: &ADVERTISED_FORMATS,
    rate_limit: "10 requests per minute",
    processing_timeout: "60 seconds",
};

#[derive(Debug, Serialize)]
pub struct Usage {
    pub face_swap: &'static str,
    pub styles: &'static str,
    pub status: &'static str,
    pub examples: Vec<String>,
}

#[derive(Debug, Serialize)]
pub struct Parameters {
    pub action: &'static str,
    pub image_url: &'static str,
    pub style: &'static str,
}

#[derive(Debug, Serialize)]
pub struct DiscoveryDocument<'a> {
    pub status: EnvelopeStatus,
    pub message: String,
    pub usage: Usage,
    pub parameters: Parameters,
    pub channel: &'a str,
}

pub fn discovery(config: &GatewayConfig) -> DiscoveryDocument<'_> {
    let base = &config.public_base_url;
    DiscoveryDocument {
        status: EnvelopeStatus::Success,
        message: format!("AI Face Swap API - {}", config.channel),
        usage: Usage {
            face_swap: "/?action=swap&image_url=YOUR_IMAGE_URL&style=realistic",
            styles: "/?action=styles",
            status: "/?action=status",
            examples: vec![
                format!(
                    "{}/?action=swap&image_url=https://example.com/photo.jpg&style=realistic",
                    base
                ),
                format!("{}/?action=styles", base),
                format!("{}/?action=status", base),
            ],
        },
        parameters: Parameters {
            action: "swap, styles, status",
            image_url: "Direct URL to face image (required for swap)",
            style: "realistic, artistic, cartoon, celebrity (default: realistic)",
        },
        channel: &config.channel,
    }
}
