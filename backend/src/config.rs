use std::env;
use std::time::Duration;

pub const DEFAULT_UPSTREAM_URL: &str = "https://ng-faceswap.vercel.app/api/faceswap";
pub const DEFAULT_UPSTREAM_ORIGIN: &str = "https://ng-faceswap.vercel.app";
pub const DEFAULT_CDN_BASE: &str = "https://faceswap-cdn.vercel.app";
pub const DEFAULT_PUBLIC_BASE_URL: &str = "https://your-api.workers.dev";
pub const DEFAULT_CHANNEL: &str = "@old_studio786";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for {name}: {value}")]
    InvalidNumber { name: &'static str, value: String },
    #[error("{name} must be at least one second")]
    ZeroTimeout { name: &'static str },
}

#[derive(Debug, Clone)]
pub struct GatewayConfig {
    pub port: u16,
    pub upstream_url: String,
    pub upstream_origin: String,
    pub cdn_base: String,
    pub public_base_url: String,
    pub channel: String,
    pub swap_timeout: Duration,
    pub probe_timeout: Duration,
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            port: 8081,
            upstream_url: DEFAULT_UPSTREAM_URL.to_string(),
            upstream_origin: DEFAULT_UPSTREAM_ORIGIN.to_string(),
            cdn_base: DEFAULT_CDN_BASE.to_string(),
            public_base_url: DEFAULT_PUBLIC_BASE_URL.to_string(),
            channel: DEFAULT_CHANNEL.to_string(),
            swap_timeout: Duration::from_secs(60),
            probe_timeout: Duration::from_secs(5),
        }
    }
}

impl GatewayConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Builds the config from an arbitrary variable lookup; unset or empty
    /// variables keep their defaults.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        let get = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

        Ok(Self {
            port: parse_number("PORT", get("PORT"), defaults.port)?,
            upstream_url: get("FACESWAP_UPSTREAM_URL").unwrap_or(defaults.upstream_url),
            upstream_origin: get("FACESWAP_UPSTREAM_ORIGIN").unwrap_or(defaults.upstream_origin),
            cdn_base: get("FACESWAP_CDN_BASE")
                .map(|v| v.trim_end_matches('/').to_string())
                .unwrap_or(defaults.cdn_base),
            public_base_url: get("PUBLIC_BASE_URL")
                .map(|v| v.trim_end_matches('/').to_string())
                .unwrap_or(defaults.public_base_url),
            channel: get("CHANNEL").unwrap_or(defaults.channel),
            swap_timeout: parse_timeout(
                "SWAP_TIMEOUT_SECS",
                get("SWAP_TIMEOUT_SECS"),
                defaults.swap_timeout,
            )?,
            probe_timeout: parse_timeout(
                "PROBE_TIMEOUT_SECS",
                get("PROBE_TIMEOUT_SECS"),
                defaults.probe_timeout,
            )?,
        })
    }

    pub fn bind_address(&self) -> String {
        format!("0.0.0.0:{}", self.port)
    }
}

fn parse_number<T: std::str::FromStr>(
    name: &'static str,
    raw: Option<String>,
    default: T,
) -> Result<T, ConfigError> {
    match raw {
        Some(value) => value
            .trim()
            .parse()
            .map_err(|_| ConfigError::InvalidNumber { name, value }),
        None => Ok(default),
    }
}

// A zero timeout makes reqwest fail every call before it is sent.
fn parse_timeout(
    name: &'static str,
    raw: Option<String>,
    default: Duration,
) -> Result<Duration, ConfigError> {
    match parse_number(name, raw, default.as_secs())? {
        0 => Err(ConfigError::ZeroTimeout { name }),
        secs => Ok(Duration::from_secs(secs)),
    }
}
