use actix_web::http::{header, Method, StatusCode};
use actix_web::middleware::DefaultHeaders;
use actix_web::{web, HttpRequest, HttpResponse};
use log::{error, info};
use shared::{Action, DEFAULT_STYLE};
use std::str::FromStr;
use std::sync::Arc;
use url::form_urlencoded;

use crate::catalog;
use crate::config::GatewayConfig;
use crate::envelope::{client_error, internal_error, json_response, JSON_CONTENT_TYPE};
use crate::error::GatewayError;
use crate::faceswap::client::FaceSwapUpstream;
use crate::faceswap::random::RandomSource;
use crate::faceswap::service::SwapService;
use crate::status::StatusService;

const MISSING_IMAGE_URL: &str = "Image URL is required for face swap";
const INVALID_ACTION: &str = "Invalid action. Use: swap, styles, status";

/// Query parameters of a gateway call. Empty values count as absent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GatewayQuery {
    pub action: Option<String>,
    pub image_url: Option<String>,
    pub style: String,
}

impl GatewayQuery {
    pub fn parse(query_string: &str) -> Self {
        let mut action = None;
        let mut image_url = None;
        let mut style = None;

        for (key, value) in form_urlencoded::parse(query_string.as_bytes()) {
            let slot: &mut Option<String> = match key.as_ref() {
                "action" => &mut action,
                "image_url" => &mut image_url,
                "style" => &mut style,
                _ => continue,
            };
            // first occurrence wins
            if slot.is_none() {
                *slot = Some(value.into_owned());
            }
        }

        Self {
            action: action.filter(|v| !v.is_empty()),
            image_url: image_url.filter(|v| !v.is_empty()),
            style: style
                .filter(|v| !v.is_empty())
                .unwrap_or_else(|| DEFAULT_STYLE.to_string()),
        }
    }
}

/// Handler dependencies, registered as app data on every worker.
#[derive(Clone)]
pub struct GatewayServices {
    config: web::Data<GatewayConfig>,
    swap: web::Data<SwapService>,
    status: web::Data<StatusService>,
}

impl GatewayServices {
    pub fn new(
        config: GatewayConfig,
        upstream: Arc<dyn FaceSwapUpstream>,
        random: Arc<dyn RandomSource>,
    ) -> Self {
        let swap = SwapService::new(
            upstream.clone(),
            random.clone(),
            config.cdn_base.clone(),
            config.channel.clone(),
        );
        let status = StatusService::new(upstream, random, config.channel.clone());
        Self {
            config: web::Data::new(config),
            swap: web::Data::new(swap),
            status: web::Data::new(status),
        }
    }
}

/// Headers carried by every response, including errors and preflights.
pub fn cors_headers() -> DefaultHeaders {
    DefaultHeaders::new()
        .add((header::CONTENT_TYPE, JSON_CONTENT_TYPE))
        .add((header::ACCESS_CONTROL_ALLOW_ORIGIN, "*"))
        .add((header::ACCESS_CONTROL_ALLOW_METHODS, "GET, POST, OPTIONS"))
        .add((header::ACCESS_CONTROL_ALLOW_HEADERS, "Content-Type"))
}

pub fn configure_routes(cfg: &mut web::ServiceConfig, services: &GatewayServices) {
    cfg.app_data(services.config.clone())
        .app_data(services.swap.clone())
        .app_data(services.status.clone())
        .service(web::resource("/{tail:.*}").route(web::route().to(gateway)));
}

async fn gateway(
    req: HttpRequest,
    config: web::Data<GatewayConfig>,
    swap: web::Data<SwapService>,
    status: web::Data<StatusService>,
) -> HttpResponse {
    if req.method() == Method::OPTIONS {
        return HttpResponse::Ok().finish();
    }

    let query = GatewayQuery::parse(req.query_string());
    let result = dispatch(&query, &config, &swap, &status).await;
    respond(result, &query, &config.channel)
}

/// Turns a failure that escaped dispatch into the 500 envelope.
fn respond(
    result: Result<HttpResponse, GatewayError>,
    query: &GatewayQuery,
    channel: &str,
) -> HttpResponse {
    match result {
        Ok(response) => response,
        Err(e) => {
            error!("Request for action {:?} failed: {}", query.action, e);
            internal_error(&e, channel)
        }
    }
}

async fn dispatch(
    query: &GatewayQuery,
    config: &GatewayConfig,
    swap: &SwapService,
    status: &StatusService,
) -> Result<HttpResponse, GatewayError> {
    let Some(action) = query.action.as_deref() else {
        return json_response(StatusCode::OK, &catalog::discovery(config));
    };

    let Ok(action) = Action::from_str(action) else {
        info!("Unknown action requested: {}", action);
        return client_error(INVALID_ACTION, &config.channel);
    };
    info!("Dispatching action: {}", action);

    match action {
        Action::Swap => match query.image_url.as_deref() {
            Some(image_url) => {
                let reply = swap.perform(image_url, &query.style).await?;
                json_response(StatusCode::OK, &reply)
            }
            None => client_error(MISSING_IMAGE_URL, &config.channel),
        },
        Action::Styles => json_response(StatusCode::OK, &catalog::styles(&config.channel)),
        Action::Status => json_response(StatusCode::OK, &status.report().await),
    }
}
