mod catalog;
mod config;
mod envelope;
mod error;
mod faceswap;
mod routes;
mod status;

use actix_web::{App, HttpServer};
use config::GatewayConfig;
use faceswap::client::{FaceSwapUpstream, ReqwestUpstream};
use faceswap::random::{RandomSource, ThreadRandom};
use routes::{configure_routes, cors_headers, GatewayServices};
use std::sync::Arc;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenv::dotenv().ok();
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

    let config = GatewayConfig::from_env().map_err(|e| {
        log::error!("Invalid configuration: {}", e);
        std::io::Error::other(format!("Configuration error: {}", e))
    })?;

    log::info!("Face swap upstream: {}", config.upstream_url);
    log::info!(
        "Upstream timeouts: swap {}s, probe {}s",
        config.swap_timeout.as_secs(),
        config.probe_timeout.as_secs()
    );

    let upstream: Arc<dyn FaceSwapUpstream> = Arc::new(ReqwestUpstream::new(&config));
    let random: Arc<dyn RandomSource> = Arc::new(ThreadRandom);

    let bind_address = config.bind_address();
    let services = GatewayServices::new(config, upstream, random);

    log::info!("Starting server on {}", bind_address);

    HttpServer::new(move || {
        App::new()
            .wrap(cors_headers())
            .configure(|cfg| configure_routes(cfg, &services))
    })
    .bind(&bind_address)?
    .run()
    .await
}
