use async_trait::async_trait;
use log::{info, warn};
use reqwest::header::{ACCEPT, ORIGIN, REFERER, USER_AGENT};
use reqwest::Client as HttpClient;
use serde_json::Value;
use shared::UpstreamSwapBody;
use std::time::Duration;

use crate::config::GatewayConfig;

const BROWSER_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";
const BROWSER_ACCEPT: &str = "application/json, text/plain, */*";

/// Body of a successful upstream response.
#[derive(Debug, Clone, PartialEq)]
pub enum UpstreamPayload {
    Json(Value),
    Raw(String),
}

impl UpstreamPayload {
    pub fn from_body(text: String) -> Self {
        match serde_json::from_str(&text) {
            Ok(value) => UpstreamPayload::Json(value),
            Err(_) => UpstreamPayload::Raw(text),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum UpstreamFailure {
    /// The service answered with a non-2xx status.
    Status(u16),
    /// The request never produced a usable response.
    Transport(String),
}

#[derive(Debug, Clone, PartialEq)]
pub enum UpstreamOutcome {
    Success(UpstreamPayload),
    Failure(UpstreamFailure),
}

#[async_trait]
pub trait FaceSwapUpstream: Send + Sync {
    async fn swap(&self, body: &UpstreamSwapBody) -> UpstreamOutcome;

    /// Lightweight reachability check, `true` only on a 2xx answer.
    async fn probe(&self) -> bool;
}

#[derive(Clone)]
pub struct ReqwestUpstream {
    http_client: HttpClient,
    endpoint: String,
    origin: String,
    swap_timeout: Duration,
    probe_timeout: Duration,
}

impl ReqwestUpstream {
    pub fn new(config: &GatewayConfig) -> Self {
        Self::with_client(config, HttpClient::new())
    }

    pub fn with_client(config: &GatewayConfig, http_client: HttpClient) -> Self {
        Self {
            http_client,
            endpoint: config.upstream_url.clone(),
            origin: config.upstream_origin.clone(),
            swap_timeout: config.swap_timeout,
            probe_timeout: config.probe_timeout,
        }
    }

    fn referer(&self) -> String {
        format!("{}/", self.origin.trim_end_matches('/'))
    }
}

#[async_trait]
impl FaceSwapUpstream for ReqwestUpstream {
    async fn swap(&self, body: &UpstreamSwapBody) -> UpstreamOutcome {
        let response = match self
            .http_client
            .post(&self.endpoint)
            .header(USER_AGENT, BROWSER_USER_AGENT)
            .header(ACCEPT, BROWSER_ACCEPT)
            .header(ORIGIN, &self.origin)
            .header(REFERER, self.referer())
            .json(body)
            .timeout(self.swap_timeout)
            .send()
            .await
        {
            Ok(response) => response,
            Err(e) => {
                warn!("Face swap upstream request failed: {}", e);
                return UpstreamOutcome::Failure(UpstreamFailure::Transport(e.to_string()));
            }
        };

        let status = response.status();
        info!("Face swap upstream response status: {}", status.as_u16());

        if !status.is_success() {
            return UpstreamOutcome::Failure(UpstreamFailure::Status(status.as_u16()));
        }

        match response.text().await {
            Ok(text) => UpstreamOutcome::Success(UpstreamPayload::from_body(text)),
            Err(e) => {
                warn!("Failed to read face swap upstream body: {}", e);
                UpstreamOutcome::Failure(UpstreamFailure::Transport(e.to_string()))
            }
        }
    }

    async fn probe(&self) -> bool {
        match self
            .http_client
            .head(&self.endpoint)
            .timeout(self.probe_timeout)
            .send()
            .await
        {
            Ok(response) => response.status().is_success(),
            Err(e) => {
                warn!("Face swap upstream probe failed: {}", e);
                false
            }
        }
    }
}


#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::dev::ServerHandle;
    use actix_web::http::StatusCode;
    use actix_web::{web, App, HttpRequest, HttpResponse, HttpServer};
    use serde_json::json;
    use std::collections::HashMap;
    use std::sync::{Arc, Mutex};

    #[test]
    fn test_payload_parses_json_body() {
        let payload = UpstreamPayload::from_body(r#"{"id":"abc","score":0.9}"#.to_string());
        assert_eq!(
            payload,
            UpstreamPayload::Json(json!({"id": "abc", "score": 0.9}))
        );
    }

    #[test]
    fn test_payload_keeps_non_json_text() {
        let payload = UpstreamPayload::from_body("<html>busy</html>".to_string());
        assert_eq!(payload, UpstreamPayload::Raw("<html>busy</html>".to_string()));
    }

    #[test]
    fn test_referer_derived_from_origin() {
        let config = GatewayConfig::default();
        let upstream = ReqwestUpstream::new(&config);
        assert_eq!(upstream.referer(), "https://ng-faceswap.vercel.app/");
        assert_eq!(upstream.swap_timeout, Duration::from_secs(60));
        assert_eq!(upstream.probe_timeout, Duration::from_secs(5));
    }

    /// Request as seen by the loopback upstream.
    #[derive(Debug, Clone)]
    struct SeenRequest {
        method: String,
        path: String,
        headers: HashMap<String, String>,
        body: String,
    }

    /// Starts a one-worker server on a free loopback port that answers every
    /// request with `status` and `body`.
    async fn loopback_upstream(
        status: u16,
        body: &'static str,
    ) -> (String, Arc<Mutex<Vec<SeenRequest>>>, ServerHandle) {
        let seen: Arc<Mutex<Vec<SeenRequest>>> = Arc::new(Mutex::new(Vec::new()));
        let recorder = seen.clone();

        let server = HttpServer::new(move || {
            let recorder = recorder.clone();
            App::new().default_service(web::route().to(
                move |req: HttpRequest, payload: web::Bytes| {
                    let recorder = recorder.clone();
                    async move {
                        let headers = req
                            .headers()
                            .iter()
                            .map(|(name, value)| {
                                (
                                    name.as_str().to_string(),
                                    value.to_str().unwrap_or_default().to_string(),
                                )
                            })
                            .collect();
                        recorder.lock().unwrap().push(SeenRequest {
                            method: req.method().to_string(),
                            path: req.path().to_string(),
                            headers,
                            body: String::from_utf8_lossy(&payload).into_owned(),
                        });
                        HttpResponse::build(StatusCode::from_u16(status).unwrap())
                            .content_type("application/json")
                            .body(body)
                    }
                },
            ))
        })
        .workers(1)
        .bind(("127.0.0.1", 0))
        .unwrap();

        let addr = server.addrs()[0];
        let server = server.run();
        let handle = server.handle();
        actix_web::rt::spawn(server);

        (format!("http://{}/api/faceswap", addr), seen, handle)
    }

    fn upstream_at(url: &str) -> ReqwestUpstream {
        let config = GatewayConfig {
            upstream_url: url.to_string(),
            swap_timeout: Duration::from_secs(5),
            probe_timeout: Duration::from_secs(5),
            ..GatewayConfig::default()
        };
        let client = HttpClient::builder().no_proxy().build().unwrap();
        ReqwestUpstream::with_client(&config, client)
    }

    fn sample_body() -> UpstreamSwapBody {
        UpstreamSwapBody::new("https://example.com/a.png", "realistic")
    }

    #[actix_web::test]
    async fn test_swap_sends_browser_headers_and_json_body() {
        let (url, seen, handle) = loopback_upstream(200, r#"{"id":"X"}"#).await;
        let outcome = upstream_at(&url).swap(&sample_body()).await;

        assert_eq!(
            outcome,
            UpstreamOutcome::Success(UpstreamPayload::Json(json!({"id": "X"})))
        );

        let requests = seen.lock().unwrap().clone();
        assert_eq!(requests.len(), 1);
        let request = &requests[0];
        assert_eq!(request.method, "POST");
        assert_eq!(request.path, "/api/faceswap");
        assert_eq!(request.headers["user-agent"], BROWSER_USER_AGENT);
        assert_eq!(request.headers["accept"], BROWSER_ACCEPT);
        assert_eq!(request.headers["origin"], "https://ng-faceswap.vercel.app");
        assert_eq!(request.headers["referer"], "https://ng-faceswap.vercel.app/");
        assert_eq!(request.headers["content-type"], "application/json");

        let body: Value = serde_json::from_str(&request.body).unwrap();
        assert_eq!(
            body,
            json!({
                "image_url": "https://example.com/a.png",
                "style": "realistic",
                "enhance_quality": true,
                "maintain_original": false
            })
        );

        handle.stop(false).await;
    }

    #[actix_web::test]
    async fn test_swap_maps_error_status() {
        let (url, _, handle) = loopback_upstream(503, r#"{"error":"busy"}"#).await;
        let outcome = upstream_at(&url).swap(&sample_body()).await;

        assert_eq!(outcome, UpstreamOutcome::Failure(UpstreamFailure::Status(503)));
        handle.stop(false).await;
    }

    #[actix_web::test]
    async fn test_swap_keeps_non_json_success_body() {
        let (url, _, handle) = loopback_upstream(200, "<html>done</html>").await;
        let outcome = upstream_at(&url).swap(&sample_body()).await;

        assert_eq!(
            outcome,
            UpstreamOutcome::Success(UpstreamPayload::Raw("<html>done</html>".to_string()))
        );
        handle.stop(false).await;
    }

    #[actix_web::test]
    async fn test_probe_uses_head_and_requires_success() {
        let (url, seen, handle) = loopback_upstream(200, "").await;
        assert!(upstream_at(&url).probe().await);
        assert_eq!(seen.lock().unwrap()[0].method, "HEAD");
        handle.stop(false).await;

        let (url, _, handle) = loopback_upstream(404, "").await;
        assert!(!upstream_at(&url).probe().await);
        handle.stop(false).await;

        let (url, _, handle) = loopback_upstream(500, "").await;
        assert!(!upstream_at(&url).probe().await);
        handle.stop(false).await;
    }

    #[actix_web::test]
    async fn test_unreachable_endpoint_is_transport_failure() {
        let upstream = upstream_at("http://127.0.0.1:9/api/faceswap");

        let outcome = upstream
            .swap(&UpstreamSwapBody::new("https://example.com/a.png", "realistic"))
            .await;
        assert!(matches!(
            outcome,
            UpstreamOutcome::Failure(UpstreamFailure::Transport(_))
        ));
        assert!(!upstream.probe().await);
    }

    #[actix_web::test]
    async fn test_fake_records_swap_bodies() {
        let fake = testing::FakeUpstream::json(json!({"id": "X"}));
        let body = UpstreamSwapBody::new("https://example.com/a.png", "vintage");
        let outcome = fake.swap(&body).await;

        assert_eq!(
            outcome,
            UpstreamOutcome::Success(UpstreamPayload::Json(json!({"id": "X"})))
        );
        assert_eq!(fake.calls(), vec![body]);
        assert!(fake.probe().await);
    }
}
