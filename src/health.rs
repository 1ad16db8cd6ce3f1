//! Tiny HTTP surface for hosting platforms that probe the process.

use std::convert::Infallible;
use std::net::SocketAddr;
use std::time::Instant;

use hyper::header::{HeaderValue, CONTENT_TYPE};
use hyper::service::{make_service_fn, service_fn};
use hyper::{Body, Method, Request, Response, Server, StatusCode};
use log::info;
use serde_json::json;

const BANNER: &str = "MACD Divergence Pro Bot - Running!";

pub struct HealthServer {
    port: u16,
    started: Instant,
}

impl HealthServer {
    pub fn new(port: u16) -> Self {
        Self {
            port,
            started: Instant::now(),
        }
    }

    /// Serves until the process exits. A bind failure is returned rather
    /// than panicking so the caller can keep scanning without the probe.
    pub async fn run(self) -> Result<(), hyper::Error> {
        let addr = SocketAddr::from(([0, 0, 0, 0], self.port));
        let started = self.started;

        let make_svc = make_service_fn(move |_conn| async move {
            Ok::<_, Infallible>(service_fn(move |req| handle(req, started)))
        });

        let server = Server::try_bind(&addr)?.serve(make_svc);
        info!("health server listening on http://{addr}");
        server.await
    }
}

async fn handle(req: Request<Body>, started: Instant) -> Result<Response<Body>, Infallible> {
    if req.method() != Method::GET {
        return Ok(text_response(
            StatusCode::METHOD_NOT_ALLOWED,
            "method not allowed",
        ));
    }

    let response = match req.uri().path() {
        "/" => text_response(StatusCode::OK, BANNER),
        "/health" => {
            let payload = json!({
                "status": "ok",
                "uptime_seconds": started.elapsed().as_secs(),
            });
            json_response(payload.to_string())
        }
        _ => text_response(StatusCode::NOT_FOUND, "not found"),
    };
    Ok(response)
}

fn text_response(status: StatusCode, body: &'static str) -> Response<Body> {
    let mut response = Response::new(Body::from(body));
    *response.status_mut() = status;
    response
}

fn json_response(body: String) -> Response<Body> {
    let mut response = Response::new(Body::from(body));
    response
        .headers_mut()
        .insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
    response
}
