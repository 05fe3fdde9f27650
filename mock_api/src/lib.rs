//! In-memory stand-in for the placeholder users service: the same routes and
//! response shapes, without durable writes.

pub mod handlers;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod state;

use axum::http::header::InvalidHeaderValue;
use axum::http::{header, HeaderValue, Method};
use axum::Router;
use std::net::SocketAddr;
use tokio::net::TcpListener;
use tower_http::cors::{Any, CorsLayer};

use routes::users::users_routes;
use state::MockState;

/// CORS for a browser front end. Without an origin every origin is allowed.
pub fn cors_layer(client_url: Option<&str>) -> Result<CorsLayer, InvalidHeaderValue> {
    let cors = CorsLayer::new()
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([header::CONTENT_TYPE, header::ACCEPT]);
    Ok(match client_url {
        Some(url) => cors.allow_origin(url.parse::<HeaderValue>()?),
        None => cors.allow_origin(Any),
    })
}

pub fn app(state: MockState, cors: CorsLayer) -> Router {
    Router::new().merge(users_routes(state)).layer(cors)
}

/// Serves `state` on an ephemeral localhost port in the background.
pub async fn spawn(state: MockState) -> std::io::Result<SocketAddr> {
    let listener = TcpListener::bind("127.0.0.1:0").await?;
    let addr = listener.local_addr()?;
    let app = app(state, CorsLayer::new());
    tokio::spawn(async move {
        if let Err(e) = axum::serve(listener, app).await {
            log::error!("mock api stopped: {}", e);
        }
    });
    Ok(addr)
}
