//! JSON API server for the client shell
//!
//! Exposes the three loader operations over HTTP and serves the static
//! shell for everything else. Each request constructs its own loader, so
//! there is no shared mutable state to coordinate.

use anyhow::Result;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde_json::json;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use crate::Site;

/// Server state
struct ServerState {
    site: Site,
}

/// Start the API server
pub async fn start(site: &Site, ip: &str, port: u16) -> Result<()> {
    let state = Arc::new(ServerState { site: site.clone() });

    let app = Router::new()
        .route("/api/posts", get(list_posts))
        .route("/api/posts/:slug", get(get_post))
        .route("/api/slugs", get(list_slugs))
        .route("/api/site", get(site_info))
        .fallback_service(
            ServeDir::new(&site.static_dir).append_index_html_on_directories(true),
        )
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    // Parse address - handle "localhost" specially
    let bind_ip = if ip == "localhost" { "127.0.0.1" } else { ip };
    let addr: SocketAddr = format!("{}:{}", bind_ip, port).parse()?;

    println!("Server running at http://{}:{}", ip, port);
    println!("Press Ctrl+C to stop.");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// `GET /api/posts` - published post summaries, newest first
async fn list_posts(State(state): State<Arc<ServerState>>) -> Response {
    match state.site.loader().list_summaries() {
        Ok(posts) => Json(posts).into_response(),
        Err(e) => internal_error(e),
    }
}

/// `GET /api/posts/:slug` - one post with its rendered HTML body
async fn get_post(
    State(state): State<Arc<ServerState>>,
    Path(slug): Path<String>,
) -> Response {
    match state.site.loader().get_post(&slug) {
        Ok(Some(post)) => Json(post).into_response(),
        Ok(None) => (
            StatusCode::NOT_FOUND,
            Json(json!({ "error": "post not found" })),
        )
            .into_response(),
        Err(e) => internal_error(e),
    }
}

/// `GET /api/slugs` - route descriptors for static path generation
async fn list_slugs(State(state): State<Arc<ServerState>>) -> Response {
    match state.site.loader().list_slugs() {
        Ok(routes) => Json(routes).into_response(),
        Err(e) => internal_error(e),
    }
}

/// `GET /api/site` - branding and contact links for the shell
async fn site_info(State(state): State<Arc<ServerState>>) -> Response {
    let config = &state.site.config;
    Json(json!({
        "user": config.user,
        "contact": config.contact,
        "site": config.site,
    }))
    .into_response()
}

fn internal_error(e: impl std::fmt::Display) -> Response {
    tracing::error!("request failed: {}", e);
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(json!({ "error": "internal error" })),
    )
        .into_response()
}
