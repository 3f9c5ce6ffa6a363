use std::sync::Arc;

use axum::{
    Json,
    extract::State,
    http::{HeaderMap, HeaderValue, header},
    response::{Html, IntoResponse},
};

use crate::wallet_browser::{
    app::contents,
    state::BrowserWalletState,
    types::{BrowserApiResponse, BrowserRequest, BrowserResponse, PageHello},
};

pub(crate) async fn serve_index(
    State(state): State<Arc<BrowserWalletState>>,
) -> impl IntoResponse {
    let mut headers = HeaderMap::new();
    headers.insert(header::CONTENT_TYPE, HeaderValue::from_static("text/html; charset=utf-8"));
    headers.insert(header::CACHE_CONTROL, HeaderValue::from_static("no-store"));
    (headers, Html(contents::index_html(state.session_token())))
}

pub(crate) async fn post_hello(
    State(state): State<Arc<BrowserWalletState>>,
    Json(hello): Json<PageHello>,
) -> Json<BrowserApiResponse> {
    if hello.installed {
        info!("wallet page connected, injected provider found");
    } else {
        warn!("wallet page connected, but no injected provider was found");
    }
    state.set_hello(hello);
    Json(BrowserApiResponse::ok())
}

pub(crate) async fn get_next_request(
    State(state): State<Arc<BrowserWalletState>>,
) -> Json<BrowserApiResponse<BrowserRequest>> {
    match state.read_next_request() {
        Some(request) => Json(BrowserApiResponse::with_data(request)),
        None => Json(BrowserApiResponse::error("No pending request")),
    }
}

pub(crate) async fn post_response(
    State(state): State<Arc<BrowserWalletState>>,
    Json(response): Json<BrowserResponse>,
) -> Json<BrowserApiResponse> {
    if !state.has_request(&response.id) {
        return Json(BrowserApiResponse::error("Unknown request id"));
    }
    trace!(id = %response.id, ok = response.error.is_none(), "wallet page responded");
    state.add_response(response);
    Json(BrowserApiResponse::ok())
}
