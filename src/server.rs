//! HTTP presenter: the static page and the JSON place endpoint.

use axum::{
    extract::State,
    response::{Html, IntoResponse, Response},
    routing::get,
    Router,
};
use http::{
    header::{CACHE_CONTROL, CONTENT_TYPE},
    HeaderValue, StatusCode,
};
use serde::Serialize;
use std::sync::Arc;
use std::time::Instant;
use tokio::net::TcpListener;
use tower_http::{set_header::SetResponseHeaderLayer, trace::TraceLayer};
use tracing::{error, info};

use crate::config::Settings;
use crate::core::{display::render_result, standings::compute_place, templates::index_page};
use crate::error::{WatchError, WatchResult};
use crate::storage::FeedCache;

pub const PLACE_ENDPOINT: &str = "/api/place";

const JSON_CONTENT_TYPE: &str = "application/json; charset=utf-8";
const TEXT_CONTENT_TYPE: &str = "text/plain; charset=utf-8";

/// Everything a request needs, built once at startup.
pub struct Watch {
    pub target_name: String,
    pub target_form: i64,
    pub cache: FeedCache,
    page: String,
}

pub type SharedState = Arc<Watch>;

impl Watch {
    pub fn new(target_name: String, target_form: i64, cache: FeedCache) -> WatchResult<Self> {
        let page = index_page(&target_name, PLACE_ENDPOINT)?;
        Ok(Watch {
            target_name,
            target_form,
            cache,
            page,
        })
    }
}

#[derive(Serialize)]
struct ErrorBody {
    error: String,
}

impl IntoResponse for WatchError {
    fn into_response(self) -> Response {
        error!("{self}");
        json_response(
            StatusCode::INTERNAL_SERVER_ERROR,
            &ErrorBody {
                error: self.to_string(),
            },
        )
    }
}

fn json_response<T: Serialize>(status: StatusCode, payload: &T) -> Response {
    match serde_json::to_vec(payload) {
        Ok(body) => (status, [(CONTENT_TYPE, JSON_CONTENT_TYPE)], body).into_response(),
        Err(e) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            [(CONTENT_TYPE, TEXT_CONTENT_TYPE)],
            e.to_string(),
        )
            .into_response(),
    }
}

async fn index(State(watch): State<SharedState>) -> Html<String> {
    Html(watch.page.clone())
}

async fn place(State(watch): State<SharedState>) -> WatchResult<Response> {
    let rows = watch.cache.get_or_refresh(Instant::now()).await?;
    let place = compute_place(&rows, &watch.target_name, watch.target_form);
    let result = render_result(
        &watch.target_name,
        watch.target_form,
        place,
        watch.cache.source(),
    );
    Ok(json_response(StatusCode::OK, &result))
}

async fn not_found() -> Response {
    (
        StatusCode::NOT_FOUND,
        [(CONTENT_TYPE, TEXT_CONTENT_TYPE)],
        "Not found",
    )
        .into_response()
}

pub fn build_router(state: SharedState) -> Router {
    Router::new()
        .route("/", get(index))
        .route(PLACE_ENDPOINT, get(place))
        .fallback(not_found)
        .layer(SetResponseHeaderLayer::overriding(
            CACHE_CONTROL,
            HeaderValue::from_static("no-store"),
        ))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

pub async fn serve(settings: &Settings, state: SharedState) -> WatchResult<()> {
    let address = format!("0.0.0.0:{}", settings.port);
    let listener = TcpListener::bind(&address)
        .await
        .map_err(|e| WatchError::Server(format!("Could not bind {address}. {e}")))?;

    info!("Listening on http://localhost:{}/", settings.port);
    axum::serve(listener, build_router(state))
        .await
        .map_err(|e| WatchError::Server(e.to_string()))
}
