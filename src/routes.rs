// HTTP surface - comment board, static game payloads and metrics export

use axum::{
    extract::State,
    http::{header::CONTENT_TYPE, StatusCode},
    middleware,
    response::{Html, IntoResponse, Json},
    routing::{get, post},
    Extension, Router,
};
use serde::Serialize;
use tower_http::cors::CorsLayer;
use tracing::debug;

use crate::{
    app_state::AppState,
    error::{AppError, AppResult},
    infrastructure::{
        middleware::{request_tracking_middleware, CommentForm},
        AccessNote,
    },
    models::{Game, GameInfo},
};

pub const MAIN_PAGE_IMAGE_URL: &str =
    "https://clubrunner.blob.core.windows.net/00000001374/Images/Game_Night_Logo_Color.png";

const PROMETHEUS_CONTENT_TYPE: &str = "text/plain; version=0.0.4; charset=utf-8";

/// Response of both write endpoints
#[derive(Debug, Serialize)]
pub struct CommentSubmission {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub comments: Option<Vec<String>>,
}

impl CommentSubmission {
    fn accepted(comments: Vec<String>) -> Self {
        Self {
            success: true,
            comments: Some(comments),
        }
    }

    fn rejected() -> Self {
        Self {
            success: false,
            comments: None,
        }
    }
}

// HTTP Handlers

pub async fn index_handler(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let comments = state.store.list_all().await?;
    let page = state.views.render_index(&comments, MAIN_PAGE_IMAGE_URL)?;

    Ok((
        Extension(AccessNote::new("Index page displayed", "Index")),
        Html(page),
    ))
}

/// Serves both `POST /` and `POST /add_comment`.
pub async fn add_comment_handler(
    State(state): State<AppState>,
    form: CommentForm,
) -> AppResult<impl IntoResponse> {
    let text = form.comment_text.unwrap_or_default();

    match state.store.append(&text).await {
        Ok(comment) => {
            let comments = state.store.list_all().await?;
            let note = AccessNote::new(format!("Comment added for game: {}", comment.text), "Comment");
            let texts = comments.into_iter().map(|c| c.text).collect();
            Ok((Extension(note), Json(CommentSubmission::accepted(texts))))
        }
        Err(AppError::Validation(reason)) => {
            debug!("Rejected comment: {}", reason);
            Ok((
                Extension(AccessNote::new("Comment rejected", "Comment")),
                Json(CommentSubmission::rejected()),
            ))
        }
        Err(err) => Err(err),
    }
}

pub async fn game_info_handler(game: Game) -> (Extension<AccessNote>, Json<GameInfo>) {
    let note = AccessNote::new(
        format!("{} information requested", game.display_name()),
        game.display_name(),
    );
    (Extension(note), Json(game.info()))
}

pub async fn metrics_handler(State(state): State<AppState>) -> impl IntoResponse {
    let body = state.metrics.export_prometheus_metrics().await;
    ([(CONTENT_TYPE, PROMETHEUS_CONTENT_TYPE)], body)
}

pub async fn not_found_handler() -> StatusCode {
    StatusCode::NOT_FOUND
}

/// Board routes run behind the request tracking middleware; `/metrics` is
/// mounted beside them and is neither logged nor counted.
pub fn create_router(state: AppState) -> Router {
    let mut board = Router::new()
        .route("/", get(index_handler).post(add_comment_handler))
        .route("/add_comment", post(add_comment_handler));

    for game in Game::ALL {
        board = board.route(game.path(), get(move || game_info_handler(game)));
    }

    let board = board
        .fallback(not_found_handler)
        .layer(middleware::from_fn_with_state(
            state.clone(),
            request_tracking_middleware,
        ));

    Router::new()
        .merge(board)
        .route("/metrics", get(metrics_handler))
        .layer(CorsLayer::permissive())
        .with_state(state)
}
