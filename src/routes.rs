use std::sync::Arc;

use axum::{
    Router,
    body::Body,
    extract::{DefaultBodyLimit, MatchedPath},
    http::{HeaderName, Request, header},
    middleware,
    routing::{get, post},
};
use tower::ServiceBuilder;
use tower_http::{
    compression::CompressionLayer,
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    trace::TraceLayer,
};

use crate::{middlewares::identity_middleware, state::AppState};

const REQUEST_ID_HEADER: &str = "x-request-id";
const MAX_BODY_BYTES: usize = 64 * 1024;

pub fn init_router(app_state: AppState) -> Router {
    let state = Arc::new(app_state);

    let app = Router::new().route("/", get(crate::controllers::home::index));

    let manga_route = Router::new()
        .route("/", get(crate::controllers::manga::index))
        .route("/{id}", get(crate::controllers::manga::show))
        .route("/{id}/chapters", get(crate::controllers::manga::chapters))
        .route(
            "/{id}/chapters/{number}/pages",
            get(crate::controllers::manga::pages),
        );

    let library_route = Router::new()
        .route(
            "/",
            get(crate::controllers::library::index).post(crate::controllers::library::store),
        )
        .route(
            "/{manga_id}",
            get(crate::controllers::library::show).delete(crate::controllers::library::destroy),
        );

    let favorites_route = Router::new()
        .route(
            "/",
            get(crate::controllers::favorites::index).post(crate::controllers::favorites::store),
        )
        .route(
            "/{manga_id}",
            get(crate::controllers::favorites::show)
                .delete(crate::controllers::favorites::destroy),
        );

    let profile_route = Router::new()
        .route(
            "/",
            get(crate::controllers::profile::show).put(crate::controllers::profile::update),
        )
        .route("/admin", get(crate::controllers::profile::admin));

    let admin_route = Router::new().route("/promote", post(crate::controllers::admin::promote));

    // Every per-user route resolves the caller the same way; absence is
    // handled by each controller.
    let user_routes = Router::new()
        .nest("/library", library_route)
        .nest("/favorites", favorites_route)
        .nest("/profile", profile_route)
        .nest("/admin", admin_route)
        .layer(DefaultBodyLimit::max(MAX_BODY_BYTES))
        .layer(middleware::from_fn_with_state(
            state.clone(),
            identity_middleware,
        ));

    let x_request_id_header = HeaderName::from_static(REQUEST_ID_HEADER);
    let request_id_middleware = ServiceBuilder::new()
        .layer(SetRequestIdLayer::new(
            x_request_id_header.clone(),
            MakeRequestUuid,
        ))
        .layer(
            TraceLayer::new_for_http().make_span_with(|request: &Request<Body>| {
                let request_id = request
                    .headers()
                    .get(REQUEST_ID_HEADER)
                    .and_then(|val| val.to_str().ok())
                    .unwrap_or_default();
                let user_agent = request
                    .headers()
                    .get(header::USER_AGENT)
                    .and_then(|val| val.to_str().ok())
                    .unwrap_or_default();

                let matched_path = request
                    .extensions()
                    .get::<MatchedPath>()
                    .map(MatchedPath::as_str);

                tracing::info_span!(
                    "http_request",
                    request_id,
                    method = ?request.method(),
                    uri = ?request.uri(),
                    path = matched_path,
                    version = ?request.version(),
                    user_agent,
                )
            }),
        )
        .layer(PropagateRequestIdLayer::new(x_request_id_header));

    app.nest("/manga", manga_route)
        .merge(user_routes)
        .layer(CompressionLayer::new())
        .layer(request_id_middleware)
        .with_state(state)
}
