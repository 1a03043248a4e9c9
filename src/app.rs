use crate::handlers;
use crate::state::AppState;
use axum::{
    Router,
    routing::{get, post},
};
use tower_http::trace::TraceLayer;

pub fn router(state: AppState) -> Router {
    let prefix = state.config.prefix().to_string();

    Router::new()
        .route(&format!("{prefix}/og-image.svg"), get(handlers::og_image))
        .route(&format!("{prefix}/og-image.html"), get(handlers::og_image_page))
        .route(&format!("{prefix}/fallback.svg"), get(handlers::fallback_image))
        .route(&format!("{prefix}/sitemap.xml"), get(handlers::sitemap))
        .route(&format!("{prefix}/api/progress"), get(handlers::get_progress))
        .route(&format!("{prefix}/api/fragment"), get(handlers::get_fragment))
        .route(&format!("{prefix}/api/edit"), post(handlers::edit))
        .route(&format!("{prefix}/edit"), post(handlers::edit_form))
        .fallback(handlers::page)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
