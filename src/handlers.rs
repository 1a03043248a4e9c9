use crate::errors::AppError;
use crate::models::{
    EditRequest, EditResponse, PathQuery, ProgressData, ProgressResponse, TitleQuery,
};
use crate::path_state::{
    DEFAULT_TITLE, Edit, apply_edit, build_path, encode_component, parse_date,
    parse_date_range_from_path, progress_bar_data, year_path,
};
use crate::render::{render_progress_bar, render_progress_bar_for_image};
use crate::sitemap::render_sitemap;
use crate::state::AppState;
use crate::status::{share_text, status_text};
use crate::svg::{fallback_svg, progress_bar_svg};
use crate::ui::{Page, render_image_page, render_page};
use axum::{
    Form, Json,
    extract::{Query, State},
    http::{HeaderMap, Uri, header},
    response::{Html, IntoResponse, Redirect, Response},
};
use chrono::{DateTime, Utc};
use tracing::{debug, info};

const SVG_HEADERS: [(header::HeaderName, &str); 2] = [
    (header::CONTENT_TYPE, "image/svg+xml"),
    (header::CACHE_CONTROL, "public, max-age=3600"),
];

/// Interactive page for any path. Paths without a date range redirect to the current year.
pub async fn page(State(state): State<AppState>, headers: HeaderMap, uri: Uri) -> Response {
    let full_path = uri.path();
    let path = state.config.strip_base(full_path);

    if parse_date_range_from_path(path).is_none() {
        let target = year_path(state.config.prefix(), state.clock.now());
        info!("no date range in {full_path}, redirecting to {target}");
        return Redirect::temporary(&target).into_response();
    }

    let data = progress_bar_data(path, state.clock.as_ref());
    let origin = origin(&state, &headers);
    let url = format!("{origin}{full_path}");
    let image_url = format!(
        "{origin}{}/og-image.svg?path={}",
        state.config.prefix(),
        encode_component(full_path)
    );
    let description = status_text(&data);
    let fragment = render_progress_bar(&data);

    Html(render_page(&Page {
        title: &data.title,
        description: &description,
        url: &url,
        image_url: &image_url,
        base_path: &state.config.base_path,
        site_name: &state.config.site_name,
        fragment: &fragment,
    }))
    .into_response()
}

pub async fn og_image(
    State(state): State<AppState>,
    Query(query): Query<PathQuery>,
) -> impl IntoResponse {
    debug!("rendering image for {:?}", query.path);
    let svg = progress_bar_svg(state.config.strip_base(&query.path), state.clock.as_ref());
    (SVG_HEADERS, svg)
}

pub async fn og_image_page(
    State(state): State<AppState>,
    Query(query): Query<PathQuery>,
) -> Html<String> {
    let data = progress_bar_data(state.config.strip_base(&query.path), state.clock.as_ref());
    Html(render_image_page(&render_progress_bar_for_image(&data)))
}

pub async fn fallback_image(
    State(state): State<AppState>,
    Query(query): Query<TitleQuery>,
) -> impl IntoResponse {
    let title = query.title.as_deref().unwrap_or(DEFAULT_TITLE);
    (SVG_HEADERS, fallback_svg(title, &state.config.site_name))
}

pub async fn sitemap(State(state): State<AppState>, headers: HeaderMap) -> impl IntoResponse {
    let today = state.clock.now().date_naive();
    let xml = render_sitemap(&origin(&state, &headers), state.config.prefix(), today);
    ([(header::CONTENT_TYPE, "application/xml")], xml)
}

pub async fn get_progress(
    State(state): State<AppState>,
    Query(query): Query<PathQuery>,
) -> Json<ProgressResponse> {
    let data = progress_bar_data(state.config.strip_base(&query.path), state.clock.as_ref());
    Json(to_response(state.config.prefix(), data))
}

pub async fn get_fragment(
    State(state): State<AppState>,
    Query(query): Query<PathQuery>,
) -> Html<String> {
    let data = progress_bar_data(state.config.strip_base(&query.path), state.clock.as_ref());
    Html(render_progress_bar(&data))
}

pub async fn edit(
    State(state): State<AppState>,
    Json(payload): Json<EditRequest>,
) -> Result<Json<EditResponse>, AppError> {
    let path = apply_edit_request(&state, &payload)?;
    let data = progress_bar_data(state.config.strip_base(&path), state.clock.as_ref());

    Ok(Json(EditResponse {
        status: status_text(&data),
        fragment: render_progress_bar(&data),
        title: data.title,
        path,
    }))
}

pub async fn edit_form(
    State(state): State<AppState>,
    Form(payload): Form<EditRequest>,
) -> Result<Redirect, AppError> {
    let path = apply_edit_request(&state, &payload)?;
    Ok(Redirect::to(&path))
}

fn apply_edit_request(state: &AppState, payload: &EditRequest) -> Result<String, AppError> {
    let current = progress_bar_data(state.config.strip_base(&payload.path), state.clock.as_ref());
    let edit = Edit {
        start: parse_field("start", payload.start.as_deref())?,
        end: parse_field("end", payload.end.as_deref())?,
        title: payload.title.as_deref(),
    };

    let path = apply_edit(state.config.prefix(), &current, &edit);
    info!("edit applied: {} -> {path}", payload.path);
    Ok(path)
}

fn parse_field(name: &str, value: Option<&str>) -> Result<Option<DateTime<Utc>>, AppError> {
    match value.map(str::trim) {
        None | Some("") => Ok(None),
        Some(value) => parse_date(value)
            .map(Some)
            .ok_or_else(|| AppError::bad_request(format!("{name} must be a date like 2024-01-31"))),
    }
}

fn to_response(prefix: &str, data: ProgressData) -> ProgressResponse {
    ProgressResponse {
        path: build_path(prefix, data.start, data.end, &data.title),
        status: status_text(&data),
        share_text: share_text(&data),
        start: data.start,
        end: data.end,
        current: data.current,
        percentage: data.percentage,
        title: data.title,
    }
}

fn origin(state: &AppState, headers: &HeaderMap) -> String {
    if let Some(url) = &state.config.site_url {
        return url.clone();
    }

    let host = headers
        .get(header::HOST)
        .and_then(|value| value.to_str().ok())
        .unwrap_or("localhost");
    format!("http://{host}")
}
