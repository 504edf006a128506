use axum::{
    body::Body,
    http::{header, Request, StatusCode},
    response::{IntoResponse, Response},
};
use rust_embed::RustEmbed;

#[derive(RustEmbed)]
#[folder = "frontend/"]
struct FrontendAssets;

const INDEX: &str = "index.html";

/// Serves the embedded web client, falling back to `index.html` so
/// client-side routes resolve.
pub async fn serve_static(req: Request<Body>) -> impl IntoResponse {
    let path = req.uri().path().trim_start_matches('/');

    let candidates = [
        path.to_string(),
        format!("{}.html", path),
        format!("{}/{}", path.trim_end_matches('/'), INDEX),
        INDEX.to_string(),
    ];

    for candidate in candidates.iter().filter(|c| !c.is_empty()) {
        if let Some(content) = FrontendAssets::get(candidate) {
            return response_from_asset(candidate, content.data.into_owned());
        }
    }

    (StatusCode::NOT_FOUND, "Not Found").into_response()
}

fn response_from_asset(path: &str, data: Vec<u8>) -> Response {
    let mime = mime_guess::from_path(path)
        .first_or_octet_stream()
        .to_string();

    let cache = if path == INDEX {
        "no-cache"
    } else {
        "public, max-age=31536000, immutable"
    };

    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, mime), (header::CACHE_CONTROL, cache.to_string())],
        Body::from(data),
    )
        .into_response()
}
