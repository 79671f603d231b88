/*
 * Responsibility
 * - 公開ページ (landing / sign-in / sign-up) のシェル
 * - locale は Path か Accept-Language から決める
 */
use axum::{
    Json,
    extract::Path,
    http::{HeaderMap, header},
};

use crate::{
    api::dto::pages::PageShell,
    error::AppError,
    i18n::{Locale, match_locale},
};

pub(crate) fn negotiated_locale(headers: &HeaderMap) -> Locale {
    match_locale(
        headers
            .get(header::ACCEPT_LANGUAGE)
            .and_then(|v| v.to_str().ok()),
    )
}

pub(crate) fn path_locale(locale: &str) -> Result<Locale, AppError> {
    locale
        .parse::<Locale>()
        .map_err(|_| AppError::not_found("page"))
}

/// Signed-in callers never get here: the gate redirects them to the workspace.
pub async fn landing(headers: HeaderMap) -> Json<PageShell> {
    Json(PageShell::new("landing", negotiated_locale(&headers)))
}

pub async fn localized_landing(Path(locale): Path<String>) -> Result<Json<PageShell>, AppError> {
    Ok(Json(PageShell::new("landing", path_locale(&locale)?)))
}

pub async fn sign_in(headers: HeaderMap) -> Json<PageShell> {
    Json(PageShell::new("sign-in", negotiated_locale(&headers)))
}

pub async fn sign_up(headers: HeaderMap) -> Json<PageShell> {
    Json(PageShell::new("sign-up", negotiated_locale(&headers)))
}

pub async fn not_found() -> AppError {
    AppError::not_found("page")
}
