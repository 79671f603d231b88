/*
 * Responsibility
 * - 認証済みワークスペース (/dashboard 配下) のシェル
 * - gate が Protected として通したリクエストだけが届く前提
 */
use axum::{Json, extract::Path, http::HeaderMap};

use crate::{
    api::{
        dto::pages::PageShell,
        extractors::CurrentIdentity,
        handlers::pages::{negotiated_locale, path_locale},
    },
    error::AppError,
};

pub async fn dashboard(
    headers: HeaderMap,
    CurrentIdentity(identity): CurrentIdentity,
) -> Json<PageShell> {
    Json(
        PageShell::new("dashboard", negotiated_locale(&headers)).for_user(identity.user_id),
    )
}

pub async fn dashboard_section(
    headers: HeaderMap,
    Path(section): Path<String>,
    CurrentIdentity(identity): CurrentIdentity,
) -> Json<PageShell> {
    Json(
        PageShell::new("dashboard", negotiated_locale(&headers))
            .for_user(identity.user_id)
            .with_section(Some(section)),
    )
}

pub async fn localized_dashboard(
    Path(locale): Path<String>,
    CurrentIdentity(identity): CurrentIdentity,
) -> Result<Json<PageShell>, AppError> {
    Ok(Json(
        PageShell::new("dashboard", path_locale(&locale)?).for_user(identity.user_id),
    ))
}

pub async fn localized_dashboard_section(
    Path((locale, section)): Path<(String, String)>,
    CurrentIdentity(identity): CurrentIdentity,
) -> Result<Json<PageShell>, AppError> {
    Ok(Json(
        PageShell::new("dashboard", path_locale(&locale)?)
            .for_user(identity.user_id)
            .with_section(Some(section)),
    ))
}
