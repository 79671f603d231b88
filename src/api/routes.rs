/*
 * Responsibility
 * - アプリの URL 構造を定義
 * - 公開ページ / ワークスペース / API / locale 付きパスを 1 つの Router にまとめる
 * - アクセス制御はここでは決めない (gate の GatePolicy が担当)
 */
use axum::{Router, routing::get};

use crate::state::AppState;

use crate::api::handlers::{
    health::health,
    pages::{landing, localized_landing, not_found, sign_in, sign_up},
    session::me,
    sitemap::sitemap,
    workspace::{dashboard, dashboard_section, localized_dashboard, localized_dashboard_section},
};

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(landing))
        .route("/sign-in", get(sign_in))
        .route("/sign-up", get(sign_up))
        .route("/dashboard", get(dashboard))
        .route("/dashboard/{*section}", get(dashboard_section))
        .route("/api/me", get(me))
        .route("/health", get(health))
        .route("/sitemap.xml", get(sitemap))
        .route("/{locale}", get(localized_landing))
        .route("/{locale}/dashboard", get(localized_dashboard))
        .route(
            "/{locale}/dashboard/{*section}",
            get(localized_dashboard_section),
        )
        .fallback(not_found)
}
