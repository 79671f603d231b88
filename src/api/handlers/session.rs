/*
 * Responsibility
 * - GET /api/me: gate が解決した呼び出し元をそのまま返す
 */
use axum::Json;

use crate::{api::extractors::CurrentIdentity, services::identity::Identity};

pub async fn me(CurrentIdentity(identity): CurrentIdentity) -> Json<Identity> {
    Json(identity)
}
