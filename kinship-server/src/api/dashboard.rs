use std::sync::Arc;

use axum::{Extension, Json, extract::State};

use crate::{api::auth::AuthContext, api::dto::DashboardStatsDto, error::ServerResult, state::AppState};

#[utoipa::path(
    get,
    path = "/api/dashboard/stats",
    tag = "dashboard",
    responses(
        (status = 200, description = "Person and relation counts for the caller", body = DashboardStatsDto),
    )
)]
pub async fn dashboard_stats(
    State(state): State<Arc<AppState>>,
    Extension(auth): Extension<AuthContext>,
) -> ServerResult<Json<DashboardStatsDto>> {
    let stats = state.manager.dashboard_stats(&auth.user_id).await?;
    Ok(Json(stats.into()))
}
