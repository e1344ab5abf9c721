use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Json,
    routing::get,
    Router,
};
use std::sync::Arc;
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::models::{ApiResponse, RankedEntry, TeamReport, TeamSummary};
use crate::services::{AggregationEngine, TeamResolver};
use crate::store::RecordStore;

/// Shared, read-only handles for every request.
#[derive(Clone)]
pub struct AppState {
    store: Arc<RecordStore>,
    resolver: Arc<TeamResolver>,
}

impl AppState {
    pub fn new(store: RecordStore) -> Self {
        let resolver = TeamResolver::from_store(&store);
        Self {
            store: Arc::new(store),
            resolver: Arc::new(resolver),
        }
    }
}

type ApiError = (StatusCode, Json<ApiResponse<()>>);

pub async fn serve(store: RecordStore, port: u16) -> anyhow::Result<()> {
    let app = create_router().with_state(AppState::new(store));

    let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{}", port)).await?;
    tracing::info!("IPL dashboard API listening on port {}", port);

    axum::serve(listener, app).await?;
    Ok(())
}

pub fn create_router() -> Router<AppState> {
    Router::new()
        .route("/health", get(health_check))
        .route("/teams", get(list_teams_handler))
        .route("/teams/{name}/report", get(team_report_handler))
        .route("/leaders/chasers", get(top_chasers_handler))
        .route("/leaders/awards", get(top_awards_handler))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(CorsLayer::permissive())
        )
}

// Health check endpoint
async fn health_check() -> Json<ApiResponse<&'static str>> {
    Json(ApiResponse::success("IPL dashboard API is running"))
}

// GET /teams - Team selector contents
async fn list_teams_handler(State(state): State<AppState>) -> Json<ApiResponse<Vec<TeamSummary>>> {
    let teams = state
        .resolver
        .list_teams()
        .iter()
        .map(|name| TeamSummary {
            name: name.clone(),
            short_code: TeamResolver::short_code(name).to_string(),
        })
        .collect();

    Json(ApiResponse::success(teams))
}

// GET /teams/{name}/report - All eight views for one team
async fn team_report_handler(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> Result<Json<ApiResponse<TeamReport>>, ApiError> {
    if !state.resolver.contains(&name) {
        tracing::warn!("Report requested for unknown team {:?}", name);
        return Err((
            StatusCode::NOT_FOUND,
            Json(ApiResponse::error(format!("Unknown team: {}", name))),
        ));
    }

    let report = AggregationEngine::new().team_report(&state.store, &name);
    Ok(Json(ApiResponse::success(report)))
}

// GET /leaders/chasers - Most wins by wickets, all teams
async fn top_chasers_handler(State(state): State<AppState>) -> Json<ApiResponse<Vec<RankedEntry>>> {
    Json(ApiResponse::success(AggregationEngine::new().top_chasing_teams(&state.store)))
}

// GET /leaders/awards - Most player-of-the-match awards, all teams
async fn top_awards_handler(State(state): State<AppState>) -> Json<ApiResponse<Vec<RankedEntry>>> {
    Json(ApiResponse::success(
        AggregationEngine::new().top_award_winners_overall(&state.store),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::fixtures::*;
    use axum::body::{to_bytes, Body};
    use axum::http::Request;
    use serde_json::Value;
    use tower::ServiceExt;

    async fn get_json(uri: &str) -> (StatusCode, Value) {
        let app = create_router().with_state(AppState::new(sample_store()));
        let response = app
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn test_health() {
        let (status, body) = get_json("/health").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["success"], true);
    }

    #[tokio::test]
    async fn test_teams_lists_codes() {
        let (status, body) = get_json("/teams").await;
        assert_eq!(status, StatusCode::OK);
        let teams = body["data"].as_array().unwrap();
        assert_eq!(teams.len(), 4);
        assert_eq!(teams[0]["name"], CSK);
        assert_eq!(teams[0]["short_code"], "CSK");
    }

    #[tokio::test]
    async fn test_team_report() {
        let (status, body) = get_json("/teams/Chennai%20Super%20Kings/report").await;
        assert_eq!(status, StatusCode::OK);
        let report = &body["data"];
        assert_eq!(report["short_code"], "CSK");
        assert_eq!(report["toss"]["win_pct"], 75.0);
        assert_eq!(report["trophies"]["total"], 2);
        assert_eq!(report["winning_style"][0]["result"], "wickets");
        assert_eq!(report["wins_per_season"].as_array().unwrap().len(), 3);
    }

    #[tokio::test]
    async fn test_unknown_team_is_not_found() {
        let (status, body) = get_json("/teams/Gujarat%20Titans/report").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["success"], false);
        assert_eq!(body["error"], "Unknown team: Gujarat Titans");
    }

    #[tokio::test]
    async fn test_leaders() {
        let (_, chasers) = get_json("/leaders/chasers").await;
        assert_eq!(chasers["data"][0]["name"], CSK);
        assert_eq!(chasers["data"][0]["count"], 2);

        let (_, awards) = get_json("/leaders/awards").await;
        assert_eq!(awards["data"].as_array().unwrap().len(), 5);
        assert_eq!(awards["data"][0]["name"], "MS Dhoni");
    }
}
