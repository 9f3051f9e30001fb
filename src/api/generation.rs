use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::extract::{Query, State};
use axum::routing::{get, post};
use axum::{Json, Router};

use crate::error::Result;
use crate::types::{
    Analytics, GenerateContentRequest, GenerateContentResponse, HistoryQuery, HistoryResponse,
    SelectOptionRequest, SelectOptionResponse,
};

use super::extract::{MaybeUser, RequireUser};
use super::AppState;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/generate", post(generate))
        .route("/select", post(select))
        .route("/history", get(history))
        .route("/analytics", get(analytics))
}

async fn generate(
    State(state): State<AppState>,
    user: MaybeUser,
    payload: std::result::Result<Json<GenerateContentRequest>, JsonRejection>,
) -> Result<Json<GenerateContentResponse>> {
    let Json(request) = payload?;
    let response = state.generations.generate(request, user.id()).await?;
    Ok(Json(response))
}

async fn select(
    State(state): State<AppState>,
    user: MaybeUser,
    payload: std::result::Result<Json<SelectOptionRequest>, JsonRejection>,
) -> Result<Json<SelectOptionResponse>> {
    let Json(request) = payload?;
    let response = state.generations.select(request, user.id()).await?;
    Ok(Json(response))
}

async fn history(
    State(state): State<AppState>,
    user: MaybeUser,
    query: std::result::Result<Query<HistoryQuery>, QueryRejection>,
) -> Result<Json<HistoryResponse>> {
    let Query(query) = query?;
    let response = state.generations.history(user.id(), query).await?;
    Ok(Json(response))
}

async fn analytics(
    State(state): State<AppState>,
    RequireUser(user): RequireUser,
) -> Result<Json<Analytics>> {
    Ok(Json(state.generations.analytics(user.id).await?))
}
