use axum::{extract::State, http::StatusCode, Json};
use serde::{Deserialize, Serialize};

use crate::error::{AppError, AppResult};
use crate::models::{ArticleProjection, UserHistoryEntry};
use crate::services::recommendations::{self, RECOMMENDATION_LIMIT};

use super::AppState;

// Request/Response types

#[derive(Debug, Deserialize)]
pub struct RecommendRequest {
    #[serde(default, rename = "userId")]
    pub user_id: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct RecommendResponse {
    pub recommended_articles: Vec<ArticleProjection>,
}

#[derive(Debug, Serialize)]
pub struct UserHistoryResponse {
    pub user_history: Vec<UserHistoryEntry>,
}

// Handlers

/// Health check endpoint
pub async fn health_check() -> StatusCode {
    StatusCode::OK
}

/// Recommends up to five articles for a user
///
/// History-driven when the user has viewed articles, uniform random
/// otherwise. An empty userId counts as missing, as upstream treated it.
pub async fn recommend_articles(
    State(state): State<AppState>,
    Json(request): Json<RecommendRequest>,
) -> AppResult<Json<RecommendResponse>> {
    let user_id = request
        .user_id
        .filter(|id| !id.is_empty())
        .ok_or_else(|| AppError::InvalidInput("Missing userId in request".to_string()))?;

    let history = state.store.fetch_user_history(&user_id).await?;
    let history_ids: Vec<String> = history.into_iter().map(|entry| entry.article_id).collect();

    let articles = state.store.fetch_articles().await?;

    let recommended = if history_ids.is_empty() {
        tracing::info!(user_id = %user_id, "No viewing history, falling back to random selection");
        recommendations::random_articles(&articles, RECOMMENDATION_LIMIT)
    } else {
        recommendations::recommend_for_user(&state.predictor, &history_ids, &articles).await
    };

    tracing::info!(
        user_id = %user_id,
        history_count = history_ids.len(),
        recommended_count = recommended.len(),
        "Recommendations served"
    );

    Ok(Json(RecommendResponse {
        recommended_articles: recommended,
    }))
}

/// Returns every record in the userHistory collection, unfiltered
pub async fn user_history(
    State(state): State<AppState>,
) -> AppResult<Json<UserHistoryResponse>> {
    let entries = state.store.fetch_all_history().await?;
    tracing::debug!(count = entries.len(), "User history listed");
    Ok(Json(UserHistoryResponse {
        user_history: entries,
    }))
}
