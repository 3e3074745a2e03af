use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use shared::{Vote, VoteRequest};
use tracing::info;

use crate::domain::VoteService;

/// Application state containing the VoteService
#[derive(Clone)]
pub struct AppState {
    pub vote_service: VoteService,
}

impl AppState {
    pub fn new(vote_service: VoteService) -> Self {
        Self { vote_service }
    }
}

/// Axum handler function for GET /votes/raw
pub async fn list_raw_votes(State(state): State<AppState>) -> impl IntoResponse {
    info!("GET /votes/raw");

    match state.vote_service.list_raw_votes().await {
        Ok(votes) => (StatusCode::OK, Json(votes)).into_response(),
        Err(e) => {
            tracing::error!("Error listing votes: {:?}", e);
            (StatusCode::INTERNAL_SERVER_ERROR, "Error listing votes").into_response()
        }
    }
}

/// Axum handler function for POST /vote
pub async fn record_vote(
    State(state): State<AppState>,
    Json(request): Json<VoteRequest>,
) -> impl IntoResponse {
    info!("POST /vote - request: {:?}", request);

    let vote = Vote::from(request);
    match state.vote_service.record_vote(&vote).await {
        Ok(()) => (StatusCode::CREATED, Json(vote)).into_response(),
        Err(e) => {
            tracing::error!("Error recording vote: {:?}", e);
            (StatusCode::BAD_REQUEST, e.to_string()).into_response()
        }
    }
}

/// Axum handler function for DELETE /vote
pub async fn revoke_vote(
    State(state): State<AppState>,
    Json(request): Json<VoteRequest>,
) -> impl IntoResponse {
    info!("DELETE /vote - request: {:?}", request);

    let vote = Vote::from(request);
    match state.vote_service.revoke_vote(&vote).await {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(e) => {
            tracing::error!("Error revoking vote: {:?}", e);
            (StatusCode::BAD_REQUEST, e.to_string()).into_response()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::DbConnection;
    use shared::Category;

    /// Helper to create test handlers
    async fn setup_test_state() -> AppState {
        let db = DbConnection::init_test().await.expect("Failed to create test database");
        AppState::new(VoteService::new(db))
    }

    fn request(participant: &str, attraction_id: &str, category: Category) -> VoteRequest {
        VoteRequest {
            participant: participant.to_string(),
            attraction_id: attraction_id.to_string(),
            category,
        }
    }

    #[tokio::test]
    async fn test_record_vote_handler() {
        let state = setup_test_state().await;

        let response = record_vote(
            State(state.clone()),
            Json(request("Participant 1", "D1", Category::Dining)),
        )
        .await
        .into_response();
        assert_eq!(response.status(), StatusCode::CREATED);

        let list_response = list_raw_votes(State(state)).await.into_response();
        assert_eq!(list_response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_record_vote_validation_error() {
        let state = setup_test_state().await;

        // Empty participant should fail validation
        let response = record_vote(
            State(state),
            Json(request("", "D1", Category::Dining)),
        )
        .await
        .into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_revoke_vote_handler() {
        let state = setup_test_state().await;

        let record_response = record_vote(
            State(state.clone()),
            Json(request("Participant 2", "S1", Category::Shopping)),
        )
        .await
        .into_response();
        assert_eq!(record_response.status(), StatusCode::CREATED);

        let revoke_response = revoke_vote(
            State(state.clone()),
            Json(request("Participant 2", "S1", Category::Shopping)),
        )
        .await
        .into_response();
        assert_eq!(revoke_response.status(), StatusCode::NO_CONTENT);

        let votes = state.vote_service.list_raw_votes().await.unwrap();
        assert!(votes.is_empty());
    }

    #[tokio::test]
    async fn test_revoke_missing_vote_is_no_content() {
        let state = setup_test_state().await;

        let response = revoke_vote(
            State(state),
            Json(request("Participant 3", "C1", Category::Casino)),
        )
        .await
        .into_response();
        assert_eq!(response.status(), StatusCode::NO_CONTENT);
    }
}
