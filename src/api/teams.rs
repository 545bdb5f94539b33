// Team endpoints.
//
// These mirror the backend's team viewset: list is scoped server-side to the
// authenticated user's memberships, create takes caller-supplied JSON, and
// join is an empty POST against the detail route.

use serde_json::Value;

use super::{ApiError, BingoApi};

impl BingoApi {
    /// GET `/api/teams/` -- the teams the current user belongs to.
    pub async fn fetch_teams(&self) -> Result<Value, ApiError> {
        let response = self.get("/api/teams/").await?;
        Self::expect_json(response, "Failed to fetch teams").await
    }

    /// POST `/api/teams/` with caller-supplied team JSON.
    pub async fn create_team(&self, team_data: &Value) -> Result<Value, ApiError> {
        let response = self.post("/api/teams/", Some(team_data)).await?;
        Self::expect_json(response, "Failed to create team").await
    }

    /// POST `/api/teams/{id}/join/` -- join an existing team as a member.
    /// Joining a team twice is a no-op on the server.
    pub async fn join_team(&self, team_id: u64) -> Result<Value, ApiError> {
        let path = format!("/api/teams/{team_id}/join/");
        let response = self.post(&path, None).await?;
        Self::expect_json(response, "Failed to join team").await
    }
}
