// Bingo-card endpoints.
//
// All mutations send the shared header map captured at construction; the
// backend rejects state-changing requests without the CSRF token.

use serde_json::{json, Value};

use super::{ApiError, BingoApi};

impl BingoApi {
    /// POST `/api/bingo-cards/` with the configured card year.
    pub async fn create_card(&self) -> Result<Value, ApiError> {
        let body = json!({ "year": self.card_year });
        let response = self.post_csrf("/api/bingo-cards/", Some(&body)).await?;
        Self::expect_json(response, "Failed to create bingo card").await
    }

    /// GET `/api/bingo-cards/` -- the current user's cards.
    pub async fn fetch_my_cards(&self) -> Result<Value, ApiError> {
        let response = self.get("/api/bingo-cards/").await?;
        Self::expect_json(response, "Failed to fetch bingo cards").await
    }

    /// POST `/api/bingo-cards/{id}/update_prediction/` with caller-supplied
    /// prediction JSON (see `models::PredictionUpdate` for the typed shape).
    pub async fn update_prediction(
        &self,
        card_id: u64,
        prediction_data: &Value,
    ) -> Result<Value, ApiError> {
        let path = format!("/api/bingo-cards/{card_id}/update_prediction/");
        let response = self.post_csrf(&path, Some(prediction_data)).await?;
        Self::expect_json(response, "Failed to update prediction").await
    }

    /// POST `/api/bingo-cards/{id}/finalize/` -- lock the card in for the
    /// year. On failure the server's own `error` message is preferred over
    /// the fixed fallback.
    pub async fn finalize_card(&self, card_id: u64) -> Result<Value, ApiError> {
        let path = format!("/api/bingo-cards/{card_id}/finalize/");
        let response = self.post_csrf(&path, None).await?;

        if response.status().is_success() {
            return Ok(response.json().await?);
        }

        match response.json::<Value>().await {
            Ok(body) => match body.get("error").and_then(Value::as_str) {
                Some(message) => Err(ApiError::Rejected(message.to_string())),
                None => Err(ApiError::Failed("Failed to finalize card")),
            },
            Err(_) => Err(ApiError::Failed("Failed to finalize card")),
        }
    }

    /// POST `/api/bingo-cards/{id}/verify_prediction/` -- mark one of the
    /// card's predictions correct or incorrect.
    pub async fn verify_prediction(
        &self,
        card_id: u64,
        prediction_id: u64,
        is_correct: bool,
    ) -> Result<Value, ApiError> {
        let path = format!("/api/bingo-cards/{card_id}/verify_prediction/");
        let body = json!({ "prediction_id": prediction_id, "is_correct": is_correct });
        let response = self.post_csrf(&path, Some(&body)).await?;
        Self::expect_json(response, "Failed to verify prediction").await
    }
}
