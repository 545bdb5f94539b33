// Typed views of the backend's JSON payloads.
//
// The API wrappers pass response bodies through unchanged as
// `serde_json::Value`; these structs are the optional decoding layer on top.
// Field names and enum casing match the backend's wire format exactly
// (snake_case fields, lowercase categories and statuses, uppercase quarter
// codes).

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use thiserror::Error;

/// A bingo card is a 5x5 grid; positions run 0 through 24.
pub const GRID_SIZE: u8 = 25;

// ---------------------------------------------------------------------------
// Enums
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Politics,
    Economics,
    Society,
    Wildcard,
}

/// Quarter a prediction is expected to come true in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TargetPeriod {
    Q2,
    Q3,
    Q4,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PredictionStatus {
    Pending,
    Correct,
    Incorrect,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    Member,
}

#[derive(Debug, Error)]
#[error("unknown category `{0}` (expected politics, economics, society, or wildcard)")]
pub struct ParseCategoryError(String);

impl FromStr for Category {
    type Err = ParseCategoryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "politics" => Ok(Category::Politics),
            "economics" => Ok(Category::Economics),
            "society" => Ok(Category::Society),
            "wildcard" => Ok(Category::Wildcard),
            other => Err(ParseCategoryError(other.to_string())),
        }
    }
}

#[derive(Debug, Error)]
#[error("unknown target period `{0}` (expected Q2, Q3, or Q4)")]
pub struct ParseTargetPeriodError(String);

impl FromStr for TargetPeriod {
    type Err = ParseTargetPeriodError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Q2" | "q2" => Ok(TargetPeriod::Q2),
            "Q3" | "q3" => Ok(TargetPeriod::Q3),
            "Q4" | "q4" => Ok(TargetPeriod::Q4),
            other => Err(ParseTargetPeriodError(other.to_string())),
        }
    }
}

// ---------------------------------------------------------------------------
// Response payloads
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Deserialize)]
pub struct Team {
    pub id: u64,
    pub name: String,
    pub created_by: u64,
    pub created_at: DateTime<Utc>,
    pub is_active: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TeamMembership {
    pub id: u64,
    pub team: u64,
    pub user: u64,
    pub role: Role,
    pub joined_at: DateTime<Utc>,
    pub is_active: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Prediction {
    pub id: u64,
    pub position: u8,
    pub category: Category,
    pub prediction_text: String,
    pub target_period: TargetPeriod,
    pub status: PredictionStatus,
    pub verified_by: Option<u64>,
    pub verified_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct BingoCard {
    pub id: u64,
    pub user: u64,
    pub team: u64,
    pub year: i32,
    #[serde(default)]
    pub predictions: Vec<Prediction>,
    pub created_at: DateTime<Utc>,
    pub is_active: bool,
}

// ---------------------------------------------------------------------------
// Request payloads
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize)]
pub struct NewTeam {
    pub name: String,
}

/// Body for the update-prediction endpoint: one square of the grid.
#[derive(Debug, Clone, Serialize)]
pub struct PredictionUpdate {
    pub position: u8,
    pub category: Category,
    pub prediction_text: String,
    pub target_period: TargetPeriod,
}

// ---------------------------------------------------------------------------
// Unit tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn deserialize_team() {
        let value = json!({
            "id": 3,
            "name": "The Forecasters",
            "created_by": 12,
            "created_at": "2025-01-15T10:30:00.123456Z",
            "is_active": true
        });

        let team: Team = serde_json::from_value(value).expect("should deserialize");
        assert_eq!(team.id, 3);
        assert_eq!(team.name, "The Forecasters");
        assert_eq!(team.created_by, 12);
        assert!(team.is_active);
    }

    #[test]
    fn deserialize_membership_role() {
        let value = json!({
            "id": 1,
            "team": 3,
            "user": 12,
            "role": "admin",
            "joined_at": "2025-01-15T10:30:00Z",
            "is_active": true
        });

        let membership: TeamMembership = serde_json::from_value(value).unwrap();
        assert_eq!(membership.role, Role::Admin);
    }

    #[test]
    fn deserialize_card_with_nested_predictions() {
        let value = json!({
            "id": 7,
            "user": 12,
            "team": 3,
            "year": 2025,
            "predictions": [
                {
                    "id": 41,
                    "position": 0,
                    "category": "politics",
                    "prediction_text": "Snap election called",
                    "target_period": "Q3",
                    "status": "pending",
                    "verified_by": null,
                    "verified_at": null
                },
                {
                    "id": 42,
                    "position": 24,
                    "category": "wildcard",
                    "prediction_text": "Comet visible to naked eye",
                    "target_period": "Q4",
                    "status": "correct",
                    "verified_by": 5,
                    "verified_at": "2025-11-02T08:00:00Z"
                }
            ],
            "created_at": "2025-01-15T10:30:00Z",
            "is_active": true
        });

        let card: BingoCard = serde_json::from_value(value).expect("should deserialize");
        assert_eq!(card.year, 2025);
        assert_eq!(card.predictions.len(), 2);
        assert_eq!(card.predictions[0].category, Category::Politics);
        assert_eq!(card.predictions[0].status, PredictionStatus::Pending);
        assert!(card.predictions[0].verified_by.is_none());
        assert_eq!(card.predictions[1].position, 24);
        assert_eq!(card.predictions[1].target_period, TargetPeriod::Q4);
        assert_eq!(card.predictions[1].verified_by, Some(5));
    }

    #[test]
    fn deserialize_card_without_predictions_field() {
        // List endpoints may omit the nested predictions entirely.
        let value = json!({
            "id": 7,
            "user": 12,
            "team": 3,
            "year": 2026,
            "created_at": "2026-01-01T00:00:00Z",
            "is_active": true
        });

        let card: BingoCard = serde_json::from_value(value).expect("should deserialize");
        assert!(card.predictions.is_empty());
    }

    #[test]
    fn prediction_update_wire_format() {
        let update = PredictionUpdate {
            position: 12,
            category: Category::Economics,
            prediction_text: "Rate cut announced".to_string(),
            target_period: TargetPeriod::Q2,
        };

        let value = serde_json::to_value(&update).unwrap();
        assert_eq!(
            value,
            json!({
                "position": 12,
                "category": "economics",
                "prediction_text": "Rate cut announced",
                "target_period": "Q2"
            })
        );
    }

    #[test]
    fn new_team_wire_format() {
        let team = NewTeam {
            name: "Crystal Ball Gazers".to_string(),
        };
        let value = serde_json::to_value(&team).unwrap();
        assert_eq!(value, json!({ "name": "Crystal Ball Gazers" }));
    }

    #[test]
    fn category_from_str() {
        assert_eq!("politics".parse::<Category>().unwrap(), Category::Politics);
        assert_eq!("wildcard".parse::<Category>().unwrap(), Category::Wildcard);
        let err = "sports".parse::<Category>().unwrap_err();
        assert!(err.to_string().contains("sports"));
    }

    #[test]
    fn target_period_from_str_accepts_lowercase() {
        assert_eq!("Q2".parse::<TargetPeriod>().unwrap(), TargetPeriod::Q2);
        assert_eq!("q4".parse::<TargetPeriod>().unwrap(), TargetPeriod::Q4);
        assert!("Q1".parse::<TargetPeriod>().is_err());
    }
}
