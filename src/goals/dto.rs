use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use uuid::Uuid;

use crate::goals::repo::{Goal, GoalStatus, GoalType};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateGoalRequest {
    #[serde(rename = "type")]
    pub goal_type: Option<GoalType>,
    pub target_value: Option<f64>,
    pub start_value: Option<f64>,
    pub current_value: Option<f64>,
    #[serde(default, with = "time::serde::rfc3339::option")]
    pub start_date: Option<OffsetDateTime>,
    #[serde(default, with = "time::serde::rfc3339::option")]
    pub target_date: Option<OffsetDateTime>,
    pub is_shared: Option<bool>,
    pub action_plan: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateGoalRequest {
    pub target_value: Option<f64>,
    pub current_value: Option<f64>,
    #[serde(default, with = "time::serde::rfc3339::option")]
    pub target_date: Option<OffsetDateTime>,
    pub status: Option<GoalStatus>,
    pub is_shared: Option<bool>,
    pub action_plan: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GoalListQuery {
    pub status: Option<GoalStatus>,
}

#[derive(Debug, Serialize)]
pub struct GoalData {
    pub goal: Goal,
}

#[derive(Debug, Serialize)]
pub struct GoalsData {
    pub goals: Vec<Goal>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProgressData {
    pub goal_id: Uuid,
    #[serde(rename = "type")]
    pub goal_type: GoalType,
    pub progress: f64,
    pub current_value: f64,
    pub target_value: f64,
    pub status: GoalStatus,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn create_request_accepts_wire_form() {
        let req: CreateGoalRequest = serde_json::from_str(
            r#"{"type":"water_intake","targetValue":2000,"targetDate":"2024-12-31T00:00:00Z"}"#,
        )
        .unwrap();
        assert_eq!(req.goal_type, Some(GoalType::WaterIntake));
        assert_eq!(req.target_value, Some(2000.0));
        assert!(req.target_date.is_some());
        assert!(req.start_value.is_none());
    }

    #[test]
    fn progress_data_wire_shape() {
        let json = serde_json::to_value(ProgressData {
            goal_id: Uuid::new_v4(),
            goal_type: GoalType::WeightLoss,
            progress: 50.0,
            current_value: 72.5,
            target_value: 70.0,
            status: GoalStatus::Active,
        })
        .unwrap();
        assert_eq!(json["type"], "weight_loss");
        assert_eq!(json["progress"], 50.0);
        assert_eq!(json["status"], "active");
        assert_eq!(json["currentValue"], 72.5);
    }
}
