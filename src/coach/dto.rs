use serde::{Deserialize, Serialize};

use crate::coach::messages::AchievementType;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PromptQuery {
    pub context: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CelebrationRequest {
    pub achievement_type: Option<AchievementType>,
    pub value: Option<i64>,
}

#[derive(Debug, Serialize)]
pub struct CoachMessage {
    pub message: String,
    #[serde(rename = "type")]
    pub kind: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub context: Option<String>,
    #[serde(rename = "achievementType", skip_serializing_if = "Option::is_none")]
    pub achievement_type: Option<AchievementType>,
}

impl CoachMessage {
    pub fn new(message: impl Into<String>, kind: &'static str) -> Self {
        Self {
            message: message.into(),
            kind,
            context: None,
            achievement_type: None,
        }
    }
}
